// platform.rs
//
// PlatformProperties: the immutable, per-ISA policy bundle that decides
// every NaN/edge-case choice the rounding kernel and operator layer defer
// to.

use std::fmt;

use crate::nan_mode::{
    BinaryNaNPropagationMode, FMAInfZeroQNaNResult, FloatToFloatConversionNaNPropagationMode,
    QuietNaNFormat, TernaryNaNPropagationMode, UnaryNaNPropagationMode,
};
use crate::sign::Sign;

/// An immutable bundle of per-ISA choices for NaN payload selection,
/// tininess, and FMA edge-case behavior.
///
/// Values are constructed once (see the `PLATFORM_*` constants) and
/// shared by reference across every [`FloatProperties`][crate::format::FloatProperties]
/// and [`DynamicFloat`][crate::DynamicFloat] that uses them; `Clone` is
/// cheap (a handful of `Copy` fields) rather than free, matching the
/// small `Copy`-able context-struct pattern used elsewhere in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlatformProperties {
    pub canonical_nan_sign: Sign,
    pub canonical_nan_mantissa_msb: bool,
    pub canonical_nan_mantissa_second_to_msb: bool,
    pub canonical_nan_mantissa_rest: bool,
    pub std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode,
    pub fma_nan_propagation_mode: TernaryNaNPropagationMode,
    pub fma_inf_zero_qnan_result: FMAInfZeroQNaNResult,
    pub round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode,
    pub next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode,
    pub scale_b_nan_propagation_mode: UnaryNaNPropagationMode,
    pub sqrt_nan_propagation_mode: UnaryNaNPropagationMode,
    pub rsqrt_nan_propagation_mode: UnaryNaNPropagationMode,
    pub float_to_float_conversion_nan_propagation_mode: FloatToFloatConversionNaNPropagationMode,
}

/// Keyword-style field overrides for [`PlatformProperties::new`], one
/// optional slot per field. Unset fields are copied from the base value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformPropertiesOverrides {
    pub canonical_nan_sign: Option<Sign>,
    pub canonical_nan_mantissa_msb: Option<bool>,
    pub canonical_nan_mantissa_second_to_msb: Option<bool>,
    pub canonical_nan_mantissa_rest: Option<bool>,
    pub std_bin_ops_nan_propagation_mode: Option<BinaryNaNPropagationMode>,
    pub fma_nan_propagation_mode: Option<TernaryNaNPropagationMode>,
    pub fma_inf_zero_qnan_result: Option<FMAInfZeroQNaNResult>,
    pub round_to_integral_nan_propagation_mode: Option<UnaryNaNPropagationMode>,
    pub next_up_or_down_nan_propagation_mode: Option<UnaryNaNPropagationMode>,
    pub scale_b_nan_propagation_mode: Option<UnaryNaNPropagationMode>,
    pub sqrt_nan_propagation_mode: Option<UnaryNaNPropagationMode>,
    pub rsqrt_nan_propagation_mode: Option<UnaryNaNPropagationMode>,
    pub float_to_float_conversion_nan_propagation_mode:
        Option<FloatToFloatConversionNaNPropagationMode>,
}

impl PlatformProperties {
    /// Constructs a new bundle from `base` with any of `overrides` applied.
    /// Mirrors the Python binding's `PlatformProperties(base, **kwargs)`
    /// constructor (`examples/original_source/tests/test_simple_soft_float.py`,
    /// `TestPlatformProperties.test_constructor_signature`).
    pub fn new(base: PlatformProperties, overrides: PlatformPropertiesOverrides) -> Self {
        PlatformProperties {
            canonical_nan_sign: overrides.canonical_nan_sign.unwrap_or(base.canonical_nan_sign),
            canonical_nan_mantissa_msb: overrides
                .canonical_nan_mantissa_msb
                .unwrap_or(base.canonical_nan_mantissa_msb),
            canonical_nan_mantissa_second_to_msb: overrides
                .canonical_nan_mantissa_second_to_msb
                .unwrap_or(base.canonical_nan_mantissa_second_to_msb),
            canonical_nan_mantissa_rest: overrides
                .canonical_nan_mantissa_rest
                .unwrap_or(base.canonical_nan_mantissa_rest),
            std_bin_ops_nan_propagation_mode: overrides
                .std_bin_ops_nan_propagation_mode
                .unwrap_or(base.std_bin_ops_nan_propagation_mode),
            fma_nan_propagation_mode: overrides
                .fma_nan_propagation_mode
                .unwrap_or(base.fma_nan_propagation_mode),
            fma_inf_zero_qnan_result: overrides
                .fma_inf_zero_qnan_result
                .unwrap_or(base.fma_inf_zero_qnan_result),
            round_to_integral_nan_propagation_mode: overrides
                .round_to_integral_nan_propagation_mode
                .unwrap_or(base.round_to_integral_nan_propagation_mode),
            next_up_or_down_nan_propagation_mode: overrides
                .next_up_or_down_nan_propagation_mode
                .unwrap_or(base.next_up_or_down_nan_propagation_mode),
            scale_b_nan_propagation_mode: overrides
                .scale_b_nan_propagation_mode
                .unwrap_or(base.scale_b_nan_propagation_mode),
            sqrt_nan_propagation_mode: overrides
                .sqrt_nan_propagation_mode
                .unwrap_or(base.sqrt_nan_propagation_mode),
            rsqrt_nan_propagation_mode: overrides
                .rsqrt_nan_propagation_mode
                .unwrap_or(base.rsqrt_nan_propagation_mode),
            float_to_float_conversion_nan_propagation_mode: overrides
                .float_to_float_conversion_nan_propagation_mode
                .unwrap_or(base.float_to_float_conversion_nan_propagation_mode),
        }
    }

    /// The quiet-NaN bit convention implied by this platform's canonical
    /// NaN: `Standard` if the canonical NaN's mantissa MSB is set (so
    /// "quiet" means "MSB set"), `MIPSLegacy` if it is clear.
    pub fn quiet_nan_format(&self) -> QuietNaNFormat {
        if self.canonical_nan_mantissa_msb {
            QuietNaNFormat::Standard
        } else {
            QuietNaNFormat::MIPSLegacy
        }
    }
}

/// Platform constants paired with the name printed for them by
/// [`Display`][fmt::Display], mirroring the Python binding's module-level
/// `PlatformProperties_*` singletons (`examples/original_source/tests/test_simple_soft_float.py`).
const NAMED_PLATFORMS: [(&str, PlatformProperties); 8] = [
    ("PlatformProperties_ARM", PLATFORM_ARM),
    ("PlatformProperties_RISC_V", PLATFORM_RISC_V),
    ("PlatformProperties_POWER", PLATFORM_POWER),
    ("PlatformProperties_MIPS_2008", PLATFORM_MIPS_2008),
    ("PlatformProperties_X86_SSE", PLATFORM_X86_SSE),
    ("PlatformProperties_SPARC", PLATFORM_SPARC),
    ("PlatformProperties_HPPA", PLATFORM_HPPA),
    ("PlatformProperties_MIPS_LEGACY", PLATFORM_MIPS_LEGACY),
];

impl fmt::Display for PlatformProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_PLATFORMS.iter().find(|(_, p)| p == self) {
            return write!(f, "{name}");
        }

        write!(
            f,
            "PlatformProperties(canonical_nan_sign={}, canonical_nan_mantissa_msb={}, \
             canonical_nan_mantissa_second_to_msb={}, canonical_nan_mantissa_rest={}, \
             std_bin_ops_nan_propagation_mode={}, fma_nan_propagation_mode={}, \
             fma_inf_zero_qnan_result={}, round_to_integral_nan_propagation_mode={}, \
             next_up_or_down_nan_propagation_mode={}, scale_b_nan_propagation_mode={}, \
             sqrt_nan_propagation_mode={}, \
             float_to_float_conversion_nan_propagation_mode={}, \
             rsqrt_nan_propagation_mode={})",
            self.canonical_nan_sign,
            self.canonical_nan_mantissa_msb,
            self.canonical_nan_mantissa_second_to_msb,
            self.canonical_nan_mantissa_rest,
            self.std_bin_ops_nan_propagation_mode,
            self.fma_nan_propagation_mode,
            self.fma_inf_zero_qnan_result,
            self.round_to_integral_nan_propagation_mode,
            self.next_up_or_down_nan_propagation_mode,
            self.scale_b_nan_propagation_mode,
            self.sqrt_nan_propagation_mode,
            self.float_to_float_conversion_nan_propagation_mode,
            self.rsqrt_nan_propagation_mode,
        )
    }
}

/// RISC-V: always canonicalizes NaN results; the canonical NaN is
/// positive with only the mantissa MSB (quiet bit) set.
pub const PLATFORM_RISC_V: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::AlwaysCanonical,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::AlwaysCanonical,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::AlwaysCanonical,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::AlwaysCanonical,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::AlwaysCanonical,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::AlwaysCanonical,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::AlwaysCanonical,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::AlwaysCanonical,
};

/// ARM: propagates the first operand's NaN payload if present, else the
/// second; canonical NaN is the standard positive, MSB-only pattern.
pub const PLATFORM_ARM: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::FirstSecond,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::FirstSecondThird,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::PropagateAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// x86 SSE: the classic "8086" NaN table — a signaling NaN anywhere in
/// the operand order wins; the default NaN is negative with the quiet
/// bit set.
pub const PLATFORM_X86_SSE: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Negative,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::FirstSecondPreferringSNaN,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::FirstSecondThirdPreferringSNaN,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// POWER (PowerPC): prefers operand A, then B, then (for FMA) C; a
/// signaling NaN anywhere in that order wins.
pub const PLATFORM_POWER: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::FirstSecondPreferringSNaN,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::FirstSecondThirdPreferringSNaN,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// MIPS (2008 revision): adopted the standard quiet-NaN convention;
/// prefers the second operand's payload, then the first.
pub const PLATFORM_MIPS_2008: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::SecondFirstPreferringSNaN,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::SecondThirdFirstPreferringSNaN,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// Legacy (pre-2008) MIPS: the inverted quiet-bit convention — a NaN is
/// quiet when the mantissa MSB is *clear*.
pub const PLATFORM_MIPS_LEGACY: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: false,
    canonical_nan_mantissa_second_to_msb: true,
    canonical_nan_mantissa_rest: true,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::FirstSecond,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::FirstSecondThird,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// SPARC: scans operands in program order, first NaN found wins, no
/// signaling preference.
pub const PLATFORM_SPARC: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::FirstSecond,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::FirstSecondThird,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};

/// HPPA (PA-RISC): prefers the second operand, then the first, no
/// signaling preference.
pub const PLATFORM_HPPA: PlatformProperties = PlatformProperties {
    canonical_nan_sign: Sign::Positive,
    canonical_nan_mantissa_msb: true,
    canonical_nan_mantissa_second_to_msb: false,
    canonical_nan_mantissa_rest: false,
    std_bin_ops_nan_propagation_mode: BinaryNaNPropagationMode::SecondFirst,
    fma_nan_propagation_mode: TernaryNaNPropagationMode::ThirdSecondFirst,
    fma_inf_zero_qnan_result: FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
    round_to_integral_nan_propagation_mode: UnaryNaNPropagationMode::First,
    next_up_or_down_nan_propagation_mode: UnaryNaNPropagationMode::First,
    scale_b_nan_propagation_mode: UnaryNaNPropagationMode::First,
    sqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    rsqrt_nan_propagation_mode: UnaryNaNPropagationMode::First,
    float_to_float_conversion_nan_propagation_mode:
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
};
