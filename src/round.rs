// round.rs
//
// The rounding kernel: takes an exact nonzero magnitude and rounds/packs
// it into a format's bit pattern, plus bit-packing helpers shared by
// every operator (zero/infinity/NaN construction, quiet-bit manipulation).
//
// The overflow/tininess case split below is adapted to this crate's
// four-parameter format shape and generalized rounding-mode set, rather
// than assuming a fixed implicit leading bit and a two-parameter
// (exponent width, total width) context.

use num_traits::Zero;
use rug::Integer;

use crate::exact::ExactValue;
use crate::format::FloatProperties;
use crate::rounding::{ExceptionHandlingMode, RoundingMode, TininessDetectionMode};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::util::{bitmask, is_even};

pub(crate) struct RoundResult {
    pub bits: Integer,
    pub flags: StatusFlags,
}

/// Assembles a finite, non-subnormal-hidden-bit-stripped bit pattern
/// from its sign/exponent-field/mantissa-field parts.
pub(crate) fn pack_bits(
    properties: &FloatProperties,
    sign: Sign,
    exponent_field: u64,
    mantissa_field: &Integer,
) -> Integer {
    let mut bits = mantissa_field.clone();
    bits |= Integer::from(exponent_field) << properties.exponent_field_shift() as u32;
    if properties.has_sign_bit && sign.is_negative() {
        bits |= Integer::from(1) << properties.sign_field_shift() as u32;
    }
    bits
}

pub(crate) fn pack_zero(properties: &FloatProperties, sign: Sign) -> Integer {
    pack_bits(properties, sign, properties.exponent_zero_subnormal(), &Integer::zero())
}

pub(crate) fn pack_infinity(properties: &FloatProperties, sign: Sign) -> Integer {
    pack_bits(properties, sign, properties.exponent_inf_nan(), &Integer::zero())
}

pub(crate) fn pack_max_finite(properties: &FloatProperties, sign: Sign) -> Integer {
    pack_bits(
        properties,
        sign,
        properties.exponent_max_normal(),
        properties.mantissa_field_max(),
    )
}

pub(crate) fn pack_min_subnormal(properties: &FloatProperties, sign: Sign) -> Integer {
    pack_bits(properties, sign, properties.exponent_zero_subnormal(), &Integer::from(1))
}

/// `true` iff `mantissa_field`'s quiet bit is set, per this format's
/// `quiet_nan_format` convention.
pub(crate) fn is_quiet_mantissa(properties: &FloatProperties, mantissa_field: &Integer) -> bool {
    use crate::nan_mode::QuietNaNFormat;
    let msb_set = !(mantissa_field.clone() & properties.mantissa_field_msb_mask().clone()).is_zero();
    match properties.platform_properties.quiet_nan_format() {
        QuietNaNFormat::Standard => msb_set,
        QuietNaNFormat::MIPSLegacy => !msb_set,
    }
}

/// Sets the quiet bit of `mantissa_field` per this format's convention,
/// preserving the remaining payload bits.
pub(crate) fn to_quiet_mantissa(properties: &FloatProperties, mantissa_field: &Integer) -> Integer {
    use crate::nan_mode::QuietNaNFormat;
    let msb_mask = properties.mantissa_field_msb_mask().clone();
    match properties.platform_properties.quiet_nan_format() {
        QuietNaNFormat::Standard => mantissa_field.clone() | msb_mask,
        QuietNaNFormat::MIPSLegacy => mantissa_field.clone() & !msb_mask,
    }
}

pub(crate) fn pack_nan(
    properties: &FloatProperties,
    sign: Sign,
    mantissa_field: &Integer,
) -> Integer {
    pack_bits(properties, sign, properties.exponent_inf_nan(), mantissa_field)
}

/// The platform canonical NaN's mantissa field, per `platform_properties`.
pub(crate) fn canonical_nan_mantissa(properties: &FloatProperties) -> Integer {
    let p = &properties.platform_properties;
    let mut m = Integer::zero();
    if p.canonical_nan_mantissa_msb {
        m |= properties.mantissa_field_msb_mask().clone();
    }
    if properties.mantissa_width >= 2 {
        let second_shift = (properties.mantissa_field_msb_shift() - 1) as u32;
        if p.canonical_nan_mantissa_second_to_msb {
            m |= Integer::from(1) << second_shift;
        }
    }
    if p.canonical_nan_mantissa_rest && properties.mantissa_width >= 2 {
        let rest_width = properties.mantissa_field_msb_shift() - 1;
        m |= bitmask(rest_width);
    }
    // Ensure the payload is nonzero (a NaN with all-zero mantissa would
    // misclassify as infinity) by guaranteeing the quiet bit is set per
    // convention even if every declared canonical bit above was clear.
    if m.is_zero() {
        m = properties.mantissa_field_msb_mask().clone();
    }
    m
}

pub(crate) fn canonical_nan_bits(properties: &FloatProperties) -> Integer {
    pack_nan(properties, properties.platform_properties.canonical_nan_sign, &canonical_nan_mantissa(properties))
}

/// A format's `signaling_nan` constant: `exponent_inf_nan`, quiet bit
/// cleared per format, LSB set (so the payload is nonzero).
pub(crate) fn signaling_nan_bits(properties: &FloatProperties) -> Integer {
    let msb_mask = properties.mantissa_field_msb_mask().clone();
    // LSB set for a nonzero payload; quiet bit forced to its "signaling"
    // polarity per this format's convention (Standard: clear, MIPSLegacy: set).
    let mantissa = match properties.platform_properties.quiet_nan_format() {
        crate::nan_mode::QuietNaNFormat::Standard => Integer::from(1) & !msb_mask,
        crate::nan_mode::QuietNaNFormat::MIPSLegacy => Integer::from(1) | msb_mask,
    };
    pack_nan(properties, Sign::Positive, &mantissa)
}

/// Rounds the exact nonzero magnitude `magnitude` (whose own `sign`
/// field is ignored in favor of `sign`) to `properties`, under the
/// given rounding/tininess/exception policy.
pub(crate) fn round_and_pack(
    properties: &FloatProperties,
    sign: Sign,
    magnitude: &ExactValue,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> RoundResult {
    assert!(!magnitude.is_zero(), "round_and_pack requires a nonzero magnitude");

    let bias = properties.exponent_bias();
    let mantissa_width = properties.mantissa_width as isize;
    let precision_bits = if properties.has_implicit_leading_bit {
        mantissa_width + 1
    } else {
        mantissa_width
    };
    let e_max_normal = properties.exponent_max_normal() as isize - bias;
    let e_min_normal = 1 - bias;
    let subnormal_lsb = 1 - bias - mantissa_width;

    let e = magnitude.msb_digit();
    let normal_lsb = e - (precision_bits - 1);
    let target_lsb = normal_lsb.max(subnormal_lsb);

    let (high, _low) = magnitude.split(target_lsb - 1);
    let (round_bit, sticky_bit) = magnitude.rs(target_lsb - 1);

    let direction = rounding_mode.to_direction(sign.is_negative());
    let round_up = if direction.is_nearest {
        // An exact tie (round_bit set, sticky_bit clear) breaks away from
        // zero under TiesToAway (`toward_positive`, sign-invariant here)
        // and to the even LSB under TiesToEven; anything past the
        // halfway point always rounds up regardless of the tie rule.
        let tie_breaks_up = direction.toward_positive || !is_even(target_lsb, &high.c);
        round_bit && (sticky_bit || tie_breaks_up)
    } else {
        direction.toward_positive && (round_bit || sticky_bit)
    };

    let mut c = high.c;
    let mut lsb_exp = target_lsb;
    if round_up {
        c += 1;
        if c.significant_bits() as isize > precision_bits {
            c >>= 1u32;
            lsb_exp += 1;
        }
    }

    let inexact = round_bit || sticky_bit;
    let mut flags = StatusFlags::empty();
    if inexact {
        flags |= StatusFlags::INEXACT;
    }

    let new_e = if c.is_zero() {
        e_min_normal - 1
    } else {
        lsb_exp + c.significant_bits() as isize - 1
    };

    if new_e > e_max_normal {
        flags |= StatusFlags::OVERFLOW | StatusFlags::INEXACT;
        let to_infinity = overflow_rounds_to_infinity(sign, rounding_mode);
        let bits = if to_infinity {
            pack_infinity(properties, sign)
        } else {
            pack_max_finite(properties, sign)
        };
        return RoundResult { bits, flags };
    }

    let tiny = if new_e < e_min_normal {
        match tininess_mode {
            TininessDetectionMode::AfterRounding => true,
            TininessDetectionMode::BeforeRounding => e < e_min_normal,
        }
    } else {
        false
    };

    if tiny && (inexact || exception_handling_mode == ExceptionHandlingMode::SignalExactUnderflow) {
        flags |= StatusFlags::UNDERFLOW;
    }

    let bits = if new_e < e_min_normal {
        // subnormal (or exact zero, if rounding truncated everything away)
        pack_bits(properties, sign, properties.exponent_zero_subnormal(), &c)
    } else {
        let exponent_field = (new_e + bias) as u64;
        let mantissa_field = if properties.has_implicit_leading_bit {
            c - (Integer::from(1) << mantissa_width as u32)
        } else {
            c
        };
        pack_bits(properties, sign, exponent_field, &mantissa_field)
    };

    RoundResult { bits, flags }
}

fn overflow_rounds_to_infinity(sign: Sign, rounding_mode: RoundingMode) -> bool {
    match rounding_mode {
        RoundingMode::TiesToEven | RoundingMode::TiesToAway => true,
        RoundingMode::TowardZero => false,
        RoundingMode::TowardPositive => sign.is_positive(),
        RoundingMode::TowardNegative => sign.is_negative(),
    }
}
