// nan_mode.rs
//
// NaN quieting convention and the NaN-propagation priority-list modes
// used by the operator layer. The ternary (and binary/unary) modes are
// encoded as priority lists decoded by a single small table rather than
// per-mode branches; see `NanPriority` below and its use in
// `nan_select.rs`.

use std::fmt;

/// Which mantissa bit distinguishes a quiet NaN from a signaling one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuietNaNFormat {
    /// Quiet iff the mantissa MSB is set.
    Standard,
    /// Quiet iff the mantissa MSB is clear (legacy MIPS).
    MIPSLegacy,
}

impl QuietNaNFormat {
    pub const ALL: [QuietNaNFormat; 2] = [QuietNaNFormat::Standard, QuietNaNFormat::MIPSLegacy];

    pub fn iter_variants() -> impl Iterator<Item = QuietNaNFormat> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for QuietNaNFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuietNaNFormat::Standard => "Standard",
            QuietNaNFormat::MIPSLegacy => "MIPSLegacy",
        };
        write!(f, "QuietNaNFormat.{name}")
    }
}

/// A decoded NaN-selection policy: a priority order over operand
/// indices (`0` = first operand, etc.), plus whether a signaling NaN
/// anywhere among the listed operands should jump the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NanPriority {
    /// Always emit the platform canonical NaN, ignoring operand payloads.
    AlwaysCanonical,
    /// Scan operands in `order`; if `prefer_snan`, a signaling NaN
    /// anywhere in `order` wins over an earlier-but-quiet NaN.
    Priority { order: &'static [usize], prefer_snan: bool },
}

/// NaN-propagation policy for one-operand operators
/// (`round_to_integral`, `next_up_or_down`, `scale_b`, `sqrt`, `rsqrt`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryNaNPropagationMode {
    AlwaysCanonical,
    First,
}

impl UnaryNaNPropagationMode {
    pub const ALL: [UnaryNaNPropagationMode; 2] = [
        UnaryNaNPropagationMode::AlwaysCanonical,
        UnaryNaNPropagationMode::First,
    ];

    pub fn iter_variants() -> impl Iterator<Item = UnaryNaNPropagationMode> {
        Self::ALL.into_iter()
    }

    pub(crate) fn priority(self) -> NanPriority {
        match self {
            UnaryNaNPropagationMode::AlwaysCanonical => NanPriority::AlwaysCanonical,
            UnaryNaNPropagationMode::First => NanPriority::Priority {
                order: &[0],
                prefer_snan: false,
            },
        }
    }
}

impl fmt::Display for UnaryNaNPropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnaryNaNPropagationMode::AlwaysCanonical => "AlwaysCanonical",
            UnaryNaNPropagationMode::First => "First",
        };
        write!(f, "UnaryNaNPropagationMode.{name}")
    }
}

/// NaN-propagation policy for the standard binary operators
/// (`add`, `sub`, `mul`, `div`, `ieee754_remainder`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryNaNPropagationMode {
    AlwaysCanonical,
    FirstSecond,
    SecondFirst,
    FirstSecondPreferringSNaN,
    SecondFirstPreferringSNaN,
}

impl BinaryNaNPropagationMode {
    pub const ALL: [BinaryNaNPropagationMode; 5] = [
        BinaryNaNPropagationMode::AlwaysCanonical,
        BinaryNaNPropagationMode::FirstSecond,
        BinaryNaNPropagationMode::SecondFirst,
        BinaryNaNPropagationMode::FirstSecondPreferringSNaN,
        BinaryNaNPropagationMode::SecondFirstPreferringSNaN,
    ];

    pub fn iter_variants() -> impl Iterator<Item = BinaryNaNPropagationMode> {
        Self::ALL.into_iter()
    }

    pub(crate) fn priority(self) -> NanPriority {
        use BinaryNaNPropagationMode::*;
        match self {
            AlwaysCanonical => NanPriority::AlwaysCanonical,
            FirstSecond => NanPriority::Priority {
                order: &[0, 1],
                prefer_snan: false,
            },
            SecondFirst => NanPriority::Priority {
                order: &[1, 0],
                prefer_snan: false,
            },
            FirstSecondPreferringSNaN => NanPriority::Priority {
                order: &[0, 1],
                prefer_snan: true,
            },
            SecondFirstPreferringSNaN => NanPriority::Priority {
                order: &[1, 0],
                prefer_snan: true,
            },
        }
    }
}

impl fmt::Display for BinaryNaNPropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryNaNPropagationMode::AlwaysCanonical => "AlwaysCanonical",
            BinaryNaNPropagationMode::FirstSecond => "FirstSecond",
            BinaryNaNPropagationMode::SecondFirst => "SecondFirst",
            BinaryNaNPropagationMode::FirstSecondPreferringSNaN => "FirstSecondPreferringSNaN",
            BinaryNaNPropagationMode::SecondFirstPreferringSNaN => "SecondFirstPreferringSNaN",
        };
        write!(f, "BinaryNaNPropagationMode.{name}")
    }
}

/// NaN-propagation policy for ternary operators (`fused_mul_add`):
/// every permutation of priority among three operands, each in a plain
/// and a "PreferringSNaN" flavor, plus `AlwaysCanonical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TernaryNaNPropagationMode {
    AlwaysCanonical,
    FirstSecondThird,
    FirstThirdSecond,
    SecondFirstThird,
    SecondThirdFirst,
    ThirdFirstSecond,
    ThirdSecondFirst,
    FirstSecondThirdPreferringSNaN,
    FirstThirdSecondPreferringSNaN,
    SecondFirstThirdPreferringSNaN,
    SecondThirdFirstPreferringSNaN,
    ThirdFirstSecondPreferringSNaN,
    ThirdSecondFirstPreferringSNaN,
}

impl TernaryNaNPropagationMode {
    pub const ALL: [TernaryNaNPropagationMode; 13] = [
        TernaryNaNPropagationMode::AlwaysCanonical,
        TernaryNaNPropagationMode::FirstSecondThird,
        TernaryNaNPropagationMode::FirstThirdSecond,
        TernaryNaNPropagationMode::SecondFirstThird,
        TernaryNaNPropagationMode::SecondThirdFirst,
        TernaryNaNPropagationMode::ThirdFirstSecond,
        TernaryNaNPropagationMode::ThirdSecondFirst,
        TernaryNaNPropagationMode::FirstSecondThirdPreferringSNaN,
        TernaryNaNPropagationMode::FirstThirdSecondPreferringSNaN,
        TernaryNaNPropagationMode::SecondFirstThirdPreferringSNaN,
        TernaryNaNPropagationMode::SecondThirdFirstPreferringSNaN,
        TernaryNaNPropagationMode::ThirdFirstSecondPreferringSNaN,
        TernaryNaNPropagationMode::ThirdSecondFirstPreferringSNaN,
    ];

    pub fn iter_variants() -> impl Iterator<Item = TernaryNaNPropagationMode> {
        Self::ALL.into_iter()
    }

    pub(crate) fn priority(self) -> NanPriority {
        use TernaryNaNPropagationMode::*;
        match self {
            AlwaysCanonical => NanPriority::AlwaysCanonical,
            FirstSecondThird => NanPriority::Priority {
                order: &[0, 1, 2],
                prefer_snan: false,
            },
            FirstThirdSecond => NanPriority::Priority {
                order: &[0, 2, 1],
                prefer_snan: false,
            },
            SecondFirstThird => NanPriority::Priority {
                order: &[1, 0, 2],
                prefer_snan: false,
            },
            SecondThirdFirst => NanPriority::Priority {
                order: &[1, 2, 0],
                prefer_snan: false,
            },
            ThirdFirstSecond => NanPriority::Priority {
                order: &[2, 0, 1],
                prefer_snan: false,
            },
            ThirdSecondFirst => NanPriority::Priority {
                order: &[2, 1, 0],
                prefer_snan: false,
            },
            FirstSecondThirdPreferringSNaN => NanPriority::Priority {
                order: &[0, 1, 2],
                prefer_snan: true,
            },
            FirstThirdSecondPreferringSNaN => NanPriority::Priority {
                order: &[0, 2, 1],
                prefer_snan: true,
            },
            SecondFirstThirdPreferringSNaN => NanPriority::Priority {
                order: &[1, 0, 2],
                prefer_snan: true,
            },
            SecondThirdFirstPreferringSNaN => NanPriority::Priority {
                order: &[1, 2, 0],
                prefer_snan: true,
            },
            ThirdFirstSecondPreferringSNaN => NanPriority::Priority {
                order: &[2, 0, 1],
                prefer_snan: true,
            },
            ThirdSecondFirstPreferringSNaN => NanPriority::Priority {
                order: &[2, 1, 0],
                prefer_snan: true,
            },
        }
    }
}

impl fmt::Display for TernaryNaNPropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TernaryNaNPropagationMode::AlwaysCanonical => "AlwaysCanonical",
            TernaryNaNPropagationMode::FirstSecondThird => "FirstSecondThird",
            TernaryNaNPropagationMode::FirstThirdSecond => "FirstThirdSecond",
            TernaryNaNPropagationMode::SecondFirstThird => "SecondFirstThird",
            TernaryNaNPropagationMode::SecondThirdFirst => "SecondThirdFirst",
            TernaryNaNPropagationMode::ThirdFirstSecond => "ThirdFirstSecond",
            TernaryNaNPropagationMode::ThirdSecondFirst => "ThirdSecondFirst",
            TernaryNaNPropagationMode::FirstSecondThirdPreferringSNaN => {
                "FirstSecondThirdPreferringSNaN"
            }
            TernaryNaNPropagationMode::FirstThirdSecondPreferringSNaN => {
                "FirstThirdSecondPreferringSNaN"
            }
            TernaryNaNPropagationMode::SecondFirstThirdPreferringSNaN => {
                "SecondFirstThirdPreferringSNaN"
            }
            TernaryNaNPropagationMode::SecondThirdFirstPreferringSNaN => {
                "SecondThirdFirstPreferringSNaN"
            }
            TernaryNaNPropagationMode::ThirdFirstSecondPreferringSNaN => {
                "ThirdFirstSecondPreferringSNaN"
            }
            TernaryNaNPropagationMode::ThirdSecondFirstPreferringSNaN => {
                "ThirdSecondFirstPreferringSNaN"
            }
        };
        write!(f, "TernaryNaNPropagationMode.{name}")
    }
}

/// NaN-propagation policy for format-to-format conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatToFloatConversionNaNPropagationMode {
    AlwaysCanonical,
    RetainMostSignificantBits,
}

impl FloatToFloatConversionNaNPropagationMode {
    pub const ALL: [FloatToFloatConversionNaNPropagationMode; 2] = [
        FloatToFloatConversionNaNPropagationMode::AlwaysCanonical,
        FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits,
    ];

    pub fn iter_variants() -> impl Iterator<Item = FloatToFloatConversionNaNPropagationMode> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for FloatToFloatConversionNaNPropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FloatToFloatConversionNaNPropagationMode::AlwaysCanonical => "AlwaysCanonical",
            FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits => {
                "RetainMostSignificantBits"
            }
        };
        write!(f, "FloatToFloatConversionNaNPropagationMode.{name}")
    }
}

/// How `fused_mul_add` handles `(+/-Inf) * (+/-0) [+ c]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FMAInfZeroQNaNResult {
    FollowNaNPropagationMode,
    CanonicalAndGenerateInvalid,
    PropagateAndGenerateInvalid,
}

impl FMAInfZeroQNaNResult {
    pub const ALL: [FMAInfZeroQNaNResult; 3] = [
        FMAInfZeroQNaNResult::FollowNaNPropagationMode,
        FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid,
        FMAInfZeroQNaNResult::PropagateAndGenerateInvalid,
    ];

    pub fn iter_variants() -> impl Iterator<Item = FMAInfZeroQNaNResult> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for FMAInfZeroQNaNResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FMAInfZeroQNaNResult::FollowNaNPropagationMode => "FollowNaNPropagationMode",
            FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid => "CanonicalAndGenerateInvalid",
            FMAInfZeroQNaNResult::PropagateAndGenerateInvalid => "PropagateAndGenerateInvalid",
        };
        write!(f, "FMAInfZeroQNaNResult.{name}")
    }
}
