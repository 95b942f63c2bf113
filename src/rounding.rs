// rounding.rs
//
// Rounding-related enumerations: the rounding mode itself, and the two
// policy switches that decide how tininess/underflow are detected.
//
// `to_direction` collapses the five IEEE 754 rounding modes down to
// just the direction (toward positive or negative infinity) a tie-break
// rule needs, since most of the rounding kernel only cares which way a
// boundary case falls, not which named mode produced that direction.

use std::fmt;

/// The five IEEE 754-2019 rounding-direction attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    TiesToEven,
    TowardZero,
    TowardNegative,
    TowardPositive,
    TiesToAway,
}

/// A rounding mode decomposed into a tie-breaking/directed distinction
/// plus the concrete direction. `is_nearest` is `true` for the two
/// "nearest" modes, in which case `direction` only matters for breaking
/// a tie; otherwise `direction` is the truncation direction itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RoundingDirection {
    pub is_nearest: bool,
    pub toward_positive: bool,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::TiesToEven,
        RoundingMode::TowardZero,
        RoundingMode::TowardNegative,
        RoundingMode::TowardPositive,
        RoundingMode::TiesToAway,
    ];

    /// Iterates over all variants of this enum.
    pub fn iter_variants() -> impl Iterator<Item = RoundingMode> {
        Self::ALL.into_iter()
    }

    /// Decomposes this mode, given the sign of the unrounded magnitude,
    /// into a nearest/directed distinction and a rounding direction.
    ///
    /// For directed modes, `toward_positive` directly names "round this
    /// magnitude up towards the next representable value away from its
    /// truncation" versus "leave it truncated"; it is derived from the
    /// combination of the rounding mode and the operand's sign.
    pub(crate) fn to_direction(self, negative: bool) -> RoundingDirection {
        match self {
            RoundingMode::TiesToEven => RoundingDirection {
                is_nearest: true,
                toward_positive: false,
            },
            RoundingMode::TiesToAway => RoundingDirection {
                is_nearest: true,
                toward_positive: true,
            },
            RoundingMode::TowardZero => RoundingDirection {
                is_nearest: false,
                toward_positive: false,
            },
            RoundingMode::TowardPositive => RoundingDirection {
                is_nearest: false,
                toward_positive: !negative,
            },
            RoundingMode::TowardNegative => RoundingDirection {
                is_nearest: false,
                toward_positive: negative,
            },
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::TiesToEven => "TiesToEven",
            RoundingMode::TowardZero => "TowardZero",
            RoundingMode::TowardNegative => "TowardNegative",
            RoundingMode::TowardPositive => "TowardPositive",
            RoundingMode::TiesToAway => "TiesToAway",
        };
        write!(f, "RoundingMode.{name}")
    }
}

/// Whether tininess (subnormal result) is detected from the magnitude
/// before or after rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TininessDetectionMode {
    BeforeRounding,
    AfterRounding,
}

impl TininessDetectionMode {
    pub const ALL: [TininessDetectionMode; 2] = [
        TininessDetectionMode::BeforeRounding,
        TininessDetectionMode::AfterRounding,
    ];

    pub fn iter_variants() -> impl Iterator<Item = TininessDetectionMode> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for TininessDetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TininessDetectionMode::BeforeRounding => "BeforeRounding",
            TininessDetectionMode::AfterRounding => "AfterRounding",
        };
        write!(f, "TininessDetectionMode.{name}")
    }
}

/// Whether `UNDERFLOW` is raised for an exactly representable subnormal
/// result (no inexactness).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionHandlingMode {
    IgnoreExactUnderflow,
    SignalExactUnderflow,
}

impl ExceptionHandlingMode {
    pub const ALL: [ExceptionHandlingMode; 2] = [
        ExceptionHandlingMode::IgnoreExactUnderflow,
        ExceptionHandlingMode::SignalExactUnderflow,
    ];

    pub fn iter_variants() -> impl Iterator<Item = ExceptionHandlingMode> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for ExceptionHandlingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExceptionHandlingMode::IgnoreExactUnderflow => "IgnoreExactUnderflow",
            ExceptionHandlingMode::SignalExactUnderflow => "SignalExactUnderflow",
        };
        write!(f, "ExceptionHandlingMode.{name}")
    }
}

/// The direction of a single-ULP step, used by `next_up_or_down`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpOrDown {
    Up,
    Down,
}

impl UpOrDown {
    pub const ALL: [UpOrDown; 2] = [UpOrDown::Up, UpOrDown::Down];

    pub fn iter_variants() -> impl Iterator<Item = UpOrDown> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for UpOrDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpOrDown::Up => "Up",
            UpOrDown::Down => "Down",
        };
        write!(f, "UpOrDown.{name}")
    }
}
