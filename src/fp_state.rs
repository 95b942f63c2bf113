// fp_state.rs
//
// FPState: the mutable-by-value triple (really quadruple) of rounding
// and exception-handling policy plus the sticky status bitset, threaded
// through every operation.

use std::fmt;

use crate::rounding::{ExceptionHandlingMode, RoundingMode, TininessDetectionMode};
use crate::status::StatusFlags;

/// The rounding/exception policy and accumulated sticky flags carried
/// alongside a [`DynamicFloat`][crate::DynamicFloat] value.
///
/// `FPState` is a plain value type: operations never mutate one in
/// place, they return a new instance with `status_flags` extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FPState {
    pub rounding_mode: RoundingMode,
    pub status_flags: StatusFlags,
    pub exception_handling_mode: ExceptionHandlingMode,
    pub tininess_detection_mode: TininessDetectionMode,
}

impl Default for FPState {
    fn default() -> Self {
        FPState {
            rounding_mode: RoundingMode::TiesToEven,
            status_flags: StatusFlags::empty(),
            exception_handling_mode: ExceptionHandlingMode::IgnoreExactUnderflow,
            tininess_detection_mode: TininessDetectionMode::AfterRounding,
        }
    }
}

impl FPState {
    /// Keyword-style constructor: any field left `None` falls back to
    /// [`FPState::default`].
    pub fn new(
        rounding_mode: Option<RoundingMode>,
        status_flags: Option<StatusFlags>,
        exception_handling_mode: Option<ExceptionHandlingMode>,
        tininess_detection_mode: Option<TininessDetectionMode>,
    ) -> Self {
        let default = FPState::default();
        FPState {
            rounding_mode: rounding_mode.unwrap_or(default.rounding_mode),
            status_flags: status_flags.unwrap_or(default.status_flags),
            exception_handling_mode: exception_handling_mode
                .unwrap_or(default.exception_handling_mode),
            tininess_detection_mode: tininess_detection_mode
                .unwrap_or(default.tininess_detection_mode),
        }
    }

    /// Combines `self` with `other`, unioning `status_flags` and taking
    /// every other field from `self` (the left operand). The two states'
    /// non-flag fields must already agree — merging incompatible policies
    /// is a programming error, not a floating-point exception.
    pub fn merge(&self, other: &FPState) -> FPState {
        assert!(
            self.rounding_mode == other.rounding_mode
                && self.exception_handling_mode == other.exception_handling_mode
                && self.tininess_detection_mode == other.tininess_detection_mode,
            "FPState::merge: incompatible rounding/exception policies"
        );
        FPState {
            rounding_mode: self.rounding_mode,
            status_flags: self.status_flags | other.status_flags,
            exception_handling_mode: self.exception_handling_mode,
            tininess_detection_mode: self.tininess_detection_mode,
        }
    }

    /// Returns a copy of `self` with `flags` or'd into `status_flags`.
    pub(crate) fn with_flags(&self, flags: StatusFlags) -> FPState {
        FPState {
            status_flags: self.status_flags | flags,
            ..*self
        }
    }
}

impl fmt::Display for FPState {
    // The observed display prefix is "PlatformProperties(...)" despite
    // this being an FPState; this is a quirk of the reference
    // implementation's repr, reproduced here verbatim rather than fixed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlatformProperties(rounding_mode={}, status_flags={}, \
             exception_handling_mode={}, tininess_detection_mode={})",
            self.rounding_mode,
            self.status_flags,
            self.exception_handling_mode,
            self.tininess_detection_mode
        )
    }
}
