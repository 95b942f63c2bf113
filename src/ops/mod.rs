// ops/mod.rs
//
// The operator layer: for every operation, classify operands, handle
// sNaN/qNaN and infinity/zero special cases by table, compute the exact
// result in the rational oracle when neither applies, then round
// through `round::round_and_pack`.
//
// Split into submodules by concern: arithmetic, comparison, conversion,
// and sign/miscellaneous each get their own file.

mod arithmetic;
mod compare;
mod convert;
mod misc;

pub(crate) use arithmetic::{div, fused_mul_add, ieee754_remainder, mul, rsqrt, sqrt, sub};
pub(crate) use arithmetic::add;
pub(crate) use compare::{compare, compare_signaling, CompareResult};
pub(crate) use convert::{convert_to_dynamic_float, from_int, to_int};
pub(crate) use misc::{
    abs, copy_sign, log_b, neg, next_up_or_down, round_to_integer, round_to_integral, scale_b,
};

use rug::Integer;

use crate::exact::ExactValue;
use crate::format::FloatProperties;
use crate::nan_mode::NanPriority;
use crate::nan_select::select_nan;
use crate::round::canonical_nan_bits;
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// A NaN or computationally-invalid result: selects among `operands`
/// per `priority`, but always sets `INVALID_OPERATION` regardless of
/// whether a real NaN operand was found (covers both "an input was
/// already NaN" and "the operation itself is undefined," e.g. 0/0).
pub(crate) fn invalid_result(
    dest: &FloatProperties,
    operands: &[&Unpacked],
    priority: NanPriority,
) -> (Integer, StatusFlags) {
    let (bits, mut flags) = select_nan(dest, operands, priority);
    flags |= StatusFlags::INVALID_OPERATION;
    (bits, flags)
}

/// The canonical NaN with no extra flags, for operators that have no
/// operand-priority concept of their own (e.g. a deterministic invalid
/// result that never has a payload to propagate).
pub(crate) fn invalid_canonical(dest: &FloatProperties) -> (Integer, StatusFlags) {
    (canonical_nan_bits(dest), StatusFlags::INVALID_OPERATION)
}

/// The sign a result of exactly zero should carry, when the exact
/// computation canceled to zero: negative only under `TowardNegative`,
/// positive otherwise (IEEE 754-2019 §6.3).
pub(crate) fn cancellation_zero_sign(rounding_mode: crate::rounding::RoundingMode) -> Sign {
    if rounding_mode == crate::rounding::RoundingMode::TowardNegative {
        Sign::Negative
    } else {
        Sign::Positive
    }
}

/// Rounds `value` (which may be exact zero) into `dest`'s bit pattern,
/// using `zero_sign` when `value` is zero.
pub(crate) fn round_value(
    dest: &FloatProperties,
    value: &ExactValue,
    zero_sign: Sign,
    rounding_mode: crate::rounding::RoundingMode,
    tininess_mode: crate::rounding::TininessDetectionMode,
    exception_handling_mode: crate::rounding::ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if value.is_zero() {
        (crate::round::pack_zero(dest, zero_sign), StatusFlags::empty())
    } else {
        let result = crate::round::round_and_pack(
            dest,
            value.sign,
            value,
            rounding_mode,
            tininess_mode,
            exception_handling_mode,
        );
        (result.bits, result.flags)
    }
}
