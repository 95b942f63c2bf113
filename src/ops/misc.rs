// ops/misc.rs
//
// Sign manipulation (abs/neg/copy_sign, which never raise flags),
// log_b, scale_b, round_to_integer/round_to_integral, and next_up_or_down.

use num_traits::Zero;
use rug::Integer;

use crate::format::FloatProperties;
use crate::nan_select::select_nan;
use crate::ops::round_value;
use crate::rounding::{ExceptionHandlingMode, RoundingMode, TininessDetectionMode, UpOrDown};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// Clears the sign bit of a packed value, bit-for-bit: preserves every
/// NaN payload and never raises a flag.
pub(crate) fn abs(properties: &FloatProperties, bits: &Integer) -> Integer {
    bits.clone() & !properties.sign_field_mask().clone()
}

/// Flips the sign bit of a packed value, bit-for-bit.
pub(crate) fn neg(properties: &FloatProperties, bits: &Integer) -> Integer {
    bits.clone() ^ properties.sign_field_mask().clone()
}

/// `a` with the sign bit of `sign_source`, both of `properties`'s format.
pub(crate) fn copy_sign(properties: &FloatProperties, bits: &Integer, sign_source: &Integer) -> Integer {
    let mask = properties.sign_field_mask().clone();
    (bits.clone() & !mask.clone()) | (sign_source.clone() & mask)
}

/// The unbiased binary exponent of `a`'s magnitude, as an unbounded
/// integer: `None` (with `INVALID_OPERATION`) for NaN, infinity, or zero.
pub(crate) fn log_b(a: &Unpacked) -> (Option<Integer>, StatusFlags) {
    if a.is_nan() || a.class.is_infinity() || a.class.is_zero() {
        return (None, StatusFlags::INVALID_OPERATION);
    }
    let value = a.value.as_ref().expect("finite nonzero operand must carry a value");
    (Some(Integer::from(value.msb_digit())), StatusFlags::empty())
}

/// Clamps a `scale_b` exponent adjustment to a magnitude that is
/// guaranteed to push `dest`'s result into overflow or underflow
/// regardless of the operand's own exponent, while staying small enough
/// that the exponent arithmetic in `round_and_pack` never has to shift
/// by a pathologically large bit count.
fn clamp_scale_exponent(dest: &FloatProperties, n: i64) -> isize {
    let bound = dest.exponent_bias() as i64 * 2 + dest.mantissa_width as i64 + 16;
    n.clamp(-bound, bound) as isize
}

/// Scales `a` by an exact power of two, `a * 2^n`, rounding the result
/// into `properties`. An out-of-range `n` saturates to an overflowing
/// or underflowing result rather than wrapping or panicking.
pub(crate) fn scale_b(
    dest: &FloatProperties,
    a: &Unpacked,
    n: i64,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return select_nan(dest, &[a], dest.platform_properties.scale_b_nan_propagation_mode.priority());
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty());
    }
    if a.class.is_zero() {
        return (crate::round::pack_zero(dest, a.sign), StatusFlags::empty());
    }

    let value = a.value.as_ref().expect("finite nonzero operand must carry a value");
    let n = clamp_scale_exponent(dest, n);
    let exp = value.exp.saturating_add(n);
    let scaled = crate::exact::ExactValue::new(value.sign, exp, value.c.clone());
    round_value(dest, &scaled, a.sign, rounding_mode, tininess_mode, exception_handling_mode)
}

/// Rounds `a` to the nearest integer value (in the same format) per
/// `rounding_mode`, leaving values already integral untouched.
pub(crate) fn round_to_integral(
    dest: &FloatProperties,
    a: &Unpacked,
    rounding_mode: RoundingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return select_nan(
            dest,
            &[a],
            dest.platform_properties.round_to_integral_nan_propagation_mode.priority(),
        );
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty());
    }
    if a.class.is_zero() {
        return (crate::round::pack_zero(dest, a.sign), StatusFlags::empty());
    }

    let value = a.value.as_ref().expect("finite nonzero operand must carry a value");
    let (magnitude, inexact) = value.round_to_nearest_integer_magnitude(rounding_mode, a.sign.is_negative());

    let mut flags = StatusFlags::empty();
    if inexact {
        flags |= StatusFlags::INEXACT;
    }

    if magnitude.is_zero() {
        return (crate::round::pack_zero(dest, a.sign), flags);
    }
    let integral = crate::exact::ExactValue::new(a.sign, 0, magnitude);
    let (bits, round_flags) = round_value(
        dest,
        &integral,
        a.sign,
        rounding_mode,
        TininessDetectionMode::AfterRounding,
        ExceptionHandlingMode::IgnoreExactUnderflow,
    );
    (bits, flags | round_flags)
}

/// Rounds `a` to the nearest arbitrary-precision integer per
/// `rounding_mode`: `None` (with `INVALID_OPERATION`) for NaN or
/// infinity. Unlike `round_to_integral` the result has no format and so
/// can never overflow.
pub(crate) fn round_to_integer(a: &Unpacked, rounding_mode: RoundingMode) -> (Option<Integer>, StatusFlags) {
    if a.is_nan() || a.class.is_infinity() {
        return (None, StatusFlags::INVALID_OPERATION);
    }
    if a.class.is_zero() {
        return (Some(Integer::new()), StatusFlags::empty());
    }

    let value = a.value.as_ref().expect("finite nonzero operand must carry a value");
    let (magnitude, inexact) = value.round_to_nearest_integer_magnitude(rounding_mode, a.sign.is_negative());

    let mut flags = StatusFlags::empty();
    if inexact {
        flags |= StatusFlags::INEXACT;
    }

    let result = if a.sign.is_negative() { -magnitude } else { magnitude };
    (Some(result), flags)
}

/// Steps `a` by one ULP toward `+infinity` (`Up`) or `-infinity` (`Down`).
/// `+-0` step to the smallest subnormal of the requested direction's
/// sign; the largest finite value steps to infinity; infinity of the
/// matching direction is a fixed point.
pub(crate) fn next_up_or_down(
    dest: &FloatProperties,
    a: &Unpacked,
    bits: &Integer,
    direction: UpOrDown,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return select_nan(
            dest,
            &[a],
            dest.platform_properties.next_up_or_down_nan_propagation_mode.priority(),
        );
    }

    let toward_positive = matches!(direction, UpOrDown::Up);

    if a.class.is_infinity() {
        return if a.sign.is_positive() == toward_positive {
            (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty())
        } else {
            // stepping from an infinity back toward the origin lands on
            // the largest finite value of that same sign
            (crate::round::pack_max_finite(dest, a.sign), StatusFlags::empty())
        };
    }
    if a.class.is_zero() {
        let result_sign = Sign::from_negative(!toward_positive);
        return (crate::round::pack_min_subnormal(dest, result_sign), StatusFlags::empty());
    }

    // Finite nonzero: step the raw magnitude bits by one ULP, in the
    // direction that moves the *value* (not the bit pattern) the right
    // way, then re-sign and handle the sign-crossing/overflow edges.
    let magnitude_bits = abs(dest, bits);
    let move_away_from_zero = a.sign.is_positive() == toward_positive;

    if move_away_from_zero {
        if magnitude_bits == crate::round::pack_max_finite(dest, Sign::Positive) {
            return (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty());
        }
        let stepped = magnitude_bits + 1;
        (copy_sign(dest, &stepped, bits), StatusFlags::empty())
    } else {
        let stepped = magnitude_bits - 1;
        (copy_sign(dest, &stepped, bits), StatusFlags::empty())
    }
}
