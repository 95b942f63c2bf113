// ops/convert.rs
//
// Conversions that cross formats or cross into/out of the integers:
// `convert_to_dynamic_float` (format-to-format), `from_int`, `to_int`.

use num_traits::Zero;
use rug::Integer;

use crate::exact::ExactValue;
use crate::format::FloatProperties;
use crate::nan_mode::FloatToFloatConversionNaNPropagationMode;
use crate::nan_select::convert_retain_msb;
use crate::ops::round_value;
use crate::rounding::{ExceptionHandlingMode, RoundingMode, TininessDetectionMode};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// Converts an unpacked value of format `src` into `dest`'s bit pattern,
/// under `dest`'s own NaN-propagation policy for conversions.
pub(crate) fn convert_to_dynamic_float(
    dest: &FloatProperties,
    src: &FloatProperties,
    a: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return match dest.platform_properties.float_to_float_conversion_nan_propagation_mode {
            FloatToFloatConversionNaNPropagationMode::AlwaysCanonical => {
                let mut flags = StatusFlags::empty();
                if a.is_signaling_nan() {
                    flags |= StatusFlags::INVALID_OPERATION;
                }
                (crate::round::canonical_nan_bits(dest), flags)
            }
            FloatToFloatConversionNaNPropagationMode::RetainMostSignificantBits => {
                convert_retain_msb(dest, src.mantissa_width, a)
            }
        };
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty());
    }
    if a.class.is_zero() {
        return (crate::round::pack_zero(dest, a.sign), StatusFlags::empty());
    }

    let value = a.value.as_ref().expect("finite operand must carry a value");
    round_value(dest, value, a.sign, rounding_mode, tininess_mode, exception_handling_mode)
}

/// Rounds a signed arbitrary-precision integer into `dest`'s bit pattern.
pub(crate) fn from_int(
    dest: &FloatProperties,
    value: &Integer,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if value.is_zero() {
        return (crate::round::pack_zero(dest, Sign::Positive), StatusFlags::empty());
    }
    let sign = Sign::from_negative(value.is_negative());
    let magnitude = ExactValue::new(sign, 0, value.clone().abs());
    round_value(dest, &magnitude, sign, rounding_mode, tininess_mode, exception_handling_mode)
}

/// Converts a finite value to the nearest integer toward `rounding_mode`,
/// returning `None` (with `INVALID_OPERATION`) for NaN, infinity, or a
/// magnitude too large to represent in `max_bits` bits (two's-complement
/// range `[-2^(max_bits-1), 2^(max_bits-1) - 1]`). Sets `INEXACT` when
/// the exact value was not already an integer.
pub(crate) fn to_int(
    a: &Unpacked,
    max_bits: u32,
    rounding_mode: RoundingMode,
) -> (Option<Integer>, StatusFlags) {
    if a.is_nan() || a.class.is_infinity() {
        return (None, StatusFlags::INVALID_OPERATION);
    }
    if a.class.is_zero() {
        return (Some(Integer::new()), StatusFlags::empty());
    }

    let value = a.value.as_ref().expect("finite operand must carry a value");
    let (magnitude, inexact) = value.round_to_nearest_integer_magnitude(rounding_mode, a.sign.is_negative());

    let mut flags = StatusFlags::empty();
    if inexact {
        flags |= StatusFlags::INEXACT;
    }

    let result = if a.sign.is_negative() { -magnitude } else { magnitude };
    let min = -(Integer::from(1) << (max_bits - 1));
    let max = (Integer::from(1) << (max_bits - 1)) - 1;
    if result < min || result > max {
        return (None, StatusFlags::INVALID_OPERATION);
    }
    (Some(result), flags)
}
