// ops/arithmetic.rs
//
// add, sub, mul, div, ieee754_remainder, fused_mul_add, sqrt, rsqrt.
//
// Each function classifies operands, resolves the IEEE special-value
// table, and otherwise computes an exact result in `ExactValue` before
// handing it to `round::round_and_pack`: classify, special-case, exact
// compute, round.

use rug::Integer;

use crate::exact::ExactValue;
use crate::float_class::FloatClass;
use crate::format::FloatProperties;
use crate::nan_mode::FMAInfZeroQNaNResult;
use crate::nan_select::select_nan;
use crate::ops::{cancellation_zero_sign, invalid_canonical, invalid_result, round_value};
use crate::rounding::{ExceptionHandlingMode, RoundingMode, TininessDetectionMode};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// Folds a separately-tracked sticky bit into `value` as one extra low
/// bit, so a later guard/round/sticky split sees it without needing its
/// own out-of-band sticky parameter. Used after `div_trunc`/`sqrt_trunc`,
/// which already report precision-bit-granularity results plus one
/// sticky flag for everything discarded below that.
fn fold_sticky(value: ExactValue, sticky: bool) -> ExactValue {
    if sticky {
        ExactValue::new(value.sign, value.exp, (value.c << 1u32) | Integer::from(1))
    } else {
        ExactValue::new(value.sign, value.exp - 1, value.c << 1u32)
    }
}

struct Policy {
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
}

pub(crate) fn add(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    let policy = Policy { rounding_mode, tininess_mode, exception_handling_mode };

    if a.is_nan() || b.is_nan() {
        return select_nan(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    if a.class.is_infinity() && b.class.is_infinity() {
        return if a.sign == b.sign {
            (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty())
        } else {
            invalid_result(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority())
        };
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, a.sign), StatusFlags::empty());
    }
    if b.class.is_infinity() {
        return (crate::round::pack_infinity(dest, b.sign), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let bv = b.value.as_ref().expect("finite operand must carry a value");
    let sum = av.add(bv);
    finish_sum(dest, &sum, a, b, &policy)
}

fn finish_sum(dest: &FloatProperties, sum: &ExactValue, a: &Unpacked, b: &Unpacked, policy: &Policy) -> (Integer, StatusFlags) {
    let zero_sign = if sum.is_zero() {
        if a.class.is_zero() && b.class.is_zero() {
            if a.sign == b.sign {
                a.sign
            } else {
                cancellation_zero_sign(policy.rounding_mode)
            }
        } else {
            cancellation_zero_sign(policy.rounding_mode)
        }
    } else {
        sum.sign
    };
    round_value(dest, sum, zero_sign, policy.rounding_mode, policy.tininess_mode, policy.exception_handling_mode)
}

pub(crate) fn sub(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    let negated_b = Unpacked {
        sign: !b.sign,
        class: negate_class(b.class),
        value: b.value.as_ref().map(|v| v.negated()),
        nan_payload: b.nan_payload.clone(),
    };
    add(dest, a, &negated_b, rounding_mode, tininess_mode, exception_handling_mode)
}

fn negate_class(class: FloatClass) -> FloatClass {
    match class {
        FloatClass::PositiveZero => FloatClass::NegativeZero,
        FloatClass::NegativeZero => FloatClass::PositiveZero,
        FloatClass::PositiveSubnormal => FloatClass::NegativeSubnormal,
        FloatClass::NegativeSubnormal => FloatClass::PositiveSubnormal,
        FloatClass::PositiveNormal => FloatClass::NegativeNormal,
        FloatClass::NegativeNormal => FloatClass::PositiveNormal,
        FloatClass::PositiveInfinity => FloatClass::NegativeInfinity,
        FloatClass::NegativeInfinity => FloatClass::PositiveInfinity,
        other => other,
    }
}

pub(crate) fn mul(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() || b.is_nan() {
        return select_nan(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    let result_sign = a.sign.xor(b.sign);
    if (a.class.is_infinity() && b.class.is_zero()) || (a.class.is_zero() && b.class.is_infinity()) {
        return invalid_result(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    if a.class.is_infinity() || b.class.is_infinity() {
        return (crate::round::pack_infinity(dest, result_sign), StatusFlags::empty());
    }
    if a.class.is_zero() || b.class.is_zero() {
        return (crate::round::pack_zero(dest, result_sign), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let bv = b.value.as_ref().expect("finite operand must carry a value");
    let product = av.mul(bv);
    round_value(dest, &product, result_sign, rounding_mode, tininess_mode, exception_handling_mode)
}

pub(crate) fn div(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() || b.is_nan() {
        return select_nan(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    let result_sign = a.sign.xor(b.sign);
    if a.class.is_infinity() && b.class.is_infinity() {
        return invalid_result(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    if b.class.is_zero() {
        return if a.class.is_zero() {
            invalid_result(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority())
        } else {
            (crate::round::pack_infinity(dest, result_sign), StatusFlags::DIVISION_BY_ZERO)
        };
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, result_sign), StatusFlags::empty());
    }
    if b.class.is_infinity() {
        return (crate::round::pack_zero(dest, result_sign), StatusFlags::empty());
    }
    if a.class.is_zero() {
        return (crate::round::pack_zero(dest, result_sign), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let bv = b.value.as_ref().expect("finite operand must carry a value");
    let extra_bits = dest.mantissa_width + 8;
    let (quotient, sticky) = av.div_trunc(bv, extra_bits);
    let quotient = fold_sticky(quotient, sticky);
    round_value(dest, &quotient, result_sign, rounding_mode, tininess_mode, exception_handling_mode)
}

pub(crate) fn ieee754_remainder(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() || b.is_nan() {
        return select_nan(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    if b.class.is_zero() || a.class.is_infinity() {
        return invalid_result(dest, &[a, b], dest.platform_properties.std_bin_ops_nan_propagation_mode.priority());
    }
    if a.class.is_zero() {
        return round_value(dest, a.value.as_ref().unwrap(), a.sign, rounding_mode, tininess_mode, exception_handling_mode);
    }
    if b.class.is_infinity() {
        return round_value(dest, a.value.as_ref().unwrap(), a.sign, rounding_mode, tininess_mode, exception_handling_mode);
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let bv = b.value.as_ref().expect("finite operand must carry a value");

    // n = round-to-nearest-even(a / b), independent of the ambient
    // rounding mode (IEEE 754-2019 §5.3.1); the remainder a - n*b is
    // then exact once n is fixed.
    let extra_bits = dest.mantissa_width + 64;
    let (q, div_sticky) = av.div_trunc(bv, extra_bits);
    let q = fold_sticky(q, div_sticky);
    let n_sign = a.sign.xor(b.sign);
    let (n_mag, _) = q.round_to_nearest_integer_magnitude(RoundingMode::TiesToEven, false);
    let n = ExactValue::new(n_sign, 0, n_mag);

    let remainder = av.sub(&n.mul(bv));
    let sign = if remainder.is_zero() { a.sign } else { remainder.sign };
    round_value(dest, &remainder, sign, rounding_mode, tininess_mode, exception_handling_mode)
}

pub(crate) fn fused_mul_add(
    dest: &FloatProperties,
    a: &Unpacked,
    b: &Unpacked,
    c: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    let ternary_priority = dest.platform_properties.fma_nan_propagation_mode.priority();
    let is_inf_zero = (a.class.is_infinity() && b.class.is_zero()) || (a.class.is_zero() && b.class.is_infinity());

    if is_inf_zero {
        return match dest.platform_properties.fma_inf_zero_qnan_result {
            FMAInfZeroQNaNResult::CanonicalAndGenerateInvalid => invalid_canonical(dest),
            FMAInfZeroQNaNResult::PropagateAndGenerateInvalid => {
                if c.is_nan() {
                    invalid_result(dest, &[a, b, c], ternary_priority)
                } else {
                    invalid_canonical(dest)
                }
            }
            FMAInfZeroQNaNResult::FollowNaNPropagationMode => {
                if c.is_nan() {
                    invalid_result(dest, &[a, b, c], ternary_priority)
                } else {
                    invalid_canonical(dest)
                }
            }
        };
    }

    if a.is_nan() || b.is_nan() || c.is_nan() {
        return select_nan(dest, &[a, b, c], ternary_priority);
    }

    let product_sign = a.sign.xor(b.sign);
    let product_is_infinite = a.class.is_infinity() || b.class.is_infinity();

    if product_is_infinite {
        if c.class.is_infinity() {
            return if c.sign == product_sign {
                (crate::round::pack_infinity(dest, product_sign), StatusFlags::empty())
            } else {
                invalid_result(dest, &[a, b, c], ternary_priority)
            };
        }
        return (crate::round::pack_infinity(dest, product_sign), StatusFlags::empty());
    }
    if c.class.is_infinity() {
        return (crate::round::pack_infinity(dest, c.sign), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let bv = b.value.as_ref().expect("finite operand must carry a value");
    let cv = c.value.as_ref().expect("finite operand must carry a value");

    let product = if a.class.is_zero() || b.class.is_zero() {
        ExactValue::zero(product_sign)
    } else {
        av.mul(bv)
    };
    let sum = product.add(cv);

    let zero_sign = if sum.is_zero() {
        if product.is_zero() && c.class.is_zero() {
            if product_sign == c.sign {
                product_sign
            } else {
                cancellation_zero_sign(rounding_mode)
            }
        } else {
            cancellation_zero_sign(rounding_mode)
        }
    } else {
        sum.sign
    };
    round_value(dest, &sum, zero_sign, rounding_mode, tininess_mode, exception_handling_mode)
}

pub(crate) fn sqrt(
    dest: &FloatProperties,
    a: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return select_nan(dest, &[a], dest.platform_properties.sqrt_nan_propagation_mode.priority());
    }
    if a.class.is_zero() {
        return (crate::round::pack_zero(dest, a.sign), StatusFlags::empty());
    }
    if a.sign == Sign::Negative {
        return invalid_result(dest, &[a], dest.platform_properties.sqrt_nan_propagation_mode.priority());
    }
    if a.class.is_infinity() {
        return (crate::round::pack_infinity(dest, Sign::Positive), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let extra_bits = dest.mantissa_width + 8;
    let (root, sticky) = av.sqrt_trunc(extra_bits);
    let root = fold_sticky(root, sticky);
    round_value(dest, &root, Sign::Positive, rounding_mode, tininess_mode, exception_handling_mode)
}

pub(crate) fn rsqrt(
    dest: &FloatProperties,
    a: &Unpacked,
    rounding_mode: RoundingMode,
    tininess_mode: TininessDetectionMode,
    exception_handling_mode: ExceptionHandlingMode,
) -> (Integer, StatusFlags) {
    if a.is_nan() {
        return select_nan(dest, &[a], dest.platform_properties.rsqrt_nan_propagation_mode.priority());
    }
    if a.class.is_zero() {
        return (crate::round::pack_infinity(dest, a.sign), StatusFlags::DIVISION_BY_ZERO);
    }
    if a.sign == Sign::Negative {
        return invalid_result(dest, &[a], dest.platform_properties.rsqrt_nan_propagation_mode.priority());
    }
    if a.class.is_infinity() {
        return (crate::round::pack_zero(dest, Sign::Positive), StatusFlags::empty());
    }

    let av = a.value.as_ref().expect("finite operand must carry a value");
    let extra_bits = dest.mantissa_width + 8;
    let (sqrt_val, sqrt_sticky) = av.sqrt_trunc(extra_bits + 8);
    let one = ExactValue::new(Sign::Positive, 0, Integer::from(1));
    let (recip, div_sticky) = one.div_trunc(&sqrt_val, extra_bits);
    let recip = fold_sticky(recip, sqrt_sticky || div_sticky);
    round_value(dest, &recip, Sign::Positive, rounding_mode, tininess_mode, exception_handling_mode)
}
