// ops/compare.rs
//
// Quiet and signaling total-order-free comparison: `compare` only flags
// INVALID_OPERATION for a signaling NaN operand, `compare_signaling`
// flags it for any NaN operand (IEEE 754-2019 §5.11).

use std::cmp::Ordering;

use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// The result of comparing two non-NaN operands. `None` from `compare`/
/// `compare_signaling` means "unordered" (at least one operand was NaN).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CompareResult {
    Less,
    Equal,
    Greater,
}

pub(crate) fn compare(a: &Unpacked, b: &Unpacked) -> (Option<CompareResult>, StatusFlags) {
    if a.is_nan() || b.is_nan() {
        let flags = if a.is_signaling_nan() || b.is_signaling_nan() {
            StatusFlags::INVALID_OPERATION
        } else {
            StatusFlags::empty()
        };
        return (None, flags);
    }
    (Some(ordered_compare(a, b)), StatusFlags::empty())
}

pub(crate) fn compare_signaling(a: &Unpacked, b: &Unpacked) -> (Option<CompareResult>, StatusFlags) {
    if a.is_nan() || b.is_nan() {
        return (None, StatusFlags::INVALID_OPERATION);
    }
    (Some(ordered_compare(a, b)), StatusFlags::empty())
}

/// Orders two non-NaN operands, treating `+0` and `-0` as equal.
fn ordered_compare(a: &Unpacked, b: &Unpacked) -> CompareResult {
    if a.class.is_zero() && b.class.is_zero() {
        return CompareResult::Equal;
    }
    if a.sign != b.sign {
        return if a.sign.is_negative() { CompareResult::Less } else { CompareResult::Greater };
    }

    let magnitude_order = magnitude_cmp(a, b);
    let order = if a.sign.is_negative() { magnitude_order.reverse() } else { magnitude_order };
    match order {
        Ordering::Less => CompareResult::Less,
        Ordering::Equal => CompareResult::Equal,
        Ordering::Greater => CompareResult::Greater,
    }
}

/// Compares the magnitudes of two non-NaN, same-sign (or differently
/// classed) operands, where infinities compare greater than any finite
/// magnitude and equal to each other.
fn magnitude_cmp(a: &Unpacked, b: &Unpacked) -> Ordering {
    match (a.class.is_infinity(), b.class.is_infinity()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let av = a.value.as_ref().expect("finite operand must carry a value");
            let bv = b.value.as_ref().expect("finite operand must carry a value");
            av.cmp_magnitude(bv)
        }
    }
}

/// Convenience for numeric (not bitwise) equality: `true` iff `compare`
/// would report exact equality. Never raises a flag of its own.
pub(crate) fn values_equal(a: &Unpacked, b: &Unpacked) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    matches!(ordered_compare(a, b), CompareResult::Equal)
}
