// nan_select.rs
//
// NaN selection: given the unpacked operands of an operator and its
// NaN-propagation mode, decides which NaN payload (if any) the result
// carries and whether INVALID_OPERATION must be set.

use rug::Integer;

use crate::format::FloatProperties;
use crate::nan_mode::NanPriority;
use crate::round::{canonical_nan_bits, pack_nan, to_quiet_mantissa};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::Unpacked;

/// The bits and flags contributed by resolving a NaN among `operands`
/// (indexed the same way the mode's priority order references them)
/// into the destination format `dest`.
pub(crate) fn select_nan(dest: &FloatProperties, operands: &[&Unpacked], priority: NanPriority) -> (Integer, StatusFlags) {
    let mut flags = StatusFlags::empty();
    if operands.iter().any(|op| op.is_signaling_nan()) {
        flags |= StatusFlags::INVALID_OPERATION;
    }

    let order: &[usize] = match priority {
        NanPriority::AlwaysCanonical => return (canonical_nan_bits(dest), flags),
        NanPriority::Priority { order, .. } => order,
    };
    let prefer_snan = matches!(priority, NanPriority::Priority { prefer_snan: true, .. });

    if prefer_snan {
        if let Some(op) = order.iter().map(|&i| operands[i]).find(|op| op.is_signaling_nan()) {
            return (pack_nan_from_operand(dest, op), flags);
        }
    }
    if let Some(op) = order.iter().map(|&i| operands[i]).find(|op| op.is_nan()) {
        return (pack_nan_from_operand(dest, op), flags);
    }

    // No NaN among the listed operands; caller guarantees this cannot
    // happen when `select_nan` is invoked (a NaN is always present).
    (canonical_nan_bits(dest), flags)
}

/// Packs `op`'s NaN payload (quieted) into `dest`'s layout. Every
/// operator that reaches `select_nan` (add/sub/mul/div/fma/sqrt/...)
/// takes all of its operands in the same format as its result, so the
/// payload field width already matches `dest`; only `quiet_nan_format`
/// may differ is handled via `to_quiet_mantissa`.
fn pack_nan_from_operand(dest: &FloatProperties, op: &Unpacked) -> Integer {
    let payload = op.nan_payload.as_ref().expect("NaN operand must carry a payload");
    let quieted = to_quiet_mantissa(dest, payload);
    pack_nan(dest, op.sign, &quieted)
}

/// Re-targets a NaN payload of `src_width` bits to `dest_width` bits,
/// keeping the most-significant bits of the payload (the quiet/signal
/// bit and whatever high payload bits fit) per
/// `RetainMostSignificantBits` / the ordinary priority-list conversion.
fn retarget_payload(payload: &Integer, dest_width: usize, src_width: usize) -> Integer {
    if src_width <= dest_width {
        payload.clone() << (dest_width - src_width) as u32
    } else {
        payload.clone() >> (src_width - dest_width) as u32
    }
}

/// Resolves the destination NaN for a format-to-format conversion under
/// `RetainMostSignificantBits`: keep the high mantissa bits of the
/// source payload, then re-quiet per the destination's convention.
pub(crate) fn convert_retain_msb(
    dest: &FloatProperties,
    src_width: usize,
    op: &Unpacked,
) -> (Integer, StatusFlags) {
    let mut flags = StatusFlags::empty();
    if op.is_signaling_nan() {
        flags |= StatusFlags::INVALID_OPERATION;
    }
    let payload = op.nan_payload.as_ref().expect("NaN operand must carry a payload");
    let retained = retarget_payload(payload, dest.mantissa_width, src_width);
    let quieted = to_quiet_mantissa(dest, &retained);
    (pack_nan(dest, op.sign, &quieted), flags)
}

/// Convenience: the canonical NaN of `dest`, signed as declared by its
/// platform properties (the sign is not operand-dependent).
pub(crate) fn canonical_nan(dest: &FloatProperties) -> (Integer, Sign) {
    (canonical_nan_bits(dest), dest.platform_properties.canonical_nan_sign)
}
