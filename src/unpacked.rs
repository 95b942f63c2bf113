// unpacked.rs
//
// The unpacker: turns a packed (FloatProperties, bits) pair into an
// `Unpacked` view — classification, sign, and (for finite nonzero
// values) an exact mathematical value.
//
// Field extraction is a plain bitwise decode generalized from a fixed
// implicit-leading-bit assumption to the parameterized `FloatProperties`
// shape.

use num_traits::Zero;
use rug::Integer;

use crate::exact::ExactValue;
use crate::float_class::FloatClass;
use crate::format::FloatProperties;
use crate::nan_mode::QuietNaNFormat;
use crate::sign::Sign;

/// The decoded view of one packed bit pattern.
#[derive(Clone, Debug)]
pub(crate) struct Unpacked {
    pub sign: Sign,
    pub class: FloatClass,
    /// Exact mathematical value for zero and finite nonzero classes;
    /// `None` for infinities and NaNs.
    pub value: Option<ExactValue>,
    /// Raw mantissa field payload, retained for NaN classes; `None`
    /// otherwise.
    pub nan_payload: Option<Integer>,
}

impl Unpacked {
    pub fn is_signaling_nan(&self) -> bool {
        matches!(self.class, FloatClass::SignalingNaN)
    }

    pub fn is_nan(&self) -> bool {
        self.class.is_nan()
    }
}

/// Decodes `bits` (already masked to `properties.overall_mask()`) under
/// `properties`.
pub(crate) fn unpack(properties: &FloatProperties, bits: &Integer) -> Unpacked {
    let sign = if properties.has_sign_bit {
        if (bits.clone() & properties.sign_field_mask().clone()).is_zero() {
            Sign::Positive
        } else {
            Sign::Negative
        }
    } else {
        Sign::Positive
    };

    let exponent_field: u64 = ((bits.clone() & properties.exponent_field_mask().clone())
        >> properties.exponent_field_shift() as u32)
        .to_u64_wrapping();
    let mantissa_field = bits.clone() & properties.mantissa_field_mask().clone();

    if exponent_field == properties.exponent_zero_subnormal() {
        if mantissa_field.is_zero() {
            Unpacked {
                sign,
                class: if sign.is_negative() {
                    FloatClass::NegativeZero
                } else {
                    FloatClass::PositiveZero
                },
                value: Some(ExactValue::zero(sign)),
                nan_payload: None,
            }
        } else {
            // value = mantissa * 2^(1 - bias - mantissa_width)
            let exp = 1 - properties.exponent_bias() - properties.mantissa_width as isize;
            Unpacked {
                sign,
                class: if sign.is_negative() {
                    FloatClass::NegativeSubnormal
                } else {
                    FloatClass::PositiveSubnormal
                },
                value: Some(ExactValue::new(sign, exp, mantissa_field)),
                nan_payload: None,
            }
        }
    } else if exponent_field == properties.exponent_inf_nan() {
        if mantissa_field.is_zero() {
            Unpacked {
                sign,
                class: if sign.is_negative() {
                    FloatClass::NegativeInfinity
                } else {
                    FloatClass::PositiveInfinity
                },
                value: None,
                nan_payload: None,
            }
        } else {
            let msb_set = !(mantissa_field.clone() & properties.mantissa_field_msb_mask().clone())
                .is_zero();
            let quiet = match properties.platform_properties.quiet_nan_format() {
                QuietNaNFormat::Standard => msb_set,
                QuietNaNFormat::MIPSLegacy => !msb_set,
            };
            Unpacked {
                sign,
                class: if quiet { FloatClass::QuietNaN } else { FloatClass::SignalingNaN },
                value: None,
                nan_payload: Some(mantissa_field),
            }
        }
    } else {
        // normal: biased exponent -> unbounded exponent of the leading
        // bit, significand includes the implicit leading 1 if present.
        let e = exponent_field as isize - properties.exponent_bias();
        let c = if properties.has_implicit_leading_bit {
            mantissa_field + (Integer::from(1) << properties.mantissa_width as u32)
        } else {
            mantissa_field
        };
        let exp = e - properties.mantissa_width as isize;
        Unpacked {
            sign,
            class: if sign.is_negative() {
                FloatClass::NegativeNormal
            } else {
                FloatClass::PositiveNormal
            },
            value: Some(ExactValue::new(sign, exp, c)),
            nan_payload: None,
        }
    }
}
