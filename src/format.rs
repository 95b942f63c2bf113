// format.rs
//
// FloatProperties: the immutable format descriptor that derives every
// bit-layout constant (shifts, masks, biases) from a format shape plus
// a PlatformProperties policy bundle.
//
// Parameterized by four independent shape parameters (exponent_width,
// mantissa_width, has_implicit_leading_bit, has_sign_bit) rather than
// assuming an implicit leading bit and a fixed width pair.

use std::fmt;

use num_traits::Zero;
use rug::Integer;

use crate::platform::PlatformProperties;
use crate::util::bitmask;

/// An immutable, derived-field-cached description of one floating-point
/// bit layout: how many bits each field occupies, where those fields
/// sit in the packed representation, and which [`PlatformProperties`]
/// governs its NaN/edge-case behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatProperties {
    pub exponent_width: usize,
    pub mantissa_width: usize,
    pub has_implicit_leading_bit: bool,
    pub has_sign_bit: bool,
    pub platform_properties: PlatformProperties,

    // Cached derived fields; all are pure functions of the five fields
    // above, computed once in `new` rather than recomputed per access.
    width: usize,
    fraction_width: usize,
    sign_field_shift: usize,
    sign_field_mask: Integer,
    exponent_field_shift: usize,
    exponent_field_mask: Integer,
    mantissa_field_mask: Integer,
    mantissa_field_max: Integer,
    mantissa_field_normal_min: Integer,
    mantissa_field_msb_shift: usize,
    mantissa_field_msb_mask: Integer,
    exponent_bias: isize,
    exponent_inf_nan: u64,
    exponent_zero_subnormal: u64,
    exponent_min_normal: u64,
    exponent_max_normal: u64,
    overall_mask: Integer,
}

impl FloatProperties {
    /// Builds a format descriptor from its four shape parameters and a
    /// platform policy bundle, computing and caching every derived field.
    pub fn new(
        exponent_width: usize,
        mantissa_width: usize,
        has_implicit_leading_bit: bool,
        has_sign_bit: bool,
        platform_properties: PlatformProperties,
    ) -> Self {
        assert!(exponent_width >= 2, "exponent_width must be at least 2");
        assert!(mantissa_width >= 1, "mantissa_width must be at least 1");

        let fraction_width = if has_implicit_leading_bit {
            mantissa_width
        } else {
            mantissa_width + 1
        };
        let width = (if has_sign_bit { 1 } else { 0 }) + exponent_width + mantissa_width;

        let mantissa_field_shift = 0usize;
        let exponent_field_shift = mantissa_field_shift + mantissa_width;
        let sign_field_shift = exponent_field_shift + exponent_width;

        let mantissa_field_mask = bitmask(mantissa_width);
        let exponent_field_mask = bitmask(exponent_width) << exponent_field_shift as u32;
        let sign_field_mask = if has_sign_bit {
            Integer::from(1) << sign_field_shift as u32
        } else {
            Integer::zero()
        };

        let mantissa_field_msb_shift = mantissa_width - 1;
        let mantissa_field_msb_mask = Integer::from(1) << mantissa_field_msb_shift as u32;

        let mantissa_field_max = bitmask(mantissa_width);
        let mantissa_field_normal_min = if has_implicit_leading_bit {
            Integer::zero()
        } else {
            Integer::from(1) << mantissa_field_msb_shift as u32
        };

        let exponent_bias = (1isize << (exponent_width - 1)) - 1;
        let exponent_inf_nan = (1u64 << exponent_width) - 1;
        let exponent_zero_subnormal = 0u64;
        let exponent_min_normal = 1u64;
        let exponent_max_normal = exponent_inf_nan - 1;

        let overall_mask = bitmask(width);

        FloatProperties {
            exponent_width,
            mantissa_width,
            has_implicit_leading_bit,
            has_sign_bit,
            platform_properties,
            width,
            fraction_width,
            sign_field_shift,
            sign_field_mask,
            exponent_field_shift,
            exponent_field_mask,
            mantissa_field_mask,
            mantissa_field_max,
            mantissa_field_normal_min,
            mantissa_field_msb_shift,
            mantissa_field_msb_mask,
            exponent_bias,
            exponent_inf_nan,
            exponent_zero_subnormal,
            exponent_min_normal,
            exponent_max_normal,
            overall_mask,
        }
    }

    /// Builds the IEEE 754-2019 binary{16,32,64,128} format descriptor
    /// for `width`, under `platform_properties`.
    pub fn standard(width: usize, platform_properties: PlatformProperties) -> Self {
        let (exponent_width, mantissa_width) = match width {
            16 => (5, 10),
            32 => (8, 23),
            64 => (11, 52),
            128 => (15, 112),
            _ => panic!("{width} is not a standard IEEE 754 binary width"),
        };
        FloatProperties::new(exponent_width, mantissa_width, true, true, platform_properties)
    }

    /// `true` iff this format matches one of the four standard binary
    /// shapes with an implicit leading bit and an explicit sign bit.
    pub fn is_standard(&self) -> bool {
        self.has_implicit_leading_bit
            && self.has_sign_bit
            && matches!(
                (self.exponent_width, self.mantissa_width),
                (5, 10) | (8, 23) | (11, 52) | (15, 112)
            )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn fraction_width(&self) -> usize {
        self.fraction_width
    }

    pub fn sign_field_shift(&self) -> usize {
        self.sign_field_shift
    }

    pub fn sign_field_mask(&self) -> &Integer {
        &self.sign_field_mask
    }

    pub fn exponent_field_shift(&self) -> usize {
        self.exponent_field_shift
    }

    pub fn exponent_field_mask(&self) -> &Integer {
        &self.exponent_field_mask
    }

    pub fn mantissa_field_mask(&self) -> &Integer {
        &self.mantissa_field_mask
    }

    pub fn mantissa_field_max(&self) -> &Integer {
        &self.mantissa_field_max
    }

    pub fn mantissa_field_normal_min(&self) -> &Integer {
        &self.mantissa_field_normal_min
    }

    pub fn mantissa_field_msb_shift(&self) -> usize {
        self.mantissa_field_msb_shift
    }

    pub fn mantissa_field_msb_mask(&self) -> &Integer {
        &self.mantissa_field_msb_mask
    }

    pub fn exponent_bias(&self) -> isize {
        self.exponent_bias
    }

    pub fn exponent_inf_nan(&self) -> u64 {
        self.exponent_inf_nan
    }

    pub fn exponent_zero_subnormal(&self) -> u64 {
        self.exponent_zero_subnormal
    }

    pub fn exponent_min_normal(&self) -> u64 {
        self.exponent_min_normal
    }

    pub fn exponent_max_normal(&self) -> u64 {
        self.exponent_max_normal
    }

    pub fn overall_mask(&self) -> &Integer {
        &self.overall_mask
    }
}

impl fmt::Display for FloatProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_standard() {
            write!(f, "FloatProperties.standard({}, {})", self.width, self.platform_properties)
        } else {
            write!(
                f,
                "FloatProperties(exponent_width={}, mantissa_width={}, \
                 has_implicit_leading_bit={}, has_sign_bit={}, platform_properties={})",
                self.exponent_width,
                self.mantissa_width,
                self.has_implicit_leading_bit,
                self.has_sign_bit,
                self.platform_properties
            )
        }
    }
}
