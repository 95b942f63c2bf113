// dynamic_float.rs
//
// DynamicFloat: the public façade pairing a FloatProperties-described bit
// pattern with the FPState that produced it. Every operator funnels into
// `ops::*`; classification attributes delegate to `unpacked::unpack`.
//
// An immutable value type with infix operator impls that forward to a
// named method, and keyword-style copy construction via `with`.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Zero;
use rug::Integer;

use crate::float_class::FloatClass;
use crate::fp_state::FPState;
use crate::format::FloatProperties;
use crate::ops::{self, CompareResult};
use crate::round;
use crate::rounding::{RoundingMode, UpOrDown};
use crate::sign::Sign;
use crate::status::StatusFlags;
use crate::unpacked::{unpack, Unpacked};

/// Every numeric operator here takes its rounding mode as an explicit
/// parameter (rather than always reading `fp_state.rounding_mode`),
/// matching the concrete scenarios of a value computing under a mode
/// other than its own stored default (e.g. `rsqrt(TiesToEven)` on a
/// value whose `fp_state` carries a different default). Only the
/// infix operator trait impls, which have no room for an extra
/// parameter, fall back to `self.fp_state.rounding_mode`.
#[derive(Clone, Debug)]
pub struct DynamicFloat {
    pub properties: FloatProperties,
    pub bits: Integer,
    pub fp_state: FPState,
}

impl PartialEq for DynamicFloat {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties && self.bits == other.bits && self.fp_state == other.fp_state
    }
}

impl Eq for DynamicFloat {}

fn clear_inexact(flags: StatusFlags) -> StatusFlags {
    StatusFlags::new(flags.bits() & !StatusFlags::INEXACT.bits())
}

fn compare_result_to_i32(result: CompareResult) -> i32 {
    match result {
        CompareResult::Less => -1,
        CompareResult::Equal => 0,
        CompareResult::Greater => 1,
    }
}

impl DynamicFloat {
    /// Builds a value directly from a bit pattern, asserting the
    /// invariant `bits & !overall_mask == 0`.
    pub fn new(properties: FloatProperties, bits: Integer, fp_state: FPState) -> Self {
        assert!(
            (bits.clone() & !properties.overall_mask().clone()).is_zero(),
            "DynamicFloat bits exceed this format's overall_mask"
        );
        DynamicFloat { properties, bits, fp_state }
    }

    /// Copy-with-overrides: any field left `None` is copied from `self`.
    pub fn with(&self, bits: Option<Integer>, fp_state: Option<FPState>) -> Self {
        DynamicFloat::new(
            self.properties.clone(),
            bits.unwrap_or_else(|| self.bits.clone()),
            fp_state.unwrap_or(self.fp_state),
        )
    }

    fn unpacked(&self) -> Unpacked {
        unpack(&self.properties, &self.bits)
    }

    fn with_bits_and_flags(&self, bits: Integer, flags: StatusFlags) -> DynamicFloat {
        DynamicFloat::new(self.properties.clone(), bits, self.fp_state.with_flags(flags))
    }

    // --- arithmetic -----------------------------------------------------

    pub fn add(&self, other: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::add(
            &self.properties,
            &self.unpacked(),
            &other.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn sub(&self, other: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::sub(
            &self.properties,
            &self.unpacked(),
            &other.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn mul(&self, other: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::mul(
            &self.properties,
            &self.unpacked(),
            &other.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn div(&self, other: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::div(
            &self.properties,
            &self.unpacked(),
            &other.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn ieee754_remainder(&self, other: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::ieee754_remainder(
            &self.properties,
            &self.unpacked(),
            &other.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn fused_mul_add(&self, b: &DynamicFloat, c: &DynamicFloat, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::fused_mul_add(
            &self.properties,
            &self.unpacked(),
            &b.unpacked(),
            &c.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn sqrt(&self, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::sqrt(
            &self.properties,
            &self.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn rsqrt(&self, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::rsqrt(
            &self.properties,
            &self.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn scale_b(&self, n: i64, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::scale_b(
            &self.properties,
            &self.unpacked(),
            n,
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        self.with_bits_and_flags(bits, flags)
    }

    pub fn log_b(&self) -> (Option<Integer>, FPState) {
        let (value, flags) = ops::log_b(&self.unpacked());
        (value, self.fp_state.with_flags(flags))
    }

    pub fn round_to_integral(&self, rounding_mode: RoundingMode, exact: bool) -> DynamicFloat {
        let (bits, mut flags) = ops::round_to_integral(&self.properties, &self.unpacked(), rounding_mode);
        if !exact {
            flags = clear_inexact(flags);
        }
        self.with_bits_and_flags(bits, flags)
    }

    pub fn round_to_integer(&self, rounding_mode: RoundingMode, exact: bool) -> (Option<Integer>, FPState) {
        let (value, mut flags) = ops::round_to_integer(&self.unpacked(), rounding_mode);
        if !exact {
            flags = clear_inexact(flags);
        }
        (value, self.fp_state.with_flags(flags))
    }

    pub fn to_int(&self, max_bits: u32, rounding_mode: RoundingMode, exact: bool) -> (Option<Integer>, FPState) {
        let (value, mut flags) = ops::to_int(&self.unpacked(), max_bits, rounding_mode);
        if !exact {
            flags = clear_inexact(flags);
        }
        (value, self.fp_state.with_flags(flags))
    }

    pub fn convert_to_dynamic_float(&self, dest_properties: FloatProperties, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::convert_to_dynamic_float(
            &dest_properties,
            &self.properties,
            &self.unpacked(),
            rounding_mode,
            self.fp_state.tininess_detection_mode,
            self.fp_state.exception_handling_mode,
        );
        DynamicFloat::new(dest_properties, bits, self.fp_state.with_flags(flags))
    }

    /// Converts a signed arbitrary-precision integer into `properties`,
    /// under `fp_state`'s rounding/tininess/exception policy.
    pub fn from_int(properties: FloatProperties, fp_state: FPState, value: &Integer, rounding_mode: RoundingMode) -> DynamicFloat {
        let (bits, flags) = ops::from_int(
            &properties,
            value,
            rounding_mode,
            fp_state.tininess_detection_mode,
            fp_state.exception_handling_mode,
        );
        DynamicFloat::new(properties, bits, fp_state.with_flags(flags))
    }

    // --- sign manipulation (never raises flags) --------------------------

    pub fn abs(&self) -> DynamicFloat {
        let bits = ops::abs(&self.properties, &self.bits);
        DynamicFloat::new(self.properties.clone(), bits, self.fp_state)
    }

    pub fn neg(&self) -> DynamicFloat {
        let bits = ops::neg(&self.properties, &self.bits);
        DynamicFloat::new(self.properties.clone(), bits, self.fp_state)
    }

    pub fn copy_sign(&self, sign_source: &DynamicFloat) -> DynamicFloat {
        let bits = ops::copy_sign(&self.properties, &self.bits, &sign_source.bits);
        DynamicFloat::new(self.properties.clone(), bits, self.fp_state)
    }

    pub fn next_up_or_down(&self, direction: UpOrDown) -> DynamicFloat {
        let (bits, flags) = ops::next_up_or_down(&self.properties, &self.unpacked(), &self.bits, direction);
        self.with_bits_and_flags(bits, flags)
    }

    pub fn next_up(&self) -> DynamicFloat {
        self.next_up_or_down(UpOrDown::Up)
    }

    pub fn next_down(&self) -> DynamicFloat {
        self.next_up_or_down(UpOrDown::Down)
    }

    // --- comparison -------------------------------------------------------

    pub fn compare_quiet(&self, other: &DynamicFloat) -> (Option<i32>, FPState) {
        let (result, flags) = ops::compare(&self.unpacked(), &other.unpacked());
        (result.map(compare_result_to_i32), self.fp_state.with_flags(flags))
    }

    pub fn compare_signaling(&self, other: &DynamicFloat) -> (Option<i32>, FPState) {
        let (result, flags) = ops::compare_signaling(&self.unpacked(), &other.unpacked());
        (result.map(compare_result_to_i32), self.fp_state.with_flags(flags))
    }

    // --- classification attributes ---------------------------------------

    pub fn sign(&self) -> Sign {
        self.unpacked().sign
    }

    pub fn float_class(&self) -> FloatClass {
        self.unpacked().class
    }

    pub fn exponent_field(&self) -> u64 {
        ((self.bits.clone() & self.properties.exponent_field_mask().clone()) >> self.properties.exponent_field_shift() as u32)
            .to_u64_wrapping()
    }

    pub fn mantissa_field(&self) -> Integer {
        self.bits.clone() & self.properties.mantissa_field_mask().clone()
    }

    pub fn mantissa_field_msb(&self) -> bool {
        !(self.mantissa_field() & self.properties.mantissa_field_msb_mask().clone()).is_zero()
    }

    pub fn is_positive_zero(&self) -> bool {
        matches!(self.float_class(), FloatClass::PositiveZero)
    }

    pub fn is_negative_zero(&self) -> bool {
        matches!(self.float_class(), FloatClass::NegativeZero)
    }

    pub fn is_positive_subnormal(&self) -> bool {
        matches!(self.float_class(), FloatClass::PositiveSubnormal)
    }

    pub fn is_negative_subnormal(&self) -> bool {
        matches!(self.float_class(), FloatClass::NegativeSubnormal)
    }

    pub fn is_positive_normal(&self) -> bool {
        matches!(self.float_class(), FloatClass::PositiveNormal)
    }

    pub fn is_negative_normal(&self) -> bool {
        matches!(self.float_class(), FloatClass::NegativeNormal)
    }

    pub fn is_positive_infinity(&self) -> bool {
        matches!(self.float_class(), FloatClass::PositiveInfinity)
    }

    pub fn is_negative_infinity(&self) -> bool {
        matches!(self.float_class(), FloatClass::NegativeInfinity)
    }

    pub fn is_quiet_nan(&self) -> bool {
        matches!(self.float_class(), FloatClass::QuietNaN)
    }

    pub fn is_signaling_nan(&self) -> bool {
        matches!(self.float_class(), FloatClass::SignalingNaN)
    }

    pub fn is_infinity(&self) -> bool {
        self.float_class().is_infinity()
    }

    pub fn is_normal(&self) -> bool {
        self.float_class().is_normal()
    }

    pub fn is_subnormal(&self) -> bool {
        self.float_class().is_subnormal()
    }

    pub fn is_zero(&self) -> bool {
        self.float_class().is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.float_class().is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.float_class().is_finite()
    }

    pub fn is_subnormal_or_zero(&self) -> bool {
        self.is_subnormal() || self.is_zero()
    }

    // --- constant factories -----------------------------------------------

    pub fn signed_zero(sign: Sign, properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::pack_zero(&properties, sign);
        DynamicFloat::new(properties, bits, fp_state)
    }

    pub fn positive_zero(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        DynamicFloat::signed_zero(Sign::Positive, properties, fp_state)
    }

    pub fn negative_zero(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        DynamicFloat::signed_zero(Sign::Negative, properties, fp_state)
    }

    pub fn signed_infinity(sign: Sign, properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::pack_infinity(&properties, sign);
        DynamicFloat::new(properties, bits, fp_state)
    }

    pub fn positive_infinity(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        DynamicFloat::signed_infinity(Sign::Positive, properties, fp_state)
    }

    pub fn negative_infinity(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        DynamicFloat::signed_infinity(Sign::Negative, properties, fp_state)
    }

    /// The platform canonical NaN (`quiet_nan`).
    pub fn quiet_nan(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::canonical_nan_bits(&properties);
        DynamicFloat::new(properties, bits, fp_state)
    }

    pub fn signaling_nan(properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::signaling_nan_bits(&properties);
        DynamicFloat::new(properties, bits, fp_state)
    }

    /// Quiets this value's own NaN payload in place (sets the quiet bit
    /// per format, preserving the rest of the payload). Panics if `self`
    /// is not a NaN.
    pub fn to_quiet_nan(&self) -> DynamicFloat {
        let a = self.unpacked();
        let payload = a.nan_payload.as_ref().expect("to_quiet_nan of a non-NaN value");
        let quieted = round::to_quiet_mantissa(&self.properties, payload);
        let bits = round::pack_nan(&self.properties, a.sign, &quieted);
        DynamicFloat::new(self.properties.clone(), bits, self.fp_state)
    }

    pub fn signed_max_normal(sign: Sign, properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::pack_max_finite(&properties, sign);
        DynamicFloat::new(properties, bits, fp_state)
    }

    pub fn signed_min_subnormal(sign: Sign, properties: FloatProperties, fp_state: FPState) -> DynamicFloat {
        let bits = round::pack_min_subnormal(&properties, sign);
        DynamicFloat::new(properties, bits, fp_state)
    }
}

// --- infix operators, under this value's own stored rounding mode ---------

impl Add for DynamicFloat {
    type Output = DynamicFloat;

    fn add(self, rhs: Self) -> DynamicFloat {
        let rounding_mode = self.fp_state.rounding_mode;
        DynamicFloat::add(&self, &rhs, rounding_mode)
    }
}

impl Sub for DynamicFloat {
    type Output = DynamicFloat;

    fn sub(self, rhs: Self) -> DynamicFloat {
        let rounding_mode = self.fp_state.rounding_mode;
        DynamicFloat::sub(&self, &rhs, rounding_mode)
    }
}

impl Mul for DynamicFloat {
    type Output = DynamicFloat;

    fn mul(self, rhs: Self) -> DynamicFloat {
        let rounding_mode = self.fp_state.rounding_mode;
        DynamicFloat::mul(&self, &rhs, rounding_mode)
    }
}

impl Div for DynamicFloat {
    type Output = DynamicFloat;

    fn div(self, rhs: Self) -> DynamicFloat {
        let rounding_mode = self.fp_state.rounding_mode;
        DynamicFloat::div(&self, &rhs, rounding_mode)
    }
}

impl Neg for DynamicFloat {
    type Output = DynamicFloat;

    fn neg(self) -> DynamicFloat {
        DynamicFloat::neg(&self)
    }
}
