// structural.rs
//
// Format-shape and round-trip invariants that hold across every standard
// width and every named platform, not just RISC-V.

use num_traits::Zero;
use rug::Integer;

use dynfloat::dynamic_float::DynamicFloat;
use dynfloat::fp_state::FPState;
use dynfloat::format::FloatProperties;
use dynfloat::platform::{
    PLATFORM_ARM, PLATFORM_HPPA, PLATFORM_MIPS_2008, PLATFORM_MIPS_LEGACY, PLATFORM_POWER,
    PLATFORM_RISC_V, PLATFORM_SPARC, PLATFORM_X86_SSE,
};
use dynfloat::rounding::UpOrDown;
use dynfloat::sign::Sign;
use dynfloat::status::StatusFlags;

const STANDARD_WIDTHS: [usize; 4] = [16, 32, 64, 128];

const PLATFORMS: [dynfloat::platform::PlatformProperties; 8] = [
    PLATFORM_RISC_V,
    PLATFORM_ARM,
    PLATFORM_X86_SSE,
    PLATFORM_POWER,
    PLATFORM_MIPS_2008,
    PLATFORM_MIPS_LEGACY,
    PLATFORM_SPARC,
    PLATFORM_HPPA,
];

#[test]
fn standard_widths_report_is_standard() {
    for &width in &STANDARD_WIDTHS {
        let props = FloatProperties::standard(width, PLATFORM_RISC_V);
        assert!(props.is_standard());
        assert_eq!(props.width(), width);
    }
}

#[test]
fn standard_widths_have_the_expected_exponent_bias() {
    let expected = [(16, 15), (32, 127), (64, 1023), (128, 16383)];
    for (width, bias) in expected {
        let props = FloatProperties::standard(width, PLATFORM_RISC_V);
        assert_eq!(props.exponent_bias(), bias);
    }
}

#[test]
fn sign_field_shift_is_width_minus_one() {
    for &width in &STANDARD_WIDTHS {
        let props = FloatProperties::standard(width, PLATFORM_RISC_V);
        assert_eq!(props.sign_field_shift(), width - 1);
    }
}

#[test]
fn overall_mask_covers_exactly_width_bits() {
    for &width in &STANDARD_WIDTHS {
        let props = FloatProperties::standard(width, PLATFORM_RISC_V);
        let expected = (Integer::from(1) << width as u32) - 1;
        assert_eq!(*props.overall_mask(), expected);
    }
}

#[test]
fn every_constructed_value_respects_its_overall_mask() {
    for platform in PLATFORMS {
        for &width in &STANDARD_WIDTHS {
            let props = FloatProperties::standard(width, platform);
            let fp_state = FPState::default();
            let values = [
                DynamicFloat::positive_zero(props.clone(), fp_state),
                DynamicFloat::negative_zero(props.clone(), fp_state),
                DynamicFloat::positive_infinity(props.clone(), fp_state),
                DynamicFloat::negative_infinity(props.clone(), fp_state),
                DynamicFloat::quiet_nan(props.clone(), fp_state),
                DynamicFloat::signaling_nan(props.clone(), fp_state),
                DynamicFloat::signed_max_normal(Sign::Positive, props.clone(), fp_state),
                DynamicFloat::signed_min_subnormal(Sign::Negative, props.clone(), fp_state),
            ];
            for value in values {
                let leftover = value.bits.clone() & !props.overall_mask().clone();
                assert!(leftover.is_zero(), "width {width}, platform field, bits {:?}", value.bits);
            }
        }
    }
}

#[test]
fn copy_sign_onto_self_is_identity() {
    let props = FloatProperties::standard(32, PLATFORM_RISC_V);
    let fp_state = FPState::default();
    let value = DynamicFloat::signed_max_normal(Sign::Negative, props, fp_state);
    assert_eq!(value.copy_sign(&value), value);
}

#[test]
fn double_negation_is_identity_including_nan_payload() {
    let props = FloatProperties::standard(32, PLATFORM_RISC_V);
    let fp_state = FPState::default();
    let nan = DynamicFloat::signaling_nan(props.clone(), fp_state);
    assert_eq!(nan.neg().neg(), nan);

    let normal = DynamicFloat::signed_max_normal(Sign::Positive, props, fp_state);
    assert_eq!(normal.neg().neg(), normal);
}

#[test]
fn abs_always_clears_the_sign_bit() {
    let props = FloatProperties::standard(32, PLATFORM_RISC_V);
    let fp_state = FPState::default();
    let negative = DynamicFloat::signed_max_normal(Sign::Negative, props, fp_state);
    assert!(negative.abs().sign().is_positive());
}

#[test]
fn next_up_then_next_down_round_trips_a_finite_nonzero_value() {
    let props = FloatProperties::standard(32, PLATFORM_RISC_V);
    let fp_state = FPState::default();
    let value = DynamicFloat::signed_max_normal(Sign::Positive, props.clone(), fp_state).next_up_or_down(UpOrDown::Down);
    let stepped = value.next_up_or_down(UpOrDown::Up).next_up_or_down(UpOrDown::Down);
    assert_eq!(stepped, value);
}

#[test]
fn merge_is_commutative_and_has_an_identity() {
    let base = FPState::default();
    let with_invalid = base.with_flags_for_test(StatusFlags::INVALID_OPERATION);
    let with_inexact = base.with_flags_for_test(StatusFlags::INEXACT);

    assert_eq!(with_invalid.merge(&with_inexact), with_inexact.merge(&with_invalid));
    assert_eq!(with_invalid.merge(&base), with_invalid);
    assert_eq!(base.merge(&with_invalid), with_invalid);
}

#[test]
fn status_flags_round_trip_every_valid_bit_pattern() {
    for bits in 0u32..=31 {
        let flags = StatusFlags::new(bits);
        assert_eq!(flags.bits(), bits);
    }
}

trait FPStateTestExt {
    fn with_flags_for_test(&self, flags: StatusFlags) -> FPState;
}

impl FPStateTestExt for FPState {
    fn with_flags_for_test(&self, flags: StatusFlags) -> FPState {
        FPState::new(
            Some(self.rounding_mode),
            Some(self.status_flags | flags),
            Some(self.exception_handling_mode),
            Some(self.tininess_detection_mode),
        )
    }
}
