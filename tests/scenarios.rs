// scenarios.rs
//
// Concrete width-32, RISC-V, TiesToEven worked results for the core
// arithmetic and classification operators.

use rug::Integer;

use dynfloat::dynamic_float::DynamicFloat;
use dynfloat::fp_state::FPState;
use dynfloat::format::FloatProperties;
use dynfloat::platform::PLATFORM_RISC_V;
use dynfloat::rounding::RoundingMode;
use dynfloat::sign::Sign;
use dynfloat::status::StatusFlags;

fn riscv32() -> FloatProperties {
    FloatProperties::standard(32, PLATFORM_RISC_V)
}

#[test]
fn positive_zero_plus_positive_zero() {
    let props = riscv32();
    let fp_state = FPState::default();
    let zero = DynamicFloat::positive_zero(props, fp_state);
    let result = zero.add(&zero, RoundingMode::TiesToEven);
    assert_eq!(result.bits, Integer::from(0x0000_0000u32));
    assert!(result.fp_state.status_flags.is_empty());
}

#[test]
fn positive_zero_div_positive_zero() {
    let props = riscv32();
    let fp_state = FPState::default();
    let zero = DynamicFloat::positive_zero(props, fp_state);
    let result = zero.div(&zero, RoundingMode::TiesToEven);
    assert_eq!(result.bits, Integer::from(0x7FC0_0000u32));
    assert_eq!(result.fp_state.status_flags, StatusFlags::INVALID_OPERATION);
}

#[test]
fn positive_zero_rsqrt() {
    let props = riscv32();
    let fp_state = FPState::default();
    let zero = DynamicFloat::positive_zero(props, fp_state);
    let result = zero.rsqrt(RoundingMode::TiesToEven);
    assert_eq!(result.bits, Integer::from(0x7F80_0000u32));
    assert_eq!(result.fp_state.status_flags, StatusFlags::DIVISION_BY_ZERO);
}

#[test]
fn from_int_one() {
    let props = riscv32();
    let fp_state = FPState::default();
    let result = DynamicFloat::from_int(props, fp_state, &Integer::from(1), RoundingMode::TiesToEven);
    assert_eq!(result.bits, Integer::from(0x3F80_0000u32));
    assert!(result.fp_state.status_flags.is_empty());
}

#[test]
fn quiet_nan_compare_signaling() {
    let props = riscv32();
    let fp_state = FPState::default();
    let nan = DynamicFloat::quiet_nan(props, fp_state);
    let (result, fp_state) = nan.compare_signaling(&nan);
    assert_eq!(result, None);
    assert_eq!(fp_state.status_flags, StatusFlags::INVALID_OPERATION);
}

#[test]
fn positive_infinity_compare_quiet_positive_zero() {
    let props = riscv32();
    let fp_state = FPState::default();
    let inf = DynamicFloat::positive_infinity(props.clone(), fp_state);
    let zero = DynamicFloat::positive_zero(props, fp_state);

    let (result, flags) = inf.compare_quiet(&zero);
    assert_eq!(result, Some(1));
    assert!(flags.status_flags.is_empty());

    let (result, flags) = zero.compare_quiet(&inf);
    assert_eq!(result, Some(-1));
    assert!(flags.status_flags.is_empty());
}

#[test]
fn signed_min_subnormal_and_max_normal() {
    let props = riscv32();
    let fp_state = FPState::default();
    let min_subnormal = DynamicFloat::signed_min_subnormal(Sign::Negative, props.clone(), fp_state);
    assert_eq!(min_subnormal.bits, Integer::from(0x8000_0001u32));

    let max_normal = DynamicFloat::signed_max_normal(Sign::Positive, props, fp_state);
    assert_eq!(max_normal.bits, Integer::from(0x7F7F_FFFFu32));
}

#[test]
fn signaling_nan_to_quiet_nan() {
    let props = riscv32();
    let fp_state = FPState::default();
    let snan = DynamicFloat::signaling_nan(props, fp_state);
    let qnan = snan.to_quiet_nan();
    let masked: Integer = qnan.bits.clone() & Integer::from(0x7FC0_0000u32);
    assert_eq!(masked, Integer::from(0x7FC0_0000u32));
}
