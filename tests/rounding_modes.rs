// rounding_modes.rs
//
// round_and_pack's tie-break and directed-rounding behavior under every
// non-default RoundingMode, exercised through round_to_integral on exact
// half-integer inputs (width-32 RISC-V).

use rug::Integer;

use dynfloat::dynamic_float::DynamicFloat;
use dynfloat::fp_state::FPState;
use dynfloat::format::FloatProperties;
use dynfloat::platform::PLATFORM_RISC_V;
use dynfloat::rounding::RoundingMode;

fn riscv32() -> FloatProperties {
    FloatProperties::standard(32, PLATFORM_RISC_V)
}

fn value(bits: u32) -> DynamicFloat {
    DynamicFloat::new(riscv32(), Integer::from(bits), FPState::default())
}

const POSITIVE_2_5: u32 = 0x4020_0000;
const POSITIVE_2: u32 = 0x4000_0000;
const POSITIVE_3: u32 = 0x4040_0000;
const NEGATIVE_2_5: u32 = 0xC020_0000;
const NEGATIVE_2: u32 = 0xC000_0000;
const NEGATIVE_3: u32 = 0xC040_0000;

#[test]
fn ties_to_even_breaks_to_the_even_integer() {
    assert_eq!(value(POSITIVE_2_5).round_to_integral(RoundingMode::TiesToEven, true).bits, Integer::from(POSITIVE_2));
    assert_eq!(value(NEGATIVE_2_5).round_to_integral(RoundingMode::TiesToEven, true).bits, Integer::from(NEGATIVE_2));
}

#[test]
fn ties_to_away_breaks_away_from_zero_regardless_of_parity() {
    assert_eq!(value(POSITIVE_2_5).round_to_integral(RoundingMode::TiesToAway, true).bits, Integer::from(POSITIVE_3));
    assert_eq!(value(NEGATIVE_2_5).round_to_integral(RoundingMode::TiesToAway, true).bits, Integer::from(NEGATIVE_3));
}

#[test]
fn toward_zero_truncates() {
    assert_eq!(value(POSITIVE_2_5).round_to_integral(RoundingMode::TowardZero, true).bits, Integer::from(POSITIVE_2));
    assert_eq!(value(NEGATIVE_2_5).round_to_integral(RoundingMode::TowardZero, true).bits, Integer::from(NEGATIVE_2));
}

#[test]
fn toward_positive_rounds_up_for_positive_and_truncates_negative() {
    assert_eq!(value(POSITIVE_2_5).round_to_integral(RoundingMode::TowardPositive, true).bits, Integer::from(POSITIVE_3));
    assert_eq!(value(NEGATIVE_2_5).round_to_integral(RoundingMode::TowardPositive, true).bits, Integer::from(NEGATIVE_2));
}

#[test]
fn toward_negative_truncates_positive_and_rounds_away_for_negative() {
    assert_eq!(value(POSITIVE_2_5).round_to_integral(RoundingMode::TowardNegative, true).bits, Integer::from(POSITIVE_2));
    assert_eq!(value(NEGATIVE_2_5).round_to_integral(RoundingMode::TowardNegative, true).bits, Integer::from(NEGATIVE_3));
}

#[test]
fn round_to_integer_ties_to_away_matches_round_to_integral() {
    let (result, _) = value(POSITIVE_2_5).round_to_integer(RoundingMode::TiesToAway, true);
    assert_eq!(result, Some(Integer::from(3)));

    let (result, _) = value(NEGATIVE_2_5).round_to_integer(RoundingMode::TiesToAway, true);
    assert_eq!(result, Some(Integer::from(-3)));
}

#[test]
fn scale_b_saturates_on_an_out_of_range_exponent_instead_of_panicking() {
    let two = value(POSITIVE_2);
    let huge = two.scale_b(i64::MAX, RoundingMode::TiesToEven);
    assert!(huge.is_positive_infinity());

    let tiny = two.scale_b(i64::MIN, RoundingMode::TiesToEven);
    assert!(tiny.is_positive_zero());
}
