// exact.rs
//
// The exact-real oracle: every arithmetic operator first computes its
// mathematically exact result as an `ExactValue`, `(-1)^sign * c * 2^exp`
// with `c` an arbitrary-precision unsigned significand, before the
// rounding kernel (`round.rs`) truncates it to a packed format.
//
// This is a sign/exponent/significand triple specialized to plain binary
// values rather than general rationals: addition, subtraction, and
// multiplication of two binary floats are already exact under this
// representation, so no p/q fraction is ever needed.

use num_traits::Zero;
use rug::Integer;

use crate::rounding::RoundingMode;
use crate::sign::Sign;
use crate::util::bitmask;

/// An exact real value `(-1)^sign * c * 2^exp`, or exact zero when
/// `c == 0` (in which case `exp` is irrelevant and conventionally `0`).
#[derive(Clone, Debug)]
pub(crate) struct ExactValue {
    pub sign: Sign,
    pub exp: isize,
    pub c: Integer,
}

impl ExactValue {
    pub fn zero(sign: Sign) -> Self {
        ExactValue { sign, exp: 0, c: Integer::zero() }
    }

    pub fn new(sign: Sign, exp: isize, c: Integer) -> Self {
        if c.is_zero() {
            ExactValue { sign, exp: 0, c }
        } else {
            ExactValue { sign, exp, c }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.c.is_zero()
    }

    /// The position of the most significant binary digit: the exponent
    /// `e` such that `2^e <= |value| < 2^(e+1)`. Panics on zero.
    pub fn msb_digit(&self) -> isize {
        assert!(!self.is_zero(), "msb_digit of exact zero");
        self.exp + self.c.significant_bits() as isize - 1
    }

    pub fn with_sign(&self, sign: Sign) -> Self {
        ExactValue { sign, exp: self.exp, c: self.c.clone() }
    }

    pub fn negated(&self) -> Self {
        self.with_sign(!self.sign)
    }

    /// Splits this value at absolute binary digit `n` into the part at
    /// or above `2^(n+1)` (`high`) and the part at or below `2^n`
    /// (`low`); `high + low == self`, exactly.
    pub fn split(&self, n: isize) -> (ExactValue, ExactValue) {
        if self.is_zero() {
            return (ExactValue::zero(self.sign), ExactValue::zero(self.sign));
        }
        let e = self.msb_digit();
        if n >= e {
            (ExactValue::zero(self.sign), self.clone())
        } else if n < self.exp {
            (self.clone(), ExactValue::zero(self.sign))
        } else {
            let offset = (n - self.exp + 1) as u32;
            let high_c = self.c.clone() >> offset;
            let low_c = self.c.clone() & bitmask(offset as usize);
            (
                ExactValue::new(self.sign, n + 1, high_c),
                ExactValue::new(self.sign, self.exp, low_c),
            )
        }
    }

    /// Round/guard/sticky bits for truncating at digit `n`: whether the
    /// discarded part is at least half a unit in the last retained
    /// place, at least a quarter, and whether anything below that
    /// remains (the sticky bit).
    pub fn rgs(&self, n: isize) -> (bool, bool, bool) {
        let (_, low) = self.split(n);
        let (half, rest) = low.split(n - 1);
        let (quarter, rest) = rest.split(n - 2);
        (!half.is_zero(), !quarter.is_zero(), !rest.is_zero())
    }

    /// Round/sticky bits for truncating at digit `n`.
    pub fn rs(&self, n: isize) -> (bool, bool) {
        let (_, low) = self.split(n);
        let (half, rest) = low.split(n - 1);
        (!half.is_zero(), !rest.is_zero())
    }

    /// Exact sum of two same-signed-or-not values. Addition of binary
    /// values over a common radix is always exact: align to the smaller
    /// exponent and add the (possibly negated) significands.
    pub fn add(&self, other: &ExactValue) -> ExactValue {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let exp = self.exp.min(other.exp);
        let a = Integer::from(&self.c << (self.exp - exp) as u32);
        let b = Integer::from(&other.c << (other.exp - exp) as u32);
        let signed_sum: Integer = match (self.sign, other.sign) {
            (Sign::Positive, Sign::Positive) => a + b,
            (Sign::Negative, Sign::Negative) => -(a + b),
            (Sign::Positive, Sign::Negative) => a - b,
            (Sign::Negative, Sign::Positive) => b - a,
        };

        if signed_sum.is_zero() {
            ExactValue::zero(Sign::Positive)
        } else if signed_sum < 0 {
            ExactValue::new(Sign::Negative, exp, -signed_sum)
        } else {
            ExactValue::new(Sign::Positive, exp, signed_sum)
        }
    }

    pub fn sub(&self, other: &ExactValue) -> ExactValue {
        self.add(&other.negated())
    }

    /// Exact product: significands multiply, exponents add, sign XORs.
    pub fn mul(&self, other: &ExactValue) -> ExactValue {
        if self.is_zero() || other.is_zero() {
            return ExactValue::zero(self.sign.xor(other.sign));
        }
        ExactValue::new(
            self.sign.xor(other.sign),
            self.exp + other.exp,
            Integer::from(&self.c * &other.c),
        )
    }

    /// Compares magnitudes only (ignores `sign`).
    pub fn cmp_magnitude(&self, other: &ExactValue) -> std::cmp::Ordering {
        if self.is_zero() && other.is_zero() {
            return std::cmp::Ordering::Equal;
        }
        if self.is_zero() {
            return std::cmp::Ordering::Less;
        }
        if other.is_zero() {
            return std::cmp::Ordering::Greater;
        }
        self.msb_digit().cmp(&other.msb_digit()).then_with(|| {
            let shift = self.exp - other.exp;
            if shift >= 0 {
                (Integer::from(&self.c << shift as u32)).cmp(&other.c)
            } else {
                self.c.cmp(&Integer::from(&other.c << (-shift) as u32))
            }
        })
    }

    /// Truncated quotient `self / other` with at least `extra_bits`
    /// bits of precision beyond the leading bit, plus a sticky bit
    /// recording whether the true quotient has any further nonzero
    /// digits. Used by `div` and `ieee754_remainder`.
    pub fn div_trunc(&self, other: &ExactValue, extra_bits: usize) -> (ExactValue, bool) {
        assert!(!other.is_zero(), "div_trunc by exact zero");
        if self.is_zero() {
            return (ExactValue::zero(self.sign.xor(other.sign)), false);
        }

        let sign = self.sign.xor(other.sign);
        // Shift the dividend left so the quotient has `extra_bits` bits
        // of precision beyond its leading 1.
        let num_bits = self.c.significant_bits() as isize;
        let den_bits = other.c.significant_bits() as isize;
        let shift = (den_bits - num_bits) + extra_bits as isize + 1;
        let shift = shift.max(0);

        let mut numer = self.c.clone();
        if shift > 0 {
            numer <<= shift as u32;
        }
        let (quot, rem) = numer.div_rem(other.c.clone());
        let sticky = !rem.is_zero();
        let exp = self.exp - other.exp - shift;
        (ExactValue::new(sign, exp, quot), sticky)
    }

    /// Rounds this value's magnitude to the nearest integer per
    /// `rounding_mode` (treating the value as negative per `negative`
    /// for directed-mode purposes), returning the unsigned result and
    /// whether the magnitude was not already integral. Shared by
    /// `round_to_integral`, `round_to_integer`, and `to_int`.
    pub fn round_to_nearest_integer_magnitude(&self, rounding_mode: RoundingMode, negative: bool) -> (Integer, bool) {
        let (high, _low) = self.split(-1);
        let (round_bit, sticky_bit) = self.rs(-1);
        let direction = rounding_mode.to_direction(negative);
        let round_up = if direction.is_nearest {
            // An exact tie breaks away from zero under TiesToAway
            // (`toward_positive`, sign-invariant here) and to the even
            // integer under TiesToEven.
            let tie_breaks_up = direction.toward_positive || high.c.get_bit(0);
            round_bit && (sticky_bit || tie_breaks_up)
        } else {
            direction.toward_positive && (round_bit || sticky_bit)
        };

        let mut magnitude = high.c;
        if round_up {
            magnitude += 1;
        }
        (magnitude, round_bit || sticky_bit)
    }

    /// Truncated square root, with at least `extra_bits` bits of
    /// precision beyond the leading bit, plus a sticky bit.
    pub fn sqrt_trunc(&self, extra_bits: usize) -> (ExactValue, bool) {
        assert!(self.sign == Sign::Positive, "sqrt_trunc of negative value");
        if self.is_zero() {
            return (ExactValue::zero(Sign::Positive), false);
        }

        // Normalize so the radicand has an even exponent, then shift in
        // pairs of bits to reach the desired precision before taking an
        // integer square root.
        let mut exp = self.exp;
        let mut c = self.c.clone();
        if exp.rem_euclid(2) != 0 {
            c <<= 1u32;
            exp -= 1;
        }

        let target_bits = (self.c.significant_bits() as isize / 2 + extra_bits as isize + 2).max(2);
        let cur_bits = c.significant_bits() as isize;
        let half_shift = (target_bits - (cur_bits + 1) / 2).max(0);
        c <<= (2 * half_shift) as u32;
        exp -= 2 * half_shift;

        let root = c.clone().sqrt();
        let rem = c - Integer::from(&root * &root);
        let sticky = !rem.is_zero();
        (ExactValue::new(Sign::Positive, exp / 2, root), sticky)
    }
}
