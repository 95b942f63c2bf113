// status.rs
//
// IEEE 754 exception status flags, as a bitset.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A bitset over the five IEEE 754-2019 exception flags.
///
/// Modeled as a single closed bitset shared by every format (rather
/// than a bag of per-format `bool` fields), as a transparent newtype
/// over a `u8` occupying bits `0..=4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const INVALID_OPERATION: StatusFlags = StatusFlags(1);
    pub const DIVISION_BY_ZERO: StatusFlags = StatusFlags(2);
    pub const OVERFLOW: StatusFlags = StatusFlags(4);
    pub const UNDERFLOW: StatusFlags = StatusFlags(8);
    pub const INEXACT: StatusFlags = StatusFlags(16);

    /// All five flags, named in declaration order for [`Display`][fmt::Display].
    const NAMED: [(StatusFlags, &'static str); 5] = [
        (StatusFlags::INVALID_OPERATION, "StatusFlags.INVALID_OPERATION"),
        (StatusFlags::DIVISION_BY_ZERO, "StatusFlags.DIVISION_BY_ZERO"),
        (StatusFlags::OVERFLOW, "StatusFlags.OVERFLOW"),
        (StatusFlags::UNDERFLOW, "StatusFlags.UNDERFLOW"),
        (StatusFlags::INEXACT, "StatusFlags.INEXACT"),
    ];

    /// Constructs a bitset directly from its bit pattern.
    ///
    /// `value` must fit in the five low bits (`0..=31`); any other bit
    /// set is a programming error, not a floating-point condition.
    pub fn new(value: u32) -> Self {
        assert!(value <= 0b11111, "StatusFlags bit pattern out of range: {value}");
        StatusFlags(value as u8)
    }

    /// The empty set of flags.
    pub fn empty() -> Self {
        StatusFlags(0)
    }

    /// The raw bit pattern, `0..=31`.
    pub fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Returns `true` if `self` has every flag set in `other`.
    pub fn contains(self, other: StatusFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for StatusFlags {
    type Output = StatusFlags;

    fn bitor(self, rhs: StatusFlags) -> StatusFlags {
        StatusFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for StatusFlags {
    fn bitor_assign(&mut self, rhs: StatusFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for StatusFlags {
    type Output = StatusFlags;

    fn bitand(self, rhs: StatusFlags) -> StatusFlags {
        StatusFlags(self.0 & rhs.0)
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "StatusFlags(0)");
        }

        let names: Vec<&'static str> = StatusFlags::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(" | "))
    }
}
