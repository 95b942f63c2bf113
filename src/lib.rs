/*!
`dynfloat` is a soft-float arithmetic engine: it implements IEEE 754-2019
floating-point operations entirely in integer arithmetic, parameterised by
the binary format (exponent width, mantissa width, presence of an implicit
leading bit, presence of a sign bit) and by a per-platform policy bundle
(NaN payload propagation, tininess detection, quiet-NaN encoding, FMA
edge-case behavior). One implementation reproduces, bit-for-bit, the
numeric results of ARM, RISC-V, POWER, MIPS 2008, legacy MIPS, x86 SSE,
SPARC, and HPPA floating-point units across every supported rounding mode
and NaN edge case.

The crate is organized bottom-up: [`sign`], [`status`], [`float_class`],
and [`nan_mode`] are small closed enumerations; [`platform`] and
[`format`] describe an ISA's policy and a concrete bit layout;
[`fp_state`] threads rounding/exception policy and sticky flags through a
computation; an internal exact-real oracle unpacks a bit pattern into
sign/class/value, and an internal rounding kernel packs a computed
exact value back into one; an internal operator layer builds on both;
[`dynamic_float`] is the public value type, [`DynamicFloat`], tying all
of the above together.
*/

pub mod dynamic_float;
pub mod float_class;
pub mod fp_state;
pub mod format;
pub mod nan_mode;
pub mod platform;
pub mod rounding;
pub mod sign;
pub mod status;

mod exact;
mod nan_select;
mod ops;
mod round;
mod unpacked;
mod util;

pub use crate::dynamic_float::DynamicFloat;
pub use crate::float_class::FloatClass;
pub use crate::fp_state::FPState;
pub use crate::format::FloatProperties;
pub use crate::platform::PlatformProperties;
pub use crate::sign::Sign;
pub use crate::status::StatusFlags;
