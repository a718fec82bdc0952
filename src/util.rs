/// Numeric helpers.
///
/// This module provides the default literal parser and printer, lossless
/// float-to-integer conversion and the integer routines (factorial, gcd, lcm)
/// used by the built-in operators.
///
/// Conversions return `None` instead of silently truncating when the value is
/// not an exactly representable integer.
pub mod num;
