/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts an `f64` to `u64` if the value is finite, non-negative, exactly
/// representable and not fractional.
///
/// ## Returns
/// - `Some(u64)`: The converted value if the conversion is lossless.
/// - `None`: For non-finite, negative, too large or fractional values.
///
/// ## Example
/// ```
/// use exprewrite::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(7.0), Some(7));
/// assert_eq!(f64_to_u64_checked(-5.0), None);
/// assert_eq!(f64_to_u64_checked(1.25), None);
/// assert_eq!(f64_to_u64_checked(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_u64_checked(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    if value.fract() != 0.0 {
        return None;
    }
    Some(value as u64)
}

/// Returns `true` when `value` is an integer divisible by two.
///
/// ## Example
/// ```
/// use exprewrite::util::num::is_even_integer;
///
/// assert!(is_even_integer(4.0));
/// assert!(is_even_integer(-2.0));
/// assert!(!is_even_integer(3.0));
/// assert!(!is_even_integer(2.5));
/// ```
#[must_use]
pub fn is_even_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && (value / 2.0).fract() == 0.0
}

/// Default numeric-literal parser.
///
/// Accepts plain decimal literals such as `12`, `1.5`, `3.` and `.5`. Signs,
/// exponents and special values (`inf`, `NaN`) are rejected: a leading minus is
/// a prefix operator and `e` is a constant.
///
/// ## Example
/// ```
/// use exprewrite::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal(".5"), Some(0.5));
/// assert_eq!(parse_decimal("42"), Some(42.0));
/// assert_eq!(parse_decimal("1e3"), None);
/// assert_eq!(parse_decimal("x"), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in text.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    text.parse().ok()
}

/// Default numeric-literal printer.
///
/// Integral values are printed without a fractional part, everything else in
/// the shortest form that parses back to the same value.
///
/// ## Example
/// ```
/// use exprewrite::util::num::format_constant;
///
/// assert_eq!(format_constant(3.0), "3");
/// assert_eq!(format_constant(0.25), "0.25");
/// assert_eq!(format_constant(-2.0), "-2");
/// ```
#[must_use]
pub fn format_constant(value: f64) -> String {
    if value == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }
    format!("{value}")
}

/// Computes `n!` for non-negative integers; other inputs yield `NaN`.
///
/// Large arguments overflow to infinity, like any other float operation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn factorial(value: f64) -> f64 {
    let Some(n) = f64_to_u64_checked(value) else {
        return f64::NAN;
    };
    let mut acc = 1.0_f64;
    for i in 2..=n {
        acc *= i as f64;
        if acc.is_infinite() {
            break;
        }
    }
    acc
}

/// Greatest common divisor of two integers given as floats; `NaN` otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gcd(a: f64, b: f64) -> f64 {
    let (Some(mut a), Some(mut b)) = (f64_to_u64_checked(a.abs()), f64_to_u64_checked(b.abs()))
    else {
        return f64::NAN;
    };
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a as f64
}

/// Least common multiple of two integers given as floats; `NaN` otherwise.
#[must_use]
pub fn lcm(a: f64, b: f64) -> f64 {
    let divisor = gcd(a, b);
    if divisor == 0.0 {
        return 0.0;
    }
    (a * b).abs() / divisor
}
