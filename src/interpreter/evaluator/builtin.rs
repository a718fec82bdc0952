use crate::util::num;

/// Generates a native function that applies an `f64` method to the only
/// operand.
///
/// # Example
/// ```
/// use exprewrite::interpreter::evaluator::builtin::sin;
///
/// let r = sin(&[std::f64::consts::PI / 2.0]);
///
/// assert_eq!(r, 1.0);
/// ```
macro_rules! unary_builtin {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $fname(args: &[f64]) -> f64 {
                args.first().map_or(f64::NAN, |x| x.$method())
            }
        )*
    };
}

unary_builtin! {
    exp   => exp,
    sqrt  => sqrt,
    ln    => ln,
    ld    => log2,
    lg    => log10,
    sin   => sin,
    cos   => cos,
    tan   => tan,
    asin  => asin,
    acos  => acos,
    atan  => atan,
    sinh  => sinh,
    cosh  => cosh,
    tanh  => tanh,
    asinh => asinh,
    acosh => acosh,
    atanh => atanh,
    abs   => abs,
    ceil  => ceil,
    floor => floor,
    round => round,
    trunc => trunc,
    frac  => fract,
}

fn binary(args: &[f64], f: fn(f64, f64) -> f64) -> f64 {
    match args {
        [a, b] => f(*a, *b),
        _ => f64::NAN,
    }
}

/// `x + y`
#[must_use]
pub fn add(args: &[f64]) -> f64 {
    binary(args, |a, b| a + b)
}

/// `x - y`
#[must_use]
pub fn sub(args: &[f64]) -> f64 {
    binary(args, |a, b| a - b)
}

/// `x * y`
#[must_use]
pub fn mul(args: &[f64]) -> f64 {
    binary(args, |a, b| a * b)
}

/// `x / y`; division by zero yields an infinity or `NaN`.
#[must_use]
pub fn div(args: &[f64]) -> f64 {
    binary(args, |a, b| a / b)
}

/// `x ^ y`
#[must_use]
pub fn pow(args: &[f64]) -> f64 {
    binary(args, f64::powf)
}

/// Logarithm of `x` to base `n`: `log(x, n)`.
///
/// # Example
/// ```
/// use exprewrite::interpreter::evaluator::builtin::log;
///
/// assert_eq!(log(&[64.0, 2.0]), 6.0);
/// ```
#[must_use]
pub fn log(args: &[f64]) -> f64 {
    binary(args, |x, n| x.ln() / n.ln())
}

/// The `n`th root of `x`: `root(x, n)`.
#[must_use]
pub fn root(args: &[f64]) -> f64 {
    binary(args, |x, n| x.powf(n.recip()))
}

/// Greatest common divisor.
#[must_use]
pub fn gcd(args: &[f64]) -> f64 {
    binary(args, num::gcd)
}

/// Least common multiple.
#[must_use]
pub fn lcm(args: &[f64]) -> f64 {
    binary(args, num::lcm)
}

/// Identity, used by the prefix `+`.
#[must_use]
pub fn identity(args: &[f64]) -> f64 {
    args.first().copied().unwrap_or(f64::NAN)
}

/// Negation.
#[must_use]
pub fn neg(args: &[f64]) -> f64 {
    args.first().map_or(f64::NAN, |x| -x)
}

/// Factorial; non-integers yield `NaN`.
#[must_use]
pub fn factorial(args: &[f64]) -> f64 {
    args.first().copied().map_or(f64::NAN, num::factorial)
}

/// Division by 100.
#[must_use]
pub fn percent(args: &[f64]) -> f64 {
    args.first().map_or(f64::NAN, |x| x / 100.0)
}

/// Sign of `x` as `-1`, `0` or `1`.
#[must_use]
pub fn sgn(args: &[f64]) -> f64 {
    args.first().map_or(f64::NAN, |&x| {
                    if x.is_nan() || x == 0.0 {
                        x
                    } else {
                        x.signum()
                    }
                })
}

/// Sum of all operands; `0` for none.
#[must_use]
pub fn sum(args: &[f64]) -> f64 {
    args.iter().sum()
}

/// Product of all operands; `1` for none.
#[must_use]
pub fn prod(args: &[f64]) -> f64 {
    args.iter().product()
}

/// Arithmetic mean; `NaN` for no operands.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn avg(args: &[f64]) -> f64 {
    if args.is_empty() {
        return f64::NAN;
    }
    sum(args) / args.len() as f64
}

/// Smallest operand; `NaN` for no operands.
#[must_use]
pub fn min(args: &[f64]) -> f64 {
    args.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest operand; `NaN` for no operands.
#[must_use]
pub fn max(args: &[f64]) -> f64 {
    args.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Archimedes' constant.
#[must_use]
pub const fn pi(_: &[f64]) -> f64 {
    std::f64::consts::PI
}

/// Euler's number.
#[must_use]
pub const fn e(_: &[f64]) -> f64 {
    std::f64::consts::E
}

/// The golden ratio.
#[must_use]
pub fn phi(_: &[f64]) -> f64 {
    f64::midpoint(1.0, 5.0_f64.sqrt())
}
