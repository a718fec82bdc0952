use crate::{
    config::Config,
    error::ContextError,
    interpreter::{
        context::{
            ParsingContext,
            operator::{Arity, Associativity, Operator},
        },
        evaluator::builtin,
    },
};

/// Precedence of `+` and `-`.
pub const PREC_ADD: u32 = 2;
/// Precedence of `*` and `/`.
pub const PREC_MUL: u32 = 3;
/// Precedence of `^`.
pub const PREC_POW: u32 = 4;
/// Precedence of the postfix operators.
pub const PREC_POSTFIX: u32 = 5;
/// Precedence of the prefix operators.
pub const PREC_PREFIX: u32 = 6;

/// Defines the built-in function table.
///
/// Each entry provides a name, an arity and the native function. The macro
/// produces `FUNCTION_TABLE` (static registration order) and
/// `BUILTIN_FUNCTIONS` (the public list of names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct FunctionDef {
            name:  &'static str,
            arity: Arity,
            func:  fn(&[f64]) -> f64,
        }
        static FUNCTION_TABLE: &[FunctionDef] = &[
            $(
                FunctionDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of the built-in functions and constants.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "exp"   => { arity: Arity::Fixed(1), func: builtin::exp },
    "sqrt"  => { arity: Arity::Fixed(1), func: builtin::sqrt },
    "ln"    => { arity: Arity::Fixed(1), func: builtin::ln },
    "ld"    => { arity: Arity::Fixed(1), func: builtin::ld },
    "lg"    => { arity: Arity::Fixed(1), func: builtin::lg },
    "sin"   => { arity: Arity::Fixed(1), func: builtin::sin },
    "cos"   => { arity: Arity::Fixed(1), func: builtin::cos },
    "tan"   => { arity: Arity::Fixed(1), func: builtin::tan },
    "asin"  => { arity: Arity::Fixed(1), func: builtin::asin },
    "acos"  => { arity: Arity::Fixed(1), func: builtin::acos },
    "atan"  => { arity: Arity::Fixed(1), func: builtin::atan },
    "sinh"  => { arity: Arity::Fixed(1), func: builtin::sinh },
    "cosh"  => { arity: Arity::Fixed(1), func: builtin::cosh },
    "tanh"  => { arity: Arity::Fixed(1), func: builtin::tanh },
    "asinh" => { arity: Arity::Fixed(1), func: builtin::asinh },
    "acosh" => { arity: Arity::Fixed(1), func: builtin::acosh },
    "atanh" => { arity: Arity::Fixed(1), func: builtin::atanh },
    "abs"   => { arity: Arity::Fixed(1), func: builtin::abs },
    "ceil"  => { arity: Arity::Fixed(1), func: builtin::ceil },
    "floor" => { arity: Arity::Fixed(1), func: builtin::floor },
    "round" => { arity: Arity::Fixed(1), func: builtin::round },
    "trunc" => { arity: Arity::Fixed(1), func: builtin::trunc },
    "frac"  => { arity: Arity::Fixed(1), func: builtin::frac },
    "sgn"   => { arity: Arity::Fixed(1), func: builtin::sgn },
    "log"   => { arity: Arity::Fixed(2), func: builtin::log },
    "root"  => { arity: Arity::Fixed(2), func: builtin::root },
    "gcd"   => { arity: Arity::Fixed(2), func: builtin::gcd },
    "lcm"   => { arity: Arity::Fixed(2), func: builtin::lcm },
    "sum"   => { arity: Arity::Dynamic,  func: builtin::sum },
    "prod"  => { arity: Arity::Dynamic,  func: builtin::prod },
    "avg"   => { arity: Arity::Dynamic,  func: builtin::avg },
    "min"   => { arity: Arity::Dynamic,  func: builtin::min },
    "max"   => { arity: Arity::Dynamic,  func: builtin::max },
    "pi"    => { arity: Arity::Fixed(0), func: builtin::pi },
    "e"     => { arity: Arity::Fixed(0), func: builtin::e },
    "phi"   => { arity: Arity::Fixed(0), func: builtin::phi },
}

impl ParsingContext {
    /// Creates a context with the arithmetic operator set and `*` as glue.
    ///
    /// If the configured capacity is too small for the full set, the
    /// operators that fit are registered and the rest are skipped.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{config::Config, interpreter::context::ParsingContext};
    ///
    /// let ctx = ParsingContext::arithmetic(Config::default());
    ///
    /// assert!(ctx.keywords().contains(&"sin"));
    /// assert_eq!(ctx.glue().map(|op| op.name.as_str()), Some("*"));
    /// ```
    #[must_use]
    pub fn arithmetic(config: Config) -> Self {
        let mut ctx = Self::new(config);
        if let Err(e) = ctx.register_arithmetic() {
            tracing::warn!(error = %e, "arithmetic operator set is incomplete");
        }
        ctx
    }

    /// Registers the arithmetic operator set into this context.
    ///
    /// # Errors
    /// Propagates the first registration failure.
    pub fn register_arithmetic(&mut self) -> Result<(), ContextError> {
        use Associativity::{Both, Left, Right};

        self.register(Operator::infix("+", PREC_ADD, Both, builtin::add))?;
        self.register(Operator::infix("-", PREC_ADD, Left, builtin::sub))?;
        let (_, mul) = self.register_shared(Operator::infix("*", PREC_MUL, Both, builtin::mul))?;
        self.register(Operator::infix("/", PREC_MUL, Left, builtin::div))?;
        self.register(Operator::infix("^", PREC_POW, Right, builtin::pow))?;
        self.register(Operator::prefix("+", PREC_PREFIX, builtin::identity))?;
        self.register(Operator::prefix("-", PREC_PREFIX, builtin::neg))?;
        self.register(Operator::postfix("!", PREC_POSTFIX, builtin::factorial))?;
        self.register(Operator::postfix("%", PREC_POSTFIX, builtin::percent))?;
        self.set_glue(mul)?;

        for def in FUNCTION_TABLE {
            self.register(Operator::function(def.name, def.arity, def.func))?;
        }
        Ok(())
    }
}
