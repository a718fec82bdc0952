/// Native evaluation function of an operator.
///
/// Receives the already evaluated operands in order and returns the result.
/// Domain errors are expressed as `NaN` or infinities, never as panics.
pub type NativeFn = fn(&[f64]) -> f64;

/// Where an operator stands relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Before a single operand, e.g. `-x`.
    Prefix,
    /// Between two operands, e.g. `x + y`.
    Infix,
    /// After a single operand, e.g. `x!`.
    Postfix,
    /// Name followed by a parenthesized argument list, e.g. `log(x, 2)`.
    Function,
}

/// Number of operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many operands.
    Fixed(usize),
    /// Determined per call site by counting arguments.
    Dynamic,
}

impl Arity {
    /// Tests whether `count` operands satisfy this arity.
    ///
    /// ## Example
    /// ```
    /// use exprewrite::interpreter::context::operator::Arity;
    ///
    /// assert!(Arity::Fixed(2).accepts(2));
    /// assert!(!Arity::Fixed(2).accepts(3));
    /// assert!(Arity::Dynamic.accepts(0));
    /// ```
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Fixed(n) => n == count,
            Self::Dynamic => true,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Dynamic => write!(f, "*"),
        }
    }
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
    /// The operator is associative; it is grouped to the left.
    Both,
}

/// Describes one operator of the grammar.
///
/// Operators are owned by the [`ParsingContext`](super::ParsingContext) and
/// shared with the nodes that reference them. Two nodes refer to the same
/// operator only if they point at the same descriptor, so overloads with equal
/// names stay distinguishable.
#[derive(Debug, Clone)]
pub struct Operator {
    /// Keyword the tokenizer recognizes.
    pub name:          String,
    /// Position relative to the operands.
    pub placement:     Placement,
    /// Declared number of operands.
    pub arity:         Arity,
    /// Binding strength; higher binds tighter.
    pub precedence:    u32,
    /// Grouping of equal-precedence chains.
    pub associativity: Associativity,
    /// Evaluation routine; `None` for user-defined functions, which are
    /// eliminated by rewriting before evaluation.
    pub eval:          Option<NativeFn>,
}

impl Operator {
    /// Precedence of every function operator. Functions bind tighter than any
    /// prefix, infix or postfix operator.
    pub const FUNCTION_PRECEDENCE: u32 = u32::MAX;

    /// Creates a prefix operator.
    #[must_use]
    pub fn prefix(name: &str, precedence: u32, eval: NativeFn) -> Self {
        Self { name: name.to_string(),
               placement: Placement::Prefix,
               arity: Arity::Fixed(1),
               precedence,
               associativity: Associativity::Right,
               eval: Some(eval) }
    }

    /// Creates an infix operator.
    #[must_use]
    pub fn infix(name: &str,
                 precedence: u32,
                 associativity: Associativity,
                 eval: NativeFn)
                 -> Self {
        Self { name: name.to_string(),
               placement: Placement::Infix,
               arity: Arity::Fixed(2),
               precedence,
               associativity,
               eval: Some(eval) }
    }

    /// Creates a postfix operator.
    #[must_use]
    pub fn postfix(name: &str, precedence: u32, eval: NativeFn) -> Self {
        Self { name: name.to_string(),
               placement: Placement::Postfix,
               arity: Arity::Fixed(1),
               precedence,
               associativity: Associativity::Left,
               eval: Some(eval) }
    }

    /// Creates a built-in function operator.
    #[must_use]
    pub fn function(name: &str, arity: Arity, eval: NativeFn) -> Self {
        Self { name: name.to_string(),
               placement: Placement::Function,
               arity,
               precedence: Self::FUNCTION_PRECEDENCE,
               associativity: Associativity::Left,
               eval: Some(eval) }
    }

    /// Creates a function operator without a native evaluation routine, as
    /// used for user-defined functions and constants.
    #[must_use]
    pub fn composite(name: &str, arity: Arity) -> Self {
        Self { name: name.to_string(),
               placement: Placement::Function,
               arity,
               precedence: Self::FUNCTION_PRECEDENCE,
               associativity: Associativity::Left,
               eval: None }
    }

    /// Returns `true` for function operators.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.placement == Placement::Function
    }

    /// Returns `true` when the arity fits the placement: one operand for
    /// prefix and postfix operators, two for infix operators.
    #[must_use]
    pub fn has_valid_arity(&self) -> bool {
        match self.placement {
            Placement::Prefix | Placement::Postfix => self.arity == Arity::Fixed(1),
            Placement::Infix => self.arity == Arity::Fixed(2),
            Placement::Function => true,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.placement {
            Placement::Prefix => write!(f, "{}x", self.name),
            Placement::Infix => write!(f, "x{}y", self.name),
            Placement::Postfix => write!(f, "x{}", self.name),
            Placement::Function => write!(f, "{}({})", self.name, self.arity),
        }
    }
}
