use thiserror::Error;

/// Represents all errors that can occur while turning tokens into a tree.
///
/// Every variant is recoverable: the caller may reject the input or ask for
/// a corrected one. Partially built subtrees are dropped before the error is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input did not contain a single operand.
    #[error("Error: Empty expression.")]
    Empty,
    /// An operator could not pop enough operands.
    #[error("Error: Missing operand.")]
    MissingOperand,
    /// More than one operand remained and no operator joins them.
    #[error("Error: Missing operator.")]
    MissingOperator,
    /// An opening parenthesis was never closed.
    #[error("Error: Unexpected opening parenthesis.")]
    ExcessOpeningParenthesis,
    /// A closing parenthesis had no opening counterpart.
    #[error("Error: Unexpected closing parenthesis.")]
    ExcessClosingParenthesis,
    /// An argument delimiter appeared outside of a parameter list or too early.
    #[error("Error: Unexpected delimiter.")]
    UnexpectedDelimiter,
    /// Two operands are adjacent and no glue operator is configured.
    #[error("Error: Unexpected subexpression '{token}'.")]
    UnexpectedSubexpression {
        /// The token that started the second operand.
        token: String,
    },
    /// A token is neither an operator, a literal nor a valid variable name.
    #[error("Error: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The offending token.
        token: String,
    },
    /// No overload of a function accepts the given number of arguments.
    #[error("Error: Function '{name}' does not take {arity} argument(s).")]
    FunctionWrongArity {
        /// The function name.
        name:  String,
        /// The number of arguments supplied.
        arity: usize,
    },
    /// The parser stacks could not grow.
    #[error("Error: Out of memory.")]
    OutOfMemory,
    /// The input has more tokens than allowed.
    #[error("Error: Too many tokens (limit is {limit}).")]
    TooManyTokens {
        /// The configured limit.
        limit: usize,
    },
    /// The expression nests deeper than allowed.
    #[error("Error: Expression nested too deeply (limit is {limit}).")]
    StackExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// An operator received more operands than allowed.
    #[error("Error: Too many operands for '{name}' (limit is {limit}).")]
    ChildrenExceeded {
        /// The operator name.
        name:  String,
        /// The configured limit.
        limit: usize,
    },
}
