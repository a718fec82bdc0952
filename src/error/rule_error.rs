use thiserror::Error;

use crate::error::ParseError;

/// Errors raised by the operator table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The table reached its capacity.
    #[error("Error: Operator table is full (capacity {capacity}).")]
    TableFull {
        /// The configured capacity.
        capacity: usize,
    },
    /// An operator with the same name and placement already exists.
    #[error("Error: Operator '{name}' is already registered.")]
    DuplicateOperator {
        /// The operator name.
        name: String,
    },
    /// The declared arity does not fit the placement.
    #[error("Error: Operator '{name}' has an arity that does not fit its placement.")]
    InvalidArity {
        /// The operator name.
        name: String,
    },
    /// Only infix operators can be used to join adjacent operands.
    #[error("Error: Glue operator '{name}' must be infix.")]
    GlueNotInfix {
        /// The operator name.
        name: String,
    },
}

/// Which side of a definition or rule failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left side (head or pattern).
    Left,
    /// The right side (body or replacement).
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Errors raised when defining a function or constant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The input is not of the form `head = body`.
    #[error("Error: Expected a definition of the form 'f(x) = expression'.")]
    MissingDefinitionOperator,
    /// One side did not parse.
    #[error("Error in {side} expression: {source}")]
    Parse {
        /// The failing side.
        side:   Side,
        /// The parser error.
        #[source]
        source: ParseError,
    },
    /// Function names must consist of letters only.
    #[error("Error: Functions and constants must only consist of letters, found '{name}'.")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// The head is not of the form `name(params...)`.
    #[error("Error: Not a function or constant.")]
    NotAFunction,
    /// A parameter is not a plain variable.
    #[error("Error: Function arguments must be variables.")]
    ParametersNotVariables,
    /// A parameter occurs twice.
    #[error("Error: Function arguments must be distinct variables.")]
    ParametersNotDistinct,
    /// The body refers to the function being defined.
    #[error("Error: Recursive definition of '{name}'.")]
    Recursive {
        /// The function name.
        name: String,
    },
    /// Built-in operators cannot be redefined.
    #[error("Error: Cannot redefine built-in function '{name}'.")]
    BuiltinRedefinition {
        /// The function name.
        name: String,
    },
    /// The operator table rejected the new function.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// A syntax error in a rule file, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFileError {
    /// The line has no ` -> ` separator.
    #[error("Error on line {line}: Rule file syntax error, expected 'before -> after'.")]
    MissingArrow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// One side of the rule did not parse.
    #[error("Error on line {line}: Rule file syntax error in {side} side of rule: {source}")]
    Parse {
        /// The source line where the error occurred.
        line:   usize,
        /// The failing side.
        side:   Side,
        /// The parser error.
        #[source]
        source: ParseError,
    },
}

impl RuleFileError {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::MissingArrow { line } | Self::Parse { line, .. } => *line,
        }
    }
}
