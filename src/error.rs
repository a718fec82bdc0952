/// Parsing errors.
///
/// Defines all error types that can occur while turning a token sequence
/// into a tree: unbalanced parentheses, missing operands or operators,
/// arity mismatches and exceeded limits.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the errors raised while reducing a tree to a number. Numeric
/// domain problems are not among them; they propagate as non-finite values.
pub mod eval_error;
/// Operator table, definition and rule-file errors.
pub mod rule_error;

use thiserror::Error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
pub use rule_error::{ContextError, DefinitionError, RuleFileError, Side};

/// Any error the engine can report to a caller running scripts or commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// A definition was rejected.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    /// The operator table rejected a change.
    #[error(transparent)]
    Context(#[from] ContextError),
    /// A rule file contained a malformed line.
    #[error(transparent)]
    RuleFile(#[from] RuleFileError),
}
