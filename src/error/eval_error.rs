use thiserror::Error;

/// Represents errors raised while reducing a tree to a number.
///
/// Numeric domain problems are not errors: they propagate as `inf` or `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable node was reached during evaluation.
    #[error("Error: Unbound variable '{name}'.")]
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },
    /// An operator without a native function was reached, usually a
    /// user-defined function whose elimination rule did not fire.
    #[error("Error: Operator '{name}' cannot be evaluated directly.")]
    NotEvaluable {
        /// The name of the operator.
        name: String,
    },
}
