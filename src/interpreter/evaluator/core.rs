use std::collections::HashMap;

use crate::{ast::Node, error::EvalError};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// Reduces a variable-free tree to a number.
///
/// Children are evaluated first, in order, and their values are handed to
/// the operator's native function. Domain errors such as division by zero
/// are not errors: they produce infinities or `NaN`.
///
/// # Errors
/// - `UnboundVariable` if the tree contains a variable.
/// - `NotEvaluable` if an operator has no native function.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{context::ParsingContext, evaluator::evaluate, parser::parse},
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
///
/// assert_eq!(evaluate(&parse(&ctx, "2^2^3").unwrap()), Ok(256.0));
/// assert!(evaluate(&parse(&ctx, "x+1").unwrap()).is_err());
/// ```
pub fn evaluate(node: &Node) -> EvalResult<f64> {
    evaluate_with(node, &HashMap::new())
}

/// Like [`evaluate`], but looks variables up in `bindings` first.
pub fn evaluate_with(node: &Node, bindings: &HashMap<String, f64>) -> EvalResult<f64> {
    match node {
        Node::Constant(value) => Ok(*value),
        Node::Variable { name, .. } => {
            bindings.get(name)
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable { name: name.clone() })
        },
        Node::Operator { op, children } => {
            let Some(eval) = op.eval else {
                return Err(EvalError::NotEvaluable { name: op.name.clone() });
            };
            let args = children.iter()
                               .map(|child| evaluate_with(child, bindings))
                               .collect::<EvalResult<Vec<_>>>()?;
            Ok(eval(&args))
        },
    }
}
