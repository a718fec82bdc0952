use tracing::trace;

use crate::ast::Node;

/// Replaces every evaluable subtree whose operands are all constants by its
/// value.
///
/// Folding works bottom-up, so `2*3+x` becomes `6+x`. Results that are not
/// finite are left unfolded, which keeps `1/0` visible to the reader.
///
/// # Returns
/// The number of operator nodes replaced by constants.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{context::ParsingContext, evaluator::fold_constants, parser::parse},
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let mut tree = parse(&ctx, "2*3+x").unwrap();
///
/// assert_eq!(fold_constants(&mut tree), 1);
/// assert_eq!(tree.to_string(), "6+x");
/// ```
pub fn fold_constants(node: &mut Node) -> usize {
    let Node::Operator { op, children } = node else {
        return 0;
    };
    let folded = children.iter_mut().map(fold_constants).sum::<usize>();

    let Some(eval) = op.eval else {
        return folded;
    };
    let Some(args) = children.iter().map(Node::as_constant).collect::<Option<Vec<_>>>() else {
        return folded;
    };
    let value = eval(&args);
    if !value.is_finite() {
        return folded;
    }
    trace!(operator = %op.name, value, "folded constant");
    *node = Node::Constant(value);
    folded + 1
}
