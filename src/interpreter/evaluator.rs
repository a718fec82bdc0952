/// Core evaluation logic.
///
/// Contains the recursive post-order reduction of a tree to a number.
pub mod core;

/// Native functions of the arithmetic operators.
///
/// Every function takes the evaluated operands as a slice and reports domain
/// errors as non-finite values.
pub mod builtin;

/// Constant folding.
///
/// Replaces variable-free subtrees by their values during simplification.
pub mod fold;

pub use self::{
    core::{EvalResult, evaluate, evaluate_with},
    fold::fold_constants,
};
