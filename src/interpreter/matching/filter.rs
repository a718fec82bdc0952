use crate::{interpreter::matching::core::Matching, util::num::is_even_integer};

/// A side condition on a structurally valid matching.
///
/// Filters are pure predicates over the proposed bindings; a match is
/// accepted only if every filter of the rule accepts it. Any
/// `Fn(&Matching) -> bool` closure is a filter.
///
/// # Example
/// ```
/// use exprewrite::interpreter::matching::{Filter, Matching};
///
/// fn has_x(m: &Matching<'_, '_>) -> bool {
///     m.get("x").is_some()
/// }
///
/// let boxed: Box<dyn Filter> = Box::new(has_x);
/// ```
pub trait Filter: Send + Sync {
    /// Returns `true` if the matching is acceptable.
    fn accepts(&self, matching: &Matching<'_, '_>) -> bool;
}

impl<F> Filter for F where F: Fn(&Matching<'_, '_>) -> bool + Send + Sync
{
    fn accepts(&self, matching: &Matching<'_, '_>) -> bool {
        self(matching)
    }
}

/// Accepts only if `variable` is bound to a constant even integer.
///
/// Used by rules such as `(-x)^cy -> x^cy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvenConstant {
    /// The pattern variable to inspect.
    pub variable: String,
}

impl EvenConstant {
    /// Creates the filter for the given pattern variable.
    #[must_use]
    pub fn new(variable: &str) -> Self {
        Self { variable: variable.to_string(), }
    }
}

impl Filter for EvenConstant {
    fn accepts(&self, matching: &Matching<'_, '_>) -> bool {
        matching.single(&self.variable)
                .and_then(crate::ast::Node::as_constant)
                .is_some_and(is_even_integer)
    }
}

/// Accepts only if nothing bound to `variable` contains a variable named
/// `of`, e.g. a factor that does not depend on the differentiation variable.
///
/// Unbound pattern variables are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Independent {
    /// The pattern variable to inspect.
    pub variable: String,
    /// The name the bound subtrees must not mention.
    pub of:       String,
}

impl Independent {
    /// Creates the filter.
    #[must_use]
    pub fn new(variable: &str, of: &str) -> Self {
        Self { variable: variable.to_string(),
               of:       of.to_string(), }
    }
}

impl Filter for Independent {
    fn accepts(&self, matching: &Matching<'_, '_>) -> bool {
        matching.get(&self.variable)
                .is_none_or(|nodes| nodes.iter().all(|n| !n.contains_variable(&self.of)))
    }
}
