use std::fmt;

use tracing::debug;

use crate::{
    ast::{Node, Scope},
    interpreter::{
        context::operator::Arity,
        matching::{Filter, Matching, Pattern, class::is_multi_capture, find_matching},
    },
};

/// A rewrite rule `before -> after`.
///
/// Every variable of both trees is a capture variable. A rule may carry
/// filters that reject structurally valid matches, and may enable class
/// sigils on its capture variables.
pub struct RewriteRule {
    before:  Node,
    after:   Node,
    filters: Vec<Box<dyn Filter>>,
    classes: bool,
}

impl RewriteRule {
    /// Creates an untyped rule without filters.
    ///
    /// The variables of both trees are tagged as rule-bound, so they are never
    /// confused with variables of the tree being rewritten.
    #[must_use]
    pub fn new(mut before: Node, mut after: Node) -> Self {
        before.retag(Scope::RuleBound);
        after.retag(Scope::RuleBound);
        Self { before,
               after,
               filters: Vec::new(),
               classes: false }
    }

    /// Enables or disables class sigils for the capture variables.
    #[must_use]
    pub const fn with_classes(mut self, classes: bool) -> Self {
        self.classes = classes;
        self
    }

    /// Adds a filter; all filters must accept a match.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// The pattern.
    #[must_use]
    pub const fn before(&self) -> &Node {
        &self.before
    }

    /// The replacement template.
    #[must_use]
    pub const fn after(&self) -> &Node {
        &self.after
    }

    pub(crate) const fn after_mut(&mut self) -> &mut Node {
        &mut self.after
    }

    /// Whether class sigils are enabled.
    #[must_use]
    pub const fn has_classes(&self) -> bool {
        self.classes
    }

    /// The pattern together with this rule's matching options.
    #[must_use]
    pub fn pattern(&self) -> Pattern<'_> {
        Pattern::new(&self.before).with_classes(self.classes)
                                  .with_filters(&self.filters)
    }

    /// Builds the replacement for a matching.
    ///
    /// Each capture variable in a copy of the template is replaced by its
    /// binding. A multi-capture is spliced into the operands of a
    /// dynamic-arity parent; elsewhere it is only replaced when it bound
    /// exactly one node. Leftover capture variables become free variables.
    #[must_use]
    pub fn instantiate(&self, matching: &Matching<'_, '_>) -> Node {
        let mut result = self.after.clone();
        for binding in matching.iter() {
            if is_multi_capture(binding.name) {
                splice(&mut result, binding.name, binding.nodes);
            } else if let [node] = binding.nodes {
                result.substitute_variable(binding.name, Scope::RuleBound, node);
            }
        }
        result.retag(Scope::Free);
        result
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.before, self.after)
    }
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
         .field("before", &self.before)
         .field("after", &self.after)
         .field("filters", &self.filters.len())
         .field("classes", &self.classes)
         .finish()
    }
}

fn is_capture(node: &Node, name: &str) -> bool {
    matches!(node, Node::Variable { name: own, scope: Scope::RuleBound } if own == name)
}

fn splice(node: &mut Node, name: &str, nodes: &[Node]) {
    match node {
        Node::Variable { .. } if is_capture(node, name) => {
            if let [single] = nodes {
                *node = single.clone();
            }
        },
        Node::Operator { op, children } if op.arity == Arity::Dynamic => {
            let mut spliced = Vec::with_capacity(children.len() + nodes.len());
            for mut child in children.drain(..) {
                if is_capture(&child, name) {
                    spliced.extend(nodes.iter().cloned());
                } else {
                    splice(&mut child, name, nodes);
                    spliced.push(child);
                }
            }
            *children = spliced;
        },
        Node::Operator { children, .. } => {
            for child in children {
                splice(child, name, nodes);
            }
        },
        _ => {},
    }
}

/// Applies `rule` once, at the first matching position in pre-order.
///
/// # Returns
/// `true` if the tree was rewritten.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{
///         context::ParsingContext,
///         parser::parse,
///         rewrite::{RewriteRule, apply_rule},
///     },
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let rule = RewriteRule::new(parse(&ctx, "x*1").unwrap(), parse(&ctx, "x").unwrap());
/// let mut tree = parse(&ctx, "a*1").unwrap();
///
/// assert!(apply_rule(&mut tree, &rule));
/// assert_eq!(tree, parse(&ctx, "a").unwrap());
/// ```
pub fn apply_rule(tree: &mut Node, rule: &RewriteRule) -> bool {
    let (path, replacement) = {
        let Some(site) = find_matching(&rule.pattern(), tree) else {
            return false;
        };
        (site.path, rule.instantiate(&site.matching))
    };

    let Some(slot) = tree.get_mut(&path) else {
        return false;
    };
    debug!(rule = %rule, at = ?path, result = %replacement, "applied rule");
    *slot = replacement;
    true
}
