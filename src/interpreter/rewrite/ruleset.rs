use tracing::{trace, warn};

use crate::{
    ast::Node,
    interpreter::{
        matching::find_matching,
        rewrite::rule::{RewriteRule, apply_rule},
    },
};

/// Outcome of a ruleset pass.
///
/// Hitting the ceiling is not an error: the tree is valid, only possibly not
/// fully rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Number of rule applications performed.
    pub steps:           usize,
    /// Whether the pass stopped at the iteration ceiling.
    pub ceiling_reached: bool,
}

impl RewriteReport {
    /// Adds the counts of another pass.
    pub const fn absorb(&mut self, other: Self) {
        self.steps += other.steps;
        self.ceiling_reached |= other.ceiling_reached;
    }
}

/// An ordered, optionally named group of rules. Earlier rules win.
#[derive(Debug, Default)]
pub struct Ruleset {
    /// The name given after the `Ruleset` keyword of a rule file.
    pub name:  Option<String>,
    /// The rules in priority order.
    pub rules: Vec<RewriteRule>,
}

impl Ruleset {
    /// Creates an empty ruleset.
    #[must_use]
    pub fn new(name: Option<String>) -> Self {
        Self { name,
               rules: Vec::new() }
    }

    /// Appends a rule with the lowest priority.
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the ruleset has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies the ruleset to fixpoint; see [`apply_ruleset`].
    pub fn apply(&self, tree: &mut Node, ceiling: usize) -> RewriteReport {
        apply_ruleset(tree, &self.rules, ceiling)
    }
}

impl From<Vec<RewriteRule>> for Ruleset {
    fn from(rules: Vec<RewriteRule>) -> Self {
        Self { name: None,
               rules }
    }
}

/// Applies rules until none matches or `ceiling` applications were made.
///
/// Every round scans `rules` from the start and applies the first rule that
/// matches anywhere in the tree, so earlier rules always take priority over
/// later ones.
///
/// # Returns
/// The number of applications, and whether the ceiling stopped the pass
/// while some rule still matched. A pass that reaches its fixpoint on the
/// last allowed step does not report the ceiling.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{
///         context::ParsingContext,
///         parser::parse,
///         rewrite::{RewriteRule, apply_ruleset},
///     },
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// // Swaps forever.
/// let rules = vec![RewriteRule::new(parse(&ctx, "x+y").unwrap(), parse(&ctx, "y+x").unwrap())];
/// let mut tree = parse(&ctx, "a+b").unwrap();
///
/// let report = apply_ruleset(&mut tree, &rules, 7);
///
/// assert_eq!(report.steps, 7);
/// assert!(report.ceiling_reached);
/// ```
pub fn apply_ruleset(tree: &mut Node, rules: &[RewriteRule], ceiling: usize) -> RewriteReport {
    let mut steps = 0;
    'rounds: loop {
        if steps >= ceiling {
            // Only a pending match means the ceiling cut the pass short.
            let pending = rules.iter()
                               .any(|rule| find_matching(&rule.pattern(), tree).is_some());
            if pending {
                warn!(steps, "ruleset pass stopped at the iteration ceiling");
            }
            return RewriteReport { steps,
                                   ceiling_reached: pending };
        }
        for rule in rules {
            if apply_rule(tree, rule) {
                steps += 1;
                continue 'rounds;
            }
        }
        trace!(steps, "ruleset reached fixpoint");
        return RewriteReport { steps,
                               ceiling_reached: false };
    }
}
