/// Rewrite rules and single rule application.
pub mod rule;

/// Ordered rule groups and the fixpoint loop.
///
/// A ruleset pass keeps applying the highest-priority matching rule until
/// nothing matches or the iteration ceiling is reached.
pub mod ruleset;

/// Rule file reader.
///
/// Parses the line-based rule file format into named rulesets and collects
/// line-numbered syntax errors.
pub mod loader;

/// Algebraic simplification.
///
/// Combines the default rule file, filtered rules and constant folding into
/// a single simplification pass.
pub mod simplification;

pub use self::{
    loader::{LoadedRules, parse_rule, parse_rulesets},
    rule::{RewriteRule, apply_rule},
    ruleset::{RewriteReport, Ruleset, apply_ruleset},
    simplification::{DEFAULT_RULES, default_rulesets, simplify},
};
