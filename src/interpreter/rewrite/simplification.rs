use tracing::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        context::ParsingContext,
        evaluator::fold_constants,
        matching::{EvenConstant, Filter, Matching},
        parser::parse,
        rewrite::{
            loader::{LoadedRules, parse_rulesets},
            rule::RewriteRule,
            ruleset::{RewriteReport, Ruleset},
        },
    },
    util::num::is_even_integer,
};

/// The rule file shipped with the crate.
pub const DEFAULT_RULES: &str = include_str!("../../../rules/simplify.rules");

/// Loads the default simplification rulesets into `ctx`'s grammar.
///
/// The rules of [`DEFAULT_RULES`] are followed by a `parity` group whose
/// rules need filters and therefore cannot be written in a rule file.
#[must_use]
pub fn default_rulesets(ctx: &ParsingContext) -> LoadedRules {
    let mut loaded = parse_rulesets(ctx, DEFAULT_RULES);
    match parity_rules(ctx) {
        Ok(parity) => loaded.rulesets.push(parity),
        Err(e) => debug!(error = %e, "parity rules unavailable in this grammar"),
    }
    loaded
}

fn is_odd_constant(matching: &Matching<'_, '_>) -> bool {
    matching.single("cy")
            .and_then(Node::as_constant)
            .is_some_and(|value| is_even_integer(value + 1.0))
}

fn typed_rule(ctx: &ParsingContext,
              before: &str,
              after: &str,
              filter: impl Filter + 'static)
              -> Result<RewriteRule, ParseError> {
    Ok(RewriteRule::new(parse(ctx, before)?, parse(ctx, after)?).with_classes(true)
                                                                 .with_filter(filter))
}

fn parity_rules(ctx: &ParsingContext) -> Result<Ruleset, ParseError> {
    let mut parity = Ruleset::new(Some("parity".to_string()));
    parity.push(typed_rule(ctx, "(-x)^cy", "x^cy", EvenConstant::new("cy"))?);
    parity.push(typed_rule(ctx, "(-x)^cy", "-(x^cy)", is_odd_constant)?);
    Ok(parity)
}

/// Simplifies a tree in place.
///
/// Constants are folded first. Then every ruleset is applied to fixpoint in
/// turn, each followed by constant folding, and the round is repeated until
/// it changes nothing or `ceiling` rule applications were made in total.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{
///         context::ParsingContext,
///         parser::parse,
///         rewrite::{default_rulesets, simplify},
///     },
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let rules = default_rulesets(&ctx);
/// let mut tree = parse(&ctx, "x*1+0+x").unwrap();
///
/// simplify(&mut tree, &rules.rulesets, 100);
///
/// assert_eq!(tree.to_string(), "2*x");
/// ```
pub fn simplify(tree: &mut Node, rulesets: &[Ruleset], ceiling: usize) -> RewriteReport {
    let mut report = RewriteReport::default();
    fold_constants(tree);

    loop {
        let mut changed = false;
        for ruleset in rulesets {
            let remaining = ceiling.saturating_sub(report.steps);
            let pass = ruleset.apply(tree, remaining);
            report.absorb(pass);
            changed |= pass.steps > 0;
            changed |= fold_constants(tree) > 0;
            if report.ceiling_reached {
                return report;
            }
        }
        if !changed {
            debug!(steps = report.steps, tree = %tree, "simplified");
            return report;
        }
    }
}
