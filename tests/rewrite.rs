use exprewrite::{
    ast::{Node, Scope},
    config::Config,
    error::{ParseError, RuleFileError, Side},
    interpreter::{
        context::ParsingContext,
        evaluator::fold_constants,
        matching::Independent,
        parser::parse,
        rewrite::{
            RewriteReport, RewriteRule, Ruleset, apply_rule, apply_ruleset, default_rulesets,
            parse_rule, parse_rulesets, simplify,
        },
    },
};
use pretty_assertions::assert_eq;

fn arithmetic() -> ParsingContext {
    ParsingContext::arithmetic(Config::default())
}

fn tree(ctx: &ParsingContext, src: &str) -> Node {
    parse(ctx, src).unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"))
}

fn rule(ctx: &ParsingContext, before: &str, after: &str) -> RewriteRule {
    RewriteRule::new(tree(ctx, before), tree(ctx, after))
}

fn assert_simplifies(src: &str, expected: &str) {
    let ctx = arithmetic();
    let rules = default_rulesets(&ctx);
    assert!(rules.errors.is_empty(), "default rules failed: {:?}", rules.errors);

    let mut node = tree(&ctx, src);
    let report = simplify(&mut node, &rules.rulesets, 1000);

    assert!(!report.ceiling_reached, "'{src}' hit the ceiling");
    assert_eq!(ctx.render(&node), expected, "simplifying '{src}'");
}

#[test]
fn apply_rule_rewrites_first_match_only() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "(a*1)+(b*1)");

    assert!(apply_rule(&mut node, &rule(&ctx, "x*1", "x")));
    assert_eq!(node.to_string(), "a+b*1");
}

#[test]
fn apply_rule_reports_no_match() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "a+b");

    assert!(!apply_rule(&mut node, &rule(&ctx, "x*1", "x")));
    assert_eq!(node.to_string(), "a+b");
}

#[test]
fn unbound_template_variables_become_free() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "a-a");

    assert!(apply_rule(&mut node, &rule(&ctx, "x-x", "z")));
    assert!(matches!(&node, Node::Variable { name, scope: Scope::Free } if name == "z"));
}

#[test]
fn user_variables_are_not_confused_with_captures() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "y*(x+1)");

    assert!(apply_rule(&mut node, &rule(&ctx, "x*y", "y*x")));
    assert_eq!(node.to_string(), "(x+1)*y");
}

#[test]
fn multi_captures_are_spliced() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "sum(1, 0, x, 0)");
    let drop_zero = rule(&ctx, "sum(a..., 0, b...)", "sum(a..., b...)");

    assert!(apply_rule(&mut node, &drop_zero));
    assert_eq!(node.to_string(), "sum(1, x, 0)");
    assert!(apply_rule(&mut node, &drop_zero));
    assert_eq!(node.to_string(), "sum(1, x)");
    assert!(!apply_rule(&mut node, &drop_zero));
}

#[test]
fn single_node_multi_capture_replaces_outside_aggregates() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "sum(5)");

    assert!(apply_rule(&mut node, &rule(&ctx, "sum(a...)", "a...+1")));
    assert_eq!(node.to_string(), "5+1");
}

#[test]
fn filtered_rules_skip_rejected_matches() {
    let ctx = arithmetic();
    let factor_out = rule(&ctx, "x*y", "y*x").with_filter(Independent::new("x", "t"));
    let mut node = tree(&ctx, "t*a");

    assert!(!apply_rule(&mut node, &factor_out));

    let mut node = tree(&ctx, "a*t");
    assert!(apply_rule(&mut node, &factor_out));
    assert_eq!(node.to_string(), "t*a");
}

#[test]
fn earlier_rules_take_priority() {
    let ctx = arithmetic();
    let rules = vec![rule(&ctx, "x+y", "1"), rule(&ctx, "x+0", "2")];
    let mut node = tree(&ctx, "a+0");

    let report = apply_ruleset(&mut node, &rules, 10);

    assert_eq!(report.steps, 1);
    assert_eq!(node.to_string(), "1");
}

#[test]
fn ruleset_restarts_after_each_application() {
    let ctx = arithmetic();
    let rules = vec![rule(&ctx, "x*1", "x"), rule(&ctx, "x+0", "x")];
    let mut node = tree(&ctx, "((a+0)*1+0)*1");

    let report = apply_ruleset(&mut node, &rules, 10);

    assert_eq!(report.steps, 4);
    assert!(!report.ceiling_reached);
    assert_eq!(node.to_string(), "a");
}

#[test]
fn ruleset_stops_at_ceiling() {
    let ctx = arithmetic();
    let ruleset = Ruleset::from(vec![rule(&ctx, "x*y", "y*x")]);
    let mut node = tree(&ctx, "a*b");

    let report = ruleset.apply(&mut node, 4);

    assert_eq!(report.steps, 4);
    assert!(report.ceiling_reached);
    assert_eq!(node.to_string(), "a*b");
}

#[test]
fn fixpoint_on_the_last_allowed_step_is_not_a_ceiling_stop() {
    let ctx = arithmetic();
    let rules = vec![rule(&ctx, "x*1", "x")];

    let mut node = tree(&ctx, "a*1");
    let report = apply_ruleset(&mut node, &rules, 1);

    assert_eq!(report,
               RewriteReport { steps:           1,
                               ceiling_reached: false, });
    assert_eq!(node.to_string(), "a");

    let mut node = tree(&ctx, "(a*1)*1");
    let report = apply_ruleset(&mut node, &rules, 1);

    assert_eq!(report,
               RewriteReport { steps:           1,
                               ceiling_reached: true, });

    let mut node = tree(&ctx, "a+b");
    assert!(!apply_ruleset(&mut node, &rules, 0).ceiling_reached);
}

#[test]
fn rule_displays_both_sides() {
    let ctx = arithmetic();
    assert_eq!(rule(&ctx, "x+0", "x").to_string(), "x+0 -> x");
}

#[test]
fn parse_rule_reports_failing_side() {
    let ctx = arithmetic();

    assert_eq!(parse_rule(&ctx, "x+0 x", 3).unwrap_err(),
               RuleFileError::MissingArrow { line: 3 });
    assert_eq!(parse_rule(&ctx, "x+ -> x", 4).unwrap_err(),
               RuleFileError::Parse { line:   4,
                                      side:   Side::Left,
                                      source: ParseError::MissingOperand, });
    assert_eq!(parse_rule(&ctx, "x -> (x", 5).unwrap_err(),
               RuleFileError::Parse { line:   5,
                                      side:   Side::Right,
                                      source: ParseError::ExcessOpeningParenthesis, });
    assert!(parse_rule(&ctx, "cx*x -> x*cx", 6).unwrap().has_classes());
}

#[test]
fn rule_file_groups_and_errors() {
    let ctx = arithmetic();
    let text = "x+0 -> x\n\
                Ruleset empty\n\
                Ruleset broken\n\
                x*1 -> x\n\
                x*1 x\n\
                x*0 -> 0\n\
                Ruleset fine\n\
                ' comment\n\
                \n\
                x^1 -> x\n";

    let loaded = parse_rulesets(&ctx, text);

    let names: Vec<Option<&str>> = loaded.rulesets.iter().map(|r| r.name.as_deref()).collect();
    let sizes: Vec<usize> = loaded.rulesets.iter().map(Ruleset::len).collect();
    assert_eq!(names, vec![None, Some("empty"), Some("broken"), Some("fine")]);
    assert_eq!(sizes, vec![1, 0, 1, 1]);
    assert_eq!(loaded.errors, vec![RuleFileError::MissingArrow { line: 5 }]);
}

#[test]
fn folding_leaves_non_finite_results() {
    let ctx = arithmetic();
    let mut node = tree(&ctx, "1/0+2*3");

    assert_eq!(fold_constants(&mut node), 1);
    assert_eq!(node.to_string(), "1/0+6");
}

#[test]
fn default_simplification() {
    assert_simplifies("x*1+0+x", "2*x");
    assert_simplifies("x*x*x", "x^3");
    assert_simplifies("x+2*3", "6+x");
    assert_simplifies("x*2", "2*x");
    assert_simplifies("(x^2)^3", "x^6");
    assert_simplifies("3x+2x", "5*x");
    assert_simplifies("a-a+b", "b");
    assert_simplifies("--y", "y");
}

#[test]
fn parity_of_constant_exponents() {
    assert_simplifies("(-a)^2", "a^2");
    assert_simplifies("(-a)^3", "-(a^3)");
}

#[test]
fn aggregate_simplification() {
    assert_simplifies("sum(a, 0, b)", "sum(a, b)");
    assert_simplifies("sum(0, a)", "a");
    assert_simplifies("prod(a, 0, b)", "0");
    assert_simplifies("prod(1, a, 1)", "a");
}

#[test]
fn simplification_respects_ceiling() {
    let ctx = arithmetic();
    let rules = default_rulesets(&ctx);
    let mut node = tree(&ctx, "x*1");

    let report = simplify(&mut node, &rules.rulesets, 0);

    assert!(report.ceiling_reached);
    assert_eq!(node.to_string(), "x*1");
}
