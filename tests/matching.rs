use exprewrite::{
    ast::Node,
    config::Config,
    interpreter::{
        context::ParsingContext,
        matching::{
            EvenConstant, Filter, Independent, Matching, Pattern, count_matchings,
            find_all_matchings, find_matching, match_at,
        },
        parser::parse,
    },
};
use pretty_assertions::assert_eq;

fn arithmetic() -> ParsingContext {
    ParsingContext::arithmetic(Config::default())
}

fn tree(ctx: &ParsingContext, src: &str) -> Node {
    parse(ctx, src).unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"))
}

fn rendered(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(ToString::to_string).collect()
}

fn binds_positive_constant(matching: &Matching<'_, '_>) -> bool {
    matching.single("x")
            .and_then(Node::as_constant)
            .is_some_and(|value| value > 0.0)
}

#[test]
fn variables_bind_consistently() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x*x");

    let same = tree(&ctx, "(a+1)*(a+1)");
    let different = tree(&ctx, "(a+1)*(a+2)");

    let matching = match_at(&Pattern::new(&pattern), &same).expect("should match");
    assert_eq!(matching.len(), 1);
    assert_eq!(matching.single("x").map(ToString::to_string), Some("a+1".to_string()));
    assert!(match_at(&Pattern::new(&pattern), &different).is_none());
}

#[test]
fn constants_and_operators_must_agree() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x+0");

    assert!(match_at(&Pattern::new(&pattern), &tree(&ctx, "y+0")).is_some());
    assert!(match_at(&Pattern::new(&pattern), &tree(&ctx, "y+1")).is_none());
    assert!(match_at(&Pattern::new(&pattern), &tree(&ctx, "y-0")).is_none());
}

#[test]
fn pattern_without_variables_has_empty_matching() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "2*3");

    let candidate = tree(&ctx, "2*3");

    let matching = match_at(&Pattern::new(&pattern), &candidate).expect("should match");
    assert!(matching.is_empty());
}

#[test]
fn class_sigils_restrict_bindings() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "cx+y");
    let typed = Pattern::new(&pattern).with_classes(true);
    let untyped = Pattern::new(&pattern);

    assert!(match_at(&typed, &tree(&ctx, "2+a")).is_some());
    assert!(match_at(&typed, &tree(&ctx, "a+2")).is_none());
    assert!(match_at(&untyped, &tree(&ctx, "a+2")).is_some());

    let pattern = tree(&ctx, "lx*ox");
    let typed = Pattern::new(&pattern).with_classes(true);
    assert!(match_at(&typed, &tree(&ctx, "a*sin(b)")).is_some());
    assert!(match_at(&typed, &tree(&ctx, "a*b")).is_none());
    assert!(match_at(&typed, &tree(&ctx, "2*sin(b)")).is_none());

    let pattern = tree(&ctx, "bx+dy");
    let typed = Pattern::new(&pattern).with_classes(true);
    assert!(match_at(&typed, &tree(&ctx, "1+a")).is_some());
    assert!(match_at(&typed, &tree(&ctx, "a+b*c")).is_some());
    assert!(match_at(&typed, &tree(&ctx, "a+1")).is_none());
}

#[test]
fn multi_capture_takes_shortest_leading_run() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "sum(a..., 0, b...)");
    let candidate = tree(&ctx, "sum(1, 0, 2, 0)");

    let matching = match_at(&Pattern::new(&pattern), &candidate).expect("should match");

    assert_eq!(rendered(matching.get("a...").unwrap()), vec!["1"]);
    assert_eq!(rendered(matching.get("b...").unwrap()), vec!["2", "0"]);
}

#[test]
fn multi_capture_binds_empty_runs() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "sum(rest...)");

    let empty = tree(&ctx, "sum()");
    let three = tree(&ctx, "sum(1, x, 3)");

    let matching = match_at(&Pattern::new(&pattern), &empty).expect("should match");
    assert_eq!(matching.get("rest..."), Some(&[][..]));

    let matching = match_at(&Pattern::new(&pattern), &three).expect("should match");
    assert_eq!(rendered(matching.get("rest...").unwrap()), vec!["1", "x", "3"]);
}

#[test]
fn multi_capture_respects_classes() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "max(cs..., x)");
    let typed = Pattern::new(&pattern).with_classes(true);

    let candidate = tree(&ctx, "max(1, 2, y)");

    let matching = match_at(&typed, &candidate).expect("should match");
    assert_eq!(rendered(matching.get("cs...").unwrap()), vec!["1", "2"]);
    assert!(match_at(&typed, &tree(&ctx, "max(1, y, 2)")).is_none());
}

#[test]
fn multi_capture_outside_dynamic_operator_binds_one_node() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "a...+1");

    let candidate = tree(&ctx, "x*y+1");

    let matching = match_at(&Pattern::new(&pattern), &candidate).expect("should match");
    assert_eq!(rendered(matching.get("a...").unwrap()), vec!["x*y"]);
}

#[test]
fn repeated_multi_capture_must_agree() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "sum(a..., a...)");

    assert!(match_at(&Pattern::new(&pattern), &tree(&ctx, "sum(1, 2, 1, 2)")).is_some());
    assert!(match_at(&Pattern::new(&pattern), &tree(&ctx, "sum(1, 2, 3)")).is_none());
}

#[test]
fn filters_reject_structural_matches() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x+y");
    let filters: Vec<Box<dyn Filter>> = vec![Box::new(binds_positive_constant)];
    let filtered = Pattern::new(&pattern).with_filters(&filters);

    assert!(match_at(&filtered, &tree(&ctx, "2+a")).is_some());
    assert!(match_at(&filtered, &tree(&ctx, "a+2")).is_none());
    assert!(match_at(&filtered, &tree(&ctx, "(0-2)+a")).is_none());
}

#[test]
fn filters_select_among_multi_capture_alternatives() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "sum(a..., x, b...)");
    let filters: Vec<Box<dyn Filter>> = vec![Box::new(binds_positive_constant)];
    let filtered = Pattern::new(&pattern).with_filters(&filters);

    let candidate = tree(&ctx, "sum(y, 0, 5, 7)");

    let matching = match_at(&filtered, &candidate).expect("should match");

    assert_eq!(rendered(matching.get("a...").unwrap()), vec!["y", "0"]);
    assert_eq!(matching.single("x").map(ToString::to_string), Some("5".to_string()));
}

#[test]
fn even_constant_filter() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x^cy");
    let filters: Vec<Box<dyn Filter>> = vec![Box::new(EvenConstant::new("cy"))];
    let filtered = Pattern::new(&pattern).with_classes(true)
                                         .with_filters(&filters);

    assert!(match_at(&filtered, &tree(&ctx, "a^2")).is_some());
    assert!(match_at(&filtered, &tree(&ctx, "a^4")).is_some());
    assert!(match_at(&filtered, &tree(&ctx, "a^3")).is_none());
    assert!(match_at(&filtered, &tree(&ctx, "a^2.5")).is_none());
}

#[test]
fn independent_filter() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x*y");
    let filters: Vec<Box<dyn Filter>> = vec![Box::new(Independent::new("x", "t"))];
    let filtered = Pattern::new(&pattern).with_filters(&filters);

    assert!(match_at(&filtered, &tree(&ctx, "a*t")).is_some());
    assert!(match_at(&filtered, &tree(&ctx, "sin(t)*a")).is_none());

    let candidate = tree(&ctx, "t*a+b*t");
    let site = find_matching(&filtered, &candidate).expect("should match");
    assert_eq!(site.path, vec![1]);
}

#[test]
fn find_matching_uses_pre_order() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x+y");
    let candidate = tree(&ctx, "sin(a+b)*(c+d)");

    let site = find_matching(&Pattern::new(&pattern), &candidate).expect("should match");

    assert_eq!(site.path, vec![0, 0]);
    assert_eq!(candidate.get(&site.path).map(ToString::to_string), Some("a+b".to_string()));
}

#[test]
fn find_all_and_count() {
    let ctx = arithmetic();
    let pattern = tree(&ctx, "x+y");
    let candidate = tree(&ctx, "(a+b)+(c+d)");

    let sites = find_all_matchings(&Pattern::new(&pattern), &candidate);
    let paths: Vec<Vec<usize>> = sites.iter().map(|s| s.path.clone()).collect();

    assert_eq!(paths, vec![vec![], vec![0], vec![1]]);
    assert_eq!(count_matchings(&Pattern::new(&pattern), &candidate), 3);
    assert_eq!(count_matchings(&Pattern::new(&pattern), &tree(&ctx, "a*b")), 0);
}
