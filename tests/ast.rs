use exprewrite::{
    ast::{Node, Scope},
    config::Config,
    interpreter::{context::ParsingContext, parser::parse},
};
use pretty_assertions::{assert_eq, assert_ne};

fn tree(ctx: &ParsingContext, src: &str) -> Node {
    parse(ctx, src).unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"))
}

#[test]
fn deep_copy_is_equal_and_independent() {
    let ctx = ParsingContext::arithmetic(Config::default());
    let original = tree(&ctx, "sum(2x, sin(y)^2, 3!)-z");
    let mut copy = original.clone();

    assert_eq!(copy, original);
    assert_eq!(copy.size(), original.size());

    let replacement = tree(&ctx, "a+1");
    assert_eq!(copy.substitute_variable("y", Scope::Free, &replacement), 1);

    assert_ne!(copy, original);
    assert_eq!(original.to_string(), "sum(2*x, sin(y)^2, 3!)-z");

    drop(original);
    assert_eq!(copy.to_string(), "sum(2*x, sin(a+1)^2, 3!)-z");
}

#[test]
fn equality_is_structural() {
    let ctx = ParsingContext::arithmetic(Config::default());

    assert_eq!(tree(&ctx, "(x+1)*2"), tree(&ctx, "(x + 1) 2"));
    assert_ne!(tree(&ctx, "x+1"), tree(&ctx, "1+x"));
    assert_ne!(tree(&ctx, "x-1"), tree(&ctx, "x+1"));
    assert_eq!(Node::Constant(f64::NAN), Node::Constant(f64::NAN));
}

#[test]
fn substitution_respects_scope() {
    let ctx = ParsingContext::arithmetic(Config::default());
    let mut node = tree(&ctx, "x*x");

    assert_eq!(node.substitute_variable("x", Scope::RuleBound, &Node::Constant(2.0)), 0);
    assert_eq!(node.to_string(), "x*x");

    node.retag(Scope::RuleBound);
    assert_eq!(node.substitute_variable("x", Scope::RuleBound, &Node::Constant(2.0)), 2);
    assert_eq!(node.to_string(), "2*2");
}
