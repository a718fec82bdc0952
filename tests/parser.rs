use exprewrite::{
    config::Config,
    error::ParseError,
    interpreter::{
        context::{
            ParsingContext,
            operator::{Arity, Associativity, Operator, Placement},
        },
        evaluator::evaluate,
        lexer::{Token, tokenize},
        parser::parse,
    },
};
use pretty_assertions::assert_eq;

fn arithmetic() -> ParsingContext {
    ParsingContext::arithmetic(Config::default())
}

fn value_of(src: &str) -> f64 {
    let ctx = arithmetic();
    let tree = parse(&ctx, src).unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"));
    evaluate(&tree).unwrap_or_else(|e| panic!("'{src}' failed to evaluate: {e}"))
}

fn assert_value(src: &str, expected: f64) {
    let actual = value_of(src);
    assert!((actual - expected).abs() < 1e-9,
            "'{src}' evaluated to {actual}, expected {expected}");
}

fn assert_parse_error(src: &str, expected: &ParseError) {
    match parse(&arithmetic(), src) {
        Ok(tree) => panic!("'{src}' parsed to {tree} but was expected to fail"),
        Err(e) => assert_eq!(&e, expected, "wrong error for '{src}'"),
    }
}

fn assert_renders(src: &str, expected: &str) {
    let ctx = arithmetic();
    let tree = parse(&ctx, src).unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"));
    assert_eq!(ctx.render(&tree), expected);
}

fn text(s: &str) -> Token {
    Token::Text(s.to_string())
}

#[test]
fn precedence_and_associativity() {
    assert_value("1+2*3+4", 11.0);
    assert_value("2^2^3", 256.0);
    assert_value("1-2-3", -4.0);
    assert_value("8/4/2", 1.0);
    assert_value("(1+2)*3", 9.0);
    assert_value("2*3^2", 18.0);
}

#[test]
fn prefix_and_postfix_operators() {
    assert_value("-3+5", 2.0);
    assert_value("--3", 3.0);
    assert_value("+-+2", -2.0);
    assert_value("3!", 6.0);
    assert_value("3!+1", 7.0);
    assert_value("50%", 0.5);
    assert_value("(1+2)!", 6.0);
}

#[test]
fn functions_with_and_without_parentheses() {
    assert_value("sin(0)", 0.0);
    assert_value("sqrt 16", 4.0);
    assert_value("sin2*3", 2.0_f64.sin() * 3.0);
    assert_value("sqrt(9)^2", 9.0);
    assert_value("log(8, 2)", 3.0);
    assert_value("log(2 64, 1+1)", 7.0);
    assert_value("root(27, 3)", 3.0);
    assert_value("gcd(12, 18) + lcm(4, 6)", 18.0);
}

#[test]
fn dynamic_arity_functions() {
    assert_value("sum(1,2,3)", 6.0);
    assert_value("sum()", 0.0);
    assert_value("sum", 0.0);
    assert_value("prod(2, 3, 4)", 24.0);
    assert_value("avg(1, 2, 3, 6)", 3.0);
    assert_value("min(4, -1, 3)", -1.0);
    assert_value("max(4, -1, 3)", 4.0);
    assert_value("sum(1, sum(2, 3), 4)", 10.0);
}

#[test]
fn constants_and_empty_argument_lists() {
    assert_value("pi", std::f64::consts::PI);
    assert_value("pi()", std::f64::consts::PI);
    assert_value("pi()e", std::f64::consts::PI * std::f64::consts::E);
    assert_value("2pi", 2.0 * std::f64::consts::PI);
    assert_value("phi^2-phi", 1.0);
}

#[test]
fn glue_between_adjacent_operands() {
    assert_value("2 3", 6.0);
    assert_value("2(3+1)", 8.0);
    assert_value("(1+1)(2+2)", 8.0);
    assert_value("5 .5", 2.5);
    assert_renders("2x", "2*x");
    assert_renders("2(x+1)^2", "2*(x+1)^2");
    assert_renders("x y z", "x*y*z");
}

#[test]
fn mixed_expressions() {
    assert_value("sin-2%*3", (-2.0_f64).sin() / 100.0 * 3.0);
    assert_value("--(1+sum(ld--8, --1%+--1%, 2 .2))%+1",
                 (1.0 + 3.0 + 0.02 + 0.4) / 100.0 + 1.0);
}

#[test]
fn rendering_keeps_grouping() {
    assert_renders("(a-b)-c", "a-b-c");
    assert_renders("a-(b-c)", "a-(b-c)");
    assert_renders("(a^b)^c", "(a^b)^c");
    assert_renders("a^(b^c)", "a^b^c");
    assert_renders("-(a+b)", "-(a+b)");
    assert_renders("(a+b)!", "(a+b)!");
    assert_renders("log(x, 2)", "log(x, 2)");
    assert_renders("sum()", "sum");
}

#[test]
fn structural_errors() {
    assert_parse_error("", &ParseError::Empty);
    assert_parse_error("()", &ParseError::Empty);
    assert_parse_error("x+", &ParseError::MissingOperand);
    assert_parse_error("*x", &ParseError::MissingOperand);
    assert_parse_error("(x", &ParseError::ExcessOpeningParenthesis);
    assert_parse_error("x)", &ParseError::ExcessClosingParenthesis);
    assert_parse_error("sin,", &ParseError::UnexpectedDelimiter);
    assert_parse_error("-(1,2)", &ParseError::UnexpectedDelimiter);
    assert_parse_error("1,2", &ParseError::UnexpectedDelimiter);
}

#[test]
fn stray_tokens_are_not_variables() {
    assert_parse_error("3..", &ParseError::UnexpectedToken { token: ".".to_string() });
    assert_parse_error("a $ b", &ParseError::UnexpectedToken { token: "$".to_string() });
    assert_parse_error("...+1", &ParseError::UnexpectedToken { token: "...".to_string() });
    assert_renders("rest...+x_y", "rest...+x_y");
}

#[test]
fn function_arity_errors() {
    assert_parse_error("sin",
                       &ParseError::FunctionWrongArity { name:  "sin".to_string(),
                                                         arity: 0, });
    assert_parse_error("sin(x,y)",
                       &ParseError::FunctionWrongArity { name:  "sin".to_string(),
                                                         arity: 2, });
    assert_parse_error("log(8)",
                       &ParseError::FunctionWrongArity { name:  "log".to_string(),
                                                         arity: 1, });
}

#[test]
fn adjacent_operands_without_glue() {
    let mut ctx = arithmetic();
    ctx.clear_glue();

    assert!(matches!(parse(&ctx, "2 3"), Err(ParseError::UnexpectedSubexpression { .. })));
    assert!(parse(&ctx, "2*3").is_ok());
}

#[test]
fn configured_limits() {
    let ctx = ParsingContext::arithmetic(Config::default().with_max_tokens(3));
    assert_eq!(parse(&ctx, "1+2+3"), Err(ParseError::TooManyTokens { limit: 3 }));
    assert!(parse(&ctx, "1+2").is_ok());

    let ctx = ParsingContext::arithmetic(Config::default().with_max_depth(4));
    assert_eq!(parse(&ctx, "((((((1))))))"), Err(ParseError::StackExceeded { limit: 4 }));

    let ctx = ParsingContext::arithmetic(Config::default().with_max_children(3));
    assert_eq!(parse(&ctx, "sum(1,2,3,4)"),
               Err(ParseError::ChildrenExceeded { name:  "sum".to_string(),
                                                  limit: 3, }));
    assert!(parse(&ctx, "sum(1,2,3)").is_ok());
}

#[test]
fn overloads_resolve_by_argument_count() {
    let mut ctx = arithmetic();
    ctx.register(Operator::function("f", Arity::Fixed(1), |a| a[0] * 10.0))
       .unwrap();
    ctx.register(Operator::function("f", Arity::Fixed(2), |a| a[0] + a[1]))
       .unwrap();

    let one = parse(&ctx, "f(3)").unwrap();
    let two = parse(&ctx, "f(3, 4)").unwrap();

    assert_eq!(evaluate(&one), Ok(30.0));
    assert_eq!(evaluate(&two), Ok(7.0));
    assert!(matches!(parse(&ctx, "f(1,2,3)"),
                     Err(ParseError::FunctionWrongArity { arity: 3, .. })));
}

#[test]
fn custom_grammar() {
    let mut ctx = ParsingContext::new(Config::default());
    ctx.register(Operator::infix("&", 1, Associativity::Left, |a| a[0].min(a[1])))
       .unwrap();
    ctx.register(Operator::infix("|", 0, Associativity::Left, |a| a[0].max(a[1])))
       .unwrap();
    ctx.register(Operator::prefix("~", 2, |a| 1.0 - a[0])).unwrap();

    let tree = parse(&ctx, "~1 | 0 & 1").unwrap();

    assert_eq!(evaluate(&tree), Ok(0.0));
    assert_eq!(tree.to_string(), "~1|0&1");
}

#[test]
fn context_rejects_invalid_operators() {
    let mut ctx = arithmetic();
    assert!(ctx.register(Operator::infix("+", 9, Associativity::Left, |a| a[0]))
               .is_err());
    assert!(ctx.register(Operator::function("sin", Arity::Fixed(2), |a| a[0]))
               .is_ok());

    let small = Config::default().with_max_operators(2);
    let mut ctx = ParsingContext::new(small);
    ctx.register(Operator::prefix("-", 1, |a| -a[0])).unwrap();
    ctx.register(Operator::postfix("!", 1, |a| a[0])).unwrap();
    assert!(ctx.register(Operator::postfix("?", 1, |a| a[0])).is_err());
    assert!(ctx.lookup("!", Placement::Postfix).is_some());
}

#[test]
fn tokenizer_splits_by_keywords() {
    let ctx = arithmetic();

    assert_eq!(tokenize(&ctx, "sin2"), vec![text("sin"), text("2")]);
    assert_eq!(tokenize(&ctx, "x2"), vec![text("x"), text("2")]);
    assert_eq!(tokenize(&ctx, "--x"), vec![text("-"), text("-"), text("x")]);
    assert_eq!(tokenize(&ctx, "speed"), vec![text("speed")]);
    assert_eq!(tokenize(&ctx, "sum(a..., b)"),
               vec![text("sum"),
                    Token::LParen,
                    text("a..."),
                    Token::Comma,
                    text("b"),
                    Token::RParen]);
    assert_eq!(tokenize(&ctx, "1.5 + .25"), vec![text("1.5"), text("+"), text(".25")]);
}
