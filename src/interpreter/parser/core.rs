use tracing::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        context::{
            ParsingContext,
            operator::{Arity, Placement},
        },
        lexer::{Token, is_variable_name, tokenize},
        parser::state::{Frame, ParserState},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses `source` under the grammar of `ctx`.
///
/// This is the entry point for expression parsing. The text is split by
/// [`tokenize`] and handed to [`parse_tokens`].
///
/// # Parameters
/// - `ctx`: The operator table and literal codec.
/// - `source`: The expression text.
///
/// # Returns
/// The root of the parsed tree.
///
/// # Errors
/// - `TooManyTokens` if the input exceeds the configured token limit.
/// - Every error of [`parse_tokens`].
///
/// # Example
/// ```
/// use exprewrite::{config::Config, interpreter::{context::ParsingContext, parser::parse}};
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let tree = parse(&ctx, "2(x+1)^2").unwrap();
///
/// assert_eq!(tree.to_string(), "2*(x+1)^2");
/// ```
pub fn parse(ctx: &ParsingContext, source: &str) -> ParseResult<Node> {
    let tokens = tokenize(ctx, source);
    let limit = ctx.config().max_tokens;
    if tokens.len() > limit {
        return Err(ParseError::TooManyTokens { limit });
    }
    let tree = parse_tokens(ctx, &tokens)?;
    debug!(source, tree = %tree, "parsed expression");
    Ok(tree)
}

/// Builds a tree from a token sequence with an extended shunting-yard
/// algorithm.
///
/// Beyond plain operator precedence this handles prefix, postfix and function
/// operators, functions with a dynamic number of arguments, overloads
/// resolved by argument count, unary functions written without parentheses
/// (`sin2` is `sin(2)`) and insertion of the glue operator between adjacent
/// operands (`2x` is `2*x`).
///
/// # Errors
/// Any [`ParseError`]; partially built subtrees are dropped.
pub fn parse_tokens(ctx: &ParsingContext, tokens: &[Token]) -> ParseResult<Node> {
    let mut state = ParserState::new(ctx);
    // An operand was just completed, so an infix or postfix operator, a
    // delimiter or a closing parenthesis is expected next.
    let mut await_infix = false;
    let mut pos = 0;

    while let Some(token) = tokens.get(pos) {
        let prev = pos.checked_sub(1).and_then(|p| tokens.get(p));
        pos += 1;
        let next = tokens.get(pos);

        if await_infix
           && let Some(glue) = ctx.glue()
           && continues_operand(ctx, token)
        {
            state.push_glue(glue)?;
            await_infix = false;
        }

        let name = match token {
            Token::LParen => {
                state.push_sentinel()?;
                continue;
            },
            Token::RParen => {
                close_parenthesis(&mut state, prev)?;
                await_infix = true;
                continue;
            },
            Token::Comma => {
                delimit_argument(&mut state)?;
                await_infix = false;
                continue;
            },
            Token::Text(name) => name.as_str(),
        };

        if await_infix {
            if let Some(op) = ctx.lookup(name, Placement::Infix) {
                state.push_operator(op)?;
                await_infix = false;
            } else if let Some(op) = ctx.lookup(name, Placement::Postfix) {
                state.push_operator(op)?;
                state.reduce_top()?;
            } else {
                return Err(ParseError::UnexpectedSubexpression { token: name.to_string(), });
            }
            continue;
        }

        if let Some(op) = ctx.lookup(name, Placement::Function) {
            state.push_operator(op)?;
            let opens_call = next == Some(&Token::LParen);

            if matches!(op.arity, Arity::Fixed(0) | Arity::Dynamic)
               && (!ctx.is_overloaded(name) || !opens_call)
            {
                // Used as a constant: drop an empty argument list.
                if opens_call && tokens.get(pos + 1) == Some(&Token::RParen) {
                    pos += 2;
                }
                state.reduce_top()?;
                await_infix = true;
                continue;
            }

            if next.is_some()
               && !opens_call
               && let Some(frame) = state.top_op_mut()
            {
                frame.count = 1;
            }
            continue;
        }

        if let Some(op) = ctx.lookup(name, Placement::Prefix) {
            state.push_operator(op)?;
            continue;
        }

        if ctx.lookup(name, Placement::Infix).is_some()
           || ctx.lookup(name, Placement::Postfix).is_some()
        {
            return Err(ParseError::MissingOperand);
        }

        let leaf = match ctx.parse_literal(name) {
            Some(value) => Node::Constant(value),
            None if is_variable_name(name) => Node::variable(name),
            None => return Err(ParseError::UnexpectedToken { token: name.to_string() }),
        };
        state.push_operand(leaf)?;
        await_infix = true;
    }

    state.finish()
}

/// Returns `true` if `token` starts a new operand when one was just
/// completed, which is where the glue operator is inserted.
fn continues_operand(ctx: &ParsingContext, token: &Token) -> bool {
    match token {
        Token::RParen | Token::Comma => false,
        Token::LParen => true,
        Token::Text(name) => {
            ctx.lookup(name, Placement::Infix).is_none()
            && ctx.lookup(name, Placement::Postfix).is_none()
        },
    }
}

fn close_parenthesis(state: &mut ParserState<'_>, prev: Option<&Token>) -> ParseResult<()> {
    if !state.reduce_to_sentinel()? {
        return Err(ParseError::ExcessClosingParenthesis);
    }
    state.pop_sentinel();

    // Closing a parameter list adds its last argument, unless the list was
    // empty.
    if prev != Some(&Token::LParen)
       && let Some(frame) = state.top_op_mut()
       && frame.count_operands
    {
        frame.count += 1;
    }
    Ok(())
}

fn delimit_argument(state: &mut ParserState<'_>) -> ParseResult<()> {
    let reached = state.reduce_to_sentinel().map_err(|e| match e {
                                                 ParseError::OutOfMemory
                                                 | ParseError::StackExceeded { .. }
                                                 | ParseError::ChildrenExceeded { .. } => e,
                                                 _ => ParseError::UnexpectedDelimiter,
                                             })?;
    if !reached {
        return Err(ParseError::UnexpectedDelimiter);
    }
    match state.below_top_mut() {
        Some(Frame::Op(frame)) if frame.op.placement == Placement::Function => {
            if frame.count_operands {
                frame.count += 1;
            }
            Ok(())
        },
        _ => Err(ParseError::UnexpectedDelimiter),
    }
}
