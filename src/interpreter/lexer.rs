use logos::Logos;

use crate::interpreter::context::ParsingContext;

/// Suffix that marks a pattern variable capturing a run of operands.
pub const MULTI_CAPTURE_SUFFIX: &str = "...";

/// Raw lexical classes recognized before keyword splitting.
///
/// Operator names are not fixed at compile time, so the lexer only separates
/// numbers, letter runs and symbol runs; [`tokenize`] then splits the runs
/// against the keyword set of a [`ParsingContext`].
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    /// Numeric literals such as `12`, `1.5`, `3.` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,
    /// Runs of letters and underscores.
    #[regex(r"[A-Za-z_]+")]
    Letters,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// Runs of characters that are neither letters, digits, whitespace nor
    /// structural punctuation.
    #[regex(r"[^ \t\r\n\fA-Za-z0-9_.(),]+")]
    Symbols,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

/// A token handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`, the argument delimiter.
    Comma,
    /// An operator name, a numeric literal or a variable name.
    Text(String),
}

impl Token {
    /// Returns the text of a [`Token::Text`].
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Splits `source` into tokens using the keywords of `ctx`.
///
/// Letter runs and symbol runs are split greedily from the left by the
/// longest matching keyword, so `sin2` yields `sin`, `2` and `--x` yields
/// `-`, `-`, `x`. A letter run that does not start with a keyword stays a
/// single variable name. A letter run directly followed by `...` is kept as
/// one multi-capture name. Characters the lexer does not recognize become
/// single text tokens and are treated as variables by the parser.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{context::ParsingContext, lexer::{Token, tokenize}},
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let tokens = tokenize(&ctx, "pie(x,.5)");
///
/// assert_eq!(tokens,
///            vec![Token::Text("pi".into()),
///                 Token::Text("e".into()),
///                 Token::LParen,
///                 Token::Text("x".into()),
///                 Token::Comma,
///                 Token::Text(".5".into()),
///                 Token::RParen]);
/// ```
#[must_use]
pub fn tokenize(ctx: &ParsingContext, source: &str) -> Vec<Token> {
    let keywords = ctx.keywords();
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    // End offset of the last letter run, for attaching a following `...`.
    let mut letters_end = None;

    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let span = lexer.span();
        match raw {
            Ok(RawToken::Number) => tokens.push(Token::Text(slice.to_string())),
            Ok(RawToken::Letters) => {
                split_letters(slice, &keywords, &mut tokens);
                letters_end = Some(span.end);
                continue;
            },
            Ok(RawToken::Ellipsis) => {
                if letters_end == Some(span.start)
                   && let Some(Token::Text(name)) = tokens.last_mut()
                {
                    name.push_str(MULTI_CAPTURE_SUFFIX);
                } else {
                    tokens.push(Token::Text(slice.to_string()));
                }
            },
            Ok(RawToken::Symbols) => split_symbols(slice, &keywords, &mut tokens),
            Ok(RawToken::LParen) => tokens.push(Token::LParen),
            Ok(RawToken::RParen) => tokens.push(Token::RParen),
            Ok(RawToken::Comma) => tokens.push(Token::Comma),
            Err(()) => tokens.push(Token::Text(slice.to_string())),
        }
        letters_end = None;
    }

    tokens
}

/// Returns `true` if `text` can name a variable: a run of letters or
/// underscores, optionally followed by the multi-capture suffix.
///
/// # Example
/// ```
/// use exprewrite::interpreter::lexer::is_variable_name;
///
/// assert!(is_variable_name("speed"));
/// assert!(is_variable_name("rest..."));
/// assert!(!is_variable_name("."));
/// assert!(!is_variable_name("..."));
/// assert!(!is_variable_name("$"));
/// ```
#[must_use]
pub fn is_variable_name(text: &str) -> bool {
    let stem = text.strip_suffix(MULTI_CAPTURE_SUFFIX).unwrap_or(text);
    !stem.is_empty() && stem.chars().all(|c| c.is_alphabetic() || c == '_')
}

/// Returns the longest keyword that `text` starts with.
fn longest_keyword<'k>(text: &str, keywords: &[&'k str]) -> Option<&'k str> {
    keywords.iter()
            .copied()
            .filter(|k| !k.is_empty() && text.starts_with(k))
            .max_by_key(|k| k.len())
}

fn split_letters(mut run: &str, keywords: &[&str], out: &mut Vec<Token>) {
    while !run.is_empty() {
        if let Some(keyword) = longest_keyword(run, keywords) {
            out.push(Token::Text(keyword.to_string()));
            run = &run[keyword.len()..];
        } else {
            out.push(Token::Text(run.to_string()));
            return;
        }
    }
}

fn split_symbols(mut run: &str, keywords: &[&str], out: &mut Vec<Token>) {
    while let Some(first) = run.chars().next() {
        let len = longest_keyword(run, keywords).map_or(first.len_utf8(), str::len);
        out.push(Token::Text(run[..len].to_string()));
        run = &run[len..];
    }
}
