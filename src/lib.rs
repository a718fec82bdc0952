//! # exprewrite
//!
//! exprewrite is an expression engine written in Rust.
//! It parses infix expressions under a configurable operator table, matches
//! them against patterns, rewrites them with rule sets and evaluates them
//! numerically. User-defined functions and constants are expanded by
//! rewriting before evaluation.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    config::Config,
    error::Error,
    interpreter::{
        rewrite::loader::COMMENT_MARKER,
        session::{Outcome, Session},
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Node` enum, a tree of operator applications,
/// numeric constants and variables. Trees are built by the parser, inspected
/// by the matcher, transformed by the rewrite engine and reduced by the
/// evaluator.
///
/// # Responsibilities
/// - Owns children exclusively so that clones are deep and independent.
/// - Provides structural equality, traversal by child-index paths and
///   variable substitution.
/// - Renders trees back to text with minimal parentheses.
pub mod ast;
/// Limits shared by the parser, operator table and rewrite engine.
pub mod config;
/// Provides unified error types for parsing, definitions, rule files and
/// evaluation.
///
/// Every failure mode is a typed enum; the crate-level `Error` wraps them for
/// callers that run whole scripts.
pub mod error;
/// Orchestrates tokenizing, parsing, matching, rewriting and evaluation.
///
/// This module exposes the grammar, the individual phases and the `Session`
/// that combines them into a calculator with user definitions.
pub mod interpreter;
/// General utilities for numeric conversion and formatting.
///
/// # Responsibilities
/// - Safely convert between `f64` and `u64` without silent data loss.
/// - Parse and print numeric literals.
/// - Provide integer helpers used by the built-in functions.
pub mod util;

/// Runs a script and returns the value of its last evaluated line.
///
/// Each non-blank line is executed in one session: lines containing `=`
/// define functions or constants, all others are evaluated. Lines starting
/// with `'` are comments.
///
/// # Errors
/// The error of the first failing line.
///
/// # Examples
/// ```
/// use exprewrite::{config::Config, get_result};
///
/// let source = "' area of a circle\narea(r) = pi r^2\narea(2)/pi";
/// let res = get_result(source, Config::default());
/// assert_eq!(res, Ok(Some(4.0)));
///
/// // Unknown variables cannot be evaluated.
/// let res = get_result("x + 1", Config::default());
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, config: Config) -> Result<Option<f64>, Error> {
    let mut session = Session::new(config);
    let mut result = None;

    for line in source.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        match session.execute(line)? {
            Outcome::Value(value) => result = Some(value),
            Outcome::Defined(definition) => debug!(name = %definition.name, "script definition"),
        }
    }

    Ok(result)
}
