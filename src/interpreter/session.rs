/// Function and constant definitions.
///
/// Turns `f(x, y) = body` into a function operator plus the rewrite rule
/// that eliminates it before evaluation.
pub mod definition;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    ast::Node,
    config::Config,
    error::{Error, ParseError, RuleFileError},
    interpreter::{
        context::ParsingContext,
        evaluator::evaluate_with,
        parser::parse,
        rewrite::{
            RewriteReport, RewriteRule, Ruleset, apply_ruleset, default_rulesets, parse_rulesets,
            simplify,
        },
        session::definition::{DEFINITION_OPERATOR, Definition},
    },
};

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The line defined a function or constant.
    Defined(Definition),
    /// The line was evaluated to a number.
    Value(f64),
}

/// Holds the grammar, the user definitions and the simplification rules of
/// one calculator session.
///
/// Definitions and rule loading mutate the session between evaluations;
/// parsing, matching and evaluation only read it.
#[derive(Debug)]
pub struct Session {
    ctx:        ParsingContext,
    composites: Vec<RewriteRule>,
    rulesets:   Vec<Ruleset>,
    config:     Config,
}

impl Session {
    /// Creates a session with the arithmetic grammar and the default
    /// simplification rules.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{config::Config, interpreter::session::Session};
    ///
    /// let mut session = Session::new(Config::default());
    /// session.define("sq(x) = x*x").unwrap();
    ///
    /// assert_eq!(session.evaluate("sq(3)+1").unwrap(), 10.0);
    /// ```
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ctx = ParsingContext::arithmetic(config);
        let loaded = default_rulesets(&ctx);
        for error in &loaded.errors {
            warn!(error = %error, "default rule file contains an invalid rule");
        }
        Self { ctx,
               composites: Vec::new(),
               rulesets: loaded.rulesets,
               config }
    }

    /// Creates a session over a custom grammar without simplification rules.
    #[must_use]
    pub fn with_context(ctx: ParsingContext) -> Self {
        let config = *ctx.config();
        Self { ctx,
               composites: Vec::new(),
               rulesets: Vec::new(),
               config }
    }

    /// The grammar.
    #[must_use]
    pub const fn context(&self) -> &ParsingContext {
        &self.ctx
    }

    /// The elimination rules of the user-defined functions and constants,
    /// in definition order.
    #[must_use]
    pub fn composites(&self) -> &[RewriteRule] {
        &self.composites
    }

    /// The simplification rulesets.
    #[must_use]
    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    /// Replaces the simplification rulesets with those of a rule file.
    ///
    /// Groups that failed to load keep the rules read before the error.
    ///
    /// # Returns
    /// The line-numbered errors of the file.
    pub fn load_rules(&mut self, text: &str) -> Vec<RuleFileError> {
        let loaded = parse_rulesets(&self.ctx, text);
        self.rulesets = loaded.rulesets;
        loaded.errors
    }

    /// Parses text under the session grammar.
    ///
    /// # Errors
    /// Any [`ParseError`].
    pub fn parse(&self, text: &str) -> Result<Node, ParseError> {
        parse(&self.ctx, text)
    }

    /// Replaces every application of a user-defined function or constant by
    /// its definition.
    pub fn eliminate_composites(&self, tree: &mut Node) -> RewriteReport {
        let report = apply_ruleset(tree, &self.composites, self.config.rewrite_ceiling);
        if report.ceiling_reached {
            warn!(tree = %tree, "user definitions could not be fully eliminated");
        }
        report
    }

    /// Simplifies a tree in place with the session rulesets.
    pub fn simplify_tree(&self, tree: &mut Node) -> RewriteReport {
        simplify(tree, &self.rulesets, self.config.rewrite_ceiling)
    }

    /// Parses, eliminates user definitions and simplifies.
    ///
    /// # Errors
    /// A parse error of `text`.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{config::Config, interpreter::session::Session};
    ///
    /// let session = Session::new(Config::default());
    /// let tree = session.simplify("x*x*1").unwrap();
    ///
    /// assert_eq!(session.render(&tree), "x^2");
    /// ```
    pub fn simplify(&self, text: &str) -> Result<Node, Error> {
        let mut tree = self.parse(text)?;
        self.eliminate_composites(&mut tree);
        self.simplify_tree(&mut tree);
        Ok(tree)
    }

    /// Parses, eliminates user definitions and evaluates.
    ///
    /// # Errors
    /// A parse error, or an evaluation error such as an unbound variable.
    pub fn evaluate(&self, text: &str) -> Result<f64, Error> {
        self.evaluate_with(text, &HashMap::new())
    }

    /// Like [`Session::evaluate`], with values for free variables.
    ///
    /// # Errors
    /// A parse error, or an evaluation error for variables missing from
    /// `bindings`.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use exprewrite::{config::Config, interpreter::session::Session};
    ///
    /// let session = Session::new(Config::default());
    /// let bindings = HashMap::from([("x".to_string(), 4.0)]);
    ///
    /// assert_eq!(session.evaluate_with("sqrt x + 1", &bindings).unwrap(), 3.0);
    /// ```
    pub fn evaluate_with(&self, text: &str, bindings: &HashMap<String, f64>) -> Result<f64, Error> {
        let mut tree = self.parse(text)?;
        self.eliminate_composites(&mut tree);
        let value = evaluate_with(&tree, bindings)?;
        debug!(text, value, "evaluated");
        Ok(value)
    }

    /// Executes one line: a definition if it contains `=`, otherwise an
    /// evaluation.
    ///
    /// # Errors
    /// The error of the definition or evaluation.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, Error> {
        if line.contains(DEFINITION_OPERATOR) {
            Ok(Outcome::Defined(self.define(line)?))
        } else {
            Ok(Outcome::Value(self.evaluate(line)?))
        }
    }

    /// Renders a tree with the session's literal printer.
    #[must_use]
    pub fn render(&self, tree: &Node) -> String {
        self.ctx.render(tree)
    }
}
