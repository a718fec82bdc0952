/// Operator descriptors.
///
/// Declares [`Operator`](operator::Operator) together with its placement,
/// arity and associativity enums, and the signature of native evaluation
/// functions.
pub mod operator;
/// The default arithmetic operator set.
///
/// Registers the usual infix, prefix and postfix operators, the elementary
/// functions and the constants `pi`, `e` and `phi` in a fresh context.
pub mod arith;

use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::Node,
    config::Config,
    error::ContextError,
    interpreter::context::operator::{Arity, Operator, Placement},
    util::num::{format_constant, parse_decimal},
};

/// Parses the text of a leaf token into a number.
pub type LiteralParser = fn(&str) -> Option<f64>;

/// Prints a constant node.
pub type LiteralPrinter = fn(f64) -> String;

/// The grammar an expression is parsed under.
///
/// Holds the registered operators in registration order, which is also
/// lookup priority and display order, the optional glue operator inserted
/// between adjacent operands, and the numeric literal codec.
#[derive(Debug, Clone)]
pub struct ParsingContext {
    operators: Vec<Arc<Operator>>,
    glue:      Option<Arc<Operator>>,
    parser:    LiteralParser,
    printer:   LiteralPrinter,
    config:    Config,
}

impl ParsingContext {
    /// Creates an empty context with the default literal codec.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { operators: Vec::new(),
               glue: None,
               parser: parse_decimal,
               printer: format_constant,
               config }
    }

    /// Replaces the literal codec.
    #[must_use]
    pub fn with_literals(mut self, parser: LiteralParser, printer: LiteralPrinter) -> Self {
        self.parser = parser;
        self.printer = printer;
        self
    }

    /// Registers an operator.
    ///
    /// Function operators may share a name as long as their arities differ;
    /// every other placement requires a unique name.
    ///
    /// # Returns
    /// The index of the operator in registration order.
    ///
    /// # Errors
    /// - `TableFull` if the configured capacity is reached.
    /// - `InvalidArity` if the arity does not fit the placement.
    /// - `DuplicateOperator` if the name is already taken.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{
    ///     config::Config,
    ///     interpreter::context::{ParsingContext, operator::{Associativity, Operator}},
    /// };
    ///
    /// let mut ctx = ParsingContext::new(Config::default());
    /// let index = ctx.register(Operator::infix("+", 2, Associativity::Both, |a| a[0] + a[1]))
    ///                .unwrap();
    ///
    /// assert_eq!(index, 0);
    /// assert!(ctx.register(Operator::infix("+", 3, Associativity::Left, |a| a[0])).is_err());
    /// ```
    pub fn register(&mut self, operator: Operator) -> Result<usize, ContextError> {
        self.register_shared(operator).map(|(index, _)| index)
    }

    /// Like [`ParsingContext::register`], but also returns the shared
    /// descriptor.
    pub fn register_shared(&mut self,
                           operator: Operator)
                           -> Result<(usize, Arc<Operator>), ContextError> {
        if self.operators.len() >= self.config.max_operators {
            return Err(ContextError::TableFull { capacity: self.config.max_operators, });
        }
        if !operator.has_valid_arity() {
            return Err(ContextError::InvalidArity { name: operator.name });
        }
        let taken = self.operators.iter().any(|existing| {
                                              existing.name == operator.name
                                              && existing.placement == operator.placement
                                              && (!operator.is_function()
                                                  || existing.arity == operator.arity)
                                          });
        if taken {
            return Err(ContextError::DuplicateOperator { name: operator.name });
        }

        debug!(operator = %operator, "registered operator");
        let shared = Arc::new(operator);
        self.operators.push(Arc::clone(&shared));
        Ok((self.operators.len() - 1, shared))
    }

    /// Sets the glue operator inserted between adjacent operands.
    ///
    /// # Errors
    /// `GlueNotInfix` unless the operator is infix.
    pub fn set_glue(&mut self, operator: Arc<Operator>) -> Result<(), ContextError> {
        if operator.placement != Placement::Infix {
            return Err(ContextError::GlueNotInfix { name: operator.name.clone(), });
        }
        self.glue = Some(operator);
        Ok(())
    }

    /// Removes the glue operator; adjacent operands become an error.
    pub fn clear_glue(&mut self) {
        self.glue = None;
    }

    /// Returns the glue operator, if any.
    #[must_use]
    pub const fn glue(&self) -> Option<&Arc<Operator>> {
        self.glue.as_ref()
    }

    /// Finds the first operator with the given name and placement.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{
    ///     config::Config,
    ///     interpreter::context::{ParsingContext, operator::Placement},
    /// };
    ///
    /// let ctx = ParsingContext::arithmetic(Config::default());
    ///
    /// assert!(ctx.lookup("-", Placement::Infix).is_some());
    /// assert!(ctx.lookup("-", Placement::Prefix).is_some());
    /// assert!(ctx.lookup("-", Placement::Postfix).is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str, placement: Placement) -> Option<&Arc<Operator>> {
        self.operators
            .iter()
            .find(|op| op.name == name && op.placement == placement)
    }

    /// Resolves a function overload.
    ///
    /// Prefers the overload with exactly `arity` parameters and falls back to
    /// an overload with dynamic arity.
    #[must_use]
    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<&Arc<Operator>> {
        let mut dynamic = None;
        for op in self.operators
                      .iter()
                      .filter(|op| op.is_function() && op.name == name)
        {
            match op.arity {
                Arity::Fixed(n) if n == arity => return Some(op),
                Arity::Dynamic if dynamic.is_none() => dynamic = Some(op),
                _ => {},
            }
        }
        dynamic
    }

    /// Returns `true` if the function name has more than one overload or
    /// accepts a dynamic number of arguments.
    #[must_use]
    pub fn is_overloaded(&self, name: &str) -> bool {
        let mut count = 0;
        for op in self.operators
                      .iter()
                      .filter(|op| op.is_function() && op.name == name)
        {
            if op.arity == Arity::Dynamic {
                return true;
            }
            count += 1;
        }
        count > 1
    }

    /// Returns `true` if `name` is registered with any placement.
    #[must_use]
    pub fn is_keyword(&self, name: &str) -> bool {
        self.operators.iter().any(|op| op.name == name)
    }

    /// Returns the distinct operator names, the keyword set of the lexer.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for op in &self.operators {
            if !names.contains(&op.name.as_str()) {
                names.push(&op.name);
            }
        }
        names
    }

    /// Iterates over the operators in registration order.
    pub fn operators(&self) -> impl Iterator<Item = &Arc<Operator>> {
        self.operators.iter()
    }

    /// Parses a literal with the configured parser.
    #[must_use]
    pub fn parse_literal(&self, text: &str) -> Option<f64> {
        (self.parser)(text)
    }

    /// Renders a tree with the configured literal printer.
    #[must_use]
    pub fn render(&self, node: &Node) -> String {
        node.render(self.printer)
    }

    /// Returns the limits this context was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
