use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    ast::{Node, Scope},
    error::{DefinitionError, ParseError, Side},
    interpreter::{
        context::operator::{Arity, Operator, Placement},
        lexer::{Token, tokenize},
        parser::parse,
        rewrite::RewriteRule,
        session::Session,
    },
};

/// Separates the head of a definition from its body.
pub const DEFINITION_OPERATOR: char = '=';

/// Summary of an accepted definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The function or constant name.
    pub name:            String,
    /// Number of parameters; `0` for constants.
    pub arity:           usize,
    /// Whether an existing definition of the same name and arity was
    /// replaced.
    pub redefinition:    bool,
    /// Number of earlier definitions whose free variables of the same name
    /// now refer to this constant.
    pub bound_constants: usize,
}

impl Session {
    /// Defines a function or constant from `head = body`.
    ///
    /// The head is a function name followed by distinct parameter variables,
    /// e.g. `f(x, y)`, or a bare name for a constant. The function becomes an
    /// operator of the grammar, and an untyped rule rewriting the head into
    /// the body is added to the elimination rules.
    ///
    /// Defining a name again with the same number of parameters replaces the
    /// earlier definition. A different number of parameters adds an
    /// overload.
    ///
    /// # Errors
    /// - `MissingDefinitionOperator` without `=`.
    /// - `Parse` if either side does not parse.
    /// - `InvalidName` if the first token is not made of letters.
    /// - `BuiltinRedefinition` for names of native functions.
    /// - `NotAFunction`, `ParametersNotVariables`, `ParametersNotDistinct` for
    ///   malformed heads.
    /// - `Recursive` if the body applies the function being defined.
    /// - `Context` if the operator table is full.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{config::Config, interpreter::session::Session};
    ///
    /// let mut session = Session::new(Config::default());
    /// let f = session.define("f(x) = x + c").unwrap();
    /// let c = session.define("c = 10").unwrap();
    ///
    /// assert_eq!(f.arity, 1);
    /// assert_eq!(c.bound_constants, 1);
    /// assert_eq!(session.evaluate("f(1)").unwrap(), 11.0);
    /// ```
    pub fn define(&mut self, text: &str) -> Result<Definition, DefinitionError> {
        let Some((head_text, body_text)) = text.split_once(DEFINITION_OPERATOR) else {
            return Err(DefinitionError::MissingDefinitionOperator);
        };

        let name = match tokenize(&self.ctx, head_text).into_iter().next() {
            None => {
                return Err(DefinitionError::Parse { side:   Side::Left,
                                                    source: ParseError::Empty, });
            },
            Some(Token::Text(name)) if name.chars().all(char::is_alphabetic) => name,
            Some(token) => {
                return Err(DefinitionError::InvalidName { name: token.to_string() });
            },
        };
        if self.ctx
               .operators()
               .any(|op| op.name == name && op.eval.is_some())
        {
            return Err(DefinitionError::BuiltinRedefinition { name });
        }

        // Both sides are parsed in a scratch grammar that knows the name as a
        // function of any arity. Descriptors are shared, so nodes resolved to
        // existing operators stay valid in the real grammar.
        let mut scratch = self.ctx.clone();
        let (_, tentative) = scratch.register_shared(Operator::composite(&name, Arity::Dynamic))?;

        let head = parse(&scratch, head_text).map_err(|source| DefinitionError::Parse { side: Side::Left,
                                                                                       source })?;
        let (head_op, params) = split_head(head)?;

        let body = parse(&scratch, body_text).map_err(|source| DefinitionError::Parse { side: Side::Right,
                                                                                       source })?;
        if body.references(&tentative) || body.references(&head_op) {
            return Err(DefinitionError::Recursive { name });
        }

        let arity = params.len();
        let redefinition = !Arc::ptr_eq(&head_op, &tentative);
        let op = if redefinition {
            head_op
        } else {
            self.ctx
                .register_shared(Operator::composite(&name, Arity::Fixed(arity)))?
                .1
        };
        let head = Node::operator(op, params);

        let bound_constants = if arity == 0 {
            self.bind_constant(&name, &head)
        } else {
            0
        };

        let rule = RewriteRule::new(head, body);
        debug!(rule = %rule, redefinition, "defined");
        if redefinition {
            self.replace_composite(rule);
        } else {
            self.composites.push(rule);
        }

        Ok(Definition { name,
                        arity,
                        redefinition,
                        bound_constants })
    }

    /// Replaces free occurrences of `name` in the bodies of earlier
    /// definitions by the constant `head`.
    fn bind_constant(&mut self, name: &str, head: &Node) -> usize {
        let mut bound = 0;
        for rule in &mut self.composites {
            if rule.before().contains_variable(name) {
                continue;
            }
            if rule.after_mut()
                   .substitute_variable(name, Scope::RuleBound, head)
               > 0
            {
                bound += 1;
            }
        }
        if bound > 0 {
            debug!(name, bound, "bound constant in earlier definitions");
        }
        bound
    }

    fn replace_composite(&mut self, rule: RewriteRule) {
        let Node::Operator { op, .. } = rule.before() else {
            self.composites.push(rule);
            return;
        };
        let dependents = self.composites
                             .iter()
                             .filter(|other| other.after().references(op))
                             .count();
        if dependents > 0 {
            warn!(name = %op.name,
                  dependents,
                  "redefinition affects other functions or constants");
        }

        let existing = self.composites.iter().position(|other| {
                                                 matches!(other.before(),
                                                          Node::Operator { op: own, .. }
                                                          if Arc::ptr_eq(own, op))
                                             });
        match existing {
            Some(index) => self.composites[index] = rule,
            None => self.composites.push(rule),
        }
    }
}

/// Checks that a parsed head is a function applied to distinct variables.
fn split_head(head: Node) -> Result<(Arc<Operator>, Vec<Node>), DefinitionError> {
    let Node::Operator { op, children } = head else {
        return Err(DefinitionError::NotAFunction);
    };
    if op.placement != Placement::Function {
        return Err(DefinitionError::NotAFunction);
    }

    let mut names: Vec<&str> = Vec::with_capacity(children.len());
    for child in &children {
        let Node::Variable { name, .. } = child else {
            return Err(DefinitionError::ParametersNotVariables);
        };
        if names.contains(&name.as_str()) {
            return Err(DefinitionError::ParametersNotDistinct);
        }
        names.push(name);
    }
    Ok((op, children))
}
