use std::{fmt, sync::Arc};

use ordered_float::OrderedFloat;

use crate::{
    interpreter::context::operator::{Associativity, Operator, Placement},
    util::num::format_constant,
};

/// Distinguishes variables typed by a user from variables introduced by the
/// pattern or template of a rewrite rule.
///
/// Substitution only replaces variables of the requested scope, so a user
/// variable named `x` is never confused with a rule's capture variable `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A variable written by a user.
    Free,
    /// A capture variable of a rewrite rule.
    RuleBound,
}

/// A node of an expression tree.
///
/// Every node exclusively owns its children, so `clone` produces a fully
/// independent deep copy and dropping the root frees the whole tree. Operator
/// descriptors are shared with the [`ParsingContext`] that defined them.
///
/// Equality is structural: two trees are equal when they have the same shape,
/// reference the same operator descriptors, hold equal constants and name the
/// same variables. Scope tags are ignored. Constants compare as
/// [`OrderedFloat`], so `NaN` equals `NaN` and equality is reflexive.
///
/// [`ParsingContext`]: crate::interpreter::context::ParsingContext
#[derive(Debug, Clone)]
pub enum Node {
    /// Application of an operator to its operands.
    Operator {
        /// The applied operator.
        op:       Arc<Operator>,
        /// The operands in source order; the length is the arity resolved when
        /// the node was built.
        children: Vec<Self>,
    },
    /// A numeric constant.
    Constant(f64),
    /// A named variable.
    Variable {
        /// The name as written.
        name:  String,
        /// Who introduced the variable.
        scope: Scope,
    },
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Operator { op: a, children: ac }, Self::Operator { op: b, children: bc }) => {
                Arc::ptr_eq(a, b) && ac == bc
            },
            (Self::Constant(a), Self::Constant(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Variable { name: a, .. }, Self::Variable { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Node {
    /// Creates a free variable node.
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self::Variable { name:  name.to_string(),
                         scope: Scope::Free, }
    }

    /// Creates an operator node.
    #[must_use]
    pub const fn operator(op: Arc<Operator>, children: Vec<Self>) -> Self {
        Self::Operator { op, children }
    }

    /// Returns `true` for constant nodes.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Returns `true` for variable nodes.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// Returns `true` for operator nodes.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator { .. })
    }

    /// Returns the children of an operator node, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Operator { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns the value of a constant node.
    #[must_use]
    pub const fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the subtree at `path`, where each entry selects a child index.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&Self> {
        let mut node = self;
        for &index in path {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// Mutable counterpart of [`Node::get`].
    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &index in path {
            node = match node {
                Self::Operator { children, .. } => children.get_mut(index)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Counts the nodes of the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Self::size).sum::<usize>()
    }

    /// Returns `true` if a variable called `name` occurs anywhere in the tree.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{config::Config, interpreter::{context::ParsingContext, parser::parse}};
    ///
    /// let ctx = ParsingContext::arithmetic(Config::default());
    /// let tree = parse(&ctx, "2*sin(x)").unwrap();
    ///
    /// assert!(tree.contains_variable("x"));
    /// assert!(!tree.contains_variable("y"));
    /// ```
    #[must_use]
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Self::Variable { name: own, .. } => own == name,
            Self::Constant(_) => false,
            Self::Operator { children, .. } => children.iter().any(|c| c.contains_variable(name)),
        }
    }

    /// Returns `true` if the tree contains no variable nodes.
    #[must_use]
    pub fn is_variable_free(&self) -> bool {
        match self {
            Self::Variable { .. } => false,
            Self::Constant(_) => true,
            Self::Operator { children, .. } => children.iter().all(Self::is_variable_free),
        }
    }

    /// Returns `true` if any operator node in the tree applies an operator
    /// with the given name.
    #[must_use]
    pub fn contains_operator(&self, name: &str) -> bool {
        match self {
            Self::Operator { op, children } => {
                op.name == name || children.iter().any(|c| c.contains_operator(name))
            },
            _ => false,
        }
    }

    /// Returns `true` if the tree applies exactly this operator descriptor.
    #[must_use]
    pub fn references(&self, operator: &Arc<Operator>) -> bool {
        match self {
            Self::Operator { op, children } => {
                Arc::ptr_eq(op, operator) || children.iter().any(|c| c.references(operator))
            },
            _ => false,
        }
    }

    /// Sets the scope of every variable in the tree.
    pub fn retag(&mut self, scope: Scope) {
        match self {
            Self::Variable { scope: own, .. } => *own = scope,
            Self::Constant(_) => {},
            Self::Operator { children, .. } => {
                for child in children {
                    child.retag(scope);
                }
            },
        }
    }

    /// Replaces every variable named `name` with scope `scope` by a copy of
    /// `replacement`.
    ///
    /// # Returns
    /// The number of substitutions performed.
    ///
    /// # Example
    /// ```
    /// use exprewrite::{
    ///     ast::{Node, Scope},
    ///     config::Config,
    ///     interpreter::{context::ParsingContext, parser::parse},
    /// };
    ///
    /// let ctx = ParsingContext::arithmetic(Config::default());
    /// let mut tree = parse(&ctx, "x*x+y").unwrap();
    ///
    /// let count = tree.substitute_variable("x", Scope::Free, &Node::Constant(3.0));
    ///
    /// assert_eq!(count, 2);
    /// assert_eq!(tree.to_string(), "3*3+y");
    /// ```
    pub fn substitute_variable(&mut self, name: &str, scope: Scope, replacement: &Self) -> usize {
        match self {
            Self::Variable { name: own, scope: own_scope } if own == name && *own_scope == scope => {
                *self = replacement.clone();
                1
            },
            Self::Operator { children, .. } => children.iter_mut()
                                                       .map(|c| {
                                                           c.substitute_variable(name,
                                                                                 scope,
                                                                                 replacement)
                                                       })
                                                       .sum(),
            _ => 0,
        }
    }

    /// Renders the tree with a custom constant printer.
    ///
    /// Infix operands are parenthesized only where precedence or
    /// associativity would otherwise change the parse.
    #[must_use]
    pub fn render(&self, printer: fn(f64) -> String) -> String {
        let mut out = String::new();
        self.render_into(&mut out, printer);
        out
    }

    fn render_into(&self, out: &mut String, printer: fn(f64) -> String) {
        match self {
            Self::Constant(value) => out.push_str(&printer(*value)),
            Self::Variable { name, .. } => out.push_str(name),
            Self::Operator { op, children } => match op.placement {
                Placement::Function => {
                    out.push_str(&op.name);
                    if children.is_empty() {
                        return;
                    }
                    out.push('(');
                    for (i, child) in children.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        child.render_into(out, printer);
                    }
                    out.push(')');
                },
                Placement::Prefix => {
                    out.push_str(&op.name);
                    if let Some(child) = children.first() {
                        let wrap = child.binds_looser_than(op, Side::Operand);
                        child.render_wrapped(out, printer, wrap);
                    }
                },
                Placement::Postfix => {
                    if let Some(child) = children.first() {
                        let wrap = child.binds_looser_than(op, Side::Operand);
                        child.render_wrapped(out, printer, wrap);
                    }
                    out.push_str(&op.name);
                },
                Placement::Infix => {
                    if let [left, right] = children.as_slice() {
                        left.render_wrapped(out, printer, left.binds_looser_than(op, Side::Left));
                        out.push_str(&op.name);
                        right.render_wrapped(out,
                                             printer,
                                             right.binds_looser_than(op, Side::Right));
                    }
                },
            },
        }
    }

    fn render_wrapped(&self, out: &mut String, printer: fn(f64) -> String, wrap: bool) {
        if wrap {
            out.push('(');
            self.render_into(out, printer);
            out.push(')');
        } else {
            self.render_into(out, printer);
        }
    }

    /// Decides whether `self`, printed as an operand of `parent`, needs
    /// parentheses to keep its grouping.
    fn binds_looser_than(&self, parent: &Operator, side: Side) -> bool {
        let child = match self {
            Self::Constant(value) => return value.is_sign_negative() && *value != 0.0,
            Self::Variable { .. } => return false,
            Self::Operator { op, .. } => op,
        };
        match (child.placement, side) {
            (Placement::Function, _) => false,
            (Placement::Postfix, Side::Left) => false,
            (Placement::Prefix, Side::Right) => false,
            (Placement::Prefix | Placement::Postfix, Side::Operand) => {
                parent.placement != child.placement && child.precedence <= parent.precedence
            },
            (Placement::Infix, Side::Operand) => true,
            (_, Side::Left) => {
                child.precedence < parent.precedence
                || (child.precedence == parent.precedence
                    && parent.associativity == Associativity::Right)
            },
            (_, Side::Right) => {
                child.precedence < parent.precedence
                || (child.precedence == parent.precedence
                    && parent.associativity != Associativity::Right)
            },
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
    Operand,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(format_constant))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}
