use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::{
    ast::Node,
    interpreter::{
        context::operator::Arity,
        matching::{
            class::{VariableClass, is_multi_capture},
            filter::Filter,
        },
    },
};

/// One pattern variable and the subtrees it is bound to.
///
/// Single captures bind exactly one node; multi-captures bind a run of zero
/// or more sibling nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'p, 't> {
    /// The pattern variable name.
    pub name:  &'p str,
    /// The bound subtrees.
    pub nodes: &'t [Node],
}

/// The bindings of one successful match, borrowed from the pattern and the
/// candidate tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching<'p, 't> {
    bindings: Vec<Binding<'p, 't>>,
}

impl<'p, 't> Matching<'p, 't> {
    /// Returns the nodes bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'t [Node]> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.nodes)
    }

    /// Returns the node bound to `name` if exactly one node is bound.
    #[must_use]
    pub fn single(&self, name: &str) -> Option<&'t Node> {
        match self.get(name)? {
            [node] => Some(node),
            _ => None,
        }
    }

    /// Iterates over the bindings in the order the variables were first
    /// encountered in the pattern.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<'p, 't>> {
        self.bindings.iter()
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if the pattern had no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A pattern tree with its matching options.
#[derive(Clone, Copy)]
pub struct Pattern<'p> {
    /// The pattern tree; its variables are capture variables.
    pub tree:    &'p Node,
    /// Whether variable names carry class sigils.
    pub classes: bool,
    /// Side conditions every matching must satisfy.
    pub filters: &'p [Box<dyn Filter>],
}

impl<'p> Pattern<'p> {
    /// Creates an untyped pattern without filters.
    #[must_use]
    pub const fn new(tree: &'p Node) -> Self {
        Self { tree,
               classes: false,
               filters: &[] }
    }

    /// Enables or disables class sigils.
    #[must_use]
    pub const fn with_classes(mut self, classes: bool) -> Self {
        self.classes = classes;
        self
    }

    /// Attaches filters.
    #[must_use]
    pub const fn with_filters(mut self, filters: &'p [Box<dyn Filter>]) -> Self {
        self.filters = filters;
        self
    }

    fn class_of(&self, name: &str) -> VariableClass {
        if self.classes {
            VariableClass::of(name)
        } else {
            VariableClass::Any
        }
    }
}

/// A successful match at a position of the candidate tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSite<'p, 't> {
    /// Child indices leading from the root to the matched subtree.
    pub path:     Vec<usize>,
    /// The bindings.
    pub matching: Matching<'p, 't>,
}

type Bindings<'p, 't> = Vec<Binding<'p, 't>>;
type Continuation<'a, 'p, 't> = &'a mut dyn FnMut(&mut Bindings<'p, 't>) -> bool;

/// Matches `pattern` against `candidate` itself, without descending.
///
/// Alternatives arise only from multi-captures; they are tried with the
/// shortest leading capture first, and the first assignment accepted by all
/// filters wins.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{context::ParsingContext, matching::{Pattern, match_at}, parser::parse},
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let pattern = parse(&ctx, "x+x").unwrap();
///
/// let same = parse(&ctx, "3+3").unwrap();
/// let different = parse(&ctx, "3+4").unwrap();
///
/// assert!(match_at(&Pattern::new(&pattern), &same).is_some());
/// assert!(match_at(&Pattern::new(&pattern), &different).is_none());
/// ```
#[must_use]
pub fn match_at<'p, 't>(pattern: &Pattern<'p>, candidate: &'t Node) -> Option<Matching<'p, 't>> {
    let mut found = None;
    let mut bindings = Vec::new();
    let mut accept = |bindings: &mut Bindings<'p, 't>| {
        let matching = Matching { bindings: bindings.clone(), };
        if pattern.filters.iter().all(|f| f.accepts(&matching)) {
            found = Some(matching);
            true
        } else {
            trace!("filter rejected structural match");
            false
        }
    };
    match_node(pattern, pattern.tree, candidate, &mut bindings, &mut accept);
    found
}

/// Finds the first position, in pre-order, where `pattern` matches.
///
/// # Returns
/// The path to the matched subtree and its bindings, or `None`.
#[must_use]
pub fn find_matching<'p, 't>(pattern: &Pattern<'p>, tree: &'t Node) -> Option<MatchSite<'p, 't>> {
    let mut path = Vec::new();
    find_first(pattern, tree, &mut path)
}

fn find_first<'p, 't>(pattern: &Pattern<'p>,
                      node: &'t Node,
                      path: &mut Vec<usize>)
                      -> Option<MatchSite<'p, 't>> {
    if let Some(matching) = match_at(pattern, node) {
        return Some(MatchSite { path: path.clone(),
                                matching });
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        let found = find_first(pattern, child, path);
        path.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Finds every position where `pattern` matches, in pre-order, with one
/// matching per position.
#[must_use]
pub fn find_all_matchings<'p, 't>(pattern: &Pattern<'p>, tree: &'t Node) -> Vec<MatchSite<'p, 't>> {
    let mut sites = Vec::new();
    let mut path = Vec::new();
    find_all(pattern, tree, &mut path, &mut sites);
    sites
}

fn find_all<'p, 't>(pattern: &Pattern<'p>,
                    node: &'t Node,
                    path: &mut Vec<usize>,
                    sites: &mut Vec<MatchSite<'p, 't>>) {
    if let Some(matching) = match_at(pattern, node) {
        sites.push(MatchSite { path: path.clone(),
                               matching });
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        find_all(pattern, child, path, sites);
        path.pop();
    }
}

/// Counts the positions where `pattern` matches.
#[must_use]
pub fn count_matchings(pattern: &Pattern<'_>, tree: &Node) -> usize {
    find_all_matchings(pattern, tree).len()
}

/// Matches one pattern node and, on success, calls `k` with the extended
/// bindings. Returns what `k` returned; bindings added here are removed again
/// when `k` fails.
fn match_node<'p, 't>(pattern: &Pattern<'p>,
                      pat: &'p Node,
                      candidate: &'t Node,
                      bindings: &mut Bindings<'p, 't>,
                      k: Continuation<'_, 'p, 't>)
                      -> bool {
    match pat {
        Node::Variable { name, .. } => {
            if !pattern.class_of(name).admits(candidate) {
                return false;
            }
            bind(name, std::slice::from_ref(candidate), bindings, k)
        },
        Node::Constant(value) => match candidate {
            Node::Constant(other) if OrderedFloat(*value) == OrderedFloat(*other) => k(bindings),
            _ => false,
        },
        Node::Operator { op, children } => match candidate {
            Node::Operator { op: other,
                             children: candidates, }
                if Arc::ptr_eq(op, other) =>
            {
                let dynamic = op.arity == Arity::Dynamic;
                if !dynamic && children.len() != candidates.len() {
                    return false;
                }
                match_children(pattern, children, candidates, dynamic, bindings, k)
            },
            _ => false,
        },
    }
}

fn match_children<'p, 't>(pattern: &Pattern<'p>,
                          pats: &'p [Node],
                          candidates: &'t [Node],
                          dynamic: bool,
                          bindings: &mut Bindings<'p, 't>,
                          k: Continuation<'_, 'p, 't>)
                          -> bool {
    let Some((first, rest)) = pats.split_first() else {
        return candidates.is_empty() && k(bindings);
    };

    if dynamic
       && let Node::Variable { name, .. } = first
       && is_multi_capture(name)
    {
        let class = pattern.class_of(name);
        for split in 0..=candidates.len() {
            let (run, remaining) = candidates.split_at(split);
            if !run.iter().all(|node| class.admits(node)) {
                break;
            }
            let mut then = |b: &mut Bindings<'p, 't>| {
                match_children(pattern, rest, remaining, dynamic, b, k)
            };
            if bind(name, run, bindings, &mut then) {
                return true;
            }
        }
        return false;
    }

    let Some((head, tail)) = candidates.split_first() else {
        return false;
    };
    let mut then = |b: &mut Bindings<'p, 't>| match_children(pattern, rest, tail, dynamic, b, k);
    match_node(pattern, first, head, bindings, &mut then)
}

/// Binds `name` to `nodes`, or checks the nodes against an earlier binding
/// of the same name.
fn bind<'p, 't>(name: &'p str,
                nodes: &'t [Node],
                bindings: &mut Bindings<'p, 't>,
                k: Continuation<'_, 'p, 't>)
                -> bool {
    let bound = bindings.iter().find(|b| b.name == name).map(|b| b.nodes);
    if let Some(bound) = bound {
        return bound == nodes && k(bindings);
    }
    bindings.push(Binding { name, nodes });
    if k(bindings) {
        return true;
    }
    bindings.pop();
    false
}
