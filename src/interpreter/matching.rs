/// Structural matching and pattern search.
///
/// Contains the backtracking matcher, the [`Matching`] bindings type and the
/// pre-order search over all positions of a tree.
pub mod core;

/// Pattern variable classes.
///
/// Maps the sigil letter of a capture variable to the kinds of nodes it may
/// bind.
pub mod class;

/// Side conditions on matchings.
pub mod filter;

pub use self::{
    core::{
        Binding, MatchSite, Matching, Pattern, count_matchings, find_all_matchings, find_matching,
        match_at,
    },
    filter::{EvenConstant, Filter, Independent},
};
