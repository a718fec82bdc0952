use tracing::{debug, warn};

use crate::{
    error::{RuleFileError, Side},
    interpreter::{
        context::ParsingContext,
        parser::parse,
        rewrite::{rule::RewriteRule, ruleset::Ruleset},
    },
};

/// Marks a comment line.
pub const COMMENT_MARKER: char = '\'';
/// Starts a new named group of rules.
pub const RULESET_KEYWORD: &str = "Ruleset";
/// Separates the pattern from the replacement.
pub const RULE_ARROW: &str = " -> ";

/// Rulesets read from a rule file, with the errors of the malformed groups.
#[derive(Debug, Default)]
pub struct LoadedRules {
    /// The groups in file order. A group that failed keeps the rules read
    /// before the failing line.
    pub rulesets: Vec<Ruleset>,
    /// One error per failed group.
    pub errors:   Vec<RuleFileError>,
}

/// Reads rulesets from the text of a rule file.
///
/// One rule per line, `before -> after`. Lines starting with `'` and blank
/// lines are skipped. `Ruleset <name>` starts a new group; rules before the
/// first such line form an unnamed group. A malformed line records an error
/// and the remaining lines of its group are skipped. Rules read this way use
/// class sigils on their capture variables.
///
/// # Example
/// ```
/// use exprewrite::{
///     config::Config,
///     interpreter::{context::ParsingContext, rewrite::parse_rulesets},
/// };
///
/// let ctx = ParsingContext::arithmetic(Config::default());
/// let text = "' neutral elements\nRuleset neutral\nx+0 -> x\nx*1 -> x\n\nRuleset broken\nx+ -> x\n";
///
/// let loaded = parse_rulesets(&ctx, text);
///
/// assert_eq!(loaded.rulesets.len(), 2);
/// assert_eq!(loaded.rulesets[0].len(), 2);
/// assert_eq!(loaded.errors[0].line_number(), 7);
/// ```
pub fn parse_rulesets(ctx: &ParsingContext, text: &str) -> LoadedRules {
    let mut loaded = LoadedRules::default();
    let mut current = Ruleset::new(None);
    let mut skipping = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let number = index + 1;
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        if let Some(rest) = line.strip_prefix(RULESET_KEYWORD)
           && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let name = Some(rest.trim()).filter(|n| !n.is_empty())
                                        .map(str::to_string);
            let finished = std::mem::replace(&mut current, Ruleset::new(name));
            if finished.name.is_some() || !finished.is_empty() {
                loaded.rulesets.push(finished);
            }
            skipping = false;
            continue;
        }

        if skipping {
            continue;
        }
        match parse_rule(ctx, line, number) {
            Ok(rule) => current.push(rule),
            Err(e) => {
                warn!(error = %e, "skipping rest of ruleset");
                loaded.errors.push(e);
                skipping = true;
            },
        }
    }

    if current.name.is_some() || !current.is_empty() {
        loaded.rulesets.push(current);
    }
    debug!(rulesets = loaded.rulesets.len(),
           errors = loaded.errors.len(),
           "loaded rule file");
    loaded
}

/// Parses a single `before -> after` line into a typed rule.
///
/// # Errors
/// - `MissingArrow` if the separator is absent.
/// - `Parse` if either side does not parse.
pub fn parse_rule(ctx: &ParsingContext, line: &str, number: usize) -> Result<RewriteRule, RuleFileError> {
    let Some((before, after)) = line.split_once(RULE_ARROW) else {
        return Err(RuleFileError::MissingArrow { line: number });
    };
    let before = parse(ctx, before).map_err(|source| RuleFileError::Parse { line: number,
                                                                             side: Side::Left,
                                                                             source })?;
    let after = parse(ctx, after).map_err(|source| RuleFileError::Parse { line: number,
                                                                           side: Side::Right,
                                                                           source })?;
    Ok(RewriteRule::new(before, after).with_classes(true))
}
