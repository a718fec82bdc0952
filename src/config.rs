/// Default capacity of the operator table.
pub const MAX_OPERATORS: usize = 128;
/// Default maximum number of tokens accepted for a single expression.
pub const MAX_TOKENS: usize = 1000;
/// Default maximum height of the parser's operand and frame stacks.
pub const MAX_DEPTH: usize = 256;
/// Default maximum number of operands a single operator node may receive.
pub const MAX_CHILDREN: usize = 64;
/// Default number of rule applications after which a ruleset pass stops.
pub const REWRITE_CEILING: usize = 1000;

/// Limits and tunables shared by the parser and the rewrite engine.
///
/// The grammar itself does not bound nesting, so every entry point that walks
/// a tree recursively relies on these limits to keep stack usage finite.
///
/// # Example
/// ```
/// use exprewrite::config::Config;
///
/// let config = Config::default().with_rewrite_ceiling(10)
///                               .with_max_tokens(50);
///
/// assert_eq!(config.rewrite_ceiling, 10);
/// assert_eq!(config.max_tokens, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Capacity of the operator table.
    pub max_operators:   usize,
    /// Maximum number of tokens per parsed expression.
    pub max_tokens:      usize,
    /// Maximum height of the parser stacks.
    pub max_depth:       usize,
    /// Maximum number of children of one operator node.
    pub max_children:    usize,
    /// Iteration ceiling of a ruleset pass.
    pub rewrite_ceiling: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_operators:   MAX_OPERATORS,
               max_tokens:      MAX_TOKENS,
               max_depth:       MAX_DEPTH,
               max_children:    MAX_CHILDREN,
               rewrite_ceiling: REWRITE_CEILING, }
    }
}

impl Config {
    /// Sets the operator table capacity.
    #[must_use]
    pub const fn with_max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators;
        self
    }

    /// Sets the token limit per expression.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the parser stack height limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the operand limit per operator node.
    #[must_use]
    pub const fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    /// Sets the ruleset iteration ceiling.
    #[must_use]
    pub const fn with_rewrite_ceiling(mut self, rewrite_ceiling: usize) -> Self {
        self.rewrite_ceiling = rewrite_ceiling;
        self
    }
}
