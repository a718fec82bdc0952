use crate::{ast::Node, interpreter::lexer::MULTI_CAPTURE_SUFFIX};

/// Restricts what a pattern variable may bind to.
///
/// When classes are enabled for a pattern, the first letter of a variable
/// name with at least two letters selects the class:
///
/// | Sigil | Class                 | Example |
/// |-------|-----------------------|---------|
/// | `c`   | constant              | `cx`    |
/// | `b`   | constant or variable  | `bx`    |
/// | `d`   | operator or variable  | `dx`    |
/// | `o`   | operator              | `ox`    |
/// | `l`   | variable              | `lx`    |
///
/// Every other name, and every single-letter name, matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableClass {
    /// Matches any subtree.
    Any,
    /// Matches constant nodes.
    Constant,
    /// Matches constant and variable nodes.
    ConstantOrVariable,
    /// Matches operator and variable nodes.
    OperatorOrVariable,
    /// Matches operator nodes.
    Operator,
    /// Matches variable nodes.
    Variable,
}

impl VariableClass {
    /// Derives the class of a pattern variable from its name.
    ///
    /// # Example
    /// ```
    /// use exprewrite::interpreter::matching::class::VariableClass;
    ///
    /// assert_eq!(VariableClass::of("cx"), VariableClass::Constant);
    /// assert_eq!(VariableClass::of("c"), VariableClass::Any);
    /// assert_eq!(VariableClass::of("lrest..."), VariableClass::Variable);
    /// assert_eq!(VariableClass::of("xy"), VariableClass::Any);
    /// ```
    #[must_use]
    pub fn of(name: &str) -> Self {
        let name = name.strip_suffix(MULTI_CAPTURE_SUFFIX).unwrap_or(name);
        let mut chars = name.chars();
        let (Some(sigil), Some(_)) = (chars.next(), chars.next()) else {
            return Self::Any;
        };
        match sigil {
            'c' => Self::Constant,
            'b' => Self::ConstantOrVariable,
            'd' => Self::OperatorOrVariable,
            'o' => Self::Operator,
            'l' => Self::Variable,
            _ => Self::Any,
        }
    }

    /// Returns `true` if a variable of this class may bind to `node`.
    #[must_use]
    pub const fn admits(self, node: &Node) -> bool {
        match self {
            Self::Any => true,
            Self::Constant => node.is_constant(),
            Self::ConstantOrVariable => node.is_constant() || node.is_variable(),
            Self::OperatorOrVariable => node.is_operator() || node.is_variable(),
            Self::Operator => node.is_operator(),
            Self::Variable => node.is_variable(),
        }
    }
}

/// Returns `true` if `name` denotes a multi-capture variable such as `rest...`.
#[must_use]
pub fn is_multi_capture(name: &str) -> bool {
    name.len() > MULTI_CAPTURE_SUFFIX.len() && name.ends_with(MULTI_CAPTURE_SUFFIX)
}
