/// The context module holds the grammar expressions are parsed under.
///
/// A [`ParsingContext`](context::ParsingContext) is an ordered table of
/// operator descriptors plus the glue operator and the numeric literal codec.
/// Lookup order, overload resolution and the lexer's keyword set all derive
/// from it.
///
/// # Responsibilities
/// - Registers prefix, infix, postfix and function operators.
/// - Resolves function overloads by argument count.
/// - Provides the default arithmetic grammar.
pub mod context;
/// The evaluator module reduces trees to numbers.
///
/// Operators are evaluated through their native functions after all
/// operands; variables may be supplied by the caller. Also folds
/// variable-free subtrees into constants.
pub mod evaluator;
/// The lexer module tokenizes source text against a grammar.
///
/// Numbers, letter runs, symbol runs, parentheses and commas are recognized
/// first; letter and symbol runs are then split by the longest matching
/// operator keyword.
pub mod lexer;
/// The matching module finds instances of a pattern tree.
///
/// # Responsibilities
/// - Binds pattern variables to subtrees, consistently across occurrences.
/// - Restricts variables by class sigils when asked to.
/// - Binds `name...` variables to runs of operands of dynamic-arity
///   operators.
/// - Rejects structural matches through side-condition filters.
pub mod matching;
/// The parser module builds expression trees from tokens.
///
/// A shunting-yard parser generalized to prefix, infix, postfix and function
/// operators, overloaded and variadic functions, omitted parentheses and
/// implicit operators between adjacent operands.
pub mod parser;
/// The rewrite module transforms trees by rules.
///
/// # Responsibilities
/// - Applies a single rule at its first match.
/// - Applies ordered rulesets to fixpoint under an iteration ceiling.
/// - Loads rulesets from rule files and runs the default simplification.
pub mod rewrite;
/// The session module ties a grammar to user definitions and rulesets.
///
/// It is the entry point for evaluating, simplifying and defining functions
/// and constants line by line.
pub mod session;
