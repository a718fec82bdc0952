/// Core parsing routines.
///
/// Contains the token loop of the shunting-yard algorithm and the public
/// entry points [`parse`] and [`parse_tokens`].
pub mod core;

/// Parser stacks.
///
/// Holds the operand stack and the frame stack of one parse, together with
/// the reduction step that turns a frame into an operator node.
pub mod state;

pub use self::core::{ParseResult, parse, parse_tokens};
