use std::sync::Arc;

use tracing::trace;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        context::{
            ParsingContext,
            operator::{Arity, Associativity, Operator, Placement},
        },
        parser::core::ParseResult,
    },
};

/// An operator waiting on the frame stack for its operands.
#[derive(Debug, Clone)]
pub struct OpFrame {
    /// The operator; for functions only a tentative overload until reduced.
    pub op:             Arc<Operator>,
    /// Whether delimiters and closing parentheses count operands for it.
    pub count_operands: bool,
    /// Number of operands to pop when the frame is reduced.
    pub count:          usize,
}

/// An entry of the frame stack.
#[derive(Debug, Clone)]
pub enum Frame {
    /// An opening parenthesis.
    Sentinel,
    /// A pending operator.
    Op(OpFrame),
}

/// The two stacks of the shunting-yard algorithm.
///
/// The state is local to one call of the parser, so parsing is re-entrant.
/// Dropping the state frees every partially built subtree.
pub struct ParserState<'c> {
    ctx:      &'c ParsingContext,
    operands: Vec<Node>,
    frames:   Vec<Frame>,
}

impl<'c> ParserState<'c> {
    /// Creates empty stacks for parsing under `ctx`.
    pub const fn new(ctx: &'c ParsingContext) -> Self {
        Self { ctx,
               operands: Vec::new(),
               frames: Vec::new() }
    }

    fn ensure_room<T>(stack: &mut Vec<T>, limit: usize) -> ParseResult<()> {
        if stack.len() >= limit {
            return Err(ParseError::StackExceeded { limit });
        }
        stack.try_reserve(1).map_err(|_| ParseError::OutOfMemory)
    }

    /// Pushes a finished subtree.
    pub fn push_operand(&mut self, node: Node) -> ParseResult<()> {
        Self::ensure_room(&mut self.operands, self.ctx.config().max_depth)?;
        self.operands.push(node);
        Ok(())
    }

    /// Pushes an opening parenthesis.
    pub fn push_sentinel(&mut self) -> ParseResult<()> {
        Self::ensure_room(&mut self.frames, self.ctx.config().max_depth)?;
        self.frames.push(Frame::Sentinel);
        Ok(())
    }

    /// Pushes an operator frame.
    ///
    /// Function frames start counting at zero; every other operator records
    /// its declared arity. Before an infix or postfix operator is pushed,
    /// every frame on top that binds at least as tightly is reduced.
    pub fn push_operator(&mut self, op: &Arc<Operator>) -> ParseResult<()> {
        let frame = match (op.placement, op.arity) {
            (Placement::Function, _) => OpFrame { op:             Arc::clone(op),
                                                  count_operands: true,
                                                  count:          0, },
            (_, Arity::Fixed(count)) => OpFrame { op: Arc::clone(op),
                                                  count_operands: false,
                                                  count },
            (_, Arity::Dynamic) => OpFrame { op:             Arc::clone(op),
                                             count_operands: false,
                                             count:          0, },
        };
        self.push_frame(frame)
    }

    /// Pushes the glue operator. Its operand count is fixed at two.
    pub fn push_glue(&mut self, glue: &Arc<Operator>) -> ParseResult<()> {
        self.push_frame(OpFrame { op:             Arc::clone(glue),
                                  count_operands: false,
                                  count:          2, })
    }

    fn push_frame(&mut self, frame: OpFrame) -> ParseResult<()> {
        if matches!(frame.op.placement, Placement::Infix | Placement::Postfix) {
            while let Some(Frame::Op(top)) = self.frames.last()
                  && yields_to(&frame.op, &top.op)
            {
                self.reduce_top()?;
            }
        }
        Self::ensure_room(&mut self.frames, self.ctx.config().max_depth)?;
        self.frames.push(Frame::Op(frame));
        Ok(())
    }

    /// Returns the top frame.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Returns the top frame if it is an operator frame.
    pub fn top_op_mut(&mut self) -> Option<&mut OpFrame> {
        match self.frames.last_mut() {
            Some(Frame::Op(frame)) => Some(frame),
            _ => None,
        }
    }

    /// Returns the frame directly below the top one.
    pub fn below_top_mut(&mut self) -> Option<&mut Frame> {
        let len = self.frames.len();
        len.checked_sub(2).and_then(|i| self.frames.get_mut(i))
    }

    /// Removes the top frame if it is an opening parenthesis.
    pub fn pop_sentinel(&mut self) -> bool {
        if matches!(self.frames.last(), Some(Frame::Sentinel)) {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Reduces operator frames until an opening parenthesis is on top.
    ///
    /// # Returns
    /// `true` if a parenthesis was reached, `false` if the stack ran empty.
    pub fn reduce_to_sentinel(&mut self) -> ParseResult<bool> {
        loop {
            match self.frames.last() {
                Some(Frame::Sentinel) => return Ok(true),
                Some(Frame::Op(_)) => self.reduce_top()?,
                None => return Ok(false),
            }
        }
    }

    /// Pops the top frame and builds an operator node from it.
    ///
    /// A function frame whose operand count differs from the declared arity
    /// is re-resolved to the overload taking that many operands, or to the
    /// dynamic-arity overload.
    ///
    /// # Errors
    /// - `ExcessOpeningParenthesis` if the top frame is a parenthesis.
    /// - `FunctionWrongArity` if no overload fits.
    /// - `ChildrenExceeded` if the operand count is above the limit.
    /// - `MissingOperand` if too few operands are available.
    pub fn reduce_top(&mut self) -> ParseResult<()> {
        let frame = match self.frames.pop() {
            Some(Frame::Op(frame)) => frame,
            Some(Frame::Sentinel) => return Err(ParseError::ExcessOpeningParenthesis),
            None => return Err(ParseError::MissingOperator),
        };

        let mut op = frame.op;
        if frame.count_operands && op.arity != Arity::Fixed(frame.count) {
            op = self.ctx
                     .lookup_function(&op.name, frame.count)
                     .cloned()
                     .ok_or_else(|| ParseError::FunctionWrongArity { name:  op.name.clone(),
                                                                     arity: frame.count, })?;
        }

        let limit = self.ctx.config().max_children;
        if frame.count > limit {
            return Err(ParseError::ChildrenExceeded { name: op.name.clone(),
                                                      limit });
        }
        let Some(split) = self.operands.len().checked_sub(frame.count) else {
            return Err(ParseError::MissingOperand);
        };
        let children = self.operands.split_off(split);

        trace!(operator = %op.name, operands = frame.count, "reduced frame");
        self.push_operand(Node::operator(op, children))
    }

    /// Reduces every remaining frame and returns the single finished tree.
    ///
    /// # Errors
    /// - `ExcessOpeningParenthesis` if a parenthesis is left open.
    /// - `Empty` if no operand was produced.
    /// - `MissingOperator` if more than one operand remains.
    pub fn finish(mut self) -> ParseResult<Node> {
        while !self.frames.is_empty() {
            self.reduce_top()?;
        }
        match self.operands.len() {
            0 => Err(ParseError::Empty),
            1 => self.operands.pop().ok_or(ParseError::Empty),
            _ => Err(ParseError::MissingOperator),
        }
    }
}

/// Decides whether the frame `top` must be reduced before `incoming` is
/// pushed.
fn yields_to(incoming: &Operator, top: &Operator) -> bool {
    incoming.precedence < top.precedence
    || (incoming.precedence == top.precedence
        && matches!(incoming.associativity, Associativity::Left | Associativity::Both))
}
