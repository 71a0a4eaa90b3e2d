//! Control flow compilation
//!
//! Conditions leave their value on the stack: `JumpIfFalse` does not pop,
//! so both the taken and the fall-through path start with a `Pop`.

use super::context::LoopContext;
use super::Compiler;
use crate::opcode::OpCode;
use tulip_syntax::TokenKind;

/// Name of the hidden local holding an `iter` loop's iterator
const ITERATOR_SLOT_NAME: &str = "(iter)";

impl<'src, 'i> Compiler<'src, 'i> {
    /// `if (c) s | (c) s ... else s`
    pub(crate) fn if_statement(&mut self) {
        let mut end_jumps = Vec::new();

        self.condition("if");
        end_jumps.push(self.guarded_branch());

        while self.match_token(TokenKind::Pipe) {
            self.condition("'|'");
            end_jumps.push(self.guarded_branch());
        }

        if self.match_token(TokenKind::Else) {
            self.statement();
        }

        for jump in end_jumps {
            self.patch_jump(jump);
        }
    }

    fn condition(&mut self, after: &str) {
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {}.", after));
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after condition.");
    }

    /// Branch body guarded by the condition on the stack; returns the jump
    /// to the end of the whole chain
    fn guarded_branch(&mut self) -> usize {
        let skip = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.statement();
        let end = self.emit_jump(OpCode::Jump);
        self.patch_jump(skip);
        self.emit_op(OpCode::Pop);
        end
    }

    pub(crate) fn while_statement(&mut self) {
        let loop_start = self.chunk().len();
        self.condition("while");

        let exit = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.loop_body(loop_start);
        self.emit_loop(loop_start);

        self.patch_jump(exit);
        self.emit_op(OpCode::Pop);
        self.finish_loop();
    }

    /// `for (init; cond; step) body`; the init binding lives in its own
    /// scope around the loop
    pub(crate) fn for_statement(&mut self) {
        self.begin_scope();
        self.consume(TokenKind::LeftParen, "Expect '(' after for.");

        if self.match_token(TokenKind::Semicolon) {
            // No initializer
        } else if self.match_token(TokenKind::Let) {
            self.for_initializer();
        } else {
            self.expression();
            self.emit_op(OpCode::Pop);
            self.consume(TokenKind::Semicolon, "Expect ';' after loop initializer.");
        }

        let mut loop_start = self.chunk().len();
        let mut exit = None;
        if !self.match_token(TokenKind::Semicolon) {
            self.expression();
            self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.");
            exit = Some(self.emit_jump(OpCode::JumpIfFalse));
            self.emit_op(OpCode::Pop);
        }

        if !self.match_token(TokenKind::RightParen) {
            let body_jump = self.emit_jump(OpCode::Jump);
            let step_start = self.chunk().len();
            self.expression();
            self.emit_op(OpCode::Pop);
            self.consume(TokenKind::RightParen, "Expect ')' after for clauses.");

            self.emit_loop(loop_start);
            loop_start = step_start;
            self.patch_jump(body_jump);
        }

        self.loop_body(loop_start);
        self.emit_loop(loop_start);

        if let Some(exit) = exit {
            self.patch_jump(exit);
            self.emit_op(OpCode::Pop);
        }
        self.finish_loop();
        self.end_scope();
    }

    fn for_initializer(&mut self) {
        self.consume(TokenKind::Identifier, "Expect variable name.");
        let name = self.previous.lexeme;
        if let Err(message) = self.state.symbols.declare(name, false) {
            self.error(message);
        }

        if self.match_token(TokenKind::Equal) {
            self.expression();
        } else {
            self.emit_op(OpCode::Null);
        }
        self.state.symbols.mark_initialized();
        self.consume(TokenKind::Semicolon, "Expect ';' after loop initializer.");
    }

    /// `iter (let x in e) body`: `e` is evaluated once into an iterator held
    /// in a hidden local; `x` is a fresh binding on every iteration
    pub(crate) fn iter_statement(&mut self) {
        self.begin_scope();
        self.consume(TokenKind::LeftParen, "Expect '(' after iter.");
        self.consume(TokenKind::Let, "Expect 'let' in iter loop.");
        self.consume(TokenKind::Identifier, "Expect loop variable name.");
        let item = self.previous.lexeme;
        self.consume(TokenKind::In, "Expect 'in' after loop variable.");

        self.expression();
        self.emit_op(OpCode::IterInit);
        if let Err(message) = self.state.symbols.declare(ITERATOR_SLOT_NAME, false) {
            self.error(message);
        }
        self.state.symbols.mark_initialized();
        let iterator_slot = (self.state.symbols.len() - 1) as u32;
        self.consume(TokenKind::RightParen, "Expect ')' after iter clause.");

        let loop_start = self.chunk().len();
        self.emit_ax(OpCode::IterHasNext, iterator_slot);
        let exit = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);

        self.state.loops.push(LoopContext {
            continue_target: loop_start,
            scope_depth: self.state.symbols.scope_depth(),
            breaks: Vec::new(),
        });

        self.begin_scope();
        self.emit_ax(OpCode::IterNext, iterator_slot);
        if let Err(message) = self.state.symbols.declare(item, false) {
            self.error(message);
        }
        self.state.symbols.mark_initialized();
        self.statement();
        self.end_scope();
        self.emit_loop(loop_start);

        self.patch_jump(exit);
        self.emit_op(OpCode::Pop);
        self.finish_loop();
        self.end_scope();
    }

    fn loop_body(&mut self, continue_target: usize) {
        self.state.loops.push(LoopContext {
            continue_target,
            scope_depth: self.state.symbols.scope_depth(),
            breaks: Vec::new(),
        });
        self.statement();
    }

    /// Pop the innermost loop and land its breaks here
    fn finish_loop(&mut self) {
        if let Some(finished) = self.state.loops.pop() {
            for jump in finished.breaks {
                self.patch_jump(jump);
            }
        }
    }

    pub(crate) fn break_statement(&mut self) {
        let Some(depth) = self.state.loops.last().map(|l| l.scope_depth) else {
            self.error("Can't use 'break' outside of a loop.");
            return;
        };

        self.discard_locals_above(depth);
        let jump = self.emit_jump(OpCode::Jump);
        if let Some(innermost) = self.state.loops.last_mut() {
            innermost.breaks.push(jump);
        }
        self.match_token(TokenKind::Semicolon);
    }

    pub(crate) fn continue_statement(&mut self) {
        let Some((depth, target)) = self
            .state
            .loops
            .last()
            .map(|l| (l.scope_depth, l.continue_target))
        else {
            self.error("Can't use 'continue' outside of a loop.");
            return;
        };

        self.discard_locals_above(depth);
        self.emit_loop(target);
        self.match_token(TokenKind::Semicolon);
    }
}
