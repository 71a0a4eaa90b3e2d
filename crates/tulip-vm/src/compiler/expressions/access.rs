//! Calls, field access, indexing and slicing

use crate::compiler::context::{LoadKind, LoadMarker};
use crate::compiler::Compiler;
use crate::opcode::OpCode;
use tulip_syntax::TokenKind;

impl<'src, 'i> Compiler<'src, 'i> {
    pub(super) fn call(&mut self) {
        let argc = self.argument_list();
        self.emit_ax(OpCode::Call, argc);
    }

    fn argument_list(&mut self) -> u32 {
        let mut argc: u32 = 0;
        if !self.check(TokenKind::RightParen) {
            loop {
                self.expression();
                if argc == u8::MAX as u32 {
                    self.error("Can't have more than 255 arguments.");
                }
                argc += 1;
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after arguments.");
        argc
    }

    /// `obj.name` and `obj.name = value`
    pub(super) fn dot(&mut self, can_assign: bool) {
        self.consume(TokenKind::Identifier, "Expect property name after '.'.");
        let name = self.identifier_constant(self.previous.lexeme);

        if can_assign && self.match_token(TokenKind::Equal) {
            self.expression();
            self.emit_ax(OpCode::SetField, name as u32);
            return;
        }

        let offset = self.emit_ax(OpCode::GetField, name as u32);
        self.state.last_load = Some(LoadMarker {
            offset,
            kind: LoadKind::Field(name),
            const_name: None,
        });
    }

    /// `obj[i]`, `obj[i] = value`, and the slices `obj[lo:hi]`, `obj[lo:]`,
    /// `obj[:hi]`
    pub(super) fn index(&mut self, can_assign: bool) {
        if self.match_token(TokenKind::Colon) {
            self.emit_op(OpCode::Null);
            self.slice_upper_bound();
            return;
        }

        self.expression();
        if self.match_token(TokenKind::Colon) {
            self.slice_upper_bound();
            return;
        }
        self.consume(TokenKind::RightBracket, "Expect ']' after index.");

        if can_assign && self.match_token(TokenKind::Equal) {
            self.expression();
            self.emit_op(OpCode::SetIndex);
            return;
        }

        let offset = self.emit_op(OpCode::GetIndex);
        self.state.last_load = Some(LoadMarker {
            offset,
            kind: LoadKind::Index,
            const_name: None,
        });
    }

    fn slice_upper_bound(&mut self) {
        if self.check(TokenKind::RightBracket) {
            self.emit_op(OpCode::Null);
        } else {
            self.expression();
        }
        self.consume(TokenKind::RightBracket, "Expect ']' after slice.");
        self.emit_op(OpCode::Slice);
    }
}
