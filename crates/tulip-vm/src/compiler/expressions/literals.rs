//! Literal and grouping expressions

use crate::compiler::Compiler;
use crate::opcode::OpCode;
use crate::value::Value;
use tulip_syntax::{unescape, TokenKind};

impl<'src, 'i> Compiler<'src, 'i> {
    pub(super) fn number(&mut self) {
        match self.previous.lexeme.parse::<f64>() {
            Ok(n) => self.emit_constant(Value::Number(n)),
            Err(_) => self.error("Invalid number literal."),
        }
    }

    pub(super) fn string(&mut self) {
        let text = unescape(self.previous.lexeme);
        let value = self.interner.string(&text);
        self.emit_constant(value);
    }

    pub(super) fn literal(&mut self) {
        match self.previous.kind {
            TokenKind::True => self.emit_op(OpCode::True),
            TokenKind::False => self.emit_op(OpCode::False),
            _ => self.emit_op(OpCode::Null),
        };
    }

    pub(super) fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    /// `[a, b, ...]` (trailing comma allowed)
    pub(super) fn array_literal(&mut self) {
        let mut count: u32 = 0;
        while !self.check(TokenKind::RightBracket) && !self.check(TokenKind::Eof) {
            self.expression();
            count += 1;
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RightBracket, "Expect ']' after array elements.");
        self.emit_ax(OpCode::Array, count);
    }

    /// `{ key: value, ... }` with arbitrary key expressions
    pub(super) fn map_literal(&mut self) {
        let mut count: u32 = 0;
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.expression();
            self.consume(TokenKind::Colon, "Expect ':' after map key.");
            self.expression();
            count += 1;
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after map entries.");
        self.emit_ax(OpCode::Map, count);
    }
}
