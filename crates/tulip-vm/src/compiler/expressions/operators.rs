//! Operator expressions

use super::Precedence;
use crate::compiler::context::LoadKind;
use crate::compiler::Compiler;
use crate::opcode::{inc_mode, OpCode};
use tulip_syntax::TokenKind;

impl<'src, 'i> Compiler<'src, 'i> {
    pub(super) fn unary(&mut self) {
        let operator = self.previous.kind;
        self.parse_precedence(Precedence::Unary);

        match operator {
            TokenKind::Minus => self.emit_op(OpCode::Negate),
            _ => self.emit_op(OpCode::Not),
        };
    }

    pub(super) fn binary(&mut self) {
        let operator = self.previous;
        let precedence = Precedence::of(operator);

        // `**` is right-associative
        if operator.kind == TokenKind::StarStar {
            self.parse_precedence(precedence);
        } else {
            self.parse_precedence(precedence.next());
        }

        let op = match operator.kind {
            TokenKind::Plus => OpCode::Add,
            TokenKind::Minus => OpCode::Subtract,
            TokenKind::Star => OpCode::Multiply,
            TokenKind::Slash => OpCode::Divide,
            TokenKind::StarStar => OpCode::Power,
            TokenKind::SlashUnderscore => OpCode::IntDivide,
            TokenKind::PercentPercent => OpCode::Percent,
            TokenKind::EqualEqual => OpCode::Equal,
            TokenKind::BangEqual => OpCode::NotEqual,
            TokenKind::Greater => OpCode::Greater,
            TokenKind::GreaterEqual => OpCode::GreaterEqual,
            TokenKind::Less => OpCode::Less,
            TokenKind::LessEqual => OpCode::LessEqual,
            _ => return,
        };
        self.emit_op(op);
    }

    /// `a && b` leaves `a` when it is falsy, otherwise `b`
    pub(super) fn and(&mut self) {
        let end = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.parse_precedence(Precedence::And);
        self.patch_jump(end);
    }

    /// `a || b` leaves `a` when it is truthy, otherwise `b`
    pub(super) fn or(&mut self) {
        let else_jump = self.emit_jump(OpCode::JumpIfFalse);
        let end = self.emit_jump(OpCode::Jump);
        self.patch_jump(else_jump);
        self.emit_op(OpCode::Pop);
        self.parse_precedence(Precedence::Or);
        self.patch_jump(end);
    }

    pub(super) fn prefix_increment(&mut self) {
        let decrement = self.previous.kind == TokenKind::MinusMinus;
        self.parse_precedence(Precedence::Call);
        self.emit_increment(decrement, false);
    }

    pub(super) fn postfix_increment(&mut self) {
        let decrement = self.previous.kind == TokenKind::MinusMinus;
        self.emit_increment(decrement, true);
    }

    /// Replace the load just emitted with the matching fused increment
    fn emit_increment(&mut self, decrement: bool, postfix: bool) {
        let len = self.chunk().len();
        let marker = match self.state.last_load.take() {
            Some(marker) if marker.offset + 1 == len => marker,
            _ => {
                self.error("Invalid increment target.");
                return;
            }
        };

        if let Some(name) = marker.const_name {
            self.emit_ax(OpCode::AssignConst, name as u32);
            return;
        }

        let mut mode = 0;
        if decrement {
            mode |= inc_mode::DECREMENT;
        }
        if postfix {
            mode |= inc_mode::POSTFIX;
        }

        self.chunk().truncate(marker.offset);
        match marker.kind {
            LoadKind::Local(slot) => self.emit_ab(OpCode::IncLocal, mode, slot),
            LoadKind::Upvalue(index) => self.emit_ab(OpCode::IncUpvalue, mode, index),
            LoadKind::Global(name) => self.emit_ab(OpCode::IncGlobal, mode, name),
            LoadKind::Field(name) => self.emit_ab(OpCode::IncField, mode, name),
            LoadKind::Index => self.emit_ax(OpCode::IncIndex, mode as u32),
        };
    }
}
