//! Variable references and assignment

use crate::compiler::context::{LoadKind, LoadMarker};
use crate::compiler::Compiler;
use crate::opcode::OpCode;
use tulip_syntax::{Token, TokenKind};

/// Where a name resolved to
enum Binding {
    Local { slot: u8, is_const: bool },
    Upvalue { index: u8, is_const: bool },
    Global { name: u16 },
}

impl<'src, 'i> Compiler<'src, 'i> {
    /// Identifier in expression position: a variable, or the type of a
    /// struct literal when directly followed by `{` or `!{`
    pub(super) fn variable(&mut self, can_assign: bool) {
        let name = self.previous;

        if self.check(TokenKind::LeftBrace) && !self.current.newline_before {
            self.named_variable(name, false);
            self.struct_literal(false);
            return;
        }

        if self.check(TokenKind::Bang) && self.peek_kind() == TokenKind::LeftBrace {
            self.advance();
            self.named_variable(name, false);
            self.struct_literal(true);
            return;
        }

        self.named_variable(name, can_assign);
    }

    fn resolve(&mut self, name: &'src str) -> Binding {
        match self.state.symbols.resolve(name) {
            Ok(Some(local)) => {
                return Binding::Local {
                    slot: local.slot,
                    is_const: local.is_const,
                }
            }
            Ok(None) => {}
            Err(message) => self.error(message),
        }

        match self.state.resolve_upvalue(name) {
            Ok(Some((index, is_const))) => return Binding::Upvalue { index, is_const },
            Ok(None) => {}
            Err(message) => self.error(message),
        }

        Binding::Global {
            name: self.identifier_constant(name),
        }
    }

    pub(super) fn named_variable(&mut self, token: Token<'src>, can_assign: bool) {
        let binding = self.resolve(token.lexeme);

        let (get, set, kind, is_const) = match binding {
            Binding::Local { slot, is_const } => (
                OpCode::GetLocal,
                OpCode::SetLocal,
                LoadKind::Local(slot as u16),
                is_const,
            ),
            Binding::Upvalue { index, is_const } => (
                OpCode::GetUpvalue,
                OpCode::SetUpvalue,
                LoadKind::Upvalue(index as u16),
                is_const,
            ),
            Binding::Global { name } => (
                OpCode::GetGlobal,
                OpCode::SetGlobal,
                LoadKind::Global(name),
                false,
            ),
        };
        let operand = match kind {
            LoadKind::Local(arg) | LoadKind::Upvalue(arg) | LoadKind::Global(arg) => arg as u32,
            LoadKind::Field(_) | LoadKind::Index => 0,
        };
        let const_name = if is_const {
            Some(self.identifier_constant(token.lexeme))
        } else {
            None
        };

        if can_assign && self.match_token(TokenKind::Equal) {
            self.expression();
            match const_name {
                Some(name) => self.emit_ax(OpCode::AssignConst, name as u32),
                None => self.emit_ax(set, operand),
            };
            return;
        }

        let offset = self.emit_ax(get, operand);
        self.state.last_load = Some(LoadMarker {
            offset,
            kind,
            const_name,
        });
    }
}
