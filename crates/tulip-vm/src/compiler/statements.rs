//! Declaration and statement compilation

use super::context::FunctionKind;
use super::Compiler;
use crate::opcode::OpCode;
use tulip_syntax::TokenKind;

impl<'src, 'i> Compiler<'src, 'i> {
    pub(crate) fn declaration(&mut self) {
        if self.match_token(TokenKind::Let) {
            self.var_declaration(false);
        } else if self.match_token(TokenKind::Const) {
            self.var_declaration(true);
        } else if self.check(TokenKind::Function) && self.peek_kind() == TokenKind::Identifier {
            self.advance();
            self.fun_declaration();
        } else if self.match_token(TokenKind::Struct) {
            self.struct_declaration();
        } else {
            self.statement();
        }

        if self.panic_mode {
            self.synchronize();
        }
    }

    fn var_declaration(&mut self, is_const: bool) {
        let global = self.parse_variable("Expect variable name.", is_const);

        if self.match_token(TokenKind::Equal) {
            self.expression();
        } else if is_const {
            self.error("Const declaration requires an initializer.");
        } else {
            self.emit_op(OpCode::Null);
        }

        self.define_variable(global, is_const);
        self.match_token(TokenKind::Semicolon);
    }

    fn fun_declaration(&mut self) {
        let global = self.parse_variable("Expect function name.", false);
        let name = self.previous.lexeme;
        // Locals are usable inside their own body for recursion
        self.state.symbols.mark_initialized();
        self.function(FunctionKind::Function, Some(name));
        self.define_variable(global, false);
    }

    fn struct_declaration(&mut self) {
        let global = self.parse_variable("Expect struct name.", false);
        let name = self.identifier_constant(self.previous.lexeme);
        self.consume(TokenKind::LeftBrace, "Expect '{' after struct name.");

        let mut field_count: usize = 0;
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.consume(TokenKind::Identifier, "Expect field name.");
            let field = self.identifier_constant(self.previous.lexeme);
            self.emit_ax(OpCode::Constant, field as u32);

            if self.match_token(TokenKind::Equal) {
                self.expression();
            } else {
                self.emit_op(OpCode::Null);
            }

            field_count += 1;
            if field_count > u8::MAX as usize {
                self.error("Can't have more than 255 fields.");
            }

            if !self.match_token(TokenKind::Comma) && !self.match_token(TokenKind::Semicolon) {
                break;
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after struct body.");
        self.emit_ab(OpCode::StructType, field_count.min(u8::MAX as usize) as u8, name);
        self.define_variable(global, false);
        self.match_token(TokenKind::Semicolon);
    }

    /// Consume a binding name: a global name constant at top level,
    /// otherwise a new (uninitialized) local
    fn parse_variable(&mut self, message: &str, is_const: bool) -> Option<u16> {
        self.consume(TokenKind::Identifier, message);

        if self.state.symbols.scope_depth() > 0 {
            let name = self.previous.lexeme;
            if let Err(message) = self.state.symbols.declare(name, is_const) {
                self.error(message);
            }
            return None;
        }

        Some(self.identifier_constant(self.previous.lexeme))
    }

    fn define_variable(&mut self, global: Option<u16>, is_const: bool) {
        match global {
            Some(name) => {
                self.emit_ab(OpCode::DefineGlobal, is_const as u8, name);
            }
            None => self.state.symbols.mark_initialized(),
        }
    }

    pub(crate) fn statement(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        self.statement_body();
        self.exit_nesting();
    }

    fn statement_body(&mut self) {
        if self.match_token(TokenKind::If) {
            self.if_statement();
        } else if self.match_token(TokenKind::While) {
            self.while_statement();
        } else if self.match_token(TokenKind::For) {
            self.for_statement();
        } else if self.match_token(TokenKind::Iter) {
            self.iter_statement();
        } else if self.match_token(TokenKind::Break) {
            self.break_statement();
        } else if self.match_token(TokenKind::Continue) {
            self.continue_statement();
        } else if self.match_token(TokenKind::Return) {
            self.return_statement();
        } else if self.match_token(TokenKind::LeftBrace) {
            self.begin_scope();
            self.block();
            self.end_scope();
        } else {
            self.expression_statement();
        }
    }

    pub(crate) fn block(&mut self) {
        if !self.enter_nesting() {
            return;
        }
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.declaration();
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.");
        self.exit_nesting();
    }

    fn expression_statement(&mut self) {
        self.expression();
        self.match_token(TokenKind::Semicolon);

        if self.state.kind == FunctionKind::Script {
            self.emit_op(OpCode::PopResult);
        } else {
            self.emit_op(OpCode::Pop);
        }
    }

    fn return_statement(&mut self) {
        if self.state.kind == FunctionKind::Script {
            self.error("Can't return from top-level code.");
        }

        let bare = self.current.newline_before
            || matches!(
                self.current.kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
            );

        if bare {
            self.emit_op(OpCode::Null);
        } else {
            self.expression();
        }
        self.match_token(TokenKind::Semicolon);
        self.emit_op(OpCode::Return);
    }
}
