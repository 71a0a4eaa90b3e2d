//! Function bodies and closures

use crate::compiler::context::FunctionKind;
use crate::compiler::Compiler;
use crate::opcode::OpCode;
use crate::value::Value;
use std::rc::Rc;
use tulip_syntax::TokenKind;

impl<'src, 'i> Compiler<'src, 'i> {
    /// Anonymous `function (params) { ... }` in expression position
    pub(super) fn lambda(&mut self) {
        self.function(FunctionKind::Function, None);
    }

    /// Compile parameters and body as a nested function, then emit the
    /// closure that captures its upvalues
    pub(crate) fn function(&mut self, kind: FunctionKind, name: Option<&str>) {
        let name = name.map(|n| self.interner.intern(n));
        self.begin_function(kind, name);
        self.begin_scope();

        self.consume(TokenKind::LeftParen, "Expect '(' after function name.");
        if !self.check(TokenKind::RightParen) {
            loop {
                if self.state.function.arity == u8::MAX {
                    self.error_at_current("Can't have more than 255 parameters.");
                } else {
                    self.state.function.arity += 1;
                }

                self.consume(TokenKind::Identifier, "Expect parameter name.");
                let param = self.previous.lexeme;
                if let Err(message) = self.state.symbols.declare(param, false) {
                    self.error(message);
                }
                self.state.symbols.mark_initialized();

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.");
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.");
        self.block();

        let function = self.end_function();
        let index = self.make_constant(Value::Function(Rc::new(function)));
        self.emit_ax(OpCode::Closure, index);
    }
}
