//! Struct literals

use crate::compiler::Compiler;
use crate::opcode::OpCode;
use tulip_syntax::TokenKind;

impl<'src, 'i> Compiler<'src, 'i> {
    /// `Type{field = value, ...}` with the type already on the stack.
    /// Forced literals (`Type!{...}`) skip the type's defaults.
    pub(super) fn struct_literal(&mut self, forced: bool) {
        self.consume(TokenKind::LeftBrace, "Expect '{' in struct literal.");

        let mut count: usize = 0;
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.consume(TokenKind::Identifier, "Expect field name in struct literal.");
            let field = self.identifier_constant(self.previous.lexeme);
            self.emit_ax(OpCode::Constant, field as u32);

            self.consume(TokenKind::Equal, "Expect '=' after field name.");
            self.expression();

            count += 1;
            if count > u8::MAX as usize {
                self.error("Can't have more than 255 fields.");
            }

            if !self.match_token(TokenKind::Comma) && !self.match_token(TokenKind::Semicolon) {
                break;
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after struct literal.");
        self.emit_ab(
            OpCode::Instance,
            count.min(u8::MAX as usize) as u8,
            forced as u16,
        );
    }
}
