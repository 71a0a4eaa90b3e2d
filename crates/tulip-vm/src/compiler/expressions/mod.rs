//! Expression compilation (precedence climbing)

mod access;
mod functions;
mod literals;
mod operators;
mod structs;
mod variables;

use super::Compiler;
use tulip_syntax::{Token, TokenKind};

/// Binding power, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Exponent,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    /// One level tighter, for left-associative operands
    pub(crate) fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Exponent,
            Precedence::Exponent => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }

    /// Infix binding power of a token; postfix `++`/`--` never continue an
    /// expression onto a new line
    pub(crate) fn of(token: Token<'_>) -> Precedence {
        match token.kind {
            TokenKind::OrOr => Precedence::Or,
            TokenKind::AndAnd => Precedence::And,
            TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equality,
            TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star
            | TokenKind::Slash
            | TokenKind::SlashUnderscore
            | TokenKind::PercentPercent => Precedence::Factor,
            TokenKind::StarStar => Precedence::Exponent,
            TokenKind::LeftParen | TokenKind::Dot | TokenKind::LeftBracket => Precedence::Call,
            TokenKind::PlusPlus | TokenKind::MinusMinus if !token.newline_before => Precedence::Call,
            _ => Precedence::None,
        }
    }
}

impl<'src, 'i> Compiler<'src, 'i> {
    pub(crate) fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    pub(crate) fn parse_precedence(&mut self, precedence: Precedence) {
        if !self.enter_nesting() {
            return;
        }
        self.parse_operand(precedence);
        self.exit_nesting();
    }

    fn parse_operand(&mut self, precedence: Precedence) {
        self.advance();
        let can_assign = precedence <= Precedence::Assignment;
        if !self.prefix(self.previous.kind, can_assign) {
            self.error("Expect expression.");
            return;
        }

        while precedence <= Precedence::of(self.current) {
            self.advance();
            self.infix(self.previous.kind, can_assign);
        }

        if can_assign && self.match_token(TokenKind::Equal) {
            self.error("Invalid assignment target.");
        }
    }

    /// Dispatch a prefix rule; false if the token cannot start an expression
    fn prefix(&mut self, kind: TokenKind, can_assign: bool) -> bool {
        match kind {
            TokenKind::LeftParen => self.grouping(),
            TokenKind::LeftBracket => self.array_literal(),
            TokenKind::LeftBrace => self.map_literal(),
            TokenKind::Minus | TokenKind::Bang => self.unary(),
            TokenKind::PlusPlus | TokenKind::MinusMinus => self.prefix_increment(),
            TokenKind::Number => self.number(),
            TokenKind::String => self.string(),
            TokenKind::True | TokenKind::False | TokenKind::Null => self.literal(),
            TokenKind::Identifier => self.variable(can_assign),
            TokenKind::Function => self.lambda(),
            _ => return false,
        }
        true
    }

    fn infix(&mut self, kind: TokenKind, can_assign: bool) {
        match kind {
            TokenKind::LeftParen => self.call(),
            TokenKind::Dot => self.dot(can_assign),
            TokenKind::LeftBracket => self.index(can_assign),
            TokenKind::AndAnd => self.and(),
            TokenKind::OrOr => self.or(),
            TokenKind::PlusPlus | TokenKind::MinusMinus => self.postfix_increment(),
            _ => self.binary(),
        }
    }
}
