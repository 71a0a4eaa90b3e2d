//! Token definitions

use std::fmt;

/// Lexeme class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ===== Punctuation =====
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Pipe,

    // ===== Operators =====
    Plus,
    PlusPlus,
    Minus,
    MinusMinus,
    Star,
    StarStar,
    Slash,
    SlashUnderscore,
    PercentPercent,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    AndAnd,
    OrOr,

    // ===== Literals =====
    Identifier,
    String,
    Number,

    // ===== Keywords =====
    Let,
    Const,
    Function,
    Return,
    If,
    Else,
    While,
    For,
    Iter,
    In,
    Break,
    Continue,
    Struct,
    True,
    False,
    Null,

    // ===== Special =====
    /// Scanner error; the lexeme carries the message
    Error,
    Eof,
}

impl TokenKind {
    /// Keyword lookup for an identifier lexeme
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "iter" => TokenKind::Iter,
            "in" => TokenKind::In,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "struct" => TokenKind::Struct,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// Tokens that begin a statement; panic-mode recovery stops in front of them
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Struct
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Iter
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
        )
    }

    pub fn is_keyword(self) -> bool {
        self.starts_statement()
            || matches!(
                self,
                TokenKind::Else
                    | TokenKind::In
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
            )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A scanned token borrowing its lexeme from the source text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub line: usize,
    /// A line break separated this token from the previous one
    pub newline_before: bool,
}

impl<'src> Token<'src> {
    /// Placeholder used before the first token is scanned
    pub fn synthetic(lexeme: &'src str) -> Self {
        Self {
            kind: TokenKind::Error,
            lexeme,
            line: 0,
            newline_before: false,
        }
    }
}
