//! On-demand scanner
//!
//! Produces tokens lazily from UTF-8 source. The scanner never fails: invalid
//! input becomes an [`TokenKind::Error`] token carrying the message, and
//! scanning carries on with the next character. After the last token a single
//! `Eof` is produced and the iterator ends.

use crate::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    /// Byte offset where the current lexeme starts
    start: usize,
    /// Byte offset of the next unread character
    current: usize,
    line: usize,
    newline_before: bool,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            newline_before: false,
            finished: false,
        }
    }

    /// Scan the next token. Keeps returning `Eof` once the input is exhausted.
    pub fn scan_token(&mut self) -> Token<'src> {
        self.newline_before = false;
        if let Err(message) = self.skip_whitespace() {
            return self.error_token(message);
        }

        self.start = self.current;
        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };

        if is_identifier_start(c) {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '+' => {
                let kind = if self.match_char('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                };
                self.make_token(kind)
            }
            '-' => {
                let kind = if self.match_char('-') {
                    TokenKind::MinusMinus
                } else {
                    TokenKind::Minus
                };
                self.make_token(kind)
            }
            '*' => {
                let kind = if self.match_char('*') {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                };
                self.make_token(kind)
            }
            '/' => {
                let kind = if self.match_char('_') {
                    TokenKind::SlashUnderscore
                } else {
                    TokenKind::Slash
                };
                self.make_token(kind)
            }
            '%' => {
                if self.match_char('%') {
                    self.make_token(TokenKind::PercentPercent)
                } else {
                    self.error_token("Unexpected character '%'. Did you mean '%%'?")
                }
            }
            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.make_token(kind)
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.make_token(kind)
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.make_token(kind)
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.make_token(kind)
            }
            '&' => {
                if self.match_char('&') {
                    self.make_token(TokenKind::AndAnd)
                } else {
                    self.error_token("Unexpected character '&'. Did you mean '&&'?")
                }
            }
            '|' => {
                let kind = if self.match_char('|') {
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                };
                self.make_token(kind)
            }
            '"' => self.string(),
            _ => self.error_token("Unexpected character."),
        }
    }

    // ===== Character helpers =====

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), &'static str> {
        loop {
            match self.peek() {
                Some('\n') => {
                    self.line += 1;
                    self.newline_before = true;
                    self.advance();
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.start = self.current;
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            None => return Err("Unterminated block comment."),
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some('\n') => {
                                self.line += 1;
                                self.newline_before = true;
                            }
                            Some(_) => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // ===== Token constructors =====

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[self.start..self.current],
            line: self.line,
            newline_before: self.newline_before,
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            line: self.line,
            newline_before: self.newline_before,
        }
    }

    // ===== Literals =====

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }
        let text = &self.source[self.start..self.current];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Fractional part needs a digit after the dot, so `a.b` style access
        // on a number literal is left to the compiler
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Token<'src> {
        let start_line = self.line;
        loop {
            match self.advance() {
                None => {
                    let mut token = self.error_token("Unterminated string.");
                    token.line = start_line;
                    return token;
                }
                Some('"') => break,
                Some('\n') => self.line += 1,
                Some('\\') => match self.advance() {
                    Some('n' | 't' | 'r' | '0' | '\\' | '"' | '\'') => {}
                    Some('\n') => self.line += 1,
                    Some(_) => {
                        // Finish the literal so scanning resumes after it
                        while !matches!(self.peek(), None | Some('"')) {
                            if self.advance() == Some('\n') {
                                self.line += 1;
                            }
                        }
                        self.advance();
                        return self.error_token("Invalid escape sequence in string.");
                    }
                    None => return self.error_token("Unterminated string."),
                },
                Some(_) => {}
            }
        }
        self.make_token(TokenKind::String)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.scan_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Convenience: scan the whole source into a vector (ends with `Eof`)
pub fn scan(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).collect()
}

/// Decode the escape sequences of a string literal's lexeme (quotes included)
pub fn unescape(lexeme: &str) -> String {
    let body = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && !c.is_whitespace())
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
