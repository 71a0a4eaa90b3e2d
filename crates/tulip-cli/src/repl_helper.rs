use nu_ansi_term::{Color, Style};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use tulip_syntax::{Scanner, TokenKind};

const KEYWORDS: &[&str] = &[
    "let", "const", "function", "return", "if", "else", "while", "for", "iter", "in", "break",
    "continue", "struct", "true", "false", "null",
];

/// Line editor support: keyword and builtin completion, token coloring
pub struct ReplHelper {
    words: Vec<String>,
}

impl ReplHelper {
    /// `globals` are the names offered for completion besides keywords
    pub fn new(globals: impl IntoIterator<Item = String>) -> Self {
        let mut words: Vec<String> = KEYWORDS.iter().map(|k| k.to_string()).collect();
        words.extend(globals);
        words.sort();
        words.dedup();
        Self { words }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let prefix = &head[start..];
        if prefix.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let candidates = self
            .words
            .iter()
            .filter(|word| word.starts_with(prefix))
            .map(|word| Pair {
                display: word.clone(),
                replacement: word.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(highlight_code(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, forced: bool) -> bool {
        forced
    }
}

impl Validator for ReplHelper {}

/// Color a line token by token; text between tokens is kept verbatim
pub fn highlight_code(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut copied = 0;

    for token in Scanner::new(line) {
        let Some(start) = offset_in(line, token.lexeme) else {
            continue;
        };
        if start < copied {
            continue;
        }
        out.push_str(&line[copied..start]);

        let style = match token.kind {
            kind if kind.is_keyword() => Color::Purple.bold(),
            TokenKind::String => Color::Green.normal(),
            TokenKind::Number => Color::Yellow.normal(),
            _ => Style::new(),
        };
        out.push_str(&style.paint(token.lexeme).to_string());
        copied = start + token.lexeme.len();
    }

    out.push_str(&line[copied..]);
    out
}

/// Byte offset of a lexeme that borrows from `source`
fn offset_in(source: &str, lexeme: &str) -> Option<usize> {
    let start = (lexeme.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
    (start + lexeme.len() <= source.len()).then_some(start)
}

/// Net `{` minus `}` over the tokens of `source`; braces inside strings and
/// comments do not count
pub fn brace_depth(source: &str) -> i32 {
    let mut depth = 0;
    for token in Scanner::new(source) {
        match token.kind {
            TokenKind::LeftBrace => depth += 1,
            TokenKind::RightBrace => {
                depth -= 1;
                if depth < 0 {
                    return depth;
                }
            }
            _ => {}
        }
    }
    depth
}
