//! Bytecode compiler (source to bytecode, single pass)
//!
//! The compiler pulls tokens from the scanner on demand and emits bytecode
//! as it parses; no syntax tree is built. Errors put the compiler in panic
//! mode: the first error of a statement is recorded, later ones are
//! suppressed until the parser resynchronizes at a statement boundary.
//! Any recorded error fails the whole unit.

use crate::bytecode::{Chunk, Function};
use crate::error::{CompileError, CompileErrors, ErrorSite};
use crate::opcode::{instruction::*, OpCode};
use crate::value::{Interner, Value};
use std::rc::Rc;
use tracing::debug;
use tulip_syntax::{Scanner, Token, TokenKind};

// Module structure
mod context;
mod control;
mod expressions;
mod statements;
pub(crate) mod symbols;

// Internal imports
use context::{FunctionKind, FunctionState};

/// Deepest combined statement and expression nesting the parser accepts
pub(crate) const MAX_NESTING: usize = 256;

/// Compile a standalone unit with its own interner
pub fn compile(source: &str) -> Result<Rc<Function>, CompileErrors> {
    let mut interner = Interner::new();
    compile_with(source, &mut interner)
}

/// Compile a unit whose string constants share `interner`
pub fn compile_with(source: &str, interner: &mut Interner) -> Result<Rc<Function>, CompileErrors> {
    Compiler::new(source, interner).compile()
}

/// Bytecode compiler
pub struct Compiler<'src, 'i> {
    scanner: Scanner<'src>,
    pub(crate) previous: Token<'src>,
    pub(crate) current: Token<'src>,

    errors: Vec<CompileError>,
    pub(crate) panic_mode: bool,

    /// String table shared with the VM
    pub(crate) interner: &'i mut Interner,

    /// Function being compiled (enclosing functions hang off it)
    pub(crate) state: FunctionState<'src>,

    /// Current parser recursion depth
    nesting: usize,
}

impl<'src, 'i> Compiler<'src, 'i> {
    pub fn new(source: &'src str, interner: &'i mut Interner) -> Self {
        Self {
            scanner: Scanner::new(source),
            previous: Token::synthetic(""),
            current: Token::synthetic(""),
            errors: Vec::new(),
            panic_mode: false,
            interner,
            state: FunctionState::new(FunctionKind::Script, None),
            nesting: 0,
        }
    }

    /// Compile the whole unit into the top-level script function
    pub fn compile(mut self) -> Result<Rc<Function>, CompileErrors> {
        self.advance();
        while !self.match_token(TokenKind::Eof) {
            self.declaration();
        }
        let function = self.end_function();

        if self.errors.is_empty() {
            debug!(
                instructions = function.chunk.len(),
                constants = function.chunk.constants.len(),
                "compiled unit"
            );
            Ok(Rc::new(function))
        } else {
            debug!(errors = self.errors.len(), "compilation failed");
            Err(CompileErrors(self.errors))
        }
    }

    // ===== Token stream =====

    pub(crate) fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            let token = self.current;
            self.error_at(token, token.lexeme);
        }
    }

    /// Kind of the token after `current`, without consuming anything
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.scanner.clone().scan_token().kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    // ===== Error reporting =====

    /// Report an error at the token just consumed
    pub(crate) fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(token, message);
    }

    pub(crate) fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'src>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        let site = match token.kind {
            TokenKind::Eof => ErrorSite::End,
            TokenKind::Error => ErrorSite::Scanner,
            _ => ErrorSite::Lexeme(token.lexeme.to_string()),
        };
        self.errors.push(CompileError {
            line: token.line,
            site,
            message: message.to_string(),
        });
    }

    /// Skip tokens until a statement boundary
    pub(crate) fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.check(TokenKind::Eof) {
            if self.previous.kind == TokenKind::Semicolon {
                return;
            }
            if self.current.kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    /// Enter one level of statement or expression nesting. Past
    /// `MAX_NESTING` the error is recorded and the rest of the unit skipped.
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.nesting >= MAX_NESTING {
            self.error_at_current("Nesting too deep.");
            while !self.check(TokenKind::Eof) {
                self.advance();
            }
            return false;
        }
        self.nesting += 1;
        true
    }

    pub(crate) fn exit_nesting(&mut self) {
        self.nesting -= 1;
    }

    // ===== Emission =====

    pub(crate) fn chunk(&mut self) -> &mut Chunk {
        &mut self.state.function.chunk
    }

    pub(crate) fn emit(&mut self, instruction: u32) -> usize {
        let line = self.previous.line;
        self.state.last_load = None;
        self.chunk().write(instruction, line)
    }

    pub(crate) fn emit_op(&mut self, op: OpCode) -> usize {
        self.emit(encode_ax(op.as_u8(), 0))
    }

    pub(crate) fn emit_ax(&mut self, op: OpCode, ax: u32) -> usize {
        self.emit(encode_ax(op.as_u8(), ax))
    }

    pub(crate) fn emit_ab(&mut self, op: OpCode, a: u8, b: u16) -> usize {
        self.emit(encode_ab(op.as_u8(), a, b))
    }

    /// Add a constant to the current chunk
    pub(crate) fn make_constant(&mut self, value: Value) -> u32 {
        let index = self.chunk().add_constant(value);
        if index > MAX_AX as usize {
            self.error("Too many constants in one chunk.");
            return 0;
        }
        index as u32
    }

    pub(crate) fn emit_constant(&mut self, value: Value) {
        let index = self.make_constant(value);
        self.emit_ax(OpCode::Constant, index);
    }

    /// Constant holding an identifier name, reused when already present
    pub(crate) fn identifier_constant(&mut self, name: &str) -> u16 {
        let handle = self.interner.intern(name);
        let existing = self.chunk().constants.iter().position(|constant| {
            matches!(constant, Value::String(s) if Rc::ptr_eq(s, &handle))
        });
        if let Some(index) = existing.filter(|&i| i <= u16::MAX as usize) {
            return index as u16;
        }

        let index = self.chunk().add_constant(Value::String(handle));
        if index > u16::MAX as usize {
            self.error("Too many constants in one chunk.");
            return 0;
        }
        index as u16
    }

    /// Emit a forward jump with a placeholder offset
    pub(crate) fn emit_jump(&mut self, op: OpCode) -> usize {
        self.emit_ax(op, MAX_AX)
    }

    /// Point the jump at `offset` to the next instruction
    pub(crate) fn patch_jump(&mut self, offset: usize) {
        let distance = self.chunk().len() - offset - 1;
        if distance > MAX_AX as usize {
            self.error("Too much code to jump over.");
            return;
        }
        let chunk = self.chunk();
        let op = decode_opcode(chunk.code[offset]);
        chunk.code[offset] = encode_ax(op, distance as u32);
    }

    /// Emit a backward jump to `start`
    pub(crate) fn emit_loop(&mut self, start: usize) {
        let distance = self.chunk().len() - start + 1;
        if distance > MAX_AX as usize {
            self.error("Loop body too large.");
            return;
        }
        self.emit_ax(OpCode::Loop, distance as u32);
    }

    // ===== Scopes =====

    pub(crate) fn begin_scope(&mut self) {
        self.state.symbols.begin_scope();
    }

    pub(crate) fn end_scope(&mut self) {
        for captured in self.state.symbols.end_scope() {
            self.emit_discard(captured);
        }
    }

    /// Discard the locals deeper than `depth` without forgetting them
    pub(crate) fn discard_locals_above(&mut self, depth: usize) {
        for captured in self.state.symbols.captured_above(depth) {
            self.emit_discard(captured);
        }
    }

    fn emit_discard(&mut self, captured: bool) {
        if captured {
            self.emit_op(OpCode::CloseUpvalue);
        } else {
            self.emit_op(OpCode::Pop);
        }
    }

    // ===== Functions =====

    pub(crate) fn begin_function(&mut self, kind: FunctionKind, name: Option<Rc<str>>) {
        let enclosing = std::mem::replace(&mut self.state, FunctionState::new(kind, name));
        self.state.enclosing = Some(Box::new(enclosing));
    }

    /// Finish the current function and return to its enclosing one
    pub(crate) fn end_function(&mut self) -> Function {
        self.emit_op(OpCode::Null);
        self.emit_op(OpCode::Return);

        let restored = match self.state.enclosing.take() {
            Some(enclosing) => *enclosing,
            None => FunctionState::new(FunctionKind::Script, None),
        };
        std::mem::replace(&mut self.state, restored).function
    }
}
