//! Error types for the VM and compiler

use std::fmt;
use thiserror::Error;

/// Result code reported by [`crate::Vm::interpret`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InterpretResult {
    Ok = 0,
    CompileError = 65,
    RuntimeError = 70,
}

impl InterpretResult {
    /// Numeric code, suitable as a process exit status
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Where in the source a compile error was detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSite {
    /// At a specific token
    Lexeme(String),
    /// At the end of input
    End,
    /// Reported by the scanner; the message already describes the input
    Scanner,
}

/// A single static error found while compiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub line: usize,
    pub site: ErrorSite,
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error", self.line)?;
        match &self.site {
            ErrorSite::Lexeme(lexeme) => write!(f, " at '{}'", lexeme)?,
            ErrorSite::End => write!(f, " at end")?,
            ErrorSite::Scanner => {}
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for CompileError {}

/// Every error collected during one compile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileErrors(pub Vec<CompileError>);

impl CompileErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompileError> {
        self.0.iter()
    }
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}

/// VM runtime faults
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VmError {
    /// Operand kinds not supported by an operation
    #[error("Type error in {operation}: expected {expected}, got {got}.")]
    TypeError {
        operation: String,
        expected: String,
        got: String,
    },

    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),

    #[error("Cannot assign to constant '{0}'.")]
    ConstAssignment(String),

    #[error("Cannot redeclare constant '{0}'.")]
    ConstRedeclaration(String),

    #[error("Index {index} out of bounds for length {len}.")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("Key '{0}' not found in map.")]
    KeyNotFound(String),

    #[error("Undefined field '{field}' on {owner}.")]
    UndefinedField { field: String, owner: String },

    #[error("Struct mismatch: {0}")]
    StructMismatch(String),

    #[error("{name} expected {expected} arguments but got {got}.")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Can only call functions, got {0}.")]
    NotCallable(String),

    /// Call frame stack exhausted
    #[error("Stack overflow.")]
    StackOverflow,

    /// Operand stack popped while empty; indicates a compiler bug
    #[error("Stack underflow.")]
    StackUnderflow,

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Invalid slice [{lo}:{hi}] for length {len}.")]
    InvalidSlice { lo: i64, hi: i64, len: usize },

    #[error("Invalid opcode: {0}")]
    InvalidOpcode(u8),

    /// Failure reported by a native function
    #[error("{name}(): {message}")]
    Native { name: String, message: String },

    #[error("VM is not initialized.")]
    NotInitialized,

    #[error("{0}")]
    Runtime(String),
}

impl VmError {
    pub fn type_error(operation: &str, expected: &str, got: &str) -> Self {
        VmError::TypeError {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Shorthand for a native failure
    pub fn native(name: &str, message: impl Into<String>) -> Self {
        VmError::Native {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// A runtime fault with the source line of the faulting instruction and
/// the call stack at the time of the fault (innermost first)
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: VmError,
    pub line: usize,
    pub trace: Vec<String>,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        for frame in &self.trace {
            write!(f, "\n{}", frame)?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

/// Failure of a whole run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TulipError {
    #[error("{0}")]
    Compile(#[from] CompileErrors),

    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl TulipError {
    pub fn result_code(&self) -> InterpretResult {
        match self {
            TulipError::Compile(_) => InterpretResult::CompileError,
            TulipError::Runtime(_) => InterpretResult::RuntimeError,
        }
    }
}
