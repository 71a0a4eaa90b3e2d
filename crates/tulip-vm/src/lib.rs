//! TulipScript Virtual Machine
//!
//! This crate implements the language core of TulipScript: a single-pass
//! compiler that emits bytecode straight from the token stream, and a stack
//! machine that executes it.
//!
//! # Architecture
//!
//! - Source is scanned lazily by `tulip-syntax` and compiled in one pass
//!   (precedence climbing, no AST) into a [`bytecode::Chunk`] per function
//! - The VM keeps one operand stack and a bounded stack of call frames
//! - Closures capture variables through upvalue cells that are open while
//!   the variable's stack slot is live and closed when its scope ends
//! - Strings are interned for the lifetime of a VM instance
//!
//! # Modules
//!
//! - `opcode`: Instruction set and 32-bit instruction encoding
//! - `bytecode`: Chunks, function prototypes and upvalue descriptors
//! - `value`: Runtime values, objects and the string interner
//! - `compiler`: Source to bytecode compiler
//! - `vm`: Virtual machine execution engine, globals and configuration
//! - `builtins`: Native function library
//! - `error`: Error types for the VM and compiler

#![allow(clippy::result_large_err)]

pub mod builtins;
pub mod bytecode;
pub mod bytecode_debug;
pub mod compiler;
pub mod error;
pub mod opcode;
pub mod value;
pub mod vm;

// Re-export main types
pub use bytecode_debug::disassemble_function;
pub use compiler::{compile, compile_with};
pub use error::{CompileError, CompileErrors, InterpretResult, RuntimeError, TulipError, VmError};
pub use opcode::OpCode;
pub use value::Value;
pub use vm::{Vm, VmConfig};
