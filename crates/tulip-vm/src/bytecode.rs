//! Bytecode format and data structures

use crate::value::Value;
use std::rc::Rc;

/// Compiled instructions of one function, with constants and line table
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    /// Bytecode instructions (32-bit each)
    pub code: Vec<u32>,

    /// Constant pool
    pub constants: Vec<Value>,

    /// Source line of each instruction (parallel to `code`)
    pub lines: Vec<usize>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction and return its offset
    pub fn write(&mut self, instruction: u32, line: usize) -> usize {
        self.code.push(instruction);
        self.lines.push(line);
        self.code.len() - 1
    }

    /// Add a constant value and return its index
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    /// Drop every instruction from `len` on
    pub fn truncate(&mut self, len: usize) {
        self.code.truncate(len);
        self.lines.truncate(len);
    }

    pub fn line_at(&self, offset: usize) -> usize {
        self.lines.get(offset).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Upvalue descriptor for closures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpvalueDescriptor {
    /// Captures a local slot of the enclosing function (otherwise one of
    /// the enclosing closure's own upvalues)
    pub is_local: bool,

    /// Slot or upvalue index in the enclosing function
    pub index: u8,

    /// The captured binding was declared `const`
    pub is_const: bool,
}

/// Function prototype (compiled function)
#[derive(Debug, Clone, Default)]
pub struct Function {
    /// Function name; `None` for the top-level script
    pub name: Option<Rc<str>>,

    /// Number of parameters
    pub arity: u8,

    pub chunk: Chunk,

    /// Upvalue descriptors, one per captured variable
    pub upvalues: Vec<UpvalueDescriptor>,
}

impl Function {
    pub fn new(name: Option<Rc<str>>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Name used in stack traces and disassembly
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("script")
    }

    pub fn upvalue_count(&self) -> usize {
        self.upvalues.len()
    }
}
