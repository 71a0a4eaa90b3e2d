//! Heap object kinds

use super::{ArrayRef, FieldMap, Value};
use crate::bytecode::Function;
use crate::error::VmError;
use crate::vm::Vm;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Struct type descriptor: name plus ordered fields with default values
#[derive(Debug)]
pub struct StructType {
    pub name: Rc<str>,
    pub fields: FieldMap,
}

/// Struct instance
#[derive(Debug, Clone)]
pub struct Instance {
    pub structure: Rc<StructType>,
    pub fields: FieldMap,
}

impl Instance {
    pub fn new(structure: Rc<StructType>, fields: FieldMap) -> Self {
        Self { structure, fields }
    }
}

/// Captured variable cell
#[derive(Debug, Clone)]
pub enum Upvalue {
    /// Aliases a live slot of the operand stack
    Open(usize),
    /// Owns the value after the slot's scope ended
    Closed(Value),
}

pub type UpvalueRef = Rc<RefCell<Upvalue>>;

#[derive(Debug)]
pub struct Closure {
    pub function: Rc<Function>,
    pub upvalues: Vec<UpvalueRef>,
}

impl Closure {
    pub fn new(function: Rc<Function>, upvalues: Vec<UpvalueRef>) -> Self {
        Self { function, upvalues }
    }
}

/// Host callable invoked by the VM like a script function
pub type NativeFn = Rc<dyn Fn(&mut Vm, &[Value]) -> Result<Value, VmError>>;

pub struct Native {
    pub name: Rc<str>,
    /// Expected argument count (-1 for variadic)
    pub arity: i8,
    pub function: NativeFn,
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Native")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Named bundle of members, read with `module.member`
#[derive(Debug)]
pub struct Module {
    pub name: Rc<str>,
    pub members: FieldMap,
}

/// Cursor over an array, produced by `iter` loops
#[derive(Debug)]
pub struct ArrayIterator {
    pub array: ArrayRef,
    pub index: usize,
}

impl ArrayIterator {
    pub fn new(array: ArrayRef) -> Self {
        Self { array, index: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.array.borrow().len()
    }
}

impl Iterator for ArrayIterator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.array.borrow().get(self.index).cloned()?;
        self.index += 1;
        Some(value)
    }
}
