//! Built-in function registry for the VM
//!
//! Collects the host functions installed into every VM by `init`, with
//! their arity, so they can be bound as globals or module members.

use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;

/// Type signature for built-in functions
///
/// Takes a mutable reference to the VM and a slice of argument values,
/// returns a Result with the computed value or a VmError.
pub type BuiltinFn = fn(&mut Vm, &[Value]) -> Result<Value, VmError>;

/// Metadata for a single built-in function
#[derive(Clone)]
pub struct BuiltinMetadata {
    /// Function name
    pub name: String,
    /// Function pointer
    pub func: BuiltinFn,
    /// Expected argument count (-1 for variadic)
    pub arity: i8,
}

/// Registry of built-in functions, in registration order
pub struct BuiltinRegistry {
    functions: Vec<BuiltinMetadata>,
}

impl BuiltinRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Register a built-in function
    ///
    /// # Arguments
    /// * `name` - Function name (must be unique)
    /// * `func` - Function pointer
    /// * `arity` - Number of expected arguments (-1 for variadic)
    ///
    /// # Panics
    /// Panics if the function name is already registered.
    pub fn register(&mut self, name: &str, func: BuiltinFn, arity: i8) {
        if self.functions.iter().any(|builtin| builtin.name == name) {
            panic!("Built-in function '{}' already registered", name);
        }

        self.functions.push(BuiltinMetadata {
            name: name.to_string(),
            func,
            arity,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinMetadata> {
        self.functions.iter()
    }

    /// Get number of registered functions
    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if registry is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
