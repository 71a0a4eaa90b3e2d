//! Global environment

use crate::error::VmError;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// A global binding
#[derive(Debug, Clone)]
pub struct GlobalVar {
    pub value: Value,
    pub is_const: bool,
}

/// Name to binding table
#[derive(Debug, Default)]
pub struct Globals {
    vars: HashMap<Rc<str>, GlobalVar>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script declaration. Replaces an existing binding, value and const
    /// flag alike, unless that binding is const.
    pub fn define(&mut self, name: Rc<str>, value: Value, is_const: bool) -> Result<(), VmError> {
        if let Some(existing) = self.vars.get(&name) {
            if existing.is_const {
                return Err(VmError::ConstRedeclaration(name.to_string()));
            }
        }
        self.insert(name, value, is_const);
        Ok(())
    }

    /// Host definition; always replaces
    pub fn insert(&mut self, name: Rc<str>, value: Value, is_const: bool) {
        self.vars.insert(name, GlobalVar { value, is_const });
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name).map(|var| &var.value)
    }

    pub fn get_var(&self, name: &str) -> Option<&GlobalVar> {
        self.vars.get(name)
    }

    /// Reassign an existing, non-const binding
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), VmError> {
        match self.vars.get_mut(name) {
            None => Err(VmError::UndefinedVariable(name.to_string())),
            Some(var) if var.is_const => Err(VmError::ConstAssignment(name.to_string())),
            Some(var) => {
                var.value = value;
                Ok(())
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }
}
