//! String interning
//!
//! Every string a VM instance creates goes through its interner, so equal
//! contents share one allocation and equality can short-circuit on
//! identity. The table only grows until the VM is freed.

use super::Value;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Interner {
    strings: HashSet<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for `text`, allocating it on first sight
    pub fn intern(&mut self, text: &str) -> Rc<str> {
        if let Some(existing) = self.strings.get(text) {
            return existing.clone();
        }
        let handle: Rc<str> = Rc::from(text);
        self.strings.insert(handle.clone());
        handle
    }

    /// Interned string value
    pub fn string(&mut self, text: &str) -> Value {
        Value::String(self.intern(text))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
