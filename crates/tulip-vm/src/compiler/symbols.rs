//! Local variable bindings of one function

/// Maximum locals per function (8-bit slot addressing in upvalue descriptors)
pub(crate) const MAX_LOCALS: usize = 256;

#[derive(Debug, Clone)]
pub(crate) struct Local<'src> {
    pub(crate) name: &'src str,
    /// Scope depth; `None` while the initializer is being compiled
    pub(crate) depth: Option<usize>,
    pub(crate) is_const: bool,
    /// Some closure captures this slot, so it must be closed, not popped
    pub(crate) is_captured: bool,
}

/// A resolved local: stack slot relative to the frame base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedLocal {
    pub(crate) slot: u8,
    pub(crate) is_const: bool,
}

/// Lexically scoped locals, innermost last
#[derive(Debug)]
pub(crate) struct SymbolTable<'src> {
    locals: Vec<Local<'src>>,
    scope_depth: usize,
}

impl<'src> SymbolTable<'src> {
    /// Slot 0 is reserved for the callee
    pub(crate) fn new() -> Self {
        Self {
            locals: vec![Local {
                name: "",
                depth: Some(0),
                is_const: true,
                is_captured: false,
            }],
            scope_depth: 0,
        }
    }

    pub(crate) fn scope_depth(&self) -> usize {
        self.scope_depth
    }

    pub(crate) fn begin_scope(&mut self) {
        self.scope_depth += 1;
    }

    /// Leave the innermost scope, returning the `is_captured` flag of each
    /// discarded local, innermost first
    pub(crate) fn end_scope(&mut self) -> Vec<bool> {
        self.scope_depth = self.scope_depth.saturating_sub(1);
        let mut discarded = Vec::new();
        while let Some(local) = self.locals.last() {
            if local.depth.is_some_and(|d| d <= self.scope_depth) {
                break;
            }
            discarded.push(local.is_captured);
            self.locals.pop();
        }
        discarded
    }

    /// `is_captured` flags of the locals deeper than `depth`, innermost
    /// first, leaving the table untouched (for `break` and `continue`)
    pub(crate) fn captured_above(&self, depth: usize) -> Vec<bool> {
        self.locals
            .iter()
            .rev()
            .take_while(|local| local.depth.map_or(true, |d| d > depth))
            .map(|local| local.is_captured)
            .collect()
    }

    /// Declare a local in the current scope (uninitialized)
    pub(crate) fn declare(&mut self, name: &'src str, is_const: bool) -> Result<(), &'static str> {
        for local in self.locals.iter().rev() {
            if local.depth.is_some_and(|d| d < self.scope_depth) {
                break;
            }
            if local.name == name {
                return Err("Already a variable with this name in this scope.");
            }
        }

        if self.locals.len() >= MAX_LOCALS {
            return Err("Too many local variables in function.");
        }

        self.locals.push(Local {
            name,
            depth: None,
            is_const,
            is_captured: false,
        });
        Ok(())
    }

    /// Mark the most recent local as usable
    pub(crate) fn mark_initialized(&mut self) {
        if self.scope_depth == 0 {
            return;
        }
        let depth = self.scope_depth;
        if let Some(local) = self.locals.last_mut() {
            local.depth = Some(depth);
        }
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<Option<ResolvedLocal>, &'static str> {
        for (slot, local) in self.locals.iter().enumerate().rev() {
            if local.name == name {
                if local.depth.is_none() {
                    return Err("Can't read local variable in its own initializer.");
                }
                return Ok(Some(ResolvedLocal {
                    slot: slot as u8,
                    is_const: local.is_const,
                }));
            }
        }
        Ok(None)
    }

    pub(crate) fn capture(&mut self, slot: u8) {
        if let Some(local) = self.locals.get_mut(slot as usize) {
            local.is_captured = true;
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.locals.len()
    }
}
