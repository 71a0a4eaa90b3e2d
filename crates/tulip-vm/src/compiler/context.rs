//! Compilation context types

use super::symbols::SymbolTable;
use crate::bytecode::{Function, UpvalueDescriptor};
use std::rc::Rc;

/// Maximum upvalues captured by one function
pub(crate) const MAX_UPVALUES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionKind {
    Script,
    Function,
}

/// Loop context for break/continue
#[derive(Debug)]
pub(crate) struct LoopContext {
    /// Where `continue` jumps back to
    pub(crate) continue_target: usize,

    /// Scope depth enclosing the loop body; deeper locals are discarded
    /// by `break` and `continue`
    pub(crate) scope_depth: usize,

    /// Break jump targets (to be patched)
    pub(crate) breaks: Vec<usize>,
}

/// What a plain load instruction read, so `++`/`--` can rewrite it
#[derive(Debug, Clone, Copy)]
pub(crate) enum LoadKind {
    Local(u16),
    Upvalue(u16),
    Global(u16),
    Field(u16),
    Index,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LoadMarker {
    /// Offset of the load instruction
    pub(crate) offset: usize,
    pub(crate) kind: LoadKind,
    /// Name constant when the binding is const
    pub(crate) const_name: Option<u16>,
}

/// Compiler state of one function being compiled
#[derive(Debug)]
pub(crate) struct FunctionState<'src> {
    /// Enclosing function (for nested functions)
    pub(crate) enclosing: Option<Box<FunctionState<'src>>>,

    pub(crate) function: Function,
    pub(crate) kind: FunctionKind,
    pub(crate) symbols: SymbolTable<'src>,

    /// Loop context stack
    pub(crate) loops: Vec<LoopContext>,

    pub(crate) last_load: Option<LoadMarker>,
}

impl<'src> FunctionState<'src> {
    pub(crate) fn new(kind: FunctionKind, name: Option<Rc<str>>) -> Self {
        Self {
            enclosing: None,
            function: Function::new(name),
            kind,
            symbols: SymbolTable::new(),
            loops: Vec::new(),
            last_load: None,
        }
    }

    /// Resolve `name` as a variable of an enclosing function, recording the
    /// capture chain through every intermediate function
    pub(crate) fn resolve_upvalue(&mut self, name: &str) -> Result<Option<(u8, bool)>, &'static str> {
        let Some(enclosing) = self.enclosing.as_deref_mut() else {
            return Ok(None);
        };

        if let Some(local) = enclosing.symbols.resolve(name)? {
            enclosing.symbols.capture(local.slot);
            let index = self.add_upvalue(local.slot, true, local.is_const)?;
            return Ok(Some((index, local.is_const)));
        }

        if let Some((upvalue, is_const)) = enclosing.resolve_upvalue(name)? {
            let index = self.add_upvalue(upvalue, false, is_const)?;
            return Ok(Some((index, is_const)));
        }

        Ok(None)
    }

    fn add_upvalue(&mut self, index: u8, is_local: bool, is_const: bool) -> Result<u8, &'static str> {
        let upvalues = &mut self.function.upvalues;
        if let Some(existing) = upvalues
            .iter()
            .position(|uv| uv.index == index && uv.is_local == is_local)
        {
            return Ok(existing as u8);
        }

        if upvalues.len() >= MAX_UPVALUES {
            return Err("Too many closure variables in function.");
        }

        upvalues.push(UpvalueDescriptor {
            is_local,
            index,
            is_const,
        });
        Ok((upvalues.len() - 1) as u8)
    }
}
