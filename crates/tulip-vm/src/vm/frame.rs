//! Call frame implementation

use crate::value::Closure;
use std::rc::Rc;

/// Activation record of one running closure
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub closure: Rc<Closure>,

    /// Index of the next instruction
    pub ip: usize,

    /// Stack index of slot 0 (the callee itself)
    pub base: usize,
}

impl CallFrame {
    pub fn new(closure: Rc<Closure>, base: usize) -> Self {
        Self {
            closure,
            ip: 0,
            base,
        }
    }

    /// Fetch the next instruction and advance
    #[inline]
    pub fn fetch(&mut self) -> Option<u32> {
        let instruction = self.closure.function.chunk.code.get(self.ip).copied()?;
        self.ip += 1;
        Some(instruction)
    }

    /// Source line of the instruction being executed
    pub fn current_line(&self) -> usize {
        self.closure.function.chunk.line_at(self.ip.saturating_sub(1))
    }
}
