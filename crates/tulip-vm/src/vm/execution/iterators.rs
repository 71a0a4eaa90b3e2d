//! Iterator instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::value::{ArrayIterator, ArrayRef, Value};
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;
use std::cell::RefCell;
use std::rc::Rc;

impl Vm {
    /// Execute iterator instructions
    pub(crate) fn execute_iterators(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        match opcode {
            OpCode::IterInit => {
                let iterable = self.pop()?;
                let source: ArrayRef = match iterable {
                    Value::Array(array) => array,
                    Value::String(s) => {
                        let chars: Vec<Value> = s
                            .chars()
                            .map(|c| self.interner.string(c.encode_utf8(&mut [0u8; 4])))
                            .collect();
                        Rc::new(RefCell::new(chars))
                    }
                    Value::Map(map) => {
                        let keys: Vec<Value> =
                            map.borrow().keys().map(|k| Value::String(k.clone())).collect();
                        Rc::new(RefCell::new(keys))
                    }
                    Value::Iterator(iterator) => {
                        self.push(Value::Iterator(iterator));
                        return Ok(ExecutionResult::Continue);
                    }
                    other => {
                        return Err(VmError::type_error(
                            "iter",
                            "array, string, map or iterator",
                            other.type_name(),
                        ))
                    }
                };
                let iterator = ArrayIterator::new(source);
                self.push(Value::Iterator(Rc::new(RefCell::new(iterator))));
            }

            OpCode::IterHasNext => {
                let slot = self.local_slot(decode_ax(instruction) as usize)?;
                let has_next = match self.stack.get(slot) {
                    Some(Value::Iterator(iterator)) => iterator.borrow().has_next(),
                    _ => return Err(not_an_iterator()),
                };
                self.push(Value::Bool(has_next));
            }

            OpCode::IterNext => {
                let slot = self.local_slot(decode_ax(instruction) as usize)?;
                let next = match self.stack.get(slot) {
                    Some(Value::Iterator(iterator)) => iterator.borrow_mut().next(),
                    _ => return Err(not_an_iterator()),
                };
                self.push(next.unwrap_or(Value::Null));
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        }

        Ok(ExecutionResult::Continue)
    }
}

fn not_an_iterator() -> VmError {
    VmError::Runtime("Loop slot does not hold an iterator.".to_string())
}
