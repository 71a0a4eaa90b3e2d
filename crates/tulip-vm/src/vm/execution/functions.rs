//! Function and closure instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::value::{Closure, Value};
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;
use std::rc::Rc;

impl Vm {
    /// Execute function-related instructions
    pub(crate) fn execute_functions(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        let ax = decode_ax(instruction) as usize;

        match opcode {
            OpCode::Call => {
                let callee = self.peek(ax)?.clone();
                self.call_value(callee, ax)?;
            }

            OpCode::Closure => {
                let function = match self.read_constant(ax)? {
                    Value::Function(function) => function,
                    other => {
                        return Err(VmError::type_error("closure", "function", other.type_name()))
                    }
                };

                let frame = self.current_frame()?;
                let base = frame.base;
                let enclosing = frame.closure.clone();

                let mut upvalues = Vec::with_capacity(function.upvalue_count());
                for descriptor in &function.upvalues {
                    let index = descriptor.index as usize;
                    let cell = if descriptor.is_local {
                        self.capture_upvalue(base + index)
                    } else {
                        enclosing.upvalues.get(index).cloned().ok_or_else(|| {
                            VmError::Runtime(format!("Invalid upvalue index: {}", index))
                        })?
                    };
                    upvalues.push(cell);
                }

                self.push(Value::Closure(Rc::new(Closure::new(function, upvalues))));
            }

            // Hoist the top slot into its upvalue (if any) and drop it
            OpCode::CloseUpvalue => {
                let top = self
                    .stack
                    .len()
                    .checked_sub(1)
                    .ok_or(VmError::StackUnderflow)?;
                self.close_upvalues(top);
                self.pop()?;
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        }

        Ok(ExecutionResult::Continue)
    }
}
