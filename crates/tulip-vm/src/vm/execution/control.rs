//! Control flow instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;

impl Vm {
    /// Execute control flow instructions
    pub(crate) fn execute_control(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        let offset = decode_ax(instruction) as usize;

        match opcode {
            OpCode::Jump => {
                self.current_frame_mut()?.ip += offset;
                Ok(ExecutionResult::Continue)
            }

            // Leaves the condition on the stack
            OpCode::JumpIfFalse => {
                if self.peek(0)?.is_falsey() {
                    self.current_frame_mut()?.ip += offset;
                }
                Ok(ExecutionResult::Continue)
            }

            OpCode::Loop => {
                let frame = self.current_frame_mut()?;
                frame.ip = frame.ip.saturating_sub(offset);
                Ok(ExecutionResult::Continue)
            }

            OpCode::Return => {
                let value = self.pop()?;
                Ok(ExecutionResult::Return(value))
            }

            _ => Err(VmError::InvalidOpcode(opcode.as_u8())),
        }
    }
}
