//! Variable and stack instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::value::Value;
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;

impl Vm {
    /// Execute constant, stack and variable instructions
    pub(crate) fn execute_variables(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        let ax = decode_ax(instruction) as usize;

        match opcode {
            OpCode::Constant => {
                let value = self.read_constant(ax)?;
                self.push(value);
            }
            OpCode::Null => self.push(Value::Null),
            OpCode::True => self.push(Value::Bool(true)),
            OpCode::False => self.push(Value::Bool(false)),

            OpCode::Pop => {
                self.pop()?;
            }

            OpCode::PopResult => {
                self.last_value = self.pop()?;
            }

            OpCode::DefineGlobal => {
                let is_const = decode_a(instruction) == 1;
                let name = self.read_string(decode_b(instruction) as usize)?;
                let value = self.pop()?;
                self.globals.define(name, value, is_const)?;
            }

            OpCode::GetGlobal => {
                let name = self.read_string(ax)?;
                let value = self
                    .globals
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| VmError::UndefinedVariable(name.to_string()))?;
                self.push(value);
            }

            OpCode::SetGlobal => {
                let name = self.read_string(ax)?;
                let value = self.peek(0)?.clone();
                self.globals.assign(&name, value)?;
            }

            OpCode::GetLocal => {
                let slot = self.local_slot(ax)?;
                let value = self
                    .stack
                    .get(slot)
                    .cloned()
                    .ok_or(VmError::StackUnderflow)?;
                self.push(value);
            }

            OpCode::SetLocal => {
                let slot = self.local_slot(ax)?;
                let value = self.peek(0)?.clone();
                *self.stack.get_mut(slot).ok_or(VmError::StackUnderflow)? = value;
            }

            OpCode::GetUpvalue => {
                let cell = self.upvalue_cell(ax)?;
                let value = self.read_upvalue(&cell);
                self.push(value);
            }

            OpCode::SetUpvalue => {
                let cell = self.upvalue_cell(ax)?;
                let value = self.peek(0)?.clone();
                self.write_upvalue(&cell, value);
            }

            OpCode::AssignConst => {
                let name = self.read_string(ax)?;
                return Err(VmError::ConstAssignment(name.to_string()));
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        }

        Ok(ExecutionResult::Continue)
    }
}
