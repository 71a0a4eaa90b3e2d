//! Fused increment/decrement execution

use super::structs::{get_field, set_field};
use crate::error::VmError;
use crate::opcode::{inc_mode, instruction::*, OpCode};
use crate::value::Value;
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;

/// Old and updated value of an increment target
fn step(current: &Value, mode: u8) -> Result<(Value, Value), VmError> {
    let decrement = mode & inc_mode::DECREMENT != 0;
    let n = current.as_number().ok_or_else(|| {
        let op = if decrement { "'--'" } else { "'++'" };
        VmError::type_error(op, "number", current.type_name())
    })?;
    let updated = if decrement { n - 1.0 } else { n + 1.0 };
    Ok((Value::Number(n), Value::Number(updated)))
}

/// Postfix forms yield the old value
fn result_of(mode: u8, old: Value, updated: Value) -> Value {
    if mode & inc_mode::POSTFIX != 0 {
        old
    } else {
        updated
    }
}

impl Vm {
    /// Execute `++`/`--` on locals, upvalues, globals, fields and indices
    pub(crate) fn execute_increment(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        let (mode, operand) = if opcode == OpCode::IncIndex {
            (decode_ax(instruction) as u8, 0)
        } else {
            (decode_a(instruction), decode_b(instruction) as usize)
        };

        let result = match opcode {
            OpCode::IncLocal => {
                let slot = self.local_slot(operand)?;
                let target = self.stack.get_mut(slot).ok_or(VmError::StackUnderflow)?;
                let (old, updated) = step(target, mode)?;
                *target = updated.clone();
                result_of(mode, old, updated)
            }

            OpCode::IncUpvalue => {
                let cell = self.upvalue_cell(operand)?;
                let (old, updated) = step(&self.read_upvalue(&cell), mode)?;
                self.write_upvalue(&cell, updated.clone());
                result_of(mode, old, updated)
            }

            OpCode::IncGlobal => {
                let name = self.read_string(operand)?;
                let current = self
                    .globals
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| VmError::UndefinedVariable(name.to_string()))?;
                let (old, updated) = step(&current, mode)?;
                self.globals.assign(&name, updated.clone())?;
                result_of(mode, old, updated)
            }

            OpCode::IncField => {
                let name = self.read_string(operand)?;
                let target = self.pop()?;
                let (old, updated) = step(&get_field(&target, &name)?, mode)?;
                set_field(&target, name, updated.clone())?;
                result_of(mode, old, updated)
            }

            OpCode::IncIndex => {
                let index = self.pop()?;
                let target = self.pop()?;
                let current = self.get_index(&target, &index)?;
                let (old, updated) = step(&current, mode)?;
                self.set_index(&target, &index, updated.clone())?;
                result_of(mode, old, updated)
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        };

        self.push(result);
        Ok(ExecutionResult::Continue)
    }
}
