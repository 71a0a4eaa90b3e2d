//! Arithmetic instruction execution

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::value::Value;
use crate::vm::ops::ValueOperations;
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;

impl Vm {
    /// Execute arithmetic instructions
    pub(crate) fn execute_arithmetic(&mut self, opcode: OpCode) -> Result<ExecutionResult, VmError> {
        match opcode {
            OpCode::Negate => {
                let value = self.pop()?;
                self.push(ValueOperations::neg_value(&value)?);
            }

            OpCode::Not => {
                let value = self.pop()?;
                self.push(Value::Bool(value.is_falsey()));
            }

            _ => {
                let right = self.pop()?;
                let left = self.pop()?;
                let result = match opcode {
                    OpCode::Add => ValueOperations::add_values(&mut self.interner, &left, &right)?,
                    OpCode::Subtract => {
                        ValueOperations::sub_values(&mut self.interner, &left, &right)?
                    }
                    OpCode::Multiply => ValueOperations::mul_values(&left, &right)?,
                    OpCode::Divide => ValueOperations::div_values(&left, &right)?,
                    OpCode::Power => ValueOperations::pow_values(&left, &right)?,
                    OpCode::IntDivide => ValueOperations::int_div_values(&left, &right)?,
                    OpCode::Percent => ValueOperations::percent_values(&left, &right)?,
                    _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
                };
                self.push(result);
            }
        }

        Ok(ExecutionResult::Continue)
    }
}
