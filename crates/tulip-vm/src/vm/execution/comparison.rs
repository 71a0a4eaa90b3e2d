//! Comparison instruction execution

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::value::Value;
use crate::vm::ops::ValueOperations;
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;

impl Vm {
    /// Execute comparison instructions
    pub(crate) fn execute_comparison(&mut self, opcode: OpCode) -> Result<ExecutionResult, VmError> {
        let right = self.pop()?;
        let left = self.pop()?;

        let result = match opcode {
            OpCode::Equal => left == right,
            OpCode::NotEqual => left != right,
            OpCode::Greater => ValueOperations::gt_values(&left, &right)?,
            OpCode::GreaterEqual => ValueOperations::ge_values(&left, &right)?,
            OpCode::Less => ValueOperations::lt_values(&left, &right)?,
            OpCode::LessEqual => ValueOperations::le_values(&left, &right)?,
            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        };

        self.push(Value::Bool(result));
        Ok(ExecutionResult::Continue)
    }
}
