//! Array, map and indexing instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::value::{FieldMap, Value};
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;
use std::rc::Rc;

impl Vm {
    /// Execute collection instructions
    pub(crate) fn execute_collections(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        let ax = decode_ax(instruction) as usize;

        match opcode {
            OpCode::Array => {
                let start = self
                    .stack
                    .len()
                    .checked_sub(ax)
                    .ok_or(VmError::StackUnderflow)?;
                let elements = self.stack.split_off(start);
                self.push(Value::array(elements));
            }

            OpCode::Map => {
                let entries = self.take_pairs(ax, "map literal")?;
                self.push(Value::map(entries));
            }

            OpCode::GetIndex => {
                let index = self.pop()?;
                let target = self.pop()?;
                let value = self.get_index(&target, &index)?;
                self.push(value);
            }

            OpCode::SetIndex => {
                let value = self.pop()?;
                let index = self.pop()?;
                let target = self.pop()?;
                self.set_index(&target, &index, value.clone())?;
                self.push(value);
            }

            OpCode::Slice => {
                let hi = self.pop()?;
                let lo = self.pop()?;
                let target = self.pop()?;
                let value = self.slice(&target, &lo, &hi)?;
                self.push(value);
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        }

        Ok(ExecutionResult::Continue)
    }

    /// Pop `count` key/value pairs pushed in source order
    pub(super) fn take_pairs(&mut self, count: usize, operation: &str) -> Result<FieldMap, VmError> {
        let start = self
            .stack
            .len()
            .checked_sub(count * 2)
            .ok_or(VmError::StackUnderflow)?;
        let items = self.stack.split_off(start);

        let mut entries = FieldMap::with_capacity(count);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            entries.insert(string_key(&key, operation)?, value);
        }
        Ok(entries)
    }

    pub(super) fn get_index(&mut self, target: &Value, index: &Value) -> Result<Value, VmError> {
        match target {
            Value::Array(array) => {
                let array = array.borrow();
                let i = bounded(integer_index(index, "array index")?, array.len())?;
                Ok(array[i].clone())
            }

            Value::String(s) => {
                let i = integer_index(index, "string index")?;
                let len = s.chars().count();
                let i = bounded(i, len)?;
                let ch = s.chars().nth(i).ok_or(VmError::IndexOutOfBounds {
                    index: i as i64,
                    len,
                })?;
                Ok(self.interner.string(ch.encode_utf8(&mut [0u8; 4])))
            }

            Value::Map(map) => {
                let key = string_key(index, "map key")?;
                map.borrow()
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| VmError::KeyNotFound(key.to_string()))
            }

            other => Err(VmError::type_error(
                "index",
                "array, string or map",
                other.type_name(),
            )),
        }
    }

    pub(super) fn set_index(
        &mut self,
        target: &Value,
        index: &Value,
        value: Value,
    ) -> Result<(), VmError> {
        match target {
            Value::Array(array) => {
                let mut array = array.borrow_mut();
                let i = bounded(integer_index(index, "array index")?, array.len())?;
                array[i] = value;
                Ok(())
            }

            Value::Map(map) => {
                let key = string_key(index, "map key")?;
                map.borrow_mut().insert(key, value);
                Ok(())
            }

            other => Err(VmError::type_error(
                "index assignment",
                "array or map",
                other.type_name(),
            )),
        }
    }

    fn slice(&mut self, target: &Value, lo: &Value, hi: &Value) -> Result<Value, VmError> {
        match target {
            Value::Array(array) => {
                let array = array.borrow();
                let (lo, hi) = slice_bounds(lo, hi, array.len())?;
                Ok(Value::array(array[lo..hi].to_vec()))
            }

            Value::String(s) => {
                let (lo, hi) = slice_bounds(lo, hi, s.chars().count())?;
                let sliced: String = s.chars().skip(lo).take(hi - lo).collect();
                Ok(self.interner.string(&sliced))
            }

            other => Err(VmError::type_error("slice", "array or string", other.type_name())),
        }
    }
}

fn string_key(key: &Value, operation: &str) -> Result<Rc<str>, VmError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => Err(VmError::type_error(operation, "string key", other.type_name())),
    }
}

/// Integral number as a signed index
fn integer_index(index: &Value, operation: &str) -> Result<i64, VmError> {
    match index {
        Value::Number(n) if n.fract() == 0.0 => Ok(*n as i64),
        Value::Number(_) => Err(VmError::type_error(operation, "integer", "fractional number")),
        other => Err(VmError::type_error(operation, "integer", other.type_name())),
    }
}

fn bounded(index: i64, len: usize) -> Result<usize, VmError> {
    if index < 0 || index as usize >= len {
        Err(VmError::IndexOutOfBounds { index, len })
    } else {
        Ok(index as usize)
    }
}

/// Resolve `[lo:hi]` against `len`; null bounds are open
fn slice_bounds(lo: &Value, hi: &Value, len: usize) -> Result<(usize, usize), VmError> {
    let lo = match lo {
        Value::Null => 0,
        other => integer_index(other, "slice")?,
    };
    let hi = match hi {
        Value::Null => len as i64,
        other => integer_index(other, "slice")?,
    };

    if lo < 0 || hi < lo || hi as usize > len {
        return Err(VmError::InvalidSlice { lo, hi, len });
    }
    Ok((lo as usize, hi as usize))
}
