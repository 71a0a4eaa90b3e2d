//! Struct and field instruction execution

use crate::error::VmError;
use crate::opcode::{instruction::*, OpCode};
use crate::value::{FieldMap, Instance, StructType, Value};
use crate::vm::result::ExecutionResult;
use crate::vm::Vm;
use std::cell::RefCell;
use std::rc::Rc;

impl Vm {
    /// Execute struct and field instructions
    pub(crate) fn execute_structs(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        match opcode {
            OpCode::StructType => {
                let count = decode_a(instruction) as usize;
                let name = self.read_string(decode_b(instruction) as usize)?;
                let fields = self.take_pairs(count, "struct declaration")?;
                self.push(Value::StructType(Rc::new(StructType { name, fields })));
            }

            OpCode::Instance => {
                let count = decode_a(instruction) as usize;
                let forced = decode_b(instruction) == 1;
                let given = self.take_pairs(count, "struct literal")?;

                let structure = match self.pop()? {
                    Value::StructType(structure) => structure,
                    other => {
                        return Err(VmError::type_error(
                            "struct literal",
                            "struct type",
                            other.type_name(),
                        ))
                    }
                };

                // Forced literals ignore the declared defaults. Array and map
                // defaults get a container of their own per instance.
                let mut fields = if forced {
                    FieldMap::with_capacity(given.len())
                } else {
                    structure
                        .fields
                        .iter()
                        .map(|(name, value)| (name.clone(), value.copy_container()))
                        .collect()
                };
                fields.extend(given);

                let instance = Instance::new(structure, fields);
                self.push(Value::Instance(Rc::new(RefCell::new(instance))));
            }

            OpCode::GetField => {
                let name = self.read_string(decode_ax(instruction) as usize)?;
                let target = self.pop()?;
                let value = get_field(&target, &name)?;
                self.push(value);
            }

            OpCode::SetField => {
                let name = self.read_string(decode_ax(instruction) as usize)?;
                let value = self.pop()?;
                let target = self.pop()?;
                set_field(&target, name, value.clone())?;
                self.push(value);
            }

            _ => return Err(VmError::InvalidOpcode(opcode.as_u8())),
        }

        Ok(ExecutionResult::Continue)
    }
}

pub(super) fn get_field(target: &Value, name: &Rc<str>) -> Result<Value, VmError> {
    match target {
        Value::Instance(instance) => {
            let instance = instance.borrow();
            instance
                .fields
                .get(name)
                .cloned()
                .ok_or_else(|| VmError::UndefinedField {
                    field: name.to_string(),
                    owner: format!("struct '{}'", instance.structure.name),
                })
        }

        Value::Map(map) => map
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| VmError::KeyNotFound(name.to_string())),

        Value::Module(module) => {
            module
                .members
                .get(name)
                .cloned()
                .ok_or_else(|| VmError::UndefinedField {
                    field: name.to_string(),
                    owner: format!("module '{}'", module.name),
                })
        }

        other => Err(VmError::type_error(
            "field access",
            "instance, map or module",
            other.type_name(),
        )),
    }
}

pub(super) fn set_field(target: &Value, name: Rc<str>, value: Value) -> Result<(), VmError> {
    match target {
        Value::Instance(instance) => {
            instance.borrow_mut().fields.insert(name, value);
            Ok(())
        }

        Value::Map(map) => {
            map.borrow_mut().insert(name, value);
            Ok(())
        }

        other => Err(VmError::type_error(
            "field assignment",
            "instance or map",
            other.type_name(),
        )),
    }
}
