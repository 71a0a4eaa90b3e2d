//! Map built-in functions

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;

/// Remove a key, returning its value (null when absent)
pub fn vm_map_remove(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let map = args::map("map_remove", args, 0)?;
    let key = args::string("map_remove", args, 1)?;
    let removed = map.borrow_mut().shift_remove(&**key);
    Ok(removed.unwrap_or(Value::Null))
}

pub fn vm_map_contains_key(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let map = args::map("map_contains_key", args, 0)?;
    let key = args::string("map_contains_key", args, 1)?;
    Ok(Value::Bool(map.borrow().contains_key(&**key)))
}

pub fn vm_map_size(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let map = args::map("map_size", args, 0)?;
    Ok(Value::Number(map.borrow().len() as f64))
}

/// Keys in insertion order
pub fn vm_map_keys(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let map = args::map("map_keys", args, 0)?;
    let keys = map
        .borrow()
        .keys()
        .map(|key| Value::String(key.clone()))
        .collect();
    Ok(Value::array(keys))
}

/// Values in insertion order
pub fn vm_map_values(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let map = args::map("map_values", args, 0)?;
    let values = map.borrow().values().cloned().collect();
    Ok(Value::array(values))
}
