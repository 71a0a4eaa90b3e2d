//! String manipulation built-in functions
//!
//! Indices and lengths count Unicode scalar values, not bytes.

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;

// ============================================================================
// Length and Access
// ============================================================================

/// Length of a string, array or map
pub fn vm_len(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let len = match args::any("len", args, 0)? {
        Value::String(s) => s.chars().count(),
        Value::Array(a) => a.borrow().len(),
        Value::Map(m) => m.borrow().len(),
        other => {
            return Err(VmError::type_error(
                "len()",
                "string, array or map",
                other.type_name(),
            ))
        }
    };
    Ok(Value::Number(len as f64))
}

/// Characters in `[start, end)`
pub fn vm_substring(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("substring", args, 0)?;
    let start = args::integer("substring", args, 1)?;
    let end = args::integer("substring", args, 2)?;
    let len = s.chars().count() as i64;

    if start < 0 || end < start || end > len {
        return Err(VmError::native(
            "substring",
            format!("range [{}, {}) out of bounds for length {}", start, end, len),
        ));
    }

    let sub: String = s
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect();
    Ok(vm.string(&sub))
}

// ============================================================================
// Search
// ============================================================================

pub fn vm_str_contains(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_contains", args, 0)?;
    let needle = args::string("str_contains", args, 1)?;
    Ok(Value::Bool(s.contains(&**needle)))
}

/// Character index of the first occurrence, or -1
pub fn vm_str_index_of(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_index_of", args, 0)?;
    let needle = args::string("str_index_of", args, 1)?;
    let index = s
        .find(&**needle)
        .map(|byte| s[..byte].chars().count() as f64)
        .unwrap_or(-1.0);
    Ok(Value::Number(index))
}

pub fn vm_str_starts_with(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_starts_with", args, 0)?;
    let prefix = args::string("str_starts_with", args, 1)?;
    Ok(Value::Bool(s.starts_with(&**prefix)))
}

pub fn vm_str_ends_with(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_ends_with", args, 0)?;
    let suffix = args::string("str_ends_with", args, 1)?;
    Ok(Value::Bool(s.ends_with(&**suffix)))
}

// ============================================================================
// Manipulation
// ============================================================================

/// Replace every occurrence
pub fn vm_str_replace(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_replace", args, 0)?;
    let from = args::string("str_replace", args, 1)?;
    let to = args::string("str_replace", args, 2)?;
    if from.is_empty() {
        return Err(VmError::native("str_replace", "pattern must not be empty"));
    }
    Ok(vm.string(&s.replace(&**from, to)))
}

/// Split on a separator; an empty separator splits into characters
pub fn vm_str_split(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_split", args, 0)?;
    let sep = args::string("str_split", args, 1)?;

    let parts: Vec<Value> = if sep.is_empty() {
        s.chars()
            .map(|c| vm.string(c.encode_utf8(&mut [0u8; 4])))
            .collect()
    } else {
        s.split(&**sep).map(|part| vm.string(part)).collect()
    };
    Ok(Value::array(parts))
}

pub fn vm_str_upper(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_upper", args, 0)?;
    Ok(vm.string(&s.to_uppercase()))
}

pub fn vm_str_lower(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_lower", args, 0)?;
    Ok(vm.string(&s.to_lowercase()))
}

pub fn vm_str_trim(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let s = args::string("str_trim", args, 0)?;
    Ok(vm.string(s.trim()))
}
