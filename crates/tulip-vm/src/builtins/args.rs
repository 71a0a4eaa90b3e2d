//! Argument extraction helpers shared by the builtins

use crate::error::VmError;
use crate::value::{ArrayRef, MapRef, Value};
use std::rc::Rc;

fn arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a Value, VmError> {
    args.get(index).ok_or_else(|| {
        VmError::Runtime(format!(
            "{}() expects at least {} arguments, got {}",
            name,
            index + 1,
            args.len()
        ))
    })
}

fn mismatch(name: &str, expected: &str, got: &Value) -> VmError {
    VmError::type_error(&format!("{}()", name), expected, got.type_name())
}

pub(crate) fn number(name: &str, args: &[Value], index: usize) -> Result<f64, VmError> {
    match arg(name, args, index)? {
        Value::Number(n) => Ok(*n),
        other => Err(mismatch(name, "number", other)),
    }
}

/// Number with no fractional part
pub(crate) fn integer(name: &str, args: &[Value], index: usize) -> Result<i64, VmError> {
    let n = number(name, args, index)?;
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(VmError::native(name, format!("expected an integer, got {}", n)));
    }
    Ok(n as i64)
}

pub(crate) fn string<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a Rc<str>, VmError> {
    match arg(name, args, index)? {
        Value::String(s) => Ok(s),
        other => Err(mismatch(name, "string", other)),
    }
}

pub(crate) fn array<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a ArrayRef, VmError> {
    match arg(name, args, index)? {
        Value::Array(a) => Ok(a),
        other => Err(mismatch(name, "array", other)),
    }
}

pub(crate) fn map<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a MapRef, VmError> {
    match arg(name, args, index)? {
        Value::Map(m) => Ok(m),
        other => Err(mismatch(name, "map", other)),
    }
}

pub(crate) fn any<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a Value, VmError> {
    arg(name, args, index)
}
