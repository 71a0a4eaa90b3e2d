//! Array built-in functions
//!
//! - Modification: push, pop, array_sort, array_reverse
//! - Construction: array_split, array_join
//! - Search: array_linear_search, array_binary_search, array_contains
//! - Display: array_to_string

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;
use std::cmp::Ordering;

/// Order two numbers or two strings
fn compare(name: &str, a: &Value, b: &Value) -> Result<Ordering, VmError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(x.total_cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(VmError::native(
            name,
            format!(
                "cannot compare {} with {}; elements must be all numbers or all strings",
                a.type_name(),
                b.type_name()
            ),
        )),
    }
}

// ============================================================================
// Modification
// ============================================================================

pub fn vm_push(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("push", args, 0)?;
    let value = args::any("push", args, 1)?;
    array.borrow_mut().push(value.clone());
    Ok(Value::Null)
}

pub fn vm_pop(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("pop", args, 0)?;
    let popped = array.borrow_mut().pop();
    popped.ok_or_else(|| VmError::native("pop", "array is empty"))
}

/// Sort in place
pub fn vm_array_sort(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_sort", args, 0)?;
    let mut items = array.borrow_mut();

    // Validate first so a failed sort leaves the array untouched
    for pair in items.windows(2) {
        compare("array_sort", &pair[0], &pair[1])?;
    }
    if let Some(first) = items.first() {
        compare("array_sort", first, first)?;
    }

    items.sort_by(|a, b| compare("array_sort", a, b).unwrap_or(Ordering::Equal));
    Ok(Value::Null)
}

/// Reverse in place
pub fn vm_array_reverse(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_reverse", args, 0)?;
    array.borrow_mut().reverse();
    Ok(Value::Null)
}

// ============================================================================
// Construction
// ============================================================================

/// Split into sub-arrays at each element equal to the separator
pub fn vm_array_split(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_split", args, 0)?;
    let separator = args::any("array_split", args, 1)?;

    let items = array.borrow();
    let parts: Vec<Value> = items
        .split(|item| item == separator)
        .map(|part| Value::array(part.to_vec()))
        .collect();
    Ok(Value::array(parts))
}

/// Concatenate any number of arrays into a new one
pub fn vm_array_join(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let mut joined = Vec::new();
    for index in 0..args.len() {
        let array = args::array("array_join", args, index)?;
        joined.extend(array.borrow().iter().cloned());
    }
    Ok(Value::array(joined))
}

pub fn vm_array_to_string(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_to_string", args, 0)?;
    let text = Value::Array(array.clone()).to_string();
    Ok(vm.string(&text))
}

// ============================================================================
// Search
// ============================================================================

/// Index of the first equal element, or -1
pub fn vm_array_linear_search(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_linear_search", args, 0)?;
    let target = args::any("array_linear_search", args, 1)?;
    let index = array
        .borrow()
        .iter()
        .position(|item| item == target)
        .map(|i| i as f64)
        .unwrap_or(-1.0);
    Ok(Value::Number(index))
}

/// Index of an equal element in a sorted array, or -1
pub fn vm_array_binary_search(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_binary_search", args, 0)?;
    let target = args::any("array_binary_search", args, 1)?;
    let items = array.borrow();

    let (mut lo, mut hi) = (0usize, items.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match compare("array_binary_search", &items[mid], target)? {
            Ordering::Equal => return Ok(Value::Number(mid as f64)),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    Ok(Value::Number(-1.0))
}

pub fn vm_array_contains(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let array = args::array("array_contains", args, 0)?;
    let target = args::any("array_contains", args, 1)?;
    let found = array.borrow().iter().any(|item| item == target);
    Ok(Value::Bool(found))
}
