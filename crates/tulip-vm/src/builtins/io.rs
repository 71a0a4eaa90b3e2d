//! I/O built-in functions
//!
//! - Output: print, println
//! - Files: read_file, write_file, append_file, file_exists
//! - Input: input (blocking stdin read)

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::Path;

// ============================================================================
// Output Functions
// ============================================================================

fn join_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print arguments separated by spaces, without a trailing newline
pub fn vm_print(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    vm.write_output(&join_args(args))?;
    Ok(Value::Null)
}

pub fn vm_println(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let mut line = join_args(args);
    line.push('\n');
    vm.write_output(&line)?;
    Ok(Value::Null)
}

// ============================================================================
// File Functions
// ============================================================================

pub fn vm_read_file(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let path = args::string("read_file", args, 0)?;
    let content = fs::read_to_string(&**path)
        .map_err(|e| VmError::native("read_file", format!("cannot read '{}': {}", path, e)))?;
    Ok(vm.string(&content))
}

pub fn vm_write_file(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let path = args::string("write_file", args, 0)?;
    let content = args::string("write_file", args, 1)?;
    fs::write(&**path, content.as_bytes())
        .map_err(|e| VmError::native("write_file", format!("cannot write '{}': {}", path, e)))?;
    Ok(Value::Null)
}

pub fn vm_append_file(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let path = args::string("append_file", args, 0)?;
    let content = args::string("append_file", args, 1)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&**path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|e| {
            VmError::native("append_file", format!("cannot append to '{}': {}", path, e))
        })?;
    Ok(Value::Null)
}

pub fn vm_file_exists(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let path = args::string("file_exists", args, 0)?;
    Ok(Value::Bool(Path::new(&**path).exists()))
}

// ============================================================================
// Input Functions
// ============================================================================

/// Read a line from stdin, after writing the optional prompt.
/// Returns null at end of input.
pub fn vm_input(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    if args.len() > 1 {
        return Err(VmError::Runtime(format!(
            "input() expects 0 or 1 arguments, got {}",
            args.len()
        )));
    }

    if let Some(prompt) = args.first() {
        vm.write_output(&prompt.to_string())?;
    }

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| VmError::native("input", e.to_string()))?;
    if read == 0 {
        return Ok(Value::Null);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(vm.string(trimmed))
}
