//! Type inspection and conversion built-in functions

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;
use std::iter::Peekable;
use std::str::Chars;

pub fn vm_type_of(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let value = args::any("type_of", args, 0)?;
    Ok(vm.string(value.type_name()))
}

pub fn vm_to_string(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let value = args::any("to_string", args, 0)?;
    Ok(vm.string(&value.to_string()))
}

pub fn vm_to_number(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    match args::any("to_number", args, 0)? {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Bool(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Number).map_err(|_| {
            VmError::native("to_number", format!("cannot convert '{}' to a number", s))
        }),
        other => Err(VmError::type_error(
            "to_number()",
            "number, bool or string",
            other.type_name(),
        )),
    }
}

// ============================================================================
// sprintf
// ============================================================================

/// Format with `%v %s %d %f %.Nf %t %%` verbs
pub fn vm_sprintf(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let format = args::string("sprintf", args, 0)?;
    let text = sprintf(format, &args[1..])?;
    Ok(vm.string(&text))
}

fn sprintf(format: &str, values: &[Value]) -> Result<String, VmError> {
    let mut out = String::with_capacity(format.len());
    let mut values = values.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let precision = parse_precision(&mut chars);
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' {
            out.push('%');
            continue;
        }

        match values.next() {
            Some(value) => out.push_str(&format_verb(verb, precision, value)?),
            None => out.push_str(&format!("%!{}(MISSING)", verb)),
        }
    }

    Ok(out)
}

/// Parse an optional `.N` precision
fn parse_precision(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    if chars.peek() != Some(&'.') {
        return None;
    }
    chars.next();
    let mut digits = String::new();
    while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
        digits.push(*d);
        chars.next();
    }
    Some(digits.parse().unwrap_or(0))
}

fn format_verb(verb: char, precision: Option<usize>, value: &Value) -> Result<String, VmError> {
    match (verb, value) {
        ('v', _) | ('s', _) | ('t', Value::Bool(_)) => Ok(value.to_string()),
        ('d', Value::Number(n)) => Ok(format!("{}", n.trunc() as i64)),
        ('f', Value::Number(n)) => Ok(format!("{:.*}", precision.unwrap_or(6), n)),
        ('d' | 'f' | 't', other) => Err(VmError::native(
            "sprintf",
            format!("%{} cannot format a {}", verb, other.type_name()),
        )),
        (other, _) => Err(VmError::native(
            "sprintf",
            format!("unknown verb '%{}'", other),
        )),
    }
}
