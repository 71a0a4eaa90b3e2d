//! Clock and calendar built-in functions
//!
//! Layouts use the reference-time notation (`2006-01-02 15:04:05`, `Jan`,
//! `Mon`, `PM`, ...). A layout containing `%` is taken as a chrono format
//! string instead.

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;
use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// Reference-time tokens, longest first where prefixes overlap
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("2006", "%Y"),
    ("-0700", "%z"),
    (".000", "%.3f"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("_2", "%e"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// Translate a reference-time layout into a chrono format string
pub fn layout_to_chrono(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    let mut format = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'outer: while !rest.is_empty() {
        for (token, spec) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                format.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            format.push(c);
        }
        rest = chars.as_str();
    }
    format
}

/// Render a chrono value, turning unsupported specifiers into an error
fn render(
    name: &str,
    layout: &str,
    formatted: DelayedFormat<StrftimeItems<'_>>,
) -> Result<String, VmError> {
    let mut out = String::new();
    write!(out, "{}", formatted).map_err(|_| {
        VmError::native(name, format!("layout '{}' does not apply to this value", layout))
    })?;
    Ok(out)
}

// ============================================================================
// Clock
// ============================================================================

/// Seconds since the VM was initialized
pub fn vm_clock(vm: &mut Vm, _args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Number(vm.elapsed()))
}

// ============================================================================
// Construction
// ============================================================================

fn component(name: &str, args: &[Value], index: usize) -> Result<u32, VmError> {
    let n = args::integer(name, args, index)?;
    u32::try_from(n).map_err(|_| VmError::native(name, format!("invalid component {}", n)))
}

fn date_from(name: &str, args: &[Value]) -> Result<NaiveDate, VmError> {
    let year = args::integer(name, args, 0)?;
    let year =
        i32::try_from(year).map_err(|_| VmError::native(name, format!("invalid year {}", year)))?;
    let month = component(name, args, 1)?;
    let day = component(name, args, 2)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| VmError::native(name, format!("invalid date {}-{}-{}", year, month, day)))
}

fn time_from(name: &str, args: &[Value], offset: usize) -> Result<NaiveTime, VmError> {
    let hour = component(name, args, offset)?;
    let minute = component(name, args, offset + 1)?;
    let second = component(name, args, offset + 2)?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
        VmError::native(name, format!("invalid time {}:{}:{}", hour, minute, second))
    })
}

pub fn vm_date(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Date(date_from("Date", args)?))
}

pub fn vm_time(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Time(time_from("Time", args, 0)?))
}

pub fn vm_datetime(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let date = date_from("DateTime", args)?;
    let time = time_from("DateTime", args, 3)?;
    Ok(Value::DateTime(NaiveDateTime::new(date, time)))
}

pub fn vm_date_now(_vm: &mut Vm, _args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Date(Local::now().date_naive()))
}

pub fn vm_time_now(_vm: &mut Vm, _args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Time(Local::now().time()))
}

pub fn vm_datetime_now(_vm: &mut Vm, _args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::DateTime(Local::now().naive_local()))
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a date or datetime
pub fn vm_date_format_datetime(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    const NAME: &str = "date_format_datetime";
    let layout = args::string(NAME, args, 1)?;
    let format = layout_to_chrono(layout);
    let text = match args::any(NAME, args, 0)? {
        Value::Date(date) => render(NAME, layout, date.format(&format))?,
        Value::DateTime(datetime) => render(NAME, layout, datetime.format(&format))?,
        other => {
            return Err(VmError::type_error("date_format_datetime()", "date or datetime", other.type_name()))
        }
    };
    Ok(vm.string(&text))
}

/// Format a time, or the time part of a datetime
pub fn vm_time_format(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    const NAME: &str = "time_format";
    let layout = args::string(NAME, args, 1)?;
    let format = layout_to_chrono(layout);
    let time = match args::any(NAME, args, 0)? {
        Value::Time(time) => *time,
        Value::DateTime(datetime) => datetime.time(),
        other => {
            return Err(VmError::type_error("time_format()", "time or datetime", other.type_name()))
        }
    };
    let text = render(NAME, layout, time.format(&format))?;
    Ok(vm.string(&text))
}

/// Format a datetime; a date is taken at midnight
pub fn vm_datetime_format(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    const NAME: &str = "datetime_format";
    let layout = args::string(NAME, args, 1)?;
    let format = layout_to_chrono(layout);
    let datetime = match args::any(NAME, args, 0)? {
        Value::DateTime(datetime) => *datetime,
        Value::Date(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| VmError::native(NAME, "invalid date"))?,
        other => {
            return Err(VmError::type_error("datetime_format()", "datetime or date", other.type_name()))
        }
    };
    let text = render(NAME, layout, datetime.format(&format))?;
    Ok(vm.string(&text))
}
