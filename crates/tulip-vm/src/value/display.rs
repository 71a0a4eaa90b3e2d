//! Human-readable rendering of values, as used by `print`

use super::Value;
use std::fmt;

/// Render a number the shortest way that round-trips: integral values have
/// no fractional part, and exponent notation is used for decimal exponents
/// below -4 or from 6 upwards (`1e+06`, `1.5e-07`)
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return format!("{}", n),
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exp) => exp,
        Err(_) => return format!("{}", n),
    };

    if (-4..6).contains(&exponent) {
        return format!("{}", n);
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(array) => {
                write!(f, "[")?;
                for (i, element) in array.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::StructType(structure) => write!(f, "<struct {}>", structure.name),
            Value::Instance(instance) => {
                let instance = instance.borrow();
                write!(f, "<(struct {})", instance.structure.name)?;
                for (i, (name, value)) in instance.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}={}", name, value)?;
                }
                write!(f, ">")
            }
            Value::Function(function) => match &function.name {
                Some(name) => write!(f, "<fn {}>", name),
                None => write!(f, "<script>"),
            },
            Value::Closure(closure) => match &closure.function.name {
                Some(name) => write!(f, "<fn {}>", name),
                None => write!(f, "<fn>"),
            },
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Module(module) => write!(f, "<mod {}>", module.name),
            Value::Date(date) => write!(f, "<Date {}>", date.format("%Y-%m-%d")),
            Value::Time(time) => write!(f, "<Time {}>", time.format("%H:%M:%S")),
            Value::DateTime(dt) => write!(f, "<DateTime {}>", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Iterator(iter) => write!(f, "<array iterator at {}>", iter.borrow().index),
        }
    }
}
