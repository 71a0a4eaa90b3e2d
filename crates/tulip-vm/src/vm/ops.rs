//! Value operation helpers

use crate::error::VmError;
use crate::value::{FieldMap, Instance, Interner, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Implementation of value operations for the VM
pub(crate) struct ValueOperations;

impl ValueOperations {
    pub(crate) fn add_values(
        interner: &mut Interner,
        left: &Value,
        right: &Value,
    ) -> Result<Value, VmError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(interner.string(&joined))
            }
            (Value::Map(a), Value::Map(b)) => {
                let mut merged = a.borrow().clone();
                for (key, value) in b.borrow().iter() {
                    merged.insert(key.clone(), value.clone());
                }
                Ok(Value::map(merged))
            }
            (Value::Instance(a), Value::Instance(b)) => Self::add_instances(interner, a, b),
            _ => Err(Self::binary_type_error(
                "'+'",
                "two numbers, strings, maps or instances of one struct",
                left,
                right,
            )),
        }
    }

    /// Field-wise `+` of two instances of the same struct type
    fn add_instances(
        interner: &mut Interner,
        left: &Rc<RefCell<Instance>>,
        right: &Rc<RefCell<Instance>>,
    ) -> Result<Value, VmError> {
        let left = left.borrow();
        let right = right.borrow();

        if !Rc::ptr_eq(&left.structure, &right.structure) {
            return Err(VmError::StructMismatch(format!(
                "cannot add instances of '{}' and '{}'.",
                left.structure.name, right.structure.name
            )));
        }

        let same_fields = left.fields.len() == right.fields.len()
            && left.fields.keys().all(|k| right.fields.contains_key(k));
        if !same_fields {
            return Err(VmError::StructMismatch(format!(
                "instances of '{}' have different fields.",
                left.structure.name
            )));
        }

        let mut fields = FieldMap::with_capacity(left.fields.len());
        for (name, a) in &left.fields {
            let b = right.fields.get(name).unwrap_or(&Value::Null);
            fields.insert(name.clone(), Self::add_values(interner, a, b)?);
        }

        Ok(Value::Instance(Rc::new(RefCell::new(Instance::new(
            left.structure.clone(),
            fields,
        )))))
    }

    pub(crate) fn sub_values(
        interner: &mut Interner,
        left: &Value,
        right: &Value,
    ) -> Result<Value, VmError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            (Value::String(a), Value::String(b)) => {
                // Removes the first occurrence only
                Ok(interner.string(&a.replacen(&**b, "", 1)))
            }
            _ => Err(Self::binary_type_error(
                "'-'",
                "two numbers or two strings",
                left,
                right,
            )),
        }
    }

    pub(crate) fn mul_values(left: &Value, right: &Value) -> Result<Value, VmError> {
        Self::numeric("'*'", left, right, |a, b| Ok(a * b))
    }

    pub(crate) fn div_values(left: &Value, right: &Value) -> Result<Value, VmError> {
        Self::numeric("'/'", left, right, |a, b| Ok(a / b))
    }

    pub(crate) fn pow_values(left: &Value, right: &Value) -> Result<Value, VmError> {
        Self::numeric("'**'", left, right, |a, b| Ok(a.powf(b)))
    }

    /// `/_`: floored division
    pub(crate) fn int_div_values(left: &Value, right: &Value) -> Result<Value, VmError> {
        Self::numeric("'/_'", left, right, |a, b| {
            if b == 0.0 {
                Err(VmError::DivisionByZero)
            } else {
                Ok((a / b).floor())
            }
        })
    }

    /// `%%`: `a` percent of `b`
    pub(crate) fn percent_values(left: &Value, right: &Value) -> Result<Value, VmError> {
        Self::numeric("'%%'", left, right, |a, b| Ok(a / 100.0 * b))
    }

    pub(crate) fn neg_value(value: &Value) -> Result<Value, VmError> {
        match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(VmError::type_error("unary '-'", "number", other.type_name())),
        }
    }

    pub(crate) fn lt_values(left: &Value, right: &Value) -> Result<bool, VmError> {
        Self::compare("'<'", left, right, |a, b| a < b, |a, b| a < b)
    }

    pub(crate) fn le_values(left: &Value, right: &Value) -> Result<bool, VmError> {
        Self::compare("'<='", left, right, |a, b| a <= b, |a, b| a <= b)
    }

    pub(crate) fn gt_values(left: &Value, right: &Value) -> Result<bool, VmError> {
        Self::compare("'>'", left, right, |a, b| a > b, |a, b| a > b)
    }

    pub(crate) fn ge_values(left: &Value, right: &Value) -> Result<bool, VmError> {
        Self::compare("'>='", left, right, |a, b| a >= b, |a, b| a >= b)
    }

    fn numeric(
        operation: &str,
        left: &Value,
        right: &Value,
        op: impl FnOnce(f64, f64) -> Result<f64, VmError>,
    ) -> Result<Value, VmError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => op(*a, *b).map(Value::Number),
            _ => Err(Self::binary_type_error(operation, "two numbers", left, right)),
        }
    }

    fn compare(
        operation: &str,
        left: &Value,
        right: &Value,
        numbers: impl FnOnce(f64, f64) -> bool,
        strings: impl FnOnce(&str, &str) -> bool,
    ) -> Result<bool, VmError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(numbers(*a, *b)),
            (Value::String(a), Value::String(b)) => Ok(strings(a, b)),
            _ => Err(Self::binary_type_error(
                operation,
                "two numbers or two strings",
                left,
                right,
            )),
        }
    }

    fn binary_type_error(operation: &str, expected: &str, left: &Value, right: &Value) -> VmError {
        VmError::type_error(
            operation,
            expected,
            &format!("{} and {}", left.type_name(), right.type_name()),
        )
    }
}
