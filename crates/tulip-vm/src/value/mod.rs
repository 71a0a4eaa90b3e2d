//! Runtime values
//!
//! A value is either an immediate (null, bool, number), a calendar value, or
//! a reference-counted object. Object kinds that scripts can mutate (arrays,
//! maps, instances, iterators) sit behind `RefCell`; the rest are immutable
//! once created.

mod display;
mod interner;
mod object;

pub use display::format_number;
pub use interner::Interner;
pub use object::{
    ArrayIterator, Closure, Instance, Module, Native, NativeFn, StructType, Upvalue, UpvalueRef,
};

use crate::bytecode::Function;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable array storage
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// String-keyed entries of a map or struct instance, in insertion order
pub type FieldMap = IndexMap<Rc<str>, Value>;

/// Shared, mutable map storage
pub type MapRef = Rc<RefCell<FieldMap>>;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    /// Interned string
    String(Rc<str>),
    Array(ArrayRef),
    Map(MapRef),
    StructType(Rc<StructType>),
    Instance(Rc<RefCell<Instance>>),
    /// Bare prototype; only found in constant pools
    Function(Rc<Function>),
    Closure(Rc<Closure>),
    Native(Rc<Native>),
    Module(Rc<Module>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Iterator(Rc<RefCell<ArrayIterator>>),
}

impl Value {
    pub fn array(values: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(values)))
    }

    pub fn map(entries: FieldMap) -> Value {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    /// Clone with a fresh top-level container for arrays and maps;
    /// elements stay shared
    pub fn copy_container(&self) -> Value {
        match self {
            Value::Array(items) => Value::array(items.borrow().clone()),
            Value::Map(entries) => Value::map(entries.borrow().clone()),
            other => other.clone(),
        }
    }

    /// `null` and `false` are falsy; everything else is truthy
    #[inline]
    pub fn is_falsey(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(false))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Kind name used in error messages and by `type_of`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::StructType(_) => "struct",
            Value::Instance(_) => "instance",
            Value::Function(_) | Value::Closure(_) => "function",
            Value::Native(_) => "native",
            Value::Module(_) => "module",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::Iterator(_) => "iterator",
        }
    }
}

/// Language equality: immediates and calendar values by value, strings by
/// identity then content, every other object by identity
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => Rc::ptr_eq(x, y) || x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Time(x), Value::Time(y)) => x == y,
        (Value::DateTime(x), Value::DateTime(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Rc::ptr_eq(x, y),
        (Value::StructType(x), Value::StructType(y)) => Rc::ptr_eq(x, y),
        (Value::Instance(x), Value::Instance(y)) => Rc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
        (Value::Closure(x), Value::Closure(y)) => Rc::ptr_eq(x, y),
        (Value::Native(x), Value::Native(y)) => Rc::ptr_eq(x, y),
        (Value::Module(x), Value::Module(y)) => Rc::ptr_eq(x, y),
        (Value::Iterator(x), Value::Iterator(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
