//! The `math` module: constants and numeric helpers

use super::args;
use super::registry::BuiltinRegistry;
use crate::error::VmError;
use crate::value::{FieldMap, Value};
use crate::vm::Vm;
use std::f64::consts;

// ============================================================================
// Helper Macros
// ============================================================================

/// Macro for unary functions over a single number
macro_rules! unary_math_fn {
    ($fn_name:ident, $name:expr, $f:expr) => {
        pub fn $fn_name(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
            let x = args::number($name, args, 0)?;
            Ok(Value::Number($f(x)))
        }
    };
}

unary_math_fn!(vm_sqrt, "sqrt", f64::sqrt);
unary_math_fn!(vm_floor, "floor", f64::floor);
unary_math_fn!(vm_ceil, "ceil", f64::ceil);
unary_math_fn!(vm_round, "round", f64::round);
unary_math_fn!(vm_abs, "abs", f64::abs);

/// Fold one or more numbers
fn fold(name: &str, args: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value, VmError> {
    let mut acc = args::number(name, args, 0)?;
    for index in 1..args.len() {
        acc = pick(acc, args::number(name, args, index)?);
    }
    Ok(Value::Number(acc))
}

pub fn vm_min(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    fold("min", args, f64::min)
}

pub fn vm_max(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    fold("max", args, f64::max)
}

/// Functions exposed as `math.<name>`
pub fn create_math_registry() -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();
    registry.register("sqrt", vm_sqrt, 1);
    registry.register("floor", vm_floor, 1);
    registry.register("ceil", vm_ceil, 1);
    registry.register("round", vm_round, 1);
    registry.register("abs", vm_abs, 1);
    registry.register("min", vm_min, -1); // variadic
    registry.register("max", vm_max, -1); // variadic
    registry
}

/// Members of the `math` module
pub fn math_members(vm: &mut Vm) -> FieldMap {
    let mut members = FieldMap::new();
    members.insert(vm.intern("pi"), Value::Number(consts::PI));
    members.insert(vm.intern("e"), Value::Number(consts::E));

    for meta in create_math_registry().iter() {
        let native = vm.native(&meta.name, meta.arity, meta.func);
        members.insert(vm.intern(&meta.name), native);
    }
    members
}
