//! Random value built-in functions

use super::args;
use crate::error::VmError;
use crate::value::Value;
use crate::vm::Vm;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Uniform integer in `[lo, hi]`
pub fn vm_random_between(_vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let lo = args::integer("random_between", args, 0)?;
    let hi = args::integer("random_between", args, 1)?;
    if lo > hi {
        return Err(VmError::native(
            "random_between",
            format!("lower bound {} exceeds upper bound {}", lo, hi),
        ));
    }
    let n = rand::thread_rng().gen_range(lo..=hi);
    Ok(Value::Number(n as f64))
}

/// Alphanumeric string of the given length
pub fn vm_random_string(vm: &mut Vm, args: &[Value]) -> Result<Value, VmError> {
    let len = args::integer("random_string", args, 0)?;
    let len = usize::try_from(len)
        .map_err(|_| VmError::native("random_string", format!("invalid length {}", len)))?;
    let text: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect();
    Ok(vm.string(&text))
}
