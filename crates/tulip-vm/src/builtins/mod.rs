//! Built-in functions module
//!
//! Every VM gets these bound as globals by `Vm::init`, organized by category:
//! - I/O: print, println, files, input
//! - Time: clock, dates and times, layout formatting
//! - Random: integers and strings
//! - Conversion: type inspection, to_string, to_number, sprintf
//! - String: length, search, manipulation
//! - Array: modification, construction, search
//! - Map: key/value inspection
//! - Math: the `math` module

mod args;
pub mod array;
pub mod convert;
pub mod io;
pub mod map;
pub mod math;
pub mod random;
pub mod registry;
pub mod string;
pub mod time;

use crate::vm::Vm;
use registry::BuiltinRegistry;

/// Create and populate the built-in function registry
pub fn create_builtin_registry() -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();

    // ========================================================================
    // I/O Functions
    // ========================================================================

    registry.register("print", io::vm_print, -1); // variadic
    registry.register("println", io::vm_println, -1); // variadic
    registry.register("read_file", io::vm_read_file, 1);
    registry.register("write_file", io::vm_write_file, 2);
    registry.register("append_file", io::vm_append_file, 2);
    registry.register("file_exists", io::vm_file_exists, 1);
    registry.register("input", io::vm_input, -1); // optional prompt

    // ========================================================================
    // Time and Random
    // ========================================================================

    registry.register("clock", time::vm_clock, 0);
    registry.register("random_between", random::vm_random_between, 2);
    registry.register("random_string", random::vm_random_string, 1);

    // ========================================================================
    // Conversion and Inspection
    // ========================================================================

    registry.register("type_of", convert::vm_type_of, 1);
    registry.register("to_string", convert::vm_to_string, 1);
    registry.register("to_number", convert::vm_to_number, 1);
    registry.register("sprintf", convert::vm_sprintf, -1); // variadic

    // ========================================================================
    // String Functions
    // ========================================================================

    registry.register("len", string::vm_len, 1);
    registry.register("substring", string::vm_substring, 3);
    registry.register("str_contains", string::vm_str_contains, 2);
    registry.register("str_index_of", string::vm_str_index_of, 2);
    registry.register("str_replace", string::vm_str_replace, 3);
    registry.register("str_split", string::vm_str_split, 2);
    registry.register("str_upper", string::vm_str_upper, 1);
    registry.register("str_lower", string::vm_str_lower, 1);
    registry.register("str_trim", string::vm_str_trim, 1);
    registry.register("str_starts_with", string::vm_str_starts_with, 2);
    registry.register("str_ends_with", string::vm_str_ends_with, 2);

    // ========================================================================
    // Array Functions
    // ========================================================================

    registry.register("push", array::vm_push, 2);
    registry.register("pop", array::vm_pop, 1);
    registry.register("array_sort", array::vm_array_sort, 1);
    registry.register("array_split", array::vm_array_split, 2);
    registry.register("array_join", array::vm_array_join, -1); // variadic
    registry.register("array_to_string", array::vm_array_to_string, 1);
    registry.register("array_linear_search", array::vm_array_linear_search, 2);
    registry.register("array_binary_search", array::vm_array_binary_search, 2);
    registry.register("array_contains", array::vm_array_contains, 2);
    registry.register("array_reverse", array::vm_array_reverse, 1);

    // ========================================================================
    // Map Functions
    // ========================================================================

    registry.register("map_remove", map::vm_map_remove, 2);
    registry.register("map_contains_key", map::vm_map_contains_key, 2);
    registry.register("map_size", map::vm_map_size, 1);
    registry.register("map_keys", map::vm_map_keys, 1);
    registry.register("map_values", map::vm_map_values, 1);

    // ========================================================================
    // Date and Time
    // ========================================================================

    registry.register("Date", time::vm_date, 3);
    registry.register("Time", time::vm_time, 3);
    registry.register("DateTime", time::vm_datetime, 6);
    registry.register("date_now", time::vm_date_now, 0);
    registry.register("time_now", time::vm_time_now, 0);
    registry.register("datetime_now", time::vm_datetime_now, 0);
    registry.register("date_format_datetime", time::vm_date_format_datetime, 2);
    registry.register("time_format", time::vm_time_format, 2);
    registry.register("datetime_format", time::vm_datetime_format, 2);

    registry
}

/// Bind every builtin and the `math` module as globals of `vm`
pub fn install(vm: &mut Vm) {
    for meta in create_builtin_registry().iter() {
        vm.register_native(&meta.name, meta.arity, meta.func);
    }

    let members = math::math_members(vm);
    vm.define_module("math", members);
}
