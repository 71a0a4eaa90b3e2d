use super::helpers::{new_vm, new_vm_with, SharedBuffer};
use crate::error::{InterpretResult, TulipError, VmError};
use crate::value::Value;
use crate::vm::{Vm, VmConfig};
use std::thread;

#[test]
fn test_interpret_before_init() {
    let mut vm = Vm::new();
    let errors = SharedBuffer::default();
    vm.set_error_output(errors.clone());

    assert!(!vm.is_initialized());
    assert_eq!(vm.interpret("print(1)", "<test>"), InterpretResult::RuntimeError);
    assert_eq!(errors.contents(), "VM is not initialized.\n");
}

#[test]
fn test_free_then_init_again() {
    let (mut vm, output) = new_vm();
    vm.run("let x = 1", "<test>").unwrap();

    vm.free();
    assert!(!vm.is_initialized());
    match vm.run("print(1)", "<test>") {
        Err(TulipError::Runtime(err)) => assert_eq!(err.error, VmError::NotInitialized),
        other => panic!("expected NotInitialized, got {:?}", other),
    }

    vm.init(&["again"]);
    let message = vm.run("x", "<test>").unwrap_err().to_string();
    assert!(message.starts_with("Undefined variable 'x'."));

    vm.run("print(args[0], len(args))", "<test>").unwrap();
    assert_eq!(output.contents(), "again 1");
}

#[test]
fn test_args_global() {
    let mut vm = Vm::new();
    vm.init(&["script.tlp", "--fast", "42"]);
    let value = vm.run("args[2]", "<test>").unwrap();
    assert_eq!(value.to_string(), "42");

    let Some(Value::Array(args)) = vm.get_global("args") else {
        panic!("args should be an array");
    };
    assert_eq!(args.borrow().len(), 3);
}

#[test]
fn test_last_value_is_reset_per_run() {
    let (mut vm, _) = new_vm();
    vm.run("1 + 2", "<test>").unwrap();
    assert_eq!(vm.last_value(), &Value::Number(3.0));

    let value = vm.run("let y = 5", "<test>").unwrap();
    assert_eq!(value, Value::Null);
    assert_eq!(vm.last_value(), &Value::Null);
}

#[test]
fn test_globals_persist_across_runs() {
    let (mut vm, output) = new_vm();
    vm.run("let counter = 0\nfunction bump() { counter = counter + 1 }", "<one>").unwrap();
    vm.run("bump()\nbump()", "<two>").unwrap();
    vm.run("print(counter)", "<three>").unwrap();
    assert_eq!(output.contents(), "2");
}

#[test]
fn test_const_survives_across_runs() {
    let (mut vm, _) = new_vm();
    vm.run("const limit = 10", "<one>").unwrap();
    let message = vm.run("limit = 11", "<two>").unwrap_err().to_string();
    assert!(message.starts_with("Cannot assign to constant 'limit'."));
    let message = vm.run("let limit = 12", "<three>").unwrap_err().to_string();
    assert!(message.starts_with("Cannot redeclare constant 'limit'."));
}

#[test]
fn test_configured_call_depth() {
    let config = VmConfig {
        max_call_depth: 16,
        ..VmConfig::default()
    };
    let (mut vm, _) = new_vm_with(config);
    assert_eq!(vm.config().max_call_depth, 16);

    let source = "function down(n) { if (n == 0) return 0\n return down(n - 1) }";
    vm.run(source, "<test>").unwrap();
    assert!(vm.run("down(10)", "<test>").is_ok());
    let message = vm.run("down(20)", "<test>").unwrap_err().to_string();
    assert!(message.starts_with("Stack overflow."));
}

#[test]
fn test_independent_vms_on_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let mut vm = Vm::new();
                vm.init(&["worker"]);
                let source = format!(
                    "function fib(n) {{ if (n < 2) return n\n return fib(n - 1) + fib(n - 2) }}\nfib({})",
                    10 + i
                );
                match vm.run(&source, "<thread>") {
                    Ok(Value::Number(n)) => n,
                    other => panic!("unexpected result {:?}", other),
                }
            })
        })
        .collect();

    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![55.0, 89.0, 144.0, 233.0]);
}
