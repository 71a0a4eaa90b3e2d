use super::helpers::{new_vm, run_error, SharedBuffer};
use crate::error::{InterpretResult, TulipError, VmError};

#[test]
fn test_runtime_error_has_stack_trace() {
    let source = "function fail() {\n  return 1 + \"x\"\n}\nfail()";
    let err = run_error(source);
    let TulipError::Runtime(err) = err else {
        panic!("expected a runtime error");
    };

    assert_eq!(err.line, 2);
    assert_eq!(
        err.trace,
        vec!["[line 2] in fail()".to_string(), "[line 4] in script".to_string()]
    );
    assert!(matches!(err.error, VmError::TypeError { .. }));
}

#[test]
fn test_anonymous_frame_in_trace() {
    let source = "let f = function() { return null + 1 }\nf()";
    let message = run_error(source).to_string();
    assert!(message.contains("[line 1] in <anonymous>()"), "{}", message);
    assert!(message.ends_with("[line 2] in script"), "{}", message);
}

#[test]
fn test_compile_errors_are_collected() {
    let err = run_error("let = 1\nlet = 2");
    let TulipError::Compile(errors) = err else {
        panic!("expected compile errors");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "[line 1] Error at '=': Expect variable name.\n[line 2] Error at '=': Expect variable name."
    );
}

#[test]
fn test_unterminated_string() {
    let message = run_error("let s = \"abc").to_string();
    assert!(message.contains("Unterminated string."), "{}", message);
}

#[test]
fn test_interpret_result_codes() {
    let (mut vm, _) = new_vm();
    let errors = SharedBuffer::default();
    vm.set_error_output(errors.clone());

    assert_eq!(vm.interpret("let a = 1", "<test>"), InterpretResult::Ok);
    assert_eq!(vm.interpret("let = 1", "<test>"), InterpretResult::CompileError);
    assert_eq!(vm.interpret("undefined_thing", "<test>"), InterpretResult::RuntimeError);

    let report = errors.contents();
    assert!(report.contains("[line 1] Error at '=': Expect variable name."));
    assert!(report.contains("Undefined variable 'undefined_thing'."));
    assert!(report.contains("[line 1] in script"));
}

#[test]
fn test_vm_is_usable_after_error() {
    let (mut vm, output) = new_vm();
    assert!(vm.run("let x = 1\nx()", "<test>").is_err());
    vm.run("print(x + 1)", "<test>").unwrap();
    assert_eq!(output.contents(), "2");
}

#[test]
fn test_not_callable() {
    let message = run_error("let x = 1\nx()").to_string();
    assert!(message.starts_with("Can only call functions, got number."));
}

#[test]
fn test_arity_mismatch() {
    let message = run_error("function f(a, b) { return a }\nf(1)").to_string();
    assert!(message.starts_with("f expected 2 arguments but got 1."), "{}", message);

    let message = run_error("len()").to_string();
    assert!(message.starts_with("len expected 1 arguments but got 0."), "{}", message);
}

#[test]
fn test_stack_overflow() {
    let message = run_error("function f(n) { return f(n + 1) }\nf(0)").to_string();
    assert!(message.starts_with("Stack overflow."));
}

#[test]
fn test_deep_trace_is_collapsed() {
    let err = run_error("function f(n) { return f(n + 1) }\nf(0)");
    let TulipError::Runtime(err) = err else {
        panic!("expected a runtime error");
    };

    assert_eq!(err.trace.len(), 21);
    assert!(err.trace[..10].iter().all(|frame| frame == "[line 1] in f()"));
    assert!(err.trace[10].starts_with("... "), "{}", err.trace[10]);
    assert!(err.trace[10].ends_with(" more frames"), "{}", err.trace[10]);
    assert_eq!(err.trace[20], "[line 2] in script");
}

#[test]
fn test_short_trace_is_complete() {
    let source = "function a() { return null + 1 }\nfunction b() { return a() }\nb()";
    let TulipError::Runtime(err) = run_error(source) else {
        panic!("expected a runtime error");
    };
    assert_eq!(
        err.trace,
        vec![
            "[line 1] in a()".to_string(),
            "[line 2] in b()".to_string(),
            "[line 3] in script".to_string()
        ]
    );
}

#[test]
fn test_compile_error_runs_nothing() {
    let (mut vm, output) = new_vm();
    let errors = SharedBuffer::default();
    vm.set_error_output(errors.clone());

    assert_eq!(
        vm.interpret("print(\"ran\")\n}", "<test>"),
        InterpretResult::CompileError
    );
    assert_eq!(output.contents(), "");
    assert!(errors.contents().contains("[line 2] Error at '}'"), "{}", errors.contents());
}

#[test]
fn test_deep_nesting_reports_error() {
    let (mut vm, output) = new_vm();
    let errors = SharedBuffer::default();
    vm.set_error_output(errors.clone());

    let depth = 20_000;
    let source = format!("print({}1{})", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(vm.interpret(&source, "<test>"), InterpretResult::CompileError);
    assert_eq!(output.contents(), "");
    assert!(errors.contents().contains("Nesting too deep."));

    vm.run("print(((1 + 2)))", "<test>").unwrap();
    assert_eq!(output.contents(), "3");
}

#[test]
fn test_integer_division_by_zero() {
    let message = run_error("10 /_ 0").to_string();
    assert!(message.starts_with("Division by zero."));
}

#[test]
fn test_assign_to_undefined_global() {
    let message = run_error("nope = 3").to_string();
    assert!(message.starts_with("Undefined variable 'nope'."));
}

#[test]
fn test_break_outside_loop() {
    let message = run_error("break").to_string();
    assert!(message.contains("Can't use 'break' outside of a loop."));
    let message = run_error("continue").to_string();
    assert!(message.contains("Can't use 'continue' outside of a loop."));
}

#[test]
fn test_invalid_increment_target() {
    let message = run_error("let a = 1\nlet b = (a + 1)++").to_string();
    assert!(message.contains("Invalid increment target."), "{}", message);
}

#[test]
fn test_lone_percent_is_rejected() {
    let message = run_error("let a = 5 % 2").to_string();
    assert!(message.starts_with("[line 1] Error"), "{}", message);
}
