use super::helpers::{execute, output_of, run_error};
use crate::error::{TulipError, VmError};
use crate::value::Value;

#[test]
fn test_literal_kinds() {
    let source = r#"
        let num = 42
        let message = "Hello"
        let isTrue = true
        let nothing = null
        print(num)
        print(message)
        print(isTrue)
        print(nothing)
    "#;
    assert_eq!(output_of(source), "42Hellotruenull");
}

#[test]
fn test_negative_literal() {
    assert_eq!(output_of("let negative = -10\nprint(negative)"), "-10");
}

#[test]
fn test_uninitialized_let_is_null() {
    assert_eq!(execute("let x; x").unwrap(), Value::Null);
}

#[test]
fn test_block_shadowing() {
    let source = r#"
        let x = 10
        {
            let x = 20
            print(x)
        }
        print(x)
    "#;
    assert_eq!(output_of(source), "2010");
}

#[test]
fn test_nested_block_locals() {
    let source = r#"
        {
            let a = 1
            {
                let b = a + 1
                {
                    let c = b + 1
                    print(a, b, c)
                }
            }
        }
    "#;
    assert_eq!(output_of(source), "1 2 3");
}

#[test]
fn test_global_constants() {
    assert_eq!(output_of("const PI = 3.14\nprint(PI)"), "3.14");
    assert_eq!(
        output_of("const A = 1\nconst B = \"test\"\nprint(A)\nprint(B)"),
        "1test"
    );
}

#[test]
fn test_assign_to_global_constant_fails() {
    match run_error("const LIMIT = 10\nLIMIT = 11") {
        TulipError::Runtime(err) => {
            assert_eq!(err.error, VmError::ConstAssignment("LIMIT".to_string()));
            assert_eq!(err.line, 2);
        }
        other => panic!("expected a runtime error, got {}", other),
    }
}

#[test]
fn test_assign_to_local_constant_fails() {
    match run_error("{\n  const k = 1\n  k = 2\n}") {
        TulipError::Runtime(err) => {
            assert_eq!(err.error, VmError::ConstAssignment("k".to_string()));
            assert_eq!(err.line, 3);
        }
        other => panic!("expected a runtime error, got {}", other),
    }
}

#[test]
fn test_increment_of_constant_fails() {
    let err = run_error("const n = 1\nn++");
    assert!(err.to_string().contains("Cannot assign to constant 'n'."));
}

#[test]
fn test_redeclaring_constant_fails() {
    let err = run_error("const A = 1\nlet A = 2");
    assert!(err.to_string().contains("Cannot redeclare constant 'A'."));
}

#[test]
fn test_redeclaring_mutable_global_replaces_it() {
    assert_eq!(execute("let a = 1\nlet a = a + 1\na").unwrap(), Value::Number(2.0));
}

#[test]
fn test_undefined_variable() {
    let err = run_error("print(missing)");
    assert!(err.to_string().contains("Undefined variable 'missing'."));
}

#[test]
fn test_assignment_to_undefined_global_fails() {
    let err = run_error("ghost = 1");
    assert!(err.to_string().contains("Undefined variable 'ghost'."));
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(execute("let a\nlet b\na = b = 7\na + b").unwrap(), Value::Number(14.0));
}

#[test]
fn test_args_global() {
    assert_eq!(output_of("print(args)"), "[tulip]");
}
