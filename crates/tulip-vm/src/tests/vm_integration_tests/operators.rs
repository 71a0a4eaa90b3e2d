use super::helpers::{execute, output_of, run_error};
use crate::value::Value;

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(output_of("let result = 1 + 2 * 3\nprint(result)"), "7");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(output_of("print(2 ** 2)"), "4");
    assert_eq!(execute("2 ** 3 ** 2").unwrap(), Value::Number(512.0));
}

#[test]
fn test_floor_division() {
    assert_eq!(output_of("print(7 /_ 3)"), "2");
    assert_eq!(execute("-7 /_ 2").unwrap(), Value::Number(-4.0));
}

#[test]
fn test_floor_division_by_zero() {
    let err = run_error("print(1 /_ 0)");
    assert!(err.to_string().contains("Division by zero."));
}

#[test]
fn test_percent_of() {
    assert_eq!(output_of("print(25 %% 1000)"), "250");
}

#[test]
fn test_equality_and_logic() {
    let source = r#"
        print(5 == 5)
        print(5 != 3)
        print(true && true)
        print(false || true)
    "#;
    assert_eq!(output_of(source), "truetruetruetrue");
}

#[test]
fn test_logical_operators_short_circuit() {
    let source = r#"
        let calls = 0
        function touch() { calls = calls + 1; return true }
        false && touch()
        true || touch()
        print(calls)
    "#;
    assert_eq!(output_of(source), "0");
}

#[test]
fn test_logical_operators_yield_operands() {
    assert_eq!(execute("null || \"fallback\"").unwrap().to_string(), "fallback");
    assert_eq!(execute("1 && 2").unwrap(), Value::Number(2.0));
}

#[test]
fn test_comparisons() {
    assert_eq!(execute("3 < 4").unwrap(), Value::Bool(true));
    assert_eq!(execute("3 >= 4").unwrap(), Value::Bool(false));
    assert_eq!(execute("\"apple\" < \"banana\"").unwrap(), Value::Bool(true));
}

#[test]
fn test_mixed_comparison_fails() {
    let err = run_error("1 < \"2\"");
    assert!(err.to_string().contains("number and string"));
}

#[test]
fn test_equality_across_kinds() {
    assert_eq!(execute("1 == \"1\"").unwrap(), Value::Bool(false));
    assert_eq!(execute("null == false").unwrap(), Value::Bool(false));
    assert_eq!(execute("null == null").unwrap(), Value::Bool(true));
}

#[test]
fn test_increment_forms() {
    assert_eq!(output_of("let x = 5\nprint(x++)\nprint(++x)"), "57");
    assert_eq!(output_of("let x = 5\nprint(x--)\nprint(--x)"), "53");
}

#[test]
fn test_increment_locals_and_upvalues() {
    let source = r#"
        function run() {
            let i = 0
            i++
            ++i
            function bump() { return i++ }
            bump()
            return i
        }
        print(run())
    "#;
    assert_eq!(output_of(source), "3");
}

#[test]
fn test_increment_fields_and_indices() {
    let source = r#"
        let m = {"hits": 1}
        m.hits++
        let arr = [1, 2]
        arr[1]++
        print(m.hits, arr[1], --arr[0])
    "#;
    assert_eq!(output_of(source), "2 3 0");
}

#[test]
fn test_increment_requires_number() {
    let err = run_error("let s = \"a\"\ns++");
    assert!(err.to_string().contains("'++'"));
}

#[test]
fn test_invalid_increment_target() {
    let err = run_error("(1 + 2)++");
    assert!(err.to_string().contains("Invalid increment target."));
}

#[test]
fn test_negate_requires_number() {
    let err = run_error("-\"x\"");
    assert!(err.to_string().contains("unary '-'"));
}

#[test]
fn test_number_formatting() {
    assert_eq!(output_of("print(0.1 + 0.2)"), "0.30000000000000004");
    assert_eq!(output_of("print(1e21)"), "1e+21");
    assert_eq!(output_of("print(10 / 4)"), "2.5");
}
