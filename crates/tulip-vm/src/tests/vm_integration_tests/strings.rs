use super::helpers::{execute, output_of, run_error};
use crate::value::Value;

#[test]
fn test_concatenation() {
    assert_eq!(
        output_of("let str = \"Hello, \" + \"world!\"\nprint(str)"),
        "Hello, world!"
    );
}

#[test]
fn test_subtraction_removes_first_occurrence() {
    let source = r#"
        let text = "Hello, world!"
        let cropped = text - "world"
        print(cropped)
    "#;
    assert_eq!(output_of(source), "Hello, !");
    assert_eq!(output_of("print(\"abab\" - \"ab\")"), "ab");
}

#[test]
fn test_substring_and_contains() {
    let source = r#"
        let str = "Hello World"
        print(substring(str, 0, 5))
        print(str_contains(str, "World"))
    "#;
    assert_eq!(output_of(source), "Hellotrue");
}

#[test]
fn test_substring_out_of_range() {
    let err = run_error("substring(\"abc\", 1, 5)");
    assert!(err.to_string().contains("substring()"));
}

#[test]
fn test_escapes() {
    assert_eq!(output_of(r#"print("a\tb\n\"c\"")"#), "a\tb\n\"c\"");
}

#[test]
fn test_indexing_and_slicing() {
    assert_eq!(output_of("let s = \"tulip\"\nprint(s[0], s[4], s[1:3], s[:2], s[3:])"), "t p ul tu ip");
}

#[test]
fn test_string_index_out_of_bounds() {
    let err = run_error("\"abc\"[3]");
    assert!(err.to_string().contains("Index 3 out of bounds for length 3."));
}

#[test]
fn test_strings_are_immutable() {
    let err = run_error("let s = \"abc\"\ns[0] = \"x\"");
    assert!(err.to_string().contains("index assignment"));
}

#[test]
fn test_string_builtins() {
    let source = r#"
        print(str_upper("tulip"), str_lower("ROSE"), str_trim("  x  "))
        print(str_index_of("hello", "l"), str_index_of("hello", "z"))
        print(str_replace("a-b-c", "-", "+"))
        print(str_starts_with("tulip", "tu"), str_ends_with("tulip", "ip"))
        print(len("tulip"))
    "#;
    assert_eq!(output_of(source), "TULIP rose x2 -1a+b+ctrue true5");
}

#[test]
fn test_str_split() {
    assert_eq!(output_of("print(str_split(\"a,b,c\", \",\"))"), "[a, b, c]");
    assert_eq!(execute("len(str_split(\"abc\", \"\"))").unwrap(), Value::Number(3.0));
}

#[test]
fn test_string_comparison() {
    assert_eq!(execute("\"b\" > \"a\"").unwrap(), Value::Bool(true));
    assert_eq!(execute("\"same\" == \"sa\" + \"me\"").unwrap(), Value::Bool(true));
}

#[test]
fn test_iterating_string_yields_characters() {
    assert_eq!(output_of("iter (let c in \"abc\") { print(c, \"\") }"), "a b c ");
}
