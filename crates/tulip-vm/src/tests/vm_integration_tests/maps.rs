use super::helpers::{execute, output_of, run_error};
use crate::value::Value;

#[test]
fn test_access_and_assignment() {
    let source = r#"
        let map = { "name": "Alice", "age": 30 }
        print(map["name"])
        map["age"] = 31
        print(map["age"])
    "#;
    assert_eq!(output_of(source), "Alice31");
}

#[test]
fn test_remove_contains_size() {
    let source = r#"
        let m = {"a": 1, "b": 2}
        map_remove(m, "a")
        print(map_contains_key(m, "b"))
        print(map_size(m))
    "#;
    assert_eq!(output_of(source), "true1");
}

#[test]
fn test_merge_right_wins() {
    let source = r#"
        let a = {"x": 1, "y": 2}
        let b = {"y": 3, "z": 4}
        let c = a + b
        print(c["x"])
        print(c["y"])
        print(c["z"])
    "#;
    assert_eq!(output_of(source), "134");
}

#[test]
fn test_merge_leaves_operands_untouched() {
    assert_eq!(output_of("let a = {\"x\": 1}\nlet c = a + {\"x\": 2}\nprint(a.x, c.x)"), "1 2");
}

#[test]
fn test_field_syntax() {
    assert_eq!(output_of("let m = {}\nm.answer = 42\nprint(m.answer, m[\"answer\"])"), "42 42");
}

#[test]
fn test_missing_key() {
    let err = run_error("let m = {\"a\": 1}\nm[\"b\"]");
    assert!(err.to_string().contains("Key 'b' not found in map."));
}

#[test]
fn test_non_string_key() {
    let err = run_error("let m = {1: 2}");
    assert!(err.to_string().contains("string key"));
}

#[test]
fn test_computed_keys() {
    assert_eq!(output_of("let k = \"ke\"\nlet m = {k + \"y\": 1}\nprint(m.key)"), "1");
}

#[test]
fn test_keys_values_in_insertion_order() {
    let source = r#"
        let m = {"b": 2, "a": 1}
        m["c"] = 3
        print(map_keys(m), map_values(m))
    "#;
    assert_eq!(output_of(source), "[b, a, c] [2, 1, 3]");
}

#[test]
fn test_display() {
    assert_eq!(output_of("print({\"a\": 1, \"b\": [true]})"), "{a: 1, b: [true]}");
}

#[test]
fn test_iterating_map_yields_keys() {
    assert_eq!(output_of("iter (let k in {\"x\": 1, \"y\": 2}) { print(k) }"), "xy");
}

#[test]
fn test_len_of_map() {
    assert_eq!(execute("len({\"a\": 1})").unwrap(), Value::Number(1.0));
}
