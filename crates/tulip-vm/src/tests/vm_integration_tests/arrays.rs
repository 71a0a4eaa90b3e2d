use super::helpers::{execute, output_of, run_error};
use crate::value::Value;

#[test]
fn test_indexing() {
    assert_eq!(output_of("let arr = [1, 2, 3]\nprint(arr[0])\nprint(arr[1])\nprint(arr[2])"), "123");
}

#[test]
fn test_push_pop_len() {
    let source = r#"
        let arr = [1, 2, 3]
        push(arr, 4)
        print(arr[3])
        print(pop(arr))
        print(len(arr))
    "#;
    assert_eq!(output_of(source), "443");
}

#[test]
fn test_length() {
    assert_eq!(output_of("let arr = [1, 2, 3, 4, 5]\nprint(len(arr))"), "5");
}

#[test]
fn test_sort_in_place() {
    assert_eq!(
        output_of("let arr = [5, 3, 8, 1, 42, 10]\narray_sort(arr)\nprint(arr)"),
        "[1, 3, 5, 8, 10, 42]"
    );
    assert_eq!(
        output_of("let arr = [\"pear\", \"apple\", \"fig\"]\narray_sort(arr)\nprint(arr)"),
        "[apple, fig, pear]"
    );
}

#[test]
fn test_sort_mixed_kinds_fails() {
    let err = run_error("array_sort([1, \"a\"])");
    assert!(err.to_string().contains("array_sort()"));
}

#[test]
fn test_split() {
    let source = r#"
        let arr = [1, 2, "sep", 3, 4, "sep", 5, 6]
        let split = array_split(arr, "sep")
        print(array_to_string(split[0]))
        print(array_to_string(split[1]))
        print(array_to_string(split[2]))
    "#;
    assert_eq!(output_of(source), "[1, 2][3, 4][5, 6]");
}

#[test]
fn test_join() {
    let source = r#"
        let a1 = [1, 2]
        let a2 = [3, 4]
        let a3 = [5, 6]
        let joined = array_join(a1, a2, a3)
        print(array_to_string(joined))
    "#;
    assert_eq!(output_of(source), "[1, 2, 3, 4, 5, 6]");
}

#[test]
fn test_search() {
    let source = r#"
        let arr = ["cat", "dog", "bird", "dog"]
        let linear = array_linear_search(arr, "dog")
        let sorted = ["apple", "banana", "cherry", "date"]
        let binary = array_binary_search(sorted, "cherry")
        print(linear)
        print(binary)
    "#;
    assert_eq!(output_of(source), "12");
    assert_eq!(execute("array_binary_search([1, 3, 5], 4)").unwrap(), Value::Number(-1.0));
    assert_eq!(execute("array_contains([1, 2], 2)").unwrap(), Value::Bool(true));
}

#[test]
fn test_reverse() {
    assert_eq!(output_of("let a = [1, 2, 3]\narray_reverse(a)\nprint(a)"), "[3, 2, 1]");
}

#[test]
fn test_slices() {
    let source = r#"
        let arr = [1, 2, 3, 4, 5]
        let slice1 = arr[1:3]
        let slice2 = arr[2:]
        print(array_to_string(slice1))
        print(array_to_string(slice2))
    "#;
    assert_eq!(output_of(source), "[2, 3][3, 4, 5]");
    assert_eq!(output_of("print([1, 2, 3][:2], [1, 2, 3][3:])"), "[1, 2] []");
}

#[test]
fn test_invalid_slice() {
    let err = run_error("[1, 2, 3][2:1]");
    assert!(err.to_string().contains("Invalid slice [2:1] for length 3."));
    let err = run_error("[1, 2, 3][0:4]");
    assert!(err.to_string().contains("Invalid slice"));
}

#[test]
fn test_index_assignment() {
    assert_eq!(output_of("let a = [0, 0]\na[1] = 5\nprint(a)"), "[0, 5]");
}

#[test]
fn test_index_out_of_bounds() {
    let err = run_error("let a = [1]\na[1]");
    assert!(err.to_string().contains("Index 1 out of bounds for length 1."));
    let err = run_error("let a = [1]\na[-1]");
    assert!(err.to_string().contains("Index -1 out of bounds"));
}

#[test]
fn test_fractional_index() {
    let err = run_error("[1, 2][0.5]");
    assert!(err.to_string().contains("integer"));
}

#[test]
fn test_arrays_share_identity() {
    assert_eq!(output_of("let a = [1]\nlet b = a\npush(b, 2)\nprint(a, a == b, a == [1, 2])"), "[1, 2] true false");
}

#[test]
fn test_pop_empty_fails() {
    let err = run_error("pop([])");
    assert!(err.to_string().contains("pop(): array is empty"));
}

#[test]
fn test_nested_arrays() {
    assert_eq!(output_of("let grid = [[1, 2], [3, 4]]\nprint(grid[1][0])"), "3");
}
