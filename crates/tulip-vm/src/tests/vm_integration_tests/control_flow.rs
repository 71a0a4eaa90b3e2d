use super::helpers::{execute, output_of, run_error};
use crate::value::Value;

#[test]
fn test_if_else() {
    assert_eq!(
        output_of("let x = 10\nif (x > 5) { print(\"greater\") } else { print(\"less\") }"),
        "greater"
    );
}

#[test]
fn test_guarded_chain() {
    let template = r#"
        if (x > 0) {
            print("Positive")
        } | (x < 0) {
            print("Negative")
        } else {
            print("Zero")
        }
    "#;
    for (x, expected) in [("0", "Zero"), ("3", "Positive"), ("-3", "Negative")] {
        let source = format!("let x = {}\n{}", x, template);
        assert_eq!(output_of(&source), expected);
    }
}

#[test]
fn test_guarded_chain_without_else() {
    let source = r#"
        let x = 7
        if (x == 1) { print("one") } | (x == 7) { print("seven") } | (x > 5) { print("big") }
    "#;
    assert_eq!(output_of(source), "seven");
}

#[test]
fn test_for_loop() {
    assert_eq!(output_of("for (let i = 0; i < 3; i = i + 1) {\n print(i)\n}"), "012");
}

#[test]
fn test_for_loop_with_increment_and_empty_clauses() {
    assert_eq!(output_of("for (let i = 0; i < 3; i++) { print(i) }"), "012");
    assert_eq!(
        output_of("let i = 0\nfor (;;) { if (i == 2) break\n i++ }\nprint(i)"),
        "2"
    );
}

#[test]
fn test_while_loop() {
    assert_eq!(
        output_of("let count = 0;\nwhile (count < 3) {\n print(count)\n count = count + 1\n}"),
        "012"
    );
}

#[test]
fn test_iter_loop() {
    assert_eq!(output_of("iter (let item in [10, 20, 30]) {\n print(item)\n}"), "102030");
}

#[test]
fn test_iter_over_empty_array() {
    assert_eq!(output_of("iter (let x in []) { print(x) }\nprint(\"done\")"), "done");
}

#[test]
fn test_iter_rejects_numbers() {
    let err = run_error("iter (let x in 5) {}");
    assert!(err.to_string().contains("iter"));
}

#[test]
fn test_break() {
    let source = r#"
        let i = 0
        while (i < 10) {
            print(i)
            i = i + 1
            if (i == 4) {
                break
            }
        }
    "#;
    assert_eq!(output_of(source), "0123");
}

#[test]
fn test_continue() {
    let source = r#"
        let x = 0
        while (x < 5) {
            x = x + 1
            if (x == 3) {
                continue
            }
            print(x)
        }
    "#;
    assert_eq!(output_of(source), "1245");
}

#[test]
fn test_continue_in_for_runs_increment() {
    assert_eq!(
        output_of("for (let i = 0; i < 5; i++) { if (i == 1 || i == 3) continue\n print(i) }"),
        "024"
    );
}

#[test]
fn test_break_and_continue_in_iter() {
    let source = r#"
        iter (let n in [1, 2, 3, 4, 5]) {
            if (n == 2) continue
            if (n == 4) break
            print(n)
        }
    "#;
    assert_eq!(output_of(source), "13");
}

#[test]
fn test_nested_loops_break_inner_only() {
    let source = r#"
        for (let i = 0; i < 3; i++) {
            for (let j = 0; j < 3; j++) {
                if (j == 1) break
                print(i, j, "")
            }
        }
    "#;
    assert_eq!(output_of(source), "0 0 1 0 2 0 ");
}

#[test]
fn test_break_discards_loop_locals() {
    let source = r#"
        function f() {
            let total = 0
            while (true) {
                let a = 1
                let b = 2
                total = a + b
                break
            }
            return total
        }
        f()
    "#;
    assert_eq!(execute(source).unwrap(), Value::Number(3.0));
}

#[test]
fn test_break_outside_loop() {
    let err = run_error("break");
    assert!(err.to_string().contains("Can't use 'break' outside of a loop."));
    let err = run_error("continue");
    assert!(err.to_string().contains("Can't use 'continue' outside of a loop."));
}

#[test]
fn test_truthiness() {
    assert_eq!(output_of("if (0) { print(\"zero is truthy\") }"), "zero is truthy");
    assert_eq!(output_of("if (\"\") { print(\"empty is truthy\") }"), "empty is truthy");
    assert_eq!(output_of("if (null) { print(1) } else { print(2) }"), "2");
}
