use super::helpers::{execute, output_of};
use crate::value::Value;

#[test]
fn test_nested_capture() {
    let source = r#"
        function outer() {
            let a = 1;
            let b = 2;
            function middle() {
                let c = 3;
                let d = 4;
                function inner() {
                    print(a + c + b + d);
                }
                inner();
            }
            middle();
        }
        outer();
    "#;
    assert_eq!(output_of(source), "10");
}

#[test]
fn test_counter() {
    let source = r#"
        function makeCounter() {
            let value = 0
            function increment() {
                value = value + 1
                return value
            }
            return increment
        }
        let counter = makeCounter()
        print(counter())
        print(counter())
    "#;
    assert_eq!(output_of(source), "12");
}

#[test]
fn test_independent_counters() {
    let source = r#"
        function makeCounter() {
            let n = 0
            return function() { n++; return n }
        }
        let a = makeCounter()
        let b = makeCounter()
        a()
        a()
        print(a(), b())
    "#;
    assert_eq!(output_of(source), "3 1");
}

#[test]
fn test_shared_upvalue() {
    let source = r#"
        let get
        let set
        {
            let shared = "before"
            get = function() { return shared }
            set = function(v) { shared = v }
        }
        set("after")
        print(get())
    "#;
    assert_eq!(output_of(source), "after");
}

#[test]
fn test_write_through_open_upvalue() {
    let source = r#"
        function run() {
            let x = 1
            function bump() { x = x + 10 }
            bump()
            return x
        }
        run()
    "#;
    assert_eq!(execute(source).unwrap(), Value::Number(11.0));
}

#[test]
fn test_loop_closures_capture_each_iteration() {
    let source = r#"
        let fns = []
        iter (let item in [1, 2, 3]) {
            push(fns, function() { return item })
        }
        print(fns[0](), fns[1](), fns[2]())
    "#;
    assert_eq!(output_of(source), "1 2 3");
}

#[test]
fn test_closure_closed_by_block_exit_inside_loop() {
    let source = r#"
        let fns = []
        let i = 0
        while (i < 3) {
            let j = i * 10
            push(fns, function() { return j })
            i++
        }
        print(fns[0](), fns[2]())
    "#;
    assert_eq!(output_of(source), "0 20");
}

#[test]
fn test_closure_survives_break() {
    let source = r#"
        let saved
        while (true) {
            let msg = "kept"
            saved = function() { return msg }
            break
        }
        print(saved())
    "#;
    assert_eq!(output_of(source), "kept");
}

#[test]
fn test_recursive_local_function() {
    let source = r#"
        function run() {
            function fact(n) {
                if (n <= 1) return 1
                return n * fact(n - 1)
            }
            return fact(5)
        }
        print(run())
    "#;
    assert_eq!(output_of(source), "120");
}

#[test]
fn test_display() {
    assert_eq!(output_of("function f() {}\nprint(f)"), "<fn f>");
    assert_eq!(output_of("print(function() {})"), "<fn>");
}
