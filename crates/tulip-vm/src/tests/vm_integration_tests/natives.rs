use super::helpers::{execute, new_vm, output_of, run_error};
use crate::error::VmError;
use crate::value::{FieldMap, Value};

#[test]
fn test_print_has_no_newline() {
    assert_eq!(output_of("print(\"Hello, world!\")"), "Hello, world!");
    assert_eq!(output_of("println(\"a\", 1)\nprintln()"), "a 1\n\n");
}

#[test]
fn test_clock_is_a_number() {
    let output = output_of("let time = clock()\nprint(time)");
    assert!(output.parse::<f64>().is_ok(), "{}", output);
}

#[test]
fn test_random_between_is_inclusive_integer() {
    for _ in 0..20 {
        let output = output_of("print(random_between(1, 10))");
        let n: i64 = output.parse().unwrap();
        assert!((1..=10).contains(&n));
    }
    assert_eq!(execute("random_between(4, 4)").unwrap(), Value::Number(4.0));
}

#[test]
fn test_random_string() {
    let output = output_of("let s = random_string(8)\nprint(s)");
    assert_eq!(output.len(), 8);
    assert!(output.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_file_operations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.txt");
    let path = path.to_string_lossy().replace('\\', "/");

    let source = format!(
        r#"
        let filename = "{}"
        print(file_exists(filename))
        write_file(filename, "Hello, ")
        append_file(filename, "World!")
        print(file_exists(filename))
        let readContent = read_file(filename)
        print(readContent)
        "#,
        path
    );
    assert_eq!(output_of(&source), "falsetrueHello, World!");
}

#[test]
fn test_read_missing_file_fails() {
    let err = run_error("read_file(\"/definitely/not/here.txt\")");
    assert!(err.to_string().contains("read_file(): cannot read"));
}

#[test]
fn test_dates() {
    assert_eq!(
        output_of("let d = Date(2023, 10, 15)\nprint(date_format_datetime(d, \"2006-01-02\"))"),
        "2023-10-15"
    );
    assert_eq!(
        output_of("let t = Time(14, 30, 45)\nprint(time_format(t, \"15:04:05\"))"),
        "14:30:45"
    );
    assert_eq!(
        output_of(
            "let dt = DateTime(2023, 10, 15, 14, 30, 45)\nprint(datetime_format(dt, \"2006-01-02 15:04:05\"))"
        ),
        "2023-10-15 14:30:45"
    );
}

#[test]
fn test_date_layout_words_and_chrono_formats() {
    let source = r#"
        let dt = DateTime(2024, 2, 5, 9, 7, 3)
        print(datetime_format(dt, "Mon Jan 2 3:04PM"), "|")
        print(datetime_format(dt, "%d/%m/%Y"), "|")
        print(date_format_datetime(dt, "January 02, 2006"))
    "#;
    assert_eq!(output_of(source), "Mon Feb 5 9:07AM |05/02/2024 |February 05, 2024");
}

#[test]
fn test_invalid_date() {
    let err = run_error("Date(2023, 2, 30)");
    assert!(err.to_string().contains("Date(): invalid date"));
}

#[test]
fn test_layout_not_applicable() {
    let err = run_error("time_format(Time(1, 2, 3), \"2006\")");
    assert!(err.to_string().contains("time_format()"));
}

#[test]
fn test_now_values() {
    assert_eq!(output_of("print(type_of(date_now()), type_of(time_now()), type_of(datetime_now()))"), "date time datetime");
}

#[test]
fn test_date_display() {
    assert_eq!(output_of("print(Date(2023, 1, 2))"), "<Date 2023-01-02>");
}

#[test]
fn test_sprintf() {
    assert_eq!(output_of("let formatted = sprintf(\"Value: %v\", 42)\nprint(formatted)"), "Value: 42");
    assert_eq!(output_of("print(sprintf(\"%s=%.1f (%d%%)\", \"pi\", math.pi, 99.9))"), "pi=3.1 (99%)");
}

#[test]
fn test_conversions() {
    let source = r#"
        print(type_of(1), type_of("s"), type_of([]), type_of({}), type_of(null), type_of(print))
        print(to_string(12) + "!", to_number(" 2.5 ") * 2, to_number(true))
    "#;
    assert_eq!(output_of(source), "number string array map null native12! 5 1");
}

#[test]
fn test_to_number_rejects_garbage() {
    let err = run_error("to_number(\"abc\")");
    assert!(err.to_string().contains("cannot convert 'abc' to a number"));
}

#[test]
fn test_math_module() {
    let source = r#"
        print(math.sqrt(16), math.floor(2.7), math.ceil(2.1), math.round(2.5), math.abs(-3))
        print(math.min(4, 2, 8), math.max(4, 2, 8))
        print(math.pi > 3.14 && math.pi < 3.15, math.e > 2.71)
    "#;
    assert_eq!(output_of(source), "4 2 3 3 32 8true true");
}

#[test]
fn test_math_unknown_member() {
    let err = run_error("math.tau");
    assert!(err.to_string().contains("Undefined field 'tau' on module 'math'."));
}

#[test]
fn test_builtin_type_errors_name_the_builtin() {
    let err = run_error("str_upper(1)");
    assert!(err.to_string().contains("str_upper()"));
    assert!(err.to_string().contains("expected string, got number"));
}

#[test]
fn test_registered_host_function() {
    let (mut vm, output) = new_vm();
    vm.register_native("double", 1, |_vm, args| match args {
        [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
        _ => Err(VmError::native("double", "expected a number")),
    });

    vm.run("print(double(21))", "<test>").unwrap();
    assert_eq!(output.contents(), "42");

    let err = vm.run("double(\"x\")", "<test>").unwrap_err();
    assert!(err.to_string().contains("double(): expected a number"));
}

#[test]
fn test_host_closure_state() {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let (mut vm, _) = new_vm();
    vm.register_native("tick", 0, move |_vm, _args| {
        seen.set(seen.get() + 1);
        Ok(Value::Null)
    });

    vm.run("tick()\ntick()\ntick()", "<test>").unwrap();
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_variadic_host_function() {
    let (mut vm, _) = new_vm();
    vm.register_native("count", -1, |_vm, args| Ok(Value::Number(args.len() as f64)));
    assert_eq!(vm.run("count(1, 2, 3)", "<test>").unwrap(), Value::Number(3.0));
    assert_eq!(vm.run("count()", "<test>").unwrap(), Value::Number(0.0));
}

#[test]
fn test_host_module() {
    let (mut vm, _) = new_vm();
    let mut members = FieldMap::new();
    members.insert(vm.intern("version"), Value::Number(3.0));
    let shout = vm.native("shout", 1, |vm, args| {
        let text = args[0].to_string().to_uppercase();
        Ok(vm.string(&text))
    });
    members.insert(vm.intern("shout"), shout);
    vm.define_module("host", members);

    let value = vm.run("host.shout(\"hi\") + to_string(host.version)", "<test>").unwrap();
    assert_eq!(value.to_string(), "HI3");
}

#[test]
fn test_natives_can_be_shadowed() {
    assert_eq!(output_of("let len = 3\nprint(len)"), "3");
}
