use super::helpers::{output_of, run_error};

#[test]
fn test_defaults() {
    assert_eq!(output_of("struct Point { x = 1, y = 2 }\nlet p = Point{}\nprint(p.x + p.y)"), "3");
}

#[test]
fn test_field_assignment() {
    let source = r#"
        struct Vec { x = 100; y = 500; }
        let v = Vec{}
        v.x = 10
        print(v.x)
        print(v.y)
    "#;
    assert_eq!(output_of(source), "10500");
}

#[test]
fn test_literal_overrides_defaults() {
    assert_eq!(output_of("struct P { x = 1, y = 2 }\nlet p = P{y = 5}\nprint(p.x, p.y)"), "1 5");
}

#[test]
fn test_fields_without_defaults_are_null() {
    assert_eq!(output_of("struct User { name; age }\nlet u = User{}\nprint(u.name, u.age)"), "null null");
}

#[test]
fn test_addition() {
    let source = r#"
        struct Vec { x = 0; y = 0; }
        let v1 = Vec{x = 1, y = 2}
        let v2 = Vec{x = 3, y = 4}
        let sum = v1 + v2
        print(sum.x)
        print(sum.y)
    "#;
    assert_eq!(output_of(source), "46");
}

#[test]
fn test_addition_of_different_types_fails() {
    let source = r#"
        struct A { x = 1 }
        struct B { x = 1 }
        A{} + B{}
    "#;
    let err = run_error(source);
    assert!(err.to_string().contains("Struct mismatch"));
}

#[test]
fn test_addition_with_different_field_sets_fails() {
    let source = r#"
        struct A { x = 1 }
        let a = A{}
        let b = A{}
        b.extra = 2
        a + b
    "#;
    let err = run_error(source);
    assert!(err.to_string().contains("different fields"));
}

#[test]
fn test_forced_initialization() {
    let source = r#"
        struct Vec3 {}
        let v = Vec3!{x = 1, y = 2, z = 3}
        print(v.x)
        print(v.y)
        print(v.z)
    "#;
    assert_eq!(output_of(source), "123");
}

#[test]
fn test_forced_initialization_skips_defaults() {
    let source = r#"
        struct P { x = 1, y = 2 }
        let p = P!{x = 9}
        print(p.x)
        p.y
    "#;
    let err = run_error(source);
    assert!(err.to_string().contains("Undefined field 'y' on struct 'P'."));
}

#[test]
fn test_undefined_field() {
    let err = run_error("struct S {}\nlet s = S{}\ns.missing");
    assert!(err.to_string().contains("Undefined field 'missing'"));
}

#[test]
fn test_display() {
    assert_eq!(output_of("struct P { x = 1, y = 2 }\nprint(P{})"), "<(struct P) x=1, y=2>");
    assert_eq!(output_of("struct P {}\nprint(P)"), "<struct P>");
}

#[test]
fn test_instances_are_references() {
    assert_eq!(output_of("struct C { n = 0 }\nlet a = C{}\nlet b = a\nb.n = 3\nprint(a.n)"), "3");
}

#[test]
fn test_defaults_are_evaluated_once_per_declaration() {
    let source = r#"
        let made = 0
        function next() { made++; return made }
        struct T { id = next() }
        let a = T{}
        let b = T{}
        print(a.id, b.id, made)
    "#;
    assert_eq!(output_of(source), "1 1 1");
}

#[test]
fn test_container_defaults_are_per_instance() {
    let source = r#"
        struct Bag { items = [], meta = {} }
        let a = Bag{}
        let b = Bag{}
        push(a.items, 1)
        a.meta["k"] = true
        print(len(a.items), len(b.items), map_size(a.meta), map_size(b.meta))
        let c = Bag{}
        print(len(c.items))
    "#;
    assert_eq!(output_of(source), "1 0 1 00");
}

#[test]
fn test_local_struct() {
    let source = r#"
        function make() {
            struct Pair { left = "l", right = "r" }
            return Pair{right = "R"}
        }
        let p = make()
        print(p.left + p.right)
    "#;
    assert_eq!(output_of(source), "lR");
}

#[test]
fn test_struct_literal_on_non_struct_fails() {
    let err = run_error("let x = 1\nx{}");
    assert!(err.to_string().contains("struct type"));
}
