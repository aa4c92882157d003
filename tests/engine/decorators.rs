//! Integration tests for decorator stacking order
//!
//! Decorators are listed outermost first and applied innermost first.

use annotate_engine::{Annotation, ErrorKind, Registry, Targets, Value, description};

#[test]
fn stacked_descriptions_on_a_class() {
    // @description('awesome!')
    // @description('cool!')
    // class Foo
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    let decorated = registry
        .decorate(foo, &[description("awesome!"), description("cool!")])
        .unwrap();

    assert_eq!(decorated, foo);
    assert_eq!(
        registry.extract(foo).unwrap()["description"],
        Value::list(["cool!", "awesome!"])
    );
}

#[test]
fn outermost_single_valued_decorator_wins() {
    let mut registry = Registry::new();
    let f = registry.define_function("f").unwrap();
    registry
        .decorate(
            f,
            &[
                Annotation::new("owner", "outer"),
                Annotation::new("owner", "middle"),
                Annotation::new("owner", "inner"),
            ],
        )
        .unwrap();

    assert_eq!(registry.extract(f).unwrap()["owner"], Value::from("outer"));
}

#[test]
fn keys_are_stored_in_application_order() {
    let mut registry = Registry::new();
    let f = registry.define_function("f").unwrap();
    registry
        .decorate(f, &[Annotation::new("first_listed", 1), Annotation::new("last_listed", 2)])
        .unwrap();

    let view = registry.extract(f).unwrap();
    let keys: Vec<_> = view.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["last_listed", "first_listed"]);
}

#[test]
fn decorate_equals_manual_bottom_up_application() {
    let stack = [description("a"), Annotation::new("k", 1), description("b")];

    let mut stacked = Registry::new();
    let f = stacked.define_function("f").unwrap();
    stacked.decorate(f, &stack).unwrap();

    let mut manual = Registry::new();
    let g = manual.define_function("g").unwrap();
    for annotation in stack.iter().rev() {
        manual.apply(annotation, g).unwrap();
    }

    assert_eq!(stacked.extract(f).unwrap(), manual.extract(g).unwrap());
}

#[test]
fn failing_decorator_stops_the_stack() {
    let mut registry = Registry::new();
    let f = registry.define_function("f").unwrap();
    let class_only = Annotation::new("entity", true).with_targets(Targets::CLASS);

    // Applied order: "inner", then the failing one; "outer" never runs.
    let err = registry
        .decorate(
            f,
            &[
                Annotation::new("outer", 1),
                class_only,
                Annotation::new("inner", 1),
            ],
        )
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::TargetMismatch { .. }));
    let view = registry.extract(f).unwrap();
    assert!(view.contains_key("inner"));
    assert!(!view.contains_key("outer"));
}

#[test]
fn decorate_accepts_vectors() {
    let mut registry = Registry::new();
    let f = registry.define_function("f").unwrap();
    let stack = vec![description("x"), description("y")];
    registry.decorate(f, &stack).unwrap();

    assert_eq!(registry.extract(f).unwrap()["description"], Value::list(["y", "x"]));
}
