//! Integration tests for inherited annotations
//!
//! Tests snapshot publication onto subclasses, filtering, multi-level chains,
//! and independence of parent and subclass mappings.

use annotate_engine::{Annotation, Registry, Value, description};

fn inherited(key: &str, value: impl Into<Value>) -> Annotation {
    Annotation::new(key, value).with_inherited(true)
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn subclass_receives_only_inherited_annotations() {
    let mut registry = Registry::new();
    let c = registry.define_class("C", None).unwrap();
    registry.apply(&inherited("k", "v"), c).unwrap();
    registry.apply(&Annotation::new("j", "private"), c).unwrap();

    let d = registry.define_class("D", Some(c)).unwrap();

    let view = registry.extract(d).unwrap();
    assert_eq!(view.get("k"), Some(&Value::from("v")));
    assert!(!view.contains_key("j"));
}

#[test]
fn subclass_of_annotated_class_owns_a_mapping() {
    let mut registry = Registry::new();
    let c = registry.define_class("C", None).unwrap();
    registry.apply(&Annotation::new("j", 1), c).unwrap();

    let d = registry.define_class("D", Some(c)).unwrap();

    assert!(registry.has_annotations(d).unwrap());
    assert!(registry.extract(d).unwrap().is_empty());
}

#[test]
fn subclass_of_plain_class_has_no_mapping() {
    let mut registry = Registry::new();
    let c = registry.define_class("C", None).unwrap();
    let d = registry.define_class("D", Some(c)).unwrap();

    assert!(!registry.has_annotations(d).unwrap());
}

#[test]
fn stock_description_is_not_inherited() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    registry
        .decorate(foo, &[description("awesome!"), description("cool!")])
        .unwrap();

    let bar = registry.define_class("Bar", Some(foo)).unwrap();
    assert!(registry.extract(bar).unwrap().is_empty());
}

#[test]
fn inherited_repeatable_list_is_copied() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    let doc = |text: &str| description(text).with_inherited(true);
    registry.decorate(foo, &[doc("awesome!"), doc("cool!")]).unwrap();

    let bar = registry.define_class("Bar", Some(foo)).unwrap();

    assert_eq!(
        registry.extract(bar).unwrap(),
        registry.extract(foo).unwrap()
    );
    assert_eq!(
        registry.extract(bar).unwrap()["description"],
        Value::list(["cool!", "awesome!"])
    );
}

// =============================================================================
// Snapshot semantics
// =============================================================================

#[test]
fn later_parent_annotations_are_not_propagated() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    registry.apply(&inherited("early", 1), foo).unwrap();

    let bar = registry.define_class("Bar", Some(foo)).unwrap();
    registry.apply(&inherited("late", 2), foo).unwrap();
    registry.apply(&inherited("early", 3), foo).unwrap();

    let view = registry.extract(bar).unwrap();
    assert_eq!(view.get("early"), Some(&Value::from(1)));
    assert!(!view.contains_key("late"));

    // A subclass defined now sees the current state.
    let baz = registry.define_class("Baz", Some(foo)).unwrap();
    let view = registry.extract(baz).unwrap();
    assert_eq!(view.get("early"), Some(&Value::from(3)));
    assert_eq!(view.get("late"), Some(&Value::from(2)));
}

#[test]
fn appending_on_subclass_leaves_parent_list_alone() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    let tag = |v: &str| Annotation::new("tag", v).with_repeatable(true).with_inherited(true);
    registry.apply(&tag("base"), foo).unwrap();

    let bar = registry.define_class("Bar", Some(foo)).unwrap();
    registry.apply(&tag("extra"), bar).unwrap();

    assert_eq!(registry.extract(foo).unwrap()["tag"], Value::list(["base"]));
    assert_eq!(registry.extract(bar).unwrap()["tag"], Value::list(["base", "extra"]));
}

#[test]
fn subclass_annotations_merge_over_inherited_base() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    registry.apply(&inherited("owner", "foo"), foo).unwrap();
    registry.apply(&inherited("kept", true), foo).unwrap();

    let bar = registry.define_class("Bar", Some(foo)).unwrap();
    registry.apply(&inherited("owner", "bar"), bar).unwrap();

    let view = registry.extract(bar).unwrap();
    assert_eq!(view["owner"], Value::from("bar"));
    assert_eq!(view["kept"], Value::from(true));
    assert_eq!(registry.extract(foo).unwrap()["owner"], Value::from("foo"));
}

#[test]
fn parent_is_unchanged_by_subclass_definition() {
    let mut registry = Registry::new();
    let foo = registry.define_class("Foo", None).unwrap();
    registry.apply(&inherited("k", 1), foo).unwrap();
    registry.apply(&Annotation::new("j", 2), foo).unwrap();
    let before = registry.extract(foo).unwrap();

    registry.define_class("Bar", Some(foo)).unwrap();

    assert_eq!(registry.extract(foo).unwrap(), before);
}

// =============================================================================
// Multi-level chains
// =============================================================================

#[test]
fn three_level_chain_keeps_inherited_entry() {
    let mut registry = Registry::new();
    let c = registry.define_class("C", None).unwrap();
    registry.apply(&inherited("k", "v"), c).unwrap();
    registry.apply(&Annotation::new("j", "private"), c).unwrap();

    let d = registry.define_class("D", Some(c)).unwrap();
    let e = registry.define_class("E", Some(d)).unwrap();

    let view = registry.extract(e).unwrap();
    assert_eq!(view.get("k"), Some(&Value::from("v")));
    assert!(!view.contains_key("j"));
    assert!(!registry.has_own_hook(d));
}

#[test]
fn intermediate_annotations_flow_down() {
    let mut registry = Registry::new();
    let c = registry.define_class("C", None).unwrap();
    registry.apply(&inherited("from_c", 1), c).unwrap();

    let d = registry.define_class("D", Some(c)).unwrap();
    registry.apply(&inherited("from_d", 2), d).unwrap();
    registry.apply(&Annotation::new("d_only", 3), d).unwrap();

    let e = registry.define_class("E", Some(d)).unwrap();

    let view = registry.extract(e).unwrap();
    assert_eq!(view.get("from_c"), Some(&Value::from(1)));
    assert_eq!(view.get("from_d"), Some(&Value::from(2)));
    assert!(!view.contains_key("d_only"));
}

#[test]
fn deep_chain() {
    let mut registry = Registry::new();
    let root = registry.define_class("C0", None).unwrap();
    registry.apply(&inherited("k", "root"), root).unwrap();

    let mut current = root;
    for level in 1..=20 {
        current = registry
            .define_class(format!("C{level}"), Some(current))
            .unwrap();
    }

    assert_eq!(registry.ancestors(current).unwrap().len(), 20);
    assert_eq!(registry.extract(current).unwrap()["k"], Value::from("root"));
}

#[test]
fn annotating_only_a_subclass_starts_a_new_chain() {
    let mut registry = Registry::new();
    let base = registry.define_class("Base", None).unwrap();
    let mid = registry.define_class("Mid", Some(base)).unwrap();
    registry.apply(&inherited("k", 1), mid).unwrap();

    let leaf = registry.define_class("Leaf", Some(mid)).unwrap();
    let sibling = registry.define_class("Sibling", Some(base)).unwrap();

    assert_eq!(registry.extract(leaf).unwrap()["k"], Value::from(1));
    assert!(!registry.has_annotations(sibling).unwrap());
}
