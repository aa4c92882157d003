//! Integration tests for the annotation side-table

use annotate_foundation::{DeclarationKind, Value};
use annotate_store::{AnnotationMap, AnnotationStore, DeclarationTable};

#[test]
fn store_follows_init_has_get_contract() {
    let mut table = DeclarationTable::new();
    let f = table.spawn("f", DeclarationKind::Function, None).unwrap();
    let mut store: AnnotationStore<Value> = AnnotationStore::new();

    assert!(!store.has(f));
    assert!(store.get(f).is_none());

    store.init(f).insert("k".to_string(), Value::from(1));
    assert!(store.has(f));

    // init on an owned mapping is a no-op
    assert_eq!(store.init(f).len(), 1);
    assert_eq!(store.get(f).unwrap()["k"], Value::from(1));
}

#[test]
fn replaced_mapping_is_independent_of_source() {
    let mut table = DeclarationTable::new();
    let parent = table.spawn("P", DeclarationKind::Class, None).unwrap();
    let child = table.spawn("C", DeclarationKind::Class, Some(parent)).unwrap();
    let mut store: AnnotationStore<Value> = AnnotationStore::new();

    store.init(parent).insert("k".to_string(), Value::list([1]));
    let copy: AnnotationMap<Value> = store.get(parent).unwrap().clone();
    store.replace(child, copy);

    store
        .get_mut(child)
        .unwrap()
        .insert("k".to_string(), Value::list([1, 2]));

    assert_eq!(store.get(parent).unwrap()["k"], Value::list([1]));
    assert_eq!(store.get(child).unwrap()["k"], Value::list([1, 2]));
}
