//! Integration tests for declaration allocation
//!
//! Tests allocation, removal, generational indices, and stale reference detection.

use annotate_foundation::{DeclarationKind, ErrorKind};
use annotate_store::DeclarationTable;

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn spawn_multiple_declarations() {
    let mut table = DeclarationTable::new();
    let f = table.spawn("f", DeclarationKind::Function, None).unwrap();
    let c = table.spawn("C", DeclarationKind::Class, None).unwrap();

    assert!(table.exists(f));
    assert!(table.exists(c));
    assert_eq!(table.len(), 2);
    assert_ne!(f.index, c.index);
}

#[test]
fn names_need_not_be_unique() {
    let mut table = DeclarationTable::new();
    let a = table.spawn("dup", DeclarationKind::Function, None).unwrap();
    let b = table.spawn("dup", DeclarationKind::Function, None).unwrap();

    assert_ne!(a, b);
    assert_eq!(table.name(a).unwrap(), table.name(b).unwrap());
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn removed_id_is_stale_after_reuse() {
    let mut table = DeclarationTable::new();
    let old = table.spawn("old", DeclarationKind::Function, None).unwrap();
    table.destroy(old).unwrap();
    let new = table.spawn("new", DeclarationKind::Function, None).unwrap();

    assert_eq!(old.index, new.index);
    assert!(table.exists(new));
    let err = table.validate(old).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleDeclaration(_)));
}

#[test]
fn removed_id_is_stale_before_reuse() {
    let mut table = DeclarationTable::new();
    let f = table.spawn("f", DeclarationKind::Function, None).unwrap();
    table.destroy(f).unwrap();

    let err = table.get(f).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleDeclaration(_)));
    let err = table.destroy(f).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleDeclaration(_)));
}

#[test]
fn subclass_keeps_parent_alive() {
    let mut table = DeclarationTable::new();
    let base = table.spawn("Base", DeclarationKind::Class, None).unwrap();
    let mid = table.spawn("Mid", DeclarationKind::Class, Some(base)).unwrap();
    let leaf = table.spawn("Leaf", DeclarationKind::Class, Some(mid)).unwrap();

    assert!(table.destroy(base).is_err());
    assert!(table.destroy(mid).is_err());
    table.destroy(leaf).unwrap();
    table.destroy(mid).unwrap();
    table.destroy(base).unwrap();
    assert!(table.is_empty());
}

#[test]
fn stale_parent_is_rejected() {
    let mut table = DeclarationTable::new();
    let base = table.spawn("Base", DeclarationKind::Class, None).unwrap();
    table.destroy(base).unwrap();

    let err = table.spawn("Sub", DeclarationKind::Class, Some(base)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleDeclaration(_)));
    assert!(table.is_empty());
}
