//! Integration tests for Layer 1: Store
//!
//! Tests for the declaration table and the annotation side-table.

mod annotation_store;
mod declarations;
