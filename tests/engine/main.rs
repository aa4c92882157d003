//! Integration tests for Layer 2: Engine
//!
//! Tests for annotation application, decorator stacking, subclass
//! inheritance, hooks, builders, and extraction.

mod decorators;
mod inheritance;
