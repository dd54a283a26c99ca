//! Grammar derivation tests
//!
//! Tests for:
//! - Symbol table construction and classification
//! - Rule creation and domain links
//! - Reachability, depth, package order and ancestors
//! - Deriving from schema files on disk

pub mod tests_closure;
pub mod tests_derivation;
pub mod tests_schema_files;
