//! Query layer tests
//!
//! Tests for:
//! - Name, keyword and prefix lookups
//! - Cursor context and class paths
//! - The build-once grammar host
//! - Grammar export

pub mod tests_cursor;
pub mod tests_export;
pub mod tests_host;
