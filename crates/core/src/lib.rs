//! Shelfview Core - Core types for the shelfview booklist engine.
//!
//! This crate provides the foundational types shared by every engine crate:
//!
//! - `DataType`: Supported data types (Boolean, Int64, Float64, String, DateTime)
//! - `Value`: Runtime values carried by materialized list rows
//! - `collation`: Case-insensitive comparison helpers used by sorting and
//!   group-break detection
//! - `Error`: Error types for list-build and node operations
//!
//! # Example
//!
//! ```rust
//! use shelfview_core::{DataType, Value};
//! use shelfview_core::collation::compare_values;
//! use core::cmp::Ordering;
//!
//! let a = Value::String("apple".into());
//! let b = Value::String("Banana".into());
//! assert_eq!(a.data_type(), Some(DataType::String));
//! // Collation ignores case: "apple" sorts before "Banana".
//! assert_eq!(compare_values(&a, &b, true), Ordering::Less);
//! ```

#![no_std]

extern crate alloc;

pub mod collation;
mod error;
mod value;

pub use error::{Error, Result};
pub use value::{DataType, Value};

/// Identifier of a materialized list row. Assigned sequentially by the
/// materializer, starting at 1, in list emission order. The ordering of
/// row ids therefore encodes the display order of the list.
pub type RowId = u64;
