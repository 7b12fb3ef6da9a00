//! Tunes Core - Row, value and error types shared across the tunes crates.
//!
//! - `Value`: A single cell of a query result row, with a total order
//! - `Row`: One result record with a stable identity and a change version
//! - `Error`: Errors raised by data sources and queries
//!
//! # Example
//!
//! ```rust
//! use tunes_core::{Row, Value};
//!
//! let row = Row::new(1, vec![
//!     Value::String("Blue Train".into()),
//!     Value::Int64(1957),
//! ]);
//!
//! assert_eq!(row.id(), 1);
//! assert_eq!(row.get(1), Some(&Value::Int64(1957)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
mod value;

pub use error::{Error, Result};
pub use row::{next_row_id, set_next_row_id_if_greater, Row, RowId};
pub use value::Value;
