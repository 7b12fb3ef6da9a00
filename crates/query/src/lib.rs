//! Tunes Query - The query specification contract and reference queries.
//!
//! A query specification is anything that can be executed synchronously to
//! produce an ordered list of rows. The synchronizer in `tunes-reactive`
//! only ever talks to the [`QuerySpec`] trait; the concrete types here are
//! the collaborators an application would plug in.
//!
//! - [`QuerySpec`]: execute a query, report the tables it reads
//! - [`FnQuery`]: a query backed by a closure
//! - [`MemoryTable`]: a shared, id-addressed in-memory row store
//! - [`TableQuery`]: filter / key range / sort / skip / limit over a `MemoryTable`
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tunes_core::Value;
//! use tunes_query::{MemoryTable, QuerySpec, SortOrder, TableQuery};
//!
//! let table = Rc::new(RefCell::new(MemoryTable::new(1, "albums", 2)));
//! table.borrow_mut().insert_values(vec!["Kind of Blue".into(), Value::Int64(1959)]).unwrap();
//! table.borrow_mut().insert_values(vec!["Blue Train".into(), Value::Int64(1957)]).unwrap();
//!
//! let query = TableQuery::new(table.clone()).order_by(1, SortOrder::Asc);
//! let rows = query.execute().unwrap();
//! assert_eq!(rows[0].get(0), Some(&Value::String("Blue Train".into())));
//! ```

#![no_std]

extern crate alloc;

pub mod sort;
pub mod spec;
pub mod table;
pub mod table_query;

pub use sort::{compare_rows, sort_rows, SortOrder};
pub use spec::{FnQuery, QuerySpec};
pub use table::{MemoryTable, TableId};
pub use table_query::{RowFilter, TableQuery};
