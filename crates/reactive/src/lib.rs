//! Tunes Reactive - Keeps query results materialized and observable.
//!
//! A [`ResultSynchronizer`] owns a bound query specification and a snapshot of
//! its last result. Consumers read the snapshot and subscribe to changes:
//!
//! - `load()`: re-execute and always replace the snapshot (always notifies)
//! - `refresh()`: re-execute and replace only if the result differs;
//!   returns whether anything changed
//!
//! # Core Concepts
//!
//! - `RowSet`: immutable, shared snapshot of a result
//! - `ChangeSet`: what subscribers receive (new snapshot + row-level diff)
//! - `SubscriptionManager`: ordered, synchronous change callbacks
//! - `SyncRegistry`: refreshes many synchronizers together
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tunes_core::Value;
//! use tunes_query::{MemoryTable, SortOrder, TableQuery};
//! use tunes_reactive::ResultSynchronizer;
//!
//! let tracks = Rc::new(RefCell::new(MemoryTable::new(1, "tracks", 1)));
//! tracks.borrow_mut().insert_values(vec![Value::from("Naima")]).unwrap();
//!
//! let mut sync = ResultSynchronizer::with_query(
//!     TableQuery::new(tracks.clone()).order_by(0, SortOrder::Asc),
//! );
//! sync.subscribe(|changes| {
//!     println!("{} rows now", changes.current_result.len());
//! });
//!
//! sync.load().unwrap();
//! assert!(!sync.refresh().unwrap());
//!
//! tracks.borrow_mut().insert_values(vec![Value::from("Giant Steps")]).unwrap();
//! assert!(sync.refresh().unwrap());
//! assert_eq!(sync.rows()[0].get(0), Some(&Value::from("Giant Steps")));
//! ```

#![no_std]

extern crate alloc;

pub mod change_set;
pub mod error;
pub mod registry;
pub mod subscription;
pub mod synchronizer;

pub use change_set::{empty_row_set, ChangeKind, ChangeSet, RowSet};
pub use error::{SyncError, SyncResult};
pub use registry::{Refresh, RefreshReport, SyncId, SyncRegistry};
pub use subscription::{ChangeCallback, Subscription, SubscriptionId, SubscriptionManager};
pub use synchronizer::{ResultSynchronizer, SyncState};

// Re-export commonly used types from dependencies
pub use tunes_core::{Error, Row, Value};
pub use tunes_query::{FnQuery, QuerySpec};
