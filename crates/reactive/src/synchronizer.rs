//! The result synchronizer.
//!
//! `ResultSynchronizer` binds a query specification, materializes its result
//! as an immutable `RowSet` snapshot and keeps that snapshot in step with the
//! query on demand:
//!
//! - `load()` re-executes and always replaces the snapshot, notifying every
//!   subscriber even when nothing differs.
//! - `refresh()` re-executes and replaces the snapshot only if the new result
//!   differs (length, order or row values). An unchanged result keeps the very
//!   same snapshot allocation and notifies nobody.
//!
//! Both operations block until the query returns. A failing query leaves the
//! synchronizer untouched.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tunes_core::{Row, Value};
//! use tunes_query::FnQuery;
//! use tunes_reactive::ResultSynchronizer;
//!
//! let source = Rc::new(RefCell::new(vec![Row::new(1, vec![Value::from("So What")])]));
//! let rows = source.clone();
//! let mut sync = ResultSynchronizer::with_query(FnQuery::new(move || Ok(rows.borrow().clone())));
//!
//! sync.load().unwrap();
//! assert_eq!(sync.len(), 1);
//! assert!(!sync.refresh().unwrap());
//!
//! source.borrow_mut().push(Row::new(2, vec![Value::from("Blue in Green")]));
//! assert!(sync.refresh().unwrap());
//! assert_eq!(sync.len(), 2);
//! ```

use crate::change_set::{empty_row_set, ChangeKind, ChangeSet, RowSet};
use crate::error::{SyncError, SyncResult};
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::rc::Rc;
use alloc::vec::Vec;
use log::{debug, trace, warn};
use tunes_core::Row;
use tunes_query::QuerySpec;

/// Lifecycle state of a synchronizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// No query bound.
    Unbound,
    /// A query is bound but has not been executed successfully yet.
    BoundUnloaded,
    /// The snapshot reflects at least one successful load or refresh.
    Loaded,
}

/// Keeps a materialized, observable snapshot of a query's result.
pub struct ResultSynchronizer<Q> {
    query: Option<Q>,
    rows: RowSet,
    state: SyncState,
    subscriptions: SubscriptionManager,
}

impl<Q> Default for ResultSynchronizer<Q> {
    fn default() -> Self {
        Self {
            query: None,
            rows: empty_row_set(),
            state: SyncState::Unbound,
            subscriptions: SubscriptionManager::new(),
        }
    }
}

impl<Q: QuerySpec> ResultSynchronizer<Q> {
    /// Creates an unbound synchronizer with an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a synchronizer bound to `query`. Nothing is executed yet.
    pub fn with_query(query: Q) -> Self {
        let mut sync = Self::default();
        sync.set_query(Some(query));
        sync
    }

    /// Binds a new query, or unbinds with `None`.
    ///
    /// The previous result is discarded and no notification is sent; call
    /// `load()` to execute the new query. This lets callers finish configuring
    /// the query (through `query_mut`) before the first execution.
    pub fn set_query(&mut self, query: Option<Q>) {
        self.state = if query.is_some() {
            SyncState::BoundUnloaded
        } else {
            SyncState::Unbound
        };
        self.query = query;
        if !self.rows.is_empty() {
            self.rows = empty_row_set();
        }
    }

    /// Returns the bound query.
    pub fn query(&self) -> Option<&Q> {
        self.query.as_ref()
    }

    /// Returns the bound query for in-place adjustment.
    ///
    /// Changes take effect on the next `load` or `refresh`; the current
    /// snapshot is left as is.
    pub fn query_mut(&mut self) -> Option<&mut Q> {
        self.query.as_mut()
    }

    #[inline]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Returns the materialized rows in query order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns a shared handle to the current snapshot.
    ///
    /// The handle stays valid, and unchanged, after later loads and refreshes.
    #[inline]
    pub fn snapshot(&self) -> RowSet {
        Rc::clone(&self.rows)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Subscribes to result changes.
    ///
    /// The callback runs synchronously inside `load`/`refresh`, before they
    /// return. It receives the new snapshot in `ChangeSet::current_result` and
    /// must not call back into this synchronizer.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeSet) + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Executes the bound query and replaces the snapshot unconditionally.
    ///
    /// Subscribers are always notified, even if the result is identical to
    /// the previous one. With no query bound this is a no-op.
    pub fn load(&mut self) -> SyncResult<()> {
        let Some(rows) = self.execute()? else {
            debug!("load skipped: no query bound");
            return Ok(());
        };

        debug!("load: {} rows", rows.len());
        self.apply(ChangeKind::Load, rows);
        self.state = SyncState::Loaded;
        Ok(())
    }

    /// Executes the bound query and applies the result only if it differs.
    ///
    /// Returns true if the snapshot was replaced (and subscribers notified).
    /// An unchanged result keeps the current snapshot instance.
    ///
    /// On a synchronizer that was never loaded, this performs the first load:
    /// it reports true and notifies only if the query returned any rows.
    /// With no query bound this returns false.
    pub fn refresh(&mut self) -> SyncResult<bool> {
        let Some(rows) = self.execute()? else {
            debug!("refresh skipped: no query bound");
            return Ok(false);
        };

        match self.state {
            SyncState::BoundUnloaded => {
                self.state = SyncState::Loaded;
                if rows.is_empty() {
                    debug!("refresh: first execution returned no rows");
                    return Ok(false);
                }
                debug!("refresh: first execution, {} rows", rows.len());
                self.apply(ChangeKind::Load, rows);
                Ok(true)
            }
            _ => {
                if rows[..] == self.rows[..] {
                    trace!("refresh: {} rows unchanged", rows.len());
                    return Ok(false);
                }
                debug!("refresh: {} -> {} rows", self.rows.len(), rows.len());
                self.apply(ChangeKind::Refresh, rows);
                Ok(true)
            }
        }
    }

    /// Runs the bound query. `Ok(None)` means no query is bound.
    fn execute(&self) -> SyncResult<Option<Vec<Row>>> {
        let Some(query) = self.query.as_ref() else {
            return Ok(None);
        };
        match query.execute() {
            Ok(rows) => Ok(Some(rows)),
            Err(cause) => {
                warn!("query execution failed: {}", cause);
                Err(SyncError::QueryExecution(cause))
            }
        }
    }

    /// Installs a new snapshot and notifies subscribers.
    fn apply(&mut self, kind: ChangeKind, rows: Vec<Row>) {
        let current: RowSet = Rc::from(rows);
        let previous = core::mem::replace(&mut self.rows, Rc::clone(&current));
        if self.subscriptions.is_empty() {
            return;
        }
        let changes = ChangeSet::diff(kind, &previous, current);
        self.subscriptions.notify_all(&changes);
    }
}
