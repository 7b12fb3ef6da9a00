//! Change notifications for materialized query results.
//!
//! A `ChangeSet` is what subscribers receive after `load` or a changing
//! `refresh`. It carries the new immutable snapshot plus the row-level
//! difference against the snapshot it replaced.

use alloc::rc::Rc;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tunes_core::{Row, RowId};

/// An immutable snapshot of a materialized result.
///
/// Snapshots are shared, never mutated: a refresh that finds nothing new
/// keeps handing out the same allocation.
pub type RowSet = Rc<[Row]>;

/// Returns a new empty snapshot.
pub fn empty_row_set() -> RowSet {
    Rc::from(Vec::new())
}

/// The operation that produced a change set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Unconditional reload. Delivered even when nothing differs.
    Load,
    /// Refresh that found a difference.
    Refresh,
}

/// The difference between two materialized results.
///
/// - `added`: rows whose id was not in the previous result
/// - `removed`: rows whose id is no longer in the result
/// - `modified`: rows present in both with different values (old, new)
/// - `reordered`: rows present in both appear in a different relative order
/// - `current_result`: the snapshot now materialized
#[derive(Clone, Debug)]
pub struct ChangeSet {
    pub kind: ChangeKind,
    pub added: Vec<Row>,
    pub removed: Vec<Row>,
    pub modified: Vec<(Row, Row)>,
    pub reordered: bool,
    pub current_result: RowSet,
}

impl ChangeSet {
    /// Computes the change from `previous` to `current`.
    ///
    /// Rows are matched by id. When the same id occurs several times, the
    /// n-th occurrence in `current` is matched with the n-th in `previous`.
    pub fn diff(kind: ChangeKind, previous: &[Row], current: RowSet) -> Self {
        let mut old_by_id: HashMap<RowId, Vec<&Row>> = HashMap::with_capacity(previous.len());
        for row in previous {
            old_by_id.entry(row.id()).or_default().push(row);
        }

        let mut added = Vec::new();
        let mut modified = Vec::new();
        let mut matched: HashMap<RowId, usize> = HashMap::with_capacity(current.len());
        let mut retained_new_order = Vec::new();

        for row in current.iter() {
            let occurrence = matched.entry(row.id()).or_insert(0);
            match old_by_id.get(&row.id()).and_then(|rows| rows.get(*occurrence)) {
                Some(old) => {
                    if *old != row {
                        modified.push(((*old).clone(), row.clone()));
                    }
                    retained_new_order.push((row.id(), *occurrence));
                    *occurrence += 1;
                }
                None => added.push(row.clone()),
            }
        }

        let mut removed = Vec::new();
        let mut seen: HashMap<RowId, usize> = HashMap::with_capacity(previous.len());
        let mut retained_old_order = Vec::new();
        for row in previous {
            let occurrence = seen.entry(row.id()).or_insert(0);
            if *occurrence < matched.get(&row.id()).copied().unwrap_or(0) {
                retained_old_order.push((row.id(), *occurrence));
            } else {
                removed.push(row.clone());
            }
            *occurrence += 1;
        }

        Self {
            kind,
            added,
            removed,
            modified,
            reordered: retained_old_order != retained_new_order,
            current_result: current,
        }
    }

    /// Returns true if no row was added, removed, modified or moved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty() && !self.reordered
    }

    /// Returns the number of row-level changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}
