//! Registry of synchronizers that are refreshed together.
//!
//! An application usually keeps several synchronizers side by side (one per
//! list it shows). `SyncRegistry` holds weak handles to them so that a data
//! import can refresh all of them at once, or only the ones reading a table
//! that just changed.

use crate::error::{SyncError, SyncResult};
use crate::synchronizer::ResultSynchronizer;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use log::{debug, warn};
use tunes_query::{QuerySpec, TableId};

/// Unique identifier for a registered synchronizer.
pub type SyncId = u64;

/// Object-safe view of a synchronizer, used by the registry.
pub trait Refresh {
    /// Unconditionally reloads the result.
    fn load(&mut self) -> SyncResult<()>;
    /// Re-executes and applies the result only if it changed.
    fn refresh(&mut self) -> SyncResult<bool>;
    /// Tables read by the bound query.
    fn dependencies(&self) -> Vec<TableId>;
}

impl<Q: QuerySpec> Refresh for ResultSynchronizer<Q> {
    fn load(&mut self) -> SyncResult<()> {
        ResultSynchronizer::load(self)
    }

    fn refresh(&mut self) -> SyncResult<bool> {
        ResultSynchronizer::refresh(self)
    }

    fn dependencies(&self) -> Vec<TableId> {
        self.query().map(|q| q.dependencies()).unwrap_or_default()
    }
}

/// Outcome of a registry-wide pass.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Synchronizers whose snapshot was replaced.
    pub changed: Vec<SyncId>,
    /// Synchronizers whose query failed; their snapshot is untouched.
    pub failed: Vec<(SyncId, SyncError)>,
    /// Synchronizers that were already borrowed and could not be visited.
    pub skipped: Vec<SyncId>,
}

impl RefreshReport {
    /// Returns true if no synchronizer failed.
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn any_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

enum Pass {
    Load,
    Refresh,
}

/// Tracks synchronizers by weak reference.
pub struct SyncRegistry {
    /// Registration order is visiting order.
    entries: Vec<(SyncId, Weak<RefCell<dyn Refresh>>)>,
    next_id: SyncId,
}

impl Default for SyncRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Registers a synchronizer and returns its ID.
    ///
    /// The registry does not keep it alive; dropped synchronizers are skipped
    /// and removed by `cleanup`.
    pub fn register<S>(&mut self, sync: &Rc<RefCell<S>>) -> SyncId
    where
        S: Refresh + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let shared: Rc<RefCell<dyn Refresh>> = sync.clone();
        self.entries.push((id, Rc::downgrade(&shared)));
        id
    }

    /// Unregisters by ID.
    ///
    /// Returns true if the synchronizer was found and removed.
    pub fn unregister(&mut self, id: SyncId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < len_before
    }

    /// Refreshes every live synchronizer.
    pub fn refresh_all(&self) -> RefreshReport {
        self.run(Pass::Refresh, |_| true)
    }

    /// Reloads every live synchronizer. All successful loads count as changed.
    pub fn load_all(&self) -> RefreshReport {
        self.run(Pass::Load, |_| true)
    }

    /// Refreshes the synchronizers whose bound query reads `table_id`.
    pub fn on_table_change(&self, table_id: TableId) -> RefreshReport {
        self.run(Pass::Refresh, |sync| sync.dependencies().contains(&table_id))
    }

    fn run<F>(&self, pass: Pass, wants: F) -> RefreshReport
    where
        F: Fn(&dyn Refresh) -> bool,
    {
        let mut report = RefreshReport::default();

        for (id, weak) in &self.entries {
            let Some(handle) = weak.upgrade() else {
                continue;
            };
            let Ok(mut sync) = handle.try_borrow_mut() else {
                warn!("synchronizer {} is busy, skipped", id);
                report.skipped.push(*id);
                continue;
            };
            if !wants(&*sync) {
                continue;
            }

            let outcome = match pass {
                Pass::Load => sync.load().map(|()| true),
                Pass::Refresh => sync.refresh(),
            };
            match outcome {
                Ok(true) => report.changed.push(*id),
                Ok(false) => {}
                Err(err) => report.failed.push((*id, err)),
            }
        }

        debug!(
            "registry pass: {} changed, {} failed, {} skipped",
            report.changed.len(),
            report.failed.len(),
            report.skipped.len()
        );
        report
    }

    /// Returns the number of live registered synchronizers.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(_, w)| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops entries whose synchronizer no longer exists.
    pub fn cleanup(&mut self) {
        self.entries.retain(|(_, w)| w.strong_count() > 0);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
