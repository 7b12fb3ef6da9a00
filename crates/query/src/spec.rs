//! The query specification contract.

use crate::table::TableId;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use tunes_core::{Result, Row};

/// A query that can be executed synchronously.
///
/// `execute` returns rows in the order the query defines, or the error the
/// underlying data source reported. Implementations decide their own
/// timeout policy; callers block until `execute` returns.
pub trait QuerySpec {
    /// Runs the query and returns its ordered result.
    fn execute(&self) -> Result<Vec<Row>>;

    /// Tables this query reads. Used to route table changes to the
    /// synchronizers that need a refresh.
    fn dependencies(&self) -> Vec<TableId> {
        Vec::new()
    }
}

impl<Q: QuerySpec + ?Sized> QuerySpec for Box<Q> {
    fn execute(&self) -> Result<Vec<Row>> {
        (**self).execute()
    }

    fn dependencies(&self) -> Vec<TableId> {
        (**self).dependencies()
    }
}

/// Shared, mutable handle: the caller keeps one clone to adjust the query
/// (sort descriptors, filters) while a synchronizer holds the other.
impl<Q: QuerySpec + ?Sized> QuerySpec for Rc<RefCell<Q>> {
    fn execute(&self) -> Result<Vec<Row>> {
        self.borrow().execute()
    }

    fn dependencies(&self) -> Vec<TableId> {
        self.borrow().dependencies()
    }
}

/// A query backed by a closure.
pub struct FnQuery {
    run: Box<dyn Fn() -> Result<Vec<Row>>>,
    dependencies: Vec<TableId>,
}

impl FnQuery {
    /// Creates a query that calls `run` on each execution.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() -> Result<Vec<Row>> + 'static,
    {
        Self {
            run: Box::new(run),
            dependencies: Vec::new(),
        }
    }

    /// Declares the tables this query reads.
    pub fn with_dependencies(mut self, tables: Vec<TableId>) -> Self {
        self.dependencies = tables;
        self
    }
}

impl QuerySpec for FnQuery {
    fn execute(&self) -> Result<Vec<Row>> {
        (self.run)()
    }

    fn dependencies(&self) -> Vec<TableId> {
        self.dependencies.clone()
    }
}

impl core::fmt::Debug for FnQuery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnQuery")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
