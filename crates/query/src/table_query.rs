//! `TableQuery`: the reference query specification over a `MemoryTable`.
//!
//! Setup is done through consuming builder methods or `&mut` setters; nothing
//! runs until `execute` is called. Execution order is:
//! scan -> filters -> sort -> descending -> skip -> limit.

use crate::sort::{sort_rows, SortOrder};
use crate::spec::QuerySpec;
use crate::table::{MemoryTable, TableId};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::Ordering;
use tunes_core::{Error, Result, Row, Value};

/// A row filter applied during execution.
pub enum RowFilter {
    /// Arbitrary predicate.
    Custom(Box<dyn Fn(&Row) -> bool>),
    /// Case-insensitive substring match on a string column.
    Matching { column: usize, needle: String },
    /// Inclusive key range on a column. Unset bounds are open.
    KeyRange {
        column: usize,
        start: Option<Value>,
        end: Option<Value>,
    },
}

impl RowFilter {
    fn column(&self) -> Option<usize> {
        match self {
            RowFilter::Custom(_) => None,
            RowFilter::Matching { column, .. } | RowFilter::KeyRange { column, .. } => Some(*column),
        }
    }

    fn eval(&self, row: &Row) -> bool {
        match self {
            RowFilter::Custom(f) => f(row),
            RowFilter::Matching { column, needle } => row
                .get(*column)
                .map(|v| v.contains_ignore_case(needle))
                .unwrap_or(false),
            RowFilter::KeyRange { column, start, end } => match row.get(*column) {
                Some(v) => {
                    start.as_ref().map_or(true, |s| cmp_key(v, s) != Ordering::Less)
                        && end.as_ref().map_or(true, |e| cmp_key(v, e) != Ordering::Greater)
                }
                None => false,
            },
        }
    }
}

/// Range bounds compare numbers by value, whatever their variant.
fn cmp_key(value: &Value, bound: &Value) -> Ordering {
    value.cmp_numeric(bound).unwrap_or_else(|| value.cmp(bound))
}

impl core::fmt::Debug for RowFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RowFilter::Custom(_) => f.write_str("Custom(..)"),
            RowFilter::Matching { column, needle } => f
                .debug_struct("Matching")
                .field("column", column)
                .field("needle", needle)
                .finish(),
            RowFilter::KeyRange { column, start, end } => f
                .debug_struct("KeyRange")
                .field("column", column)
                .field("start", start)
                .field("end", end)
                .finish(),
        }
    }
}

/// A query over one shared `MemoryTable`.
#[derive(Debug)]
pub struct TableQuery {
    table: Rc<RefCell<MemoryTable>>,
    table_id: TableId,
    filters: Vec<RowFilter>,
    order_by: Vec<(usize, SortOrder)>,
    descending: bool,
    skip: usize,
    limit: Option<usize>,
}

impl TableQuery {
    /// Creates a query returning every row of `table` in insertion order.
    pub fn new(table: Rc<RefCell<MemoryTable>>) -> Self {
        let table_id = table.borrow().id();
        Self {
            table,
            table_id,
            filters: Vec::new(),
            order_by: Vec::new(),
            descending: false,
            skip: 0,
            limit: None,
        }
    }

    /// Keeps only rows for which `predicate` returns true.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + 'static,
    {
        self.filters.push(RowFilter::Custom(Box::new(predicate)));
        self
    }

    /// Keeps only rows whose `column` contains `needle`, ignoring case.
    pub fn matching(mut self, column: usize, needle: impl Into<String>) -> Self {
        self.filters.push(RowFilter::Matching {
            column,
            needle: needle.into(),
        });
        self
    }

    /// Keeps only rows whose `column` lies within `[start, end]`.
    pub fn key_range(mut self, column: usize, start: Option<Value>, end: Option<Value>) -> Self {
        self.filters.push(RowFilter::KeyRange { column, start, end });
        self
    }

    /// Adds a sort descriptor. Descriptors apply in the order they are added.
    pub fn order_by(mut self, column: usize, order: SortOrder) -> Self {
        self.order_by.push((column, order));
        self
    }

    /// Reverses the final order.
    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Skips the first `n` rows of the ordered result.
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Returns at most `n` rows.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Adds a filter to an already built query.
    pub fn add_filter(&mut self, filter: RowFilter) {
        self.filters.push(filter);
    }

    /// Removes all filters.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Replaces all sort descriptors.
    pub fn set_order_by(&mut self, order_by: Vec<(usize, SortOrder)>) {
        self.order_by = order_by;
    }

    pub fn set_descending(&mut self, descending: bool) {
        self.descending = descending;
    }

    pub fn set_skip(&mut self, n: usize) {
        self.skip = n;
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    /// Returns the table this query reads.
    pub fn table(&self) -> &Rc<RefCell<MemoryTable>> {
        &self.table
    }

    fn validate_columns(&self, table: &MemoryTable) -> Result<()> {
        let referenced = self
            .filters
            .iter()
            .filter_map(RowFilter::column)
            .chain(self.order_by.iter().map(|(col, _)| *col));
        for column in referenced {
            if column >= table.columns() {
                return Err(Error::column_not_found(table.name(), column));
            }
        }
        Ok(())
    }
}

impl QuerySpec for TableQuery {
    fn execute(&self) -> Result<Vec<Row>> {
        let table = self
            .table
            .try_borrow()
            .map_err(|_| Error::invalid_operation(alloc::format!("table {} is being written", self.table_id)))?;
        self.validate_columns(&table)?;

        let mut rows: Vec<Row> = table
            .scan()?
            .iter()
            .filter(|row| self.filters.iter().all(|f| f.eval(row)))
            .cloned()
            .collect();

        sort_rows(&mut rows, &self.order_by);
        if self.descending {
            rows.reverse();
        }

        let limit = self.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(self.skip).take(limit).collect())
    }

    fn dependencies(&self) -> Vec<TableId> {
        vec![self.table_id]
    }
}
