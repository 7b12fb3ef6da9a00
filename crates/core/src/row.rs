//! Row structure for query results.
//!
//! A `Row` is one result record. Its identity is the pair of row id and
//! values: two rows are equal when both match, regardless of where they live
//! in memory or which version counter they carry.

use crate::value::Value;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a row.
pub type RowId = u64;

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates the next unique row ID.
pub fn next_row_id() -> RowId {
    NEXT_ROW_ID.fetch_add(1, Ordering::SeqCst)
}

/// Raises the next row ID to at least `id`. Stores call this for rows that
/// arrive with an explicit id so `next_row_id` never hands that id out again.
pub fn set_next_row_id_if_greater(id: RowId) {
    NEXT_ROW_ID.fetch_max(id, Ordering::SeqCst);
}

/// A result row.
#[derive(Clone, Debug)]
pub struct Row {
    id: RowId,
    /// Change counter, bumped on each update of the stored row.
    version: u64,
    /// Values indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row with the given ID and values.
    /// Version defaults to 1 for new rows.
    pub fn new(id: RowId, values: Vec<Value>) -> Self {
        Self { id, version: 1, values }
    }

    /// Creates a new row with the given ID, version, and values.
    pub fn new_with_version(id: RowId, version: u64, values: Vec<Value>) -> Self {
        Self { id, version, values }
    }

    /// Creates a new row with an automatically assigned ID.
    pub fn create(values: Vec<Value>) -> Self {
        Self::new(next_row_id(), values)
    }

    #[inline]
    pub fn id(&self) -> RowId {
        self.id
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Increments the version number and returns the new value.
    #[inline]
    pub fn increment_version(&mut self) -> u64 {
        self.version = self.version.wrapping_add(1);
        self.version
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Replaces all values, bumping the version if they differ.
    ///
    /// Returns true if the row changed.
    pub fn replace_values(&mut self, values: Vec<Value>) -> bool {
        if self.values == values {
            return false;
        }
        self.values = values;
        self.increment_version();
        true
    }

    /// Gets a value at the given column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.values == other.values
    }
}

impl Eq for Row {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn track(id: RowId, title: &str, seconds: i64) -> Row {
        Row::new(id, vec![Value::String(title.into()), Value::Int64(seconds)])
    }

    #[test]
    fn test_row_new() {
        let row = track(1, "So What", 562);
        assert_eq!(row.id(), 1);
        assert_eq!(row.version(), 1);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_row_get_value() {
        let row = track(1, "So What", 562);
        assert_eq!(row.get(0), Some(&Value::String("So What".into())));
        assert_eq!(row.get(1), Some(&Value::Int64(562)));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_next_row_id_skips_reserved_ids() {
        let reserved = next_row_id() + 1000;
        set_next_row_id_if_greater(reserved);
        assert!(next_row_id() >= reserved);

        // Never moves backwards
        set_next_row_id_if_greater(1);
        assert!(next_row_id() > reserved);
    }

    #[test]
    fn test_row_create_assigns_increasing_ids() {
        let row1 = Row::create(vec![Value::Int32(1)]);
        let row2 = Row::create(vec![Value::Int32(2)]);
        assert!(row2.id() > row1.id());
    }

    #[test]
    fn test_row_equality_ignores_version() {
        let row1 = track(1, "Blue in Green", 337);
        let row2 = Row::new_with_version(1, 9, vec![Value::String("Blue in Green".into()), Value::Int64(337)]);
        let row3 = track(2, "Blue in Green", 337);
        assert_eq!(row1, row2);
        assert_ne!(row1, row3);
    }

    #[test]
    fn test_replace_values_bumps_version() {
        let mut row = track(1, "Freddie Freeloader", 589);
        assert!(!row.replace_values(vec![Value::String("Freddie Freeloader".into()), Value::Int64(589)]));
        assert_eq!(row.version(), 1);

        assert!(row.replace_values(vec![Value::String("Freddie Freeloader".into()), Value::Int64(590)]));
        assert_eq!(row.version(), 2);
        assert_eq!(row.get(1), Some(&Value::Int64(590)));
    }
}
