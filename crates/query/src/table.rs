//! In-memory row store used as the data source behind `TableQuery`.
//!
//! A `MemoryTable` keeps rows in insertion order and addresses them by row
//! id. It is shared between writers and queries as `Rc<RefCell<MemoryTable>>`.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tunes_core::{set_next_row_id_if_greater, Error, Result, Row, RowId, Value};

/// Identifier of a table.
pub type TableId = u32;

/// A fixed-width, insertion-ordered in-memory table.
#[derive(Debug)]
pub struct MemoryTable {
    id: TableId,
    name: String,
    columns: usize,
    rows: Vec<Row>,
    /// Row id -> position in `rows`
    positions: HashMap<RowId, usize>,
    /// When set, scans fail with this message.
    unavailable: Option<String>,
}

impl MemoryTable {
    /// Creates an empty table with `columns` values per row.
    pub fn new(id: TableId, name: impl Into<String>, columns: usize) -> Self {
        Self {
            id,
            name: name.into(),
            columns,
            rows: Vec::new(),
            positions: HashMap::new(),
            unavailable: None,
        }
    }

    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of values each row carries.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_width(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.columns {
            return Err(Error::invalid_operation(alloc::format!(
                "table {} expects {} columns, got {}",
                self.name,
                self.columns,
                values.len()
            )));
        }
        Ok(())
    }

    /// Inserts a row, keeping its id.
    ///
    /// Fresh ids handed out afterwards are always greater than `row.id()`.
    pub fn insert(&mut self, row: Row) -> Result<RowId> {
        let row_id = row.id();
        if self.positions.contains_key(&row_id) {
            return Err(Error::invalid_operation("Row ID already exists"));
        }
        self.check_width(row.values())?;
        set_next_row_id_if_greater(row_id.saturating_add(1));

        self.positions.insert(row_id, self.rows.len());
        self.rows.push(row);
        Ok(row_id)
    }

    /// Inserts a new row with a freshly allocated id.
    pub fn insert_values(&mut self, values: Vec<Value>) -> Result<RowId> {
        self.insert(Row::create(values))
    }

    /// Replaces the values of an existing row.
    ///
    /// The row keeps its position; its version is bumped only when the values
    /// actually differ. Returns whether the row changed.
    pub fn update(&mut self, row_id: RowId, values: Vec<Value>) -> Result<bool> {
        self.check_width(&values)?;
        let pos = self.position(row_id)?;
        Ok(self.rows[pos].replace_values(values))
    }

    /// Deletes a row and returns it.
    pub fn delete(&mut self, row_id: RowId) -> Result<Row> {
        let pos = self.position(row_id)?;
        self.positions.remove(&row_id);
        let row = self.rows.remove(pos);
        for later in &self.rows[pos..] {
            if let Some(p) = self.positions.get_mut(&later.id()) {
                *p -= 1;
            }
        }
        Ok(row)
    }

    /// Moves a row to a new position in insertion order.
    ///
    /// `index` is clamped to the end of the table.
    pub fn move_row(&mut self, row_id: RowId, index: usize) -> Result<()> {
        let pos = self.position(row_id)?;
        let row = self.rows.remove(pos);
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
        self.reindex();
        Ok(())
    }

    /// Gets a row by ID.
    pub fn get(&self, row_id: RowId) -> Option<&Row> {
        self.positions.get(&row_id).map(|&pos| &self.rows[pos])
    }

    /// Returns all rows in insertion order, without checking availability.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns all rows in insertion order, or the data source error if the
    /// table has been marked unavailable.
    pub fn scan(&self) -> Result<&[Row]> {
        match &self.unavailable {
            Some(message) => Err(Error::data_source(message.clone())),
            None => Ok(&self.rows),
        }
    }

    /// Marks the table as failing (`Some(message)`) or healthy (`None`).
    pub fn set_unavailable(&mut self, message: Option<String>) {
        self.unavailable = message;
    }

    /// Removes all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.positions.clear();
    }

    fn position(&self, row_id: RowId) -> Result<usize> {
        self.positions
            .get(&row_id)
            .copied()
            .ok_or_else(|| Error::not_found(self.name.clone(), Value::Int64(row_id as i64)))
    }

    fn reindex(&mut self) {
        self.positions.clear();
        for (pos, row) in self.rows.iter().enumerate() {
            self.positions.insert(row.id(), pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn tracks() -> MemoryTable {
        let mut table = MemoryTable::new(1, "tracks", 2);
        table.insert(Row::new(10, vec!["Moanin'".into(), Value::Int64(575)])).unwrap();
        table.insert(Row::new(11, vec!["Blues March".into(), Value::Int64(376)])).unwrap();
        table.insert(Row::new(12, vec!["Along Came Betty".into(), Value::Int64(370)])).unwrap();
        table
    }

    fn ids(table: &MemoryTable) -> Vec<RowId> {
        table.rows().iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_insert_and_get() {
        let table = tracks();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(11).unwrap().get(0), Some(&Value::String("Blues March".into())));
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_insert_duplicate_id() {
        let mut table = tracks();
        let result = table.insert(Row::new(10, vec!["Dup".into(), Value::Int64(1)]));
        assert!(matches!(result, Err(Error::InvalidOperation { .. })));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_insert_values_after_explicit_ids() {
        let mut table = MemoryTable::new(1, "tracks", 1);
        table.insert(Row::new(1, vec!["Cantaloupe Island".into()])).unwrap();
        table.insert(Row::new(2, vec!["Watermelon Man".into()])).unwrap();

        let fresh = table.insert_values(vec!["Maiden Voyage".into()]).unwrap();
        assert!(fresh > 2);

        let high = fresh + 500;
        table.insert(Row::new(high, vec!["Dolphin Dance".into()])).unwrap();
        let next = table.insert_values(vec!["Chameleon".into()]).unwrap();
        assert!(next > high);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_insert_wrong_width() {
        let mut table = tracks();
        let result = table.insert_values(vec!["Too short".into()]);
        assert!(matches!(result, Err(Error::InvalidOperation { .. })));
    }

    #[test]
    fn test_update_bumps_version_only_on_change() {
        let mut table = tracks();
        assert!(!table.update(10, vec!["Moanin'".into(), Value::Int64(575)]).unwrap());
        assert_eq!(table.get(10).unwrap().version(), 1);

        assert!(table.update(10, vec!["Moanin'".into(), Value::Int64(576)]).unwrap());
        assert_eq!(table.get(10).unwrap().version(), 2);
        assert_eq!(ids(&table), vec![10, 11, 12]);
    }

    #[test]
    fn test_update_missing_row() {
        let mut table = tracks();
        let err = table.update(42, vec!["x".into(), Value::Int64(0)]).unwrap_err();
        assert_eq!(err, Error::not_found("tracks", Value::Int64(42)));
    }

    #[test]
    fn test_delete_keeps_positions() {
        let mut table = tracks();
        let removed = table.delete(10).unwrap();
        assert_eq!(removed.id(), 10);
        assert_eq!(ids(&table), vec![11, 12]);
        assert_eq!(table.get(12).unwrap().id(), 12);
        assert!(table.delete(10).is_err());
    }

    #[test]
    fn test_move_row() {
        let mut table = tracks();
        table.move_row(12, 0).unwrap();
        assert_eq!(ids(&table), vec![12, 10, 11]);
        table.move_row(12, 100).unwrap();
        assert_eq!(ids(&table), vec![10, 11, 12]);
        assert_eq!(table.get(11).unwrap().id(), 11);
    }

    #[test]
    fn test_scan_unavailable() {
        let mut table = tracks();
        assert_eq!(table.scan().unwrap().len(), 3);

        table.set_unavailable(Some("volume not mounted".to_string()));
        assert_eq!(table.scan().unwrap_err(), Error::data_source("volume not mounted"));

        table.set_unavailable(None);
        assert!(table.scan().is_ok());
    }

    #[test]
    fn test_clear() {
        let mut table = tracks();
        table.clear();
        assert!(table.is_empty());
        assert!(table.get(10).is_none());
    }
}
