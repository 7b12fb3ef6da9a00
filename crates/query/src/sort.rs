//! Row ordering by sort descriptors.

use alloc::vec::Vec;
use core::cmp::Ordering;
use tunes_core::Row;

/// Sort direction of one sort descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Applies this order to a comparison result.
    #[inline]
    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Compares two rows by a list of (column, order) descriptors.
///
/// Descriptors are applied in turn until one of them distinguishes the rows.
/// A missing cell sorts before a present one.
pub fn compare_rows(a: &Row, b: &Row, order_by: &[(usize, SortOrder)]) -> Ordering {
    for (col_idx, order) in order_by {
        let cmp = match (a.get(*col_idx), b.get(*col_idx)) {
            (Some(av), Some(bv)) => av.cmp(bv),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        if cmp != Ordering::Equal {
            return order.apply(cmp);
        }
    }
    Ordering::Equal
}

/// Sorts rows in place. The sort is stable: rows that compare equal keep
/// their incoming order.
pub fn sort_rows(rows: &mut Vec<Row>, order_by: &[(usize, SortOrder)]) {
    if order_by.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_rows(a, b, order_by));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tunes_core::Value;

    fn album(id: u64, artist: &str, year: i64) -> Row {
        Row::new(id, vec![Value::String(artist.into()), Value::Int64(year)])
    }

    fn ids(rows: &[Row]) -> Vec<u64> {
        rows.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_sort_asc() {
        let mut rows = vec![album(1, "Monk", 1957), album(2, "Davis", 1959), album(3, "Mingus", 1956)];
        sort_rows(&mut rows, &[(1, SortOrder::Asc)]);
        assert_eq!(ids(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_desc() {
        let mut rows = vec![album(1, "Monk", 1957), album(2, "Davis", 1959), album(3, "Mingus", 1956)];
        sort_rows(&mut rows, &[(1, SortOrder::Desc)]);
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_multi_column() {
        let mut rows = vec![
            album(1, "Monk", 1957),
            album(2, "Davis", 1959),
            album(3, "Davis", 1954),
            album(4, "Monk", 1952),
        ];
        sort_rows(&mut rows, &[(0, SortOrder::Asc), (1, SortOrder::Desc)]);
        assert_eq!(ids(&rows), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut rows = vec![album(5, "Evans", 1961), album(2, "Evans", 1961), album(9, "Evans", 1961)];
        sort_rows(&mut rows, &[(0, SortOrder::Asc)]);
        assert_eq!(ids(&rows), vec![5, 2, 9]);
    }

    #[test]
    fn test_missing_cell_sorts_first() {
        let short = Row::new(1, vec![Value::String("Coltrane".into())]);
        let full = album(2, "Coltrane", 1960);
        assert_eq!(compare_rows(&short, &full, &[(1, SortOrder::Asc)]), Ordering::Less);
        assert_eq!(compare_rows(&short, &full, &[(1, SortOrder::Desc)]), Ordering::Greater);
    }

    #[test]
    fn test_no_descriptors_keeps_order() {
        let mut rows = vec![album(3, "b", 1), album(1, "a", 2)];
        sort_rows(&mut rows, &[]);
        assert_eq!(ids(&rows), vec![3, 1]);
    }
}
