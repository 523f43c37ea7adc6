use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::PAGE_SIZE;
use crate::data::{CellValue, Dataset};

/// The venue table for one sector: visible columns plus projected rows.
///
/// Address and coordinate columns are never part of `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Header names in source order.
    pub columns: Vec<String>,
    /// One entry per venue, aligned with `columns`.
    pub rows: Vec<Vec<CellValue>>,
    pub page_size: usize,
}

impl TableView {
    /// Project the venues at `indices` onto the dataset's table columns.
    pub fn build(dataset: &Dataset, indices: &[usize]) -> Self {
        let visible: Vec<_> = dataset.table_columns().collect();
        let venues = dataset.venues();

        let rows = indices
            .iter()
            .map(|&i| visible.iter().map(|col| venues[i].cell(col.field)).collect())
            .collect();

        TableView {
            columns: visible.iter().map(|c| c.name.clone()).collect(),
            rows,
            page_size: PAGE_SIZE,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages; an empty table still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.max(1)).max(1)
    }

    /// Rows on page `page` (0-based).  Out-of-range pages are empty.
    pub fn page(&self, page: usize) -> &[Vec<CellValue>] {
        let size = self.page_size.max(1);
        let start = page.saturating_mul(size).min(self.rows.len());
        let end = start.saturating_add(size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// All values of the column whose header is `name`.
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

/// The JSON form also carries `page_count` so clients page the same way.
impl Serialize for TableView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TableView", 4)?;
        s.serialize_field("columns", &self.columns)?;
        s.serialize_field("rows", &self.rows)?;
        s.serialize_field("page_size", &self.page_size)?;
        s.serialize_field("page_count", &self.page_count())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(n: usize) -> TableView {
        TableView {
            columns: vec!["n".into()],
            rows: (0..n).map(|i| vec![CellValue::Integer(i as i64)]).collect(),
            page_size: PAGE_SIZE,
        }
    }

    #[test]
    fn pages_split_at_page_size() {
        let table = table_with(23);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.page(0).len(), 10);
        assert_eq!(table.page(2).len(), 3);
        assert_eq!(table.page(2)[0], vec![CellValue::Integer(20)]);
        assert!(table.page(3).is_empty());
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let table = table_with(0);
        assert_eq!(table.page_count(), 1);
        assert!(table.page(0).is_empty());
    }

    #[test]
    fn json_carries_page_count() {
        let json = serde_json::to_value(table_with(23)).unwrap();
        assert_eq!(json["page_count"], 3);
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["rows"].as_array().unwrap().len(), 23);

        let json = serde_json::to_value(table_with(0)).unwrap();
        assert_eq!(json["page_count"], 1);
    }
}
