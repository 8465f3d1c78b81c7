//! Shared model for the collectors: spreadsheet-shaped tables and the
//! collector interface.

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::Credentials;
use aws_types::region::Region;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<Option<i32>> for Cell {
    fn from(value: Option<i32>) -> Self {
        value.map(Cell::from).unwrap_or(Cell::Empty)
    }
}

/// Ordered rows sharing one fixed column set; the in-memory accumulation of
/// flattened records for one resource kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append one record. Row length must match the column set.
    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Row-wise concatenation: self's rows first, then `other`'s, order
    /// preserved. Both tables must share the same column set.
    pub fn append(&mut self, mut other: Table) {
        debug_assert_eq!(self.columns, other.columns);
        self.rows.append(&mut other.rows);
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One enumerable resource kind.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Diagnostic label for logs and error context.
    fn name(&self) -> &'static str;

    /// Worksheet the collected table is written to.
    fn sheet(&self) -> &'static str;

    /// Enumerate the kind across `regions`, in order, into one table.
    async fn discover(&self, regions: &[String]) -> Result<Table>;
}

/// Client config for one (service, region) call. Built fresh per region; no
/// client reuse across calls.
pub async fn sdk_config(credentials: &Credentials, region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .credentials_provider(credentials.clone())
        .load()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["Id", "Size"];

    fn row(id: &str, size: i32) -> Vec<Cell> {
        vec![Cell::from(id), Cell::from(size)]
    }

    #[test]
    fn new_table_is_empty_but_keeps_columns() {
        let table = Table::new(COLUMNS);
        assert!(table.is_empty());
        assert_eq!(table.columns(), COLUMNS);
    }

    #[test]
    fn append_sums_rows_and_preserves_order() {
        let mut first = Table::new(COLUMNS);
        first.push(row("a", 1));
        first.push(row("b", 2));
        let mut second = Table::new(COLUMNS);
        second.push(row("c", 3));

        first.append(second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.rows()[0][0], Cell::Text("a".into()));
        assert_eq!(first.rows()[2][0], Cell::Text("c".into()));
    }

    #[test]
    fn absent_numeric_field_becomes_an_empty_cell() {
        assert_eq!(Cell::from(None::<i32>), Cell::Empty);
        assert_eq!(Cell::from(Some(8)), Cell::Int(8));
    }
}
