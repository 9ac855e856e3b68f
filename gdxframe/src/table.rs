//! Row-oriented record tables
//!
//! A [`Table`] is what callers see for one symbol: dimension columns holding
//! labels followed by the value columns of the symbol's kind. Tables built by
//! callers may hold anything in any cell; the symbol validates shape on
//! assignment and the translator validates contents on write.

use std::fmt;

use gdxframe_core::host_values_equal;

use crate::error::{Error, Result};

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Dimension label or stray text
    Label(String),
    /// Numeric value, special values included
    Number(f64),
    /// Presence flag of a set record
    Bool(bool),
    /// Undefined value
    Missing,
}

impl Cell {
    /// Text of a label cell
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Cell::Label(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of a number cell
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Host value of a numeric or missing cell
    ///
    /// Booleans count as 1.0 and 0.0; labels have no host value.
    pub fn host_value(&self) -> Option<Option<f64>> {
        match self {
            Cell::Number(x) => Some(Some(*x)),
            Cell::Bool(b) => Some(Some(if *b { 1.0 } else { 0.0 })),
            Cell::Missing => Some(None),
            Cell::Label(_) => None,
        }
    }

    /// Equality that treats NaN and missing as the same value
    pub fn equivalent(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Label(a), Cell::Label(b)) => a == b,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::Number(_) | Cell::Missing, Cell::Number(_) | Cell::Missing) => {
                host_values_equal(self.host_value().flatten(), other.host_value().flatten())
            }
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Label(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Label(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Number)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Label(s) => write!(f, "{s}"),
            Cell::Number(x) => write!(f, "{x}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Missing => write!(f, "UNDF"),
        }
    }
}

/// Column header
///
/// Tables assembled without headers carry positional keys. Those never name
/// a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Name(String),
    Position(usize),
}

impl ColumnKey {
    /// Header text, if the column is named
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ColumnKey::Name(name) => Some(name),
            ColumnKey::Position(_) => None,
        }
    }
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        ColumnKey::Name(value.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(value: String) -> Self {
        ColumnKey::Name(value)
    }
}

impl From<usize> for ColumnKey {
    fn from(value: usize) -> Self {
        ColumnKey::Position(value)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(name) => write!(f, "{name}"),
            ColumnKey::Position(i) => write!(f, "{i}"),
        }
    }
}

/// Rectangular table of cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<ColumnKey>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table with the given headers
    pub fn new<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ColumnKey>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Table with headers and rows, rejecting rows of the wrong width
    pub fn with_rows<I, K>(columns: I, rows: Vec<Vec<Cell>>) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<ColumnKey>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Table without headers; columns get positional keys
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        Self::with_rows(0..width, rows)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Row by position
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_name() == Some(name))
    }

    /// Cells of a named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Append a row of matching width
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.width() {
            return Err(Error::dimension_mismatch("table row", self.width(), row.len()));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Overwrite every cell of a named column
    pub fn fill_column(&mut self, name: &str, value: Cell) -> Result<()> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::not_found(format!("column {name}")))?;
        for row in &mut self.rows {
            row[index] = value.clone();
        }
        Ok(())
    }

    /// Whether a column contains the given label
    pub fn contains_label(&self, column: usize, label: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(column).and_then(Cell::as_label) == Some(label))
    }

    /// Content equality with NaN-aware numeric comparison
    pub fn equivalent(&self, other: &Table) -> bool {
        self.columns == other.columns
            && self.rows.len() == other.rows.len()
            && self.rows.iter().zip(&other.rows).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equivalent(y))
            })
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<ColumnKey>) {
        debug_assert_eq!(columns.len(), self.width());
        self.columns = columns;
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    pub(crate) fn from_parts(columns: Vec<ColumnKey>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::with_rows(
            ["u", "Value"],
            vec![
                vec!["a".into(), 1.0.into()],
                vec!["b".into(), Cell::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let table = sample();
        assert_eq!(table.width(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("Value"), Some(1));
        assert!(table.contains_label(0, "b"));
        assert!(!table.contains_label(1, "b"));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Table::from_rows(vec![vec![1.0.into()], vec![1.0.into(), 2.0.into()]])
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 1, found: 2, .. }));
    }

    #[test]
    fn test_positional_headers() {
        let table = Table::from_rows(vec![vec!["x".into(), 2.0.into()]]).unwrap();
        assert_eq!(table.columns(), &[ColumnKey::Position(0), ColumnKey::Position(1)]);
        assert_eq!(table.column_index("0"), None);
    }

    #[test]
    fn test_fill_column() {
        let mut table = sample();
        table.fill_column("Value", Cell::Number(-15.0)).unwrap();
        let values: Vec<f64> = table
            .column("Value")
            .unwrap()
            .into_iter()
            .filter_map(Cell::as_number)
            .collect();
        assert_eq!(values, vec![-15.0, -15.0]);
        assert!(table.fill_column("Level", Cell::Missing).is_err());
    }

    #[test]
    fn test_equivalent_treats_nan_as_missing() {
        let a = Table::with_rows(["Value"], vec![vec![Cell::Number(f64::NAN)]]).unwrap();
        let b = Table::with_rows(["Value"], vec![vec![Cell::Missing]]).unwrap();
        assert_ne!(a, b);
        assert!(a.equivalent(&b));
    }
}
