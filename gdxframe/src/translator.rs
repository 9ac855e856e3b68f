//! Native record <-> table row translation
//!
//! A native record is a label per dimension and a fixed vector of five
//! values. A row is the labels followed by the value cells the symbol's kind
//! selects. Special values are translated on value columns only, and never
//! for sets, whose value column is a presence flag.

use gdxframe_core::constants::VALUE_SLOTS;
use gdxframe_core::{validate_label, GdxCodec, NativeRecord, NativeValues, SpecialValues, SymbolKind};

use crate::error::{Error, Result};
use crate::table::Cell;

/// Translator for the records of one symbol
#[derive(Debug, Clone, Copy)]
pub struct RecordTranslator<'a> {
    kind: SymbolKind,
    dimension: usize,
    specials: &'a SpecialValues,
}

impl<'a> RecordTranslator<'a> {
    pub fn new(kind: SymbolKind, dimension: usize, specials: &'a SpecialValues) -> Self {
        Self {
            kind,
            dimension,
            specials,
        }
    }

    /// Width of the rows this translator produces
    pub fn row_width(&self) -> usize {
        self.dimension + self.kind.value_columns().len()
    }

    /// Native record to table row
    pub fn to_row(&self, record: NativeRecord) -> Result<Vec<Cell>> {
        if record.labels.len() != self.dimension {
            return Err(Error::codec(format!(
                "record has {} labels, expected {}",
                record.labels.len(),
                self.dimension
            )));
        }

        let mut row = Vec::with_capacity(self.row_width());
        row.extend(record.labels.into_iter().map(Cell::Label));
        if self.kind.is_set() {
            row.push(Cell::Bool(true));
        } else {
            row.extend(
                self.kind
                    .value_columns()
                    .iter()
                    .map(|c| Cell::from(self.specials.to_host(record.values[c.slot.index()]))),
            );
        }
        Ok(row)
    }

    /// Table row to native record
    pub fn to_native(&self, row: &[Cell]) -> Result<NativeRecord> {
        if row.len() != self.row_width() {
            return Err(Error::dimension_mismatch("record", self.row_width(), row.len()));
        }

        let (label_cells, value_cells) = row.split_at(self.dimension);
        let labels = label_cells
            .iter()
            .map(label_text)
            .collect::<Result<Vec<_>>>()?;

        let mut values: NativeValues = [0.0; VALUE_SLOTS];
        if !self.kind.is_set() {
            for (column, cell) in self.kind.value_columns().iter().zip(value_cells) {
                let host = cell.host_value().ok_or_else(|| {
                    Error::bad_value(format!(
                        "{cell:?} in column {} is not numeric",
                        column.name
                    ))
                })?;
                values[column.slot.index()] = self.specials.to_binary(host);
            }
        }

        Ok(NativeRecord { labels, values })
    }

    /// Stream every record of the symbol at `index`
    pub fn read_all<C: GdxCodec>(&self, codec: &mut C, index: usize) -> Result<Vec<Vec<Cell>>> {
        let count = codec.data_read_start(index).ok_or_else(|| {
            Error::codec(format!(
                "cannot read symbol {index}: {}",
                codec.last_error_text()
            ))
        })?;

        let mut rows = Vec::with_capacity(count);
        for _ in 0..count {
            let record = codec.data_read_row().ok_or_else(|| {
                Error::codec(format!(
                    "record {} of symbol {index}: {}",
                    rows.len(),
                    codec.last_error_text()
                ))
            })?;
            rows.push(self.to_row(record)?);
        }

        if !codec.data_read_done() {
            return Err(Error::codec(codec.last_error_text()));
        }
        Ok(rows)
    }

    /// Stream rows to the symbol currently being written
    pub fn write_all<C: GdxCodec>(&self, codec: &mut C, rows: &[Vec<Cell>]) -> Result<()> {
        for row in rows {
            let record = self.to_native(row)?;
            if !codec.data_write_row(&record.labels, &record.values) {
                return Err(Error::codec(format!(
                    "record {:?}: {}",
                    record.labels,
                    codec.last_error_text()
                )));
            }
        }
        Ok(())
    }
}

/// Text of a dimension cell
///
/// Numbers and booleans are stringified; missing labels are rejected.
pub fn label_text(cell: &Cell) -> Result<String> {
    let text = match cell {
        Cell::Label(s) => s.clone(),
        Cell::Number(x) => x.to_string(),
        Cell::Bool(b) => b.to_string(),
        Cell::Missing => return Err(Error::bad_value("missing label")),
    };
    validate_label(&text).map_err(|e| Error::bad_value(format!("{e}: {text:?}")))?;
    Ok(text)
}
