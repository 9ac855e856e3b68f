//! Symbols: descriptor plus record table
//!
//! A symbol's record table always has one column per dimension followed by
//! the value columns fixed by its kind. Every mutating method re-establishes
//! that shape before returning.

use std::fmt;

use gdxframe_core::constants::{UNIVERSAL_INDEX, UNIVERSAL_NAME, WILDCARD};
use gdxframe_core::{EquationType, SubType, SymbolKind, ValueColumn, VariableType};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::lazy::LoadState;
use crate::table::{Cell, ColumnKey, Table};

/// A named, typed, dimensioned symbol
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    sub_type: Option<SubType>,
    dims: Vec<String>,
    description: String,
    index: Option<usize>,
    source: Option<String>,
    state: LoadState,
    record_count: usize,
    records: Table,
    domain_pending: bool,
}

fn wildcards(count: usize) -> Vec<String> {
    vec![WILDCARD.to_string(); count]
}

impl Symbol {
    /// New in-memory symbol without dimensions or records
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        let mut symbol = Self {
            name: name.into(),
            kind,
            sub_type: SubType::default_for(kind),
            dims: Vec::new(),
            description: String::new(),
            index: None,
            source: None,
            state: LoadState::Loaded,
            record_count: 0,
            records: Table::default(),
            domain_pending: false,
        };
        symbol.records = symbol.empty_records();
        symbol
    }

    /// Set the domain names
    pub fn with_dims<I, S>(mut self, dims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dims = dims.into_iter().map(Into::into).collect();
        self.records = self.empty_records();
        self
    }

    /// Set the number of dimensions, all wildcard
    pub fn with_dimension_count(self, count: usize) -> Self {
        self.with_dims(wildcards(count))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the variable sub-type; ignored with a warning on other kinds
    pub fn with_variable_type(mut self, variable_type: VariableType) -> Self {
        if let Err(e) = self.set_sub_type(SubType::Variable(variable_type)) {
            warn!(symbol = %self.name, error = %e, "variable type ignored");
        }
        self
    }

    /// Set the equation sub-type; ignored with a warning on other kinds
    pub fn with_equation_type(mut self, equation_type: EquationType) -> Self {
        if let Err(e) = self.set_sub_type(SubType::Equation(equation_type)) {
            warn!(symbol = %self.name, error = %e, "equation type ignored");
        }
        self
    }

    /// Descriptor of a symbol read from a container, records not yet loaded
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_container(
        name: String,
        kind: SymbolKind,
        sub_type: Option<SubType>,
        dims: Vec<String>,
        description: String,
        index: usize,
        source: String,
        record_count: usize,
        domain_pending: bool,
    ) -> Self {
        let mut symbol = Self {
            name,
            kind,
            sub_type,
            dims,
            description,
            index: Some(index),
            source: Some(source),
            state: LoadState::Unloaded,
            record_count,
            records: Table::default(),
            domain_pending,
        };
        symbol.records = symbol.empty_records();
        symbol
    }

    /// The universal pseudo-symbol holding every label of a container
    pub(crate) fn universal() -> Self {
        let mut symbol = Self::new(UNIVERSAL_NAME, SymbolKind::Set)
            .with_dims([WILDCARD])
            .with_description("Universal set");
        symbol.index = Some(UNIVERSAL_INDEX);
        symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn sub_type(&self) -> Option<SubType> {
        self.sub_type
    }

    /// Variable sub-type, `None` unless the symbol is a variable
    pub fn variable_type(&self) -> Option<VariableType> {
        match self.sub_type {
            Some(SubType::Variable(t)) => Some(t),
            _ => None,
        }
    }

    /// Equation sub-type, `None` unless the symbol is an equation
    pub fn equation_type(&self) -> Option<EquationType> {
        match self.sub_type {
            Some(SubType::Equation(t)) => Some(t),
            _ => None,
        }
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn num_dims(&self) -> usize {
        self.dims.len()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 1-based position in the backing container; 0 for the universal set
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Path of the backing container
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn is_universal(&self) -> bool {
        self.index == Some(UNIVERSAL_INDEX)
    }

    /// Record count, taken from the container header while unloaded
    pub fn num_records(&self) -> usize {
        if self.is_loaded() {
            self.records.len()
        } else {
            self.record_count
        }
    }

    /// Record table; empty while unloaded
    pub fn records(&self) -> &Table {
        &self.records
    }

    /// Value columns fixed by the kind
    pub fn value_columns(&self) -> &'static [ValueColumn] {
        self.kind.value_columns()
    }

    pub fn value_column_names(&self) -> Vec<&'static str> {
        self.value_columns().iter().map(|c| c.name).collect()
    }

    /// Whether any dimension names a domain
    pub fn has_named_dims(&self) -> bool {
        self.dims.iter().any(|d| d != WILDCARD)
    }

    /// Default cell for a value column, `None` for unknown columns
    pub fn value_column_default(&self, column: &str) -> Option<Cell> {
        let index = self.value_columns().iter().position(|c| c.name == column)?;
        self.default_value_cells().into_iter().nth(index)
    }

    /// Default cells for all value columns
    pub fn default_value_cells(&self) -> Vec<Cell> {
        if self.kind.is_set() {
            return vec![Cell::Bool(true)];
        }
        match self.sub_type {
            Some(sub_type) => {
                let defaults = sub_type.defaults();
                self.value_columns()
                    .iter()
                    .map(|c| Cell::Number(defaults[c.slot.index()]))
                    .collect()
            }
            None => vec![Cell::Number(0.0); self.value_columns().len()],
        }
    }

    /// Type name for display, e.g. "Scalar" or "Positive Variable"
    pub fn full_typename(&self) -> String {
        match (self.kind, self.sub_type) {
            (SymbolKind::Parameter, _) if self.dims.is_empty() => "Scalar".to_string(),
            (SymbolKind::Variable | SymbolKind::Equation, Some(sub_type)) => {
                format!("{sub_type} {}", self.kind)
            }
            (kind, _) => kind.to_string(),
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Change the kind of a symbol that holds no records
    pub fn set_kind(&mut self, kind: SymbolKind) -> Result<()> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded(self.name.clone()));
        }
        if self.num_records() > 0 {
            return Err(Error::KindLocked(self.name.clone()));
        }
        self.kind = kind;
        self.sub_type = SubType::default_for(kind);
        self.records = self.empty_records();
        Ok(())
    }

    /// Change the sub-type; it must belong to the symbol's kind
    pub fn set_sub_type(&mut self, sub_type: SubType) -> Result<()> {
        let matches_kind = matches!(
            (self.kind, sub_type),
            (SymbolKind::Variable, SubType::Variable(_))
                | (SymbolKind::Equation, SubType::Equation(_))
        );
        if !matches_kind {
            return Err(Error::bad_value(format!(
                "{sub_type} does not apply to {} {}",
                self.kind, self.name
            )));
        }
        self.sub_type = Some(sub_type);
        Ok(())
    }

    /// Replace the domain names
    ///
    /// With records present only the names may change; a different count is
    /// rejected because the record width is fixed.
    pub fn set_dims<I, S>(&mut self, dims: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if self.num_records() > 0 {
            if dims.len() != self.num_dims() {
                return Err(Error::dimension_mismatch(
                    &self.name,
                    self.num_dims() + self.value_columns().len(),
                    dims.len() + self.value_columns().len(),
                ));
            }
            warn!(symbol = %self.name, "changing dims of a symbol that holds records");
        } else if !self.dims.is_empty() && dims.len() != self.num_dims() {
            warn!(
                symbol = %self.name,
                from = self.num_dims(),
                to = dims.len(),
                "changing the number of dimensions"
            );
        }

        self.dims = dims;
        self.domain_pending = false;
        if self.records.width() == self.column_count() {
            let columns = self.column_keys();
            self.records.set_columns(columns);
        } else {
            self.records = self.empty_records();
        }
        Ok(())
    }

    /// Replace the dims with `count` wildcards
    pub fn set_dimension_count(&mut self, count: usize) -> Result<()> {
        self.set_dims(wildcards(count))
    }

    /// Replace all records with a caller-supplied table
    ///
    /// The table's width decides the dimensionality: every column beyond the
    /// value columns is a dimension. A non-empty table holding only labels
    /// (its last column is text and its width equals the dimension count, or
    /// the symbol is a set) gets default value columns appended. Symbols with named
    /// dims reject a width that implies a different dimension count;
    /// wildcard symbols take the new count instead, named after the table's
    /// headers when all of them are strings.
    pub fn set_records(&mut self, table: Table) -> Result<()> {
        let value_count = self.value_columns().len();
        let width = table.width();

        if width == 0 {
            self.install_records(self.empty_records());
            return Ok(());
        }

        // an empty table has no cells to tell labels from values
        let last_is_labels = !table.is_empty()
            && table
                .rows()
                .iter()
                .all(|row| matches!(row.last(), Some(Cell::Label(_))));
        let labels_only = last_is_labels && (width == self.num_dims() || self.kind.is_set());

        let new_dims = if labels_only {
            width
        } else if width >= value_count {
            width - value_count
        } else {
            return Err(Error::dimension_mismatch(
                &self.name,
                self.column_count(),
                width,
            ));
        };

        let header_dims: Option<Vec<String>> = table.columns()[..new_dims]
            .iter()
            .map(|c| c.as_name().map(str::to_string))
            .collect();
        if header_dims.is_none() {
            info!(
                symbol = %self.name,
                "dimension headers are not all strings, not using them as domains"
            );
        }

        if new_dims != self.num_dims() {
            if self.has_named_dims() {
                return Err(Error::dimension_mismatch(
                    &self.name,
                    self.column_count(),
                    width,
                ));
            }
            self.dims = header_dims.unwrap_or_else(|| wildcards(new_dims));
        } else if let Some(names) = header_dims {
            if names.iter().any(|d| d != WILDCARD) {
                self.dims = names;
            }
        }
        self.domain_pending = false;

        let defaults = self.default_value_cells();
        let mut rows = table.into_rows();
        for row in &mut rows {
            if labels_only {
                row.extend(defaults.iter().cloned());
            }
            self.normalize_values(row);
        }

        let table = Table::from_parts(self.column_keys(), rows);
        self.install_records(table);
        Ok(())
    }

    /// Append one record
    ///
    /// The row holds the labels followed by either all value cells or none,
    /// in which case defaults are filled in.
    pub fn push_record(&mut self, mut row: Vec<Cell>) -> Result<()> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded(self.name.clone()));
        }
        if row.len() == self.num_dims() {
            row.extend(self.default_value_cells());
        }
        if row.len() != self.column_count() {
            return Err(Error::dimension_mismatch(
                &self.name,
                self.column_count(),
                row.len(),
            ));
        }
        self.normalize_values(&mut row);
        self.records.push_row(row)?;
        self.record_count = self.records.len();
        Ok(())
    }

    /// Set every cell of a value column
    pub fn fill_value_column(&mut self, column: &str, value: Cell) -> Result<()> {
        if !self.value_columns().iter().any(|c| c.name == column) {
            return Err(Error::not_found(format!(
                "value column {column} of {}",
                self.name
            )));
        }
        self.records.fill_column(column, value)?;
        let mut rows = std::mem::take(&mut self.records).into_rows();
        for row in &mut rows {
            self.normalize_values(row);
        }
        self.records = Table::from_parts(self.column_keys(), rows);
        Ok(())
    }

    /// Copy with the same records but no backing container
    pub fn clone_detached(&self) -> Result<Symbol> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded(self.name.clone()));
        }
        let mut copy = self.clone();
        if !self.is_universal() {
            copy.index = None;
        }
        copy.source = None;
        copy.record_count = copy.records.len();
        Ok(copy)
    }

    /// Move the records out, leaving an empty table
    pub fn take_records(&mut self) -> Table {
        let empty = self.empty_records();
        std::mem::replace(&mut self.records, empty)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn domain_pending(&self) -> bool {
        self.domain_pending
    }

    pub(crate) fn apply_inferred_dims(&mut self, dims: Vec<String>) {
        debug_assert_eq!(dims.len(), self.dims.len());
        self.dims = dims;
        self.domain_pending = false;
        let columns = self.column_keys();
        self.records.set_columns(columns);
    }

    /// Point the symbol at the container it was just written to
    pub(crate) fn attach(&mut self, index: usize, source: &str) {
        self.index = Some(index);
        self.source = Some(source.to_string());
        self.record_count = self.records.len();
    }

    pub(crate) fn install_records(&mut self, records: Table) {
        debug_assert_eq!(records.width(), self.column_count());
        self.record_count = records.len();
        self.records = records;
        self.state = LoadState::Loaded;
    }

    pub(crate) fn clear_records(&mut self) {
        if self.is_loaded() {
            self.record_count = self.records.len();
        }
        self.records = self.empty_records();
        self.state = LoadState::Unloaded;
    }

    pub(crate) fn column_count(&self) -> usize {
        self.num_dims() + self.value_columns().len()
    }

    pub(crate) fn column_keys(&self) -> Vec<ColumnKey> {
        self.dims
            .iter()
            .map(|d| ColumnKey::Name(d.clone()))
            .chain(self.value_columns().iter().map(|c| c.name.into()))
            .collect()
    }

    fn empty_records(&self) -> Table {
        Table::new(self.column_keys())
    }

    /// Set presence cells become booleans; other kinds are left for the
    /// translator to check on write
    fn normalize_values(&self, row: &mut [Cell]) {
        if !self.kind.is_set() {
            return;
        }
        if let Some(cell) = row.last_mut() {
            let presence = match &*cell {
                Cell::Missing => true,
                Cell::Number(x) => *x != 0.0,
                _ => return,
            };
            *cell = Cell::Bool(presence);
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {} records, {} dims {:?}, {}",
            self.name,
            self.description,
            self.full_typename(),
            self.num_records(),
            self.num_dims(),
            self.dims,
            if self.is_loaded() { "loaded" } else { "not loaded" }
        )
    }
}
