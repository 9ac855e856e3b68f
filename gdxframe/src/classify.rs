//! Symbol kind and dims for caller-built tables
//!
//! Tables handed to [`from_tables`](crate::from_tables) carry no type
//! information, so the kind is read off the table itself. Rules, first match
//! wins:
//!
//! 1. The last five headers are the variable value columns (any case):
//!    a variable.
//! 2. The last column holds only booleans: a set. Only labels: a set with no
//!    value column. Anything else: a parameter.
//! 3. Dimension headers become domain names when every one of them is a
//!    valid name; otherwise all dimensions are wildcards.

use gdxframe_core::constants::WILDCARD;
use gdxframe_core::{validate_domain_name, SymbolKind, ValueSlot};

use crate::table::{Cell, Table};

/// Outcome of classifying one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: SymbolKind,
    pub dims: Vec<String>,
    /// Every column is a dimension; value columns get defaults
    pub labels_only: bool,
}

/// Classify a table
///
/// Total: every table gets a kind. Empty tables that are not variables are
/// parameters, since without rows a set's presence column cannot be told
/// from a parameter's `Value` column. An empty set written through
/// [`from_tables`](crate::from_tables) therefore reads back as a parameter;
/// build the [`Symbol`](crate::Symbol) directly to keep the kind.
pub fn classify(table: &Table) -> Classification {
    let width = table.width();

    let (kind, labels_only) = if has_variable_headers(table) {
        (SymbolKind::Variable, false)
    } else if table.is_empty() {
        (SymbolKind::Parameter, false)
    } else if last_column_all(table, |c| matches!(c, Cell::Bool(_))) {
        (SymbolKind::Set, false)
    } else if last_column_all(table, |c| matches!(c, Cell::Label(_))) {
        (SymbolKind::Set, true)
    } else {
        (SymbolKind::Parameter, false)
    };

    let dimension = if labels_only {
        width
    } else {
        width.saturating_sub(kind.value_columns().len())
    };

    let named: Option<Vec<String>> = table.columns()[..dimension]
        .iter()
        .map(|c| {
            c.as_name()
                .filter(|name| validate_domain_name(name).is_ok())
                .map(str::to_string)
        })
        .collect();
    let dims = named.unwrap_or_else(|| vec![WILDCARD.to_string(); dimension]);

    Classification {
        kind,
        dims,
        labels_only,
    }
}

fn has_variable_headers(table: &Table) -> bool {
    let columns = table.columns();
    if columns.len() < ValueSlot::ALL.len() {
        return false;
    }
    columns[columns.len() - ValueSlot::ALL.len()..]
        .iter()
        .zip(ValueSlot::ALL)
        .all(|(column, slot)| {
            column
                .as_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(slot.name()))
        })
}

fn last_column_all(table: &Table, pred: impl Fn(&Cell) -> bool) -> bool {
    table.rows().iter().all(|row| row.last().is_some_and(&pred))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_headers_take_precedence() {
        let table = Table::with_rows(
            ["i", "level", "MARGINAL", "Lower", "Upper", "Scale"],
            vec![vec![
                "a".into(),
                true.into(),
                0.0.into(),
                0.0.into(),
                1.0.into(),
                1.0.into(),
            ]],
        )
        .unwrap();
        let class = classify(&table);
        assert_eq!(class.kind, SymbolKind::Variable);
        assert_eq!(class.dims, vec!["i"]);
    }

    #[test]
    fn test_boolean_last_column_is_set() {
        let table = Table::with_rows(["u", "Value"], vec![vec!["a".into(), true.into()]]).unwrap();
        let class = classify(&table);
        assert_eq!(class.kind, SymbolKind::Set);
        assert!(!class.labels_only);
        assert_eq!(class.dims, vec!["u"]);
    }

    #[test]
    fn test_labels_only_is_set() {
        let table =
            Table::from_rows(vec![vec!["a".into(), "x".into()], vec!["b".into(), "y".into()]])
                .unwrap();
        let class = classify(&table);
        assert_eq!(class.kind, SymbolKind::Set);
        assert!(class.labels_only);
        assert_eq!(class.dims, vec!["*", "*"]);
    }

    #[test]
    fn test_numbers_are_parameter() {
        let table = Table::with_rows(
            ["region", "year", "Value"],
            vec![
                vec!["north".into(), "2030".into(), 4.5.into()],
                vec!["south".into(), "2030".into(), Cell::Missing],
            ],
        )
        .unwrap();
        let class = classify(&table);
        assert_eq!(class.kind, SymbolKind::Parameter);
        assert_eq!(class.dims, vec!["region", "year"]);
    }

    #[test]
    fn test_unusable_headers_become_wildcards() {
        let table = Table::with_rows(
            ["region code", "Value"],
            vec![vec!["north".into(), 1.0.into()]],
        )
        .unwrap();
        assert_eq!(classify(&table).dims, vec!["*"]);
    }

    #[test]
    fn test_scalar_and_empty_tables() {
        let scalar = Table::with_rows(["Value"], vec![vec![3.0.into()]]).unwrap();
        let class = classify(&scalar);
        assert_eq!(class.kind, SymbolKind::Parameter);
        assert!(class.dims.is_empty());

        let empty = Table::new(["i", "Value"]);
        assert_eq!(classify(&empty).kind, SymbolKind::Parameter);
        assert_eq!(classify(&Table::default()).dims.len(), 0);
    }
}
