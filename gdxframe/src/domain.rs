//! Domain guessing for containers without domain metadata
//!
//! Older containers only record dimension counts. For every wildcard slot of
//! such a symbol the distinct labels are matched against the one-dimensional
//! sets of the same container, and the smallest set that holds all of them
//! becomes the domain. The result is a guess: anything ambiguous stays a
//! wildcard and nothing here ever fails the caller.

use gdxframe_core::constants::WILDCARD;
use gdxframe_core::{GdxCodec, SpecialValues, SymbolKind};
use hashbrown::HashSet;
use tracing::{debug, warn};

use crate::error::Result;
use crate::symbol::Symbol;
use crate::symbol_table::SymbolTable;
use crate::table::Cell;
use crate::translator::RecordTranslator;

#[derive(Debug)]
struct CandidateSet {
    name: String,
    labels: HashSet<String>,
    record_count: usize,
}

/// One-dimensional sets a container offers as domains, in container order
#[derive(Debug, Default)]
pub(crate) struct DomainCatalog {
    candidates: Vec<CandidateSet>,
}

impl DomainCatalog {
    /// Catalog built from loaded sets only
    pub(crate) fn from_loaded(symbols: &SymbolTable) -> Self {
        let candidates = symbols
            .iter()
            .filter(|s| is_candidate(s) && s.is_loaded())
            .map(|s| CandidateSet::from_rows(s.name(), s.records().rows()))
            .collect();
        Self { candidates }
    }

    /// Catalog with unloaded sets of `path` read through the open container
    ///
    /// Records read here are not kept on the symbols.
    pub(crate) fn collect<C: GdxCodec>(
        symbols: &SymbolTable,
        codec: &mut C,
        path: &str,
        specials: &SpecialValues,
    ) -> Result<Self> {
        let mut candidates = Vec::new();
        for symbol in symbols.iter().filter(|s| is_candidate(s)) {
            if symbol.is_loaded() {
                candidates.push(CandidateSet::from_rows(symbol.name(), symbol.records().rows()));
                continue;
            }
            let index = match (symbol.source(), symbol.index()) {
                (Some(source), Some(index)) if source == path => index,
                _ => {
                    debug!(set = %symbol.name(), "set lives in another container, skipped");
                    continue;
                }
            };
            let rows = RecordTranslator::new(SymbolKind::Set, 1, specials).read_all(codec, index)?;
            candidates.push(CandidateSet::from_rows(symbol.name(), &rows));
        }
        Ok(Self { candidates })
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Dims for `symbol` with every resolvable wildcard replaced
    pub(crate) fn infer(&self, symbol: &Symbol) -> Vec<String> {
        let mut dims = symbol.dims().to_vec();
        for (slot, dim) in dims.iter_mut().enumerate() {
            if dim != WILDCARD {
                continue;
            }
            let labels: HashSet<&str> = symbol
                .records()
                .rows()
                .iter()
                .filter_map(|row| row.get(slot).and_then(Cell::as_label))
                .collect();
            if labels.is_empty() {
                continue;
            }

            let floor = if symbol.kind().is_set() { labels.len() } else { 0 };
            if let Some(found) = self.smallest_enclosing(symbol.name(), &labels, floor) {
                debug!(symbol = %symbol.name(), slot, domain = %found, "domain inferred");
                *dim = found.to_string();
            } else {
                debug!(symbol = %symbol.name(), slot, "no enclosing set, keeping wildcard");
            }
        }
        dims
    }

    fn smallest_enclosing(&self, owner: &str, labels: &HashSet<&str>, floor: usize) -> Option<&str> {
        let mut best: Option<&CandidateSet> = None;
        for candidate in &self.candidates {
            if candidate.name.eq_ignore_ascii_case(owner) || candidate.record_count <= floor {
                continue;
            }
            if !labels.iter().all(|l| candidate.labels.contains(*l)) {
                continue;
            }
            // strict comparison keeps the first of equally sized sets
            if best.map_or(true, |b| candidate.record_count < b.record_count) {
                best = Some(candidate);
            }
        }
        best.map(|c| c.name.as_str())
    }
}

impl CandidateSet {
    fn from_rows(name: &str, rows: &[Vec<Cell>]) -> Self {
        let labels: HashSet<String> = rows
            .iter()
            .filter_map(|row| row.first().and_then(Cell::as_label))
            .map(str::to_string)
            .collect();
        if labels.len() != rows.len() {
            warn!(set = %name, "set holds duplicate or non-label entries");
        }
        Self {
            name: name.to_string(),
            labels,
            record_count: rows.len(),
        }
    }
}

fn is_candidate(symbol: &Symbol) -> bool {
    symbol.kind() == SymbolKind::Set && symbol.num_dims() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn set(name: &str, labels: &[&str]) -> Symbol {
        let mut sym = Symbol::new(name, SymbolKind::Set).with_dimension_count(1);
        let rows = labels.iter().map(|&l| vec![Cell::from(l)]).collect();
        sym.set_records(Table::from_rows(rows).unwrap()).unwrap();
        sym
    }

    fn parameter(name: &str, rows: &[(&str, &str)]) -> Symbol {
        let mut sym = Symbol::new(name, SymbolKind::Parameter).with_dimension_count(2);
        for (a, b) in rows {
            sym.push_record(vec![(*a).into(), (*b).into(), 1.0.into()]).unwrap();
        }
        sym
    }

    fn catalog(symbols: Vec<Symbol>) -> (SymbolTable, DomainCatalog) {
        let mut table = SymbolTable::new();
        for sym in symbols {
            table.push(sym).unwrap();
        }
        let catalog = DomainCatalog::from_loaded(&table);
        (table, catalog)
    }

    #[test]
    fn test_smallest_enclosing_set_wins() {
        let (table, catalog) = catalog(vec![
            set("all", &["a", "b", "c", "d", "x", "y"]),
            set("i", &["a", "b", "c"]),
            set("j", &["x", "y"]),
            parameter("p", &[("a", "x"), ("b", "y")]),
        ]);
        assert_eq!(catalog.len(), 3);
        let dims = catalog.infer(table.get("p").unwrap());
        assert_eq!(dims, vec!["i", "j"]);
    }

    #[test]
    fn test_owning_set_needs_a_larger_set() {
        let (table, catalog) = catalog(vec![
            set("i", &["a", "b", "c"]),
            set("sub", &["a", "b"]),
            set("twin", &["a", "b"]),
        ]);
        // twin has as many records as sub has labels, so only i qualifies
        assert_eq!(catalog.infer(table.get("sub").unwrap()), vec!["i"]);
        assert_eq!(catalog.infer(table.get("i").unwrap()), vec!["*"]);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let (table, catalog) = catalog(vec![
            set("first", &["a", "b"]),
            set("second", &["b", "a"]),
            parameter("p", &[("a", "b")]),
        ]);
        assert_eq!(catalog.infer(table.get("p").unwrap()), vec!["first", "first"]);
    }

    #[test]
    fn test_unmatched_slot_stays_wildcard() {
        let (table, catalog) = catalog(vec![
            set("i", &["a", "b"]),
            parameter("p", &[("a", "zzz")]),
        ]);
        assert_eq!(catalog.infer(table.get("p").unwrap()), vec!["i", "*"]);
    }

    #[test]
    fn test_named_dims_are_kept() {
        let (_, catalog) = catalog(vec![set("i", &["a"])]);
        let mut sym = Symbol::new("q", SymbolKind::Parameter).with_dims(["k"]);
        sym.push_record(vec!["a".into(), 2.0.into()]).unwrap();
        assert_eq!(catalog.infer(&sym), vec!["k"]);
    }
}
