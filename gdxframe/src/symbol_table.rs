//! Ordered, name-keyed symbol collection
//!
//! Symbols are kept in container order. A case-insensitive name index sits
//! next to the list and is rebuilt after every structural change, so lookup
//! by name and by position always agree.

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Key addressing a symbol by position or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKey<'a> {
    Position(usize),
    Name(&'a str),
}

impl From<usize> for SymbolKey<'_> {
    fn from(value: usize) -> Self {
        SymbolKey::Position(value)
    }
}

impl<'a> From<&'a str> for SymbolKey<'a> {
    fn from(value: &'a str) -> Self {
        SymbolKey::Name(value)
    }
}

impl<'a> From<&'a String> for SymbolKey<'a> {
    fn from(value: &'a String) -> Self {
        SymbolKey::Name(value)
    }
}

impl std::fmt::Display for SymbolKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKey::Position(i) => write!(f, "position {i}"),
            SymbolKey::Name(name) => write!(f, "{name}"),
        }
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Symbols of one container plus its universal set
#[derive(Debug, Clone)]
pub struct SymbolTable {
    universal: Symbol,
    symbols: Vec<Symbol>,
    by_name: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            universal: Symbol::universal(),
            symbols: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// The index-0 pseudo-symbol listing every label
    pub fn universal(&self) -> &Symbol {
        &self.universal
    }

    pub(crate) fn set_universal(&mut self, universal: Symbol) {
        self.universal = universal;
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Symbol> {
        self.symbols.iter_mut()
    }

    /// Display names in order
    pub fn keys(&self) -> Vec<&str> {
        self.symbols.iter().map(Symbol::name).collect()
    }

    /// Position a key refers to, if any
    pub fn position<'k>(&self, key: impl Into<SymbolKey<'k>>) -> Option<usize> {
        match key.into() {
            SymbolKey::Position(i) if i < self.symbols.len() => Some(i),
            SymbolKey::Position(_) => None,
            SymbolKey::Name(name) => self.by_name.get(&normalize(name)).copied(),
        }
    }

    /// Whether a key refers to a symbol; never fails
    pub fn contains<'k>(&self, key: impl Into<SymbolKey<'k>>) -> bool {
        self.position(key).is_some()
    }

    pub fn get<'k>(&self, key: impl Into<SymbolKey<'k>>) -> Result<&Symbol> {
        let key = key.into();
        let position = self
            .position(key)
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        Ok(&self.symbols[position])
    }

    pub fn get_mut<'k>(&mut self, key: impl Into<SymbolKey<'k>>) -> Result<&mut Symbol> {
        let key = key.into();
        let position = self
            .position(key)
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        Ok(&mut self.symbols[position])
    }

    /// Append a symbol
    pub fn push(&mut self, symbol: Symbol) -> Result<()> {
        self.insert(self.symbols.len(), symbol)
    }

    /// Insert a symbol before `position`
    pub fn insert(&mut self, position: usize, symbol: Symbol) -> Result<()> {
        if position > self.symbols.len() {
            return Err(Error::invalid_key(format!(
                "position {position} is past the end of {} symbols",
                self.symbols.len()
            )));
        }
        self.check_collision(symbol.name(), None)?;
        self.symbols.insert(position, symbol);
        self.reindex();
        Ok(())
    }

    /// Replace the symbol at a position, or append when `position == len()`
    ///
    /// Only positions are accepted. Returns the replaced symbol.
    pub fn set<'k>(
        &mut self,
        key: impl Into<SymbolKey<'k>>,
        symbol: Symbol,
    ) -> Result<Option<Symbol>> {
        let position = match key.into() {
            SymbolKey::Position(i) => i,
            SymbolKey::Name(name) => {
                return Err(Error::invalid_key(format!(
                    "symbols are replaced by position, not by name ({name})"
                )))
            }
        };

        if position == self.symbols.len() {
            self.push(symbol)?;
            return Ok(None);
        }
        if position > self.symbols.len() {
            return Err(Error::invalid_key(format!(
                "position {position} is past the end of {} symbols",
                self.symbols.len()
            )));
        }

        self.check_collision(symbol.name(), Some(position))?;
        let old = std::mem::replace(&mut self.symbols[position], symbol);
        self.reindex();
        Ok(Some(old))
    }

    /// Remove and return a symbol
    pub fn remove<'k>(&mut self, key: impl Into<SymbolKey<'k>>) -> Result<Symbol> {
        let key = key.into();
        let position = self
            .position(key)
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        let symbol = self.symbols.remove(position);
        self.reindex();
        Ok(symbol)
    }

    /// Rename a symbol, keeping names unique
    pub fn rename<'k>(&mut self, key: impl Into<SymbolKey<'k>>, new_name: &str) -> Result<()> {
        let key = key.into();
        let position = self
            .position(key)
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        self.check_collision(new_name, Some(position))?;
        self.symbols[position].set_name(new_name.to_string());
        self.reindex();
        Ok(())
    }

    /// Consume the table, yielding symbols in order
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    fn check_collision(&self, name: &str, replacing: Option<usize>) -> Result<()> {
        match self.by_name.get(&normalize(name)) {
            Some(&existing) if Some(existing) != replacing => Err(Error::NameCollision(format!(
                "{name} clashes with {}",
                self.symbols[existing].name()
            ))),
            _ => Ok(()),
        }
    }

    fn reindex(&mut self) {
        self.by_name = self
            .symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (normalize(s.name()), i))
            .collect();
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdxframe_core::SymbolKind;

    fn table(names: &[&str]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for name in names {
            table.push(Symbol::new(*name, SymbolKind::Set)).unwrap();
        }
        table
    }

    #[test]
    fn test_lookup_by_name_and_position_agree() {
        let table = table(&["i", "Demand", "x"]);
        assert_eq!(table.get("demand").unwrap().name(), "Demand");
        assert_eq!(table.get("DEMAND").unwrap().name(), "Demand");
        assert_eq!(table.get(1usize).unwrap().name(), "Demand");
        assert_eq!(table.position("X"), Some(2));
        assert_eq!(table.keys(), vec!["i", "Demand", "x"]);
    }

    #[test]
    fn test_case_insensitive_collision() {
        let mut table = table(&["sym"]);
        let err = table.push(Symbol::new("SYM", SymbolKind::Parameter)).unwrap_err();
        assert!(matches!(err, Error::NameCollision(_)));
        let err = table.insert(0, Symbol::new("Sym", SymbolKind::Parameter)).unwrap_err();
        assert!(matches!(err, Error::NameCollision(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_set_by_position_only() {
        let mut table = table(&["a", "b"]);
        let err = table.set("a", Symbol::new("c", SymbolKind::Set)).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));

        // same name at the same position is a replacement, not a collision
        let old = table.set(0usize, Symbol::new("A", SymbolKind::Parameter)).unwrap();
        assert_eq!(old.unwrap().kind(), SymbolKind::Set);
        assert_eq!(table.get("a").unwrap().kind(), SymbolKind::Parameter);

        let err = table.set(1usize, Symbol::new("a", SymbolKind::Set)).unwrap_err();
        assert!(matches!(err, Error::NameCollision(_)));

        assert!(table.set(2usize, Symbol::new("c", SymbolKind::Set)).unwrap().is_none());
        assert!(matches!(
            table.set(5usize, Symbol::new("d", SymbolKind::Set)),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_insert_reindexes() {
        let mut table = table(&["a", "b"]);
        table.insert(0, Symbol::new("z", SymbolKind::Set)).unwrap();
        assert_eq!(table.position("a"), Some(1));
        assert_eq!(table.position("z"), Some(0));
        assert!(matches!(
            table.insert(4, Symbol::new("q", SymbolKind::Set)),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut table = table(&["a", "b", "c"]);
        let removed = table.remove("B").unwrap();
        assert_eq!(removed.name(), "b");
        assert!(!table.contains("b"));
        assert!(table.contains(1usize));
        assert!(!table.contains(2usize));
        assert_eq!(table.position("c"), Some(1));
        assert!(matches!(table.remove("b"), Err(Error::NotFound(_))));
        assert!(matches!(table.get(7usize), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_rename() {
        let mut table = table(&["a", "b"]);
        table.rename("a", "alpha").unwrap();
        assert!(table.contains("ALPHA"));
        assert!(!table.contains("a"));
        assert!(matches!(table.rename(0usize, "B"), Err(Error::NameCollision(_))));
        table.rename(1usize, "B").unwrap();
        assert_eq!(table.get(1usize).unwrap().name(), "B");
    }

    #[test]
    fn test_universal_is_separate() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.universal().index(), Some(0));
        assert_eq!(table.universal().num_dims(), 1);
        assert!(table.universal().is_loaded());
    }
}
