//! One-call conversions between containers and tables

use gdxframe_core::GdxCodec;
use indexmap::IndexMap;
use tracing::debug;

use crate::classify::classify;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::session::ContainerSession;
use crate::symbol::Symbol;
use crate::table::{ColumnKey, Table};

/// Every symbol of a container as an ordered name to table map
pub fn to_tables<C: GdxCodec>(
    codec: C,
    path: &str,
    config: SessionConfig,
) -> Result<IndexMap<String, Table>> {
    ContainerSession::open(codec, path, config.with_lazy_load(false))?.into_tables()
}

/// Records of a single symbol; only that symbol is streamed
pub fn to_table<C: GdxCodec>(
    codec: C,
    path: &str,
    name: &str,
    config: SessionConfig,
) -> Result<Table> {
    let mut session = ContainerSession::open(codec, path, config.with_lazy_load(true))?;
    if !session.symbols().contains(name) {
        return Err(Error::not_found(format!("no symbol named {name} in {path}")));
    }
    session.load(name)?;
    Ok(session.get_mut(name)?.take_records())
}

/// Symbol names of a container, without reading any records
pub fn list_symbols<C: GdxCodec>(codec: C, path: &str, config: SessionConfig) -> Result<Vec<String>> {
    let session = ContainerSession::open(codec, path, config.with_lazy_load(true))?;
    Ok(session.keys().into_iter().map(str::to_string).collect())
}

/// Write named tables as a container
///
/// Each table's kind and dims come from [`classify`]. Returns the session,
/// now backed by `path`.
pub fn from_tables<C, I, K>(
    codec: C,
    tables: I,
    path: &str,
    config: SessionConfig,
) -> Result<ContainerSession<C>>
where
    C: GdxCodec,
    I: IntoIterator<Item = (K, Table)>,
    K: Into<String>,
{
    let mut session = ContainerSession::new(codec, config)?;
    for (name, table) in tables {
        let symbol = symbol_from_table(name.into(), table)?;
        session.symbols_mut().push(symbol)?;
    }
    session.write(path)?;
    Ok(session)
}

/// Build a symbol from a caller table, re-keyed to the classified layout
pub fn symbol_from_table(name: String, mut table: Table) -> Result<Symbol> {
    let class = classify(&table);
    debug!(symbol = %name, kind = %class.kind, dims = ?class.dims, "classified table");

    let mut symbol = Symbol::new(name, class.kind).with_dims(class.dims.iter().cloned());
    if table.width() > 0 {
        let mut columns: Vec<ColumnKey> = class.dims.iter().map(|d| d.as_str().into()).collect();
        if !class.labels_only {
            columns.extend(class.kind.value_columns().iter().map(|c| c.name.into()));
        }
        table.set_columns(columns);
    }
    symbol.set_records(table)?;
    Ok(symbol)
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;
    use crate::table::Cell;
    use gdxframe_core::SymbolKind;

    fn tables() -> Vec<(&'static str, Table)> {
        vec![
            (
                "i",
                Table::from_rows(vec![vec!["CC".into()], vec!["DD".into()]]).unwrap(),
            ),
            (
                "demand",
                Table::with_rows(
                    ["i", "Value"],
                    vec![
                        vec!["CC".into(), 4.0.into()],
                        vec!["DD".into(), Cell::Missing],
                    ],
                )
                .unwrap(),
            ),
        ]
    }

    #[test]
    fn test_from_tables_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let path = path.to_str().unwrap();

        let session = from_tables(JsonCodec::new(), tables(), path, SessionConfig::default()).unwrap();
        assert_eq!(session.get("i").unwrap().kind(), SymbolKind::Set);
        assert_eq!(session.get("demand").unwrap().dims(), &["i"]);

        let names = list_symbols(JsonCodec::new(), path, SessionConfig::default()).unwrap();
        assert_eq!(names, vec!["i", "demand"]);

        let all = to_tables(JsonCodec::new(), path, SessionConfig::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["demand"].row(1).unwrap()[1], Cell::Missing);
        assert_eq!(all["i"].row(0).unwrap()[1], Cell::Bool(true));

        let one = to_table(JsonCodec::new(), path, "DEMAND", SessionConfig::default()).unwrap();
        assert!(one.equivalent(&all["demand"]));
    }

    #[test]
    fn test_to_table_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let path = path.to_str().unwrap();
        from_tables(JsonCodec::new(), tables(), path, SessionConfig::default()).unwrap();

        let err = to_table(JsonCodec::new(), path, "supply", SessionConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("supply")));
    }

    #[test]
    fn test_symbol_from_table_rekeys_columns() {
        let table = Table::with_rows(
            ["region code", "val"],
            vec![vec!["north".into(), 2.0.into()]],
        )
        .unwrap();
        let symbol = symbol_from_table("p".to_string(), table).unwrap();
        assert_eq!(symbol.dims(), &["*"]);
        assert_eq!(symbol.records().columns()[1], ColumnKey::from("Value"));
    }

    #[test]
    fn test_empty_set_kind_needs_a_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let path = path.to_str().unwrap();

        let mut session = ContainerSession::new(JsonCodec::new(), SessionConfig::default()).unwrap();
        let mut kept = Symbol::new("kept", SymbolKind::Set).with_dimension_count(1);
        kept.set_records(Table::new(["*", "Value"])).unwrap();
        session.symbols_mut().push(kept).unwrap();
        let table = Table::new(["i", "Value"]);
        session
            .symbols_mut()
            .push(symbol_from_table("guessed".to_string(), table).unwrap())
            .unwrap();
        session.write(path).unwrap();

        let read = ContainerSession::open(JsonCodec::new(), path, SessionConfig::default()).unwrap();
        assert_eq!(read.get("kept").unwrap().kind(), SymbolKind::Set);
        assert_eq!(read.get("kept").unwrap().num_records(), 0);
        assert_eq!(read.get("guessed").unwrap().kind(), SymbolKind::Parameter);
    }

    #[test]
    fn test_symbol_from_empty_and_scalar_tables() {
        let empty = symbol_from_table("d".to_string(), Table::new(["i", "j", "Value"])).unwrap();
        assert_eq!(empty.kind(), SymbolKind::Parameter);
        assert_eq!(empty.dims(), &["i", "j"]);
        assert_eq!(empty.records().width(), 3);
        assert_eq!(empty.num_records(), 0);

        let scalar =
            symbol_from_table("f".to_string(), Table::from_rows(vec![vec![90.0.into()]]).unwrap())
                .unwrap();
        assert_eq!(scalar.full_typename(), "Scalar");
        assert_eq!(scalar.records().columns(), &[ColumnKey::from("Value")]);
        assert_eq!(scalar.records().row(0).unwrap()[0], Cell::Number(90.0));
    }
}
