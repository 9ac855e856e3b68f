//! Container read/write orchestration
//!
//! A [`ContainerSession`] owns one codec handle and one [`SymbolTable`]. It
//! walks container headers on read, streams records either up front or per
//! symbol on demand, and serializes the table on write.

use gdxframe_core::constants::{MAX_VERSION, MIN_VERSION, WILDCARD};
use gdxframe_core::{
    validate_dims, validate_symbol_name, DomainRef, FileVersion, GdxCodec, SpecialValues,
    SubType, SymbolKind, WriteHeader,
};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::domain::DomainCatalog;
use crate::error::{Error, Result};
use crate::guard::OpenContainer;
use crate::lazy::LoadStrategy;
use crate::sentinel::SentinelTable;
use crate::symbol::Symbol;
use crate::symbol_table::{SymbolKey, SymbolTable};
use crate::table::{Cell, Table};
use crate::translator::{label_text, RecordTranslator};

/// One codec handle plus the symbols read from or destined for a container
pub struct ContainerSession<C: GdxCodec> {
    codec: C,
    config: SessionConfig,
    specials: SpecialValues,
    symbols: SymbolTable,
    path: Option<String>,
    version: Option<FileVersion>,
}

impl<C: GdxCodec> ContainerSession<C> {
    /// Empty session
    ///
    /// Initializes the codec with the configured system directory and loads
    /// the special value table.
    pub fn new(mut codec: C, config: SessionConfig) -> Result<Self> {
        let system_dir = config.system_dir_str();
        if !codec.init(system_dir.as_deref()) {
            return Err(Error::CodecInit(codec.last_error_text()));
        }
        let specials = SentinelTable::load(&codec)?;
        Ok(Self {
            codec,
            config,
            specials,
            symbols: SymbolTable::new(),
            path: None,
            version: None,
        })
    }

    /// Session populated from the container at `path`
    pub fn open(codec: C, path: &str, config: SessionConfig) -> Result<Self> {
        let mut session = Self::new(codec, config)?;
        session.read(path)?;
        Ok(session)
    }

    /// Read symbol headers, and records unless lazy, from `path`
    pub fn read(&mut self, path: &str) -> Result<()> {
        if !self.symbols.is_empty() {
            return Err(Error::AlreadyPopulated(self.symbols.len()));
        }
        let strategy = LoadStrategy::from_lazy_flag(self.config.lazy_load);

        let mut container = OpenContainer::read(&mut self.codec, path)?;
        let version = container.file_version().ok_or_else(|| {
            Error::version(format!("{path}: {}", container.last_error_text()))
        })?;
        if !version.is_supported() {
            return Err(Error::version(format!(
                "{path} has version {}, supported are {MIN_VERSION} to {MAX_VERSION}",
                version.version
            )));
        }
        let info = container
            .system_info()
            .ok_or_else(|| Error::codec(container.last_error_text()))?;

        let mut symbols = SymbolTable::new();
        let mut universal = Symbol::universal();
        let rows = RecordTranslator::new(SymbolKind::Set, 1, &self.specials)
            .read_all(&mut *container, 0)?;
        universal.install_records(Table::from_parts(universal.column_keys(), rows));
        universal.attach(0, path);
        symbols.set_universal(universal);

        for index in 1..=info.symbol_count {
            let symbol = read_header(&*container, index, path)?;
            symbols.push(symbol)?;
        }

        if strategy == LoadStrategy::Eager {
            for symbol in symbols.iter_mut() {
                symbol.load_from(&mut *container, &self.specials)?;
            }
            if self.config.infer_domains {
                let catalog = DomainCatalog::from_loaded(&symbols);
                infer_pending(&mut symbols, &catalog);
            }
        }
        container.finish()?;

        info!(
            path,
            version = version.version,
            producer = %version.producer,
            symbols = symbols.len(),
            ?strategy,
            "container read"
        );
        self.symbols = symbols;
        self.path = Some(path.to_string());
        self.version = Some(version);
        Ok(())
    }

    /// Write every symbol to `path`
    ///
    /// All symbols must be loaded; clone the session first to materialize a
    /// lazily read one. Afterwards the symbols are backed by `path`.
    pub fn write(&mut self, path: &str) -> Result<()> {
        let unloaded: Vec<String> = self
            .symbols
            .iter()
            .filter(|s| !s.is_loaded())
            .map(|s| s.name().to_string())
            .collect();
        if !unloaded.is_empty() {
            return Err(Error::IncompleteData(unloaded));
        }

        let labels = label_library(&self.symbols);
        let mut container = OpenContainer::write(&mut self.codec, path, &self.config.producer)?;
        if !container.set_special_values(&self.specials.codes()) {
            return Err(Error::codec(format!(
                "special values: {}",
                container.last_error_text()
            )));
        }
        if !container.register_labels(&labels) {
            return Err(Error::codec(format!(
                "universal set: {}",
                container.last_error_text()
            )));
        }
        for symbol in self.symbols.iter() {
            write_symbol(&mut *container, symbol, &self.specials)
                .map_err(|e| Error::write(symbol.name(), e))?;
            debug!(symbol = %symbol.name(), records = symbol.num_records(), "symbol written");
        }
        container.finish()?;

        for (position, symbol) in self.symbols.iter_mut().enumerate() {
            symbol.attach(position + 1, path);
        }
        let mut universal = Symbol::universal();
        let rows = labels
            .iter()
            .map(|label| vec![Cell::from(label.as_str()), Cell::Bool(true)])
            .collect();
        universal.install_records(Table::from_parts(universal.column_keys(), rows));
        universal.attach(0, path);
        self.symbols.set_universal(universal);
        self.path = Some(path.to_string());

        info!(
            path,
            symbols = self.symbols.len(),
            labels = labels.len(),
            "container written"
        );
        Ok(())
    }

    /// Detached, fully loaded copy on a fresh codec handle
    ///
    /// Unloaded symbols are loaded first. The copy has no path, so it can be
    /// written anywhere.
    pub fn try_clone(&mut self) -> Result<Self> {
        self.load_all()?;
        let mut symbols = SymbolTable::new();
        symbols.set_universal(self.symbols.universal().clone_detached()?);
        for symbol in self.symbols.iter() {
            symbols.push(symbol.clone_detached()?)?;
        }
        Ok(Self {
            codec: self.codec.fork(),
            config: self.config.clone(),
            specials: self.specials,
            symbols,
            path: None,
            version: self.version.clone(),
        })
    }

    /// Load one symbol's records
    pub fn load<'k>(&mut self, key: impl Into<SymbolKey<'k>>) -> Result<()> {
        let key = key.into();
        let position = self
            .symbols
            .position(key)
            .ok_or_else(|| Error::not_found(key.to_string()))?;
        if self.symbols.get(position)?.is_loaded() {
            info!(symbol = %key, "nothing to do, symbol already loaded");
            return Ok(());
        }
        self.load_positions(&[position])
    }

    /// Load every symbol that is not loaded yet
    pub fn load_all(&mut self) -> Result<()> {
        let pending: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_loaded())
            .map(|(i, _)| i)
            .collect();
        if pending.is_empty() {
            return Ok(());
        }
        self.load_positions(&pending)
    }

    /// Drop one symbol's records
    pub fn unload<'k>(&mut self, key: impl Into<SymbolKey<'k>>) -> Result<()> {
        self.symbols.get_mut(key)?.unload();
        Ok(())
    }

    /// Drop the records of every symbol backed by a container
    pub fn unload_all(&mut self) {
        for symbol in self.symbols.iter_mut().filter(|s| s.source().is_some()) {
            symbol.unload();
        }
    }

    pub fn get<'k>(&self, key: impl Into<SymbolKey<'k>>) -> Result<&Symbol> {
        self.symbols.get(key)
    }

    pub fn get_mut<'k>(&mut self, key: impl Into<SymbolKey<'k>>) -> Result<&mut Symbol> {
        self.symbols.get_mut(key)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Symbol names in container order
    pub fn keys(&self) -> Vec<&str> {
        self.symbols.keys()
    }

    /// Number of labels in the universal set
    pub fn num_elements(&self) -> usize {
        self.symbols.universal().num_records()
    }

    /// Path the session was last read from or written to
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Version information of the container that was read
    pub fn version(&self) -> Option<&FileVersion> {
        self.version.as_ref()
    }

    /// Producer tag of the container that was read
    pub fn producer(&self) -> Option<&str> {
        self.version.as_ref().map(|v| v.producer.as_str())
    }

    pub fn special_values(&self) -> &SpecialValues {
        &self.specials
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Consume the session into an ordered name to table map
    ///
    /// Unloaded symbols are loaded first.
    pub fn into_tables(mut self) -> Result<IndexMap<String, Table>> {
        self.load_all()?;
        Ok(self
            .symbols
            .into_symbols()
            .into_iter()
            .map(|mut s| {
                let records = s.take_records();
                (s.name().to_string(), records)
            })
            .collect())
    }

    /// Load symbols, opening each backing container once
    fn load_positions(&mut self, positions: &[usize]) -> Result<()> {
        let mut by_source: IndexMap<String, Vec<usize>> = IndexMap::new();
        for &position in positions {
            let (source, _) = self.symbols.get(position)?.backing()?;
            by_source.entry(source).or_default().push(position);
        }

        for (source, group) in by_source {
            let mut container = OpenContainer::read(&mut self.codec, &source)?;
            for &position in &group {
                self.symbols
                    .get_mut(position)?
                    .load_from(&mut *container, &self.specials)?;
            }

            let needs_domains = self.config.infer_domains
                && group
                    .iter()
                    .any(|&p| self.symbols.get(p).is_ok_and(Symbol::domain_pending));
            if needs_domains {
                let catalog =
                    DomainCatalog::collect(&self.symbols, &mut *container, &source, &self.specials)?;
                infer_pending(&mut self.symbols, &catalog);
            }
            container.finish()?;
        }
        Ok(())
    }
}

impl<C: GdxCodec> std::fmt::Debug for ContainerSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerSession")
            .field("path", &self.path)
            .field("version", &self.version)
            .field("symbols", &self.symbols.keys())
            .field("config", &self.config)
            .finish()
    }
}

/// Descriptor of the symbol at `index`, records not loaded
fn read_header<C: GdxCodec>(codec: &C, index: usize, path: &str) -> Result<Symbol> {
    let header = codec.symbol_info(index).ok_or_else(|| {
        Error::codec(format!("header of symbol {index}: {}", codec.last_error_text()))
    })?;
    header.check_dimension()?;
    let kind = header.kind()?;
    let details = codec.symbol_info_extended(index).ok_or_else(|| {
        Error::codec(format!("details of {}: {}", header.name, codec.last_error_text()))
    })?;

    let sub_type = SubType::from_code(kind, details.user_info).unwrap_or_else(|e| {
        warn!(
            symbol = %header.name,
            code = details.user_info,
            error = %e,
            "unknown sub-type, using the default"
        );
        SubType::default_for(kind)
    });

    let (dims, domain_pending) = match codec.symbol_domain(index) {
        Some(refs) if refs.len() == header.dimension => {
            let dims = refs.iter().map(|r| domain_name(codec, r)).collect();
            (dims, false)
        }
        Some(refs) => {
            warn!(
                symbol = %header.name,
                expected = header.dimension,
                found = refs.len(),
                "domain list does not match the dimension"
            );
            (vec![WILDCARD.to_string(); header.dimension], true)
        }
        None => {
            debug!(symbol = %header.name, "no domain information");
            (vec![WILDCARD.to_string(); header.dimension], true)
        }
    };

    Ok(Symbol::from_container(
        header.name,
        kind,
        sub_type,
        dims,
        details.description,
        index,
        path.to_string(),
        details.record_count,
        domain_pending,
    ))
}

fn domain_name<C: GdxCodec>(codec: &C, domain: &DomainRef) -> String {
    match domain {
        DomainRef::Wildcard => WILDCARD.to_string(),
        DomainRef::Relaxed(name) => name.clone(),
        DomainRef::Symbol(index) => match codec.symbol_info(*index) {
            Some(header) => header.name,
            None => {
                warn!(index, "domain refers to an unknown symbol");
                WILDCARD.to_string()
            }
        },
    }
}

fn infer_pending(symbols: &mut SymbolTable, catalog: &DomainCatalog) {
    debug!(candidates = catalog.len(), "inferring domains");
    for symbol in symbols.iter_mut() {
        if symbol.is_loaded() && symbol.domain_pending() {
            let dims = catalog.infer(symbol);
            symbol.apply_inferred_dims(dims);
        }
    }
}

/// Stored universal labels followed by every new label the symbols use
fn label_library(symbols: &SymbolTable) -> Vec<String> {
    let mut labels: IndexSet<String> = symbols
        .universal()
        .records()
        .rows()
        .iter()
        .filter_map(|row| row.first().and_then(Cell::as_label))
        .map(str::to_string)
        .collect();
    for symbol in symbols.iter() {
        for row in symbol.records().rows() {
            // invalid labels are reported when the symbol itself is written
            labels.extend(row[..symbol.num_dims()].iter().filter_map(|c| label_text(c).ok()));
        }
    }
    labels.into_iter().collect()
}

fn write_symbol<C: GdxCodec>(codec: &mut C, symbol: &Symbol, specials: &SpecialValues) -> Result<()> {
    validate_symbol_name(symbol.name())?;
    validate_dims(symbol.dims())?;

    let header = WriteHeader {
        name: symbol.name(),
        description: symbol.description(),
        dimension: symbol.num_dims(),
        kind: symbol.kind(),
        sub_type: symbol.sub_type(),
    };
    if !codec.data_write_start(&header) {
        return Err(Error::codec(codec.last_error_text()));
    }
    if !codec.symbol_set_domain(symbol.dims()) {
        return Err(Error::codec(codec.last_error_text()));
    }
    RecordTranslator::new(symbol.kind(), symbol.num_dims(), specials)
        .write_all(codec, symbol.records().rows())?;
    if !codec.data_write_done() {
        return Err(Error::codec(codec.last_error_text()));
    }
    Ok(())
}
