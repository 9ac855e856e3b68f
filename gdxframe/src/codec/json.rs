//! JSON-backed codec handle
//!
//! Reading loads the whole image into memory; writing builds one and commits
//! it on close. Values are stored with the writer's sentinel codes and
//! re-expressed in the reader's codes while streaming.

use std::cell::RefCell;
use std::path::Path;

use gdxframe_core::constants::{sentinel, UNIVERSAL_NAME, WILDCARD};
use gdxframe_core::{
    DomainRef, FileVersion, GdxCodec, NativeRecord, NativeValues, SpecialValues, SymbolDetails,
    SymbolHeader, SymbolKind, SystemInfo, WriteHeader,
};
use hashbrown::HashSet;
use tracing::debug;

use super::image::{ContainerImage, StoredSymbol};

#[derive(Debug)]
struct ReadCursor {
    index: usize,
    next: usize,
}

#[derive(Debug)]
enum Mode {
    Closed,
    Reading {
        image: ContainerImage,
        stored: SpecialValues,
        cursor: Option<ReadCursor>,
    },
    Writing {
        path: String,
        image: ContainerImage,
        known: HashSet<String>,
        current: Option<StoredSymbol>,
    },
}

/// Codec handle persisting containers as JSON documents
#[derive(Debug)]
pub struct JsonCodec {
    system_dir: Option<String>,
    special: NativeValues,
    mode: Mode,
    last_error: RefCell<String>,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self {
            system_dir: None,
            special: sentinel::DEFAULT_TABLE,
            mode: Mode::Closed,
            last_error: RefCell::new(String::new()),
        }
    }

    /// Use custom sentinel codes; they are reported as given, even if invalid
    pub fn with_special_values(mut self, codes: NativeValues) -> Self {
        self.special = codes;
        self
    }

    /// Whether a container is currently open
    pub fn is_open(&self) -> bool {
        !matches!(self.mode, Mode::Closed)
    }

    /// System directory passed to [`GdxCodec::init`]
    pub fn system_dir(&self) -> Option<&str> {
        self.system_dir.as_deref()
    }

    fn fail(&self, message: impl Into<String>) -> bool {
        *self.last_error.borrow_mut() = message.into();
        false
    }

    fn fail_none<T>(&self, message: impl Into<String>) -> Option<T> {
        self.fail(message);
        None
    }

    fn reading(&self) -> Option<&ContainerImage> {
        match &self.mode {
            Mode::Reading { image, .. } => Some(image),
            _ => self.fail_none("no container open for reading"),
        }
    }

    fn stored(&self, index: usize) -> Option<&StoredSymbol> {
        let image = self.reading()?;
        match index.checked_sub(1).and_then(|i| image.symbols.get(i)) {
            Some(symbol) => Some(symbol),
            None => self.fail_none(format!("symbol index {index} out of range")),
        }
    }

    fn commit(&mut self) -> bool {
        let Mode::Writing {
            path,
            image,
            current,
            ..
        } = std::mem::replace(&mut self.mode, Mode::Closed)
        else {
            return true;
        };
        if let Some(open) = current {
            return self.fail(format!("symbol {} was not finished", open.name));
        }
        match image.save(&path) {
            Ok(()) => {
                debug!(%path, symbols = image.symbols.len(), "json container committed");
                true
            }
            Err(e) => self.fail(format!("cannot save {path}: {e}")),
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl GdxCodec for JsonCodec {
    fn init(&mut self, system_dir: Option<&str>) -> bool {
        if let Some(dir) = system_dir {
            if !Path::new(dir).is_dir() {
                return self.fail(format!("system directory {dir} does not exist"));
            }
        }
        self.system_dir = system_dir.map(str::to_string);
        true
    }

    fn fork(&self) -> Self {
        Self {
            system_dir: self.system_dir.clone(),
            special: self.special,
            mode: Mode::Closed,
            last_error: RefCell::new(String::new()),
        }
    }

    fn open_read(&mut self, path: &str) -> bool {
        if self.is_open() {
            return self.fail("a container is already open");
        }
        let image = match ContainerImage::load(path) {
            Ok(image) => image,
            Err(e) => return self.fail(format!("cannot read {path}: {e}")),
        };
        let stored = match SpecialValues::from_codes(image.special_values) {
            Ok(stored) => stored,
            Err(e) => return self.fail(format!("{path} carries {e}")),
        };
        self.mode = Mode::Reading {
            image,
            stored,
            cursor: None,
        };
        true
    }

    fn open_write(&mut self, path: &str, producer: &str) -> bool {
        if self.is_open() {
            return self.fail("a container is already open");
        }
        let target = Path::new(path);
        if target.is_dir() {
            return self.fail(format!("{path} is a directory"));
        }
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return self.fail(format!("directory {} does not exist", parent.display()));
            }
        }

        let mut image = ContainerImage::new(producer);
        image.special_values = self.special;
        self.mode = Mode::Writing {
            path: path.to_string(),
            image,
            known: HashSet::new(),
            current: None,
        };
        true
    }

    fn close(&mut self) -> bool {
        if matches!(self.mode, Mode::Writing { .. }) {
            return self.commit();
        }
        self.mode = Mode::Closed;
        true
    }

    fn file_version(&self) -> Option<FileVersion> {
        let image = self.reading()?;
        Some(FileVersion {
            version: image.version,
            producer: image.producer.clone(),
        })
    }

    fn system_info(&self) -> Option<SystemInfo> {
        let image = self.reading()?;
        Some(SystemInfo {
            symbol_count: image.symbols.len(),
            element_count: image.labels.len(),
        })
    }

    fn symbol_info(&self, index: usize) -> Option<SymbolHeader> {
        if index == 0 {
            self.reading()?;
            return Some(SymbolHeader {
                name: UNIVERSAL_NAME.to_string(),
                dimension: 1,
                kind_code: SymbolKind::Set.code(),
            });
        }
        let symbol = self.stored(index)?;
        Some(SymbolHeader {
            name: symbol.name.clone(),
            dimension: symbol.dimension,
            kind_code: symbol.kind,
        })
    }

    fn symbol_info_extended(&self, index: usize) -> Option<SymbolDetails> {
        if index == 0 {
            let image = self.reading()?;
            return Some(SymbolDetails {
                record_count: image.labels.len(),
                user_info: 0,
                description: "Universal set".to_string(),
            });
        }
        let symbol = self.stored(index)?;
        Some(SymbolDetails {
            record_count: symbol.records.len(),
            user_info: symbol.user_info,
            description: symbol.description.clone(),
        })
    }

    fn symbol_domain(&self, index: usize) -> Option<Vec<DomainRef>> {
        if index == 0 {
            self.reading()?;
            return Some(vec![DomainRef::Wildcard]);
        }
        let image = self.reading()?;
        let symbol = self.stored(index)?;
        let Some(domain) = &symbol.domain else {
            return self.fail_none(format!("{} has no domain information", symbol.name));
        };
        let refs = domain
            .iter()
            .map(|name| {
                if name == WILDCARD {
                    DomainRef::Wildcard
                } else {
                    match image.position(name) {
                        Some(i) => DomainRef::Symbol(i + 1),
                        None => DomainRef::Relaxed(name.clone()),
                    }
                }
            })
            .collect();
        Some(refs)
    }

    fn data_read_start(&mut self, index: usize) -> Option<usize> {
        let count = if index == 0 {
            self.reading()?.labels.len()
        } else {
            self.stored(index)?.records.len()
        };
        if let Mode::Reading { cursor, .. } = &mut self.mode {
            *cursor = Some(ReadCursor { index, next: 0 });
        }
        Some(count)
    }

    fn data_read_row(&mut self) -> Option<NativeRecord> {
        let special = SpecialValues::from_codes(self.special).ok();
        let Mode::Reading {
            image,
            stored,
            cursor: Some(cursor),
        } = &mut self.mode
        else {
            return self.fail_none("no read in progress");
        };
        let stored = *stored;

        let position = cursor.next;
        let record = if cursor.index == 0 {
            image.labels.get(position).map(|label| NativeRecord {
                labels: vec![label.clone()],
                values: [0.0; 5],
            })
        } else {
            image.symbols[cursor.index - 1].records.get(position).map(|record| {
                let mut record = record.clone();
                if let Some(special) = special {
                    for value in &mut record.values {
                        *value = special.remap_from(*value, &stored);
                    }
                }
                record
            })
        };
        if record.is_some() {
            cursor.next += 1;
        }
        record
    }

    fn data_read_done(&mut self) -> bool {
        match &mut self.mode {
            Mode::Reading { cursor, .. } if cursor.is_some() => {
                *cursor = None;
                true
            }
            _ => self.fail("no read in progress"),
        }
    }

    fn register_labels(&mut self, labels: &[String]) -> bool {
        let Mode::Writing { image, known, .. } = &mut self.mode else {
            return self.fail("no container open for writing");
        };
        for label in labels {
            if known.insert(label.clone()) {
                image.labels.push(label.clone());
            }
        }
        true
    }

    fn data_write_start(&mut self, header: &WriteHeader<'_>) -> bool {
        let Mode::Writing { current, .. } = &mut self.mode else {
            return self.fail("no container open for writing");
        };
        if let Some(open) = current {
            let message = format!("symbol {} is still being written", open.name);
            return self.fail(message);
        }
        *current = Some(StoredSymbol {
            name: header.name.to_string(),
            kind: header.kind.code(),
            user_info: header.user_info(),
            description: header.description.to_string(),
            dimension: header.dimension,
            domain: None,
            records: Vec::new(),
        });
        true
    }

    fn symbol_set_domain(&mut self, domain: &[String]) -> bool {
        let Mode::Writing {
            current: Some(symbol),
            ..
        } = &mut self.mode
        else {
            return self.fail("no symbol being written");
        };
        if domain.len() != symbol.dimension {
            let message = format!(
                "{} has {} dimensions, domain lists {}",
                symbol.name,
                symbol.dimension,
                domain.len()
            );
            return self.fail(message);
        }
        symbol.domain = Some(domain.to_vec());
        true
    }

    fn data_write_row(&mut self, labels: &[String], values: &NativeValues) -> bool {
        let Mode::Writing {
            image,
            known,
            current: Some(symbol),
            ..
        } = &mut self.mode
        else {
            return self.fail("no symbol being written");
        };
        if labels.len() != symbol.dimension {
            let message = format!(
                "{} expects {} labels, got {}",
                symbol.name,
                symbol.dimension,
                labels.len()
            );
            return self.fail(message);
        }
        for label in labels {
            if known.insert(label.clone()) {
                image.labels.push(label.clone());
            }
        }
        symbol.records.push(NativeRecord {
            labels: labels.to_vec(),
            values: *values,
        });
        true
    }

    fn data_write_done(&mut self) -> bool {
        let Mode::Writing { image, current, .. } = &mut self.mode else {
            return self.fail("no container open for writing");
        };
        match current.take() {
            Some(symbol) => {
                image.symbols.push(symbol);
                true
            }
            None => self.fail("no symbol being written"),
        }
    }

    fn special_values(&self) -> Option<NativeValues> {
        Some(self.special)
    }

    fn set_special_values(&mut self, values: &NativeValues) -> bool {
        if let Err(e) = SpecialValues::from_codes(*values) {
            return self.fail(e.to_string());
        }
        self.special = *values;
        if let Mode::Writing { image, .. } = &mut self.mode {
            image.special_values = *values;
        }
        true
    }

    fn last_error_text(&self) -> String {
        self.last_error.borrow().clone()
    }
}
