//! Deferred, per-symbol record loading
//!
//! Symbols read from a container start out [`LoadState::Unloaded`] in lazy
//! sessions. Loading streams the records of one symbol; unloading drops them
//! again and keeps only the header information.

use gdxframe_core::{GdxCodec, SpecialValues};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::guard::OpenContainer;
use crate::symbol::Symbol;
use crate::table::Table;
use crate::translator::RecordTranslator;

/// Whether a symbol's records are in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
}

/// How a session materializes records when it reads a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Stream every symbol while the container is open
    Eager,
    /// Stream a symbol the first time it is loaded
    OnDemand,
}

impl LoadStrategy {
    pub fn from_lazy_flag(lazy: bool) -> Self {
        if lazy {
            LoadStrategy::OnDemand
        } else {
            LoadStrategy::Eager
        }
    }
}

impl Symbol {
    /// Load records from the backing container
    ///
    /// A no-op for symbols that are already loaded.
    pub fn load<C: GdxCodec>(&mut self, codec: &mut C, specials: &SpecialValues) -> Result<()> {
        if self.is_loaded() {
            info!(symbol = %self.name(), "nothing to do, symbol already loaded");
            return Ok(());
        }
        let (source, _) = self.backing()?;
        let mut container = OpenContainer::read(codec, &source)?;
        self.load_from(&mut *container, specials)?;
        container.finish()
    }

    /// Drop the records, keeping the header
    ///
    /// The universal set stays loaded.
    pub fn unload(&mut self) {
        if self.is_universal() {
            info!("the universal set is always loaded");
            return;
        }
        if !self.is_loaded() {
            return;
        }
        if self.source().is_none() {
            warn!(symbol = %self.name(), "unloading a symbol without a backing container discards its records");
        }
        self.clear_records();
        debug!(symbol = %self.name(), "unloaded");
    }

    /// Container path and index the symbol loads from
    pub(crate) fn backing(&self) -> Result<(String, usize)> {
        let source = self
            .source()
            .ok_or_else(|| Error::MissingContainer(self.name().to_string()))?;
        let index = self
            .index()
            .ok_or_else(|| Error::MissingIndex(self.name().to_string()))?;
        Ok((source.to_string(), index))
    }

    /// Stream records from a container that is already open
    pub(crate) fn load_from<C: GdxCodec>(
        &mut self,
        codec: &mut C,
        specials: &SpecialValues,
    ) -> Result<()> {
        let (_, index) = self.backing()?;
        let translator = RecordTranslator::new(self.kind(), self.num_dims(), specials);
        let rows = translator.read_all(codec, index)?;
        let count = rows.len();
        self.install_records(Table::from_parts(self.column_keys(), rows));
        debug!(symbol = %self.name(), records = count, "loaded");
        Ok(())
    }
}
