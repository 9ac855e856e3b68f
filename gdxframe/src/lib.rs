//! gdxframe - GDX containers as per-symbol tables
//!
//! This library reads the symbols of a GDX container (sets, parameters,
//! variables, equations and aliases) into one row-oriented table each, and
//! writes such tables back, translating the container's special values on
//! the way.
//!
//! ## Architecture
//!
//! gdxframe follows a definitions/implementation split:
//!
//! - **gdxframe-core**: symbol kinds, value layout, the special value table,
//!   the codec trait and validation (no I/O)
//! - **gdxframe**: sessions, lazy loading, record translation and a JSON
//!   reference codec
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdxframe::{ContainerSession, JsonCodec, SessionConfig};
//!
//! fn example() -> gdxframe::Result<()> {
//!     // Read headers only; records are streamed per symbol on demand
//!     let mut session =
//!         ContainerSession::open(JsonCodec::new(), "model.json", SessionConfig::lazy())?;
//!
//!     session.load("demand")?;
//!     let demand = session.get("demand")?;
//!     println!("{demand}");
//!     for row in demand.records().rows() {
//!         println!("{row:?}");
//!     }
//!
//!     // Loaded, detached copy that can be written anywhere
//!     let mut copy = session.try_clone()?;
//!     copy.write("copy.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lazy loading**: open large containers without reading their records
//! - **Special values**: undefined, NA, infinities and epsilon map to `None`,
//!   NaN, `±inf` and `f64::EPSILON`
//! - **Domain inference**: guesses domains for containers without them
//! - **Table classification**: plain tables become symbols of the right kind
//! - **serde** (default): the JSON reference codec

// Re-export core abstractions and format definitions
pub use gdxframe_core::{
    // Codec interface
    GdxCodec,
    // Format definitions
    DomainRef, EquationType, FileVersion, NativeRecord, SpecialValue, SpecialValues, SubType,
    SymbolKind, ValueColumn, ValueSlot, VariableType,
    // Special value helpers
    host_values_equal, is_epsilon, is_special, HOST_EPSILON,
    // Errors
    FormatError,
};

pub mod classify;
pub mod codec;
pub mod config;
pub mod convert;
mod domain;
pub mod error;
mod guard;
pub mod lazy;
pub mod sentinel;
pub mod session;
pub mod symbol;
pub mod symbol_table;
pub mod table;
pub mod translator;

// Public exports
pub use classify::{classify, Classification};
pub use config::SessionConfig;
pub use convert::{from_tables, list_symbols, symbol_from_table, to_table, to_tables};
pub use error::{Error, Result};
pub use lazy::{LoadState, LoadStrategy};
pub use sentinel::SentinelTable;
pub use session::ContainerSession;
pub use symbol::Symbol;
pub use symbol_table::{SymbolKey, SymbolTable};
pub use table::{Cell, ColumnKey, Table};
pub use translator::{label_text, RecordTranslator};

// Reference codec
#[cfg(feature = "serde")]
pub use codec::{ContainerImage, JsonCodec, StoredSymbol};
