//! GDX format definitions
//!
//! Pure data definitions shared by codecs and the translation layer: symbol
//! kinds and sub-types, value column layout, sentinel codes and the header
//! records a codec reports. No I/O lives here.

pub mod constants;
pub mod header;
pub mod special;
pub mod symbol;

// Re-export format definitions
pub use header::{
    DomainRef, FileVersion, NativeRecord, NativeValues, SymbolDetails, SymbolHeader, SystemInfo,
    WriteHeader,
};
pub use special::{host_values_equal, is_epsilon, is_special, SpecialValue, SpecialValues, HOST_EPSILON};
pub use symbol::{EquationType, SubType, SymbolKind, ValueColumn, ValueSlot, VariableType};
