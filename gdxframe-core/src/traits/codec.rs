//! Container codec interface
//!
//! A codec is the runtime that actually reads and writes the binary
//! container. The translation layer treats it as a black box: one codec value
//! is one handle, holding at most one open container at a time. Calls report
//! plain success or failure; the reason for the last failure is available
//! through [`GdxCodec::last_error_text`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::format::{
    DomainRef, FileVersion, NativeRecord, NativeValues, SymbolDetails, SymbolHeader, SystemInfo,
    WriteHeader,
};

/// Trait for runtimes that can read and write GDX containers
///
/// Symbol indices follow container order: 0 is the universal set and data
/// symbols start at 1.
pub trait GdxCodec {
    /// Prepare the handle, optionally pointing at the runtime's system
    /// directory
    fn init(&mut self, system_dir: Option<&str>) -> bool;

    /// Create a fresh handle on the same runtime with no open container
    fn fork(&self) -> Self
    where
        Self: Sized;

    /// Open an existing container for reading
    fn open_read(&mut self, path: &str) -> bool;

    /// Create a container for writing, tagged with the producer name
    fn open_write(&mut self, path: &str, producer: &str) -> bool;

    /// Close the open container
    ///
    /// For containers opened with [`open_write`](Self::open_write) this is
    /// the point where data is committed. Closing without an open container
    /// is a no-op that reports success.
    fn close(&mut self) -> bool;

    /// Version and producer of the open container
    fn file_version(&self) -> Option<FileVersion>;

    /// Symbol and label counts of the open container
    fn system_info(&self) -> Option<SystemInfo>;

    /// Name, dimension and kind of the symbol at `index`
    fn symbol_info(&self, index: usize) -> Option<SymbolHeader>;

    /// Record count, sub-type code and description of the symbol at `index`
    fn symbol_info_extended(&self, index: usize) -> Option<SymbolDetails>;

    /// Domain of each dimension of the symbol at `index`
    ///
    /// Returns `None` when the container carries no domain information for
    /// the symbol, as with containers written by older runtimes.
    fn symbol_domain(&self, index: usize) -> Option<Vec<DomainRef>>;

    /// Start streaming the records of the symbol at `index`
    ///
    /// Returns the number of records that will follow.
    fn data_read_start(&mut self, index: usize) -> Option<usize>;

    /// Next record of the current read, `None` once exhausted
    fn data_read_row(&mut self) -> Option<NativeRecord>;

    /// Finish the current read
    fn data_read_done(&mut self) -> bool;

    /// Register labels in the universal set before symbols are written
    fn register_labels(&mut self, labels: &[String]) -> bool;

    /// Start writing a symbol
    fn data_write_start(&mut self, header: &WriteHeader<'_>) -> bool;

    /// Record the domain names of the symbol being written
    fn symbol_set_domain(&mut self, domain: &[String]) -> bool;

    /// Append one record to the symbol being written
    fn data_write_row(&mut self, labels: &[String], values: &NativeValues) -> bool;

    /// Finish the symbol being written
    fn data_write_done(&mut self) -> bool;

    /// Sentinel codes used by this handle, in special value order
    fn special_values(&self) -> Option<NativeValues>;

    /// Replace the sentinel codes used by this handle
    fn set_special_values(&mut self, values: &NativeValues) -> bool;

    /// Description of the most recent failure
    fn last_error_text(&self) -> String;
}
