//! Container and symbol header records exchanged with a codec

use alloc::string::String;
use alloc::vec::Vec;

use super::constants::{MAX_DIMENSIONS, MAX_VERSION, MIN_VERSION, VALUE_SLOTS};
use super::symbol::{SubType, SymbolKind};
use crate::{FormatError, Result};

/// Native value vector of one record
pub type NativeValues = [f64; VALUE_SLOTS];

/// File-level version information
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileVersion {
    /// Container format version
    pub version: i32,
    /// Tag of the program that wrote the container
    pub producer: String,
}

impl FileVersion {
    /// Whether the version lies in the supported range
    pub fn is_supported(&self) -> bool {
        (MIN_VERSION..=MAX_VERSION).contains(&self.version)
    }

    /// Reject unsupported versions
    pub fn check(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(FormatError::UnsupportedVersion)
        }
    }
}

/// Container-wide counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemInfo {
    /// Number of data symbols, excluding the universal set
    pub symbol_count: usize,
    /// Number of distinct labels in the universal set
    pub element_count: usize,
}

/// Basic header of one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolHeader {
    pub name: String,
    pub dimension: usize,
    pub kind_code: i32,
}

impl SymbolHeader {
    /// Decode the kind code
    pub fn kind(&self) -> Result<SymbolKind> {
        SymbolKind::from_code(self.kind_code).ok_or(FormatError::UnknownSymbolKind)
    }

    /// Validate the dimension count against the container limit
    pub fn check_dimension(&self) -> Result<()> {
        if self.dimension > MAX_DIMENSIONS {
            return Err(FormatError::TooManyDimensions);
        }
        Ok(())
    }
}

/// Extended header of one symbol
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolDetails {
    pub record_count: usize,
    /// Sub-type code for variables and equations
    pub user_info: i32,
    pub description: String,
}

/// Reference describing one dimension's domain
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DomainRef {
    /// Unconstrained
    Wildcard,
    /// Container index of a set symbol
    Symbol(usize),
    /// Domain name that does not resolve to a symbol in the container
    Relaxed(String),
}

/// Header passed to a codec when a symbol write starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteHeader<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub dimension: usize,
    pub kind: SymbolKind,
    pub sub_type: Option<SubType>,
}

impl WriteHeader<'_> {
    /// User info code stored with the header
    pub fn user_info(&self) -> i32 {
        self.sub_type.map_or(0, SubType::code)
    }
}

/// One native record: a label per dimension plus the value vector
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeRecord {
    pub labels: Vec<String>,
    pub values: NativeValues,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_version_range() {
        let mut version = FileVersion {
            version: 7,
            producer: "test".to_string(),
        };
        assert_eq!(version.check(), Ok(()));
        version.version = 4;
        assert_eq!(version.check(), Err(FormatError::UnsupportedVersion));
        version.version = 8;
        assert!(!version.is_supported());
    }

    #[test]
    fn test_header_kind() {
        let header = SymbolHeader {
            name: "x".to_string(),
            dimension: 2,
            kind_code: 2,
        };
        assert_eq!(header.kind(), Ok(SymbolKind::Variable));
        let bad = SymbolHeader { kind_code: 9, ..header };
        assert_eq!(bad.kind(), Err(FormatError::UnknownSymbolKind));
    }

    #[test]
    fn test_write_header_user_info() {
        use crate::format::symbol::VariableType;

        let header = WriteHeader {
            name: "x",
            description: "",
            dimension: 1,
            kind: SymbolKind::Variable,
            sub_type: Some(SubType::Variable(VariableType::Binary)),
        };
        assert_eq!(header.user_info(), 1);
        let set = WriteHeader {
            kind: SymbolKind::Set,
            sub_type: None,
            ..header
        };
        assert_eq!(set.user_info(), 0);
    }
}
