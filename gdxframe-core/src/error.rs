//! Error types for GDX format definitions

/// Errors raised by pure format and validation routines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Symbol kind code outside 0..=4
    UnknownSymbolKind,
    /// Variable sub-type code outside 0..=9
    UnknownVariableType,
    /// Equation sub-type code outside 53..=58
    UnknownEquationType,
    /// Value slot index outside 0..=4
    UnknownValueSlot,
    /// Sentinel table contains NaN or duplicate codes
    InvalidSentinelTable,
    /// Label is empty, too long or contains control characters
    InvalidLabel,
    /// Symbol name does not follow identifier rules
    InvalidName,
    /// Dimension count exceeds the container limit
    TooManyDimensions,
    /// Container version outside the supported range
    UnsupportedVersion,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::UnknownSymbolKind => "Unknown symbol kind code",
            FormatError::UnknownVariableType => "Unknown variable type code",
            FormatError::UnknownEquationType => "Unknown equation type code",
            FormatError::UnknownValueSlot => "Unknown value slot",
            FormatError::InvalidSentinelTable => "Invalid special value table",
            FormatError::InvalidLabel => "Invalid label",
            FormatError::InvalidName => "Invalid symbol name",
            FormatError::TooManyDimensions => "Too many dimensions",
            FormatError::UnsupportedVersion => "Unsupported container version",
        };
        write!(f, "{msg}")
    }
}

/// Result type for format operations
pub type Result<T> = core::result::Result<T, FormatError>;

impl core::error::Error for FormatError {}
