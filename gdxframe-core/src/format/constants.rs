//! Format constants for GDX containers

/// Wildcard domain marker, also the name of the universal set
pub const WILDCARD: &str = "*";

/// Name reported for the universal pseudo-symbol
pub const UNIVERSAL_NAME: &str = "*";

/// Container position of the universal pseudo-symbol
pub const UNIVERSAL_INDEX: usize = 0;

/// Number of value slots carried by every native record
pub const VALUE_SLOTS: usize = 5;

/// Number of special values in the sentinel table
pub const SPECIAL_VALUE_COUNT: usize = 5;

/// Maximum number of dimensions a symbol may declare
pub const MAX_DIMENSIONS: usize = 20;

/// Maximum length of a label or symbol name
pub const MAX_IDENT_LEN: usize = 63;

/// Oldest container version the session accepts
pub const MIN_VERSION: i32 = 5;

/// Newest container version the session accepts
pub const MAX_VERSION: i32 = 7;

/// Offset added to equation sub-types in the container's user info field
pub const EQUATION_TYPE_OFFSET: i32 = 53;

/// Default producer tag written into new containers
pub const DEFAULT_PRODUCER: &str = "gdxframe";

/// Sentinel codes used by the binary container
pub mod sentinel {
    /// Undefined value
    pub const UNDEFINED: f64 = 1.0e300;
    /// Not available
    pub const NOT_AVAILABLE: f64 = 2.0e300;
    /// Positive infinity
    pub const POSITIVE_INFINITY: f64 = 3.0e300;
    /// Negative infinity
    pub const NEGATIVE_INFINITY: f64 = 4.0e300;
    /// Epsilon, a numerically-zero but present value
    pub const EPSILON: f64 = 5.0e300;

    /// Codes in sentinel index order
    pub const DEFAULT_TABLE: [f64; super::SPECIAL_VALUE_COUNT] =
        [UNDEFINED, NOT_AVAILABLE, POSITIVE_INFINITY, NEGATIVE_INFINITY, EPSILON];
}
