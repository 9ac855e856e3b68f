//! Symbol kind, sub-type and value column definitions
//!
//! Codes match the ones stored in container symbol headers. Variable
//! sub-types travel in the header's user info field as-is; equation
//! sub-types are offset by [`EQUATION_TYPE_OFFSET`].

use super::constants::{EQUATION_TYPE_OFFSET, VALUE_SLOTS};

const INF: f64 = f64::INFINITY;
const NEG_INF: f64 = f64::NEG_INFINITY;

/// Kind of data a symbol holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SymbolKind {
    /// Membership only, one presence column
    Set = 0,
    /// One numeric value per record
    Parameter = 1,
    /// Five numeric values per record
    Variable = 2,
    /// Five numeric values per record
    Equation = 3,
    /// Another name for an existing set
    Alias = 4,
}

impl SymbolKind {
    /// Convert from the container code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SymbolKind::Set),
            1 => Some(SymbolKind::Parameter),
            2 => Some(SymbolKind::Variable),
            3 => Some(SymbolKind::Equation),
            4 => Some(SymbolKind::Alias),
            _ => None,
        }
    }

    /// Convert to the container code
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Value columns that follow the dimension columns in a record table
    pub const fn value_columns(self) -> &'static [ValueColumn] {
        match self {
            SymbolKind::Variable | SymbolKind::Equation => &FULL_VALUE_COLUMNS,
            SymbolKind::Set | SymbolKind::Parameter | SymbolKind::Alias => &SINGLE_VALUE_COLUMN,
        }
    }

    /// Whether value cells hold a presence marker instead of numbers
    pub const fn is_set(self) -> bool {
        matches!(self, SymbolKind::Set)
    }
}

impl core::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SymbolKind::Set => write!(f, "Set"),
            SymbolKind::Parameter => write!(f, "Parameter"),
            SymbolKind::Variable => write!(f, "Variable"),
            SymbolKind::Equation => write!(f, "Equation"),
            SymbolKind::Alias => write!(f, "Alias"),
        }
    }
}

/// Slot of the fixed-width native value vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ValueSlot {
    Level = 0,
    Marginal = 1,
    Lower = 2,
    Upper = 3,
    Scale = 4,
}

impl ValueSlot {
    /// All slots in vector order
    pub const ALL: [ValueSlot; VALUE_SLOTS] = [
        ValueSlot::Level,
        ValueSlot::Marginal,
        ValueSlot::Lower,
        ValueSlot::Upper,
        ValueSlot::Scale,
    ];

    /// Convert from a vector position
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ValueSlot::Level),
            1 => Some(ValueSlot::Marginal),
            2 => Some(ValueSlot::Lower),
            3 => Some(ValueSlot::Upper),
            4 => Some(ValueSlot::Scale),
            _ => None,
        }
    }

    /// Position in the native value vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column header used for this slot in record tables
    pub const fn name(self) -> &'static str {
        match self {
            ValueSlot::Level => "Level",
            ValueSlot::Marginal => "Marginal",
            ValueSlot::Lower => "Lower",
            ValueSlot::Upper => "Upper",
            ValueSlot::Scale => "Scale",
        }
    }
}

impl core::fmt::Display for ValueSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named value column and the native slot it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueColumn {
    pub name: &'static str,
    pub slot: ValueSlot,
}

const SINGLE_VALUE_COLUMN: [ValueColumn; 1] = [ValueColumn {
    name: "Value",
    slot: ValueSlot::Level,
}];

const FULL_VALUE_COLUMNS: [ValueColumn; VALUE_SLOTS] = [
    ValueColumn { name: "Level", slot: ValueSlot::Level },
    ValueColumn { name: "Marginal", slot: ValueSlot::Marginal },
    ValueColumn { name: "Lower", slot: ValueSlot::Lower },
    ValueColumn { name: "Upper", slot: ValueSlot::Upper },
    ValueColumn { name: "Scale", slot: ValueSlot::Scale },
];

/// Variable sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VariableType {
    Unknown = 0,
    Binary = 1,
    Integer = 2,
    Positive = 3,
    Negative = 4,
    #[default]
    Free = 5,
    Sos1 = 6,
    Sos2 = 7,
    SemiContinuous = 8,
    SemiInteger = 9,
}

impl VariableType {
    /// Convert from the container user info code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(VariableType::Unknown),
            1 => Some(VariableType::Binary),
            2 => Some(VariableType::Integer),
            3 => Some(VariableType::Positive),
            4 => Some(VariableType::Negative),
            5 => Some(VariableType::Free),
            6 => Some(VariableType::Sos1),
            7 => Some(VariableType::Sos2),
            8 => Some(VariableType::SemiContinuous),
            9 => Some(VariableType::SemiInteger),
            _ => None,
        }
    }

    /// Convert to the container user info code
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Default Level, Marginal, Lower, Upper and Scale for new records
    pub const fn defaults(self) -> [f64; VALUE_SLOTS] {
        match self {
            VariableType::Unknown => [0.0, 0.0, 0.0, 0.0, 1.0],
            VariableType::Binary => [0.0, 0.0, 0.0, 1.0, 1.0],
            VariableType::Integer => [0.0, 0.0, 0.0, 100.0, 1.0],
            VariableType::Positive => [0.0, 0.0, 0.0, INF, 1.0],
            VariableType::Negative => [0.0, 0.0, NEG_INF, 0.0, 1.0],
            VariableType::Free => [0.0, 0.0, NEG_INF, INF, 1.0],
            VariableType::Sos1 | VariableType::Sos2 => [0.0, 0.0, 0.0, INF, 1.0],
            VariableType::SemiContinuous => [0.0, 0.0, 1.0, INF, 1.0],
            VariableType::SemiInteger => [0.0, 0.0, 1.0, 100.0, 1.0],
        }
    }
}

impl core::fmt::Display for VariableType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            VariableType::Unknown => "Unknown",
            VariableType::Binary => "Binary",
            VariableType::Integer => "Integer",
            VariableType::Positive => "Positive",
            VariableType::Negative => "Negative",
            VariableType::Free => "Free",
            VariableType::Sos1 => "SOS1",
            VariableType::Sos2 => "SOS2",
            VariableType::SemiContinuous => "Semicontinuous",
            VariableType::SemiInteger => "Semiinteger",
        };
        write!(f, "{name}")
    }
}

/// Equation sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EquationType {
    #[default]
    Equality = 0,
    GreaterThan = 1,
    LessThan = 2,
    NothingEnforced = 3,
    External = 4,
    Conic = 5,
}

impl EquationType {
    /// Convert from the container user info code (offset by 53)
    pub const fn from_code(code: i32) -> Option<Self> {
        match code.wrapping_sub(EQUATION_TYPE_OFFSET) {
            0 => Some(EquationType::Equality),
            1 => Some(EquationType::GreaterThan),
            2 => Some(EquationType::LessThan),
            3 => Some(EquationType::NothingEnforced),
            4 => Some(EquationType::External),
            5 => Some(EquationType::Conic),
            _ => None,
        }
    }

    /// Convert to the container user info code
    pub const fn code(self) -> i32 {
        EQUATION_TYPE_OFFSET + self as i32
    }

    /// Default Level, Marginal, Lower, Upper and Scale for new records
    pub const fn defaults(self) -> [f64; VALUE_SLOTS] {
        match self {
            EquationType::Equality | EquationType::External => [0.0, 0.0, 0.0, 0.0, 1.0],
            EquationType::GreaterThan | EquationType::Conic => [0.0, 0.0, 0.0, INF, 1.0],
            EquationType::LessThan => [0.0, 0.0, NEG_INF, 0.0, 1.0],
            EquationType::NothingEnforced => [0.0, 0.0, NEG_INF, INF, 1.0],
        }
    }
}

impl core::fmt::Display for EquationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EquationType::Equality => "Equality",
            EquationType::GreaterThan => "GreaterThan",
            EquationType::LessThan => "LessThan",
            EquationType::NothingEnforced => "NothingEnforced",
            EquationType::External => "External",
            EquationType::Conic => "Conic",
        };
        write!(f, "{name}")
    }
}

/// Sub-type carried by variables and equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubType {
    Variable(VariableType),
    Equation(EquationType),
}

impl SubType {
    /// Default sub-type for a kind, `None` for kinds without one
    pub const fn default_for(kind: SymbolKind) -> Option<Self> {
        match kind {
            SymbolKind::Variable => Some(SubType::Variable(VariableType::Free)),
            SymbolKind::Equation => Some(SubType::Equation(EquationType::Equality)),
            _ => None,
        }
    }

    /// Decode a header's user info field for the given kind
    pub const fn from_code(kind: SymbolKind, code: i32) -> crate::Result<Option<Self>> {
        match kind {
            SymbolKind::Variable => match VariableType::from_code(code) {
                Some(t) => Ok(Some(SubType::Variable(t))),
                None => Err(crate::FormatError::UnknownVariableType),
            },
            SymbolKind::Equation => match EquationType::from_code(code) {
                Some(t) => Ok(Some(SubType::Equation(t))),
                None => Err(crate::FormatError::UnknownEquationType),
            },
            _ => Ok(None),
        }
    }

    /// User info code written into the header
    pub const fn code(self) -> i32 {
        match self {
            SubType::Variable(t) => t.code(),
            SubType::Equation(t) => t.code(),
        }
    }

    /// Default value vector implied by the sub-type
    pub const fn defaults(self) -> [f64; VALUE_SLOTS] {
        match self {
            SubType::Variable(t) => t.defaults(),
            SubType::Equation(t) => t.defaults(),
        }
    }
}

impl core::fmt::Display for SubType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SubType::Variable(t) => write!(f, "{t}"),
            SubType::Equation(t) => write!(f, "{t}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(SymbolKind::from_code(2), Some(SymbolKind::Variable));
        assert_eq!(SymbolKind::Alias.code(), 4);
        assert_eq!(SymbolKind::from_code(5), None);
        assert_eq!(SymbolKind::from_code(-1), None);
    }

    #[test]
    fn test_value_columns_by_kind() {
        let names: [&str; 5] = ["Level", "Marginal", "Lower", "Upper", "Scale"];
        for kind in [SymbolKind::Variable, SymbolKind::Equation] {
            let cols = kind.value_columns();
            assert_eq!(cols.len(), 5);
            for (col, name) in cols.iter().zip(names) {
                assert_eq!(col.name, name);
                assert_eq!(col.slot.name(), name);
            }
        }
        for kind in [SymbolKind::Set, SymbolKind::Parameter, SymbolKind::Alias] {
            let cols = kind.value_columns();
            assert_eq!(cols.len(), 1);
            assert_eq!(cols[0].name, "Value");
            assert_eq!(cols[0].slot, ValueSlot::Level);
        }
    }

    #[test]
    fn test_equation_code_offset() {
        assert_eq!(EquationType::Equality.code(), 53);
        assert_eq!(EquationType::Conic.code(), 58);
        assert_eq!(EquationType::from_code(55), Some(EquationType::LessThan));
        assert_eq!(EquationType::from_code(2), None);
    }

    #[test]
    fn test_sub_type_decoding() {
        assert_eq!(
            SubType::from_code(SymbolKind::Variable, 3),
            Ok(Some(SubType::Variable(VariableType::Positive)))
        );
        assert_eq!(
            SubType::from_code(SymbolKind::Equation, 54),
            Ok(Some(SubType::Equation(EquationType::GreaterThan)))
        );
        assert_eq!(SubType::from_code(SymbolKind::Parameter, 7), Ok(None));
        assert_eq!(
            SubType::from_code(SymbolKind::Variable, 12),
            Err(crate::FormatError::UnknownVariableType)
        );
    }

    #[test]
    fn test_sub_type_defaults() {
        let free = VariableType::Free.defaults();
        assert_eq!(free[ValueSlot::Lower.index()], f64::NEG_INFINITY);
        assert_eq!(free[ValueSlot::Upper.index()], f64::INFINITY);
        assert_eq!(VariableType::Binary.defaults()[3], 1.0);
        assert_eq!(VariableType::SemiContinuous.defaults()[2], 1.0);
        assert_eq!(EquationType::LessThan.defaults()[2], f64::NEG_INFINITY);
        assert!(SubType::default_for(SymbolKind::Set).is_none());
    }
}
