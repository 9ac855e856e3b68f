//! Label, symbol name and domain checks

use alloc::string::String;

use crate::format::constants::{MAX_DIMENSIONS, MAX_IDENT_LEN, WILDCARD};
use crate::FormatError;

/// Validate a dimension label before it is written
///
/// Labels must be non-empty, at most 63 characters and free of control
/// characters.
pub fn validate_label(label: &str) -> Result<(), FormatError> {
    if label.is_empty() {
        return Err(FormatError::InvalidLabel);
    }

    if label.chars().count() > MAX_IDENT_LEN {
        return Err(FormatError::InvalidLabel);
    }

    // NUL and other control bytes break the codec's C strings
    if label.chars().any(char::is_control) {
        return Err(FormatError::InvalidLabel);
    }

    Ok(())
}

/// Validate a symbol name
///
/// Names start with an ASCII letter, continue with letters, digits or
/// underscores and are at most 63 characters long.
pub fn validate_symbol_name(name: &str) -> Result<(), FormatError> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return Err(FormatError::InvalidName),
    }

    if name.len() > MAX_IDENT_LEN {
        return Err(FormatError::InvalidName);
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(FormatError::InvalidName);
    }

    Ok(())
}

/// Validate one domain entry: the wildcard or a symbol name
pub fn validate_domain_name(domain: &str) -> Result<(), FormatError> {
    if domain == WILDCARD {
        return Ok(());
    }
    validate_symbol_name(domain)
}

/// Validate a full domain list
pub fn validate_dims(dims: &[String]) -> Result<(), FormatError> {
    if dims.len() > MAX_DIMENSIONS {
        return Err(FormatError::TooManyDimensions);
    }
    dims.iter().try_for_each(|d| validate_domain_name(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_validate_label() {
        // Valid labels
        assert_eq!(validate_label("CC"), Ok(()));
        assert_eq!(validate_label("row_123"), Ok(()));
        assert_eq!(validate_label("new-york"), Ok(()));
        assert_eq!(validate_label("label with spaces"), Ok(()));
        assert_eq!(validate_label("2030"), Ok(()));

        // Invalid labels
        assert_eq!(validate_label(""), Err(FormatError::InvalidLabel));
        assert_eq!(validate_label("a\0b"), Err(FormatError::InvalidLabel));
        assert_eq!(validate_label("a\tb"), Err(FormatError::InvalidLabel));
        assert_eq!(
            validate_label(&"a".repeat(64)),
            Err(FormatError::InvalidLabel)
        );
        assert_eq!(validate_label(&"a".repeat(63)), Ok(()));
    }

    #[test]
    fn test_validate_symbol_name() {
        assert_eq!(validate_symbol_name("startupfuel"), Ok(()));
        assert_eq!(validate_symbol_name("sym_1"), Ok(()));
        assert_eq!(validate_symbol_name("X2"), Ok(()));

        assert_eq!(validate_symbol_name(""), Err(FormatError::InvalidName));
        assert_eq!(validate_symbol_name("_x"), Err(FormatError::InvalidName));
        assert_eq!(validate_symbol_name("1x"), Err(FormatError::InvalidName));
        assert_eq!(validate_symbol_name("a-b"), Err(FormatError::InvalidName));
        assert_eq!(
            validate_symbol_name(&"s".repeat(64)),
            Err(FormatError::InvalidName)
        );
    }

    #[test]
    fn test_validate_dims() {
        let dims = vec!["*".to_string(), "u".to_string()];
        assert_eq!(validate_dims(&dims), Ok(()));

        let bad = vec!["*".to_string(), "".to_string()];
        assert_eq!(validate_dims(&bad), Err(FormatError::InvalidName));

        let many: Vec<String> = (0..21).map(|_| "*".to_string()).collect();
        assert_eq!(validate_dims(&many), Err(FormatError::TooManyDimensions));
    }
}
