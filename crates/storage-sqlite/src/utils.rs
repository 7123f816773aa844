//! Conversion helpers between SQLite text columns and domain types.
//!
//! Monetary amounts are stored as decimal text so that no precision is lost
//! on the way through SQLite's floating point affinity.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Parses a stored decimal column, naming the column in the error.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::InvalidData(format!("{} '{}' is not a decimal: {}", field_name, value, e))
    })
}

pub fn parse_optional_decimal(
    value: Option<&str>,
    field_name: &str,
) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| parse_decimal(v, field_name)).transpose()
}

/// Formats a decimal for storage, without trailing zeros.
pub fn format_decimal(value: &Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_reads_stored_text() {
        assert_eq!(parse_decimal("18000", "value").unwrap(), dec!(18000));
        assert_eq!(parse_decimal("0.35", "value").unwrap(), dec!(0.35));
    }

    #[test]
    fn test_parse_decimal_names_the_column() {
        let err = parse_decimal("abc", "current_value").unwrap_err();
        assert!(err.to_string().contains("current_value"));
    }

    #[test]
    fn test_parse_optional_decimal() {
        assert_eq!(parse_optional_decimal(None, "purchase_price").unwrap(), None);
        assert_eq!(
            parse_optional_decimal(Some("12.50"), "purchase_price").unwrap(),
            Some(dec!(12.50))
        );
    }

    #[test]
    fn test_format_decimal_strips_trailing_zeros() {
        assert_eq!(format_decimal(&dec!(20000.00)), "20000");
        assert_eq!(format_decimal(&dec!(12.50)), "12.5");
    }
}
