/// Form decoding
///
/// Splits the submitted form fields into the two movie lists. Field keys follow
/// `<label>_<columnTag>`, where the last character of the column tag names the
/// target list: `1` for the first list, any other digit for the second. Forms may
/// carry unrelated fields such as CSRF tokens, so keys that do not follow the
/// convention are skipped rather than rejected.
use crate::models::{Column, MovieLists};

/// Separator between the label and the column tag of a field key
pub const KEY_DELIMITER: char = '_';

/// Why a field key could not be mapped to a list
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldKeyError {
    #[error("field key {0:?} is not of the form <label>_<column>")]
    Malformed(String),

    #[error("field key {0:?} does not end in a column digit")]
    InvalidColumnDigit(String),
}

/// Works out which list a field key targets
pub fn parse_field_key(key: &str) -> Result<Column, FieldKeyError> {
    let mut parts = key.split(KEY_DELIMITER);
    let column_tag = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(tag), None) => tag,
        _ => return Err(FieldKeyError::Malformed(key.to_string())),
    };

    match column_tag.chars().last() {
        Some('1') => Ok(Column::First),
        Some(c) if c.is_ascii_digit() => Ok(Column::Second),
        _ => Err(FieldKeyError::InvalidColumnDigit(key.to_string())),
    }
}

/// Decodes form fields into two lists, preserving submission order within each list.
///
/// Repeated keys and repeated titles are kept as submitted. Blank values, which
/// the form sends for inputs left empty, are skipped.
pub fn decode<I, K, V>(fields: I) -> MovieLists
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut lists = MovieLists::new();

    for (key, value) in fields {
        let key = key.as_ref();
        match parse_field_key(key) {
            Ok(column) => {
                let title: String = value.into();
                if title.trim().is_empty() {
                    tracing::debug!(key = %key, "Skipping blank form field");
                    continue;
                }
                lists.push(column, title);
            }
            Err(e @ FieldKeyError::Malformed(_)) => {
                tracing::debug!(error = %e, "Skipping form field");
            }
            Err(e @ FieldKeyError::InvalidColumnDigit(_)) => {
                tracing::warn!(error = %e, "Skipping form field");
            }
        }
    }

    lists
}
