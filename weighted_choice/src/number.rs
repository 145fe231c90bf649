//! Locale-aware conversion of cell text into numbers.
//!
//! Spreadsheets export numbers with the separators of their locale: a
//! Spanish sheet writes `1.234,5` where an American one writes `1,234.5`.
//! The rules are passed explicitly to every call, nothing here depends on
//! the process locale.

use log::{debug, warn};

/// The separators used to write a decimal number.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
}

impl NumberFormat {
    pub const POINT_DECIMAL: NumberFormat = NumberFormat {
        decimal_separator: '.',
        thousands_separator: Some(','),
    };

    pub const COMMA_DECIMAL: NumberFormat = NumberFormat {
        decimal_separator: ',',
        thousands_separator: Some('.'),
    };

    /// Comma for decimals and a (non-breaking) space to group thousands.
    pub const COMMA_DECIMAL_SPACE_GROUPS: NumberFormat = NumberFormat {
        decimal_separator: ',',
        thousands_separator: Some('\u{a0}'),
    };

    /// Resolves a locale tag such as `es_ES`, `en-GB` or `fr_FR.UTF-8`.
    ///
    /// Unknown languages fall back to the point-decimal format.
    pub fn from_locale(tag: &str) -> NumberFormat {
        let language: String = tag
            .split(|c| c == '_' || c == '-' || c == '.' || c == '@')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        let format = match language.as_str() {
            "es" | "de" | "it" | "pt" | "nl" | "da" | "id" | "tr" | "ca" | "eu" | "gl" => {
                NumberFormat::COMMA_DECIMAL
            }
            "fr" | "ru" | "pl" | "sv" | "fi" | "nb" | "no" | "cs" | "sk" | "uk" => {
                NumberFormat::COMMA_DECIMAL_SPACE_GROUPS
            }
            "en" | "c" | "posix" | "ja" | "zh" | "ko" | "he" | "th" => NumberFormat::POINT_DECIMAL,
            _ => {
                warn!(
                    "from_locale: unknown locale {:?}, using '.' as the decimal separator",
                    tag
                );
                NumberFormat::POINT_DECIMAL
            }
        };
        debug!("from_locale: {:?} -> {:?}", tag, format);
        format
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::POINT_DECIMAL
    }
}

/// Parses a number written with the given separators.
///
/// Every thousands separator is dropped wherever it appears, then the
/// decimal separator becomes a point. When the thousands separator is a
/// space, regular spaces are accepted as well. Empty text and non-finite
/// results are rejected.
pub fn parse_number(text: &str, format: &NumberFormat) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let space_groups = matches!(format.thousands_separator, Some(c) if c.is_whitespace());
    let cleaned: String = trimmed
        .chars()
        .filter(|c| Some(*c) != format.thousands_separator && !(space_groups && c.is_whitespace()))
        .map(|c| {
            if c == format.decimal_separator {
                '.'
            } else {
                c
            }
        })
        .collect();
    match cleaned.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(x),
        _ => None,
    }
}

/// Reads the number at `column` of `row`.
///
/// A missing cell or a cell that is not a number counts as `0.0`. A single
/// bad cell must not prevent the rest of the sheet from being used.
pub fn parse_cell_or_default(row: &[String], column: usize, format: &NumberFormat) -> f64 {
    match row.get(column) {
        Some(text) => parse_number(text, format).unwrap_or_else(|| {
            if !text.trim().is_empty() {
                debug!(
                    "parse_cell_or_default: column {}: could not read {:?}, using 0",
                    column, text
                );
            }
            0.0
        }),
        None => 0.0,
    }
}
