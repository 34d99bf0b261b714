//! Cell value scalar used by search and sort

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// A scalar value produced by a column accessor.
///
/// This is what a cell contributes to free-text search and column sorting.
/// An absent value is represented as `Option<CellValue>::None` by the caller,
/// never as a variant — missing-value semantics (never matches, sorts last)
/// live in the view, not here.
///
/// # Example
///
/// ```
/// use tablekit::CellValue;
///
/// let name = CellValue::from("M8 hex bolt");
/// let qty = CellValue::from(250i64);
/// assert_eq!(name.search_text(), "m8 hex bolt");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns the lowercase string form used for substring matching.
    pub fn search_text(&self) -> String {
        match self {
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::Decimal(d) => d.to_string(),
            CellValue::Text(s) => s.to_lowercase(),
            CellValue::DateTime(dt) => dt.to_rfc3339().to_lowercase(),
        }
    }

    /// Compares two cell values with a total ordering.
    ///
    /// Strings compare case-insensitively. The numeric kinds (`Int`, `Float`,
    /// `Decimal`) compare numerically across variants. Values of otherwise
    /// unrelated kinds fall back to comparing their textual forms so a sort
    /// over mixed data stays total and deterministic.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Decimal(a), Decimal(b)) => a.cmp(b),
            (Int(a), Decimal(b)) => rust_decimal::Decimal::from(*a).cmp(b),
            (Decimal(a), Int(b)) => a.cmp(&rust_decimal::Decimal::from(*b)),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Decimal(b)) => a.total_cmp(&b.to_f64().unwrap_or(f64::NAN)),
            (Decimal(a), Float(b)) => a.to_f64().unwrap_or(f64::NAN).total_cmp(b),
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (a, b) => a.search_text().cmp(&b.search_text()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_lowercases() {
        assert_eq!(CellValue::from("Hex Bolt M8").search_text(), "hex bolt m8");
        assert_eq!(CellValue::from(42i64).search_text(), "42");
        assert_eq!(CellValue::from(true).search_text(), "true");
    }

    #[test]
    fn test_string_compare_case_insensitive() {
        let a = CellValue::from("anvil");
        let b = CellValue::from("Bolt");
        assert_eq!(a.compare(&b), Ordering::Less);

        let x = CellValue::from("WASHER");
        let y = CellValue::from("washer");
        assert_eq!(x.compare(&y), Ordering::Equal);
    }

    #[test]
    fn test_cross_kind_numeric_compare() {
        let int = CellValue::from(3i64);
        let float = CellValue::from(2.5f64);
        let dec = CellValue::from(Decimal::new(275, 2)); // 2.75

        assert_eq!(int.compare(&float), Ordering::Greater);
        assert_eq!(float.compare(&dec), Ordering::Less);
        assert_eq!(dec.compare(&int), Ordering::Less);
    }

    #[test]
    fn test_datetime_compare() {
        let earlier = CellValue::from(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc));
        let later = CellValue::from(DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z").unwrap().with_timezone(&Utc));
        assert_eq!(earlier.compare(&later), Ordering::Less);
    }
}
