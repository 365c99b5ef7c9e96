//! Cell-level normalization for upload values.
//!
//! These operate on string representations. The intake pipeline's
//! conventions are textual: date separators become `-` with no format
//! validation, and lab values get a literal trailing `"0"` (the
//! upstream export's fixed-width decimal padding), never numeric
//! rounding.

/// Replace `/` date separators with `-`.
///
/// The rest of the value passes through verbatim; no validation that
/// the result is a well-formed date. Idempotent.
pub fn normalize_date(value: &str) -> String {
    value.replace('/', "-")
}

/// Normalize a lab value: strip `%` characters and surrounding
/// whitespace, then append a literal `"0"`.
///
/// `"7.1 %"` becomes `"7.10"` and `"6%"` becomes `"60"`. Returns
/// `None` when the stripped value is not numeric (empty, or anything
/// `f64` parsing rejects).
pub fn normalize_lab_value(value: &str) -> Option<String> {
    let stripped = value.replace('%', "");
    let stripped = stripped.trim();
    if stripped.parse::<f64>().is_err() {
        return None;
    }
    Some(format!("{stripped}0"))
}
