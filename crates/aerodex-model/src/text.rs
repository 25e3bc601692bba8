//! Text utilities shared by the ingestion pipeline: identifier slugging,
//! locale-tolerant numeric coercion, and multi-value cell splitting.

use std::sync::OnceLock;

use regex::Regex;

/// Derive a stable identifier from a display name.
///
/// Case-folds, collapses every run of non-alphanumeric characters to a single
/// `-`, and strips leading/trailing separators. Unicode letters and digits
/// survive, so `"Universität München"` keeps its umlauts.
///
/// Returns an empty string when nothing alphanumeric remains; callers supply
/// their own positional fallback in that case.
pub fn to_id(input: &str) -> String {
    let mut out = String::new();
    let mut pending_sep = false;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Parse a cell's string content as a finite number.
///
/// Accepts a decimal comma as the decimal separator (`"48,265"` → `48.265`).
/// Empty, non-numeric, and non-finite inputs all yield `None`; one bad cell
/// never fails a row.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let n: f64 = s.replace(',', ".").parse().ok()?;
    n.is_finite().then_some(n)
}

fn multi_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // newline, comma, semicolon, slash, or " | "
    RE.get_or_init(|| Regex::new(r"[\n,;/]| \| ").expect("valid regex"))
}

/// Split a multi-value cell into trimmed, non-empty pieces.
///
/// Delimiters: newline, comma, semicolon, forward slash, or the literal
/// sequence `" | "`. This is the single tokenizer used for category columns,
/// the stakeholder column, and tag aggregation; do not re-split elsewhere.
pub fn split_multi(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Vec::new();
    }
    multi_value_re()
        .split(s)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// [`split_multi`], additionally deduplicated preserving first-occurrence
/// order. Used for the stakeholder list, whose order drives display.
pub fn split_multi_unique(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    split_multi(raw)
        .into_iter()
        .filter(|piece| seen.insert(piece.clone()))
        .collect()
}
