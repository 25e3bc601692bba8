//! Facet-option extraction and loose filter-token matching.
//!
//! These back the consumer-side filter controls: option lists are derived
//! from the loaded record set, and free-text tokens (e.g. from a shared URL)
//! are mapped onto those known options. Token matching is deliberately looser
//! than header canonicalization — substring containment either way counts —
//! because a missed filter token costs the user a click, not data.

use std::collections::BTreeSet;

use crate::Record;

fn norm_token(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct, trimmed, lexicographically sorted values from an iterator of
/// raw option strings. Empty values are dropped.
pub fn distinct_options<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let set: BTreeSet<String> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    set.into_iter().collect()
}

/// Distinct stakeholder types present in the record set.
pub fn stakeholder_type_options(records: &[Record]) -> Vec<String> {
    distinct_options(
        records
            .iter()
            .filter_map(|r| r.stakeholder_type.as_deref()),
    )
}

/// Distinct domains present in the record set.
pub fn domain_options(records: &[Record]) -> Vec<String> {
    distinct_options(records.iter().filter_map(|r| r.domain.as_deref()))
}

/// Distinct values of one category list field, selected by `field`
/// (e.g. `|r| r.cat_support.as_slice()`).
pub fn category_options<F>(records: &[Record], field: F) -> Vec<String>
where
    F: Fn(&Record) -> &[String],
{
    distinct_options(
        records
            .iter()
            .flat_map(|r| field(r).iter().map(String::as_str)),
    )
}

/// Map comma-separated free-text tokens onto known option values.
///
/// Each token is matched against the options after case/whitespace
/// normalization: an exact match wins; otherwise any option containing the
/// token (or contained by it) matches. Results keep option values verbatim,
/// deduplicated in first-match order. Unrecognized tokens are ignored.
pub fn map_tokens_to_options(raw: &str, options: &[String]) -> Vec<String> {
    let tokens: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(norm_token)
        .collect();
    if tokens.is_empty() || options.is_empty() {
        return Vec::new();
    }

    let lookup: Vec<(String, &String)> =
        options.iter().map(|o| (norm_token(o), o)).collect();

    let mut out: Vec<String> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for token in &tokens {
        if let Some((_, original)) = lookup.iter().find(|(norm, _)| norm == token) {
            if seen.insert(original.as_str()) {
                out.push((*original).clone());
            }
            continue;
        }
        for (norm, original) in &lookup {
            if norm.contains(token.as_str()) || token.contains(norm.as_str()) {
                if seen.insert(original.as_str()) {
                    out.push((*original).clone());
                }
            }
        }
    }
    out
}
