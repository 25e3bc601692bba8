//! Row extraction: turning one decoded sheet into canonical rows.
//!
//! Two mutually exclusive strategies run in fixed priority order. The object
//! strategy treats the first row of the used range as column keys and is
//! trivially correct for clean tables. The array strategy searches for the
//! header row explicitly and handles sheets with title/preamble rows or
//! merged-cell headers. The first strategy producing at least one non-blank
//! row wins; its output is final for that sheet.

use calamine::{Data, Range};

use crate::canon::{
    canonicalize_row, normalize_label, resolve_label, CanonicalField, CanonicalRow, CellScalar,
    RawRow,
};

/// How many leading rows the array strategy scans for a header row.
pub const HEADER_SCAN_LIMIT: usize = 30;

/// Convert one decoded cell to a scalar. Empty and error cells yield `None`.
fn convert_value(value: &Data) -> Option<CellScalar> {
    match value {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(CellScalar::Text(s.clone())),
        Data::Float(f) => Some(CellScalar::Number(*f)),
        Data::Int(i) => Some(CellScalar::Number(*i as f64)),
        Data::Bool(b) => Some(CellScalar::Text(if *b { "TRUE" } else { "FALSE" }.to_owned())),
        Data::DateTime(dt) => Some(CellScalar::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellScalar::Text(s.clone())),
    }
}

/// One way of extracting canonical rows from a sheet.
pub trait ExtractStrategy {
    fn name(&self) -> &'static str;

    /// Extract every usable row, or an empty vec when the strategy does not
    /// apply to this sheet. Blank rows never appear in the output.
    fn try_extract(&self, range: &Range<Data>) -> Vec<CanonicalRow>;
}

/// Fast path: the first row of the used range already serves as column keys.
pub struct ObjectRows;

impl ExtractStrategy for ObjectRows {
    fn name(&self) -> &'static str {
        "object-rows"
    }

    fn try_extract(&self, range: &Range<Data>) -> Vec<CanonicalRow> {
        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Vec::new();
        };
        let labels: Vec<Option<String>> = header
            .iter()
            .map(|cell| convert_value(cell).and_then(|v| v.text()))
            .collect();

        let mut out = Vec::new();
        for row in rows {
            let raw: RawRow = row
                .iter()
                .enumerate()
                .filter_map(|(col, cell)| {
                    let label = labels.get(col)?.as_ref()?;
                    Some((label.clone(), convert_value(cell)?))
                })
                .collect();
            if raw.is_empty() {
                continue;
            }
            let canon = canonicalize_row(&raw);
            if !canon.is_blank() {
                out.push(canon);
            }
        }
        out
    }
}

/// Fallback path: positional rows with explicit header-row detection.
pub struct ArrayRows;

impl ArrayRows {
    /// Find the first row within the scan window whose resolved column map
    /// covers the mandatory fields. Returns the row index and the map from
    /// field to column position (leftmost column wins per field).
    fn find_header(rows: &[&[Data]]) -> Option<(usize, Vec<(CanonicalField, usize)>)> {
        for (idx, row) in rows.iter().take(HEADER_SCAN_LIMIT).enumerate() {
            let mut col_map: Vec<(CanonicalField, usize)> = Vec::new();
            for (col, cell) in row.iter().enumerate() {
                let Some(label) = convert_value(cell).and_then(|v| v.text()) else {
                    continue;
                };
                let Some(field) = resolve_label(&normalize_label(&label)) else {
                    continue;
                };
                if !col_map.iter().any(|(f, _)| *f == field) {
                    col_map.push((field, col));
                }
            }
            if CanonicalField::MANDATORY
                .iter()
                .all(|field| col_map.iter().any(|(f, _)| f == field))
            {
                return Some((idx, col_map));
            }
        }
        None
    }
}

impl ExtractStrategy for ArrayRows {
    fn name(&self) -> &'static str {
        "array-rows"
    }

    fn try_extract(&self, range: &Range<Data>) -> Vec<CanonicalRow> {
        let rows: Vec<&[Data]> = range.rows().collect();
        let Some((header_idx, col_map)) = Self::find_header(&rows) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for row in &rows[header_idx + 1..] {
            let mut canon = CanonicalRow::new();
            for &(field, col) in &col_map {
                if let Some(value) = row.get(col).and_then(convert_value) {
                    canon.set(field, value);
                }
            }
            if !canon.is_blank() {
                out.push(canon);
            }
        }
        out
    }
}

/// Run the strategies in priority order and return the first non-empty
/// output. An empty vec means the sheet has no usable table.
pub fn extract_rows(range: &Range<Data>) -> Vec<CanonicalRow> {
    const STRATEGIES: [&dyn ExtractStrategy; 2] = [&ObjectRows, &ArrayRows];
    for strategy in STRATEGIES {
        let rows = strategy.try_extract(range);
        if !rows.is_empty() {
            log::debug!("extracted {} rows via {}", rows.len(), strategy.name());
            return rows;
        }
    }
    Vec::new()
}
