//! Workbook decoding and sheet selection.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use thiserror::Error;

use aerodex_model::Record;

use crate::extract::extract_rows;
use crate::normalize::normalize_row;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("no sheet with recognizable headers")]
    NoUsableSheet,
}

/// Which sheet-selection strategy a caller wants.
///
/// The two call sites have different risk tolerances: the record store's
/// loader prioritizes speed, the standalone fallback loader prioritizes
/// correctness across malformed workbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPolicy {
    /// Pick the first sheet whose declared used range spans more than a
    /// single row or column, falling back to the first sheet, and extract
    /// from that one sheet only.
    #[default]
    FirstNonTrivial,
    /// Attempt full extraction on every sheet in order and take the first
    /// that yields at least one record.
    Exhaustive,
}

/// A successfully parsed workbook: the winning sheet and its records.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub sheet_name: String,
    pub records: Vec<Record>,
}

fn spans_more_than_one_cell(range: &Range<Data>) -> bool {
    // Checked against the absolute end of the declared range, so a lone
    // value parked away from A1 still counts as non-trivial.
    range.end().is_some_and(|(row, col)| row > 0 || col > 0)
}

fn records_from_range(range: &Range<Data>) -> Vec<Record> {
    extract_rows(range)
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index))
        .collect()
}

/// Decode a workbook from an in-memory buffer and extract its records.
///
/// Accepts any format calamine can sniff (xlsx/xlsm/xls/ods). Fails with
/// [`IngestError::NoUsableSheet`] when no sheet yields a single record under
/// the given policy; individual bad cells or rows never fail the load.
pub fn parse_workbook_bytes(bytes: &[u8], policy: SheetPolicy) -> Result<ParsedTable, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(IngestError::NoSheets);
    }

    match policy {
        SheetPolicy::FirstNonTrivial => {
            let mut first: Option<(String, Range<Data>)> = None;
            let mut chosen: Option<(String, Range<Data>)> = None;
            for name in &sheet_names {
                let Ok(range) = workbook.worksheet_range(name) else {
                    continue;
                };
                if first.is_none() {
                    first = Some((name.clone(), range.clone()));
                }
                if spans_more_than_one_cell(&range) {
                    chosen = Some((name.clone(), range));
                    break;
                }
            }
            let (sheet_name, range) = chosen.or(first).ok_or(IngestError::NoUsableSheet)?;
            let records = records_from_range(&range);
            if records.is_empty() {
                return Err(IngestError::NoUsableSheet);
            }
            log::debug!("sheet `{sheet_name}` yielded {} records", records.len());
            Ok(ParsedTable {
                sheet_name,
                records,
            })
        }
        SheetPolicy::Exhaustive => {
            for name in &sheet_names {
                let Ok(range) = workbook.worksheet_range(name) else {
                    continue;
                };
                let records = records_from_range(&range);
                if !records.is_empty() {
                    log::debug!("sheet `{name}` yielded {} records", records.len());
                    return Ok(ParsedTable {
                        sheet_name: name.clone(),
                        records,
                    });
                }
            }
            Err(IngestError::NoUsableSheet)
        }
    }
}
