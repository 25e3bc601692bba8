//! Spreadsheet ingestion for the aerodex directory.
//!
//! Takes a loosely structured workbook (unknown column order, aliased header
//! names, multi-valued cells, preamble rows before the header) and produces a
//! clean record set:
//!
//! ```text
//! bytes → workbook → sheet selection → row extraction → canonicalization
//!       → normalization → Vec<Record>
//! ```
//!
//! The importer is deliberately forgiving: unparsable cells degrade to unset
//! fields instead of failing a row, and a whole load only fails when no sheet
//! yields a single usable record.

pub mod canon;
pub mod extract;
mod normalize;
mod workbook;

pub use canon::{
    canonicalize_row, normalize_label, resolve_label, CanonicalField, CanonicalRow, CellScalar,
    RawRow,
};
pub use extract::{extract_rows, ArrayRows, ExtractStrategy, ObjectRows, HEADER_SCAN_LIMIT};
pub use normalize::normalize_row;
pub use workbook::{parse_workbook_bytes, IngestError, ParsedTable, SheetPolicy};
