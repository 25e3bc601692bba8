//! `aerodex-model` defines the canonical record shape for the aerospace
//! organization directory.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the ingestion pipeline (`aerodex-ingest`)
//! - the record store and its JSON snapshot side-channel (`aerodex-store`)
//! - presentation layers, which consume [`Record`] slices read-only

mod facets;
mod record;
mod text;

pub use facets::{
    category_options, distinct_options, domain_options, map_tokens_to_options,
    stakeholder_type_options,
};
pub use record::Record;
pub use text::{parse_number, split_multi, split_multi_unique, to_id};
