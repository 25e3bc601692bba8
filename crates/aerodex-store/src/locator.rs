//! Workbook location: scan an ordered list of candidate sources and return
//! the first that yields records.
//!
//! The dataset file's exact name and location are not guaranteed by
//! deployment convention, hence the scan-with-fallback design. Every fetch is
//! cache-busted so a dataset replaced at the same path is picked up on the
//! next load.

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;

use aerodex_ingest::{parse_workbook_bytes, SheetPolicy};
use aerodex_model::Record;

use crate::StoreError;

/// Environment variable overriding the primary dataset source.
pub const DATA_FILE_ENV: &str = "AERODEX_DATA_FILE";

/// One candidate dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// Parse a source string: anything with an http(s) scheme is a URL,
    /// everything else a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_owned())
        } else {
            Source::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The default candidate list: the `AERODEX_DATA_FILE` override (when set),
/// then the conventional dataset names, then the bundled asset.
pub fn default_sources() -> Vec<Source> {
    let mut out = Vec::new();
    if let Ok(overridden) = std::env::var(DATA_FILE_ENV) {
        let overridden = overridden.trim();
        if !overridden.is_empty() {
            out.push(Source::parse(overridden));
        }
    }
    out.push(Source::Path(PathBuf::from("companies2.xlsx")));
    out.push(Source::Path(PathBuf::from("companies.xlsx")));
    out.push(Source::Path(PathBuf::from("assets/companies2.xlsx")));
    out
}

/// A dataset successfully loaded from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub source: Source,
    pub sheet_name: String,
    pub records: Vec<Record>,
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

async fn fetch_bytes(client: &reqwest::Client, source: &Source) -> Result<Vec<u8>, FetchError> {
    match source {
        Source::Url(url) => {
            let sep = if url.contains('?') { '&' } else { '?' };
            let busted = format!("{url}{sep}v={}", Utc::now().timestamp_millis());
            let response = client
                .get(&busted)
                .header(reqwest::header::CACHE_CONTROL, "no-store")
                .send()
                .await?
                .error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
        Source::Path(path) => Ok(tokio::fs::read(path).await?),
    }
}

/// Try each candidate in order; a candidate wins only when its bytes decode
/// into a workbook whose extraction yields at least one record. Exhausting
/// the list fails with [`StoreError::SourceUnavailable`] naming every source
/// attempted.
pub async fn locate(
    client: &reqwest::Client,
    sources: &[Source],
    policy: SheetPolicy,
) -> Result<LoadedTable, StoreError> {
    let mut attempted = Vec::new();
    for source in sources {
        attempted.push(source.to_string());
        let bytes = match fetch_bytes(client, source).await {
            Ok(bytes) => bytes,
            Err(reason) => {
                log::warn!("source {source} unavailable: {reason}");
                continue;
            }
        };
        match parse_workbook_bytes(&bytes, policy) {
            Ok(table) => {
                return Ok(LoadedTable {
                    source: source.clone(),
                    sheet_name: table.sheet_name,
                    records: table.records,
                });
            }
            Err(err) => log::warn!("source {source} did not parse: {err}"),
        }
    }
    Err(StoreError::SourceUnavailable { attempted })
}
