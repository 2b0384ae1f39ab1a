//! Best-effort citation statistics.
//!
//! The caption in the corner of the scene shows citation numbers read
//! from a local JSON document. Loading is strictly best-effort: any
//! failure (missing file, malformed JSON) falls back to the baked-in
//! values and is logged, never surfaced as an error.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

/// Fallback values used whenever the stats document cannot be read.
const FALLBACK_CITATIONS: u64 = 5890;
const FALLBACK_H_INDEX: u64 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CitationStats {
    pub citations: u64,
    #[serde(rename = "hIndex")]
    pub h_index: u64,
}

impl Default for CitationStats {
    fn default() -> Self {
        Self {
            citations: FALLBACK_CITATIONS,
            h_index: FALLBACK_H_INDEX,
        }
    }
}

impl CitationStats {
    /// Loads statistics from `path`, falling back to the defaults on any
    /// failure.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                info!(
                    "no citation stats at {} ({err}); using fallback",
                    path.display()
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(
                    "malformed citation stats in {} ({err}); using fallback",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let stats = CitationStats::load(Path::new("definitely/not/a/real/path.json"));
        assert_eq!(stats, CitationStats::default());
        assert_eq!(stats.citations, 5890);
        assert_eq!(stats.h_index, 31);
    }

    #[test]
    fn well_formed_document_parses() {
        let stats: CitationStats =
            serde_json::from_str(r#"{"citations": 6100, "hIndex": 33, "lastUpdated": "2025-01-01"}"#)
                .expect("document should parse");
        assert_eq!(stats.citations, 6100);
        assert_eq!(stats.h_index, 33);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(serde_json::from_str::<CitationStats>(r#"{"citations": "many"}"#).is_err());
    }
}
