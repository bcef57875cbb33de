use std::collections::BTreeSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Schema – which source columns feed which record fields
// ---------------------------------------------------------------------------

/// Explicit column mapping, validated against the source header at load time.
///
/// Genre columns are an ordered list because the source may spread genres
/// over several columns (`Genre`, `Genre 2`, ...).
#[derive(Debug, Clone)]
pub struct Schema {
    pub title_field: String,
    pub genre_fields: Vec<String>,
    pub language_field: String,
    pub runtime_field: String,
    pub score_field: String,
}

impl Default for Schema {
    /// Column names of the Netflix Originals export this tool was built for.
    fn default() -> Self {
        Schema {
            title_field: "Title".to_string(),
            genre_fields: vec!["Genre".to_string()],
            language_field: "Language".to_string(),
            runtime_field: "Runtime".to_string(),
            score_field: "IMDB Score".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Title – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single catalogue entry (one row of the source file).
///
/// `imdb_score` / `runtime_minutes` are `None` when the source cell did not
/// parse as a number; such records stay in the catalogue but are skipped by
/// numeric operations and counted in [`Catalog::malformed_numeric`].
#[derive(Debug, Clone)]
pub struct Title {
    pub title: String,
    pub runtime_minutes: Option<f64>,
    pub imdb_score: Option<f64>,
    /// Raw genre cells in column order, absent cells dropped.
    pub raw_genre_fields: Vec<String>,
    pub raw_language_field: Option<String>,
    /// Derived by the normalizer; always present, possibly empty.
    pub genres: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed catalogue, in source-row order. Read-only after load;
/// filtering produces index views, never mutations.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub titles: Vec<Title>,
    /// Rows whose score or runtime cell failed numeric parsing.
    pub malformed_numeric: usize,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load-time failures. No partial catalogue is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source unavailable: {0}")]
    DataUnavailable(String),
    #[error("schema mismatch: column '{0}' not found in source header")]
    SchemaMismatch(String),
}

/// Score bounds are undefined over an empty catalogue (or one with no
/// parsable scores).
#[derive(Debug, Error)]
#[error("catalogue has no records with a parsable score")]
pub struct EmptyCatalog;
