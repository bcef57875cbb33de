use std::collections::BTreeSet;

use crate::data::aggregate::{genre_vocabulary, language_vocabulary, score_bounds};
use crate::data::filter::{filtered_indices, Selection};
use crate::data::model::Catalog;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which chart the central panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chart {
    Overview,
    ScoreHistogram,
    GenreDistribution,
    RuntimeByGenre,
    RuntimeByLanguage,
    LanguageFrequency,
}

impl Chart {
    pub const ALL: [Chart; 6] = [
        Chart::Overview,
        Chart::ScoreHistogram,
        Chart::GenreDistribution,
        Chart::RuntimeByGenre,
        Chart::RuntimeByLanguage,
        Chart::LanguageFrequency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Chart::Overview => "Overview",
            Chart::ScoreHistogram => "IMDB Scores",
            Chart::GenreDistribution => "Genres",
            Chart::RuntimeByGenre => "Runtime vs Score (genre)",
            Chart::RuntimeByLanguage => "Runtime vs Score (language)",
            Chart::LanguageFrequency => "Languages",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded catalogue (None until user loads a file).
    pub catalog: Option<Catalog>,

    /// Current sidebar filter choices.
    pub selection: Selection,

    /// Indices of titles passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Score min/max over the full catalogue, fixed at load time so the
    /// slider range does not shrink as filters narrow the view.
    pub score_bounds: Option<(f64, f64)>,

    /// Filter vocabularies, computed once per load.
    pub genre_choices: BTreeSet<String>,
    pub language_choices: BTreeSet<String>,

    /// Active chart in the central panel.
    pub chart: Chart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            score_bounds: None,
            genre_choices: BTreeSet::new(),
            language_choices: BTreeSet::new(),
            chart: Chart::Overview,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded catalogue, reset filters and vocabularies.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.score_bounds = score_bounds(&catalog).ok();
        self.genre_choices = genre_vocabulary(&catalog);
        self.language_choices = language_vocabulary(&catalog);

        self.selection = Selection::default();
        if let Some(bounds) = self.score_bounds {
            self.selection.score_range = bounds;
        }
        self.visible_indices = (0..catalog.len()).collect();

        self.catalog = Some(catalog);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.visible_indices = filtered_indices(catalog, &self.selection);
        }
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selection.genres.remove(genre) {
            self.selection.genres.insert(genre.to_string());
        }
        self.refilter();
    }

    /// Select every genre the catalogue offers.
    pub fn select_all_genres(&mut self) {
        self.selection.genres = self.genre_choices.clone();
        self.refilter();
    }

    /// Clear the genre selection (no genre filter).
    pub fn select_no_genres(&mut self) {
        self.selection.genres.clear();
        self.refilter();
    }

    /// Set or clear the language filter.
    pub fn set_language(&mut self, language: Option<String>) {
        self.selection.language = language;
        self.refilter();
    }

    /// Set the score range, clamped to the catalogue bounds and kept
    /// low <= high.
    pub fn set_score_range(&mut self, mut low: f64, mut high: f64) {
        if let Some((min, max)) = self.score_bounds {
            low = low.clamp(min, max);
            high = high.clamp(min, max);
        }
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }
        self.selection.score_range = (low, high);
        self.refilter();
    }
}
