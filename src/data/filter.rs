use std::collections::BTreeSet;

use super::model::Catalog;
use super::normalize::is_denylisted;

// ---------------------------------------------------------------------------
// Filter selection: the sidebar's current choices
// ---------------------------------------------------------------------------

/// The user's current filter choices. Per-session, never persisted.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Empty set means "no genre filter".
    pub genres: BTreeSet<String>,
    /// Inclusive on both ends.
    pub score_range: (f64, f64),
    /// `None` means "no language filter".
    pub language: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            genres: BTreeSet::new(),
            score_range: (0.0, 10.0),
            language: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate evaluation
// ---------------------------------------------------------------------------

/// Return indices of titles that pass all active filters, in catalogue order.
///
/// A title is included iff:
/// * no genre is selected, or its genres intersect the selection AND it
///   carries no protected multi-word phrase outside the selection (a single
///   unselected phrase like "coming of age" disqualifies the record — the
///   dashboard's intended behaviour for these labels);
/// * its score lies within the inclusive range (records without a parsable
///   score are excluded from this numeric predicate);
/// * no language is selected, or its languages contain the selected one.
///
/// Pure view over the catalogue; an empty result is a normal state.
pub fn filtered_indices(catalog: &Catalog, selection: &Selection) -> Vec<usize> {
    let (low, high) = selection.score_range;
    catalog
        .titles
        .iter()
        .enumerate()
        .filter(|(_, title)| {
            if !selection.genres.is_empty() {
                let intersects = title.genres.iter().any(|g| selection.genres.contains(g));
                let unselected_phrase = title
                    .genres
                    .iter()
                    .any(|g| is_denylisted(g) && !selection.genres.contains(g));
                if !intersects || unselected_phrase {
                    return false;
                }
            }

            match title.imdb_score {
                Some(score) if score >= low && score <= high => {}
                _ => return false,
            }

            if let Some(language) = &selection.language {
                if !title.languages.contains(language) {
                    return false;
                }
            }

            true
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Title;
    use crate::data::normalize::{normalize_genres, normalize_languages};

    fn title(name: &str, genres: &[&str], score: f64, language: &str) -> Title {
        Title {
            title: name.to_string(),
            runtime_minutes: Some(90.0),
            imdb_score: Some(score),
            raw_genre_fields: genres.iter().map(|s| s.to_string()).collect(),
            raw_language_field: Some(language.to_string()),
            genres: normalize_genres(genres),
            languages: normalize_languages(Some(language)),
        }
    }

    fn catalog(titles: Vec<Title>) -> Catalog {
        Catalog {
            titles,
            malformed_numeric: 0,
        }
    }

    fn sample() -> Catalog {
        catalog(vec![
            title("A", &["Drama"], 7.2, "English"),
            title("B", &["Comedy"], 5.0, "Spanish"),
            title("C", &["Drama/Comedy"], 9.1, "English"),
        ])
    }

    fn genres(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_selection_keeps_everything() {
        let cat = sample();
        assert_eq!(filtered_indices(&cat, &Selection::default()), vec![0, 1, 2]);
    }

    #[test]
    fn conjunction_of_all_three_predicates() {
        let cat = sample();
        let selection = Selection {
            genres: genres(&["drama"]),
            score_range: (6.0, 10.0),
            language: Some("English".to_string()),
        };
        assert_eq!(filtered_indices(&cat, &selection), vec![0, 2]);
    }

    #[test]
    fn end_to_end_three_record_scenario() {
        // Same shape, but record A's score pushed below the range.
        let cat = catalog(vec![
            title("A", &["Drama"], 5.5, "English"),
            title("B", &["Comedy"], 5.0, "Spanish"),
            title("C", &["Drama/Comedy"], 9.1, "English"),
        ]);
        let selection = Selection {
            genres: genres(&["drama"]),
            score_range: (6.0, 10.0),
            language: Some("English".to_string()),
        };
        assert_eq!(filtered_indices(&cat, &selection), vec![2]);
    }

    #[test]
    fn score_range_is_inclusive_both_ends() {
        let cat = sample();
        let selection = Selection {
            score_range: (5.0, 9.1),
            ..Selection::default()
        };
        assert_eq!(filtered_indices(&cat, &selection), vec![0, 1, 2]);
    }

    #[test]
    fn unselected_protected_phrase_disqualifies() {
        let cat = catalog(vec![
            title("D", &["Coming of Age", "Drama"], 8.0, "English"),
            title("E", &["Drama"], 8.0, "English"),
        ]);
        // "drama" intersects both, but D carries an unselected phrase.
        let selection = Selection {
            genres: genres(&["drama"]),
            ..Selection::default()
        };
        assert_eq!(filtered_indices(&cat, &selection), vec![1]);

        // Selecting the phrase itself lifts the exclusion.
        let selection = Selection {
            genres: genres(&["drama", "coming of age"]),
            ..Selection::default()
        };
        assert_eq!(filtered_indices(&cat, &selection), vec![0, 1]);
    }

    #[test]
    fn missing_score_is_excluded_from_numeric_predicate() {
        let mut cat = sample();
        cat.titles[1].imdb_score = None;
        assert_eq!(filtered_indices(&cat, &Selection::default()), vec![0, 2]);
    }

    #[test]
    fn result_is_a_subset_and_idempotent() {
        let cat = sample();
        let selection = Selection {
            genres: genres(&["comedy"]),
            score_range: (0.0, 10.0),
            language: None,
        };
        let first = filtered_indices(&cat, &selection);
        assert!(first.len() <= cat.len());
        assert!(first.iter().all(|&i| i < cat.len()));

        // Re-filtering the filtered view changes nothing.
        let narrowed = Catalog {
            titles: first.iter().map(|&i| cat.titles[i].clone()).collect(),
            malformed_numeric: 0,
        };
        let second = filtered_indices(&narrowed, &selection);
        assert_eq!(second.len(), first.len());
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
    }
}
