use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Field normalization: raw delimited text → set-valued attributes
// ---------------------------------------------------------------------------

/// Multi-word genre labels that must survive delimiter splitting as atomic
/// tokens. The list is a pre-split guard: a raw cell whose whole value
/// matches one of these phrases is emitted as-is instead of being fragmented
/// into `{"coming", "of", "age"}` and the like.
///
/// The upstream dashboard treated this list as an exclusion filter applied
/// after splitting, which silently turned these phrases into orphan
/// fragments. The guard semantics is the only one consistent with the
/// list's contents, so that is what this crate implements.
pub const GENRE_DENYLIST: [&str; 3] = ["variety show", "one man show", "coming of age"];

/// Delimiters used by the source to pack several values into one cell.
const DELIMITERS: [char; 3] = ['/', ' ', '-'];

/// Whether a lowercased genre token is one of the protected phrases.
pub fn is_denylisted(genre: &str) -> bool {
    GENRE_DENYLIST.contains(&genre)
}

/// Derive the set of genres from the raw genre cells of one record.
///
/// Each cell is either a protected multi-word phrase (kept whole) or a
/// delimiter-packed list, split on `/`, space, `-`. Tokens are trimmed and
/// lowercased; duplicates collapse in the set. No cells, or cells that are
/// all delimiter noise, give an empty set — never an error.
pub fn normalize_genres<S: AsRef<str>>(raw_genre_fields: &[S]) -> BTreeSet<String> {
    let mut genres = BTreeSet::new();
    for field in raw_genre_fields {
        let whole = field.as_ref().trim().to_lowercase();
        if is_denylisted(&whole) {
            genres.insert(whole);
            continue;
        }
        for token in field.as_ref().split(DELIMITERS) {
            let token = token.trim().to_lowercase();
            if !token.is_empty() {
                genres.insert(token);
            }
        }
    }
    genres
}

/// Derive the set of languages from the raw language cell.
///
/// Same delimiters as genres, but case is preserved: language names are
/// compared case-sensitively downstream.
pub fn normalize_languages(raw_language_field: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw_language_field else {
        return BTreeSet::new();
    };
    raw.split(DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn genres_split_on_all_delimiters() {
        let genres = normalize_genres(&["Drama/Comedy", "Sci Fi", "Action-Thriller"]);
        assert_eq!(
            genres,
            set(&["drama", "comedy", "sci", "fi", "action", "thriller"])
        );
    }

    #[test]
    fn genres_are_lowercased_and_trimmed() {
        assert_eq!(normalize_genres(&[" Drama / COMEDY "]), set(&["drama", "comedy"]));
    }

    #[test]
    fn denylisted_phrases_survive_splitting_whole() {
        assert_eq!(normalize_genres(&["Coming of Age"]), set(&["coming of age"]));
        assert_eq!(normalize_genres(&["variety show"]), set(&["variety show"]));
        assert_eq!(normalize_genres(&["One Man Show"]), set(&["one man show"]));
    }

    #[test]
    fn denylisted_phrase_mixes_with_split_cells() {
        let genres = normalize_genres(&["Coming of Age", "Drama/Comedy"]);
        assert_eq!(genres, set(&["coming of age", "drama", "comedy"]));
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let none: [&str; 0] = [];
        assert!(normalize_genres(&none).is_empty());
        assert!(normalize_genres(&["  ", "/-"]).is_empty());
    }

    #[test]
    fn duplicate_tokens_collapse() {
        assert_eq!(normalize_genres(&["Drama/Drama", "drama"]), set(&["drama"]));
    }

    #[test]
    fn languages_absent_gives_empty_set() {
        assert!(normalize_languages(None).is_empty());
    }

    #[test]
    fn languages_split_and_keep_case() {
        assert_eq!(
            normalize_languages(Some("English/Spanish")),
            set(&["English", "Spanish"])
        );
        assert_eq!(
            normalize_languages(Some(" English / Hindi ")),
            set(&["English", "Hindi"])
        );
    }
}
