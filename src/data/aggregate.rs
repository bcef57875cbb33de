use std::collections::{BTreeSet, HashMap};

use super::model::{Catalog, EmptyCatalog};

// ---------------------------------------------------------------------------
// Exploded views and frequency tables for the charts
// ---------------------------------------------------------------------------

/// Which multi-valued attribute an aggregation runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Genres,
    Languages,
}

fn values_of(catalog: &Catalog, index: usize, attribute: Attribute) -> &BTreeSet<String> {
    let title = &catalog.titles[index];
    match attribute {
        Attribute::Genres => &title.genres,
        Attribute::Languages => &title.languages,
    }
}

/// One output pair per (record, value-in-its-set), in view order.
///
/// A record whose set is empty for the attribute contributes zero pairs.
pub fn explode<'a>(
    catalog: &'a Catalog,
    indices: &[usize],
    attribute: Attribute,
) -> Vec<(usize, &'a str)> {
    indices
        .iter()
        .flat_map(|&i| {
            values_of(catalog, i, attribute)
                .iter()
                .map(move |value| (i, value.as_str()))
        })
        .collect()
}

/// Frequency table over the exploded pairs: value → count, ordered by
/// descending count, ties broken by first-encountered order.
pub fn frequency(catalog: &Catalog, indices: &[usize], attribute: Attribute) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for (_, value) in explode(catalog, indices, attribute) {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-encountered order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Descriptive statistics for the overview panel
// ---------------------------------------------------------------------------

/// Which numeric attribute a summary runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    ImdbScore,
    RuntimeMinutes,
}

/// Count/min/mean/max of one numeric attribute over a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Summarise a numeric attribute over the given view. Records without a
/// parsable value are skipped; `None` when the view holds no values at all
/// (a normal state, like an empty filter result).
pub fn numeric_summary(
    catalog: &Catalog,
    indices: &[usize],
    field: Numeric,
) -> Option<NumericSummary> {
    let mut count = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;

    for &i in indices {
        let title = &catalog.titles[i];
        let value = match field {
            Numeric::ImdbScore => title.imdb_score,
            Numeric::RuntimeMinutes => title.runtime_minutes,
        };
        if let Some(v) = value {
            count += 1;
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
    }

    (count > 0).then(|| NumericSummary {
        count,
        min,
        max,
        mean: sum / count as f64,
    })
}

// ---------------------------------------------------------------------------
// Score bounds and filter vocabularies
// ---------------------------------------------------------------------------

/// Min/max IMDB score over the full (unfiltered) catalogue, for the range
/// slider. Records without a parsable score are skipped.
pub fn score_bounds(catalog: &Catalog) -> Result<(f64, f64), EmptyCatalog> {
    let mut bounds: Option<(f64, f64)> = None;
    for score in catalog.titles.iter().filter_map(|t| t.imdb_score) {
        bounds = Some(match bounds {
            Some((low, high)) => (low.min(score), high.max(score)),
            None => (score, score),
        });
    }
    bounds.ok_or(EmptyCatalog)
}

/// All distinct genre values present in the catalogue.
pub fn genre_vocabulary(catalog: &Catalog) -> BTreeSet<String> {
    catalog
        .titles
        .iter()
        .flat_map(|t| t.genres.iter().cloned())
        .collect()
}

/// Sentinel cells the language selector should not offer: "All" is a
/// catch-all marker in the source data and "English" would match nearly
/// every row.
const LANGUAGE_SENTINELS: [&str; 2] = ["All", "English"];

/// Distinct language values, minus the UI sentinels. Purely a selector
/// convenience; the sentinels still count in frequency tables.
pub fn language_vocabulary(catalog: &Catalog) -> BTreeSet<String> {
    catalog
        .titles
        .iter()
        .flat_map(|t| t.languages.iter())
        .filter(|lang| !LANGUAGE_SENTINELS.contains(&lang.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
