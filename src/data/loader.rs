use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Catalog, LoadError, Schema, Title};
use super::normalize::{normalize_genres, normalize_languages};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalogue from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – ISO-8859-1 text, header row naming the schema's columns
/// * `.json` – records-oriented array (`df.to_json(orient='records')`)
///
/// The schema is validated against the source's header/keys; a missing
/// column fails the load. Missing *cells* within a row are legal and yield
/// absent fields. No partial catalogue is ever returned.
pub fn load_file(path: &Path, schema: &Schema) -> Result<Catalog, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, schema),
        "json" => load_json(path, schema),
        other => Err(LoadError::DataUnavailable(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

/// Decode ISO-8859-1 bytes. Every byte maps one-to-one onto the Unicode
/// code point of the same value, so no table is needed.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, schema: &Schema) -> Result<Catalog, LoadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| LoadError::DataUnavailable(format!("{}: {e}", path.display())))?;
    parse_csv(&decode_latin1(&bytes), schema)
}

/// Parse decoded CSV text into a catalogue. Split from [`load_csv`] so the
/// parsing path is testable without touching the filesystem.
pub fn parse_csv(text: &str, schema: &Schema) -> Result<Catalog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::DataUnavailable(format!("unreadable header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let column = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::SchemaMismatch(name.to_string()))
    };

    let title_idx = column(&schema.title_field)?;
    let genre_idxs: Vec<usize> = schema
        .genre_fields
        .iter()
        .map(|f| column(f))
        .collect::<Result<_, _>>()?;
    let language_idx = column(&schema.language_field)?;
    let runtime_idx = column(&schema.runtime_field)?;
    let score_idx = column(&schema.score_field)?;

    let mut titles = Vec::new();
    let mut malformed_numeric = 0;

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| LoadError::DataUnavailable(format!("row {row_no}: {e}")))?;

        let cell = |idx: usize| -> Option<&str> {
            record.get(idx).map(str::trim).filter(|c| !c.is_empty())
        };

        let mut row_malformed = false;
        let runtime_minutes = parse_numeric_cell(cell(runtime_idx), &mut row_malformed);
        let imdb_score = parse_numeric_cell(cell(score_idx), &mut row_malformed);
        if row_malformed {
            malformed_numeric += 1;
        }

        let raw_genre_fields: Vec<String> = genre_idxs
            .iter()
            .filter_map(|&idx| cell(idx).map(str::to_string))
            .collect();
        let raw_language_field = cell(language_idx).map(str::to_string);

        titles.push(Title {
            title: cell(title_idx).unwrap_or_default().to_string(),
            runtime_minutes,
            imdb_score,
            genres: normalize_genres(&raw_genre_fields),
            languages: normalize_languages(raw_language_field.as_deref()),
            raw_genre_fields,
            raw_language_field,
        });
    }

    Ok(Catalog {
        titles,
        malformed_numeric,
    })
}

/// Absent cells are legal; a present cell that fails to parse marks the row
/// as malformed (counted once per row, record still kept).
fn parse_numeric_cell(cell: Option<&str>, row_malformed: &mut bool) -> Option<f64> {
    let raw = cell?;
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            *row_malformed = true;
            None
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Title": "Example",
///     "Genre": "Drama/Comedy",
///     "Language": "English",
///     "Runtime": 97,
///     "IMDB Score": 7.2
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path, schema: &Schema) -> Result<Catalog, LoadError> {
    let parsed: Result<Catalog> = (|| {
        let text = std::fs::read_to_string(path).context("reading JSON file")?;
        let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
        let records = root.as_array().context("expected top-level JSON array")?;

        let mut titles = Vec::with_capacity(records.len());
        let mut malformed_numeric = 0;

        for (i, rec) in records.iter().enumerate() {
            let obj = rec
                .as_object()
                .with_context(|| format!("row {i} is not a JSON object"))?;

            let mut row_malformed = false;
            let runtime_minutes = json_numeric(obj.get(&schema.runtime_field), &mut row_malformed);
            let imdb_score = json_numeric(obj.get(&schema.score_field), &mut row_malformed);
            if row_malformed {
                malformed_numeric += 1;
            }

            let raw_genre_fields: Vec<String> = schema
                .genre_fields
                .iter()
                .filter_map(|f| json_text(obj.get(f)))
                .collect();
            let raw_language_field = json_text(obj.get(&schema.language_field));

            titles.push(Title {
                title: json_text(obj.get(&schema.title_field)).unwrap_or_default(),
                runtime_minutes,
                imdb_score,
                genres: normalize_genres(&raw_genre_fields),
                languages: normalize_languages(raw_language_field.as_deref()),
                raw_genre_fields,
                raw_language_field,
            });
        }

        Ok(Catalog {
            titles,
            malformed_numeric,
        })
    })();

    parsed.map_err(|e| LoadError::DataUnavailable(format!("{e:#}")))
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    let s = val?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn json_numeric(val: Option<&JsonValue>, row_malformed: &mut bool) -> Option<f64> {
    match val {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => {
            let mut string_malformed = false;
            let parsed = parse_numeric_cell(
                Some(s.trim()).filter(|c| !c.is_empty()),
                &mut string_malformed,
            );
            *row_malformed |= string_malformed;
            parsed
        }
        Some(_) => {
            *row_malformed = true;
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Title,Genre,Runtime,IMDB Score,Language
Enter the Anime,Documentary,58,2.5,English/Japanese
Dark Forces,Thriller,81,2.6,Spanish
The App,Science fiction/Drama,79,2.6,Italian
";

    #[test]
    fn loads_rows_in_source_order() {
        let catalog = parse_csv(SAMPLE, &Schema::default()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.titles[0].title, "Enter the Anime");
        assert_eq!(catalog.titles[0].imdb_score, Some(2.5));
        assert_eq!(catalog.titles[0].runtime_minutes, Some(58.0));
        assert!(catalog.titles[0].languages.contains("Japanese"));
        assert!(catalog.titles[2].genres.contains("drama"));
        assert_eq!(catalog.malformed_numeric, 0);
    }

    #[test]
    fn schema_mismatch_fails_the_load() {
        let schema = Schema {
            score_field: "Rating".to_string(),
            ..Schema::default()
        };
        let err = parse_csv(SAMPLE, &schema).unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch(col) if col == "Rating"));
    }

    #[test]
    fn missing_cells_yield_absent_fields_not_errors() {
        let text = "Title,Genre,Runtime,IMDB Score,Language\nUntitled,,,,\n";
        let catalog = parse_csv(text, &Schema::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        let t = &catalog.titles[0];
        assert!(t.raw_genre_fields.is_empty());
        assert!(t.genres.is_empty());
        assert!(t.languages.is_empty());
        assert_eq!(t.imdb_score, None);
        // Absent is not malformed.
        assert_eq!(catalog.malformed_numeric, 0);
    }

    #[test]
    fn unparsable_numbers_keep_the_record_but_count_it() {
        let text = "Title,Genre,Runtime,IMDB Score,Language\n\
                    A,Drama,90,7.0,English\n\
                    B,Drama,n/a,abc,English\n";
        let catalog = parse_csv(text, &Schema::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.titles[1].imdb_score, None);
        assert_eq!(catalog.titles[1].runtime_minutes, None);
        // Counted once even though both cells were bad.
        assert_eq!(catalog.malformed_numeric, 1);
    }

    #[test]
    fn multiple_genre_columns_are_gathered_in_order() {
        let schema = Schema {
            genre_fields: vec!["Genre".to_string(), "Genre 2".to_string()],
            ..Schema::default()
        };
        let text = "Title,Genre,Genre 2,Runtime,IMDB Score,Language\n\
                    A,Drama,Coming of Age,100,8.0,English\n";
        let catalog = parse_csv(text, &schema).unwrap();
        let t = &catalog.titles[0];
        assert_eq!(t.raw_genre_fields, vec!["Drama", "Coming of Age"]);
        assert!(t.genres.contains("coming of age"));
    }

    #[test]
    fn latin1_bytes_decode_losslessly() {
        // "Café" with an ISO-8859-1 é (0xE9).
        let decoded = decode_latin1(&[b'C', b'a', b'f', 0xE9]);
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn unknown_extension_is_unavailable() {
        let err = load_file(Path::new("catalogue.parquet"), &Schema::default()).unwrap_err();
        assert!(matches!(err, LoadError::DataUnavailable(_)));
    }
}
