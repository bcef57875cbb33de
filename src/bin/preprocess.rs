//! One-shot cleaning tool: reads a raw ISO-8859-1 catalogue CSV, fills
//! empty cells with a `0` placeholder, and writes a cleaned UTF-8 CSV for
//! the dashboard to load.
//!
//! Usage: `preprocess <input.csv> [output.csv]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const PLACEHOLDER: &str = "0";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: preprocess <input.csv> [output.csv]");
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("preprocessed_data.csv"));

    // ISO-8859-1 maps each byte to the Unicode code point of the same value.
    let bytes = std::fs::read(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let text: String = bytes.iter().map(|&b| b as char).collect();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let width = headers.len();

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(&headers).context("writing headers")?;

    let mut rows = 0usize;
    let mut filled = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        // Pad short rows to the header width, fill empty cells.
        let cleaned: Vec<&str> = (0..width)
            .map(|i| match record.get(i).map(str::trim) {
                Some(cell) if !cell.is_empty() => cell,
                _ => {
                    filled += 1;
                    PLACEHOLDER
                }
            })
            .collect();

        writer.write_record(&cleaned).with_context(|| format!("writing row {row_no}"))?;
        rows += 1;
    }

    writer.flush().context("flushing output")?;
    log::info!(
        "Wrote {rows} rows to {} ({filled} empty cells filled with '{PLACEHOLDER}')",
        output.display()
    );
    println!(
        "Preprocessed data saved to {} ({rows} rows, {filled} cells filled)",
        output.display()
    );

    Ok(())
}
