use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::{
    explode, frequency, numeric_summary, Attribute, Numeric, NumericSummary,
};
use crate::data::model::Catalog;
use crate::state::{AppState, Chart};

// ---------------------------------------------------------------------------
// Central panel – chart selector + active chart
// ---------------------------------------------------------------------------

/// Render the chart selector and the active chart for the visible titles.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    if state.catalog.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalogue to explore it  (File → Open…)");
        });
        return;
    }

    let mut chart = state.chart;
    ui.horizontal(|ui: &mut Ui| {
        for candidate in Chart::ALL {
            ui.selectable_value(&mut chart, candidate, candidate.label());
        }
    });
    state.chart = chart;
    ui.separator();

    let Some(catalog) = &state.catalog else {
        return;
    };
    let visible = &state.visible_indices;
    match chart {
        Chart::Overview => overview(ui, catalog, visible),
        Chart::ScoreHistogram => score_histogram(ui, catalog, visible, state.score_bounds),
        Chart::GenreDistribution => frequency_bars(
            ui,
            catalog,
            visible,
            Attribute::Genres,
            "genre_distribution",
            "Genre",
        ),
        Chart::RuntimeByGenre => runtime_scatter(ui, catalog, visible, Attribute::Genres),
        Chart::RuntimeByLanguage => runtime_scatter(ui, catalog, visible, Attribute::Languages),
        Chart::LanguageFrequency => frequency_bars(
            ui,
            catalog,
            visible,
            Attribute::Languages,
            "language_distribution",
            "Language",
        ),
    }
}

// ---------------------------------------------------------------------------
// Data overview: summary statistics + preview of the visible titles
// ---------------------------------------------------------------------------

const PREVIEW_ROWS: usize = 10;

fn overview(ui: &mut Ui, catalog: &Catalog, visible: &[usize]) {
    ui.label(format!(
        "{} of {} titles match the current filters",
        visible.len(),
        catalog.len()
    ));
    ui.separator();

    ui.strong("Basic Statistics");
    egui::Grid::new("summary_stats").striped(true).show(ui, |ui: &mut Ui| {
        ui.label("");
        ui.strong("Count");
        ui.strong("Min");
        ui.strong("Mean");
        ui.strong("Max");
        ui.end_row();
        summary_row(
            ui,
            "IMDB Score",
            numeric_summary(catalog, visible, Numeric::ImdbScore),
        );
        summary_row(
            ui,
            "Runtime (minutes)",
            numeric_summary(catalog, visible, Numeric::RuntimeMinutes),
        );
    });
    ui.separator();

    ui.strong(format!(
        "First {} titles",
        visible.len().min(PREVIEW_ROWS)
    ));
    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        egui::Grid::new("title_preview").striped(true).show(ui, |ui: &mut Ui| {
            ui.strong("Title");
            ui.strong("Genres");
            ui.strong("Languages");
            ui.strong("Runtime");
            ui.strong("Score");
            ui.end_row();

            for &idx in visible.iter().take(PREVIEW_ROWS) {
                let title = &catalog.titles[idx];
                ui.label(&title.title);
                ui.label(join(&title.genres));
                ui.label(join(&title.languages));
                ui.label(numeric_cell(title.runtime_minutes));
                ui.label(numeric_cell(title.imdb_score));
                ui.end_row();
            }
        });
    });
}

fn summary_row(ui: &mut Ui, label: &str, summary: Option<NumericSummary>) {
    ui.label(label);
    match summary {
        Some(s) => {
            ui.label(s.count.to_string());
            ui.label(format!("{:.1}", s.min));
            ui.label(format!("{:.2}", s.mean));
            ui.label(format!("{:.1}", s.max));
        }
        None => {
            ui.label("0");
            ui.label("–");
            ui.label("–");
            ui.label("–");
        }
    }
    ui.end_row();
}

fn join(values: &std::collections::BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn numeric_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "–".to_string())
}

// ---------------------------------------------------------------------------
// Histogram of IMDB scores
// ---------------------------------------------------------------------------

const HISTOGRAM_BINS: usize = 20;

fn score_histogram(ui: &mut Ui, catalog: &Catalog, visible: &[usize], bounds: Option<(f64, f64)>) {
    let Some((min, max)) = bounds else {
        ui.label("No scored records to plot.");
        return;
    };

    // Bin over the full catalogue bounds so the x-axis is stable while
    // filters change.
    let span = (max - min).max(f64::EPSILON);
    let bin_width = span / HISTOGRAM_BINS as f64;
    let mut counts = [0usize; HISTOGRAM_BINS];
    for &idx in visible {
        if let Some(score) = catalog.titles[idx].imdb_score {
            let bin = (((score - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
            counts[bin] += 1;
        }
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let center = min + (i as f64 + 0.5) * bin_width;
            Bar::new(center, count as f64).width(bin_width * 0.95)
        })
        .collect();

    Plot::new("score_histogram")
        .x_axis_label("IMDB Score")
        .y_axis_label("Titles")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Frequency bar charts (genres, languages)
// ---------------------------------------------------------------------------

fn frequency_bars(
    ui: &mut Ui,
    catalog: &Catalog,
    visible: &[usize],
    attribute: Attribute,
    plot_id: &str,
    axis_label: &str,
) {
    let freq = frequency(catalog, visible, attribute);
    if freq.is_empty() {
        ui.label("Nothing to plot for the current filters.");
        return;
    }

    let labels: Vec<String> = freq.iter().map(|(value, _)| value.clone()).collect();

    let bars: Vec<Bar> = freq
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.8)
                .name(value.clone())
        })
        .collect();

    Plot::new(plot_id)
        .x_axis_label(axis_label)
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if i < 0.0 || (mark.value - i).abs() > 1e-6 {
                return String::new();
            }
            labels
                .get(i as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_GREEN));
        });
}

// ---------------------------------------------------------------------------
// Runtime vs score scatter, coloured by an exploded attribute
// ---------------------------------------------------------------------------

fn runtime_scatter(ui: &mut Ui, catalog: &Catalog, visible: &[usize], attribute: Attribute) {
    // One scatter series per distinct attribute value; an exploded record
    // appears once per value in its set.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for (idx, value) in explode(catalog, visible, attribute) {
        let title = &catalog.titles[idx];
        if let (Some(runtime), Some(score)) = (title.runtime_minutes, title.imdb_score) {
            series.entry(value).or_default().push([runtime, score]);
        }
    }

    let values: BTreeSet<String> = series.keys().map(|v| v.to_string()).collect();
    let color_map = ColorMap::new(&values);

    Plot::new(match attribute {
        Attribute::Genres => "runtime_by_genre",
        Attribute::Languages => "runtime_by_language",
    })
    .legend(Legend::default())
    .x_axis_label("Runtime (minutes)")
    .y_axis_label("IMDB Score")
    .allow_boxed_zoom(true)
    .allow_drag(true)
    .allow_scroll(true)
    .allow_zoom(true)
    .show(ui, |plot_ui| {
        // One Points element per record so the marker radius can track the
        // score; the legend merges entries sharing a name, so each attribute
        // value still gets a single legend row.
        for (value, coords) in &series {
            let color = color_map.color_for(value);
            for &[runtime, score] in coords {
                let point: PlotPoints = vec![[runtime, score]].into();
                plot_ui.points(
                    Points::new(point)
                        .name(*value)
                        .color(color)
                        .radius(point_radius(score)),
                );
            }
        }
    });
}

/// Marker radius scaled by IMDB score, echoing the upstream dashboard's
/// score-sized scatter points.
fn point_radius(score: f64) -> f32 {
    1.5 + score.clamp(0.0, 10.0) as f32 * 0.45
}

#[cfg(test)]
mod tests {
    use super::point_radius;

    #[test]
    fn point_radius_grows_with_score() {
        assert!(point_radius(9.0) > point_radius(2.0));
        assert!(point_radius(2.0) > point_radius(0.0));
    }

    #[test]
    fn point_radius_is_bounded_for_out_of_range_scores() {
        assert_eq!(point_radius(-5.0), point_radius(0.0));
        assert_eq!(point_radius(25.0), point_radius(10.0));
    }
}
