use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – interactive filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Interactive Filters");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No catalogue loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let genre_choices: Vec<String> = state.genre_choices.iter().cloned().collect();
    let language_choices: Vec<String> = state.language_choices.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre multiselect ----
            let n_selected = state.selection.genres.len();
            let header_text = format!("Genres  ({n_selected}/{})", genre_choices.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_genres();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_genres();
                        }
                    });
                    ui.small("No selection means no genre filter.");

                    for genre in &genre_choices {
                        let mut checked = state.selection.genres.contains(genre);
                        if ui.checkbox(&mut checked, genre).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
            ui.separator();

            // ---- IMDB score range ----
            ui.strong("IMDB Score Range");
            if let Some((min, max)) = state.score_bounds {
                let (mut low, mut high) = state.selection.score_range;
                let low_changed = ui
                    .add(egui::Slider::new(&mut low, min..=max).text("from"))
                    .changed();
                let high_changed = ui
                    .add(egui::Slider::new(&mut high, min..=max).text("to"))
                    .changed();
                if low_changed || high_changed {
                    state.set_score_range(low, high);
                }
            } else {
                ui.label("No scored records in this catalogue.");
            }
            ui.separator();

            // ---- Language selector ----
            ui.strong("Language");
            let current = state
                .selection
                .language
                .clone()
                .unwrap_or_else(|| "(any)".to_string());
            egui::ComboBox::from_id_salt("language_filter")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.selection.language.is_none(), "(any)")
                        .clicked()
                    {
                        state.set_language(None);
                    }
                    for language in &language_choices {
                        let is_selected = state.selection.language.as_deref() == Some(language);
                        if ui.selectable_label(is_selected, language).clicked() {
                            state.set_language(Some(language.clone()));
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} titles loaded, {} visible",
                catalog.len(),
                state.visible_indices.len()
            ));
            if catalog.malformed_numeric > 0 {
                ui.label(
                    RichText::new(format!(
                        "{} rows with unparsable numbers",
                        catalog.malformed_numeric
                    ))
                    .color(Color32::YELLOW),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalogue")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        let schema = crate::data::model::Schema::default();
        match crate::data::loader::load_file(&path, &schema) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} titles ({} rows with unparsable numbers)",
                    catalog.len(),
                    catalog.malformed_numeric
                );
                state.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
