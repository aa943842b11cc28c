use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{PRICE_CEILING_MAX, PRICE_STEP};
use crate::data::model::Amenity;
use crate::state::{AppState, Tab};

const DISCLAIMER: &str = "Disclaimer: This application should not be used to plan an actual ski \
vacation. The underlying data may contain many inaccuracies.";

// ---------------------------------------------------------------------------
// Resort finder – price and amenity filters
// ---------------------------------------------------------------------------

/// Render the left panel of the finder tab.
pub fn finder_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Instructions");
    ui.label("Use this application to find the perfect ski resort for you!");
    ui.label(
        "Select from the options below, then use the map on the right to find ski resorts \
         that fit your selections. The map is global, so zoom out and explore!",
    );
    ui.separator();

    ui.strong("Select Your Lift Ticket Price Limit in $USD");
    let mut price = state.map_filter.price_ceiling;
    let slider = egui::Slider::new(&mut price, 0.0..=PRICE_CEILING_MAX)
        .step_by(PRICE_STEP)
        .prefix("$");
    if ui.add(slider).changed() {
        state.set_price_ceiling(price);
    }
    ui.separator();

    ui.strong("Select Your Resort Options");
    for amenity in Amenity::ALL {
        let mut checked = state.map_filter.amenities.contains(&amenity);
        if ui.checkbox(&mut checked, amenity.label()).changed() {
            state.toggle_amenity(amenity);
        }
    }
    ui.separator();

    if state.table.is_some() {
        ui.label(format!("{} resorts match", state.visible_indices.len()));
    }
}

// ---------------------------------------------------------------------------
// Resort rankings – continent / country / metric selectors
// ---------------------------------------------------------------------------

/// Render the left panel of the rankings tab.
pub fn rankings_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Instructions");
    ui.label(
        "Select a Continent, Country, and Metric for which to rank ski resorts. Then hover \
         over the bar graph to see the rankings of resorts.",
    );
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Select a Continent");
    let current = state.continent.clone().unwrap_or_default();
    let mut chosen_continent = None;
    egui::ComboBox::from_id_salt("continent_select")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for continent in table.continents() {
                if ui.selectable_label(current == continent, &continent).clicked() {
                    chosen_continent = Some(continent);
                }
            }
        });
    if let Some(continent) = chosen_continent {
        state.set_continent(continent);
    }
    ui.add_space(8.0);

    ui.strong("Select a Country");
    let current = state.country.clone();
    let mut chosen_country = None;
    egui::ComboBox::from_id_salt("country_select")
        .selected_text(current.as_deref().unwrap_or("Select..."))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "Select...").clicked() {
                chosen_country = Some(None);
            }
            for country in &state.country_options {
                if ui
                    .selectable_label(current.as_ref() == Some(country), country)
                    .clicked()
                {
                    chosen_country = Some(Some(country.clone()));
                }
            }
        });
    if let Some(country) = chosen_country {
        state.set_country(country);
    }
    ui.add_space(8.0);

    ui.strong("Select a Metric");
    let current = state.metric;
    let mut chosen_metric = None;
    egui::ComboBox::from_id_salt("metric_select")
        .selected_text(current.map_or("Select...", |m| m.column()))
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "Select...").clicked() {
                chosen_metric = Some(None);
            }
            for &metric in table.metrics() {
                if ui
                    .selectable_label(current == Some(metric), metric.column())
                    .clicked()
                {
                    chosen_metric = Some(Some(metric));
                }
            }
        });
    if let Some(metric) = chosen_metric {
        state.set_metric(metric);
    }
}

/// Render the report card and ranking guide of the rankings tab.
pub fn report_card(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Resort Report Card");
            ui.label("Mouse over the bar graph to see resort rankings.");
            ui.separator();

            match &state.report_card {
                Some(card) => {
                    ui.strong(card.heading());
                    for line in &card.lines {
                        ui.label(line);
                    }
                }
                None => {
                    ui.weak("No resort selected.");
                }
            }
            ui.separator();

            ui.heading("Ranking Guide");
            ui.label("Ranks are computed among resorts of the same country.");
            ui.label("Elevation: Rank 1 has the highest elevation.");
            ui.label("Lift Ticket Price: Rank 1 has the highest price.");
            ui.label("Slope Count: Rank 1 has the largest number of slopes.");
            ui.label("Cannon Count: Rank 1 has the largest number of snow cannons.");
            ui.label("Tied resorts share the average of their positions.");
        });
}

// ---------------------------------------------------------------------------
// Top bar / bottom bar
// ---------------------------------------------------------------------------

/// Render the top menu, tab switcher and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::ResortFinder, "Resort Finder");
        ui.selectable_value(&mut state.tab, Tab::Rankings, "Resort Rankings");

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} resorts in {} countries",
                table.len(),
                table.country_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

pub fn disclaimer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(DISCLAIMER).color(Color32::RED));
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open resort data")
        .add_filter(
            "Supported files",
            &["csv", "json", "parquet", "pq", "xlsx", "xlsm", "xls"],
        )
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
