use std::collections::HashMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, MarkerShape, Plot, PlotPoint, Points};

use crate::color::ColorScale;
use crate::data::filter::RankingView;
use crate::data::model::{Amenity, Resort, ResortTable};
use crate::state::AppState;

fn yes_no(resort: &Resort, amenity: Amenity) -> &'static str {
    if resort.has(amenity) { "Yes" } else { "No" }
}

fn hover_text(resort: &Resort) -> String {
    format!(
        "{}, {}\nPrice: ${}\nTotal slopes: {}\nSnowparks: {}\nNightskiing: {}\nSummer skiing: {}",
        resort.name,
        resort.country,
        resort.price,
        resort.total_slopes,
        yes_no(resort, Amenity::Snowparks),
        yes_no(resort, Amenity::Nightskiing),
        yes_no(resort, Amenity::SummerSkiing),
    )
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v}"))
}

// ---------------------------------------------------------------------------
// Resort map (finder tab, central panel)
// ---------------------------------------------------------------------------

/// Scatter of the visible resorts by longitude / latitude, coloured by
/// total slopes.
pub fn resort_map(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a resort dataset to begin  (File → Open…)");
        });
        return;
    };

    ui.heading(state.map_filter.title());

    if let Some(scale) = &state.color_scale {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Total slopes:");
            for (label, color) in scale.legend_entries(5) {
                ui.label(RichText::new("●").color(color));
                ui.label(label);
            }
        });
    }

    let mut labels: HashMap<String, String> = HashMap::new();
    for resort in state.visible_indices.iter().filter_map(|&i| table.get(i)) {
        labels
            .entry(resort.name.clone())
            .or_insert_with(|| hover_text(resort));
    }

    Plot::new("resort_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name: &str, value: &PlotPoint| match labels.get(name) {
            Some(text) => text.clone(),
            None => format!("{:.2}, {:.2}", value.y, value.x),
        })
        .show(ui, |plot_ui| {
            for resort in state.visible_indices.iter().filter_map(|&i| table.get(i)) {
                let color = state
                    .color_scale
                    .map(|s| s.color_for(resort.total_slopes))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let point = Points::new(vec![[resort.longitude, resort.latitude]])
                    .name(&resort.name)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0);

                plot_ui.points(point);
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking chart (rankings tab, central panel)
// ---------------------------------------------------------------------------

/// Bar chart of the current ranking plus a table of the same rows. Hovering
/// a bar or clicking a name fills the report card.
pub fn ranking_chart(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a resort dataset to begin  (File → Open…)");
        });
        return;
    };
    let Some(view) = state.ranking.clone() else {
        ui.label("Select a country and a metric.");
        return;
    };

    ui.heading(view.title());

    let values: Vec<(String, f64)> = view
        .resorts(&table)
        .map(|r| (r.name.clone(), view.metric.value(r).unwrap_or(0.0)))
        .collect();
    let scale = ColorScale::from_values(values.iter().map(|(_, v)| *v));

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let color = scale
                .map(|s| s.color_for(*value))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *value).name(name).fill(color).width(0.7)
        })
        .collect();

    let hovered = Plot::new("ranking_chart")
        .height(ui.available_height() * 0.6)
        .x_axis_label("Resort (see table below)")
        .y_axis_label(view.metric.column())
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(view.metric.column()));

            let pointer = plot_ui.pointer_coordinate()?;
            let slot = pointer.x.round();
            if slot < 0.0 || (pointer.x - slot).abs() > 0.35 {
                return None;
            }
            values.get(slot as usize).map(|(name, _)| name.clone())
        })
        .inner;

    ui.separator();
    let clicked = ranking_table(ui, &table, &view);

    if let Some(name) = hovered.or(clicked) {
        state.inspect_resort(&name);
    }
}

fn ranking_table(ui: &mut Ui, table: &ResortTable, view: &RankingView) -> Option<String> {
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(30.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto().at_least(80.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Resort");
            });
            header.col(|ui| {
                ui.strong(view.metric.column());
            });
        })
        .body(|mut body| {
            for (pos, resort) in view.resorts(table).enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", pos + 1));
                    });
                    row.col(|ui| {
                        if ui.link(&resort.name).clicked() {
                            clicked = Some(resort.name.clone());
                        }
                    });
                    row.col(|ui| {
                        ui.label(format_value(view.metric.value(resort)));
                    });
                });
            }
        });

    clicked
}
