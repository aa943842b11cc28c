use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SkiExplorerApp {
    pub state: AppState,
}

impl SkiExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SkiExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::bottom("disclaimer").show(ctx, |ui| {
            panels::disclaimer(ui);
        });

        match self.state.tab {
            Tab::ResortFinder => {
                // ---- Left side panel: price and amenity filters ----
                egui::SidePanel::left("finder_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::finder_panel(ui, &mut self.state);
                    });

                // ---- Central panel: map ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::resort_map(ui, &self.state);
                });
            }
            Tab::Rankings => {
                egui::SidePanel::left("rankings_panel")
                    .default_width(240.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::rankings_panel(ui, &mut self.state);
                    });

                egui::SidePanel::right("report_card")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::report_card(ui, &self.state);
                    });

                // ---- Central panel: bar chart + table ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::ranking_chart(ui, &mut self.state);
                });
            }
        }
    }
}
