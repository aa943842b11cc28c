use std::path::Path;
use std::sync::Arc;

use crate::color::ColorScale;
use crate::data::filter::{
    MapFilter, RankingUpdate, RankingView, countries_in, filter_for_map, filter_for_ranking,
    ranks_for,
};
use crate::data::loader;
use crate::data::model::{Amenity, Metric, ResortTable};
use crate::error::DataError;

/// Selections applied when a table is loaded, if the table has them.
pub const DEFAULT_CONTINENT: &str = "Europe";
pub const DEFAULT_COUNTRY: &str = "Austria";
pub const DEFAULT_METRIC: Metric = Metric::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    ResortFinder,
    Rankings,
}

// ---------------------------------------------------------------------------
// Report card
// ---------------------------------------------------------------------------

/// The four per-country ranks of one resort, ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub resort: String,
    pub lines: [String; 4],
}

impl ReportCard {
    pub fn for_resort(table: &ResortTable, name: &str) -> Result<Self, DataError> {
        let ranks = ranks_for(table, name)?;
        Ok(Self {
            resort: name.to_string(),
            lines: [
                format!("Elevation Rank: {:.1}", ranks.elevation),
                format!("Lift Ticket Price Rank: {:.1}", ranks.price),
                format!("Slope Count Rank: {:.1}", ranks.slopes),
                format!("Cannon Count Rank: {:.1}", ranks.cannons),
            ],
        })
    }

    pub fn heading(&self) -> String {
        format!("Resort Name: {}", self.resort)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Each setter runs one engine
/// operation and caches its result.
pub struct AppState {
    /// Loaded table (None until a file is loaded). Never mutated.
    pub table: Option<Arc<ResortTable>>,

    pub tab: Tab,

    /// Price ceiling and amenity checkboxes of the finder tab.
    pub map_filter: MapFilter,

    /// Indices of resorts passing `map_filter` (cached).
    pub visible_indices: Vec<usize>,

    /// Total-slopes colour scale over the visible resorts.
    pub color_scale: Option<ColorScale>,

    pub continent: Option<String>,

    /// Countries of `continent`, for the country selector.
    pub country_options: Vec<String>,

    pub country: Option<String>,

    pub metric: Option<Metric>,

    /// Last ranking shown. Kept when the selection becomes incomplete.
    pub ranking: Option<RankingView>,

    pub report_card: Option<ReportCard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            tab: Tab::default(),
            map_filter: MapFilter::default(),
            visible_indices: Vec::new(),
            color_scale: None,
            continent: None,
            country_options: Vec::new(),
            country: None,
            metric: None,
            ranking: None,
            report_card: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a dataset file, replacing the current table on success. On
    /// failure the previous table stays and the error goes to the status bar.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_table(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table and reset every selection to its default.
    pub fn set_table(&mut self, table: ResortTable) {
        let table = Arc::new(table);

        let continents = table.continents();
        self.continent = continents
            .iter()
            .find(|c| c.as_str() == DEFAULT_CONTINENT)
            .or_else(|| continents.first())
            .cloned();
        self.country_options = self
            .continent
            .as_deref()
            .map(|c| countries_in(&table, c))
            .unwrap_or_default();
        self.country = self
            .country_options
            .iter()
            .find(|c| c.as_str() == DEFAULT_COUNTRY)
            .cloned();
        self.metric = Some(DEFAULT_METRIC);

        self.map_filter = MapFilter::default();
        self.ranking = None;
        self.report_card = None;
        self.table = Some(table);

        self.refilter();
        self.refresh_ranking();

        self.status_message = None;
    }

    /// Recompute `visible_indices` and the colour scale after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filter_for_map(table, &self.map_filter);
            self.color_scale = ColorScale::from_values(
                self.visible_indices
                    .iter()
                    .filter_map(|&i| table.get(i))
                    .map(|r| r.total_slopes),
            );
            log::debug!(
                "Map filter {:?}: {} of {} resorts visible",
                self.map_filter,
                self.visible_indices.len(),
                table.len()
            );
        }
    }

    pub fn set_price_ceiling(&mut self, price: f64) {
        self.map_filter.price_ceiling = price;
        self.refilter();
    }

    pub fn toggle_amenity(&mut self, amenity: Amenity) {
        if !self.map_filter.amenities.remove(&amenity) {
            self.map_filter.amenities.insert(amenity);
        }
        self.refilter();
    }

    /// Switch continent. A selected country outside the new continent is
    /// cleared, which leaves the previous ranking on screen.
    pub fn set_continent(&mut self, continent: String) {
        if let Some(table) = &self.table {
            self.country_options = countries_in(table, &continent);
        }
        if let Some(country) = &self.country {
            if !self.country_options.contains(country) {
                self.country = None;
            }
        }
        self.continent = Some(continent);
        self.refresh_ranking();
    }

    pub fn set_country(&mut self, country: Option<String>) {
        self.country = country;
        self.refresh_ranking();
    }

    pub fn set_metric(&mut self, metric: Option<Metric>) {
        self.metric = metric;
        self.refresh_ranking();
    }

    /// Re-run the ranking filter; `Retain` keeps the current view.
    pub fn refresh_ranking(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        match filter_for_ranking(table, self.country.as_deref(), self.metric) {
            RankingUpdate::Show(view) => {
                log::debug!("{}", view.title());
                self.ranking = Some(view);
            }
            RankingUpdate::Retain => {
                log::debug!("Ranking selection incomplete; keeping previous view");
            }
        }
    }

    /// Show the report card for `name`. Unknown names clear the card.
    pub fn inspect_resort(&mut self, name: &str) {
        if self.report_card.as_ref().is_some_and(|c| c.resort == name) {
            return;
        }
        let Some(table) = &self.table else {
            return;
        };
        match ReportCard::for_resort(table, name) {
            Ok(card) => {
                self.report_card = Some(card);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.report_card = None;
                self.status_message = Some(format!("No data for {name}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_table(fixtures::sample_table());
        state
    }

    fn ranked_names(state: &AppState) -> Vec<String> {
        let table = state.table.as_ref().unwrap();
        state
            .ranking
            .as_ref()
            .unwrap()
            .resorts(table)
            .map(|r| r.name.clone())
            .collect()
    }

    #[test]
    fn loading_applies_defaults() {
        let state = loaded();
        assert_eq!(state.continent.as_deref(), Some("Europe"));
        assert_eq!(state.country_options, vec!["Norway", "Austria"]);
        assert_eq!(state.country.as_deref(), Some("Austria"));
        assert_eq!(state.metric, Some(Metric::Price));
        assert_eq!(state.visible_indices.len(), 8);
        assert!(state.color_scale.is_some());
        assert_eq!(
            ranked_names(&state),
            vec!["Stubai Glacier", "Ischgl", "Kitzsteinhorn", "Golm"]
        );
    }

    #[test]
    fn price_and_amenities_refilter() {
        let mut state = loaded();
        state.set_price_ceiling(50.0);
        assert_eq!(state.visible_indices, vec![0, 1, 2, 8]);

        state.toggle_amenity(Amenity::Nightskiing);
        assert_eq!(state.visible_indices, vec![0, 8]);

        state.toggle_amenity(Amenity::Nightskiing);
        assert_eq!(state.visible_indices, vec![0, 1, 2, 8]);

        state.set_price_ceiling(0.0);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.color_scale, None);
    }

    #[test]
    fn continent_switch_keeps_ranking_until_country_chosen() {
        let mut state = loaded();
        state.set_continent("Asia".to_string());
        assert_eq!(state.country_options, vec!["Japan"]);
        assert_eq!(state.country, None);
        assert_eq!(state.ranking.as_ref().unwrap().country, "Austria");

        state.set_country(Some("Japan".to_string()));
        assert_eq!(ranked_names(&state), vec!["Niseko"]);
    }

    #[test]
    fn clearing_metric_keeps_ranking() {
        let mut state = loaded();
        state.set_metric(Some(Metric::TotalSlopes));
        let before = state.ranking.clone();
        state.set_metric(None);
        assert_eq!(state.ranking, before);
        assert_eq!(
            ranked_names(&state),
            vec!["Ischgl", "Stubai Glacier", "Golm", "Kitzsteinhorn"]
        );
    }

    #[test]
    fn report_card_shows_each_rank() {
        let mut state = loaded();
        state.inspect_resort("Ischgl");
        let card = state.report_card.as_ref().unwrap();
        assert_eq!(card.heading(), "Resort Name: Ischgl");
        assert_eq!(
            card.lines,
            [
                "Elevation Rank: 3.0".to_string(),
                "Lift Ticket Price Rank: 1.5".to_string(),
                "Slope Count Rank: 1.0".to_string(),
                "Cannon Count Rank: 1.0".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_resort_clears_report_card() {
        let mut state = loaded();
        state.inspect_resort("Ischgl");
        state.inspect_resort("Nowhere");
        assert_eq!(state.report_card, None);
        assert_eq!(state.status_message.as_deref(), Some("No data for Nowhere"));
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let mut state = loaded();
        state.load_path(Path::new("/nonexistent/resorts.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.table.as_ref().unwrap().len(), 9);
    }
}
