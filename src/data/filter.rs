use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use super::model::{Amenity, CountryRanks, Metric, Resort, ResortTable};
use crate::error::DataError;

/// Upper end of the price slider, also the default ceiling.
pub const PRICE_CEILING_MAX: f64 = 150.0;
pub const PRICE_STEP: f64 = 25.0;

/// How many resorts the ranking tab shows per country.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Map filter: price ceiling + required amenities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MapFilter {
    /// Exclusive upper bound on the lift ticket price.
    pub price_ceiling: f64,
    /// Every listed amenity must be present. Empty means no constraint.
    pub amenities: BTreeSet<Amenity>,
}

impl Default for MapFilter {
    fn default() -> Self {
        Self {
            price_ceiling: PRICE_CEILING_MAX,
            amenities: BTreeSet::new(),
        }
    }
}

impl MapFilter {
    pub fn new(price_ceiling: f64, amenities: impl IntoIterator<Item = Amenity>) -> Self {
        Self {
            price_ceiling,
            amenities: amenities.into_iter().collect(),
        }
    }

    pub fn matches(&self, resort: &Resort) -> bool {
        resort.price < self.price_ceiling && self.amenities.iter().all(|a| resort.has(*a))
    }

    pub fn title(&self) -> String {
        format!(
            "Ski Resorts by Total Slopes with a Lift Ticket Price of Less Than ${}",
            self.price_ceiling
        )
    }
}

/// Return indices of resorts passing the map filter, in table order.
pub fn filter_for_map(table: &ResortTable, filter: &MapFilter) -> Vec<usize> {
    table
        .resorts()
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking tab: top resorts of one country by one metric
// ---------------------------------------------------------------------------

/// Top resorts of a country, highest metric value first.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub country: String,
    pub metric: Metric,
    pub indices: Vec<usize>,
}

impl RankingView {
    pub fn title(&self) -> String {
        format!(
            "Top {} Resort(s) in {} by {}",
            self.indices.len(),
            self.country,
            self.metric
        )
    }

    pub fn resorts<'a>(&'a self, table: &'a ResortTable) -> impl Iterator<Item = &'a Resort> + 'a {
        self.indices.iter().filter_map(move |&i| table.get(i))
    }
}

/// Outcome of a ranking request. `Retain` tells the caller to keep whatever
/// it displayed before.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingUpdate {
    Retain,
    Show(RankingView),
}

/// Select one country's resorts, stable-sort them descending by `metric`
/// and keep the first [`TOP_N`]. Resorts without a value for an optional
/// metric sort last.
pub fn filter_for_ranking(
    table: &ResortTable,
    country: Option<&str>,
    metric: Option<Metric>,
) -> RankingUpdate {
    let (Some(country), Some(metric)) = (country.filter(|c| !c.is_empty()), metric) else {
        return RankingUpdate::Retain;
    };

    let resorts = table.resorts();
    let mut indices: Vec<usize> = resorts
        .iter()
        .enumerate()
        .filter(|(_, r)| r.country == country)
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        log::debug!("No resorts for country '{country}'");
    }

    indices.sort_by(|&a, &b| descending(metric.value(&resorts[a]), metric.value(&resorts[b])));
    indices.truncate(TOP_N);

    RankingUpdate::Show(RankingView {
        country: country.to_string(),
        metric,
        indices,
    })
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Distinct countries with at least one resort on `continent`, in order of
/// first appearance.
pub fn countries_in(table: &ResortTable, continent: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .resorts()
        .iter()
        .filter(|r| r.continent == continent)
        .filter(|r| seen.insert(r.country.as_str()))
        .map(|r| r.country.clone())
        .collect()
}

/// Ranks of the first resort named exactly `name`.
pub fn ranks_for(table: &ResortTable, name: &str) -> Result<CountryRanks, DataError> {
    table
        .resorts()
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.ranks)
        .ok_or_else(|| DataError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn under(price_ceiling: f64) -> MapFilter {
        MapFilter {
            price_ceiling,
            ..MapFilter::default()
        }
    }

    fn names(table: &ResortTable, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| table.resorts()[i].name.clone()).collect()
    }

    fn shown(update: RankingUpdate) -> RankingView {
        match update {
            RankingUpdate::Show(view) => view,
            RankingUpdate::Retain => panic!("expected a ranking view"),
        }
    }

    #[test]
    fn default_filter_keeps_everything_under_150() {
        let table = fixtures::sample_table();
        let visible = filter_for_map(&table, &MapFilter::default());
        let expected: Vec<usize> = table
            .resorts()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.price < 150.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(visible, expected);
        assert!(!names(&table, &visible).contains(&"Vail".to_string()));
        assert_eq!(visible.len(), 8);
    }

    #[test]
    fn price_bound_is_strict() {
        let table = fixtures::sample_table();
        assert!(filter_for_map(&table, &under(0.0)).is_empty());

        let under_70 = names(&table, &filter_for_map(&table, &under(70.0)));
        assert!(under_70.contains(&"Kitzsteinhorn".to_string()));
        assert!(!under_70.contains(&"Ischgl".to_string()));
        assert!(!under_70.contains(&"Stubai Glacier".to_string()));
    }

    #[test]
    fn amenities_are_and_combined() {
        let table = fixtures::sample_table();
        let cheap_parks = filter_for_map(&table, &MapFilter::new(50.0, [Amenity::Snowparks]));
        assert_eq!(names(&table, &cheap_parks), vec!["Hemsedal", "Geilosiden", "Golm"]);

        let all = filter_for_map(&table, &MapFilter::new(150.0, Amenity::ALL));
        assert_eq!(names(&table, &all), vec!["Whistler"]);
    }

    #[test]
    fn all_amenities_equal_intersection_of_singles() {
        let table = fixtures::sample_table();
        let all: BTreeSet<usize> = filter_for_map(&table, &MapFilter::new(150.0, Amenity::ALL))
            .into_iter()
            .collect();

        let mut intersection: Option<BTreeSet<usize>> = None;
        for amenity in Amenity::ALL {
            let single: BTreeSet<usize> = filter_for_map(&table, &MapFilter::new(150.0, [amenity]))
                .into_iter()
                .collect();
            intersection = Some(match intersection {
                Some(acc) => acc.intersection(&single).copied().collect(),
                None => single,
            });
        }
        assert_eq!(Some(all), intersection);
    }

    #[test]
    fn map_filter_title_shows_ceiling() {
        assert_eq!(
            under(75.0).title(),
            "Ski Resorts by Total Slopes with a Lift Ticket Price of Less Than $75"
        );
    }

    #[test]
    fn ranking_sorts_country_descending_and_stably() {
        let table = fixtures::sample_table();
        let view = shown(filter_for_ranking(&table, Some("Austria"), Some(Metric::Price)));

        // Stubai Glacier and Ischgl tie at 70; table order is kept.
        assert_eq!(
            names(&table, &view.indices),
            vec!["Stubai Glacier", "Ischgl", "Kitzsteinhorn", "Golm"]
        );
        assert!(view.resorts(&table).all(|r| r.country == "Austria"));
        assert_eq!(view.title(), "Top 4 Resort(s) in Austria by Price");
    }

    #[test]
    fn ranking_keeps_at_most_ten() {
        let table = fixtures::many_in_one_country(14);
        let view = shown(filter_for_ranking(
            &table,
            Some("Switzerland"),
            Some(Metric::TotalSlopes),
        ));
        assert_eq!(view.indices.len(), TOP_N);

        let values: Vec<f64> = view.resorts(&table).map(|r| r.total_slopes).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]), "{values:?}");
        assert_eq!(values[0], 14.0 * 3.0);
    }

    #[test]
    fn missing_optional_values_sort_last() {
        let table = fixtures::sample_table();
        let view = shown(filter_for_ranking(&table, Some("Norway"), Some(Metric::TotalLifts)));
        // No lift columns in the fixture: everything ties and order is kept.
        assert_eq!(names(&table, &view.indices), vec!["Hemsedal", "Geilosiden"]);
    }

    #[test]
    fn incomplete_selection_retains_previous_view() {
        let table = fixtures::sample_table();
        assert_eq!(filter_for_ranking(&table, None, Some(Metric::Price)), RankingUpdate::Retain);
        assert_eq!(filter_for_ranking(&table, Some("Austria"), None), RankingUpdate::Retain);
        assert_eq!(
            filter_for_ranking(&table, Some(""), Some(Metric::Price)),
            RankingUpdate::Retain
        );
        assert_eq!(filter_for_ranking(&table, None, None), RankingUpdate::Retain);
    }

    #[test]
    fn unknown_country_shows_empty_ranking() {
        let table = fixtures::sample_table();
        let view = shown(filter_for_ranking(&table, Some("Atlantis"), Some(Metric::Price)));
        assert!(view.indices.is_empty());
        assert_eq!(view.title(), "Top 0 Resort(s) in Atlantis by Price");
    }

    #[test]
    fn countries_are_distinct_per_continent() {
        let table = fixtures::sample_table();
        assert_eq!(countries_in(&table, "Europe"), vec!["Norway", "Austria"]);
        assert_eq!(countries_in(&table, "North America"), vec!["United States", "Canada"]);
        assert!(countries_in(&table, "Antarctica").is_empty());
    }

    #[test]
    fn rank_lookup_matches_computed_ranks() {
        let table = fixtures::sample_table();
        let ranks = ranks_for(&table, "Kitzsteinhorn").unwrap();
        let computed = crate::data::ranking::compute_ranks(table.resorts());
        assert_eq!(ranks, computed[5]);
        assert_eq!(ranks.elevation, 2.0);
        assert_eq!(ranks.slopes, 4.0);
    }

    #[test]
    fn rank_lookup_uses_first_duplicate() {
        let table = fixtures::duplicate_names();
        let ranks = ranks_for(&table, "Alpine Meadows").unwrap();
        assert_eq!(ranks, table.resorts()[0].ranks);
        assert_ne!(ranks, table.resorts()[1].ranks);
    }

    #[test]
    fn rank_lookup_unknown_resort() {
        let table = fixtures::sample_table();
        assert_eq!(
            ranks_for(&table, "Nowhere"),
            Err(DataError::NotFound("Nowhere".to_string()))
        );
    }
}
