//! Terminal front-end: the same engine operations as the UI, rendered as
//! text tables or JSON.

use anyhow::{Result, bail};
use clap::ValueEnum;

use crate::data::export;
use crate::data::filter::{
    MapFilter, RankingUpdate, countries_in, filter_for_map, filter_for_ranking,
};
use crate::data::model::{Amenity, Metric, ResortTable};
use crate::state::ReportCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

fn render(
    table: &ResortTable,
    indices: &[usize],
    metrics: &[Metric],
    title: &str,
    format: Format,
) -> Result<String> {
    match format {
        Format::Table => Ok(format!(
            "{title}\n{}",
            export::pretty_table(table, indices, metrics)?
        )),
        Format::Json => export::to_json(table, indices),
    }
}

/// Top resorts of `country` by the metric column named `metric`.
pub fn top(table: &ResortTable, country: &str, metric: &str, format: Format) -> Result<String> {
    let metric: Metric = metric.parse()?;
    match filter_for_ranking(table, Some(country), Some(metric)) {
        RankingUpdate::Show(view) => render(table, &view.indices, &[metric], &view.title(), format),
        RankingUpdate::Retain => bail!("a country and a metric are required"),
    }
}

/// Resorts cheaper than `max_price` with every listed amenity column.
pub fn find(
    table: &ResortTable,
    max_price: f64,
    amenities: &[String],
    format: Format,
) -> Result<String> {
    let amenities = amenities
        .iter()
        .map(|a| a.parse::<Amenity>())
        .collect::<Result<Vec<_>, _>>()?;
    let filter = MapFilter::new(max_price, amenities);
    let indices = filter_for_map(table, &filter);
    render(
        table,
        &indices,
        &[Metric::Price, Metric::TotalSlopes],
        &filter.title(),
        format,
    )
}

pub fn countries(table: &ResortTable, continent: &str) -> String {
    countries_in(table, continent).join("\n")
}

pub fn card(table: &ResortTable, resort: &str) -> Result<String> {
    let card = ReportCard::for_resort(table, resort)?;
    let mut out = card.heading();
    for line in &card.lines {
        out.push('\n');
        out.push_str(line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::error::DataError;

    #[test]
    fn top_renders_title_and_rows() {
        let table = fixtures::sample_table();
        let out = top(&table, "Austria", "Price", Format::Table).unwrap();
        assert!(out.starts_with("Top 4 Resort(s) in Austria by Price\n"));
        assert!(out.contains("Stubai Glacier"));
        assert!(!out.contains("Hemsedal"));
    }

    #[test]
    fn top_rejects_unknown_metric() {
        let table = fixtures::sample_table();
        let err = top(&table, "Austria", "price", Format::Table).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnknownMetric("price".to_string()))
        );
    }

    #[test]
    fn find_outputs_json_records() {
        let table = fixtures::sample_table();
        let out = find(&table, 150.0, &["Summer skiing".to_string()], Format::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["Resort"].as_str())
            .collect();
        assert_eq!(names, vec!["Stubai Glacier", "Kitzsteinhorn", "Whistler"]);
    }

    #[test]
    fn find_rejects_unknown_amenity() {
        let table = fixtures::sample_table();
        assert!(find(&table, 150.0, &["Has Snow Park".to_string()], Format::Table).is_err());
    }

    #[test]
    fn countries_one_per_line() {
        let table = fixtures::sample_table();
        assert_eq!(countries(&table, "Europe"), "Norway\nAustria");
    }

    #[test]
    fn card_lists_ranks_or_fails() {
        let table = fixtures::sample_table();
        let out = card(&table, "Golm").unwrap();
        assert!(out.starts_with("Resort Name: Golm\n"));
        assert!(out.contains("Lift Ticket Price Rank: 4.0"));

        let err = card(&table, "Nowhere").unwrap_err();
        assert!(matches!(err.downcast_ref::<DataError>(), Some(DataError::NotFound(_))));
    }
}
