use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ranking;
use crate::error::DataError;

pub const RESORT: &str = "Resort";
pub const COUNTRY: &str = "Country";
pub const CONTINENT: &str = "Continent";
pub const SEASON: &str = "Season";

/// Columns read verbatim, never guessed as numbers.
pub const TEXT_COLUMNS: [&str; 4] = [RESORT, COUNTRY, CONTINENT, SEASON];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from CSV / JSON / Parquet, before the
/// table is checked against the resort schema.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

static NULL_CELL: CellValue = CellValue::Null;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Textual form of the cell; `None` only for nulls.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Amenity columns hold `"Yes"` when the resort has the feature.
    pub fn is_yes(&self) -> bool {
        matches!(self, CellValue::Text(s) if s == "Yes")
    }
}

// ---------------------------------------------------------------------------
// RawTable – the file contents, columns by name
// ---------------------------------------------------------------------------

/// Loader output: ordered column names plus one `column → cell` map per row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// Metric / Amenity – typed column selectors
// ---------------------------------------------------------------------------

/// Every numeric, non-identity column a resort can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    Latitude,
    Longitude,
    Price,
    #[serde(rename = "Highest point")]
    HighestPoint,
    #[serde(rename = "Lowest point")]
    LowestPoint,
    #[serde(rename = "Beginner slopes")]
    BeginnerSlopes,
    #[serde(rename = "Intermediate slopes")]
    IntermediateSlopes,
    #[serde(rename = "Difficult slopes")]
    DifficultSlopes,
    #[serde(rename = "Total slopes")]
    TotalSlopes,
    #[serde(rename = "Longest run")]
    LongestRun,
    #[serde(rename = "Snow cannons")]
    SnowCannons,
    #[serde(rename = "Surface lifts")]
    SurfaceLifts,
    #[serde(rename = "Chair lifts")]
    ChairLifts,
    #[serde(rename = "Gondola lifts")]
    GondolaLifts,
    #[serde(rename = "Total lifts")]
    TotalLifts,
    #[serde(rename = "Lift capacity")]
    LiftCapacity,
    #[serde(rename = "Elevation Rank")]
    ElevationRank,
    #[serde(rename = "Lift Ticket Price Rank")]
    PriceRank,
    #[serde(rename = "Slope Count Rank")]
    SlopeRank,
    #[serde(rename = "Cannon Count Rank")]
    CannonRank,
}

impl Metric {
    /// All metrics in dataset column order.
    pub const ALL: [Metric; 20] = [
        Metric::Latitude,
        Metric::Longitude,
        Metric::Price,
        Metric::HighestPoint,
        Metric::LowestPoint,
        Metric::BeginnerSlopes,
        Metric::IntermediateSlopes,
        Metric::DifficultSlopes,
        Metric::TotalSlopes,
        Metric::LongestRun,
        Metric::SnowCannons,
        Metric::SurfaceLifts,
        Metric::ChairLifts,
        Metric::GondolaLifts,
        Metric::TotalLifts,
        Metric::LiftCapacity,
        Metric::ElevationRank,
        Metric::PriceRank,
        Metric::SlopeRank,
        Metric::CannonRank,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Latitude => "Latitude",
            Metric::Longitude => "Longitude",
            Metric::Price => "Price",
            Metric::HighestPoint => "Highest point",
            Metric::LowestPoint => "Lowest point",
            Metric::BeginnerSlopes => "Beginner slopes",
            Metric::IntermediateSlopes => "Intermediate slopes",
            Metric::DifficultSlopes => "Difficult slopes",
            Metric::TotalSlopes => "Total slopes",
            Metric::LongestRun => "Longest run",
            Metric::SnowCannons => "Snow cannons",
            Metric::SurfaceLifts => "Surface lifts",
            Metric::ChairLifts => "Chair lifts",
            Metric::GondolaLifts => "Gondola lifts",
            Metric::TotalLifts => "Total lifts",
            Metric::LiftCapacity => "Lift capacity",
            Metric::ElevationRank => "Elevation Rank",
            Metric::PriceRank => "Lift Ticket Price Rank",
            Metric::SlopeRank => "Slope Count Rank",
            Metric::CannonRank => "Cannon Count Rank",
        }
    }

    /// Columns every dataset must provide.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Metric::Latitude
                | Metric::Longitude
                | Metric::Price
                | Metric::HighestPoint
                | Metric::TotalSlopes
                | Metric::SnowCannons
        )
    }

    /// Derived per-country rank columns.
    pub fn is_rank(self) -> bool {
        matches!(
            self,
            Metric::ElevationRank | Metric::PriceRank | Metric::SlopeRank | Metric::CannonRank
        )
    }

    pub fn value(self, resort: &Resort) -> Option<f64> {
        match self {
            Metric::Latitude => Some(resort.latitude),
            Metric::Longitude => Some(resort.longitude),
            Metric::Price => Some(resort.price),
            Metric::HighestPoint => Some(resort.highest_point),
            Metric::TotalSlopes => Some(resort.total_slopes),
            Metric::SnowCannons => Some(resort.snow_cannons),
            Metric::ElevationRank => Some(resort.ranks.elevation),
            Metric::PriceRank => Some(resort.ranks.price),
            Metric::SlopeRank => Some(resort.ranks.slopes),
            Metric::CannonRank => Some(resort.ranks.cannons),
            optional => resort.extra.get(&optional).copied(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| DataError::UnknownMetric(s.to_string()))
    }
}

/// Boolean resort features offered as map filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Amenity {
    Snowparks,
    Nightskiing,
    #[serde(rename = "Summer skiing")]
    SummerSkiing,
}

impl Amenity {
    pub const ALL: [Amenity; 3] = [
        Amenity::Snowparks,
        Amenity::Nightskiing,
        Amenity::SummerSkiing,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Amenity::Snowparks => "Snowparks",
            Amenity::Nightskiing => "Nightskiing",
            Amenity::SummerSkiing => "Summer skiing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Amenity::Snowparks => "Has Snow Park",
            Amenity::Nightskiing => "Has Night Skiing",
            Amenity::SummerSkiing => "Has Summer Skiing",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Amenity {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amenity::ALL
            .into_iter()
            .find(|a| a.column() == s)
            .ok_or_else(|| DataError::UnknownAmenity(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Resort – one typed row
// ---------------------------------------------------------------------------

/// Per-country ranks, descending (1 = highest value), ties averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CountryRanks {
    #[serde(rename = "Elevation Rank")]
    pub elevation: f64,
    #[serde(rename = "Lift Ticket Price Rank")]
    pub price: f64,
    #[serde(rename = "Slope Count Rank")]
    pub slopes: f64,
    #[serde(rename = "Cannon Count Rank")]
    pub cannons: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resort {
    #[serde(rename = "Resort")]
    pub name: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Continent")]
    pub continent: String,
    #[serde(rename = "Season", skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Highest point")]
    pub highest_point: f64,
    #[serde(rename = "Total slopes")]
    pub total_slopes: f64,
    #[serde(rename = "Snow cannons")]
    pub snow_cannons: f64,
    /// Optional numeric columns that were present and non-blank.
    #[serde(flatten)]
    pub extra: BTreeMap<Metric, f64>,
    #[serde(rename = "Amenities")]
    pub amenities: BTreeSet<Amenity>,
    #[serde(flatten)]
    pub ranks: CountryRanks,
}

impl Resort {
    pub fn has(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }
}

// ---------------------------------------------------------------------------
// ResortTable – the immutable base table
// ---------------------------------------------------------------------------

/// The loaded, ranked dataset. Built once and shared read-only; every filter
/// returns row indices into it.
#[derive(Debug, Clone)]
pub struct ResortTable {
    resorts: Vec<Resort>,
    metrics: Vec<Metric>,
}

impl ResortTable {
    /// Check the raw table against the resort schema, type every row and
    /// append the per-country rank columns.
    pub fn from_raw(raw: &RawTable) -> Result<Self, DataError> {
        check_schema(raw)?;

        let optional: Vec<Metric> = Metric::ALL
            .into_iter()
            .filter(|m| !m.is_required() && !m.is_rank() && raw.has_column(m.column()))
            .collect();

        let mut resorts = raw
            .rows
            .iter()
            .enumerate()
            .map(|(row_no, row)| resort_from_row(row_no, row, &optional))
            .collect::<Result<Vec<_>, _>>()?;

        let ranks = ranking::compute_ranks(&resorts);
        for (resort, rank) in resorts.iter_mut().zip(ranks) {
            resort.ranks = rank;
        }

        let metrics = Metric::ALL
            .into_iter()
            .filter(|m| m.is_required() || m.is_rank() || optional.contains(m))
            .collect();

        Ok(Self { resorts, metrics })
    }

    pub fn resorts(&self) -> &[Resort] {
        &self.resorts
    }

    pub fn get(&self, index: usize) -> Option<&Resort> {
        self.resorts.get(index)
    }

    pub fn len(&self) -> usize {
        self.resorts.len()
    }

    /// Metrics available for ranking in this table, in column order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Distinct continents in order of first appearance.
    pub fn continents(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.resorts
            .iter()
            .filter(|r| seen.insert(r.continent.as_str()))
            .map(|r| r.continent.clone())
            .collect()
    }

    /// Number of distinct countries.
    pub fn country_count(&self) -> usize {
        self.resorts
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn check_schema(raw: &RawTable) -> Result<(), DataError> {
    let required = [RESORT, COUNTRY, CONTINENT]
        .into_iter()
        .chain(Metric::ALL.into_iter().filter(|m| m.is_required()).map(Metric::column))
        .chain(Amenity::ALL.into_iter().map(Amenity::column));

    let missing: Vec<String> = required
        .filter(|col| !raw.has_column(col))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::Schema { missing })
    }
}

fn cell<'a>(row: &'a BTreeMap<String, CellValue>, column: &str) -> &'a CellValue {
    row.get(column).unwrap_or(&NULL_CELL)
}

fn invalid(row_no: usize, column: &str, value: &CellValue) -> DataError {
    DataError::InvalidValue {
        row: row_no,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn required_text(
    row_no: usize,
    row: &BTreeMap<String, CellValue>,
    column: &str,
) -> Result<String, DataError> {
    let value = cell(row, column);
    value
        .to_text()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(row_no, column, value))
}

fn required_number(
    row_no: usize,
    row: &BTreeMap<String, CellValue>,
    column: &str,
) -> Result<f64, DataError> {
    let value = cell(row, column);
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row_no, column, value))
}

fn optional_number(
    row_no: usize,
    row: &BTreeMap<String, CellValue>,
    column: &str,
) -> Result<Option<f64>, DataError> {
    match cell(row, column) {
        CellValue::Null => Ok(None),
        value => value
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(row_no, column, value)),
    }
}

fn resort_from_row(
    row_no: usize,
    row: &BTreeMap<String, CellValue>,
    optional: &[Metric],
) -> Result<Resort, DataError> {
    let mut extra = BTreeMap::new();
    for metric in optional {
        if let Some(v) = optional_number(row_no, row, metric.column())? {
            extra.insert(*metric, v);
        }
    }

    let amenities = Amenity::ALL
        .into_iter()
        .filter(|a| cell(row, a.column()).is_yes())
        .collect();

    Ok(Resort {
        name: required_text(row_no, row, RESORT)?,
        country: required_text(row_no, row, COUNTRY)?,
        continent: required_text(row_no, row, CONTINENT)?,
        season: cell(row, SEASON).to_text(),
        latitude: required_number(row_no, row, Metric::Latitude.column())?,
        longitude: required_number(row_no, row, Metric::Longitude.column())?,
        price: required_number(row_no, row, Metric::Price.column())?,
        highest_point: required_number(row_no, row, Metric::HighestPoint.column())?,
        total_slopes: required_number(row_no, row, Metric::TotalSlopes.column())?,
        snow_cannons: required_number(row_no, row, Metric::SnowCannons.column())?,
        extra,
        amenities,
        ranks: CountryRanks::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn metric_parses_only_exact_column_names() {
        assert_eq!("Price".parse::<Metric>(), Ok(Metric::Price));
        assert_eq!("Lift Ticket Price Rank".parse::<Metric>(), Ok(Metric::PriceRank));
        assert_eq!(
            "price".parse::<Metric>(),
            Err(DataError::UnknownMetric("price".to_string()))
        );
        for metric in Metric::ALL {
            assert_eq!(metric.column().parse::<Metric>(), Ok(metric));
        }
    }

    #[test]
    fn amenity_parses_column_names() {
        assert_eq!("Summer skiing".parse::<Amenity>(), Ok(Amenity::SummerSkiing));
        assert!("Has Snow Park".parse::<Amenity>().is_err());
    }

    #[test]
    fn amenity_flag_requires_exact_yes() {
        assert!(CellValue::Text("Yes".into()).is_yes());
        assert!(!CellValue::Text("yes".into()).is_yes());
        assert!(!CellValue::Text("No".into()).is_yes());
        assert!(!CellValue::Bool(true).is_yes());
        assert!(!CellValue::Null.is_yes());
    }

    #[test]
    fn table_types_rows_and_collects_metrics() {
        let table = fixtures::sample_table();
        assert_eq!(table.len(), 9);

        let whistler = &table.resorts()[7];
        assert_eq!(whistler.name, "Whistler");
        assert_eq!(whistler.country, "Canada");
        assert_eq!(whistler.price, 140.0);
        assert!(whistler.has(Amenity::Snowparks));
        assert!(whistler.has(Amenity::Nightskiing));
        assert!(whistler.has(Amenity::SummerSkiing));
        assert_eq!(Metric::LowestPoint.value(whistler), Some(675.0));
        assert_eq!(whistler.season.as_deref(), Some("November - May"));

        // Lowest point is in the fixture, lift columns are not.
        assert!(table.metrics().contains(&Metric::LowestPoint));
        assert!(!table.metrics().contains(&Metric::TotalLifts));
        assert!(table.metrics().contains(&Metric::CannonRank));
        assert_eq!(table.metrics().first(), Some(&Metric::Latitude));
    }

    #[test]
    fn continents_are_distinct_in_first_seen_order() {
        let table = fixtures::sample_table();
        assert_eq!(table.continents(), vec!["Europe", "North America", "Asia"]);
        assert_eq!(table.country_count(), 5);
    }

    #[test]
    fn missing_columns_are_a_schema_error() {
        let mut raw = RawTable::new(vec![RESORT.to_string(), COUNTRY.to_string()]);
        raw.rows.push(BTreeMap::new());

        match ResortTable::from_raw(&raw) {
            Err(DataError::Schema { missing }) => {
                assert!(missing.contains(&"Continent".to_string()));
                assert!(missing.contains(&"Highest point".to_string()));
                assert!(missing.contains(&"Snow cannons".to_string()));
                assert!(missing.contains(&"Summer skiing".to_string()));
                assert!(!missing.contains(&"Country".to_string()));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_country_column_is_a_schema_error() {
        let drop_country = |line: &str| {
            let mut cells: Vec<&str> = line.split(',').collect();
            cells.remove(4);
            cells.join(",")
        };
        let csv = [
            fixtures::HEADER,
            "1,Hemsedal,60.86,8.55,Norway,Europe,46,November - May,1450,620,50,0,Yes,Yes,No",
            "2,Golm,47.05,9.83,Austria,Europe,48,December - April,2110,650,51,333,Yes,No,No",
        ]
        .map(drop_country)
        .join("\n");
        let raw = crate::data::loader::read_csv(csv.as_bytes()).unwrap();
        assert!(!raw.has_column(COUNTRY));

        match ResortTable::from_raw(&raw) {
            Err(DataError::Schema { missing }) => assert_eq!(missing, vec!["Country".to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn blank_required_number_is_rejected() {
        let csv = fixtures::HEADER.to_string()
            + "\n1,Nowhere,1.0,2.0,Norway,Europe,,Winter,1000,500,10,0,No,No,No\n";
        let raw = crate::data::loader::read_csv(csv.as_bytes()).unwrap();
        match ResortTable::from_raw(&raw) {
            Err(DataError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "Price");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn blank_optional_number_is_absent() {
        let csv = fixtures::HEADER.to_string()
            + "\n1,Nowhere,1.0,2.0,Norway,Europe,30,,1000,,10,0,No,No,No\n";
        let raw = crate::data::loader::read_csv(csv.as_bytes()).unwrap();
        let table = ResortTable::from_raw(&raw).unwrap();
        let resort = &table.resorts()[0];
        assert_eq!(Metric::LowestPoint.value(resort), None);
        assert_eq!(resort.season, None);
    }
}
