/// Data layer: resort table, loading, ranking, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (column → CellValue)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐     ┌──────────┐
///   │ ResortTable │ ◄── │ ranking  │  per-country ranks, once at load
///   └─────────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  map filter / top-N per country → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  indices → Arrow table / JSON (headless CLI)
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod ranking;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::loader::read_csv;
    use super::model::ResortTable;

    pub const HEADER: &str = "ID,Resort,Latitude,Longitude,Country,Continent,Price,Season,\
Highest point,Lowest point,Total slopes,Snow cannons,Snowparks,Nightskiing,Summer skiing";

    const ROWS: &str = "\
1,Hemsedal,60.86,8.55,Norway,Europe,46,November - May,1450,620,50,0,Yes,Yes,No
2,Geilosiden,60.53,8.2,Norway,Europe,44,November - April,1178,800,22,25,Yes,No,No
3,Golm,47.05,9.83,Austria,Europe,48,December - April,2110,650,51,333,Yes,No,No
4,Stubai Glacier,47.0,11.12,Austria,Europe,70,October - June,3210,1695,64,5,Yes,No,Yes
5,Ischgl,47.01,10.29,Austria,Europe,70,November - May,2872,1400,239,1000,Yes,Yes,No
6,Kitzsteinhorn,47.19,12.69,Austria,Europe,60,Year-round,3029,750,41,81,Yes,No,Yes
7,Vail,39.64,-106.37,United States,North America,189,November - April,3527,2475,193,0,Yes,No,No
8,Whistler,50.11,-122.95,Canada,North America,140,November - May,2284,675,200,270,Yes,Yes,Yes
9,Niseko,42.8,140.69,Japan,Asia,40,December - April,1308,260,61,0,No,Yes,No
";

    pub fn table_from_csv(text: &str) -> ResortTable {
        let raw = read_csv(text.as_bytes()).expect("fixture CSV parses");
        ResortTable::from_raw(&raw).expect("fixture matches schema")
    }

    /// Nine resorts in five countries on three continents.
    pub fn sample_table() -> ResortTable {
        table_from_csv(&format!("{HEADER}\n{ROWS}"))
    }

    /// `n` Swiss resorts; resort `i` has `3 * i` slopes.
    pub fn many_in_one_country(n: usize) -> ResortTable {
        let mut text = format!("{HEADER}\n");
        for i in 1..=n {
            text.push_str(&format!(
                "{i},Resort {i},46.0,8.0,Switzerland,Europe,{},Winter,{},500,{},{},No,No,No\n",
                40 + i,
                1500 + 10 * i,
                3 * i,
                i
            ));
        }
        table_from_csv(&text)
    }

    /// Two resorts share a name in different countries.
    pub fn duplicate_names() -> ResortTable {
        table_from_csv(&format!(
            "{HEADER}\n\
1,Alpine Meadows,39.16,-120.23,United States,North America,50,Winter,2000,1000,10,5,No,No,No
2,Alpine Meadows,49.0,-118.0,Canada,North America,40,Winter,1800,900,8,2,No,No,No
3,Palisades,39.19,-120.26,United States,North America,100,Winter,2700,1890,170,20,Yes,No,No
"
        ))
    }
}
