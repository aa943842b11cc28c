use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// splitmix64, enough for reproducible demo data
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    fn int(&mut self, lo: i64, hi: i64) -> i64 {
        self.range(lo as f64, hi as f64 + 1.0).floor() as i64
    }

    fn yes(&mut self, p: f64) -> &'static str {
        if self.unit() < p { "Yes" } else { "No" }
    }
}

/// (country, continent, lat, lon, price level, resorts)
const COUNTRIES: &[(&str, &str, f64, f64, f64, usize)] = &[
    ("Austria", "Europe", 47.2, 11.5, 60.0, 14),
    ("Switzerland", "Europe", 46.6, 8.3, 80.0, 12),
    ("France", "Europe", 45.4, 6.6, 55.0, 12),
    ("Italy", "Europe", 46.3, 11.0, 50.0, 10),
    ("Norway", "Europe", 61.0, 9.0, 45.0, 6),
    ("United States", "North America", 40.5, -109.0, 150.0, 12),
    ("Canada", "North America", 50.5, -118.0, 110.0, 8),
    ("Japan", "Asia", 42.0, 140.0, 40.0, 7),
    ("Chile", "South America", -33.3, -70.2, 60.0, 4),
    ("New Zealand", "Oceania", -44.0, 169.5, 70.0, 3),
];

const SEASONS: &[&str] = &[
    "December - April",
    "November - May",
    "November - April",
    "June - October",
    "Year-round",
];

fn main() {
    let mut rng = SampleRng(42);

    let mut id = Vec::new();
    let mut resort = Vec::new();
    let mut latitude = Vec::new();
    let mut longitude = Vec::new();
    let mut country = Vec::new();
    let mut continent = Vec::new();
    let mut price = Vec::new();
    let mut season = Vec::new();
    let mut highest = Vec::new();
    let mut lowest = Vec::new();
    let mut total_slopes = Vec::new();
    let mut longest_run = Vec::new();
    let mut cannons = Vec::new();
    let mut total_lifts = Vec::new();
    let mut snowparks = Vec::new();
    let mut nightskiing = Vec::new();
    let mut summer = Vec::new();

    let mut next_id: i64 = 1;
    for &(name, cont, lat, lon, price_level, count) in COUNTRIES {
        for n in 1..=count {
            let top = rng.range(1000.0, 3800.0).round();
            let summit_glacier = top > 3000.0;

            id.push(next_id);
            resort.push(format!("{name} Resort {n}"));
            latitude.push(lat + rng.range(-1.5, 1.5));
            longitude.push(lon + rng.range(-2.5, 2.5));
            country.push(name);
            continent.push(cont);
            price.push((price_level * rng.range(0.6, 1.4)).round() as i64);
            season.push(SEASONS[rng.int(0, SEASONS.len() as i64 - 1) as usize]);
            highest.push(top as i64);
            lowest.push((top - rng.range(300.0, 1800.0).min(top - 200.0)).round() as i64);
            total_slopes.push(rng.int(5, 250));
            longest_run.push(rng.int(1, 15));
            cannons.push(rng.int(0, 1200));
            total_lifts.push(rng.int(2, 60));
            snowparks.push(rng.yes(0.7));
            nightskiing.push(rng.yes(0.3));
            summer.push(if summit_glacier { rng.yes(0.6) } else { "No" });
            next_id += 1;
        }
    }

    let utf8 = |name: &str| Field::new(name, DataType::Utf8, false);
    let int = |name: &str| Field::new(name, DataType::Int64, false);
    let float = |name: &str| Field::new(name, DataType::Float64, false);

    let schema = Arc::new(Schema::new(vec![
        int("ID"),
        utf8("Resort"),
        float("Latitude"),
        float("Longitude"),
        utf8("Country"),
        utf8("Continent"),
        int("Price"),
        utf8("Season"),
        int("Highest point"),
        int("Lowest point"),
        int("Total slopes"),
        int("Longest run"),
        int("Snow cannons"),
        int("Total lifts"),
        utf8("Snowparks"),
        utf8("Nightskiing"),
        utf8("Summer skiing"),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(id)),
        Arc::new(StringArray::from(resort)),
        Arc::new(Float64Array::from(latitude)),
        Arc::new(Float64Array::from(longitude)),
        Arc::new(StringArray::from(country)),
        Arc::new(StringArray::from(continent)),
        Arc::new(Int64Array::from(price)),
        Arc::new(StringArray::from(season)),
        Arc::new(Int64Array::from(highest)),
        Arc::new(Int64Array::from(lowest)),
        Arc::new(Int64Array::from(total_slopes)),
        Arc::new(Int64Array::from(longest_run)),
        Arc::new(Int64Array::from(cannons)),
        Arc::new(Int64Array::from(total_lifts)),
        Arc::new(StringArray::from(snowparks)),
        Arc::new(StringArray::from(nightskiing)),
        Arc::new(StringArray::from(summer)),
    ];

    let batch =
        RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    let output_path = "sample_resorts.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {} resorts to {output_path}", next_id - 1);
}
