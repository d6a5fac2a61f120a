use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const SITES: [&str; 4] = [
    "CCAFS LC-40",
    "CCAFS SLC-40",
    "KSC LC-39A",
    "VAFB SLC-4E",
];

/// Booster generations: category, launches, success odds, payload mean / sd.
/// Later generations fly more often, lift more, and fail less.
const GENERATIONS: [(&str, usize, f64, f64, f64); 5] = [
    ("v1.0", 5, 0.40, 2000.0, 900.0),
    ("v1.1", 15, 0.60, 3200.0, 1400.0),
    ("FT", 24, 0.82, 5200.0, 2100.0),
    ("B4", 11, 0.90, 5600.0, 2300.0),
    ("B5", 35, 0.97, 6400.0, 2400.0),
];

fn main() {
    let mut rng = SimpleRng::new(42);

    // Collect all rows
    let mut all_flight: Vec<i64> = Vec::new();
    let mut all_site: Vec<String> = Vec::new();
    let mut all_class: Vec<i64> = Vec::new();
    let mut all_payload: Vec<Option<f64>> = Vec::new();
    let mut all_version: Vec<String> = Vec::new();
    let mut all_category: Vec<String> = Vec::new();

    let mut flight: i64 = 0;
    for (category, launches, odds, payload_mean, payload_sd) in GENERATIONS {
        for _ in 0..launches {
            flight += 1;

            let site = SITES[(rng.next_u64() % SITES.len() as u64) as usize];
            let class = i64::from(rng.next_f64() < odds);
            // A few launches have no recorded payload mass.
            let payload = (rng.next_f64() >= 0.04)
                .then(|| rng.gauss(payload_mean, payload_sd).clamp(0.0, 9600.0));

            all_flight.push(flight);
            all_site.push(site.to_string());
            all_class.push(class);
            all_payload.push(payload);
            all_version.push(format!("F9 {category} B1{flight:03}"));
            all_category.push(category.to_string());
        }
    }

    // Write CSV
    let csv_path = "spacex_launch_dash.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    csv_writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for i in 0..all_flight.len() {
        let payload_cell = all_payload[i]
            .map(|kg| format!("{kg:.1}"))
            .unwrap_or_default();
        let row = [
            all_flight[i].to_string(),
            all_site[i].clone(),
            all_class[i].to_string(),
            payload_cell,
            all_version[i].clone(),
            all_category[i].clone(),
        ];
        csv_writer.write_record(&row).expect("Failed to write CSV row");
    }
    csv_writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let site_array = StringArray::from(
        all_site.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let version_array = StringArray::from(
        all_version.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let category_array = StringArray::from(
        all_category.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let flight_array = Int64Array::from(all_flight);
    let class_array = Int64Array::from(all_class.clone());
    let payload_array = Float64Array::from(all_payload);

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, true),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(version_array),
            Arc::new(category_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let successes: i64 = all_class.iter().sum();
    println!("Wrote {flight} launches ({successes} successful) to {csv_path} and {parquet_path}");
}
