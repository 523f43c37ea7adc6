use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Sectors with a (low, high) price band in dollars.
const SECTORS: [(&str, f64, f64); 6] = [
    ("Banquet Halls", 3_000.0, 25_000.0),
    ("Photographers", 1_200.0, 6_000.0),
    ("Florists", 500.0, 4_000.0),
    ("Caterers", 2_000.0, 15_000.0),
    ("Wedding Planners", 1_500.0, 10_000.0),
    ("Bridal Salons", 800.0, 5_000.0),
];

/// Neighbourhoods around Los Angeles: (name, lat, lon, zip).
const REGIONS: [(&str, f64, f64, i64); 8] = [
    ("Downtown", 34.0488, -118.2518, 90012),
    ("Pasadena", 34.1478, -118.1445, 91101),
    ("Santa Monica", 34.0195, -118.4912, 90401),
    ("Long Beach", 33.7701, -118.1937, 90802),
    ("Burbank", 34.1808, -118.3090, 91502),
    ("Malibu", 34.0259, -118.7798, 90265),
    ("Glendale", 34.1425, -118.2551, 91203),
    ("Torrance", 33.8358, -118.3406, 90503),
];

const NAME_PARTS: [&str; 10] = [
    "Rose", "Golden", "Willow", "Harbor", "Sunset", "Ivy", "Crystal", "Oak", "Bloom", "Vista",
];

/// Write a synthetic Los Angeles wedding venue dataset.
#[derive(Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Output file; `.csv` or `.parquet`
    #[arg(short, long, default_value = "data/la_wedding_venue_data_lat_long.csv")]
    output: PathBuf,

    /// Venues generated per sector
    #[arg(long, default_value_t = 12)]
    per_sector: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Column-oriented rows, in the header order of the real data file.
#[derive(Default)]
struct Venues {
    vendor_name: Vec<String>,
    sector: Vec<String>,
    price: Vec<f64>,
    region: Vec<String>,
    country: Vec<String>,
    postal_code: Vec<i64>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
}

fn generate(args: &Args) -> Venues {
    let mut rng = SimpleRng::new(args.seed);
    let mut v = Venues::default();

    for &(sector, low, high) in &SECTORS {
        let noun = sector.trim_end_matches('s');
        for _ in 0..args.per_sector {
            let &(region, lat, lon, zip) = rng.pick(&REGIONS);
            let part = rng.pick(&NAME_PARTS);
            // Round to $50 like real listings.
            let price = (rng.range(low, high) / 50.0).round() * 50.0;

            v.vendor_name.push(format!("{part} {region} {noun}"));
            v.sector.push(sector.to_string());
            v.price.push(price);
            v.region.push(region.to_string());
            v.country.push("United States".to_string());
            v.postal_code.push(zip);
            v.latitude.push(lat + rng.range(-0.03, 0.03));
            v.longitude.push(lon + rng.range(-0.03, 0.03));
        }
    }
    v
}

fn write_csv(path: &Path, v: &Venues) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "vendor name",
        "sector",
        "price",
        "region",
        "country",
        "postal code",
        "latitude",
        "longitude",
    ])?;
    for i in 0..v.sector.len() {
        writer.write_record([
            v.vendor_name[i].clone(),
            v.sector[i].clone(),
            v.price[i].to_string(),
            v.region[i].clone(),
            v.country[i].clone(),
            v.postal_code[i].to_string(),
            format!("{:.6}", v.latitude[i]),
            format!("{:.6}", v.longitude[i]),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, v: &Venues) -> Result<()> {
    let strings = |col: &[String]| StringArray::from(col.iter().map(String::as_str).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("vendor name", DataType::Utf8, false),
        Field::new("sector", DataType::Utf8, false),
        Field::new("price", DataType::Float64, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("postal code", DataType::Int64, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(&v.vendor_name)),
            Arc::new(strings(&v.sector)),
            Arc::new(Float64Array::from(v.price.clone())),
            Arc::new(strings(&v.region)),
            Arc::new(strings(&v.country)),
            Arc::new(Int64Array::from(v.postal_code.clone())),
            Arc::new(Float64Array::from(v.latitude.clone())),
            Arc::new(Float64Array::from(v.longitude.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let venues = generate(&args);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, &venues)?,
        "parquet" | "pq" => write_parquet(&args.output, &venues)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!(
        "Wrote {} venues in {} sectors to {}",
        venues.sector.len(),
        SECTORS.len(),
        args.output.display()
    );
    Ok(())
}
