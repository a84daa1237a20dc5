//! Cave terrain generator: builds the height line, luminance field and
//! occupancy grid for one parameter set and writes them as JSON.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use octet_core::{Adjustment, TerrainGenerator, TerrainParams};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "terrain", about = "Generate fBM cave terrain")]
struct Args {
    /// JSON parameter file. Missing fields take their defaults.
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Seed for choosing the height-line row.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Use this height-line row instead of a random one.
    #[arg(short, long)]
    row: Option<u32>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Tuning steps applied after loading, e.g. `more-octaves`.
    #[arg(short, long, value_parser = parse_adjustment)]
    adjust: Vec<Adjustment>,

    /// Write the terrain as JSON here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the occupancy grid as ASCII.
    #[arg(long)]
    preview: bool,
}

fn parse_adjustment(s: &str) -> Result<Adjustment, String> {
    let adjustment = match s {
        "more-octaves" => Adjustment::MoreOctaves,
        "fewer-octaves" => Adjustment::FewerOctaves,
        "raise-threshold" => Adjustment::RaiseThreshold,
        "lower-threshold" => Adjustment::LowerThreshold,
        "increase-scale" => Adjustment::IncreaseScale,
        "decrease-scale" => Adjustment::DecreaseScale,
        "increase-persistence" => Adjustment::IncreasePersistence,
        "decrease-persistence" => Adjustment::DecreasePersistence,
        other => return Err(format!("unknown adjustment `{other}`")),
    };
    Ok(adjustment)
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            TerrainParams::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => TerrainParams::default(),
    };
    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }

    let mut generator = TerrainGenerator::new(params).context("invalid terrain parameters")?;
    for &step in &args.adjust {
        if !generator.adjust(step) {
            info!(?step, "adjustment already at its limit");
        }
    }

    let row = match args.row {
        Some(row) => row,
        None => generator.random_height_row(&mut StdRng::seed_from_u64(args.seed)),
    };

    let p = generator.params();
    info!(
        width = p.width,
        height = p.height,
        octaves = p.octaves,
        persistence = p.persistence,
        scale = p.scale,
        threshold = p.luminance_threshold,
        row,
        "generating terrain"
    );
    let terrain = generator.generate(row);
    info!(
        solid = terrain.occupancy.solid_count(),
        fraction = terrain.occupancy.solid_fraction(),
        "done"
    );

    if args.preview {
        println!("{}", terrain.occupancy.to_ascii());
    }

    if let Some(path) = &args.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string(&terrain)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote terrain");
    }

    Ok(())
}
