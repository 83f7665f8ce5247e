use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use harvestmap::capture::load_boundary;
use harvestmap::config::FileConfig;
use harvestmap::domain::{SampledPoint, Section};
use harvestmap::geometry::{MapRegion, area_hectares};
use harvestmap::observation::{
    DEFAULT_SECTIONS, ObservationPoint, SamplingPlan, SectionStrategy, generate_points,
    get_or_generate, sections_for_points,
};
use harvestmap::render::{CanvasSize, render_section_map, write_svg};
use harvestmap::sampling::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SEPARATION_M, SectionSampler};
use harvestmap::store::JsonFileStore;

/// Partition a farm boundary into inspection sections and pick observation points
///
/// Examples:
///   # Six wedge sections with the default 100m separation
///   harvestmap -b farm.json
///
///   # Reproducible run written to JSON and an SVG section map
///   harvestmap -b farm.json -n 8 --seed 42 -o points.json --svg map.svg
///
///   # Vertical strips instead of wedges
///   harvestmap -b farm.json --strategy strip -n 5
///
///   # Keep points per farm; later runs reuse them
///   harvestmap -b farm.json --store points/ --farm-id 12
#[derive(Parser, Debug)]
#[command(name = "harvestmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches harvestmap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boundary capture JSON (list of {latitude, longitude} records)
    #[arg(short = 'b', long)]
    boundary: Option<PathBuf>,

    /// Number of inspection sections
    #[arg(short = 'n', long, default_value = "6")]
    sections: usize,

    /// Sectioning strategy: wedge or strip
    #[arg(long, value_enum, default_value = "wedge")]
    strategy: SectionStrategy,

    /// Minimum distance between observation points in meters
    #[arg(long, default_value = "100.0")]
    min_separation: f64,

    /// Draws per section before accepting a closer point
    #[arg(long, default_value = "50")]
    max_attempts: usize,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Write observation points as JSON
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Write an SVG section map
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Directory of per-farm observation point files
    #[arg(long)]
    store: Option<PathBuf>,

    /// Farm identifier (defaults to the one in the boundary file)
    #[arg(long)]
    farm_id: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let boundary_path = args
        .boundary
        .clone()
        .or_else(|| file_config.boundary.clone());
    let sections = if args.sections != DEFAULT_SECTIONS {
        args.sections
    } else {
        file_config.sections
    };
    let strategy = if args.strategy != SectionStrategy::Wedge {
        args.strategy
    } else {
        file_config.strategy
    };
    let min_separation = if (args.min_separation - DEFAULT_MIN_SEPARATION_M).abs() > 1e-9 {
        args.min_separation
    } else {
        file_config.min_separation_m
    };
    let max_attempts = if args.max_attempts != DEFAULT_MAX_ATTEMPTS {
        args.max_attempts
    } else {
        file_config.max_attempts
    };
    let seed = args.seed.or(file_config.seed);
    let output = args.output.clone().or_else(|| file_config.output.clone());
    let svg_path = args.svg.clone().or_else(|| file_config.svg.clone());
    let store_dir = args.store.clone().or_else(|| file_config.store_dir.clone());
    let verbose = args.verbose || file_config.verbose;
    let canvas = file_config.canvas();

    let Some(boundary_path) = boundary_path else {
        bail!("Must provide a boundary file with --boundary/-b or `boundary` in the config file");
    };

    let plan = SamplingPlan {
        strategy,
        sections,
        sampler: SectionSampler::new(min_separation, max_attempts),
    };

    println!("harvestmap - Inspection Section Planner");
    println!("=======================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Boundary: {}", boundary_path.display());
        println!("  Strategy: {:?}", strategy);
        println!("  Sections: {}", sections);
        println!("  Min separation: {}m", min_separation);
        println!("  Max attempts: {}", max_attempts);
        match seed {
            Some(s) => println!("  Seed: {}", s),
            None => println!("  Seed: random"),
        }
        println!();
    }

    let spinner = create_spinner("Loading boundary...");
    let start = Instant::now();
    let report = load_boundary(&boundary_path).context("Failed to load boundary file")?;
    spinner.finish_with_message(format!(
        "Loaded {} boundary points ({} invalid skipped) [{:.1}s]",
        report.boundary.len(),
        report.dropped,
        start.elapsed().as_secs_f32()
    ));

    let boundary = report.boundary;
    if !boundary.is_valid() {
        bail!(
            "Not enough valid boundary points ({}). Add at least 3 boundary points to the farm.",
            boundary.len()
        );
    }
    let farm_id = args.farm_id.or(file_config.farm_id).or(report.farm_id);

    println!("  Area: {:.2} ha", area_hectares(&boundary.vertices));
    if verbose && let Some(region) = MapRegion::fit(&boundary.vertices) {
        println!(
            "  Region: ({:.5}, {:.5}) span {:.5} x {:.5} deg",
            region.latitude, region.longitude, region.latitude_delta, region.longitude_delta
        );
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let spinner = create_spinner("Generating observation points...");
    let start = Instant::now();
    let points = match store_dir {
        Some(ref dir) => {
            let Some(farm_id) = farm_id else {
                bail!("--store requires --farm-id (or a farm_id in the boundary file)");
            };
            let mut store = JsonFileStore::open(dir).context("Failed to open observation store")?;
            get_or_generate(&mut store, farm_id, &boundary, &plan, &mut rng)
                .context("Failed to get or generate observation points")?
        }
        None => generate_points(farm_id.unwrap_or_default(), &boundary, &plan, &mut rng)
            .context("Failed to generate observation points")?,
    };
    spinner.finish_with_message(format!(
        "Placed {} observation points [{:.1}s]",
        points.len(),
        start.elapsed().as_secs_f32()
    ));

    if let Some(ref path) = output {
        let json = serde_json::to_string_pretty(&points)
            .context("Failed to serialize observation points")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write points file: {}", path.display()))?;
    }

    if let Some(ref path) = svg_path {
        let spinner = create_spinner("Rendering section map...");
        let sections = sections_for_points(&boundary, strategy, &points)
            .context("Failed to partition boundary")?;
        let svg = render_map(&boundary, &sections, &points, canvas);
        write_svg(path, &svg)?;
        spinner.finish_with_message(format!("Wrote section map to {}", path.display()));
    }

    println!();
    println!("Sections: {}", points.len());
    print_points(&points);
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    if let Some(ref path) = output {
        println!("Output: {}", path.display());
    }

    Ok(())
}

fn render_map(
    boundary: &harvestmap::BoundaryPolygon,
    sections: &[Section],
    points: &[ObservationPoint],
    canvas: CanvasSize,
) -> String {
    let sampled: Vec<SampledPoint> = points
        .iter()
        .map(|p| SampledPoint::new(p.position(), p.segment.saturating_sub(1)))
        .collect();
    render_section_map(boundary, sections, &sampled, canvas)
}

fn print_points(points: &[ObservationPoint]) {
    if points.is_empty() {
        println!("No section markers to display.");
        return;
    }

    let completed = points.iter().filter(|p| p.is_completed()).count();
    println!("Observation points ({}/{} completed):", completed, points.len());
    for p in points {
        println!(
            "  {}: lat {:.5}, lon {:.5} (status: {:?})",
            p.name, p.latitude, p.longitude, p.observation_status
        );
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
