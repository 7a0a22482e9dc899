use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tile_grid_core::prelude::*;
use tracing::{debug, info};

mod scenario;

#[derive(Parser, Debug)]
#[command(
    name = "tile-grid",
    about = "Lay out video-conference tiles in a container",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute one layout for a container, tile samples and a tile count
    Pack(PackArgs),
    /// Replay a scenario of host events (resize, join, leave, ...) through a stage
    Replay(ReplayArgs),
    /// Simple timing bench over random containers and samples
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Container
    /// Container width in pixels
    #[arg(long, default_value_t = 1280.0, help_heading = "Container")]
    width: f64,
    /// Container height in pixels
    #[arg(long, default_value_t = 720.0, help_heading = "Container")]
    height: f64,

    // Tiles
    /// Intrinsic tile resolution as WIDTHxHEIGHT (repeatable)
    #[arg(short, long = "sample", help_heading = "Tiles")]
    samples: Vec<String>,
    /// Number of tiles to place (defaults to the number of samples)
    #[arg(short = 'n', long, help_heading = "Tiles")]
    count: Option<usize>,

    // Algorithm
    /// Pixel rounding: truncate | exact
    #[arg(long, default_value = "truncate", help_heading = "Algorithm")]
    rounding: String,
    /// Reference sample policy: largest_area | dominant
    #[arg(long, default_value = "largest_area", help_heading = "Algorithm")]
    reference: String,
    /// YAML config file path (overrides the options above)
    #[arg(long, help_heading = "Algorithm")]
    config: Option<PathBuf>,

    // Output
    /// Output format: text | json | yaml | css
    #[arg(long, value_parser = ["text", "json", "yaml", "css"], default_value = "text", help_heading = "Output")]
    format: String,
    /// Include per-tile cell positions in text output
    #[arg(long, default_value_t = false, help_heading = "Output")]
    cells: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Output")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Output")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct ReplayArgs {
    /// Scenario file (YAML or JSON)
    input: PathBuf,
    /// Pixel rounding: truncate | exact (ignored when the scenario sets `config`)
    #[arg(long, default_value = "truncate")]
    rounding: String,
    /// Reference sample policy: largest_area | dominant
    #[arg(long, default_value = "largest_area")]
    reference: String,
    /// Output format: text | json
    #[arg(long, value_parser = ["text", "json"], default_value = "text")]
    format: String,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Number of random layouts to compute
    #[arg(long, default_value_t = 100_000)]
    iterations: u64,
    /// Maximum tile count per layout
    #[arg(long, default_value_t = 64)]
    max_tiles: usize,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Pixel rounding: truncate | exact
    #[arg(long, default_value = "truncate")]
    rounding: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Replay(args) => run_replay(args),
        Commands::Bench(b) => run_bench(b, cli.progress && !cli.quiet),
    }
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let mut cfg = PackerConfig {
        rounding: parse_rounding(&cli.rounding)?,
        reference: parse_reference(&cli.reference)?,
    };
    let mut container = Container::new(cli.width, cli.height);
    let mut samples = parse_samples(&cli.samples)?;
    let mut count = cli.count;

    // Config file overrides individual options
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = y.apply(cfg, &mut container, &mut samples, &mut count)?;
    }

    if cli.print_config {
        println!("{}", render_config(&cfg, &cli.print_config_format)?);
        return Ok(());
    }

    let n = count.unwrap_or(samples.len());
    info!(n, samples = samples.len(), "packing");
    let layout = pack_with_config(Some(container), &samples, n, cfg)
        .with_context(|| format!("pack {n} tiles into {}x{}", container.width, container.height))?;

    match cli.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&to_json(&layout))?),
        "yaml" => println!("{}", serde_yaml::to_string(&layout)?),
        "css" => println!("{}", TileStyle::from_layout(&layout).css()),
        _ => {
            println!(
                "tile={:.2}x{:.2} grid={}x{} fallback={}",
                layout.tile.width, layout.tile.height, layout.columns, layout.rows, layout.fallback
            );
            println!("{}", layout.stats().summary());
            if cli.cells {
                for c in layout.cells() {
                    println!(
                        "  #{:<3} x={:.2} y={:.2} w={:.2} h={:.2}",
                        c.index, c.x, c.y, c.width, c.height
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_replay(cli: &ReplayArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("read scenario {}", cli.input.display()))?;
    let scenario = scenario::parse(&text)?;
    let cfg = PackerConfig {
        rounding: parse_rounding(&cli.rounding)?,
        reference: parse_reference(&cli.reference)?,
    };
    info!(events = scenario.events.len(), "replaying scenario");
    let steps = scenario::replay(&scenario, cfg)?;

    if cli.format == "json" {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }
    for step in &steps {
        let outcome = match (&step.layout, &step.skipped) {
            (Some(l), _) => format!(
                "tile={:.2}x{:.2} grid={}x{}{}",
                l.tile.width,
                l.tile.height,
                l.columns,
                l.rows,
                if l.fallback { " (fallback)" } else { "" }
            ),
            (None, Some(reason)) => format!("skipped: {reason}"),
            (None, None) => "no layout pass".to_string(),
        };
        println!(
            "#{:<3} {:<40} tiles={} gen={} {}",
            step.index,
            format!("{:?}", step.event),
            step.tiles,
            step.generation,
            outcome
        );
    }
    Ok(())
}

fn run_bench(cli: &BenchArgs, show_progress: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    if cli.max_tiles == 0 {
        anyhow::bail!("--max-tiles must be at least 1");
    }
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    debug!(seed, "bench rng");
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let packer = TilePacker::new(PackerConfig {
        rounding: parse_rounding(&cli.rounding)?,
        ..Default::default()
    });

    let bar = if show_progress {
        let b = ProgressBar::new(cli.iterations);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} packing {pos}/{len} [{elapsed_precise}]",
        )?);
        Some(b)
    } else {
        None
    };

    let mut elapsed = Duration::ZERO;
    let mut fallbacks = 0u64;
    for i in 0..cli.iterations {
        let container = Container::new(
            rng.gen_range(160..=3840) as f64,
            rng.gen_range(90..=2160) as f64,
        );
        let sample = TileSample::new(
            rng.gen_range(160..=1920) as f64,
            rng.gen_range(120..=1080) as f64,
        );
        let n = rng.gen_range(1..=cli.max_tiles);
        let start = Instant::now();
        let layout = packer.pack(Some(container), &[sample], n)?;
        elapsed += start.elapsed();
        if layout.fallback {
            fallbacks += 1;
        }
        if let Some(b) = &bar {
            if i % 1024 == 0 {
                b.set_position(i);
            }
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    let avg = per_call(elapsed, cli.iterations);
    let fallback_pct = if cli.iterations > 0 {
        fallbacks as f64 / cli.iterations as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "iterations={} seed={} fallback={:.2}% total={} per_call={}",
        cli.iterations,
        seed,
        fallback_pct,
        fmt_dur(elapsed),
        fmt_dur(avg)
    );
    Ok(())
}

fn per_call(elapsed: Duration, iterations: u64) -> Duration {
    if iterations == 0 {
        return Duration::ZERO;
    }
    elapsed.div_f64(iterations as f64)
}

fn render_config(cfg: &PackerConfig, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "yaml" => serde_yaml::to_string(cfg)?,
        _ => serde_json::to_string_pretty(cfg)?,
    })
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}ns", d.as_nanos())
    }
}

fn parse_samples(list: &[String]) -> anyhow::Result<Vec<TileSample>> {
    list.iter()
        .map(|s| s.parse::<TileSample>().with_context(|| format!("sample {s:?}")))
        .collect()
}

fn parse_rounding(s: &str) -> anyhow::Result<Rounding> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown rounding: {}", s))
}

fn parse_reference(s: &str) -> anyhow::Result<ReferencePolicy> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown reference policy: {}", s))
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    rounding: Option<String>,
    reference: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    samples: Option<Vec<String>>,
    count: Option<usize>,
}

impl YamlConfig {
    fn apply(
        self,
        mut cfg: PackerConfig,
        container: &mut Container,
        samples: &mut Vec<TileSample>,
        count: &mut Option<usize>,
    ) -> anyhow::Result<PackerConfig> {
        if let Some(v) = self.rounding {
            cfg.rounding = parse_rounding(&v)?;
        }
        if let Some(v) = self.reference {
            cfg.reference = parse_reference(&v)?;
        }
        if let Some(v) = self.width {
            container.width = v;
        }
        if let Some(v) = self.height {
            container.height = v;
        }
        if let Some(v) = self.samples {
            *samples = parse_samples(&v)?;
        }
        if let Some(v) = self.count {
            *count = Some(v);
        }
        Ok(cfg)
    }
}
