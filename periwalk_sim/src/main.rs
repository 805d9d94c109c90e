//! periwalk CLI
//!
//! Run seeded random-walk simulations and report their diagnostics.

use clap::Parser;
use periwalk_sim::scenarios::PresetId;
use periwalk_sim::{
    BatchRunner, RunExport, RunSummary, SimulationDriver, ThreadSource, WalkConfig,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Periodic-box random walk simulator
#[derive(Parser, Debug)]
#[command(name = "periwalk")]
#[command(about = "Run seeded random-walk ensembles in a periodic box", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Preset to start from (reference, frozen, single, long_walk, crowd)
    #[arg(short, long, default_value = "reference")]
    preset: String,

    /// Number of seeds to run (later seeds are derived from the first)
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Draw from OS entropy instead of a seed (single run, not reproducible)
    #[arg(long)]
    entropy: bool,

    /// Override the box extent along x
    #[arg(long)]
    length_x: Option<f64>,

    /// Override the box extent along y
    #[arg(long)]
    length_y: Option<f64>,

    /// Override the particle count
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the step length
    #[arg(long)]
    step_length: Option<f64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing (logs go to stderr at warn level)
    #[arg(long)]
    json: bool,

    /// Export the full run (diagnostics + snapshots) to a JSON file
    #[arg(long)]
    export: Option<String>,
}

impl Args {
    /// Preset config with any explicit overrides applied.
    fn config(&self, preset: PresetId, seed: u64) -> WalkConfig {
        let mut config = preset.config(seed);
        if let Some(v) = self.length_x {
            config.length_x = v;
        }
        if let Some(v) = self.length_y {
            config.length_y = v;
        }
        if let Some(v) = self.particles {
            config.particle_count = v;
        }
        if let Some(v) = self.steps {
            config.number_steps = v;
        }
        if let Some(v) = self.step_length {
            config.step_length = v;
        }
        config
    }

    fn has_overrides(&self) -> bool {
        self.length_x.is_some()
            || self.length_y.is_some()
            || self.particles.is_some()
            || self.steps.is_some()
            || self.step_length.is_some()
    }

    /// Default log level. `--json` keeps stdout machine-readable.
    fn log_level(&self) -> &'static str {
        if self.json {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// CI report over a set of run summaries.
fn json_report(label: &str, summaries: &[RunSummary]) -> serde_json::Result<String> {
    let failed = summaries.iter().filter(|s| !s.passed).count();
    let report = serde_json::json!({
        "preset": label,
        "total": summaries.len(),
        "passed": summaries.len() - failed,
        "failed": failed,
        "results": summaries,
    });
    serde_json::to_string_pretty(&report)
}

/// Runs one simulation, optionally exporting it, and summarizes it.
fn run_single(args: &Args, label: &str, config: WalkConfig) -> Result<RunSummary, String> {
    let (config, result) = if args.entropy {
        let config = config.with_seed(0);
        let result = SimulationDriver::new(config.clone()).run_with_source(ThreadSource::new());
        (config, result)
    } else {
        let result = SimulationDriver::new(config.clone()).run();
        (config, result)
    };
    let result = result.map_err(|e| e.to_string())?;
    let domain = config.domain().map_err(|e| e.to_string())?;
    let summary = RunSummary::from_result(config.seed, &config, &domain, &result);

    if let Some(export_path) = &args.export {
        let export = RunExport::new(label, config, result);
        export
            .write_to_file(export_path)
            .map_err(|e| format!("Failed to write export: {}", e))?;
        info!(
            "Exported {} records to {}",
            export.result.number_steps(),
            export_path
        );
    }

    Ok(summary)
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let preset: PresetId = args.preset.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available presets: reference, frozen, single, long_walk, crowd");
        std::process::exit(1);
    });

    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };

    let config = args.config(preset, base_seed);
    let label = if args.has_overrides() { "custom" } else { preset.name() };

    if !args.json {
        info!("periwalk v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("{}: {}", preset.name(), preset.description());
    }

    let summaries = if args.export.is_some() || args.entropy {
        if args.seeds > 1 {
            eprintln!("Error: --export and --entropy only support a single run");
            std::process::exit(1);
        }
        match run_single(&args, label, config) {
            Ok(summary) => vec![summary],
            Err(e) => {
                error!("✗ {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match BatchRunner::new(config).with_seeds(args.seeds).run() {
            Ok(summaries) => summaries,
            Err(e) => {
                error!("✗ {}", e);
                std::process::exit(1);
            }
        }
    };

    let failed: Vec<&RunSummary> = summaries.iter().filter(|s| !s.passed).collect();

    if args.json {
        match json_report(label, &summaries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to encode summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        for s in &summaries {
            if s.passed {
                info!(
                    "✓ {} (seed={}) com=({:.3}, {:.3}) inertia={:.4}",
                    label,
                    s.seed,
                    s.final_center_of_mass.0,
                    s.final_center_of_mass.1,
                    s.final_moment_of_inertia
                );
            } else {
                error!(
                    "✗ {} (seed={}) FAILED: {}",
                    label,
                    s.seed,
                    s.failure_reason.as_deref().unwrap_or("unknown")
                );
            }
        }

        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if failed.is_empty() {
            info!("✅ All {} run(s) passed", summaries.len());
        } else {
            error!("❌ {}/{} run(s) failed", failed.len(), summaries.len());
        }
    }

    // Exit with proper code for CI
    if !failed.is_empty() {
        std::process::exit(1);
    }
}
