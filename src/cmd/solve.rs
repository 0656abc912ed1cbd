use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use rejig::config::Config;
use rejig::error::RjResult;
use rejig::optimizer::{GenerationStats, ProgressCallback};

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Scrambled input image
    pub puzzle: PathBuf,

    /// Where the reconstructed image is written
    #[arg(short, long, default_value = "solution.png")]
    pub output: PathBuf,

    /// Piece size in pixels; detected from the image when omitted
    #[arg(short = 's', long)]
    pub piece_size: Option<usize>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Wall-clock budget in seconds
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    /// Write per-generation stats to this path as JSON
    #[arg(long)]
    pub history: Option<PathBuf>,

    #[command(flatten)]
    pub config: Config,
}

struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_generation(&mut self, stats: &GenerationStats) -> bool {
        println!(
            "Gen {:4} | Best: {:.0} | Mean: {:.0} | Buddies: {:.1}%",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.buddy_ratio * 100.0
        );
        true
    }
}

pub fn run(args: SolveArgs) -> RjResult<()> {
    println!("\n🧩 Loading puzzle: {}", args.puzzle.display());
    let raster = super::load_raster(&args.puzzle)?;

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let max_time = args.time.map(Duration::from_secs);
    if args.piece_size.is_none() {
        println!("🔍 Detecting piece size...");
    }

    let solution = rejig::solve(
        &raster,
        args.piece_size,
        &args.config,
        seed,
        max_time,
        &mut ConsoleProgress,
    )?;

    if let Some(path) = &args.history {
        let json = serde_json::to_string_pretty(&solution.outcome.history)?;
        std::fs::write(path, json)?;
        println!("📈 History written to {}", path.display());
    }

    super::save_raster(&solution.render(), &args.output)?;
    println!("💾 Solution written to {}", args.output.display());

    reports::print_solution_summary(&solution, seed);
    Ok(())
}
