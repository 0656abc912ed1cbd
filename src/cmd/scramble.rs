use std::path::PathBuf;

use clap::Args;
use rejig::error::RjResult;

#[derive(Args, Debug, Clone)]
pub struct ScrambleArgs {
    /// Source image
    pub image: PathBuf,

    /// Where the scrambled puzzle is written
    #[arg(short, long, default_value = "puzzle.png")]
    pub output: PathBuf,

    /// Piece size in pixels
    #[arg(short = 's', long, default_value_t = 64)]
    pub piece_size: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: ScrambleArgs) -> RjResult<()> {
    println!("\n🧩 Loading image: {}", args.image.display());
    let raster = super::load_raster(&args.image)?;

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let puzzle = rejig::scramble(&raster, args.piece_size, seed)?;

    super::save_raster(&puzzle, &args.output)?;
    println!(
        "💾 Scrambled {}x{} grid (seed {}) written to {}",
        raster.height() / args.piece_size,
        raster.width() / args.piece_size,
        seed,
        args.output.display()
    );
    Ok(())
}
