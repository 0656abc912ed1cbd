use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconstruct a scrambled image
    Solve(cmd::solve::SolveArgs),
    /// Cut an image into pieces and shuffle them
    Scramble(cmd::scramble::ScrambleArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Scramble(args) => cmd::scramble::run(args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
