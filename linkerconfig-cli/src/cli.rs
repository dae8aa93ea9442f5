//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linkerconfig")]
#[command(about = "Dynamic linker namespace configuration generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render namespace descriptions into linker configuration lines
    Render(RenderArgs),

    /// Show version information
    Version,
}

#[derive(Args)]
pub struct RenderArgs {
    /// JSON file with an array of namespace descriptions ("-" for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
