use clap::{Parser, Subcommand};

use crate::adjust::{AdjustArgs, NearestArgs, run_adjust, run_nearest};
use crate::error::Result;
use crate::palettes::run_palettes;
use crate::resolve::{ResolveArgs, run_resolve};

#[derive(Debug, Parser)]
#[command(
    name = "brandtint",
    about = "Derive light and dark accent palettes from a single brand color",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve every role from a JSON color configuration.
    Resolve(ResolveArgs),

    /// Print the built-in reference palettes.
    Palettes,

    /// Apply one base -> target deviation to a custom color.
    Adjust(AdjustArgs),

    /// Show which reference palette a color binds to.
    Nearest(NearestArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve(args) => run_resolve(args),
        Commands::Palettes => run_palettes(),
        Commands::Adjust(args) => run_adjust(args),
        Commands::Nearest(args) => run_nearest(args),
    }
}
