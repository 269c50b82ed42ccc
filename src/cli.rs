use std::path::PathBuf;

use clap::Parser;

/// Convert a PGM heightmap into a closed ASCII STL solid.
#[derive(Debug, Parser)]
#[command(name = "hmstl", version)]
pub struct Cli {
    /// Z scale: heightmap units per XY unit, must be > 0 [default: 1.0]
    #[arg(short = 'z', long, value_name = "ZSCALE", allow_negative_numbers = true)]
    pub scale: Option<f32>,

    /// Base height added under the scaled surface, must be >= 1 [default: 1.0]
    #[arg(
        short = 'b',
        long = "base",
        value_name = "BASEHEIGHT",
        allow_negative_numbers = true
    )]
    pub offset: Option<f32>,

    /// Input PGM file (default: stdin)
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output STL file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report heightmap details on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Solid name written to the STL header and footer [default: mymesh]
    #[arg(short, long)]
    pub name: Option<String>,

    /// TOML config file; command-line flags take precedence
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}
