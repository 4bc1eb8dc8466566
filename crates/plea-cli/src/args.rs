use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for the plea binary.
#[derive(Parser, Debug, Default)]
#[command(name = "plea", version, about = "Front-end for the plea proof language")]
pub struct CliArgs {
    /// Source files to process, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Emit the parsed declarations as JSON instead of the listing.
    #[arg(long = "emit-ast")]
    pub emit_ast: bool,

    /// Suppress the per-declaration listing.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Minimum capacity in bytes for newly created arena regions.
    #[arg(long = "min-region-cap")]
    pub min_region_cap: Option<usize>,
}
