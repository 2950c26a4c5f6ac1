//! Alsvid Command-Line Interface
//!
//! Decodes surface-code syndromes from the command line: point it at a
//! base-lattice edge list, hand it the defect identifiers, and it prints
//! the recovery chains.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::decode;

/// Alsvid - minimum-weight matching decoder for surface codes
#[derive(Debug, Parser)]
#[command(name = "alsvid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode a noisy multi-round syndrome
    Decode {
        /// Base-lattice edge list file (one edge per line)
        #[arg(short, long)]
        lattice: String,

        /// Code distance (odd, >= 3)
        #[arg(short, long, value_parser = parse_distance)]
        distance: u32,

        /// Number of measurement rounds (> 2)
        #[arg(short, long)]
        cycles: u32,

        /// Defect node identifiers (comma-separated)
        #[arg(short = 'f', long, value_delimiter = ',')]
        defects: Vec<u32>,

        /// Weight bound for the matching inversion; defaults to the
        /// total lattice node count
        #[arg(long)]
        max_edge_value: Option<f64>,

        /// Emit the recovery chains as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode the final noiseless round against the prepared code space
    Ideal {
        /// Base-lattice edge list file (one edge per line)
        #[arg(short, long)]
        lattice: String,

        /// Code distance (odd, >= 3)
        #[arg(short, long, value_parser = parse_distance)]
        distance: u32,

        /// Defect node identifiers (comma-separated)
        #[arg(short = 'f', long, value_delimiter = ',')]
        defects: Vec<u32>,

        /// Weight bound for the matching inversion; defaults to the
        /// total lattice node count
        #[arg(long)]
        max_edge_value: Option<f64>,

        /// Emit the recovery chains as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Surface codes only exist at odd distances of at least 3; anything
/// else would describe a geometrically meaningless lattice.
fn parse_distance(s: &str) -> Result<u32, String> {
    let distance: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not an integer"))?;
    if distance < 3 || distance % 2 == 0 {
        return Err(format!(
            "code distance must be odd and at least 3, got {distance}"
        ));
    }
    Ok(distance)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decode {
            lattice,
            distance,
            cycles,
            defects,
            max_edge_value,
            json,
        } => decode::noisy(&lattice, distance, cycles, &defects, max_edge_value, json),
        Commands::Ideal {
            lattice,
            distance,
            defects,
            max_edge_value,
            json,
        } => decode::ideal(&lattice, distance, &defects, max_edge_value, json),
    }
}
