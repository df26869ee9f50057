use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;

#[derive(Parser)]
#[command(name = "chromoview")]
#[command(about = "ChromoView - interactive chromosome diagrams")]
#[command(version)]
#[command(long_about = "
ChromoView draws chromosomes with their centromeres and maps clicks on a
chromosome to the base-pair range and genetic elements under the pointer.

Examples:
  chromoview bands --chromosomes tair10.json --id Chr1
  chromoview locate --chromosomes tair10.json --genes TAIR10.gff3 --id Chr1 --y 250 --height 500
  chromoview render --chromosomes tair10.json --output chromosomes.svg
  chromoview replay --chromosomes tair10.json --genes TAIR10.gff3 --events session.json
  chromoview config --output chromoview.toml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the composed bands of each chromosome as JSON
    Bands {
        /// Chromosome metadata JSON
        #[arg(short, long)]
        chromosomes: PathBuf,

        /// Only this chromosome
        #[arg(long)]
        id: Option<String>,
    },

    /// Map a screen y-coordinate to a base-pair range and list its genes
    Locate {
        /// Chromosome metadata JSON
        #[arg(short, long)]
        chromosomes: PathBuf,

        /// GFF3 gene annotations
        #[arg(short, long)]
        genes: PathBuf,

        /// Chromosome id
        #[arg(long)]
        id: String,

        /// Click y-coordinate in screen pixels
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Top edge of the painted chromosome
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        top: f64,

        /// Painted height (defaults to the glyph height at zoom 1.0)
        #[arg(long)]
        height: Option<f64>,
    },

    /// Export the chromosome diagram to SVG
    Render {
        /// Chromosome metadata JSON
        #[arg(short, long)]
        chromosomes: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// Width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Diagram title
        #[arg(long)]
        title: Option<String>,

        /// Highlight a range, e.g. "Chr1:15183347-15244324"
        #[arg(long)]
        select: Option<String>,
    },

    /// Drive a viewer session from a JSON event script
    Replay {
        /// Chromosome metadata JSON
        #[arg(short, long)]
        chromosomes: PathBuf,

        /// GFF3 gene annotations
        #[arg(short, long)]
        genes: Option<PathBuf>,

        /// Event script
        #[arg(short, long)]
        events: PathBuf,
    },

    /// Write the effective configuration as TOML
    Config {
        /// Output file
        #[arg(short, long, default_value = "chromoview.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Bands { chromosomes, id } => {
            commands::bands::execute(&config, chromosomes, id)?;
        }
        Commands::Locate {
            chromosomes,
            genes,
            id,
            y,
            top,
            height,
        } => {
            commands::locate::execute(&config, chromosomes, genes, id, y, top, height)?;
        }
        Commands::Render {
            chromosomes,
            output,
            width,
            height,
            title,
            select,
        } => {
            commands::render::execute(&config, chromosomes, output, width, height, title, select)?;
        }
        Commands::Replay {
            chromosomes,
            genes,
            events,
        } => {
            commands::replay::execute(&config, chromosomes, genes, events)?;
        }
        Commands::Config { output } => {
            config.save_to_file(&output)?;
            log::info!("Wrote configuration to {}", output.display());
        }
    }

    Ok(())
}
