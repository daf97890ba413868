//! docsite CLI - assemble and emit documentation site configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Assemble and emit documentation site configuration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the site declaration file (.toml, .yaml, .yml or .json)
    #[arg(short, long, default_value = "docsite.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter declaration and content tree
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Assemble the configuration and write the framework entry points
    Build {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Override layers applied on top of the config, in order
        #[arg(long = "overlay")]
        overlays: Vec<PathBuf>,

        /// Override the site URL
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Check that sidebar links, directories and assets exist
    Check {
        /// Override layers applied on top of the config, in order
        #[arg(long = "overlay")]
        overlays: Vec<PathBuf>,
    },

    /// Print the assembled configuration
    Print {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = PrintFormat::Json)]
        format: PrintFormat,
    },

    /// Print head injections as HTML
    Head,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PrintFormat {
    Json,
    Yaml,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            output,
            overlays,
            site_url,
        } => {
            commands::build::run(&cli.config, &overlays, site_url, &output)?;
        }
        Commands::Check { overlays } => {
            commands::check::run(&cli.config, &overlays)?;
        }
        Commands::Print { format } => {
            commands::print::run(&cli.config, format)?;
        }
        Commands::Head => {
            commands::print::head(&cli.config)?;
        }
    }

    Ok(())
}
