//! gradecalc CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradecalc", version, about = "GPA and CGPA calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a GPA or CGPA from a sheet file
    Calc {
        /// Path to a .toml sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Output format: text, json, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory for json/html (json prints to stdout without it)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate sheet files and list rows that will be left out
    Validate {
        /// Path to a sheet file or directory
        #[arg(long)]
        sheet: PathBuf,
    },

    /// Export the plain-text report for a sheet
    Export {
        /// Path to a .toml sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the report instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the short result summary
    Copy {
        /// Path to a .toml sheet
        #[arg(long)]
        sheet: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Interactive calculator that updates after every edit
    Live {
        /// Calculator: gpa or cgpa (defaults to the configured default_mode)
        #[arg(long)]
        mode: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the grading scales
    Scale,

    /// Create starter config and example sheets
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradecalc=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calc {
            sheet,
            format,
            output,
            config,
        } => commands::calc::execute(sheet, format, output, config),
        Commands::Validate { sheet } => commands::validate::execute(sheet),
        Commands::Export {
            sheet,
            output,
            stdout,
            config,
        } => commands::export::execute(sheet, output, stdout, config).await,
        Commands::Copy { sheet, config } => commands::export::copy(sheet, config).await,
        Commands::Live { mode, config } => commands::live::execute(mode, config).await,
        Commands::Scale => commands::scale::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
