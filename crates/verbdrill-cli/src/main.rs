//! verbdrill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verbdrill", version, about = "Verb conjugation drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drill a shuffled verb table interactively
    Play {
        /// Quiz mode: random, infinitive, past_simple, past_participle, translation
        #[arg(long)]
        mode: Option<String>,

        /// Verb list TOML file or directory (default: built-in list)
        #[arg(long)]
        verbs: Option<PathBuf>,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Only drill the first N shuffled verbs
        #[arg(long)]
        limit: Option<usize>,

        /// Directory to write a JSON session report into
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the final table as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a verb list as a table
    List {
        /// Verb list TOML file or directory (default: built-in list)
        #[arg(long)]
        verbs: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate verb list TOML files
    Validate {
        /// Path to verb list file or directory
        #[arg(long)]
        verbs: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example verb list
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("verbdrill=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            mode,
            verbs,
            seed,
            limit,
            output,
            html,
            config,
        } => commands::play::execute(commands::play::PlayArgs {
            mode,
            verbs,
            seed,
            limit,
            output,
            html,
            config,
        }),
        Commands::List {
            verbs,
            config,
            format,
        } => commands::list::execute(verbs, config, format),
        Commands::Validate { verbs, config } => commands::validate::execute(verbs, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
