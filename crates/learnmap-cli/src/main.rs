use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use learnmap_core::config::LOCAL_CONFIG_FILE;
use learnmap_core::Config;

mod commands;
mod export;
mod logging;
mod tui;

#[derive(Parser)]
#[command(name = "learnmap")]
#[command(about = "Explore curriculum knowledge graphs and learning paths", long_about = None)]
struct Cli {
    /// Config file to use instead of learnmap.toml / the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default learnmap.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List curriculum stages
    Stages,
    /// Show the knowledge points of a stage
    Show {
        /// Grade description, e.g. "初二" or "高一"
        #[arg(short, long)]
        grade: Option<String>,
    },
    /// Show direct prerequisites of a knowledge point
    Prereqs {
        /// Knowledge point label
        label: String,
        #[arg(short, long)]
        grade: Option<String>,
    },
    /// Suggest a learning path towards a knowledge point
    Path {
        /// Knowledge point label
        label: String,
        #[arg(short, long)]
        grade: Option<String>,
        /// Walk all transitive prerequisites in dependency order
        #[arg(long)]
        deep: bool,
    },
    /// Export a stage graph as JSON
    Export {
        #[arg(short, long)]
        grade: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read or record mastery levels
    Mastery {
        #[command(subcommand)]
        action: MasteryAction,
    },
    /// Open the interactive graph view
    View {
        #[arg(short, long)]
        grade: Option<String>,
    },
}

#[derive(Subcommand)]
enum MasteryAction {
    /// Record a mastery level (0.0 - 1.0) for a node id
    Set {
        id: String,
        level: f32,
        #[arg(short, long)]
        grade: Option<String>,
    },
    /// List recorded mastery levels
    List {
        #[arg(short, long)]
        grade: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // `init` must work even when the existing config file does not parse.
    if let Commands::Init { force } = cli.command {
        return commands::init(Path::new(LOCAL_CONFIG_FILE), force);
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let interactive = matches!(cli.command, Commands::View { .. });
    logging::init(&config.storage, cli.verbose, interactive)?;

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Stages => commands::stages(&config),
        Commands::Show { grade } => commands::show(&config, grade.as_deref()),
        Commands::Prereqs { label, grade } => commands::prereqs(&config, &label, grade.as_deref()),
        Commands::Path { label, grade, deep } => {
            commands::path(&config, &label, grade.as_deref(), deep)
        }
        Commands::Export { grade, output } => {
            commands::export(&config, grade.as_deref(), output.as_deref())
        }
        Commands::Mastery { action } => match action {
            MasteryAction::Set { id, level, grade } => {
                commands::mastery_set(&config, &id, level, grade.as_deref())
            }
            MasteryAction::List { grade } => commands::mastery_list(&config, grade.as_deref()),
        },
        Commands::View { grade } => {
            let session = commands::Session::open(&config, grade.as_deref())?;
            tui::run(config, session).await
        }
    }
}
