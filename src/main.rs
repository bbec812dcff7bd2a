mod app;
mod config;
mod error;
mod help;
mod ids;
mod layout;
mod logging;
mod metrics;
mod render;
mod settings;
mod sparks;
mod state;
mod terminal;
mod tree;
mod widget;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{DropSpec, PlayConfig, PrintConfig, TreeConfig, DEFAULT_DEPTH};
use settings::Settings;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "treeodds")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Terminal teaching widget: binomial possibility trees you can hand phones to", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive classmate tree
    Play {
        /// Number of classmates (tree depth, 1-10)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Write logs to this file (RUST_LOG controls the level)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the tree and metrics to stdout (no interactive display)
    Print {
        /// Number of classmates (tree depth, 1-10)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Hand out an item before printing: <leaf id or path>:<a|b>, e.g. 3:a or BAB:b. Repeatable
        #[arg(short = 'D', long = "drop")]
        drops: Vec<DropSpec>,

        /// Emit a JSON report instead of the drawing
        #[arg(short, long)]
        json: bool,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
}

/// CLI depth wins over the settings file; both are clamped
fn tree_config(cli_depth: Option<u32>, settings: &Settings) -> TreeConfig {
    let depth = cli_depth
        .or(settings.widget.default_depth)
        .unwrap_or(DEFAULT_DEPTH);
    TreeConfig::new(depth)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { depth, log_file } => {
            logging::init_file(log_file.as_deref()).context("setting up log file")?;
            let settings = Settings::load();
            let config = PlayConfig {
                tree: tree_config(depth, &settings),
                labels: settings.labels,
            };
            widget::run(config).context("running interactive widget")?;
        }
        Commands::Print {
            depth,
            drops,
            json,
            no_color,
        } => {
            logging::init_stderr().context("setting up logging")?;
            let settings = Settings::load();
            let config = PrintConfig {
                tree: tree_config(depth, &settings),
                labels: settings.labels,
                drops,
                json,
                color: !no_color && io::stdout().is_terminal(),
            };
            let mut stdout = io::stdout().lock();
            widget::run_print(&config, &mut stdout).context("printing report")?;
        }
    }

    Ok(())
}
