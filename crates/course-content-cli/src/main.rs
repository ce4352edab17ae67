use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use course_content_config::Config;
use course_content_engine::BlockType;

mod commands;
mod source;

use source::ContentSource;

#[derive(Parser, Debug)]
#[command(name = "course-content", version, about = "Validate and inspect course content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a content file or every `.json` file in a directory
    Validate {
        path: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List lessons in display order
    Lessons { path: Option<PathBuf> },
    /// List blocks of one type (quiz, terminal, explorer)
    Blocks {
        block_type: BlockType,
        path: Option<PathBuf>,
    },
    /// Find lessons containing every query word
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

impl Command {
    fn path(&self) -> Option<&PathBuf> {
        match self {
            Command::Validate { path, .. }
            | Command::Lessons { path }
            | Command::Blocks { path, .. }
            | Command::Search { path, .. } => path.as_ref(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    // Explicit path first, then the configured one, then bundled content
    let config = match cli.command.path() {
        Some(_) => None,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Ignoring config file: {e}");
            None
        }),
    };
    let source = ContentSource::resolve(cli.command.path().cloned(), config);
    log::debug!("Using content from {source}");

    let mut out = stdout().lock();
    let success = match &cli.command {
        Command::Validate { json, .. } => commands::validate(&source, *json, &mut out)?,
        Command::Lessons { .. } => commands::lessons(&source, &mut out)?,
        Command::Blocks { block_type, .. } => commands::blocks(&source, *block_type, &mut out)?,
        Command::Search { query, .. } => commands::search(&source, &query.join(" "), &mut out)?,
    };
    out.flush()?;

    if !success {
        process::exit(1);
    }
    Ok(())
}
