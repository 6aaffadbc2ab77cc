//! CLI tool to break a structured script into a stored storyboard.
//!
//! Usage:
//!   scriptboard [--store-dir DIR] [--backend json|automerge] import [--input script.txt] [--title TITLE]
//!   scriptboard parse [--input script.txt]
//!   scriptboard list
//!   scriptboard show <ID>

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use scriptboard::config::DEFAULT_STORE_KEY;
use scriptboard::{SceneParser, ScriptImporter, StoreBackend, StoreConfig, Storyboard, StoredEntry};

#[derive(Parser, Debug)]
#[command(
    name = "scriptboard",
    about = "Break a structured script into storyboard scenes",
    version
)]
struct Args {
    /// Directory holding the storyboard store
    #[arg(long, env = "SCRIPTBOARD_STORE_DIR", default_value = ".")]
    store_dir: PathBuf,

    /// Storage key (file stem) of the storyboard collection
    #[arg(long, env = "SCRIPTBOARD_STORE_KEY", default_value = DEFAULT_STORE_KEY)]
    store_key: String,

    /// Storage format
    #[arg(long, env = "SCRIPTBOARD_BACKEND", value_enum, default_value_t = StoreBackend::Json)]
    backend: StoreBackend,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a script and prepend the storyboard to the store
    Import {
        /// Script file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Storyboard title
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Parse a script and print the storyboard as JSON without saving
    Parse {
        /// Script file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List stored storyboards, newest first
    List,
    /// Print the scenes of a stored storyboard
    Show {
        /// Storyboard ID
        id: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = StoreConfig::new(&args.store_dir)
        .with_key(&args.store_key)
        .with_backend(args.backend);

    match args.command {
        Command::Import { input, title } => {
            let text = read_script(input.as_ref())?;
            let mut parser = SceneParser::new();
            if let Some(title) = title {
                parser = parser.with_title(title);
            }

            let mut importer = ScriptImporter::new(config.open()).with_parser(parser);
            let status = importer.submit(Some(text.as_str()));
            if status.is_error() {
                anyhow::bail!("{}", status);
            }
            println!("{}", status);
            println!("Saved to {}", config.path().display());
        }
        Command::Parse { input } => {
            let text = read_script(input.as_ref())?;
            let board = SceneParser::new().parse(&text)?;
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
        Command::List => {
            let storyboards = config.open().load();
            if storyboards.is_empty() {
                println!("No storyboards in {}", config.path().display());
            }
            for entry in &storyboards {
                match entry {
                    StoredEntry::Storyboard(board) => println!(
                        "{}  {:<30}  {:>3} scenes  {}",
                        board.id,
                        board.title,
                        board.scene_count(),
                        board.last_edited
                    ),
                    StoredEntry::Foreign(value) => println!("(unrecognized record)  {}", value),
                }
            }
        }
        Command::Show { id } => {
            let storyboards = config.open().load();
            let board = storyboards
                .iter()
                .filter_map(StoredEntry::as_storyboard)
                .find(|b| b.id == id)
                .with_context(|| format!("Storyboard not found: {}", id))?;
            print_storyboard(board);
        }
    }

    Ok(())
}

fn read_script(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            Ok(text)
        }
    }
}

fn print_storyboard(board: &Storyboard) {
    println!("{} ({})", board.title, board.id);
    println!("Last edited: {}", board.last_edited);
    for scene in &board.scenes {
        println!();
        println!("Scene {}", scene.number);
        if !scene.vo_script.is_empty() {
            println!("  VO:    {}", scene.vo_script);
        }
        for (i, line) in scene.notes.lines().enumerate() {
            if i == 0 {
                println!("  Notes: {}", line);
            } else {
                println!("         {}", line);
            }
        }
    }
}
