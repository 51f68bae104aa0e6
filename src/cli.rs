// src/cli.rs
use anyhow::{Context as _, Result, anyhow, bail};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::config::Settings;
use crate::session::{CollectOutcome, Session};
use crate::utils::{normalize_output_filename, normalize_path, print_collection};
use crate::vault::Vault;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Note to start collecting from, as a path inside the vault
    pub note: String,

    /// Vault directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// How many links deep to collect notes (1-10)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Also collect notes that link to collected notes
    #[arg(long, conflicts_with = "no_backlinks")]
    pub backlinks: bool,

    /// Only follow links written in collected notes
    #[arg(long)]
    pub no_backlinks: bool,

    /// Paths to exclude (comma-separated, folders end with '/')
    #[arg(short, long, default_value = "")]
    pub exclude: String,

    /// Output filename inside the vault
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the export to stdout instead of saving it
    #[arg(short, long)]
    pub copy: bool,

    /// Only print word statistics
    #[arg(short, long)]
    pub stats: bool,

    /// List collected notes by depth
    #[arg(short, long)]
    pub list: bool,

    /// Write the note graph as JSON to this file
    #[arg(short, long)]
    pub graph: Option<PathBuf>,
}

impl Args {
    /// Layers command-line flags over loaded settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting settings are invalid.
    pub fn apply_to(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if self.backlinks {
            settings.include_backlinks = true;
        }
        if self.no_backlinks {
            settings.include_backlinks = false;
        }
        settings.exclude_paths.extend(
            self.exclude
                .split(',')
                .map(normalize_path)
                .filter(|p| !p.is_empty()),
        );
        if let Some(output) = &self.output {
            settings.output_file = normalize_output_filename(output);
        }
        settings.validate()?;
        Ok(settings)
    }
}

pub fn run(args: Args) -> Result<()> {
    let vault = Vault::open(&args.directory)
        .with_context(|| format!("Failed to open vault: {}", args.directory.display()))?;
    let settings = args.apply_to(Settings::load(vault.root())?)?;

    let start = vault
        .document(&args.note)
        .cloned()
        .ok_or_else(|| anyhow!("Note not found in vault: {}", args.note))?;
    if !start.is_collectable() {
        bail!("Not a markdown note: {}", start.path);
    }

    let session = Session::new(start, settings, &vault);
    let summary = match session.collect()? {
        CollectOutcome::Collected(summary) => summary,
        CollectOutcome::Busy => return Ok(()),
    };

    if args.list {
        if let Some(records) = session.records() {
            print_collection(&records);
        }
    }

    if let Some(graph_path) = &args.graph {
        let graph = session.graph().unwrap_or_default();
        let json = serde_json::to_string_pretty(&graph)?;
        fs::write(graph_path, json)
            .with_context(|| format!("Failed to write graph: {}", graph_path.display()))?;
    }

    if args.stats {
        println!("Collected {} notes.", summary.count);
        println!("{}", summary.stats);
        return Ok(());
    }

    eprintln!("Collected {} notes.", summary.count);
    eprintln!("{}", summary.stats);
    if args.copy {
        session.copy_to_clipboard()?;
    } else {
        session.save_to_file(args.output.as_deref())?;
    }

    Ok(())
}
