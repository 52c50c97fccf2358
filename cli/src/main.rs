mod error_formatter;
mod formatter;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deduce::Engine;
use formatter::{BatchEntry, BatchOutcome, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "deduce")]
#[command(about = "Backward-chaining inference over propositional rules.")]
#[command(
    long_about = "Deduce reads a rule file (rules, an initial fact line and a query line) and answers every query with true, false or undetermined.\nSymbols nobody can prove are false; rules that force opposite values onto a symbol are reported as a contradiction."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rule file and display the query results
    ///
    /// Loads the file, optionally replaces its fact and query lines, and runs
    /// the inference engine.
    Run {
        /// Rule file to evaluate
        file: PathBuf,
        /// Initial facts, replacing the file's fact line
        ///
        /// Example: -f ABG
        #[arg(short = 'f', long)]
        facts: Option<String>,
        /// Queries, replacing the file's query line
        ///
        /// Example: -q GVX
        #[arg(short = 'q', long)]
        queries: Option<String>,
        /// Output raw values only (for piping to other tools)
        #[arg(short = 'r', long, conflicts_with = "json")]
        raw: bool,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
        /// Show how every value was derived
        #[arg(short = 'e', long)]
        explain: bool,
    },
    /// Show program structure
    ///
    /// Lists the normalized rules, facts, queries and, per symbol, the rules
    /// that can produce it.
    Show {
        /// Rule file to inspect
        file: PathBuf,
    },
    /// Evaluate every rule file under a directory
    ///
    /// Prints one summary line per file. Exits with status 1 when any file
    /// fails to load or evaluate.
    Batch {
        /// Directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,
        /// File extension of rule files
        #[arg(long, default_value = "txt")]
        ext: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deduce=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            file,
            facts,
            queries,
            raw,
            json,
            explain,
        } => run_command(
            file,
            facts.as_deref(),
            queries.as_deref(),
            *raw,
            *json,
            *explain,
        ),
        Commands::Show { file } => show_command(file),
        Commands::Batch { root, ext } => batch_command(root, ext),
    };

    if let Err(e) = result {
        // Check if it's a DeduceError and format it nicely, otherwise use default
        if let Some(deduce_err) = e.downcast_ref::<deduce::DeduceError>() {
            eprintln!("{}", error_formatter::format_error(deduce_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run_command(
    file: &Path,
    facts: Option<&str>,
    queries: Option<&str>,
    raw: bool,
    json: bool,
    explain: bool,
) -> Result<()> {
    let mut engine = load_engine(file)?;

    if let Some(facts) = facts {
        let names = deduce::parse_symbols(facts)?;
        debug!(?names, "replacing facts");
        engine.set_facts(&names)?;
    }
    if let Some(queries) = queries {
        let names = deduce::parse_symbols(queries)?;
        if names.is_empty() {
            anyhow::bail!("No queries given");
        }
        debug!(?names, "replacing queries");
        engine.set_queries(&names)?;
    }

    let response = engine.evaluate()?;

    if json {
        println!("{}", response.to_json()?);
        return Ok(());
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_response(&response, raw, explain));

    Ok(())
}

fn show_command(file: &Path) -> Result<()> {
    let engine = load_engine(file)?;
    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_program_inspection(engine.program(), engine.index())
    );
    Ok(())
}

fn batch_command(root: &Path, ext: &str) -> Result<()> {
    info!(root = %root.display(), ext, "scanning for rule files");

    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some(ext)
        {
            paths.push(entry.into_path());
        }
    }

    let entries: Vec<BatchEntry> = paths
        .into_iter()
        .map(|path| {
            let outcome = match load_engine(&path).and_then(|mut engine| {
                engine.evaluate().map_err(anyhow::Error::from)
            }) {
                Ok(response) => BatchOutcome::Answered(response.queries),
                Err(e) => BatchOutcome::Failed(first_line(&e)),
            };
            BatchEntry { path, outcome }
        })
        .collect();

    let formatter = Formatter::default();
    print!("{}", formatter.format_batch_summary(&entries));

    let failures = entries
        .iter()
        .filter(|e| matches!(e.outcome, BatchOutcome::Failed(_)))
        .count();
    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, entries.len());
    }
    Ok(())
}

/// Read and validate one rule file
fn load_engine(file: &Path) -> Result<Engine> {
    let source_id = file.to_string_lossy().to_string();
    let code = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let engine = Engine::from_source(&code, &source_id)?;
    debug!(
        file = %source_id,
        rules = engine.program().rules.len(),
        symbols = engine.program().symbols.len(),
        "loaded program"
    );
    Ok(engine)
}

fn first_line(e: &anyhow::Error) -> String {
    let message = match e.downcast_ref::<deduce::DeduceError>() {
        Some(deduce_err) => deduce_err.to_string(),
        None => format!("{:#}", e),
    };
    message.lines().next().unwrap_or_default().to_string()
}
