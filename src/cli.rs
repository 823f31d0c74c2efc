//! CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use fradigitize::config::DigitizeConfig;
use fradigitize::ocr::{DocumentKind, SourceDocument};
use fradigitize::pipeline::Digitizer;
use fradigitize::store::{ClaimStore, MemoryStore};

#[derive(Parser)]
#[command(name = "fra")]
#[command(about = "Forest-rights claim document digitization")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "FRA_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Digitize a claim document and print the structured record
    Digitize {
        /// Path to the PDF or image file
        file: PathBuf,
        /// Declared document kind (defaults from the file extension)
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Pretty-print the JSON record
        #[arg(long)]
        pretty: bool,
    },

    /// Show recognition engine availability
    Engines,

    /// Digitize a document and check it against previously stored claims
    Check {
        /// Path to the PDF or image file
        file: PathBuf,
        /// Declared document kind (defaults from the file extension)
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// JSON-lines file of previously stored claim records
        #[arg(long)]
        store: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Pdf,
    Image,
}

/// The declared kind is the caller's statement, not sniffed content;
/// the extension default just saves typing it at the shell.
fn declared_kind(path: &Path, kind: Option<KindArg>) -> DocumentKind {
    match kind {
        Some(KindArg::Pdf) => DocumentKind::Pdf,
        Some(KindArg::Image) => DocumentKind::Image,
        None => match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::Image,
        },
    }
}

fn read_document(file: &Path, kind: Option<KindArg>) -> anyhow::Result<SourceDocument> {
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    Ok(SourceDocument::new(bytes, declared_kind(file, kind)))
}

/// Load a JSON-lines claims file into an in-memory store.
async fn load_store(path: &Path) -> anyhow::Result<MemoryStore> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let store = MemoryStore::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: fradigitize::ClaimRecord = serde_json::from_str(line)
            .with_context(|| format!("invalid claim record on line {}", i + 1))?;
        store.insert(&record).await?;
    }
    Ok(store)
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing::debug!("verbose logging enabled");
    }
    let config = DigitizeConfig::load(cli.config.as_deref())?;
    let digitizer = Digitizer::from_config(&config);

    match cli.command {
        Commands::Digitize { file, kind, pretty } => {
            let doc = read_document(&file, kind)?;
            let record = digitizer.digitize(&doc).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            println!("{json}");
        }

        Commands::Engines => {
            for engine in digitizer.cascade().engines() {
                let status = if engine.is_available() {
                    "available"
                } else {
                    "unavailable"
                };
                println!(
                    "{:<14} {:<12} {}",
                    engine.kind().as_str(),
                    status,
                    engine.availability_hint()
                );
            }
        }

        Commands::Check { file, kind, store } => {
            let doc = read_document(&file, kind)?;
            let record = digitizer.digitize(&doc).await?;
            let claims = load_store(&store).await?;
            let duplicate = digitizer.check_duplicate(&claims, &record).await?;
            if duplicate {
                println!("duplicate: this document has already been processed");
                std::process::exit(1);
            }
            println!("new document ({} fields recognized)", record.recognized_field_count());
        }
    }

    Ok(())
}
