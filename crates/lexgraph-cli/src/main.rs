//! LexGraph CLI - Command-line interface
//!
//! Usage:
//!   lexgraph run [--input DIR] [--output DIR]
//!   lexgraph inspect <file>
//!   lexgraph patterns [kind]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lexgraph_core::{AppConfig, DocumentRecord, LoggingConfig, MentionKind};
use lexgraph_extractor::export;
use lexgraph_extractor::{DocumentProcessor, OutputWriter, PatternCatalog, Pipeline, RawCounts};
use lexgraph_parser::{discover, ParserRegistry};

#[derive(Parser)]
#[command(name = "lexgraph")]
#[command(about = "Extract citations, actions and entities from legal texts into graph tables")]
#[command(version)]
struct Cli {
    /// TOML configuration file; environment variables take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every document in the input directory and write all tables
    Run {
        /// Input directory
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the per-document reports
        #[arg(long)]
        no_reports: bool,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract a single document and print what was found
    Inspect {
        /// Document path
        path: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in patterns
    Patterns {
        /// Only one group: citation, action or entity
        kind: Option<MentionKind>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Run {
            input,
            output,
            no_reports,
            json,
        } => {
            let mut config = config;
            if let Some(dir) = input {
                config.input.dir = dir;
            }
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if no_reports {
                config.output.write_reports = false;
            }
            run(&config, json)
        }
        Commands::Inspect { path, json } => inspect(&config, &path, json),
        Commands::Patterns { kind } => patterns(kind),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn processor(config: &AppConfig) -> anyhow::Result<DocumentProcessor> {
    let catalog = PatternCatalog::builtin().context("Failed to compile pattern catalog")?;
    Ok(DocumentProcessor::with_config(catalog, &config.extraction))
}

fn run(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let mut pipeline = Pipeline::new(processor(config)?);
    let registry = ParserRegistry::with_defaults();

    let paths = discover(&config.input.dir, &config.input.extensions).with_context(|| {
        format!(
            "Failed to list documents in {}",
            config.input.dir.display()
        )
    })?;
    tracing::info!(
        "Processing {} documents from {}",
        paths.len(),
        config.input.dir.display()
    );

    for path in &paths {
        match registry.parse(path) {
            Ok(document) => {
                pipeline.process_document(&document.id, &document.content);
            }
            Err(e) => {
                let id = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                pipeline.record_failure(&id, e);
            }
        }
    }

    let output = pipeline.finish();

    let writer = OutputWriter::new(config.output.clone());
    writer.prepare()?;
    writer.write_relations(&output.relations)?;
    writer.write_listings(&output.index)?;
    if config.output.write_reports {
        for record in &output.records {
            writer.write_report(record)?;
        }
    }
    tracing::info!(
        "Tables for {} documents written to {}",
        output.index.document_count(),
        writer.dir().display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&output.metrics)?);
    } else {
        print!("{}", output.metrics.report());
    }
    Ok(())
}

#[derive(Serialize)]
struct Inspection<'a> {
    record: &'a DocumentRecord,
    raw_counts: RawCounts,
}

fn inspect(config: &AppConfig, path: &Path, json: bool) -> anyhow::Result<()> {
    let document = ParserRegistry::with_defaults()
        .parse(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (record, raw_counts) = processor(config)?.process_with_counts(&document.id, &document.content);

    if json {
        let inspection = Inspection {
            record: &record,
            raw_counts,
        };
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    export::write_report(&mut out, &record)?;
    writeln!(
        out,
        "\nRaw matches: {} citations, {} actions, {} entities",
        raw_counts.citations, raw_counts.actions, raw_counts.entities
    )?;
    Ok(())
}

fn patterns(kind: Option<MentionKind>) -> anyhow::Result<()> {
    let catalog = PatternCatalog::builtin()?;
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => MentionKind::ALL.to_vec(),
    };

    for kind in kinds {
        let group = catalog.group(kind);
        println!("[{}] {} patterns", kind, group.len());
        for (label, pattern) in group.definitions() {
            println!("  {label}\t{pattern}");
        }
    }
    Ok(())
}
