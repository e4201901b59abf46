use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lookup_core::{Lookup, LookupConfig, MemorySource, RecordSearch, ResultEntry};
use lookup_tui::app::App;

/// Records served when `--records` is not given.
const SAMPLE_RECORDS: &str = include_str!("sample_records.json");

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "lookup",
    about = "Terminal typeahead record picker",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/lookup/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON array of records served by the in-memory source.
    #[arg(long, global = true)]
    records: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive picker (the default).
    Demo,

    /// One-shot query; prints id, label, and secondary fields per match.
    Search {
        term: String,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LookupConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LookupConfig::load()?,
    };
    if config.object_name.is_empty() {
        // Nothing configured: a ready-to-type demo setup.
        config = demo_config();
    }

    let json = match &cli.records {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading records from {}", path.display()))?,
        None => SAMPLE_RECORDS.to_string(),
    };
    let source = Arc::new(MemorySource::from_json(&json)?);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => run_demo(config, source),
        Commands::Search { term, limit } => run_search(config, source, &term, limit),
    }
}

fn demo_config() -> LookupConfig {
    let mut config = LookupConfig::for_object("Account");
    config.label = "Account".to_string();
    config.placeholder = "Search accounts...".to_string();
    config.multi_select = true;
    config.search_fields = "Name,Industry".to_string();
    config.additional_fields = "Industry,Rating".to_string();
    config
}

fn run_demo(config: LookupConfig, source: Arc<MemorySource>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let lookup = Lookup::new(config)?;
    let mut app = App::new(lookup, source);
    lookup_tui::run_tui(&mut app)?;

    // Hand the final selection to whatever invoked us.
    let values = app.lookup.selected_values();
    if values.is_empty() {
        println!("No selection.");
    } else {
        println!("{values}");
    }
    Ok(())
}

fn run_search(
    config: LookupConfig,
    source: Arc<MemorySource>,
    term: &str,
    limit: usize,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let runtime = tokio::runtime::Runtime::new()?;

    let mut lookup = Lookup::new(config)?;
    let Some(request) = lookup.input(term) else {
        println!("Term too short; nothing queried.");
        return Ok(());
    };

    let records = runtime.block_on(source.search(&request))?;
    for record in records.into_iter().take(limit) {
        let entry = ResultEntry::map(record, lookup.config());
        let extra = entry
            .additional_info
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|f| format!("{}={}", f.field, f.display()))
            .collect::<Vec<_>>()
            .join(" ");
        if extra.is_empty() {
            println!("{}\t{}", entry.record.id(), entry.display_value);
        } else {
            println!("{}\t{}\t{}", entry.record.id(), entry.display_value, extra);
        }
    }
    Ok(())
}
