use anyhow::Context;
use clap::Parser;
use seekbox::headless::{check_display_field, load_dataset, search_once};
use seekbox_core::{MatchMode, Record, SearchConfig, SearchController};
use seekbox_tui::Theme;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seekbox", about = "Search a JSON dataset with exact or fuzzy matching")]
struct Cli {
    /// JSON file holding an array of records.
    #[arg(long)]
    data: PathBuf,

    /// TOML settings layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML theme layered over the default theme.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Comma-separated field paths to search, e.g. `name,address.city`.
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,

    /// Field shown for a record in the input, dropdown and chips (default
    /// `name`). Needed when the records have no `name` field.
    #[arg(long)]
    display: Option<String>,

    /// Use approximate matching instead of substring matching.
    #[arg(long)]
    fuzzy: bool,

    /// Allow selecting several records.
    #[arg(long)]
    multi: bool,

    /// Run one search, print matching records as JSON lines and exit.
    #[arg(long)]
    query: Option<String>,

    /// Write debug logs to /tmp/seekbox-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/seekbox-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("seekbox debug log started — tail -f /tmp/seekbox-debug.log");
    }

    let config = build_config(&cli)?;
    let dataset = load_dataset(&cli.data)?;

    if let Some(query) = &cli.query {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let results = runtime.block_on(search_once(config, dataset, query));
        return print_records(&results);
    }

    check_display_field(&config, &dataset)?;
    let theme = match &cli.theme {
        Some(path) => Theme::load(path)?,
        None => Theme::load_default(),
    };
    let selection = seekbox_tui::run(SearchController::new(config, dataset, ()), theme)?;
    print_records(selection.records())
}

/// Settings file (or defaults) with command-line overrides applied.
fn build_config(cli: &Cli) -> anyhow::Result<SearchConfig> {
    let base = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => SearchConfig::defaults(),
    };

    let mut builder = base.into_builder();
    if !cli.keys.is_empty() {
        builder = builder.filter_keys(cli.keys.iter().map(String::as_str));
    }
    if let Some(display) = &cli.display {
        builder = builder.display_field(display.as_str());
    }
    if cli.fuzzy {
        builder = builder.match_mode(MatchMode::Fuzzy);
    }
    if cli.multi {
        builder = builder.multi_select(true);
    }

    let config = builder.build()?;
    if config.filter_keys().is_empty() {
        anyhow::bail!("no fields to search: pass --keys or set search.filter_keys");
    }
    Ok(config)
}

fn print_records(records: &[Record]) -> anyhow::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
