// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use sheet_match::utils::logging::{self, format_error, format_info, format_success};
use sheet_match::{
    AnswerRenderer, Catalog, Config, DatasetSource, FilterMode, FilterScope, JsonExporter, Matcher,
    OperationTimer, Session, Validator, open_source,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "sheet_match")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Answer questions from spreadsheet datasets with fuzzy row matching", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// JSON file, workbook or directory with datasets
    #[arg(short, long, value_name = "PATH", env = "SHEET_MATCH_DATA")]
    data: Option<PathBuf>,

    /// Only load these datasets (repeatable)
    #[arg(long = "dataset", value_name = "NAME")]
    datasets: Vec<String>,

    /// Minimum similarity for a match, 0.0-1.0
    #[arg(short, long)]
    threshold: Option<f64>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Best answer for a question
    Search {
        /// Question text
        query: String,
    },

    /// Rows scoring above the threshold, best first
    Rank {
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Rows (or tables) relevant to the query
    Filter {
        query: String,

        /// Match every word approximately instead of the whole query as a substring
        #[arg(long)]
        fuzzy: bool,

        /// Keep whole datasets that contain a relevant row
        #[arg(long)]
        tables: bool,

        #[arg(short, long, value_name = "DIR")]
        export: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Interactive question loop
    Ask,

    /// List available datasets
    Datasets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);
    logging::set_color(cli.color);

    debug!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        debug!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(data) = cli.data {
        config.data.path = data;
    }
    if !cli.datasets.is_empty() {
        config.data.datasets = cli.datasets;
    }
    if let Some(threshold) = cli.threshold {
        config.matcher.threshold = threshold;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Search { query } => cmd_search(&config, &query, cli.json)?,
        Commands::Rank { query, limit } => cmd_rank(&config, &query, limit, cli.json)?,
        Commands::Filter {
            query,
            fuzzy,
            tables,
            export,
            pretty,
        } => {
            if fuzzy {
                config.matcher.filter_mode = FilterMode::Fuzzy;
            }
            if tables {
                config.matcher.filter_scope = FilterScope::Tables;
            }
            cmd_filter(&config, &query, export, pretty, cli.json)?
        }
        Commands::Ask => cmd_ask(&config)?,
        Commands::Datasets => cmd_datasets(&config, cli.json)?,
    }

    Ok(())
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    Validator::validate_data_path(&config.data.path)?;

    let timer = OperationTimer::new("load datasets");
    let source = open_source(&config.data.path)
        .with_context(|| format!("Cannot read datasets from {}", config.data.path.display()))?;
    let catalog = source
        .load_catalog(&config.data.datasets)
        .context("Failed to load datasets")?;
    timer.finish_with_count(catalog.total_rows());

    if catalog.total_rows() == 0 {
        warn!("No rows loaded from {}", config.data.path.display());
    }
    Ok(catalog)
}

fn cmd_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;
    let matcher = Matcher::new(config.matcher.clone());
    let renderer = AnswerRenderer::new(config.output.strip_links);

    let timer = OperationTimer::new("search");
    let found = matcher.best_match(&catalog, query);
    timer.warn_if_slow(Duration::from_secs(2), "fuzzy scan");
    timer.finish();

    if json {
        println!("{}", renderer.render_json(query, found.as_ref())?);
    } else {
        println!("{}", renderer.render(query, found.as_ref()));
    }
    Ok(())
}

fn cmd_rank(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;
    let matcher = Matcher::new(config.matcher.clone());
    let renderer = AnswerRenderer::new(config.output.strip_links);
    let limit = limit.unwrap_or(config.output.rank_limit);

    let ranked = matcher.rank(&catalog, query, limit);
    info!("{} rows ranked for query", ranked.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("{}", renderer.render_ranked(query, &ranked));
    }
    Ok(())
}

fn cmd_filter(
    config: &Config,
    query: &str,
    export: Option<PathBuf>,
    pretty: bool,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let matcher = Matcher::new(config.matcher.clone());
    let renderer = AnswerRenderer::new(config.output.strip_links);

    let filtered = matcher.filter(&catalog, query);
    info!(
        "{} rows in {} datasets matched ({:?}, {:?})",
        filtered.total_rows(),
        filtered.catalog.len(),
        config.matcher.filter_mode,
        config.matcher.filter_scope
    );

    if let Some(output) = export {
        let exporter = JsonExporter::new(output)?;
        let manifest = exporter.export_filtered(&filtered, pretty)?;
        println!(
            "{}",
            format_success(&format!(
                "Exported {} rows to {} file(s) in {}",
                manifest.total_rows,
                manifest.files.len(),
                exporter.output_dir().display()
            ))
        );
    } else if json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
    } else {
        println!("{}", renderer.render_filtered(&filtered));
    }
    Ok(())
}

fn cmd_ask(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let matcher = Matcher::new(config.matcher.clone());
    let renderer = AnswerRenderer::new(config.output.strip_links);
    let mut session = Session::new(&matcher, &catalog);

    println!(
        "{}",
        format_info(&format!(
            "{} rows in {} datasets loaded. Type a question, or 'quit' to leave.",
            catalog.total_rows(),
            catalog.len()
        ))
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read question")?;
        let query = line.trim();

        if matches!(query, "quit" | "exit") {
            break;
        }

        let answered = session
            .ask(query)
            .map(|asked| asked.map(|found| renderer.render(query, found)));

        match answered {
            Ok(Some(text)) => println!("{}", text),
            Ok(None) => continue,
            Err(e) => {
                println!("{}", format_error(&e.to_string()));
                session.reset();
            }
        }
    }

    debug!("Session ended in state {}", session.state().label());
    Ok(())
}

fn cmd_datasets(config: &Config, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;

    if json {
        let listing: Vec<serde_json::Value> = catalog
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "columns": d.columns,
                    "rows": d.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("{}", format_info("No datasets found"));
        return Ok(());
    }

    for dataset in catalog.iter() {
        println!(
            "{} ({} rows) columns: {}",
            dataset.name,
            dataset.len(),
            dataset.columns.join(", ")
        );
    }
    Ok(())
}
