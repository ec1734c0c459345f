use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use extractors::LeadCsvExporter;
use shared_types::{
    clamp_lead_count, ErrorResponse, Lead, LeadFilter, LeadGenError, LeadSearchResponse, Presence,
    SearchParams,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use leadgen_agents::credential_store::mask_credential;
use leadgen_agents::report::{render_filtered_table, render_sources};
use leadgen_agents::{GeminiClient, LeadGenerator, LeadSearchSession, LeadgenConfig, LlmClient};

#[derive(Parser, Debug)]
#[command(name = "leadgen", author, version, about = "Generate business leads with Gemini and Google Search")]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for leads, then filter, print and optionally export them
    Search(SearchArgs),

    /// Manage the stored Gemini API key
    #[command(subcommand)]
    Key(KeyCommand),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Business niche, e.g. "coffee shops"
    #[arg(long)]
    niche: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// Maximum number of leads to request (values below 1 become 1)
    #[arg(long, value_name = "N", value_parser = parse_lead_count)]
    count: Option<u32>,

    /// Keep leads whose address contains this text
    #[arg(long, value_name = "TEXT", default_value = "")]
    filter_city: String,

    /// Keep leads whose address contains this text
    #[arg(long, value_name = "TEXT", default_value = "")]
    filter_country: String,

    /// Filter on whether a website is known: all, yes or no
    #[arg(long, default_value_t = Presence::All)]
    website: Presence,

    /// Filter on whether an email is known: all, yes or no
    #[arg(long, default_value_t = Presence::All)]
    email: Presence,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the filtered leads as CSV (defaults to the configured file name)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Override the configured Gemini model ID
    #[arg(long)]
    model: Option<String>,
}

#[derive(Subcommand, Debug)]
enum KeyCommand {
    /// Store a new API key
    Set { key: String },
    /// Show the stored API key, masked
    Show,
    /// Print where the API key is stored
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_lead_count(raw: &str) -> Result<u32, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", raw))?;
    Ok(clamp_lead_count(value.clamp(0, u32::MAX as i64) as u32))
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("leadgen.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) =
        LeadgenConfig::load(cli.config.as_deref()).context("Failed to load leadgen config")?;
    tracing::debug!(path = %config_path.display(), "Loaded config");

    match cli.command {
        Command::Search(args) => run_search(args, &config, &config_path).await,
        Command::Key(command) => run_key(command, &config, &config_path),
    }
}

async fn run_search(
    args: SearchArgs,
    config: &LeadgenConfig,
    config_path: &std::path::Path,
) -> Result<()> {
    let params = search_params(&args, config);
    let filter = LeadFilter {
        city: args.filter_city.clone(),
        country: args.filter_country.clone(),
        website: args.website,
        email: args.email,
    };

    let llm_client: Arc<dyn LlmClient> = Arc::new(
        GeminiClient::new(&config.gemini.base_url, config.gemini.timeout())
            .context("Failed to create Gemini client")?,
    );
    let model = args.model.clone().unwrap_or_else(|| config.gemini.model.clone());
    let generator = LeadGenerator::new(llm_client, model);

    let store = config.open_credential_store(config_path);
    let mut session = LeadSearchSession::open(store, generator, params)
        .context("Failed to read the stored API key")?;

    eprintln!(
        "Searching for up to {} {} in {}, {}...",
        session.params().number_of_leads,
        session.params().niche,
        session.params().city,
        session.params().country
    );

    let outcome = tokio::select! {
        outcome = session.submit() => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };
    let Some(outcome) = outcome else {
        if session.is_loading() {
            tracing::warn!("Search interrupted while the request was in flight");
        }
        anyhow::bail!("Search interrupted");
    };

    if let Err(err) = &outcome {
        if args.format == OutputFormat::Json {
            println!("{}", error_json(err)?);
        }
        anyhow::bail!("{}", err);
    }

    let view = session.filtered(&filter);
    match args.format {
        OutputFormat::Table => {
            if let Some(message) = session.message() {
                println!("{}", message);
            } else {
                print!("{}", render_filtered_table(&view, session.leads().len()));
                let sources = render_sources(session.sources());
                if !sources.is_empty() {
                    println!();
                    print!("{}", sources);
                }
            }
        }
        OutputFormat::Json => {
            let response = LeadSearchResponse {
                params: session.params().clone(),
                filter: filter.clone(),
                leads: view.iter().map(|lead| (*lead).clone()).collect(),
                sources: session.sources().to_vec(),
                notice: session.notice(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    if let Some(target) = args.export {
        if let Some((rows, path)) = export_view(&view, target, config)? {
            eprintln!("Exported {} leads to {}", rows, path.display());
        } else {
            eprintln!("Nothing to export");
        }
    }

    Ok(())
}

fn error_json(err: &LeadGenError) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ErrorResponse::from(err))?)
}

/// Writes `view` to `target`, or to the configured file name when no path was given.
///
/// An empty view writes nothing and returns `None`.
fn export_view(
    view: &[&Lead],
    target: Option<PathBuf>,
    config: &LeadgenConfig,
) -> Result<Option<(usize, PathBuf)>> {
    if view.is_empty() {
        tracing::warn!("No leads to export");
        return Ok(None);
    }

    let path = target.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    let rows = LeadCsvExporter::new()
        .export_to_path(view.iter().copied(), &path)
        .with_context(|| format!("Failed to export leads to {:?}", path))?;
    Ok(Some((rows, path)))
}

fn search_params(args: &SearchArgs, config: &LeadgenConfig) -> SearchParams {
    let mut params = config.search.to_params();
    if let Some(niche) = &args.niche {
        params.niche = niche.clone();
    }
    if let Some(city) = &args.city {
        params.city = city.clone();
    }
    if let Some(country) = &args.country {
        params.country = country.clone();
    }
    if let Some(count) = args.count {
        params.set_number_of_leads(count);
    }
    params
}

fn run_key(
    command: KeyCommand,
    config: &LeadgenConfig,
    config_path: &std::path::Path,
) -> Result<()> {
    let store = config.open_credential_store(config_path);

    match command {
        KeyCommand::Set { key } => {
            store
                .save(key.trim())
                .context("Failed to store the API key")?;
            println!("Stored API key in {}", store.location());
        }
        KeyCommand::Show => match store.load().context("Failed to read the API key")? {
            Some(key) if !key.is_empty() => println!("{}", mask_credential(&key)),
            _ => println!("No API key stored"),
        },
        KeyCommand::Path => println!("{}", store.location()),
    }

    Ok(())
}
