//! cinefav - movie search with a session favorites list.

/// Application configuration (TOML).
mod config;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, ProviderConfig, resolve_config_path, resolve_log_path};
use cinefav_api::omdb::{MovieRecord, OmdbClient};
use cinefav_tui::{Locale, SearchController, SearchForm, run_movie_search};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run (default: `tui`).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search interactively and collect favorites.
    Tui(TuiArgs),
    /// Search one title and print the result.
    Search(SearchArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args, Default)]
struct TuiArgs {
    /// Pre-fill the title field.
    #[arg(long, default_value = "")]
    title: String,
    /// Pre-fill the minimum rating field.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    min_rating: String,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Movie title (at least 2 characters, e.g. "Inception").
    #[arg(long, required = true)]
    title: String,
    /// Minimum rating, 0-10. Validated only; results are not filtered by it.
    #[arg(long, required = true, allow_hyphen_values = true)]
    min_rating: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file.
    Init(ConfigInitArgs),
    /// Print the config file path.
    Path,
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// OMDb API key to store (the `OMDB_API_KEY` variable still wins at runtime).
    #[arg(long)]
    api_key: Option<String>,
    /// Message language.
    #[arg(long, value_parser = ["en", "ru"], default_value = "en")]
    locale: String,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

/// Builds an `OmdbClient` from the environment and config file.
///
/// # Errors
///
/// Returns an error if no API key is configured, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = config
        .resolve_api_key(std::env::var(API_KEY_ENV).ok())
        .with_context(|| {
            format!("{API_KEY_ENV} environment variable or provider.api_key in config is required")
        })?;

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the input is invalid, the movie is not found, or
/// the request fails. The error carries the localized message.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    let locale = config.ui.locale;

    let form = SearchForm::new(&args.title, &args.min_rating);
    form.validate().context(locale.invalid_input())?;

    let client = build_omdb_client(&config)?;
    let mut controller = SearchController::new(locale);

    match controller.search(&client, &form).await {
        Ok(movie) => {
            print_movie(movie);
            Ok(())
        }
        Err(err) => {
            let message = controller
                .error_message()
                .unwrap_or_else(|| locale.request_failed());
            Err(anyhow::Error::new(err).context(String::from(message)))
        }
    }
}

/// Prints a movie card.
fn print_movie(movie: &MovieRecord) {
    tracing::info!("{}", movie.heading());
    tracing::info!("Rating: {}", movie.imdb_rating);
    tracing::info!("Duration: {}", movie.runtime);
    tracing::info!("Director: {}", movie.director);
    tracing::info!("Actors: {}", movie.actors);
    tracing::info!("Description: {}", movie.plot);
    tracing::info!("Poster: {}", movie.poster);
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the terminal fails.
#[instrument(skip_all)]
async fn run_tui(args: TuiArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    let client = build_omdb_client(&config)?;

    let form = SearchForm::new(args.title, args.min_rating);
    run_movie_search(Arc::new(client), config.ui.locale, form).await
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be written.
fn run_config_init(args: ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let locale = if args.locale == "ru" {
        Locale::Ru
    } else {
        Locale::En
    };
    let mut config = AppConfig {
        provider: ProviderConfig {
            api_key: args.api_key,
            base_url: None,
        },
        ..AppConfig::default()
    };
    config.ui.locale = locale;
    config.save(&config_path)?;

    tracing::info!("Wrote {}", config_path.display());
    if config.provider.api_key.is_none() {
        tracing::warn!("No API key stored. Set {API_KEY_ENV} before searching.");
    }
    Ok(())
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved.
fn run_config_path(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir)?;
    tracing::info!("{}", config_path.display());
    Ok(())
}

/// Opens the TUI log file (append), creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_tui_log(dir: Option<&PathBuf>) -> Result<File> {
    let log_path = resolve_log_path(&resolve_config_path(dir)?);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))
}

/// Installs the global tracing subscriber.
///
/// Logs go to stdout, or to `log_file` while the TUI owns the terminal.
fn init_tracing(log_file: Option<File>) {
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Tui(TuiArgs::default()));

    let log_file = match command {
        Commands::Tui(_) => Some(open_tui_log(cli.dir.as_ref())?),
        Commands::Search(_) | Commands::Config(_) => None,
    };
    init_tracing(log_file);

    match command {
        Commands::Tui(args) => run_tui(args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Init(args) => run_config_init(args, cli.dir.as_ref()),
            ConfigSubcommands::Path => run_config_path(cli.dir.as_ref()),
        },
    }
}
