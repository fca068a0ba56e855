//! tripplanner - vacation plans from a generative-text model
//!
//! CLI entry point.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use tripplanner::cli::{Cli, Command, TripArgs, get_log_path, load_trip_file};
use tripplanner::config::Config;
use tripplanner::domain::{PlanResult, TripRequest, is_specific_date_range};
use tripplanner::form::TripForm;
use tripplanner::llm::GeminiClient;
use tripplanner::planner::{Planner, Session};
use tripplanner::prompts::{PromptComposer, PromptLoader};
use tripplanner::render::{self, OutputFormat};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("tripplanner loaded config: model={}", config.llm.model);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            trip,
            format,
            output,
            no_sources,
        }) => {
            debug!(?format, ?output, no_sources, "main: matched Plan command");
            cmd_plan(&config, &trip, format, output.as_deref(), no_sources).await
        }
        Some(Command::Prompt { trip, json }) => {
            debug!(json, "main: matched Prompt command");
            cmd_prompt(&trip, json)
        }
        Some(Command::Form { trip, format, output }) => {
            debug!(?trip, ?format, "main: matched Form command");
            cmd_form(&config, trip.as_ref(), format, output.as_deref()).await
        }
        Some(Command::Dates { text }) => {
            debug!(%text, "main: matched Dates command");
            cmd_dates(&text)
        }
        None => {
            debug!("main: no command specified, launching form");
            cmd_form(&config, None, None, None).await
        }
    }
}

/// Generate a plan from command-line trip flags
async fn cmd_plan(
    config: &Config,
    args: &TripArgs,
    format: Option<OutputFormat>,
    output: Option<&Path>,
    no_sources: bool,
) -> Result<()> {
    debug!("cmd_plan: called");
    let trip = args.to_trip()?;
    let show_sources = config.output.show_sources && !no_sources;
    generate(config, Session::new(trip), resolve_format(format, config)?, output, show_sources).await
}

/// Print the prompts a trip would produce
fn cmd_prompt(args: &TripArgs, json: bool) -> Result<()> {
    debug!(json, "cmd_prompt: called");
    let trip = args.to_trip()?;

    if let Err(e) = Planner::validate(&trip) {
        debug!(error = %e, "cmd_prompt: validation failed");
        eyre::bail!("{}", e);
    }

    let composer = PromptComposer::new(PromptLoader::new(current_dir()?));
    let Some(prompt) = composer.compose(&trip)? else {
        eyre::bail!("Please enter a destination location to generate a plan.");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&prompt)?);
    } else {
        println!("{}", "System instruction:".bright_cyan().bold());
        println!("{}", prompt.system_prompt);
        println!();
        println!("{}", "User query:".bright_cyan().bold());
        println!("{}", prompt.user_query);
        println!();
        println!("{} {}", "Requested days:".dimmed(), prompt.requested_days);
    }
    Ok(())
}

/// Fill in the trip interactively, then generate
async fn cmd_form(
    config: &Config,
    trip_file: Option<&PathBuf>,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<()> {
    debug!(?trip_file, "cmd_form: called");
    let initial = match trip_file {
        Some(path) => load_trip_file(path)?,
        None => TripRequest::default(),
    };

    let Some(session) = TripForm::new(initial)?.run()? else {
        debug!("cmd_form: form cancelled");
        println!("Goodbye!");
        return Ok(());
    };

    generate(config, session, resolve_format(format, config)?, output, config.output.show_sources).await
}

/// Report how a date text is classified
fn cmd_dates(text: &str) -> Result<()> {
    debug!(%text, "cmd_dates: called");
    if is_specific_date_range(text) {
        println!("{} specific date range (trip length is inferred)", "✓".green());
    } else {
        println!("{} general period (trip length is required)", "✗".yellow());
    }
    Ok(())
}

/// Submit the trip and print the plan; Ctrl-C abandons the request
async fn generate(
    config: &Config,
    mut session: Session,
    format: OutputFormat,
    output: Option<&Path>,
    show_sources: bool,
) -> Result<()> {
    debug!(%format, ?output, "generate: called");
    let client = GeminiClient::from_config(config)?;
    let composer = PromptComposer::new(PromptLoader::new(current_dir()?));
    let planner = Planner::new(composer, Arc::new(client));

    eprintln!("{}", "Crafting your perfect vacation...".dimmed());
    let result: Result<PlanResult, _> = tokio::select! {
        result = session.submit(&planner) => result.cloned(),
        _ = tokio::signal::ctrl_c() => {
            warn!("generate: cancelled by user");
            eprintln!("Cancelled");
            return Ok(());
        }
    };

    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            debug!(error = %e, "generate: submit failed");
            eyre::bail!("{}", e.user_message());
        }
    };

    println!("{}", render::render(&plan, format, show_sources)?);

    if let Some(path) = output {
        let file_format = match format {
            OutputFormat::Json => OutputFormat::Json,
            _ => OutputFormat::Markdown,
        };
        let content = render::render(&plan, file_format, show_sources)?;
        fs::write(path, content).context(format!("Failed to write plan to {}", path.display()))?;
        info!(path = %path.display(), "Plan written");
        eprintln!("{} {}", "Plan saved to".dimmed(), path.display());
    }

    Ok(())
}

/// CLI flag first, then the configured default
fn resolve_format(cli_format: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    match cli_format {
        Some(format) => Ok(format),
        None => config
            .output
            .format
            .parse::<OutputFormat>()
            .map_err(|e| eyre::eyre!("Invalid output format in config: {}", e)),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to get current directory")
}
