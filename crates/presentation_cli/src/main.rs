//! Pirinku CLI
//!
//! Runs the recipe search in-process, or queries a running server.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use ai_core::{GeminiInferenceEngine, InferenceEngine};
use anyhow::{Context, anyhow};
use application::{
    FinderStatus, ImageService, RecipeFinder, RecipeForm, SubmitOutcome, SuggestionService,
    ToolSelector, ToolSelectorMode, ToolUsageService,
};
use clap::{Parser, Subcommand};
use domain::{CookingTool, PredefinedToolSet};
use infrastructure::{
    AppConfig, GeminiImageAdapter, GeminiSuggestionAdapter, JsonFileToolFrequencyStore,
    LoggingConfig, init_logging,
};

use tracing::{debug, info, warn};

use crate::render::{render_form_errors, render_tools, render_view};

/// Pirinku CLI
#[derive(Debug, Parser)]
#[command(name = "pirinku")]
#[command(author, version, about = "Ide resep dari bahan dan alat masak yang kamu punya", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "PIRINKU_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Suggest recipes for the given ingredients and tools
    ///
    /// Example: pirinku suggest -i "telur, nasi, kecap" -t wajan -t kompor
    Suggest {
        /// Ingredients, free text
        #[arg(short, long)]
        ingredients: String,

        /// Cooking tool; repeat or separate with commas
        #[arg(short, long = "tool", value_name = "TOOL")]
        tools: Vec<String>,
    },

    /// List the predefined tools, most used first
    Tools,

    /// Check a running server
    Status {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Split repeated and comma-joined tool arguments
fn tool_names(args: &[String]) -> impl Iterator<Item = &str> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn usage_service(config: &AppConfig) -> Arc<ToolUsageService> {
    let store = Arc::new(JsonFileToolFrequencyStore::new(&config.tools.store_path));
    Arc::new(ToolUsageService::with_key(store, &config.tools.storage_key))
}

fn vocabulary(config: &AppConfig) -> anyhow::Result<PredefinedToolSet> {
    config
        .tools
        .predefined_tools()
        .context("Invalid tool vocabulary")
}

fn build_finder(config: &AppConfig, usage: Arc<ToolUsageService>) -> anyhow::Result<RecipeFinder> {
    let engine: Arc<dyn InferenceEngine> = Arc::new(
        GeminiInferenceEngine::new(config.inference.clone())
            .context("Failed to initialize inference")?,
    );

    let suggestions = SuggestionService::new(Arc::new(GeminiSuggestionAdapter::from_engine(
        Arc::clone(&engine),
    )))
    .with_placeholder(&config.images.placeholder_url);
    let images = ImageService::new(Arc::new(GeminiImageAdapter::from_engine(engine)))
        .with_placeholder(&config.images.placeholder_url)
        .with_timeout(Duration::from_millis(config.images.timeout_ms));

    Ok(RecipeFinder::new(Arc::new(suggestions), Arc::new(images)).with_usage(usage))
}

async fn suggest(
    config: &AppConfig,
    ingredients: String,
    tool_args: &[String],
) -> anyhow::Result<ExitCode> {
    let usage = usage_service(config);
    let vocabulary = vocabulary(config)?;
    let frequencies = usage.load().await;

    let mut form = RecipeForm::new(ToolSelector::for_mode(
        config.tools.mode,
        &vocabulary,
        &frequencies,
    ));
    form.set_ingredients(ingredients);
    for name in tool_names(tool_args) {
        form.tools_mut()
            .add(name)
            .map_err(|e| anyhow!(e.user_message()))?;
    }

    let finder = build_finder(config, usage)?;
    let (outcome, ()) = tokio::join!(finder.submit(&mut form), async {
        tokio::task::yield_now().await;
        print!("{}", render_view(&finder.view()));
    });

    debug!(?outcome, generation = finder.generation(), "Submission finished");
    match outcome {
        SubmitOutcome::Rejected(errors) => {
            eprint!("{}", render_form_errors(&errors));
            return Ok(ExitCode::from(2));
        },
        SubmitOutcome::Busy => return Err(anyhow!("A search is already running")),
        SubmitOutcome::Completed(_) => {},
    }

    let images = finder.settle_images().await;
    debug!(images = images.len(), "Card images settled");
    println!("{}", render_view(&finder.view()));

    Ok(match finder.status() {
        FinderStatus::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn list_tools(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let usage = usage_service(config);
    let vocabulary = vocabulary(config)?;
    let frequencies = usage.load().await;
    let ranked = vocabulary.ranked(&frequencies);
    debug!(tools = ranked.len(), recorded = frequencies.len(), "Ranked tool vocabulary");

    if config.tools.mode == ToolSelectorMode::Freeform {
        println!("(mode freeform: urutan ini hanya dipakai di mode predefined-ranked)");
    }
    print!("{}", render_tools(ranked.iter().map(CookingTool::as_str), &frequencies));
    Ok(ExitCode::SUCCESS)
}

async fn status(url: &str) -> anyhow::Result<ExitCode> {
    let response = reqwest::Client::new()
        .get(endpoint_url(url, "/ready"))
        .send()
        .await
        .with_context(|| format!("Cannot reach {url}"))?;
    let ready = response.status().is_success();
    if ready {
        info!(%url, "Server is ready");
    } else {
        warn!(%url, status = %response.status(), "Server is not ready");
    }
    let body = response.json::<serde_json::Value>().await?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(if ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load config")?;
    init_logging(&LoggingConfig {
        filter: log_filter_from_verbosity(cli.verbose).to_string(),
        format: config.logging.format,
    })?;

    match cli.command {
        Commands::Suggest { ingredients, tools } => suggest(&config, ingredients, &tools).await,
        Commands::Tools => list_tools(&config).await,
        Commands::Status { url } => status(&url).await,
    }
}
