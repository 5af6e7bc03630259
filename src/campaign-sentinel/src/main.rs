//! Campaign Sentinel: pauses advertising campaigns and banners that miss
//! their click and cost strategy.

use std::sync::Arc;

use anyhow::Context;
use campaign_core::config::AppConfig;
use campaign_core::platform::PauseActions;
use campaign_direct::{DirectClient, DryRunActions};
use campaign_effectiveness::{CheckRequest, EffectivenessChecker};
use campaign_store::InMemoryStrategyStore;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

const DEFAULT_LOG_FILTER: &str =
    "campaign_sentinel=info,campaign_effectiveness=info,campaign_direct=info";

#[derive(Parser, Debug)]
#[command(name = "campaign-sentinel")]
#[command(about = "Pause campaigns and banners that miss their strategy")]
#[command(version)]
struct Cli {
    /// TOML config file (environment variables still take precedence)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Platform API URL (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_SENTINEL__DIRECT__API_URL")]
    api_url: Option<String>,

    /// Platform API token (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_SENTINEL__DIRECT__TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Strategy snapshot file (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_SENTINEL__STORE__STRATEGY_PATH")]
    strategies: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check effectiveness and pause offenders
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Comma-separated campaign ids; all local campaigns when omitted
    #[arg(long)]
    campaigns: Option<String>,

    /// First day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    from: Option<String>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<String>,

    /// Evaluate and log, but send no pause commands
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    if let Some(url) = cli.api_url {
        config.direct.api_url = url;
    }
    if let Some(token) = cli.token {
        config.direct.token = token;
    }
    if let Some(path) = cli.strategies {
        config.store.strategy_path = path;
    }

    info!(
        api_url = %config.direct.api_url,
        locale = %config.direct.locale,
        strategy_path = %config.store.strategy_path,
        "Configuration loaded"
    );

    match cli.command {
        Command::Check(args) => run_check(config, args).await,
    }
}

/// A named config file must load. Without one, environment problems fall
/// back to defaults.
fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("failed to load config file `{path}`")),
        None => Ok(AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })),
    }
}

async fn run_check(config: AppConfig, args: CheckArgs) -> anyhow::Result<()> {
    let request = CheckRequest::from_args(args.campaigns.as_deref(), args.from, args.to)?;

    let store = Arc::new(InMemoryStrategyStore::load(&config.store.strategy_path)?);
    let client = Arc::new(DirectClient::new(config.direct)?);
    let actions: Arc<dyn PauseActions> = if args.dry_run {
        info!("Dry run: no pause commands will be sent");
        Arc::new(DryRunActions)
    } else {
        client.clone()
    };

    let checker = EffectivenessChecker::new(store, client, actions);

    let report = match checker.check(request).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Effectiveness check failed");
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.campaign_message());
        println!("{}", report.banner_message());
    }

    Ok(())
}
