//! Process setup and command dispatch.

use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_prepare_command, handle_recommend_command, handle_rules_command, handle_score_command,
    RecommendArgs,
};
use crate::config::{load_config, Overrides, Settings};
use anyhow::{Context, Result};
use clap::Parser;
use gamefuzz_engine::{Inputs, RuleBase};
use tracing_subscriber::EnvFilter;

/// Parse the command line and run the selected command.
///
/// Logging goes to stderr and is controlled by `RUST_LOG`, so JSON written to
/// stdout stays machine-readable.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli)
}

/// Run an already parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        resolution: cli.resolution,
        defuzzification: cli.defuzz.map(Into::into),
        limit: None,
    };

    match cli.command {
        Commands::Prepare { input, output } => handle_prepare_command(&input, &output),
        Commands::Recommend {
            catalog,
            raw,
            genres,
            budget_idr,
            budget_usd,
            from_year,
            to_year,
            limit,
            format,
        } => {
            let settings = load_settings(Overrides { limit, ..overrides })?;
            let rules = build_rules(&settings)?;
            let args = RecommendArgs {
                catalog,
                raw,
                genres,
                budget_idr,
                budget_usd,
                from_year,
                to_year,
                format,
            };
            handle_recommend_command(args, &rules, &settings)
        }
        Commands::Score {
            quality,
            popularity,
            price,
            explain,
            format,
        } => {
            let rules = build_rules(&load_settings(overrides)?)?;
            handle_score_command(
                &rules,
                Inputs::new(quality, popularity, price),
                explain,
                format,
            )
        }
        Commands::Rules { format } => {
            let rules = build_rules(&load_settings(overrides)?)?;
            handle_rules_command(&rules, format)
        }
    }
}

fn load_settings(overrides: Overrides) -> Result<Settings> {
    load_config()?.unwrap_or_default().resolve(overrides)
}

fn build_rules(settings: &Settings) -> Result<RuleBase> {
    settings
        .engine
        .build()
        .context("invalid engine configuration")
}
