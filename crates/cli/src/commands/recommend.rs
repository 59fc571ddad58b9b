//! CLI handler for the `recommend` command.

use super::{group_thousands, prepare_catalog};
use crate::cli::OutputFormat;
use crate::config::Settings;
use anyhow::{bail, Context, Result};
use gamefuzz_catalog::{load_prepared, recommend, Filter, FuzzyScorer, RecommendationReport};
use gamefuzz_engine::RuleBase;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments of the `recommend` command.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecommendArgs {
    pub(crate) catalog: PathBuf,
    pub(crate) raw: Option<PathBuf>,
    pub(crate) genres: Vec<String>,
    pub(crate) budget_idr: Option<f64>,
    pub(crate) budget_usd: Option<f64>,
    pub(crate) from_year: Option<i32>,
    pub(crate) to_year: Option<i32>,
    pub(crate) format: OutputFormat,
}

impl RecommendArgs {
    fn filter(&self, idr_per_usd: f64) -> Result<Filter> {
        let mut filter = Filter::default().with_genres(&self.genres);

        let invalid = |v: f64| v.is_nan() || v < 0.0;
        match (self.budget_idr, self.budget_usd) {
            (Some(idr), _) if invalid(idr) => bail!("--budget-idr must be non-negative"),
            (_, Some(usd)) if invalid(usd) => bail!("--budget-usd must be non-negative"),
            (Some(idr), _) => filter = filter.with_budget_idr(idr, idr_per_usd),
            (None, Some(usd)) => filter = filter.with_budget_usd(usd),
            (None, None) => {}
        }

        if self.from_year.is_some() || self.to_year.is_some() {
            let start = self.from_year.unwrap_or(i32::MIN);
            let end = self.to_year.unwrap_or(i32::MAX);
            if start > end {
                bail!("--from-year {start} is after --to-year {end}");
            }
            filter = filter.with_years(start, end);
        }
        Ok(filter)
    }
}

/// Handle the `recommend` command.
pub(crate) fn handle_recommend_command(
    args: RecommendArgs,
    rules: &RuleBase,
    settings: &Settings,
) -> Result<()> {
    let start = Instant::now();

    if !args.catalog.exists() {
        let Some(raw) = &args.raw else {
            bail!(
                "prepared catalog {} not found; run `gamefuzz prepare` first or pass --raw",
                args.catalog.display()
            );
        };
        let count = prepare_catalog(raw, &args.catalog)?;
        tracing::info!(
            target: "gamefuzz::catalog",
            records = count,
            path = %args.catalog.display(),
            "Prepared missing catalog"
        );
    }

    let records = load_prepared(&args.catalog)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?;
    let filter = args.filter(settings.idr_per_usd)?;
    let report = recommend(
        &records,
        &filter,
        &FuzzyScorer::new(rules),
        settings.limit,
        settings.idr_per_usd,
    );

    tracing::debug!(
        target: "gamefuzz::catalog",
        catalog = records.len(),
        matched = report.matched,
        skipped = report.skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Ranked catalog"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print!("{}", render_report(&report));
            println!("Computed in {:.2} s", start.elapsed().as_secs_f64());
        }
    }
    Ok(())
}

/// Format a report as a text table.
fn render_report(report: &RecommendationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game Recommendations");
    let _ = writeln!(out, "====================\n");
    let _ = writeln!(
        out,
        "Matched: {} games (showing {})",
        report.matched,
        report.recommendations.len()
    );
    if report.skipped > 0 {
        let _ = writeln!(out, "Skipped: {} games without usable scores", report.skipped);
    }
    let _ = writeln!(out);

    if report.recommendations.is_empty() {
        let _ = writeln!(out, "No games match all of the given filters.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3}  {:>6}  {:<40}  {:<14}  {:>15}  {:>9}  Genres",
        "#", "Score", "Name", "Released", "Price (IDR)", "Price ($)"
    );
    for (i, rec) in report.recommendations.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>6.2}  {:<40}  {:<14}  {:>15}  {:>9}  {}",
            i + 1,
            rec.score,
            truncate(&rec.name, 40),
            rec.release_date,
            format!("Rp {}", group_thousands(rec.price_idr)),
            format!("${:.2}", rec.price_usd),
            rec.genres.join(", ")
        );
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
