//! Filtering and ranking prepared records by fuzzy score.

use crate::prepare::GameRecord;
use gamefuzz_engine::{infer, InferenceError, Inputs, RuleBase};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rupiah per US dollar used for budgets and display.
pub const IDR_PER_USD: f64 = 15_500.0;
/// Recommendations returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 20;

/// Trait for computing a record's recommendation score.
pub trait Scorer: Sync {
    /// Score one record.
    fn score(&self, record: &GameRecord) -> Result<f64, InferenceError>;
}

/// Scores records with the fuzzy rule base.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyScorer<'a> {
    rules: &'a RuleBase,
}

impl<'a> FuzzyScorer<'a> {
    /// Create a scorer over a built rule base.
    pub fn new(rules: &'a RuleBase) -> Self {
        Self { rules }
    }
}

impl Scorer for FuzzyScorer<'_> {
    fn score(&self, record: &GameRecord) -> Result<f64, InferenceError> {
        let Inputs {
            quality,
            popularity,
            price,
        } = record.inputs();
        infer(self.rules, quality, popularity, price)
    }
}

/// Which records are eligible for recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Lowercased genre names; a record needs at least one. Empty passes all.
    pub genres: Vec<String>,
    /// Maximum price in USD, inclusive.
    pub max_price_usd: Option<f64>,
    /// Inclusive release-year range.
    pub years: Option<(i32, i32)>,
}

impl Filter {
    /// Set the genre list, normalizing case and whitespace and dropping blanks.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = genres
            .into_iter()
            .flat_map(|g| {
                g.as_ref()
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect();
        self
    }

    /// Limit by a budget given in Rupiah.
    pub fn with_budget_idr(mut self, idr: f64, idr_per_usd: f64) -> Self {
        self.max_price_usd = Some(idr / idr_per_usd);
        self
    }

    /// Limit by a budget given in USD.
    pub fn with_budget_usd(mut self, usd: f64) -> Self {
        self.max_price_usd = Some(usd);
        self
    }

    /// Limit to releases in `start..=end`.
    pub fn with_years(mut self, start: i32, end: i32) -> Self {
        self.years = Some((start, end));
        self
    }

    /// True when `record` passes every configured criterion.
    pub fn matches(&self, record: &GameRecord) -> bool {
        self.matches_genre(record) && self.matches_price(record) && self.matches_year(record)
    }

    fn matches_genre(&self, record: &GameRecord) -> bool {
        if self.genres.is_empty() {
            return true;
        }
        let wanted: HashSet<&str> = self.genres.iter().map(String::as_str).collect();
        record
            .genres
            .iter()
            .map(|g| g.trim().to_lowercase())
            .any(|g| !g.is_empty() && wanted.contains(g.as_str()))
    }

    fn matches_price(&self, record: &GameRecord) -> bool {
        self.max_price_usd.map_or(true, |max| record.price_usd <= max)
    }

    fn matches_year(&self, record: &GameRecord) -> bool {
        self.years
            .map_or(true, |(start, end)| (start..=end).contains(&record.release_year))
    }
}

/// One ranked record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Store id.
    pub appid: String,
    /// Display name.
    pub name: String,
    /// Fuzzy recommendation score.
    pub score: f64,
    /// Price in USD.
    pub price_usd: f64,
    /// Price in Rupiah.
    pub price_idr: f64,
    /// Genre names.
    pub genres: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Release date as given.
    pub release_date: String,
}

/// Outcome of a recommendation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Records that passed the filter.
    pub matched: usize,
    /// Matched records that could not be scored.
    pub skipped: usize,
    /// Top records, best first.
    pub recommendations: Vec<Recommendation>,
}

/// Filter `records`, score the survivors in parallel and keep the best `limit`.
///
/// Ties keep their input order. Records whose scoring fails are left out and
/// counted in [`RecommendationReport::skipped`].
pub fn recommend(
    records: &[GameRecord],
    filter: &Filter,
    scorer: &impl Scorer,
    limit: usize,
    idr_per_usd: f64,
) -> RecommendationReport {
    let matched: Vec<&GameRecord> = records.iter().filter(|r| filter.matches(r)).collect();

    let scored: Vec<(&GameRecord, Result<f64, InferenceError>)> = matched
        .par_iter()
        .map(|r| (*r, scorer.score(r)))
        .collect();

    let mut skipped = 0;
    let mut recommendations = Vec::with_capacity(scored.len());
    for (record, result) in scored {
        match result {
            Ok(score) => recommendations.push(Recommendation {
                appid: record.appid.clone(),
                name: record.name.clone(),
                score,
                price_usd: record.price_usd,
                price_idr: record.price_usd * idr_per_usd,
                genres: record.genres.clone(),
                categories: record.categories.clone(),
                release_date: record.release_date.clone(),
            }),
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    target: "gamefuzz::catalog",
                    appid = %record.appid,
                    error = %err,
                    "Skipping record that could not be scored"
                );
            }
        }
    }

    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations.truncate(limit);

    RecommendationReport {
        matched: matched.len(),
        skipped,
        recommendations,
    }
}
