//! Turning raw catalog records into the three normalized fuzzy inputs.

use crate::raw::RawGame;
use chrono::{Datelike, NaiveDate};
use gamefuzz_engine::Inputs;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

/// Ranges narrower than this are treated as constant.
const EPSILON: f64 = 1e-9;
/// Weight of `ln(1 + owners)` in raw popularity.
const OWNERS_WEIGHT: f64 = 0.7;
/// Weight of `ln(1 + peak_ccu)` in raw popularity.
const CCU_WEIGHT: f64 = 0.3;

const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%d %b, %Y", "%d %B, %Y", "%Y-%m-%d"];

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("valid regex"));
static DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// A catalog record with its fuzzy inputs computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Store id.
    pub appid: String,
    /// Display name.
    pub name: String,
    /// Genre names.
    pub genres: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Release date as given.
    pub release_date: String,
    /// Release year, 0 when unknown.
    pub release_year: i32,
    /// Price in USD.
    pub price_usd: f64,
    /// Positive review count.
    pub positive_ratings: u64,
    /// Negative review count.
    pub negative_ratings: u64,
    /// Share of positive reviews, 0..=100.
    #[serde(deserialize_with = "nullable_score")]
    pub quality_score: f64,
    /// Min-max normalized popularity, 0..=100.
    #[serde(deserialize_with = "nullable_score")]
    pub popularity_score: f64,
    /// Inverted price relative to the most expensive game, 0..=100.
    #[serde(deserialize_with = "nullable_score")]
    pub price_score: f64,
}

impl GameRecord {
    /// The record's engine inputs.
    pub fn inputs(&self) -> Inputs {
        Inputs::new(self.quality_score, self.popularity_score, self.price_score)
    }

    /// True when all three scores are usable.
    pub fn has_finite_scores(&self) -> bool {
        self.quality_score.is_finite()
            && self.popularity_score.is_finite()
            && self.price_score.is_finite()
    }
}

/// Scores exported as `null` (serde_json's encoding of NaN) read back as NaN.
fn nullable_score<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Compute scores for a whole catalog. Popularity and price are normalized
/// against the catalog itself, so the result depends on every record.
pub fn prepare(raw: Vec<(String, RawGame)>) -> Vec<GameRecord> {
    if raw.is_empty() {
        return Vec::new();
    }

    let popularity_raw: Vec<f64> = raw
        .iter()
        .map(|(_, g)| {
            let owners = estimated_owners(g.estimated_owners.as_deref().unwrap_or("0 - 0"));
            owners.ln_1p() * OWNERS_WEIGHT + (g.peak_ccu as f64).ln_1p() * CCU_WEIGHT
        })
        .collect();
    let (min_pop, max_pop) = popularity_raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let pop_range = max_pop - min_pop;
    let max_price = raw.iter().map(|(_, g)| g.price).fold(0.0, f64::max);

    let records: Vec<GameRecord> = raw
        .into_iter()
        .zip(popularity_raw)
        .map(|((appid, game), pop)| {
            let popularity_score = if pop_range > EPSILON {
                (pop - min_pop) / pop_range * 100.0
            } else {
                0.0
            };
            let price_score = if max_price > EPSILON {
                (1.0 - game.price / max_price) * 100.0
            } else {
                100.0
            };
            let release_date = game.release_date.unwrap_or_else(|| "N/A".to_string());

            GameRecord {
                appid,
                name: game.name.unwrap_or_default(),
                genres: game.genres,
                categories: game.categories,
                tags: game.tags,
                release_year: release_year(&release_date),
                release_date,
                price_usd: game.price,
                positive_ratings: game.positive,
                negative_ratings: game.negative,
                quality_score: quality_score(game.positive, game.negative),
                popularity_score,
                price_score,
            }
        })
        .collect();

    tracing::info!(
        target: "gamefuzz::catalog",
        records = records.len(),
        max_price,
        "Prepared catalog"
    );
    records
}

/// Share of positive reviews as a percentage; 0 with no reviews.
pub fn quality_score(positive: u64, negative: u64) -> f64 {
    let total = positive as f64 + negative as f64;
    if total == 0.0 {
        return 0.0;
    }
    positive as f64 / total * 100.0
}

/// Midpoint of an owner range like `"20,000 - 50,000"`. Anything that does
/// not contain exactly two integers yields 0.
pub fn estimated_owners(range: &str) -> f64 {
    let cleaned = range.replace(',', "");
    let bounds: Vec<f64> = DIGITS_REGEX
        .find_iter(&cleaned)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    match bounds.as_slice() {
        [low, high] => (low + high) / 2.0,
        _ => 0.0,
    }
}

/// Year of a free-form release date, 0 when none can be found.
pub fn release_year(date: &str) -> i32 {
    let date = date.trim();
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, format) {
            return parsed.year();
        }
    }
    YEAR_REGEX
        .captures(date)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}
