//! The raw catalog file: a JSON object mapping app ids to game details.
//!
//! Fields are read leniently. Numbers given as strings are parsed, anything
//! else unusable becomes 0 or empty, so one sloppy record does not reject the
//! whole catalog.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Game details as they appear in the raw catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawGame {
    /// Display name; records without one are dropped.
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    /// Price in USD.
    #[serde(deserialize_with = "number")]
    pub price: f64,
    /// Free-form release date.
    #[serde(deserialize_with = "text")]
    pub release_date: Option<String>,
    /// Positive review count.
    #[serde(deserialize_with = "count")]
    pub positive: u64,
    /// Negative review count.
    #[serde(deserialize_with = "count")]
    pub negative: u64,
    /// Owner range such as `"20,000 - 50,000"`.
    #[serde(deserialize_with = "text")]
    pub estimated_owners: Option<String>,
    /// Peak concurrent players.
    #[serde(deserialize_with = "count")]
    pub peak_ccu: u64,
    /// Genre names.
    #[serde(deserialize_with = "string_list")]
    pub genres: Vec<String>,
    /// Category names.
    #[serde(deserialize_with = "string_list")]
    pub categories: Vec<String>,
    /// Tag names; only the keys of a `{tag: votes}` object are kept.
    #[serde(deserialize_with = "tag_names")]
    pub tags: Vec<String>,
}

/// Read a raw catalog, keeping only records that have a name.
pub fn load_raw_catalog(path: &Path) -> Result<Vec<(String, RawGame)>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_raw_catalog(&content).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if records.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    tracing::debug!(
        target: "gamefuzz::catalog",
        path = %path.display(),
        records = records.len(),
        "Loaded raw catalog"
    );
    Ok(records)
}

/// Parse raw catalog JSON text. Records come back ordered by app id.
pub fn parse_raw_catalog(content: &str) -> Result<Vec<(String, RawGame)>, serde_json::Error> {
    let all: BTreeMap<String, RawGame> = serde_json::from_str(content)?;
    Ok(all
        .into_iter()
        .filter(|(_, game)| game.name.is_some())
        .collect())
}

fn as_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(as_number(&Value::deserialize(d)?).unwrap_or(0.0))
}

fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(as_number(&Value::deserialize(d)?)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u64)
        .unwrap_or(0))
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn tag_names<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map.into_iter().map(|(k, _)| k).collect(),
        _ => Vec::new(),
    })
}
