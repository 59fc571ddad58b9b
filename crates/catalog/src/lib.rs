//! Game catalog preparation and recommendation on top of `gamefuzz-engine`.
//!
//! A raw store export is loaded with [`load_raw_catalog`], turned into
//! scored [`GameRecord`]s by [`prepare`] and persisted with
//! [`save_prepared`]. [`recommend`] filters a prepared catalog and ranks it
//! with any [`Scorer`], usually a [`FuzzyScorer`].
//!
//! ```
//! use gamefuzz_catalog::{parse_raw_catalog, prepare, recommend, Filter, FuzzyScorer, IDR_PER_USD};
//!
//! let raw = parse_raw_catalog(r#"{
//!     "1": {"name": "Loved", "price": 0.0, "positive": 99, "negative": 1,
//!           "estimated_owners": "100000 - 200000", "genres": ["Indie"]},
//!     "2": {"name": "Pricey", "price": 60.0, "positive": 10, "negative": 90,
//!           "estimated_owners": "0 - 20000", "genres": ["Indie"]}
//! }"#).unwrap();
//! let records = prepare(raw);
//!
//! let rules = gamefuzz_engine::build_rule_base().unwrap();
//! let report = recommend(&records, &Filter::default(), &FuzzyScorer::new(&rules), 5, IDR_PER_USD);
//! assert_eq!(report.recommendations[0].name, "Loved");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Catalog error types.
pub mod error;
/// Scoring raw records.
pub mod prepare;
/// Lenient reading of the raw store export.
pub mod raw;
/// Filtering and ranking.
pub mod recommend;
/// Prepared catalog persistence.
pub mod store;

pub use error::CatalogError;
pub use prepare::{estimated_owners, prepare, quality_score, release_year, GameRecord};
pub use raw::{load_raw_catalog, parse_raw_catalog, RawGame};
pub use recommend::{
    recommend, Filter, FuzzyScorer, Recommendation, RecommendationReport, Scorer, DEFAULT_LIMIT,
    IDR_PER_USD,
};
pub use store::{load_prepared, save_prepared};
