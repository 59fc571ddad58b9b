//! Mamdani fuzzy inference for game recommendations.
//!
//! Three crisp scores in `[0, 100]` (quality, popularity, inverted price) are
//! fuzzified against triangular sets, combined by an eight-rule table with
//! min-AND, aggregated by pointwise max and defuzzified by centroid into one
//! recommendation score.
//!
//! The rule base is built and validated once; [`infer`] is a pure function of
//! it, so scoring parallelizes without locks (see [`score_batch`]).
//!
//! # Examples
//!
//! ```
//! use gamefuzz_engine::{build_rule_base, infer};
//!
//! let rules = build_rule_base().unwrap();
//! let strong = infer(&rules, 100.0, 100.0, 100.0).unwrap();
//! let weak = infer(&rules, 0.0, 0.0, 0.0).unwrap();
//! assert!(strong > 70.0);
//! assert!(weak < 30.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Parallel scoring.
pub mod batch;
/// String-keyed configuration and the built-in rule table.
pub mod config;
/// Defuzzification methods.
pub mod defuzz;
/// Error types.
pub mod error;
/// Per-record inference.
pub mod inference;
/// Closed label sets.
pub mod label;
/// Membership functions.
pub mod membership;
/// Rules and antecedent terms.
pub mod rule;
/// The validated rule base.
pub mod rule_base;
/// The sampled domain.
pub mod universe;
/// Linguistic variables.
pub mod variable;

pub use batch::score_batch;
pub use config::{build_rule_base, EngineSpec, RuleSpec};
pub use defuzz::Defuzzification;
pub use error::{ConfigError, InferenceError};
pub use inference::{
    aggregate, evaluate, infer, Evaluation, EvaluationContext, Inputs, RuleFiring, TermDegree,
    FALLBACK_SCORE,
};
pub use label::{Label, PopularityLabel, PriceLabel, QualityLabel, RecommendationLabel};
pub use membership::{MembershipFunction, Triangle};
pub use rule::{Rule, Term};
pub use rule_base::{RuleBase, Variables};
pub use universe::{Universe, MAX_RESOLUTION};
pub use variable::{Degrees, LinguisticVariable, VariableSummary};
