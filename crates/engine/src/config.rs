//! Rule-table construction.
//!
//! This is the only place where variables and labels are addressed by string.
//! An [`EngineSpec`] (typically deserialized from TOML) is resolved into the
//! closed label enums and validated before a [`RuleBase`] exists.

use crate::defuzz::Defuzzification;
use crate::error::ConfigError;
use crate::label::{
    Label, PopularityLabel, PriceLabel, QualityLabel, RecommendationLabel, HARGA, KUALITAS,
    POPULARITAS, REKOMENDASI,
};
use crate::rule::{Rule, Term};
use crate::rule_base::{RuleBase, Variables};
use crate::universe::{Universe, DEFAULT_RESOLUTION};
use crate::variable::LinguisticVariable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

type SetTable = &'static [(&'static str, [f64; 3])];

const DEFAULT_SETS: &[(&str, SetTable)] = &[
    (
        KUALITAS,
        &[
            ("rendah", [0.0, 0.0, 50.0]),
            ("sedang", [30.0, 65.0, 85.0]),
            ("tinggi", [70.0, 100.0, 100.0]),
        ],
    ),
    (
        POPULARITAS,
        &[
            ("rendah", [0.0, 0.0, 30.0]),
            ("sedang", [15.0, 40.0, 75.0]),
            ("tinggi", [50.0, 100.0, 100.0]),
        ],
    ),
    (
        HARGA,
        &[
            ("mahal", [0.0, 0.0, 35.0]),
            ("normal", [20.0, 50.0, 80.0]),
            ("murah", [65.0, 100.0, 100.0]),
        ],
    ),
    (
        REKOMENDASI,
        &[
            ("lemah", [0.0, 0.0, 40.0]),
            ("sedang", [30.0, 60.0, 80.0]),
            ("kuat", [70.0, 100.0, 100.0]),
        ],
    ),
];

type RuleRow = (&'static [(&'static str, &'static str)], &'static str);

const DEFAULT_RULES: &[RuleRow] = &[
    (&[(KUALITAS, "tinggi"), (POPULARITAS, "tinggi"), (HARGA, "murah")], "kuat"),
    (&[(KUALITAS, "tinggi"), (POPULARITAS, "sedang"), (HARGA, "murah")], "kuat"),
    (&[(KUALITAS, "tinggi"), (POPULARITAS, "tinggi"), (HARGA, "mahal")], "sedang"),
    (&[(KUALITAS, "sedang"), (POPULARITAS, "tinggi"), (HARGA, "murah")], "kuat"),
    (&[(KUALITAS, "rendah")], "lemah"),
    (&[(KUALITAS, "sedang"), (POPULARITAS, "sedang"), (HARGA, "normal")], "sedang"),
    (&[(POPULARITAS, "rendah"), (HARGA, "mahal")], "lemah"),
    (&[(KUALITAS, "tinggi"), (POPULARITAS, "rendah"), (HARGA, "murah")], "sedang"),
];

/// One rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Optional name; defaults to `rule<N>` by position.
    #[serde(default)]
    pub name: Option<String>,
    /// `(variable, label)` terms joined by AND.
    pub when: Vec<(String, String)>,
    /// Label of `rekomendasi`.
    pub then: String,
}

/// String-keyed description of the fuzzy system.
///
/// Every field is optional; anything left out takes the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSpec {
    /// Samples over `[0, 100]`.
    pub resolution: Option<usize>,
    /// Defuzzification method.
    pub defuzzification: Option<Defuzzification>,
    /// Triangle overrides: `variable -> label -> [a, b, c]`.
    pub sets: BTreeMap<String, BTreeMap<String, [f64; 3]>>,
    /// Replacement rule table. `None` keeps the built-in eight rules; an empty
    /// list is an error.
    pub rules: Option<Vec<RuleSpec>>,
}

impl EngineSpec {
    /// Resolve names, validate everything and build the rule base.
    pub fn build(&self) -> Result<RuleBase, ConfigError> {
        for (variable, labels) in &self.sets {
            if !DEFAULT_SETS.iter().any(|(name, _)| name == variable) {
                return Err(ConfigError::UnknownVariable(variable.clone()));
            }
            // Surfaces unknown labels before any variable is built.
            for label in labels.keys() {
                check_label(variable, label)?;
            }
        }

        let universe = Arc::new(Universe::percent(
            self.resolution.unwrap_or(DEFAULT_RESOLUTION),
        )?);
        let variables = Variables {
            quality: self.variable(&universe)?,
            popularity: self.variable(&universe)?,
            price: self.variable(&universe)?,
            recommendation: self.variable(&universe)?,
        };

        let rules = match &self.rules {
            Some(specs) => specs
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    let name = spec.name.clone().unwrap_or_else(|| default_rule_name(i));
                    let when: Vec<(&str, &str)> = spec
                        .when
                        .iter()
                        .map(|(v, l)| (v.as_str(), l.as_str()))
                        .collect();
                    parse_rule(name, &when, &spec.then)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_RULES
                .iter()
                .enumerate()
                .map(|(i, (when, then))| parse_rule(default_rule_name(i), when, then))
                .collect::<Result<Vec<_>, _>>()?,
        };

        RuleBase::new(variables, rules, self.defuzzification.unwrap_or_default())
    }

    /// Built-in sets for `L`'s variable with this spec's overrides applied.
    fn variable<L: Label>(
        &self,
        universe: &Arc<Universe>,
    ) -> Result<LinguisticVariable<L>, ConfigError> {
        let defaults = DEFAULT_SETS
            .iter()
            .find(|(name, _)| *name == L::VARIABLE)
            .map(|(_, sets)| *sets)
            .unwrap_or_default();
        let overrides = self.sets.get(L::VARIABLE);

        let mut sets = Vec::with_capacity(L::ALL.len());
        for (label, corners) in defaults {
            let corners = overrides
                .and_then(|o| o.get(*label))
                .copied()
                .unwrap_or(*corners);
            sets.push((resolve_label::<L>(label)?, corners));
        }
        LinguisticVariable::new(Arc::clone(universe), sets)
    }
}

/// The built-in system: default triangles, 101 samples, discrete centroid and
/// the eight-rule table.
pub fn build_rule_base() -> Result<RuleBase, ConfigError> {
    EngineSpec::default().build()
}

fn default_rule_name(index: usize) -> String {
    format!("rule{}", index + 1)
}

fn parse_rule(name: String, when: &[(&str, &str)], then: &str) -> Result<Rule, ConfigError> {
    let antecedent = when
        .iter()
        .map(|(variable, label)| Term::parse(variable, label))
        .collect::<Result<Vec<_>, _>>()?;
    let consequent = resolve_label::<RecommendationLabel>(then)?;
    Rule::new(name, antecedent, consequent)
}

fn resolve_label<L: Label>(label: &str) -> Result<L, ConfigError> {
    L::parse(label).ok_or_else(|| ConfigError::UnknownLabel {
        variable: L::VARIABLE.to_string(),
        label: label.to_string(),
    })
}

fn check_label(variable: &str, label: &str) -> Result<(), ConfigError> {
    match variable {
        KUALITAS => resolve_label::<QualityLabel>(label).map(drop),
        POPULARITAS => resolve_label::<PopularityLabel>(label).map(drop),
        HARGA => resolve_label::<PriceLabel>(label).map(drop),
        REKOMENDASI => resolve_label::<RecommendationLabel>(label).map(drop),
        other => Err(ConfigError::UnknownVariable(other.to_string())),
    }
}
