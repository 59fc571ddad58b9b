//! The validated, immutable fuzzy system: variables plus rules.

use crate::defuzz::Defuzzification;
use crate::error::{ConfigError, InferenceError};
use crate::label::{
    Label, PopularityLabel, PriceLabel, QualityLabel, RecommendationLabel, HARGA, KUALITAS,
    POPULARITAS, REKOMENDASI,
};
use crate::rule::Rule;
use crate::variable::{LinguisticVariable, VariableSummary};
use std::collections::BTreeMap;

/// The four linguistic variables of the recommender.
#[derive(Debug, Clone)]
pub struct Variables {
    /// `kualitas` input.
    pub quality: LinguisticVariable<QualityLabel>,
    /// `popularitas` input.
    pub popularity: LinguisticVariable<PopularityLabel>,
    /// `harga` input.
    pub price: LinguisticVariable<PriceLabel>,
    /// `rekomendasi` output.
    pub recommendation: LinguisticVariable<RecommendationLabel>,
}

/// Ordered rules plus the variables they range over.
///
/// Built once at startup and shared read-only; inference never mutates it, so
/// a `&RuleBase` can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct RuleBase {
    variables: Variables,
    rules: Vec<Rule>,
    defuzzification: Defuzzification,
    /// Output sets sampled over the output universe, indexed by label.
    output_curves: Vec<Vec<f64>>,
}

impl RuleBase {
    /// Assemble a rule base. Fails with [`ConfigError::EmptyRuleBase`] when
    /// `rules` is empty.
    pub fn new(
        variables: Variables,
        rules: Vec<Rule>,
        defuzzification: Defuzzification,
    ) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleBase);
        }

        let output_curves = RecommendationLabel::ALL
            .iter()
            .map(|label| variables.recommendation.sample(*label))
            .collect();

        tracing::debug!(
            target: "gamefuzz::engine",
            rules = rules.len(),
            resolution = variables.recommendation.universe().resolution(),
            ?defuzzification,
            "Built rule base"
        );

        Ok(Self {
            variables,
            rules,
            defuzzification,
            output_curves,
        })
    }

    /// The linguistic variables.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Defuzzification method applied to the aggregated output.
    pub fn defuzzification(&self) -> Defuzzification {
        self.defuzzification
    }

    /// Sampled output set for `label`.
    pub(crate) fn output_curve(&self, label: RecommendationLabel) -> &[f64] {
        &self.output_curves[label.index()]
    }

    /// String-keyed fuzzification of `crisp` under the variable called `variable`.
    pub fn fuzzify(
        &self,
        variable: &str,
        crisp: f64,
    ) -> Result<BTreeMap<&'static str, f64>, InferenceError> {
        let v = &self.variables;
        match variable {
            KUALITAS => Ok(v.quality.fuzzify(crisp).to_map()),
            POPULARITAS => Ok(v.popularity.fuzzify(crisp).to_map()),
            HARGA => Ok(v.price.fuzzify(crisp).to_map()),
            REKOMENDASI => Ok(v.recommendation.fuzzify(crisp).to_map()),
            other => Err(InferenceError::UnknownVariable(other.to_string())),
        }
    }

    /// Set definitions of every variable, inputs first.
    pub fn describe(&self) -> Vec<VariableSummary> {
        let v = &self.variables;
        vec![
            v.quality.describe(),
            v.popularity.describe(),
            v.price.describe(),
            v.recommendation.describe(),
        ]
    }
}
