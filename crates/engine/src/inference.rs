//! Mamdani inference: fuzzify, fire rules, aggregate, defuzzify.
//!
//! Every call is a pure function of the rule base and its three inputs. No
//! state survives between calls, so the same `&RuleBase` may be used from any
//! number of threads.

use crate::error::InferenceError;
use crate::label::{
    Label, PopularityLabel, PriceLabel, QualityLabel, RecommendationLabel, HARGA, KUALITAS,
    POPULARITAS,
};
use crate::rule::Term;
use crate::rule_base::RuleBase;
use crate::variable::Degrees;
use serde::{Deserialize, Serialize};

/// Score returned by [`infer`] when no rule fires.
pub const FALLBACK_SCORE: f64 = 0.0;

/// The three crisp inputs of one record, each expected in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Share of positive ratings.
    pub quality: f64,
    /// Normalized owners and concurrent players.
    pub popularity: f64,
    /// Inverted price; 100 is free.
    pub price: f64,
}

impl Inputs {
    /// Bundle three inputs.
    pub fn new(quality: f64, popularity: f64, price: f64) -> Self {
        Self {
            quality,
            popularity,
            price,
        }
    }

    fn check_finite(&self) -> Result<(), InferenceError> {
        for (variable, value) in [
            (KUALITAS, self.quality),
            (POPULARITAS, self.popularity),
            (HARGA, self.price),
        ] {
            if !value.is_finite() {
                return Err(InferenceError::NonFiniteInput { variable, value });
            }
        }
        Ok(())
    }
}

/// Per-call state: the inputs and their fuzzified degrees. Lives only for the
/// duration of one evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    inputs: Inputs,
    quality: Degrees<QualityLabel>,
    popularity: Degrees<PopularityLabel>,
    price: Degrees<PriceLabel>,
}

impl EvaluationContext {
    /// Fuzzify `inputs` against the rule base's input variables.
    pub fn new(rule_base: &RuleBase, inputs: Inputs) -> Result<Self, InferenceError> {
        inputs.check_finite()?;
        let v = rule_base.variables();
        Ok(Self {
            inputs,
            quality: v.quality.fuzzify(inputs.quality),
            popularity: v.popularity.fuzzify(inputs.popularity),
            price: v.price.fuzzify(inputs.price),
        })
    }

    /// The crisp inputs.
    pub fn inputs(&self) -> Inputs {
        self.inputs
    }

    /// Degree of one antecedent term.
    pub fn degree(&self, term: Term) -> f64 {
        match term {
            Term::Kualitas(l) => self.quality.get(l),
            Term::Popularitas(l) => self.popularity.get(l),
            Term::Harga(l) => self.price.get(l),
        }
    }

    /// Every `(variable, label, degree)` in variable then label order.
    pub fn term_degrees(&self) -> Vec<TermDegree> {
        fn collect<L: Label>(degrees: &Degrees<L>, out: &mut Vec<TermDegree>) {
            out.extend(degrees.iter().map(|(label, degree)| TermDegree {
                variable: L::VARIABLE,
                label: label.as_str(),
                degree,
            }));
        }

        let mut out = Vec::new();
        collect(&self.quality, &mut out);
        collect(&self.popularity, &mut out);
        collect(&self.price, &mut out);
        out
    }
}

/// Degree of one input label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDegree {
    /// Variable name.
    pub variable: &'static str,
    /// Label name.
    pub label: &'static str,
    /// Membership degree in `[0, 1]`.
    pub degree: f64,
}

/// How strongly one rule fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    /// Rule name.
    pub rule: String,
    /// Output label the rule supports.
    pub consequent: RecommendationLabel,
    /// Minimum of the antecedent degrees.
    pub strength: f64,
}

/// Full trace of one inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The crisp inputs.
    pub inputs: Inputs,
    /// Fuzzified input degrees.
    pub degrees: Vec<TermDegree>,
    /// Firing strength of every rule, in rule order.
    pub firings: Vec<RuleFiring>,
    /// Aggregated output sampled over the output universe.
    pub aggregated: Vec<f64>,
    /// Defuzzified score; `None` when no rule fired.
    pub centroid: Option<f64>,
}

impl Evaluation {
    /// The defuzzified score, or [`InferenceError::DegenerateAggregation`].
    pub fn score(&self) -> Result<f64, InferenceError> {
        self.centroid.ok_or(InferenceError::DegenerateAggregation)
    }
}

/// Clip each rule's output set at its firing strength and take the pointwise
/// maximum over all rules. Rules with zero strength contribute nothing.
pub fn aggregate(rule_base: &RuleBase, firings: &[RuleFiring]) -> Vec<f64> {
    let resolution = rule_base.variables().recommendation.universe().resolution();
    let mut shape = vec![0.0_f64; resolution];

    for firing in firings.iter().filter(|f| f.strength > 0.0) {
        let curve = rule_base.output_curve(firing.consequent);
        for (out, &mu) in shape.iter_mut().zip(curve) {
            *out = out.max(mu.min(firing.strength));
        }
    }
    shape
}

/// Run one inference and keep every intermediate result.
pub fn evaluate(rule_base: &RuleBase, inputs: Inputs) -> Result<Evaluation, InferenceError> {
    let ctx = EvaluationContext::new(rule_base, inputs)?;

    let firings: Vec<RuleFiring> = rule_base
        .rules()
        .iter()
        .map(|rule| RuleFiring {
            rule: rule.name().to_string(),
            consequent: rule.consequent(),
            strength: rule.firing_strength(&ctx),
        })
        .collect();

    let aggregated = aggregate(rule_base, &firings);
    let universe = rule_base.variables().recommendation.universe();
    let centroid = match rule_base.defuzzification().defuzzify(universe, &aggregated) {
        Ok(score) => Some(score),
        Err(InferenceError::DegenerateAggregation) => None,
        Err(other) => return Err(other),
    };

    Ok(Evaluation {
        inputs,
        degrees: ctx.term_degrees(),
        firings,
        aggregated,
        centroid,
    })
}

/// Recommendation score for one record.
///
/// When no rule fires the score is [`FALLBACK_SCORE`] rather than an error;
/// only non-finite inputs fail.
pub fn infer(
    rule_base: &RuleBase,
    quality: f64,
    popularity: f64,
    price: f64,
) -> Result<f64, InferenceError> {
    let evaluation = evaluate(rule_base, Inputs::new(quality, popularity, price))?;
    match evaluation.score() {
        Ok(score) => {
            tracing::trace!(
                target: "gamefuzz::engine",
                quality,
                popularity,
                price,
                score,
                "Inferred recommendation"
            );
            Ok(score)
        }
        Err(InferenceError::DegenerateAggregation) => {
            tracing::debug!(
                target: "gamefuzz::engine",
                quality,
                popularity,
                price,
                "No rule fired; using fallback score"
            );
            Ok(FALLBACK_SCORE)
        }
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::build_rule_base;

    fn strength(evaluation: &Evaluation, rule: &str) -> f64 {
        evaluation
            .firings
            .iter()
            .find(|f| f.rule == rule)
            .map(|f| f.strength)
            .unwrap()
    }

    #[test]
    fn all_zero_inputs_fire_rule5() {
        let base = build_rule_base().unwrap();
        let e = evaluate(&base, Inputs::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(strength(&e, "rule5"), 1.0);
        assert_eq!(strength(&e, "rule7"), 1.0);
        assert_eq!(strength(&e, "rule1"), 0.0);
        // Only `lemah` (0, 0, 40) is present at full height.
        assert!((e.score().unwrap() - 13.0).abs() < 1e-6);
    }

    #[test]
    fn all_max_inputs_fire_rule1() {
        let base = build_rule_base().unwrap();
        let e = evaluate(&base, Inputs::new(100.0, 100.0, 100.0)).unwrap();
        assert_eq!(strength(&e, "rule1"), 1.0);
        assert_eq!(strength(&e, "rule3"), 0.0);
        assert_eq!(strength(&e, "rule5"), 0.0);
        // Only `kuat` (70, 100, 100): Σx(x-70) / Σ(x-70) over 70..=100.
        assert!((e.score().unwrap() - 42005.0 / 465.0).abs() < 1e-6);
    }

    #[test]
    fn no_rule_fired_falls_back() {
        let base = build_rule_base().unwrap();
        // kualitas sedang only, popularitas rendah, harga murah: no rule covers it.
        let e = evaluate(&base, Inputs::new(60.0, 0.0, 100.0)).unwrap();
        assert!(e.firings.iter().all(|f| f.strength == 0.0));
        assert!(e.aggregated.iter().all(|&v| v == 0.0));
        assert_eq!(e.score(), Err(InferenceError::DegenerateAggregation));
        assert_eq!(infer(&base, 60.0, 0.0, 100.0).unwrap(), FALLBACK_SCORE);
    }

    #[test]
    fn out_of_range_inputs_fall_back() {
        let base = build_rule_base().unwrap();
        assert_eq!(infer(&base, -10.0, -10.0, -10.0).unwrap(), FALLBACK_SCORE);
        assert_eq!(infer(&base, 150.0, 150.0, 150.0).unwrap(), FALLBACK_SCORE);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let base = build_rule_base().unwrap();
        assert!(matches!(
            infer(&base, 50.0, f64::NAN, 50.0),
            Err(InferenceError::NonFiniteInput {
                variable: "popularitas",
                ..
            })
        ));
        assert!(infer(&base, f64::INFINITY, 50.0, 50.0).is_err());
    }

    #[test]
    fn partial_firing_clips_output() {
        let base = build_rule_base().unwrap();
        // kualitas 85: tinggi 0.5; popularitas 100: tinggi 1; harga 100: murah 1.
        let e = evaluate(&base, Inputs::new(85.0, 100.0, 100.0)).unwrap();
        assert!((strength(&e, "rule1") - 0.5).abs() < 1e-12);
        let peak = e.aggregated.iter().cloned().fold(0.0, f64::max);
        assert!((peak - 0.5).abs() < 1e-12);
    }

    #[test]
    fn aggregation_takes_pointwise_max() {
        let base = build_rule_base().unwrap();
        let e = evaluate(&base, Inputs::new(55.0, 45.0, 50.0)).unwrap();
        for (i, &value) in e.aggregated.iter().enumerate() {
            let bound = e
                .firings
                .iter()
                .map(|f| base.output_curve(f.consequent)[i].min(f.strength))
                .fold(0.0, f64::max);
            assert_eq!(value, bound);
        }
    }

    #[test]
    fn aggregate_clips_and_ignores_unfired_rules() {
        let base = build_rule_base().unwrap();
        let firings = [
            RuleFiring {
                rule: "weak".into(),
                consequent: RecommendationLabel::Lemah,
                strength: 0.25,
            },
            RuleFiring {
                rule: "idle".into(),
                consequent: RecommendationLabel::Kuat,
                strength: 0.0,
            },
        ];
        let shape = aggregate(&base, &firings);
        assert_eq!(shape.len(), 101);
        assert_eq!(shape[0], 0.25);
        // lemah (0, 0, 40) is 0.5 at x = 20, clipped to 0.25.
        assert_eq!(shape[20], 0.25);
        assert_eq!(shape[35], 0.125);
        assert!(shape[40..].iter().all(|&v| v == 0.0));
        assert!(aggregate(&base, &[]).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn context_lists_every_input_label() {
        let base = build_rule_base().unwrap();
        let ctx = EvaluationContext::new(&base, Inputs::new(40.0, 40.0, 40.0)).unwrap();
        let degrees = ctx.term_degrees();
        assert_eq!(degrees.len(), 9);
        assert_eq!(degrees[0].variable, "kualitas");
        assert_eq!(degrees[8].label, "murah");
        assert_eq!(ctx.degree(Term::Popularitas(PopularityLabel::Sedang)), 1.0);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let base = build_rule_base().unwrap();
        let a = infer(&base, 72.5, 33.3, 61.0).unwrap();
        let b = infer(&base, 72.5, 33.3, 61.0).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
