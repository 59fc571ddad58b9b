//! Parallel scoring of many records against one rule base.

use crate::error::InferenceError;
use crate::inference::{infer, Inputs};
use crate::rule_base::RuleBase;
use rayon::prelude::*;

/// Score every input on the rayon pool. Results keep the input order.
pub fn score_batch(rule_base: &RuleBase, inputs: &[Inputs]) -> Vec<Result<f64, InferenceError>> {
    inputs
        .par_iter()
        .map(|i| infer(rule_base, i.quality, i.popularity, i.price))
        .collect()
}
