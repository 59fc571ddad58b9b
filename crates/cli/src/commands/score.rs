//! CLI handler for the `score` command.

use crate::cli::OutputFormat;
use anyhow::Result;
use gamefuzz_engine::{evaluate, Evaluation, Inputs, RuleBase, FALLBACK_SCORE};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
struct ScoreOutput {
    inputs: Inputs,
    score: f64,
    /// True when no rule fired and the score is the fallback.
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<Evaluation>,
}

/// Handle the `score` command.
pub(crate) fn handle_score_command(
    rules: &RuleBase,
    inputs: Inputs,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let output = score(rules, inputs, explain)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print!("{}", render_score(&output)),
    }
    Ok(())
}

fn score(rules: &RuleBase, inputs: Inputs, explain: bool) -> Result<ScoreOutput> {
    let evaluation = evaluate(rules, inputs)?;
    let (score, fallback) = match evaluation.centroid {
        Some(score) => (score, false),
        None => (FALLBACK_SCORE, true),
    };
    Ok(ScoreOutput {
        inputs,
        score,
        fallback,
        explanation: explain.then_some(evaluation),
    })
}

fn render_score(output: &ScoreOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Score: {:.2}", output.score);
    if output.fallback {
        let _ = writeln!(out, "(no rule fired; fallback score)");
    }

    let Some(evaluation) = &output.explanation else {
        return out;
    };

    let _ = writeln!(out, "\nMembership degrees:");
    let mut current = "";
    for d in &evaluation.degrees {
        if d.variable != current {
            current = d.variable;
            let crisp = match d.variable {
                "kualitas" => output.inputs.quality,
                "popularitas" => output.inputs.popularity,
                _ => output.inputs.price,
            };
            let _ = writeln!(out, "  {} = {:.2}", d.variable, crisp);
        }
        let _ = writeln!(out, "    {:<8} {:.4}", d.label, d.degree);
    }

    let _ = writeln!(out, "\nRule firing strengths:");
    for firing in &evaluation.firings {
        let _ = writeln!(
            out,
            "  {:<10} -> {:<7} {:.4}",
            firing.rule, firing.consequent, firing.strength
        );
    }

    match evaluation.centroid {
        Some(c) => {
            let _ = writeln!(out, "\nCentroid: {c:.4}");
        }
        None => {
            let _ = writeln!(out, "\nCentroid: undefined (empty aggregate)");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamefuzz_engine::build_rule_base;

    #[test]
    fn plain_score_has_two_decimals() {
        let rules = build_rule_base().unwrap();
        let output = score(&rules, Inputs::new(0.0, 0.0, 0.0), false).unwrap();
        assert_eq!(render_score(&output), "Score: 13.00\n");
        assert!(!output.fallback);
    }

    #[test]
    fn fallback_is_reported() {
        let rules = build_rule_base().unwrap();
        let output = score(&rules, Inputs::new(60.0, 0.0, 100.0), true).unwrap();
        assert_eq!(output.score, 0.0);
        assert!(output.fallback);
        let text = render_score(&output);
        assert!(text.contains("fallback"));
        assert!(text.contains("undefined"));
    }

    #[test]
    fn explanation_lists_degrees_and_rules() {
        let rules = build_rule_base().unwrap();
        let output = score(&rules, Inputs::new(85.0, 100.0, 100.0), true).unwrap();
        let text = render_score(&output);
        assert!(text.contains("kualitas = 85.00"));
        assert!(text.contains("tinggi   0.5000"));
        assert!(text.contains("rule1"));
        assert!(text.contains("Centroid:"));
    }

    #[test]
    fn json_omits_explanation_unless_asked() {
        let rules = build_rule_base().unwrap();
        let plain = score(&rules, Inputs::new(50.0, 50.0, 50.0), false).unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("explanation").is_none());
        assert!(json["score"].is_f64());

        let explained = score(&rules, Inputs::new(50.0, 50.0, 50.0), true).unwrap();
        let json = serde_json::to_value(&explained).unwrap();
        assert_eq!(json["explanation"]["firings"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn non_finite_input_is_an_error() {
        let rules = build_rule_base().unwrap();
        assert!(score(&rules, Inputs::new(f64::NAN, 0.0, 0.0), false).is_err());
    }
}
