//! CLI handler for the `rules` command.

use crate::cli::OutputFormat;
use anyhow::Result;
use gamefuzz_engine::{Rule, RuleBase, VariableSummary};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
struct RuleTable<'a> {
    resolution: usize,
    defuzzification: &'static str,
    variables: Vec<VariableSummary>,
    rules: &'a [Rule],
}

impl<'a> RuleTable<'a> {
    fn new(rule_base: &'a RuleBase) -> Self {
        Self {
            resolution: rule_base
                .variables()
                .recommendation
                .universe()
                .resolution(),
            defuzzification: rule_base.defuzzification().as_str(),
            variables: rule_base.describe(),
            rules: rule_base.rules(),
        }
    }
}

/// Handle the `rules` command.
pub(crate) fn handle_rules_command(rules: &RuleBase, format: OutputFormat) -> Result<()> {
    let table = RuleTable::new(rules);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
        OutputFormat::Text => print!("{}", render_rules(&table)),
    }
    Ok(())
}

fn render_rules(table: &RuleTable<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fuzzy Rule Base");
    let _ = writeln!(out, "===============\n");
    let _ = writeln!(
        out,
        "Universe: [0, 100], {} samples; defuzzification: {}\n",
        table.resolution, table.defuzzification
    );

    let _ = writeln!(out, "Membership sets:");
    for variable in &table.variables {
        let _ = writeln!(out, "  {}", variable.name);
        for (label, [a, b, c]) in &variable.sets {
            let _ = writeln!(out, "    {label:<8} ({a}, {b}, {c})");
        }
    }

    let _ = writeln!(out, "\nRules:");
    for rule in table.rules {
        let _ = writeln!(out, "  {rule}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamefuzz_engine::{build_rule_base, EngineSpec};

    #[test]
    fn default_table_text() {
        let rules = build_rule_base().unwrap();
        let text = render_rules(&RuleTable::new(&rules));
        assert!(text.contains("101 samples; defuzzification: centroid"));
        assert!(text.contains("    sedang   (30, 65, 85)"));
        assert!(text.contains("  rule5: kualitas[rendah] -> rekomendasi[lemah]"));
        assert!(text.contains(
            "  rule7: popularitas[rendah] & harga[mahal] -> rekomendasi[lemah]"
        ));
        assert_eq!(text.matches("rekomendasi[").count(), 8);
    }

    #[test]
    fn json_reflects_configuration() {
        let spec: EngineSpec =
            toml::from_str("resolution = 201\ndefuzzification = \"trapezoid\"\n").unwrap();
        let rules = spec.build().unwrap();
        let json = serde_json::to_value(RuleTable::new(&rules)).unwrap();
        assert_eq!(json["resolution"], 201);
        assert_eq!(json["defuzzification"], "trapezoid");
        assert_eq!(json["variables"].as_array().unwrap().len(), 4);
        assert_eq!(json["rules"].as_array().unwrap().len(), 8);
    }
}
