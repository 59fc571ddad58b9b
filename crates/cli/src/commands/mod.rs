//! CLI command handlers for the gamefuzz application.

mod prepare;
mod recommend;
mod rules;
mod score;

pub(crate) use prepare::{handle_prepare_command, prepare_catalog};
pub(crate) use recommend::{handle_recommend_command, RecommendArgs};
pub(crate) use rules::handle_rules_command;
pub(crate) use score::handle_score_command;

/// `1234567.4` as `"1,234,567"`.
pub(crate) fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value.is_sign_negative() && rounded != "0" {
        out.insert(0, '-');
    }
    out
}
