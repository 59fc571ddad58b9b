//! Error types for building and running the fuzzy system.

use thiserror::Error;

/// Errors raised while assembling a rule base.
///
/// These are fatal: a process holding an invalid configuration must not go on
/// to serve inference.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The universe bounds or sample count are unusable.
    #[error("invalid universe [{min}, {max}] with {resolution} samples: need min < max and 2 to 1000001 samples")]
    InvalidUniverse {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Number of samples.
        resolution: usize,
    },

    /// A membership triangle violates `a <= b <= c` or has a non-finite corner.
    #[error("malformed membership '{variable}.{label}': ({a}, {b}, {c}) must satisfy a <= b <= c")]
    MalformedMembership {
        /// Variable owning the set.
        variable: String,
        /// Label of the set.
        label: String,
        /// Left foot.
        a: f64,
        /// Peak.
        b: f64,
        /// Right foot.
        c: f64,
    },

    /// A variable name does not exist (or cannot be used where it appeared).
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A label name is not one of the variable's labels.
    #[error("unknown label '{label}' for variable '{variable}'")]
    UnknownLabel {
        /// Variable the label was looked up in.
        variable: String,
        /// The offending label.
        label: String,
    },

    /// A variable was built without a membership function for one of its labels.
    #[error("no membership function for '{variable}.{label}'")]
    MissingLabel {
        /// Variable being built.
        variable: String,
        /// Label without a set.
        label: String,
    },

    /// A rule has no antecedent terms.
    #[error("rule '{rule}' has an empty antecedent")]
    EmptyAntecedent {
        /// Name of the rule.
        rule: String,
    },

    /// The rule base has no rules at all.
    #[error("rule base contains no rules")]
    EmptyRuleBase,
}

/// Errors raised by a single inference call.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum InferenceError {
    /// A string-keyed lookup named a variable the rule base does not have.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A string-keyed lookup named a label the variable does not have.
    #[error("unknown label '{label}' for variable '{variable}'")]
    UnknownLabel {
        /// Variable the label was looked up in.
        variable: String,
        /// The offending label.
        label: String,
    },

    /// No rule fired, so the aggregated output has zero area.
    #[error("aggregated output is zero everywhere; no rule fired")]
    DegenerateAggregation,

    /// An input was NaN or infinite.
    #[error("input '{variable}' is not a finite number: {value}")]
    NonFiniteInput {
        /// Variable the input was meant for.
        variable: &'static str,
        /// The rejected value.
        value: f64,
    },
}
