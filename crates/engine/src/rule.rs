//! Rules: a conjunction of antecedent terms implying one output label.

use crate::error::ConfigError;
use crate::inference::EvaluationContext;
use crate::label::{
    Label, PopularityLabel, PriceLabel, QualityLabel, RecommendationLabel, HARGA, KUALITAS,
    POPULARITAS,
};
use serde::Serialize;
use std::fmt;

/// One `variable is label` condition over an input variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "variable", content = "label", rename_all = "lowercase")]
pub enum Term {
    /// `kualitas is ...`
    Kualitas(QualityLabel),
    /// `popularitas is ...`
    Popularitas(PopularityLabel),
    /// `harga is ...`
    Harga(PriceLabel),
}

impl Term {
    /// Resolve a `(variable, label)` pair from configuration.
    pub fn parse(variable: &str, label: &str) -> Result<Self, ConfigError> {
        fn resolve<L: Label>(label: &str) -> Result<L, ConfigError> {
            L::parse(label).ok_or_else(|| ConfigError::UnknownLabel {
                variable: L::VARIABLE.to_string(),
                label: label.to_string(),
            })
        }

        match variable {
            KUALITAS => resolve(label).map(Term::Kualitas),
            POPULARITAS => resolve(label).map(Term::Popularitas),
            HARGA => resolve(label).map(Term::Harga),
            other => Err(ConfigError::UnknownVariable(other.to_string())),
        }
    }

    /// Variable name of this term.
    pub fn variable(&self) -> &'static str {
        match self {
            Term::Kualitas(_) => KUALITAS,
            Term::Popularitas(_) => POPULARITAS,
            Term::Harga(_) => HARGA,
        }
    }

    /// Label name of this term.
    pub fn label(&self) -> &'static str {
        match self {
            Term::Kualitas(l) => l.as_str(),
            Term::Popularitas(l) => l.as_str(),
            Term::Harga(l) => l.as_str(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.variable(), self.label())
    }
}

/// `IF t1 AND t2 AND ... THEN rekomendasi is consequent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    name: String,
    antecedent: Vec<Term>,
    consequent: RecommendationLabel,
}

impl Rule {
    /// Build a rule; the antecedent must have at least one term.
    pub fn new(
        name: impl Into<String>,
        antecedent: Vec<Term>,
        consequent: RecommendationLabel,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if antecedent.is_empty() {
            return Err(ConfigError::EmptyAntecedent { rule: name });
        }
        Ok(Self {
            name,
            antecedent,
            consequent,
        })
    }

    /// Rule name, used in traces and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Antecedent terms in declaration order.
    pub fn antecedent(&self) -> &[Term] {
        &self.antecedent
    }

    /// Output label this rule supports.
    pub fn consequent(&self) -> RecommendationLabel {
        self.consequent
    }

    /// Fuzzy AND (minimum) of the antecedent degrees.
    pub fn firing_strength(&self, ctx: &EvaluationContext) -> f64 {
        self.antecedent
            .iter()
            .map(|term| ctx.degree(*term))
            .fold(1.0, f64::min)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, term) in self.antecedent.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, " -> rekomendasi[{}]", self.consequent)
    }
}
