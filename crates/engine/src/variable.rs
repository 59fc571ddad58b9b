//! Linguistic variables: labeled membership functions over one universe.

use crate::error::ConfigError;
use crate::label::Label;
use crate::membership::{MembershipFunction, Triangle};
use crate::universe::Universe;
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// A named quantity described by one triangle per label of `L`.
#[derive(Debug, Clone)]
pub struct LinguisticVariable<L: Label> {
    universe: Arc<Universe>,
    /// Indexed by `L::index`.
    sets: Vec<Triangle>,
    _labels: PhantomData<L>,
}

impl<L: Label> LinguisticVariable<L> {
    /// Build from `(label, [a, b, c])` pairs. Every label must appear; later
    /// duplicates replace earlier ones.
    pub fn new(
        universe: Arc<Universe>,
        sets: impl IntoIterator<Item = (L, [f64; 3])>,
    ) -> Result<Self, ConfigError> {
        let mut slots: Vec<Option<Triangle>> = vec![None; L::ALL.len()];
        for (label, [a, b, c]) in sets {
            let triangle =
                Triangle::new(a, b, c).ok_or_else(|| ConfigError::MalformedMembership {
                    variable: L::VARIABLE.to_string(),
                    label: label.as_str().to_string(),
                    a,
                    b,
                    c,
                })?;
            slots[label.index()] = Some(triangle);
        }

        let sets = L::ALL
            .iter()
            .zip(slots)
            .map(|(label, slot)| {
                slot.ok_or_else(|| ConfigError::MissingLabel {
                    variable: L::VARIABLE.to_string(),
                    label: label.as_str().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            universe,
            sets,
            _labels: PhantomData,
        })
    }

    /// Variable name.
    pub fn name(&self) -> &'static str {
        L::VARIABLE
    }

    /// The domain this variable is defined over.
    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    /// Membership function of `label`.
    pub fn set(&self, label: L) -> &Triangle {
        &self.sets[label.index()]
    }

    /// Degree of `crisp` in every label's set. Values outside the universe are
    /// not clamped; they simply fall in the zero tails.
    pub fn fuzzify(&self, crisp: f64) -> Degrees<L> {
        Degrees {
            values: self.sets.iter().map(|s| s.degree(crisp)).collect(),
            _labels: PhantomData,
        }
    }

    /// `label`'s membership function sampled at every universe point.
    pub fn sample(&self, label: L) -> Vec<f64> {
        let set = self.set(label);
        self.universe.points().map(|x| set.degree(x)).collect()
    }

    /// Label definitions for display.
    pub fn describe(&self) -> VariableSummary {
        VariableSummary {
            name: L::VARIABLE,
            sets: L::ALL
                .iter()
                .map(|l| (l.as_str(), self.set(*l).corners()))
                .collect(),
        }
    }
}

/// Per-label membership degrees of one crisp value.
#[derive(Debug, Clone, PartialEq)]
pub struct Degrees<L: Label> {
    values: Vec<f64>,
    _labels: PhantomData<L>,
}

impl<L: Label> Degrees<L> {
    /// Degree of `label`.
    pub fn get(&self, label: L) -> f64 {
        self.values[label.index()]
    }

    /// `(label, degree)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        L::ALL.iter().copied().zip(self.values.iter().copied())
    }

    /// String-keyed view for callers at the configuration boundary.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(l, d)| (l.as_str(), d)).collect()
    }
}

/// Serializable description of a variable's sets.
#[derive(Debug, Clone, Serialize)]
pub struct VariableSummary {
    /// Variable name.
    pub name: &'static str,
    /// `(label, [a, b, c])` in label order.
    pub sets: Vec<(&'static str, [f64; 3])>,
}
