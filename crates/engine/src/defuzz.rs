//! Defuzzification: reducing a sampled output shape to one crisp value.

use crate::error::InferenceError;
use crate::universe::Universe;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the aggregated output is turned into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Defuzzification {
    /// Discrete center of gravity, `Σ x·μ(x) / Σ μ(x)` over the sample points.
    #[default]
    Centroid,
    /// Center of gravity of the piecewise-linear shape through the samples,
    /// integrated one trapezoid per sample interval.
    Trapezoid,
}

impl Defuzzification {
    /// Crisp value of `shape`, sampled at the points of `universe`.
    ///
    /// Returns [`InferenceError::DegenerateAggregation`] when the shape has no
    /// area.
    pub fn defuzzify(self, universe: &Universe, shape: &[f64]) -> Result<f64, InferenceError> {
        debug_assert_eq!(shape.len(), universe.resolution());
        match self {
            Defuzzification::Centroid => discrete_centroid(universe, shape),
            Defuzzification::Trapezoid => trapezoid_centroid(universe, shape),
        }
    }

    /// Configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Defuzzification::Centroid => "centroid",
            Defuzzification::Trapezoid => "trapezoid",
        }
    }
}

impl FromStr for Defuzzification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centroid" => Ok(Defuzzification::Centroid),
            "trapezoid" => Ok(Defuzzification::Trapezoid),
            other => Err(format!(
                "unknown defuzzification '{other}' (expected 'centroid' or 'trapezoid')"
            )),
        }
    }
}

fn discrete_centroid(universe: &Universe, shape: &[f64]) -> Result<f64, InferenceError> {
    let (moment, mass) = universe
        .points()
        .zip(shape)
        .fold((0.0, 0.0), |(m, s), (x, &mu)| (m + x * mu, s + mu));

    if mass <= 0.0 {
        return Err(InferenceError::DegenerateAggregation);
    }
    Ok(moment / mass)
}

fn trapezoid_centroid(universe: &Universe, shape: &[f64]) -> Result<f64, InferenceError> {
    let points: Vec<f64> = universe.points().collect();
    let mut moment = 0.0;
    let mut area = 0.0;

    for (xs, ys) in points.windows(2).zip(shape.windows(2)) {
        let (x1, x2) = (xs[0], xs[1]);
        let (y1, y2) = (ys[0], ys[1]);
        let height = y1 + y2;
        if height <= 0.0 {
            continue;
        }
        let dx = x2 - x1;
        let segment_area = 0.5 * dx * height;
        let segment_centroid = x1 + dx * (y1 + 2.0 * y2) / (3.0 * height);
        moment += segment_centroid * segment_area;
        area += segment_area;
    }

    if area <= 0.0 {
        return Err(InferenceError::DegenerateAggregation);
    }
    Ok(moment / area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{MembershipFunction, Triangle};

    fn sampled(a: f64, b: f64, c: f64) -> (Universe, Vec<f64>) {
        let u = Universe::default();
        let t = Triangle::new(a, b, c).unwrap();
        let shape = u.points().map(|x| t.degree(x)).collect();
        (u, shape)
    }

    #[test]
    fn symmetric_triangle_centroid_is_its_peak() {
        let (u, shape) = sampled(40.0, 60.0, 80.0);
        for method in [Defuzzification::Centroid, Defuzzification::Trapezoid] {
            let c = method.defuzzify(&u, &shape).unwrap();
            assert!((c - 60.0).abs() < 1e-9, "{method:?} gave {c}");
        }
    }

    #[test]
    fn left_shoulder_centroids() {
        let (u, shape) = sampled(0.0, 0.0, 40.0);
        // Σx(40-x) / Σ(40-x) over x = 0..=40 is 10660 / 820.
        let discrete = Defuzzification::Centroid.defuzzify(&u, &shape).unwrap();
        assert!((discrete - 13.0).abs() < 1e-9);
        let trapezoid = Defuzzification::Trapezoid.defuzzify(&u, &shape).unwrap();
        assert!((trapezoid - 40.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn flat_shape_centroid_is_the_middle() {
        let u = Universe::default();
        let shape = vec![0.3; u.resolution()];
        for method in [Defuzzification::Centroid, Defuzzification::Trapezoid] {
            let c = method.defuzzify(&u, &shape).unwrap();
            assert!((c - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_shape_is_degenerate() {
        let u = Universe::default();
        let shape = vec![0.0; u.resolution()];
        for method in [Defuzzification::Centroid, Defuzzification::Trapezoid] {
            assert_eq!(
                method.defuzzify(&u, &shape),
                Err(InferenceError::DegenerateAggregation)
            );
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!(
            "Trapezoid".parse::<Defuzzification>().unwrap(),
            Defuzzification::Trapezoid
        );
        assert_eq!(
            " centroid ".parse::<Defuzzification>().unwrap(),
            Defuzzification::Centroid
        );
        assert!("bisector".parse::<Defuzzification>().is_err());
    }
}
