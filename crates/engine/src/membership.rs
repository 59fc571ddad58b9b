//! Membership functions.

use serde::Serialize;

/// Maps a point of the domain to a degree of membership in `[0, 1]`.
pub trait MembershipFunction {
    /// Degree of membership of `x`. Total and pure: defined for every `f64`.
    fn degree(&self, x: f64) -> f64;
}

/// Triangular membership function with feet `a`, `c` and peak `b`.
///
/// `a == b` gives a left shoulder and `b == c` a right shoulder; both are
/// evaluated without dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// Returns `None` unless `a <= b <= c` and all corners are finite.
    pub fn new(a: f64, b: f64, c: f64) -> Option<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        (finite && a <= b && b <= c).then_some(Self { a, b, c })
    }

    /// Corners as `[a, b, c]`.
    pub fn corners(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Closed support `[a, c]`.
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }
}

impl MembershipFunction for Triangle {
    fn degree(&self, x: f64) -> f64 {
        if x.is_nan() || x < self.a || x > self.c {
            return 0.0;
        }
        // Checked before the slopes so shoulders (a == b or b == c) peak at 1.
        if x == self.b {
            return 1.0;
        }
        if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else {
            (self.c - x) / (self.c - self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: f64, b: f64, c: f64) -> Triangle {
        Triangle::new(a, b, c).unwrap()
    }

    #[test]
    fn interior_triangle() {
        let t = tri(30.0, 65.0, 85.0);
        assert_eq!(t.degree(30.0), 0.0);
        assert_eq!(t.degree(65.0), 1.0);
        assert_eq!(t.degree(85.0), 0.0);
        assert!((t.degree(47.5) - 0.5).abs() < 1e-12);
        assert!((t.degree(75.0) - 0.5).abs() < 1e-12);
        assert_eq!(t.degree(-5.0), 0.0);
        assert_eq!(t.degree(120.0), 0.0);
    }

    #[test]
    fn left_shoulder_peaks_at_left_foot() {
        let t = tri(0.0, 0.0, 50.0);
        assert_eq!(t.degree(0.0), 1.0);
        assert!((t.degree(25.0) - 0.5).abs() < 1e-12);
        assert_eq!(t.degree(50.0), 0.0);
        assert_eq!(t.degree(-0.1), 0.0);
    }

    #[test]
    fn right_shoulder_peaks_at_right_foot() {
        let t = tri(70.0, 100.0, 100.0);
        assert_eq!(t.degree(100.0), 1.0);
        assert!((t.degree(85.0) - 0.5).abs() < 1e-12);
        assert_eq!(t.degree(70.0), 0.0);
        assert_eq!(t.degree(100.5), 0.0);
    }

    #[test]
    fn singleton_is_one_only_at_peak() {
        let t = tri(40.0, 40.0, 40.0);
        assert_eq!(t.degree(40.0), 1.0);
        assert_eq!(t.degree(39.999), 0.0);
        assert_eq!(t.degree(40.001), 0.0);
    }

    #[test]
    fn nan_has_no_membership() {
        assert_eq!(tri(0.0, 50.0, 100.0).degree(f64::NAN), 0.0);
    }

    #[test]
    fn rejects_unordered_corners() {
        assert!(Triangle::new(10.0, 5.0, 20.0).is_none());
        assert!(Triangle::new(0.0, 30.0, 20.0).is_none());
        assert!(Triangle::new(0.0, f64::NAN, 20.0).is_none());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn ordered() -> impl Strategy<Value = (f64, f64, f64)> {
        (0.0f64..100.0, 0.0f64..100.0, 0.0f64..100.0).prop_map(|(x, y, z)| {
            let mut v = [x, y, z];
            v.sort_by(|p, q| p.total_cmp(q));
            (v[0], v[1], v[2])
        })
    }

    proptest! {
        #[test]
        fn degree_is_bounded((a, b, c) in ordered(), x in -50.0f64..150.0) {
            let d = Triangle::new(a, b, c).unwrap().degree(x);
            prop_assert!((0.0..=1.0).contains(&d));
        }

        #[test]
        fn corners_have_expected_degrees((a, b, c) in ordered()) {
            let t = Triangle::new(a, b, c).unwrap();
            prop_assert_eq!(t.degree(b), 1.0);
            if a < b {
                prop_assert_eq!(t.degree(a), 0.0);
            }
            if b < c {
                prop_assert_eq!(t.degree(c), 0.0);
            }
        }

        #[test]
        fn rises_then_falls((a, b, c) in ordered(), s in 0.0f64..1.0, t in 0.0f64..1.0) {
            let tri = Triangle::new(a, b, c).unwrap();
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };

            let x1 = (a + lo * (b - a)).min(b);
            let x2 = (a + hi * (b - a)).min(b);
            prop_assert!(tri.degree(x1) <= tri.degree(x2) + 1e-12);

            let y1 = (b + lo * (c - b)).clamp(b, c);
            let y2 = (b + hi * (c - b)).clamp(b, c);
            prop_assert!(tri.degree(y1) + 1e-12 >= tri.degree(y2));
        }
    }
}
