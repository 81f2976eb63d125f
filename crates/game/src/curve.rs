//! Keyframed response curves.
//!
//! Curves remap a normalized input to a normalized output and stand in for
//! hand-authored animation curves: the stick response curve shapes aim
//! acceleration, the recoil curve shapes kickback and its recovery tail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A keyless curve cannot be sampled, so construction refuses it.
#[derive(Debug, Error)]
#[error("a response curve needs at least one key")]
pub struct EmptyCurve;

/// A piecewise-linear curve over `[0, 1]`.
///
/// Keys are `(time, value)` pairs sorted by time. Sampling clamps to the
/// first/last key outside the keyed range. Deserialization goes through the
/// same checked constructor as code, so a curve with no keys can never
/// exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f32, f32)>", into = "Vec<(f32, f32)>")]
pub struct ResponseCurve {
    keys: Vec<(f32, f32)>,
}

impl TryFrom<Vec<(f32, f32)>> for ResponseCurve {
    type Error = EmptyCurve;

    fn try_from(mut keys: Vec<(f32, f32)>) -> Result<Self, EmptyCurve> {
        if keys.is_empty() {
            return Err(EmptyCurve);
        }
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { keys })
    }
}

impl From<ResponseCurve> for Vec<(f32, f32)> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

impl ResponseCurve {
    /// Build a curve from keys. Keys are sorted by time; at least one key is
    /// required (a single key yields a constant curve).
    pub fn new(keys: Vec<(f32, f32)>) -> Self {
        match Self::try_from(keys) {
            Ok(curve) => curve,
            Err(_) => panic!("a curve needs at least one key"),
        }
    }

    /// The identity curve: output equals input.
    pub fn identity() -> Self {
        Self::new(vec![(0.0, 0.0), (1.0, 1.0)])
    }

    /// Sample the curve at `t`.
    pub fn sample(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                let s = (t - t0) / span;
                return v0 + (v1 - v0) * s;
            }
        }

        last.1
    }

    /// Whether sampled values never decrease as `t` increases.
    ///
    /// Required of the stick response curve so conditioning cannot invert
    /// input ordering; the recoil curve is deliberately non-monotonic.
    pub fn is_monotonic(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[1].1 >= pair[0].1)
    }

    /// Number of keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_samples() {
        let curve = ResponseCurve::identity();
        assert_eq!(curve.sample(0.0), 0.0);
        assert_eq!(curve.sample(1.0), 1.0);
        assert!((curve.sample(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_outside_range() {
        let curve = ResponseCurve::new(vec![(0.2, 0.5), (0.8, 1.0)]);
        assert_eq!(curve.sample(0.0), 0.5);
        assert_eq!(curve.sample(1.0), 1.0);
    }

    #[test]
    fn test_interpolation_between_keys() {
        let curve = ResponseCurve::new(vec![(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]);
        assert!((curve.sample(0.25) - 0.5).abs() < 1e-6);
        assert!((curve.sample(0.75) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_detection() {
        assert!(ResponseCurve::identity().is_monotonic());
        let dip = ResponseCurve::new(vec![(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]);
        assert!(!dip.is_monotonic());
    }

    #[test]
    fn test_unsorted_keys_are_sorted() {
        let curve = ResponseCurve::new(vec![(1.0, 1.0), (0.0, 0.0)]);
        assert!((curve.sample(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_keyless_curve_is_unconstructible() {
        // The serde path funnels through the same conversion, so a config
        // carrying an empty key list is rejected at load instead of
        // panicking on the first sample.
        assert!(ResponseCurve::try_from(Vec::new()).is_err());
        let curve = ResponseCurve::try_from(vec![(0.7, 1.0), (0.2, 0.5)]).unwrap();
        assert_eq!(curve.sample(0.0), 0.5);
        assert_eq!(curve.key_count(), 2);
    }
}
