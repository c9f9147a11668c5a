use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Velocity curve: thrust multiplier as a function of surface speed
// ---------------------------------------------------------------------------

/// Keyed curve mapping surface speed (m/s) to a thrust multiplier.
///
/// Piecewise-linear between keys, held flat outside the key range.
/// An empty curve evaluates to 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct VelocityCurve {
    keys: Vec<(f64, f64)>,
}

impl VelocityCurve {
    /// Build from `(speed, value)` keys in any order.
    pub fn new(mut keys: Vec<(f64, f64)>) -> Self {
        keys.retain(|(s, v)| s.is_finite() && v.is_finite());
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    pub fn key(mut self, speed: f64, value: f64) -> Self {
        self.keys.push((speed, value));
        Self::new(self.keys)
    }

    pub fn keys(&self) -> &[(f64, f64)] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A NaN speed has no defined multiplier and evaluates to NaN.
    pub fn evaluate(&self, speed: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return 1.0,
        };
        if speed.is_nan() {
            return f64::NAN;
        }
        if speed <= first.0 {
            return first.1;
        }
        if speed >= last.0 {
            return last.1;
        }
        // First key strictly above `speed`; guaranteed to exist and be > 0 here.
        let hi = self.keys.partition_point(|(s, _)| *s <= speed);
        let (s0, v0) = self.keys[hi - 1];
        let (s1, v1) = self.keys[hi];
        let span = s1 - s0;
        if span <= 0.0 {
            return v1;
        }
        v0 + (speed - s0) / span * (v1 - v0)
    }
}

impl From<Vec<(f64, f64)>> for VelocityCurve {
    fn from(keys: Vec<(f64, f64)>) -> Self {
        Self::new(keys)
    }
}

impl From<VelocityCurve> for Vec<(f64, f64)> {
    fn from(curve: VelocityCurve) -> Self {
        curve.keys
    }
}
