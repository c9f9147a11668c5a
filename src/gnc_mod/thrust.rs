use nalgebra::Vector3;

use crate::vehicle::PropulsionSource;

// ---------------------------------------------------------------------------
// Thrust estimation: vehicle-level thrust projected on the up axis
// ---------------------------------------------------------------------------

/// Summed vertical thrust of every active engine, in the engines' force unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrustEstimate {
    pub max_thrust: f64,
    pub current_thrust: f64,
}

impl ThrustEstimate {
    /// `(max_acceleration, current_acceleration)` for the given mass.
    /// `None` unless mass is positive and finite.
    pub fn accelerations(&self, mass: f64) -> Option<(f64, f64)> {
        if !(mass > 0.0) || !mass.is_finite() {
            return None;
        }
        Some((self.max_thrust / mass, self.current_thrust / mass))
    }
}

/// Mean thrust direction of a multi-nozzle engine: the average of the
/// negated nozzle axes. Zero when the engine has no nozzles.
pub fn mean_thrust_direction(nozzles: &[Vector3<f64>]) -> Vector3<f64> {
    let sum = nozzles.iter().fold(Vector3::<f64>::zeros(), |acc, d| acc - d);
    sum / nozzles.len().max(1) as f64
}

/// Maximum thrust one engine can deliver along `up`. Negative when the
/// engine pushes the vehicle down.
pub fn engine_max_thrust<S: PropulsionSource + ?Sized>(
    engine: &S,
    up: &Vector3<f64>,
    surface_speed: f64,
) -> f64 {
    let efficiency = mean_thrust_direction(engine.thrust_directions()).dot(up);
    let cap = engine.thrust_percentage_cap();
    let curve = if engine.velocity_curve_enabled() {
        engine.velocity_curve_value(surface_speed)
    } else {
        1.0
    };
    efficiency * cap * curve * engine.max_thrust()
}

/// Aggregate all active engines. Inactive engines are skipped entirely.
pub fn estimate_thrust<'a, S, I>(engines: I, up: &Vector3<f64>, surface_speed: f64) -> ThrustEstimate
where
    S: PropulsionSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    engines
        .into_iter()
        .filter(|e| e.is_active())
        .fold(ThrustEstimate::default(), |mut acc, e| {
            let thrust = engine_max_thrust(e, up, surface_speed);
            acc.max_thrust += thrust;
            acc.current_thrust += e.current_throttle() * thrust;
            acc
        })
}
