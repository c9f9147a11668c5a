use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::curve::VelocityCurve;

// ---------------------------------------------------------------------------
// Propulsion source: what the thrust estimator needs to know about an engine
// ---------------------------------------------------------------------------

/// A single thrust-producing module on the vehicle.
///
/// Implement this for whatever engine representation the host uses; the
/// estimator only reads through these accessors and never mutates.
pub trait PropulsionSource {
    fn enabled(&self) -> bool;
    fn ignited(&self) -> bool;
    fn flamed_out(&self) -> bool;

    /// Nozzle forward axes in the vehicle frame. Exhaust leaves along these,
    /// so thrust acts along their negation.
    fn thrust_directions(&self) -> &[Vector3<f64>];

    /// Thrust limiter, fraction in [0, 1].
    fn thrust_percentage_cap(&self) -> f64;
    fn velocity_curve_enabled(&self) -> bool;
    fn velocity_curve_value(&self, speed: f64) -> f64;
    fn max_thrust(&self) -> f64;
    fn current_throttle(&self) -> f64;

    /// Contributes thrust this tick.
    fn is_active(&self) -> bool {
        self.enabled() && self.ignited() && !self.flamed_out()
    }
}

// ---------------------------------------------------------------------------
// Engine record supplied by the host each tick
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSource {
    #[serde(default)]
    pub name: String,
    pub enabled: bool,
    pub ignited: bool,
    #[serde(default)]
    pub flamed_out: bool,
    pub thrust_directions: Vec<Vector3<f64>>,
    #[serde(default = "full_cap")]
    pub thrust_percentage_cap: f64, // fraction, not percent
    #[serde(default)]
    pub velocity_curve_enabled: bool,
    #[serde(default)]
    pub velocity_curve: VelocityCurve,
    pub max_thrust: f64,              // kN
    #[serde(default)]
    pub current_throttle: f64,
}

fn full_cap() -> f64 {
    1.0
}

impl PropulsionSource for EngineSource {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn ignited(&self) -> bool {
        self.ignited
    }

    fn flamed_out(&self) -> bool {
        self.flamed_out
    }

    fn thrust_directions(&self) -> &[Vector3<f64>] {
        &self.thrust_directions
    }

    fn thrust_percentage_cap(&self) -> f64 {
        self.thrust_percentage_cap
    }

    fn velocity_curve_enabled(&self) -> bool {
        self.velocity_curve_enabled
    }

    fn velocity_curve_value(&self, speed: f64) -> f64 {
        self.velocity_curve.evaluate(speed)
    }

    fn max_thrust(&self) -> f64 {
        self.max_thrust
    }

    fn current_throttle(&self) -> f64 {
        self.current_throttle
    }
}

/// Borrow a homogeneous engine list as trait objects.
pub fn as_sources<'a, S: PropulsionSource + 'a>(engines: &'a [S]) -> Vec<&'a dyn PropulsionSource> {
    engines.iter().map(|e| e as &dyn PropulsionSource).collect()
}

// ---------------------------------------------------------------------------
// Engine builder
// ---------------------------------------------------------------------------

/// Defaults describe a single running engine whose nozzle points straight
/// down the vehicle's -Y axis (thrust along +Y, the vehicle "up").
pub struct EngineBuilder {
    name: String,
    enabled: bool,
    ignited: bool,
    flamed_out: bool,
    thrust_directions: Vec<Vector3<f64>>,
    thrust_percentage_cap: f64,
    velocity_curve: Option<VelocityCurve>,
    max_thrust: f64,
    current_throttle: f64,
}

impl EngineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            ignited: true,
            flamed_out: false,
            thrust_directions: vec![-Vector3::<f64>::y()],
            thrust_percentage_cap: 1.0,
            velocity_curve: None,
            max_thrust: 100.0,
            current_throttle: 0.0,
        }
    }

    pub fn enabled(mut self, v: bool) -> Self { self.enabled = v; self }
    pub fn ignited(mut self, v: bool) -> Self { self.ignited = v; self }
    pub fn flamed_out(mut self, v: bool) -> Self { self.flamed_out = v; self }
    pub fn max_thrust(mut self, v: f64) -> Self { self.max_thrust = v; self }
    pub fn current_throttle(mut self, v: f64) -> Self { self.current_throttle = v; self }
    pub fn thrust_cap(mut self, fraction: f64) -> Self { self.thrust_percentage_cap = fraction; self }

    /// Thrust limiter as the host shows it, 0-100.
    pub fn thrust_percentage(mut self, pct: f64) -> Self {
        self.thrust_percentage_cap = pct * 0.01;
        self
    }

    /// Replace all nozzle axes.
    pub fn nozzles(mut self, dirs: Vec<Vector3<f64>>) -> Self {
        self.thrust_directions = dirs;
        self
    }

    /// Single nozzle whose thrust acts along `thrust_axis`.
    pub fn thrusting_along(mut self, thrust_axis: Vector3<f64>) -> Self {
        self.thrust_directions = vec![-thrust_axis];
        self
    }

    pub fn velocity_curve(mut self, curve: VelocityCurve) -> Self {
        self.velocity_curve = Some(curve);
        self
    }

    pub fn build(self) -> EngineSource {
        EngineSource {
            name: self.name,
            enabled: self.enabled,
            ignited: self.ignited,
            flamed_out: self.flamed_out,
            thrust_directions: self.thrust_directions,
            thrust_percentage_cap: self.thrust_percentage_cap,
            velocity_curve_enabled: self.velocity_curve.is_some(),
            velocity_curve: self.velocity_curve.unwrap_or_default(),
            max_thrust: self.max_thrust,
            current_throttle: self.current_throttle,
        }
    }
}
