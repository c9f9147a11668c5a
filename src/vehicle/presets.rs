use nalgebra::Vector3;

use super::curve::VelocityCurve;
use super::engine::{EngineBuilder, EngineSource};
use super::state::{VehicleState, VehicleStateBuilder};
use crate::physics::gravity::{MUN_MU, MUN_RADIUS};

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

/// Small lander ("Hopper"): one central engine, two canted radial engines.
pub fn hopper_engines(throttle: f64) -> Vec<EngineSource> {
    let cant = 15.0_f64.to_radians();
    vec![
        EngineBuilder::new("LV-909")
            .max_thrust(60.0)
            .current_throttle(throttle)
            .build(),
        EngineBuilder::new("Radial-L")
            .max_thrust(20.0)
            .current_throttle(throttle)
            .thrusting_along(Vector3::new(cant.sin(), cant.cos(), 0.0))
            .build(),
        EngineBuilder::new("Radial-R")
            .max_thrust(20.0)
            .current_throttle(throttle)
            .thrusting_along(Vector3::new(-cant.sin(), cant.cos(), 0.0))
            .build(),
    ]
}

/// The Hopper in a slow descent 500 m over the Mun's highlands.
pub fn hopper_on_mun() -> VehicleState {
    VehicleStateBuilder::new()
        .total_mass(4.5)
        .body(MUN_MU, MUN_RADIUS)
        .altitude(2_500.0)
        .terrain_altitude(2_000.0)
        .vertical_speed(-12.0)
        .surface_speed(12.5)
        .build()
}

/// Jet-assisted VTOL: the jet loses thrust with airspeed.
pub fn vtol_engines(throttle: f64) -> Vec<EngineSource> {
    vec![
        EngineBuilder::new("J-33")
            .max_thrust(120.0)
            .current_throttle(throttle)
            .velocity_curve(VelocityCurve::new(vec![
                (0.0, 1.0),
                (200.0, 0.95),
                (400.0, 0.6),
                (600.0, 0.0),
            ]))
            .build(),
        EngineBuilder::new("Aerospike")
            .max_thrust(180.0)
            .thrust_percentage(50.0)
            .current_throttle(throttle)
            .build(),
    ]
}
