use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vehicle snapshot: read once per fixed tick
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub total_mass: f64,             // t
    pub up_axis: Vector3<f64>,       // unit, same frame as engine thrust directions
    pub surface_speed: f64,          // m/s
    pub altitude: f64,               // m above the body's mean surface
    pub terrain_altitude: f64,       // m, terrain height under the vehicle
    pub vertical_speed: f64,         // m/s, positive = climbing
    pub body_grav_parameter: f64,    // m^3/s^2
    pub body_radius: f64,            // m
}

impl VehicleState {
    /// Height above the terrain directly below.
    pub fn radar_altitude(&self) -> f64 {
        self.altitude - self.terrain_altitude
    }

    /// Distance from the reference body's centre.
    pub fn radius(&self) -> f64 {
        self.altitude + self.body_radius
    }
}

// ---------------------------------------------------------------------------
// Snapshot builder
// ---------------------------------------------------------------------------

pub struct VehicleStateBuilder {
    total_mass: f64,
    up_axis: Vector3<f64>,
    surface_speed: f64,
    altitude: f64,
    terrain_altitude: f64,
    vertical_speed: f64,
    body_grav_parameter: f64,
    body_radius: f64,
}

impl VehicleStateBuilder {
    /// Hovering at 100 m over flat terrain on a body with g = 9.81 at the surface.
    pub fn new() -> Self {
        Self {
            total_mass: 10.0,
            up_axis: Vector3::y(),
            surface_speed: 0.0,
            altitude: 100.0,
            terrain_altitude: 0.0,
            vertical_speed: 0.0,
            body_grav_parameter: crate::physics::gravity::KERBIN_MU,
            body_radius: crate::physics::gravity::KERBIN_RADIUS,
        }
    }

    pub fn total_mass(mut self, v: f64) -> Self { self.total_mass = v; self }
    pub fn up_axis(mut self, v: Vector3<f64>) -> Self { self.up_axis = v; self }
    pub fn surface_speed(mut self, v: f64) -> Self { self.surface_speed = v; self }
    pub fn altitude(mut self, v: f64) -> Self { self.altitude = v; self }
    pub fn terrain_altitude(mut self, v: f64) -> Self { self.terrain_altitude = v; self }
    pub fn vertical_speed(mut self, v: f64) -> Self { self.vertical_speed = v; self }
    pub fn body(mut self, grav_parameter: f64, radius: f64) -> Self {
        self.body_grav_parameter = grav_parameter;
        self.body_radius = radius;
        self
    }

    pub fn build(self) -> VehicleState {
        VehicleState {
            total_mass: self.total_mass,
            up_axis: self.up_axis,
            surface_speed: self.surface_speed,
            altitude: self.altitude,
            terrain_altitude: self.terrain_altitude,
            vertical_speed: self.vertical_speed,
            body_grav_parameter: self.body_grav_parameter,
            body_radius: self.body_radius,
        }
    }
}

impl Default for VehicleStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
