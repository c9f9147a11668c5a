use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::physics::gravity::local_gravity;
use crate::vehicle::{PropulsionSource, VehicleState};
use super::guidance::resolve_target;
use super::thrust::estimate_thrust;
use super::throttle::{solve_throttle, CompensationLaw, ThrottleGains};

/// Setpoints offered as one-press speed buttons, m/s.
pub const SPEED_PRESETS: [f64; 5] = [30.0, 2.5, 0.0, -2.5, -30.0];

// ---------------------------------------------------------------------------
// Tunable parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParameters {
    pub engaged: bool,
    pub auto_land: bool,
    pub target_vertical_speed: f64, // m/s
    pub landing_multiplier: f64,    // (m/s) per m of radar altitude
    pub compensation_multiplier: f64,
    pub compensation_power: f64,
    pub compensation_law: CompensationLaw,
}

impl Default for ControllerParameters {
    fn default() -> Self {
        Self {
            engaged: false,
            auto_land: false,
            target_vertical_speed: 0.0,
            landing_multiplier: 0.1,
            compensation_multiplier: 10.0,
            compensation_power: 3.0,
            compensation_law: CompensationLaw::Literal,
        }
    }
}

impl ControllerParameters {
    pub fn gains(&self) -> ThrottleGains {
        ThrottleGains {
            multiplier: self.compensation_multiplier,
            power: self.compensation_power,
            law: self.compensation_law,
        }
    }

    pub fn mode(&self) -> EngagementMode {
        match (self.engaged, self.auto_land) {
            (false, _) => EngagementMode::Disengaged,
            (true, true) => EngagementMode::AutoLand,
            (true, false) => EngagementMode::ManualHold(self.target_vertical_speed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngagementMode {
    Disengaged,
    ManualHold(f64),
    AutoLand,
}

// ---------------------------------------------------------------------------
// Per-tick outputs
// ---------------------------------------------------------------------------

/// Everything computed in one tick. Thrust in kN, mass in t, accelerations
/// in m/s^2, speeds in m/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerOutputs {
    pub vessel_mass: f64,
    pub vertical_speed: f64,
    pub max_thrust: f64,
    pub current_thrust: f64,
    pub max_acceleration: f64,
    pub current_acceleration: f64,
    pub gravity: f64,
    pub effective_target: f64,
    pub desired_acceleration: f64,
    pub acceleration_error: f64,
    pub compensated_acceleration: f64,
    pub throttle: f64, // [0, 1]
}

/// Why a tick produced no new outputs. Never fatal: the previous outputs
/// stay in place and the next tick tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TickSkipped {
    #[error("no active vessel")]
    NoActiveVessel,
    #[error("vessel mass is not positive")]
    NonPositiveMass,
    #[error("vessel is not above the reference body's centre")]
    NonPositiveRadius,
}

/// Flight-control output the host reads after the fly-by-wire callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightCtrlState {
    pub main_throttle: f64,
}

/// Full control computation for one tick; a pure function of its inputs.
pub fn compute_outputs<'a, S, I>(
    params: &ControllerParameters,
    vehicle: &VehicleState,
    engines: I,
) -> Result<ControllerOutputs, TickSkipped>
where
    S: PropulsionSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let thrust = estimate_thrust(engines, &vehicle.up_axis, vehicle.surface_speed);
    let (max_acceleration, current_acceleration) = thrust
        .accelerations(vehicle.total_mass)
        .ok_or(TickSkipped::NonPositiveMass)?;

    let gravity = local_gravity(vehicle.body_grav_parameter, vehicle.body_radius, vehicle.altitude)
        .ok_or(TickSkipped::NonPositiveRadius)?;

    let effective_target = resolve_target(
        params.target_vertical_speed,
        params.auto_land,
        params.landing_multiplier,
        vehicle.radar_altitude(),
    );

    let solution = solve_throttle(
        gravity,
        vehicle.vertical_speed,
        effective_target,
        current_acceleration,
        max_acceleration,
        &params.gains(),
    );

    Ok(ControllerOutputs {
        vessel_mass: vehicle.total_mass,
        vertical_speed: vehicle.vertical_speed,
        max_thrust: thrust.max_thrust,
        current_thrust: thrust.current_thrust,
        max_acceleration,
        current_acceleration,
        gravity,
        effective_target,
        desired_acceleration: solution.desired_acceleration,
        acceleration_error: solution.acceleration_error,
        compensated_acceleration: solution.compensated_acceleration,
        throttle: solution.throttle,
    })
}

// ---------------------------------------------------------------------------
// Vertical-speed autopilot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct VerticalSpeedAutopilot {
    pub params: ControllerParameters,
    outputs: ControllerOutputs,
}

impl VerticalSpeedAutopilot {
    pub fn new(params: ControllerParameters) -> Self {
        Self { params, outputs: ControllerOutputs::default() }
    }

    pub fn outputs(&self) -> &ControllerOutputs {
        &self.outputs
    }

    pub fn mode(&self) -> EngagementMode {
        self.params.mode()
    }

    /// Recompute outputs. Runs whether or not the autopilot is engaged;
    /// only [`fly_by_wire`](Self::fly_by_wire) looks at `engaged`.
    pub fn tick<'a, S, I>(
        &mut self,
        vehicle: &VehicleState,
        engines: I,
    ) -> Result<&ControllerOutputs, TickSkipped>
    where
        S: PropulsionSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        match compute_outputs(&self.params, vehicle, engines) {
            Ok(out) => {
                trace!(?out, "tick");
                self.outputs = out;
                Ok(&self.outputs)
            }
            Err(reason) => {
                debug!(%reason, "tick skipped");
                Err(reason)
            }
        }
    }

    /// Flight-control callback: command the main throttle when engaged.
    pub fn fly_by_wire(&self, fcs: &mut FlightCtrlState) {
        if self.params.engaged {
            fcs.main_throttle = self.outputs.throttle;
        }
    }

    // -- engagement buttons ------------------------------------------------

    /// Speed button: hold `target`.
    pub fn select_speed(&mut self, target: f64) {
        self.transition(|p| {
            p.engaged = true;
            p.target_vertical_speed = target;
        });
    }

    /// AUTO button: flips autoland and always engages.
    pub fn toggle_auto(&mut self) {
        self.transition(|p| {
            p.engaged = true;
            p.auto_land = !p.auto_land;
        });
    }

    /// OFF button.
    pub fn disengage(&mut self) {
        self.transition(|p| p.engaged = false);
    }

    fn transition(&mut self, f: impl FnOnce(&mut ControllerParameters)) {
        let from = self.params.mode();
        f(&mut self.params);
        let to = self.params.mode();
        if from != to {
            info!(?from, ?to, "engagement changed");
        }
    }
}

impl super::Controller for VerticalSpeedAutopilot {
    fn update(
        &mut self,
        vehicle: &VehicleState,
        engines: &[&dyn PropulsionSource],
    ) -> Result<(), TickSkipped> {
        self.tick(vehicle, engines.iter().copied()).map(|_| ())
    }

    fn fly_by_wire(&self, fcs: &mut FlightCtrlState) {
        VerticalSpeedAutopilot::fly_by_wire(self, fcs);
    }

    fn reset(&mut self) {
        self.outputs = ControllerOutputs::default();
    }

    fn name(&self) -> &str {
        "VerticalSpeedAutopilot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    use crate::vehicle::{EngineBuilder, EngineSource, VehicleStateBuilder};

    /// G / r^2 = 9.81 with r = 1000 m.
    const TEST_MU: f64 = 9.81e6;

    fn scenario_vehicle() -> VehicleState {
        VehicleStateBuilder::new()
            .total_mass(10.0)
            .body(TEST_MU, 900.0)
            .altitude(100.0)
            .vertical_speed(0.0)
            .build()
    }

    fn half_throttle_engine() -> Vec<EngineSource> {
        vec![EngineBuilder::new("main").max_thrust(1000.0).current_throttle(0.5).build()]
    }

    #[test]
    fn reference_scenario_cuts_throttle() {
        let params = ControllerParameters::default();
        let out = compute_outputs(&params, &scenario_vehicle(), &half_throttle_engine()).unwrap();
        assert!((out.gravity - 9.81).abs() < 1e-9);
        assert!((out.desired_acceleration - 9.81).abs() < 1e-9);
        assert!((out.current_acceleration - 50.0).abs() < 1e-9);
        assert!((out.acceleration_error - 40.19).abs() < 1e-9);
        assert!(out.compensated_acceleration < -1e7);
        assert_eq!(out.throttle, 0.0);
    }

    #[test]
    fn opposed_engines_fall_back_to_zero_throttle() {
        let engines = vec![
            EngineBuilder::new("up").max_thrust(500.0).build(),
            EngineBuilder::new("down").max_thrust(500.0).thrusting_along(-Vector3::<f64>::y()).build(),
        ];
        let out = compute_outputs(&ControllerParameters::default(), &scenario_vehicle(), &engines).unwrap();
        assert!(out.max_acceleration.abs() < 1e-12);
        assert_eq!(out.throttle, 0.0);
    }

    #[test]
    fn autoland_target_uses_radar_altitude() {
        let params = ControllerParameters {
            auto_land: true,
            landing_multiplier: 0.1,
            target_vertical_speed: -1.0,
            ..Default::default()
        };
        let vehicle = VehicleStateBuilder::new()
            .body(TEST_MU, 900.0)
            .altitude(300.0)
            .terrain_altitude(100.0)
            .build();
        let out = compute_outputs(&params, &vehicle, &half_throttle_engine()).unwrap();
        assert!((out.effective_target - (-21.0)).abs() < 1e-9);
    }

    #[test]
    fn skipped_tick_keeps_previous_outputs() {
        let mut ap = VerticalSpeedAutopilot::default();
        let before = *ap.tick(&scenario_vehicle(), &half_throttle_engine()).unwrap();

        let massless = VehicleState { total_mass: 0.0, ..scenario_vehicle() };
        assert_eq!(ap.tick(&massless, &half_throttle_engine()), Err(TickSkipped::NonPositiveMass));
        assert_eq!(*ap.outputs(), before);

        let inside = VehicleState { altitude: -2_000.0, ..scenario_vehicle() };
        assert_eq!(ap.tick(&inside, &half_throttle_engine()), Err(TickSkipped::NonPositiveRadius));
        assert_eq!(*ap.outputs(), before);
    }

    #[test]
    fn tick_is_idempotent() {
        let mut ap = VerticalSpeedAutopilot::default();
        ap.select_speed(-2.5);
        let vehicle = VehicleState { vertical_speed: -4.0, ..scenario_vehicle() };
        let a = *ap.tick(&vehicle, &half_throttle_engine()).unwrap();
        let b = *ap.tick(&vehicle, &half_throttle_engine()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn disengaged_does_not_touch_flight_controls() {
        let mut ap = VerticalSpeedAutopilot::default();
        let engines = vec![EngineBuilder::new("main").max_thrust(1000.0).build()];
        let falling = VehicleState { vertical_speed: -10.0, ..scenario_vehicle() };
        ap.tick(&falling, &engines).unwrap();
        assert!(ap.outputs().throttle > 0.0);

        let mut fcs = FlightCtrlState { main_throttle: 0.42 };
        ap.fly_by_wire(&mut fcs);
        assert_eq!(fcs.main_throttle, 0.42);

        ap.select_speed(0.0);
        ap.fly_by_wire(&mut fcs);
        assert_eq!(fcs.main_throttle, ap.outputs().throttle);
    }

    #[test]
    fn engagement_state_machine() {
        let mut ap = VerticalSpeedAutopilot::default();
        assert_eq!(ap.mode(), EngagementMode::Disengaged);

        ap.select_speed(2.5);
        assert_eq!(ap.mode(), EngagementMode::ManualHold(2.5));

        ap.toggle_auto();
        assert_eq!(ap.mode(), EngagementMode::AutoLand);

        ap.select_speed(-30.0);
        assert_eq!(ap.mode(), EngagementMode::AutoLand, "speed button keeps autoland on");
        assert_eq!(ap.params.target_vertical_speed, -30.0);

        ap.toggle_auto();
        assert_eq!(ap.mode(), EngagementMode::ManualHold(-30.0));

        ap.disengage();
        assert_eq!(ap.mode(), EngagementMode::Disengaged);

        ap.toggle_auto();
        assert_eq!(ap.mode(), EngagementMode::AutoLand);
    }

    #[test]
    fn nan_surface_speed_with_velocity_curve_gives_zero_throttle() {
        use crate::vehicle::VelocityCurve;

        let jet = vec![EngineBuilder::new("jet")
            .max_thrust(1000.0)
            .current_throttle(0.5)
            .velocity_curve(VelocityCurve::new(vec![(0.0, 1.0), (100.0, 0.5)]))
            .build()];
        let vehicle = VehicleStateBuilder::new().surface_speed(f64::NAN).build();
        let out = compute_outputs(&ControllerParameters::default(), &vehicle, &jet).unwrap();
        assert!((0.0..=1.0).contains(&out.throttle));
        assert_eq!(out.throttle, 0.0);
    }

    #[test]
    fn throttle_in_range_across_states() {
        let engines = vec![EngineBuilder::new("main").max_thrust(150.0).current_throttle(0.3).build()];
        for law in [CompensationLaw::Literal, CompensationLaw::SignPreserving] {
            for power in [1.0, 2.0, 2.5, 3.0] {
                let params = ControllerParameters {
                    compensation_power: power,
                    compensation_law: law,
                    ..Default::default()
                };
                for vs in [-50.0, -1.0, 0.0, 3.0, 40.0] {
                    let v = VehicleState { vertical_speed: vs, ..scenario_vehicle() };
                    let t = compute_outputs(&params, &v, &engines).unwrap().throttle;
                    assert!((0.0..=1.0).contains(&t));
                }
            }
        }
    }
}
