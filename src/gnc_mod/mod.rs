pub mod autopilot;
pub mod controller;
pub mod guidance;
pub mod throttle;
pub mod thrust;

pub use autopilot::{
    compute_outputs, ControllerOutputs, ControllerParameters, EngagementMode, FlightCtrlState,
    TickSkipped, VerticalSpeedAutopilot, SPEED_PRESETS,
};
pub use controller::Controller;
pub use guidance::resolve_target;
pub use throttle::{solve_throttle, throttle_fraction, CompensationLaw, ThrottleGains, ThrottleSolution};
pub use thrust::{estimate_thrust, ThrustEstimate};
