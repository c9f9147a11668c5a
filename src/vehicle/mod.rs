pub mod curve;
pub mod engine;
pub mod presets;
pub mod state;

pub use curve::VelocityCurve;
pub use engine::{as_sources, EngineBuilder, EngineSource, PropulsionSource};
pub use state::{VehicleState, VehicleStateBuilder};
