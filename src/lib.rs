pub mod physics;
pub mod vehicle;
mod gnc_mod;
pub mod sim;
pub mod io;
pub mod config;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub use gnc::{ControllerOutputs, ControllerParameters, VerticalSpeedAutopilot};
pub use sim::Session;
