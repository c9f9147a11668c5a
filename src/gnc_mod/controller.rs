use crate::vehicle::{PropulsionSource, VehicleState};
use super::autopilot::{FlightCtrlState, TickSkipped};

/// Trait for per-tick throttle controllers.
///
/// Implement this to plug a different control law into a
/// [`Session`](crate::sim::Session).
pub trait Controller {
    /// Run one fixed tick. On `Err` the previous command stays in force.
    fn update(
        &mut self,
        vehicle: &VehicleState,
        engines: &[&dyn PropulsionSource],
    ) -> Result<(), TickSkipped>;

    /// Flight-control callback, invoked by the host after the tick.
    fn fly_by_wire(&self, fcs: &mut FlightCtrlState);

    /// Drop any state carried between ticks.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
