use std::fmt;

use tracing::{debug, info};

use crate::gnc::{Controller, FlightCtrlState, TickSkipped, VerticalSpeedAutopilot};
use crate::vehicle::{PropulsionSource, VehicleState};

// ---------------------------------------------------------------------------
// Fly-by-wire subscription
// ---------------------------------------------------------------------------

/// Host-side registry of flight-control callbacks, keyed by vessel.
pub trait FlyByWireBus<V> {
    fn attach(&mut self, vessel: &V);
    fn detach(&mut self, vessel: &V);
}

/// Owns the callback subscription for at most one vessel.
#[derive(Debug)]
pub struct WireLink<V> {
    vessel: Option<V>,
}

impl<V> Default for WireLink<V> {
    fn default() -> Self {
        Self { vessel: None }
    }
}

impl<V: PartialEq + Clone + fmt::Debug> WireLink<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vessel(&self) -> Option<&V> {
        self.vessel.as_ref()
    }

    /// Move the subscription to `next`. The old vessel is always detached
    /// before the new one is attached. Returns whether anything changed.
    pub fn retarget<B>(&mut self, next: Option<&V>, bus: &mut B) -> bool
    where
        B: FlyByWireBus<V> + ?Sized,
    {
        if self.vessel.as_ref() == next {
            return false;
        }
        if let Some(old) = self.vessel.take() {
            bus.detach(&old);
            info!(vessel = ?old, "fly-by-wire detached");
        }
        if let Some(new) = next {
            bus.attach(new);
            info!(vessel = ?new, "fly-by-wire attached");
            self.vessel = Some(new.clone());
        }
        true
    }

    pub fn release<B>(&mut self, bus: &mut B)
    where
        B: FlyByWireBus<V> + ?Sized,
    {
        self.retarget(None, bus);
    }
}

// ---------------------------------------------------------------------------
// Session: one controller driven by the host's fixed update
// ---------------------------------------------------------------------------

/// Inputs for one fixed tick of the active vessel.
pub struct Frame<'a, V> {
    pub vessel: V,
    pub vehicle: &'a VehicleState,
    pub engines: &'a [&'a dyn PropulsionSource],
}

pub struct Session<V, C = VerticalSpeedAutopilot> {
    controller: C,
    link: WireLink<V>,
    /// When false the session behaves as if no vessel were active.
    pub enabled: bool,
}

impl<V, C> Session<V, C>
where
    V: PartialEq + Clone + fmt::Debug,
    C: Controller,
{
    pub fn new(controller: C) -> Self {
        Self { controller, link: WireLink::new(), enabled: true }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn linked_vessel(&self) -> Option<&V> {
        self.link.vessel()
    }

    /// Host fixed-update hook. `frame` is `None` when no vessel is active.
    pub fn fixed_update<B>(
        &mut self,
        bus: &mut B,
        host_ready: bool,
        frame: Option<Frame<'_, V>>,
    ) -> Result<(), TickSkipped>
    where
        B: FlyByWireBus<V> + ?Sized,
    {
        let frame = frame.filter(|_| host_ready && self.enabled);
        self.link.retarget(frame.as_ref().map(|f| &f.vessel), bus);

        let Some(frame) = frame else {
            debug!(controller = self.controller.name(), "no active vessel");
            return Err(TickSkipped::NoActiveVessel);
        };
        self.controller.update(frame.vehicle, frame.engines)
    }

    /// Host flight-control callback for `vessel`. Callbacks for a vessel
    /// this session is not linked to are ignored.
    pub fn fly_by_wire(&self, vessel: &V, fcs: &mut FlightCtrlState) {
        if self.link.vessel() == Some(vessel) {
            self.controller.fly_by_wire(fcs);
        }
    }

    /// Detach from the host before the session is dropped.
    pub fn shutdown<B>(&mut self, bus: &mut B)
    where
        B: FlyByWireBus<V> + ?Sized,
    {
        self.link.release(bus);
        self.controller.reset();
    }
}
