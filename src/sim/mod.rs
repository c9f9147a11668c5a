pub mod session;

pub use session::{FlyByWireBus, Frame, Session, WireLink};
