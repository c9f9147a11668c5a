pub mod gravity;

pub use gravity::{local_gravity, surface_gravity};
