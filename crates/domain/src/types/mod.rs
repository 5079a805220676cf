//! Telemetry entity types returned by the API.

pub mod location;
pub mod mojio;
pub mod trip;
pub mod user;
pub mod vehicle;

pub use location::Location;
pub use mojio::{Mojio, MojioClaim};
pub use trip::Trip;
pub use user::{User, UserEmail};
pub use vehicle::{Vehicle, VehicleUpdate};
