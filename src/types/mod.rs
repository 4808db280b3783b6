//! Type definitions

pub mod itinerary;
pub mod messages;
pub mod place;
pub mod trip;

pub use itinerary::*;
pub use messages::*;
pub use place::*;
pub use trip::*;
