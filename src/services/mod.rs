//! Business logic services

pub mod clustering;
pub mod duration;
pub mod geo;
pub mod itinerary;
pub mod sequencer;
