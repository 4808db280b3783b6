//! Database queries

pub mod place;
pub mod trip;
