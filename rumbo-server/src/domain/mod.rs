//! Domain types for survey input.
//!
//! Each raw field of a traverse row (station label, bearing, distance) has a
//! parser here. Parsed types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod bearing;
mod distance;
mod label;

pub use bearing::{Bearing, BearingParseError, EastWest, NorthSouth};
pub use distance::{InvalidDistance, distance_to_words, parse_distance};
pub use label::{StationLabel, label_to_text};
