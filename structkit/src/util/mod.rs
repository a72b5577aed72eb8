//! Math utilities shared across the crate.

mod rand;
mod face;
mod bb;

pub use rand::{Rand, time_millis};
pub use face::Face;
pub use bb::BoundingBox;
