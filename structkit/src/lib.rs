//! Deterministic post-processing substrate for structure templates in a
//! voxel world.
//!
//! The pipeline that iterates a template's block entries lives with the host;
//! this crate supplies what every processor in that pipeline shares: scoped
//! seed derivation reproducible from the world seed, block classification
//! with placeholder-marker resolution, tag sampling with exclusions, shape
//! property transfer between block families, and the process-wide registry of
//! processor configuration codecs.

pub mod util;

pub mod key;
pub mod nbt;

pub mod block;
pub mod template;
pub mod classify;
pub mod tag;

pub mod random;
pub mod processor;
