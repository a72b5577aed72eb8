//! Scoped seed derivation for reproducible processor randomness.
//!
//! Every processor invocation derives a fresh generator from the world seed,
//! an anchor position picked by the scope, and a per-processor seed offset.
//! Regenerating the same structure therefore replays exactly the same
//! randomness, and two different processors evaluated at the same position
//! stay decorrelated through their offsets.

use glam::IVec3;

use tracing::warn;

use crate::util::{Rand, time_millis};


/// Granularity at which processor randomness is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomScope {
    /// Seeded from the position of the block entry being processed.
    Block,
    /// Seeded from the origin of the template piece.
    Piece,
    /// Seeded from the origin of the whole structure.
    Structure,
    /// Seeded from the world seed alone.
    World,
}

impl RandomScope {

    pub const ALL: [Self; 4] = [Self::Block, Self::Piece, Self::Structure, Self::World];

    /// Serialized name of this scope.
    pub fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Piece => "piece",
            Self::Structure => "structure",
            Self::World => "world",
        }
    }

    /// Parse a serialized scope name, `None` for an unknown name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "block" => Self::Block,
            "piece" => Self::Piece,
            "structure" => Self::Structure,
            "world" => Self::World,
            _ => return None,
        })
    }

}


/// Anchor positions available to one processor invocation. Positional scopes
/// read their anchor from here; an absent anchor degrades to a
/// non-reproducible seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedAnchors {
    /// Position of the block entry being processed.
    pub block: Option<IVec3>,
    /// Origin of the template piece the entry belongs to.
    pub piece: Option<IVec3>,
    /// Origin of the structure the piece belongs to.
    pub structure: Option<IVec3>,
}


/// Mix a block position into a well-distributed 64-bit seed. The same
/// position always yields the same seed, so block-scoped decisions survive
/// chunk regeneration.
pub fn pos_seed(pos: IVec3) -> i64 {
    let mut seed = (pos.x as i64).wrapping_mul(3129871)
        ^ (pos.z as i64).wrapping_mul(116129781)
        ^ (pos.y as i64);
    seed = seed.wrapping_mul(seed).wrapping_mul(42317861).wrapping_add(seed.wrapping_mul(11));
    seed >> 16
}

/// Derive the seed for one processor invocation.
pub fn scope_seed(scope: RandomScope, anchors: SeedAnchors, world_seed: i64, processor_seed: i64) -> i64 {
    match scope {
        RandomScope::Block => anchor_seed(anchors.block, processor_seed),
        RandomScope::Piece => anchor_seed(anchors.piece, processor_seed),
        RandomScope::Structure => anchor_seed(anchors.structure, processor_seed),
        RandomScope::World => world_seed.wrapping_add(processor_seed),
    }
}

/// Derive an independent generator for one processor invocation. The caller
/// owns the generator exclusively; nothing is shared between invocations.
pub fn scope_rand(scope: RandomScope, anchors: SeedAnchors, world_seed: i64, processor_seed: i64) -> Rand {
    Rand::new(scope_seed(scope, anchors, world_seed, processor_seed))
}

fn anchor_seed(pos: Option<IVec3>, processor_seed: i64) -> i64 {
    match pos {
        Some(pos) => pos_seed(pos).wrapping_add(processor_seed),
        None => {
            // Deliberate escape hatch: without an anchor there is nothing
            // stable to derive from, so the seed is taken from the clock and
            // the result is NOT reproducible.
            warn!("missing anchor position for scoped randomness, falling back to a time seed");
            time_millis().wrapping_add(processor_seed)
        }
    }
}
