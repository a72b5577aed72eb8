//! Air, solid and face-occlusion queries over template block entries.
//!
//! Placeholder marker entries do not carry their real identity in their block
//! type: the type they finally resolve to is named by the `final_state` string
//! of their auxiliary metadata. Every predicate therefore goes through one
//! explicit resolution step instead of branching on the marker type in each
//! query. Any resolution failure classifies as air.

use std::str::FromStr;

use crate::block::{Block, BlockTable};
use crate::template::BlockEntry;
use crate::util::Face;
use crate::key::Key;


/// Metadata key naming the block type a placeholder entry resolves to.
pub const FINAL_STATE: &str = "final_state";


/// Resolve the block type an entry actually stands for.
///
/// For ordinary entries this is a plain table lookup of the state's type. For
/// marker entries the `final_state` metadata string is parsed as a key and
/// looked up instead. Returns `None` when the type is unknown to the table or
/// when a marker carries no usable `final_state`; callers treat that as air.
pub fn resolve<'a>(table: &'a BlockTable, entry: &BlockEntry) -> Option<&'a Block> {

    let block = table.get(entry.state.block())?;
    if !block.is_marker() {
        return Some(block);
    }

    let name = entry.nbt.as_ref()?.get_string(FINAL_STATE)?;
    let key = Key::from_str(name).ok()?;
    table.get(&key)

}

/// Return true if the entry counts as air: missing entirely, resolving to an
/// air-like type, or failing to resolve at all.
pub fn is_air(table: &BlockTable, entry: Option<&BlockEntry>) -> bool {
    match entry {
        None => true,
        Some(entry) => match resolve(table, entry) {
            None => true,
            Some(block) => block.is_air(),
        }
    }
}

/// Return true if the entry resolves to a block that is neither air-like nor
/// a flowing fluid. A missing entry is never solid.
pub fn is_solid(table: &BlockTable, entry: Option<&BlockEntry>) -> bool {
    entry.is_some_and(|entry| {
        resolve(table, entry).is_some_and(|block| !block.is_air() && !block.is_fluid())
    })
}

/// Return true if the entry is solid and its collision shape fully covers the
/// queried face of its cell, so a neighbor can attach to that face.
pub fn is_face_full(table: &BlockTable, entry: Option<&BlockEntry>, face: Face) -> bool {

    let Some(entry) = entry else { return false };
    let Some(block) = resolve(table, entry) else { return false };

    !block.is_air() && !block.is_fluid()
        && block.shape().iter().any(|bb| bb.covers_face(face))

}


#[cfg(test)]
mod tests {

    use glam::IVec3;

    use crate::block::{Block, BlockKind, BlockState};
    use crate::template::Template;
    use crate::util::BoundingBox;
    use crate::nbt::Compound;
    use super::*;

    fn key(path: &str) -> Key {
        Key::new("core", path)
    }

    fn table() -> BlockTable {
        let mut table = BlockTable::new();
        table.insert(Block::new(key("air")).with_kind(BlockKind::Air));
        table.insert(Block::new(key("cave_air")).with_kind(BlockKind::Air));
        table.insert(Block::new(key("stone")));
        table.insert(Block::new(key("flowing_water")).with_kind(BlockKind::Fluid));
        table.insert(Block::new(key("placeholder")).with_kind(BlockKind::Marker));
        table.insert(Block::new(key("stone_slab"))
            .with_shape(vec![BoundingBox::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0)]));
        table
    }

    fn entry(path: &str) -> BlockEntry {
        BlockEntry::new(IVec3::ZERO, BlockState::new(key(path)))
    }

    fn marker(final_state: Option<&str>) -> BlockEntry {
        let mut e = entry("placeholder");
        if let Some(name) = final_state {
            let mut nbt = Compound::new();
            nbt.insert(FINAL_STATE, name);
            e = e.with_nbt(nbt);
        }
        e
    }

    #[test]
    fn missing_entries_are_air_and_never_solid() {
        let table = table();
        assert!(is_air(&table, None));
        assert!(!is_solid(&table, None));
    }

    #[test]
    fn direct_entries() {
        let table = table();
        assert!(is_air(&table, Some(&entry("air"))));
        assert!(!is_solid(&table, Some(&entry("air"))));
        assert!(!is_air(&table, Some(&entry("stone"))));
        assert!(is_solid(&table, Some(&entry("stone"))));
        // Fluids are present but neither air nor solid.
        assert!(!is_air(&table, Some(&entry("flowing_water"))));
        assert!(!is_solid(&table, Some(&entry("flowing_water"))));
    }

    #[test]
    fn markers_resolve_through_metadata() {
        let table = table();
        // The marker's own type is not air-like, its metadata decides.
        assert!(is_air(&table, Some(&marker(Some("core:cave_air")))));
        assert!(!is_solid(&table, Some(&marker(Some("core:cave_air")))));
        assert!(is_solid(&table, Some(&marker(Some("core:stone")))));
        assert!(!is_solid(&table, Some(&marker(Some("core:flowing_water")))));
    }

    #[test]
    fn unresolvable_entries_classify_as_air() {
        let table = table();
        // Marker without metadata, naming an unknown type, or naming a
        // malformed key, and a direct type absent from the table.
        for e in [marker(None), marker(Some("core:granite")), marker(Some("NOT a key")), entry("granite")] {
            assert!(is_air(&table, Some(&e)), "{e:?}");
            assert!(!is_solid(&table, Some(&e)), "{e:?}");
        }
    }

    #[test]
    fn non_solid_entries_never_occlude_a_face() {
        let table = table();
        for e in [entry("air"), entry("flowing_water"), marker(Some("core:cave_air")), entry("granite")] {
            for face in Face::ALL {
                assert!(!is_face_full(&table, Some(&e), face), "{e:?} {face:?}");
            }
            assert!(!is_face_full(&table, None, Face::PosY));
        }
    }

    #[test]
    fn face_occlusion_follows_the_shape() {
        let table = table();
        for face in Face::ALL {
            assert!(is_face_full(&table, Some(&entry("stone")), face));
        }
        assert!(is_face_full(&table, Some(&entry("stone_slab")), Face::NegY));
        assert!(!is_face_full(&table, Some(&entry("stone_slab")), Face::PosY));
        // Marker resolving to a full cube occludes like the cube.
        assert!(is_face_full(&table, Some(&marker(Some("core:stone"))), Face::PosX));
    }

    #[test]
    fn placeholder_template_end_to_end() {
        // A 1x1x1 template whose single entry is a placeholder naming
        // cave air: the entry classifies as air, not solid.
        let table = table();
        let template = Template::new(vec![marker(Some("cave_air"))]);
        let entry = template.block_at(IVec3::ZERO);
        assert!(is_air(&table, entry));
        assert!(!is_solid(&table, entry));
    }

}
