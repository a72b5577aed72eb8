//! Parsed structure templates and their block entries.
//!
//! Templates are produced by an external reader; this module only defines the
//! in-memory shape the processing pipeline iterates. Entries are value types:
//! processors receive them by reference and return replacements, the template
//! itself is never mutated in place during processing.

use glam::IVec3;

use crate::block::BlockState;
use crate::nbt::Compound;
use crate::util::Face;


/// One cell of a parsed template: position, state and optional auxiliary
/// metadata (spawner contents, placeholder resolution, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntry {
    pub pos: IVec3,
    pub state: BlockState,
    pub nbt: Option<Compound>,
}

impl BlockEntry {

    pub fn new(pos: IVec3, state: BlockState) -> Self {
        Self { pos, state, nbt: None }
    }

    /// Attach auxiliary metadata, builder style.
    pub fn with_nbt(mut self, nbt: Compound) -> Self {
        self.nbt = Some(nbt);
        self
    }

    /// Return a copy of this entry with another state, keeping position and
    /// metadata. This is how processors produce their replacement entries.
    pub fn replaced(&self, state: BlockState) -> Self {
        Self {
            pos: self.pos,
            state,
            nbt: self.nbt.clone(),
        }
    }

}


/// An ordered collection of block entries, the parsed blueprint of one
/// structure piece.
#[derive(Debug, Clone, Default)]
pub struct Template {
    entries: Vec<BlockEntry>,
}

impl Template {

    pub fn new(entries: Vec<BlockEntry>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry at an exact position, if any.
    pub fn block_at(&self, pos: IVec3) -> Option<&BlockEntry> {
        self.entries.iter().find(|entry| entry.pos == pos)
    }

    /// Find the entry adjacent to a position on the given face.
    pub fn neighbor(&self, pos: IVec3, face: Face) -> Option<&BlockEntry> {
        self.block_at(pos + face.delta())
    }

}


#[cfg(test)]
mod tests {

    use crate::key::Key;
    use super::*;

    fn entry(x: i32, y: i32, z: i32, name: &str) -> BlockEntry {
        BlockEntry::new(IVec3::new(x, y, z), BlockState::new(Key::new("core", name)))
    }

    #[test]
    fn positional_lookup() {

        let template = Template::new(vec![
            entry(0, 0, 0, "stone"),
            entry(0, 1, 0, "oak_log"),
        ]);

        assert_eq!(template.len(), 2);
        assert!(template.block_at(IVec3::new(0, 0, 0)).unwrap().state.is(&Key::new("core", "stone")));
        assert!(template.block_at(IVec3::new(1, 0, 0)).is_none());

        let above = template.neighbor(IVec3::new(0, 0, 0), Face::PosY).unwrap();
        assert!(above.state.is(&Key::new("core", "oak_log")));
        assert!(template.neighbor(IVec3::new(0, 0, 0), Face::NegY).is_none());

    }

    #[test]
    fn replaced_keeps_position_and_metadata() {

        let mut nbt = Compound::new();
        nbt.insert("final_state", "core:stone");

        let entry = entry(3, 4, 5, "placeholder").with_nbt(nbt.clone());
        let replaced = entry.replaced(BlockState::new(Key::new("core", "stone")));

        assert_eq!(replaced.pos, entry.pos);
        assert_eq!(replaced.nbt, Some(nbt));
        assert!(replaced.state.is(&Key::new("core", "stone")));

    }

}
