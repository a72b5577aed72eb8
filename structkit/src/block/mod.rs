//! Block descriptors, states and the host-populated block table.

// Shape families with transferable state.
pub mod stair;
pub mod slab;
pub mod wall;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::util::BoundingBox;
use crate::key::Key;


/// Names of the shape-defining properties shared by block families.
pub mod prop {
    pub const FACING: &str = "facing";
    pub const SHAPE: &str = "shape";
    pub const HALF: &str = "half";
    pub const TYPE: &str = "type";
    pub const UP: &str = "up";
    pub const NORTH: &str = "north";
    pub const EAST: &str = "east";
    pub const SOUTH: &str = "south";
    pub const WEST: &str = "west";
    pub const WATERLOGGED: &str = "waterlogged";
}


/// A single block state property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Int(i32),
    /// An enumerated value such as `facing = "north"`.
    Name(ArcStr),
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Name(ArcStr::from(value))
    }
}


/// A block type together with one assignment of its properties. The named
/// property set a state carries is the schema of its block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockState {
    block: Key,
    props: IndexMap<ArcStr, PropValue>,
}

impl BlockState {

    pub fn new(block: Key) -> Self {
        Self { block, props: IndexMap::new() }
    }

    #[inline]
    pub fn block(&self) -> &Key {
        &self.block
    }

    /// Return true if this state belongs to the given block type.
    #[inline]
    pub fn is(&self, key: &Key) -> bool {
        self.block == *key
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// Add or replace a property, builder style.
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(ArcStr::from(name), value.into());
        self
    }

    fn set(&mut self, name: &str, value: PropValue) {
        self.props.insert(ArcStr::from(name), value);
    }

    pub fn props(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props.iter().map(|(name, value)| (&**name, value))
    }

}


/// Classification kind of a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// An ordinary block.
    #[default]
    Normal,
    /// An air-like block (standard air, cave air).
    Air,
    /// A flowing-fluid block, present but never solid.
    Fluid,
    /// A placeholder standing in for another block type named by the entry's
    /// auxiliary metadata.
    Marker,
}

/// One row of the block table: everything the substrate needs to know about a
/// block type.
#[derive(Debug, Clone)]
pub struct Block {
    key: Key,
    kind: BlockKind,
    shape: Vec<BoundingBox>,
    defaults: IndexMap<ArcStr, PropValue>,
}

impl Block {

    /// Describe a new ordinary full-cube block type.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            kind: BlockKind::Normal,
            shape: vec![BoundingBox::CUBE],
            defaults: IndexMap::new(),
        }
    }

    /// Set the classification kind, builder style. Air-like and marker blocks
    /// also lose their collision shape.
    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        if matches!(kind, BlockKind::Air | BlockKind::Marker) {
            self.shape.clear();
        }
        self
    }

    /// Replace the collision shape, builder style.
    pub fn with_shape(mut self, shape: Vec<BoundingBox>) -> Self {
        self.shape = shape;
        self
    }

    /// Add a property with its default value to the schema, builder style.
    pub fn with_prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.defaults.insert(ArcStr::from(name), value.into());
        self
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.kind == BlockKind::Air
    }

    #[inline]
    pub fn is_fluid(&self) -> bool {
        self.kind == BlockKind::Fluid
    }

    #[inline]
    pub fn is_marker(&self) -> bool {
        self.kind == BlockKind::Marker
    }

    #[inline]
    pub fn shape(&self) -> &[BoundingBox] {
        &self.shape
    }

    /// Build the default state of this block type, carrying its whole
    /// property schema.
    pub fn default_state(&self) -> BlockState {
        BlockState {
            block: self.key.clone(),
            props: self.defaults.clone(),
        }
    }

}


/// Identifier to block type lookup, populated by the host before any
/// processing starts and read-only afterwards.
#[derive(Debug, Default)]
pub struct BlockTable {
    blocks: IndexMap<Key, Block>,
}

impl BlockTable {

    pub fn new() -> Self {
        Self { blocks: IndexMap::new() }
    }

    /// Insert a block description, replacing any previous one for the key.
    pub fn insert(&mut self, block: Block) {
        self.blocks.insert(block.key.clone(), block);
    }

    #[inline]
    pub fn get(&self, key: &Key) -> Option<&Block> {
        self.blocks.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

}


/// Error type for property transfer between block types.
#[derive(thiserror::Error, Debug)]
pub enum TransferError {
    #[error("block {block} has no property {prop:?}")]
    MissingProperty { block: Key, prop: &'static str },
}

/// Copy each named property from a source state onto the default state of the
/// target block type. Both the source state and the target's schema must
/// expose every named property, otherwise the transfer is rejected instead of
/// producing an undefined value.
pub fn copy_props(source: &BlockState, target: &Block, props: &[&'static str]) -> Result<BlockState, TransferError> {

    let mut state = target.default_state();

    for &prop in props {

        let value = source.get(prop).cloned()
            .ok_or_else(|| TransferError::MissingProperty { block: source.block().clone(), prop })?;

        if !state.contains(prop) {
            return Err(TransferError::MissingProperty { block: target.key().clone(), prop });
        }

        state.set(prop, value);

    }

    Ok(state)

}
