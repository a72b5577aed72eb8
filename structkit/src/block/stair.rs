//! Stair family state transfer.

use super::{copy_props, prop, Block, BlockState, TransferError};


/// Shape-defining properties of a stair block.
pub const PROPS: [&str; 4] = [prop::FACING, prop::SHAPE, prop::HALF, prop::WATERLOGGED];

/// Copy the stair shape of a source state onto the default state of another
/// stair-shaped block type.
pub fn copy_state(source: &BlockState, target: &Block) -> Result<BlockState, TransferError> {
    copy_props(source, target, &PROPS)
}
