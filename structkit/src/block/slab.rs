//! Slab family state transfer.

use super::{copy_props, prop, Block, BlockState, TransferError};


/// Shape-defining properties of a slab block.
pub const PROPS: [&str; 2] = [prop::TYPE, prop::WATERLOGGED];

/// Copy the slab shape of a source state onto the default state of another
/// slab-shaped block type.
pub fn copy_state(source: &BlockState, target: &Block) -> Result<BlockState, TransferError> {
    copy_props(source, target, &PROPS)
}


#[cfg(test)]
mod tests {

    use crate::key::Key;
    use crate::block::PropValue;
    use super::*;

    #[test]
    fn copy_preserves_type_and_waterlogging() {

        let slab = |name: &str| Block::new(Key::new("core", name))
            .with_prop(prop::TYPE, "bottom")
            .with_prop(prop::WATERLOGGED, false);

        let source = slab("oak_slab").default_state()
            .with(prop::TYPE, "double")
            .with(prop::WATERLOGGED, true);

        let copied = copy_state(&source, &slab("mossy_stone_slab")).unwrap();
        assert_eq!(copied.get(prop::TYPE), Some(&PropValue::from("double")));
        assert_eq!(copied.get(prop::WATERLOGGED), Some(&PropValue::Bool(true)));

    }

}
