//! Wall family state transfer.

use super::{copy_props, prop, Block, BlockState, TransferError};


/// Shape-defining properties of a wall block: the post flag, the four side
/// connections and waterlogging.
pub const PROPS: [&str; 6] = [prop::UP, prop::NORTH, prop::EAST, prop::SOUTH, prop::WEST, prop::WATERLOGGED];

/// Copy the wall connections of a source state onto the default state of
/// another wall-shaped block type.
pub fn copy_state(source: &BlockState, target: &Block) -> Result<BlockState, TransferError> {
    copy_props(source, target, &PROPS)
}


#[cfg(test)]
mod tests {

    use crate::key::Key;
    use crate::block::PropValue;
    use super::*;

    #[test]
    fn copy_preserves_connections() {

        let wall = |name: &str| Block::new(Key::new("core", name))
            .with_prop(prop::UP, true)
            .with_prop(prop::NORTH, "none")
            .with_prop(prop::EAST, "none")
            .with_prop(prop::SOUTH, "none")
            .with_prop(prop::WEST, "none")
            .with_prop(prop::WATERLOGGED, false);

        let source = wall("cobblestone_wall").default_state()
            .with(prop::NORTH, "low")
            .with(prop::SOUTH, "tall")
            .with(prop::UP, false);

        let copied = copy_state(&source, &wall("mossy_cobblestone_wall")).unwrap();
        assert_eq!(copied.get(prop::UP), Some(&PropValue::Bool(false)));
        assert_eq!(copied.get(prop::NORTH), Some(&PropValue::from("low")));
        assert_eq!(copied.get(prop::EAST), Some(&PropValue::from("none")));
        assert_eq!(copied.get(prop::SOUTH), Some(&PropValue::from("tall")));

    }

}
