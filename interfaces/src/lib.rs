use std::collections::HashMap;

use crate::types::{BlockLocation, BlockState};

pub mod types;

/// Read-only access to the blocks of a world.
///
/// `None` means the block is not loaded. Callers must never treat an unloaded
/// block as empty.
pub trait BlockAccess {
    fn block_state(&self, location: BlockLocation) -> Option<BlockState>;
}

impl<T: BlockAccess + ?Sized> BlockAccess for &T {
    fn block_state(&self, location: BlockLocation) -> Option<BlockState> {
        (**self).block_state(location)
    }
}

/// A sparse world where every listed block is loaded and everything else is
/// unloaded.
impl BlockAccess for HashMap<BlockLocation, BlockState> {
    fn block_state(&self, location: BlockLocation) -> Option<BlockState> {
        self.get(&location).copied()
    }
}
