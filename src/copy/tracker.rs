use std::collections::HashMap;

use crate::runtime::heap::HeapHandle;

/// Maps each source heap slot to the destination slot reserved for its copy.
///
/// A source slot is registered before its value is copied, so a reference
/// met again while that value is still being copied (a cycle) resolves to the
/// pending destination instead of recursing. One tracker serves exactly one
/// top-level copy.
#[derive(Debug, Default)]
pub struct AliasTracker {
    copies: HashMap<HeapHandle, HeapHandle>,
}

impl AliasTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, source: HeapHandle) -> Option<HeapHandle> {
        self.copies.get(&source).copied()
    }

    pub fn register(&mut self, source: HeapHandle, destination: HeapHandle) {
        let previous = self.copies.insert(source, destination);
        debug_assert!(previous.is_none(), "slot {} registered twice", source);
    }

    /// Every destination slot reserved so far.
    pub fn destinations(&self) -> impl Iterator<Item = HeapHandle> + '_ {
        self.copies.values().copied()
    }
}
