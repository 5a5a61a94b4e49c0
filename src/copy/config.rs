use serde::{Deserialize, Serialize};

/// Tunables for one copy.
///
/// Deserializes with defaults for missing keys, so it can be embedded in a
/// larger configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Maximum nesting the copy descends through inside one value before
    /// failing. Unlimited by default.
    ///
    /// Every wrapper, element, entry and field counts as one level. A
    /// reference does not nest: its pointee is copied as a value of its own,
    /// so chains of references never approach the limit.
    pub max_depth: Option<usize>,
}

impl CopyConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
