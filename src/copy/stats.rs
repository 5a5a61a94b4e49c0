use serde::Serialize;

/// Counters describing what one copy did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
    pub scalars: usize,
    /// Distinct heap slots copied into new slots.
    pub references: usize,
    /// References resolved through the alias tracker instead of copied again.
    pub reused_references: usize,
    pub wrappers: usize,
    pub collections: usize,
    pub maps: usize,
    pub records: usize,
}
