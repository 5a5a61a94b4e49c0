use std::fmt;

/// Handle into the value heap.
///
/// A `HeapHandle` is a lightweight, copyable index that names one heap slot.
/// It is the storage identity behind `Value::Ref`: two references alias each
/// other exactly when they carry the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeapHandle(pub(crate) u32);

impl HeapHandle {
    /// Returns the raw heap slot index backing this handle.
    pub fn index(self) -> u32 {
        self.0
    }

    #[cfg(test)]
    pub fn new_for_test(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for HeapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
