use crate::runtime::value::Value;

/// One occupied heap slot.
///
/// `value` is `None` while the slot is reserved by an in-progress copy and
/// has not been filled yet.
pub struct HeapEntry {
    pub(super) value: Option<Value>,
    pub(super) marked: bool,
}
