use log::trace;

use crate::{
    copy::{category::Category, error::CopyError, path::CopyPath, state::CopyState},
    runtime::value::Value,
};

/// Copies a nullable reference into a new heap slot.
///
/// The destination slot is reserved and registered with the alias tracker
/// before the pointee is copied. A reference reached again during that copy,
/// or anywhere later in the same top-level copy, resolves to the same
/// destination. The pointee itself is queued on the state and copied once
/// the value holding this reference is done.
pub(crate) fn copy_reference(
    value: &Value,
    state: &mut CopyState<'_>,
) -> Result<Value, CopyError> {
    let Value::Ref(source) = value else {
        return Err(CopyError::mismatch(Category::Reference, value));
    };
    let Some(source) = *source else {
        return Ok(Value::Ref(None));
    };

    if let Some(destination) = state.tracker.resolve(source) {
        trace!("reuse copy {} of slot {}", destination, source);
        state.stats.reused_references += 1;
        return Ok(Value::Ref(Some(destination)));
    }

    let pointee = match state.heap.get(source) {
        Some(pointee) => pointee.clone(),
        None => {
            return Err(CopyError::DanglingReference {
                handle: source,
                path: CopyPath::root(),
            });
        }
    };

    let destination = state.heap.reserve();
    state.tracker.register(source, destination);
    state.stats.references += 1;
    trace!("copy slot {} into {}", source, destination);
    state.defer(source, destination, pointee);

    Ok(Value::Ref(Some(destination)))
}
