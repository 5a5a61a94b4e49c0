use std::{collections::HashMap, rc::Rc};

use crate::{
    copy::{category::Category, error::CopyError, path::PathSegment, state::CopyState},
    runtime::{hash_key::HashKey, value::Value},
};

/// Copies a map entry by entry.
///
/// Scalar keys are duplicated as they are. Reference keys and every value go
/// through the router with the shared alias tracker, so two entries, or a key
/// and a value, that referenced the same slot reference the same new slot
/// afterwards. An absent map stays absent and an empty map stays present.
pub(crate) fn copy_map(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    let Value::Map(entries) = value else {
        return Err(CopyError::mismatch(Category::Map, value));
    };
    let Some(entries) = entries else {
        return Ok(Value::Map(None));
    };

    state.stats.maps += 1;
    let mut copied = HashMap::with_capacity(entries.len());
    for (key, entry) in entries.iter() {
        let copied_key = copy_key(key, state)?;
        let entry = state
            .route(entry)
            .map_err(|err| err.within(PathSegment::Key(key.clone())))?;
        copied.insert(copied_key, entry);
    }
    Ok(Value::Map(Some(Rc::new(copied))))
}

fn copy_key(key: &HashKey, state: &mut CopyState<'_>) -> Result<HashKey, CopyError> {
    let HashKey::Ref(handle) = key else {
        return Ok(key.clone());
    };

    let copied = state
        .route(&Value::Ref(*handle))
        .map_err(|err| err.within(PathSegment::MapKey(key.clone())))?;
    Ok(HashKey::Ref(copied.as_handle()))
}
