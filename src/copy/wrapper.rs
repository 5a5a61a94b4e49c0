use std::rc::Rc;

use crate::{
    copy::{category::Category, error::CopyError, path::PathSegment, state::CopyState},
    runtime::value::Value,
};

/// Copies the value held by an `Any` slot and re-wraps it.
///
/// An empty slot stays empty; it never becomes a slot holding a null reference.
pub(crate) fn copy_wrapper(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    let Value::Any(held) = value else {
        return Err(CopyError::mismatch(Category::Wrapper, value));
    };
    let Some(held) = held else {
        return Ok(Value::Any(None));
    };

    state.stats.wrappers += 1;
    let copied = state
        .route(held)
        .map_err(|err| err.within(PathSegment::Unwrap))?;
    Ok(Value::Any(Some(Rc::new(copied))))
}
