use std::rc::Rc;

use crate::{
    copy::{category::Category, error::CopyError, path::PathSegment, state::CopyState},
    runtime::value::Value,
};

/// Copies a list element by element. An absent list stays absent.
pub(crate) fn copy_list(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    let Value::List(elements) = value else {
        return Err(CopyError::mismatch(Category::List, value));
    };
    let Some(elements) = elements else {
        return Ok(Value::List(None));
    };

    state.stats.collections += 1;
    let copied = copy_elements(elements, state)?;
    Ok(Value::List(Some(Rc::new(copied))))
}

/// Copies a fixed-size array into new storage of the same length.
pub(crate) fn copy_array(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    let Value::Array(elements) = value else {
        return Err(CopyError::mismatch(Category::Array, value));
    };

    state.stats.collections += 1;
    let copied = copy_elements(elements, state)?;
    Ok(Value::Array(copied.into()))
}

fn copy_elements(elements: &[Value], state: &mut CopyState<'_>) -> Result<Vec<Value>, CopyError> {
    let mut copied = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let element = state
            .route(element)
            .map_err(|err| err.within(PathSegment::Index(index)))?;
        copied.push(element);
    }
    Ok(copied)
}
