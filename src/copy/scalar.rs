use std::rc::Rc;

use crate::{
    copy::{category::Category, error::CopyError, record::rebuild, state::CopyState},
    runtime::value::Value,
};

/// Duplicates a scalar by value.
///
/// Strings and plain records are re-allocated so the copy shares no `Rc`
/// with the source.
pub(crate) fn copy_scalar(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    match value {
        Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::String(_) => {
            state.stats.scalars += 1;
            duplicate(value)
        }
        Value::Record(record) if record.record_type().is_plain() => {
            state.stats.scalars += 1;
            duplicate(value)
        }
        _ => Err(CopyError::mismatch(Category::Scalar, value)),
    }
}

fn duplicate(value: &Value) -> Result<Value, CopyError> {
    match value {
        Value::String(text) => Ok(Value::String(Rc::from(&**text))),
        Value::Record(record) => Ok(Value::Record(Rc::new(rebuild(record, duplicate)?))),
        // Plain record layouts only admit scalar fields.
        other => Ok(other.clone()),
    }
}
