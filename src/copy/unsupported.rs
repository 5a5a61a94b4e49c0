use crate::{
    copy::{category::Category, error::CopyError, state::CopyState},
    runtime::value::Value,
};

/// Rejects values with no duplication semantics. Never produces a value.
pub(crate) fn reject(value: &Value, _state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    match value {
        Value::Function(_) | Value::Channel(_) => Err(CopyError::unsupported(value)),
        _ => Err(CopyError::mismatch(Category::Unsupported, value)),
    }
}
