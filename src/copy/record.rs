use std::rc::Rc;

use crate::{
    copy::{category::Category, error::CopyError, path::PathSegment, state::CopyState},
    runtime::{record::Record, value::Value},
};

/// Copies every field of a record, private fields included.
///
/// Fields are read and written through the runtime's raw field path rather
/// than the public record surface. Opaque records such as `Time` are only
/// reproduced exactly if their hidden fields are.
pub(crate) fn copy_record(value: &Value, state: &mut CopyState<'_>) -> Result<Value, CopyError> {
    let Value::Record(record) = value else {
        return Err(CopyError::mismatch(Category::Record, value));
    };

    state.stats.records += 1;
    let copied = rebuild(record, |field| state.route(field))?;
    Ok(Value::Record(Rc::new(copied)))
}

/// Builds a record of `record`'s type from a copy of each raw field.
///
/// This is the only place the copy engine writes private state.
pub(super) fn rebuild(
    record: &Record,
    mut copy_field: impl FnMut(&Value) -> Result<Value, CopyError>,
) -> Result<Record, CopyError> {
    let layout = record.record_type();
    let mut fields = Vec::with_capacity(layout.fields().len());
    for (decl, field) in layout.fields().iter().zip(record.raw_fields()) {
        let field =
            copy_field(field).map_err(|err| err.within(PathSegment::Field(decl.name.clone())))?;
        fields.push(field);
    }
    Ok(record.rebuilt(fields))
}
