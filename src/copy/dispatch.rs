use crate::{
    copy::{
        category::Category, collection, error::CopyError, map, record, reference, scalar,
        state::CopyState, unsupported, wrapper,
    },
    runtime::value::Value,
};

/// Copy algorithm for one category.
pub type CopyFn = fn(&Value, &mut CopyState<'_>) -> Result<Value, CopyError>;

/// Returns the copier for a category.
///
/// `Unsupported` maps to a copier that always fails, so any type the
/// classifier does not know how to duplicate is rejected, never aliased.
pub fn copier_for(category: Category) -> CopyFn {
    match category {
        Category::Scalar => scalar::copy_scalar,
        Category::Reference => reference::copy_reference,
        Category::Wrapper => wrapper::copy_wrapper,
        Category::List => collection::copy_list,
        Category::Array => collection::copy_array,
        Category::Map => map::copy_map,
        Category::Record => record::copy_record,
        Category::Unsupported => unsupported::reject,
    }
}
