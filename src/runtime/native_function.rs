use std::fmt;

use crate::runtime::NativeFn;

/// Host function exposed as a runtime value.
///
/// Callables have no duplication semantics, so the copy engine rejects them.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, func: NativeFn) -> Self {
        Self { name, func }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// Host functions have no equality: like `NaN`, a function is not equal even
/// to itself.
impl PartialEq for NativeFunction {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}
