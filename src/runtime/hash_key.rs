use std::fmt;

use crate::runtime::heap::HeapHandle;

/// Key of a `Value::Map`.
///
/// Scalar keys hash by value. Reference keys hash by the slot they name, so a
/// copied map re-keys every reference entry with the copy of its slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
    Ref(Option<HeapHandle>),
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(v) => write!(f, "{}", v),
            HashKey::Boolean(v) => write!(f, "{}", v),
            HashKey::String(v) => write!(f, "\"{}\"", v),
            HashKey::Ref(Some(handle)) => write!(f, "&{}", handle),
            HashKey::Ref(None) => write!(f, "nil"),
        }
    }
}

impl From<&str> for HashKey {
    fn from(value: &str) -> Self {
        HashKey::String(value.to_string())
    }
}

impl From<i64> for HashKey {
    fn from(value: i64) -> Self {
        HashKey::Integer(value)
    }
}

impl From<bool> for HashKey {
    fn from(value: bool) -> Self {
        HashKey::Boolean(value)
    }
}

impl From<Option<HeapHandle>> for HashKey {
    fn from(value: Option<HeapHandle>) -> Self {
        HashKey::Ref(value)
    }
}
