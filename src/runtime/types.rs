use std::{fmt, rc::Rc};

use crate::runtime::record::RecordType;

/// Runtime type descriptor of a [`Value`](crate::runtime::value::Value).
///
/// Descriptors are shallow: `Ref`, `List` and `Map` do not describe what they
/// point to or contain. Only records carry a full field layout, because a
/// record nests other records by value and never through itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    Bool,
    Str,
    Ref,
    Any,
    List,
    Array(usize),
    Map,
    Record(Rc<RecordType>),
    Function,
    Channel,
}

impl Type {
    /// Returns `true` for types with no internal indirection.
    ///
    /// A record type is scalar when every field, transitively through nested
    /// records, is scalar.
    pub fn is_scalar(&self) -> bool {
        match self {
            Type::Int | Type::Float | Type::Bool | Type::Str => true,
            Type::Record(record) => record.is_plain(),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Float => write!(f, "Float"),
            Type::Bool => write!(f, "Bool"),
            Type::Str => write!(f, "String"),
            Type::Ref => write!(f, "Ref"),
            Type::Any => write!(f, "Any"),
            Type::List => write!(f, "List"),
            Type::Array(len) => write!(f, "Array[{}]", len),
            Type::Map => write!(f, "Map"),
            Type::Record(record) => write!(f, "{}", record.name()),
            Type::Function => write!(f, "Function"),
            Type::Channel => write!(f, "Channel"),
        }
    }
}
