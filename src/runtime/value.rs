use std::{collections::HashMap, fmt, rc::Rc};

use crate::runtime::{
    channel::Channel, hash_key::HashKey, heap::HeapHandle, native_function::NativeFunction,
    record::Record, types::Type,
};

/// Runtime value: a payload tagged with its runtime type.
///
/// ## Memory Management Model
///
/// Scalars are unboxed. Aggregates (`String`, `List`, `Array`, `Map`,
/// `Record`, `Any`) are immutable and shared through `Rc`, so cloning a
/// `Value` is O(1) and never copies deeply. Identity-bearing, mutable storage
/// exists only in [`ValueHeap`](crate::runtime::heap::ValueHeap) slots, named
/// by `Ref` handles.
///
/// ### No-Cycle Invariant
///
/// `Rc` graphs must stay acyclic. Self-referential and mutually referential
/// structures are expressed through heap handles: a record can hold a
/// `Ref` to the very slot it is stored in, while the `Rc` graph underneath
/// remains a DAG.
///
/// ### Absence
///
/// `Ref(None)`, `Any(None)`, `List(None)` and `Map(None)` are the absent
/// (nil) forms of their type. An absent list is not an empty list and an
/// empty wrapper is not a wrapper holding a null reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// UTF-8 string value.
    String(Rc<str>),
    /// Nullable reference to a heap slot.
    Ref(Option<HeapHandle>),
    /// Slot holding a value of any runtime type, or nothing.
    Any(Option<Rc<Value>>),
    /// Variable-length ordered collection; `None` when absent.
    List(Option<Rc<Vec<Value>>>),
    /// Fixed-length ordered collection; the length is part of its type.
    Array(Rc<[Value]>),
    /// Hash map keyed by hashable scalars or references; `None` when absent.
    Map(Option<Rc<HashMap<HashKey, Value>>>),
    /// Compound record.
    Record(Rc<Record>),
    /// Host function handle.
    Function(NativeFunction),
    /// Live channel endpoint.
    Channel(Rc<Channel>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Ref(Some(handle)) => write!(f, "&{}", handle),
            Value::Any(Some(inner)) => write!(f, "{}", inner),
            Value::Ref(None) | Value::Any(None) | Value::List(None) | Value::Map(None) => {
                write!(f, "nil")
            }
            Value::List(Some(elements)) => write_seq(f, elements),
            Value::Array(elements) => write_seq(f, elements),
            Value::Map(Some(pairs)) => {
                let mut keys: Vec<&HashKey> = pairs.keys().collect();
                keys.sort();
                let items: Vec<String> = keys
                    .into_iter()
                    .map(|k| format!("{}: {}", k, pairs[k]))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Value::Record(record) => {
                let mut items: Vec<String> = record
                    .public_fields()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect();
                if record.has_private_fields() {
                    items.push("..".to_string());
                }
                write!(f, "{}{{{}}}", record.type_name(), items.join(", "))
            }
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Channel(channel) => write!(f, "<channel {}>", channel.id()),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, elements: &[Value]) -> fmt::Result {
    let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
    write!(f, "[{}]", items.join(", "))
}

impl Value {
    /// Returns the runtime type descriptor of this value.
    ///
    /// Absent values report the same type as present ones.
    pub fn ty(&self) -> Type {
        match self {
            Value::Integer(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Boolean(_) => Type::Bool,
            Value::String(_) => Type::Str,
            Value::Ref(_) => Type::Ref,
            Value::Any(_) => Type::Any,
            Value::List(_) => Type::List,
            Value::Array(elements) => Type::Array(elements.len()),
            Value::Map(_) => Type::Map,
            Value::Record(record) => Type::Record(record.record_type().clone()),
            Value::Function(_) => Type::Function,
            Value::Channel(_) => Type::Channel,
        }
    }

    /// Returns the canonical runtime type label used in diagnostics.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Int",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Bool",
            Value::String(_) => "String",
            Value::Ref(_) => "Ref",
            Value::Any(_) => "Any",
            Value::List(_) => "List",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
            Value::Function(_) => "Function",
            Value::Channel(_) => "Channel",
        }
    }

    /// Returns `true` for the absent form of a nullable type.
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Ref(None) | Value::Any(None) | Value::List(None) | Value::Map(None)
        )
    }

    /// Converts this value into a map key if the value is hashable.
    ///
    /// Hashable variants are `Integer`, `Boolean`, `String` and `Ref`.
    pub fn to_hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(v) => Some(HashKey::Integer(*v)),
            Value::Boolean(v) => Some(HashKey::Boolean(*v)),
            Value::String(v) => Some(HashKey::String(v.to_string())),
            Value::Ref(handle) => Some(HashKey::Ref(*handle)),
            _ => None,
        }
    }

    pub fn string(text: &str) -> Self {
        Value::String(text.into())
    }

    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(Some(Rc::new(elements)))
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(elements.into())
    }

    pub fn map<K: Into<HashKey>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Some(Rc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn any(inner: Value) -> Self {
        Value::Any(Some(Rc::new(inner)))
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Rc::new(record))
    }

    pub fn as_handle(&self) -> Option<HeapHandle> {
        match self {
            Value::Ref(handle) => *handle,
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(Some(elements)) => Some(elements.as_slice()),
            Value::Array(elements) => Some(&elements[..]),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<HashKey, Value>> {
        match self {
            Value::Map(Some(entries)) => Some(&**entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(&**record),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}
