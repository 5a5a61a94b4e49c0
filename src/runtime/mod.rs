//! Runtime value model: values, their types, and the heap they reference.
//!
//! # No-Cycle Invariant
//! Aggregate values are immutable and shared through `Rc`, so the `Rc` graph
//! must stay acyclic. Cyclic structures are built from `Value::Ref` handles
//! into a [`ValueHeap`](heap::ValueHeap) instead: the heap owns every slot,
//! and a cycle of handles is just a cycle of indices.
use crate::runtime::value::Value;

pub mod channel;
pub mod equal;
pub mod hash_key;
pub mod heap;
pub mod native_function;
pub mod record;
pub mod timestamp;
pub mod types;
pub mod value;

pub type NativeFn = fn(Vec<Value>) -> Result<Value, String>;
