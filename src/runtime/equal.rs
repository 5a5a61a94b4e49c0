//! Structural equality over value graphs.

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use crate::runtime::{
    hash_key::HashKey,
    heap::{HeapHandle, ValueHeap},
    value::Value,
};

/// Compares two values structurally, following references through their heaps.
///
/// References are equal when both are null, when they name the same slot of
/// the same heap, or when their pointees are deeply equal. A pair of slots
/// already under comparison is assumed equal, which makes cyclic graphs
/// compare in finite time. Reference map keys match when their pointees are
/// deeply equal. Floats follow IEEE semantics (`NaN != NaN`), functions are
/// never equal and channels are equal only to themselves.
pub fn deep_equal(a: &Value, heap_a: &ValueHeap, b: &Value, heap_b: &ValueHeap) -> bool {
    let mut cmp = DeepEq {
        heap_a,
        heap_b,
        same_heap: std::ptr::eq(heap_a, heap_b),
        visited: HashSet::new(),
    };
    cmp.eq(a, b)
}

struct DeepEq<'a> {
    heap_a: &'a ValueHeap,
    heap_b: &'a ValueHeap,
    same_heap: bool,
    visited: HashSet<(HeapHandle, HeapHandle)>,
}

impl DeepEq<'_> {
    fn eq(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x == y,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Ref(x), Value::Ref(y)) => match (x, y) {
                (None, None) => true,
                (Some(x), Some(y)) => self.eq_handles(*x, *y),
                _ => false,
            },
            (Value::Any(x), Value::Any(y)) => match (x, y) {
                (None, None) => true,
                (Some(x), Some(y)) => self.eq(x, y),
                _ => false,
            },
            (Value::List(x), Value::List(y)) => match (x, y) {
                (None, None) => true,
                (Some(x), Some(y)) => self.eq_seq(x, y),
                _ => false,
            },
            (Value::Array(x), Value::Array(y)) => self.eq_seq(x, y),
            (Value::Map(x), Value::Map(y)) => match (x, y) {
                (None, None) => true,
                (Some(x), Some(y)) => self.eq_map(x, y),
                _ => false,
            },
            (Value::Record(x), Value::Record(y)) => {
                x.record_type() == y.record_type()
                    && x
                        .raw_fields()
                        .iter()
                        .zip(y.raw_fields())
                        .all(|(left, right)| self.eq(left, right))
            }
            (Value::Channel(x), Value::Channel(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }

    fn eq_seq(&mut self, a: &[Value], b: &[Value]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(left, right)| self.eq(left, right))
    }

    fn eq_map(&mut self, a: &HashMap<HashKey, Value>, b: &HashMap<HashKey, Value>) -> bool {
        if a.len() != b.len() {
            return false;
        }

        let mut matched = HashSet::new();
        for (key, left) in a {
            let found = match key {
                HashKey::Ref(Some(handle)) => self.match_ref_key(*handle, left, b, &mut matched),
                _ => match b.get(key) {
                    Some(right) => self.eq(left, right),
                    None => false,
                },
            };
            if !found {
                return false;
            }
        }
        true
    }

    /// Finds an unmatched reference key of `b` equal to `handle` whose entry
    /// equals `left`.
    fn match_ref_key(
        &mut self,
        handle: HeapHandle,
        left: &Value,
        b: &HashMap<HashKey, Value>,
        matched: &mut HashSet<HeapHandle>,
    ) -> bool {
        for (key, right) in b {
            let HashKey::Ref(Some(candidate)) = key else {
                continue;
            };
            if matched.contains(candidate) {
                continue;
            }
            // A failed candidate must not leave its pairs assumed equal.
            let saved = self.visited.clone();
            if self.eq_handles(handle, *candidate) && self.eq(left, right) {
                matched.insert(*candidate);
                return true;
            }
            self.visited = saved;
        }
        false
    }

    fn eq_handles(&mut self, a: HeapHandle, b: HeapHandle) -> bool {
        if self.same_heap && a == b {
            return true;
        }
        if !self.visited.insert((a, b)) {
            return true;
        }
        match (self.heap_a.get(a), self.heap_b.get(b)) {
            (Some(left), Some(right)) => self.eq(left, right),
            _ => false,
        }
    }
}
