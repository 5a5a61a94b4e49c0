use std::fmt::Write;

use crate::runtime::{
    hash_key::HashKey,
    heap::{heap_entry::HeapEntry, heap_handle::HeapHandle},
    value::Value,
};

/// Slot arena holding every value reachable through a `Value::Ref`.
///
/// Slots are the only identity-bearing, mutable storage in the runtime.
/// Reference cycles live here as handle cycles, never as `Rc` cycles, so
/// dropping the values that point into the heap cannot leak. Unreachable
/// slots are reclaimed by [`ValueHeap::collect`] or [`ValueHeap::release`].
pub struct ValueHeap {
    entries: Vec<Option<HeapEntry>>,
    free_list: Vec<u32>,
    total_allocations: usize,
    total_collections: usize,
}

impl Default for ValueHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueHeap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            total_allocations: 0,
            total_collections: 0,
        }
    }

    /// Allocates a slot holding `value` and returns its handle.
    pub fn alloc(&mut self, value: Value) -> HeapHandle {
        self.insert(Some(value))
    }

    /// Allocates a slot without a value yet.
    ///
    /// The slot is reported as absent by [`Self::get`] until it is filled.
    /// Reserving before filling is what lets a value refer to its own slot.
    pub fn reserve(&mut self) -> HeapHandle {
        self.insert(None)
    }

    /// Stores `value` in a reserved or live slot.
    ///
    /// Returns `false` if the handle names a free or out-of-range slot.
    pub fn fill(&mut self, handle: HeapHandle, value: Value) -> bool {
        match self.entries.get_mut(handle.0 as usize) {
            Some(Some(entry)) => {
                entry.value = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Replaces the value of a live slot, returning the previous value.
    pub fn set(&mut self, handle: HeapHandle, value: Value) -> Option<Value> {
        match self.entries.get_mut(handle.0 as usize) {
            Some(Some(entry)) if entry.value.is_some() => entry.value.replace(value),
            _ => None,
        }
    }

    /// Returns the value stored in a live slot.
    ///
    /// Reserved, freed and out-of-range slots all yield `None`.
    pub fn get(&self, handle: HeapHandle) -> Option<&Value> {
        self.entries
            .get(handle.0 as usize)
            .and_then(|slot| slot.as_ref())
            .and_then(|entry| entry.value.as_ref())
    }

    /// Returns `true` if the handle names a reserved or live slot.
    pub fn contains(&self, handle: HeapHandle) -> bool {
        matches!(self.entries.get(handle.0 as usize), Some(Some(_)))
    }

    /// Frees a slot immediately, regardless of reachability.
    ///
    /// Returns `false` if the slot was already free.
    pub fn release(&mut self, handle: HeapHandle) -> bool {
        match self.entries.get_mut(handle.0 as usize) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.free_list.push(handle.0);
                true
            }
            _ => false,
        }
    }

    /// Returns the number of reserved or live slots.
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the total number of slots ever allocated by this heap.
    pub fn total_allocations(&self) -> usize {
        self.total_allocations
    }

    /// Returns the total number of completed collections.
    pub fn total_collections(&self) -> usize {
        self.total_collections
    }

    /// Runs a mark-and-sweep pass, freeing every slot not reachable from `roots`.
    ///
    /// Returns the number of slots freed.
    pub fn collect(&mut self, roots: &[Value]) -> usize {
        for root in roots {
            self.mark_value(root);
        }

        let live_before = self.live_count();
        self.sweep();
        self.total_collections += 1;
        live_before - self.live_count()
    }

    /// Renders a value, following references through this heap.
    ///
    /// A reference is printed as `&` followed by its pointee. A reference
    /// back to a slot that is already being printed renders as `<cycle #n>`.
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        let mut active = Vec::new();
        self.render_into(value, &mut out, &mut active);
        out
    }

    fn insert(&mut self, value: Option<Value>) -> HeapHandle {
        self.total_allocations += 1;

        let entry = HeapEntry {
            value,
            marked: false,
        };

        if let Some(idx) = self.free_list.pop() {
            self.entries[idx as usize] = Some(entry);
            HeapHandle(idx)
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Some(entry));
            HeapHandle(idx)
        }
    }

    fn mark_value(&mut self, root: &Value) {
        let mut worklist = vec![root.clone()];

        while let Some(value) = worklist.pop() {
            match value {
                Value::Ref(Some(handle)) => {
                    let idx = handle.0 as usize;
                    // Mark first so cycles and shared slots are visited once.
                    let Some(Some(entry)) = self.entries.get_mut(idx) else {
                        continue;
                    };
                    if entry.marked {
                        continue;
                    }
                    entry.marked = true;
                    if let Some(pointee) = &entry.value {
                        worklist.push(pointee.clone());
                    }
                }
                Value::Any(Some(inner)) => worklist.push(inner.as_ref().clone()),
                Value::List(Some(items)) => worklist.extend(items.iter().cloned()),
                Value::Array(items) => worklist.extend(items.iter().cloned()),
                Value::Map(Some(entries)) => {
                    for (key, entry) in entries.iter() {
                        if let HashKey::Ref(Some(handle)) = key {
                            worklist.push(Value::Ref(Some(*handle)));
                        }
                        worklist.push(entry.clone());
                    }
                }
                Value::Record(record) => worklist.extend(record.raw_fields().iter().cloned()),
                // Leaf values: no heap references
                Value::Integer(_)
                | Value::Float(_)
                | Value::Boolean(_)
                | Value::String(_)
                | Value::Ref(None)
                | Value::Any(None)
                | Value::List(None)
                | Value::Map(None)
                | Value::Function(_)
                | Value::Channel(_) => {}
            }
        }
    }

    fn sweep(&mut self) {
        for (i, slot) in self.entries.iter_mut().enumerate() {
            if let Some(entry) = slot {
                if entry.marked {
                    entry.marked = false;
                } else {
                    *slot = None;
                    self.free_list.push(i as u32);
                }
            }
        }
    }

    fn render_into(&self, value: &Value, out: &mut String, active: &mut Vec<HeapHandle>) {
        match value {
            Value::Ref(Some(handle)) => {
                if active.contains(handle) {
                    let _ = write!(out, "<cycle {}>", handle);
                    return;
                }
                match self.get(*handle) {
                    Some(pointee) => {
                        out.push('&');
                        active.push(*handle);
                        self.render_into(pointee, out, active);
                        active.pop();
                    }
                    None => {
                        let _ = write!(out, "<dangling {}>", handle);
                    }
                }
            }
            Value::Any(Some(inner)) => self.render_into(inner, out, active),
            Value::List(Some(items)) => self.render_seq(items, out, active),
            Value::Array(items) => self.render_seq(items, out, active),
            Value::Map(Some(entries)) => {
                let mut keys: Vec<_> = entries.keys().collect();
                keys.sort();
                out.push('{');
                for (i, key) in keys.into_iter().enumerate() {
                    if i != 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}: ", key);
                    self.render_into(&entries[key], out, active);
                }
                out.push('}');
            }
            Value::Record(record) => {
                let _ = write!(out, "{}{{", record.type_name());
                let mut first = true;
                for (name, field) in record.public_fields() {
                    if !first {
                        out.push_str(", ");
                    }
                    first = false;
                    let _ = write!(out, "{}: ", name);
                    self.render_into(field, out, active);
                }
                if record.has_private_fields() {
                    out.push_str(if first { ".." } else { ", .." });
                }
                out.push('}');
            }
            other => {
                let _ = write!(out, "{}", other);
            }
        }
    }

    fn render_seq(&self, items: &[Value], out: &mut String, active: &mut Vec<HeapHandle>) {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i != 0 {
                out.push_str(", ");
            }
            self.render_into(item, out, active);
        }
        out.push(']');
    }
}
