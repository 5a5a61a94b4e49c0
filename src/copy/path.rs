use std::fmt;

use crate::runtime::{hash_key::HashKey, heap::HeapHandle, value::Value};

/// One step from a value into one of its constituents.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
    /// The value stored under a key.
    Key(HashKey),
    /// A reference key itself.
    MapKey(HashKey),
    Deref,
    Unwrap,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Key(key) => write!(f, "[{}]", key),
            PathSegment::MapKey(key) => write!(f, ".(key {})", key),
            PathSegment::Deref => write!(f, ".*"),
            PathSegment::Unwrap => write!(f, ".(any)"),
        }
    }
}

/// Location of a value inside the top-level value being copied.
///
/// Paths are built while a failure unwinds, so segments are stored innermost
/// first and only ever cost anything on the error path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyPath {
    innermost_first: Vec<PathSegment>,
}

impl CopyPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Adds the segment leading from an enclosing value to the current path.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.innermost_first.push(segment);
    }

    /// Segments from the root outwards.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.innermost_first.iter().rev()
    }

    pub fn is_root(&self) -> bool {
        self.innermost_first.is_empty()
    }
}

impl fmt::Display for CopyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in self.segments() {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Segments, outermost first, from `value` to the first reference to `target`
/// it holds without going through another reference.
///
/// Constituents are visited in the order the copiers visit them.
pub(crate) fn locate(value: &Value, target: HeapHandle) -> Option<Vec<PathSegment>> {
    let mut innermost_first = find(value, target)?;
    innermost_first.reverse();
    Some(innermost_first)
}

fn find(value: &Value, target: HeapHandle) -> Option<Vec<PathSegment>> {
    match value {
        Value::Ref(handle) => (*handle == Some(target)).then(Vec::new),
        Value::Any(Some(inner)) => enclosed(find(inner, target), PathSegment::Unwrap),
        Value::List(Some(items)) => find_in(items, target),
        Value::Array(items) => find_in(items, target),
        Value::Map(Some(entries)) => entries.iter().find_map(|(key, entry)| {
            if *key == HashKey::Ref(Some(target)) {
                return Some(vec![PathSegment::MapKey(key.clone())]);
            }
            enclosed(find(entry, target), PathSegment::Key(key.clone()))
        }),
        Value::Record(record) => record
            .record_type()
            .fields()
            .iter()
            .zip(record.raw_fields())
            .find_map(|(decl, field)| {
                enclosed(find(field, target), PathSegment::Field(decl.name.clone()))
            }),
        _ => None,
    }
}

fn find_in(items: &[Value], target: HeapHandle) -> Option<Vec<PathSegment>> {
    items
        .iter()
        .enumerate()
        .find_map(|(index, item)| enclosed(find(item, target), PathSegment::Index(index)))
}

fn enclosed(found: Option<Vec<PathSegment>>, segment: PathSegment) -> Option<Vec<PathSegment>> {
    let mut innermost_first = found?;
    innermost_first.push(segment);
    Some(innermost_first)
}
