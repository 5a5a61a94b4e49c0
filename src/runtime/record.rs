//! Compound records: a fixed set of named, typed fields.
//!
//! Field visibility splits the record surface in two. Public fields are
//! readable and updatable through [`Record::get`] and [`Record::with_field`].
//! Private fields are set once, at construction, and are opaque afterwards.
//! Inside the crate, `raw_fields` reads every field. The record copier alone
//! writes private state back, through `rebuilt`.

use std::rc::Rc;

use thiserror::Error;

use crate::runtime::{types::Type, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Type,
    pub visibility: Visibility,
}

impl FieldDecl {
    pub fn public(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
        }
    }

    pub fn private(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
        }
    }
}

/// Layout of a record type.
#[derive(Debug, PartialEq)]
pub struct RecordType {
    name: String,
    fields: Vec<FieldDecl>,
    plain: bool,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Rc<Self> {
        let plain = fields.iter().all(|field| field.ty.is_scalar());
        Rc::new(Self {
            name: name.into(),
            fields,
            plain,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Returns `true` when no field, transitively, holds an indirection.
    pub fn is_plain(&self) -> bool {
        self.plain
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record {record} has {expected} fields, got {found} values")]
    Arity {
        record: String,
        expected: usize,
        found: usize,
    },
    #[error("field {record}.{field} expects {expected}, got {found}")]
    FieldType {
        record: String,
        field: String,
        expected: Type,
        found: Type,
    },
    #[error("record {record} has no public field {field}")]
    UnknownField { record: String, field: String },
}

/// Instance of a [`RecordType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: Rc<RecordType>,
    fields: Vec<Value>,
}

impl Record {
    /// Builds a record from one value per declared field, in declaration order.
    pub fn new(ty: Rc<RecordType>, fields: Vec<Value>) -> Result<Self, RecordError> {
        if fields.len() != ty.fields.len() {
            return Err(RecordError::Arity {
                record: ty.name.clone(),
                expected: ty.fields.len(),
                found: fields.len(),
            });
        }

        for (decl, value) in ty.fields.iter().zip(&fields) {
            check_field(&ty, decl, value)?;
        }

        Ok(Self { ty, fields })
    }

    pub fn record_type(&self) -> &Rc<RecordType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        &self.ty.name
    }

    /// Reads a public field. Private fields are reported as missing.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.public_index(name)?;
        self.fields.get(index)
    }

    /// Returns a copy of this record with one public field replaced.
    pub fn with_field(&self, name: &str, value: Value) -> Result<Self, RecordError> {
        let index = self
            .public_index(name)
            .ok_or_else(|| RecordError::UnknownField {
                record: self.ty.name.clone(),
                field: name.to_string(),
            })?;
        check_field(&self.ty, &self.ty.fields[index], &value)?;

        let mut fields = self.fields.clone();
        fields[index] = value;
        Ok(Self {
            ty: self.ty.clone(),
            fields,
        })
    }

    pub fn public_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields
            .iter()
            .zip(&self.fields)
            .filter(|(decl, _)| decl.visibility == Visibility::Public)
            .map(|(decl, value)| (decl.name.as_str(), value))
    }

    pub fn has_private_fields(&self) -> bool {
        self.ty
            .fields
            .iter()
            .any(|decl| decl.visibility == Visibility::Private)
    }

    /// All field values, private ones included, in declaration order.
    pub(crate) fn raw_fields(&self) -> &[Value] {
        &self.fields
    }

    /// A record of this record's type holding `fields`, private ones included.
    ///
    /// Fields are not checked: callers pass one copy of each raw field, in
    /// order.
    pub(crate) fn rebuilt(&self, fields: Vec<Value>) -> Self {
        debug_assert_eq!(self.ty.fields.len(), fields.len());
        Self {
            ty: self.ty.clone(),
            fields,
        }
    }

    fn public_index(&self, name: &str) -> Option<usize> {
        let index = self.ty.field_index(name)?;
        (self.ty.fields[index].visibility == Visibility::Public).then_some(index)
    }
}

fn check_field(ty: &RecordType, decl: &FieldDecl, value: &Value) -> Result<(), RecordError> {
    let found = value.ty();
    if found == decl.ty {
        Ok(())
    } else {
        Err(RecordError::FieldType {
            record: ty.name.clone(),
            field: decl.name.clone(),
            expected: decl.ty.clone(),
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_type() -> Rc<RecordType> {
        RecordType::new(
            "Point",
            vec![
                FieldDecl::public("x", Type::Int),
                FieldDecl::private("secret", Type::Str),
            ],
        )
    }

    #[test]
    fn test_plain_record_types() {
        let point = point_type();
        assert!(point.is_plain());

        let nested = RecordType::new("Line", vec![FieldDecl::public("from", Type::Record(point))]);
        assert!(nested.is_plain());

        let linked = RecordType::new("Node", vec![FieldDecl::public("next", Type::Ref)]);
        assert!(!linked.is_plain());

        let outer = RecordType::new("Outer", vec![FieldDecl::public("node", Type::Record(linked))]);
        assert!(!outer.is_plain());
    }

    #[test]
    fn test_private_fields_are_hidden() {
        let record = Record::new(
            point_type(),
            vec![Value::Integer(1), Value::String("s".into())],
        )
        .unwrap();

        assert_eq!(record.get("x"), Some(&Value::Integer(1)));
        assert_eq!(record.get("secret"), None);
        assert!(record.has_private_fields());
        assert_eq!(record.public_fields().count(), 1);
        assert_eq!(record.raw_fields().len(), 2);
    }

    #[test]
    fn test_with_field_updates_public_only() {
        let record = Record::new(
            point_type(),
            vec![Value::Integer(1), Value::String("s".into())],
        )
        .unwrap();

        let moved = record.with_field("x", Value::Integer(5)).unwrap();
        assert_eq!(moved.get("x"), Some(&Value::Integer(5)));
        assert_eq!(record.get("x"), Some(&Value::Integer(1)));

        let err = record
            .with_field("secret", Value::String("t".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "record Point has no public field secret");
    }

    #[test]
    fn test_construction_errors() {
        let err = Record::new(point_type(), vec![Value::Integer(1)]).unwrap_err();
        assert_eq!(err.to_string(), "record Point has 2 fields, got 1 values");

        let err = Record::new(
            point_type(),
            vec![Value::Boolean(true), Value::String("s".into())],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "field Point.x expects Int, got Bool");
    }
}
