use std::fmt;

use serde::Serialize;

use crate::runtime::types::Type;

/// Coarse classification of a runtime type, selecting its copy algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Scalar,
    Reference,
    Wrapper,
    List,
    Array,
    Map,
    Record,
    Unsupported,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Scalar,
        Category::Reference,
        Category::Wrapper,
        Category::List,
        Category::Array,
        Category::Map,
        Category::Record,
        Category::Unsupported,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Scalar => "scalar",
            Category::Reference => "reference",
            Category::Wrapper => "wrapper",
            Category::List => "list",
            Category::Array => "array",
            Category::Map => "map",
            Category::Record => "record",
            Category::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a runtime type. Total over every type; content is never consulted.
///
/// Records whose fields are all scalar, transitively, classify as `Scalar`:
/// duplicating them by value is already a deep copy.
pub fn classify(ty: &Type) -> Category {
    match ty {
        Type::Int | Type::Float | Type::Bool | Type::Str => Category::Scalar,
        Type::Record(record) if record.is_plain() => Category::Scalar,
        Type::Record(_) => Category::Record,
        Type::Ref => Category::Reference,
        Type::Any => Category::Wrapper,
        Type::List => Category::List,
        Type::Array(_) => Category::Array,
        Type::Map => Category::Map,
        Type::Function | Type::Channel => Category::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::record::{FieldDecl, RecordType};

    #[test]
    fn test_classify_builtin_types() {
        assert_eq!(classify(&Type::Int), Category::Scalar);
        assert_eq!(classify(&Type::Float), Category::Scalar);
        assert_eq!(classify(&Type::Bool), Category::Scalar);
        assert_eq!(classify(&Type::Str), Category::Scalar);
        assert_eq!(classify(&Type::Ref), Category::Reference);
        assert_eq!(classify(&Type::Any), Category::Wrapper);
        assert_eq!(classify(&Type::List), Category::List);
        assert_eq!(classify(&Type::Array(0)), Category::Array);
        assert_eq!(classify(&Type::Map), Category::Map);
        assert_eq!(classify(&Type::Function), Category::Unsupported);
        assert_eq!(classify(&Type::Channel), Category::Unsupported);
    }

    #[test]
    fn test_classify_records_by_layout() {
        let plain = RecordType::new("Inner", vec![FieldDecl::public("value", Type::Int)]);
        assert_eq!(classify(&Type::Record(plain.clone())), Category::Scalar);

        let nested = RecordType::new(
            "Outer",
            vec![
                FieldDecl::public("inner", Type::Record(plain)),
                FieldDecl::private("tags", Type::List),
            ],
        );
        assert_eq!(classify(&Type::Record(nested)), Category::Record);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Category::Unsupported).unwrap(),
            "\"unsupported\""
        );
        assert_eq!(Category::Reference.to_string(), "reference");
    }
}
