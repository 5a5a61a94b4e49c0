use thiserror::Error;

use crate::{
    copy::{
        category::{Category, classify},
        path::{CopyPath, PathSegment},
    },
    runtime::{heap::HeapHandle, value::Value},
};

/// Failure of a copy. A failure anywhere voids the whole top-level copy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CopyError {
    /// The value's type has no duplication semantics (callables, channels).
    #[error("cannot copy {type_name} value at {path}")]
    Unsupported {
        type_name: &'static str,
        path: CopyPath,
    },
    /// A copier was handed a value outside its category.
    #[error("{expected} copier cannot copy {found} value at {path}")]
    CategoryMismatch {
        expected: Category,
        found: Category,
        path: CopyPath,
    },
    /// A reference names a heap slot that holds no value.
    #[error("dangling reference {handle} at {path}")]
    DanglingReference { handle: HeapHandle, path: CopyPath },
    /// The value nests deeper than the configured limit.
    #[error("copy depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: CopyPath },
}

impl CopyError {
    pub(crate) fn unsupported(value: &Value) -> Self {
        CopyError::Unsupported {
            type_name: value.type_name(),
            path: CopyPath::root(),
        }
    }

    pub(crate) fn mismatch(expected: Category, value: &Value) -> Self {
        CopyError::CategoryMismatch {
            expected,
            found: classify(&value.ty()),
            path: CopyPath::root(),
        }
    }

    /// Records that this failure happened inside `segment` of an enclosing value.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path_mut().prepend(segment);
        self
    }

    pub fn path(&self) -> &CopyPath {
        match self {
            CopyError::Unsupported { path, .. }
            | CopyError::CategoryMismatch { path, .. }
            | CopyError::DanglingReference { path, .. }
            | CopyError::DepthLimitExceeded { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut CopyPath {
        match self {
            CopyError::Unsupported { path, .. }
            | CopyError::CategoryMismatch { path, .. }
            | CopyError::DanglingReference { path, .. }
            | CopyError::DepthLimitExceeded { path, .. } => path,
        }
    }
}
