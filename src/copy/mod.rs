//! Deep copy of runtime values.
//!
//! A copy walks the value graph through the router ([`CopyState::route`]):
//! each value is classified by its runtime type, and the copier for that
//! category duplicates it, routing every constituent back through the same
//! state. Pointees of references are queued and copied in turn by
//! [`CopyState::run`]. The state owns the alias tracker, so references that were shared,
//! or cyclic, in the source are shared, or cyclic, among the new slots of the
//! copy, and never with the source.
//!
//! A copy either succeeds completely or fails without a value. Slots reserved
//! by a failed copy are released before the error is returned.

use log::debug;

pub mod category;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod stats;
pub mod state;
pub mod tracker;

mod collection;
mod map;
mod record;
mod reference;
mod scalar;
mod unsupported;
mod wrapper;

#[cfg(test)]
mod dispatch_test;
#[cfg(test)]
mod record_test;

pub use category::{Category, classify};
pub use config::CopyConfig;
pub use error::CopyError;
pub use path::{CopyPath, PathSegment};
pub use state::CopyState;
pub use stats::CopyStats;

use crate::runtime::{heap::ValueHeap, value::Value};

/// Result of a successful [`copy_with_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct CopyOutput {
    pub value: Value,
    pub stats: CopyStats,
}

/// Deep-copies `value`, allocating copied references in `heap`.
///
/// References in `value` must name slots of `heap`.
pub fn copy(value: &Value, heap: &mut ValueHeap) -> Result<Value, CopyError> {
    copy_with_config(value, heap, &CopyConfig::default()).map(|output| output.value)
}

/// Deep-copies `value`, panicking if it cannot be copied.
///
/// For callers that already know `value` holds no functions or channels.
pub fn must_copy(value: &Value, heap: &mut ValueHeap) -> Value {
    match copy(value, heap) {
        Ok(copied) => copied,
        Err(err) => panic!("must_copy: {}", err),
    }
}

/// Deep-copies `value` under `config` and reports what the copy did.
pub fn copy_with_config(
    value: &Value,
    heap: &mut ValueHeap,
    config: &CopyConfig,
) -> Result<CopyOutput, CopyError> {
    debug!("deep copy of {} value", value.type_name());

    let mut state = CopyState::new(heap, config);
    match state.run(value) {
        Ok(copied) => {
            let stats = state.finish();
            debug!(
                "deep copy done: {} references, {} reused",
                stats.references, stats.reused_references
            );
            Ok(CopyOutput {
                value: copied,
                stats,
            })
        }
        Err(err) => {
            let released = state.abandon();
            debug!("deep copy failed: {}; released {} slots", err, released);
            Err(err)
        }
    }
}
