pub mod copy;
pub mod runtime;

pub use copy::{CopyConfig, CopyError, copy, copy_with_config, must_copy};
