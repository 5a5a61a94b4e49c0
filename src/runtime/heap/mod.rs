pub mod heap_entry;
pub mod heap_handle;
pub mod value_heap;

pub use heap_handle::HeapHandle;
pub use value_heap::ValueHeap;
