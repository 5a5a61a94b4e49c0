use log::trace;

use crate::{
    copy::{
        category::classify,
        config::CopyConfig,
        dispatch::copier_for,
        error::CopyError,
        path::{CopyPath, PathSegment, locate},
        stats::CopyStats,
        tracker::AliasTracker,
    },
    runtime::{
        heap::{HeapHandle, ValueHeap},
        value::Value,
    },
};

/// A destination slot that is reserved and registered but not filled yet.
struct PendingSlot {
    source: HeapHandle,
    destination: HeapHandle,
    pointee: Value,
    /// Pending slot whose value held the reference; `None` for the top-level value.
    parent: Option<usize>,
}

/// Everything threaded through one top-level copy.
///
/// Pointees of references are not copied where the reference is met. The
/// reference copier queues them, and [`CopyState::run`] copies each queued
/// pointee as a value of its own, so native recursion is bounded by how
/// deeply a single value nests and never by the length of a reference chain.
pub struct CopyState<'h> {
    pub(crate) heap: &'h mut ValueHeap,
    pub(crate) tracker: AliasTracker,
    pub(crate) stats: CopyStats,
    pending: Vec<PendingSlot>,
    current: Option<usize>,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'h> CopyState<'h> {
    pub fn new(heap: &'h mut ValueHeap, config: &CopyConfig) -> Self {
        Self {
            heap,
            tracker: AliasTracker::new(),
            stats: CopyStats::default(),
            pending: Vec::new(),
            current: None,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Classifies `value` and copies it with the copier for its category.
    pub fn route(&mut self, value: &Value) -> Result<Value, CopyError> {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(CopyError::DepthLimitExceeded {
                    limit,
                    path: CopyPath::root(),
                });
            }
        }

        let category = classify(&value.ty());
        trace!("copy {} value as {}", value.type_name(), category);

        self.depth += 1;
        let copied = copier_for(category)(value, self);
        self.depth -= 1;
        copied
    }

    /// Copies `root`, then every pointee queued while copying, in order.
    pub fn run(&mut self, root: &Value) -> Result<Value, CopyError> {
        let copied = self.route(root)?;

        let mut next = 0;
        while next < self.pending.len() {
            self.current = Some(next);
            let pointee = self.pending[next].pointee.clone();
            let filling = self
                .route(&pointee)
                .map_err(|err| self.anchor(next, root, err))?;

            let destination = self.pending[next].destination;
            let filled = self.heap.fill(destination, filling);
            debug_assert!(filled, "reserved slot {} vanished", destination);
            next += 1;
        }
        self.current = None;

        Ok(copied)
    }

    /// Queues the copy of `pointee` into the reserved slot `destination`.
    pub(crate) fn defer(&mut self, source: HeapHandle, destination: HeapHandle, pointee: Value) {
        self.pending.push(PendingSlot {
            source,
            destination,
            pointee,
            parent: self.current,
        });
    }

    /// Extends the path of a failure inside a queued pointee back to the
    /// top-level value, one enclosing slot at a time.
    fn anchor(&self, mut slot: usize, root: &Value, mut err: CopyError) -> CopyError {
        loop {
            let pending = &self.pending[slot];
            err = err.within(PathSegment::Deref);

            let holder = match pending.parent {
                Some(parent) => &self.pending[parent].pointee,
                None => root,
            };
            let segments = locate(holder, pending.source).unwrap_or_default();
            for segment in segments.into_iter().rev() {
                err = err.within(segment);
            }

            match pending.parent {
                Some(parent) => slot = parent,
                None => return err,
            }
        }
    }

    pub(crate) fn finish(self) -> CopyStats {
        self.stats
    }

    /// Frees every slot reserved by this copy. Returns how many were freed.
    pub(crate) fn abandon(self) -> usize {
        let heap = self.heap;
        self.tracker
            .destinations()
            .filter(|&slot| heap.release(slot))
            .count()
    }
}
