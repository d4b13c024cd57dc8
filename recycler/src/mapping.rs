use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::motion::Tween;
use crate::{Slot, Vec2, VisibleRange};

/// A slot bound to an index, plus the geometry it was last given.
#[derive(Debug)]
pub(crate) struct Bound<S> {
    pub(crate) slot: Slot<S>,
    /// Position the slot is currently displayed at (mid-tween while animating).
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    /// Final layout position; equals `position` unless a move animation is in flight.
    pub(crate) target: Vec2,
    pub(crate) motion: Option<Tween<Vec2>>,
}

/// `index -> slot` bijection over the materialized indexes.
#[derive(Debug)]
pub(crate) struct ActiveMapping<S> {
    entries: BTreeMap<usize, Bound<S>>,
}

impl<S> Default for ActiveMapping<S> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<S> ActiveMapping<S> {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Bound<S>> {
        self.entries.get(&index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Bound<S>> {
        self.entries.get_mut(&index)
    }

    pub(crate) fn insert(&mut self, index: usize, bound: Bound<S>) {
        let prev = self.entries.insert(index, bound);
        debug_assert!(prev.is_none(), "index {index} materialized twice");
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Bound<S>> {
        self.entries.remove(&index)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Bound<S>)> + '_ {
        self.entries.iter().map(|(&i, b)| (i, b))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Bound<S>)> + '_ {
        self.entries.iter_mut().map(|(&i, b)| (i, b))
    }

    /// Removes every entry, lowest index first.
    pub(crate) fn drain(&mut self) -> Vec<(usize, Bound<S>)> {
        core::mem::take(&mut self.entries).into_iter().collect()
    }

    /// Removes entries outside `range` (everything when `range` is `None`).
    pub(crate) fn take_outside(&mut self, range: Option<VisibleRange>) -> Vec<(usize, Bound<S>)> {
        let Some(range) = range else {
            return self.drain();
        };
        let mut kept = self.entries.split_off(&range.first);
        let after = kept.split_off(&(range.last + 1));
        let mut evicted: Vec<_> = core::mem::take(&mut self.entries).into_iter().collect();
        evicted.extend(after);
        self.entries = kept;
        evicted
    }

    /// Removes entries at `index..` (stale keys past the end of the dataset).
    pub(crate) fn take_from(&mut self, index: usize) -> Vec<(usize, Bound<S>)> {
        self.entries.split_off(&index).into_iter().collect()
    }

    /// Removes entries inside `index..index + count`.
    pub(crate) fn take_span(&mut self, index: usize, count: usize) -> Vec<(usize, Bound<S>)> {
        let mut span = self.entries.split_off(&index);
        let mut after = span.split_off(&(index + count));
        self.entries.append(&mut after);
        span.into_iter().collect()
    }

    /// Entries at `range`, for in-place updates after a re-key.
    pub(crate) fn range_mut(
        &mut self,
        range: core::ops::RangeFrom<usize>,
    ) -> impl Iterator<Item = (usize, &mut Bound<S>)> + '_ {
        self.entries.range_mut(range).map(|(&i, b)| (i, b))
    }

    /// Re-keys entries at `index..` to `key + count`. Splitting first keeps old and new keys
    /// from colliding.
    pub(crate) fn shift_up(&mut self, index: usize, count: usize) {
        let tail = self.entries.split_off(&index);
        for (k, mut b) in tail {
            let key = k + count;
            b.slot.set_bound_index(Some(key));
            self.entries.insert(key, b);
        }
    }

    /// Re-keys entries at `index..` to `key - count`. Keys in `index - count..index` must
    /// already be vacant.
    pub(crate) fn shift_down(&mut self, index: usize, count: usize) {
        let tail = self.entries.split_off(&index);
        for (k, mut b) in tail {
            let key = k - count;
            b.slot.set_bound_index(Some(key));
            let prev = self.entries.insert(key, b);
            debug_assert!(prev.is_none(), "shift_down collided at {key}");
        }
    }

    /// Checks that every slot is bound to its own key.
    pub(crate) fn is_consistent(&self) -> bool {
        self.entries
            .iter()
            .all(|(&k, b)| b.slot.bound_index() == Some(k))
    }
}
