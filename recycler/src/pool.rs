use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};

use crate::{DEFAULT_TAG, SlotTag};

/// Identity of a pooled slot. Unique for the lifetime of a [`Pool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(u64);

impl SlotId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A reusable presentation handle owned either by a [`Pool`] (idle) or by its borrower.
///
/// The wrapped `view` is whatever the host's factory produced; the pool never inspects it.
#[derive(Debug)]
pub struct Slot<S> {
    id: SlotId,
    tag: SlotTag,
    bound_index: Option<usize>,
    view: S,
}

impl<S> Slot<S> {
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The sub-pool this slot was created by (and must be returned to).
    pub fn tag(&self) -> SlotTag {
        self.tag
    }

    pub fn bound_index(&self) -> Option<usize> {
        self.bound_index
    }

    pub fn set_bound_index(&mut self, index: Option<usize>) {
        self.bound_index = index;
    }

    pub fn view(&self) -> &S {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut S {
        &mut self.view
    }
}

/// Host-supplied lifecycle callbacks for one sub-pool.
pub struct PoolHooks<S> {
    create: Box<dyn FnMut(SlotTag) -> S>,
    activate: Option<Box<dyn FnMut(&mut S)>>,
    deactivate: Option<Box<dyn FnMut(&mut S)>>,
    destroy: Option<Box<dyn FnMut(S)>>,
}

impl<S> PoolHooks<S> {
    /// Hooks with only a factory. Slots are dropped when destroyed.
    pub fn new(create: impl FnMut(SlotTag) -> S + 'static) -> Self {
        Self {
            create: Box::new(create),
            activate: None,
            deactivate: None,
            destroy: None,
        }
    }

    /// Runs on every borrow, after the slot leaves the idle queue (e.g. "mark visible").
    pub fn with_activate(mut self, activate: impl FnMut(&mut S) + 'static) -> Self {
        self.activate = Some(Box::new(activate));
        self
    }

    /// Runs on every return, before the slot re-enters the idle queue or is destroyed.
    pub fn with_deactivate(mut self, deactivate: impl FnMut(&mut S) + 'static) -> Self {
        self.deactivate = Some(Box::new(deactivate));
        self
    }

    /// Receives slots that leave the pool for good (overflow, shrink, clear).
    pub fn with_destroy(mut self, destroy: impl FnMut(S) + 'static) -> Self {
        self.destroy = Some(Box::new(destroy));
        self
    }
}

impl<S> core::fmt::Debug for PoolHooks<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolHooks")
            .field("activate", &self.activate.is_some())
            .field("deactivate", &self.deactivate.is_some())
            .field("destroy", &self.destroy.is_some())
            .finish_non_exhaustive()
    }
}

/// Counters for one sub-pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    pub idle: usize,
    pub borrowed: usize,
    pub max_size: usize,
    /// Slots produced by the factory.
    pub created: u64,
    /// Slots handed to the destroy hook (or dropped).
    pub destroyed: u64,
    /// Borrows served from the idle queue.
    pub reused: u64,
}

struct SubPool<S> {
    hooks: PoolHooks<S>,
    idle: VecDeque<Slot<S>>,
    borrowed: usize,
    max_size: usize,
    created: u64,
    destroyed: u64,
    reused: u64,
}

impl<S> SubPool<S> {
    fn live(&self) -> usize {
        self.borrowed + self.idle.len()
    }

    fn destroy(&mut self, slot: Slot<S>) {
        self.destroyed = self.destroyed.saturating_add(1);
        match &mut self.hooks.destroy {
            Some(destroy) => destroy(slot.view),
            None => drop(slot),
        }
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle.len(),
            borrowed: self.borrowed,
            max_size: self.max_size,
            created: self.created,
            destroyed: self.destroyed,
            reused: self.reused,
        }
    }
}

/// A bounded object pool made of independent, tagged sub-pools.
///
/// Every sub-pool keeps `borrowed + idle <= max_size`. Borrowing past capacity fails with
/// `None` instead of growing; slots never move between tags. Idle slots are reused in FIFO
/// order so every slot gets rotated through.
pub struct Pool<S> {
    subs: BTreeMap<SlotTag, SubPool<S>>,
    next_id: u64,
}

impl<S> Default for Pool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Pool<S> {
    pub fn new() -> Self {
        Self {
            subs: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Builder form of [`Pool::register`].
    pub fn with_sub_pool(mut self, tag: SlotTag, max_size: usize, hooks: PoolHooks<S>) -> Self {
        self.register(tag, max_size, hooks);
        self
    }

    /// Registers (or replaces) the sub-pool for `tag`.
    ///
    /// Replacing a sub-pool destroys its idle slots with the *old* hooks. Slots still borrowed
    /// from the old sub-pool keep counting against the new one until returned.
    pub fn register(&mut self, tag: SlotTag, max_size: usize, hooks: PoolHooks<S>) {
        let borrowed = match self.subs.remove(&tag) {
            Some(mut old) => {
                while let Some(slot) = old.idle.pop_front() {
                    old.destroy(slot);
                }
                old.borrowed
            }
            None => 0,
        };
        rdebug!(tag, max_size, "Pool::register");
        self.subs.insert(
            tag,
            SubPool {
                hooks,
                idle: VecDeque::new(),
                borrowed,
                max_size,
                created: 0,
                destroyed: 0,
                reused: 0,
            },
        );
    }

    pub fn contains(&self, tag: SlotTag) -> bool {
        self.subs.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = SlotTag> + '_ {
        self.subs.keys().copied()
    }

    /// Borrows a slot for `tag`: the oldest idle slot if any, otherwise a freshly created one
    /// while capacity remains.
    ///
    /// Returns `None` when `tag` has no sub-pool or the sub-pool is exhausted. Callers are
    /// expected to treat exhaustion as a resource condition (log it, retry later).
    pub fn borrow(&mut self, tag: SlotTag) -> Option<Slot<S>> {
        let sub = self.subs.get_mut(&tag)?;
        let mut slot = if let Some(slot) = sub.idle.pop_front() {
            sub.reused = sub.reused.saturating_add(1);
            slot
        } else if sub.live() < sub.max_size {
            let id = SlotId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            sub.created = sub.created.saturating_add(1);
            Slot {
                id,
                tag,
                bound_index: None,
                view: (sub.hooks.create)(tag),
            }
        } else {
            rwarn!(tag, max_size = sub.max_size, "Pool::borrow: capacity exhausted");
            return None;
        };
        sub.borrowed += 1;
        if let Some(activate) = &mut sub.hooks.activate {
            activate(&mut slot.view);
        }
        Some(slot)
    }

    /// Returns a borrowed slot to the sub-pool it came from.
    ///
    /// The deactivate hook always runs first. Returns `true` when the slot re-entered the idle
    /// queue, `false` when it was destroyed instead (the sub-pool is over capacity, e.g. after
    /// [`Pool::set_max_size`] lowered it, or the tag is no longer registered).
    pub fn give_back(&mut self, mut slot: Slot<S>) -> bool {
        let Some(sub) = self.subs.get_mut(&slot.tag) else {
            rwarn!(tag = slot.tag, "Pool::give_back: no sub-pool for tag; dropping slot");
            return false;
        };
        debug_assert!(sub.borrowed > 0, "give_back without a matching borrow");
        sub.borrowed = sub.borrowed.saturating_sub(1);
        slot.bound_index = None;
        if let Some(deactivate) = &mut sub.hooks.deactivate {
            deactivate(&mut slot.view);
        }
        if sub.live() >= sub.max_size {
            sub.destroy(slot);
            return false;
        }
        sub.idle.push_back(slot);
        true
    }

    /// Pre-creates up to `n` idle slots for `tag` without exceeding capacity.
    ///
    /// Returns the number of slots created.
    pub fn warmup(&mut self, tag: SlotTag, n: usize) -> usize {
        let Some(sub) = self.subs.get_mut(&tag) else {
            return 0;
        };
        let room = sub.max_size.saturating_sub(sub.live());
        let n = n.min(room);
        for _ in 0..n {
            let id = SlotId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            let mut view = (sub.hooks.create)(tag);
            if let Some(deactivate) = &mut sub.hooks.deactivate {
                deactivate(&mut view);
            }
            sub.created = sub.created.saturating_add(1);
            sub.idle.push_back(Slot {
                id,
                tag,
                bound_index: None,
                view,
            });
        }
        rdebug!(tag, created = n, "Pool::warmup");
        n
    }

    /// Destroys up to `n` idle slots of `tag`, oldest first. Borrowed slots are untouched.
    ///
    /// Returns the number of slots destroyed.
    pub fn shrink(&mut self, tag: SlotTag, n: usize) -> usize {
        let Some(sub) = self.subs.get_mut(&tag) else {
            return 0;
        };
        let mut destroyed = 0;
        while destroyed < n {
            let Some(slot) = sub.idle.pop_front() else {
                break;
            };
            sub.destroy(slot);
            destroyed += 1;
        }
        rdebug!(tag, destroyed, "Pool::shrink");
        destroyed
    }

    /// Changes the capacity of `tag`, destroying idle slots that no longer fit.
    ///
    /// If more slots are borrowed than the new capacity allows, the excess is destroyed as it
    /// is returned.
    pub fn set_max_size(&mut self, tag: SlotTag, max_size: usize) -> bool {
        let Some(sub) = self.subs.get_mut(&tag) else {
            return false;
        };
        sub.max_size = max_size;
        while sub.live() > sub.max_size {
            let Some(slot) = sub.idle.pop_front() else {
                break;
            };
            sub.destroy(slot);
        }
        true
    }

    /// Destroys every idle slot of every sub-pool and resets the counters.
    ///
    /// Borrowed slots are not reclaimed; they still count as borrowed until returned.
    pub fn clear(&mut self) {
        for (_tag, sub) in self.subs.iter_mut() {
            if sub.borrowed > 0 {
                rwarn!(
                    tag = *_tag,
                    borrowed = sub.borrowed,
                    "Pool::clear with borrowed slots outstanding"
                );
            }
            while let Some(slot) = sub.idle.pop_front() {
                sub.destroy(slot);
            }
            sub.created = 0;
            sub.destroyed = 0;
            sub.reused = 0;
        }
        rdebug!("Pool::clear");
    }

    pub fn stats(&self, tag: SlotTag) -> Option<PoolStats> {
        self.subs.get(&tag).map(SubPool::stats)
    }

    pub fn idle_len(&self, tag: SlotTag) -> usize {
        self.subs.get(&tag).map_or(0, |s| s.idle.len())
    }

    pub fn borrowed_len(&self, tag: SlotTag) -> usize {
        self.subs.get(&tag).map_or(0, |s| s.borrowed)
    }

    pub fn max_size(&self, tag: SlotTag) -> usize {
        self.subs.get(&tag).map_or(0, |s| s.max_size)
    }

    /// Iterates the idle slots of `tag` in reuse order.
    pub fn idle_slots(&self, tag: SlotTag) -> impl Iterator<Item = &Slot<S>> + '_ {
        self.subs.get(&tag).into_iter().flat_map(|s| s.idle.iter())
    }

    /// Resolves the sub-pool actually used for a requested tag: the tag itself when registered,
    /// otherwise [`DEFAULT_TAG`].
    pub fn resolve_tag(&self, tag: SlotTag) -> SlotTag {
        if self.contains(tag) { tag } else { DEFAULT_TAG }
    }
}

impl<S> core::fmt::Debug for Pool<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut m = f.debug_map();
        for (tag, sub) in &self.subs {
            m.entry(tag, &sub.stats());
        }
        m.finish()
    }
}
