use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{SlotTag, VisibleRange};

/// Notifications delivered to listeners registered with
/// [`Recycler::subscribe`](crate::Recycler::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecyclerEvent {
    /// Emitted once per reconciliation that changed the materialized range.
    VisibleRangeChanged {
        previous: Option<VisibleRange>,
        current: Option<VisibleRange>,
    },
    Selected(usize),
    Deselected(usize),
    HoverEnter(usize),
    HoverExit(usize),
    /// A click was routed to `index`, after selection was updated.
    Clicked(usize),
    /// No slot could be borrowed for `index`; it is retried on the next reconciliation.
    SlotExhausted { tag: SlotTag, index: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

pub(crate) type Listener<R> = Box<dyn Fn(&R, &RecyclerEvent)>;

/// Listeners in registration order.
pub(crate) struct Listeners<R> {
    entries: Vec<(ListenerId, Listener<R>)>,
    next_id: u64,
}

impl<R> Default for Listeners<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<R> Listeners<R> {
    pub(crate) fn add(&mut self, listener: Listener<R>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&self, owner: &R, event: &RecyclerEvent) {
        for (_, listener) in &self.entries {
            listener(owner, event);
        }
    }
}
