//! A headless recycling list engine.
//!
//! For host-side helpers (scroll tweens, anchoring across prepends), see the
//! `recycler-adapter` crate.
//!
//! The crate keeps a large logical dataset while only materializing the handful of items that
//! intersect the viewport. Materialized items are backed by reusable slots drawn from a
//! per-type [`Pool`]; scrolling past an item hands its slot back and the next item coming into
//! view picks it up again.
//!
//! Pieces:
//! - [`Pool`]: bounded sub-pools keyed by [`SlotTag`], with create/activate/deactivate/destroy
//!   hooks
//! - [`LayoutEngine`]: linear (vertical, horizontal) and fixed-grid layouts, visible range
//!   queries and scroll-to-index math
//! - [`SelectionTracker`]: index-addressed selection and hover
//! - [`Recycler`]: the controller tying the above together, plus the dataset mutation API
//!
//! It is UI-agnostic. The host provides:
//! - viewport size and the current scroll offset
//! - item sizes (per item for linear layouts)
//! - a view type implementing [`ItemRenderer`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod dataset;
mod events;
mod layout;
mod mapping;
mod motion;
mod options;
mod pool;
mod recycler;
mod renderer;
mod selection;
mod types;


pub use dataset::{Dataset, Mutation, MutationError};
pub use events::{ListenerId, RecyclerEvent};
pub use layout::{GridConfig, LayoutEngine, LayoutKind};
pub use motion::{Easing, Lerp, MoveAnimation, Tween};
pub use options::{ItemSizeFn, RecyclerOptions, TypeOfFn};
pub use pool::{Pool, PoolHooks, PoolStats, Slot, SlotId};
pub use recycler::Recycler;
pub use renderer::ItemRenderer;
pub use selection::{ClickModifiers, SelectionChange, SelectionMode, SelectionTracker};
pub use types::{
    Align, Axis, DEFAULT_TAG, Direction, ItemDescriptor, LayoutRecord, Padding, SlotTag, Vec2,
    VisibleRange,
};
