//! Adapter utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on pooling, layout and reconciliation. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A tick-driven [`Controller`] (tween-based smooth scrolling, `is_scrolling` debouncing,
//!   slot move animations)
//! - Scroll anchoring (e.g. prepend in chat/timelines without visual jumps)
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;


pub use anchor::{ScrollAnchor, apply_anchor, capture_anchor_at, capture_first_visible_anchor};
pub use controller::{Controller, DEFAULT_IS_SCROLLING_RESET_DELAY_MS};
