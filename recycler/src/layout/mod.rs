//! Geometry: maps logical indexes to positions/sizes and scroll offsets to index ranges.
//!
//! The engine keeps the records of the last [`LayoutEngine::calculate_layout`] call and answers
//! positional queries from them in `O(1)`. Records are never patched: any change to the
//! dataset, spacing, padding or strategy means a full recompute.

use alloc::vec::Vec;

use crate::{Align, Axis, Direction, LayoutRecord, Padding, Vec2, VisibleRange};

mod grid;
mod linear;

pub use grid::GridConfig;

/// Layout strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutKind {
    /// Items stacked top to bottom.
    #[default]
    Vertical,
    /// Items stacked left to right.
    Horizontal,
    /// Uniform cells in rows of `columns`, scrolling vertically.
    Grid(GridConfig),
}

impl LayoutKind {
    /// The scroll axis of this strategy.
    pub fn axis(&self) -> Axis {
        match self {
            Self::Vertical | Self::Grid(_) => Axis::Vertical,
            Self::Horizontal => Axis::Horizontal,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    kind: LayoutKind,
    padding: Padding,
    spacing: f32,
    records: Vec<LayoutRecord>,
    content_size: Vec2,
}

impl LayoutEngine {
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Switches strategy. Records are cleared; call [`Self::calculate_layout`] again.
    pub fn set_kind(&mut self, kind: LayoutKind) {
        self.kind = kind;
        self.records.clear();
        self.content_size = Vec2::ZERO;
    }

    pub fn axis(&self) -> Axis {
        self.kind.axis()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Recomputes every record from the items' preferred sizes.
    ///
    /// `spacing` separates neighbours in the linear strategies; the grid uses its own
    /// [`GridConfig::cell_spacing`] and ignores both `spacing` and the item sizes.
    ///
    /// Runs in `O(n)` and is deterministic: identical inputs produce identical records.
    pub fn calculate_layout(
        &mut self,
        sizes: impl IntoIterator<Item = Vec2>,
        spacing: f32,
        padding: Padding,
    ) {
        self.padding = padding;
        self.spacing = spacing;
        let mut records = core::mem::take(&mut self.records);
        self.content_size = match &self.kind {
            LayoutKind::Vertical => {
                linear::calculate(Axis::Vertical, sizes, spacing, padding, &mut records)
            }
            LayoutKind::Horizontal => {
                linear::calculate(Axis::Horizontal, sizes, spacing, padding, &mut records)
            }
            LayoutKind::Grid(config) => {
                let count = sizes.into_iter().count();
                grid::calculate(config, count, padding, &mut records)
            }
        };
        self.records = records;
        rdebug!(
            count = self.records.len(),
            content_w = self.content_size.x,
            content_h = self.content_size.y,
            "LayoutEngine::calculate_layout"
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LayoutRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&LayoutRecord> {
        self.records.get(index)
    }

    /// Top-left corner of `index`, or [`Vec2::ZERO`] when out of range.
    pub fn item_position(&self, index: usize) -> Vec2 {
        self.records.get(index).map_or(Vec2::ZERO, |r| r.position)
    }

    /// Size of `index`, or [`Vec2::ZERO`] when out of range.
    pub fn item_size(&self, index: usize) -> Vec2 {
        self.records.get(index).map_or(Vec2::ZERO, |r| r.size)
    }

    pub fn content_size(&self) -> Vec2 {
        self.content_size
    }

    /// Content extent along the scroll axis.
    pub fn content_main(&self) -> f32 {
        self.content_size.along(self.axis())
    }

    pub fn max_scroll_offset(&self, viewport_main: f32) -> f32 {
        (self.content_main() - viewport_main).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f32, viewport_main: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset(viewport_main))
    }

    /// Inclusive range of items overlapping the viewport `[scroll_offset, scroll_offset +
    /// viewport_main)` expanded by `preload_margin` on both ends of the scroll axis.
    ///
    /// Returns `None` when nothing overlaps (empty dataset, zero-sized viewport, or scrolled
    /// entirely past the content) and for non-finite offsets.
    pub fn visible_range(
        &self,
        scroll_offset: f32,
        viewport_main: f32,
        preload_margin: f32,
    ) -> Option<VisibleRange> {
        if viewport_main <= 0.0 {
            return None;
        }
        let margin = preload_margin.max(0.0);
        let lo = scroll_offset - margin;
        let hi = scroll_offset + viewport_main + margin;
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        match &self.kind {
            LayoutKind::Vertical => linear::visible_range(Axis::Vertical, &self.records, lo, hi),
            LayoutKind::Horizontal => {
                linear::visible_range(Axis::Horizontal, &self.records, lo, hi)
            }
            LayoutKind::Grid(config) => {
                grid::visible_range(config, self.records.len(), self.padding, lo, hi)
            }
        }
    }

    /// Index of the item at `offset` along the scroll axis (for grids: first item of the row).
    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        match &self.kind {
            LayoutKind::Vertical => linear::index_at_offset(Axis::Vertical, &self.records, offset),
            LayoutKind::Horizontal => {
                linear::index_at_offset(Axis::Horizontal, &self.records, offset)
            }
            LayoutKind::Grid(config) => {
                grid::index_at_offset(config, self.records.len(), self.padding, offset)
            }
        }
    }

    /// Scroll offset that brings `index` into view with the given alignment, clamped to the
    /// scrollable range. Out-of-range indexes are clamped to the last item.
    ///
    /// `current` is only consulted by [`Align::Auto`], which keeps the current offset when the
    /// item is already fully visible.
    pub fn scroll_offset_for(
        &self,
        index: usize,
        align: Align,
        viewport_main: f32,
        current: f32,
    ) -> f32 {
        let Some(last) = self.records.len().checked_sub(1) else {
            return 0.0;
        };
        let axis = self.axis();
        let record = &self.records[index.min(last)];
        let start = record.main_start(axis);
        let end = record.main_end(axis);

        let target = match align {
            Align::Start => start,
            Align::End => end - viewport_main,
            Align::Center => start + (end - start) / 2.0 - viewport_main / 2.0,
            Align::Auto => {
                if start >= current && end <= current + viewport_main {
                    current
                } else if start < current {
                    start
                } else {
                    end - viewport_main
                }
            }
        };
        self.clamp_scroll_offset(target, viewport_main)
    }

    /// Index delta for a navigation key under this layout. Keys across the scroll axis of a
    /// list yield `0`.
    pub fn navigation_delta(&self, direction: Direction) -> isize {
        match (&self.kind, direction) {
            (LayoutKind::Vertical, Direction::Up) => -1,
            (LayoutKind::Vertical, Direction::Down) => 1,
            (LayoutKind::Vertical, _) => 0,
            (LayoutKind::Horizontal, Direction::Left) => -1,
            (LayoutKind::Horizontal, Direction::Right) => 1,
            (LayoutKind::Horizontal, _) => 0,
            (LayoutKind::Grid(_), Direction::Left) => -1,
            (LayoutKind::Grid(_), Direction::Right) => 1,
            (LayoutKind::Grid(config), Direction::Up) => -(config.columns() as isize),
            (LayoutKind::Grid(config), Direction::Down) => config.columns() as isize,
        }
    }
}
