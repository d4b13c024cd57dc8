use alloc::vec::Vec;

use crate::{LayoutRecord, Padding, Vec2, VisibleRange};

/// Uniform grid configuration. Rows scroll vertically; items fill rows left to right.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Items per row. Zero is treated as one.
    pub columns: usize,
    pub cell_size: Vec2,
    /// Horizontal (`x`) and vertical (`y`) distance between neighbouring cells.
    pub cell_spacing: Vec2,
}

impl GridConfig {
    pub fn new(columns: usize, cell_size: Vec2) -> Self {
        Self {
            columns,
            cell_size,
            cell_spacing: Vec2::ZERO,
        }
    }

    pub fn with_cell_spacing(mut self, cell_spacing: Vec2) -> Self {
        self.cell_spacing = cell_spacing;
        self
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns.max(1)
    }

    pub(crate) fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns())
    }

    fn row_pitch(&self) -> f32 {
        self.cell_size.y + self.cell_spacing.y
    }

    fn column_pitch(&self) -> f32 {
        self.cell_size.x + self.cell_spacing.x
    }
}

/// Places `count` cells at `row = i / columns, col = i % columns`. Geometry comes from the
/// configuration only.
///
/// Returns the content size.
pub(crate) fn calculate(
    config: &GridConfig,
    count: usize,
    padding: Padding,
    out: &mut Vec<LayoutRecord>,
) -> Vec2 {
    out.clear();
    out.reserve(count);
    let columns = config.columns();
    for index in 0..count {
        let row = index / columns;
        let col = index % columns;
        let x = padding.left + col as f32 * config.column_pitch();
        let y = padding.top + row as f32 * config.row_pitch();
        out.push(LayoutRecord {
            index,
            position: Vec2::new(x, -y),
            size: config.cell_size,
        });
    }

    let rows = config.rows_for(count);
    let used_columns = columns.min(count);
    let width = span(used_columns, config.cell_size.x, config.cell_spacing.x);
    let height = span(rows, config.cell_size.y, config.cell_spacing.y);
    Vec2::new(
        padding.left + padding.right + width,
        padding.top + padding.bottom + height,
    )
}

fn span(n: usize, cell: f32, spacing: f32) -> f32 {
    if n == 0 {
        return 0.0;
    }
    n as f32 * cell + (n - 1) as f32 * spacing
}

/// Rows overlapping `[lo, hi)` vertically, expanded to whole rows and clamped to `count`.
pub(crate) fn visible_range(
    config: &GridConfig,
    count: usize,
    padding: Padding,
    lo: f32,
    hi: f32,
) -> Option<VisibleRange> {
    if count == 0 || hi <= lo {
        return None;
    }
    let rows = config.rows_for(count);
    let columns = config.columns();
    let pitch = config.row_pitch();
    let top = padding.top;
    let cell = config.cell_size.y;

    let (first_row, last_row) = if pitch <= 0.0 {
        // Every row collapses onto the same band.
        if top + cell > lo && top < hi {
            (0, rows - 1)
        } else {
            return None;
        }
    } else {
        // Row r spans [top + r * pitch, top + r * pitch + cell).
        // First row with an end past `lo`.
        let x = (lo - top - cell) / pitch;
        let first_row = if x < 0.0 { 0 } else { x as usize + 1 };
        // Last row with a start before `hi`.
        let y = (hi - top) / pitch;
        if y <= 0.0 {
            return None;
        }
        let t = y as usize;
        let last_row = if (t as f32) < y { t } else { t - 1 };
        (first_row, last_row.min(rows - 1))
    };

    if first_row > last_row {
        return None;
    }
    let first = first_row * columns;
    let last = ((last_row + 1) * columns).min(count) - 1;
    (first <= last).then(|| VisibleRange::new(first, last))
}

/// First index of the row covering vertical `offset`. Offsets inside row spacing map to the
/// following row.
pub(crate) fn index_at_offset(
    config: &GridConfig,
    count: usize,
    padding: Padding,
    offset: f32,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let pitch = config.row_pitch();
    let x = (offset - padding.top - config.cell_size.y) / pitch;
    let row = if pitch <= 0.0 || x < 0.0 {
        0
    } else {
        x as usize + 1
    };
    let index = row.checked_mul(config.columns())?;
    (index < count).then_some(index)
}
