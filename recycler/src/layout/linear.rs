use alloc::vec::Vec;

use crate::{Axis, LayoutRecord, Padding, Vec2, VisibleRange};

/// Stacks items along `axis` with `spacing` between neighbours. Each item keeps its own
/// cross-axis size.
///
/// Returns the content size.
pub(crate) fn calculate(
    axis: Axis,
    sizes: impl IntoIterator<Item = Vec2>,
    spacing: f32,
    padding: Padding,
    out: &mut Vec<LayoutRecord>,
) -> Vec2 {
    out.clear();
    let cross_start = padding.cross_leading(axis);
    let mut cursor = padding.leading(axis);
    let mut max_cross = 0.0f32;

    for (index, size) in sizes.into_iter().enumerate() {
        if index > 0 {
            cursor += spacing;
        }
        out.push(LayoutRecord {
            index,
            position: axis.position(cursor, cross_start),
            size,
        });
        cursor += size.along(axis);
        max_cross = max_cross.max(size.across(axis));
    }

    let main = cursor + padding.trailing(axis);
    let cross = cross_start + max_cross + padding.cross_trailing(axis);
    match axis {
        Axis::Vertical => Vec2::new(cross, main),
        Axis::Horizontal => Vec2::new(main, cross),
    }
}

/// Finds the contiguous run of records overlapping `[lo, hi)` on the main axis.
///
/// Records must be laid out in non-decreasing order along `axis`: the first candidate is
/// found by binary search and the scan stops at the first record starting at or past `hi`.
pub(crate) fn visible_range(
    axis: Axis,
    records: &[LayoutRecord],
    lo: f32,
    hi: f32,
) -> Option<VisibleRange> {
    if records.is_empty() || hi <= lo {
        return None;
    }
    let first = records.partition_point(|r| r.main_end(axis) <= lo);
    let mut last = None;
    for r in &records[first..] {
        if r.main_start(axis) >= hi {
            break;
        }
        last = Some(r.index);
    }
    last.map(|last| VisibleRange::new(first, last))
}

/// Index of the item covering `offset` on the main axis. Offsets inside spacing map to the
/// following item; offsets past the end map to nothing.
pub(crate) fn index_at_offset(axis: Axis, records: &[LayoutRecord], offset: f32) -> Option<usize> {
    let i = records.partition_point(|r| r.main_end(axis) <= offset);
    (i < records.len()).then_some(i)
}
