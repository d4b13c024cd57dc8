//! Property-based tests for layout, pooling and dataset mutation.

use std::collections::BTreeSet;

use proptest::prelude::*;
use recycler::{
    Axis, DEFAULT_TAG, GridConfig, ItemRenderer, LayoutEngine, LayoutKind, Padding, Pool,
    PoolHooks, Recycler, RecyclerOptions, SelectionMode, Vec2, VisibleRange,
};

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Debug, Default)]
struct View {
    payload: Option<u64>,
    selected: bool,
}

impl ItemRenderer<u64> for View {
    fn bind(&mut self, payload: &u64, _index: usize) {
        self.payload = Some(*payload);
    }

    fn reset(&mut self) {
        self.payload = None;
        self.selected = false;
    }

    fn apply_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn apply_hovered(&mut self, _hovered: bool) {}

    fn set_geometry(&mut self, _position: Vec2, _size: Vec2) {}
}

fn recycler(sizes: Vec<f32>) -> Recycler<u64, View> {
    let sizes = std::sync::Arc::new(sizes);
    let options = RecyclerOptions::new(move |_, payload: &u64| {
        Vec2::new(40.0, sizes[*payload as usize % sizes.len()])
    })
    .with_viewport(Vec2::new(40.0, 120.0))
    .with_preload_margin(15.0)
    .with_selection_mode(SelectionMode::Multiple);
    let pool = Pool::new().with_sub_pool(DEFAULT_TAG, 256, PoolHooks::new(|_| View::default()));
    Recycler::new(options, pool)
}

#[derive(Clone, Debug)]
enum Op {
    Insert { at_pct: f64, count: usize },
    Remove { at_pct: f64, len_pct: f64 },
    Append,
    Toggle { at_pct: f64 },
    Scroll { offset: f32 },
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0..=1.0f64, 0usize..5).prop_map(|(at_pct, count)| Op::Insert { at_pct, count }),
        (0.0..=1.0f64, 0.0..=0.5f64).prop_map(|(at_pct, len_pct)| Op::Remove { at_pct, len_pct }),
        Just(Op::Append),
        (0.0..=1.0f64).prop_map(|at_pct| Op::Toggle { at_pct }),
        (0.0f32..3000.0).prop_map(|offset| Op::Scroll { offset }),
    ]
}

fn pick(len: usize, pct: f64) -> usize {
    ((pct * len as f64) as usize).min(len)
}

/// Indices whose records overlap `[offset - margin, offset + viewport + margin)` on `axis`.
fn overlap_set(
    layout: &LayoutEngine,
    axis: Axis,
    offset: f32,
    viewport: f32,
    margin: f32,
) -> Vec<usize> {
    if viewport <= 0.0 {
        return Vec::new();
    }
    let lo = offset - margin;
    let hi = offset + viewport + margin;
    layout
        .records()
        .iter()
        .filter(|r| r.main_start(axis) < hi && r.main_end(axis) > lo)
        .map(|r| r.index)
        .collect()
}

fn range_indices(range: Option<VisibleRange>) -> Vec<usize> {
    range.map(|r| r.iter().collect()).unwrap_or_default()
}

fn arbitrary_grid() -> impl Strategy<Value = GridConfig> {
    (1usize..7, 1u16..30, 1u16..30, 0u16..6, 0u16..6).prop_map(|(columns, w, h, sx, sy)| {
        GridConfig::new(columns, Vec2::new(w as f32, h as f32))
            .with_cell_spacing(Vec2::new(sx as f32, sy as f32))
    })
}

// =============================================================================
// Layout properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The visible range is exactly the set of items overlapping the expanded viewport.
    #[test]
    fn visible_range_matches_overlap_set(
        sizes in prop::collection::vec(1u16..40, 0..120),
        spacing in 0u16..6,
        pad in 0u16..10,
        offset in 0u16..4000,
        viewport in 0u16..300,
        margin in 0u16..50,
        horizontal in any::<bool>(),
    ) {
        let (kind, axis) = if horizontal {
            (LayoutKind::Horizontal, Axis::Horizontal)
        } else {
            (LayoutKind::Vertical, Axis::Vertical)
        };
        let mut layout = LayoutEngine::new(kind);
        layout.calculate_layout(
            sizes.iter().map(|&s| Vec2::new(s as f32, s as f32)),
            spacing as f32,
            Padding::uniform(pad as f32),
        );

        let (offset, viewport, margin) = (offset as f32, viewport as f32, margin as f32);
        let expected = overlap_set(&layout, axis, offset, viewport, margin);
        let got = range_indices(layout.visible_range(offset, viewport, margin));
        prop_assert_eq!(got, expected);
    }

    /// Grid rows are computed arithmetically; they must agree with the per-cell records.
    #[test]
    fn grid_visible_range_matches_overlap_set(
        grid in arbitrary_grid(),
        count in 0usize..150,
        pad in 0u16..10,
        offset in 0u16..3000,
        viewport in 0u16..300,
        margin in 0u16..50,
    ) {
        let mut layout = LayoutEngine::new(LayoutKind::Grid(grid));
        layout.calculate_layout((0..count).map(|_| Vec2::ZERO), 0.0, Padding::uniform(pad as f32));

        let (offset, viewport, margin) = (offset as f32, viewport as f32, margin as f32);
        let expected = overlap_set(&layout, Axis::Vertical, offset, viewport, margin);
        let got = range_indices(layout.visible_range(offset, viewport, margin));
        prop_assert_eq!(got, expected);
    }

    /// Scrolling forward never moves either end of the visible range backwards.
    #[test]
    fn visible_range_is_monotonic_in_offset(
        sizes in prop::collection::vec(1u16..40, 1..120),
        grid in prop::option::of(arbitrary_grid()),
        mut offsets in prop::collection::vec(0u16..4000, 2..40),
        viewport in 1u16..300,
        margin in 0u16..50,
    ) {
        let kind = grid.map_or(LayoutKind::Vertical, LayoutKind::Grid);
        let mut layout = LayoutEngine::new(kind);
        layout.calculate_layout(
            sizes.iter().map(|&s| Vec2::new(s as f32, s as f32)),
            2.0,
            Padding::ZERO,
        );

        offsets.sort_unstable();
        let mut prev: Option<VisibleRange> = None;
        for offset in offsets {
            let Some(cur) = layout.visible_range(offset as f32, viewport as f32, margin as f32)
            else {
                continue;
            };
            if let Some(p) = prev {
                prop_assert!(p.first <= cur.first, "first went back: {:?} -> {:?}", p, cur);
                prop_assert!(p.last <= cur.last, "last went back: {:?} -> {:?}", p, cur);
            }
            prev = Some(cur);
        }
    }

    /// Recomputing with identical inputs yields identical records.
    #[test]
    fn layout_is_deterministic(
        sizes in prop::collection::vec((1u16..40, 1u16..40), 0..80),
        spacing in 0u16..6,
    ) {
        let sizes: Vec<Vec2> = sizes.iter().map(|&(w, h)| Vec2::new(w as f32, h as f32)).collect();
        let mut layout = LayoutEngine::new(LayoutKind::Vertical);
        layout.calculate_layout(sizes.iter().copied(), spacing as f32, Padding::ZERO);
        let first = layout.records().to_vec();
        let content = layout.content_size();
        layout.calculate_layout(sizes.iter().copied(), spacing as f32, Padding::ZERO);
        prop_assert_eq!(layout.records(), first.as_slice());
        prop_assert_eq!(layout.content_size(), content);
    }
}

// =============================================================================
// Pool properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Capacity is never exceeded and a slot is never handed out twice.
    #[test]
    fn pool_respects_capacity_and_never_double_issues(
        max_size in 1usize..12,
        ops in prop::collection::vec((0u8..4, 0usize..16), 1..100),
    ) {
        let mut pool = Pool::new().with_sub_pool(DEFAULT_TAG, max_size, PoolHooks::new(|_| ()));
        let mut held = Vec::new();
        let mut held_ids = BTreeSet::new();

        for (op, n) in ops {
            match op {
                0 => {
                    if let Some(slot) = pool.borrow(DEFAULT_TAG) {
                        prop_assert!(held_ids.insert(slot.id()), "slot issued twice");
                        held.push(slot);
                    } else {
                        prop_assert_eq!(held.len(), max_size);
                    }
                }
                1 if !held.is_empty() => {
                    let slot = held.swap_remove(n % held.len());
                    held_ids.remove(&slot.id());
                    pool.give_back(slot);
                }
                2 => {
                    pool.warmup(DEFAULT_TAG, n);
                }
                _ => {
                    pool.shrink(DEFAULT_TAG, n);
                }
            }
            let stats = pool.stats(DEFAULT_TAG).unwrap();
            prop_assert_eq!(stats.borrowed, held.len());
            prop_assert!(stats.borrowed + stats.idle <= max_size);
        }
    }
}

// =============================================================================
// Controller properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After any mutation sequence the dataset matches a plain `Vec` model, every materialized
    /// slot shows the payload of its index and selection follows its items.
    #[test]
    fn mutations_keep_dataset_mapping_and_selection_in_step(
        sizes in prop::collection::vec(1.0f32..30.0, 1..8),
        ops in prop::collection::vec(arbitrary_op(), 1..60),
    ) {
        let mut r = recycler(sizes);
        let mut model: Vec<u64> = (0..40).collect();
        let mut selected: BTreeSet<u64> = BTreeSet::new();
        let mut next = 1_000u64;
        r.set_items(model.iter().copied());

        for op in &ops {
            let len = model.len();
            match *op {
                Op::Insert { at_pct, count } => {
                    let at = pick(len, at_pct);
                    let items: Vec<u64> = (next..next + count as u64).collect();
                    next += count as u64;
                    r.insert_range(at, items.iter().copied()).unwrap();
                    model.splice(at..at, items);
                }
                Op::Remove { at_pct, len_pct } => {
                    let at = pick(len, at_pct);
                    let count = pick(len - at, len_pct);
                    r.remove_range(at, count).unwrap();
                    for p in model.drain(at..at + count) {
                        selected.remove(&p);
                    }
                }
                Op::Append => {
                    r.append(next);
                    model.push(next);
                    next += 1;
                }
                Op::Toggle { at_pct } if len > 0 => {
                    let at = pick(len - 1, at_pct);
                    r.toggle_selection(at);
                    let p = model[at];
                    if !selected.remove(&p) {
                        selected.insert(p);
                    }
                }
                Op::Toggle { .. } => {}
                Op::Scroll { offset } => r.tick(offset),
            }

            let items: Vec<u64> = r.items().iter().map(|d| d.payload).collect();
            prop_assert_eq!(&items, &model);
            prop_assert!(r.items().iter().enumerate().all(|(i, d)| d.index == i));

            let by_payload: BTreeSet<u64> = r.selected_indices().map(|i| model[i]).collect();
            prop_assert_eq!(&by_payload, &selected);

            for (index, slot) in r.active_slots() {
                prop_assert_eq!(slot.bound_index(), Some(index));
                prop_assert_eq!(slot.view().payload, Some(model[index]));
                prop_assert_eq!(slot.view().selected, selected.contains(&model[index]));
            }
            if let Some(range) = r.visible_range() {
                prop_assert!(r.active_slots().all(|(i, _)| range.contains(i)));
                prop_assert_eq!(r.active_len(), range.len());
            } else {
                prop_assert_eq!(r.active_len(), 0);
            }
            prop_assert_eq!(r.pool().borrowed_len(DEFAULT_TAG), r.active_len());
        }
    }

    /// Scrolling anywhere and back never leaks slots: borrowed + idle stays bounded by the
    /// largest range ever materialized.
    #[test]
    fn scrolling_never_leaks_slots(
        count in 0u64..500,
        offsets in prop::collection::vec(0.0f32..6000.0, 1..40),
    ) {
        let mut r = recycler(vec![10.0]);
        r.set_items(0..count);
        let mut peak = r.active_len();
        for offset in offsets {
            r.tick(offset);
            peak = peak.max(r.active_len());
            let stats = r.pool().stats(DEFAULT_TAG).unwrap();
            prop_assert_eq!(stats.borrowed, r.active_len());
            prop_assert!(stats.created as usize <= peak);
        }
    }
}
