use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::events::Listeners;
use crate::mapping::{ActiveMapping, Bound};
use crate::motion::{MoveAnimation, Tween};
use crate::{
    Align, ClickModifiers, DEFAULT_TAG, Dataset, Direction, ItemDescriptor, ItemRenderer,
    LayoutEngine, LayoutKind, ListenerId, Mutation, MutationError, Padding, Pool, RecyclerEvent,
    RecyclerOptions, SelectionChange, SelectionMode, SelectionTracker, Slot, SlotTag, Vec2,
    VisibleRange,
};

/// The virtualization controller.
///
/// Owns the dataset, the layout, a [`Pool`] of slots and the index → slot mapping. Only the
/// items inside the viewport (plus the preload margin) are materialized; everything else
/// exists purely as data.
///
/// The host drives it explicitly:
/// - [`Self::init`] once after construction
/// - [`Self::tick`] with the current scroll offset, once per frame
/// - mutation methods ([`Self::set_items`], [`Self::insert_range`], ...) or [`Self::apply`]
/// - interaction routing ([`Self::handle_click`], [`Self::handle_hover_enter`], ...)
///
/// Every public call leaves dataset, mapping and selection consistent before returning, and
/// only then notifies listeners. Listeners receive `&Recycler`, so they cannot re-enter a
/// mutating call while one is in progress.
pub struct Recycler<T, S> {
    options: RecyclerOptions<T>,
    data: Dataset<T>,
    layout: LayoutEngine,
    layout_dirty: bool,
    geometry_changed: bool,
    pool: Pool<S>,
    active: ActiveMapping<S>,
    selection: SelectionTracker,
    scroll_offset: f32,
    range: Option<VisibleRange>,
    force_reconcile: bool,
    now_ms: u64,

    listeners: Listeners<Recycler<T, S>>,
    pending: Vec<RecyclerEvent>,
    changes: Vec<SelectionChange>,
    batch_depth: usize,
}

impl<T, S: ItemRenderer<T>> Recycler<T, S> {
    /// Creates a controller with an empty dataset. Nothing is materialized until
    /// [`Self::init`], [`Self::tick`] or the first mutation.
    pub fn new(options: RecyclerOptions<T>, pool: Pool<S>) -> Self {
        rdebug!(
            layout = ?options.layout,
            preload_margin = options.preload_margin,
            "Recycler::new"
        );
        Self {
            layout: LayoutEngine::new(options.layout),
            selection: SelectionTracker::new(options.selection_mode),
            options,
            data: Dataset::new(),
            layout_dirty: true,
            geometry_changed: false,
            pool,
            active: ActiveMapping::default(),
            scroll_offset: 0.0,
            range: None,
            force_reconcile: true,
            now_ms: 0,
            listeners: Listeners::default(),
            pending: Vec::new(),
            changes: Vec::new(),
            batch_depth: 0,
        }
    }

    /// Computes the layout and materializes the initial range.
    pub fn init(&mut self) {
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
    }

    pub fn options(&self) -> &RecyclerOptions<T> {
        &self.options
    }

    /// Applies new options, rebuilding only what they affect.
    pub fn set_options(&mut self, options: RecyclerOptions<T>) {
        let prev = core::mem::replace(&mut self.options, options);
        rtrace!(layout = ?self.options.layout, "Recycler::set_options");

        if prev.layout != self.options.layout {
            self.layout.set_kind(self.options.layout);
            self.layout_dirty = true;
        }
        if prev.spacing != self.options.spacing
            || prev.padding != self.options.padding
            || !Arc::ptr_eq(&prev.item_size, &self.options.item_size)
        {
            self.layout_dirty = true;
        }

        let classifier_unchanged = match (&prev.type_of, &self.options.type_of) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        if !classifier_unchanged {
            // Tags may differ for every index; start over.
            self.release_all();
        }

        if prev.selection_mode != self.options.selection_mode {
            self.selection
                .set_mode(self.options.selection_mode, &mut self.changes);
            self.dispatch_changes();
        }

        if self.options.move_animation.is_none() {
            self.snap_animations();
        }

        self.force_reconcile = true;
        self.refresh();
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions<T>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_layout(&mut self, layout: LayoutKind) {
        self.update_options(|o| o.layout = layout);
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.update_options(|o| o.spacing = spacing);
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.update_options(|o| o.padding = padding);
    }

    pub fn set_preload_margin(&mut self, preload_margin: f32) {
        self.update_options(|o| o.preload_margin = preload_margin);
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        if self.options.viewport == viewport {
            return;
        }
        self.options.viewport = viewport;
        self.refresh();
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.update_options(|o| o.selection_mode = mode);
    }

    pub fn set_move_animation(&mut self, move_animation: Option<MoveAnimation>) {
        self.update_options(|o| o.move_animation = move_animation);
    }

    pub fn set_type_of(
        &mut self,
        type_of: Option<impl Fn(usize, &T) -> SlotTag + Send + Sync + 'static>,
    ) {
        let type_of = type_of.map(|f| Arc::new(f) as _);
        self.update_options(|o| o.type_of = type_of);
    }

    // ---------------------------------------------------------------------------------------
    // Listeners

    /// Registers a listener. Listeners fire in registration order, after the call that caused
    /// the event has brought every internal structure back to a consistent state.
    ///
    /// Listeners only get shared access, so they cannot call back into mutating methods such
    /// as [`Self::select_item`]. Hosts that react to an event with a mutation queue it (e.g. in
    /// a `RefCell<Vec<_>>` captured by the listener) and apply it after the current call
    /// returns.
    pub fn subscribe(&mut self, listener: impl Fn(&Self, &RecyclerEvent) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Runs `f` with notifications and reconciliation deferred until the outermost batch ends.
    ///
    /// Mutations inside the batch still renumber the dataset, the mapping and the selection
    /// immediately. Layout and materialization catch up in a single reconciliation when the
    /// batch completes, so a batch reports at most one visible range change. Geometry queries
    /// made inside the batch see the layout as of the last reconciliation.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth += 1;
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.refresh();
        }
    }

    // ---------------------------------------------------------------------------------------
    // Driving

    /// Per-frame entry point: records the scroll offset and reconciles.
    ///
    /// When neither the visible range nor anything else changed since the last pass this does
    /// no work. A non-finite offset is ignored and the previous one is kept.
    pub fn tick(&mut self, scroll_offset: f32) {
        if !scroll_offset.is_finite() {
            rwarn!(scroll_offset, "Recycler::tick ignoring non-finite scroll offset");
            return;
        }
        self.scroll_offset = scroll_offset;
        self.refresh();
    }

    /// Forces a full reconciliation pass on the next refresh, then refreshes.
    pub fn invalidate(&mut self) {
        self.force_reconcile = true;
        self.refresh();
    }

    /// Advances move animations to `now_ms`.
    ///
    /// Returns `true` while at least one slot is still moving.
    pub fn advance_animations(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        let mut running = false;
        for (_, b) in self.active.iter_mut() {
            let Some(tween) = b.motion else {
                continue;
            };
            if tween.is_done(now_ms) {
                b.motion = None;
                b.position = b.target;
            } else {
                b.position = tween.sample(now_ms);
                running = true;
            }
            b.slot.view_mut().set_geometry(b.position, b.size);
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.active.iter().any(|(_, b)| b.motion.is_some())
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.options.viewport
    }

    fn viewport_main(&self) -> f32 {
        self.options.viewport.along(self.layout.axis())
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.layout.max_scroll_offset(self.viewport_main())
    }

    pub fn clamp_scroll_offset(&self, offset: f32) -> f32 {
        self.layout.clamp_scroll_offset(offset, self.viewport_main())
    }

    /// Scroll offset that brings `index` into view (see [`LayoutEngine::scroll_offset_for`]).
    pub fn scroll_offset_for_index(&mut self, index: usize, align: Align) -> f32 {
        self.ensure_layout();
        self.layout
            .scroll_offset_for(index, align, self.viewport_main(), self.scroll_offset)
    }

    /// Jumps to `index` and reconciles. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f32 {
        let offset = self.scroll_offset_for_index(index, align);
        self.tick(offset);
        offset
    }

    // ---------------------------------------------------------------------------------------
    // Geometry queries

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Layout position of `index`, or [`Vec2::ZERO`] when out of range.
    pub fn item_position(&self, index: usize) -> Vec2 {
        self.layout.item_position(index)
    }

    /// Layout size of `index`, or [`Vec2::ZERO`] when out of range.
    pub fn item_size(&self, index: usize) -> Vec2 {
        self.layout.item_size(index)
    }

    pub fn content_size(&self) -> Vec2 {
        self.layout.content_size()
    }

    /// The range materialized by the last reconciliation.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Range for an arbitrary offset under the current layout (no side effects).
    pub fn visible_range_for(&self, scroll_offset: f32) -> Option<VisibleRange> {
        self.layout
            .visible_range(scroll_offset, self.viewport_main(), self.options.preload_margin)
    }

    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        self.layout.index_at_offset(offset)
    }

    // ---------------------------------------------------------------------------------------
    // Materialization queries

    pub fn pool(&self) -> &Pool<S> {
        &self.pool
    }

    /// Mutable pool access for warmup, shrinking and capacity changes.
    pub fn pool_mut(&mut self) -> &mut Pool<S> {
        &mut self.pool
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<S>> {
        self.active.get(index).map(|b| &b.slot)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<S>> {
        self.active.get_mut(index).map(|b| &mut b.slot)
    }

    /// Where the slot for `index` is currently displayed (mid-animation positions included).
    pub fn slot_position(&self, index: usize) -> Option<Vec2> {
        self.active.get(index).map(|b| b.position)
    }

    /// Materialized `(index, slot)` pairs in ascending index order.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &Slot<S>)> + '_ {
        self.active.iter().map(|(i, b)| (i, &b.slot))
    }

    // ---------------------------------------------------------------------------------------
    // Dataset

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn items(&self) -> &[ItemDescriptor<T>] {
        self.data.as_slice()
    }

    pub fn item(&self, index: usize) -> Option<&ItemDescriptor<T>> {
        self.data.get(index)
    }

    pub fn dataset(&self) -> &Dataset<T> {
        &self.data
    }

    /// Replaces the dataset: evicts every slot, clears selection and hover, then rebuilds.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.release_all();
        self.data.set(items);
        rdebug!(len = self.data.len(), "Recycler::set_items");
        self.selection.reset(&mut self.changes);
        self.dispatch_changes();
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.set_items(core::iter::empty());
    }

    pub fn append(&mut self, item: T) {
        self.data.push(item);
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
    }

    /// Inserts `items` before `index`. Materialized items at or after `index` keep their slot
    /// and move to their new key.
    pub fn insert_range(
        &mut self,
        index: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), MutationError> {
        let count = self.data.insert_range(index, items).inspect_err(|_e| {
            rwarn!(error = %_e, "Recycler::insert_range rejected");
        })?;
        if count == 0 {
            return Ok(());
        }
        rtrace!(index, count, "Recycler::insert_range");
        self.active.shift_up(index, count);
        for (key, b) in self.active.range_mut(index + count..) {
            b.slot.view_mut().set_index(key);
        }
        self.selection.shift_for_insert(index, count);
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
        Ok(())
    }

    /// Removes `index..index + count`. Slots inside the span return to the pool; later slots
    /// move down to their new key. Spans that do not fit the dataset are rejected whole.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), MutationError> {
        let removed = self.data.remove_range(index, count).inspect_err(|_e| {
            rwarn!(error = %_e, "Recycler::remove_range rejected");
        })?;
        if removed.is_empty() {
            return Ok(());
        }
        rtrace!(index, count, "Recycler::remove_range");
        for (i, b) in self.active.take_span(index, count) {
            self.release(i, b);
        }
        // The span is vacant in the mapping now, so dropped selections cannot reach a slot.
        self.selection
            .shift_for_remove(index, count, &mut self.changes);
        self.dispatch_changes();
        self.active.shift_down(index + count, count);
        for (key, b) in self.active.range_mut(index..) {
            b.slot.view_mut().set_index(key);
        }
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
        Ok(())
    }

    /// Replaces one payload. A materialized slot is reset and rebound in place, or swapped
    /// for a slot of the right type when the classifier now picks a different sub-pool.
    pub fn update_item(&mut self, index: usize, item: T) -> Result<(), MutationError> {
        self.data.replace(index, item).inspect_err(|_e| {
            rwarn!(error = %_e, "Recycler::update_item rejected");
        })?;
        if let Some(b) = self.active.get(index) {
            let tag = self.resolved_tag(index);
            if tag != b.slot.tag() {
                if let Some(b) = self.active.remove(index) {
                    self.release(index, b);
                }
            } else {
                self.rebind(index);
            }
        }
        self.layout_dirty = true;
        self.force_reconcile = true;
        self.refresh();
        Ok(())
    }

    /// Mutation-message entry point.
    pub fn apply(&mut self, mutation: Mutation<T>) -> Result<(), MutationError> {
        match mutation {
            Mutation::Set(items) => {
                self.set_items(items);
                Ok(())
            }
            Mutation::Append(item) => {
                self.append(item);
                Ok(())
            }
            Mutation::InsertRange { index, items } => self.insert_range(index, items),
            Mutation::RemoveRange { index, count } => self.remove_range(index, count),
            Mutation::Update { index, item } => self.update_item(index, item),
            Mutation::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    // ---------------------------------------------------------------------------------------
    // Selection & hover

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.is_selected(index)
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selection.selected()
    }

    pub fn hovered_item(&self) -> Option<usize> {
        self.selection.hovered()
    }

    pub fn select_item(&mut self, index: usize) -> bool {
        if index >= self.data.len() {
            return false;
        }
        let changed = self.selection.select_item(index, &mut self.changes);
        self.finish_selection(changed)
    }

    pub fn deselect_item(&mut self, index: usize) -> bool {
        let changed = self.selection.deselect_item(index, &mut self.changes);
        self.finish_selection(changed)
    }

    pub fn toggle_selection(&mut self, index: usize) -> bool {
        if index >= self.data.len() {
            return false;
        }
        let changed = self.selection.toggle_selection(index, &mut self.changes);
        self.finish_selection(changed)
    }

    pub fn select_range(&mut self, a: usize, b: usize) -> bool {
        let len = self.data.len();
        if a >= len || b >= len {
            return false;
        }
        let changed = self.selection.select_range(a, b, &mut self.changes);
        self.finish_selection(changed)
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self
            .selection
            .select_all(self.data.len(), &mut self.changes);
        self.finish_selection(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear_selection(&mut self.changes);
        self.finish_selection(changed)
    }

    /// Moves hover to `index` (`None` clears it). Out-of-range indexes are rejected.
    pub fn set_hovered_item(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.data.len()) {
            return false;
        }
        let changed = self.selection.set_hovered(index, &mut self.changes);
        self.finish_selection(changed)
    }

    /// Routes a click on `index` through the selection policy (see
    /// [`SelectionTracker::click`]).
    pub fn handle_click(&mut self, index: usize, modifiers: ClickModifiers) -> bool {
        if index >= self.data.len() {
            return false;
        }
        let changed = self.selection.click(index, modifiers, &mut self.changes);
        self.dispatch_changes();
        self.pending.push(RecyclerEvent::Clicked(index));
        self.flush_events();
        changed
    }

    pub fn handle_hover_enter(&mut self, index: usize) -> bool {
        self.set_hovered_item(Some(index))
    }

    /// Clears hover if `index` is the hovered item. Late exits for an item that is no longer
    /// hovered are ignored.
    pub fn handle_hover_exit(&mut self, index: usize) -> bool {
        if self.selection.hovered() != Some(index) {
            return false;
        }
        self.set_hovered_item(None)
    }

    /// Moves the selection `delta` items away from the anchor (clamped to the dataset),
    /// selects the target like a plain click and scrolls it into view.
    ///
    /// Without an anchor, navigation starts at the first item (or the last one for a negative
    /// delta). Returns the newly selected index.
    pub fn handle_key_navigate(&mut self, delta: isize) -> Option<usize> {
        let len = self.data.len();
        if len == 0 || self.selection.mode() == SelectionMode::Disabled {
            return None;
        }
        let target = match self.selection.anchor().or(self.selection.hovered()) {
            Some(from) => from.saturating_add_signed(delta).min(len - 1),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selection
            .click(target, ClickModifiers::empty(), &mut self.changes);
        self.dispatch_changes();
        // Scrolling flushes the queued selection events together with any range change.
        self.scroll_to_index(target, Align::Auto);
        Some(target)
    }

    /// [`Self::handle_key_navigate`] with the delta the current layout assigns to `direction`.
    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        let delta = self.layout.navigation_delta(direction);
        self.handle_key_navigate(delta)
    }

    // ---------------------------------------------------------------------------------------
    // Internals

    fn finish_selection(&mut self, changed: bool) -> bool {
        self.dispatch_changes();
        self.flush_events();
        changed
    }

    /// Forwards tracker transitions to materialized slots, then queues them for listeners.
    fn dispatch_changes(&mut self) {
        let mut changes = core::mem::take(&mut self.changes);
        for change in changes.drain(..) {
            let (index, event) = match change {
                SelectionChange::Selected(i) => (i, RecyclerEvent::Selected(i)),
                SelectionChange::Deselected(i) => (i, RecyclerEvent::Deselected(i)),
                SelectionChange::HoverEnter(i) => (i, RecyclerEvent::HoverEnter(i)),
                SelectionChange::HoverExit(i) => (i, RecyclerEvent::HoverExit(i)),
            };
            if let Some(b) = self.active.get_mut(index) {
                let view = b.slot.view_mut();
                match change {
                    SelectionChange::Selected(_) => view.apply_selected(true),
                    SelectionChange::Deselected(_) => view.apply_selected(false),
                    SelectionChange::HoverEnter(_) => view.apply_hovered(true),
                    SelectionChange::HoverExit(_) => view.apply_hovered(false),
                }
            }
            self.pending.push(event);
        }
        self.changes = changes;
    }

    /// Reconciles (unless batching) and flushes queued events.
    fn refresh(&mut self) {
        if self.batch_depth > 0 {
            return;
        }
        self.reconcile();
        self.flush_events();
    }

    fn ensure_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }
        let item_size = &self.options.item_size;
        let sized = !matches!(self.layout.kind(), LayoutKind::Grid(_));
        self.layout.calculate_layout(
            self.data.iter().map(|d| {
                if sized {
                    item_size(d.index, &d.payload)
                } else {
                    Vec2::ZERO
                }
            }),
            self.options.spacing,
            self.options.padding,
        );
        self.layout_dirty = false;
        self.geometry_changed = true;
    }

    fn reconcile(&mut self) {
        self.ensure_layout();
        let range = self.layout.visible_range(
            self.scroll_offset,
            self.viewport_main(),
            self.options.preload_margin,
        );

        // Mapped indexes past the end of the dataset would mean a missed renumbering.
        let len = self.data.len();
        let stale = self.active.take_from(len);
        if !stale.is_empty() {
            rwarn!(
                count = stale.len(),
                len,
                "Recycler::reconcile evicting stale mapping entries"
            );
            for (i, b) in stale {
                self.release(i, b);
            }
            self.force_reconcile = true;
        }

        if !self.force_reconcile && !self.geometry_changed && range == self.range {
            return;
        }
        self.force_reconcile = false;

        let evicted = self.active.take_outside(range);
        let _evicted = evicted.len();
        for (i, b) in evicted {
            self.release(i, b);
        }

        if self.geometry_changed {
            self.reposition_persisting();
            self.geometry_changed = false;
        }

        let mut _materialized = 0usize;
        if let Some(r) = range {
            for index in r.first..=r.last.min(len.saturating_sub(1)) {
                if self.active.contains(index) {
                    continue;
                }
                if self.materialize(index) {
                    _materialized += 1;
                } else {
                    // Retried on the next pass even if the range stays put.
                    self.force_reconcile = true;
                }
            }
        }

        debug_assert!(
            self.active.is_consistent(),
            "active mapping lost its index/slot bijection"
        );
        rtrace!(
            range = ?range,
            evicted = _evicted,
            materialized = _materialized,
            active = self.active.len(),
            "Recycler::reconcile"
        );

        let previous = self.range;
        self.range = range;
        if previous != range {
            self.pending.push(RecyclerEvent::VisibleRangeChanged {
                previous,
                current: range,
            });
        }
    }

    fn materialize(&mut self, index: usize) -> bool {
        let Some(desc) = self.data.get(index) else {
            return false;
        };
        let requested = self
            .options
            .type_of
            .as_ref()
            .map_or(DEFAULT_TAG, |f| f(index, &desc.payload));
        let tag = self.pool.resolve_tag(requested);
        let Some(mut slot) = self.pool.borrow(tag) else {
            rwarn!(index, tag, "Recycler::materialize: no slot available");
            self.pending
                .push(RecyclerEvent::SlotExhausted { tag, index });
            return false;
        };

        let record = self.layout.record(index).copied().unwrap_or_default();
        slot.set_bound_index(Some(index));
        let view = slot.view_mut();
        view.reset();
        view.set_geometry(record.position, record.size);
        view.bind(&desc.payload, index);
        if self.selection.is_selected(index) {
            view.apply_selected(true);
        }
        if self.selection.hovered() == Some(index) {
            view.apply_hovered(true);
        }

        self.active.insert(
            index,
            Bound {
                slot,
                position: record.position,
                size: record.size,
                target: record.position,
                motion: None,
            },
        );
        true
    }

    /// Resets and rebinds the slot at `index` to the current payload.
    fn rebind(&mut self, index: usize) {
        let (Some(b), Some(desc)) = (self.active.get_mut(index), self.data.get(index)) else {
            return;
        };
        let view = b.slot.view_mut();
        view.reset();
        view.set_geometry(b.position, b.size);
        view.bind(&desc.payload, index);
        if self.selection.is_selected(index) {
            view.apply_selected(true);
        }
        if self.selection.hovered() == Some(index) {
            view.apply_hovered(true);
        }
    }

    fn resolved_tag(&self, index: usize) -> SlotTag {
        let requested = match (&self.options.type_of, self.data.get(index)) {
            (Some(f), Some(desc)) => f(index, &desc.payload),
            _ => DEFAULT_TAG,
        };
        self.pool.resolve_tag(requested)
    }

    /// Moves persisting slots to their recomputed geometry.
    fn reposition_persisting(&mut self) {
        let animation = self.options.move_animation;
        let now_ms = self.now_ms;
        for (index, b) in self.active.iter_mut() {
            let Some(record) = self.layout.record(index) else {
                continue;
            };
            if record.position == b.target && record.size == b.size {
                continue;
            }
            b.target = record.position;
            b.size = record.size;
            match animation {
                Some(anim) if b.position != b.target => {
                    match &mut b.motion {
                        Some(tween) => tween.retarget(now_ms, b.target, anim.duration_ms),
                        None => {
                            b.motion = Some(Tween::new(
                                b.position,
                                b.target,
                                now_ms,
                                anim.duration_ms,
                                anim.easing,
                            ));
                        }
                    }
                    b.slot.view_mut().set_geometry(b.position, b.size);
                }
                _ => {
                    b.motion = None;
                    b.position = b.target;
                    b.slot.view_mut().set_geometry(b.position, b.size);
                }
            }
        }
    }

    fn snap_animations(&mut self) {
        for (_, b) in self.active.iter_mut() {
            if b.motion.take().is_some() {
                b.position = b.target;
                b.slot.view_mut().set_geometry(b.position, b.size);
            }
        }
    }

    /// Resets a slot and returns it to its sub-pool. An in-flight move animation is dropped
    /// with it.
    fn release(&mut self, _index: usize, bound: Bound<S>) {
        let Bound { mut slot, .. } = bound;
        rtrace!(index = _index, tag = slot.tag(), "Recycler::release");
        slot.view_mut().reset();
        self.pool.give_back(slot);
    }

    fn release_all(&mut self) {
        for (i, b) in self.active.drain() {
            self.release(i, b);
        }
        self.force_reconcile = true;
    }

    fn flush_events(&mut self) {
        if self.batch_depth > 0 || self.pending.is_empty() {
            return;
        }
        let mut events = core::mem::take(&mut self.pending);
        if !self.listeners.is_empty() {
            for event in &events {
                self.listeners.emit(&*self, event);
            }
        }
        events.clear();
        self.pending = events;
    }
}

impl<T, S> core::fmt::Debug for Recycler<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("options", &self.options)
            .field("len", &self.data.len())
            .field("range", &self.range)
            .field("active", &self.active.len())
            .field("scroll_offset", &self.scroll_offset)
            .field("selection", &self.selection)
            .field("pool", &self.pool)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
