use recycler::{Align, Easing, ItemRenderer, Pool, Recycler, RecyclerOptions, Tween, Vec2};

use crate::{ScrollAnchor, apply_anchor, capture_anchor_at, capture_first_visible_anchor};

/// How long after the last scroll event [`Controller::is_scrolling`] stays `true`.
pub const DEFAULT_IS_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// A framework-neutral controller that wraps a [`Recycler`] and provides common adapter
/// workflows (tween-driven scrolling, scroll anchoring, `is_scrolling` debouncing).
///
/// This type does not hold any UI objects beyond the slots' views. Adapters drive it by
/// calling:
/// - `on_viewport` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (scroll tweens, slot move animations and
///   `is_scrolling` debouncing)
///
/// For UI scroll containers you can use the offset returned from `tick()` to set the real
/// scroll position, while keeping the recycler in sync.
#[derive(Debug)]
pub struct Controller<T, S> {
    r: Recycler<T, S>,
    tween: Option<Tween<f32>>,
    is_scrolling: bool,
    last_scroll_ms: u64,
    is_scrolling_reset_delay_ms: u64,
}

impl<T, S: ItemRenderer<T>> Controller<T, S> {
    pub fn new(options: RecyclerOptions<T>, pool: Pool<S>) -> Self {
        Self::from_recycler(Recycler::new(options, pool))
    }

    pub fn from_recycler(r: Recycler<T, S>) -> Self {
        Self {
            r,
            tween: None,
            is_scrolling: false,
            last_scroll_ms: 0,
            is_scrolling_reset_delay_ms: DEFAULT_IS_SCROLLING_RESET_DELAY_MS,
        }
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn recycler(&self) -> &Recycler<T, S> {
        &self.r
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<T, S> {
        &mut self.r
    }

    pub fn into_recycler(self) -> Recycler<T, S> {
        self.r
    }

    /// Whether a scroll tween is in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// `true` from a scroll event (or tween start) until the reset delay elapses without
    /// further scrolling.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn on_viewport(&mut self, viewport: Vec2) {
        self.r.set_viewport(viewport);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: f32, now_ms: u64) {
        self.cancel_animation();
        self.mark_scrolling(now_ms);
        self.r.tick(scroll_offset);
    }

    /// Advances the controller.
    ///
    /// Slot move animations always advance. If a scroll tween is active, the scroll offset is
    /// updated and returned; otherwise `is_scrolling` is debounced and `None` is returned.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.r.advance_animations(now_ms);

        let Some(tween) = self.tween else {
            if self.is_scrolling
                && now_ms.saturating_sub(self.last_scroll_ms) >= self.is_scrolling_reset_delay_ms
            {
                self.is_scrolling = false;
            }
            return None;
        };

        let offset = self.r.clamp_scroll_offset(tween.sample(now_ms));
        self.mark_scrolling(now_ms);
        self.r.tick(offset);

        if tween.is_done(now_ms) {
            self.tween = None;
            self.is_scrolling = false;
        }

        Some(self.r.scroll_offset())
    }

    /// Computes and applies a scroll-to-index immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f32 {
        self.cancel_animation();
        self.r.scroll_to_index(index, align)
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        let offset = self.r.clamp_scroll_offset(offset);
        self.r.tick(offset);
        offset
    }

    /// Starts a tween to an index (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = self.r.scroll_offset_for_index(index, align);
        self.start_tween_to_offset(to, now_ms, duration_ms, easing)
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// A tween already in flight is retargeted from its current value, so repeated commands
    /// (e.g. holding a key) do not jump.
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = self.r.clamp_scroll_offset(offset);
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to, duration_ms),
            None => {
                let from = self.r.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
            }
        }
        adebug!(to, duration_ms, "Controller::start_tween_to_offset");
        self.mark_scrolling(now_ms);
        to
    }

    /// Keyboard navigation that glides to the newly selected item instead of jumping.
    ///
    /// Returns the newly selected index.
    pub fn navigate_smooth(
        &mut self,
        delta: isize,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<usize> {
        let from = self.r.scroll_offset();
        let target = self.r.handle_key_navigate(delta)?;
        let to = self.r.scroll_offset();
        if to != from {
            // Rewind the jump and replay it as a tween.
            self.r.tick(from);
            self.start_tween_to_offset(to, now_ms, duration_ms, easing);
        }
        Some(target)
    }

    pub fn capture_first_visible_anchor<K>(
        &self,
        key_of: impl FnOnce(usize, &T) -> K,
    ) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&self.r, key_of)
    }

    /// Captures an anchor for the item at a given offset in the viewport.
    ///
    /// For example, `offset_in_viewport = 0.0` anchors the item at the top of the viewport.
    pub fn capture_anchor_at_offset_in_viewport<K>(
        &self,
        offset_in_viewport: f32,
        key_of: impl FnOnce(usize, &T) -> K,
    ) -> Option<ScrollAnchor<K>> {
        capture_anchor_at(&self.r, offset_in_viewport, key_of)
    }

    /// Applies a previously captured anchor by adjusting the scroll offset.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor<K>(
        &mut self,
        anchor: &ScrollAnchor<K>,
        key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool {
        self.cancel_animation();
        apply_anchor(&mut self.r, anchor, key_to_index)
    }

    fn mark_scrolling(&mut self, now_ms: u64) {
        self.is_scrolling = true;
        self.last_scroll_ms = now_ms;
    }
}
