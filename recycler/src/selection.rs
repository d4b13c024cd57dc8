use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/// How many items may be selected at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// Selection is off; no index can be selected.
    Disabled,
    /// At most one selected index.
    #[default]
    Single,
    /// Selections accumulate.
    Multiple,
}

bitflags::bitflags! {
    /// Modifier keys that accompany a click.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClickModifiers: u8 {
        /// Toggle the clicked item, keep the rest (Ctrl/Cmd-click).
        const MULTI = 0b0000_0001;
        /// Extend from the anchor to the clicked item (Shift-click).
        const RANGE = 0b0000_0010;
    }
}

/// A single state transition produced by [`SelectionTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionChange {
    Selected(usize),
    Deselected(usize),
    HoverEnter(usize),
    HoverExit(usize),
}

/// Index-addressed selection and hover state.
///
/// The tracker knows nothing about slots: every operation appends the transitions it caused
/// to `out`, in the order they happened, so the caller can forward them to whatever currently
/// presents those indexes. Passing a reused buffer keeps steady-state interaction
/// allocation-free.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
    hovered: Option<usize>,
    anchor: Option<usize>,
}

impl SelectionTracker {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the selection mode.
    ///
    /// `Disabled` clears every selection. Going from `Multiple` to `Single` keeps only the
    /// anchor (or the lowest selected index when the anchor is not selected).
    pub fn set_mode(&mut self, mode: SelectionMode, out: &mut Vec<SelectionChange>) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        match mode {
            SelectionMode::Disabled => {
                self.clear_selection(out);
                self.anchor = None;
            }
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self
                    .anchor
                    .filter(|a| self.selected.contains(a))
                    .or_else(|| self.selected.first().copied());
                self.deselect_all_except(keep, out);
            }
            _ => {}
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indexes in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// The last index selected by a click, toggle or [`Self::select_item`]. Range selection
    /// extends from here.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Selects `index`. In single mode any previous selection is dropped first.
    ///
    /// Returns `false` when nothing changed (already selected, or selection is disabled).
    pub fn select_item(&mut self, index: usize, out: &mut Vec<SelectionChange>) -> bool {
        match self.mode {
            SelectionMode::Disabled => false,
            SelectionMode::Single => {
                self.anchor = Some(index);
                if self.is_selected(index) {
                    return false;
                }
                self.deselect_all_except(None, out);
                self.insert(index, out)
            }
            SelectionMode::Multiple => {
                self.anchor = Some(index);
                self.insert(index, out)
            }
        }
    }

    pub fn deselect_item(&mut self, index: usize, out: &mut Vec<SelectionChange>) -> bool {
        if self.selected.remove(&index) {
            out.push(SelectionChange::Deselected(index));
            true
        } else {
            false
        }
    }

    pub fn toggle_selection(&mut self, index: usize, out: &mut Vec<SelectionChange>) -> bool {
        if self.is_selected(index) {
            self.deselect_item(index, out)
        } else {
            self.select_item(index, out)
        }
    }

    /// Selects the inclusive span between `a` and `b` (in either order).
    ///
    /// Single mode selects `b` alone. The anchor is left untouched so repeated range
    /// selections extend from the same origin.
    pub fn select_range(&mut self, a: usize, b: usize, out: &mut Vec<SelectionChange>) -> bool {
        match self.mode {
            SelectionMode::Disabled => false,
            SelectionMode::Single => {
                let anchor = self.anchor;
                let changed = self.select_item(b, out);
                self.anchor = anchor.or(Some(b));
                changed
            }
            SelectionMode::Multiple => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let mut changed = false;
                for i in lo..=hi {
                    changed |= self.insert(i, out);
                }
                changed
            }
        }
    }

    /// Selects `0..count`. Only meaningful in multiple mode.
    pub fn select_all(&mut self, count: usize, out: &mut Vec<SelectionChange>) -> bool {
        if self.mode != SelectionMode::Multiple || count == 0 {
            return false;
        }
        self.select_range(0, count - 1, out)
    }

    pub fn clear_selection(&mut self, out: &mut Vec<SelectionChange>) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        out.extend(self.selected.iter().map(|&i| SelectionChange::Deselected(i)));
        self.selected.clear();
        true
    }

    /// Moves hover to `index`. The previous hover (if any) exits before the new one enters.
    pub fn set_hovered(&mut self, index: Option<usize>, out: &mut Vec<SelectionChange>) -> bool {
        if self.hovered == index {
            return false;
        }
        if let Some(prev) = self.hovered.take() {
            out.push(SelectionChange::HoverExit(prev));
        }
        if let Some(next) = index {
            out.push(SelectionChange::HoverEnter(next));
        }
        self.hovered = index;
        true
    }

    /// Applies the click-routing policy:
    /// - plain click: clear everything else, select `index`
    /// - [`ClickModifiers::RANGE`]: select from the anchor to `index`, keeping the rest
    /// - [`ClickModifiers::MULTI`]: toggle `index`, keeping the rest
    ///
    /// `RANGE` wins when both are held. Without an anchor a range click behaves like a plain
    /// click.
    pub fn click(
        &mut self,
        index: usize,
        modifiers: ClickModifiers,
        out: &mut Vec<SelectionChange>,
    ) -> bool {
        if self.mode == SelectionMode::Disabled {
            return false;
        }
        if modifiers.contains(ClickModifiers::RANGE) {
            if let Some(anchor) = self.anchor {
                return self.select_range(anchor, index, out);
            }
        } else if modifiers.contains(ClickModifiers::MULTI) {
            let changed = self.toggle_selection(index, out);
            self.anchor = Some(index);
            return changed;
        }
        let mut changed = self.deselect_all_except(Some(index), out);
        changed |= self.insert(index, out);
        self.anchor = Some(index);
        changed
    }

    /// Clears selection, hover and anchor (dataset replaced).
    pub fn reset(&mut self, out: &mut Vec<SelectionChange>) {
        self.clear_selection(out);
        self.set_hovered(None, out);
        self.anchor = None;
    }

    /// Shifts every tracked index `>= index` up by `count` after an insertion.
    pub fn shift_for_insert(&mut self, index: usize, count: usize) {
        if count == 0 {
            return;
        }
        let tail = self.selected.split_off(&index);
        self.selected.extend(tail.into_iter().map(|i| i + count));
        let shift = |i: usize| if i >= index { i + count } else { i };
        self.hovered = self.hovered.map(shift);
        self.anchor = self.anchor.map(shift);
    }

    /// Drops tracked indexes inside `index..index + count` and shifts later ones down.
    ///
    /// Dropped selections are reported as `Deselected` and a dropped hover as `HoverExit`,
    /// all with their pre-removal indexes.
    pub fn shift_for_remove(&mut self, index: usize, count: usize, out: &mut Vec<SelectionChange>) {
        if count == 0 {
            return;
        }
        let end = index + count;
        let mut tail = self.selected.split_off(&index);
        let after = tail.split_off(&end);
        out.extend(tail.into_iter().map(SelectionChange::Deselected));
        self.selected.extend(after.into_iter().map(|i| i - count));

        if let Some(h) = self.hovered {
            if (index..end).contains(&h) {
                self.hovered = None;
                out.push(SelectionChange::HoverExit(h));
            } else if h >= end {
                self.hovered = Some(h - count);
            }
        }
        self.anchor = match self.anchor {
            Some(a) if (index..end).contains(&a) => None,
            Some(a) if a >= end => Some(a - count),
            other => other,
        };
    }

    fn insert(&mut self, index: usize, out: &mut Vec<SelectionChange>) -> bool {
        if self.selected.insert(index) {
            out.push(SelectionChange::Selected(index));
            true
        } else {
            false
        }
    }

    fn deselect_all_except(&mut self, keep: Option<usize>, out: &mut Vec<SelectionChange>) -> bool {
        let before = out.len();
        self.selected.retain(|&i| {
            if Some(i) == keep {
                true
            } else {
                out.push(SelectionChange::Deselected(i));
                false
            }
        });
        out.len() != before
    }
}
