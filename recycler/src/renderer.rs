use crate::Vec2;

/// What the controller needs from a slot's view.
///
/// Implemented by the host's presentation object. The controller guarantees that on every
/// (re)bind `reset` runs before `bind`, so no state from a previous binding leaks into the
/// next one.
pub trait ItemRenderer<T> {
    /// Shows `payload` as the item at `index`.
    fn bind(&mut self, payload: &T, index: usize);

    /// Returns the view to its neutral state (unselected, unhovered, no content).
    fn reset(&mut self);

    fn apply_selected(&mut self, selected: bool);

    fn apply_hovered(&mut self, hovered: bool);

    /// Moves/resizes the view. `position` is the top-left corner in content space.
    fn set_geometry(&mut self, position: Vec2, size: Vec2);

    /// The bound item moved to a new index without changing identity (an insertion or
    /// removal before it). Views that display their index refresh it here.
    fn set_index(&mut self, index: usize) {
        let _ = index;
    }
}
