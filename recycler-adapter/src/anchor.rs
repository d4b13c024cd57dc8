use recycler::{ItemRenderer, Recycler};

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - chat/timeline "prepend" (load older messages above) without content jumping
/// - any insert/remove above the viewport where the view should stay on the same item
///
/// Items are identified by a caller-chosen key derived from the payload, since indexes shift
/// when the dataset changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Distance from the anchor item's start to the scroll offset, along the scroll axis.
    pub offset_in_viewport: f32,
}

/// Captures an anchor for the item at `offset_in_viewport` below (or right of) the viewport
/// start.
pub fn capture_anchor_at<T, S: ItemRenderer<T>, K>(
    r: &Recycler<T, S>,
    offset_in_viewport: f32,
    key_of: impl FnOnce(usize, &T) -> K,
) -> Option<ScrollAnchor<K>> {
    let scroll = r.scroll_offset();
    let index = r.index_at_offset(scroll + offset_in_viewport.max(0.0))?;
    let start = r.layout().record(index)?.main_start(r.layout().axis());
    let item = r.item(index)?;
    Some(ScrollAnchor {
        key: key_of(index, &item.payload),
        offset_in_viewport: scroll - start,
    })
}

/// Captures an anchor for the first item overlapping the viewport.
///
/// Returns `None` when nothing is under the viewport start (empty dataset, or scrolled past
/// the content).
pub fn capture_first_visible_anchor<T, S: ItemRenderer<T>, K>(
    r: &Recycler<T, S>,
    key_of: impl FnOnce(usize, &T) -> K,
) -> Option<ScrollAnchor<K>> {
    capture_anchor_at(r, 0.0, key_of)
}

/// Applies a previously captured anchor by scrolling so the anchor item sits where it was.
///
/// The adapter must provide a `key_to_index` mapping for the *current* dataset.
///
/// Returns `true` when the anchor was successfully applied.
pub fn apply_anchor<T, S: ItemRenderer<T>, K>(
    r: &mut Recycler<T, S>,
    anchor: &ScrollAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    let axis = r.layout().axis();
    let Some(start) = r.layout().record(index).map(|rec| rec.main_start(axis)) else {
        return false;
    };
    let target = r.clamp_scroll_offset(start + anchor.offset_in_viewport);
    atrace!(index, target, "apply_anchor");
    r.tick(target);
    true
}
