use std::collections::HashMap;

use recycler::{DEFAULT_TAG, ItemRenderer, Pool, PoolHooks, RecyclerOptions, Vec2};
use recycler_adapter::Controller;

#[derive(Debug, Default)]
struct Message(u64);

impl ItemRenderer<u64> for Message {
    fn bind(&mut self, payload: &u64, _index: usize) {
        self.0 = *payload;
    }

    fn reset(&mut self) {
        self.0 = 0;
    }

    fn apply_selected(&mut self, _selected: bool) {}

    fn apply_hovered(&mut self, _hovered: bool) {}

    fn set_geometry(&mut self, _position: Vec2, _size: Vec2) {}
}

fn main() {
    // Example: preserve visual scroll position across "prepend" (chat/timeline load older
    // messages).
    //
    // The adapter flow is typically:
    // 1) capture an anchor (key + offset_in_viewport) before data changes
    // 2) apply the data change
    // 3) apply the anchor to adjust the scroll offset so the same item stays in the same place
    let options =
        RecyclerOptions::uniform(Vec2::new(300.0, 24.0)).with_viewport(Vec2::new(300.0, 240.0));
    let pool = Pool::new().with_sub_pool(DEFAULT_TAG, 16, PoolHooks::new(|_| Message::default()));
    let mut c = Controller::new(options, pool);
    c.recycler_mut().set_items(1000..1100u64);
    c.scroll_to_offset(1_210.0);

    // Message ids double as anchor keys.
    let anchor = c
        .capture_first_visible_anchor(|_, id| *id)
        .expect("viewport is over the content");
    println!(
        "before prepend: off={} anchor={anchor:?}",
        c.recycler().scroll_offset()
    );

    // Load 10 older messages above; existing ones shift by +10 indexes.
    c.recycler_mut()
        .insert_range(0, 2000..2010u64)
        .expect("prepend is always in bounds");

    // Provide an id -> index mapping for the current dataset (owned by your adapter).
    let index_of: HashMap<u64, usize> = c
        .recycler()
        .items()
        .iter()
        .map(|d| (d.payload, d.index))
        .collect();
    let ok = c.apply_anchor(&anchor, |id| index_of.get(id).copied());

    println!(
        "after prepend: ok={ok} off={} first_visible={:?}",
        c.recycler().scroll_offset(),
        c.recycler().index_at_offset(c.recycler().scroll_offset())
    );
}
