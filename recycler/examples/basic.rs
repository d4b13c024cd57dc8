// Example: a million-row list backed by a handful of pooled slots.
use recycler::{Align, DEFAULT_TAG, ItemRenderer, Pool, PoolHooks, Recycler, RecyclerOptions, Vec2};

#[derive(Debug, Default)]
struct Label {
    text: String,
    y: f32,
}

impl ItemRenderer<u64> for Label {
    fn bind(&mut self, payload: &u64, index: usize) {
        self.text = format!("row {index}: {payload}");
    }

    fn reset(&mut self) {
        self.text.clear();
    }

    fn apply_selected(&mut self, _selected: bool) {}

    fn apply_hovered(&mut self, _hovered: bool) {}

    fn set_geometry(&mut self, position: Vec2, _size: Vec2) {
        self.y = position.y;
    }
}

fn main() {
    let options = RecyclerOptions::uniform(Vec2::new(320.0, 20.0))
        .with_viewport(Vec2::new(320.0, 200.0))
        .with_preload_margin(40.0);
    let pool = Pool::new().with_sub_pool(DEFAULT_TAG, 32, PoolHooks::new(|_| Label::default()));

    let mut r = Recycler::new(options, pool);
    r.set_items((0..1_000_000u64).map(|i| i * 3));
    r.tick(123_456.0);

    println!("content_size={:?}", r.content_size());
    println!("visible_range={:?}", r.visible_range());
    for (index, slot) in r.active_slots().take(3) {
        println!("  {index} -> slot {:?}: {:?}", slot.id(), slot.view());
    }
    println!("pool={:?}", r.pool());

    let off = r.scroll_to_index(999_999, Align::End);
    println!("after scroll_to_index: offset={off} range={:?}", r.visible_range());
}
