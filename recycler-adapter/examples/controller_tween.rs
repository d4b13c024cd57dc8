use recycler::{Align, DEFAULT_TAG, Easing, ItemRenderer, Pool, PoolHooks, RecyclerOptions, Vec2};
use recycler_adapter::Controller;

#[derive(Debug, Default)]
struct Line(u32);

impl ItemRenderer<u32> for Line {
    fn bind(&mut self, payload: &u32, _index: usize) {
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
    // Example: controller driving tween scrolling without holding any toolkit objects.
    //
    // An adapter would:
    // - start a tween (e.g. in response to a "scroll to index" command)
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real scroll container (if any)
    // - draw the recycler's active slots
    let options = RecyclerOptions::uniform(Vec2::new(200.0, 16.0))
        .with_viewport(Vec2::new(200.0, 320.0))
        .with_preload_margin(32.0);
    let pool = Pool::new().with_sub_pool(DEFAULT_TAG, 32, PoolHooks::new(|_| Line::default()));
    let mut c = Controller::new(options, pool);
    c.recycler_mut().set_items(0..10_000);

    let target = c.start_tween_to_index(2_000, Align::Center, 0, 240, Easing::SmoothStep);
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms) {
        if now_ms % 80 == 0 {
            println!(
                "t={now_ms} off={off} visible={:?}",
                c.recycler().visible_range()
            );
        }
        now_ms += 16;
    }

    println!(
        "done: off={} range={:?} created={:?}",
        c.recycler().scroll_offset(),
        c.recycler().visible_range(),
        c.recycler().pool().stats(DEFAULT_TAG).map(|s| s.created)
    );
}
