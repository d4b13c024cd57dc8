// Example: heterogeneous rows (section headers + entries) drawn from separate sub-pools, with
// incremental inserts/removals and animated moves.
use recycler::{
    Easing, ItemRenderer, MoveAnimation, Pool, PoolHooks, Recycler, RecyclerOptions, SlotTag, Vec2,
};

const ENTRY: SlotTag = 0;
const HEADER: SlotTag = 1;

#[derive(Clone, Debug)]
enum Row {
    Header(&'static str),
    Entry(u32),
}

#[derive(Debug)]
struct RowView {
    tag: SlotTag,
    text: String,
    y: f32,
}

impl ItemRenderer<Row> for RowView {
    fn bind(&mut self, payload: &Row, _index: usize) {
        self.text = match payload {
            Row::Header(title) => format!("== {title} =="),
            Row::Entry(n) => format!("entry #{n}"),
        };
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

fn row_view(tag: SlotTag) -> RowView {
    RowView {
        tag,
        text: String::new(),
        y: 0.0,
    }
}

fn main() {
    let options = RecyclerOptions::new(|_, row: &Row| match row {
        Row::Header(_) => Vec2::new(300.0, 32.0),
        Row::Entry(_) => Vec2::new(300.0, 20.0),
    })
    .with_type_of(Some(|_, row: &Row| match row {
        Row::Header(_) => HEADER,
        Row::Entry(_) => ENTRY,
    }))
    .with_viewport(Vec2::new(300.0, 240.0))
    .with_spacing(2.0)
    .with_move_animation(Some(MoveAnimation::new(120, Easing::EaseInOutCubic)));

    let mut pool = Pool::new()
        .with_sub_pool(ENTRY, 24, PoolHooks::new(row_view))
        .with_sub_pool(HEADER, 4, PoolHooks::new(row_view));
    pool.warmup(HEADER, 2);

    let mut r = Recycler::new(options, pool);
    let mut rows = Vec::new();
    for (s, title) in ["Inbox", "Archive", "Spam"].into_iter().enumerate() {
        rows.push(Row::Header(title));
        rows.extend((0..15).map(|n| Row::Entry(s as u32 * 100 + n)));
    }
    r.set_items(rows);

    let dump = |r: &Recycler<Row, RowView>| {
        for (index, slot) in r.active_slots() {
            let v = slot.view();
            println!("  [{index:>2}] tag={} y={:>7.1} {}", v.tag, v.y, v.text);
        }
    };
    println!("initial:");
    dump(&r);

    r.insert_range(1, [Row::Entry(999), Row::Entry(998)])
        .expect("index 1 is inside the dataset");
    r.remove_range(5, 3).expect("span is inside the dataset");
    for now_ms in [0u64, 60, 120] {
        r.advance_animations(now_ms);
        println!("t={now_ms}:");
        dump(&r);
    }
    println!("pool={:?}", r.pool());
}
