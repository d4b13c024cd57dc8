// Example: a photo grid with multi-selection, hover and keyboard navigation.
use recycler::{
    ClickModifiers, DEFAULT_TAG, Direction, GridConfig, ItemRenderer, LayoutKind, Pool, PoolHooks,
    Recycler, RecyclerEvent, RecyclerOptions, SelectionMode, Vec2,
};

#[derive(Debug, Default)]
struct Thumb {
    name: String,
    selected: bool,
    hovered: bool,
}

impl ItemRenderer<String> for Thumb {
    fn bind(&mut self, payload: &String, _index: usize) {
        self.name.clone_from(payload);
    }

    fn reset(&mut self) {
        self.name.clear();
        self.selected = false;
        self.hovered = false;
    }

    fn apply_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn apply_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    fn set_geometry(&mut self, _position: Vec2, _size: Vec2) {}
}

fn main() {
    let grid = GridConfig::new(4, Vec2::new(96.0, 96.0)).with_cell_spacing(Vec2::new(8.0, 8.0));
    let options = RecyclerOptions::uniform(Vec2::ZERO)
        .with_layout(LayoutKind::Grid(grid))
        .with_viewport(Vec2::new(416.0, 300.0))
        .with_preload_margin(104.0)
        .with_selection_mode(SelectionMode::Multiple);
    let pool = Pool::new().with_sub_pool(DEFAULT_TAG, 40, PoolHooks::new(|_| Thumb::default()));

    let mut r = Recycler::new(options, pool);
    r.subscribe(|_, e| match e {
        RecyclerEvent::VisibleRangeChanged { current, .. } => println!("  range -> {current:?}"),
        other => println!("  {other:?}"),
    });
    r.set_items((0..400).map(|i| format!("IMG_{i:04}.jpg")));

    println!("click 5, shift-click 10, ctrl-click 7:");
    r.handle_click(5, ClickModifiers::empty());
    r.handle_click(10, ClickModifiers::RANGE);
    r.handle_click(7, ClickModifiers::MULTI);
    println!("selected={:?}", r.selected_indices().collect::<Vec<_>>());

    println!("hover 2 then 3:");
    r.handle_hover_enter(2);
    r.handle_hover_enter(3);

    println!("arrow down x20:");
    for _ in 0..20 {
        r.navigate(Direction::Down);
    }
    println!(
        "anchor={:?} offset={} selected_thumb={:?}",
        r.selection().anchor(),
        r.scroll_offset(),
        r.selection().anchor().and_then(|i| r.slot(i)).map(|s| s.view())
    );
}
