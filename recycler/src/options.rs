use alloc::sync::Arc;

use crate::motion::MoveAnimation;
use crate::{LayoutKind, Padding, SelectionMode, SlotTag, Vec2};

/// Host size provider: preferred size of the item at `index`.
pub type ItemSizeFn<T> = Arc<dyn Fn(usize, &T) -> Vec2 + Send + Sync>;

/// Type classifier: which sub-pool/template the item at `index` uses.
pub type TypeOfFn<T> = Arc<dyn Fn(usize, &T) -> SlotTag + Send + Sync>;

/// Configuration for [`crate::Recycler`].
///
/// Cheap to clone: closures live in `Arc`s, so adapters can tweak a field and call
/// `Recycler::set_options` without reallocating them.
pub struct RecyclerOptions<T> {
    pub layout: LayoutKind,
    /// Distance between neighbouring items in the linear layouts.
    pub spacing: f32,
    pub padding: Padding,
    /// Extra distance before and after the viewport (scroll axis) whose items are
    /// materialized early.
    pub preload_margin: f32,
    /// Viewport width/height.
    pub viewport: Vec2,
    /// Preferred item size. Ignored by the grid, whose cells are uniform.
    pub item_size: ItemSizeFn<T>,
    /// Optional classifier for heterogeneous lists (e.g. section headers). Without it every
    /// item uses [`crate::DEFAULT_TAG`].
    pub type_of: Option<TypeOfFn<T>>,
    pub selection_mode: SelectionMode,
    /// Animate persisting slots towards a changed layout position instead of snapping.
    pub move_animation: Option<MoveAnimation>,
}

impl<T> Clone for RecyclerOptions<T> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout,
            spacing: self.spacing,
            padding: self.padding,
            preload_margin: self.preload_margin,
            viewport: self.viewport,
            item_size: Arc::clone(&self.item_size),
            type_of: self.type_of.clone(),
            selection_mode: self.selection_mode,
            move_animation: self.move_animation,
        }
    }
}

impl<T> RecyclerOptions<T> {
    /// Options for a vertical list whose items report their own size.
    pub fn new(item_size: impl Fn(usize, &T) -> Vec2 + Send + Sync + 'static) -> Self {
        Self {
            layout: LayoutKind::Vertical,
            spacing: 0.0,
            padding: Padding::ZERO,
            preload_margin: 0.0,
            viewport: Vec2::ZERO,
            item_size: Arc::new(item_size),
            type_of: None,
            selection_mode: SelectionMode::default(),
            move_animation: None,
        }
    }

    /// Options for a vertical list of identically sized items.
    pub fn uniform(size: Vec2) -> Self {
        Self::new(move |_, _| size)
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_preload_margin(mut self, preload_margin: f32) -> Self {
        self.preload_margin = preload_margin;
        self
    }

    pub fn with_viewport(mut self, viewport: Vec2) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_item_size(
        mut self,
        item_size: impl Fn(usize, &T) -> Vec2 + Send + Sync + 'static,
    ) -> Self {
        self.item_size = Arc::new(item_size);
        self
    }

    pub fn with_type_of(
        mut self,
        type_of: Option<impl Fn(usize, &T) -> SlotTag + Send + Sync + 'static>,
    ) -> Self {
        self.type_of = type_of.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    pub fn with_move_animation(mut self, move_animation: Option<MoveAnimation>) -> Self {
        self.move_animation = move_animation;
        self
    }
}

impl<T> core::fmt::Debug for RecyclerOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclerOptions")
            .field("layout", &self.layout)
            .field("spacing", &self.spacing)
            .field("padding", &self.padding)
            .field("preload_margin", &self.preload_margin)
            .field("viewport", &self.viewport)
            .field("type_of", &self.type_of.is_some())
            .field("selection_mode", &self.selection_mode)
            .field("move_animation", &self.move_animation)
            .finish_non_exhaustive()
    }
}
