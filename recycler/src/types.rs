use core::ops::{Add, Mul, Sub};

/// A 2D vector used for both positions and sizes.
///
/// Positions follow the content-space convention used throughout the crate: the origin is the
/// top-left corner of the content, `x` grows to the right and `y` *decreases* as content
/// advances downwards. A vertical list therefore places item `n` at a more negative `y` than
/// item `n - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// Component across `axis`.
    pub fn across(self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.x,
            Axis::Horizontal => self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Inner padding of the content area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// Padding before the first item along `axis`.
    pub fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.top,
            Axis::Horizontal => self.left,
        }
    }

    /// Padding after the last item along `axis`.
    pub fn trailing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.bottom,
            Axis::Horizontal => self.right,
        }
    }

    /// Padding before the items on the cross axis of `axis`.
    pub fn cross_leading(&self, axis: Axis) -> f32 {
        self.leading(axis.cross())
    }

    /// Padding after the items on the cross axis of `axis`.
    pub fn cross_trailing(&self, axis: Axis) -> f32 {
        self.trailing(axis.cross())
    }
}

/// The scroll (stacking) axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Converts a main-axis offset (distance from the content origin, always `>= 0` inside the
    /// content) and a cross-axis offset into a content-space position.
    pub fn position(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(cross, -main),
            Self::Horizontal => Vec2::new(main, -cross),
        }
    }

    /// Inverse of [`Axis::position`] for the main axis.
    pub fn main_offset(self, position: Vec2) -> f32 {
        match self {
            Self::Vertical => -position.y,
            Self::Horizontal => position.x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Keyboard navigation direction, turned into an index delta by the active layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An inclusive index range (`first..=last`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

impl VisibleRange {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "inverted range ({first}..={last})");
        Self { first, last }
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// A dataset entry. `index` always equals the entry's position in the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDescriptor<T> {
    pub index: usize,
    pub payload: T,
}

/// Geometry of a single item, as computed by the last layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutRecord {
    pub index: usize,
    /// Top-left corner in content space (see [`Vec2`]).
    pub position: Vec2,
    pub size: Vec2,
}

impl LayoutRecord {
    /// Start offset along `axis`, measured from the content origin.
    pub fn main_start(&self, axis: Axis) -> f32 {
        axis.main_offset(self.position)
    }

    /// End offset along `axis` (exclusive).
    pub fn main_end(&self, axis: Axis) -> f32 {
        self.main_start(axis) + self.size.along(axis)
    }
}

/// Classifier tag selecting a sub-pool and visual template.
pub type SlotTag = u32;

/// The tag used when no classifier is configured, and the fallback when a classified tag
/// has no registered sub-pool.
pub const DEFAULT_TAG: SlotTag = 0;
