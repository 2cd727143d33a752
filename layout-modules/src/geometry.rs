//! Axis-agnostic geometry.
//!
//! Every arrangement algorithm works in `major`/`minor` space: `major` is the scroll direction,
//! `minor` is the fixed cross extent. Conversion to and from host (x/y) space is a pure
//! relabeling of components under a chosen [`Axis`], so it round-trips exactly.

/// The major (scrolling) axis of a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Sections stack left to right; the minor extent is the viewport height.
    Horizontal,
    /// Sections stack top to bottom; the minor extent is the viewport width.
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub major: f64,
    pub minor: f64,
}

impl Point {
    pub const ZERO: Self = Self {
        major: 0.0,
        minor: 0.0,
    };

    pub const fn new(major: f64, minor: f64) -> Self {
        Self { major, minor }
    }

    pub fn from_physical(p: PhysicalPoint, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::new(p.x, p.y),
            Axis::Vertical => Self::new(p.y, p.x),
        }
    }

    pub fn to_physical(self, axis: Axis) -> PhysicalPoint {
        match axis {
            Axis::Horizontal => PhysicalPoint::new(self.major, self.minor),
            Axis::Vertical => PhysicalPoint::new(self.minor, self.major),
        }
    }

    /// Offsets both coordinates.
    pub fn offset(self, major: f64, minor: f64) -> Self {
        Self::new(self.major + major, self.minor + minor)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub major: f64,
    pub minor: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        major: 0.0,
        minor: 0.0,
    };

    pub const fn new(major: f64, minor: f64) -> Self {
        Self { major, minor }
    }

    pub fn from_physical(s: PhysicalSize, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::new(s.width, s.height),
            Axis::Vertical => Self::new(s.height, s.width),
        }
    }

    pub fn to_physical(self, axis: Axis) -> PhysicalSize {
        match axis {
            Axis::Horizontal => PhysicalSize::new(self.major, self.minor),
            Axis::Vertical => PhysicalSize::new(self.minor, self.major),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_physical(r: PhysicalRect, axis: Axis) -> Self {
        Self::new(
            Point::from_physical(r.origin, axis),
            Size::from_physical(r.size, axis),
        )
    }

    pub fn to_physical(self, axis: Axis) -> PhysicalRect {
        PhysicalRect::new(self.origin.to_physical(axis), self.size.to_physical(axis))
    }

    pub fn min_major(&self) -> f64 {
        self.origin.major
    }

    /// The major coordinate immediately past the rect.
    pub fn max_major(&self) -> f64 {
        self.origin.major + self.size.major
    }

    pub fn min_minor(&self) -> f64 {
        self.origin.minor
    }

    pub fn max_minor(&self) -> f64 {
        self.origin.minor + self.size.minor
    }
}

/// A point in host (x/y) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalPoint {
    pub x: f64,
    pub y: f64,
}

impl PhysicalPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in host (width/height) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rect in host space, as handed to (and received from) the collection view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalRect {
    pub origin: PhysicalPoint,
    pub size: PhysicalSize,
}

impl PhysicalRect {
    pub const fn new(origin: PhysicalPoint, size: PhysicalSize) -> Self {
        Self { origin, size }
    }

    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(PhysicalPoint::new(x, y), PhysicalSize::new(width, height))
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }

    /// Strict overlap test.
    ///
    /// Rects that only share an edge do not intersect, and a zero-area rect intersects nothing.
    pub fn intersects(&self, other: &PhysicalRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }
}

/// Position of an item inside a sectioned collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl core::fmt::Display for IndexPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
