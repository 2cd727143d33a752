use crate::{AffineTransform, Axis, PhysicalRect, Rect, Transform3D};

/// Placement of a single item, in axis-agnostic space.
///
/// Values are produced fresh on every layout pass. Transition functions receive a copy and
/// return a modified copy; nothing is mutated after it reaches the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutAttributes {
    pub frame: Rect,
    pub transform_3d: Transform3D,
    pub transform: AffineTransform,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f64,
    /// Paint order; higher values are drawn above lower ones.
    pub z_index: i32,
    pub hidden: bool,
}

impl LayoutAttributes {
    /// Attributes with the given frame and steady-state defaults (identity transforms, opaque,
    /// z-index 0, visible).
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            transform_3d: Transform3D::IDENTITY,
            transform: AffineTransform::IDENTITY,
            alpha: 1.0,
            z_index: 0,
            hidden: false,
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_transform(mut self, transform: AffineTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_transform_3d(mut self, transform_3d: Transform3D) -> Self {
        self.transform_3d = transform_3d;
        self
    }

    /// Sets the opacity, clamped to `0.0..=1.0`.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn from_physical(attributes: PhysicalAttributes, axis: Axis) -> Self {
        Self {
            frame: Rect::from_physical(attributes.frame, axis),
            transform_3d: attributes.transform_3d,
            transform: attributes.transform,
            alpha: attributes.alpha,
            z_index: attributes.z_index,
            hidden: attributes.hidden,
        }
    }

    pub fn to_physical(self, axis: Axis) -> PhysicalAttributes {
        PhysicalAttributes {
            frame: self.frame.to_physical(axis),
            transform_3d: self.transform_3d,
            transform: self.transform,
            alpha: self.alpha,
            z_index: self.z_index,
            hidden: self.hidden,
        }
    }
}

/// [`LayoutAttributes`] converted to host space. This is what the host applies to a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalAttributes {
    pub frame: PhysicalRect,
    pub transform_3d: Transform3D,
    pub transform: AffineTransform,
    pub alpha: f64,
    pub z_index: i32,
    pub hidden: bool,
}

impl PhysicalAttributes {
    pub fn new(frame: PhysicalRect) -> Self {
        Self {
            frame,
            transform_3d: Transform3D::IDENTITY,
            transform: AffineTransform::IDENTITY,
            alpha: 1.0,
            z_index: 0,
            hidden: false,
        }
    }
}

/// Output of arranging one section.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    /// One entry per item, index-aligned with the item index.
    pub items: Vec<LayoutAttributes>,
    /// Major coordinate immediately after the section; the next section starts here.
    pub final_offset: f64,
}

impl LayoutResult {
    pub fn new(items: Vec<LayoutAttributes>, final_offset: f64) -> Self {
        Self {
            items,
            final_offset,
        }
    }

    /// An empty section occupying no space.
    pub fn empty(origin_major: f64) -> Self {
        Self {
            items: Vec::new(),
            final_offset: origin_major,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
