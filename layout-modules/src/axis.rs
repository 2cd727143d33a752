use crate::{Axis, IndexPath, LayoutAttributes, LayoutModule, LayoutResult, Module, Point, Result};

/// Delegates to one of two modules depending on the active major axis.
#[derive(Clone, Debug)]
pub struct ForMajorAxis {
    pub horizontal: Module,
    pub vertical: Module,
}

impl ForMajorAxis {
    fn select(&self, axis: Axis) -> &Module {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

impl LayoutModule for ForMajorAxis {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        self.select(axis).layout(count, origin, axis, minor_extent)
    }

    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.select(axis)
            .initial_attributes(index_path, axis, attributes)
    }

    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.select(axis).final_attributes(index_path, axis, attributes)
    }
}

impl Module {
    /// Uses `horizontal` when laying out on a horizontal major axis, `vertical` otherwise.
    pub fn for_major_axis(horizontal: Module, vertical: Module) -> Self {
        Self::new(ForMajorAxis {
            horizontal,
            vertical,
        })
    }
}
