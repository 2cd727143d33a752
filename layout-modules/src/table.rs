use std::sync::Arc;

use crate::error::check_extent;
use crate::module::CalculateDimension;
use crate::{Axis, LayoutAttributes, LayoutModule, LayoutResult, Module, Point, Rect, Result, Size};

/// Rows stacked along the major axis, each spanning the full minor extent.
///
/// Padding is applied between rows only, never before the first or after the last; use
/// [`Module::inset`] for outer spacing.
#[derive(Clone)]
pub struct Table {
    padding: f64,
    extent: RowExtent,
}

#[derive(Clone)]
enum RowExtent {
    Fixed(f64),
    Dynamic(CalculateDimension),
}

impl Table {
    /// Every row has the same major extent.
    pub fn fixed(row_extent: f64, padding: f64) -> Self {
        Self {
            padding,
            extent: RowExtent::Fixed(row_extent),
        }
    }

    /// Each row's major extent is computed by `calculate(index, axis, minor_extent)`.
    pub fn dynamic(
        padding: f64,
        calculate: impl Fn(usize, Axis, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            padding,
            extent: RowExtent::Dynamic(Arc::new(calculate)),
        }
    }

    fn row_extent(&self, index: usize, axis: Axis, minor_extent: f64) -> f64 {
        match &self.extent {
            RowExtent::Fixed(extent) => *extent,
            RowExtent::Dynamic(calculate) => calculate(index, axis, minor_extent),
        }
    }
}

impl LayoutModule for Table {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        let minor_extent = check_extent("minor extent", minor_extent)?;
        let padding = check_extent("table padding", self.padding)?;

        let mut items = Vec::with_capacity(count);
        let mut offset = origin.major;
        for index in 0..count {
            if index > 0 {
                offset += padding;
            }
            let extent = check_extent("row extent", self.row_extent(index, axis, minor_extent))?;
            items.push(LayoutAttributes::new(Rect::new(
                Point::new(offset, origin.minor),
                Size::new(extent, minor_extent),
            )));
            offset += extent;
        }

        Ok(LayoutResult::new(items, offset))
    }
}

impl Module {
    /// Fixed-extent rows. See [`Table::fixed`].
    pub fn table(row_extent: f64, padding: f64) -> Self {
        Self::new(Table::fixed(row_extent, padding))
    }

    /// Variable-extent rows. See [`Table::dynamic`].
    pub fn dynamic_table(
        padding: f64,
        calculate: impl Fn(usize, Axis, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(Table::dynamic(padding, calculate))
    }
}
