use std::sync::Arc;

use crate::columns::calculate_columns;
use crate::error::check_extent;
use crate::module::CalculateDimension;
use crate::{Axis, LayoutAttributes, LayoutModule, LayoutResult, Module, Point, Rect, Result, Size};

/// Variable-extent cells packed into the currently shortest column.
///
/// Columns are chosen exactly as in [`crate::Grid`]. Each item is placed, in index order, at the
/// end of the column with the smallest running offset; ties go to the lowest column index.
#[derive(Clone)]
pub struct Masonry {
    minimum_minor: f64,
    padding: Size,
    calculate_major: CalculateDimension,
}

impl Masonry {
    /// `calculate_major(index, axis, cell_minor)` returns the major extent of each cell.
    pub fn new(
        minimum_minor: f64,
        padding: Size,
        calculate_major: impl Fn(usize, Axis, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            minimum_minor,
            padding,
            calculate_major: Arc::new(calculate_major),
        }
    }
}

impl LayoutModule for Masonry {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        let minor_extent = check_extent("minor extent", minor_extent)?;
        let pad_major = check_extent("masonry padding", self.padding.major)?;
        let (columns, cell_minor) =
            calculate_columns(self.minimum_minor, self.padding.minor, minor_extent)?;

        if count == 0 {
            return Ok(LayoutResult::empty(origin.major));
        }

        // Offsets only grow and ties go to the lowest column, so columns at or past `count` are
        // never chosen.
        let mut offsets = vec![origin.major; columns.min(count)];
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let cell_major = check_extent(
                "masonry cell extent",
                (self.calculate_major)(index, axis, cell_minor),
            )?;
            let column = shortest_column(&offsets);
            items.push(LayoutAttributes::new(Rect::new(
                Point::new(
                    offsets[column],
                    origin.minor + column as f64 * (cell_minor + self.padding.minor),
                ),
                Size::new(cell_major, cell_minor),
            )));
            offsets[column] += cell_major + pad_major;
        }

        let tallest = offsets.iter().copied().fold(origin.major, f64::max);
        Ok(LayoutResult::new(items, tallest - pad_major))
    }
}

/// Index of the first strict minimum.
pub(crate) fn shortest_column(offsets: &[f64]) -> usize {
    let mut best = 0;
    for (column, &offset) in offsets.iter().enumerate().skip(1) {
        if offset < offsets[best] {
            best = column;
        }
    }
    best
}

impl Module {
    /// Shortest-column masonry. See [`Masonry`].
    pub fn masonry(
        minimum_minor: f64,
        padding: Size,
        calculate_major: impl Fn(usize, Axis, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(Masonry::new(minimum_minor, padding, calculate_major))
    }
}
