use crate::columns::calculate_columns;
use crate::error::{check_extent, check_positive};
use crate::{Axis, LayoutAttributes, LayoutModule, LayoutResult, Module, Point, Rect, Result, Size};

/// Uniform cells packed into as many minor-axis columns as fit.
///
/// The column count keeps each cell as close to `minimum_minor` as possible while exactly filling
/// the minor extent (see [`calculate_columns`]). Cell major extent is `cell_minor / aspect_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub minimum_minor: f64,
    /// `minor` separates columns, `major` separates rows.
    pub padding: Size,
    /// Minor over major (width over height for a vertical layout).
    pub aspect_ratio: f64,
}

impl Grid {
    pub fn new(minimum_minor: f64, padding: Size, aspect_ratio: f64) -> Self {
        Self {
            minimum_minor,
            padding,
            aspect_ratio,
        }
    }
}

impl LayoutModule for Grid {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        _axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        let minor_extent = check_extent("minor extent", minor_extent)?;
        let aspect_ratio = check_positive("grid aspect ratio", self.aspect_ratio)?;
        let row_padding = check_extent("grid row padding", self.padding.major)?;
        let (columns, cell_minor) =
            calculate_columns(self.minimum_minor, self.padding.minor, minor_extent)?;
        let cell_major = cell_minor / aspect_ratio;

        let items: Vec<_> = (0..count)
            .map(|index| {
                let row = index / columns;
                let column = index % columns;
                LayoutAttributes::new(Rect::new(
                    Point::new(
                        origin.major + row as f64 * (cell_major + row_padding),
                        origin.minor + column as f64 * (cell_minor + self.padding.minor),
                    ),
                    Size::new(cell_major, cell_minor),
                ))
            })
            .collect();

        let final_offset = items
            .last()
            .map(|last| last.frame.max_major())
            .unwrap_or(origin.major);
        Ok(LayoutResult::new(items, final_offset))
    }
}

impl Module {
    /// Uniform grid. See [`Grid`].
    pub fn grid(minimum_minor: f64, padding: Size, aspect_ratio: f64) -> Self {
        Self::new(Grid::new(minimum_minor, padding, aspect_ratio))
    }
}
