use std::sync::Arc;

use crate::index::SpatialIndex;
use crate::{
    Axis, IndexPath, LayoutAttributes, LayoutError, LayoutModule, LayoutOptions, LayoutSource,
    Module, PhysicalAttributes, PhysicalRect, PhysicalSize, Point, Rect, Result, Size,
};

/// Whether the published snapshot still matches the layout inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutState {
    /// A pass is required before queries are answered.
    Stale,
    /// The published snapshot is valid for the current inputs.
    Fresh,
}

#[derive(Clone, Debug, PartialEq)]
struct SectionLayout {
    origin: Point,
    final_offset: f64,
    items: Vec<PhysicalAttributes>,
    first_ordinal: usize,
}

/// The immutable output of one layout pass.
///
/// Snapshots are published behind an `Arc` and never modified, so any number of readers can
/// query one while the owning [`CollectionLayout`] computes the next.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    axis: Axis,
    minor_extent: f64,
    content_size: PhysicalSize,
    sections: Vec<SectionLayout>,
    paths: Vec<IndexPath>, // flat ordinal -> index path
    index: SpatialIndex,
}

impl LayoutSnapshot {
    /// Runs a full layout pass. This is a pure function of its inputs.
    pub fn compute(options: &LayoutOptions, source: &impl LayoutSource) -> Result<Self> {
        let axis = options.major_axis;
        let minor_extent = minor_extent_of(source.viewport_size(), axis);
        let section_count = source.section_count();
        ldebug!(?axis, minor_extent, section_count, "layout pass");

        let mut origin = Point::ZERO;
        let mut sections = Vec::with_capacity(section_count);
        let mut paths = Vec::new();
        let mut frames = Vec::new();

        for section in 0..section_count {
            let module = options.resolve_module(section);
            let count = source.item_count(section);
            let result = module.layout(count, origin, axis, minor_extent)?;
            debug_assert_eq!(
                result.items.len(),
                count,
                "module returned {} attributes for {count} items",
                result.items.len()
            );
            ltrace!(
                section,
                count,
                origin_major = origin.major,
                final_offset = result.final_offset,
                "section laid out"
            );

            let first_ordinal = paths.len();
            let mut items = Vec::with_capacity(result.items.len());
            for (item, attributes) in result.items.into_iter().enumerate() {
                paths.push(IndexPath::new(section, item));
                frames.push(attributes.frame);
                items.push(attributes.to_physical(axis));
            }

            sections.push(SectionLayout {
                origin,
                final_offset: result.final_offset,
                items,
                first_ordinal,
            });
            origin.major = result.final_offset;
        }

        let content_size = Size::new(origin.major, minor_extent).to_physical(axis);
        ldebug!(
            items = paths.len(),
            content_width = content_size.width,
            content_height = content_size.height,
            "layout pass finished"
        );

        Ok(Self {
            axis,
            minor_extent,
            content_size,
            sections,
            paths,
            index: SpatialIndex::build(&frames),
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn minor_extent(&self) -> f64 {
        self.minor_extent
    }

    /// Scrollable content size: the last section's final offset by the minor extent.
    pub fn content_size(&self) -> PhysicalSize {
        self.content_size
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items across all sections.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn item_count(&self, section: usize) -> Result<usize> {
        self.section(section).map(|s| s.items.len())
    }

    /// The origin the section's module was invoked with.
    pub fn section_origin(&self, section: usize) -> Result<Point> {
        self.section(section).map(|s| s.origin)
    }

    pub fn section_final_offset(&self, section: usize) -> Result<f64> {
        self.section(section).map(|s| s.final_offset)
    }

    pub fn attributes(&self, path: IndexPath) -> Result<PhysicalAttributes> {
        self.sections
            .get(path.section)
            .and_then(|s| s.items.get(path.item))
            .copied()
            .ok_or(LayoutError::IndexOutOfRange {
                section: path.section,
                item: path.item,
            })
    }

    /// Visits every item in index-path order.
    pub fn for_each_item(&self, mut f: impl FnMut(IndexPath, &PhysicalAttributes)) {
        for (section, layout) in self.sections.iter().enumerate() {
            for (item, attributes) in layout.items.iter().enumerate() {
                f(IndexPath::new(section, item), attributes);
            }
        }
    }

    /// Visits every item whose frame intersects `rect`, in index-path order.
    pub fn for_each_item_in_rect(
        &self,
        rect: PhysicalRect,
        mut f: impl FnMut(IndexPath, &PhysicalAttributes),
    ) {
        if rect.is_empty() {
            return;
        }
        let query = Rect::from_physical(rect, self.axis);
        let mut hits = Vec::new();
        self.index
            .for_each_candidate(query.min_major(), query.max_major(), |ordinal| {
                hits.push(ordinal)
            });
        hits.sort_unstable();

        for ordinal in hits {
            let path = self.paths[ordinal];
            let section = &self.sections[path.section];
            debug_assert_eq!(section.first_ordinal + path.item, ordinal);
            let attributes = &section.items[path.item];
            if attributes.frame.intersects(&rect) {
                f(path, attributes);
            }
        }
    }

    /// Collects the items intersecting `rect` into `out` (clears `out` first).
    pub fn collect_items_in_rect(
        &self,
        rect: PhysicalRect,
        out: &mut Vec<(IndexPath, PhysicalAttributes)>,
    ) {
        out.clear();
        self.for_each_item_in_rect(rect, |path, attributes| out.push((path, *attributes)));
    }

    pub fn items_in_rect(&self, rect: PhysicalRect) -> Vec<(IndexPath, PhysicalAttributes)> {
        let mut out = Vec::new();
        self.collect_items_in_rect(rect, &mut out);
        out
    }

    fn section(&self, section: usize) -> Result<&SectionLayout> {
        self.sections
            .get(section)
            .ok_or(LayoutError::SectionOutOfRange { section })
    }
}

/// Drives layout passes for a sectioned collection and caches the last result.
///
/// The layout is either [`LayoutState::Stale`] or [`LayoutState::Fresh`]. Changing the axis,
/// the options, or the module lookup (or calling [`CollectionLayout::invalidate`]) marks it
/// stale; [`CollectionLayout::prepare`] runs a pass when stale and publishes a new
/// [`LayoutSnapshot`]. A viewport change that alters the minor extent is detected by `prepare`
/// on its own; changes along the major axis never require a pass.
#[derive(Clone, Debug)]
pub struct CollectionLayout {
    options: LayoutOptions,
    state: LayoutState,
    snapshot: Option<Arc<LayoutSnapshot>>,
}

impl CollectionLayout {
    pub fn new(options: LayoutOptions) -> Self {
        ldebug!(axis = ?options.major_axis, "CollectionLayout::new");
        Self {
            options,
            state: LayoutState::Stale,
            snapshot: None,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut LayoutOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn major_axis(&self) -> Axis {
        self.options.major_axis
    }

    pub fn set_major_axis(&mut self, axis: Axis) {
        if self.options.major_axis == axis {
            return;
        }
        self.options.major_axis = axis;
        self.invalidate();
    }

    pub fn set_module_for_section(
        &mut self,
        module_for_section: impl Fn(usize) -> Option<Module> + Send + Sync + 'static,
    ) {
        self.options.module_for_section = Some(Arc::new(module_for_section));
        self.invalidate();
    }

    /// Marks the published snapshot stale; the next query runs a fresh pass.
    pub fn invalidate(&mut self) {
        if self.state == LayoutState::Fresh {
            ltrace!("layout invalidated");
        }
        self.state = LayoutState::Stale;
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn is_stale(&self) -> bool {
        self.state == LayoutState::Stale
    }

    /// Returns `true` when a viewport of `size` would need a new pass: only a change of the
    /// minor extent qualifies.
    pub fn should_invalidate_for_bounds_change(&self, size: PhysicalSize) -> bool {
        match &self.snapshot {
            Some(snapshot) => {
                snapshot.axis != self.options.major_axis
                    || snapshot.minor_extent != minor_extent_of(size, self.options.major_axis)
            }
            None => true,
        }
    }

    /// Invalidates when `size` changes the minor extent. Returns whether it did.
    pub fn apply_bounds_change(&mut self, size: PhysicalSize) -> bool {
        let invalidate = self.should_invalidate_for_bounds_change(size);
        if invalidate {
            self.invalidate();
        }
        invalidate
    }

    /// The last published snapshot, which may be stale.
    pub fn snapshot(&self) -> Option<&Arc<LayoutSnapshot>> {
        self.snapshot.as_ref()
    }

    /// Ensures the snapshot is fresh for `source`, running a pass if needed.
    ///
    /// On error the layout stays stale and the previously published snapshot is kept.
    pub fn prepare(&mut self, source: &impl LayoutSource) -> Result<Arc<LayoutSnapshot>> {
        if self.state == LayoutState::Fresh
            && !self.should_invalidate_for_bounds_change(source.viewport_size())
        {
            if let Some(snapshot) = &self.snapshot {
                return Ok(Arc::clone(snapshot));
            }
        }

        let snapshot = Arc::new(LayoutSnapshot::compute(&self.options, source)?);
        self.snapshot = Some(Arc::clone(&snapshot));
        self.state = LayoutState::Fresh;
        Ok(snapshot)
    }

    pub fn content_size(&mut self, source: &impl LayoutSource) -> Result<PhysicalSize> {
        Ok(self.prepare(source)?.content_size())
    }

    pub fn attributes_for_item(
        &mut self,
        source: &impl LayoutSource,
        path: IndexPath,
    ) -> Result<PhysicalAttributes> {
        self.prepare(source)?.attributes(path)
    }

    pub fn attributes_in_rect(
        &mut self,
        source: &impl LayoutSource,
        rect: PhysicalRect,
    ) -> Result<Vec<(IndexPath, PhysicalAttributes)>> {
        Ok(self.prepare(source)?.items_in_rect(rect))
    }

    /// The module that lays out `section`, after applying the fallback.
    pub fn module_for_section(&self, section: usize) -> Module {
        self.options.resolve_module(section)
    }

    /// Transition attributes for an item being inserted at `path`.
    ///
    /// `steady` is the item's attributes in the current pass. `None` means the host should use
    /// `steady` unmodified.
    pub fn initial_attributes_for_appearing_item(
        &self,
        path: IndexPath,
        steady: &PhysicalAttributes,
    ) -> Option<PhysicalAttributes> {
        let axis = self.options.major_axis;
        let attributes = LayoutAttributes::from_physical(*steady, axis);
        self.module_for_section(path.section)
            .initial_attributes(path, axis, &attributes)
            .map(|a| a.to_physical(axis))
    }

    /// Transition attributes for an item being removed from `path`.
    ///
    /// `steady` is the item's attributes in the outgoing pass. `None` means the host should use
    /// `steady` unmodified.
    pub fn final_attributes_for_disappearing_item(
        &self,
        path: IndexPath,
        steady: &PhysicalAttributes,
    ) -> Option<PhysicalAttributes> {
        let axis = self.options.major_axis;
        let attributes = LayoutAttributes::from_physical(*steady, axis);
        self.module_for_section(path.section)
            .final_attributes(path, axis, &attributes)
            .map(|a| a.to_physical(axis))
    }
}

impl Default for CollectionLayout {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

fn minor_extent_of(viewport: PhysicalSize, axis: Axis) -> f64 {
    Size::from_physical(viewport, axis).minor
}
