use crate::{IndexPath, LayoutError, PhysicalSize, Result};

/// What the host collection view tells the layout on each pass.
pub trait LayoutSource {
    fn section_count(&self) -> usize;

    fn item_count(&self, section: usize) -> usize;

    /// The size of the visible viewport. Only the minor-axis component affects layout.
    fn viewport_size(&self) -> PhysicalSize;
}

impl<T: LayoutSource + ?Sized> LayoutSource for &T {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }

    fn viewport_size(&self) -> PhysicalSize {
        (**self).viewport_size()
    }
}

/// A plain snapshot of host collection state: per-section item counts and the viewport size.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionState {
    pub sections: Vec<usize>,
    pub viewport: PhysicalSize,
}

impl CollectionState {
    pub fn new(sections: impl Into<Vec<usize>>, viewport: PhysicalSize) -> Self {
        Self {
            sections: sections.into(),
            viewport,
        }
    }

    pub fn push_section(&mut self, item_count: usize) {
        self.sections.push(item_count);
    }

    pub fn set_item_count(&mut self, section: usize, item_count: usize) -> Result<()> {
        let count = self
            .sections
            .get_mut(section)
            .ok_or(LayoutError::SectionOutOfRange { section })?;
        *count = item_count;
        Ok(())
    }

    /// Inserts an item at `path`; `path.item` may equal the current count (append).
    pub fn insert_item(&mut self, path: IndexPath) -> Result<()> {
        let count = self
            .sections
            .get_mut(path.section)
            .ok_or(LayoutError::SectionOutOfRange {
                section: path.section,
            })?;
        if path.item > *count {
            return Err(LayoutError::IndexOutOfRange {
                section: path.section,
                item: path.item,
            });
        }
        *count += 1;
        Ok(())
    }

    pub fn remove_item(&mut self, path: IndexPath) -> Result<()> {
        let count = self
            .sections
            .get_mut(path.section)
            .ok_or(LayoutError::SectionOutOfRange {
                section: path.section,
            })?;
        if path.item >= *count {
            return Err(LayoutError::IndexOutOfRange {
                section: path.section,
                item: path.item,
            });
        }
        *count -= 1;
        Ok(())
    }
}

impl LayoutSource for CollectionState {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    fn viewport_size(&self) -> PhysicalSize {
        self.viewport
    }
}
