use std::sync::Arc;

use crate::{Axis, Module};

/// Row extent of the fallback table used for sections without a module.
pub const DEFAULT_ROW_EXTENT: f64 = 44.0;

/// Resolves the module for a section index. `None` selects the fallback table.
///
/// Called on every layout pass; the result is never cached across passes, so a lookup may
/// return different modules after bounds or content changes.
pub type ModuleLookup = Arc<dyn Fn(usize) -> Option<Module> + Send + Sync>;

/// Configuration for [`crate::CollectionLayout`].
///
/// Cheap to clone: the lookup is held in an `Arc`, so callers can tweak a field and hand the
/// options back through `set_options` without rebuilding closures.
#[derive(Clone)]
pub struct LayoutOptions {
    /// The scroll axis shared by every section.
    pub major_axis: Axis,
    pub module_for_section: Option<ModuleLookup>,
    /// Row extent of the fallback table.
    pub default_row_extent: f64,
}

impl LayoutOptions {
    pub fn new(major_axis: Axis) -> Self {
        Self {
            major_axis,
            module_for_section: None,
            default_row_extent: DEFAULT_ROW_EXTENT,
        }
    }

    pub fn with_major_axis(mut self, major_axis: Axis) -> Self {
        self.major_axis = major_axis;
        self
    }

    pub fn with_module_for_section(
        mut self,
        module_for_section: impl Fn(usize) -> Option<Module> + Send + Sync + 'static,
    ) -> Self {
        self.module_for_section = Some(Arc::new(module_for_section));
        self
    }

    /// Uses `module` for every section.
    pub fn with_module(self, module: Module) -> Self {
        self.with_module_for_section(move |_| Some(module.clone()))
    }

    /// Uses `modules[section]`; sections past the end fall back to the default table.
    pub fn with_modules(self, modules: impl Into<Arc<[Module]>>) -> Self {
        let modules: Arc<[Module]> = modules.into();
        self.with_module_for_section(move |section| modules.get(section).cloned())
    }

    pub fn with_default_row_extent(mut self, default_row_extent: f64) -> Self {
        self.default_row_extent = default_row_extent;
        self
    }

    /// Resolves the module for `section`, applying the fallback.
    pub fn resolve_module(&self, section: usize) -> Module {
        self.module_for_section
            .as_ref()
            .and_then(|lookup| lookup(section))
            .unwrap_or_else(|| Module::table(self.default_row_extent, 0.0))
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new(Axis::Vertical)
    }
}

impl core::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("major_axis", &self.major_axis)
            .field("default_row_extent", &self.default_row_extent)
            .finish_non_exhaustive()
    }
}
