use std::sync::Arc;

use crate::{Axis, IndexPath, LayoutAttributes, LayoutResult, Point, Result};

/// Computes one dimension of an item: `(index, axis, other_dimension) -> dimension`.
///
/// For tables `other_dimension` is the module's minor extent; for masonry it is the cell minor
/// extent. The function must be pure: a layout pass may call it any number of times.
pub type CalculateDimension = Arc<dyn Fn(usize, Axis, f64) -> f64 + Send + Sync>;

/// Produces alternate attributes for an appearing or disappearing item.
///
/// Receives the item's steady-state attributes. Returning `None` means "animate from/to the
/// steady state unmodified".
pub type TransitionFn =
    Arc<dyn Fn(IndexPath, &LayoutAttributes) -> Option<LayoutAttributes> + Send + Sync>;

/// An arrangement algorithm for one section.
///
/// Implementations are immutable values: combinators wrap a module and return a new one, so a
/// single module can be shared by any number of sections (and threads).
pub trait LayoutModule: Send + Sync {
    /// Arranges `count` items starting at `origin`, with `minor_extent` available on the minor
    /// axis. The result must hold exactly `count` attributes.
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult>;

    /// Attributes for an item that is being inserted. Defaults to `None`.
    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        let _ = (index_path, axis, attributes);
        None
    }

    /// Attributes for an item that is being removed. Defaults to `None`.
    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        let _ = (index_path, axis, attributes);
        None
    }
}

/// A type-erased, cheaply cloneable [`LayoutModule`].
///
/// All built-in algorithms and combinators are exposed as constructors and methods on this type:
///
/// ```
/// use layout_modules::{Insets, Module};
///
/// let module = Module::table(44.0, 1.0).inset(Insets::all(10.0));
/// # let _ = module;
/// ```
#[derive(Clone)]
pub struct Module {
    inner: Arc<dyn LayoutModule>,
}

impl Module {
    /// Erases a custom module implementation.
    pub fn new(module: impl LayoutModule + 'static) -> Self {
        Self {
            inner: Arc::new(module),
        }
    }

    /// Builds a module from a bare arrangement function, with no transitions.
    pub fn from_fn(
        layout: impl Fn(usize, Point, Axis, f64) -> Result<LayoutResult> + Send + Sync + 'static,
    ) -> Self {
        Self::new(FnModule {
            layout: Arc::new(layout),
        })
    }

    /// Returns `true` when both values share the same underlying module.
    pub fn ptr_eq(&self, other: &Module) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl LayoutModule for Module {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        self.inner.layout(count, origin, axis, minor_extent)
    }

    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.inner.initial_attributes(index_path, axis, attributes)
    }

    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.inner.final_attributes(index_path, axis, attributes)
    }
}

impl core::fmt::Debug for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Module(..)")
    }
}

type LayoutFn = Arc<dyn Fn(usize, Point, Axis, f64) -> Result<LayoutResult> + Send + Sync>;

struct FnModule {
    layout: LayoutFn,
}

impl LayoutModule for FnModule {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        (self.layout)(count, origin, axis, minor_extent)
    }
}
