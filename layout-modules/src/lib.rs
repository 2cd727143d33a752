//! Composable, axis-agnostic item arrangement for sectioned collection views.
//!
//! For host-side helpers (a controller that owns collection state, transition tweens), see the
//! `layout-modules-adapter` crate.
//!
//! A collection is a list of sections; each section is laid out by a [`Module`], an immutable
//! arrangement algorithm such as a [table](Module::table), a [grid](Module::grid) or a
//! [masonry](Module::masonry) layout. Modules work in `major`/`minor` coordinates, so the same
//! module serves vertical and horizontal scrollers, and compose through
//! [`Module::inset`], [`Module::translate`] and the transition attachments.
//!
//! [`CollectionLayout`] threads the sections together: each section starts where the previous
//! one ended on the major axis. It publishes an immutable [`LayoutSnapshot`] answering
//! index-path and viewport-rect queries.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - section and item counts
//! - the viewport size (only its minor extent affects layout)
//! - invalidation when content, the module lookup or the axis changes
//!
//! ```
//! use layout_modules::{
//!     CollectionLayout, CollectionState, IndexPath, Insets, LayoutOptions, Module,
//!     PhysicalSize, Size,
//! };
//!
//! let options = LayoutOptions::default().with_modules(vec![
//!     Module::table(44.0, 1.0),
//!     Module::grid(80.0, Size::new(1.0, 1.0), 1.0).inset(Insets::all(10.0)),
//! ]);
//! let mut layout = CollectionLayout::new(options);
//! let state = CollectionState::new(vec![3, 8], PhysicalSize::new(400.0, 800.0));
//!
//! let snapshot = layout.prepare(&state)?;
//! assert_eq!(snapshot.section_origin(1)?.major, 134.0);
//! assert_eq!(snapshot.attributes(IndexPath::new(0, 1))?.frame.origin.y, 45.0);
//! # Ok::<(), layout_modules::LayoutError>(())
//! ```
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod attributes;
mod axis;
mod columns;
mod combinators;
mod error;
mod geometry;
mod grid;
mod index;
mod layout;
mod masonry;
mod module;
mod options;
mod state;
mod table;
mod transform;

#[cfg(test)]
mod tests;

pub use attributes::{LayoutAttributes, LayoutResult, PhysicalAttributes};
pub use axis::ForMajorAxis;
pub use columns::calculate_columns;
pub use combinators::{Inset, Insets, Translate, TransitionPhase, WithTransition};
pub use error::{LayoutError, Result};
pub use geometry::{
    Axis, IndexPath, PhysicalPoint, PhysicalRect, PhysicalSize, Point, Rect, Size,
};
pub use grid::Grid;
pub use layout::{CollectionLayout, LayoutSnapshot, LayoutState};
pub use masonry::Masonry;
pub use module::{CalculateDimension, LayoutModule, Module, TransitionFn};
pub use options::{DEFAULT_ROW_EXTENT, LayoutOptions, ModuleLookup};
pub use state::{CollectionState, LayoutSource};
pub use table::Table;
pub use transform::{AffineTransform, Transform3D};
