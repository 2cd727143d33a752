//! Decorators that derive a new module from an existing one.
//!
//! None of these touch the wrapped module: each holds a clone of the [`Module`] handle and
//! forwards whatever it does not change, including transition hooks.

use std::sync::Arc;

use crate::error::LayoutError;
use crate::module::TransitionFn;
use crate::{Axis, IndexPath, LayoutAttributes, LayoutModule, LayoutResult, Module, Point, Result};

/// Edge insets in axis-agnostic space. Omitted edges stay at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub min_major: f64,
    pub max_major: f64,
    pub min_minor: f64,
    pub max_minor: f64,
}

impl Insets {
    pub const fn new(min_major: f64, max_major: f64, min_minor: f64, max_minor: f64) -> Self {
        Self {
            min_major,
            max_major,
            min_minor,
            max_minor,
        }
    }

    /// The same inset on every edge.
    pub const fn all(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub const fn major(min: f64, max: f64) -> Self {
        Self::new(min, max, 0.0, 0.0)
    }

    pub const fn minor(min: f64, max: f64) -> Self {
        Self::new(0.0, 0.0, min, max)
    }
}

/// Shrinks the working area of a module.
///
/// The leading insets move the origin, the minor insets reduce the minor extent, and
/// `max_major` is added to the final offset so the trailing space is reserved before the next
/// section.
#[derive(Clone, Debug)]
pub struct Inset {
    pub module: Module,
    pub insets: Insets,
}

impl LayoutModule for Inset {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        let Insets {
            min_major,
            max_major,
            min_minor,
            max_minor,
        } = self.insets;
        let inset_extent = minor_extent - min_minor - max_minor;
        if !inset_extent.is_finite() || inset_extent < 0.0 {
            return Err(LayoutError::invalid("inset minor extent", inset_extent));
        }

        let result = self.module.layout(
            count,
            origin.offset(min_major, min_minor),
            axis,
            inset_extent,
        )?;
        Ok(LayoutResult::new(
            result.items,
            result.final_offset + max_major,
        ))
    }

    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.module.initial_attributes(index_path, axis, attributes)
    }

    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.module.final_attributes(index_path, axis, attributes)
    }
}

/// Shifts the origin handed to a module. The final offset is passed through untouched, so
/// following sections do not move.
#[derive(Clone, Debug)]
pub struct Translate {
    pub module: Module,
    pub major: f64,
    pub minor: f64,
}

impl LayoutModule for Translate {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        self.module.layout(
            count,
            origin.offset(self.major, self.minor),
            axis,
            minor_extent,
        )
    }

    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.module.initial_attributes(index_path, axis, attributes)
    }

    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        self.module.final_attributes(index_path, axis, attributes)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    /// The item is being inserted.
    Initial,
    /// The item is being removed.
    Final,
}

/// Replaces one transition hook of a module.
#[derive(Clone)]
pub struct WithTransition {
    pub module: Module,
    pub phase: TransitionPhase,
    pub transition: TransitionFn,
}

impl LayoutModule for WithTransition {
    fn layout(
        &self,
        count: usize,
        origin: Point,
        axis: Axis,
        minor_extent: f64,
    ) -> Result<LayoutResult> {
        self.module.layout(count, origin, axis, minor_extent)
    }

    fn initial_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        match self.phase {
            TransitionPhase::Initial => (self.transition)(index_path, attributes),
            TransitionPhase::Final => self.module.initial_attributes(index_path, axis, attributes),
        }
    }

    fn final_attributes(
        &self,
        index_path: IndexPath,
        axis: Axis,
        attributes: &LayoutAttributes,
    ) -> Option<LayoutAttributes> {
        match self.phase {
            TransitionPhase::Final => (self.transition)(index_path, attributes),
            TransitionPhase::Initial => self.module.final_attributes(index_path, axis, attributes),
        }
    }
}

impl Module {
    /// See [`Inset`].
    pub fn inset(&self, insets: Insets) -> Module {
        Module::new(Inset {
            module: self.clone(),
            insets,
        })
    }

    /// See [`Translate`].
    pub fn translate(&self, major: f64, minor: f64) -> Module {
        Module::new(Translate {
            module: self.clone(),
            major,
            minor,
        })
    }

    /// Returns a module whose initial (appearing) transition is `transition`.
    pub fn with_initial_transition(
        &self,
        transition: impl Fn(IndexPath, &LayoutAttributes) -> Option<LayoutAttributes>
        + Send
        + Sync
        + 'static,
    ) -> Module {
        Module::new(WithTransition {
            module: self.clone(),
            phase: TransitionPhase::Initial,
            transition: Arc::new(transition),
        })
    }

    /// Returns a module whose final (disappearing) transition is `transition`.
    pub fn with_final_transition(
        &self,
        transition: impl Fn(IndexPath, &LayoutAttributes) -> Option<LayoutAttributes>
        + Send
        + Sync
        + 'static,
    ) -> Module {
        Module::new(WithTransition {
            module: self.clone(),
            phase: TransitionPhase::Final,
            transition: Arc::new(transition),
        })
    }
}
