use std::sync::Arc;

use layout_modules::{
    Axis, CollectionLayout, CollectionState, IndexPath, LayoutOptions, LayoutSnapshot,
    PhysicalAttributes, PhysicalRect, PhysicalSize, Result, TransitionPhase,
};

use crate::{AttributeTween, Easing};

/// A framework-neutral controller that owns a `layout_modules::CollectionLayout` together with
/// the collection state it lays out, and drives insert/remove transitions.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `insert_item` / `remove_item` when the data source changes
/// - `tick(now_ms)` each frame/timer tick, applying the returned attributes to item views
#[derive(Clone, Debug)]
pub struct Controller {
    layout: CollectionLayout,
    state: CollectionState,
    scroll_offset: f64,
    tweens: Vec<AttributeTween>,
}

impl Controller {
    pub fn new(options: LayoutOptions, state: CollectionState) -> Self {
        Self::from_parts(CollectionLayout::new(options), state)
    }

    pub fn from_parts(layout: CollectionLayout, state: CollectionState) -> Self {
        Self {
            layout,
            state,
            scroll_offset: 0.0,
            tweens: Vec::new(),
        }
    }

    pub fn layout(&self) -> &CollectionLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut CollectionLayout {
        &mut self.layout
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    /// Edits the collection state without animation and invalidates the layout.
    pub fn update_state(&mut self, f: impl FnOnce(&mut CollectionState)) {
        f(&mut self.state);
        self.layout.invalidate();
    }

    pub fn into_parts(self) -> (CollectionLayout, CollectionState) {
        (self.layout, self.state)
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn active_tweens(&self) -> &[AttributeTween] {
        &self.tweens
    }

    pub fn cancel_animations(&mut self) {
        self.tweens.clear();
    }

    /// Stores the new viewport size. Returns `true` when the minor extent changed and the next
    /// query will re-run the layout.
    pub fn on_viewport_size(&mut self, size: PhysicalSize) -> bool {
        self.state.viewport = size;
        self.layout.apply_bounds_change(size)
    }

    /// Stores the major-axis scroll offset reported by the UI. Never invalidates the layout.
    pub fn on_scroll(&mut self, scroll_offset: f64) {
        self.scroll_offset = scroll_offset;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn prepare(&mut self) -> Result<Arc<LayoutSnapshot>> {
        self.layout.prepare(&self.state)
    }

    /// The viewport in content coordinates at the current scroll offset.
    pub fn viewport_rect(&self) -> PhysicalRect {
        let PhysicalSize { width, height } = self.state.viewport;
        match self.layout.major_axis() {
            Axis::Vertical => PhysicalRect::from_xywh(0.0, self.scroll_offset, width, height),
            Axis::Horizontal => PhysicalRect::from_xywh(self.scroll_offset, 0.0, width, height),
        }
    }

    /// Steady-state attributes of every item intersecting the viewport, in index-path order.
    pub fn visible_items(&mut self) -> Result<Vec<(IndexPath, PhysicalAttributes)>> {
        let rect = self.viewport_rect();
        Ok(self.prepare()?.items_in_rect(rect))
    }

    /// Inserts an item at `path` and starts its appearance transition.
    ///
    /// Active appearance tweens in the section are re-indexed past the new item and every
    /// appearance tween is re-targeted at its new steady state. If the pass fails, the insertion
    /// is rolled back and the error returned.
    ///
    /// Returns `true` when the section's module supplied initial attributes and a tween was
    /// started; otherwise the item simply appears at its steady state.
    pub fn insert_item(
        &mut self,
        path: IndexPath,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Result<bool> {
        self.state.insert_item(path)?;
        self.layout.invalidate();

        let steady = match self.layout.attributes_for_item(&self.state, path) {
            Ok(steady) => steady,
            Err(err) => {
                self.state.remove_item(path)?;
                self.layout.invalidate();
                return Err(err);
            }
        };

        for tween in self.appearing_in(path.section) {
            if tween.path.item >= path.item {
                tween.path.item += 1;
            }
        }
        self.retarget_appearing();

        let Some(initial) = self
            .layout
            .initial_attributes_for_appearing_item(path, &steady)
        else {
            return Ok(false);
        };

        adebug!(section = path.section, item = path.item, "insert_item: tween started");
        self.tweens.push(AttributeTween::new(
            path,
            TransitionPhase::Initial,
            initial,
            steady,
            now_ms,
            duration_ms,
            easing,
        ));
        Ok(true)
    }

    /// Removes the item at `path` and starts its disappearance transition from its outgoing
    /// steady state.
    ///
    /// An appearance tween for the removed item is dropped; later ones in the section move down
    /// one index and all are re-targeted. Disappearance tweens keep the path the item had when
    /// it was removed.
    ///
    /// Returns `true` when the section's module supplied final attributes and a tween was
    /// started.
    pub fn remove_item(
        &mut self,
        path: IndexPath,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Result<bool> {
        let steady = self.layout.attributes_for_item(&self.state, path)?;
        let target = self
            .layout
            .final_attributes_for_disappearing_item(path, &steady);

        self.state.remove_item(path)?;
        self.layout.invalidate();

        self.tweens.retain(|tween| {
            tween.phase != TransitionPhase::Initial || tween.path != path
        });
        for tween in self.appearing_in(path.section) {
            if tween.path.item > path.item {
                tween.path.item -= 1;
            }
        }
        self.retarget_appearing();

        let Some(target) = target else {
            return Ok(false);
        };

        adebug!(section = path.section, item = path.item, "remove_item: tween started");
        self.tweens.push(AttributeTween::new(
            path,
            TransitionPhase::Final,
            steady,
            target,
            now_ms,
            duration_ms,
            easing,
        ));
        Ok(true)
    }

    fn appearing_in(&mut self, section: usize) -> impl Iterator<Item = &mut AttributeTween> {
        self.tweens.iter_mut().filter(move |tween| {
            tween.phase == TransitionPhase::Initial && tween.path.section == section
        })
    }

    /// Points appearance tweens at their steady state in the current layout. When the pass
    /// fails the targets are left as they were; the error surfaces on the next query.
    fn retarget_appearing(&mut self) {
        if !self.tweens.iter().any(|t| t.phase == TransitionPhase::Initial) {
            return;
        }
        let Ok(snapshot) = self.layout.prepare(&self.state) else {
            return;
        };
        for tween in &mut self.tweens {
            if tween.phase != TransitionPhase::Initial {
                continue;
            }
            if let Ok(steady) = snapshot.attributes(tween.path) {
                tween.to = steady;
            }
        }
    }

    /// Advances every active tween.
    ///
    /// Returns the presented attributes of each tween at `now_ms`, in start order. Tweens that
    /// completed are reported once with their target attributes and then dropped.
    pub fn tick(&mut self, now_ms: u64) -> Vec<(IndexPath, TransitionPhase, PhysicalAttributes)> {
        let frames = self
            .tweens
            .iter()
            .map(|tween| (tween.path, tween.phase, tween.sample(now_ms)))
            .collect();
        self.tweens.retain(|tween| !tween.is_done(now_ms));
        frames
    }
}
