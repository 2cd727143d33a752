use crate::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

fn viewport(width: f64, height: f64) -> PhysicalSize {
    PhysicalSize::new(width, height)
}

fn majors(result: &LayoutResult) -> Vec<f64> {
    result.items.iter().map(|a| a.frame.origin.major).collect()
}

fn brute_force_in_rect(
    snapshot: &LayoutSnapshot,
    rect: PhysicalRect,
) -> Vec<(IndexPath, PhysicalAttributes)> {
    let mut out = Vec::new();
    snapshot.for_each_item(|path, attributes| {
        if attributes.frame.intersects(&rect) {
            out.push((path, *attributes));
        }
    });
    out
}

fn mixed_modules() -> Vec<Module> {
    vec![
        Module::table(44.0, 1.0),
        Module::grid(80.0, Size::new(10.0, 10.0), 1.0).inset(Insets::major(10.0, 0.0)),
        Module::masonry(80.0, Size::new(1.0, 1.0), |i, _, width| {
            (2.0 / ((i % 4) as f64 + 1.0) * width).round()
        })
        .inset(Insets::all(10.0)),
        Module::dynamic_table(1.0, |i, _, _| ((i + 1) * 10) as f64),
        Module::grid(50.0, Size::new(10.0, 10.0), 4.0 / 3.0),
    ]
}

#[test]
fn vertical_axis_maps_major_to_y() {
    let p = Point::new(10.0, 3.0);
    assert_eq!(p.to_physical(Axis::Vertical), PhysicalPoint::new(3.0, 10.0));
    assert_eq!(p.to_physical(Axis::Horizontal), PhysicalPoint::new(10.0, 3.0));

    let s = Size::from_physical(PhysicalSize::new(320.0, 480.0), Axis::Vertical);
    assert_eq!(s, Size::new(480.0, 320.0));
    let s = Size::from_physical(PhysicalSize::new(320.0, 480.0), Axis::Horizontal);
    assert_eq!(s, Size::new(320.0, 480.0));
}

#[test]
fn physical_rects_touching_an_edge_do_not_intersect() {
    let a = PhysicalRect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let b = PhysicalRect::from_xywh(10.0, 0.0, 10.0, 10.0);
    let c = PhysicalRect::from_xywh(9.5, 9.5, 1.0, 1.0);
    let empty = PhysicalRect::from_xywh(5.0, 5.0, 0.0, 10.0);
    assert!(!a.intersects(&b));
    assert!(a.intersects(&c));
    assert!(b.intersects(&c));
    assert!(!a.intersects(&empty));
}

#[test]
fn calculate_columns_picks_the_largest_fitting_count() {
    // 80*5 + 4 = 404 > 400, 80*4 + 3 = 323 <= 400, (400 - 3) / 4 = 99.25
    assert_eq!(calculate_columns(80.0, 1.0, 400.0), Ok((4, 99.0)));
    // Exact fit counts.
    assert_eq!(calculate_columns(100.0, 0.0, 400.0), Ok((4, 100.0)));
    assert_eq!(calculate_columns(50.0, 10.0, 400.0), Ok((6, 58.0)));
}

#[test]
fn calculate_columns_never_returns_zero_columns() {
    assert_eq!(calculate_columns(80.0, 1.0, 50.4), Ok((1, 50.0)));
    assert_eq!(calculate_columns(80.0, 1.0, 0.0), Ok((1, 0.0)));
}

#[test]
fn calculate_columns_rejects_degenerate_inputs() {
    assert!(matches!(
        calculate_columns(0.0, 1.0, 400.0),
        Err(LayoutError::InvalidExtent { .. })
    ));
    assert!(matches!(
        calculate_columns(-5.0, 1.0, 400.0),
        Err(LayoutError::InvalidExtent { .. })
    ));
    assert!(matches!(
        calculate_columns(80.0, 1.0, f64::INFINITY),
        Err(LayoutError::InvalidExtent { .. })
    ));
    assert!(matches!(
        calculate_columns(80.0, -1.0, 400.0),
        Err(LayoutError::InvalidExtent { .. })
    ));
}

#[test]
fn calculate_columns_handles_huge_ratios_without_looping() {
    let (count, cell) = calculate_columns(0.25, 0.0, 1e6).unwrap();
    assert_eq!(count, 4_000_000);
    assert_eq!(cell, 0.0);
}

#[test]
fn fixed_table_stacks_rows_with_padding_between() {
    let m = Module::table(44.0, 1.0);
    let r = m.layout(3, Point::ZERO, Axis::Vertical, 320.0).unwrap();
    assert_eq!(majors(&r), vec![0.0, 45.0, 90.0]);
    assert!(r.items.iter().all(|a| a.frame.size == Size::new(44.0, 320.0)));
    assert_eq!(r.final_offset, 134.0);
}

#[test]
fn table_respects_origin_and_empty_sections() {
    let m = Module::table(44.0, 1.0);
    let r = m
        .layout(2, Point::new(100.0, 7.0), Axis::Vertical, 50.0)
        .unwrap();
    assert_eq!(r.items[0].frame.origin, Point::new(100.0, 7.0));
    assert_eq!(r.items[1].frame.origin, Point::new(145.0, 7.0));
    assert_eq!(r.final_offset, 189.0);

    let r = m
        .layout(0, Point::new(12.0, 0.0), Axis::Vertical, 50.0)
        .unwrap();
    assert!(r.is_empty());
    assert_eq!(r.final_offset, 12.0);
}

#[test]
fn dynamic_table_uses_per_item_extents() {
    let m = Module::dynamic_table(1.0, |i, _, _| ((i + 1) * 10) as f64);
    let r = m.layout(3, Point::ZERO, Axis::Vertical, 100.0).unwrap();
    assert_eq!(majors(&r), vec![0.0, 11.0, 32.0]);
    assert_eq!(r.items[2].frame.size.major, 30.0);
    assert_eq!(r.final_offset, 62.0);
}

#[test]
fn dynamic_table_receives_axis_and_minor_extent() {
    let m = Module::dynamic_table(0.0, |_, axis, minor| match axis {
        Axis::Vertical => minor / 2.0,
        Axis::Horizontal => minor / 4.0,
    });
    let v = m.layout(1, Point::ZERO, Axis::Vertical, 200.0).unwrap();
    let h = m.layout(1, Point::ZERO, Axis::Horizontal, 200.0).unwrap();
    assert_eq!(v.final_offset, 100.0);
    assert_eq!(h.final_offset, 50.0);
}

#[test]
fn table_rejects_negative_extents() {
    let m = Module::dynamic_table(0.0, |i, _, _| if i == 1 { -1.0 } else { 10.0 });
    assert_eq!(
        m.layout(3, Point::ZERO, Axis::Vertical, 100.0),
        Err(LayoutError::InvalidExtent {
            what: "row extent",
            value: -1.0
        })
    );

    let m = Module::table(44.0, 0.0);
    assert!(matches!(
        m.layout(1, Point::ZERO, Axis::Vertical, -1.0),
        Err(LayoutError::InvalidExtent { .. })
    ));
}

#[test]
fn grid_places_items_by_row_and_column() {
    let m = Module::grid(80.0, Size::new(2.0, 1.0), 1.0);
    let r = m.layout(5, Point::ZERO, Axis::Vertical, 400.0).unwrap();
    assert_eq!(r.len(), 5);
    for a in &r.items {
        assert_eq!(a.frame.size, Size::new(99.0, 99.0));
    }
    assert_eq!(r.items[3].frame.origin, Point::new(0.0, 300.0));
    // Item 5 wraps onto the second row.
    assert_eq!(r.items[4].frame.origin, Point::new(101.0, 0.0));
    assert_eq!(r.final_offset, 200.0);
}

#[test]
fn grid_aspect_ratio_sets_cell_major_extent() {
    let m = Module::grid(80.0, Size::new(0.0, 1.0), 2.0);
    let r = m.layout(1, Point::ZERO, Axis::Vertical, 400.0).unwrap();
    assert_eq!(r.items[0].frame.size, Size::new(49.5, 99.0));
    assert_eq!(r.final_offset, 49.5);

    let m = Module::grid(80.0, Size::new(0.0, 1.0), 0.0);
    assert!(matches!(
        m.layout(1, Point::ZERO, Axis::Vertical, 400.0),
        Err(LayoutError::InvalidExtent { .. })
    ));
}

#[test]
fn grid_overflows_with_a_single_column_when_too_narrow() {
    let m = Module::grid(80.0, Size::new(0.0, 0.0), 1.0);
    let r = m.layout(2, Point::new(5.0, 0.0), Axis::Vertical, 50.0).unwrap();
    assert_eq!(r.items[1].frame.origin, Point::new(55.0, 0.0));
    assert_eq!(r.final_offset, 105.0);

    let r = m.layout(0, Point::new(5.0, 0.0), Axis::Vertical, 50.0).unwrap();
    assert_eq!(r.final_offset, 5.0);
}

#[test]
fn masonry_places_each_item_in_the_shortest_column() {
    let extents = [100.0, 50.0, 70.0, 30.0, 10.0, 20.0];
    let m = Module::masonry(80.0, Size::new(1.0, 1.0), move |i, _, _| extents[i]);
    let r = m.layout(6, Point::ZERO, Axis::Vertical, 400.0).unwrap();

    let placed: Vec<(f64, f64)> = r
        .items
        .iter()
        .map(|a| (a.frame.origin.major, a.frame.origin.minor))
        .collect();
    assert_eq!(
        placed,
        vec![
            (0.0, 0.0),
            (0.0, 100.0),
            (0.0, 200.0),
            (0.0, 300.0),
            (31.0, 300.0),
            (42.0, 300.0),
        ]
    );
    assert!(r.items.iter().all(|a| a.frame.size.minor == 99.0));
    // Tallest column ends at 101; the trailing pad is dropped.
    assert_eq!(r.final_offset, 100.0);
}

#[test]
fn masonry_ties_go_to_the_lowest_column() {
    let m = Module::masonry(100.0, Size::new(0.0, 0.0), |_, _, _| 10.0);
    let r = m.layout(6, Point::ZERO, Axis::Vertical, 300.0).unwrap();
    let columns: Vec<f64> = r.items.iter().map(|a| a.frame.origin.minor).collect();
    assert_eq!(columns, vec![0.0, 100.0, 200.0, 0.0, 100.0, 200.0]);
    assert_eq!(r.final_offset, 20.0);
}

#[test]
fn masonry_with_no_items_ends_at_origin() {
    let m = Module::masonry(80.0, Size::new(5.0, 1.0), |_, _, _| 10.0);
    let r = m.layout(0, Point::new(40.0, 0.0), Axis::Vertical, 400.0).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.final_offset, 40.0);
}

#[test]
fn masonry_with_a_tiny_minimum_only_tracks_columns_it_can_fill() {
    let (columns, _) = calculate_columns(1e-12, 0.0, 1000.0).unwrap();
    assert!(columns > 1_000_000_000);

    let m = Module::masonry(1e-12, Size::new(0.0, 0.0), |_, _, _| 10.0);
    let r = m.layout(3, Point::ZERO, Axis::Vertical, 1000.0).unwrap();
    assert_eq!(r.len(), 3);
    assert!(r.items.iter().all(|a| a.frame.origin.major == 0.0));
    assert_eq!(r.final_offset, 10.0);
}

#[test]
fn masonry_passes_cell_minor_extent_to_the_dimension_function() {
    let m = Module::masonry(80.0, Size::new(0.0, 1.0), |_, _, cell| cell * 2.0);
    let r = m.layout(1, Point::ZERO, Axis::Vertical, 400.0).unwrap();
    assert_eq!(r.items[0].frame.size, Size::new(198.0, 99.0));
}

#[test]
fn for_major_axis_dispatches_on_the_active_axis() {
    let m = Module::for_major_axis(Module::table(10.0, 0.0), Module::table(20.0, 0.0));
    let h = m.layout(2, Point::ZERO, Axis::Horizontal, 100.0).unwrap();
    let v = m.layout(2, Point::ZERO, Axis::Vertical, 100.0).unwrap();
    assert_eq!(h.final_offset, 20.0);
    assert_eq!(v.final_offset, 40.0);
}

#[test]
fn for_major_axis_dispatches_transitions_too() {
    let fade = Module::table(10.0, 0.0).with_initial_transition(|_, a| Some(a.with_alpha(0.0)));
    let m = Module::for_major_axis(fade, Module::table(10.0, 0.0));
    let a = LayoutAttributes::new(Rect::default());
    let path = IndexPath::new(0, 0);
    assert_eq!(
        m.initial_attributes(path, Axis::Horizontal, &a).map(|a| a.alpha),
        Some(0.0)
    );
    assert_eq!(m.initial_attributes(path, Axis::Vertical, &a), None);
}

#[test]
fn inset_moves_origin_and_shrinks_minor_extent() {
    let m = Module::table(44.0, 0.0).inset(Insets::all(10.0));
    let r = m.layout(1, Point::ZERO, Axis::Vertical, 400.0).unwrap();
    assert_eq!(
        r.items[0].frame,
        Rect::new(Point::new(10.0, 10.0), Size::new(44.0, 380.0))
    );
    assert_eq!(r.final_offset, 64.0);
}

#[test]
fn inset_larger_than_the_minor_extent_is_rejected() {
    let m = Module::table(44.0, 0.0).inset(Insets::minor(30.0, 30.0));
    assert_eq!(
        m.layout(1, Point::ZERO, Axis::Vertical, 50.0),
        Err(LayoutError::InvalidExtent {
            what: "inset minor extent",
            value: -10.0
        })
    );
}

#[test]
fn translate_shifts_items_without_touching_the_final_offset() {
    let inner = Module::table(44.0, 1.0);
    let m = inner.translate(5.0, 3.0);
    let r = m.layout(3, Point::ZERO, Axis::Vertical, 100.0).unwrap();
    let shifted = inner
        .layout(3, Point::new(5.0, 3.0), Axis::Vertical, 100.0)
        .unwrap();
    assert_eq!(r, shifted);
    assert_eq!(r.items[0].frame.origin, Point::new(5.0, 3.0));
    assert_eq!(r.items[0].frame.size.minor, 100.0);
}

#[test]
fn transitions_are_attached_independently() {
    let base = Module::table(44.0, 0.0);
    let m = base
        .with_initial_transition(|_, a| Some(a.with_alpha(0.0)))
        .with_final_transition(|_, a| {
            Some(a.with_transform(AffineTransform::scale(0.9, 0.1)))
        });
    let a = LayoutAttributes::new(Rect::new(Point::ZERO, Size::new(44.0, 100.0)));
    let path = IndexPath::new(0, 0);

    let initial = m.initial_attributes(path, Axis::Vertical, &a).unwrap();
    assert_eq!(initial.alpha, 0.0);
    assert!(initial.transform.is_identity());

    let fin = m.final_attributes(path, Axis::Vertical, &a).unwrap();
    assert_eq!(fin.alpha, 1.0);
    assert_eq!(fin.transform, AffineTransform::scale(0.9, 0.1));

    // The receiver is unchanged.
    assert_eq!(base.initial_attributes(path, Axis::Vertical, &a), None);
    assert_eq!(base.final_attributes(path, Axis::Vertical, &a), None);
}

#[test]
fn transition_returning_none_falls_back_to_steady_state() {
    let m = Module::table(44.0, 0.0)
        .with_initial_transition(|path, a| (path.item % 2 == 0).then(|| a.with_hidden(true)));
    let a = LayoutAttributes::new(Rect::default());
    assert!(m
        .initial_attributes(IndexPath::new(0, 0), Axis::Vertical, &a)
        .unwrap()
        .hidden);
    assert_eq!(
        m.initial_attributes(IndexPath::new(0, 1), Axis::Vertical, &a),
        None
    );
}

#[test]
fn combinators_forward_transitions_of_the_wrapped_module() {
    let m = Module::table(44.0, 0.0)
        .with_initial_transition(|_, a| Some(a.with_z_index(3)))
        .inset(Insets::all(5.0))
        .translate(1.0, 1.0);
    let a = LayoutAttributes::new(Rect::default());
    let out = m
        .initial_attributes(IndexPath::new(0, 0), Axis::Vertical, &a)
        .unwrap();
    assert_eq!(out.z_index, 3);
}

#[test]
fn custom_module_via_from_fn() {
    let m = Module::from_fn(|count, origin, _, minor| {
        let items = (0..count)
            .map(|i| {
                LayoutAttributes::new(Rect::new(
                    origin.offset(0.0, i as f64),
                    Size::new(1.0, minor),
                ))
            })
            .collect();
        Ok(LayoutResult::new(items, origin.major))
    });
    let r = m.layout(3, Point::ZERO, Axis::Vertical, 10.0).unwrap();
    assert_eq!(r.len(), 3);
    assert_eq!(r.final_offset, 0.0);
}

#[test]
fn sections_without_a_module_use_the_default_table() {
    let mut layout = CollectionLayout::default();
    let state = CollectionState::new(vec![2, 2], viewport(320.0, 480.0));
    let snapshot = layout.prepare(&state).unwrap();

    assert_eq!(snapshot.section_origin(1).unwrap().major, 88.0);
    assert_eq!(snapshot.content_size(), PhysicalSize::new(320.0, 176.0));
    let a = snapshot.attributes(IndexPath::new(1, 1)).unwrap();
    assert_eq!(a.frame, PhysicalRect::from_xywh(0.0, 132.0, 320.0, 44.0));
}

#[test]
fn default_row_extent_is_configurable() {
    let options = LayoutOptions::default()
        .with_default_row_extent(10.0)
        .with_module_for_section(|section| (section == 0).then(|| Module::table(1.0, 0.0)));
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![3, 3], viewport(100.0, 100.0));
    let snapshot = layout.prepare(&state).unwrap();
    assert_eq!(snapshot.section_final_offset(0), Ok(3.0));
    assert_eq!(snapshot.section_final_offset(1), Ok(33.0));
}

#[test]
fn sections_are_threaded_along_the_major_axis() {
    let mut layout = CollectionLayout::new(LayoutOptions::default().with_modules(mixed_modules()));
    let state = CollectionState::new(vec![3, 5, 9, 4, 0, 2], viewport(400.0, 600.0));
    let snapshot = layout.prepare(&state).unwrap();

    assert_eq!(snapshot.section_count(), 6);
    assert_eq!(snapshot.section_origin(0).unwrap(), Point::ZERO);
    for section in 1..snapshot.section_count() {
        assert_eq!(
            snapshot.section_origin(section).unwrap().major,
            snapshot.section_final_offset(section - 1).unwrap()
        );
    }
    let last = snapshot.section_final_offset(5).unwrap();
    assert_eq!(snapshot.content_size(), PhysicalSize::new(400.0, last));
    assert_eq!(snapshot.len(), 23);
    assert_eq!(snapshot.item_count(4), Ok(0));

    // Grid section: inset 10, cells of 93 (4 columns over 400 with spacing 10).
    let first_grid = snapshot.attributes(IndexPath::new(1, 0)).unwrap();
    assert_eq!(first_grid.frame, PhysicalRect::from_xywh(0.0, 144.0, 93.0, 93.0));
}

#[test]
fn horizontal_axis_uses_viewport_height_as_minor_extent() {
    let options = LayoutOptions::new(Axis::Horizontal).with_module(Module::table(50.0, 10.0));
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![3], viewport(320.0, 200.0));
    let snapshot = layout.prepare(&state).unwrap();

    assert_eq!(snapshot.minor_extent(), 200.0);
    assert_eq!(snapshot.content_size(), PhysicalSize::new(170.0, 200.0));
    let a = snapshot.attributes(IndexPath::new(0, 2)).unwrap();
    assert_eq!(a.frame, PhysicalRect::from_xywh(120.0, 0.0, 50.0, 200.0));
}

#[test]
fn index_path_queries_fail_outside_the_published_pass() {
    let mut layout = CollectionLayout::default();
    let state = CollectionState::new(vec![2], viewport(100.0, 100.0));
    assert_eq!(
        layout.attributes_for_item(&state, IndexPath::new(0, 2)),
        Err(LayoutError::IndexOutOfRange {
            section: 0,
            item: 2
        })
    );
    assert_eq!(
        layout.attributes_for_item(&state, IndexPath::new(1, 0)),
        Err(LayoutError::IndexOutOfRange {
            section: 1,
            item: 0
        })
    );
    let snapshot = layout.prepare(&state).unwrap();
    assert_eq!(
        snapshot.section_origin(3),
        Err(LayoutError::SectionOutOfRange { section: 3 })
    );
}

#[test]
fn repeated_passes_are_identical() {
    let options = LayoutOptions::default().with_modules(mixed_modules());
    let state = CollectionState::new(vec![3, 5, 9, 4], viewport(375.0, 600.0));

    let a = LayoutSnapshot::compute(&options, &state).unwrap();
    let b = LayoutSnapshot::compute(&options, &state).unwrap();
    assert_eq!(a, b);

    let mut layout = CollectionLayout::new(options);
    let first = layout.prepare(&state).unwrap();
    layout.invalidate();
    let second = layout.prepare(&state).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn fresh_layout_reuses_the_published_snapshot() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = LayoutOptions::default().with_module_for_section(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
        None
    });
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![1, 1], viewport(100.0, 100.0));

    assert!(layout.is_stale());
    let first = layout.prepare(&state).unwrap();
    assert_eq!(layout.state(), LayoutState::Fresh);
    let again = layout.prepare(&state).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    layout.invalidate();
    layout.prepare(&state).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 4);
}

#[test]
fn only_minor_extent_changes_invalidate_on_bounds_change() {
    let mut layout = CollectionLayout::default();
    let mut state = CollectionState::new(vec![5], viewport(320.0, 480.0));
    let first = layout.prepare(&state).unwrap();

    // Taller viewport under a vertical axis: major-only change.
    assert!(!layout.should_invalidate_for_bounds_change(viewport(320.0, 900.0)));
    assert!(!layout.apply_bounds_change(viewport(320.0, 900.0)));
    state.viewport = viewport(320.0, 900.0);
    assert!(Arc::ptr_eq(&first, &layout.prepare(&state).unwrap()));

    // Wider viewport: minor change.
    assert!(layout.apply_bounds_change(viewport(640.0, 900.0)));
    assert!(layout.is_stale());
    state.viewport = viewport(640.0, 900.0);
    let wide = layout.prepare(&state).unwrap();
    assert_eq!(wide.minor_extent(), 640.0);
}

#[test]
fn prepare_notices_a_minor_extent_change_on_its_own() {
    let mut layout = CollectionLayout::default();
    let mut state = CollectionState::new(vec![1], viewport(320.0, 480.0));
    layout.prepare(&state).unwrap();
    state.viewport = viewport(100.0, 480.0);
    let a = layout.attributes_for_item(&state, IndexPath::new(0, 0)).unwrap();
    assert_eq!(a.frame.size.width, 100.0);
}

#[test]
fn axis_and_lookup_changes_invalidate() {
    let mut layout = CollectionLayout::default();
    let state = CollectionState::new(vec![1], viewport(320.0, 480.0));
    layout.prepare(&state).unwrap();

    layout.set_major_axis(Axis::Vertical);
    assert!(!layout.is_stale());
    layout.set_major_axis(Axis::Horizontal);
    assert!(layout.is_stale());
    let snapshot = layout.prepare(&state).unwrap();
    assert_eq!(snapshot.content_size(), PhysicalSize::new(44.0, 480.0));

    layout.set_module_for_section(|_| Some(Module::table(10.0, 0.0)));
    assert!(layout.is_stale());
    assert_eq!(
        layout.content_size(&state).unwrap(),
        PhysicalSize::new(10.0, 480.0)
    );

    layout.update_options(|o| o.default_row_extent = 1.0);
    assert!(layout.is_stale());
}

#[test]
fn module_lookup_is_resolved_on_every_pass() {
    let extent = Arc::new(AtomicUsize::new(10));
    let source = Arc::clone(&extent);
    let options = LayoutOptions::default().with_module_for_section(move |_| {
        Some(Module::table(source.load(Ordering::Relaxed) as f64, 0.0))
    });
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![1], viewport(100.0, 100.0));
    assert_eq!(layout.content_size(&state).unwrap().height, 10.0);

    extent.store(20, Ordering::Relaxed);
    layout.invalidate();
    assert_eq!(layout.content_size(&state).unwrap().height, 20.0);
}

#[test]
fn failed_pass_keeps_the_previous_snapshot() {
    let mut layout =
        CollectionLayout::new(LayoutOptions::default().with_module(Module::table(10.0, 0.0)));
    let state = CollectionState::new(vec![1], viewport(100.0, 100.0));
    let good = layout.prepare(&state).unwrap();

    layout.set_module_for_section(|_| Some(Module::table(10.0, 0.0).inset(Insets::all(60.0))));
    assert!(matches!(
        layout.prepare(&state),
        Err(LayoutError::InvalidExtent { .. })
    ));
    assert!(layout.is_stale());
    assert!(Arc::ptr_eq(layout.snapshot().unwrap(), &good));
}

#[test]
fn rect_query_returns_intersecting_items_in_index_order() {
    let mut layout =
        CollectionLayout::new(LayoutOptions::default().with_module(Module::table(10.0, 0.0)));
    let state = CollectionState::new(vec![5, 5], viewport(100.0, 30.0));

    let hits = layout
        .attributes_in_rect(&state, PhysicalRect::from_xywh(0.0, 35.0, 100.0, 30.0))
        .unwrap();
    let paths: Vec<_> = hits.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        paths,
        vec![
            IndexPath::new(0, 3),
            IndexPath::new(0, 4),
            IndexPath::new(1, 0),
            IndexPath::new(1, 1),
        ]
    );

    // Edges that only touch are excluded.
    let hits = layout
        .attributes_in_rect(&state, PhysicalRect::from_xywh(0.0, 10.0, 100.0, 10.0))
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, IndexPath::new(0, 1));

    // Outside the minor extent.
    let hits = layout
        .attributes_in_rect(&state, PhysicalRect::from_xywh(150.0, 0.0, 10.0, 100.0))
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn rect_query_matches_brute_force_for_masonry() {
    let options = LayoutOptions::default().with_module(
        Module::masonry(60.0, Size::new(4.0, 4.0), |i, _, w| {
            w * (((i * 37) % 5) as f64 + 1.0) / 2.0
        })
        .inset(Insets::all(8.0)),
    );
    let state = CollectionState::new(vec![40, 17, 3], viewport(320.0, 480.0));
    let snapshot = LayoutSnapshot::compute(&options, &state).unwrap();

    let mut out = Vec::new();
    for step in 0..40 {
        let rect = PhysicalRect::from_xywh(0.0, step as f64 * 97.0, 320.0, 480.0);
        snapshot.collect_items_in_rect(rect, &mut out);
        assert_eq!(out, brute_force_in_rect(&snapshot, rect));
    }
}

#[test]
fn appearing_and_disappearing_items_consult_the_section_module() {
    let module = Module::table(44.0, 0.0)
        .with_initial_transition(|_, a| {
            let mut frame = a.frame;
            frame.origin.major += 100.0;
            Some(a.with_frame(frame).with_alpha(0.0))
        })
        .with_final_transition(|_, a| {
            Some(a.with_transform_3d(Transform3D::scale(0.5, 0.5, 1.0)))
        });
    let options = LayoutOptions::new(Axis::Horizontal)
        .with_module_for_section(move |section| (section == 0).then(|| module.clone()));
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![2, 2], viewport(320.0, 200.0));

    let path = IndexPath::new(0, 1);
    let steady = layout.attributes_for_item(&state, path).unwrap();
    let initial = layout
        .initial_attributes_for_appearing_item(path, &steady)
        .unwrap();
    // Major is x under a horizontal axis.
    assert_eq!(initial.frame.origin.x, steady.frame.origin.x + 100.0);
    assert_eq!(initial.frame.origin.y, steady.frame.origin.y);
    assert_eq!(initial.alpha, 0.0);

    let fin = layout
        .final_attributes_for_disappearing_item(path, &steady)
        .unwrap();
    assert_eq!(fin.frame, steady.frame);
    assert_eq!(fin.transform_3d, Transform3D::scale(0.5, 0.5, 1.0));

    // Section 1 uses the fallback table, which has no transitions.
    let other = layout
        .attributes_for_item(&state, IndexPath::new(1, 0))
        .unwrap();
    assert_eq!(
        layout.initial_attributes_for_appearing_item(IndexPath::new(1, 0), &other),
        None
    );
}

#[test]
fn collection_state_edits_are_bounds_checked() {
    let mut state = CollectionState::new(vec![2], viewport(10.0, 10.0));
    state.insert_item(IndexPath::new(0, 2)).unwrap();
    assert_eq!(state.item_count(0), 3);
    assert_eq!(
        state.insert_item(IndexPath::new(0, 5)),
        Err(LayoutError::IndexOutOfRange {
            section: 0,
            item: 5
        })
    );
    state.remove_item(IndexPath::new(0, 0)).unwrap();
    assert_eq!(state.item_count(0), 2);
    assert_eq!(
        state.remove_item(IndexPath::new(1, 0)),
        Err(LayoutError::SectionOutOfRange { section: 1 })
    );
    state.push_section(4);
    state.set_item_count(1, 7).unwrap();
    assert_eq!(state.section_count(), 2);
    assert_eq!(state.item_count(1), 7);
}

#[test]
fn affine_transforms_compose_in_order() {
    let t = AffineTransform::scale(2.0, 2.0).then(AffineTransform::translation(1.0, 0.0));
    assert_eq!(t.apply(1.0, 1.0), (3.0, 2.0));
    let t = AffineTransform::translation(1.0, 0.0).then(AffineTransform::scale(2.0, 2.0));
    assert_eq!(t.apply(1.0, 1.0), (4.0, 2.0));

    let m = Transform3D::scale(2.0, 3.0, 1.0).then(Transform3D::IDENTITY);
    assert_eq!(m, Transform3D::scale(2.0, 3.0, 1.0));
    assert!(Transform3D::default().is_identity());
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Horizontal), Just(Axis::Vertical)]
}

proptest! {
    #[test]
    fn geometry_round_trips_exactly(
        axis in axis_strategy(),
        x in -1e9f64..1e9,
        y in -1e9f64..1e9,
        w in 0f64..1e6,
        h in 0f64..1e6,
    ) {
        let p = PhysicalPoint::new(x, y);
        prop_assert_eq!(Point::from_physical(p, axis).to_physical(axis), p);
        let s = PhysicalSize::new(w, h);
        prop_assert_eq!(Size::from_physical(s, axis).to_physical(axis), s);
        let r = PhysicalRect::new(p, s);
        prop_assert_eq!(Rect::from_physical(r, axis).to_physical(axis), r);

        let agnostic = Rect::new(Point::new(x, y), Size::new(w, h));
        prop_assert_eq!(Rect::from_physical(agnostic.to_physical(axis), axis), agnostic);
    }

    #[test]
    fn masonry_choices_replay_as_shortest_column(
        extents in prop::collection::vec(0u32..300, 0..60),
        width in 80u32..1200,
        pad_major in 0u32..8,
        pad_minor in 0u32..8,
    ) {
        let extents: Arc<[f64]> = extents.iter().map(|&e| e as f64).collect();
        let lookup = Arc::clone(&extents);
        let padding = Size::new(pad_major as f64, pad_minor as f64);
        let m = Module::masonry(80.0, padding, move |i, _, _| lookup[i]);
        let r = m.layout(extents.len(), Point::ZERO, Axis::Vertical, width as f64).unwrap();
        let (columns, cell) = calculate_columns(80.0, padding.minor, width as f64).unwrap();

        let mut offsets = vec![0.0f64; columns];
        for (i, a) in r.items.iter().enumerate() {
            let column = (a.frame.origin.minor / (cell + padding.minor)).round() as usize;
            let min = offsets.iter().copied().fold(f64::INFINITY, f64::min);
            let first_min = offsets.iter().position(|&o| o == min).unwrap();
            prop_assert_eq!(column, first_min);
            prop_assert_eq!(a.frame.origin.major, offsets[column]);
            offsets[column] += extents[i] + padding.major;
        }
        if extents.is_empty() {
            prop_assert_eq!(r.final_offset, 0.0);
        } else {
            let max = offsets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(r.final_offset, max - padding.major);
        }
    }

    #[test]
    fn inset_max_major_only_reserves_trailing_space(
        count in 0usize..40,
        width in 100u32..800,
        origin_major in 0u32..1000,
        which in 0usize..5,
    ) {
        let module = mixed_modules().swap_remove(which);
        let origin = Point::new(origin_major as f64, 0.0);
        let plain = module.layout(count, origin, Axis::Vertical, width as f64).unwrap();
        let inset = module
            .inset(Insets::major(0.0, 10.0))
            .layout(count, origin, Axis::Vertical, width as f64)
            .unwrap();
        prop_assert_eq!(&inset.items, &plain.items);
        prop_assert_eq!(inset.final_offset, plain.final_offset + 10.0);
    }

    #[test]
    fn rect_query_matches_brute_force(
        sections in prop::collection::vec(0usize..25, 1..6),
        axis in axis_strategy(),
        minor in 120u32..700,
        x in -200f64..2000.0,
        y in -200f64..2000.0,
        w in 0f64..800.0,
        h in 0f64..800.0,
    ) {
        let options = LayoutOptions::new(axis).with_modules(mixed_modules());
        let size = match axis {
            Axis::Vertical => viewport(minor as f64, 500.0),
            Axis::Horizontal => viewport(500.0, minor as f64),
        };
        let state = CollectionState::new(sections, size);
        let snapshot = LayoutSnapshot::compute(&options, &state).unwrap();
        let rect = PhysicalRect::from_xywh(x, y, w, h);
        prop_assert_eq!(snapshot.items_in_rect(rect), brute_force_in_rect(&snapshot, rect));
    }
}
