// Example: one set of modules serving both scroll axes.
use layout_modules::{
    Axis, CollectionLayout, CollectionState, IndexPath, LayoutOptions, Module, PhysicalSize, Size,
};

fn main() -> Result<(), layout_modules::LayoutError> {
    let modules = vec![
        Module::for_major_axis(Module::table(120.0, 4.0), Module::table(44.0, 1.0)),
        Module::grid(80.0, Size::new(4.0, 4.0), 1.0),
    ];
    let mut layout = CollectionLayout::new(LayoutOptions::default().with_modules(modules));
    let state = CollectionState::new(vec![4, 9], PhysicalSize::new(320.0, 480.0));

    for axis in [Axis::Vertical, Axis::Horizontal] {
        layout.set_major_axis(axis);
        let snapshot = layout.prepare(&state)?;
        println!(
            "{axis:?}: content_size={:?} minor_extent={} [1, 5]={:?}",
            snapshot.content_size(),
            snapshot.minor_extent(),
            snapshot.attributes(IndexPath::new(1, 5))?.frame
        );
    }

    // A taller viewport does not change the vertical minor extent: no new pass.
    layout.set_major_axis(Axis::Vertical);
    layout.prepare(&state)?;
    println!(
        "invalidate for taller viewport: {}",
        layout.should_invalidate_for_bounds_change(PhysicalSize::new(320.0, 900.0))
    );
    Ok(())
}
