// Example: a sectioned collection mixing tables, grids and masonry, queried by viewport rect.
use layout_modules::{
    CollectionLayout, CollectionState, IndexPath, Insets, LayoutOptions, Module, PhysicalRect,
    PhysicalSize, Size,
};

fn main() -> Result<(), layout_modules::LayoutError> {
    let options = LayoutOptions::default().with_modules(vec![
        Module::table(44.0, 1.0),
        Module::dynamic_table(1.0, |i, _, _| ((i + 1) * 10) as f64),
        Module::grid(20.0, Size::new(10.0, 10.0), 1.0).inset(Insets::major(10.0, 0.0)),
        Module::masonry(80.0, Size::new(1.0, 1.0), |i, _, width| {
            (2.0 / ((i % 4) as f64 + 1.0) * width).round()
        })
        .inset(Insets::all(10.0)),
        Module::grid(50.0, Size::new(10.0, 10.0), 4.0 / 3.0),
    ]);
    let mut layout = CollectionLayout::new(options);
    let state = CollectionState::new(vec![5, 5, 40, 30, 12], PhysicalSize::new(375.0, 667.0));

    let snapshot = layout.prepare(&state)?;
    println!("content_size={:?}", snapshot.content_size());
    for section in 0..snapshot.section_count() {
        println!(
            "section {section}: origin={:?} final_offset={}",
            snapshot.section_origin(section)?,
            snapshot.section_final_offset(section)?
        );
    }

    let item = IndexPath::new(3, 7);
    println!("{item} -> {:?}", snapshot.attributes(item)?.frame);

    let viewport = PhysicalRect::from_xywh(0.0, 600.0, 375.0, 667.0);
    let visible = snapshot.items_in_rect(viewport);
    println!(
        "visible: {} items, first={:?} last={:?}",
        visible.len(),
        visible.first().map(|(path, _)| *path),
        visible.last().map(|(path, _)| *path)
    );
    Ok(())
}
