// Example: attaching insert/remove transitions to a module and querying them for an item.
use layout_modules::{
    AffineTransform, CollectionLayout, CollectionState, IndexPath, LayoutOptions, Module,
    PhysicalSize,
};

fn main() -> Result<(), layout_modules::LayoutError> {
    let module = Module::table(44.0, 1.0)
        .with_initial_transition(|_, a| {
            let transform = AffineTransform::scale(0.5, 0.5).then(AffineTransform::rotation(1.0));
            Some(a.with_transform(transform).with_alpha(0.0))
        })
        .with_final_transition(|_, a| {
            Some(a.with_transform(AffineTransform::scale(0.9, 0.1)).with_alpha(0.0))
        });
    let mut layout = CollectionLayout::new(LayoutOptions::default().with_module(module));
    let state = CollectionState::new(vec![10], PhysicalSize::new(320.0, 480.0));

    let path = IndexPath::new(0, 3);
    let steady = layout.attributes_for_item(&state, path)?;
    println!("steady:    {steady:?}");
    println!(
        "appearing: {:?}",
        layout.initial_attributes_for_appearing_item(path, &steady)
    );
    println!(
        "removing:  {:?}",
        layout.final_attributes_for_disappearing_item(path, &steady)
    );
    Ok(())
}
