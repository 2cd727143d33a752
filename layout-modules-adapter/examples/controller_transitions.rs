use layout_modules::{CollectionState, IndexPath, LayoutOptions, Module, PhysicalSize};
use layout_modules_adapter::{Controller, Easing};

fn main() -> Result<(), layout_modules::LayoutError> {
    // Example: controller driving insert/remove tweens without holding any UI objects.
    //
    // An adapter would:
    // - forward viewport and scroll events
    // - call insert_item/remove_item when its data source changes
    // - call tick(now_ms) in a frame loop / timer and apply the returned attributes
    // - render the steady state from visible_items for everything else
    let module = Module::table(44.0, 1.0)
        .with_initial_transition(|_, a| Some(a.with_alpha(0.0)))
        .with_final_transition(|_, a| Some(a.with_alpha(0.0).with_hidden(true)));
    let mut c = Controller::new(
        LayoutOptions::default().with_module(module),
        CollectionState::new(vec![20], PhysicalSize::new(320.0, 240.0)),
    );
    c.on_scroll(90.0);
    println!("visible={}", c.visible_items()?.len());

    c.insert_item(IndexPath::new(0, 3), 0, 240, Easing::SmoothStep)?;
    c.remove_item(IndexPath::new(0, 10), 0, 160, Easing::EaseInOutCubic)?;

    let mut now_ms = 0u64;
    while c.is_animating() {
        now_ms += 16;
        for (path, phase, attributes) in c.tick(now_ms) {
            if now_ms % 80 == 0 {
                println!("t={now_ms} {path} {phase:?} alpha={:.2}", attributes.alpha);
            }
        }
    }

    println!("done: sections={:?}", c.state().sections);
    Ok(())
}
