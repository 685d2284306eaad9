use slantwise::backends::virtual_pointer::VirtualPointer;
use slantwise::filtered_listener::FilteredListener;
use slantwise::{
    Config, EventFilter, InputEvent, InputListener, RecordingSink, Sketch, StyleProperty,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn config(toml: &str) -> Config {
    Config::from_toml_str(toml).unwrap()
}

#[test]
fn horizontal_sweep_raises_weight_monotonically() {
    let sink = RecordingSink::new();
    let mut sketch = Sketch::new(
        &config("viewport = { width = 900, height = 100 }"),
        sink.clone(),
    )
    .unwrap();

    for step in 0..=9 {
        sketch.dispatch(&InputEvent::pointer_moved(f64::from(step) * 100.0, 50.0));
        sketch.tick().unwrap();
    }

    let weights: Vec<f64> = sink
        .frames()
        .iter()
        .map(|f| f.value(&StyleProperty::FontWeight).unwrap())
        .collect();
    assert_eq!(weights.len(), 10);
    assert_eq!(weights[0], 100.0);
    assert_eq!(weights[9], 1000.0);
    assert!(weights.windows(2).all(|w| w[0] < w[1]));

    let slant = sink.last().unwrap().value(&StyleProperty::FontSlant);
    assert_eq!(slant, Some(5.0));
}

#[test]
fn press_sets_size_and_pointer_moves_keep_it() {
    let sink = RecordingSink::new();
    let mut sketch = Sketch::new(
        &config(
            r#"
            profile = "press-variation"
            viewport = { width = 1000, height = 1000 }
            "#,
        ),
        sink.clone(),
    )
    .unwrap();

    let mut pointer = VirtualPointer::new("virtual:0", "Virtual Pointer");
    pointer.press_at(0.0, 500.0);
    pointer.sweep((0.0, 0.0), (1000.0, 0.0), 4);
    sketch.add_source(pointer);
    sketch.tick().unwrap();

    let frame = sink.last().unwrap();
    assert_eq!(frame.value(&StyleProperty::FontSize), Some(112.0));
    assert_eq!(frame.variation_settings().as_deref(), Some("\"wdth\" 125"));
    // the sweep moved the pointer but not the press channel
    assert_eq!(sketch.snapshot().press.y, 500.0);
}

#[test]
fn extra_listeners_see_filtered_events() {
    struct Count(Arc<AtomicUsize>);
    impl InputListener for Count {
        fn on_input(&mut self, _: &InputEvent) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let presses = Arc::new(AtomicUsize::new(0));
    let left_moves = Arc::new(AtomicUsize::new(0));

    let mut sketch = Sketch::new(&Config::default(), RecordingSink::new()).unwrap();
    sketch.add_listener(Count(Arc::clone(&presses)), EventFilter::PressOnly);
    sketch.add_listener(
        FilteredListener::new(
            |ev: &InputEvent| ev.kind.position().x < 960.0,
            Count(Arc::clone(&left_moves)),
        ),
        EventFilter::PointerOnly,
    );

    let mut pointer = VirtualPointer::new("virtual:0", "Virtual Pointer");
    pointer.move_to(100.0, 0.0);
    pointer.move_to(1500.0, 0.0);
    pointer.press_at(200.0, 0.0);
    sketch.add_source(pointer);
    assert_eq!(sketch.pump(), 4);

    assert_eq!(presses.load(Ordering::Relaxed), 1);
    assert_eq!(left_moves.load(Ordering::Relaxed), 2);
    assert_eq!(sketch.store().generation(), 4);
}

#[test]
fn resize_renormalizes_the_same_snapshot() {
    let sink = RecordingSink::new();
    let mut sketch = Sketch::new(&Config::default(), sink.clone()).unwrap();
    sketch.dispatch(&InputEvent::pointer_moved(960.0, 0.0));
    sketch.tick().unwrap();

    sketch
        .resize(slantwise::Viewport::new(960.0, 1080.0).unwrap())
        .unwrap();
    sketch.tick().unwrap();

    let frames = sink.frames();
    assert_eq!(frames[0].value(&StyleProperty::FontWeight), Some(550.0));
    assert_eq!(frames[1].value(&StyleProperty::FontWeight), Some(1000.0));
}
