//! Property-based tests of the display ↔ renderer protocol.
//!
//! A model host keeps the set of mounted keys. Over arbitrary typing
//! sequences, each update followed by one render and optionally a second
//! render after a resize:
//!
//! 1. After every render, the mounted set is exactly the set of keys drawn
//!    by that render.
//! 2. A key is never drawn after it was unmounted.
//! 3. Only keys that were drawn before are unmounted.
//! 4. Non-exiting glyphs, in draw order, spell prefix + value + suffix, or
//!    the placeholder for an empty value.
//! 5. A render with no update before it draws no exiting glyph.

use std::collections::HashSet;

use numflip_core::identity::SequentialIds;
use numflip_core::reconcile::Lifecycle;
use numflip_layout::probe::WidthRatioCache;
use numflip_widgets::{GlyphFrame, GlyphKey, GlyphRenderer, NumberDisplay, NumberDisplayState};
use proptest::prelude::*;

#[derive(Default)]
struct ModelHost {
    mounted: HashSet<GlyphKey>,
    retired: HashSet<GlyphKey>,
    drawn: Vec<(GlyphKey, char, Lifecycle)>,
    bad_unmount: Vec<GlyphKey>,
    redrawn_after_unmount: Vec<GlyphKey>,
}

impl GlyphRenderer for ModelHost {
    fn render(&mut self, glyph: &GlyphFrame<'_>) {
        if self.retired.contains(&glyph.key) {
            self.redrawn_after_unmount.push(glyph.key);
        }
        self.mounted.insert(glyph.key);
        self.drawn.push((glyph.key, glyph.ch, glyph.lifecycle));
    }

    fn unmount(&mut self, key: GlyphKey) {
        if !self.mounted.remove(&key) {
            self.bad_unmount.push(key);
        }
        // Positional keys come back when the affix reappears.
        if matches!(key, GlyphKey::Char(_)) {
            self.retired.insert(key);
        }
    }
}

fn step() -> impl Strategy<Value = (String, Option<f32>)> {
    (raw_input(), proptest::option::of(10.0f32..400.0))
}

fn raw_input() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        6 => "-?[0-9]{0,9}(\\.[0-9]{0,3})?",
    ]
}

proptest! {
    #[test]
    fn host_protocol_holds(steps in proptest::collection::vec(step(), 1..16)) {
        let display = NumberDisplay::builder()
            .prefix("$")
            .suffix("%")
            .placeholder("--")
            .monitoring(false)
            .build()
            .unwrap();
        let mut state = NumberDisplayState::with_ids(SequentialIds::new());
        let mut cache = WidthRatioCache::new();
        let mut host = ModelHost::default();

        for (raw, resize) in &steps {
            let value = display.handle_input(raw);
            display.update(&value, &mut state);
            host.drawn.clear();
            let report = display.render(&mut state, &mut cache, &mut host);

            // 1
            let drawn: HashSet<GlyphKey> = host.drawn.iter().map(|d| d.0).collect();
            prop_assert_eq!(&host.mounted, &drawn, "value {:?}", value);
            prop_assert_eq!(report.rendered, host.drawn.len());

            // 2, 3
            prop_assert!(host.redrawn_after_unmount.is_empty());
            prop_assert!(host.bad_unmount.is_empty(), "{:?}", host.bad_unmount);

            // 4
            let text: String = host
                .drawn
                .iter()
                .filter(|d| d.2 != Lifecycle::Exiting)
                .map(|d| d.1)
                .collect();
            let expected = if value.is_empty() {
                "--".to_string()
            } else {
                format!("${value}%")
            };
            prop_assert_eq!(&text, &expected);

            if let Some(width) = resize {
                state.set_container_width(*width);
                host.drawn.clear();
                let report = display.render(&mut state, &mut cache, &mut host);

                // 1, 2, 3 again
                let drawn: HashSet<GlyphKey> = host.drawn.iter().map(|d| d.0).collect();
                prop_assert_eq!(&host.mounted, &drawn, "resized {:?}", value);
                prop_assert_eq!(report.rendered, host.drawn.len());
                prop_assert!(host.redrawn_after_unmount.is_empty());
                prop_assert!(host.bad_unmount.is_empty(), "{:?}", host.bad_unmount);

                // 5
                prop_assert!(host.drawn.iter().all(|d| d.2 != Lifecycle::Exiting));
                let again: String = host.drawn.iter().map(|d| d.1).collect();
                prop_assert_eq!(again, expected);
            }
        }
    }
}

#[test]
fn typing_session_keeps_leading_digits() {
    let display = NumberDisplay::default();
    let mut state = NumberDisplayState::with_ids(SequentialIds::new());
    let mut cache = WidthRatioCache::new();
    let mut host = ModelHost::default();

    let mut first_digit = None;
    for raw in ["1", "12", "123", "1234", "12345"] {
        let value = display.handle_input(raw);
        display.update(&value, &mut state);
        host.drawn.clear();
        display.render(&mut state, &mut cache, &mut host);
        let one = host
            .drawn
            .iter()
            .find(|d| d.1 == '1')
            .map(|d| d.0)
            .expect("leading digit drawn");
        assert_eq!(*first_digit.get_or_insert(one), one);
    }
    assert_eq!(state.value(), "12,345");
}
