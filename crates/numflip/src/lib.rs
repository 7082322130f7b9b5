#![forbid(unsafe_code)]

//! numflip public facade crate.
//!
//! ```
//! use numflip::prelude::*;
//!
//! struct Log(Vec<String>);
//!
//! impl GlyphRenderer for Log {
//!     fn render(&mut self, glyph: &GlyphFrame<'_>) {
//!         self.0.push(format!("{} {} {:?}", glyph.key, glyph.ch, glyph.lifecycle));
//!     }
//!     fn unmount(&mut self, key: GlyphKey) {
//!         self.0.push(format!("{key} gone"));
//!     }
//! }
//!
//! let display = NumberDisplay::builder().prefix("$").build()?;
//! let mut state = NumberDisplayState::new();
//! let mut cache = WidthRatioCache::new();
//! let mut log = Log(Vec::new());
//!
//! let value = display.handle_input("1234.5");
//! assert_eq!(value, "1,234.5");
//! display.update(&value, &mut state);
//! let report = display.render(&mut state, &mut cache, &mut log);
//! assert_eq!(report.rendered, 8);
//!
//! // The host measures "1234567890" at size 5 and reports back.
//! if let Some(request) = report.measure {
//!     cache.resolve(&request.key, 32.0);
//! }
//! # Ok::<(), numflip::prelude::ConfigError>(())
//! ```

pub mod prelude {
    pub use numflip_core as core;
    pub use numflip_layout as layout;
    pub use numflip_widgets as widgets;

    pub use numflip_core::animation::{AnimationConfig, Easing, SeparatorAnimation};
    pub use numflip_core::{
        CharKind, ConfigError, FormatOptions, GlyphId, IdSource, Lifecycle, NumberFormat,
        ProcessIds, SequentialIds,
    };
    pub use numflip_layout::{MeasureRequest, RatioLookup, Sizing, WidthRatioCache};
    pub use numflip_widgets::{
        DisplayConfig, GlyphFrame, GlyphKey, GlyphRenderer, NumberDisplay, NumberDisplayState,
        RenderReport,
    };
}
