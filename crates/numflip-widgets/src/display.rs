#![forbid(unsafe_code)]

//! Animated number display.
//!
//! [`NumberDisplay`] is the validated configuration; [`NumberDisplayState`]
//! is what persists between passes and is owned by the caller. A pass is:
//!
//! 1. [`NumberDisplay::handle_input`]: clean and format raw text.
//! 2. [`NumberDisplay::update`]: classify the formatted value and reconcile
//!    it against the previous glyphs.
//! 3. [`NumberDisplay::render`]: size the glyphs for the container and hand
//!    each one to a [`GlyphRenderer`].
//!
//! # Invariants
//!
//! 1. Every key passed to [`GlyphRenderer::unmount`] was live in an earlier
//!    pass and is never rendered again.
//! 2. An exiting glyph is rendered in its exiting state by exactly one render
//!    pass and unmounted by the next one, whether or not an update came in
//!    between.
//! 3. Prefix and suffix glyphs are only shown next to a non-empty value; the
//!    placeholder only in place of an empty one.
//!
//! # Failure Modes
//!
//! - Calling `update` twice without a `render` in between drops the first
//!   pass's exits without animating them. Their keys may reach `unmount`
//!   without ever having been rendered.
//! - Until the host resolves the width measurement, sizing runs on the
//!   fallback ratio.

use std::time::Duration;

use numflip_core::animation::{AnimationConfig, GlyphTransitions, SeparatorAnimation, Transition};
use numflip_core::classify::{CharToken, classify};
use numflip_core::config::{self, FormatOptions, Result};
use numflip_core::format::NumberFormat;
use numflip_core::identity::{GlyphId, IdSource, ProcessIds};
use numflip_core::reconcile::{Lifecycle, TaggedChar, reconcile};
use numflip_layout::probe::{MeasureRequest, WidthRatioCache};
use numflip_layout::sizing::{DEFAULT_MAX_FONT_SIZE, Sizing, fit_units, total_units};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::glyph::{GlyphFrame, GlyphKey, GlyphRenderer};
use crate::metrics::RenderMetrics;

/// Name under which value animations are reported to [`RenderMetrics`].
const VALUE_ANIMATION: &str = "value";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Plain-data display configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    pub format: FormatOptions,
    pub max_font_size: f32,
    pub prefix: String,
    pub suffix: String,
    pub placeholder: String,
    pub font_family: Option<String>,
    pub separator_animation: SeparatorAnimation,
    pub animation: AnimationConfig,
    /// Feed [`RenderMetrics`] on every render.
    pub monitoring: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: FormatOptions::default(),
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            prefix: String::new(),
            suffix: String::new(),
            placeholder: String::new(),
            font_family: None,
            separator_animation: SeparatorAnimation::default(),
            animation: AnimationConfig::default(),
            monitoring: cfg!(debug_assertions),
        }
    }
}

/// Builder for [`NumberDisplay`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct NumberDisplayBuilder {
    config: DisplayConfig,
}

impl NumberDisplayBuilder {
    pub fn format(mut self, options: FormatOptions) -> Self {
        self.config.format = options;
        self
    }

    pub fn decimal_separator(mut self, sep: char) -> Self {
        self.config.format.decimal_separator = sep;
        self
    }

    pub fn group_separator(mut self, sep: char) -> Self {
        self.config.format.group_separator = sep;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.config.format.precision = precision;
        self
    }

    pub fn allow_leading_zeros(mut self, allow: bool) -> Self {
        self.config.format.allow_leading_zeros = allow;
        self
    }

    pub fn max_font_size(mut self, size: f32) -> Self {
        self.config.max_font_size = size;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.config.font_family = Some(family.into());
        self
    }

    pub fn separator_animation(mut self, animation: SeparatorAnimation) -> Self {
        self.config.separator_animation = animation;
        self
    }

    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.config.animation = animation;
        self
    }

    pub fn monitoring(mut self, enabled: bool) -> Self {
        self.config.monitoring = enabled;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<NumberDisplay> {
        NumberDisplay::from_config(self.config)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Identity bookkeeping of the last [`NumberDisplay::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub reused: usize,
    pub fresh: usize,
    pub exiting: usize,
    /// Reused glyphs whose index among the live glyphs changed.
    pub moved: usize,
}

impl PassSummary {
    /// Whether the pass enters, exits, or moves anything.
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.fresh > 0 || self.exiting > 0 || self.moved > 0
    }
}

/// Positional glyphs shown by the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Mounted {
    prefix: usize,
    suffix: usize,
    placeholder: usize,
}

/// Caller-owned state of one display.
#[derive(Debug)]
pub struct NumberDisplayState<S = ProcessIds> {
    value: String,
    chars: Vec<TaggedChar>,
    unmount: Vec<GlyphId>,
    moved: FxHashSet<GlyphId>,
    ids: S,
    container_width: f32,
    mounted: Mounted,
    last_pass: PassSummary,
    rendered: bool,
    metrics: RenderMetrics,
}

impl NumberDisplayState<ProcessIds> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(ProcessIds)
    }
}

impl Default for NumberDisplayState<ProcessIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: IdSource> NumberDisplayState<S> {
    /// State drawing identities from `ids`.
    #[must_use]
    pub fn with_ids(ids: S) -> Self {
        Self {
            value: String::new(),
            chars: Vec::new(),
            unmount: Vec::new(),
            moved: FxHashSet::default(),
            ids,
            container_width: 0.0,
            mounted: Mounted::default(),
            last_pass: PassSummary::default(),
            rendered: true,
            metrics: RenderMetrics::new(),
        }
    }

    /// The formatted value of the last update.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Tagged glyphs of the last update. Exiting ones come last and are
    /// dropped once a render has shown them.
    #[must_use]
    pub fn chars(&self) -> &[TaggedChar] {
        &self.chars
    }

    /// Identities the next render will unmount.
    #[must_use]
    pub fn pending_unmounts(&self) -> &[GlyphId] {
        &self.unmount
    }

    #[must_use]
    pub fn last_pass(&self) -> PassSummary {
        self.last_pass
    }

    #[must_use]
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Record the container's measured width. Zero or less means unknown.
    pub fn set_container_width(&mut self, width: f32) {
        if width != self.container_width {
            tracing::trace!(message = "display.resize", from = self.container_width, to = width);
            self.container_width = width;
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &RenderMetrics {
        &self.metrics
    }

    /// The host finished animating the last change.
    ///
    /// Returns how long the animation window was open, or `None` when no
    /// window was open (or monitoring is off).
    pub fn finish_animation(&mut self) -> Option<Duration> {
        self.metrics.end_animation(VALUE_ANIMATION)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// What one [`NumberDisplay::render`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub sizing: Sizing,
    /// Glyphs handed to [`GlyphRenderer::render`].
    pub rendered: usize,
    /// Keys handed to [`GlyphRenderer::unmount`].
    pub unmounted: usize,
    /// The update this render showed.
    pub pass: PassSummary,
    /// A width measurement the host must perform and report back through
    /// [`WidthRatioCache::resolve`].
    pub measure: Option<MeasureRequest>,
}

/// Validated display configuration plus the transitions derived from it.
#[derive(Debug, Clone)]
pub struct NumberDisplay {
    config: DisplayConfig,
    format: NumberFormat,
    transitions: GlyphTransitions,
}

impl Default for NumberDisplay {
    fn default() -> Self {
        let config = DisplayConfig::default();
        Self {
            format: NumberFormat::default(),
            transitions: GlyphTransitions::new(config.animation),
            config,
        }
    }
}

impl TryFrom<DisplayConfig> for NumberDisplay {
    type Error = config::ConfigError;

    fn try_from(config: DisplayConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl NumberDisplay {
    pub fn builder() -> NumberDisplayBuilder {
        NumberDisplayBuilder::default()
    }

    /// Validate `config`.
    pub fn from_config(config: DisplayConfig) -> Result<Self> {
        let format = NumberFormat::new(config.format)?;
        config::validate_font_size(config.max_font_size)?;
        Ok(Self {
            format,
            transitions: GlyphTransitions::new(config.animation),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    #[must_use]
    pub fn transitions(&self) -> &GlyphTransitions {
        &self.transitions
    }

    #[must_use]
    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    /// Clean and format raw text input.
    #[must_use]
    pub fn handle_input(&self, raw: &str) -> String {
        self.format.format_input(raw)
    }

    /// Show `value` (already formatted) next.
    ///
    /// Exits the previous pass never got to show are queued for unmount. A
    /// pass that was never rendered keeps its entering glyphs entering.
    pub fn update<S: IdSource>(&self, value: &str, state: &mut NumberDisplayState<S>) -> PassSummary {
        let options = self.format.options();
        let tokens = classify(value, options.decimal_separator, options.group_separator);

        state
            .unmount
            .extend(state.chars.iter().filter(|c| c.is_exiting()).map(|c| c.id));

        let previous_slots: FxHashMap<GlyphId, usize> = state
            .chars
            .iter()
            .filter(|c| !c.is_exiting())
            .enumerate()
            .map(|(slot, c)| (c.id, slot))
            .collect();
        let unshown: FxHashSet<GlyphId> = if state.rendered {
            FxHashSet::default()
        } else {
            state
                .chars
                .iter()
                .filter(|c| c.lifecycle == Lifecycle::Entering)
                .map(|c| c.id)
                .collect()
        };

        let pass = reconcile(&tokens, &state.chars, &mut state.ids);
        let mut summary = PassSummary {
            reused: pass.reused(),
            fresh: pass.fresh(),
            exiting: pass.exiting(),
            moved: 0,
        };
        let mut chars = pass.into_vec();

        state.moved.clear();
        for (slot, c) in chars.iter_mut().filter(|c| !c.is_exiting()).enumerate() {
            if c.lifecycle != Lifecycle::Stable {
                continue;
            }
            if unshown.contains(&c.id) {
                c.lifecycle = Lifecycle::Entering;
            } else if previous_slots.get(&c.id) != Some(&slot) {
                state.moved.insert(c.id);
            }
        }
        summary.moved = state.moved.len();

        tracing::debug!(
            message = "display.update",
            value,
            reused = summary.reused,
            fresh = summary.fresh,
            exiting = summary.exiting,
            moved = summary.moved
        );

        state.value.clear();
        state.value.push_str(value);
        state.chars = chars;
        state.last_pass = summary;
        state.rendered = false;
        summary
    }

    /// Size and draw the last updated value.
    pub fn render<S, R>(
        &self,
        state: &mut NumberDisplayState<S>,
        cache: &mut WidthRatioCache,
        renderer: &mut R,
    ) -> RenderReport
    where
        S: IdSource,
        R: GlyphRenderer + ?Sized,
    {
        let render_span = tracing::debug_span!(
            "display.render",
            chars = state.chars.len(),
            font_size = tracing::field::Empty,
            rendered = tracing::field::Empty,
            unmounted = tracing::field::Empty
        );
        let _render_guard = render_span.enter();

        let mut unmounted = state.unmount.len();
        for id in state.unmount.drain(..) {
            renderer.unmount(GlyphKey::Char(id));
        }

        let lookup = cache.lookup(self.config.font_family.as_deref());
        let ratio = lookup.ratio();
        let measure = lookup.into_request();

        let live: Vec<CharToken> = state
            .chars
            .iter()
            .filter(|c| !c.is_exiting())
            .map(|c| c.token)
            .collect();
        let shown = if live.is_empty() {
            Mounted {
                prefix: 0,
                suffix: 0,
                placeholder: self.config.placeholder.chars().count(),
            }
        } else {
            Mounted {
                prefix: self.config.prefix.chars().count(),
                suffix: self.config.suffix.chars().count(),
                placeholder: 0,
            }
        };

        let units = total_units(&live, shown.prefix, shown.suffix) + shown.placeholder as f32;
        let sizing = fit_units(
            units,
            state.container_width,
            ratio,
            self.config.max_font_size,
        );

        let before = state.mounted;
        for i in shown.prefix..before.prefix {
            renderer.unmount(GlyphKey::Prefix(i));
        }
        for i in shown.placeholder..before.placeholder {
            renderer.unmount(GlyphKey::Placeholder(i));
        }
        for i in shown.suffix..before.suffix {
            renderer.unmount(GlyphKey::Suffix(i));
        }
        unmounted += before.prefix.saturating_sub(shown.prefix)
            + before.placeholder.saturating_sub(shown.placeholder)
            + before.suffix.saturating_sub(shown.suffix);

        let positional = |key: GlyphKey, ch: char, was_shown: bool, renderer: &mut R| {
            let (lifecycle, transition) = if was_shown {
                (Lifecycle::Stable, &self.transitions.layout)
            } else {
                (Lifecycle::Entering, &self.transitions.enter)
            };
            renderer.render(&GlyphFrame {
                key,
                ch,
                kind: None,
                lifecycle,
                width: sizing.char_width,
                font_size: sizing.font_size,
                transition,
                transitions: &self.transitions,
            });
        };

        for (i, ch) in self.config.prefix.chars().take(shown.prefix).enumerate() {
            positional(GlyphKey::Prefix(i), ch, i < before.prefix, &mut *renderer);
        }
        for (i, ch) in self.config.placeholder.chars().take(shown.placeholder).enumerate() {
            positional(GlyphKey::Placeholder(i), ch, i < before.placeholder, &mut *renderer);
        }
        for c in &state.chars {
            renderer.render(&GlyphFrame {
                key: GlyphKey::Char(c.id),
                ch: c.ch(),
                kind: Some(c.kind()),
                lifecycle: c.lifecycle,
                width: sizing.glyph_width(c.kind()),
                font_size: sizing.font_size,
                transition: self.transition_for(c, state.moved.contains(&c.id)),
                transitions: &self.transitions,
            });
        }
        for (i, ch) in self.config.suffix.chars().take(shown.suffix).enumerate() {
            positional(GlyphKey::Suffix(i), ch, i < before.suffix, &mut *renderer);
        }

        let rendered = shown.prefix + shown.placeholder + state.chars.len() + shown.suffix;

        // Exits have had their frame; the next render unmounts them.
        let (live_chars, exits): (Vec<TaggedChar>, Vec<TaggedChar>) =
            std::mem::take(&mut state.chars)
                .into_iter()
                .partition(|c| !c.is_exiting());
        state.unmount.extend(exits.iter().map(|c| c.id));
        state.chars = live_chars;

        if self.config.monitoring {
            state.metrics.record_render();
            if !state.rendered && state.last_pass.changed() {
                state.metrics.start_animation(VALUE_ANIMATION);
            }
        }

        state.mounted = shown;
        state.rendered = true;

        render_span.record("font_size", sizing.font_size);
        render_span.record("rendered", rendered);
        render_span.record("unmounted", unmounted);

        RenderReport {
            sizing,
            rendered,
            unmounted,
            pass: state.last_pass,
            measure,
        }
    }

    /// Separators only swap when their slot among the live glyphs changed.
    fn transition_for(&self, c: &TaggedChar, moved: bool) -> &Transition {
        match c.lifecycle {
            Lifecycle::Entering => &self.transitions.enter,
            Lifecycle::Exiting => &self.transitions.exit,
            Lifecycle::Stable if moved => self
                .transitions
                .layout_for(c.kind(), self.config.separator_animation),
            Lifecycle::Stable => &self.transitions.layout,
        }
    }
}
