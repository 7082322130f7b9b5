#![forbid(unsafe_code)]

//! The seam between a display and whatever draws its glyphs.
//!
//! A display never draws. Each pass it describes every glyph it wants on
//! screen as a [`GlyphFrame`] and hands it to a [`GlyphRenderer`]; glyphs
//! that left the screen are announced through [`GlyphRenderer::unmount`].
//! The renderer owns the actual motion, fading, and tweening.

use std::fmt;

use numflip_core::animation::{GlyphTransitions, Transition};
use numflip_core::classify::CharKind;
use numflip_core::identity::GlyphId;
use numflip_core::reconcile::Lifecycle;

/// Stable key of a drawn glyph.
///
/// Value characters are keyed by identity so they survive reflow. Affix and
/// placeholder characters never move relative to their neighbours and are
/// keyed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphKey {
    Char(GlyphId),
    Prefix(usize),
    Suffix(usize),
    Placeholder(usize),
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(id) => write!(f, "{id}"),
            Self::Prefix(i) => write!(f, "prefix-{i}"),
            Self::Suffix(i) => write!(f, "suffix-{i}"),
            Self::Placeholder(i) => write!(f, "placeholder-{i}"),
        }
    }
}

/// Everything a renderer needs to draw one glyph for one pass.
#[derive(Debug, Clone, Copy)]
pub struct GlyphFrame<'a> {
    pub key: GlyphKey,
    pub ch: char,
    /// `None` for affix and placeholder glyphs.
    pub kind: Option<CharKind>,
    pub lifecycle: Lifecycle,
    /// Target slot width.
    pub width: f32,
    /// Target font size.
    pub font_size: f32,
    /// The transition that applies now: enter, exit, or reposition.
    pub transition: &'a Transition,
    /// The display's full transition set (resize duration, swap parameters).
    pub transitions: &'a GlyphTransitions,
}

impl GlyphFrame<'_> {
    #[inline]
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.kind.is_some_and(CharKind::is_separator)
    }
}

/// Host-side glyph drawing.
pub trait GlyphRenderer {
    /// Draw (or move, or start exiting) the glyph described by `glyph`.
    fn render(&mut self, glyph: &GlyphFrame<'_>);

    /// The glyph with `key` is gone; release whatever backs it.
    fn unmount(&mut self, key: GlyphKey);
}

impl<R: GlyphRenderer + ?Sized> GlyphRenderer for &mut R {
    fn render(&mut self, glyph: &GlyphFrame<'_>) {
        (**self).render(glyph);
    }

    fn unmount(&mut self, key: GlyphKey) {
        (**self).unmount(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Count {
        rendered: usize,
        unmounted: usize,
    }

    impl GlyphRenderer for Count {
        fn render(&mut self, _glyph: &GlyphFrame<'_>) {
            self.rendered += 1;
        }

        fn unmount(&mut self, _key: GlyphKey) {
            self.unmounted += 1;
        }
    }

    fn drive<R: GlyphRenderer>(mut renderer: R, frame: &GlyphFrame<'_>) {
        renderer.render(frame);
        renderer.unmount(frame.key);
    }

    #[test]
    fn key_display() {
        assert_eq!(GlyphKey::Char(GlyphId::from_raw(7)).to_string(), "g7");
        assert_eq!(GlyphKey::Prefix(0).to_string(), "prefix-0");
        assert_eq!(GlyphKey::Suffix(2).to_string(), "suffix-2");
        assert_eq!(GlyphKey::Placeholder(1).to_string(), "placeholder-1");
    }

    #[test]
    fn separator_detection() {
        let transitions = GlyphTransitions::default();
        let mut frame = GlyphFrame {
            key: GlyphKey::Prefix(0),
            ch: '$',
            kind: None,
            lifecycle: Lifecycle::Stable,
            width: 10.0,
            font_size: 16.0,
            transition: &transitions.layout,
            transitions: &transitions,
        };
        assert!(!frame.is_separator());
        frame.kind = Some(CharKind::GroupSeparator);
        assert!(frame.is_separator());
        frame.kind = Some(CharKind::Digit);
        assert!(!frame.is_separator());
    }

    #[test]
    fn mut_ref_forwards() {
        let transitions = GlyphTransitions::default();
        let frame = GlyphFrame {
            key: GlyphKey::Suffix(0),
            ch: '%',
            kind: None,
            lifecycle: Lifecycle::Entering,
            width: 10.0,
            font_size: 16.0,
            transition: &transitions.enter,
            transitions: &transitions,
        };
        let mut count = Count {
            rendered: 0,
            unmounted: 0,
        };
        drive(&mut count, &frame);
        assert_eq!((count.rendered, count.unmounted), (1, 1));
    }
}
