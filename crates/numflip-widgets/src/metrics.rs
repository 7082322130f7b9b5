#![forbid(unsafe_code)]

//! Render and animation bookkeeping for a display.
//!
//! Counts render passes and brackets the most recent animation window. Every
//! tenth render and every animation boundary is logged at debug level under
//! the `display.metrics` message.

use std::time::Duration;

use web_time::Instant;

/// Render passes between two render-count log lines.
pub const LOG_EVERY: u64 = 10;

/// Point-in-time copy of a [`RenderMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub render_count: u64,
    pub last_render: Option<Instant>,
    pub animation_start: Option<Instant>,
    pub animation_end: Option<Instant>,
}

impl MetricsSnapshot {
    /// Length of the last completed animation window.
    #[must_use]
    pub fn last_animation(&self) -> Option<Duration> {
        match (self.animation_start, self.animation_end) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderMetrics {
    render_count: u64,
    last_render: Option<Instant>,
    animation_start: Option<Instant>,
    animation_end: Option<Instant>,
}

impl RenderMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one render pass.
    pub fn record_render(&mut self) {
        self.render_count += 1;
        self.last_render = Some(Instant::now());
        if self.render_count % LOG_EVERY == 0 {
            tracing::debug!(
                message = "display.metrics",
                render_count = self.render_count
            );
        }
    }

    /// Open an animation window. A window that is already open restarts.
    pub fn start_animation(&mut self, name: &str) -> Instant {
        let now = Instant::now();
        self.animation_start = Some(now);
        self.animation_end = None;
        tracing::debug!(message = "display.metrics", animation = name, phase = "start");
        now
    }

    /// Close the open animation window and return its length.
    ///
    /// Returns `None` (and records nothing) when no window is open.
    pub fn end_animation(&mut self, name: &str) -> Option<Duration> {
        let start = self.animation_start?;
        if self.animation_end.is_some() {
            return None;
        }
        let now = Instant::now();
        self.animation_end = Some(now);
        let elapsed = now.saturating_duration_since(start);
        tracing::debug!(
            message = "display.metrics",
            animation = name,
            phase = "end",
            duration_ms = elapsed.as_millis() as u64
        );
        Some(elapsed)
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation_start.is_some() && self.animation_end.is_none()
    }

    #[inline]
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            render_count: self.render_count,
            last_render: self.last_render,
            animation_start: self.animation_start,
            animation_end: self.animation_end,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
