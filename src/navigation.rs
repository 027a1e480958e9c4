// Navigation: mobile menu state, header scroll style, smooth-scroll geometry and fallback easing.

use crate::types::ScrollSettings;

/// Mobile menu open/closed. Mirrors the `active` class on menu and toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Inline header styling for the current scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl HeaderStyle {
    pub const SOLID: HeaderStyle = HeaderStyle {
        background: "rgba(255, 255, 255, 0.98)",
        box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
    };

    pub const TRANSLUCENT: HeaderStyle = HeaderStyle {
        background: "rgba(255, 255, 255, 0.95)",
        box_shadow: "none",
    };

    pub fn for_scroll(scroll_y: f64, settings: &ScrollSettings) -> Self {
        if scroll_y > settings.header_solid_after_px {
            HeaderStyle::SOLID
        } else {
            HeaderStyle::TRANSLUCENT
        }
    }
}

/// Selector for an in-page anchor, or `None` for bare `#` and external links.
pub fn anchor_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Scroll position that puts `offset_top` just below the fixed header.
pub fn scroll_target(offset_top: f64, header_height: Option<f64>, settings: &ScrollSettings) -> f64 {
    offset_top - header_height.unwrap_or(settings.header_offset_fallback_px)
}

/// Quadratic ease-in-out: `t` elapsed, `b` start, `c` change, `d` duration.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Frame-driven scroll for platforms without native smooth behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    start: f64,
    distance: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

/// Position for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    pub done: bool,
}

impl SmoothScroll {
    pub fn new(start: f64, target: f64, duration_ms: u32) -> Self {
        SmoothScroll {
            start,
            distance: target - start,
            duration_ms: duration_ms as f64,
            started_at: None,
        }
    }

    /// Advance to the frame timestamp `now` (ms). The first call anchors the clock.
    pub fn step(&mut self, now: f64) -> ScrollFrame {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);
        if elapsed >= self.duration_ms {
            return ScrollFrame {
                position: self.start + self.distance,
                done: true,
            };
        }
        ScrollFrame {
            position: ease_in_out_quad(elapsed, self.start, self.distance, self.duration_ms),
            done: false,
        }
    }
}
