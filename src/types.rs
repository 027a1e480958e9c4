// Strong typing over strings. Newtypes for delays, overlay states, and page configuration.

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

/// Delay or duration in milliseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Millis(u32);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn from_millis(ms: u32) -> Self {
        Millis(ms)
    }

    pub fn as_millis(&self) -> u32 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// `self * factor`, saturating at `u32::MAX`.
    pub fn times(&self, factor: usize) -> Millis {
        let factor = u32::try_from(factor).unwrap_or(u32::MAX);
        Millis(self.0.saturating_mul(factor))
    }

    pub fn saturating_add(&self, other: Millis) -> Millis {
        Millis(self.0.saturating_add(other.0))
    }

    /// CSS `transition-delay` value, e.g. `0.2s`.
    pub fn to_css_seconds(&self) -> String {
        format!("{}s", self.as_secs())
    }
}

/// Lifecycle of the single project overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayState {
    /// Attached, waiting for the next paint to fade in.
    Opening,
    Open,
    /// Fading out; removal is pending.
    Closing,
    Closed,
}

impl OverlayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayState::Opening => "opening",
            OverlayState::Open => "open",
            OverlayState::Closing => "closing",
            OverlayState::Closed => "closed",
        }
    }

    /// Whether this state holds the page scroll lock.
    pub fn holds_scroll_lock(&self) -> bool {
        matches!(self, OverlayState::Opening | OverlayState::Open)
    }
}

/// Page configuration passed from JS. Every field falls back to the built-in constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default)]
    pub stagger: StaggerSettings,
    #[serde(default)]
    pub modal: ModalSettings,
    #[serde(default)]
    pub banner: BannerSettings,
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default = "default_skill_bar_delay")]
    pub skill_bar_delay_ms: u32,
}

impl PortfolioConfig {
    /// Parse a config object. An empty string means "all defaults".
    pub fn from_json(json: &str) -> Result<Self, PortfolioError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| PortfolioError::InvalidConfig(e.to_string()))
    }

    pub fn skill_bar_delay(&self) -> Millis {
        Millis::from_millis(self.skill_bar_delay_ms)
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            watch: WatchSettings::default(),
            stagger: StaggerSettings::default(),
            modal: ModalSettings::default(),
            banner: BannerSettings::default(),
            scroll: ScrollSettings::default(),
            skill_bar_delay_ms: default_skill_bar_delay(),
        }
    }
}

fn default_skill_bar_delay() -> u32 {
    200
}

/// Viewport watcher options for reveal animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Visible fraction that counts as "seen".
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Shrinks the viewport from the bottom, so elements fire slightly later.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin_px: u32,
}

impl WatchSettings {
    /// Platform defaults: any intersection, no margin.
    pub fn immediate() -> Self {
        WatchSettings {
            threshold: 0.0,
            bottom_margin_px: 0,
        }
    }

    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        WatchSettings {
            threshold: default_threshold(),
            bottom_margin_px: default_bottom_margin(),
        }
    }
}

fn default_threshold() -> f64 {
    0.1
}

fn default_bottom_margin() -> u32 {
    50
}

/// Per-index stagger increments for reveal groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerSettings {
    #[serde(default = "default_card_step")]
    pub card_step_ms: u32,
    #[serde(default = "default_timeline_step")]
    pub timeline_step_ms: u32,
}

impl StaggerSettings {
    pub fn card_step(&self) -> Millis {
        Millis::from_millis(self.card_step_ms)
    }

    pub fn timeline_step(&self) -> Millis {
        Millis::from_millis(self.timeline_step_ms)
    }
}

impl Default for StaggerSettings {
    fn default() -> Self {
        StaggerSettings {
            card_step_ms: default_card_step(),
            timeline_step_ms: default_timeline_step(),
        }
    }
}

fn default_card_step() -> u32 {
    100
}

fn default_timeline_step() -> u32 {
    200
}

/// Modal transition timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSettings {
    /// CSS fade/scale duration; removal waits this long after close.
    #[serde(default = "default_modal_transition")]
    pub transition_ms: u32,
    /// Delay before the optional engine rotate-in starts.
    #[serde(default = "default_engine_delay")]
    pub engine_delay_ms: u32,
}

impl ModalSettings {
    pub fn transition(&self) -> Millis {
        Millis::from_millis(self.transition_ms)
    }

    pub fn engine_delay(&self) -> Millis {
        Millis::from_millis(self.engine_delay_ms)
    }
}

impl Default for ModalSettings {
    fn default() -> Self {
        ModalSettings {
            transition_ms: default_modal_transition(),
            engine_delay_ms: default_engine_delay(),
        }
    }
}

fn default_modal_transition() -> u32 {
    300
}

fn default_engine_delay() -> u32 {
    50
}

/// Success banner timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerSettings {
    #[serde(default = "default_fade_in_delay")]
    pub fade_in_delay_ms: u32,
    #[serde(default = "default_display")]
    pub display_ms: u32,
    #[serde(default = "default_fade_out")]
    pub fade_out_ms: u32,
}

impl BannerSettings {
    pub fn fade_in_delay(&self) -> Millis {
        Millis::from_millis(self.fade_in_delay_ms)
    }

    pub fn display(&self) -> Millis {
        Millis::from_millis(self.display_ms)
    }

    pub fn fade_out(&self) -> Millis {
        Millis::from_millis(self.fade_out_ms)
    }

    /// Time from insertion until the banner is detached.
    pub fn lifetime(&self) -> Millis {
        self.display().saturating_add(self.fade_out())
    }
}

impl Default for BannerSettings {
    fn default() -> Self {
        BannerSettings {
            fade_in_delay_ms: default_fade_in_delay(),
            display_ms: default_display(),
            fade_out_ms: default_fade_out(),
        }
    }
}

fn default_fade_in_delay() -> u32 {
    10
}

fn default_display() -> u32 {
    5000
}

fn default_fade_out() -> u32 {
    300
}

/// Smooth scroll and header behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// Used when the page has no `#header`.
    #[serde(default = "default_header_offset")]
    pub header_offset_fallback_px: f64,
    #[serde(default = "default_fallback_duration")]
    pub fallback_duration_ms: u32,
    #[serde(default = "default_header_solid_after")]
    pub header_solid_after_px: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        ScrollSettings {
            header_offset_fallback_px: default_header_offset(),
            fallback_duration_ms: default_fallback_duration(),
            header_solid_after_px: default_header_solid_after(),
        }
    }
}

fn default_header_offset() -> f64 {
    70.0
}

fn default_fallback_duration() -> u32 {
    800
}

fn default_header_solid_after() -> f64 {
    50.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_conversions() {
        let delay = Millis::from_millis(200).times(3);
        assert_eq!(delay.as_millis(), 600);
        assert!((delay.as_secs() - 0.6).abs() < 1e-9);
        assert_eq!(Millis::from_millis(100).to_css_seconds(), "0.1s");
        assert_eq!(Millis::ZERO.to_css_seconds(), "0s");
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(Millis::from_millis(u32::MAX).times(2).as_millis(), u32::MAX);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = PortfolioConfig::from_json("{}").unwrap();
        assert_eq!(config, PortfolioConfig::default());
        assert_eq!(config.watch.threshold, 0.1);
        assert_eq!(config.watch.root_margin(), "0px 0px -50px 0px");
        assert_eq!(config.banner.lifetime().as_millis(), 5300);
        assert_eq!(config.modal.transition().as_millis(), 300);
        assert_eq!(config.skill_bar_delay().as_millis(), 200);

        assert_eq!(PortfolioConfig::from_json("  ").unwrap(), PortfolioConfig::default());
    }

    #[test]
    fn partial_config_overrides_one_field() {
        let config = PortfolioConfig::from_json(r#"{"stagger":{"card_step_ms":50}}"#).unwrap();
        assert_eq!(config.stagger.card_step_ms, 50);
        assert_eq!(config.stagger.timeline_step_ms, 200);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = PortfolioConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidConfig(_)));
    }

    #[test]
    fn only_live_states_hold_lock() {
        assert!(OverlayState::Opening.holds_scroll_lock());
        assert!(OverlayState::Open.holds_scroll_lock());
        assert!(!OverlayState::Closing.holds_scroll_lock());
        assert!(!OverlayState::Closed.holds_scroll_lock());
    }
}
