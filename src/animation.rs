// Keyframe presets for the optional animation engine, and the embellisher capability.
// Correctness never depends on the engine: class toggles carry the terminal state.

use std::rc::Rc;

use serde::Serialize;

use crate::types::Millis;

/// A property track: a single target value, or an explicit keyframe list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Keyframes {
    To(f64),
    Values(Vec<f64>),
}

impl Keyframes {
    pub fn from_to(from: f64, to: f64) -> Self {
        Keyframes::Values(vec![from, to])
    }
}

/// Engine-agnostic animation parameters. Serializes to the engine's option object.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_z: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_x: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_y: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_z: Option<Keyframes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Keyframes>,
    pub duration: u32,
    pub easing: &'static str,
    #[serde(skip_serializing_if = "is_zero")]
    pub delay: u32,
    #[serde(rename = "loop", skip_serializing_if = "std::ops::Not::not")]
    pub looped: bool,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl AnimationSpec {
    fn new(duration: u32, easing: &'static str) -> Self {
        AnimationSpec {
            duration,
            easing,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Millis) -> Self {
        self.delay = delay.as_millis();
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Timeline item sliding in from the left.
pub fn timeline_item() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_x: Some(Keyframes::from_to(-50.0, 0.0)),
        rotate_y: Some(Keyframes::from_to(45.0, 0.0)),
        ..AnimationSpec::new(800, "easeOutQuart")
    }
}

/// Skill card flipping up into place.
pub fn skill_card() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_y: Some(Keyframes::from_to(50.0, 0.0)),
        rotate_x: Some(Keyframes::from_to(90.0, 0.0)),
        scale: Some(Keyframes::from_to(0.8, 1.0)),
        ..AnimationSpec::new(600, "easeOutElastic(1, .6)")
    }
}

pub fn section_title() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_y: Some(Keyframes::from_to(100.0, 0.0)),
        rotate_x: Some(Keyframes::from_to(90.0, 0.0)),
        scale: Some(Keyframes::from_to(0.5, 1.0)),
        ..AnimationSpec::new(1000, "easeOutElastic(1, .8)")
    }
}

/// Modal panel rotate-in.
pub fn modal_content() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        rotate_y: Some(Keyframes::from_to(90.0, 0.0)),
        scale: Some(Keyframes::from_to(0.5, 1.0)),
        ..AnimationSpec::new(500, "easeOutElastic(1, .6)")
    }
}

pub fn hero_title() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_y: Some(Keyframes::from_to(50.0, 0.0)),
        rotate_x: Some(Keyframes::from_to(90.0, 0.0)),
        ..AnimationSpec::new(1200, "easeOutElastic(1, .6)")
    }
    .with_delay(Millis::from_millis(300))
}

pub fn hero_subtitle() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_x: Some(Keyframes::from_to(-100.0, 0.0)),
        rotate_y: Some(Keyframes::from_to(90.0, 0.0)),
        ..AnimationSpec::new(1000, "easeOutQuart")
    }
    .with_delay(Millis::from_millis(600))
}

pub fn hero_tagline() -> AnimationSpec {
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_y: Some(Keyframes::from_to(30.0, 0.0)),
        scale: Some(Keyframes::from_to(0.8, 1.0)),
        ..AnimationSpec::new(800, "easeOutCubic")
    }
    .with_delay(Millis::from_millis(900))
}

/// Call-to-action button `index`, cascading from 1200ms in 100ms steps.
pub fn hero_cta_button(index: usize) -> AnimationSpec {
    let delay = Millis::from_millis(1200).saturating_add(Millis::from_millis(100).times(index));
    AnimationSpec {
        opacity: Some(Keyframes::from_to(0.0, 1.0)),
        translate_y: Some(Keyframes::from_to(50.0, 0.0)),
        rotate_z: Some(Keyframes::from_to(10.0, 0.0)),
        scale: Some(Keyframes::from_to(0.8, 1.0)),
        ..AnimationSpec::new(600, "easeOutBounce")
    }
    .with_delay(delay)
}

pub fn card_hover_enter() -> AnimationSpec {
    AnimationSpec {
        rotate_x: Some(Keyframes::from_to(0.0, -10.0)),
        rotate_y: Some(Keyframes::from_to(0.0, 10.0)),
        translate_z: Some(Keyframes::from_to(0.0, 50.0)),
        scale: Some(Keyframes::from_to(1.0, 1.05)),
        ..AnimationSpec::new(300, "easeOutQuart")
    }
}

pub fn card_hover_leave() -> AnimationSpec {
    AnimationSpec {
        rotate_x: Some(Keyframes::To(0.0)),
        rotate_y: Some(Keyframes::To(0.0)),
        translate_z: Some(Keyframes::To(0.0)),
        scale: Some(Keyframes::To(1.0)),
        ..AnimationSpec::new(300, "easeOutQuart")
    }
}

/// Endless drift for decorative shape `index`; later shapes are slower and start later.
pub fn floating_shape(index: usize) -> AnimationSpec {
    let step = Millis::from_millis(1000).times(index);
    AnimationSpec {
        translate_y: Some(Keyframes::Values(vec![0.0, -30.0, 0.0])),
        translate_x: Some(Keyframes::Values(vec![0.0, 15.0, 0.0])),
        rotate_z: Some(Keyframes::from_to(0.0, 360.0)),
        scale: Some(Keyframes::Values(vec![1.0, 1.1, 1.0])),
        looped: true,
        ..AnimationSpec::new(
            Millis::from_millis(6000).saturating_add(step).as_millis(),
            "easeInOutSine",
        )
    }
    .with_delay(step)
}

/// Optional visual embellishment applied on top of the class-driven states.
///
/// Selected once at startup: a real engine binding when the page loaded one,
/// [`NoopEmbellisher`] otherwise.
pub trait Embellisher<T: ?Sized> {
    /// Whether embellishments will actually run.
    fn is_active(&self) -> bool;

    fn embellish(&self, target: &T, spec: &AnimationSpec);
}

/// Used when no animation engine is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmbellisher;

impl<T: ?Sized> Embellisher<T> for NoopEmbellisher {
    fn is_active(&self) -> bool {
        false
    }

    fn embellish(&self, _target: &T, _spec: &AnimationSpec) {}
}

impl<T: ?Sized, E: Embellisher<T> + ?Sized> Embellisher<T> for Rc<E> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn embellish(&self, target: &T, spec: &AnimationSpec) {
        (**self).embellish(target, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_serializes_engine_option_names() {
        let json = timeline_item().to_json().unwrap();
        assert!(json.contains(r#""translateX":[-50.0,0.0]"#));
        assert!(json.contains(r#""rotateY":[45.0,0.0]"#));
        assert!(json.contains(r#""duration":800"#));
        assert!(!json.contains("delay"));
        assert!(!json.contains("loop"));
        assert!(!json.contains("scale"));
    }

    #[test]
    fn hover_leave_uses_scalar_targets() {
        let json = card_hover_leave().to_json().unwrap();
        assert!(json.contains(r#""scale":1.0"#));
        assert!(json.contains(r#""translateZ":0.0"#));
    }

    #[test]
    fn floating_shapes_slow_down_with_index() {
        let first = floating_shape(0);
        let third = floating_shape(2);
        assert_eq!(first.duration, 6000);
        assert_eq!(first.delay, 0);
        assert_eq!(third.duration, 8000);
        assert_eq!(third.delay, 2000);
        assert!(third.to_json().unwrap().contains(r#""loop":true"#));
    }

    #[test]
    fn cta_buttons_cascade() {
        assert_eq!(hero_cta_button(0).delay, 1200);
        assert_eq!(hero_cta_button(3).delay, 1500);
    }

    #[test]
    fn reveal_durations_stay_in_range() {
        for spec in [timeline_item(), skill_card(), section_title(), hero_title()] {
            assert!((600..=1200).contains(&spec.duration));
            assert_eq!(spec.opacity, Some(Keyframes::from_to(0.0, 1.0)));
        }
    }

    #[test]
    fn noop_is_inactive() {
        let noop = NoopEmbellisher;
        assert!(!Embellisher::<str>::is_active(&noop));
        noop.embellish("target", &skill_card());
    }

    #[test]
    fn shared_handle_forwards() {
        let shared: Rc<dyn Embellisher<str>> = Rc::new(NoopEmbellisher);
        let boxed: Box<dyn Embellisher<str>> = Box::new(Rc::clone(&shared));
        assert!(!boxed.is_active());
    }
}
