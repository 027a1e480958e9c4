// Binding to the page's optional animation engine (`window.anime`). Detected once at mount.

use std::rc::Rc;

use gloo::console;
use js_sys::{Function, Reflect, JSON};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

use super::js_err;
use crate::animation::{AnimationSpec, Embellisher, NoopEmbellisher};
use crate::error::PortfolioError;

/// Runs [`AnimationSpec`]s through the page's animation engine.
#[derive(Clone)]
pub struct AnimeEmbellisher {
    anime: Function,
}

impl AnimeEmbellisher {
    pub fn detect(window: &Window) -> Option<Self> {
        let value = Reflect::get(window, &JsValue::from_str("anime")).ok()?;
        value
            .dyn_into::<Function>()
            .ok()
            .map(|anime| AnimeEmbellisher { anime })
    }

    fn params(&self, target: &Element, spec: &AnimationSpec) -> Result<JsValue, PortfolioError> {
        let json = spec.to_json()?;
        let params =
            JSON::parse(&json).map_err(|err| PortfolioError::Serialization(js_err(err)))?;
        Reflect::set(&params, &JsValue::from_str("targets"), target)
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
        Ok(params)
    }
}

impl Embellisher<Element> for AnimeEmbellisher {
    fn is_active(&self) -> bool {
        true
    }

    fn embellish(&self, target: &Element, spec: &AnimationSpec) {
        let result = self
            .params(target, spec)
            .and_then(|params| {
                self.anime
                    .call1(&JsValue::NULL, &params)
                    .map_err(|err| PortfolioError::Dom(js_err(err)))
            });
        if let Err(err) = result {
            console::warn!("animation skipped", err.to_string());
        }
    }
}

/// Pick the engine binding if the page loaded one, else the no-op.
pub fn select_embellisher(window: &Window) -> Rc<dyn Embellisher<Element>> {
    match AnimeEmbellisher::detect(window) {
        Some(engine) => Rc::new(engine),
        None => {
            console::warn!("Anime.js not loaded, skipping 3D animations");
            Rc::new(NoopEmbellisher)
        }
    }
}
