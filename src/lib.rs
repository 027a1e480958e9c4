// portfolio_core: Rust/WASM client for the portfolio page.
// State machines, validators and presets are plain Rust; `dom` binds them to the browser.

mod animation;
mod error;
mod form;
mod modal;
mod motion;
mod navigation;
mod projects;
mod reveal;
mod types;
mod validation;
mod watcher;

#[cfg(target_arch = "wasm32")]
mod dom;

use wasm_bindgen::prelude::*;

pub use animation::{AnimationSpec, Embellisher, Keyframes, NoopEmbellisher};
pub use error::PortfolioError;
pub use form::{
    BannerSchedule, FormController, FormSnapshot, SubmitOutcome, SubmitTransport, SUCCESS_MESSAGE,
};
pub use modal::{DismissTrigger, ModalController, OpenTransition, Overlay, OverlayId};
pub use motion::{parse_skill_width, skill_width_css};
pub use navigation::{ease_in_out_quad, HeaderStyle, NavMenu, ScrollFrame, SmoothScroll};
pub use projects::{project_at, resolve_index, ProjectDescriptor, PROJECTS};
pub use reveal::{FireState, RevealCategory, RevealDispatcher, RevealId, RevealTarget};
pub use types::*;
pub use validation::{
    is_valid_email, is_valid_message, is_valid_name, is_valid_subject, FieldName, FieldState,
    ValidationPhase,
};
pub use watcher::{IntersectionReport, WatchId, WatchRegistry};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Page controller exposed to JavaScript. Construct once after the DOM is ready.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct PortfolioApp {
    page: dom::Page,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl PortfolioApp {
    /// Mount every feature. `config_json` overrides timings; omitted fields keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortfolioApp, JsValue> {
        let config = PortfolioConfig::from_json(config_json.as_deref().unwrap_or_default())
            .map_err(to_js)?;
        let page = dom::Page::mount(config).map_err(to_js)?;
        Ok(PortfolioApp { page })
    }

    /// Show the detail overlay for a project. Out-of-range indices show the first project.
    pub fn open_project(&self, index: usize) -> Result<(), JsValue> {
        self.page.modal().open(index).map_err(to_js)
    }

    pub fn close_project(&self) {
        self.page.modal().dismiss(DismissTrigger::CloseButton);
    }

    /// `opening`, `open`, `closing` or `closed`.
    pub fn modal_state(&self) -> String {
        self.page.modal().state().as_str().to_string()
    }

    pub fn scroll_locked(&self) -> bool {
        self.page.modal().scroll_locked()
    }
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: PortfolioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

