// Contact form binding: blur feedback, submit gate, success banner.
// Inert unless the form and all four fields exist.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::{by_id, create, js_err, query_all, set_style};
use crate::error::PortfolioError;
use crate::form::{
    BannerSchedule, FormController, FormSnapshot, SubmitOutcome, SubmitTransport, SUCCESS_MESSAGE,
};
use crate::types::BannerSettings;
use crate::validation::{FieldName, FieldState};

const BANNER_STYLE: &str = "background: var(--color-success); color: white; padding: 16px; \
     border-radius: 8px; margin-top: 16px; text-align: center; font-weight: 500; opacity: 0; \
     transform: translateY(-10px); transition: all 0.3s ease;";

/// Logs accepted submissions to the developer console. Nothing leaves the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTransport;

impl SubmitTransport for ConsoleTransport {
    fn submit(&self, snapshot: &FormSnapshot) -> Result<(), PortfolioError> {
        console::log!("Form submitted with data:", snapshot.to_json()?);
        Ok(())
    }
}

pub struct ContactForm {
    document: Document,
    form: HtmlFormElement,
    fields: Vec<(FieldName, Element)>,
    controller: FormController<Box<dyn SubmitTransport>>,
    banner: BannerSchedule,
    listeners: RefCell<Vec<EventListener>>,
}

impl ContactForm {
    pub fn mount(
        document: &Document,
        banner: BannerSettings,
        transport: Box<dyn SubmitTransport>,
    ) -> Result<Rc<Self>, PortfolioError> {
        let form = by_id(document, "contact-form")?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| PortfolioError::MissingElement("form#contact-form".to_string()))?;

        let fields = FieldName::ALL
            .iter()
            .map(|field| by_id(document, field.id()).map(|element| (*field, element)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                PortfolioError::MissingElement(format!("Contact form fields missing ({err})"))
            })?;

        let contact = Rc::new(ContactForm {
            document: document.clone(),
            form,
            fields,
            controller: FormController::new(transport),
            banner: BannerSchedule::from_settings(&banner),
            listeners: RefCell::new(Vec::new()),
        });
        contact.install_listeners();
        Ok(contact)
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let contact = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.form, "submit", move |event: &Event| {
            event.prevent_default();
            if let Some(contact) = contact.upgrade() {
                contact.on_submit();
            }
        }));

        for (field, element) in &self.fields {
            let field = *field;
            let contact = Rc::downgrade(self);
            listeners.push(EventListener::new(element, "blur", move |_event: &Event| {
                if let Some(contact) = contact.upgrade() {
                    contact.on_blur(field);
                }
            }));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    fn on_blur(&self, field: FieldName) {
        let value = self.value(field);
        let state = self.controller.blur(field, &value);
        self.render_field(&state);
    }

    fn on_submit(&self) {
        self.clear_errors();
        let snapshot = self.snapshot();

        match self.controller.submit(snapshot) {
            Ok(SubmitOutcome::Rejected { failures }) => {
                for state in &failures {
                    self.render_field(state);
                }
                console::log!("Form validation failed");
            }
            Ok(SubmitOutcome::Accepted { .. }) => {
                if let Err(err) = self.show_banner(SUCCESS_MESSAGE) {
                    console::warn!("success banner skipped", err.to_string());
                }
                self.form.reset();
            }
            Err(err) => console::error!("form submit failed", err.to_string()),
        }
    }

    fn value(&self, field: FieldName) -> String {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, element)| field_value(element))
            .unwrap_or_default()
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.value(FieldName::Name),
            email: self.value(FieldName::Email),
            subject: self.value(FieldName::Subject),
            message: self.value(FieldName::Message),
        }
    }

    fn render_field(&self, state: &FieldState) {
        let Some(error) = self.document.get_element_by_id(&state.field.error_id()) else {
            return;
        };
        match state.error {
            Some(message) => {
                error.set_text_content(Some(message));
                let _ = error.class_list().add_1("show");
                set_style(&error, "display", "block");
            }
            None => hide_error(&error),
        }
    }

    fn clear_errors(&self) {
        for error in query_all(&self.document, ".form-error") {
            hide_error(&error);
        }
    }

    /// Insert the banner right after the form; fade in, hold, fade out, detach.
    fn show_banner(&self, message: &str) -> Result<(), PortfolioError> {
        for existing in query_all(&self.document, ".form-feedback") {
            existing.remove();
        }

        let parent = self
            .form
            .parent_node()
            .ok_or_else(|| PortfolioError::MissingElement("contact form parent".to_string()))?;
        let banner = create(&self.document, "div", "form-feedback")?;
        banner
            .set_attribute("style", BANNER_STYLE)
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
        banner.set_text_content(Some(message));
        parent
            .insert_before(&banner, self.form.next_sibling().as_ref())
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;

        let shown = banner.clone();
        Timeout::new(self.banner.fade_in_at.as_millis(), move || {
            set_style(&shown, "opacity", "1");
            set_style(&shown, "transform", "translateY(0)");
        })
        .forget();

        let fade_out = self
            .banner
            .detach_at
            .as_millis()
            .saturating_sub(self.banner.fade_out_at.as_millis());
        Timeout::new(self.banner.fade_out_at.as_millis(), move || {
            if banner.parent_node().is_none() {
                return;
            }
            set_style(&banner, "opacity", "0");
            set_style(&banner, "transform", "translateY(-10px)");
            Timeout::new(fade_out, move || banner.remove()).forget();
        })
        .forget();

        Ok(())
    }
}

fn hide_error(error: &Element) {
    let _ = error.class_list().remove_1("show");
    set_style(error, "display", "none");
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    element.get_attribute("value").unwrap_or_default()
}
