// Contact form feedback: blur checks, submit gate, pluggable transport, banner timeline.

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::types::{BannerSettings, Millis};
use crate::validation::{FieldName, FieldState, ValidationPhase};

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you soon!";

/// Plain copy of the four field values taken on a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormSnapshot {
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Subject => &self.subject,
            FieldName::Message => &self.message,
        }
    }

    pub fn to_json(&self) -> Result<String, PortfolioError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Where an accepted submission goes.
pub trait SubmitTransport {
    fn submit(&self, snapshot: &FormSnapshot) -> Result<(), PortfolioError>;
}

impl<T: SubmitTransport + ?Sized> SubmitTransport for Box<T> {
    fn submit(&self, snapshot: &FormSnapshot) -> Result<(), PortfolioError> {
        (**self).submit(snapshot)
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; nothing was sent and nothing is reset.
    Rejected { failures: Vec<FieldState> },
    /// Handed to the transport; the form should reset and show the banner.
    Accepted { snapshot: FormSnapshot },
}

/// Validation and submit gate for the contact form.
pub struct FormController<T: SubmitTransport> {
    transport: T,
}

impl<T: SubmitTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        FormController { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate a single field after it loses focus.
    pub fn blur(&self, field: FieldName, value: &str) -> FieldState {
        FieldState::evaluate(field, value, ValidationPhase::Blur)
    }

    /// Validate all fields; on success pass the snapshot to the transport.
    pub fn submit(&self, values: FormSnapshot) -> Result<SubmitOutcome, PortfolioError> {
        let failures: Vec<FieldState> = FieldName::ALL
            .iter()
            .map(|field| {
                FieldState::evaluate(*field, values.value(*field), ValidationPhase::Submit)
            })
            .filter(|state| !state.valid)
            .collect();

        if !failures.is_empty() {
            return Ok(SubmitOutcome::Rejected { failures });
        }

        self.transport.submit(&values)?;
        Ok(SubmitOutcome::Accepted { snapshot: values })
    }
}

/// Offsets, from insertion, of the success banner's three steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerSchedule {
    pub fade_in_at: Millis,
    pub fade_out_at: Millis,
    pub detach_at: Millis,
}

impl BannerSchedule {
    pub fn from_settings(settings: &BannerSettings) -> Self {
        BannerSchedule {
            fade_in_at: settings.fade_in_delay(),
            fade_out_at: settings.display(),
            detach_at: settings.lifetime(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<FormSnapshot>>,
        fail: bool,
    }

    impl SubmitTransport for RecordingTransport {
        fn submit(&self, snapshot: &FormSnapshot) -> Result<(), PortfolioError> {
            if self.fail {
                return Err(PortfolioError::Transport("offline".to_string()));
            }
            self.sent.borrow_mut().push(snapshot.clone());
            Ok(())
        }
    }

    fn values(name: &str, email: &str, subject: &str, message: &str) -> FormSnapshot {
        FormSnapshot {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn valid_submission_reaches_transport() {
        let controller = FormController::new(RecordingTransport::default());
        let outcome = controller
            .submit(values("Jo", "jo@x.com", "Hi there", "This is a test message"))
            .unwrap();

        assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
        assert_eq!(controller.transport().sent.borrow().len(), 1);
        assert_eq!(controller.transport().sent.borrow()[0].name, "Jo");
    }

    #[test]
    fn every_failing_field_is_reported() {
        let controller = FormController::new(RecordingTransport::default());
        let outcome = controller
            .submit(values("J", "jo@x", "Hi there", "short"))
            .unwrap();

        match outcome {
            SubmitOutcome::Rejected { failures } => {
                let fields: Vec<FieldName> = failures.iter().map(|f| f.field).collect();
                assert_eq!(
                    fields,
                    vec![FieldName::Name, FieldName::Email, FieldName::Message]
                );
                assert_eq!(
                    failures[0].error,
                    Some("Please enter your name (at least 2 characters)")
                );
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(controller.transport().sent.borrow().is_empty());
    }

    #[test]
    fn transport_failure_propagates() {
        let controller = FormController::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let err = controller
            .submit(values("Jo", "jo@x.com", "Hi there", "This is a test message"))
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Transport(_)));
    }

    #[test]
    fn blur_only_checks_one_field() {
        let controller = FormController::new(RecordingTransport::default());
        let state = controller.blur(FieldName::Subject, "Hi");
        assert_eq!(state.field, FieldName::Subject);
        assert_eq!(state.error, Some("Subject must be at least 3 characters long"));
    }

    #[test]
    fn snapshot_serializes_all_fields() {
        let json = values("Jo", "jo@x.com", "Hi there", "This is a test message")
            .to_json()
            .unwrap();
        assert!(json.contains(r#""email":"jo@x.com""#));
        assert!(json.contains(r#""subject":"Hi there""#));
    }

    #[test]
    fn banner_detaches_after_display_plus_fade() {
        let schedule = BannerSchedule::from_settings(&BannerSettings::default());
        assert_eq!(schedule.fade_in_at.as_millis(), 10);
        assert_eq!(schedule.fade_out_at.as_millis(), 5000);
        assert_eq!(schedule.detach_at.as_millis(), 5300);
    }
}
