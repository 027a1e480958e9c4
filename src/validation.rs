// Contact field predicates. Pure, no side effects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `local@domain.tld`: no whitespace, one `@`, a dot somewhere after it.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_name(value: &str) -> bool {
    trimmed_len(value) >= 2
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_subject(value: &str) -> bool {
    trimmed_len(value) >= 3
}

pub fn is_valid_message(value: &str) -> bool {
    trimmed_len(value) >= 10
}

/// Length in UTF-16 code units, the unit browsers report for field values.
fn trimmed_len(value: &str) -> usize {
    value.trim().encode_utf16().count()
}

/// The four contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Subject,
        FieldName::Message,
    ];

    /// Element id of the input.
    pub fn id(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Subject => "subject",
            FieldName::Message => "message",
        }
    }

    /// Element id of the inline error text.
    pub fn error_id(&self) -> String {
        format!("{}-error", self.id())
    }

    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            FieldName::Name => is_valid_name(value),
            FieldName::Email => is_valid_email(value),
            FieldName::Subject => is_valid_subject(value),
            FieldName::Message => is_valid_message(value),
        }
    }

    /// Error text for a failed check. Blur and submit phrase it differently.
    pub fn error_message(&self, phase: ValidationPhase) -> &'static str {
        match (self, phase) {
            (FieldName::Name, ValidationPhase::Blur) => "Name must be at least 2 characters long",
            (FieldName::Name, ValidationPhase::Submit) => {
                "Please enter your name (at least 2 characters)"
            }
            (FieldName::Email, _) => "Please enter a valid email address",
            (FieldName::Subject, ValidationPhase::Blur) => {
                "Subject must be at least 3 characters long"
            }
            (FieldName::Subject, ValidationPhase::Submit) => {
                "Please enter a subject (at least 3 characters)"
            }
            (FieldName::Message, ValidationPhase::Blur) => {
                "Message must be at least 10 characters long"
            }
            (FieldName::Message, ValidationPhase::Submit) => {
                "Please enter a message (at least 10 characters)"
            }
        }
    }
}

/// Which event triggered validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPhase {
    Blur,
    Submit,
}

/// Derived per-field state. Recomputed on every blur and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub field: FieldName,
    pub valid: bool,
    pub error: Option<&'static str>,
}

impl FieldState {
    pub fn evaluate(field: FieldName, raw: &str, phase: ValidationPhase) -> Self {
        let valid = field.is_valid(raw);
        FieldState {
            field,
            valid,
            error: (!valid).then(|| field.error_message(phase)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_examples() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("x@y.z"));
        assert!(is_valid_email("  jo@x.com  "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("noatsign.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn length_gates() {
        assert!(is_valid_name("Al"));
        assert!(is_valid_name("  Al  "));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name("   "));

        assert!(is_valid_subject("Hey"));
        assert!(!is_valid_subject("Hi"));

        assert!(is_valid_message("abcdefghij"));
        assert!(!is_valid_message("abcdefghi"));
        assert!(!is_valid_message("  abcdefghi  "));
    }

    #[test]
    fn lengths_count_utf16_units() {
        // One emoji is a surrogate pair, two units in a browser field.
        assert!(is_valid_name("😀"));
        assert!(is_valid_message("😀😀😀😀😀"));
        assert!(!is_valid_message("😀😀😀😀é"));
        assert!(!is_valid_subject("é"));
    }

    #[test]
    fn error_ids_follow_field_ids() {
        assert_eq!(FieldName::Subject.error_id(), "subject-error");
    }

    #[test]
    fn state_carries_phase_message() {
        let blur = FieldState::evaluate(FieldName::Name, "A", ValidationPhase::Blur);
        assert!(!blur.valid);
        assert_eq!(blur.error, Some("Name must be at least 2 characters long"));

        let submit = FieldState::evaluate(FieldName::Name, "A", ValidationPhase::Submit);
        assert_eq!(
            submit.error,
            Some("Please enter your name (at least 2 characters)")
        );

        let ok = FieldState::evaluate(FieldName::Email, "jo@x.com", ValidationPhase::Blur);
        assert!(ok.valid);
        assert_eq!(ok.error, None);
    }

    proptest! {
        #[test]
        fn whitespace_never_counts_toward_length(core in "[a-z]{0,12}", pad in 0usize..4) {
            let padded = format!("{}{}{}", " ".repeat(pad), core, "\t".repeat(pad));
            prop_assert_eq!(is_valid_message(&padded), core.len() >= 10);
            prop_assert_eq!(is_valid_name(&padded), core.len() >= 2);
        }

        #[test]
        fn emails_with_inner_space_are_rejected(local in "[a-z]{1,5}", domain in "[a-z]{1,5}") {
            let with_space = format!("{} x@{}.com", local, domain);
            prop_assert!(!is_valid_email(&with_space));
            let plain = format!("{}@{}.com", local, domain);
            prop_assert!(is_valid_email(&plain));
        }
    }
}
