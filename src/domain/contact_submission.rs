use std::collections::BTreeMap;

use unicode_segmentation::UnicodeSegmentation;

use super::{SubmitterEmail, sanitize};

/// Field-keyed validation messages. All checks run, so one submission can
/// report every violated field at once.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    fn set(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// A sanitized, fully validated contact form submission.
#[derive(Debug)]
pub struct ContactSubmission {
    pub name: String,
    pub email: SubmitterEmail,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    /// Sanitizes every field, then evaluates all checks without
    /// short-circuiting. Later checks overwrite earlier messages for the
    /// same field, so an over-long value reports as too long rather than
    /// merely present.
    pub fn parse(
        name: String,
        email: String,
        phone: String,
        message: String,
    ) -> Result<Self, FieldErrors> {
        let name = sanitize(&name);
        let email = sanitize(&email);
        let phone = sanitize(&phone);
        let message = sanitize(&message);

        let mut errors = FieldErrors::default();

        if name.graphemes(true).count() < 2 {
            errors.set("name", "Please provide your name.");
        }
        let email_length = email.graphemes(true).count();
        let email = match SubmitterEmail::parse(email) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.set("email", "Please provide a valid email address.");
                None
            }
        };
        if phone.graphemes(true).count() < 6 {
            errors.set("phone", "Please provide a phone number.");
        }
        if message.graphemes(true).count() < 10 {
            errors.set("message", "Please provide a short description of your case.");
        }

        if name.graphemes(true).count() > 200 {
            errors.set("name", "Name too long.");
        }
        if email_length > 200 {
            errors.set("email", "Email too long.");
        }
        if phone.graphemes(true).count() > 50 {
            errors.set("phone", "Phone too long.");
        }
        if message.graphemes(true).count() > 5000 {
            errors.set("message", "Message too long.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let Some(email) = email else {
            return Err(errors);
        };

        Ok(Self {
            name,
            email,
            phone,
            message,
        })
    }
}
