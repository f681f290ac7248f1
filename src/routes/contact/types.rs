use crate::domain::{ContactSubmission, FieldErrors};

/// The raw, untrusted form payload. Absent fields default to the empty
/// string so that sanitization and validation see every field.
#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<FormData> for ContactSubmission {
    type Error = FieldErrors;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        ContactSubmission::parse(form.name, form.email, form.phone, form.message)
    }
}

#[derive(serde::Serialize)]
pub struct SubmissionAccepted {
    pub message: String,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(serde::Serialize)]
pub struct ValidationErrorBody {
    pub error: String,
    pub details: FieldErrors,
}
