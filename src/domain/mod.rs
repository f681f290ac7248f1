mod contact_submission;
mod sanitize;
mod submitter_email;

pub use contact_submission::{ContactSubmission, FieldErrors};
pub use sanitize::sanitize;
pub use submitter_email::SubmitterEmail;
