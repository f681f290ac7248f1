mod contact;
mod health_check;
pub mod helpers;

pub use contact::{contact_method_not_allowed, submit_contact};
pub use health_check::health_check;
