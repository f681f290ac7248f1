mod contact_handler;
mod errors;
mod helpers;
mod types;

pub use contact_handler::{contact_method_not_allowed, submit_contact};
pub use errors::ContactError;
