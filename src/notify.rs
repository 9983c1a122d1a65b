mod dispatcher;
mod templates;

pub use dispatcher::{DeliveryMode, Dispatcher, DualOutcome, SendOutcome};
pub use templates::{contact_emails, service_request_emails, testimonial_emails};
