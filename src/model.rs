mod contact_message;
mod project;
mod service_request;
mod testimonial;

pub use contact_message::{ContactMessage, NewContactMessage};
pub use project::{NewProject, Project, ProjectCategory, ProjectStatus, ProjectUpdate};
pub use service_request::{NewServiceRequest, RequestPriority, RequestStatus, ServiceRequest};
pub use testimonial::{NewTestimonial, Testimonial};
