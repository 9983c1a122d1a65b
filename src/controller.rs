/// Privileged dashboard endpoints
pub mod admin;
/// Public contact-form endpoint
pub mod messages;
/// Public project listings
pub mod projects;
/// Public service-request endpoint
pub mod requests;
/// Public testimonial submission and feed
pub mod testimonials;
