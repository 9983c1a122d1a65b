use crate::client::Email;
use crate::domain::EmailAddress;
use crate::model::{ContactMessage, ServiceRequest, Testimonial};

/// Paired emails for a contact-form submission: operator alert + submitter
/// confirmation
pub fn contact_emails(
    message: &ContactMessage,
    operator: &EmailAddress,
    submitter: EmailAddress,
) -> (Email, Email) {
    let to_operator = Email {
        recipient: operator.clone(),
        subject: format!("New contact message from {}", message.name),
        html_body: format!(
            "<h2>New contact message</h2>\
             <p><strong>From:</strong> {} &lt;{}&gt;</p>\
             <p><strong>Subject:</strong> {}</p>\
             <p>{}</p>",
            escape_html(&message.name),
            escape_html(&message.email),
            escape_html(&message.subject),
            escape_html(&message.body),
        ),
        text_body: format!(
            "New contact message\nFrom: {} <{}>\nSubject: {}\n\n{}",
            message.name, message.email, message.subject, message.body,
        ),
    };
    let to_submitter = Email {
        recipient: submitter,
        subject: "We received your message".into(),
        html_body: format!(
            "<p>Hi {},</p>\
             <p>Thanks for reaching out. Your message has been received and \
             you will hear back shortly.</p>",
            escape_html(&message.name),
        ),
        text_body: format!(
            "Hi {},\n\nThanks for reaching out. Your message has been received \
             and you will hear back shortly.",
            message.name,
        ),
    };
    (to_operator, to_submitter)
}

/// Paired emails for a service-request submission
pub fn service_request_emails(
    request: &ServiceRequest,
    operator: &EmailAddress,
    submitter: EmailAddress,
) -> (Email, Email) {
    let to_operator = Email {
        recipient: operator.clone(),
        subject: format!(
            "Action required: new {} request from {}",
            request.project_type, request.client_name,
        ),
        html_body: format!(
            "<h2>New service request</h2>\
             <p><strong>Client:</strong> {} &lt;{}&gt;</p>\
             <p><strong>Project type:</strong> {}</p>\
             <p><strong>Budget:</strong> {}</p>\
             <p><strong>Timeline:</strong> {}</p>\
             <p>{}</p>",
            escape_html(&request.client_name),
            escape_html(&request.client_email),
            escape_html(&request.project_type),
            escape_html(&request.budget),
            escape_html(&request.timeline),
            escape_html(&request.project_description),
        ),
        text_body: format!(
            "New service request\nClient: {} <{}>\nProject type: {}\n\
             Budget: {}\nTimeline: {}\n\n{}",
            request.client_name,
            request.client_email,
            request.project_type,
            request.budget,
            request.timeline,
            request.project_description,
        ),
    };
    let to_submitter = Email {
        recipient: submitter,
        subject: "Your project request has been received".into(),
        html_body: format!(
            "<p>Hi {},</p>\
             <p>Thanks for your interest! Your {} request has been received \
             and is being reviewed. Expect a reply within two business days.</p>",
            escape_html(&request.client_name),
            escape_html(&request.project_type),
        ),
        text_body: format!(
            "Hi {},\n\nThanks for your interest! Your {} request has been \
             received and is being reviewed. Expect a reply within two \
             business days.",
            request.client_name, request.project_type,
        ),
    };
    (to_operator, to_submitter)
}

/// Paired emails for a testimonial submission
pub fn testimonial_emails(
    testimonial: &Testimonial,
    operator: &EmailAddress,
    submitter: EmailAddress,
) -> (Email, Email) {
    let stars = "★".repeat(testimonial.rating as usize);
    let to_operator = Email {
        recipient: operator.clone(),
        subject: format!(
            "Testimonial awaiting review from {}",
            testimonial.client_name,
        ),
        html_body: format!(
            "<h2>New testimonial</h2>\
             <p><strong>Client:</strong> {} &lt;{}&gt;</p>\
             <p><strong>Rating:</strong> {}</p>\
             <blockquote>{}</blockquote>",
            escape_html(&testimonial.client_name),
            escape_html(&testimonial.client_email),
            stars,
            escape_html(&testimonial.content),
        ),
        text_body: format!(
            "New testimonial\nClient: {} <{}>\nRating: {}/5\n\n{}",
            testimonial.client_name,
            testimonial.client_email,
            testimonial.rating,
            testimonial.content,
        ),
    };
    let to_submitter = Email {
        recipient: submitter,
        subject: "Thank you for your testimonial".into(),
        html_body: format!(
            "<p>Hi {},</p>\
             <p>Thank you for sharing your feedback! Your testimonial will \
             appear on the site once it has been reviewed.</p>",
            escape_html(&testimonial.client_name),
        ),
        text_body: format!(
            "Hi {},\n\nThank you for sharing your feedback! Your testimonial \
             will appear on the site once it has been reviewed.",
            testimonial.client_name,
        ),
    };
    (to_operator, to_submitter)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
