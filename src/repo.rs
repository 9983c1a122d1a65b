mod contact_messages;
mod operators;
mod projects;
mod service_requests;
mod testimonials;

pub use contact_messages::{ContactMessagesRepo, MessageFilter};
pub use operators::{NewOperator, OperatorCredentials, OperatorsRepo};
pub use projects::{ProjectFilter, ProjectsRepo};
pub use service_requests::{RequestFilter, ServiceRequestsRepo};
pub use testimonials::{TestimonialFilter, TestimonialsRepo};

use serde::Serialize;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// A clamped, 1-indexed pagination request
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of a filtered listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let limit = request.limit();
        let total_pages = ((total + limit - 1) / limit).max(0) as u32;
        Self {
            items,
            total,
            page: request.page(),
            total_pages,
        }
    }
}
