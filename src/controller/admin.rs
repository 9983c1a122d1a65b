use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::auth::Operator;
use crate::error::RestResult;
use crate::model::{
    NewProject, ProjectCategory, ProjectStatus, RequestPriority, RequestStatus,
};
use crate::repo::{
    ContactMessagesRepo, MessageFilter, PageRequest, ProjectFilter, ProjectsRepo, RequestFilter,
    ServiceRequestsRepo, TestimonialFilter, TestimonialsRepo,
};
use crate::workflow::{self, AdminAction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    is_read: Option<bool>,
    is_replied: Option<bool>,
}

#[tracing::instrument(name = "List messages for the dashboard", skip(pool))]
#[get("/messages")]
async fn list_messages(
    _operator: Operator,
    query: web::Query<MessageListQuery>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let filter = MessageFilter {
        is_read: query.is_read,
        is_replied: query.is_replied,
    };
    let page = PageRequest::new(query.page, query.limit);

    let listing = ContactMessagesRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<RequestStatus>,
    priority: Option<RequestPriority>,
    is_read: Option<bool>,
}

#[tracing::instrument(name = "List service requests for the dashboard", skip(pool))]
#[get("/requests")]
async fn list_requests(
    _operator: Operator,
    query: web::Query<RequestListQuery>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let filter = RequestFilter {
        status: query.status,
        priority: query.priority,
        is_read: query.is_read,
    };
    let page = PageRequest::new(query.page, query.limit);

    let listing = ServiceRequestsRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[derive(Debug, Deserialize)]
pub struct TestimonialListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    approved: Option<bool>,
    featured: Option<bool>,
    public: Option<bool>,
}

#[tracing::instrument(name = "List testimonials for the dashboard", skip(pool))]
#[get("/testimonials")]
async fn list_testimonials(
    _operator: Operator,
    query: web::Query<TestimonialListQuery>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let filter = TestimonialFilter {
        approved: query.approved,
        featured: query.featured,
        public: query.public,
    };
    let page = PageRequest::new(query.page, query.limit);

    let listing = TestimonialsRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<ProjectStatus>,
    category: Option<ProjectCategory>,
    featured: Option<bool>,
    public: Option<bool>,
}

#[tracing::instrument(name = "List projects for the dashboard", skip(pool))]
#[get("/projects")]
async fn list_projects(
    _operator: Operator,
    query: web::Query<ProjectListQuery>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let filter = ProjectFilter {
        status: query.status,
        category: query.category,
        featured: query.featured,
        public: query.public,
    };
    let page = PageRequest::new(query.page, query.limit);

    let listing = ProjectsRepo::list(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(listing))
}

#[tracing::instrument(name = "Create a project", skip(pool, body))]
#[post("/projects")]
async fn create_project(
    _operator: Operator,
    body: web::Json<NewProject>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let project = workflow::projects::create(pool.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "data": project,
    })))
}

/// Single moderation entrypoint: the body is the action union, so an unknown
/// action fails deserialization with a 400 before reaching this handler
#[tracing::instrument(name = "Apply a dashboard action", skip(pool))]
#[post("/actions")]
async fn apply_action(
    _operator: Operator,
    action: web::Json<AdminAction>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let outcome = workflow::apply(pool.get_ref(), action.into_inner()).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Dashboard API endpoints, all gated on the operator account
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/admin")
        .service(list_messages)
        .service(list_requests)
        .service(list_testimonials)
        .service(list_projects)
        .service(create_project)
        .service(apply_action)
}
