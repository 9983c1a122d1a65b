use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::client::ImageStore;
use crate::controller::{admin, messages, projects, requests, testimonials};
use crate::notify::Dispatcher;
use crate::settings::WorkflowSettings;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    dispatcher: Dispatcher,
    image_store: Arc<dyn ImageStore>,
    workflow: WorkflowSettings,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let dispatcher = web::Data::new(dispatcher);
    let image_store: web::Data<dyn ImageStore> = web::Data::from(image_store);
    let workflow = web::Data::new(workflow);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(dispatcher.clone())
            .app_data(image_store.clone())
            .app_data(workflow.clone())
            .service(health_check)
            .service(messages::scope())
            .service(requests::scope())
            .service(testimonials::scope())
            .service(projects::scope())
            .service(admin::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
