use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use portfolio_api::client::{EmailClient, UnconfiguredImageStore};
use portfolio_api::notify::Dispatcher;
use portfolio_api::settings::Settings;
use portfolio_api::{app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().expect("Failed to load settings");

    let pool = PgPool::connect_with(settings.database.with_db()).await?;

    let transport = match settings.email.api_auth_token() {
        Some(token) => Some(EmailClient::new(
            settings.email.sender(),
            settings.email.api_timeout(),
            settings.email.api_base_url(),
            token,
        )?),
        None => None,
    };
    let dispatcher = Dispatcher::new(transport, settings.email.operator());

    let image_store = Arc::new(UnconfiguredImageStore);

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(
        listener,
        pool,
        dispatcher,
        image_store,
        settings.workflow.clone(),
    )?
    .await
    .context("Failed to run app")
}
