use std::future::Future;
use std::pin::Pin;

use actix_web::{dev, web, FromRequest, HttpRequest};

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use anyhow::Context;

use secrecy::Secret;

use sqlx::PgPool;

use uuid::Uuid;

use crate::auth::Credentials;
use crate::domain::EmailAddress;
use crate::error::{RestError, RestResult};
use crate::repo::OperatorsRepo;
use crate::telemetry::spawn_blocking_with_tracing;

/// Extractor guarding admin routes: the request must carry valid Basic
/// credentials for the seeded operator account
#[derive(Debug)]
pub struct Operator(Uuid);

impl FromRequest for Operator {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            // NOTE: Must be registered with the application at startup
            let pool: &PgPool = req
                .app_data::<web::Data<PgPool>>()
                .expect("PgPool not registered for application");
            let creds = Credentials::from_headers(req.headers())
                .map_err(RestError::FailedToAuthenticate)?;
            let operator_id = validate_credentials(pool, &creds).await?;
            Ok(Operator(operator_id))
        })
    }
}

impl AsRef<Uuid> for Operator {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[tracing::instrument("Validate credentials", skip(credentials, pool))]
async fn validate_credentials(pool: &PgPool, credentials: &Credentials) -> RestResult<Uuid> {
    let email: EmailAddress = credentials
        .username
        .parse()
        .map_err(|e: String| RestError::FailedToAuthenticate(anyhow::anyhow!(e)))?;
    let password = credentials.password.clone();

    let operator = OperatorsRepo::fetch_credentials_by_email(pool, &email)
        .await?
        .context("No operator stored for email")
        .map_err(RestError::FailedToAuthenticate)?;

    spawn_blocking_with_tracing(move || verify_password_hash(password, operator.password_hash))
        .await
        .context("Failed to spawn blocking task")??;

    Ok(operator.id)
}

#[tracing::instrument("Verify password hash", skip(password, password_hash))]
fn verify_password_hash(password: Secret<String>, password_hash: Secret<String>) -> RestResult<()> {
    use secrecy::ExposeSecret;

    let password_hash = PasswordHash::new(password_hash.expose_secret())
        .context("Failed to parse stored password hash")?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &password_hash)
        .context("Failed to verify password hash")
        .map_err(RestError::FailedToAuthenticate)?;

    Ok(())
}
