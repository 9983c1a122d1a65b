use secrecy::Secret;

use sqlx::PgExecutor;

use uuid::Uuid;

use crate::domain::EmailAddress;

#[derive(Debug)]
pub struct NewOperator {
    pub email: EmailAddress,
    pub password_hash: String,
}

#[derive(Debug)]
pub struct OperatorCredentials {
    pub id: Uuid,
    pub password_hash: Secret<String>,
}

/// The single administrative account gating privileged mutations
pub struct OperatorsRepo;

impl OperatorsRepo {
    #[tracing::instrument("Insert a new operator record", skip(executor, new_operator))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_operator: &NewOperator,
    ) -> sqlx::Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            "insert into operators(email, password_hash) values ($1, $2) returning id",
        )
        .bind(new_operator.email.as_ref())
        .bind(&new_operator.password_hash)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    pub async fn fetch_credentials_by_email<'conn>(
        executor: impl PgExecutor<'conn>,
        email: &EmailAddress,
    ) -> sqlx::Result<Option<OperatorCredentials>> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("select id, password_hash from operators where email = $1")
                .bind(email.as_ref())
                .fetch_optional(executor)
                .await?;
        Ok(row.map(|(id, password_hash)| OperatorCredentials {
            id,
            password_hash: Secret::new(password_hash),
        }))
    }
}
