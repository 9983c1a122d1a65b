use uuid::Uuid;

use serde::Deserialize;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::model::{NewServiceRequest, RequestPriority, RequestStatus, ServiceRequest};

use super::{Page, PageRequest};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub priority: Option<RequestPriority>,
    pub is_read: Option<bool>,
}

impl RequestFilter {
    fn push_clauses(&self, query: &mut QueryBuilder<Postgres>) {
        if let Some(status) = self.status {
            query.push(" and status = ").push_bind(status);
        }
        if let Some(priority) = self.priority {
            query.push(" and priority = ").push_bind(priority);
        }
        if let Some(is_read) = self.is_read {
            query.push(" and is_read = ").push_bind(is_read);
        }
    }
}

/// Note lines are append-only: each mutation that carries a note adds a line
/// rather than replacing previous operator notes
fn append_note_sql(column: &str) -> String {
    format!(
        "{col} = case when $n is null then {col} \
         when {col} is null or {col} = '' then $n \
         else {col} || E'\\n' || $n end",
        col = column
    )
}

pub struct ServiceRequestsRepo;

impl ServiceRequestsRepo {
    #[tracing::instrument(name = "Insert service request", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_request: &NewServiceRequest,
    ) -> sqlx::Result<ServiceRequest> {
        sqlx::query_as::<_, ServiceRequest>(
            "insert into service_requests\
             (client_name, client_email, project_type, budget, timeline, project_description) \
             values ($1, $2, $3, $4, $5, $6) returning *",
        )
        .bind(new_request.client_name.as_ref())
        .bind(new_request.client_email.as_ref())
        .bind(&new_request.project_type)
        .bind(&new_request.budget)
        .bind(&new_request.timeline)
        .bind(&new_request.project_description)
        .fetch_one(executor)
        .await
    }

    pub async fn fetch<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>("select * from service_requests where id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "List service requests", skip(pool))]
    pub async fn list(
        pool: &PgPool,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> sqlx::Result<Page<ServiceRequest>> {
        let mut count = QueryBuilder::new("select count(*) from service_requests where true");
        filter.push_clauses(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::new("select * from service_requests where true");
        filter.push_clauses(&mut select);
        select
            .push(" order by created_at desc limit ")
            .push_bind(page.limit())
            .push(" offset ")
            .push_bind(page.offset());
        let items = select
            .build_query_as::<ServiceRequest>()
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    #[tracing::instrument(name = "Update request status", skip(executor))]
    pub async fn update_status<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        status: RequestStatus,
        note: Option<&str>,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        let query = format!(
            "update service_requests set status = $2, {}, updated_at = now() \
             where id = $1 returning *",
            append_note_sql("notes").replace("$n", "$3"),
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(note)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "Update request priority", skip(executor))]
    pub async fn update_priority<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        priority: RequestPriority,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(
            "update service_requests set priority = $2, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .bind(priority)
        .fetch_optional(executor)
        .await
    }

    /// Toggle proposal_sent; the timestamp follows the flag (set on true,
    /// cleared on false)
    #[tracing::instrument(name = "Update request proposal flag", skip(executor))]
    pub async fn set_proposal<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        sent: bool,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(
            "update service_requests set proposal_sent = $2, \
             proposal_sent_at = case when $2 then now() else null end, \
             updated_at = now() where id = $1 returning *",
        )
        .bind(id)
        .bind(sent)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Update request contract flag", skip(executor))]
    pub async fn set_contract<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        signed: bool,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(
            "update service_requests set contract_signed = $2, \
             contract_signed_at = case when $2 then now() else null end, \
             updated_at = now() where id = $1 returning *",
        )
        .bind(id)
        .bind(signed)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Mark request read", skip(executor))]
    pub async fn mark_read<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        sqlx::query_as::<_, ServiceRequest>(
            "update service_requests set is_read = true, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// The auto-advance write: performed after the submitter confirmation was
    /// delivered, in one statement so the status and email fields move together
    #[tracing::instrument(name = "Record request confirmation", skip(executor))]
    pub async fn record_confirmation<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        status: RequestStatus,
        email_id: Option<&str>,
        note: &str,
    ) -> sqlx::Result<Option<ServiceRequest>> {
        let query = format!(
            "update service_requests set status = $2, email_sent = true, \
             email_id = $3, {}, updated_at = now() where id = $1 returning *",
            append_note_sql("notes").replace("$n", "$4"),
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(email_id)
            .bind(note)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "Delete service request", skip(executor))]
    pub async fn delete<'conn>(executor: impl PgExecutor<'conn>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from service_requests where id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
