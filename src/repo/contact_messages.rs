use uuid::Uuid;

use serde::Deserialize;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::model::{ContactMessage, NewContactMessage};

use super::{Page, PageRequest};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFilter {
    pub is_read: Option<bool>,
    pub is_replied: Option<bool>,
}

impl MessageFilter {
    fn push_clauses(&self, query: &mut QueryBuilder<Postgres>) {
        if let Some(is_read) = self.is_read {
            query.push(" and is_read = ").push_bind(is_read);
        }
        if let Some(is_replied) = self.is_replied {
            query.push(" and is_replied = ").push_bind(is_replied);
        }
    }
}

pub struct ContactMessagesRepo;

impl ContactMessagesRepo {
    #[tracing::instrument(name = "Insert contact message", skip(executor))]
    pub async fn insert<'conn>(
        executor: impl PgExecutor<'conn>,
        new_message: &NewContactMessage,
    ) -> sqlx::Result<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "insert into contact_messages(name, email, subject, body) \
             values ($1, $2, $3, $4) returning *",
        )
        .bind(new_message.name.as_ref())
        .bind(new_message.email.as_ref())
        .bind(&new_message.subject)
        .bind(&new_message.body)
        .fetch_one(executor)
        .await
    }

    pub async fn fetch<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>("select * from contact_messages where id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    #[tracing::instrument(name = "List contact messages", skip(pool))]
    pub async fn list(
        pool: &PgPool,
        filter: &MessageFilter,
        page: PageRequest,
    ) -> sqlx::Result<Page<ContactMessage>> {
        let mut count = QueryBuilder::new("select count(*) from contact_messages where true");
        filter.push_clauses(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::new("select * from contact_messages where true");
        filter.push_clauses(&mut select);
        select
            .push(" order by created_at desc limit ")
            .push_bind(page.limit())
            .push(" offset ")
            .push_bind(page.offset());
        let items = select
            .build_query_as::<ContactMessage>()
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    #[tracing::instrument(name = "Mark message read", skip(executor))]
    pub async fn mark_read<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
    ) -> sqlx::Result<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>(
            "update contact_messages set is_read = true, updated_at = now() \
             where id = $1 returning *",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Does not touch `is_read`; the two flags are independent
    #[tracing::instrument(name = "Mark message replied", skip(executor))]
    pub async fn mark_replied<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        notes: Option<&str>,
    ) -> sqlx::Result<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>(
            "update contact_messages set is_replied = true, reply_notes = $2, \
             updated_at = now() where id = $1 returning *",
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Record message email outcome", skip(executor))]
    pub async fn record_email<'conn>(
        executor: impl PgExecutor<'conn>,
        id: Uuid,
        sent: bool,
        email_id: Option<&str>,
    ) -> sqlx::Result<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>(
            "update contact_messages set email_sent = $2, email_id = $3, \
             updated_at = now() where id = $1 returning *",
        )
        .bind(id)
        .bind(sent)
        .bind(email_id)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Delete contact message", skip(executor))]
    pub async fn delete<'conn>(executor: impl PgExecutor<'conn>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from contact_messages where id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
