use sqlx::PgPool;
use uuid::Uuid;

use crate::models::chat::{ChatMessage, ChatThread, MessageFilters};
use crate::utils::errors::AppError;

pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Abre a conversa do par (admin, motorista) ou devolve a existente.
    /// O unique em (company_id, admin_id, driver_id) faz do INSERT um
    /// upsert atômico: duas aberturas concorrentes convergem para a
    /// mesma linha em vez de duplicar a conversa.
    pub async fn open_thread(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
        driver_id: Uuid,
    ) -> Result<ChatThread, AppError> {
        let thread = sqlx::query_as::<_, ChatThread>(
            r#"
            INSERT INTO chat_threads (id, company_id, admin_id, driver_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, now(), now())
            ON CONFLICT (company_id, admin_id, driver_id)
            DO UPDATE SET updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(admin_id)
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(thread)
    }

    pub async fn find_thread_by_id(&self, id: Uuid) -> Result<Option<ChatThread>, AppError> {
        let thread = sqlx::query_as::<_, ChatThread>("SELECT * FROM chat_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(thread)
    }

    /// Conversas do administrador, mais recentes primeiro.
    pub async fn find_threads_for_admin(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Vec<ChatThread>, AppError> {
        let threads = sqlx::query_as::<_, ChatThread>(
            r#"
            SELECT * FROM chat_threads
            WHERE company_id = $1 AND admin_id = $2
            ORDER BY updated_at DESC
            "#,
        )
        .bind(company_id)
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(threads)
    }

    /// Persiste uma mensagem e toca o `updated_at` da conversa.
    pub async fn insert_message(
        &self,
        thread_id: Uuid,
        sender: &str,
        sender_id: Uuid,
        body: &str,
    ) -> Result<ChatMessage, AppError> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (id, thread_id, sender, sender_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(thread_id)
        .bind(sender)
        .bind(sender_id)
        .bind(body)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE chat_threads SET updated_at = now() WHERE id = $1")
            .bind(thread_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(message)
    }

    pub async fn find_messages(
        &self,
        thread_id: Uuid,
        filters: &MessageFilters,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let limit = filters.limit.unwrap_or(200).min(1000);

        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM chat_messages
            WHERE thread_id = $1
              AND ($2::timestamptz IS NULL OR created_at > $2)
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(thread_id)
        .bind(filters.since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
