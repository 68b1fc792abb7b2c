//! Controller de Chat
//!
//! Conversas entre o administrador logado e os motoristas da empresa.
//! Abrir uma conversa já existente devolve a mesma thread; mensagens
//! com imagem chegam com o base64 em campo próprio e são gravadas com o
//! marcador embutido no corpo.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthContext;
use crate::models::chat::{
    embed_inline_image, ChatMessageResponse, ChatThread, MessageFilters, OpenThreadRequest,
    SendMessageRequest, ThreadResponse,
};
use crate::repositories::chat_repository::ChatRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct ChatController {
    repository: ChatRepository,
    drivers: DriverRepository,
}

impl ChatController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ChatRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn open_thread(
        &self,
        ctx: &AuthContext,
        request: OpenThreadRequest,
    ) -> Result<ThreadResponse, AppError> {
        request.validate()?;

        let driver = self
            .drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista não encontrado".to_string()))?;

        if driver.company_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "Motorista pertence a outra empresa".to_string(),
            ));
        }

        let thread = self
            .repository
            .open_thread(ctx.company_id, ctx.admin_id, request.driver_id)
            .await?;

        Ok(ThreadResponse::from(thread))
    }

    pub async fn list_threads(&self, ctx: &AuthContext) -> Result<Vec<ThreadResponse>, AppError> {
        let threads = self
            .repository
            .find_threads_for_admin(ctx.company_id, ctx.admin_id)
            .await?;

        Ok(threads.into_iter().map(ThreadResponse::from).collect())
    }

    pub async fn messages(
        &self,
        ctx: &AuthContext,
        thread_id: Uuid,
        filters: MessageFilters,
    ) -> Result<Vec<ChatMessageResponse>, AppError> {
        self.owned_thread(ctx, thread_id).await?;

        let messages = self.repository.find_messages(thread_id, &filters).await?;
        Ok(messages.into_iter().map(ChatMessageResponse::from).collect())
    }

    pub async fn send_message(
        &self,
        ctx: &AuthContext,
        request: SendMessageRequest,
    ) -> Result<ChatMessageResponse, AppError> {
        request.validate()?;

        if request.body.trim().is_empty() && request.image_base64.is_none() {
            return Err(AppError::BadRequest(
                "Mensagem precisa de texto ou imagem".to_string(),
            ));
        }

        self.owned_thread(ctx, request.thread_id).await?;

        let body = match &request.image_base64 {
            Some(image) => embed_inline_image(&request.body, image),
            None => request.body.clone(),
        };

        let message = self
            .repository
            .insert_message(request.thread_id, "admin", ctx.admin_id, &body)
            .await?;

        Ok(ChatMessageResponse::from(message))
    }

    /// A thread precisa existir e pertencer ao admin logado.
    async fn owned_thread(&self, ctx: &AuthContext, thread_id: Uuid) -> Result<ChatThread, AppError> {
        let thread = self
            .repository
            .find_thread_by_id(thread_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversa não encontrada".to_string()))?;

        if thread.company_id != ctx.company_id || thread.admin_id != ctx.admin_id {
            return Err(AppError::NotFound("Conversa não encontrada".to_string()));
        }

        Ok(thread)
    }
}
