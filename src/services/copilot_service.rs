//! Orquestração dos dois copilotos
//!
//! O copiloto conversacional responde sobre um resumo da frota, sem
//! ferramentas. O copiloto de operações roda em exatamente duas rodadas:
//! uma para o modelo pedir ferramentas, uma para redigir a resposta com
//! os resultados - nunca um loop de agente. A escolha de provedor e a
//! chave de API vêm das configurações da empresa.

use anyhow::Result;
use futures::try_join;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::copilot::CopilotMessage;
use crate::repositories::settings_repository::SettingsRepository;
use crate::services::fleet_tools::{tool_schemas, FleetToolExecutor, FleetToolService};
use crate::services::llm::{
    gemini::GeminiClient, openai::OpenAiClient, AiProvider, ChatMessage, LlmProvider,
};
use crate::utils::crypto;
use crate::utils::errors::{AppError, AppResult};

/// Instrução para o admin que ainda não configurou o copiloto
const SETUP_INSTRUCTIONS: &str = "O copiloto ainda não está configurado. Acesse Configurações, \
escolha o provedor de IA (openai ou gemini) e cadastre a chave de API da sua conta.";

const ASK_SYSTEM_PROMPT: &str = "Você é o copiloto de gestão de frota do painel administrativo. \
Responda em português, de forma direta, usando apenas o resumo de dados fornecido. \
Se a informação pedida não estiver no resumo, diga isso claramente em vez de inventar.";

const OPERATIONS_SYSTEM_PROMPT: &str = "Você é o copiloto de operações da frota. \
Use as ferramentas disponíveis para consultar os dados reais antes de responder, \
e responda sempre em português. Se uma ferramenta não encontrar o que foi pedido, \
informe exatamente isso ao usuário - nunca invente motoristas, veículos ou números.";

/// Resposta quando o modelo devolve texto vazio na rodada final
const EMPTY_ANSWER_FALLBACK: &str =
    "Não consegui gerar uma resposta agora. Tente reformular a pergunta.";

/// Contagens agregadas que alimentam o copiloto conversacional
#[derive(Debug, Clone)]
pub struct FleetSummary {
    pub vehicle_count: i64,
    pub driver_count: i64,
    pub trailer_count: i64,
    pub trips_in_progress: i64,
    pub fuelings_today: i64,
    pub online_drivers: i64,
}

/// Configuração de IA resolvida para uma empresa
struct TenantAiConfig {
    provider: AiProvider,
    model: String,
    api_key: String,
}

pub struct CopilotService {
    pool: PgPool,
    config: EnvironmentConfig,
    http_client: reqwest::Client,
}

impl CopilotService {
    pub fn new(pool: PgPool, config: EnvironmentConfig, http_client: reqwest::Client) -> Self {
        Self {
            pool,
            config,
            http_client,
        }
    }

    /// Copiloto conversacional: resumo da frota + pergunta, sem
    /// ferramentas. Pergunta e resposta são persistidas no histórico.
    pub async fn ask(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
        question: &str,
    ) -> AppResult<String> {
        let ai = self.tenant_ai_config(company_id).await?;
        let provider = self.build_provider(&ai);

        let summary = self.fleet_summary(company_id).await?;
        let messages = vec![
            ChatMessage::system(format!("{}\n\n{}", ASK_SYSTEM_PROMPT, summary_text(&summary))),
            ChatMessage::user(question),
        ];

        let outcome = provider
            .chat(&messages, &[])
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let answer = if outcome.content.trim().is_empty() {
            EMPTY_ANSWER_FALLBACK.to_string()
        } else {
            outcome.content
        };

        self.persist_exchange(company_id, admin_id, question, &answer).await;

        Ok(answer)
    }

    /// Copiloto de operações: duas rodadas com ferramentas.
    pub async fn operations(&self, company_id: Uuid, mensagem: &str) -> AppResult<String> {
        let ai = self.tenant_ai_config(company_id).await?;
        let provider = self.build_provider(&ai);
        let executor = FleetToolService::new(self.pool.clone());

        orchestrate_operations(provider.as_ref(), &executor, company_id, mensagem)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))
    }

    /// Histórico recente da conversa, em ordem cronológica.
    pub async fn history(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<CopilotMessage>> {
        let mut messages = sqlx::query_as::<_, CopilotMessage>(
            r#"
            SELECT * FROM copilot_messages
            WHERE company_id = $1 AND admin_id = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(company_id)
        .bind(admin_id)
        .bind(limit.clamp(1, 200))
        .fetch_all(&self.pool)
        .await?;

        messages.reverse();
        Ok(messages)
    }

    /// Resolve provedor, modelo e chave da empresa. Provedor desconhecido
    /// é rejeitado aqui, antes de qualquer chamada de rede.
    async fn tenant_ai_config(&self, company_id: Uuid) -> AppResult<TenantAiConfig> {
        let settings = SettingsRepository::new(self.pool.clone())
            .find_by_company(company_id)
            .await?
            .ok_or_else(|| AppError::Configuration(SETUP_INSTRUCTIONS.to_string()))?;

        let provider_raw = settings
            .ai_provider
            .ok_or_else(|| AppError::Configuration(SETUP_INSTRUCTIONS.to_string()))?;

        let provider = AiProvider::from_str(&provider_raw).ok_or_else(|| {
            AppError::BadRequest(format!("Provedor de IA não suportado: {}", provider_raw))
        })?;

        let encrypted = settings
            .ai_api_key_encrypted
            .ok_or_else(|| AppError::Configuration(SETUP_INSTRUCTIONS.to_string()))?;
        let api_key = crypto::decrypt_secret(&encrypted, &self.config.settings_encryption_key)?;

        let model = settings
            .ai_model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(TenantAiConfig {
            provider,
            model,
            api_key,
        })
    }

    fn build_provider(&self, ai: &TenantAiConfig) -> Box<dyn LlmProvider> {
        match ai.provider {
            AiProvider::OpenAi => Box::new(OpenAiClient::new(
                ai.api_key.clone(),
                ai.model.clone(),
                self.http_client.clone(),
            )),
            AiProvider::Gemini => Box::new(GeminiClient::new(
                ai.api_key.clone(),
                ai.model.clone(),
                self.http_client.clone(),
            )),
        }
    }

    /// Contagens da frota em consultas concorrentes.
    async fn fleet_summary(&self, company_id: Uuid) -> AppResult<FleetSummary> {
        let vehicles = count_scalar(
            &self.pool,
            "SELECT COUNT(*) FROM vehicles WHERE company_id = $1",
            company_id,
        );
        let drivers = count_scalar(
            &self.pool,
            "SELECT COUNT(*) FROM drivers WHERE company_id = $1",
            company_id,
        );
        let trailers = count_scalar(
            &self.pool,
            "SELECT COUNT(*) FROM trailers WHERE company_id = $1",
            company_id,
        );
        let trips = count_scalar(
            &self.pool,
            "SELECT COUNT(*) FROM trips WHERE company_id = $1 AND trip_status = 'in_progress'",
            company_id,
        );
        let fuelings = count_scalar(
            &self.pool,
            "SELECT COUNT(*) FROM fueling_events WHERE company_id = $1 AND fueled_at = CURRENT_DATE",
            company_id,
        );
        let online = count_scalar(
            &self.pool,
            r#"
            SELECT COUNT(DISTINCT l.driver_id) FROM driver_locations l
            WHERE l.company_id = $1 AND l.recorded_at > now() - make_interval(mins => 5)
            "#,
            company_id,
        );

        let (vehicle_count, driver_count, trailer_count, trips_in_progress, fuelings_today, online_drivers) =
            try_join!(vehicles, drivers, trailers, trips, fuelings, online)?;

        Ok(FleetSummary {
            vehicle_count,
            driver_count,
            trailer_count,
            trips_in_progress,
            fuelings_today,
            online_drivers,
        })
    }

    /// Persistência do histórico é melhor-esforço, como a auditoria.
    async fn persist_exchange(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
        question: &str,
        answer: &str,
    ) {
        let result = sqlx::query(
            r#"
            INSERT INTO copilot_messages (id, company_id, admin_id, role, content, created_at)
            VALUES ($1, $2, $3, 'user', $4, now()),
                   ($5, $2, $3, 'assistant', $6, now())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(admin_id)
        .bind(question)
        .bind(Uuid::new_v4())
        .bind(answer)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            log::warn!("⚠️ Falha ao persistir conversa do copiloto: {}", e);
        }
    }
}

async fn count_scalar(pool: &PgPool, sql: &str, company_id: Uuid) -> Result<i64, AppError> {
    let row: (i64,) = sqlx::query_as(sql)
        .bind(company_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

fn summary_text(summary: &FleetSummary) -> String {
    format!(
        "Resumo atual da frota:\n\
         - Veículos cadastrados: {}\n\
         - Motoristas: {}\n\
         - Reboques: {}\n\
         - Viagens em andamento: {}\n\
         - Abastecimentos hoje: {}\n\
         - Motoristas online: {}",
        summary.vehicle_count,
        summary.driver_count,
        summary.trailer_count,
        summary.trips_in_progress,
        summary.fuelings_today,
        summary.online_drivers,
    )
}

/// Duas rodadas, nunca um loop: a primeira deixa o modelo pedir
/// ferramentas, a segunda redige a resposta com os resultados. Se a
/// primeira rodada já vier com texto e sem pedidos, ela é a resposta.
pub async fn orchestrate_operations(
    provider: &dyn LlmProvider,
    executor: &dyn FleetToolExecutor,
    company_id: Uuid,
    mensagem: &str,
) -> Result<String> {
    let schemas = tool_schemas();
    let mut messages = vec![
        ChatMessage::system(OPERATIONS_SYSTEM_PROMPT),
        ChatMessage::user(mensagem),
    ];

    let first = provider.chat(&messages, &schemas).await?;

    if !first.wants_tools() {
        let answer = first.content.trim();
        if answer.is_empty() {
            return Ok(EMPTY_ANSWER_FALLBACK.to_string());
        }
        return Ok(answer.to_string());
    }

    log::info!("🔁 Copiloto pediu {} ferramenta(s)", first.tool_calls.len());

    messages.push(ChatMessage::assistant_with_tools(
        first.content.clone(),
        first.tool_calls.clone(),
    ));

    for call in &first.tool_calls {
        let result = executor.execute(company_id, &call.name, &call.arguments).await;
        messages.push(ChatMessage::tool_result(
            call.id.as_str(),
            call.name.as_str(),
            result,
        ));
    }

    let second = provider.chat(&messages, &schemas).await?;

    let answer = second.content.trim();
    if answer.is_empty() {
        return Ok(EMPTY_ANSWER_FALLBACK.to_string());
    }
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm::{ChatOutcome, ChatRole, ToolCall, ToolSchema};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provedor roteirizado: devolve as respostas na ordem e guarda as
    /// mensagens recebidas em cada rodada.
    struct ScriptedProvider {
        outcomes: Mutex<Vec<ChatOutcome>>,
        rounds: AtomicUsize,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedProvider {
        fn new(outcomes: Vec<ChatOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                rounds: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn rounds(&self) -> usize {
            self.rounds.load(Ordering::SeqCst)
        }

        fn messages_of_round(&self, round: usize) -> Vec<ChatMessage> {
            self.seen.lock().unwrap()[round].clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
            _tools: &[ToolSchema],
        ) -> Result<ChatOutcome> {
            self.rounds.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(messages.to_vec());

            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                anyhow::bail!("rodada a mais do que o roteiro previa");
            }
            Ok(outcomes.remove(0))
        }
    }

    /// Executor que grava as chamadas e responde com resultados fixos.
    struct RecordingExecutor {
        calls: Mutex<Vec<(Uuid, String, serde_json::Value)>>,
    }

    impl RecordingExecutor {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Uuid, String, serde_json::Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FleetToolExecutor for RecordingExecutor {
        async fn execute(
            &self,
            company_id: Uuid,
            name: &str,
            arguments: &serde_json::Value,
        ) -> String {
            self.calls
                .lock()
                .unwrap()
                .push((company_id, name.to_string(), arguments.clone()));

            match name {
                "buscar_motorista" => "Carlos Lima - CNH D - status ativo".to_string(),
                other => crate::services::fleet_tools::function_not_found(other),
            }
        }
    }

    fn outcome_text(content: &str) -> ChatOutcome {
        ChatOutcome {
            content: content.to_string(),
            tool_calls: Vec::new(),
        }
    }

    fn outcome_tools(calls: Vec<ToolCall>) -> ChatOutcome {
        ChatOutcome {
            content: String::new(),
            tool_calls: calls,
        }
    }

    fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn test_direct_answer_skips_second_round() {
        let provider = ScriptedProvider::new(vec![outcome_text("Tudo certo com a frota.")]);
        let executor = RecordingExecutor::new();

        let answer = orchestrate_operations(&provider, &executor, Uuid::new_v4(), "como está tudo?")
            .await
            .unwrap();

        assert_eq!(answer, "Tudo certo com a frota.");
        assert_eq!(provider.rounds(), 1);
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_two_rounds_carry_tool_results() {
        let provider = ScriptedProvider::new(vec![
            outcome_tools(vec![call(
                "call_1",
                "buscar_motorista",
                json!({"nome": "Carlos"}),
            )]),
            outcome_text("O motorista Carlos Lima está ativo."),
        ]);
        let executor = RecordingExecutor::new();
        let company_id = Uuid::new_v4();

        let answer = orchestrate_operations(&provider, &executor, company_id, "cadê o Carlos?")
            .await
            .unwrap();

        assert_eq!(answer, "O motorista Carlos Lima está ativo.");
        assert_eq!(provider.rounds(), 2);

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, company_id);
        assert_eq!(calls[0].1, "buscar_motorista");
        assert_eq!(calls[0].2["nome"], "Carlos");

        // A segunda rodada vê o eco do assistente e o resultado da ferramenta
        let second_round = provider.messages_of_round(1);
        let echo = second_round
            .iter()
            .find(|m| m.role == ChatRole::Assistant)
            .unwrap();
        assert_eq!(echo.tool_calls.len(), 1);

        let tool_msg = second_round
            .iter()
            .find(|m| m.role == ChatRole::Tool)
            .unwrap();
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool_msg.content, "Carlos Lima - CNH D - status ativo");
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_inline_result() {
        let provider = ScriptedProvider::new(vec![
            outcome_tools(vec![call("call_9", "apagar_tudo", json!({}))]),
            outcome_text("Não há uma ferramenta para isso."),
        ]);
        let executor = RecordingExecutor::new();

        let answer = orchestrate_operations(&provider, &executor, Uuid::new_v4(), "apaga tudo aí")
            .await
            .unwrap();

        assert_eq!(answer, "Não há uma ferramenta para isso.");

        let second_round = provider.messages_of_round(1);
        let tool_msg = second_round
            .iter()
            .find(|m| m.role == ChatRole::Tool)
            .unwrap();
        assert_eq!(tool_msg.content, "Função não encontrada: apagar_tudo");
    }

    #[tokio::test]
    async fn test_second_round_asking_again_does_not_loop() {
        // Modelo insiste em pedir ferramentas na rodada final: não há
        // terceira rodada, devolvemos o fallback.
        let provider = ScriptedProvider::new(vec![
            outcome_tools(vec![call(
                "call_1",
                "buscar_motorista",
                json!({"nome": "Ana"}),
            )]),
            outcome_tools(vec![call(
                "call_2",
                "buscar_motorista",
                json!({"nome": "Bia"}),
            )]),
        ]);
        let executor = RecordingExecutor::new();

        let answer = orchestrate_operations(&provider, &executor, Uuid::new_v4(), "quem está aí?")
            .await
            .unwrap();

        assert_eq!(answer, EMPTY_ANSWER_FALLBACK);
        assert_eq!(provider.rounds(), 2);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_first_answer_falls_back() {
        let provider = ScriptedProvider::new(vec![outcome_text("   ")]);
        let executor = RecordingExecutor::new();

        let answer = orchestrate_operations(&provider, &executor, Uuid::new_v4(), "oi")
            .await
            .unwrap();

        assert_eq!(answer, EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_multiple_tool_calls_all_executed() {
        let provider = ScriptedProvider::new(vec![
            outcome_tools(vec![
                call("call_1", "contar_veiculos_por_tipo", json!({"tipo": "trator"})),
                call("call_2", "listar_motoristas_online", json!({})),
            ]),
            outcome_text("São 3 cavalos mecânicos e 2 motoristas online."),
        ]);
        let executor = RecordingExecutor::new();

        let answer = orchestrate_operations(&provider, &executor, Uuid::new_v4(), "resumo agora")
            .await
            .unwrap();

        assert_eq!(answer, "São 3 cavalos mecânicos e 2 motoristas online.");
        assert_eq!(executor.calls().len(), 2);

        let second_round = provider.messages_of_round(1);
        let tool_results: Vec<_> = second_round
            .iter()
            .filter(|m| m.role == ChatRole::Tool)
            .collect();
        assert_eq!(tool_results.len(), 2);
        assert_eq!(tool_results[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool_results[1].tool_call_id.as_deref(), Some("call_2"));
    }

    #[test]
    fn test_summary_text_lists_every_count() {
        let summary = FleetSummary {
            vehicle_count: 12,
            driver_count: 8,
            trailer_count: 4,
            trips_in_progress: 2,
            fuelings_today: 5,
            online_drivers: 3,
        };

        let text = summary_text(&summary);
        assert!(text.contains("Veículos cadastrados: 12"));
        assert!(text.contains("Motoristas: 8"));
        assert!(text.contains("Reboques: 4"));
        assert!(text.contains("Viagens em andamento: 2"));
        assert!(text.contains("Abastecimentos hoje: 5"));
        assert!(text.contains("Motoristas online: 3"));
    }
}
