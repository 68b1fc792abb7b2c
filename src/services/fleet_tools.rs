//! Ferramentas de consulta do copiloto de operações
//!
//! Cada ferramenta é uma consulta de leitura sobre os dados da empresa,
//! executada pelo nome que o modelo pediu. O retorno é sempre uma string
//! legível que volta ao modelo como resultado da chamada; falhas de uma
//! ferramenta viram uma string de erro daquela chamada e não derrubam as
//! demais. Nenhuma ferramenta escreve no banco.

use async_trait::async_trait;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::fueling::FuelingReportRow;
use crate::models::location::ONLINE_WINDOW_MINUTES;
use crate::services::llm::ToolSchema;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

/// Resultado fixo para nome de ferramenta que não existe
pub fn function_not_found(name: &str) -> String {
    format!("Função não encontrada: {}", name)
}

/// Resultado fixo quando a busca de motorista não acha ninguém
pub const NO_DRIVER_FOUND: &str = "Nenhum motorista encontrado com esse nome";

lazy_static! {
    /// Fallback estático de sinônimos de tipo de veículo, usado quando a
    /// tabela `vehicle_type_synonyms` não conhece o termo.
    static ref STATIC_SYNONYMS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("trator", "cavalo mecânico");
        map.insert("cavalo", "cavalo mecânico");
        map.insert("caminhao", "caminhão");
        map.insert("truck", "caminhão truck");
        map.insert("trucado", "caminhão truck");
        map.insert("bitrem", "carreta");
        map.insert("julieta", "carreta");
        map.insert("furgao", "van");
        map.insert("utilitario", "utilitário");
        map
    };
}

/// Resolução estática de sinônimo, sem acesso ao banco
pub fn static_synonym(term: &str) -> Option<&'static str> {
    STATIC_SYNONYMS.get(term.to_lowercase().trim()).copied()
}

/// Declarações das cinco ferramentas oferecidas ao modelo
pub fn tool_schemas() -> Vec<ToolSchema> {
    vec![
        ToolSchema {
            name: "buscar_motorista".to_string(),
            description: "Busca um motorista da frota pelo nome (completo ou parcial) e devolve seus dados cadastrais".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "nome": {
                        "type": "string",
                        "description": "Nome completo ou parcial do motorista"
                    }
                },
                "required": ["nome"]
            }),
        },
        ToolSchema {
            name: "listar_motoristas_online".to_string(),
            description: "Lista os motoristas que enviaram posição nos últimos minutos e estão online agora".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolSchema {
            name: "contar_veiculos_por_tipo".to_string(),
            description: "Conta quantos veículos de um tipo a frota tem. Aceita termos populares como trator, bitrem, truck".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "tipo": {
                        "type": "string",
                        "description": "Tipo de veículo, ex. trator, caminhão, carreta"
                    }
                },
                "required": ["tipo"]
            }),
        },
        ToolSchema {
            name: "abastecimentos_por_data".to_string(),
            description: "Lista os abastecimentos registrados em uma data".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "string",
                        "description": "Data no formato AAAA-MM-DD"
                    }
                },
                "required": ["data"]
            }),
        },
        ToolSchema {
            name: "distancia_percorrida_periodo".to_string(),
            description: "Soma a distância das viagens concluídas em um período".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "data_inicio": {
                        "type": "string",
                        "description": "Início do período, formato AAAA-MM-DD"
                    },
                    "data_fim": {
                        "type": "string",
                        "description": "Fim do período, formato AAAA-MM-DD"
                    }
                },
                "required": ["data_inicio", "data_fim"]
            }),
        },
    ]
}

/// Seam entre a orquestração do copiloto e as consultas reais.
/// O retorno é sempre a string que volta ao modelo.
#[async_trait]
pub trait FleetToolExecutor: Send + Sync {
    async fn execute(&self, company_id: Uuid, name: &str, arguments: &serde_json::Value) -> String;
}

/// Implementação real das ferramentas sobre o Postgres
pub struct FleetToolService {
    pool: PgPool,
}

impl FleetToolService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn buscar_motorista(&self, company_id: Uuid, nome: &str) -> Result<String, AppError> {
        // Primeiro match exato (sem diferenciar caixa), depois parcial
        let mut drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE company_id = $1 AND LOWER(full_name) = LOWER($2)",
        )
        .bind(company_id)
        .bind(nome)
        .fetch_all(&self.pool)
        .await?;

        if drivers.is_empty() {
            drivers = sqlx::query_as::<_, Driver>(
                r#"
                SELECT * FROM drivers
                WHERE company_id = $1 AND full_name ILIKE '%' || $2 || '%'
                ORDER BY full_name ASC
                LIMIT 5
                "#,
            )
            .bind(company_id)
            .bind(nome)
            .fetch_all(&self.pool)
            .await?;
        }

        if drivers.is_empty() {
            return Ok(NO_DRIVER_FOUND.to_string());
        }

        let lines: Vec<String> = drivers.iter().map(describe_driver).collect();
        if lines.len() == 1 {
            Ok(lines.into_iter().next().unwrap_or_default())
        } else {
            Ok(format!(
                "Encontrei {} motoristas:\n{}",
                lines.len(),
                lines.join("\n")
            ))
        }
    }

    async fn listar_motoristas_online(&self, company_id: Uuid) -> Result<String, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT d.full_name FROM drivers d
            WHERE d.company_id = $1
              AND EXISTS (
                SELECT 1 FROM driver_locations l
                WHERE l.driver_id = d.id
                  AND l.recorded_at > now() - make_interval(mins => $2)
              )
            ORDER BY d.full_name ASC
            "#,
        )
        .bind(company_id)
        .bind(ONLINE_WINDOW_MINUTES as i32)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok("Nenhum motorista online no momento".to_string());
        }

        let names: Vec<String> = rows.into_iter().map(|(name,)| name).collect();
        Ok(format!(
            "Motoristas online ({}): {}",
            names.len(),
            names.join(", ")
        ))
    }

    async fn contar_veiculos_por_tipo(
        &self,
        company_id: Uuid,
        tipo: &str,
    ) -> Result<String, AppError> {
        let canonical = self.resolve_vehicle_type(tipo).await?;

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vehicles WHERE company_id = $1 AND LOWER(vehicle_type) = LOWER($2)",
        )
        .bind(company_id)
        .bind(&canonical)
        .fetch_one(&self.pool)
        .await?;

        if count.0 == 0 {
            Ok(format!("A frota não tem veículos do tipo {}", canonical))
        } else {
            Ok(format!(
                "A frota tem {} veículo(s) do tipo {}",
                count.0, canonical
            ))
        }
    }

    /// Canoniza um termo de tipo de veículo: tabela de sinônimos,
    /// depois o mapa estático, por fim o próprio termo.
    async fn resolve_vehicle_type(&self, tipo: &str) -> Result<String, AppError> {
        let from_table: Option<(String,)> = sqlx::query_as(
            "SELECT canonical FROM vehicle_type_synonyms WHERE LOWER(term) = LOWER($1)",
        )
        .bind(tipo.trim())
        .fetch_optional(&self.pool)
        .await?;

        if let Some((canonical,)) = from_table {
            return Ok(canonical);
        }

        if let Some(canonical) = static_synonym(tipo) {
            return Ok(canonical.to_string());
        }

        Ok(tipo.trim().to_lowercase())
    }

    async fn abastecimentos_por_data(
        &self,
        company_id: Uuid,
        data: NaiveDate,
    ) -> Result<String, AppError> {
        let rows = sqlx::query_as::<_, FuelingReportRow>(
            r#"
            SELECT * FROM fueling_report
            WHERE company_id = $1 AND fueled_at = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(company_id)
        .bind(data)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(format!("Nenhum abastecimento registrado em {}", data));
        }

        let lines: Vec<String> = rows.iter().map(describe_fueling).collect();
        Ok(format!(
            "Abastecimentos em {} ({}):\n{}",
            data,
            lines.len(),
            lines.join("\n")
        ))
    }

    async fn distancia_percorrida_periodo(
        &self,
        company_id: Uuid,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<String, AppError> {
        let total: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(distance_km), 0) FROM trips
            WHERE company_id = $1
              AND trip_status = 'completed'
              AND completed_at::date >= $2
              AND completed_at::date <= $3
            "#,
        )
        .bind(company_id)
        .bind(inicio)
        .bind(fim)
        .fetch_one(&self.pool)
        .await?;

        let km = total.0.to_f64().unwrap_or(0.0);
        if km == 0.0 {
            Ok(format!(
                "Nenhuma viagem concluída entre {} e {}",
                inicio, fim
            ))
        } else {
            Ok(format!(
                "Distância percorrida entre {} e {}: {:.1} km",
                inicio, fim, km
            ))
        }
    }
}

fn describe_driver(driver: &Driver) -> String {
    let mut parts = vec![format!("Motorista: {}", driver.full_name)];
    if let Some(cpf) = &driver.cpf {
        parts.push(format!("CPF: {}", cpf));
    }
    if let Some(phone) = &driver.phone {
        parts.push(format!("Telefone: {}", phone));
    }
    if let Some(cnh) = &driver.cnh_number {
        let mut cnh_text = format!("CNH: {}", cnh);
        if let Some(category) = &driver.cnh_category {
            cnh_text.push_str(&format!(" (categoria {})", category));
        }
        if let Some(expiry) = driver.cnh_expiry {
            cnh_text.push_str(&format!(", vence em {}", expiry));
        }
        parts.push(cnh_text);
    }
    parts.push(format!("Status: {}", driver.driver_status));
    parts.join(" | ")
}

fn describe_fueling(row: &FuelingReportRow) -> String {
    let liters = row.liters.to_f64().unwrap_or(0.0);
    let mut line = format!("- {}: {:.1} L", row.vehicle_plate, liters);
    if let Some(total) = row.total_cost.and_then(|t| t.to_f64()) {
        line.push_str(&format!(" (R$ {:.2})", total));
    }
    if let Some(name) = &row.driver_name {
        line.push_str(&format!(" - motorista {}", name));
    }
    line
}

/// Extrai um argumento string obrigatório; ausência vira a mensagem
/// devolvida ao modelo como resultado da chamada.
fn required_str<'a>(arguments: &'a serde_json::Value, key: &str) -> Result<&'a str, String> {
    arguments
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("Parâmetro obrigatório ausente: {}", key))
}

/// Converte um argumento de data; inválida vira mensagem para o modelo
fn parse_date_arg(value: &str, key: &str) -> Result<NaiveDate, String> {
    validate_date(value)
        .map_err(|_| format!("Valor inválido para {}: use o formato AAAA-MM-DD", key))
}

#[async_trait]
impl FleetToolExecutor for FleetToolService {
    async fn execute(&self, company_id: Uuid, name: &str, arguments: &serde_json::Value) -> String {
        log::info!("🔧 Ferramenta {} chamada: {}", name, arguments);

        let result = match name {
            "buscar_motorista" => match required_str(arguments, "nome") {
                Ok(nome) => self.buscar_motorista(company_id, nome).await,
                Err(message) => return message,
            },
            "listar_motoristas_online" => self.listar_motoristas_online(company_id).await,
            "contar_veiculos_por_tipo" => match required_str(arguments, "tipo") {
                Ok(tipo) => self.contar_veiculos_por_tipo(company_id, tipo).await,
                Err(message) => return message,
            },
            "abastecimentos_por_data" => {
                let data = match required_str(arguments, "data")
                    .and_then(|raw| parse_date_arg(raw, "data"))
                {
                    Ok(data) => data,
                    Err(message) => return message,
                };
                self.abastecimentos_por_data(company_id, data).await
            }
            "distancia_percorrida_periodo" => {
                let inicio = match required_str(arguments, "data_inicio")
                    .and_then(|raw| parse_date_arg(raw, "data_inicio"))
                {
                    Ok(data) => data,
                    Err(message) => return message,
                };
                let fim = match required_str(arguments, "data_fim")
                    .and_then(|raw| parse_date_arg(raw, "data_fim"))
                {
                    Ok(data) => data,
                    Err(message) => return message,
                };
                self.distancia_percorrida_periodo(company_id, inicio, fim).await
            }
            _ => return function_not_found(name),
        };

        // Falha de uma ferramenta não derruba a orquestração: vira a
        // resposta desta chamada e as demais seguem normalmente.
        match result {
            Ok(text) => text,
            Err(e) => {
                log::warn!("⚠️ Ferramenta {} falhou: {}", name, e);
                format!("Erro ao executar a ferramenta {}: {}", name, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_synonyms() {
        assert_eq!(static_synonym("trator"), Some("cavalo mecânico"));
        assert_eq!(static_synonym("TRATOR"), Some("cavalo mecânico"));
        assert_eq!(static_synonym("bitrem"), Some("carreta"));
        assert_eq!(static_synonym("empilhadeira"), None);
    }

    #[test]
    fn test_schemas_cover_all_tools() {
        let schemas = tool_schemas();
        let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "buscar_motorista",
                "listar_motoristas_online",
                "contar_veiculos_por_tipo",
                "abastecimentos_por_data",
                "distancia_percorrida_periodo",
            ]
        );

        // listar_motoristas_online não tem argumentos obrigatórios
        let online = &schemas[1];
        assert!(online.parameters.get("required").is_none());
    }

    #[test]
    fn test_required_str() {
        let args = json!({"nome": "Ana", "vazio": "  "});
        assert_eq!(required_str(&args, "nome").unwrap(), "Ana");
        assert!(required_str(&args, "vazio").is_err());

        let err = required_str(&args, "tipo").unwrap_err();
        assert_eq!(err, "Parâmetro obrigatório ausente: tipo");
    }

    #[test]
    fn test_parse_date_arg() {
        assert!(parse_date_arg("2025-03-10", "data").is_ok());
        let err = parse_date_arg("10/03/2025", "data").unwrap_err();
        assert!(err.contains("AAAA-MM-DD"));
    }

    #[test]
    fn test_function_not_found_message() {
        assert_eq!(
            function_not_found("apagar_tudo"),
            "Função não encontrada: apagar_tudo"
        );
    }

    #[test]
    fn test_describe_driver_full() {
        let driver = Driver {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            full_name: "Ana Souza".to_string(),
            cpf: Some("123.456.789-00".to_string()),
            phone: Some("+55 11 98888-7777".to_string()),
            cnh_number: Some("98765432100".to_string()),
            cnh_category: Some("E".to_string()),
            cnh_expiry: NaiveDate::from_ymd_opt(2027, 6, 30),
            driver_status: "active".to_string(),
            created_at: chrono::Utc::now(),
        };

        let text = describe_driver(&driver);
        assert!(text.contains("Motorista: Ana Souza"));
        assert!(text.contains("categoria E"));
        assert!(text.contains("Status: active"));
    }
}
