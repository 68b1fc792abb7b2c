//! Services module
//!
//! Este módulo contém a lógica de negócio que vai além do CRUD:
//! auditoria, ferramentas de consulta da frota, os clientes de LLM e a
//! orquestração dos dois copilotos.

pub mod audit_service;
pub mod copilot_service;
pub mod fleet_tools;
pub mod llm;
