//! Modelos do sistema
//!
//! Este módulo contém todos os modelos de dados que mapeiam exatamente
//! o schema PostgreSQL com as convenções padrão.

pub mod admin;
pub mod audit;
pub mod chat;
pub mod copilot;
pub mod driver;
pub mod fueling;
pub mod location;
pub mod maintenance;
pub mod settings;
pub mod trailer;
pub mod trip;
pub mod vehicle;
