//! Controllers module
//!
//! Regras de negócio de cada recurso: validação de payload, checagens
//! de unicidade e de posse pela empresa, e registro de auditoria nas
//! mutações. Os handlers das rotas só extraem e delegam para cá.

pub mod admin_controller;
pub mod audit_controller;
pub mod auth_controller;
pub mod chat_controller;
pub mod copilot_controller;
pub mod driver_controller;
pub mod fueling_controller;
pub mod location_controller;
pub mod maintenance_controller;
pub mod settings_controller;
pub mod trailer_controller;
pub mod trip_controller;
pub mod vehicle_controller;
