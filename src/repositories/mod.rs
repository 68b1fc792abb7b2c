//! Repositories module
//!
//! Este módulo concentra o acesso a dados. Cada repository embrulha o
//! pool do Postgres e expõe operações tipadas sobre uma tabela,
//! sempre escopadas pela empresa do administrador autenticado.

pub mod admin_repository;
pub mod audit_repository;
pub mod chat_repository;
pub mod driver_repository;
pub mod fueling_repository;
pub mod location_repository;
pub mod maintenance_repository;
pub mod settings_repository;
pub mod trailer_repository;
pub mod trip_repository;
pub mod vehicle_repository;
