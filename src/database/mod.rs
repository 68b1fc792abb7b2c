//! Módulo de base de dados
//!
//! Cuida da conexão com o PostgreSQL.

pub mod connection;

pub use connection::create_pool;
