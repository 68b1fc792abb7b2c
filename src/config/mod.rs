//! Configuração da aplicação

pub mod environment;
