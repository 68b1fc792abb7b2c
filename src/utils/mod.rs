//! Utilidades do sistema
//!
//! Este módulo contém utilidades para manejo de erros, validação,
//! JWT e criptografia de segredos.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod validation;
