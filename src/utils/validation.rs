//! Utilidades de validação
//!
//! Este módulo contém funções helper para validação de dados
//! e conversão de tipos vindos de argumentos textuais.

use chrono::NaiveDate;
use uuid::Uuid;
use validator::ValidationError;

/// Validar e converter string para UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar e converter string para data (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que um string não esteja vazio
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(validate_date("14/03/2025").is_err());
        assert!(validate_date("2025-13-01").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("a5237bc2-8712-4b3e-9b2f-1f2e3d4c5b6a").is_ok());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("ok").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
