//! Criptografia de segredos
//!
//! As chaves de API dos provedores de IA ficam cifradas na tabela
//! `app_settings` com AES-256-GCM. O valor armazenado é
//! base64(nonce || ciphertext), com a chave mestra vinda do ambiente.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::utils::errors::AppError;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

fn load_cipher(master_key_b64: &str) -> Result<Aes256Gcm, AppError> {
    let key_bytes = BASE64
        .decode(master_key_b64.trim())
        .map_err(|e| AppError::Crypto(format!("Chave mestra não é base64 válido: {}", e)))?;

    if key_bytes.len() != KEY_LEN {
        return Err(AppError::Crypto(format!(
            "Chave mestra deve ter {} bytes, recebeu {}",
            KEY_LEN,
            key_bytes.len()
        )));
    }

    Aes256Gcm::new_from_slice(&key_bytes)
        .map_err(|e| AppError::Crypto(format!("Chave mestra inválida: {}", e)))
}

/// Cifrar um segredo em texto claro para armazenamento
pub fn encrypt_secret(plaintext: &str, master_key_b64: &str) -> Result<String, AppError> {
    let cipher = load_cipher(master_key_b64)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| AppError::Crypto("Falha ao cifrar segredo".to_string()))?;

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(payload))
}

/// Decifrar um segredo armazenado
pub fn decrypt_secret(encoded: &str, master_key_b64: &str) -> Result<String, AppError> {
    let cipher = load_cipher(master_key_b64)?;

    let payload = BASE64
        .decode(encoded.trim())
        .map_err(|e| AppError::Crypto(format!("Segredo armazenado não é base64 válido: {}", e)))?;

    if payload.len() <= NONCE_LEN {
        return Err(AppError::Crypto("Segredo armazenado truncado".to_string()));
    }

    let nonce = Nonce::from_slice(&payload[..NONCE_LEN]);
    let plaintext = cipher
        .decrypt(nonce, &payload[NONCE_LEN..])
        .map_err(|_| AppError::Crypto("Falha ao decifrar segredo".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| AppError::Crypto("Segredo decifrado não é UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> String {
        BASE64.encode([7u8; KEY_LEN])
    }

    #[test]
    fn test_roundtrip() {
        let key = test_key();
        let encrypted = encrypt_secret("sk-proj-abc123", &key).unwrap();
        assert_ne!(encrypted, "sk-proj-abc123");

        let decrypted = decrypt_secret(&encrypted, &key).unwrap();
        assert_eq!(decrypted, "sk-proj-abc123");
    }

    #[test]
    fn test_key_length_enforced() {
        let short_key = BASE64.encode([1u8; 16]);
        assert!(encrypt_secret("x", &short_key).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let key = test_key();
        let encrypted = encrypt_secret("segredo", &key).unwrap();

        let mut bytes = BASE64.decode(&encrypted).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let tampered = BASE64.encode(bytes);

        assert!(decrypt_secret(&tampered, &key).is_err());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let encrypted = encrypt_secret("segredo", &test_key()).unwrap();
        let other_key = BASE64.encode([9u8; KEY_LEN]);
        assert!(decrypt_secret(&encrypted, &other_key).is_err());
    }
}
