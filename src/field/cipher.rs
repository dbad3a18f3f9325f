// src/field/cipher.rs
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha3::{Digest, Sha3_256};

use crate::error::{Result, VaultError};

const NONCE_LEN: usize = 12;

/// Symmetric cipher applied to serialized records before they reach the
/// backing store.
///
/// The caller passphrase is stretched to a 256-bit key with SHA3-256.
/// Envelopes are base64(nonce || ciphertext) with a fresh random nonce per
/// record, so the stored text is opaque to the rest of the codec.
pub(crate) struct RecordCipher {
    cipher: Aes256Gcm,
}

impl RecordCipher {
    pub(crate) fn new(passphrase: &str) -> Self {
        let hash = Sha3_256::digest(passphrase.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(hash.as_slice());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    pub(crate) fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| VaultError::Encryption(e.to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(envelope))
    }

    pub(crate) fn decrypt(&self, envelope: &str) -> Result<String> {
        let raw = STANDARD
            .decode(envelope)
            .map_err(|e| VaultError::Decryption(format!("Invalid envelope encoding: {}", e)))?;

        if raw.len() < NONCE_LEN {
            return Err(VaultError::Decryption(
                "Envelope shorter than nonce".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| VaultError::Decryption(e.to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::Decryption(format!("Payload is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let cipher = RecordCipher::new("abc123");
        let envelope = cipher.encrypt("{\"a\":1}").unwrap();

        assert_ne!(envelope, "{\"a\":1}");
        assert_eq!(cipher.decrypt(&envelope).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn envelopes_are_nonce_randomized() {
        let cipher = RecordCipher::new("abc123");
        let first = cipher.encrypt("\"hello\"").unwrap();
        let second = cipher.encrypt("\"hello\"").unwrap();

        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first).unwrap(), "\"hello\"");
        assert_eq!(cipher.decrypt(&second).unwrap(), "\"hello\"");
    }

    #[test]
    fn wrong_key_fails() {
        let envelope = RecordCipher::new("abc123").encrypt("\"hello\"").unwrap();
        let result = RecordCipher::new("wrong").decrypt(&envelope);

        assert!(matches!(result, Err(VaultError::Decryption(_))));
    }

    #[test]
    fn corrupted_envelope_fails() {
        let cipher = RecordCipher::new("abc123");
        let envelope = cipher.encrypt("\"hello\"").unwrap();

        let mut raw = STANDARD.decode(&envelope).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        let tampered = STANDARD.encode(raw);

        assert!(matches!(
            cipher.decrypt(&tampered),
            Err(VaultError::Decryption(_))
        ));
    }

    #[test]
    fn truncated_envelope_fails() {
        let cipher = RecordCipher::new("abc123");
        let truncated = STANDARD.encode([0u8; 4]);

        assert!(matches!(
            cipher.decrypt(&truncated),
            Err(VaultError::Decryption(_))
        ));
        assert!(matches!(
            cipher.decrypt("%%% not base64 %%%"),
            Err(VaultError::Decryption(_))
        ));
    }
}
