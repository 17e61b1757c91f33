//! At-rest protection for the API token.
//!
//! Two files in the working directory: a raw 32-byte symmetric key and the
//! sealed token (AES-256-GCM, fresh random nonce prepended to the
//! ciphertext). Decrypting with any other key fails with
//! `CredentialIntegrity`, never silently returns garbage.

use std::path::{Path, PathBuf};

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::core::error::{GitReconError, Result};
use crate::core::traits::SecretPrompt;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

pub struct CredentialVault {
    key_path: PathBuf,
    store_path: PathBuf,
}

impl CredentialVault {
    pub fn new(key_path: impl AsRef<Path>, store_path: impl AsRef<Path>) -> Self {
        Self {
            key_path: key_path.as_ref().to_path_buf(),
            store_path: store_path.as_ref().to_path_buf(),
        }
    }

    /// Load the key file, or generate and persist a fresh random key if
    /// none exists yet. Idempotent across calls and restarts.
    pub fn ensure_key(&self) -> Result<[u8; KEY_LEN]> {
        if self.key_path.exists() {
            let bytes = std::fs::read(&self.key_path)?;
            // A wrong-length key file is not a sealed-blob integrity
            // failure; re-prompting cannot recover it, so report it as a
            // configuration problem the operator has to resolve.
            let key: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
                GitReconError::Config(format!(
                    "Key file {} is not {} bytes; delete it to generate a fresh key",
                    self.key_path.display(),
                    KEY_LEN
                ))
            })?;
            return Ok(key);
        }

        let mut key = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut key);
        std::fs::write(&self.key_path, key)?;
        debug!("Generated new vault key at {}", self.key_path.display());
        Ok(key)
    }

    /// Authenticated encryption of the token. Nonce-prefixed blob.
    pub fn seal(&self, secret: &SecretString, key: &[u8; KEY_LEN]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| GitReconError::CredentialIntegrity)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, secret.expose_secret().as_bytes())
            .map_err(|_| GitReconError::Unknown("Encryption failed".to_string()))?;

        let mut blob = nonce_bytes.to_vec();
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Open a sealed blob. Any tampering, truncation, or key mismatch is a
    /// recoverable `CredentialIntegrity` error.
    pub fn open(&self, blob: &[u8], key: &[u8; KEY_LEN]) -> Result<SecretString> {
        if blob.len() < NONCE_LEN {
            return Err(GitReconError::CredentialIntegrity);
        }
        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| GitReconError::CredentialIntegrity)?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| GitReconError::CredentialIntegrity)?;

        let token =
            String::from_utf8(plaintext).map_err(|_| GitReconError::CredentialIntegrity)?;
        Ok(SecretString::new(token))
    }

    /// Decrypt the stored token if present; on an integrity failure fall
    /// back to capturing a fresh one. A captured token is sealed and
    /// persisted before it is returned.
    pub fn load_or_request(&self, prompt: &dyn SecretPrompt) -> Result<SecretString> {
        let key = self.ensure_key()?;

        if self.store_path.exists() {
            let blob = std::fs::read(&self.store_path)?;
            match self.open(&blob, &key) {
                Ok(token) => return Ok(token),
                Err(GitReconError::CredentialIntegrity) => {
                    warn!("Stored token unreadable with the current key, requesting a new one");
                }
                Err(e) => return Err(e),
            }
        }

        self.capture(prompt, &key)
    }

    /// Force a fresh capture, replacing whatever is sealed on disk.
    pub fn reset(&self, prompt: &dyn SecretPrompt) -> Result<SecretString> {
        let key = self.ensure_key()?;
        self.capture(prompt, &key)
    }

    fn capture(&self, prompt: &dyn SecretPrompt, key: &[u8; KEY_LEN]) -> Result<SecretString> {
        let token = prompt.request_token()?;
        let blob = self.seal(&token, key)?;
        std::fs::write(&self.store_path, blob)?;
        debug!("Token sealed to {}", self.store_path.display());
        Ok(token)
    }
}

/// Interactive prompt backed by rpassword, so the token never echoes.
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn request_token(&self) -> Result<SecretString> {
        let token = rpassword::prompt_password("GitHub API token (github_pat_...): ")
            .map_err(GitReconError::Io)?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(GitReconError::Input("Token must not be empty".to_string()));
        }
        Ok(SecretString::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockSecretPrompt;
    use tempfile::TempDir;

    fn test_vault(dir: &TempDir) -> CredentialVault {
        CredentialVault::new(dir.path().join("test.key"), dir.path().join("token.enc"))
    }

    fn prompt_returning(token: &str) -> MockSecretPrompt {
        let token = token.to_string();
        let mut prompt = MockSecretPrompt::new();
        prompt
            .expect_request_token()
            .times(1)
            .returning(move || Ok(SecretString::new(token.clone())));
        prompt
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let key = vault.ensure_key().unwrap();

        let secret = SecretString::new("github_pat_roundtrip".to_string());
        let blob = vault.seal(&secret, &key).unwrap();
        let opened = vault.open(&blob, &key).unwrap();
        assert_eq!(opened.expose_secret(), "github_pat_roundtrip");
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let key = vault.ensure_key().unwrap();

        let blob = vault
            .seal(&SecretString::new("secret".to_string()), &key)
            .unwrap();

        let mut other_key = key;
        other_key[0] ^= 0xFF;
        let result = vault.open(&blob, &other_key);
        assert!(matches!(result, Err(GitReconError::CredentialIntegrity)));
    }

    #[test]
    fn test_open_tampered_blob_fails() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let key = vault.ensure_key().unwrap();

        let mut blob = vault
            .seal(&SecretString::new("secret".to_string()), &key)
            .unwrap();
        blob[NONCE_LEN + 2] ^= 0xFF;

        let result = vault.open(&blob, &key);
        assert!(matches!(result, Err(GitReconError::CredentialIntegrity)));
    }

    #[test]
    fn test_open_truncated_blob_fails() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let key = vault.ensure_key().unwrap();

        let result = vault.open(&[0u8; 5], &key);
        assert!(matches!(result, Err(GitReconError::CredentialIntegrity)));
    }

    #[test]
    fn test_malformed_key_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        std::fs::write(dir.path().join("test.key"), b"too short").unwrap();

        assert!(matches!(vault.ensure_key(), Err(GitReconError::Config(_))));

        // load_or_request must not try to prompt its way out of a bad key
        let strict = MockSecretPrompt::new();
        assert!(matches!(
            vault.load_or_request(&strict),
            Err(GitReconError::Config(_))
        ));
    }

    #[test]
    fn test_ensure_key_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let first = vault.ensure_key().unwrap();
        let second = vault.ensure_key().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_store_goes_straight_to_prompt() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);
        let prompt = prompt_returning("github_pat_fresh");

        let token = vault.load_or_request(&prompt).unwrap();
        assert_eq!(token.expose_secret(), "github_pat_fresh");
        // Captured token must be persisted before being returned
        assert!(dir.path().join("token.enc").exists());
    }

    #[test]
    fn test_load_or_request_reads_existing_store_without_prompting() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);

        let prompt = prompt_returning("github_pat_once");
        vault.load_or_request(&prompt).unwrap();

        // Second load must not touch the prompt at all
        let strict = MockSecretPrompt::new();
        let token = vault.load_or_request(&strict).unwrap();
        assert_eq!(token.expose_secret(), "github_pat_once");
    }

    #[test]
    fn test_corrupted_store_triggers_recapture() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);

        let prompt = prompt_returning("github_pat_old");
        vault.load_or_request(&prompt).unwrap();

        // Corrupt the sealed file in place
        let store = dir.path().join("token.enc");
        let mut bytes = std::fs::read(&store).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(&store, bytes).unwrap();

        let prompt = prompt_returning("github_pat_new");
        let token = vault.load_or_request(&prompt).unwrap();
        assert_eq!(token.expose_secret(), "github_pat_new");

        // The recaptured token was resealed; a plain reload now succeeds
        let strict = MockSecretPrompt::new();
        let reloaded = vault.load_or_request(&strict).unwrap();
        assert_eq!(reloaded.expose_secret(), "github_pat_new");
    }

    #[test]
    fn test_reset_replaces_stored_token() {
        let dir = TempDir::new().unwrap();
        let vault = test_vault(&dir);

        vault.load_or_request(&prompt_returning("github_pat_a")).unwrap();
        vault.reset(&prompt_returning("github_pat_b")).unwrap();

        let strict = MockSecretPrompt::new();
        let token = vault.load_or_request(&strict).unwrap();
        assert_eq!(token.expose_secret(), "github_pat_b");
    }
}
