use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::utils::{ensure_dir, restrict_file};

const NONCE_LEN: usize = 12;

/// Load the master key, generating and persisting a fresh one on first use.
pub fn load_or_generate_key(path: &Path) -> Result<Vec<u8>, String> {
    if path.exists() {
        let buf = fs::read(path).map_err(|e| format!("Unable to read key: {}", e))?;
        if buf.len() != 32 {
            return Err("Invalid key length".to_string());
        }
        return Ok(buf);
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let key = Aes256Gcm::generate_key(OsRng);
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| format!("Key write error: {}", e))?;
    f.write_all(&key)
        .map_err(|e| format!("Key write error: {}", e))?;
    restrict_file(path);
    Ok(key.to_vec())
}

/// Encrypt `plaintext` and encode `nonce || ciphertext` as base64.
pub fn seal(cipher: &Aes256Gcm, plaintext: &[u8]) -> Result<String, String> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let cipher_bytes = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| "Encrypt error".to_string())?;

    let mut out = Vec::with_capacity(NONCE_LEN + cipher_bytes.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&cipher_bytes);
    Ok(general_purpose::STANDARD.encode(&out))
}

/// Reverse of [`seal`].
pub fn open(cipher: &Aes256Gcm, encoded: &str) -> Result<Vec<u8>, String> {
    let decoded = general_purpose::STANDARD
        .decode(encoded.trim_end())
        .map_err(|_| "Corrupted data".to_string())?;
    if decoded.len() < NONCE_LEN {
        return Err("Corrupted data".to_string());
    }
    let (nonce_bytes, cipher_bytes) = decoded.split_at(NONCE_LEN);
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), cipher_bytes)
        .map_err(|_| "Decrypt error".to_string())
}
