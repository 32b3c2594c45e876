//! Pre-hybrid decoding.
//!
//! Old envelopes RSA-OAEP encrypted the credential directly, optionally with
//! a random salt mixed into the plaintext. Read-only: nothing new is ever
//! written this way.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use super::oaep;
use crate::core::constants::SALT_LENGTH;
use crate::error::{CipherError, Result};

/// 8 random bytes, base64 encoded.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    STANDARD.encode(salt)
}

/// Single-stage RSA-OAEP decode.
pub fn decode_pure_rsa(ciphertext: &str, key: &RsaPrivateKey) -> Result<Zeroizing<String>> {
    let sealed = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;
    let opened = Zeroizing::new(
        key.decrypt(oaep(), &sealed)
            .map_err(|e| CipherError::DecryptionFailed(format!("rsa: {}", e)))?,
    );
    let plaintext = std::str::from_utf8(&opened)
        .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;
    Ok(Zeroizing::new(plaintext.to_string()))
}

/// Single-stage decode, then strip the first occurrence of `salt`.
pub fn decode_with_salt(
    ciphertext: &str,
    salt: &str,
    key: &RsaPrivateKey,
) -> Result<Zeroizing<String>> {
    let salted = decode_pure_rsa(ciphertext, key)?;
    Ok(Zeroizing::new(salted.replacen(salt, "", 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seal(plaintext: &str, key: &RsaPrivateKey) -> String {
        let sealed = key
            .to_public_key()
            .encrypt(&mut rand::thread_rng(), oaep(), plaintext.as_bytes())
            .unwrap();
        STANDARD.encode(sealed)
    }

    #[test]
    fn test_salt_shape() {
        let salt = generate_salt();
        assert_eq!(STANDARD.decode(&salt).unwrap().len(), SALT_LENGTH);
        assert_ne!(generate_salt(), salt);
    }

    #[test]
    fn test_pure_rsa() {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let sealed = seal("AKIAOLD", &key);
        assert_eq!(decode_pure_rsa(&sealed, &key).unwrap().as_str(), "AKIAOLD");
    }

    #[test]
    fn test_salt_stripped_once() {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let sealed = seal("abcSALTdefSALT", &key);
        let plain = decode_with_salt(&sealed, "SALT", &key).unwrap();
        assert_eq!(plain.as_str(), "abcdefSALT");
    }

    #[test]
    fn test_wrong_key() {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let other = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let sealed = seal("secret", &key);
        assert!(decode_pure_rsa(&sealed, &other).is_err());
    }
}
