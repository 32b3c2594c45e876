//! Hybrid envelope backend.
//!
//! The plaintext is encrypted with AES-256-CFB under a random key; only that
//! key is RSA-OAEP encrypted for the recipient, so plaintext length is not
//! bounded by the RSA modulus.
//!
//! Wire format (all base64 is standard, padded):
//!
//! ```text
//! base64( {"EncodedKey": base64(oaep(K)), "Ciphertext": base64(iv || cfb(K, iv, plaintext))} )
//! ```

use aes::Aes256;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use rand::RngCore;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use tracing::trace;
use zeroize::Zeroizing;

use super::{oaep, rsa_public_key, Cipher};
use crate::error::{CipherError, Result};

type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 16;

/// Inner JSON object carried inside the outer base64 layer.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Wrapped {
    encoded_key: String,
    ciphertext: String,
}

/// RSA-OAEP wrapped AES-256-CFB.
pub struct Hybrid;

impl Cipher for Hybrid {
    type Recipient = ssh_key::PublicKey;
    type Identity = RsaPrivateKey;

    fn name(&self) -> &'static str {
        "rsa-oaep+aes-cfb"
    }

    fn encrypt(&self, plaintext: &str, recipient: &ssh_key::PublicKey) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let public = rsa_public_key(recipient)?;
        let mut rng = rand::thread_rng();

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        rng.fill_bytes(&mut key[..]);

        let mut sealed = vec![0u8; BLOCK_LEN + plaintext.len()];
        let (iv, body) = sealed.split_at_mut(BLOCK_LEN);
        rng.fill_bytes(iv);
        body.copy_from_slice(plaintext.as_bytes());
        Aes256CfbEnc::new_from_slices(&key[..], iv)
            .map_err(|e| CipherError::EncryptionFailed(format!("aes: {}", e)))?
            .encrypt(body);

        let encrypted_key = public
            .encrypt(&mut rng, oaep(), &key[..])
            .map_err(|e| CipherError::EncryptionFailed(format!("rsa: {}", e)))?;

        let wrapped = Wrapped {
            encoded_key: STANDARD.encode(encrypted_key),
            ciphertext: STANDARD.encode(&sealed),
        };
        let json = serde_json::to_vec(&wrapped)
            .map_err(|e| CipherError::EncryptionFailed(format!("json: {}", e)))?;

        let encoded = STANDARD.encode(json);
        trace!(ciphertext_len = encoded.len(), "encrypted");
        Ok(encoded)
    }

    fn decrypt(&self, ciphertext: &str, identity: &RsaPrivateKey) -> Result<Zeroizing<String>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let outer = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;
        let wrapped: Wrapped = serde_json::from_slice(&outer)
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid envelope: {}", e)))?;

        let encrypted_key = STANDARD
            .decode(&wrapped.encoded_key)
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid key encoding: {}", e)))?;
        let key = Zeroizing::new(
            identity
                .decrypt(oaep(), &encrypted_key)
                .map_err(|e| CipherError::DecryptionFailed(format!("rsa: {}", e)))?,
        );

        let mut sealed = STANDARD.decode(&wrapped.ciphertext).map_err(|e| {
            CipherError::DecryptionFailed(format!("invalid ciphertext encoding: {}", e))
        })?;
        if sealed.len() < BLOCK_LEN {
            return Err(CipherError::DecryptionFailed("ciphertext shorter than IV".into()).into());
        }

        let (iv, body) = sealed.split_at_mut(BLOCK_LEN);
        Aes256CfbDec::new_from_slices(&key[..], iv)
            .map_err(|e| CipherError::DecryptionFailed(format!("aes: {}", e)))?
            .decrypt(body);

        let plaintext = String::from_utf8(body.to_vec())
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;
        sealed.iter_mut().for_each(|b| *b = 0);

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(plaintext))
    }
}
