//! Legacy PEM encryption (RFC 1423 `Proc-Type` / `DEK-Info` headers).
//!
//! The block key is derived from the passphrase and the first 8 IV bytes
//! with OpenSSL's MD5 `EVP_BytesToKey`, then the body is CBC decrypted.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use md5::{Digest, Md5};
use zeroize::Zeroizing;

use crate::error::{CipherError, Result};

const SALT_LEN: usize = 8;

/// CBC decrypt in place with PKCS#7 unpadding; evaluates to the plaintext length.
macro_rules! cbc_decrypt {
    ($cipher:ty, $key:expr, $iv:expr, $body:expr) => {
        cbc::Decryptor::<$cipher>::new_from_slices($key, $iv)
            .map_err(|e| CipherError::DecryptionFailed(format!("pem: {}", e)))?
            .decrypt_padded_mut::<Pkcs7>($body)
            .map_err(|_| {
                CipherError::DecryptionFailed("incorrect passphrase or corrupt key".to_string())
            })?
            .len()
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DekCipher {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
    DesCbc,
    DesEde3Cbc,
}

impl DekCipher {
    fn from_name(name: &str) -> Result<Self> {
        match name {
            "AES-128-CBC" => Ok(Self::Aes128Cbc),
            "AES-192-CBC" => Ok(Self::Aes192Cbc),
            "AES-256-CBC" => Ok(Self::Aes256Cbc),
            "DES-CBC" => Ok(Self::DesCbc),
            "DES-EDE3-CBC" => Ok(Self::DesEde3Cbc),
            other => Err(CipherError::UnsupportedPemCipher(other.to_string()).into()),
        }
    }

    fn key_len(self) -> usize {
        match self {
            Self::Aes128Cbc => 16,
            Self::Aes192Cbc => 24,
            Self::Aes256Cbc => 32,
            Self::DesCbc => 8,
            Self::DesEde3Cbc => 24,
        }
    }

    fn block_len(self) -> usize {
        match self {
            Self::DesCbc | Self::DesEde3Cbc => 8,
            _ => 16,
        }
    }
}

/// True when the block carries `Proc-Type: 4,ENCRYPTED`.
pub fn is_encrypted(block: &::pem::Pem) -> bool {
    block
        .headers()
        .get("Proc-Type")
        .map(|v| v.contains("ENCRYPTED"))
        .unwrap_or(false)
}

/// Decrypt an encrypted PEM block's body into DER.
///
/// # Errors
///
/// Returns `CipherError` for missing or unsupported headers, and for a
/// padding failure, which is what a wrong passphrase usually looks like.
pub fn decrypt(block: &::pem::Pem, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let dek_info = block
        .headers()
        .get("DEK-Info")
        .ok_or_else(|| CipherError::UnsupportedPemCipher("missing DEK-Info header".into()))?;
    let (name, iv_hex) = dek_info
        .split_once(',')
        .ok_or_else(|| CipherError::UnsupportedPemCipher(dek_info.to_string()))?;

    let cipher = DekCipher::from_name(name.trim())?;
    let iv = hex::decode(iv_hex.trim())
        .map_err(|e| CipherError::UnsupportedPemCipher(format!("invalid IV: {}", e)))?;
    if iv.len() != cipher.block_len() {
        return Err(CipherError::UnsupportedPemCipher(format!(
            "IV is {} bytes, expected {}",
            iv.len(),
            cipher.block_len()
        ))
        .into());
    }

    let key = derive_key(passphrase, &iv[..SALT_LEN], cipher.key_len());
    let mut body = Zeroizing::new(block.contents().to_vec());

    let plain_len = match cipher {
        DekCipher::Aes128Cbc => cbc_decrypt!(aes::Aes128, &key, &iv, &mut body),
        DekCipher::Aes192Cbc => cbc_decrypt!(aes::Aes192, &key, &iv, &mut body),
        DekCipher::Aes256Cbc => cbc_decrypt!(aes::Aes256, &key, &iv, &mut body),
        DekCipher::DesCbc => cbc_decrypt!(des::Des, &key, &iv, &mut body),
        DekCipher::DesEde3Cbc => cbc_decrypt!(des::TdesEde3, &key, &iv, &mut body),
    };
    body.truncate(plain_len);

    Ok(body)
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
fn derive_key(passphrase: &[u8], salt: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(len + 16));
    let mut digest: Vec<u8> = Vec::new();
    while out.len() < len {
        let mut hasher = Md5::new();
        hasher.update(&digest);
        hasher.update(passphrase);
        hasher.update(salt);
        digest = hasher.finalize().to_vec();
        out.extend_from_slice(&digest);
    }
    out.truncate(len);
    out
}
