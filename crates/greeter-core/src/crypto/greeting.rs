//! One-way RSA sealing of greeting text.
//!
//! Each call generates a fresh key pair, encrypts with the public half and
//! drops the private half. The result can be displayed but never decrypted.

use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::error::{GreeterError, Result};
use crate::text::{to_base64, EncodingStyle};

/// Key length used for greetings unless configured otherwise.
pub const DEFAULT_KEY_BITS: usize = 1024;

/// Key lengths accepted from configuration. Generation time grows steeply
/// past the upper bound.
pub const KEY_BITS_RANGE: std::ops::RangeInclusive<usize> = 512..=4096;

/// Bytes of PKCS#1 v1.5 padding per block.
const PKCS1_V15_OVERHEAD: usize = 11;

/// Largest plaintext, in bytes, a key of `key_bits` can seal.
pub fn capacity(key_bits: usize) -> usize {
    (key_bits / 8).saturating_sub(PKCS1_V15_OVERHEAD)
}

/// Encrypt `message` (as ASCII) under a throwaway RSA key and return base64.
///
/// # Errors
///
/// Returns `GreeterError::MessageTooLong` when the encoded message exceeds
/// [`capacity`], and `GreeterError::Encryption` for any other failure.
pub fn seal(message: &str, key_bits: usize) -> Result<String> {
    let data = EncodingStyle::Ascii.encode(message);
    let limit = capacity(key_bits);
    if data.len() > limit {
        return Err(GreeterError::MessageTooLong {
            len: data.len(),
            capacity: limit,
        });
    }

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, key_bits)
        .map_err(|e| GreeterError::Encryption(format!("Key generation failed: {}", e)))?;
    let public_key = RsaPublicKey::from(&private_key);
    drop(private_key);

    let sealed = public_key
        .encrypt(&mut rng, Pkcs1v15Encrypt, &data)
        .map_err(|e| match e {
            rsa::Error::MessageTooLong => GreeterError::MessageTooLong {
                len: data.len(),
                capacity: public_key.size().saturating_sub(PKCS1_V15_OVERHEAD),
            },
            other => GreeterError::Encryption(other.to_string()),
        })?;

    Ok(to_base64(&sealed))
}
