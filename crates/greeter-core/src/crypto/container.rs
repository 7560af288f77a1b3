//! Password-based AES-256-CBC encryption of container documents.
//!
//! # Security
//!
//! The default [`ContainerSecret`] is compiled into the binary: a fixed
//! password, a fixed salt and a low iteration count. Anyone with the binary
//! can decrypt a container written with it. The defaults exist so output is
//! reproducible; supply a real secret through [`ContainerSecret::new`].

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::error::{GreeterError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// AES block (and CBC IV) length in bytes.
pub const BLOCK_LEN: usize = 16;
/// Shortest salt accepted by [`ContainerSecret::new`].
pub const MIN_SALT_LEN: usize = 8;

pub const DEFAULT_PASSWORD: &str = "ThisIsOurSuperSecretPassword";
pub const DEFAULT_SALT: &str = "This is my super secret salt!";
pub const DEFAULT_ITERATIONS: u32 = 1024;

/// Password, salt and PBKDF2 iteration count used to seal containers.
#[derive(Debug)]
pub struct ContainerSecret {
    password: SecretString,
    salt: Vec<u8>,
    iterations: u32,
}

impl Default for ContainerSecret {
    /// The weak compiled-in secret. See the module docs.
    fn default() -> Self {
        Self {
            password: SecretString::from(DEFAULT_PASSWORD.to_string()),
            salt: DEFAULT_SALT.as_bytes().to_vec(),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl ContainerSecret {
    /// Build a secret.
    ///
    /// # Errors
    ///
    /// Returns `GreeterError::Encryption` if the salt is shorter than
    /// [`MIN_SALT_LEN`] bytes or `iterations` is zero.
    pub fn new(password: &str, salt: &[u8], iterations: u32) -> Result<Self> {
        if salt.len() < MIN_SALT_LEN {
            return Err(GreeterError::Encryption(format!(
                "Salt must be at least {} bytes",
                MIN_SALT_LEN
            )));
        }
        if iterations == 0 {
            return Err(GreeterError::Encryption(
                "Iteration count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            password: SecretString::from(password.to_string()),
            salt: salt.to_vec(),
            iterations,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether this is the compiled-in default secret.
    pub fn is_default(&self) -> bool {
        self.password.expose_secret() == DEFAULT_PASSWORD
            && self.salt == DEFAULT_SALT.as_bytes()
            && self.iterations == DEFAULT_ITERATIONS
    }

    /// Key followed by IV: the first 48 bytes of PBKDF2-HMAC-SHA1.
    fn derive(&self) -> Zeroizing<[u8; KEY_LEN + BLOCK_LEN]> {
        let mut material = Zeroizing::new([0u8; KEY_LEN + BLOCK_LEN]);
        pbkdf2_hmac::<Sha1>(
            self.password.expose_secret().as_bytes(),
            &self.salt,
            self.iterations,
            &mut material[..],
        );
        material
    }
}

/// Length of the ciphertext for `plain_len` bytes of input (PKCS#7 always pads).
pub fn sealed_len(plain_len: usize) -> usize {
    (plain_len / BLOCK_LEN + 1) * BLOCK_LEN
}

/// Encrypt `plain` with AES-256-CBC under a key and IV derived from `secret`.
///
/// The IV is derived, not random, so identical inputs produce identical
/// ciphertext.
///
/// # Examples
///
/// ```
/// use greeter_core::crypto::container::{seal, sealed_len, ContainerSecret};
///
/// let sealed = seal(b"some document", &ContainerSecret::default()).unwrap();
/// assert_eq!(sealed.len(), sealed_len(13));
/// ```
pub fn seal(plain: &[u8], secret: &ContainerSecret) -> Result<Vec<u8>> {
    let material = secret.derive();
    let (key, iv) = material.split_at(KEY_LEN);
    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| GreeterError::Encryption(format!("Failed to create encryptor: {}", e)))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plain))
}
