//! Encryption used by the greeting store.
//!
//! - **greeting**: throwaway-key RSA for display strings
//! - **container**: PBKDF2 + AES-256-CBC for stored documents

pub mod container;
pub mod greeting;

pub use container::ContainerSecret;
