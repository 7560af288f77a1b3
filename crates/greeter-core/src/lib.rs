//! # Greeter Core
//!
//! Core library for Greeter - prints styled greetings and stores data in a
//! plain or encrypted configuration document.
//!
//! ## Architecture
//!
//! - **console**: styled line writer (accents, timestamps, colors)
//! - **store**: `GreetingStore`, the entry point for greetings and storage
//! - **crypto**: RSA greeting sealing, AES-256-CBC container sealing
//! - **document**: the configuration document and its TOML form
//! - **paths**: where documents are written
//! - **text**: encodings and base64
//!
//! ## Known weaknesses
//!
//! The default container secret is compiled in, and encrypted greetings use
//! a throwaway key pair so they can never be decrypted. Both are kept as-is;
//! see [`crypto::container`] and [`crypto::greeting`].

pub mod console;
pub mod crypto;
pub mod document;
pub mod error;
pub mod fs;
pub mod paths;
pub mod store;
pub mod text;

pub use console::{MessageStyle, PrintOptions, StyledWriter};
pub use crypto::ContainerSecret;
pub use error::{ErrorKind, ErrorLog, GreeterError, RecordedError, Result};
pub use paths::StoragePaths;
pub use store::{GreetingStore, Outcome, StorageTarget, DEFAULT_GREETING};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
