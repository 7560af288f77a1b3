//! The greeting store: greeting display and document persistence.

use std::borrow::Cow;
use std::fmt;
use std::io::{Stdout, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::console::{MessageStyle, PrintOptions, StyledWriter};
use crate::crypto::container::{self, ContainerSecret};
use crate::crypto::greeting::{self, DEFAULT_KEY_BITS};
use crate::document::ConfigurationDocument;
use crate::error::{ErrorKind, ErrorLog, GreeterError, Result};
use crate::fs::write_atomic;
use crate::paths::StoragePaths;

/// Greeting printed by [`GreetingStore::greet`].
pub const DEFAULT_GREETING: &str = "Hello World!";

const OP_PRINT_GREETING: &str = "print_greeting";
const OP_STORE_DATA: &str = "store_data";

/// Where `store_data` puts the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageTarget {
    /// Plaintext document at the plain path
    PlainFile,
    /// Encrypted document at the container path
    EncryptedContainer,
    /// No backend exists; always reported as unsupported
    Database,
}

impl fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainFile => "file",
            Self::EncryptedContainer => "container",
            Self::Database => "database",
        };
        f.write_str(name)
    }
}

/// Result of a store operation. Failures are also in the store's [`ErrorLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The requested target has no implementation
    Unsupported,
    Failed(ErrorKind),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Prints greetings and stores documents, recording every failure instead
/// of returning it.
///
/// Each operation reports its result on the console and returns an
/// [`Outcome`]. The underlying error, with full detail, is appended to
/// [`errors`](Self::errors).
pub struct GreetingStore<W: Write = Stdout> {
    console: StyledWriter<W>,
    errors: ErrorLog,
    paths: StoragePaths,
    secret: ContainerSecret,
    key_bits: usize,
}

impl GreetingStore<Stdout> {
    /// Store on stdout writing to the default per-user directory.
    pub fn new() -> Self {
        Self::with_writer(StoragePaths::default(), StyledWriter::stdout())
    }

    /// Store on stdout writing both documents into `directory`.
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self::with_writer(StoragePaths::in_directory(directory), StyledWriter::stdout())
    }
}

impl Default for GreetingStore<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> GreetingStore<W> {
    /// Store printing uncolored lines to `out`.
    pub fn with_output(paths: StoragePaths, out: W) -> Self {
        Self::with_writer(paths, StyledWriter::new(out))
    }

    pub fn with_writer(paths: StoragePaths, console: StyledWriter<W>) -> Self {
        Self {
            console,
            errors: ErrorLog::new(),
            paths,
            secret: ContainerSecret::default(),
            key_bits: DEFAULT_KEY_BITS,
        }
    }

    /// Replace the container secret (defaults to the weak built-in one).
    pub fn with_secret(mut self, secret: ContainerSecret) -> Self {
        self.secret = secret;
        self
    }

    /// RSA key length for encrypted greetings.
    pub fn with_key_bits(mut self, key_bits: usize) -> Self {
        self.key_bits = key_bits;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.console = self.console.with_color(color);
        self
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    pub fn secret(&self) -> &ContainerSecret {
        &self.secret
    }

    /// The writer used for reports, for callers printing their own lines.
    pub fn console(&mut self) -> &mut StyledWriter<W> {
        &mut self.console
    }

    pub fn output(&self) -> &W {
        self.console.get_ref()
    }

    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    /// Print [`DEFAULT_GREETING`] without encryption.
    pub fn greet(&mut self) -> Outcome {
        self.print_greeting(DEFAULT_GREETING, false)
    }

    /// Print `message`, or its RSA-sealed base64 form when `encrypt` is set.
    pub fn print_greeting(&mut self, message: &str, encrypt: bool) -> Outcome {
        tracing::debug!(encrypt, len = message.len(), "printing greeting");
        match self.try_print_greeting(message, encrypt) {
            Ok(()) => Outcome::Completed,
            Err(err) => {
                let kind = self.record(OP_PRINT_GREETING, &err);
                let report = match kind {
                    ErrorKind::EncryptionFailure => "Your message was unable to be encrypted.",
                    ErrorKind::OutputFailure => "The console is unable to print your message.",
                    _ => "There was an error printing your message.",
                };
                self.report_error(report);
                Outcome::Failed(kind)
            }
        }
    }

    /// Build a configuration document around `data` and persist it to `target`.
    pub fn store_data(&mut self, data: &str, target: StorageTarget) -> Outcome {
        tracing::debug!(%target, len = data.len(), "storing data");
        let result = match target {
            StorageTarget::PlainFile => self.write_plain(data).and_then(|()| {
                self.report(MessageStyle::Success, "Stored data into a file!")
            }),
            StorageTarget::EncryptedContainer => self.write_container(data).and_then(|()| {
                self.report(
                    MessageStyle::Success,
                    "Stored data into an encrypted container!",
                )
            }),
            StorageTarget::Database => {
                if let Err(err) = self.report(
                    MessageStyle::Warning,
                    "No database could be found to store data!",
                ) {
                    tracing::warn!(error = %err, "database warning was not printed");
                }
                return Outcome::Unsupported;
            }
        };

        match result {
            Ok(()) => Outcome::Completed,
            Err(err) => {
                let kind = self.record(OP_STORE_DATA, &err);
                self.report_error(&format!(
                    "The provided data could not be stored into a {}.",
                    target
                ));
                Outcome::Failed(kind)
            }
        }
    }

    fn try_print_greeting(&mut self, message: &str, encrypt: bool) -> Result<()> {
        let text: Cow<'_, str> = if encrypt {
            Cow::Owned(greeting::seal(message, self.key_bits)?)
        } else {
            Cow::Borrowed(message)
        };
        self.report(MessageStyle::Success, &text)
    }

    fn write_plain(&self, data: &str) -> Result<()> {
        let bytes = ConfigurationDocument::new(data).to_bytes()?;
        let path = self.paths.plain();
        self.paths
            .prepare(path)
            .and_then(|()| write_atomic(path, &bytes))
            .map_err(|source| GreeterError::Storage {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote plain document");
        Ok(())
    }

    fn write_container(&self, data: &str) -> Result<()> {
        let plain = ConfigurationDocument::new(data).to_bytes()?;
        let sealed = container::seal(&plain, &self.secret)?;
        let path = self.paths.container();
        self.paths
            .prepare(path)
            .and_then(|()| write_atomic(path, &sealed))
            .map_err(|source| GreeterError::Storage {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = sealed.len(), "wrote container");
        Ok(())
    }

    fn report(&mut self, style: MessageStyle, message: &str) -> Result<()> {
        let options = PrintOptions::styled(style).timestamp(true);
        self.console
            .print(message, options)
            .map_err(GreeterError::Output)
    }

    fn report_error(&mut self, message: &str) {
        let options = PrintOptions::styled(MessageStyle::Error)
            .timestamp(true)
            .whole_line(true);
        if let Err(err) = self.console.print(message, options) {
            tracing::warn!(error = %err, "error report was not printed");
        }
    }

    fn record(&mut self, operation: &'static str, err: &GreeterError) -> ErrorKind {
        let kind = self.errors.record(operation, err);
        tracing::warn!(operation, %kind, error = %err, "operation failed");
        kind
    }
}
