//! The configuration document written by `store_data`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Comment line written above every serialized document.
pub const HEADER: &str = "# Greeter Configuration File";

pub const EXAMPLE_1: &str = "Hello World!";
pub const EXAMPLE_2: &str = "Second example config entry!";

/// Root container of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDocument {
    pub greeter: GreeterSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreeterSection {
    pub configuration: ConfigurationSection,
}

/// Two fixed illustrative fields plus the caller's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSection {
    pub example1: String,
    pub example2: String,
    pub data: String,
}

impl ConfigurationDocument {
    /// Build a fresh document embedding `data`.
    pub fn new(data: &str) -> Self {
        Self {
            greeter: GreeterSection {
                configuration: ConfigurationSection {
                    example1: EXAMPLE_1.to_string(),
                    example2: EXAMPLE_2.to_string(),
                    data: data.to_string(),
                },
            },
        }
    }

    pub fn data(&self) -> &str {
        &self.greeter.configuration.data
    }

    /// Serialize to TOML text with the header comment.
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("{}\n{}", HEADER, body))
    }

    /// Serialized UTF-8 bytes, as written to disk.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_toml()?.into_bytes())
    }
}
