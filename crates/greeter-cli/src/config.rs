use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use greeter_core::crypto::container::{DEFAULT_ITERATIONS, DEFAULT_PASSWORD, DEFAULT_SALT};
use greeter_core::crypto::greeting::KEY_BITS_RANGE;
use greeter_core::ContainerSecret;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GreeterConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub container: ContainerSection,
    #[serde(default)]
    pub greeting: GreetingSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub directory: Option<String>,
}

/// Container secret overrides. Unset fields fall back to the built-in
/// (weak) defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContainerSection {
    pub password: Option<String>,
    pub salt: Option<String>,
    pub iterations: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GreetingSection {
    pub key_bits: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub color: Option<bool>,
}

impl ContainerSection {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.salt.is_none() && self.iterations.is_none()
    }

    pub fn secret(&self) -> anyhow::Result<ContainerSecret> {
        if self.is_empty() {
            return Ok(ContainerSecret::default());
        }
        let password = self.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
        let salt = self.salt.as_deref().unwrap_or(DEFAULT_SALT);
        let iterations = self.iterations.unwrap_or(DEFAULT_ITERATIONS);
        ContainerSecret::new(password, salt.as_bytes(), iterations)
            .map_err(|e| anyhow::anyhow!("Invalid [container] config: {}", e))
    }
}

impl GreetingSection {
    /// The configured RSA key length, if any, checked against [`KEY_BITS_RANGE`].
    pub fn key_bits(&self) -> anyhow::Result<Option<usize>> {
        match self.key_bits {
            Some(bits) if !KEY_BITS_RANGE.contains(&bits) => Err(anyhow::anyhow!(
                "Invalid [greeting] config: key_bits must be between {} and {}, got {}",
                KEY_BITS_RANGE.start(),
                KEY_BITS_RANGE.end(),
                bits
            )),
            other => Ok(other),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<GreeterConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("greeter"));
        }
    }
    Ok(home_dir()?.join(".config").join("greeter"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
