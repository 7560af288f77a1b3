//! Application context for the Greeter CLI.
//!
//! Combines CLI arguments with the config file and builds the store.

use std::io::{self, Write};
use std::path::PathBuf;

use greeter_core::{GreetingStore, MessageStyle, PrintOptions, StoragePaths, StyledWriter};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, GreeterConfig};
use crate::constants::exit_codes;
use crate::ui::UiContext;

/// The store type every command runs against.
pub type Store = GreetingStore<Box<dyn Write>>;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: GreeterConfig,
    ui: UiContext,
}

impl<'a> AppContext<'a> {
    /// Load the config file (if any) and resolve UI settings.
    pub fn load(cli: &'a Cli) -> anyhow::Result<Self> {
        let config = match resolve_config_path(cli)? {
            Some(path) => read_config(&path)?,
            None => GreeterConfig::default(),
        };
        // Surface bad sections as config errors, not failed commands.
        config.container.secret()?;
        config.greeting.key_bits()?;
        let ui = UiContext::from_env(cli.json, cli.no_color, config.ui.color);
        tracing::debug!(tty = ui.is_tty, color = ui.color, json = ui.json, "resolved ui");
        Ok(Self { cli, config, ui })
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// `--dir` wins over `[storage] directory`; otherwise the default location.
    pub fn storage_paths(&self) -> StoragePaths {
        match self
            .cli
            .dir
            .as_deref()
            .or(self.config.storage.directory.as_deref())
        {
            Some(dir) => StoragePaths::in_directory(dir),
            None => StoragePaths::default(),
        }
    }

    pub fn open_store(&self) -> anyhow::Result<Store> {
        let out: Box<dyn Write> = if self.ui.json {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        let writer = StyledWriter::new(out).with_color(self.ui.color);
        let mut store = GreetingStore::with_writer(self.storage_paths(), writer)
            .with_secret(self.config.container.secret()?);
        if let Some(bits) = self.config.greeting.key_bits()? {
            store = store.with_key_bits(bits);
        }
        if store.secret().is_default() {
            tracing::debug!("using the built-in container secret");
        }
        Ok(store)
    }

    /// Report the error log and pick the exit code.
    pub fn finish(&self, mut store: Store) -> anyhow::Result<i32> {
        let failed = store.errors().len();

        if self.ui.json {
            let report = serde_json::json!({ "errors": store.errors() });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if failed > 0 {
            let summary = format!("{} operation(s) failed:", failed);
            let entries: Vec<String> = store
                .errors()
                .iter()
                .map(|e| format!("{} ({}): {}", e.operation, e.kind, e.message))
                .collect();
            let console = store.console();
            console.print(&summary, PrintOptions::styled(MessageStyle::Warning))?;
            for entry in entries {
                console.print(&entry, PrintOptions::styled(MessageStyle::General))?;
            }
        }

        Ok(if failed > 0 {
            exit_codes::OPERATION_FAILED
        } else {
            0
        })
    }
}

/// `--config`/`GREETER_CONFIG` must exist; the default path is optional.
fn resolve_config_path(cli: &Cli) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = cli.config.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(Some(PathBuf::from(path)));
    }
    let default = match default_config_path() {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(error = %err, "no default config location");
            return Ok(None);
        }
    };
    Ok(default.exists().then_some(default))
}

/// Exit with the config error code after printing `err`.
pub fn exit_invalid_config(err: &anyhow::Error) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(exit_codes::INVALID_CONFIG);
}
