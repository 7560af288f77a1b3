use clap::{Parser, Subcommand, ValueEnum};

use greeter_core::{StorageTarget, DEFAULT_GREETING, VERSION};

/// Greeter - prints styled greetings and stores data in plain or encrypted files
#[derive(Parser)]
#[command(name = "greeter")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory the plain and encrypted documents are written to
    #[arg(short, long, global = true, env = "GREETER_DIR")]
    pub dir: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true, env = "GREETER_CONFIG")]
    pub config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print the error log as JSON on stdout (styled lines go to stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full demonstration (default)
    Demo,

    /// Print a greeting
    Greet {
        /// Text to print
        #[arg(value_name = "MESSAGE", default_value = DEFAULT_GREETING)]
        message: String,

        /// Print the RSA-encrypted form instead (cannot be decrypted)
        #[arg(short, long)]
        encrypt: bool,
    },

    /// Store data in a configuration document
    Store {
        /// Data to embed in the document
        #[arg(value_name = "DATA")]
        data: String,

        /// Where to store the document
        #[arg(short, long, value_enum, default_value_t = TargetArg::File)]
        target: TargetArg,
    },

    /// Show where documents are written
    Paths,
}

/// Storage target as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    File,
    Container,
    Database,
}

impl From<TargetArg> for StorageTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::File => StorageTarget::PlainFile,
            TargetArg::Container => StorageTarget::EncryptedContainer,
            TargetArg::Database => StorageTarget::Database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["greeter"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_greet_defaults() {
        let cli = Cli::try_parse_from(["greeter", "greet"]).unwrap();
        match cli.command {
            Some(Commands::Greet { message, encrypt }) => {
                assert_eq!(message, "Hello World!");
                assert!(!encrypt);
            }
            _ => panic!("expected greet"),
        }
    }

    #[test]
    fn test_store_target_parses() {
        let cli =
            Cli::try_parse_from(["greeter", "store", "abc", "--target", "container"]).unwrap();
        match cli.command {
            Some(Commands::Store { data, target }) => {
                assert_eq!(data, "abc");
                assert_eq!(StorageTarget::from(target), StorageTarget::EncryptedContainer);
            }
            _ => panic!("expected store"),
        }
    }

    #[test]
    fn test_store_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["greeter", "store", "abc", "--target", "cloud"]).is_err());
    }
}
