//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap on bad usage)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// At least one operation recorded an error.
    pub const OPERATION_FAILED: i32 = 3;

    /// The config file could not be read or holds invalid values.
    pub const INVALID_CONFIG: i32 = 4;
}

/// Lines printed by the `demo` command.
pub mod demo {
    pub const RULE: &str = "================================";
    pub const TAGLINE: &str = "Greetings, encrypted and stored.";

    pub const CUSTOM_GREETING: &str = "Hola! Mucho gusto.";
    pub const SECRET_GREETING: &str = "Este es muy importante!";

    pub const FILE_DATA: &str = "Test data to store...";
    pub const CONTAINER_DATA: &str = "Some more test data...";
    pub const DATABASE_DATA: &str = "This is even more data to be stored...";
}
