//! UI primitives for the Greeter CLI.
//!
//! Line styling itself lives in `greeter_core::console`; this module only
//! decides where lines go and whether they are colored.

mod context;

pub use context::UiContext;
