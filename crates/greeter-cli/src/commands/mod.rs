mod demo;
mod greet;
mod paths;
mod store;

pub use demo::handle_demo;
pub use greet::handle_greet;
pub use paths::handle_paths;
pub use store::handle_store;
