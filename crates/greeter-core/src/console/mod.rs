//! Console output primitives.
//!
//! - **Style**: glyph and color per message severity
//! - **Writer**: decorated line rendering onto any `io::Write`
//!
//! # Usage
//!
//! ```
//! use greeter_core::console::{MessageStyle, PrintOptions, StyledWriter};
//!
//! let mut writer = StyledWriter::new(Vec::new());
//! writer
//!     .print("ready", PrintOptions::styled(MessageStyle::Success))
//!     .unwrap();
//! assert_eq!(writer.into_inner(), b"[+]: ready\n");
//! ```

pub mod style;
mod writer;

pub use style::MessageStyle;
pub use writer::{format_timestamp, PrintOptions, StyledWriter};
