//! Error types produced while binding schemas and parsing flags.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{BoxError, ErrorCategory, FlagarizeError, FlagarizeResult};
