//! Ready-made field types with their own binding logic.
//!
//! - [`TimeOrDuration`] accepts an RFC 3339 timestamp or a signed duration.
//! - [`PathOrContent`] registers a `--<name>-file` / `--<name>` flag pair.
//! - [`Regexp`] and [`AnchoredRegexp`] compile their value as a regular
//!   expression.

mod path_or_content;
mod regexp;
mod time_or_duration;

pub use path_or_content::{PathOrContent, PathOrContentError};
pub use regexp::{AnchoredRegexp, Regexp};
pub use time_or_duration::{InvalidTimeOrDuration, TimeOrDuration};
