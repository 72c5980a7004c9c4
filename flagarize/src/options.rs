//! Walk configuration.

use crate::error::{FlagarizeError, FlagarizeResult};

/// Default separator between annotation segments.
pub const DEFAULT_TAG_SEPARATOR: &str = "|";

/// Default separator between elements of one repeatable occurrence.
pub const DEFAULT_ELEM_SEPARATOR: &str = ",";

/// Settings applied to a whole [`crate::flagarize_with`] call.
///
/// # Examples
///
/// ```
/// use flagarize::Options;
///
/// let options = Options::default().with_elem_separator(";");
/// assert_eq!(options.tag_separator(), "|");
/// assert_eq!(options.elem_separator(), ";");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    tag_separator: String,
    elem_separator: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag_separator: DEFAULT_TAG_SEPARATOR.to_owned(),
            elem_separator: DEFAULT_ELEM_SEPARATOR.to_owned(),
        }
    }
}

impl Options {
    /// Replaces the separator between annotation segments.
    #[must_use]
    pub fn with_tag_separator(mut self, separator: impl Into<String>) -> Self {
        self.tag_separator = separator.into();
        self
    }

    /// Replaces the separator used to split repeatable values.
    ///
    /// An empty separator keeps every occurrence as a single element.
    #[must_use]
    pub fn with_elem_separator(mut self, separator: impl Into<String>) -> Self {
        self.elem_separator = separator.into();
        self
    }

    /// Separator between annotation segments.
    #[must_use]
    pub fn tag_separator(&self) -> &str {
        &self.tag_separator
    }

    /// Separator used to split repeatable values.
    #[must_use]
    pub fn elem_separator(&self) -> &str {
        &self.elem_separator
    }

    pub(crate) fn validate(&self) -> FlagarizeResult<()> {
        if self.tag_separator.is_empty() {
            return Err(FlagarizeError::InvalidSeparator { which: "tag" });
        }
        Ok(())
    }
}
