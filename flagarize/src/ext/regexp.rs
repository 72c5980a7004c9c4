//! Regular-expression flag values.

use regex::Regex;

use crate::catalog::FlagParse;
use crate::error::BoxError;
use crate::extension::SetValue;

/// A regular expression matched anywhere in the input.
///
/// # Examples
///
/// ```
/// use flagarize::SetValue;
/// use flagarize::ext::Regexp;
///
/// let mut pattern = Regexp::default();
/// pattern.set_value("ab+")?;
/// assert!(pattern.is_match("xxabbb"));
/// # Ok::<(), flagarize::BoxError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Regexp(Option<Regex>);

/// A regular expression that must match the whole input.
///
/// # Examples
///
/// ```
/// use flagarize::SetValue;
/// use flagarize::ext::AnchoredRegexp;
///
/// let mut pattern = AnchoredRegexp::default();
/// pattern.set_value("ab+|c")?;
/// assert!(pattern.is_match("abb"));
/// assert!(!pattern.is_match("xabb"));
/// # Ok::<(), flagarize::BoxError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnchoredRegexp(Option<Regex>);

macro_rules! regexp_value {
    ($ty:ident, $compile:expr) => {
        impl $ty {
            /// The compiled expression, if a value was set.
            #[must_use]
            pub const fn as_regex(&self) -> Option<&Regex> {
                self.0.as_ref()
            }

            /// Whether an expression was set and matches `haystack`.
            #[must_use]
            pub fn is_match(&self, haystack: &str) -> bool {
                self.0.as_ref().is_some_and(|re| re.is_match(haystack))
            }
        }

        impl FlagParse for $ty {
            fn parse_flag(raw: &str) -> Result<Self, BoxError> {
                let compile: fn(&str) -> Result<Regex, regex::Error> = $compile;
                Ok(Self(Some(compile(raw)?)))
            }
        }

        impl SetValue for $ty {
            fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
                *self = Self::parse_flag(raw)?;
                Ok(())
            }
        }
    };
}

regexp_value!(Regexp, Regex::new);
regexp_value!(AnchoredRegexp, |raw| Regex::new(&format!("^(?:{raw})$")));
