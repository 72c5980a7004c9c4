//! Byte sizes with base-2 unit suffixes.

use std::fmt;
use std::str::FromStr;

use super::parse::ValueError;

const UNITS: [(&str, u32); 7] = [
    ("E", 60),
    ("P", 50),
    ("T", 40),
    ("G", 30),
    ("M", 20),
    ("K", 10),
    ("", 0),
];

/// A number of bytes, parsed from values such as `512`, `64KB` or `1GiB`.
///
/// Every unit is a power of 1024; `KB` and `KiB` mean the same thing.
///
/// # Examples
///
/// ```
/// use flagarize::ByteSize;
///
/// let size: ByteSize = "232MB".parse()?;
/// assert_eq!(size.as_u64(), 232 * 1024 * 1024);
/// assert_eq!(size.to_string(), "232MiB");
/// # Ok::<(), flagarize::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(u64);

impl ByteSize {
    /// Wraps a raw byte count.
    #[must_use]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The byte count.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl FromStr for ByteSize {
    type Err = ValueError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::ByteSize(raw.to_owned());
        let trimmed = raw.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at_checked(split).ok_or_else(invalid)?;
        let count: u64 = digits.parse().map_err(|_| invalid())?;
        let shift = unit_shift(suffix).ok_or_else(invalid)?;
        count
            .checked_mul(1_u64 << shift)
            .map(Self)
            .ok_or_else(invalid)
    }
}

fn unit_shift(suffix: &str) -> Option<u32> {
    let upper = suffix.to_ascii_uppercase();
    let prefix = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B'))
        .unwrap_or(&upper);
    if prefix.is_empty() && !upper.is_empty() && upper != "B" {
        return None;
    }
    UNITS
        .iter()
        .find(|(unit, _)| *unit == prefix)
        .map(|&(_, shift)| shift)
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0B");
        }
        let (unit, shift) = UNITS
            .iter()
            .find(|&&(_, shift)| self.0.trailing_zeros() >= shift)
            .copied()
            .unwrap_or(("", 0));
        if shift == 0 {
            write!(f, "{}B", self.0)
        } else {
            write!(f, "{}{unit}iB", self.0 >> shift)
        }
    }
}
