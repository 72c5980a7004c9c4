//! Semantic parsers turning one raw flag value into a typed value.

use std::fs::File;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use super::units::ByteSize;
use crate::error::BoxError;

/// Errors raised by the built-in parsers that have no natural error type of
/// their own.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// Not one of the accepted boolean literals.
    #[error("expected a boolean (1, t, true, 0, f, false), got {0:?}")]
    Bool(String),
    /// Not a number followed by an optional base-2 unit.
    #[error("expected a byte size such as 512, 64KB or 1GiB, got {0:?}")]
    ByteSize(String),
    /// Name resolution produced no address.
    #[error("address {0:?} resolved to nothing")]
    Unresolved(String),
}

/// A type that can be parsed from a single raw flag value.
pub trait FlagParse: Sized {
    /// Parses `raw`.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error when `raw` is not a valid representation.
    fn parse_flag(raw: &str) -> Result<Self, BoxError>;
}

/// Parses the boolean literals accepted in annotations and on the command
/// line.
pub(crate) fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl FlagParse for bool {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        parse_bool_literal(raw).ok_or_else(|| ValueError::Bool(raw.to_owned()).into())
    }
}

impl FlagParse for String {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(raw.to_owned())
    }
}

impl FlagParse for PathBuf {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(Self::from(raw))
    }
}

macro_rules! from_str_parse {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FlagParse for $ty {
                fn parse_flag(raw: &str) -> Result<Self, BoxError> {
                    Ok(raw.parse::<Self>()?)
                }
            }
        )+
    };
}

from_str_parse!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, IpAddr, ByteSize,
);

impl FlagParse for Duration {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(humantime::parse_duration(raw)?)
    }
}

impl FlagParse for SocketAddr {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        if let Ok(addr) = raw.parse() {
            return Ok(addr);
        }
        raw.to_socket_addrs()?
            .next()
            .ok_or_else(|| ValueError::Unresolved(raw.to_owned()).into())
    }
}

impl FlagParse for Url {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(Self::parse(raw)?)
    }
}

impl FlagParse for File {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(Self::open(raw)?)
    }
}
