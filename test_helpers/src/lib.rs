//! Test helpers shared across the flagarize crates.
//!
//! Flags may fall back to environment variables, so tests that exercise that
//! path need to set variables without racing other tests in the same
//! process. See [`env`].

pub mod env;
