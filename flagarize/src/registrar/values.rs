//! Write-through value sinks used by the typed binds.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use thiserror::Error;

use crate::catalog::FlagParse;
use crate::error::BoxError;
use crate::extension::SetValue;

/// A map accepting `key=value` flag occurrences.
pub trait StringMap {
    /// Inserts or replaces `key`.
    fn insert_pair(&mut self, key: String, value: String);
}

impl<S: BuildHasher> StringMap for HashMap<String, String, S> {
    fn insert_pair(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

impl StringMap for BTreeMap<String, String> {
    fn insert_pair(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

#[derive(Debug, Error)]
#[error("expected KEY=VALUE got {0:?}")]
struct MissingPairSeparator(String);

/// Overwrites the target on every occurrence.
pub(crate) struct Single<'a, T> {
    target: &'a mut T,
}

impl<'a, T> Single<'a, T> {
    pub(crate) const fn new(target: &'a mut T) -> Self {
        Self { target }
    }
}

impl<T: FlagParse> SetValue for Single<'_, T> {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        *self.target = T::parse_flag(raw)?;
        Ok(())
    }
}

/// Fills an `Option` on the first occurrence and overwrites it afterwards.
pub(crate) struct Optional<'a, T> {
    target: &'a mut Option<T>,
}

impl<'a, T> Optional<'a, T> {
    pub(crate) const fn new(target: &'a mut Option<T>) -> Self {
        Self { target }
    }
}

impl<T: FlagParse> SetValue for Optional<'_, T> {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        *self.target = Some(T::parse_flag(raw)?);
        Ok(())
    }
}

/// Appends every element of every occurrence.
pub(crate) struct Repeated<'a, T> {
    target: &'a mut Vec<T>,
    separator: String,
}

impl<'a, T> Repeated<'a, T> {
    pub(crate) const fn new(target: &'a mut Vec<T>, separator: String) -> Self {
        Self { target, separator }
    }
}

impl<T: FlagParse> SetValue for Repeated<'_, T> {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        let parsed = split(raw, &self.separator)
            .map(T::parse_flag)
            .collect::<Result<Vec<_>, _>>()?;
        self.target.extend(parsed);
        Ok(())
    }
}

/// Inserts every `key=value` element of every occurrence.
pub(crate) struct Mapping<'a, M: ?Sized> {
    target: &'a mut M,
    separator: String,
}

impl<'a, M: ?Sized> Mapping<'a, M> {
    pub(crate) const fn new(target: &'a mut M, separator: String) -> Self {
        Self { target, separator }
    }
}

impl<M: StringMap + ?Sized> SetValue for Mapping<'_, M> {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        let pairs = split(raw, &self.separator)
            .map(|element| {
                element
                    .split_once('=')
                    .ok_or_else(|| MissingPairSeparator(element.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (key, value) in pairs {
            self.target.insert_pair(key.to_owned(), value.to_owned());
        }
        Ok(())
    }
}

fn split<'s>(raw: &'s str, separator: &'s str) -> Box<dyn Iterator<Item = &'s str> + 's> {
    if separator.is_empty() {
        Box::new(std::iter::once(raw))
    } else {
        Box::new(raw.split(separator))
    }
}
