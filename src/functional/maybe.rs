//! Present-or-absent container
//!
//! `Maybe` mirrors `Option` but carries the `map`/`bind`/`get_or_else`
//! vocabulary used throughout the lookup code. Conversions to and from
//! `Option` are free.

use serde::{Deserialize, Serialize};

use super::either::Either;

/// A value that may be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Maybe<T> {
    /// A present value
    Some(T),
    /// No value
    Nothing,
}

impl<T> Maybe<T> {
    /// Wrap a present value
    pub fn some(value: T) -> Self {
        Self::Some(value)
    }

    /// The absent value
    pub fn nothing() -> Self {
        Self::Nothing
    }

    /// Transform the contained value, leaving `Nothing` untouched
    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Maybe::Some(f(value)),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Chain a computation that may itself produce `Nothing`
    pub fn bind<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Self::Some(value) => f(value),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Keep the value only if it satisfies `predicate`
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) if predicate(&value) => Self::Some(value),
            _ => Self::Nothing,
        }
    }

    /// Extract the value or fall back to `default`
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::Nothing => default,
        }
    }

    /// Extract the value or compute a fallback lazily
    pub fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::Nothing => default(),
        }
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Borrow the contained value
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Some(value) => Maybe::Some(value),
            Self::Nothing => Maybe::Nothing,
        }
    }

    /// Turn absence into an error
    pub fn ok_or<E>(self, error: E) -> Either<E, T> {
        match self {
            Self::Some(value) => Either::Right(value),
            Self::Nothing => Either::Left(error),
        }
    }

    /// Turn absence into a lazily built error
    pub fn ok_or_else<E, F>(self, error: F) -> Either<E, T>
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Some(value) => Either::Right(value),
            Self::Nothing => Either::Left(error()),
        }
    }

    /// Extract the value, panicking on `Nothing`
    ///
    /// # Panics
    ///
    /// Panics if called on `Nothing`; that is a logic error in the caller.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Some(value) => value,
            Self::Nothing => panic!("called `Maybe::unwrap()` on a `Nothing` value"),
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        match maybe {
            Maybe::Some(value) => Some(value),
            Maybe::Nothing => None,
        }
    }
}
