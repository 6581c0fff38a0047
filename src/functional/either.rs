//! Success-or-error container
//!
//! `Either<E, T>` is `Right(value)` on success and `Left(error)` on failure.
//! `map` and `bind` short-circuit on `Left`, so a chain of validations stops
//! at the first failure.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A value or an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<E, T> {
    /// The failure branch
    Left(E),
    /// The success branch
    Right(T),
}

impl<E, T> Either<E, T> {
    /// Wrap a success value
    pub fn right(value: T) -> Self {
        Self::Right(value)
    }

    /// Wrap an error
    pub fn left(error: E) -> Self {
        Self::Left(error)
    }

    /// Transform the success value; a `Left` passes through unchanged
    pub fn map<U, F>(self, f: F) -> Either<E, U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Right(value) => Either::Right(f(value)),
            Self::Left(error) => Either::Left(error),
        }
    }

    /// Transform the error; a `Right` passes through unchanged
    pub fn map_left<G, F>(self, f: F) -> Either<G, T>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Right(value) => Either::Right(value),
            Self::Left(error) => Either::Left(f(error)),
        }
    }

    /// Chain a fallible step, stopping at the first `Left`
    pub fn bind<U, F>(self, f: F) -> Either<E, U>
    where
        F: FnOnce(T) -> Either<E, U>,
    {
        match self {
            Self::Right(value) => f(value),
            Self::Left(error) => Either::Left(error),
        }
    }

    /// Collapse both branches into one value
    pub fn fold<R, L, F>(self, on_left: L, on_right: F) -> R
    where
        L: FnOnce(E) -> R,
        F: FnOnce(T) -> R,
    {
        match self {
            Self::Left(error) => on_left(error),
            Self::Right(value) => on_right(value),
        }
    }

    /// Extract the success value or fall back to `default`
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Right(value) => value,
            Self::Left(_) => default,
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Borrow the success value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Right(value) => Some(value),
            Self::Left(_) => None,
        }
    }

    /// Borrow the error, if any
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Left(error) => Some(error),
            Self::Right(_) => None,
        }
    }

    /// Extract the error
    ///
    /// # Panics
    ///
    /// Panics when called on `Right`. Asking a success for its error is a
    /// logic bug, not a data problem.
    #[track_caller]
    pub fn get_error(self) -> E
    where
        T: Debug,
    {
        match self {
            Self::Left(error) => error,
            Self::Right(value) => {
                panic!("called `Either::get_error()` on a `Right` value: {:?}", value)
            }
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<E, T> From<Result<T, E>> for Either<E, T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<E, T> From<Either<E, T>> for Result<T, E> {
    fn from(either: Either<E, T>) -> Self {
        match either {
            Either::Right(value) => Ok(value),
            Either::Left(error) => Err(error),
        }
    }
}
