//! Result algebra
//!
//! Two-variant containers used instead of sentinel values for lookups and
//! validation, plus composition helpers:
//!
//! - [`Maybe`]: `Some(value)` or `Nothing`
//! - [`Either`]: `Right(value)` or `Left(error)`, short-circuiting on `Left`
//! - `compose!` / `pipe!`: right-to-left and left-to-right function chains

pub mod compose;
pub mod either;
pub mod maybe;

pub use compose::{compose2, compose_all, pipe_all};
pub use either::Either;
pub use maybe::Maybe;
