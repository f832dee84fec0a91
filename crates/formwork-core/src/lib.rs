//! # formwork-core
//!
//! Foundation types for the formwork framework: the [`FormworkError`] error
//! enum, the [`Value`] option-bag type, the ambient [`RequestContext`], and
//! logging setup. Everything in the higher-level crates builds on these.

pub mod error;
pub mod logging;
pub mod request;
pub mod value;

pub use error::FormworkError;
pub use request::RequestContext;
pub use value::Value;
