//! # formwork
//!
//! A form assembly and decoration framework for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `formwork` to get the whole framework, or
//! depend on individual crates for finer-grained control.

/// Foundation types: errors, option values, request context, logging.
pub use formwork_core as core;

/// Hook dispatcher: named events with mutable payloads.
pub use formwork_hooks as hooks;

/// Form assembly: forms, elements, decorators, loaders, display groups.
pub use formwork_forms as forms;
