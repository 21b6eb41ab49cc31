//!
//! Traits Module
//!
//! Core traits used throughout the verification engine for extensibility
//! and abstraction.
//!
//! - [`sandbox`]: The externally supplied interpreter sandbox handle.
//! - [`runtime`]: The per-language capability set the strategy router is
//!   polymorphic over.

pub mod runtime;
pub mod sandbox;
