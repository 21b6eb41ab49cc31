//! Shared schema types consumed by the verification engine.
//!
//! Everything in this crate is owned by external collaborators (the
//! curriculum store and the session layer) and is read-only from the
//! engine's point of view: the [`languages::Language`] identifier and the
//! [`exercise::Exercise`] grading configuration.

pub mod exercise;
pub mod languages;
