//!
//! Comparators Module
//!
//! Pluggable comparison strategies over learner submissions:
//!
//! - [`exact_comparator`]: normalized plain-string comparison; also the
//!   single-step fallback target when runtime infrastructure is unavailable.
//! - [`token_comparator`]: lexer-token sequence comparison, a cheaper
//!   strategy than AST comparison for exercises where structural renaming
//!   tolerance is not needed.
//!
//! AST comparison lives in [`crate::normalizer`] because it owns per-session
//! state the plain comparators do not have.

pub mod exact_comparator;
pub mod token_comparator;
