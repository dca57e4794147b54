//! # Alias Rewriting
//!
//! Finds alias keywords in a text buffer and replaces each eligible match
//! with `[matched]([[Page]])`.
//!
//! A match is eligible unless it overlaps existing link markup, touches an
//! alphanumeric character on either side, or is already wrapped as
//! `[keyword]`. A neighbouring alias link is judged by its display text, and
//! passes repeat until nothing changes, so running it again over its own
//! output with the same dictionary changes nothing.

pub mod occurrence;
pub mod rewriter;

pub use occurrence::{Occurrence, Occurrences, Rejection, keyword_pattern};
pub use rewriter::{AliasRewriter, rewrite, unlinkable_reason};
