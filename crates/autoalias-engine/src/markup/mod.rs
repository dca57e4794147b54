//! # Link Markup
//!
//! Cursor-based scanning of the two link constructs the rewriter must treat
//! as protected zones:
//!
//! - **Alias links** `[display]([[Page]])`, the form rewriting produces
//! - **Bare references** `[[Page]]`, written by hand or by the host
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges
//! - **`kinds`**: `AliasLink` and `Reference`, owning their delimiters and rendering
//! - **`cursor`**: `Cursor` for byte-by-byte scanning
//! - **`scanner`**: `scan_markup()` entry point with `try_parse_*` helpers
//!
//! This is deliberately not a document parser. Anything that is not one of
//! the two constructs on a single line is plain text.

pub mod cursor;
pub mod kinds;
pub mod scanner;
pub mod span;

pub use kinds::{AliasLink, Reference};
pub use scanner::{MarkupSpan, scan_markup};
pub use span::Span;
