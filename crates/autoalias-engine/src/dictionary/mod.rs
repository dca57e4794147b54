//! # Alias Dictionary
//!
//! Turns definition blocks of the form `[[Page]]: alias, alias` into an
//! [`AliasDictionary`] mapping each alias keyword to its page.
//!
//! Building is a pure function over block texts. Malformed blocks are
//! silently skipped; there is no error path.

pub mod alias_dictionary;
pub mod builder;

pub use alias_dictionary::{AliasDictionary, AliasEntry};
pub use builder::{
    DefinitionBlock, build_dictionary, build_dictionary_from_page, definition_blocks,
    extract_alias_list, extract_page_name,
};
