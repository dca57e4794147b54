pub mod dictionary;
pub mod markup;
pub mod rewrite;
pub mod session;
pub mod store;

// Re-export key types for easier usage
pub use dictionary::{AliasDictionary, AliasEntry, build_dictionary, build_dictionary_from_page};
pub use rewrite::{AliasRewriter, Occurrence, rewrite};
pub use session::{AliasSession, PageContext};
pub use store::{DictionaryStore, FileStore, KeyValueStore, MemoryStore, StoreError};
