//! Host-side state for wiring the engine into an editor.
//!
//! The host reports three kinds of event: the visible page changed, the
//! dictionary page's blocks changed, a buffer elsewhere was edited. It is
//! responsible for debouncing the last two (see
//! [`autoalias_config::Config::rewrite_delay`]); everything here runs
//! synchronously to completion.

use anyhow::Context;
use autoalias_config::Config;

use crate::dictionary::{AliasDictionary, build_dictionary};
use crate::rewrite::AliasRewriter;
use crate::store::{DictionaryStore, FileStore, KeyValueStore};

/// What the host is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageContext {
    /// No page seen yet.
    #[default]
    None,
    /// The page that defines aliases. Edits here rebuild the dictionary.
    DictionaryPage,
    /// Any other page. Edits here are rewritten.
    Page(String),
}

/// Current page plus the dictionary in force.
pub struct AliasSession<S> {
    dictionary_page: String,
    context: PageContext,
    store: DictionaryStore<S>,
    dictionary: Option<AliasDictionary>,
    rewriter: Option<AliasRewriter>,
}

impl AliasSession<FileStore> {
    /// Opens a session over the file store described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.storage_dir).with_context(|| {
            format!(
                "Failed to create storage directory {}",
                config.storage_dir.display()
            )
        })?;
        let store = DictionaryStore::new(
            FileStore::new(&config.storage_dir),
            config.storage_key.as_str(),
        );
        Ok(Self::new(store, config.dictionary_page.as_str()))
    }
}

impl<S: KeyValueStore> AliasSession<S> {
    pub fn new(store: DictionaryStore<S>, dictionary_page: impl Into<String>) -> Self {
        Self {
            dictionary_page: dictionary_page.into(),
            context: PageContext::None,
            store,
            dictionary: None,
            rewriter: None,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// The dictionary edits are currently rewritten with, if any.
    pub fn dictionary(&self) -> Option<&AliasDictionary> {
        self.dictionary.as_ref()
    }

    /// Moves to the page titled `title`.
    ///
    /// Entering an ordinary page reloads the stored dictionary, so changes
    /// saved from the dictionary page take effect. A stored dictionary that
    /// is missing or unreadable leaves rewriting switched off. Reporting the
    /// current page again changes nothing.
    pub fn on_page_changed(&mut self, title: &str) -> &PageContext {
        let next = if title == self.dictionary_page {
            PageContext::DictionaryPage
        } else {
            PageContext::Page(title.to_string())
        };
        if next == self.context {
            return &self.context;
        }

        log::debug!("Page changed from {:?} to {next:?}", self.context);
        if matches!(next, PageContext::Page(_)) {
            let dictionary = self.store.load();
            self.set_dictionary(dictionary);
        }
        self.context = next;
        &self.context
    }

    /// Rebuilds, stores, and adopts the dictionary from the dictionary page's blocks.
    ///
    /// Ignored unless the dictionary page is showing. Returns whether a
    /// rebuild happened. A failed save is logged by the store and does not
    /// stop the new dictionary being used.
    pub fn on_dictionary_source_changed<I, T>(&mut self, blocks: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if self.context != PageContext::DictionaryPage {
            log::debug!("Ignoring dictionary source change outside the dictionary page");
            return false;
        }

        let dictionary = build_dictionary(blocks);
        self.store.save(&dictionary);
        self.set_dictionary(Some(dictionary));
        true
    }

    /// Returns the rewritten buffer if anything in `text` was linked.
    ///
    /// `None` means the host should leave the buffer alone: nothing matched,
    /// there is no dictionary, or the dictionary page is showing.
    ///
    /// Hosts normally call this after the typing pause, but may also call it
    /// straight away when a line is committed (Enter), skipping the delay.
    pub fn on_buffer_edited(&self, text: &str) -> Option<String> {
        if !matches!(self.context, PageContext::Page(_)) {
            return None;
        }
        let rewriter = self.rewriter.as_ref()?;
        match rewriter.rewrite(text) {
            std::borrow::Cow::Owned(rewritten) => Some(rewritten),
            std::borrow::Cow::Borrowed(_) => None,
        }
    }

    fn set_dictionary(&mut self, dictionary: Option<AliasDictionary>) {
        self.rewriter = dictionary.as_ref().map(AliasRewriter::new);
        self.dictionary = dictionary;
    }
}
