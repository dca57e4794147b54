use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One alias keyword and the page it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// Keyword as written in the definition block.
    pub keyword: String,
    /// Canonical page name the keyword resolves to.
    pub page: String,
}

/// Mapping from alias keyword to page name, kept in insertion order.
///
/// Iteration order is the order keywords were first defined. Redefining a
/// keyword replaces its page but keeps its original position. Keys are
/// compared exactly; matching against text is case-insensitive and happens
/// in the rewriter.
///
/// Serializes as a flat JSON object in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasDictionary {
    entries: Vec<AliasEntry>,
    index: HashMap<String, usize>,
}

impl AliasDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `keyword` to resolve to `page`, returning the page it replaced.
    pub fn insert(&mut self, keyword: impl Into<String>, page: impl Into<String>) -> Option<String> {
        let keyword = keyword.into();
        let page = page.into();
        match self.index.get(&keyword) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].page, page)),
            None => {
                self.index.insert(keyword.clone(), self.entries.len());
                self.entries.push(AliasEntry { keyword, page });
                None
            }
        }
    }

    /// Exact-key lookup.
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.index
            .get(keyword)
            .map(|&i| self.entries[i].page.as_str())
    }

    /// Case-insensitive lookup; the first matching entry in iteration order wins.
    pub fn lookup(&self, keyword: &str) -> Option<&AliasEntry> {
        let wanted = keyword.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.keyword.to_lowercase() == wanted)
    }

    /// Copies every entry of `other` into `self`; `other` wins on collision.
    pub fn merge(&mut self, other: AliasDictionary) {
        for entry in other.entries {
            self.insert(entry.keyword, entry.page);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = AliasDictionary::new();
        for (keyword, page) in iter {
            dict.insert(keyword, page);
        }
        dict
    }
}

impl<'a> IntoIterator for &'a AliasDictionary {
    type Item = &'a AliasEntry;
    type IntoIter = std::slice::Iter<'a, AliasEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for AliasDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.keyword, &entry.page)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DictionaryVisitor;

        impl<'de> Visitor<'de> for DictionaryVisitor {
            type Value = AliasDictionary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of alias keyword to page name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dict = AliasDictionary::new();
                while let Some((keyword, page)) = access.next_entry::<String, String>()? {
                    dict.insert(keyword, page);
                }
                Ok(dict)
            }
        }

        deserializer.deserialize_map(DictionaryVisitor)
    }
}
