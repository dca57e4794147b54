use regex::{Regex, RegexBuilder};

use crate::markup::{AliasLink, MarkupSpan, Span, scan_markup};

/// An eligible keyword match in one buffer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    /// Byte offset of the match.
    pub start: usize,
    /// Byte length of the match.
    pub len: usize,
    /// The matched text, in the casing found in the buffer.
    pub matched: &'a str,
}

impl Occurrence<'_> {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }
}

/// Why a candidate match was not rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Overlaps an existing alias link or bare reference.
    InsideMarkup,
    /// An alphanumeric character touches the match on either side.
    InsideWord,
    /// Already wrapped as `[keyword]`.
    Bracketed,
}

/// Compiles the case-insensitive literal search for `keyword`.
pub fn keyword_pattern(keyword: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
}

/// Lazy iterator over the eligible occurrences of one keyword.
///
/// The markup of `text` is scanned once on construction, so the iterator is
/// only valid for the buffer it was built over. After a rewrite the caller
/// builds a fresh one over the new buffer. Rejected candidates are skipped
/// whole, giving non-overlapping global-search semantics.
///
/// A neighbouring alias link counts as its display text, so a match judged
/// against plain text keeps the same verdict once that text is linked.
pub struct Occurrences<'a> {
    text: &'a str,
    pattern: &'a Regex,
    protected: Vec<Span>,
    /// `(full, display)` of every alias link.
    links: Vec<(Span, Span)>,
    pos: usize,
}

impl<'a> Occurrences<'a> {
    /// Starts searching `text` at byte offset `from`.
    pub fn new(text: &'a str, pattern: &'a Regex, from: usize) -> Self {
        let markup = scan_markup(text);
        let protected = markup.iter().map(|m| m.full()).collect();
        let links = markup
            .iter()
            .filter_map(|m| match m {
                MarkupSpan::AliasLink { full, display, .. } => Some((*full, *display)),
                MarkupSpan::Reference { .. } => None,
            })
            .collect();
        Self {
            text,
            pattern,
            protected,
            links,
            pos: from.min(text.len()),
        }
    }

    /// The character just before `pos`, reading an alias link ending there
    /// as the last character of its display text.
    fn char_before(&self, pos: usize) -> Option<char> {
        let end = self
            .links
            .iter()
            .find(|(full, display)| full.end == pos && !display.is_empty())
            .map_or(pos, |(_, display)| display.end);
        self.text[..end].chars().next_back()
    }

    /// The character at `pos`, reading an alias link starting there as the
    /// first character of its display text.
    fn char_after(&self, pos: usize) -> Option<char> {
        let start = self
            .links
            .iter()
            .find(|(full, display)| full.start == pos && !display.is_empty())
            .map_or(pos, |(_, display)| display.start);
        self.text[start..].chars().next()
    }

    /// Returns why a match at `span` is ineligible, if it is.
    pub fn rejection(&self, span: Span) -> Option<Rejection> {
        if self.protected.iter().any(|p| p.overlaps(span)) {
            return Some(Rejection::InsideMarkup);
        }

        let before = self.char_before(span.start);
        let after = self.char_after(span.end);
        let is_word = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
        if is_word(before) || is_word(after) {
            return Some(Rejection::InsideWord);
        }

        if before == Some(AliasLink::DISPLAY_OPEN as char)
            && after == Some(AliasLink::DISPLAY_CLOSE as char)
        {
            return Some(Rejection::Bracketed);
        }

        None
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = Occurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let m = self.pattern.find_at(self.text, self.pos)?;
            if m.is_empty() {
                return None;
            }
            self.pos = m.end();

            let span = Span::new(m.start(), m.end());
            if let Some(reason) = self.rejection(span) {
                log::trace!("Skipping {:?} at {}: {reason:?}", m.as_str(), m.start());
                continue;
            }

            return Some(Occurrence {
                start: m.start(),
                len: m.len(),
                matched: m.as_str(),
            });
        }
    }
}
