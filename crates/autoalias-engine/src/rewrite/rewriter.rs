use std::borrow::Cow;

use regex::Regex;

use super::occurrence::{Occurrences, keyword_pattern};
use crate::dictionary::AliasDictionary;
use crate::markup::AliasLink;

/// Compiled search for a single dictionary entry
struct CompiledAlias {
    keyword: String,
    pattern: Regex,
    page: String,
}

/// Rewrites alias keywords in text into alias-link markup.
///
/// Holds one compiled pattern per dictionary entry, in dictionary order, so
/// a host can build it once per dictionary and reuse it for every edit.
pub struct AliasRewriter {
    aliases: Vec<CompiledAlias>,
}

impl AliasRewriter {
    /// Compiles the patterns for every entry of `dict`.
    ///
    /// Empty keywords are skipped, as are entries whose link would not scan
    /// back as markup (see [`unlinkable_reason`]). The rewriter copies what it
    /// needs, so later changes to `dict` do not affect it.
    pub fn new(dict: &AliasDictionary) -> Self {
        let aliases = dict
            .iter()
            .filter(|entry| !entry.keyword.is_empty())
            .filter(|entry| match unlinkable_reason(&entry.keyword, &entry.page) {
                Some(reason) => {
                    log::warn!("Skipping alias '{}': {reason}", entry.keyword);
                    false
                }
                None => true,
            })
            .filter_map(|entry| match keyword_pattern(&entry.keyword) {
                Ok(pattern) => Some(CompiledAlias {
                    keyword: entry.keyword.clone(),
                    pattern,
                    page: entry.page.clone(),
                }),
                Err(e) => {
                    log::warn!("Failed to compile pattern for alias '{}': {e}", entry.keyword);
                    None
                }
            })
            .collect();

        Self { aliases }
    }

    /// Number of aliases this rewriter will apply.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Rewrites every eligible occurrence of every alias in `text`.
    ///
    /// Passes over the dictionary repeat until one changes nothing, so the
    /// result is a fixed point: rewriting it again returns it borrowed.
    ///
    /// Returns `Cow::Borrowed(text)` when nothing was rewritten.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut buffer = match self.rewrite_pass(text) {
            Cow::Borrowed(_) => return Cow::Borrowed(text),
            Cow::Owned(rewritten) => rewritten,
        };
        // Each pass links at least one span of unlinked text, so this ends
        loop {
            let next = match self.rewrite_pass(&buffer) {
                Cow::Borrowed(_) => break,
                Cow::Owned(next) => next,
            };
            log::debug!("Rewrite pass changed an already rewritten buffer");
            buffer = next;
        }
        Cow::Owned(buffer)
    }

    /// One pass over the dictionary.
    ///
    /// Entries are applied in dictionary order, each over the buffer left by
    /// the previous ones. After each replacement the search restarts just
    /// past the inserted link over the new buffer, so the new link is itself
    /// protected from later matches.
    fn rewrite_pass<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut buffer = Cow::Borrowed(text);

        for alias in &self.aliases {
            let mut from = 0;
            loop {
                let Some(occurrence) = Occurrences::new(&buffer, &alias.pattern, from).next()
                else {
                    break;
                };
                let link = AliasLink::render(occurrence.matched, &alias.page);
                log::debug!(
                    "Linking {:?} at {} to page {:?} (alias {:?})",
                    occurrence.matched,
                    occurrence.start,
                    alias.page,
                    alias.keyword
                );

                let mut next = String::with_capacity(buffer.len() + link.len());
                next.push_str(&buffer[..occurrence.start]);
                next.push_str(&link);
                next.push_str(&buffer[occurrence.end()..]);

                from = occurrence.start + link.len();
                buffer = Cow::Owned(next);
            }
        }

        buffer
    }
}

/// Why linking `keyword` to `page` would produce markup that does not scan
/// back as an alias link, if it would.
///
/// Display text may not hold brackets or a line break, and neither construct
/// spans lines. Builder output never trips this; a hand-edited stored blob can.
pub fn unlinkable_reason(keyword: &str, page: &str) -> Option<&'static str> {
    if keyword.contains(['[', ']', '\n']) {
        return Some("keyword contains a bracket or line break");
    }
    if page.contains('\n') || page.contains("]])") {
        return Some("page name contains a line break or `]])`");
    }
    None
}

/// Rewrites `text` with `dict` in one call.
///
/// Prefer [`AliasRewriter`] when rewriting many buffers with the same
/// dictionary.
pub fn rewrite<'t>(text: &'t str, dict: &AliasDictionary) -> Cow<'t, str> {
    AliasRewriter::new(dict).rewrite(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn dict(pairs: &[(&str, &str)]) -> AliasDictionary {
        pairs.iter().copied().collect()
    }

    #[test]
    fn basic_substitution() {
        let out = rewrite("I love cats", &dict(&[("cats", "Cats")]));
        assert_eq!(out, "I love [cats]([[Cats]])");
    }

    #[rstest]
    #[case::inside_word("category", &[("cat", "Animals")])]
    #[case::reference("I saw [[Paris]] yesterday", &[("paris", "Paris")])]
    #[case::alias_link("[paris]([[Paris]])", &[("paris", "Paris")])]
    #[case::bracketed("[paris] again", &[("paris", "Paris")])]
    #[case::no_match("nothing to see", &[("paris", "Paris")])]
    #[case::empty_text("", &[("paris", "Paris")])]
    #[case::empty_dictionary("paris", &[])]
    fn unchanged_text_is_borrowed(#[case] text: &str, #[case] pairs: &[(&str, &str)]) {
        let out = rewrite(text, &dict(pairs));
        assert!(matches!(out, Cow::Borrowed(_)), "expected no rewrite, got {out:?}");
        assert_eq!(out, text);
    }

    #[test]
    fn preserves_matched_casing() {
        let out = rewrite("Paris and PARIS", &dict(&[("paris", "France")]));
        assert_eq!(out, "[Paris]([[France]]) and [PARIS]([[France]])");
    }

    #[test]
    fn rewrites_every_occurrence() {
        let out = rewrite("cat, cat and cat", &dict(&[("cat", "Animals")]));
        assert_eq!(
            out,
            "[cat]([[Animals]]), [cat]([[Animals]]) and [cat]([[Animals]])"
        );
    }

    #[test]
    fn leaves_reference_but_rewrites_plain_mention() {
        let out = rewrite("[[Paris]] is in paris", &dict(&[("paris", "Paris")]));
        assert_eq!(out, "[[Paris]] is in [paris]([[Paris]])");
    }

    #[test]
    fn keyword_equal_to_page_name_does_not_nest() {
        let out = rewrite("Cats are great", &dict(&[("Cats", "Cats")]));
        assert_eq!(out, "[Cats]([[Cats]]) are great");
    }

    #[test]
    fn later_entries_skip_links_made_by_earlier_entries() {
        let out = rewrite(
            "New York is big",
            &dict(&[("New York", "NYC"), ("York", "York")]),
        );
        assert_eq!(out, "[New York]([[NYC]]) is big");
    }

    #[test]
    fn dictionary_order_decides_overlapping_keywords() {
        let out = rewrite(
            "New York is big",
            &dict(&[("York", "York"), ("New York", "NYC")]),
        );
        assert_eq!(out, "New [York]([[York]]) is big");
    }

    #[test]
    fn page_name_of_later_entry_is_not_rewritten() {
        let out = rewrite(
            "kitty and animals",
            &dict(&[("kitty", "Animals"), ("animals", "Zoo")]),
        );
        assert_eq!(out, "[kitty]([[Animals]]) and [animals]([[Zoo]])");
    }

    #[test]
    fn multiline_text() {
        let out = rewrite("- cat\n- dog", &dict(&[("cat", "A"), ("dog", "D")]));
        assert_eq!(out, "- [cat]([[A]])\n- [dog]([[D]])");
    }

    #[test]
    fn multibyte_text_around_match() {
        let out = rewrite("café → paris ✓", &dict(&[("paris", "Paris")]));
        assert_eq!(out, "café → [paris]([[Paris]]) ✓");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let d = dict(&[("cat", "Animals"), ("cats", "Animals"), ("paris", "Paris")]);
        let text = "cats and a cat in paris, not [[Paris]] or category";
        let once = rewrite(text, &d).into_owned();
        let twice = rewrite(&once, &d);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice, once);
    }

    #[test]
    fn rewriter_skips_empty_keywords() {
        let rewriter = AliasRewriter::new(&dict(&[("", "Nothing"), ("cat", "A")]));
        assert_eq!(rewriter.len(), 1);
        assert_eq!(rewriter.rewrite("cat"), "[cat]([[A]])");
    }

    #[test]
    fn punctuation_edged_keyword_stays_unlinked_next_to_linked_word() {
        let d = dict(&[("U.S.", "United States"), ("A", "Letter A")]);
        let once = rewrite("U.S.A", &d);
        assert_eq!(once, "U.S.[A]([[Letter A]])");
        assert!(matches!(rewrite(&once, &d), Cow::Borrowed(_)));
    }

    #[test]
    fn bracket_edged_keyword_next_to_linked_word() {
        let d = dict(&[("a)", "P"), ("x", "a")]);
        let once = rewrite("(a)x( ", &d);
        assert_eq!(once, "(a)[x]([[a]])( ");
        assert!(matches!(rewrite(&once, &d), Cow::Borrowed(_)));
    }

    #[test]
    fn unlinkable_entries_are_skipped() {
        let d = dict(&[("a", "P\nx"), ("x", "X"), ("[b", "B"), ("c", "C")]);
        let rewriter = AliasRewriter::new(&d);
        assert_eq!(rewriter.len(), 2);
        assert_eq!(rewriter.rewrite("a x [b c"), "a [x]([[X]]) [b [c]([[C]])");
    }

    #[rstest]
    #[case("cat", "Animals", None)]
    #[case("c++", "C++", None)]
    #[case("a]", "P", Some("keyword contains a bracket or line break"))]
    #[case("a\nb", "P", Some("keyword contains a bracket or line break"))]
    #[case("a", "P\nx", Some("page name contains a line break or `]])`"))]
    #[case("a", "P]])", Some("page name contains a line break or `]])`"))]
    fn unlinkable_reasons(
        #[case] keyword: &str,
        #[case] page: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(unlinkable_reason(keyword, page), expected);
    }

    #[test]
    fn rewriter_is_independent_of_later_dictionary_changes() {
        let mut d = dict(&[("cat", "A")]);
        let rewriter = AliasRewriter::new(&d);
        d.insert("cat", "B");
        assert_eq!(rewriter.rewrite("cat"), "[cat]([[A]])");
    }
}
