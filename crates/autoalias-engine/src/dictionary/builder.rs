use super::AliasDictionary;
use crate::markup::Reference;

/// Separates the page reference from the alias list in a definition block.
pub const ALIAS_LIST_SEPARATOR: char = ':';
/// Separates aliases within the alias list.
pub const ALIAS_DELIMITER: char = ',';

/// List markers stripped from the start of a dictionary page line.
const LIST_MARKERS: [&str; 3] = ["- ", "* ", "+ "];

/// One parsed `[[Page]]: alias, alias` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionBlock<'a> {
    pub page: &'a str,
    pub aliases: Vec<&'a str>,
}

impl<'a> DefinitionBlock<'a> {
    /// Parses a definition block.
    ///
    /// Returns `None` when the text does not start with `[[`, the page name
    /// is unterminated or empty, or no `:` follows the page reference.
    pub fn parse(text: &'a str) -> Option<Self> {
        let (start, end) = page_name_range(text)?;
        // A colon inside the page name is not the separator.
        let rest = &text[end..];
        if !rest.contains(ALIAS_LIST_SEPARATOR) {
            return None;
        }
        Some(Self {
            page: &text[start..end],
            aliases: extract_alias_list(rest),
        })
    }
}

/// Returns the page name of a definition block.
///
/// The name runs from the end of the leading run of `[` to the next `]`.
pub fn extract_page_name(text: &str) -> Option<&str> {
    page_name_range(text).map(|(start, end)| &text[start..end])
}

fn page_name_range(text: &str) -> Option<(usize, usize)> {
    if !text.as_bytes().starts_with(Reference::OPEN) {
        return None;
    }
    let start = text.len() - text.trim_start_matches('[').len();
    let end = start + text[start..].find(']')?;
    (end > start).then_some((start, end))
}

/// Returns the trimmed, non-empty aliases after the first `:` of `text`.
pub fn extract_alias_list(text: &str) -> Vec<&str> {
    let Some((_, list)) = text.split_once(ALIAS_LIST_SEPARATOR) else {
        return vec![];
    };
    list.split(ALIAS_DELIMITER)
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .collect()
}

/// Builds a dictionary from definition blocks in document order.
///
/// Malformed blocks contribute nothing. Later blocks override earlier ones
/// when they define the same keyword.
pub fn build_dictionary<I, S>(blocks: I) -> AliasDictionary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut dict = AliasDictionary::new();
    for block in blocks {
        let text = block.as_ref();
        let Some(definition) = DefinitionBlock::parse(text) else {
            log::trace!("Skipping non-definition block: {text:?}");
            continue;
        };
        for alias in definition.aliases {
            dict.insert(alias, definition.page);
        }
    }
    log::debug!("Built alias dictionary with {} entries", dict.len());
    dict
}

/// Splits a whole dictionary page into block texts.
///
/// Each non-blank line is one block, with indentation and a single leading
/// list marker removed so outline pages like `- [[Page]]: a, b` work.
pub fn definition_blocks(page_text: &str) -> impl Iterator<Item = &str> {
    page_text
        .lines()
        .map(|line| {
            let line = line.trim_start();
            LIST_MARKERS
                .iter()
                .find_map(|marker| line.strip_prefix(marker))
                .unwrap_or(line)
                .trim_end()
        })
        .filter(|block| !block.is_empty())
}

/// Builds a dictionary from the full text of a dictionary page.
pub fn build_dictionary_from_page(page_text: &str) -> AliasDictionary {
    build_dictionary(definition_blocks(page_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entries(dict: &AliasDictionary) -> Vec<(&str, &str)> {
        dict.iter()
            .map(|e| (e.keyword.as_str(), e.page.as_str()))
            .collect()
    }

    #[rstest]
    #[case("[[Animals]]: cat", Some("Animals"))]
    #[case("[[[Nested]]]: x", Some("Nested"))]
    #[case("[[New York City]]", Some("New York City"))]
    #[case("[Single]: cat", None)]
    #[case("just some text", None)]
    #[case(" [[Indented]]: x", None)]
    #[case("[[Unclosed: x", None)]
    #[case("[[]]: x", None)]
    fn page_name_extraction(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_page_name(text), expected);
    }

    #[rstest]
    #[case("[[X]]: a, b", vec!["a", "b"])]
    #[case("[[X]]: , a ,  ", vec!["a"])]
    #[case("[[X]]:", vec![])]
    #[case("[[X]] no separator", vec![])]
    #[case("[[X]]: New York,  NYC ", vec!["New York", "NYC"])]
    #[case("[[X]]: a: b, c", vec!["a: b", "c"])]
    fn alias_list_extraction(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(extract_alias_list(text), expected);
    }

    #[test]
    fn parse_definition_block() {
        let block = DefinitionBlock::parse("[[Animals]]: cat, cats").unwrap();
        assert_eq!(block.page, "Animals");
        assert_eq!(block.aliases, vec!["cat", "cats"]);
    }

    #[test]
    fn parse_ignores_colon_inside_page_name() {
        let block = DefinitionBlock::parse("[[Project: Alpha]]: alpha, pa").unwrap();
        assert_eq!(block.page, "Project: Alpha");
        assert_eq!(block.aliases, vec!["alpha", "pa"]);
    }

    #[test]
    fn parse_requires_separator() {
        assert_eq!(DefinitionBlock::parse("[[Animals]] cat, cats"), None);
    }

    #[test]
    fn build_from_single_block() {
        let dict = build_dictionary(["[[Animals]]: cat, cats, kitty"]);
        assert_eq!(
            entries(&dict),
            vec![("cat", "Animals"), ("cats", "Animals"), ("kitty", "Animals")]
        );
    }

    #[test]
    fn malformed_block_is_skipped() {
        assert!(build_dictionary(["just some text"]).is_empty());
        assert!(build_dictionary(["[[Animals]] cat"]).is_empty());
    }

    #[test]
    fn blank_aliases_are_discarded() {
        let dict = build_dictionary(["[[X]]: , a ,  "]);
        assert_eq!(entries(&dict), vec![("a", "X")]);
    }

    #[test]
    fn later_blocks_override_earlier() {
        let dict = build_dictionary(vec![
            "[[Animals]]: cat, dog".to_string(),
            "noise".to_string(),
            "[[Pets]]: cat".to_string(),
        ]);
        assert_eq!(entries(&dict), vec![("cat", "Pets"), ("dog", "Animals")]);
    }

    #[test]
    fn keyword_keeps_original_casing() {
        let dict = build_dictionary(["[[France]]: Paris"]);
        assert_eq!(dict.get("Paris"), Some("France"));
        assert_eq!(dict.get("paris"), None);
    }

    #[test]
    fn no_blocks_gives_empty_dictionary() {
        let blocks: Vec<String> = vec![];
        assert!(build_dictionary(blocks).is_empty());
    }

    #[test]
    fn definition_blocks_strip_outline_markers() {
        let page = "- [[Animals]]: cat\n  * [[Cities]]: nyc  \n\n+ [[X]]: y\nplain line\n";
        let blocks: Vec<&str> = definition_blocks(page).collect();
        assert_eq!(
            blocks,
            vec!["[[Animals]]: cat", "[[Cities]]: nyc", "[[X]]: y", "plain line"]
        );
    }

    #[test]
    fn build_from_page() {
        let page = "# Aliases\n\n- [[Animals]]: cat, kitty\n- [[Cities]]: nyc\n  - notes about cities\n";
        let dict = build_dictionary_from_page(page);
        assert_eq!(
            entries(&dict),
            vec![("cat", "Animals"), ("kitty", "Animals"), ("nyc", "Cities")]
        );
    }
}
