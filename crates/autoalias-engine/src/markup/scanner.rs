use super::{
    cursor::Cursor,
    kinds::{AliasLink, LINE_BREAK, Reference},
    span::Span,
};

/// A span of existing link markup that rewriting must leave alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupSpan {
    /// `[display]([[target]])`
    AliasLink {
        /// Full span including every delimiter.
        full: Span,
        /// Span of the visible text between the single brackets.
        display: Span,
        /// Span of the page name between `([[` and `]])`.
        target: Span,
    },
    /// `[[target]]`
    Reference {
        /// Full span including `[[` and `]]`.
        full: Span,
        /// Span of the page name.
        target: Span,
    },
}

impl MarkupSpan {
    /// Extracts the full span from either variant.
    pub fn full(&self) -> Span {
        match self {
            MarkupSpan::AliasLink { full, .. } => *full,
            MarkupSpan::Reference { full, .. } => *full,
        }
    }
}

/// Finds every alias link and bare reference in `text`, left to right.
///
/// Alias links are tried before references at each position, so the
/// `[[Page]]` inside `[x]([[Page]])` is reported as part of the alias link
/// and not separately. Unclosed constructs are treated as plain text.
pub fn scan_markup(text: &str) -> Vec<MarkupSpan> {
    let mut cur = Cursor::new(text, 0);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(node) = try_parse_alias_link(&mut cur) {
            out.push(node);
            continue;
        }
        if let Some(node) = try_parse_reference(&mut cur) {
            out.push(node);
            continue;
        }
        cur.bump();
    }

    out
}

/// Attempts to parse an alias link starting at the current position.
///
/// On failure, cursor position is restored.
fn try_parse_alias_link(cur: &mut Cursor<'_>) -> Option<MarkupSpan> {
    if cur.peek() != Some(AliasLink::DISPLAY_OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // [
    let display_start = cur.pos();

    let stop = [AliasLink::DISPLAY_OPEN, AliasLink::DISPLAY_CLOSE, LINE_BREAK];
    if !cur.seek(&[AliasLink::DISPLAY_CLOSE], &stop) {
        *cur = saved;
        return None;
    }
    let display_end = cur.pos();
    cur.bump(); // ]

    if !cur.starts_with(AliasLink::TARGET_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump_n(AliasLink::TARGET_OPEN.len());
    let target_start = cur.pos();

    if !cur.seek(AliasLink::TARGET_CLOSE, &[LINE_BREAK]) {
        *cur = saved;
        return None;
    }
    let target_end = cur.pos();
    cur.bump_n(AliasLink::TARGET_CLOSE.len());

    Some(MarkupSpan::AliasLink {
        full: Span::new(start, cur.pos()),
        display: Span::new(display_start, display_end),
        target: Span::new(target_start, target_end),
    })
}

/// Attempts to parse a bare reference starting at the current position.
///
/// On failure, cursor position is restored.
fn try_parse_reference(cur: &mut Cursor<'_>) -> Option<MarkupSpan> {
    if !cur.starts_with(Reference::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Reference::OPEN.len());
    let target_start = cur.pos();

    if !cur.seek(Reference::CLOSE, &[LINE_BREAK]) {
        *cur = saved;
        return None;
    }
    let target_end = cur.pos();
    cur.bump_n(Reference::CLOSE.len());

    Some(MarkupSpan::Reference {
        full: Span::new(start, cur.pos()),
        target: Span::new(target_start, target_end),
    })
}
