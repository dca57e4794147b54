/// A bare page reference `[[Page]]`.
pub struct Reference;

impl Reference {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";

    /// Renders a reference to `page`.
    pub fn render(page: &str) -> String {
        format!("[[{page}]]")
    }
}

/// An alias link `[display]([[Page]])`.
///
/// The target part is itself a [`Reference`] wrapped in parentheses.
pub struct AliasLink;

impl AliasLink {
    pub const DISPLAY_OPEN: u8 = b'[';
    pub const DISPLAY_CLOSE: u8 = b']';
    pub const TARGET_OPEN: &'static [u8; 3] = b"([[";
    pub const TARGET_CLOSE: &'static [u8; 3] = b"]])";

    /// Renders the markup that links `display` to `page`.
    pub fn render(display: &str, page: &str) -> String {
        format!("[{display}]({})", Reference::render(page))
    }
}

/// Neither construct spans lines.
pub const LINE_BREAK: u8 = b'\n';
