//! Rendering options for Markdown output.

/// Options for Markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether to include metadata as YAML frontmatter.
    pub include_frontmatter: bool,

    /// Character to use for unordered lists.
    /// Default: '-'
    pub list_marker: char,

    /// Whether to add blank lines between blocks.
    pub paragraph_spacing: bool,

    /// Whether to escape special Markdown characters in text.
    pub escape_special_chars: bool,

    /// Whether tips use GitHub alert syntax (`> [!TIP]`) instead of an
    /// emoji-prefixed quote.
    pub github_alerts: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            list_marker: '-',
            paragraph_spacing: true,
            escape_special_chars: false,
            github_alerts: true,
        }
    }
}

impl RenderOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables YAML frontmatter output.
    pub fn with_frontmatter(mut self) -> Self {
        self.include_frontmatter = true;
        self
    }

    /// Sets the unordered list marker.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Disables blank lines between blocks.
    pub fn without_paragraph_spacing(mut self) -> Self {
        self.paragraph_spacing = false;
        self
    }

    /// Escapes Markdown syntax characters in block text.
    pub fn with_escaping(mut self) -> Self {
        self.escape_special_chars = true;
        self
    }

    /// Renders tips as emoji-prefixed quotes.
    pub fn plain_quotes(mut self) -> Self {
        self.github_alerts = false;
        self
    }
}
