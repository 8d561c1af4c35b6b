//! Parsing options for note normalization.

use crate::cleanup::CleanupOptions;

/// Options for controlling note parsing behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Input cleanup applied before format detection (None = raw input).
    pub cleanup: Option<CleanupOptions>,

    /// Route to the wrong-answer extractor when bold section markers are
    /// found, even without an organize method hint.
    pub detect_section_markers: bool,

    /// Turn `word: meaning` bullet items into vocabulary blocks for
    /// vocabulary notes.
    pub extract_vocabulary: bool,

    /// Whether to parse batch inputs in parallel.
    pub parallel: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            cleanup: Some(CleanupOptions::default()),
            detect_section_markers: true,
            extract_vocabulary: true,
            parallel: true,
        }
    }
}

impl ParseOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the content exactly as given.
    pub fn raw(mut self) -> Self {
        self.cleanup = None;
        self
    }

    /// Sets the cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Only use the wrong-answer extractor when the hint asks for it.
    pub fn hint_only(mut self) -> Self {
        self.detect_section_markers = false;
        self
    }

    /// Keeps vocabulary notes as plain bullet lists.
    pub fn without_vocabulary(mut self) -> Self {
        self.extract_vocabulary = false;
        self
    }

    /// Disables parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
