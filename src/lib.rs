//! # notegen
//!
//! Normalizes AI-organized study notes into one canonical sequence of typed
//! content blocks.
//!
//! ## Supported Inputs
//!
//! - **Cornell JSON**: `{title, cues, main, summary}` objects (optionally fenced)
//! - **Wrong-answer notes**: text with `**문제**`/`**정답**`-style section markers
//! - **Legacy markers**: `===TITLE===` / `===KEYWORDS===` / `===NOTES===` / `===SUMMARY===`
//! - **Markdown-like text**: headings, bullets, important lines and summaries
//!
//! ## Quick Start
//!
//! ```
//! use notegen::{parse, NoteBlock};
//!
//! let note = parse("# 광합성\n- 명반응\n- 암반응", "제목 없음", None);
//!
//! assert_eq!(note.title, "광합성");
//! assert_eq!(
//!     note.blocks[1],
//!     NoteBlock::bullet(vec!["명반응".into(), "암반응".into()])
//! );
//! ```
//!
//! Parsing never fails. Malformed structured input falls through to the next
//! parser, and every result holds at least a title block.
//!
//! ## Features
//!
//! - `async`: Async file parsing with Tokio

pub mod cleanup;
pub mod detect;
pub mod error;
pub mod model;
pub mod parse_options;
pub mod parser;
pub mod render;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use cleanup::{cleanup, CleanupOptions};
pub use detect::{detect_format, FormatType};
pub use error::{Error, Result};
pub use model::{
    ImportanceLevel, KeywordStyle, NoteBlock, NoteData, NoteInput, NoteMetadata, OrganizeMethod,
    TipVariant,
};
pub use parse_options::ParseOptions;
pub use render::RenderOptions;

use detect::Route;
use parser::{cornell, legacy, markdown, vocabulary, wrong_answer, ParsedBlocks, SegmentMode};
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::Path;

/// Title used by [`parse_file`] when the path has no usable file stem.
pub const UNTITLED: &str = "Untitled";

/// Parses organizer output with default options.
///
/// `title` is the fallback used when the content carries no title of its
/// own. The organize method in `metadata` steers format detection.
pub fn parse(content: &str, title: &str, metadata: Option<&NoteMetadata>) -> NoteData {
    parse_with_options(content, title, metadata, &ParseOptions::default())
}

/// Parses organizer output with custom options.
///
/// # Example
///
/// ```
/// use notegen::{parse_with_options, NoteMetadata, OrganizeMethod, ParseOptions};
///
/// let meta = NoteMetadata::with_method(OrganizeMethod::WrongAnswer);
/// let note = parse_with_options(
///     "문제: 2+2는?\n**정답**: 4",
///     "오답노트",
///     Some(&meta),
///     &ParseOptions::new().raw(),
/// );
///
/// assert_eq!(note.title, "오답노트");
/// assert_eq!(note.blocks.len(), 3);
/// ```
pub fn parse_with_options(
    content: &str,
    title: &str,
    metadata: Option<&NoteMetadata>,
    options: &ParseOptions,
) -> NoteData {
    let content = match &options.cleanup {
        Some(cleanup_options) => Cow::Owned(cleanup(content, cleanup_options)),
        None => Cow::Borrowed(content),
    };

    let method = metadata.and_then(|m| m.organize_method);
    let route = detect::route(&content, method, options.detect_section_markers);
    log::debug!("parsing {:?} as {}", title, route.format());

    let ParsedBlocks {
        title: found_title,
        mut blocks,
    } = match route {
        Route::Cornell(value) => cornell::normalize(&value),
        Route::WrongAnswer => wrong_answer::extract(&content),
        Route::LegacyMarker => legacy::parse(&content)
            .unwrap_or_else(|| markdown::segment(&content, SegmentMode::Full)),
        Route::Generic => markdown::segment(&content, SegmentMode::Full),
    };

    if options.extract_vocabulary && method == Some(OrganizeMethod::Vocabulary) {
        blocks = vocabulary::promote(blocks);
    }

    let title = found_title.unwrap_or_else(|| title.to_string());
    NoteData::assemble(title, blocks, metadata.cloned())
}

/// Parses many independent inputs.
///
/// Runs on the rayon pool when [`ParseOptions::parallel`] is set. Output
/// order always matches input order.
pub fn parse_batch(inputs: &[NoteInput], options: &ParseOptions) -> Vec<NoteData> {
    let parse_one = |input: &NoteInput| {
        parse_with_options(
            &input.content,
            &input.title,
            input.metadata.as_ref(),
            options,
        )
    };

    if options.parallel {
        inputs.par_iter().map(parse_one).collect()
    } else {
        inputs.iter().map(parse_one).collect()
    }
}

/// Reads and parses a UTF-8 note file.
///
/// Without an explicit `title`, the file stem is the fallback title.
///
/// # Example
///
/// ```no_run
/// use notegen::parse_file;
///
/// let note = parse_file("note.md", None, None)?;
/// println!("{}", note.title);
/// # Ok::<(), notegen::Error>(())
/// ```
pub fn parse_file(
    path: impl AsRef<Path>,
    title: Option<&str>,
    metadata: Option<&NoteMetadata>,
) -> Result<NoteData> {
    let path = path.as_ref();
    let content = String::from_utf8(std::fs::read(path)?)?;
    let title = title.unwrap_or_else(|| file_title(path));
    Ok(parse(&content, title, metadata))
}

fn file_title(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNTITLED)
}

/// Builder for parsing and rendering notes.
///
/// # Example
///
/// ```
/// use notegen::{NoteParser, OrganizeMethod};
///
/// let markdown = NoteParser::new()
///     .with_method(OrganizeMethod::BasicSummary)
///     .with_subject("생물")
///     .parse("## 광합성\n⭐ 엽록체에서 일어난다", "과학 노트")
///     .to_markdown();
///
/// assert!(markdown.starts_with("# 과학 노트"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteParser {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    metadata: Option<NoteMetadata>,
}

impl NoteParser {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the organize method hint.
    pub fn with_method(mut self, method: OrganizeMethod) -> Self {
        self.metadata_mut().organize_method = Some(method);
        self
    }

    /// Sets the subject recorded in metadata.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.metadata_mut().subject = Some(subject.into());
        self
    }

    /// Sets the date recorded in metadata.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.metadata_mut().date = Some(date.into());
        self
    }

    /// Replaces the metadata.
    pub fn with_metadata(mut self, metadata: NoteMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Sets the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Enables YAML frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options.include_frontmatter = true;
        self
    }

    fn metadata_mut(&mut self) -> &mut NoteMetadata {
        self.metadata.get_or_insert_with(NoteMetadata::default)
    }

    /// Parses content with the configured options.
    pub fn parse(self, content: &str, title: &str) -> ParsedNote {
        let note = parse_with_options(content, title, self.metadata.as_ref(), &self.parse_options);
        ParsedNote {
            note,
            render_options: self.render_options,
        }
    }

    /// Reads and parses a note file.
    pub fn parse_file(self, path: impl AsRef<Path>) -> Result<ParsedNote> {
        let path = path.as_ref();
        let content = String::from_utf8(std::fs::read(path)?)?;
        let title = file_title(path).to_string();
        Ok(self.parse(&content, &title))
    }
}

/// A parsed note ready for rendering.
#[derive(Debug, Clone)]
pub struct ParsedNote {
    note: NoteData,
    render_options: RenderOptions,
}

impl ParsedNote {
    /// Returns a reference to the underlying note.
    pub fn note(&self) -> &NoteData {
        &self.note
    }

    /// Renders the note to Markdown.
    pub fn to_markdown(&self) -> String {
        render::render_markdown(&self.note, &self.render_options)
    }

    /// Serializes the note as JSON.
    pub fn to_json(&self) -> Result<String> {
        self.note.to_json()
    }

    /// Returns the plain text content.
    pub fn to_text(&self) -> String {
        self.note.plain_text()
    }

    /// Returns the number of blocks, title included.
    pub fn block_count(&self) -> usize {
        self.note.blocks.len()
    }

    /// Consumes self and returns the underlying note.
    pub fn into_note(self) -> NoteData {
        self.note
    }
}
