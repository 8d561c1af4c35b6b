//! Parser paths that turn raw organizer output into blocks.
//!
//! Exactly one path runs per note; [`crate::detect`] picks it.

pub mod cornell;
pub mod legacy;
pub mod markdown;
pub mod patterns;
pub mod vocabulary;
pub mod wrong_answer;

pub use markdown::SegmentMode;
pub use patterns::{match_opener, SectionKind, SectionOpener, SECTION_RULES};

use crate::model::NoteBlock;

/// Output of a single parser path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBlocks {
    /// Title found in the content, if any
    pub title: Option<String>,
    /// Blocks in reading order
    pub blocks: Vec<NoteBlock>,
}

/// Returns true for `---`, `***` and `___`.
pub(crate) fn is_horizontal_rule(line: &str) -> bool {
    matches!(line, "---" | "***" | "___")
}
