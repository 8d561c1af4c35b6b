//! Line-oriented segmenter for Markdown-like organizer output.
//!
//! The segmenter is a fold over the input lines. All state lives in a
//! [`Segmenter`] value that each line consumes and returns, so a parse never
//! shares anything with another parse.
//!
//! # Line rules (first match wins)
//!
//! 1. Blank line: closes the open list run
//! 2. `# ` line: document title if nothing was emitted yet, otherwise a level-1 heading
//! 3. `## ` / `### ` line: heading
//! 4. `- ` / `• ` / `* ` line: appended to the bullet run (`1. ` lines to the numbered run)
//! 5. Table row or separator: dropped, even when it holds a glyph or marker
//! 6. Line with an importance glyph: important block
//! 7. Summary marker: summary block
//! 8. `---` / `***` / `___`: divider
//! 9. Anything else: one paragraph per line
//!
//! Every rule except 4 closes the open list run first.

use super::{is_horizontal_rule, ParsedBlocks};
use crate::model::{ImportanceLevel, NoteBlock};
use regex::Regex;
use std::sync::LazyLock;

/// Glyphs that mark a line as important.
pub const IMPORTANT_GLYPHS: &[char] = &['⭐', '★', '🔸', '❗', '‼'];

/// Bullet prefixes recognised at the start of a line.
const BULLET_PREFIXES: &[&str] = &["- ", "• ", "* "];

static RE_NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}[.)]\s+(.+)$").unwrap());

static RE_SUMMARY_BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*\*\s*(?:📌\s*)?(?:요약|summary)\s*[:：]?\s*\*\*\s*[:：]?\s*(.*)$").unwrap()
});

static RE_SUMMARY_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:요약|summary)\s*(?:\*\*)?\s*[:：]\s*(?:\*\*)?\s*(.*)$").unwrap()
});

static RE_TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:\-]+$").unwrap());

/// Which rule set the segmenter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMode {
    /// Every line rule
    #[default]
    Full,
    /// Headings, dash bullets and paragraphs only (legacy notes section)
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

#[derive(Debug)]
struct ListRun {
    kind: ListKind,
    items: Vec<String>,
}

impl ListRun {
    fn into_block(self) -> NoteBlock {
        match self.kind {
            ListKind::Bullet => NoteBlock::bullet(self.items),
            ListKind::Numbered => NoteBlock::numbered(self.items),
        }
    }
}

/// Parser state threaded through the line fold.
#[derive(Debug)]
pub struct Segmenter {
    mode: SegmentMode,
    blocks: Vec<NoteBlock>,
    list: Option<ListRun>,
    title: Option<String>,
    summary_pending: bool,
}

impl Segmenter {
    /// Creates an empty segmenter.
    pub fn new(mode: SegmentMode) -> Self {
        Self {
            mode,
            blocks: Vec::new(),
            list: None,
            title: None,
            summary_pending: false,
        }
    }

    /// Consumes one source line.
    pub fn step(mut self, line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            self.flush_list();
            return self;
        }

        // A bare summary marker claims only the next non-blank line
        let summary_pending = std::mem::take(&mut self.summary_pending);

        match self.mode {
            SegmentMode::Full => self.step_full(line, summary_pending),
            SegmentMode::Notes => self.step_notes(line),
        }
        self
    }

    /// Flushes the open list run and returns the collected blocks.
    pub fn finish(mut self) -> ParsedBlocks {
        self.flush_list();
        ParsedBlocks {
            title: self.title,
            blocks: self.blocks,
        }
    }

    fn step_full(&mut self, line: &str, summary_pending: bool) {
        if let Some(text) = line.strip_prefix("# ") {
            self.flush_list();
            let text = text.trim();
            if self.blocks.is_empty() && self.title.is_none() {
                log::trace!("document title: {}", text);
                self.title = Some(text.to_string());
                self.blocks.push(NoteBlock::title(text));
            } else {
                self.blocks.push(NoteBlock::heading(1, text));
            }
            return;
        }

        if let Some((level, text)) = heading(line, 6) {
            self.flush_list();
            self.blocks.push(NoteBlock::heading(level, text));
            return;
        }

        if let Some(item) = BULLET_PREFIXES.iter().find_map(|p| line.strip_prefix(*p)) {
            self.push_item(ListKind::Bullet, item.trim());
            return;
        }

        if let Some(caps) = RE_NUMBERED_ITEM.captures(line) {
            self.push_item(ListKind::Numbered, caps[1].trim());
            return;
        }

        if is_table_line(line) {
            self.flush_list();
            log::trace!("dropping table line: {}", line);
            return;
        }

        if line.contains(IMPORTANT_GLYPHS) {
            self.flush_list();
            let (content, level) = strip_importance(line);
            if !content.is_empty() {
                self.blocks.push(NoteBlock::important(content, level));
            }
            return;
        }

        let summary = RE_SUMMARY_BOLD
            .captures(line)
            .map(|caps| (caps, true))
            .or_else(|| RE_SUMMARY_INLINE.captures(line).map(|caps| (caps, false)));
        if let Some((caps, bold)) = summary {
            self.flush_list();
            let text = strip_bold_tail(&caps[1]);
            if !text.is_empty() {
                self.blocks.push(NoteBlock::summary(text));
            } else if bold {
                // Only a bold marker claims the following line
                self.summary_pending = true;
            }
            return;
        }

        if is_horizontal_rule(line) {
            self.flush_list();
            self.blocks.push(NoteBlock::Divider);
            return;
        }

        self.flush_list();
        if summary_pending {
            self.blocks.push(NoteBlock::summary(line));
        } else {
            self.blocks.push(NoteBlock::paragraph(line));
        }
    }

    fn step_notes(&mut self, line: &str) {
        if let Some((level, text)) = heading(line, 3) {
            self.flush_list();
            self.blocks.push(NoteBlock::heading(level, text));
            return;
        }

        if is_horizontal_rule(line) {
            self.flush_list();
            return;
        }

        if let Some(item) = line.strip_prefix('-') {
            let item = item.trim();
            if !item.is_empty() {
                self.push_item(ListKind::Bullet, item);
            }
            return;
        }

        self.flush_list();
        self.blocks.push(NoteBlock::paragraph(line));
    }

    fn push_item(&mut self, kind: ListKind, item: &str) {
        if self.list.as_ref().is_some_and(|run| run.kind != kind) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| ListRun {
                kind,
                items: Vec::new(),
            })
            .items
            .push(item.to_string());
    }

    fn flush_list(&mut self) {
        if let Some(run) = self.list.take() {
            self.blocks.push(run.into_block());
        }
    }
}

/// Segments a whole text.
pub fn segment(content: &str, mode: SegmentMode) -> ParsedBlocks {
    content
        .lines()
        .fold(Segmenter::new(mode), Segmenter::step)
        .finish()
}

/// Parses `## text` style headings of level 2 up to `max_hashes`.
///
/// Levels deeper than 3 clamp to 3.
fn heading(line: &str, max_hashes: usize) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(2..=max_hashes).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?.trim();
    Some((hashes.min(3) as u8, text))
}

fn strip_importance(line: &str) -> (String, ImportanceLevel) {
    let level = if line.contains('‼') {
        ImportanceLevel::Critical
    } else if line.contains('❗') {
        ImportanceLevel::High
    } else {
        ImportanceLevel::Normal
    };
    let content: String = line
        .chars()
        .filter(|c| !IMPORTANT_GLYPHS.contains(c) && *c != '\u{FE0F}')
        .collect();
    (content.trim().to_string(), level)
}

fn strip_bold_tail(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix("**").unwrap_or(text).trim()
}

fn is_table_line(line: &str) -> bool {
    let row = line.len() >= 2 && line.starts_with('|') && line.ends_with('|');
    let separator = line.contains('|') && RE_TABLE_SEPARATOR.is_match(line);
    row || separator
}
