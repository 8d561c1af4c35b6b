//! Parser for the legacy marker-delimited note format.
//!
//! ```text
//! ===TITLE===
//! 광합성
//! ===KEYWORDS===
//! - 엽록체
//! - 빛 에너지
//! ===NOTES===
//! ## 과정
//! - 명반응
//! ===SUMMARY===
//! 식물은 빛으로 양분을 만든다.
//! ```

use super::markdown::{segment, SegmentMode};
use super::ParsedBlocks;
use crate::model::{KeywordStyle, NoteBlock};

/// Marker opening the title section. Its presence selects this parser.
pub const TITLE_MARKER: &str = "===TITLE===";
/// Marker opening the keyword section.
pub const KEYWORDS_MARKER: &str = "===KEYWORDS===";
/// Marker opening the notes section.
pub const NOTES_MARKER: &str = "===NOTES===";
/// Marker opening the summary section.
pub const SUMMARY_MARKER: &str = "===SUMMARY===";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    Keywords,
    Notes,
    Summary,
}

impl Section {
    const MARKERS: [(&'static str, Section); 4] = [
        (TITLE_MARKER, Section::Title),
        (KEYWORDS_MARKER, Section::Keywords),
        (NOTES_MARKER, Section::Notes),
        (SUMMARY_MARKER, Section::Summary),
    ];

    /// Splits a marker line into its section and any same-line text.
    fn from_line(line: &str) -> Option<(Section, &str)> {
        let line = line.trim();
        Self::MARKERS
            .iter()
            .find_map(|(marker, section)| line.strip_prefix(*marker).map(|rest| (*section, rest)))
    }
}

/// Section accumulators threaded through the line fold.
#[derive(Debug, Default)]
struct Sections<'a> {
    current: Option<Section>,
    title: Vec<&'a str>,
    keywords: Vec<&'a str>,
    notes: Vec<&'a str>,
    summary: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    fn step(mut self, line: &'a str) -> Self {
        if let Some((section, rest)) = Section::from_line(line) {
            self.current = Some(section);
            let rest = rest.trim();
            if !rest.is_empty() {
                self.push(rest);
            }
        } else {
            self.push(line);
        }
        self
    }

    fn push(&mut self, line: &'a str) {
        let target = match self.current {
            Some(Section::Title) => &mut self.title,
            Some(Section::Keywords) => &mut self.keywords,
            Some(Section::Notes) => &mut self.notes,
            Some(Section::Summary) => &mut self.summary,
            None => return,
        };
        target.push(line);
    }
}

/// Returns true if the content uses the legacy marker format.
pub fn is_legacy(content: &str) -> bool {
    content.contains(TITLE_MARKER)
}

/// Parses legacy marker content.
///
/// Returns `None` when the title marker is absent, leaving the content to
/// the generic segmenter.
pub fn parse(content: &str) -> Option<ParsedBlocks> {
    if !is_legacy(content) {
        return None;
    }

    let sections = content.lines().fold(Sections::default(), Sections::step);

    let title = sections.title.join("\n").trim().to_string();
    let keywords = parse_keywords(&sections.keywords);
    let notes = segment(&sections.notes.join("\n"), SegmentMode::Notes);
    let summary = sections.summary.join("\n").trim().to_string();

    let mut blocks = Vec::with_capacity(notes.blocks.len() + 3);
    let title = if title.is_empty() {
        None
    } else {
        blocks.push(NoteBlock::title(title.clone()));
        Some(title)
    };
    if !keywords.is_empty() {
        blocks.push(NoteBlock::keyword(keywords, KeywordStyle::Chips));
    }
    blocks.extend(notes.blocks);
    if !summary.is_empty() {
        blocks.push(NoteBlock::summary(summary));
    }

    Some(ParsedBlocks { title, blocks })
}

/// Keeps dash-prefixed lines, without the dash.
fn parse_keywords(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix('-'))
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "===TITLE===\n광합성\n===KEYWORDS===\n- 엽록체\n- 빛 에너지\n설명 줄\n===NOTES===\n## 과정\n- 명반응\n- 암반응\n빛이 필요하다\n===SUMMARY===\n식물은 빛으로 양분을 만든다.";

    #[test]
    fn test_declines_without_title_marker() {
        assert!(parse("===NOTES===\n- a").is_none());
        assert!(parse("# 제목\n본문").is_none());
    }

    #[test]
    fn test_full_document() {
        let parsed = parse(SAMPLE).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("광합성"));
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::title("광합성"),
                NoteBlock::keyword(
                    vec!["엽록체".into(), "빛 에너지".into()],
                    KeywordStyle::Chips
                ),
                NoteBlock::heading(2, "과정"),
                NoteBlock::bullet(vec!["명반응".into(), "암반응".into()]),
                NoteBlock::paragraph("빛이 필요하다"),
                NoteBlock::summary("식물은 빛으로 양분을 만든다."),
            ]
        );
    }

    #[test]
    fn test_sections_in_any_order() {
        let parsed = parse("===SUMMARY===\n끝\n===TITLE===\nT").unwrap();
        assert_eq!(
            parsed.blocks,
            vec![NoteBlock::title("T"), NoteBlock::summary("끝")]
        );
    }

    #[test]
    fn test_same_line_text_after_marker() {
        let parsed = parse("===TITLE=== 세포 분열\n===NOTES===\n본문").unwrap();
        assert_eq!(parsed.title.as_deref(), Some("세포 분열"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let parsed = parse("===TITLE===\n===KEYWORDS===\n없음\n===SUMMARY===\n  ").unwrap();
        assert!(parsed.title.is_none());
        assert!(parsed.blocks.is_empty());
    }

    #[test]
    fn test_lines_before_first_marker_ignored() {
        let parsed = parse("머리말\n===TITLE===\nT").unwrap();
        assert_eq!(parsed.blocks, vec![NoteBlock::title("T")]);
    }
}
