//! Section extractor for wrong-answer notes.
//!
//! Lines are bucketed into the section opened by the most recent marker
//! (see [`super::patterns`]). Buckets are emitted at the end in
//! [`SectionKind::CANONICAL_ORDER`], so a solution written before its
//! problem still renders after it.
//!
//! Lines seen while no section is open become paragraphs right away, ahead
//! of every section block.

use super::patterns::{match_opener, SectionKind};
use super::{is_horizontal_rule, ParsedBlocks};
use crate::model::{NoteBlock, TipVariant};
use regex::Regex;
use std::sync::LazyLock;

/// Title of the concept block.
pub const CONCEPT_TITLE: &str = "관련 개념";

static RE_ITEM_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static RE_BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Extractor state threaded through the line fold.
#[derive(Debug, Default)]
struct Extractor {
    title: Option<String>,
    blocks: Vec<NoteBlock>,
    current: Option<SectionKind>,
    buffers: [Vec<String>; SectionKind::COUNT],
    problem_number: Option<String>,
}

impl Extractor {
    fn step(mut self, line: &str) -> Self {
        let line = line.trim();

        if let Some(text) = line.strip_prefix("# ") {
            self.current = None;
            self.push_title(text.trim());
            return self;
        }

        if let Some(opener) = match_opener(line) {
            log::trace!("section {:?} opened by {:?}", opener.kind, opener.marker);
            self.current = Some(opener.kind);
            if opener.kind == SectionKind::Problem && self.problem_number.is_none() {
                self.problem_number = opener.number();
            }
            if !opener.rest.is_empty() {
                self.buffers[opener.kind.index()].push(opener.rest.to_string());
            }
            return self;
        }

        if is_horizontal_rule(line) {
            return self;
        }

        match self.current {
            Some(kind) => {
                let text = RE_ITEM_NUMBER.replace(line, "");
                self.buffers[kind.index()].push(text.into_owned());
            }
            None if !line.is_empty() => self.blocks.push(NoteBlock::paragraph(line)),
            None => {}
        }
        self
    }

    fn push_title(&mut self, text: &str) {
        if self.title.is_none() {
            self.title = Some(text.to_string());
            self.blocks.insert(0, NoteBlock::title(text));
        } else {
            self.blocks.push(NoteBlock::heading(1, text));
        }
    }

    fn finish(mut self) -> ParsedBlocks {
        for kind in SectionKind::CANONICAL_ORDER {
            let text = join_section(&self.buffers[kind.index()]);
            if text.is_empty() {
                continue;
            }
            let block = match kind {
                SectionKind::Problem => NoteBlock::Problem {
                    content: text,
                    number: self.problem_number.take(),
                    source: None,
                },
                SectionKind::MyAnswer => NoteBlock::WrongPoint {
                    my_answer: Some(text),
                    reason: String::new(),
                    correction: String::new(),
                },
                SectionKind::WrongAnswer => NoteBlock::tip(text, TipVariant::Warning),
                SectionKind::Solution => NoteBlock::Solution {
                    answer: text,
                    steps: None,
                    explanation: None,
                },
                SectionKind::WrongReason => NoteBlock::WrongPoint {
                    my_answer: None,
                    reason: text,
                    correction: String::new(),
                },
                SectionKind::Formula => NoteBlock::Formula {
                    content: text,
                    description: None,
                },
                SectionKind::Caution => NoteBlock::tip(text, TipVariant::Warning),
                SectionKind::Concept => NoteBlock::Concept {
                    title: CONCEPT_TITLE.to_string(),
                    content: text,
                    related_formulas: None,
                },
            };
            self.blocks.push(block);
        }

        ParsedBlocks {
            title: self.title,
            blocks: self.blocks,
        }
    }
}

/// Joins a section buffer, keeping inner paragraph breaks.
fn join_section(lines: &[String]) -> String {
    let joined = lines.join("\n");
    RE_BLANK_RUNS
        .replace_all(joined.trim(), "\n\n")
        .into_owned()
}

/// Extracts wrong-answer sections from the content.
pub fn extract(content: &str) -> ParsedBlocks {
    content
        .lines()
        .fold(Extractor::default(), Extractor::step)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_problem_and_solution() {
        let parsed = extract("문제: 2+2는?\n**정답**: 4");
        assert!(parsed.title.is_none());
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::Problem {
                    content: "2+2는?".into(),
                    number: None,
                    source: None
                },
                NoteBlock::Solution {
                    answer: "4".into(),
                    steps: None,
                    explanation: None
                },
            ]
        );
    }

    #[test]
    fn test_canonical_order_ignores_source_order() {
        let parsed = extract("**정답**: 4\n**개념**: 덧셈\n**문제**: 2+2는?");
        let kinds: Vec<_> = parsed.blocks.iter().map(NoteBlock::kind).collect();
        assert_eq!(kinds, vec!["problem", "solution", "concept"]);
    }

    #[test]
    fn test_full_note() {
        let content = "\
# 이차방정식 오답노트
**문제 3번**: x^2 - 5x + 6 = 0 의 해를 구하시오.
**내 답**: x = 1, 6
**오답**: x = 1, 6
**틀린 이유**
1. 인수분해에서 부호를 잘못 봤다.
2. 검산을 하지 않았다.
**정답**: x = 2, 3
**공식**: (x-a)(x-b) = x^2 - (a+b)x + ab
**주의**: 상수항의 부호 확인
**관련 개념**: 인수분해";
        let parsed = extract(content);
        assert_eq!(parsed.title.as_deref(), Some("이차방정식 오답노트"));
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::title("이차방정식 오답노트"),
                NoteBlock::Problem {
                    content: "x^2 - 5x + 6 = 0 의 해를 구하시오.".into(),
                    number: Some("3".into()),
                    source: None
                },
                NoteBlock::WrongPoint {
                    my_answer: Some("x = 1, 6".into()),
                    reason: String::new(),
                    correction: String::new()
                },
                NoteBlock::tip("x = 1, 6", TipVariant::Warning),
                NoteBlock::Solution {
                    answer: "x = 2, 3".into(),
                    steps: None,
                    explanation: None
                },
                NoteBlock::WrongPoint {
                    my_answer: None,
                    reason: "인수분해에서 부호를 잘못 봤다.\n검산을 하지 않았다.".into(),
                    correction: String::new()
                },
                NoteBlock::Formula {
                    content: "(x-a)(x-b) = x^2 - (a+b)x + ab".into(),
                    description: None
                },
                NoteBlock::tip("상수항의 부호 확인", TipVariant::Warning),
                NoteBlock::Concept {
                    title: CONCEPT_TITLE.into(),
                    content: "인수분해".into(),
                    related_formulas: None
                },
            ]
        );
    }

    #[test]
    fn test_preamble_lines_stay_in_place() {
        let parsed = extract("오늘 틀린 문제 정리\n\n**정답**: 4\n추가 설명");
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::paragraph("오늘 틀린 문제 정리"),
                NoteBlock::Solution {
                    answer: "4\n추가 설명".into(),
                    steps: None,
                    explanation: None
                },
            ]
        );
    }

    #[test]
    fn test_paragraph_breaks_kept_inside_section() {
        let parsed = extract("**풀이**\n첫 단계\n\n\n\n둘째 단계\n\n");
        assert_eq!(
            parsed.blocks,
            vec![NoteBlock::Solution {
                answer: "첫 단계\n\n둘째 단계".into(),
                steps: None,
                explanation: None
            }]
        );
    }

    #[test]
    fn test_title_closes_open_section() {
        let parsed = extract("**문제**: a\n# 제목\n설명");
        assert_eq!(parsed.title.as_deref(), Some("제목"));
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::title("제목"),
                NoteBlock::paragraph("설명"),
                NoteBlock::Problem {
                    content: "a".into(),
                    number: None,
                    source: None
                },
            ]
        );
    }

    #[test]
    fn test_first_title_wins() {
        let parsed = extract("# 첫 제목\n# 둘째 제목");
        assert_eq!(parsed.title.as_deref(), Some("첫 제목"));
        assert_eq!(parsed.blocks[1], NoteBlock::heading(1, "둘째 제목"));
    }

    #[test]
    fn test_repeated_opener_appends() {
        let parsed = extract("**개념**: 하나\n**정답**: 4\n**개념**: 둘");
        let concept = parsed.blocks.last().unwrap();
        assert_eq!(concept.plain_text(), "관련 개념\n하나\n둘");
    }

    #[test]
    fn test_empty_sections_skipped() {
        let parsed = extract("**문제**\n\n**정답**: 4");
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].kind(), "solution");
    }

    #[test]
    fn test_dividers_ignored() {
        let parsed = extract("**문제**: a\n---\n**정답**: b");
        assert_eq!(parsed.blocks.len(), 2);
    }
}
