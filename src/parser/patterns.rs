//! Section opener patterns for wrong-answer notes.
//!
//! The openers are ordered configuration data: each entry pairs a
//! [`SectionKind`] with a keyword alternation, and the compiled rules are
//! tried in table order. Swapping the table is enough to support another
//! locale.

use regex::Regex;
use std::sync::LazyLock;

/// Semantic section of a wrong-answer note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// The problem statement
    Problem,
    /// The answer the student wrote
    MyAnswer,
    /// The incorrect answer text itself
    WrongAnswer,
    /// Why the answer was wrong
    WrongReason,
    /// Correct answer or worked solution
    Solution,
    /// Formulas used
    Formula,
    /// Things to watch out for
    Caution,
    /// Related concept
    Concept,
}

impl SectionKind {
    /// Number of section kinds.
    pub const COUNT: usize = 8;

    /// Emission order of wrong-answer blocks, independent of source order.
    pub const CANONICAL_ORDER: [SectionKind; Self::COUNT] = [
        SectionKind::Problem,
        SectionKind::MyAnswer,
        SectionKind::WrongAnswer,
        SectionKind::Solution,
        SectionKind::WrongReason,
        SectionKind::Formula,
        SectionKind::Caution,
        SectionKind::Concept,
    ];

    /// Stable index for per-section buffers.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Ordered opener table: section kind and its keyword alternation.
pub const SECTION_RULES: &[(SectionKind, &str)] = &[
    (SectionKind::Problem, r"문제(?:\s*\d+\s*번?)?|문항|Problem|Question"),
    (SectionKind::MyAnswer, r"내\s*답|나의\s*답|내가\s*쓴\s*답|My\s*Answer"),
    (SectionKind::WrongAnswer, r"오답|틀린\s*답|Wrong\s*Answer"),
    (
        SectionKind::WrongReason,
        r"틀린\s*이유|오답\s*이유|오답\s*원인|오답\s*분석|실수\s*원인|Why\s*Wrong",
    ),
    (
        SectionKind::Solution,
        r"정답\s*및\s*풀이|올바른\s*풀이|정답|풀이|해설|Solution|Correct\s*Answer|Answer",
    ),
    (SectionKind::Formula, r"핵심\s*공식|관련\s*공식|공식|Formula"),
    (
        SectionKind::Caution,
        r"주의할\s*점|주의\s*사항|주의|Caution|Warning",
    ),
    (SectionKind::Concept, r"핵심\s*개념|관련\s*개념|개념|Concept"),
];

/// Optional leading emoji such as `📝` or `⚠️`.
const EMOJI_PREFIX: &str = r"(?:[\p{So}\x{FE0F}\x{200D}]+\s*)?";

/// A compiled opener rule.
#[derive(Debug)]
pub struct SectionRule {
    /// Section this rule opens
    pub kind: SectionKind,
    /// Matches any accepted opener form
    opener: Regex,
    /// Matches only the bold `**keyword**` form
    bold: Regex,
}

impl SectionRule {
    fn compile(kind: SectionKind, keywords: &str) -> Self {
        let bold_form = format!(
            r"\*\*\s*{EMOJI_PREFIX}(?:{keywords})\s*(?:[:：]\s*(?:\*\*)?|\*\*\s*[:：]?)"
        );
        let colon_form = format!(r"{EMOJI_PREFIX}(?:{keywords})\s*[:：]");
        let heading_form = format!(r"#{{2,6}}\s*{EMOJI_PREFIX}(?:{keywords})\s*$");

        let opener = format!(
            r"(?i)^(?:(?:#{{2,6}}\s*)?(?:{bold_form}|{colon_form})|{heading_form})\s*"
        );
        let bold = format!(r"(?i)^(?:#{{2,6}}\s*)?{bold_form}");

        Self {
            kind,
            opener: Regex::new(&opener).expect("section opener pattern"),
            bold: Regex::new(&bold).expect("bold section pattern"),
        }
    }
}

/// Compiled opener rules in table order.
pub static SECTION_PATTERNS: LazyLock<Vec<SectionRule>> = LazyLock::new(|| {
    SECTION_RULES
        .iter()
        .map(|(kind, keywords)| SectionRule::compile(*kind, keywords))
        .collect()
});

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// A line that opens a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOpener<'a> {
    /// Section being opened
    pub kind: SectionKind,
    /// The marker text, e.g. `**문제 3**:`
    pub marker: &'a str,
    /// Same-line text following the marker
    pub rest: &'a str,
}

impl SectionOpener<'_> {
    /// Problem number carried by the marker (`문제 3번` → `3`).
    pub fn number(&self) -> Option<String> {
        RE_DIGITS.find(self.marker).map(|m| m.as_str().to_string())
    }
}

/// Matches a trimmed line against the opener table.
pub fn match_opener(line: &str) -> Option<SectionOpener<'_>> {
    SECTION_PATTERNS.iter().find_map(|rule| {
        let m = rule.opener.find(line)?;
        let marker = &line[..m.end()];
        let mut rest = line[m.end()..].trim();
        // `**문제: text**` leaves the closing bold on the text
        if marker.matches("**").count() == 1 {
            rest = rest.strip_suffix("**").unwrap_or(rest).trim_end();
        }
        Some(SectionOpener {
            kind: rule.kind,
            marker,
            rest,
        })
    })
}

/// Returns true if any line opens a section with a bold keyword marker.
pub fn has_bold_opener(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        SECTION_PATTERNS.iter().any(|rule| rule.bold.is_match(line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> Option<SectionKind> {
        match_opener(line).map(|o| o.kind)
    }

    #[test]
    fn test_all_rules_compile() {
        assert_eq!(SECTION_PATTERNS.len(), SECTION_RULES.len());
    }

    #[test]
    fn test_canonical_order_covers_every_kind() {
        let mut seen = [false; SectionKind::COUNT];
        for kind in SectionKind::CANONICAL_ORDER {
            seen[kind.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_plain_colon_opener() {
        let opener = match_opener("문제: 2+2는?").unwrap();
        assert_eq!(opener.kind, SectionKind::Problem);
        assert_eq!(opener.rest, "2+2는?");
    }

    #[test]
    fn test_bold_opener_forms() {
        assert_eq!(kind_of("**정답**: 4"), Some(SectionKind::Solution));
        assert_eq!(kind_of("**정답:** 4"), Some(SectionKind::Solution));
        assert_eq!(kind_of("**📝 문제**"), Some(SectionKind::Problem));
        assert_eq!(kind_of("## **오답 이유**"), Some(SectionKind::WrongReason));
    }

    #[test]
    fn test_heading_opener() {
        assert_eq!(kind_of("## 관련 개념"), Some(SectionKind::Concept));
        assert_eq!(kind_of("## 개념 정리 노트"), None);
    }

    #[test]
    fn test_unclosed_bold_is_trimmed() {
        let opener = match_opener("**정답: 4**").unwrap();
        assert_eq!(opener.rest, "4");
    }

    #[test]
    fn test_keywords_need_marker_syntax() {
        assert_eq!(kind_of("문제를 다시 풀어보자"), None);
        assert_eq!(kind_of("정답은 4이다"), None);
    }

    #[test]
    fn test_wrong_reason_not_confused_with_wrong_answer() {
        assert_eq!(kind_of("**오답**: 5"), Some(SectionKind::WrongAnswer));
        assert_eq!(kind_of("오답 원인: 계산 실수"), Some(SectionKind::WrongReason));
        assert_eq!(kind_of("**내 답**: 5"), Some(SectionKind::MyAnswer));
    }

    #[test]
    fn test_problem_number() {
        let opener = match_opener("**문제 3번**: 다음을 구하시오").unwrap();
        assert_eq!(opener.kind, SectionKind::Problem);
        assert_eq!(opener.number().as_deref(), Some("3"));
        assert_eq!(opener.rest, "다음을 구하시오");
    }

    #[test]
    fn test_english_openers_case_insensitive() {
        assert_eq!(kind_of("**solution**: x = 2"), Some(SectionKind::Solution));
        assert_eq!(kind_of("Caution: units"), Some(SectionKind::Caution));
    }

    #[test]
    fn test_bold_detection_ignores_plain_markers() {
        assert!(has_bold_opener("intro\n**문제**: 1+1"));
        assert!(!has_bold_opener("문제: 1+1\n정답: 2"));
        assert!(!has_bold_opener("# 광합성\n- 빛 에너지"));
    }
}
