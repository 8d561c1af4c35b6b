//! Content block definitions.

use serde::{Deserialize, Serialize};

/// Lowest heading level a block may carry.
pub const MIN_HEADING_LEVEL: u8 = 1;

/// Deepest heading level a block may carry.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// One canonical unit of note content.
///
/// Blocks serialize with an internal `"type"` tag in camelCase
/// (`{"type":"wrongPoint","myAnswer":"3",...}`), which is the shape the
/// presentation layer dispatches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NoteBlock {
    /// Document title
    Title {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    /// Section heading (level 1-3)
    Heading { level: u8, content: String },
    /// Plain paragraph
    Paragraph { content: String },
    /// Unordered list
    Bullet { items: Vec<String> },
    /// Ordered list
    Numbered { items: Vec<String> },
    /// Keyword group
    Keyword {
        keywords: Vec<String>,
        #[serde(default)]
        style: KeywordStyle,
    },
    /// Summary of the whole note
    Summary { content: String },
    /// Highlighted statement
    Important {
        content: String,
        #[serde(default)]
        level: ImportanceLevel,
    },
    /// Worked example
    Example {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Formula with optional explanation
    Formula {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Term and its definition
    Definition { term: String, definition: String },
    /// Side note
    Tip {
        content: String,
        #[serde(default)]
        variant: TipVariant,
    },
    /// Horizontal separator
    Divider,
    /// Labelled free-form section
    SimpleSection { label: String, content: String },
    /// Problem statement
    Problem {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    /// Correct answer and how to get there
    Solution {
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        steps: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    /// What went wrong in an attempt
    WrongPoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        my_answer: Option<String>,
        #[serde(default)]
        reason: String,
        #[serde(default)]
        correction: String,
    },
    /// Concept explanation
    Concept {
        title: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related_formulas: Option<Vec<String>>,
    },
    /// Vocabulary entry
    Vocabulary {
        word: String,
        meaning: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pronunciation: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        part_of_speech: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        translation: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        synonyms: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        antonyms: Option<Vec<String>>,
    },
}

impl NoteBlock {
    /// Creates a title block without subtitle.
    pub fn title(content: impl Into<String>) -> Self {
        NoteBlock::Title {
            content: content.into(),
            subtitle: None,
        }
    }

    /// Creates a heading block, clamping the level to 1-3.
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        NoteBlock::Heading {
            level: level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL),
            content: content.into(),
        }
    }

    /// Creates a paragraph block.
    pub fn paragraph(content: impl Into<String>) -> Self {
        NoteBlock::Paragraph {
            content: content.into(),
        }
    }

    /// Creates a bullet list block.
    pub fn bullet(items: Vec<String>) -> Self {
        NoteBlock::Bullet { items }
    }

    /// Creates a numbered list block.
    pub fn numbered(items: Vec<String>) -> Self {
        NoteBlock::Numbered { items }
    }

    /// Creates a keyword block.
    pub fn keyword(keywords: Vec<String>, style: KeywordStyle) -> Self {
        NoteBlock::Keyword { keywords, style }
    }

    /// Creates a summary block.
    pub fn summary(content: impl Into<String>) -> Self {
        NoteBlock::Summary {
            content: content.into(),
        }
    }

    /// Creates an important block.
    pub fn important(content: impl Into<String>, level: ImportanceLevel) -> Self {
        NoteBlock::Important {
            content: content.into(),
            level,
        }
    }

    /// Creates a tip block.
    pub fn tip(content: impl Into<String>, variant: TipVariant) -> Self {
        NoteBlock::Tip {
            content: content.into(),
            variant,
        }
    }

    /// Returns the wire tag of this block (`"wrongPoint"`, `"bullet"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            NoteBlock::Title { .. } => "title",
            NoteBlock::Heading { .. } => "heading",
            NoteBlock::Paragraph { .. } => "paragraph",
            NoteBlock::Bullet { .. } => "bullet",
            NoteBlock::Numbered { .. } => "numbered",
            NoteBlock::Keyword { .. } => "keyword",
            NoteBlock::Summary { .. } => "summary",
            NoteBlock::Important { .. } => "important",
            NoteBlock::Example { .. } => "example",
            NoteBlock::Formula { .. } => "formula",
            NoteBlock::Definition { .. } => "definition",
            NoteBlock::Tip { .. } => "tip",
            NoteBlock::Divider => "divider",
            NoteBlock::SimpleSection { .. } => "simpleSection",
            NoteBlock::Problem { .. } => "problem",
            NoteBlock::Solution { .. } => "solution",
            NoteBlock::WrongPoint { .. } => "wrongPoint",
            NoteBlock::Concept { .. } => "concept",
            NoteBlock::Vocabulary { .. } => "vocabulary",
        }
    }

    /// Returns true if this is a title block.
    pub fn is_title(&self) -> bool {
        matches!(self, NoteBlock::Title { .. })
    }

    /// Returns the readable text carried by this block, newline-separated.
    pub fn plain_text(&self) -> String {
        match self {
            NoteBlock::Title { content, subtitle } => match subtitle {
                Some(sub) => format!("{}\n{}", content, sub),
                None => content.clone(),
            },
            NoteBlock::Heading { content, .. }
            | NoteBlock::Paragraph { content }
            | NoteBlock::Summary { content }
            | NoteBlock::Important { content, .. }
            | NoteBlock::Example { content, .. }
            | NoteBlock::Tip { content, .. }
            | NoteBlock::Problem { content, .. } => content.clone(),
            NoteBlock::Bullet { items } | NoteBlock::Numbered { items } => items.join("\n"),
            NoteBlock::Keyword { keywords, .. } => keywords.join(", "),
            NoteBlock::Formula {
                content,
                description,
            } => join_present(&[Some(content.as_str()), description.as_deref()]),
            NoteBlock::Definition { term, definition } => format!("{}: {}", term, definition),
            NoteBlock::Divider => String::new(),
            NoteBlock::SimpleSection { label, content } => format!("{}\n{}", label, content),
            NoteBlock::Solution {
                answer,
                steps,
                explanation,
            } => {
                let steps = steps.as_ref().map(|s| s.join("\n"));
                join_present(&[Some(answer.as_str()), steps.as_deref(), explanation.as_deref()])
            }
            NoteBlock::WrongPoint {
                my_answer,
                reason,
                correction,
            } => join_present(&[
                my_answer.as_deref(),
                Some(reason.as_str()),
                Some(correction.as_str()),
            ]),
            NoteBlock::Concept { title, content, .. } => format!("{}\n{}", title, content),
            NoteBlock::Vocabulary { word, meaning, .. } => format!("{}: {}", word, meaning),
        }
    }
}

fn join_present(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// How a keyword group is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordStyle {
    /// Comma-separated run of text
    Inline,
    /// Individual chips
    #[default]
    Chips,
    /// One keyword per line
    List,
}

/// Emphasis level of an important block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceLevel {
    #[default]
    Normal,
    High,
    Critical,
}

impl ImportanceLevel {
    /// Parses a level name, treating anything unknown as absent.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(ImportanceLevel::Normal),
            "high" => Some(ImportanceLevel::High),
            "critical" => Some(ImportanceLevel::Critical),
            _ => None,
        }
    }
}

/// Visual variant of a tip block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipVariant {
    #[default]
    Tip,
    Warning,
    Info,
}

impl TipVariant {
    /// Parses a variant name, treating anything unknown as absent.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tip" => Some(TipVariant::Tip),
            "warning" => Some(TipVariant::Warning),
            "info" => Some(TipVariant::Info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(NoteBlock::heading(0, "a"), NoteBlock::heading(1, "a"));
        match NoteBlock::heading(6, "deep") {
            NoteBlock::Heading { level, .. } => assert_eq!(level, 3),
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_block_serializes_camel_case_tag() {
        let block = NoteBlock::WrongPoint {
            my_answer: Some("3".to_string()),
            reason: String::new(),
            correction: String::new(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "wrongPoint");
        assert_eq!(json["myAnswer"], "3");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let json = serde_json::to_value(NoteBlock::title("T")).unwrap();
        assert!(json.get("subtitle").is_none());
        assert_eq!(json["content"], "T");
    }

    #[test]
    fn test_divider_round_trips() {
        let json = serde_json::to_string(&NoteBlock::Divider).unwrap();
        assert_eq!(json, r#"{"type":"divider"}"#);
        let back: NoteBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NoteBlock::Divider);
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let blocks = [
            NoteBlock::keyword(vec!["a".into()], KeywordStyle::Chips),
            NoteBlock::SimpleSection {
                label: "l".into(),
                content: "c".into(),
            },
            NoteBlock::tip("t", TipVariant::Warning),
        ];
        for block in &blocks {
            let json = serde_json::to_value(block).unwrap();
            assert_eq!(json["type"], block.kind());
        }
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(ImportanceLevel::from_name("HIGH"), Some(ImportanceLevel::High));
        assert_eq!(ImportanceLevel::from_name("urgent"), None);
        assert_eq!(TipVariant::from_name(" info "), Some(TipVariant::Info));
    }

    #[test]
    fn test_plain_text_skips_empty_parts() {
        let block = NoteBlock::WrongPoint {
            my_answer: None,
            reason: "부호 실수".into(),
            correction: String::new(),
        };
        assert_eq!(block.plain_text(), "부호 실수");
    }
}
