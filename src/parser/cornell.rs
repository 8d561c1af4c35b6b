//! Normalizer for structured Cornell notes.
//!
//! The organizer may answer with a JSON object instead of Markdown:
//!
//! ```json
//! {
//!   "title": "광합성",
//!   "cues": ["광합성이란?", "명반응의 특징은?"],
//!   "main": [
//!     {"type": "heading", "level": 2, "content": "정의"},
//!     {"type": "paragraph", "content": "빛 에너지로 양분을 만드는 과정"},
//!     {"type": "bullet", "items": ["명반응", "암반응"]}
//!   ],
//!   "summary": "식물은 빛으로 양분을 만든다."
//! }
//! ```
//!
//! Every attribute is optional once the object has been recognised; a wrong
//! type reads as absent.

use super::ParsedBlocks;
use crate::model::{ImportanceLevel, KeywordStyle, NoteBlock, TipVariant};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Keys a JSON object must expose to be treated as a Cornell note.
pub const REQUIRED_KEYS: [&str; 4] = ["title", "cues", "main", "summary"];

static RE_CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*```[A-Za-z]*[ \t]*\n(.*?)\n?\s*```\s*$").unwrap());

/// Attempts the structured parse.
///
/// Returns `None` for anything that is not a JSON object carrying all of
/// [`REQUIRED_KEYS`]. A failed attempt is a routing signal, never an error.
pub fn parse_structured(content: &str) -> Option<Value> {
    let trimmed = content.trim();
    let body = match RE_CODE_FENCE.captures(trimmed) {
        Some(caps) => caps.get(1).map_or(trimmed, |m| m.as_str()),
        None => trimmed,
    };
    if !body.starts_with('{') {
        return None;
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("structured parse declined: {}", e);
            return None;
        }
    };

    let object = value.as_object()?;
    if REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
        Some(value)
    } else {
        log::debug!("JSON object lacks Cornell keys");
        None
    }
}

/// Maps a recognised Cornell object onto blocks.
pub fn normalize(value: &Value) -> ParsedBlocks {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);

    let mut blocks = Vec::new();

    let title = text_field(object, "title").map(str::to_string);
    if let Some(title) = &title {
        blocks.push(NoteBlock::Title {
            content: title.clone(),
            subtitle: text_field(object, "subtitle").map(str::to_string),
        });
    }

    let cues = string_list(object.get("cues"));
    if !cues.is_empty() {
        blocks.push(NoteBlock::keyword(cues, KeywordStyle::Chips));
    }

    if let Some(entries) = object.get("main").and_then(Value::as_array) {
        blocks.extend(entries.iter().filter_map(main_entry));
    }

    if let Some(summary) = text_field(object, "summary") {
        blocks.push(NoteBlock::summary(summary));
    }

    ParsedBlocks { title, blocks }
}

/// Converts one main entry. Unknown tags downgrade to a paragraph when they
/// carry content and are dropped otherwise.
fn main_entry(entry: &Value) -> Option<NoteBlock> {
    let object = match entry {
        Value::Object(object) => object,
        Value::String(text) if !text.trim().is_empty() => {
            return Some(NoteBlock::paragraph(text.trim()));
        }
        _ => {
            log::debug!("dropping main entry without content");
            return None;
        }
    };

    let tag = object.get("type").and_then(Value::as_str).unwrap_or_default();
    let content = || text_field(object, "content").unwrap_or_default().to_string();

    let block = match tag {
        "heading" => {
            let level = object
                .get("level")
                .and_then(Value::as_u64)
                .map_or(2, |level| level.min(u8::MAX as u64) as u8);
            NoteBlock::heading(level, content())
        }
        "paragraph" => NoteBlock::paragraph(content()),
        "bullet" => NoteBlock::bullet(list_items(object)),
        "numbered" => NoteBlock::numbered(list_items(object)),
        "important" => NoteBlock::important(
            content(),
            text_field(object, "level")
                .and_then(ImportanceLevel::from_name)
                .unwrap_or_default(),
        ),
        "example" => NoteBlock::Example {
            content: content(),
            label: text_field(object, "label").map(str::to_string),
        },
        "formula" => NoteBlock::Formula {
            content: content(),
            description: text_field(object, "description").map(str::to_string),
        },
        "definition" => NoteBlock::Definition {
            term: text_field(object, "term").unwrap_or_default().to_string(),
            definition: text_field(object, "definition")
                .map(str::to_string)
                .unwrap_or_else(content),
        },
        "tip" => NoteBlock::tip(
            content(),
            text_field(object, "variant")
                .and_then(TipVariant::from_name)
                .unwrap_or_default(),
        ),
        "divider" => NoteBlock::Divider,
        other => {
            let content = content();
            if content.is_empty() {
                log::debug!("dropping main entry with unknown type {:?}", other);
                return None;
            }
            log::debug!("main entry type {:?} downgraded to paragraph", other);
            NoteBlock::paragraph(content)
        }
    };

    Some(block)
}

/// Non-empty trimmed string attribute.
fn text_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Non-empty strings of an array attribute.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// List items from `items`, or the lines of `content` when `items` is absent.
fn list_items(object: &Map<String, Value>) -> Vec<String> {
    if object.get("items").is_some_and(Value::is_array) {
        return string_list(object.get("items"));
    }
    text_field(object, "content")
        .map(|content| {
            content
                .lines()
                .map(|line| line.trim().trim_start_matches(['-', '•', '*']).trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_document() {
        let value = json!({
            "title": "T",
            "cues": ["a", "b"],
            "main": [{"type": "paragraph", "content": "p"}],
            "summary": "s"
        });
        let parsed = normalize(&value);
        assert_eq!(parsed.title.as_deref(), Some("T"));
        assert_eq!(
            parsed.blocks,
            vec![
                NoteBlock::title("T"),
                NoteBlock::keyword(vec!["a".into(), "b".into()], KeywordStyle::Chips),
                NoteBlock::paragraph("p"),
                NoteBlock::summary("s"),
            ]
        );
    }

    #[test]
    fn test_detection_requires_all_keys() {
        assert!(parse_structured(r#"{"title":"T","cues":[],"main":[],"summary":""}"#).is_some());
        assert!(parse_structured(r#"{"title":"T","main":[],"summary":""}"#).is_none());
        assert!(parse_structured(r#"["title","cues","main","summary"]"#).is_none());
        assert!(parse_structured("# 제목\n본문").is_none());
        assert!(parse_structured(r#"{"title": "broken"#).is_none());
    }

    #[test]
    fn test_detection_unwraps_code_fence() {
        let fenced = "```json\n{\"title\":\"T\",\"cues\":[],\"main\":[],\"summary\":\"\"}\n```";
        assert!(parse_structured(fenced).is_some());
    }

    #[test]
    fn test_empty_cues_and_summary_omitted() {
        let value = json!({"title": "T", "cues": [], "main": [], "summary": "  "});
        assert_eq!(normalize(&value).blocks, vec![NoteBlock::title("T")]);
    }

    #[test]
    fn test_unknown_tags() {
        let value = json!({
            "title": "T",
            "cues": [],
            "main": [
                {"type": "mindmap", "content": "kept"},
                {"type": "mindmap"},
                {"content": "untagged"},
                {},
                42
            ],
            "summary": ""
        });
        assert_eq!(
            normalize(&value).blocks,
            vec![
                NoteBlock::title("T"),
                NoteBlock::paragraph("kept"),
                NoteBlock::paragraph("untagged"),
            ]
        );
    }

    #[test]
    fn test_known_tags_map_one_to_one() {
        let value = json!({
            "title": "T",
            "cues": ["q"],
            "main": [
                {"type": "heading", "level": 3, "content": "h"},
                {"type": "heading", "content": "default level"},
                {"type": "bullet", "items": ["x", "y"]},
                {"type": "bullet", "content": "- one\n- two"},
                {"type": "important", "content": "i", "level": "critical"},
                {"type": "example", "content": "e", "label": "예시 1"}
            ],
            "summary": "s"
        });
        let blocks = normalize(&value).blocks;
        assert_eq!(blocks.len(), 1 + 1 + 6 + 1);
        assert_eq!(blocks[2], NoteBlock::heading(3, "h"));
        assert_eq!(blocks[3], NoteBlock::heading(2, "default level"));
        assert_eq!(blocks[4], NoteBlock::bullet(vec!["x".into(), "y".into()]));
        assert_eq!(blocks[5], NoteBlock::bullet(vec!["one".into(), "two".into()]));
        assert_eq!(
            blocks[6],
            NoteBlock::important("i", ImportanceLevel::Critical)
        );
        assert_eq!(
            blocks[7],
            NoteBlock::Example {
                content: "e".into(),
                label: Some("예시 1".into())
            }
        );
    }

    #[test]
    fn test_wrong_types_read_as_absent() {
        let value = json!({
            "title": 7,
            "cues": "not a list",
            "main": {"type": "paragraph"},
            "summary": null,
            "subtitle": "ignored without title"
        });
        let parsed = normalize(&value);
        assert!(parsed.title.is_none());
        assert!(parsed.blocks.is_empty());
    }

    #[test]
    fn test_subtitle() {
        let value = json!({"title": "T", "subtitle": "S", "cues": [], "main": [], "summary": ""});
        assert_eq!(
            normalize(&value).blocks[0],
            NoteBlock::Title {
                content: "T".into(),
                subtitle: Some("S".into())
            }
        );
    }
}
