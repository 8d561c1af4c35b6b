//! Vocabulary entry promotion.
//!
//! Vocabulary notes arrive as ordinary list items:
//!
//! ```text
//! - apple [ˈæpəl] (n.): 사과 / 예: I ate an apple. / 유의어: fruit
//! - run - 달리다
//! ```
//!
//! Items of that shape become [`NoteBlock::Vocabulary`]; everything else stays
//! in a list of the original kind.

use crate::model::NoteBlock;
use regex::Regex;
use std::sync::LazyLock;

/// Longest headword accepted, in characters.
const MAX_WORD_CHARS: usize = 40;

static RE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<word>[^\[\(:：]+?)\s*(?:\[(?P<pron>[^\]]+)\]|/(?P<ipa>[^/]+)/)?\s*(?:\((?P<pos>[^)]+)\))?(?:\s*[:：]|\s+[-–]\s+)\s*(?P<meaning>.+)$",
    )
    .unwrap()
});

static RE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<label>예문|예|ex|example|해석|번역|translation|유의어|동의어|syn|synonyms?|반의어|ant|antonyms?)\.?\s*[:：]\s*(?P<value>.+)$",
    )
    .unwrap()
});

/// Rewrites list blocks, promoting every vocabulary-shaped item.
pub fn promote(blocks: Vec<NoteBlock>) -> Vec<NoteBlock> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            NoteBlock::Bullet { items } => split_list(items, NoteBlock::bullet, &mut out),
            NoteBlock::Numbered { items } => split_list(items, NoteBlock::numbered, &mut out),
            other => out.push(other),
        }
    }
    out
}

/// Emits vocabulary blocks for matching items and keeps the rest as list
/// runs built by `make_list`.
fn split_list(items: Vec<String>, make_list: fn(Vec<String>) -> NoteBlock, out: &mut Vec<NoteBlock>) {
    let mut run = Vec::new();
    for item in items {
        match parse_entry(&item) {
            Some(entry) => {
                if !run.is_empty() {
                    out.push(make_list(std::mem::take(&mut run)));
                }
                out.push(entry);
            }
            None => run.push(item),
        }
    }
    if !run.is_empty() {
        out.push(make_list(run));
    }
}

/// Parses one list item as a vocabulary entry.
pub fn parse_entry(item: &str) -> Option<NoteBlock> {
    let item = item.replace("**", "");
    let caps = RE_ENTRY.captures(item.trim())?;

    let word = caps["word"].trim();
    if word.is_empty() || word.chars().count() > MAX_WORD_CHARS {
        return None;
    }

    let mut parts = caps["meaning"].split(" / ").map(str::trim);
    let mut meaning = parts.next().unwrap_or_default().to_string();
    if meaning.is_empty() {
        return None;
    }

    let mut example = None;
    let mut translation = None;
    let mut synonyms = None;
    let mut antonyms = None;

    for part in parts.filter(|part| !part.is_empty()) {
        let Some(annotation) = RE_ANNOTATION.captures(part) else {
            meaning.push_str(" / ");
            meaning.push_str(part);
            continue;
        };
        let value = annotation["value"].trim().to_string();
        match annotation["label"].to_lowercase().as_str() {
            "예문" | "예" | "ex" | "example" => example = Some(value),
            "해석" | "번역" | "translation" => translation = Some(value),
            "유의어" | "동의어" | "syn" | "synonym" | "synonyms" => synonyms = Some(word_list(&value)),
            _ => antonyms = Some(word_list(&value)),
        }
    }

    let pronunciation = caps
        .name("pron")
        .or_else(|| caps.name("ipa"))
        .map(|m| m.as_str().trim().to_string());
    let part_of_speech = caps.name("pos").map(|m| m.as_str().trim().to_string());

    Some(NoteBlock::Vocabulary {
        word: word.to_string(),
        meaning,
        pronunciation,
        part_of_speech,
        example,
        translation,
        synonyms,
        antonyms,
    })
}

fn word_list(value: &str) -> Vec<String> {
    value
        .split([',', '，', '、'])
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(word: &str, meaning: &str) -> NoteBlock {
        NoteBlock::Vocabulary {
            word: word.into(),
            meaning: meaning.into(),
            pronunciation: None,
            part_of_speech: None,
            example: None,
            translation: None,
            synonyms: None,
            antonyms: None,
        }
    }

    #[test]
    fn test_full_entry() {
        let block = parse_entry("apple [ˈæpəl] (n.): 사과 / 예: I ate an apple. / 유의어: fruit, pome")
            .unwrap();
        assert_eq!(
            block,
            NoteBlock::Vocabulary {
                word: "apple".into(),
                meaning: "사과".into(),
                pronunciation: Some("ˈæpəl".into()),
                part_of_speech: Some("n.".into()),
                example: Some("I ate an apple.".into()),
                translation: None,
                synonyms: Some(vec!["fruit".into(), "pome".into()]),
                antonyms: None,
            }
        );
    }

    #[test]
    fn test_dash_separator_and_bold_word() {
        assert_eq!(parse_entry("**run** - 달리다"), Some(vocab("run", "달리다")));
    }

    #[test]
    fn test_slash_pronunciation() {
        match parse_entry("cat /kæt/: 고양이").unwrap() {
            NoteBlock::Vocabulary { pronunciation, .. } => {
                assert_eq!(pronunciation.as_deref(), Some("kæt"))
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_unlabelled_parts_stay_in_meaning() {
        assert_eq!(
            parse_entry("light: 빛 / 가벼운"),
            Some(vocab("light", "빛 / 가벼운"))
        );
    }

    #[test]
    fn test_plain_items_rejected() {
        assert!(parse_entry("그냥 메모").is_none());
        assert!(parse_entry("word:").is_none());
        assert!(parse_entry(&format!("{}: 너무 긴 표제어", "x".repeat(50))).is_none());
    }

    #[test]
    fn test_promote_splits_runs() {
        let blocks = vec![
            NoteBlock::heading(2, "단어"),
            NoteBlock::bullet(vec![
                "메모 하나".into(),
                "apple: 사과".into(),
                "메모 둘".into(),
                "메모 셋".into(),
            ]),
        ];
        assert_eq!(
            promote(blocks),
            vec![
                NoteBlock::heading(2, "단어"),
                NoteBlock::bullet(vec!["메모 하나".into()]),
                vocab("apple", "사과"),
                NoteBlock::bullet(vec!["메모 둘".into(), "메모 셋".into()]),
            ]
        );
    }

    #[test]
    fn test_promote_keeps_numbered_kind() {
        let blocks = vec![NoteBlock::numbered(vec!["1번 설명".into(), "go - 가다".into()])];
        assert_eq!(
            promote(blocks),
            vec![
                NoteBlock::numbered(vec!["1번 설명".into()]),
                vocab("go", "가다"),
            ]
        );
    }
}
