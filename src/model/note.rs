//! Note document and metadata.

use super::NoteBlock;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A normalized note, ready for the presentation layer.
///
/// `blocks` is in reading order, never empty, and starts with the title
/// block when one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteData {
    /// Resolved document title
    pub title: String,
    /// Content blocks in reading order
    pub blocks: Vec<NoteBlock>,
    /// Note metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NoteMetadata>,
}

impl NoteData {
    /// Assembles a note from parsed blocks.
    ///
    /// Inserts a title block built from `title` when none exists and moves an
    /// existing title block to the front.
    pub(crate) fn assemble(
        title: String,
        mut blocks: Vec<NoteBlock>,
        metadata: Option<NoteMetadata>,
    ) -> Self {
        match blocks.iter().position(NoteBlock::is_title) {
            Some(0) => {}
            Some(pos) => {
                let block = blocks.remove(pos);
                blocks.insert(0, block);
            }
            None => blocks.insert(0, NoteBlock::title(title.clone())),
        }

        Self {
            title,
            blocks,
            metadata,
        }
    }

    /// Deserializes a note, skipping blocks whose `type` tag is unknown.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawNote {
            title: String,
            #[serde(default)]
            blocks: Vec<serde_json::Value>,
            #[serde(default)]
            metadata: Option<NoteMetadata>,
        }

        let raw: RawNote = serde_json::from_str(json)?;
        let blocks = raw
            .blocks
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<NoteBlock>(value) {
                Ok(block) => Some(block),
                Err(e) => {
                    log::debug!("skipping unrecognized block: {}", e);
                    None
                }
            })
            .collect();

        Ok(Self::assemble(raw.title, blocks, raw.metadata))
    }

    /// Serializes the note as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the note as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the plain text content of the note.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(NoteBlock::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Counts blocks per wire tag.
    pub fn block_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for block in &self.blocks {
            *counts.entry(block.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the organize method recorded in metadata, if any.
    pub fn organize_method(&self) -> Option<OrganizeMethod> {
        self.metadata.as_ref().and_then(|m| m.organize_method)
    }
}

/// Note metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    /// School subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Date the note was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Template the upstream organizer used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organize_method: Option<OrganizeMethod>,
}

impl NoteMetadata {
    /// Creates metadata carrying only an organize method.
    pub fn with_method(method: OrganizeMethod) -> Self {
        Self {
            organize_method: Some(method),
            ..Default::default()
        }
    }
}

/// Organize template that produced a note's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizeMethod {
    /// Basic summary with headings and bullets
    BasicSummary,
    /// Cornell notes (cues, main notes, summary)
    Cornell,
    /// Wrong-answer note
    WrongAnswer,
    /// Vocabulary list
    Vocabulary,
}

impl OrganizeMethod {
    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizeMethod::BasicSummary => "basic_summary",
            OrganizeMethod::Cornell => "cornell",
            OrganizeMethod::WrongAnswer => "wrong_answer",
            OrganizeMethod::Vocabulary => "vocabulary",
        }
    }
}

impl std::fmt::Display for OrganizeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "basic_summary" => Ok(OrganizeMethod::BasicSummary),
            "cornell" => Ok(OrganizeMethod::Cornell),
            "wrong_answer" => Ok(OrganizeMethod::WrongAnswer),
            "vocabulary" => Ok(OrganizeMethod::Vocabulary),
            other => Err(Error::UnknownOrganizeMethod(other.to_string())),
        }
    }
}

/// One parse request, used by batch parsing.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    /// Raw organized content
    pub content: String,
    /// Fallback title
    pub title: String,
    /// Optional metadata
    pub metadata: Option<NoteMetadata>,
}

impl NoteInput {
    /// Creates a request without metadata.
    pub fn new(content: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
            metadata: None,
        }
    }

    /// Attaches metadata to the request.
    pub fn with_metadata(mut self, metadata: NoteMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
