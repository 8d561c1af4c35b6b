//! Markdown renderer implementation.

use super::RenderOptions;
use crate::model::{ImportanceLevel, KeywordStyle, NoteBlock, NoteData, TipVariant};

/// Label for a problem block.
const PROBLEM_LABEL: &str = "문제";
/// Label for the answer of a solution block.
const ANSWER_LABEL: &str = "정답";
/// Label for the attempted answer of a wrong point.
const MY_ANSWER_LABEL: &str = "내 답";
/// Label for the reason of a wrong point.
const REASON_LABEL: &str = "틀린 이유";
/// Label for the correction of a wrong point.
const CORRECTION_LABEL: &str = "바로잡기";
/// Label for a summary block.
const SUMMARY_LABEL: &str = "요약";
/// Label for an example block without its own label.
const EXAMPLE_LABEL: &str = "예시";

/// Markdown renderer.
#[derive(Debug)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders a note to a Markdown string.
    pub fn render(&self, note: &NoteData) -> String {
        let mut output = String::new();

        if self.options.include_frontmatter {
            self.render_frontmatter(note, &mut output);
        }

        for block in &note.blocks {
            self.render_block(block, &mut output);
            if self.options.paragraph_spacing {
                output.push('\n');
            }
        }

        // Exactly one trailing newline
        let trimmed = output.trim_end_matches('\n').len();
        output.truncate(trimmed);
        output.push('\n');
        output
    }

    /// Renders YAML frontmatter.
    fn render_frontmatter(&self, note: &NoteData, output: &mut String) {
        output.push_str("---\n");
        output.push_str(&format!("title: \"{}\"\n", escape_yaml(&note.title)));

        if let Some(ref metadata) = note.metadata {
            if let Some(ref subject) = metadata.subject {
                output.push_str(&format!("subject: \"{}\"\n", escape_yaml(subject)));
            }
            if let Some(ref date) = metadata.date {
                output.push_str(&format!("date: \"{}\"\n", escape_yaml(date)));
            }
            if let Some(method) = metadata.organize_method {
                output.push_str(&format!("organize_method: {}\n", method));
            }
        }

        let tags: Vec<&String> = note
            .blocks
            .iter()
            .filter_map(|block| match block {
                NoteBlock::Keyword { keywords, .. } => Some(keywords),
                _ => None,
            })
            .flatten()
            .collect();
        if !tags.is_empty() {
            output.push_str("tags:\n");
            for tag in tags {
                output.push_str(&format!("  - \"{}\"\n", escape_yaml(tag)));
            }
        }

        output.push_str("---\n\n");
    }

    /// Renders one block followed by a newline.
    fn render_block(&self, block: &NoteBlock, output: &mut String) {
        match block {
            NoteBlock::Title { content, subtitle } => {
                output.push_str(&format!("# {}\n", self.text(content)));
                if let Some(sub) = subtitle {
                    output.push_str(&format!("\n*{}*\n", self.text(sub)));
                }
            }
            NoteBlock::Heading { level, content } => {
                // The title owns level one
                let hashes = "#".repeat(*level as usize + 1);
                output.push_str(&format!("{} {}\n", hashes, self.text(content)));
            }
            NoteBlock::Paragraph { content } => {
                output.push_str(&self.text(content));
                output.push('\n');
            }
            NoteBlock::Bullet { items } => self.render_bullets(items, output),
            NoteBlock::Numbered { items } => self.render_numbered(items, output),
            NoteBlock::Keyword { keywords, style } => match style {
                KeywordStyle::Chips => {
                    let chips: Vec<String> = keywords.iter().map(|k| format!("`{}`", k)).collect();
                    output.push_str(&chips.join(" "));
                    output.push('\n');
                }
                KeywordStyle::Inline => {
                    output.push_str(&self.text(&keywords.join(", ")));
                    output.push('\n');
                }
                KeywordStyle::List => self.render_bullets(keywords, output),
            },
            NoteBlock::Summary { content } => {
                let text = format!("**{}**: {}", SUMMARY_LABEL, self.text(content));
                push_quote(&text, output);
            }
            NoteBlock::Important { content, level } => {
                let marker = match level {
                    ImportanceLevel::Normal => "⭐",
                    ImportanceLevel::High => "❗",
                    ImportanceLevel::Critical => "‼",
                };
                output.push_str(&format!("{} **{}**\n", marker, self.text(content)));
            }
            NoteBlock::Example { content, label } => {
                let label = label.as_deref().unwrap_or(EXAMPLE_LABEL);
                push_quote(&format!("**{}**\n{}", label, self.text(content)), output);
            }
            NoteBlock::Formula {
                content,
                description,
            } => {
                output.push_str(&format!("```\n{}\n```\n", content));
                if let Some(desc) = description {
                    output.push_str(&format!("\n{}\n", self.text(desc)));
                }
            }
            NoteBlock::Definition { term, definition } => {
                output.push_str(&format!(
                    "**{}**: {}\n",
                    self.text(term),
                    self.text(definition)
                ));
            }
            NoteBlock::Tip { content, variant } => self.render_tip(content, *variant, output),
            NoteBlock::Divider => output.push_str("---\n"),
            NoteBlock::SimpleSection { label, content } => {
                output.push_str(&format!("**{}**\n\n{}\n", self.text(label), self.text(content)));
            }
            NoteBlock::Problem {
                content,
                number,
                source,
            } => {
                let mut heading = match number {
                    Some(n) => format!("**{} {}**", PROBLEM_LABEL, n),
                    None => format!("**{}**", PROBLEM_LABEL),
                };
                if let Some(source) = source {
                    heading.push_str(&format!(" ({})", self.text(source)));
                }
                output.push_str(&format!("{}\n\n{}\n", heading, self.text(content)));
            }
            NoteBlock::Solution {
                answer,
                steps,
                explanation,
            } => {
                output.push_str(&format!("**{}**: {}\n", ANSWER_LABEL, self.text(answer)));
                if let Some(steps) = steps.as_ref().filter(|s| !s.is_empty()) {
                    output.push('\n');
                    self.render_numbered(steps, output);
                }
                if let Some(explanation) = explanation {
                    output.push_str(&format!("\n{}\n", self.text(explanation)));
                }
            }
            NoteBlock::WrongPoint {
                my_answer,
                reason,
                correction,
            } => {
                let rows = [
                    (MY_ANSWER_LABEL, my_answer.as_deref().unwrap_or_default()),
                    (REASON_LABEL, reason.as_str()),
                    (CORRECTION_LABEL, correction.as_str()),
                ];
                for (label, value) in rows.iter().filter(|(_, value)| !value.is_empty()) {
                    output.push_str(&format!("**{}**: {}\n", label, self.text(value)));
                }
            }
            NoteBlock::Concept {
                title,
                content,
                related_formulas,
            } => {
                output.push_str(&format!("**{}**\n\n{}\n", self.text(title), self.text(content)));
                if let Some(formulas) = related_formulas.as_ref().filter(|f| !f.is_empty()) {
                    output.push('\n');
                    let quoted: Vec<String> = formulas.iter().map(|f| format!("`{}`", f)).collect();
                    self.render_bullets(&quoted, output);
                }
            }
            NoteBlock::Vocabulary {
                word,
                meaning,
                pronunciation,
                part_of_speech,
                example,
                translation,
                synonyms,
                antonyms,
            } => {
                let mut line = format!("**{}**", self.text(word));
                if let Some(pron) = pronunciation {
                    line.push_str(&format!(" [{}]", pron));
                }
                if let Some(pos) = part_of_speech {
                    line.push_str(&format!(" *({})*", pos));
                }
                line.push_str(&format!(": {}", self.text(meaning)));
                output.push_str(&line);
                output.push('\n');

                let mut details = Vec::new();
                if let Some(example) = example {
                    details.push(format!("예문: {}", example));
                }
                if let Some(translation) = translation {
                    details.push(format!("해석: {}", translation));
                }
                if let Some(words) = synonyms.as_ref().filter(|w| !w.is_empty()) {
                    details.push(format!("유의어: {}", words.join(", ")));
                }
                if let Some(words) = antonyms.as_ref().filter(|w| !w.is_empty()) {
                    details.push(format!("반의어: {}", words.join(", ")));
                }
                for detail in details {
                    output.push_str(&format!("  {} {}\n", self.options.list_marker, self.text(&detail)));
                }
            }
        }
    }

    fn render_bullets(&self, items: &[String], output: &mut String) {
        for item in items {
            output.push(self.options.list_marker);
            output.push(' ');
            output.push_str(&self.text(item));
            output.push('\n');
        }
    }

    fn render_numbered(&self, items: &[String], output: &mut String) {
        for (i, item) in items.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, self.text(item)));
        }
    }

    fn render_tip(&self, content: &str, variant: TipVariant, output: &mut String) {
        let text = if self.options.github_alerts {
            let kind = match variant {
                TipVariant::Tip => "TIP",
                TipVariant::Warning => "WARNING",
                TipVariant::Info => "NOTE",
            };
            format!("[!{}]\n{}", kind, self.text(content))
        } else {
            let icon = match variant {
                TipVariant::Tip => "💡",
                TipVariant::Warning => "⚠️",
                TipVariant::Info => "ℹ️",
            };
            format!("{} {}", icon, self.text(content))
        };
        push_quote(&text, output);
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Writes `text` as a blockquote, one `> ` per line.
fn push_quote(text: &str, output: &mut String) {
    for line in text.lines() {
        if line.is_empty() {
            output.push_str(">\n");
        } else {
            output.push_str("> ");
            output.push_str(line);
            output.push('\n');
        }
    }
}

/// Escapes special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\\' | '`' | '*' | '_' | '{' | '}' | '[' | ']' | '#' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(ch);
            }
            _ => result.push(ch),
        }
    }

    result
}

/// Escapes a string for use inside double-quoted YAML.
fn escape_yaml(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NoteMetadata, OrganizeMethod};

    fn note(blocks: Vec<NoteBlock>) -> NoteData {
        NoteData::assemble("제목".into(), blocks, None)
    }

    fn render(blocks: Vec<NoteBlock>) -> String {
        MarkdownRenderer::new(RenderOptions::default()).render(&note(blocks))
    }

    #[test]
    fn test_render_title_and_headings() {
        let result = render(vec![
            NoteBlock::heading(1, "단원"),
            NoteBlock::heading(2, "소단원"),
            NoteBlock::paragraph("본문"),
        ]);
        assert_eq!(result, "# 제목\n\n## 단원\n\n### 소단원\n\n본문\n");
    }

    #[test]
    fn test_render_lists() {
        let result = render(vec![
            NoteBlock::bullet(vec!["a".into(), "b".into()]),
            NoteBlock::numbered(vec!["하나".into(), "둘".into()]),
        ]);
        assert!(result.contains("- a\n- b\n"));
        assert!(result.contains("1. 하나\n2. 둘\n"));
    }

    #[test]
    fn test_custom_list_marker() {
        let options = RenderOptions::default().with_list_marker('*');
        let result = MarkdownRenderer::new(options).render(&note(vec![NoteBlock::bullet(vec![
            "a".into(),
        ])]));
        assert!(result.contains("* a\n"));
    }

    #[test]
    fn test_render_keyword_styles() {
        let keywords = vec!["엽록체".to_string(), "빛".to_string()];
        let chips = render(vec![NoteBlock::keyword(keywords.clone(), KeywordStyle::Chips)]);
        assert!(chips.contains("`엽록체` `빛`"));
        let inline = render(vec![NoteBlock::keyword(keywords, KeywordStyle::Inline)]);
        assert!(inline.contains("엽록체, 빛"));
    }

    #[test]
    fn test_render_summary_as_quote() {
        let result = render(vec![NoteBlock::summary("첫 줄\n둘째 줄")]);
        assert!(result.contains("> **요약**: 첫 줄\n> 둘째 줄\n"));
    }

    #[test]
    fn test_render_tip_variants() {
        let result = render(vec![NoteBlock::tip("부호 주의", TipVariant::Warning)]);
        assert!(result.contains("> [!WARNING]\n> 부호 주의\n"));

        let options = RenderOptions::default().plain_quotes();
        let plain = MarkdownRenderer::new(options)
            .render(&note(vec![NoteBlock::tip("참고", TipVariant::Info)]));
        assert!(plain.contains("> ℹ️ 참고\n"));
    }

    #[test]
    fn test_render_wrong_answer_blocks() {
        let result = render(vec![
            NoteBlock::Problem {
                content: "2+2는?".into(),
                number: Some("3".into()),
                source: None,
            },
            NoteBlock::WrongPoint {
                my_answer: Some("5".into()),
                reason: String::new(),
                correction: String::new(),
            },
            NoteBlock::Solution {
                answer: "4".into(),
                steps: Some(vec!["2+2".into(), "= 4".into()]),
                explanation: None,
            },
        ]);
        assert!(result.contains("**문제 3**\n\n2+2는?\n"));
        assert!(result.contains("**내 답**: 5\n"));
        assert!(!result.contains(REASON_LABEL));
        assert!(result.contains("**정답**: 4\n\n1. 2+2\n2. = 4\n"));
    }

    #[test]
    fn test_render_vocabulary() {
        let result = render(vec![NoteBlock::Vocabulary {
            word: "apple".into(),
            meaning: "사과".into(),
            pronunciation: Some("ˈæpəl".into()),
            part_of_speech: Some("n.".into()),
            example: Some("I ate an apple.".into()),
            translation: None,
            synonyms: Some(vec!["fruit".into()]),
            antonyms: None,
        }]);
        assert!(result.contains("**apple** [ˈæpəl] *(n.)*: 사과\n"));
        assert!(result.contains("  - 예문: I ate an apple.\n"));
        assert!(result.contains("  - 유의어: fruit\n"));
    }

    #[test]
    fn test_render_frontmatter() {
        let mut note = note(vec![NoteBlock::keyword(
            vec!["광합성".into()],
            KeywordStyle::Chips,
        )]);
        note.metadata = Some(NoteMetadata {
            subject: Some("생물".into()),
            date: Some("2024-03-01".into()),
            organize_method: Some(OrganizeMethod::Cornell),
        });

        let options = RenderOptions::default().with_frontmatter();
        let result = MarkdownRenderer::new(options).render(&note);
        assert!(result.starts_with("---\ntitle: \"제목\"\nsubject: \"생물\"\n"));
        assert!(result.contains("organize_method: cornell\n"));
        assert!(result.contains("tags:\n  - \"광합성\"\n---\n\n# 제목\n"));
    }

    #[test]
    fn test_without_spacing() {
        let options = RenderOptions::default().without_paragraph_spacing();
        let result = MarkdownRenderer::new(options).render(&note(vec![
            NoteBlock::paragraph("a"),
            NoteBlock::Divider,
        ]));
        assert_eq!(result, "# 제목\na\n---\n");
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("2-1=1"), "2-1=1");
    }

    #[test]
    fn test_escape_yaml() {
        assert_eq!(escape_yaml("a \"b\"\nc"), "a \\\"b\\\"\\nc");
    }
}
