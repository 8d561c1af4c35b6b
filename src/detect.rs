//! Format detection for organizer output.
//!
//! Routing order:
//!
//! 1. JSON object with `title`, `cues`, `main` and `summary` → Cornell normalizer
//! 2. Wrong-answer hint, or a bold section opener in the text → section extractor
//! 3. Legacy `===TITLE===` marker → legacy parser
//! 4. Everything else → generic segmenter

use crate::model::OrganizeMethod;
use crate::parser::{cornell, legacy, patterns};
use serde_json::Value;

/// Input formats the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Structured Cornell JSON
    Cornell,
    /// Wrong-answer note with section markers
    WrongAnswer,
    /// `===TITLE===` marker format
    LegacyMarker,
    /// Markdown-like text
    Generic,
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Cornell => write!(f, "Cornell (structured)"),
            FormatType::WrongAnswer => write!(f, "Wrong-answer sections"),
            FormatType::LegacyMarker => write!(f, "Legacy markers"),
            FormatType::Generic => write!(f, "Generic Markdown"),
        }
    }
}

/// Routing decision. The Cornell route carries the already parsed value so
/// the content is only decoded once.
#[derive(Debug)]
pub(crate) enum Route {
    Cornell(Value),
    WrongAnswer,
    LegacyMarker,
    Generic,
}

impl Route {
    pub(crate) fn format(&self) -> FormatType {
        match self {
            Route::Cornell(_) => FormatType::Cornell,
            Route::WrongAnswer => FormatType::WrongAnswer,
            Route::LegacyMarker => FormatType::LegacyMarker,
            Route::Generic => FormatType::Generic,
        }
    }
}

/// Picks the parser path for `content`.
pub(crate) fn route(
    content: &str,
    method: Option<OrganizeMethod>,
    detect_markers: bool,
) -> Route {
    if let Some(value) = cornell::parse_structured(content) {
        return Route::Cornell(value);
    }

    if method == Some(OrganizeMethod::WrongAnswer)
        || (detect_markers && patterns::has_bold_opener(content))
    {
        return Route::WrongAnswer;
    }

    if legacy::is_legacy(content) {
        return Route::LegacyMarker;
    }

    Route::Generic
}

/// Detects the input format with default section-marker detection.
///
/// # Example
///
/// ```
/// use notegen::{detect_format, FormatType, OrganizeMethod};
///
/// assert_eq!(detect_format("# 제목\n- 항목", None), FormatType::Generic);
/// assert_eq!(
///     detect_format("문제: 1+1", Some(OrganizeMethod::WrongAnswer)),
///     FormatType::WrongAnswer
/// );
/// ```
pub fn detect_format(content: &str, organize_method: Option<OrganizeMethod>) -> FormatType {
    route(content, organize_method, true).format()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cornell() {
        let json = r#"{"title":"T","cues":["a"],"main":[],"summary":"s"}"#;
        assert_eq!(detect_format(json, None), FormatType::Cornell);
        // Structured content wins over the hint
        assert_eq!(
            detect_format(json, Some(OrganizeMethod::WrongAnswer)),
            FormatType::Cornell
        );
    }

    #[test]
    fn test_incomplete_json_is_not_cornell() {
        let json = r#"{"title":"T","main":[]}"#;
        assert_eq!(detect_format(json, None), FormatType::Generic);
    }

    #[test]
    fn test_detect_wrong_answer_by_hint() {
        assert_eq!(
            detect_format("문제: 2+2는?", Some(OrganizeMethod::WrongAnswer)),
            FormatType::WrongAnswer
        );
        assert_eq!(detect_format("문제: 2+2는?", None), FormatType::Generic);
    }

    #[test]
    fn test_detect_wrong_answer_by_bold_marker() {
        assert_eq!(
            detect_format("**문제**: 2+2는?\n**정답**: 4", None),
            FormatType::WrongAnswer
        );
    }

    #[test]
    fn test_marker_detection_can_be_disabled() {
        let route = route("**문제**: 2+2는?", None, false);
        assert_eq!(route.format(), FormatType::Generic);
    }

    #[test]
    fn test_detect_legacy() {
        assert_eq!(
            detect_format("===TITLE===\nT\n===NOTES===\n- a", None),
            FormatType::LegacyMarker
        );
    }

    #[test]
    fn test_empty_content_is_generic() {
        assert_eq!(detect_format("", None), FormatType::Generic);
    }
}
