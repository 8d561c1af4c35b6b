//! # Input Cleanup
//!
//! Normalizes raw organizer output before format detection.
//!
//! ## Stages
//!
//! 1. **String normalization** - Unicode NFC, control character removal, fullwidth folding
//! 2. **Line normalization** - CRLF to LF, trailing whitespace removal

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Cleanup configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Apply Unicode NFC normalization
    pub nfc: bool,
    /// Remove BOM, NUL, soft hyphens and replacement characters
    pub remove_control_chars: bool,
    /// Map the ideographic space (U+3000) to a regular space
    pub normalize_ideographic_space: bool,
    /// Fold fullwidth ASCII variants (`：`, `（`, ...) to ASCII
    pub fold_fullwidth_ascii: bool,
    /// Normalize line endings and strip trailing whitespace
    pub normalize_lines: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            nfc: true,
            remove_control_chars: true,
            normalize_ideographic_space: true,
            fold_fullwidth_ascii: false,
            normalize_lines: true,
        }
    }
}

impl CleanupOptions {
    /// Creates options that only fix line endings
    pub fn minimal() -> Self {
        Self {
            nfc: false,
            remove_control_chars: false,
            normalize_ideographic_space: false,
            fold_fullwidth_ascii: false,
            normalize_lines: true,
        }
    }

    /// Creates options that also fold fullwidth punctuation
    pub fn aggressive() -> Self {
        Self {
            fold_fullwidth_ascii: true,
            ..Self::default()
        }
    }
}

// ============================================================================
// Stage 1: String Normalization
// ============================================================================

/// Stage 1: Normalize raw string
///
/// - Unicode NFC normalization (OCR output often carries decomposed Hangul)
/// - Control character removal
/// - Fullwidth space and ASCII normalization
pub fn normalize_string(input: &str, options: &CleanupOptions) -> String {
    let mut result = String::with_capacity(input.len());

    let chars: Box<dyn Iterator<Item = char>> = if options.nfc {
        Box::new(input.nfc())
    } else {
        Box::new(input.chars())
    };

    for c in chars {
        if options.remove_control_chars && is_control_char(c) {
            continue;
        }

        if let Some(normalized) = normalize_fullwidth(c, options) {
            result.push(normalized);
            continue;
        }

        result.push(c);
    }

    result
}

/// Check if character is a control character that should be removed
fn is_control_char(c: char) -> bool {
    matches!(
        c,
        '\0'        // Null
        | '\x0B'    // Vertical Tab
        | '\x0C'    // Form Feed
        | '\u{FEFF}' // BOM
        | '\u{FFFD}' // Replacement character
        | '\u{00AD}' // Soft hyphen
    )
}

/// Normalize fullwidth characters to ASCII equivalents
fn normalize_fullwidth(c: char, options: &CleanupOptions) -> Option<char> {
    match c {
        '\u{3000}' if options.normalize_ideographic_space => Some(' '),
        '\u{FF01}'..='\u{FF5E}' if options.fold_fullwidth_ascii => {
            let offset = c as u32 - 0xFF01;
            char::from_u32(0x21 + offset)
        }
        _ => None,
    }
}

// ============================================================================
// Stage 2: Line Normalization
// ============================================================================

static RE_TRAILING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// Stage 2: Normalize line structure
///
/// - CRLF and lone CR become LF
/// - Trailing spaces and tabs are removed from every line
pub fn normalize_lines(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    RE_TRAILING_WHITESPACE.replace_all(&unified, "").into_owned()
}

// ============================================================================
// Main Pipeline
// ============================================================================

/// Run the cleanup pipeline on raw note content
///
/// # Example
///
/// ```
/// use notegen::cleanup::{cleanup, CleanupOptions};
///
/// let clean = cleanup("\u{FEFF}# 제목\r\n본문  ", &CleanupOptions::default());
/// assert_eq!(clean, "# 제목\n본문");
/// ```
pub fn cleanup(input: &str, options: &CleanupOptions) -> String {
    let mut result = normalize_string(input, options);

    if options.normalize_lines {
        result = normalize_lines(&result);
    }

    result
}

/// Run cleanup with default options
pub fn cleanup_default(input: &str) -> String {
    cleanup(input, &CleanupOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_char_removal() {
        let input = "\u{FEFF}앞\u{00AD}뒤\0";
        assert_eq!(cleanup_default(input), "앞뒤");
    }

    #[test]
    fn test_nfc_composes_hangul() {
        // 한 as decomposed jamo
        let decomposed = "\u{1112}\u{1161}\u{11AB}";
        assert_eq!(cleanup_default(decomposed), "한");
    }

    #[test]
    fn test_ideographic_space() {
        assert_eq!(cleanup_default("가\u{3000}나"), "가 나");
    }

    #[test]
    fn test_fullwidth_folding_is_opt_in() {
        let input = "문제：１＋１";
        assert_eq!(cleanup_default(input), input);
        assert_eq!(cleanup(input, &CleanupOptions::aggressive()), "문제:1+1");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_lines("a  \r\nb\t\rc"), "a\nb\nc");
    }

    #[test]
    fn test_minimal_keeps_control_chars() {
        let input = "\u{FEFF}x\r\n";
        assert_eq!(cleanup(input, &CleanupOptions::minimal()), "\u{FEFF}x\n");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let input = "\u{FEFF}# 제목 \r\n\u{3000}⭐ 중요\r\n";
        let once = cleanup_default(input);
        assert_eq!(cleanup_default(&once), once);
    }
}
