//! Turns arbitrary text into names that are safe to use as a single path
//! component.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^0-9A-Za-z\-\._ ]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref UNDERSCORES: Regex = Regex::new(r"_+").unwrap();
}

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

pub const FOLDER_PLACEHOLDER: &str = "val";
pub const FILE_PLACEHOLDER: &str = "row";

fn replace_unsafe(text: &str) -> String {
    let text = DISALLOWED.replace_all(text, "_");
    let text = WHITESPACE.replace_all(&text, "_");
    UNDERSCORES.replace_all(&text, "_").into_owned()
}

// Only ASCII survives `replace_unsafe`, so byte truncation is safe.
fn truncate(mut name: String, max_len: usize) -> String {
    if name.len() > max_len {
        name.truncate(max_len);
    }
    name
}

/// Folder-name variant: trims `.` and `_` from both ends, falls back to `val`.
pub fn sanitize_folder_name(name: &str, max_len: usize) -> String {
    let cleaned = replace_unsafe(name.trim());
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    let cleaned = if cleaned.is_empty() {
        FOLDER_PLACEHOLDER.to_string()
    } else {
        cleaned.to_string()
    };
    truncate(cleaned, max_len)
}

/// File-name variant: flattens control whitespace, guards reserved device
/// names and falls back to `row`.
pub fn sanitize_filename(text: &str, max_len: usize) -> String {
    let flattened = text.replace(['\n', '\r', '\t'], " ");
    let cleaned = replace_unsafe(&flattened);
    let mut cleaned = cleaned.trim_matches('_').to_string();

    if is_reserved(&cleaned) {
        cleaned = format!("_{}_", cleaned);
    }

    if cleaned.is_empty() {
        cleaned = FILE_PLACEHOLDER.to_string();
    }
    truncate(cleaned, max_len)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Joins the cells of a CSV row with commas and sanitizes the result.
pub fn row_to_name<S: AsRef<str>>(cells: &[S], max_len: usize) -> String {
    let raw = cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    sanitize_filename(&raw, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ')
    }

    #[test]
    fn test_filename_basic() {
        assert_eq!(sanitize_filename("1.5,2,abc", 200), "1.5_2_abc");
        assert_eq!(sanitize_filename("  hello   world  ", 200), "hello_world");
        assert_eq!(sanitize_filename("a\tb\nc\rd", 200), "a_b_c_d");
    }

    #[test]
    fn test_filename_collapses_and_strips_underscores() {
        assert_eq!(sanitize_filename("__a___b__", 200), "a_b");
        assert_eq!(sanitize_filename("a/:*?b", 200), "a_b");
    }

    #[test]
    fn test_filename_placeholder() {
        assert_eq!(sanitize_filename("", 200), "row");
        assert_eq!(sanitize_filename("///", 200), "row");
        assert_eq!(sanitize_filename("日本語", 200), "row");
    }

    #[test]
    fn test_filename_reserved_names() {
        assert_eq!(sanitize_filename("CON", 200), "_CON_");
        assert_eq!(sanitize_filename("lpt3", 200), "_lpt3_");
        assert_eq!(sanitize_filename("Nul", 200), "_Nul_");
        assert_eq!(sanitize_filename("CONSOLE", 200), "CONSOLE");
        assert_eq!(sanitize_filename("COM10", 200), "COM10");
    }

    #[test]
    fn test_filename_length_cap() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_filename(&long, 200).len(), 200);
        assert_eq!(sanitize_filename(&long, 5), "aaaaa");
    }

    #[test]
    fn test_placeholder_respects_length_cap() {
        assert_eq!(sanitize_filename("", 1), "r");
        assert_eq!(sanitize_filename("///", 2), "ro");
        assert_eq!(sanitize_folder_name("", 2), "va");
    }

    #[test]
    fn test_sanitized_output_properties() {
        let inputs = [
            "",
            " ",
            "x,y,z",
            "_._",
            "weird 名前 \u{3000} tabs\t\t",
            "../../etc/passwd",
            "a  _  b",
            "12.5,-3.25,nan,",
            "CON",
        ];
        for input in inputs {
            for max_len in [1, 4, 200] {
                for out in [
                    sanitize_filename(input, max_len),
                    sanitize_folder_name(input, max_len),
                ] {
                    assert!(!out.is_empty(), "empty for {:?}", input);
                    assert!(out.len() <= max_len, "too long for {:?}", input);
                    assert!(out.chars().all(is_allowed), "bad char in {:?}", out);
                    assert!(!out.contains("__"), "double underscore in {:?}", out);
                }
            }
        }
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(sanitize_folder_name("  450.25 ", 200), "450.25");
        assert_eq!(sanitize_folder_name("._hidden_.", 200), "hidden");
        assert_eq!(sanitize_folder_name("...", 200), "val");
        assert_eq!(sanitize_folder_name("a b/c", 200), "a_b_c");
    }

    #[test]
    fn test_row_to_name() {
        let row = vec!["0.0", "1.5", "-2", "label text"];
        assert_eq!(row_to_name(&row, 200), "0.0_1.5_-2_label_text");
        let empty: Vec<String> = Vec::new();
        assert_eq!(row_to_name(&empty, 200), "row");
    }
}
