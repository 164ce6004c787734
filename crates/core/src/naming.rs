//! Filesystem-safe names for split outputs.
//!
//! Every function takes the bookmark's 0-based position in the flat list as
//! an explicit argument, so names depend only on `(title, position)`.

use std::collections::HashSet;

/// Keep alphanumerics, spaces, `_` and `-`, then trim.
///
/// An empty result becomes `untitled_<position>`.
pub fn sanitize_title(title: &str, position: usize) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let trimmed = kept.trim();

    if trimmed.is_empty() {
        format!("untitled_{}", position)
    } else {
        trimmed.to_string()
    }
}

/// Prefix a safe title with its 1-based sequence number (`01_`, `02_`, ...).
pub fn with_sequence_index(safe_title: &str, position: usize) -> String {
    format!("{:02}_{}", position + 1, safe_title)
}

/// Safe title for the flat-list entry at `position`.
pub fn flat_title(title: &str, position: usize, add_index: bool) -> String {
    let safe = sanitize_title(title, position);
    if add_index {
        with_sequence_index(&safe, position)
    } else {
        safe
    }
}

/// Turn safe titles into `.pdf` file names that do not collide.
///
/// The first occurrence keeps `<title>.pdf`; later duplicates get `_2`, `_3`,
/// and so on. Comparison ignores ASCII case so the result is also safe on
/// case-insensitive filesystems.
pub fn unique_file_names<S: AsRef<str>>(safe_titles: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(safe_titles.len());

    for title in safe_titles {
        let title = title.as_ref();
        let mut candidate = format!("{}.pdf", title);
        let mut suffix = 2;
        while !taken.insert(candidate.to_ascii_lowercase()) {
            candidate = format!("{}_{}.pdf", title, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize_title("Chapter 1 - Intro_A", 0), "Chapter 1 - Intro_A");
    }

    #[test]
    fn test_sanitize_strips_punctuation_and_trims() {
        assert_eq!(sanitize_title("  1.2: What/Why?  ", 0), "12 WhatWhy");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_title("제1장. 소개", 0), "제1장 소개");
        assert_eq!(sanitize_title("Überblick!", 0), "Überblick");
    }

    #[test]
    fn test_sanitize_empty_uses_position() {
        assert_eq!(sanitize_title("", 0), "untitled_0");
        assert_eq!(sanitize_title("?!/\\:*", 7), "untitled_7");
        assert_eq!(sanitize_title("   ", 3), "untitled_3");
    }

    #[test]
    fn test_sanitize_placeholder_ignores_neighbours() {
        let titles = ["***", "Valid", "###", "..."];
        let safe: Vec<String> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| sanitize_title(t, i))
            .collect();
        assert_eq!(safe, vec!["untitled_0", "Valid", "untitled_2", "untitled_3"]);
    }

    #[test]
    fn test_sequence_index_is_two_digits_one_based() {
        assert_eq!(with_sequence_index("Intro", 0), "01_Intro");
        assert_eq!(with_sequence_index("Outro", 9), "10_Outro");
        assert_eq!(with_sequence_index("Far", 120), "121_Far");
    }

    #[test]
    fn test_flat_title() {
        assert_eq!(flat_title("Intro!", 1, false), "Intro");
        assert_eq!(flat_title("Intro!", 1, true), "02_Intro");
        assert_eq!(flat_title("!!", 4, true), "05_untitled_4");
    }

    #[test]
    fn test_unique_file_names() {
        let names = unique_file_names(&["Intro", "Body", "Intro", "intro", "Intro_2"]);
        assert_eq!(
            names,
            vec![
                "Intro.pdf",
                "Body.pdf",
                "Intro_2.pdf",
                "intro_3.pdf",
                "Intro_2_2.pdf"
            ]
        );
    }

    #[test]
    fn test_unique_file_names_empty() {
        let names = unique_file_names::<&str>(&[]);
        assert!(names.is_empty());
    }
}
