//! Pattern display formatting
//!
//! Formats selection rules for terminal output.

use crate::models::Pattern;

/// Format rules one per line, with their description aligned on the right
pub fn format_pattern_list(patterns: &[Pattern]) -> String {
    if patterns.is_empty() {
        return "No patterns defined.".to_string();
    }

    let width = patterns
        .iter()
        .map(|p| p.pattern.chars().count() + 1)
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for pattern in patterns {
        match pattern.comment.as_deref() {
            Some(comment) => output.push_str(&format!(
                "{:<width$}  # {}\n",
                pattern.to_string(),
                comment,
                width = width
            )),
            None => output.push_str(&format!("{}\n", pattern)),
        }
    }
    output
}

/// Format rules grouped per filesystem root
pub fn format_root_groups(groups: &[(String, Vec<Pattern>)]) -> String {
    if groups.is_empty() {
        return "Nothing to back up.".to_string();
    }

    let mut output = String::new();
    for (root, patterns) in groups {
        output.push_str(&format!("{}\n", root));
        for pattern in patterns {
            output.push_str(&format!("  {}\n", pattern));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pattern_list() {
        let patterns = vec![
            Pattern::include("/home/joe").with_comment("Home"),
            Pattern::exclude("/tmp"),
        ];
        assert_eq!(
            format_pattern_list(&patterns),
            "+/home/joe  # Home\n-/tmp\n"
        );
        assert_eq!(format_pattern_list(&[]), "No patterns defined.");
    }

    #[test]
    fn test_format_root_groups() {
        let groups = vec![
            ("C:/".to_string(), vec![Pattern::include("C:/Users")]),
            ("D:/".to_string(), vec![Pattern::include("D:/Data"), Pattern::exclude("**/*.bak")]),
        ];
        assert_eq!(
            format_root_groups(&groups),
            "C:/\n  +C:/Users\nD:/\n  +D:/Data\n  -**/*.bak\n"
        );
    }
}
