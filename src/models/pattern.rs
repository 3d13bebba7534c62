//! Include/exclude selection rule
//!
//! A pattern is either an absolute path or a glob. Its serialized form is the
//! path prefixed with `+` (include) or `-` (exclude).

use serde::Serialize;
use std::fmt;

/// A single include or exclude rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    /// `true` to include matching paths, `false` to exclude them
    pub include: bool,
    /// Absolute path or glob
    pub pattern: String,
    /// Optional description, written as a `#` line before the rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Pattern {
    /// Create a rule without a comment
    pub fn new(include: bool, pattern: impl Into<String>) -> Self {
        Self {
            include,
            pattern: pattern.into(),
            comment: None,
        }
    }

    /// Create an include rule
    pub fn include(pattern: impl Into<String>) -> Self {
        Self::new(true, pattern)
    }

    /// Create an exclude rule
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self::new(false, pattern)
    }

    /// Attach a comment to this rule
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check if the pattern is a glob rather than a plain path
    pub fn is_wildcard(&self) -> bool {
        self.pattern.contains('*') || self.pattern.contains('?')
    }

    /// The `+`/`-` prefix of the serialized rule
    pub fn prefix(&self) -> char {
        if self.include {
            '+'
        } else {
            '-'
        }
    }

    /// Leading drive token such as `C:\` or `D:/`, if any
    pub fn drive(&self) -> Option<&str> {
        let bytes = self.pattern.as_bytes();
        match bytes {
            [letter, b':', sep, ..] if letter.is_ascii_uppercase() && (*sep == b'\\' || *sep == b'/') => {
                Some(&self.pattern[..3])
            }
            _ => None,
        }
    }

    /// Copy of this rule with backslashes turned into forward slashes and no comment
    pub fn normalized(&self) -> Self {
        Self::new(self.include, self.pattern.replace('\\', "/"))
    }
}

/// Serialized rule line, without the comment
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.pattern)
    }
}
