//! Backup selection patterns
//!
//! An ordered list of include/exclude rules persisted one per line in the
//! `patterns` file:
//!
//! ```text
//! # User's Documents
//! +/home/joe/Documents
//! -**/*.bak
//! ```
//!
//! A `#` line describes the rule that follows it. Order matters: the backup
//! engine lets later rules override earlier ones.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::MinarcaError;
use crate::models::{Pattern, Platform};
use crate::storage::{read_utf8, write_atomic};

/// Ordered include/exclude rules bound to one file
#[derive(Debug, Clone, PartialEq)]
pub struct Patterns {
    path: PathBuf,
    patterns: Vec<Pattern>,
}

/// Line parser holding the comment waiting for its rule
#[derive(Debug, Default)]
struct PatternParser {
    pending_comment: Option<String>,
    patterns: Vec<Pattern>,
}

impl PatternParser {
    fn feed(&mut self, line_number: usize, raw: &str) -> Result<(), MinarcaError> {
        let line = raw.trim_end();

        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            self.pending_comment = (!comment.is_empty()).then(|| comment.to_string());
            return Ok(());
        }

        let include = match line.chars().next() {
            Some('+') => true,
            Some('-') => false,
            _ => return Err(MinarcaError::invalid_pattern(line_number, line)),
        };
        let pattern = &line[1..];
        if pattern.is_empty() {
            return Err(MinarcaError::invalid_pattern(line_number, line));
        }

        self.patterns.push(Pattern {
            include,
            pattern: pattern.to_string(),
            comment: self.pending_comment.take(),
        });
        Ok(())
    }

    fn finish(self) -> Vec<Pattern> {
        self.patterns
    }
}

/// Parse the content of a patterns file
///
/// # Errors
///
/// Returns [`MinarcaError::InvalidPattern`] with the offending line for any
/// line that is neither a `#` comment nor a `+`/`-` rule.
pub fn parse(text: &str) -> Result<Vec<Pattern>, MinarcaError> {
    let mut parser = PatternParser::default();
    for (idx, line) in text.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }
    Ok(parser.finish())
}

/// Write rules in the patterns file format
pub fn write<W: Write>(writer: &mut W, patterns: &[Pattern]) -> std::io::Result<()> {
    for pattern in patterns {
        if let Some(comment) = pattern.comment.as_deref().map(str::trim) {
            if !comment.is_empty() {
                writeln!(writer, "# {}", comment)?;
            }
        }
        writeln!(writer, "{}", pattern)?;
    }
    Ok(())
}

/// Default rules for a platform
///
/// `home` is the user's home directory and `temp` the temporary directory,
/// both as native paths.
pub fn default_patterns(platform: Platform, home: &str, temp: &str) -> Vec<Pattern> {
    let mut patterns =
        vec![Pattern::include(platform.join(home, "Documents")).with_comment("User's Documents")];

    let excludes: Vec<(&str, &str)> = match platform {
        Platform::Windows => vec![
            ("**/Thumbs.db", "Thumbnails cache"),
            ("C:/pagefile.sys", "Swap file"),
            ("C:/Recovery/", "System Recovery"),
            ("C:/$Recycle.Bin/", "Recycle bin"),
            (temp, "Temporary Folder"),
            ("**/*.bak", "AutoCAD backup files"),
            ("**/~$*", "Office temporary files"),
        ],
        Platform::MacOs => vec![],
        Platform::Linux => vec![
            ("/dev", "dev filesystem"),
            ("/proc", "proc filesystem"),
            ("/sys", "sys filesystem"),
            ("/tmp", "Temporary Folder"),
            ("/run", "Volatile program files"),
            ("/mnt", "Mounted filesystems"),
            ("/media", "External media"),
            ("**/lost+found", "Ext4 Lost and Found"),
            ("**/.~*", "Hidden temporary files"),
            ("**/*~", "Vim Temporary files"),
        ],
    };

    patterns.extend(
        excludes
            .into_iter()
            .map(|(pattern, comment)| Pattern::exclude(pattern).with_comment(comment)),
    );
    patterns
}

/// Split rules per filesystem root
///
/// On platforms with drive letters, every drive named by an include rule
/// becomes a root, in first-seen order. Each root receives the rules without a
/// drive plus the rules on that drive, with forward slashes and no comments.
/// Elsewhere a non-empty list yields a single `/` root with every rule.
pub fn group_by_roots(platform: Platform, patterns: &[Pattern]) -> Vec<(String, Vec<Pattern>)> {
    if !platform.has_multiple_roots() {
        if patterns.is_empty() {
            return Vec::new();
        }
        return vec![("/".to_string(), patterns.to_vec())];
    }

    let mut roots: Vec<String> = Vec::new();
    for pattern in patterns.iter().filter(|p| p.include) {
        if let Some(drive) = pattern.drive() {
            let drive = drive.replace('\\', "/");
            if !roots.contains(&drive) {
                roots.push(drive);
            }
        }
    }

    roots
        .into_iter()
        .map(|root| {
            let sublist = patterns
                .iter()
                .map(Pattern::normalized)
                .filter(|p| p.drive().is_none() || p.pattern.starts_with(&root))
                .collect();
            (root, sublist)
        })
        .collect()
}

impl Patterns {
    /// Empty pattern list bound to `path` but not loaded
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            patterns: Vec::new(),
        }
    }

    /// Bind to `path` and load its content
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MinarcaError> {
        let mut patterns = Self::new(path);
        patterns.load()?;
        Ok(patterns)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory rules with the file content
    ///
    /// A missing file leaves the list empty. On a parse error the in-memory
    /// rules are left untouched.
    pub fn load(&mut self) -> Result<(), MinarcaError> {
        let patterns = match read_utf8(&self.path)? {
            Some(text) => parse(&text)?,
            None => Vec::new(),
        };
        tracing::debug!(path = %self.path.display(), count = patterns.len(), "patterns loaded");
        self.patterns = patterns;
        Ok(())
    }

    /// Write the rules to disk
    pub fn save(&self) -> Result<(), MinarcaError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        write_atomic(&self.path, &buffer)?;
        tracing::debug!(path = %self.path.display(), count = self.patterns.len(), "patterns saved");
        Ok(())
    }

    /// Write the rules in file format to `writer`
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), MinarcaError> {
        write(writer, &self.patterns)?;
        Ok(())
    }

    /// Replace the rules with the defaults of the current platform
    ///
    /// Not persisted until [`Patterns::save`] is called.
    pub fn restore_defaults(&mut self) -> Result<(), MinarcaError> {
        let home = crate::config::paths::home_dir()?;
        let temp = std::env::temp_dir();
        self.restore_defaults_for(
            Platform::current(),
            &home.to_string_lossy(),
            &temp.to_string_lossy(),
        );
        Ok(())
    }

    /// Replace the rules with the defaults of `platform`
    pub fn restore_defaults_for(&mut self, platform: Platform, home: &str, temp: &str) {
        self.patterns = default_patterns(platform, home, temp);
    }

    /// Rules grouped per filesystem root of the current platform
    pub fn group_by_roots(&self) -> Vec<(String, Vec<Pattern>)> {
        group_by_roots(Platform::current(), &self.patterns)
    }

    /// Rules grouped per filesystem root of `platform`
    pub fn group_by_roots_for(&self, platform: Platform) -> Vec<(String, Vec<Pattern>)> {
        group_by_roots(platform, &self.patterns)
    }

    /// Add a rule, replacing in place any rule with the same path
    pub fn add(&mut self, pattern: Pattern) {
        match self.patterns.iter_mut().find(|p| p.pattern == pattern.pattern) {
            Some(existing) => *existing = pattern,
            None => self.patterns.push(pattern),
        }
    }

    /// Remove the rule with the given path, returning it
    pub fn remove(&mut self, path: &str) -> Option<Pattern> {
        let idx = self.patterns.iter().position(|p| p.pattern == path)?;
        Some(self.patterns.remove(idx))
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Patterns {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "# User's Documents\n+/home/joe/Documents\n-/home/joe/Documents/cache\n# Vim Temporary files\n-**/*~\n";

    fn to_text(patterns: &[Pattern]) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer, patterns).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_parse() {
        let patterns = parse(SAMPLE).unwrap();
        assert_eq!(
            patterns,
            vec![
                Pattern::include("/home/joe/Documents").with_comment("User's Documents"),
                Pattern::exclude("/home/joe/Documents/cache"),
                Pattern::exclude("**/*~").with_comment("Vim Temporary files"),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(to_text(&parse(SAMPLE).unwrap()), SAMPLE);

        let windows = "# Swap file\n-C:/pagefile.sys\n+C:\\Users\\joe\n+D:/\n";
        assert_eq!(to_text(&parse(windows).unwrap()), windows);
    }

    #[test]
    fn test_comments_are_normalized_on_write() {
        let patterns = parse("#comment\n+/a\n").unwrap();
        assert_eq!(to_text(&patterns), "# comment\n+/a\n");

        let stacked = parse("# first\n#second\n#\n# last\n-/b\n").unwrap();
        assert_eq!(to_text(&stacked), "# last\n-/b\n");

        let empty = parse("# dropped\n#\n+/c\n").unwrap();
        assert_eq!(to_text(&empty), "+/c\n");
    }

    #[test]
    fn test_trailing_whitespace_is_stripped() {
        let patterns = parse("#  spaced comment  \n+/home \t\r\n").unwrap();
        assert_eq!(patterns, vec![Pattern::include("/home").with_comment("spaced comment")]);
        assert_eq!(to_text(&patterns), "# spaced comment\n+/home\n");
    }

    #[test]
    fn test_comment_attaches_to_next_rule_only() {
        let patterns = parse("# first\n# second\n+/a\n+/b\n# dangling\n").unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].comment.as_deref(), Some("second"));
        assert_eq!(patterns[1].comment, None);
    }

    #[test]
    fn test_invalid_line() {
        let err = parse("+/home\n*/etc\n").unwrap_err();
        match err {
            MinarcaError::InvalidPattern { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "*/etc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_and_empty_rules_are_invalid() {
        assert!(parse("+/home\n\n-/tmp\n").unwrap_err().is_invalid_pattern());
        assert!(parse("+\n").unwrap_err().is_invalid_pattern());
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let patterns = Patterns::open(temp_dir.path().join("patterns")).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_load_error_keeps_previous_rules() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("patterns");
        fs::write(&path, "+/home\n").unwrap();

        let mut patterns = Patterns::open(&path).unwrap();
        fs::write(&path, "+/home\nbroken\n").unwrap();

        assert!(patterns.load().unwrap_err().is_invalid_pattern());
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("patterns");

        let mut patterns = Patterns::new(&path);
        patterns.restore_defaults_for(Platform::Linux, "/home/joe", "/tmp");
        patterns.save().unwrap();

        let loaded = Patterns::open(&path).unwrap();
        assert_eq!(loaded, patterns);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("# User's Documents\n+/home/joe/Documents\n"));
    }

    #[test]
    fn test_defaults_per_platform() {
        let linux = default_patterns(Platform::Linux, "/home/joe", "/tmp");
        assert_eq!(linux.len(), 11);
        assert_eq!(
            linux[0],
            Pattern::include("/home/joe/Documents").with_comment("User's Documents")
        );
        assert!(linux[1..].iter().all(|p| !p.include));

        let windows = default_patterns(
            Platform::Windows,
            "C:\\Users\\joe",
            "C:\\Users\\joe\\AppData\\Local\\Temp",
        );
        assert_eq!(windows.len(), 8);
        assert_eq!(windows[0].pattern, "C:\\Users\\joe\\Documents");
        assert!(windows
            .iter()
            .any(|p| p.pattern == "C:\\Users\\joe\\AppData\\Local\\Temp" && !p.include));

        let mac = default_patterns(Platform::MacOs, "/Users/joe", "/tmp");
        assert_eq!(mac, vec![Pattern::include("/Users/joe/Documents").with_comment("User's Documents")]);
    }

    #[test]
    fn test_restore_defaults_replaces_rules() {
        let mut patterns = Patterns::new("unused");
        patterns.add(Pattern::include("/srv"));
        patterns.restore_defaults_for(Platform::MacOs, "/Users/joe", "/tmp");
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns.as_slice()[0].pattern, "/Users/joe/Documents");
    }

    #[test]
    fn test_group_by_roots_multiple_drives() {
        let patterns = vec![
            Pattern::include("C:/Users/x").with_comment("User"),
            Pattern::exclude("D:/Temp"),
            Pattern::include("D:\\Data"),
            Pattern::exclude("**/*.bak"),
        ];

        let groups = group_by_roots(Platform::Windows, &patterns);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].0, "C:/");
        assert_eq!(
            groups[0].1,
            vec![Pattern::include("C:/Users/x"), Pattern::exclude("**/*.bak")]
        );

        assert_eq!(groups[1].0, "D:/");
        assert_eq!(
            groups[1].1,
            vec![
                Pattern::exclude("D:/Temp"),
                Pattern::include("D:/Data"),
                Pattern::exclude("**/*.bak"),
            ]
        );

        for (root, rules) in &groups {
            assert!(rules.iter().all(|p| p.drive().map_or(true, |d| d == root.as_str())));
        }
    }

    #[test]
    fn test_group_by_roots_ignores_drives_of_excludes() {
        let patterns = vec![Pattern::include("C:/Users/x"), Pattern::exclude("E:/")];
        let groups = group_by_roots(Platform::Windows, &patterns);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], ("C:/".to_string(), vec![Pattern::include("C:/Users/x")]));
    }

    #[test]
    fn test_group_by_roots_first_seen_order() {
        let patterns = vec![
            Pattern::include("E:\\Photos"),
            Pattern::include("C:/Users"),
            Pattern::include("E:/Music"),
        ];
        let roots: Vec<String> = group_by_roots(Platform::Windows, &patterns)
            .into_iter()
            .map(|(root, _)| root)
            .collect();
        assert_eq!(roots, vec!["E:/", "C:/"]);
    }

    #[test]
    fn test_group_by_roots_single_root() {
        let patterns = parse(SAMPLE).unwrap();
        let groups = group_by_roots(Platform::Linux, &patterns);
        assert_eq!(groups, vec![("/".to_string(), patterns.clone())]);

        assert!(group_by_roots(Platform::Linux, &[]).is_empty());
        assert!(group_by_roots(Platform::MacOs, &[]).is_empty());
        assert!(group_by_roots(Platform::Windows, &[]).is_empty());
    }

    #[test]
    fn test_add_replaces_same_path() {
        let mut patterns = Patterns::new("unused");
        patterns.add(Pattern::include("/home"));
        patterns.add(Pattern::exclude("/tmp"));
        patterns.add(Pattern::exclude("/home"));

        assert_eq!(
            patterns.as_slice(),
            &[Pattern::exclude("/home"), Pattern::exclude("/tmp")]
        );
        assert_eq!(patterns.remove("/tmp"), Some(Pattern::exclude("/tmp")));
        assert_eq!(patterns.remove("/tmp"), None);
        assert_eq!(patterns.len(), 1);
    }
}
