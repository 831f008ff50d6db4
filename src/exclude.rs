//! Exclusion rules for directories and files.
//!
//! A rule set is an ordered list of shell-style glob patterns. Each pattern
//! is used two ways by the mirror: as a literal name (exact equality) and as
//! a glob matched against every segment of a destination path.

use std::path::{Path, MAIN_SEPARATOR};

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    /// `None` when not even the literal form compiles; such a rule only
    /// takes part in exact matching.
    matcher: Option<GlobMatcher>,
}

/// Ordered, immutable set of exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<Rule>,
}

fn compile(glob: &str) -> Result<GlobMatcher, globset::Error> {
    // fnmatch-Semantik: Backslash ist ein normales Zeichen, kein Escape
    Ok(GlobBuilder::new(glob)
        .literal_separator(false)
        .backslash_escape(false)
        .build()?
        .compile_matcher())
}

/// Index of the `]` closing the bracket expression opened at `start`, using
/// fnmatch rules: a leading `!` negates and a `]` right after it is literal.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Rewrites an fnmatch pattern into globset syntax.
///
/// Braces are literal in fnmatch, and a `[` without a closing `]` matches
/// itself, so both are wrapped in one-character classes.
fn fnmatch_to_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut glob = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '{' => glob.push_str("[{]"),
            '}' => glob.push_str("[}]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    glob.extend(&chars[i..=end]);
                    i = end;
                }
                None => glob.push_str("[[]"),
            },
            c => glob.push(c),
        }
        i += 1;
    }
    glob
}

impl ExclusionRules {
    /// Compiles the given patterns, keeping their order.
    ///
    /// Blank patterns are ignored. A pattern globset cannot compile even
    /// after the fnmatch rewrite is matched as a literal name.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Vec::new();
        for p in patterns {
            let pattern: String = p.into();
            if pattern.trim().is_empty() {
                continue;
            }
            let matcher = match compile(&fnmatch_to_glob(&pattern)) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "pattern matched literally");
                    compile(&globset::escape(&pattern)).ok()
                }
            };
            rules.push(Rule { pattern, matcher });
        }
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// The patterns in rule order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.pattern.as_str())
    }

    /// True if `name` is literally equal to one of the patterns.
    pub fn matches_exact(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.pattern == name)
    }

    /// Returns the first pattern, in rule order, that matches any segment of
    /// the string form of `path`.
    pub fn first_segment_match(&self, path: &Path) -> Option<&str> {
        if self.rules.is_empty() {
            return None;
        }
        let s = path.to_string_lossy();
        let segments: Vec<&str> = s
            .split(|c: char| c == '/' || c == MAIN_SEPARATOR)
            .filter(|seg| !seg.is_empty())
            .collect();
        self.rules
            .iter()
            .find(|r| {
                r.matcher
                    .as_ref()
                    .is_some_and(|m| segments.iter().any(|seg| m.is_match(seg)))
            })
            .map(|r| r.pattern.as_str())
    }
}
