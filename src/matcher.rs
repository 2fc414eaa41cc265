//! Pattern matching core: applies one rule's regex across a resolved corpus
//! and extracts line-level context for each hit.

use crate::corpus::SourceFile;
use crate::rules::Rule;
use tracing::trace;

/// How many matches a rule may contribute per file.
///
/// Every aggregator in this crate scans in [`MatchMode::PresenceOnly`]: a
/// rule firing five times in one file still yields one match, because the
/// report cares about *which* files exhibit a condition, not how often.
/// [`MatchMode::AllOccurrences`] is the occurrence-counting alternative,
/// kept so the distinction stays explicit at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    PresenceOnly,
    AllOccurrences,
}

/// One hit of a rule in one file.
///
/// `line` and `snippet` are None when the matched text spans multiple lines,
/// in which case no single source line contains it. That precision loss is
/// inherent to line-based (not AST-based) scanning.
#[derive(Debug, Clone)]
pub struct Match {
    /// Path relative to the project root.
    pub file: String,
    /// 1-based line number of the first line containing the matched text.
    pub line: Option<usize>,
    /// The trimmed source line containing the matched text.
    pub snippet: Option<String>,
    /// Capture group 1, when the rule's pattern defines one.
    pub capture: Option<String>,
}

/// Applies rules to a corpus.
pub struct PatternMatcher<'a> {
    corpus: &'a [SourceFile],
    mode: MatchMode,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(corpus: &'a [SourceFile]) -> Self {
        Self {
            corpus,
            mode: MatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Scan the corpus with one rule. Matches are yielded in corpus order.
    pub fn run(&self, rule: &Rule) -> Vec<Match> {
        let mut matches = Vec::new();

        for file in self.corpus {
            match self.mode {
                MatchMode::PresenceOnly => {
                    if let Some(m) = first_match(rule, file) {
                        matches.push(m);
                    }
                }
                MatchMode::AllOccurrences => {
                    matches.extend(all_matches(rule, file));
                }
            }
        }

        trace!(rule = rule.id, matches = matches.len(), "rule scan complete");
        matches
    }
}

fn first_match(rule: &Rule, file: &SourceFile) -> Option<Match> {
    let caps = rule.pattern.captures(&file.content)?;
    let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let (line, snippet) = locate_line(&file.content, matched);

    Some(Match {
        file: file.path.clone(),
        line,
        snippet,
        capture: caps.get(1).map(|c| c.as_str().to_string()),
    })
}

fn all_matches(rule: &Rule, file: &SourceFile) -> Vec<Match> {
    rule.pattern
        .captures_iter(&file.content)
        .map(|caps| {
            let m = caps.get(0).expect("capture group 0 always present");
            let (line, snippet) = if m.as_str().is_empty() || m.as_str().contains('\n') {
                (None, None)
            } else {
                let line = line_at_offset(&file.content, m.start());
                let snippet = file
                    .content
                    .lines()
                    .nth(line - 1)
                    .map(|l| l.trim().to_string());
                (Some(line), snippet)
            };
            Match {
                file: file.path.clone(),
                line,
                snippet,
                capture: caps.get(1).map(|c| c.as_str().to_string()),
            }
        })
        .collect()
}

/// Find the first line (top to bottom) containing the matched text.
fn locate_line(content: &str, matched: &str) -> (Option<usize>, Option<String>) {
    if matched.is_empty() || matched.contains('\n') {
        return (None, None);
    }

    for (idx, line) in content.lines().enumerate() {
        if line.contains(matched) {
            return (Some(idx + 1), Some(line.trim().to_string()));
        }
    }

    (None, None)
}

fn line_at_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
