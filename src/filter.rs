//! Basename filtering: required and negated regex sets.
//!
//! A [`FilterSet`] is compiled once at startup and is immutable for the
//! rest of the run. Matching is search-style (unanchored) against the
//! basename only, never the parent directories.

use regex::{Regex, RegexBuilder};

/// Byte-offset range of one regex match within a basename.
pub type MatchSpan = (usize, usize);

/// Which entry kinds are eligible for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Dirs,
    Files,
}

impl TypeFilter {
    pub fn admits(self, is_dir: bool) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Dirs => is_dir,
            TypeFilter::Files => !is_dir,
        }
    }
}

/// Compiled required and negated patterns with uniform case sensitivity.
///
/// A basename is accepted iff every required pattern matches somewhere in
/// it and no negated pattern does. An empty required set matches
/// everything; negated patterns still apply.
pub struct FilterSet {
    required: Vec<Regex>,
    negated: Vec<Regex>,
}

impl FilterSet {
    /// Compile both pattern sets. Case sensitivity applies uniformly to
    /// required and negated patterns. The first pattern that fails to
    /// compile aborts construction.
    pub fn new(
        required: &[String],
        negated: &[String],
        case_sensitive: bool,
    ) -> Result<Self, regex::Error> {
        let compile = |pattern: &String| {
            RegexBuilder::new(pattern)
                .case_insensitive(!case_sensitive)
                .build()
        };
        Ok(Self {
            required: required.iter().map(compile).collect::<Result<_, _>>()?,
            negated: negated.iter().map(compile).collect::<Result<_, _>>()?,
        })
    }

    fn rejected_by_negated(&self, basename: &str) -> bool {
        self.negated.iter().any(|re| re.is_match(basename))
    }

    /// Plain accept/reject: one existence check per pattern, short-circuit
    /// on the first failing required pattern or first matching negated one.
    pub fn accept(&self, basename: &str) -> bool {
        self.required.iter().all(|re| re.is_match(basename))
            && !self.rejected_by_negated(basename)
    }

    /// Accept/reject while collecting every non-overlapping match of each
    /// required pattern, for highlighting. Returns `None` on rejection.
    ///
    /// The decision is always identical to [`accept`]; only the rendering
    /// may differ between the two paths.
    pub fn accept_with_spans(&self, basename: &str) -> Option<Vec<MatchSpan>> {
        let mut spans = Vec::new();
        for re in &self.required {
            let before = spans.len();
            spans.extend(re.find_iter(basename).map(|m| (m.start(), m.end())));
            if spans.len() == before {
                return None;
            }
        }
        if self.rejected_by_negated(basename) {
            return None;
        }
        Some(spans)
    }
}
