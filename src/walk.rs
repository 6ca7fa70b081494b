//! Lazy depth-first directory traversal with depth bounds and pruning.
//!
//! [`Walker`] yields a pre-order sequence of [`WalkEvent`]s: one
//! [`Entry`](WalkEvent::Entry) per filesystem entry, and one
//! [`Error`](WalkEvent::Error) per directory that could not be listed.
//! Unreadable subtrees are skipped, never represented by placeholder
//! entries, and never abort the walk.
//!
//! Depth convention: the root is depth 0 and is never yielded; entries
//! directly inside it are depth 1. Entries within one directory come back
//! in operating-system listing order, which is not deterministic.
//!
//! The walker holds one open `ReadDir` handle per level of the current
//! descent path and reads nothing ahead of what the consumer pulls, so
//! memory stays proportional to tree depth rather than tree size.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// Depth bounds and pruning for a traversal.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Entries shallower than this are skipped (but still descended into).
    pub min_depth: usize,
    /// Caps both emission and descent; `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Glob patterns matched against basenames. Matching entries are
    /// neither yielded nor descended into. Invalid globs match nothing.
    pub prune: Vec<String>,
}

/// A filesystem entry produced by [`Walker`].
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    /// Levels below the traversal root (root children are 1).
    pub depth: usize,
    pub is_dir: bool,
}

impl Entry {
    /// Final path component, lossily converted for matching.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A recoverable traversal failure: a directory or entry could not be read.
#[derive(Debug)]
pub struct WalkError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot access '{}': {}", self.path.display(), self.source)
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// One traversal event: a normal entry or a recoverable error.
#[derive(Debug)]
pub enum WalkEvent {
    Entry(Entry),
    Error(WalkError),
}

/// One open directory on the descent path.
struct Frame {
    dir: PathBuf,
    entries: fs::ReadDir,
    /// Depth of the entries this frame produces.
    depth: usize,
}

/// Pull-driven depth-first walker.
///
/// Construction fails if the root itself cannot be listed; every later
/// failure is reported through [`WalkEvent::Error`] instead.
pub struct Walker {
    config: WalkConfig,
    prune: Vec<Pattern>,
    descend: Option<Box<dyn Fn(&Path) -> bool>>,
    stack: Vec<Frame>,
    pending: VecDeque<WalkEvent>,
}

impl Walker {
    pub fn new(root: &Path, config: WalkConfig) -> io::Result<Self> {
        let entries = fs::read_dir(root)?;
        let prune = config
            .prune
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Ok(Self {
            config,
            prune,
            descend: None,
            stack: vec![Frame {
                dir: root.to_path_buf(),
                entries,
                depth: 1,
            }],
            pending: VecDeque::new(),
        })
    }

    /// Restrict descent: directories failing the predicate are still
    /// yielded but never entered.
    pub fn with_descend(mut self, predicate: impl Fn(&Path) -> bool + 'static) -> Self {
        self.descend = Some(Box::new(predicate));
        self
    }

    fn in_bounds(&self, depth: usize) -> bool {
        depth >= self.config.min_depth
            && self.config.max_depth.is_none_or(|max| depth <= max)
    }

    fn should_descend(&self, path: &Path, depth: usize) -> bool {
        self.config.max_depth.is_none_or(|max| depth < max)
            && self.descend.as_ref().is_none_or(|f| f(path))
    }

    fn should_prune(&self, path: &Path) -> bool {
        if self.prune.is_empty() {
            return false;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.prune.iter().any(|p| p.matches(&name))
    }
}

impl Iterator for Walker {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let frame = self.stack.last_mut()?;
            let depth = frame.depth;
            match frame.entries.next() {
                None => {
                    self.stack.pop();
                }
                Some(Err(err)) => {
                    let dir = frame.dir.clone();
                    return Some(WalkEvent::Error(WalkError {
                        path: dir,
                        source: err,
                    }));
                }
                Some(Ok(entry)) => {
                    let path = entry.path();
                    if self.should_prune(&path) {
                        continue;
                    }
                    // file_type comes from the dirent on most platforms,
                    // avoiding an extra stat per entry.
                    let (is_dir, is_symlink) = match entry.file_type() {
                        Ok(ft) => (ft.is_dir(), ft.is_symlink()),
                        Err(err) => {
                            return Some(WalkEvent::Error(WalkError { path, source: err }));
                        }
                    };
                    // Symlinked directories are never entered, so a link
                    // cycle cannot loop the walk.
                    if is_dir && !is_symlink && self.should_descend(&path, depth) {
                        match fs::read_dir(&path) {
                            Ok(entries) => self.stack.push(Frame {
                                dir: path.clone(),
                                entries,
                                depth: depth + 1,
                            }),
                            Err(err) => self.pending.push_back(WalkEvent::Error(WalkError {
                                path: path.clone(),
                                source: err,
                            })),
                        }
                    }
                    if self.in_bounds(depth) {
                        return Some(WalkEvent::Entry(Entry { path, depth, is_dir }));
                    }
                }
            }
        }
    }
}
