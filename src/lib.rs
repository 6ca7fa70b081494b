//! bfind - find paths whose basenames match every given regex

pub mod filter;
pub mod output;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use filter::{FilterSet, MatchSpan, TypeFilter};
pub use output::{PathPrinter, RenderConfig, Separator};
pub use walk::{Entry, WalkConfig, WalkError, WalkEvent, Walker};
