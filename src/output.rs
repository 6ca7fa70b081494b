//! Path rendering: plain records for pipes, highlighted basenames for
//! terminals.
//!
//! [`PathPrinter`] is generic over [`WriteColor`] so the highlight path is
//! testable against an in-memory [`termcolor::Buffer`]. Whether to
//! highlight is decided once at startup and injected through
//! [`RenderConfig`]; rendering code never probes the environment.

use std::io;
use std::path::{MAIN_SEPARATOR, Path};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::filter::MatchSpan;

/// Record separator between emitted paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Newline,
    /// NUL terminator, for consumers that treat paths as opaque bytes.
    Null,
}

impl Separator {
    fn as_byte(self) -> u8 {
        match self {
            Separator::Newline => b'\n',
            Separator::Null => b'\0',
        }
    }
}

/// Rendering options fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub highlight: bool,
    pub separator: Separator,
}

/// Writes accepted paths to any [`WriteColor`] sink.
///
/// Plain mode writes parent + separator + raw basename with no control
/// characters, keeping output safe for line-oriented tools. Highlight mode
/// styles every basename character covered by a match span; overlapping
/// spans collapse, and the color state changes only on covered/uncovered
/// transitions.
pub struct PathPrinter<W: WriteColor> {
    config: RenderConfig,
    out: W,
}

impl<W: WriteColor> PathPrinter<W> {
    pub fn new(config: RenderConfig, out: W) -> Self {
        Self { config, out }
    }

    /// Consume the printer and return the sink (used by tests to inspect
    /// buffered output).
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit one accepted path followed by the record separator. `spans`
    /// holds required-pattern matches within the basename and is consulted
    /// only in highlight mode.
    pub fn print(&mut self, path: &Path, spans: &[MatchSpan]) -> io::Result<()> {
        let basename = path.file_name().map(|n| n.to_string_lossy());
        self.write_parent(path)?;
        match basename {
            Some(name) if self.config.highlight && !spans.is_empty() => {
                self.write_highlighted(&name, spans)?;
            }
            Some(name) => write!(self.out, "{name}")?,
            None => {}
        }
        self.out.write_all(&[self.config.separator.as_byte()])
    }

    fn write_parent(&mut self, path: &Path) -> io::Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        let head = parent.to_string_lossy();
        if head.is_empty() {
            return Ok(());
        }
        write!(self.out, "{head}")?;
        if !head.ends_with(MAIN_SEPARATOR) {
            write!(self.out, "{MAIN_SEPARATOR}")?;
        }
        Ok(())
    }

    fn write_highlighted(&mut self, basename: &str, spans: &[MatchSpan]) -> io::Result<()> {
        let mut styled = false;
        for (offset, ch) in basename.char_indices() {
            let covered = spans
                .iter()
                .any(|&(start, end)| offset >= start && offset < end);
            if covered != styled {
                if covered {
                    self.out.set_color(&highlight_spec())?;
                } else {
                    self.out.reset()?;
                }
                styled = covered;
            }
            write!(self.out, "{ch}")?;
        }
        if styled {
            self.out.reset()?;
        }
        Ok(())
    }
}

/// The classic finder match style: bold red on blue.
fn highlight_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Red))
        .set_bg(Some(Color::Blue))
        .set_bold(true);
    spec
}
