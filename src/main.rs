//! CLI entry point for bfind

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream, WriteColor};

use bfind::{
    FilterSet, PathPrinter, RenderConfig, Separator, TypeFilter, WalkConfig, WalkEvent, Walker,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to highlight matches based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

/// Entry type filter
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum TypeArg {
    /// Files and directories
    #[default]
    #[value(alias = "a")]
    All,
    /// Directories only
    #[value(alias = "d")]
    Dirs,
    /// Files only
    #[value(alias = "f")]
    Files,
}

impl From<TypeArg> for TypeFilter {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::All => TypeFilter::All,
            TypeArg::Dirs => TypeFilter::Dirs,
            TypeArg::Files => TypeFilter::Files,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bfind")]
#[command(about = "Find paths whose basenames match every given regex")]
#[command(version)]
struct Args {
    /// Required regexes; a path is printed iff its basename matches all of
    /// them (unanchored search). With no patterns, every path matches
    patterns: Vec<String>,

    /// Exclude paths whose basename matches REGEX (can be used multiple times)
    #[arg(short = 'n', long = "negated", value_name = "REGEX")]
    negated: Vec<String>,

    /// Minimum depth; entries directly inside the root are depth 1
    #[arg(short = 'm', long = "min-depth", default_value = "0")]
    min_depth: usize,

    /// Maximum depth; nothing below this depth is visited (default: unbounded)
    #[arg(short = 'M', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Entry types to select: a(ll), d(irs), f(iles)
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        default_value = "all"
    )]
    entry_type: TypeArg,

    /// Match case-sensitively (matching is case-insensitive by default)
    #[arg(short = 'I', long = "case-sensitive")]
    case_sensitive: bool,

    /// Terminate records with NUL instead of newline
    #[arg(short = '0', long = "print0")]
    print0: bool,

    /// Directory to search
    #[arg(short = 'r', long = "root", default_value = ".")]
    root: PathBuf,

    /// Skip entries whose basename matches GLOB and never descend into
    /// matching directories (can be used multiple times)
    #[arg(short = 'p', long = "prune", value_name = "GLOB")]
    prune: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    // Startup errors (bad pattern, bad root) are fatal before any output.
    let filters = match FilterSet::new(&args.patterns, &args.negated, args.case_sensitive) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bfind: invalid pattern: {}", e);
            process::exit(1);
        }
    };

    let walk_config = WalkConfig {
        min_depth: args.min_depth,
        max_depth: args.max_depth,
        prune: args.prune.clone(),
    };
    let walker = match Walker::new(&args.root, walk_config) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("bfind: cannot access '{}': {}", args.root.display(), e);
            process::exit(1);
        }
    };

    let highlight = should_use_color(args.color);
    // TTY detection already happened; the stream must not second-guess it.
    let choice = if highlight {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let separator = if args.print0 {
        Separator::Null
    } else {
        Separator::Newline
    };
    let mut printer = PathPrinter::new(
        RenderConfig {
            highlight,
            separator,
        },
        StandardStream::stdout(choice),
    );

    if let Err(e) = run(walker, &filters, args.entry_type.into(), highlight, &mut printer) {
        eprintln!("bfind: error writing output: {}", e);
        process::exit(1);
    }
}

/// Pull entries from the walker, filter them, and print accepted paths.
/// Warnings go to stderr and never change the exit code.
fn run<W: WriteColor>(
    walker: Walker,
    filters: &FilterSet,
    type_filter: TypeFilter,
    highlight: bool,
    printer: &mut PathPrinter<W>,
) -> io::Result<()> {
    for event in walker {
        match event {
            WalkEvent::Error(warning) => {
                eprintln!("bfind: warning: {}", warning);
            }
            WalkEvent::Entry(entry) => {
                if !type_filter.admits(entry.is_dir) {
                    continue;
                }
                let basename = entry.basename();
                if highlight {
                    // Collect every match so the spans can be colored.
                    if let Some(spans) = filters.accept_with_spans(&basename) {
                        printer.print(&entry.path, &spans)?;
                    }
                } else if filters.accept(&basename) {
                    printer.print(&entry.path, &[])?;
                }
            }
        }
    }
    Ok(())
}
