//! Logging and debugging facilities for the napkin outline.
//!
//! This module provides:
//! - Target names for filtering `tracing` output per subsystem
//! - Formatting options shared by the outline tree debug printer
//! - A timing span guard for profiling filter passes
//!
//! # Tracing Integration
//!
//! The outline only emits `tracing` events; installing a subscriber is up to
//! the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("napkin_outline::filter=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "napkin_outline_core::signal";
    /// Document object table target.
    pub const DOCUMENT: &str = "napkin_outline::document";
    /// Outline model target.
    pub const MODEL: &str = "napkin_outline::model";
    /// Leaf filter target.
    pub const FILTER: &str = "napkin_outline::filter";
    /// Outline panel target.
    pub const PANEL: &str = "napkin_outline::panel";
    /// Timing spans target.
    pub const PERF: &str = "napkin_outline::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Plain indentation only.
    Compact,
}

impl TreeStyle {
    /// Returns the `(continuation, branch, last branch)` glyphs for this style.
    pub fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "", ""),
        }
    }
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show the object kind after the name.
    pub show_types: bool,
    /// Whether to show attribute values.
    pub show_values: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_types: true,
            show_values: true,
            max_depth: None,
            indent_size: 3,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output: names only.
    pub fn minimal() -> Self {
        Self {
            show_types: false,
            show_values: false,
            ..Default::default()
        }
    }

    /// Builds the line prefix for a node at `depth`.
    ///
    /// `open_levels[i]` tells whether the ancestor at depth `i + 1` still has
    /// siblings below it, which decides between a continuation glyph and blank
    /// space.
    pub fn prefix(&self, open_levels: &[bool], is_last: bool) -> String {
        let depth = open_levels.len();
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = self.style.glyphs();
        let mut prefix = String::new();

        if self.style == TreeStyle::Compact {
            for _ in 0..depth * self.indent_size {
                prefix.push(' ');
            }
            return prefix;
        }

        for &open in &open_levels[..depth - 1] {
            if open {
                prefix.push_str(branch);
            } else {
                prefix.push(' ');
            }
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }

        prefix.push_str(if is_last { last } else { corner });
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time full visibility passes over the outline.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
