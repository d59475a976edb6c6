//! Selection strategies over an enumerated candidate set.
//!
//! Ownership model:
//! - `UniformSelector` is stateless and draws from the thread-local source.
//! - `SeededSelector` is stateless and builds a fresh `DeterministicRng` per call.
//! - `ShuffleBagSelector` owns its bag, cursor, cache key, and random handle,
//!   so one instance must be kept per logical use-site.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::config::NodeParams;
use crate::constants::summary::{FIELD_SEPARATOR, MODE_CLASSIC, MODE_SEED, MODE_SHUFFLE_BAG};
use crate::decode::decode;
use crate::errors::SelectionError;
use crate::types::DebugSummary;

/// Seed-deterministic selection.
pub mod seeded;
/// No-repeat-until-exhausted selection with a cached, permuted pool.
pub mod shuffle_bag;
/// Unseeded uniform selection.
pub mod uniform;

pub use seeded::SeededSelector;
pub use shuffle_bag::{DrawOutcome, ReadyBag, SelectionKey, ShuffleBagSelector, ShuffleBagState};
pub use uniform::UniformSelector;

/// Which policy produced a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Uniform draw from the process-wide random source.
    Classic,
    /// Uniform draw from a source seeded by the caller.
    Seed,
    /// Shuffle-bag draw.
    ShuffleBag,
}

impl SelectionMode {
    /// Label used in debug summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            SelectionMode::Classic => MODE_CLASSIC,
            SelectionMode::Seed => MODE_SEED,
            SelectionMode::ShuffleBag => MODE_SHUFFLE_BAG,
        }
    }
}

/// Decoded text plus where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSelection {
    /// Decoded file contents.
    pub text: String,
    /// Path of the selected file as produced by enumeration.
    pub selected_path: PathBuf,
    /// Diagnostic line, empty unless `debug` was requested.
    pub debug_summary: DebugSummary,
}

/// One invokable selection policy.
pub trait TextSelector: Send {
    /// Policy implemented by this selector.
    fn mode(&self) -> SelectionMode;

    /// Enumerate, pick one candidate, and load it.
    fn select(&mut self, params: &NodeParams) -> Result<TextSelection, SelectionError>;
}

/// Builder for the `Mode: ... | Files: ... | Selected: ...` debug line.
pub(crate) struct SummaryLine {
    fields: Vec<String>,
}

impl SummaryLine {
    pub(crate) fn new(mode: SelectionMode) -> Self {
        Self {
            fields: vec![format!("Mode: {}", mode.label())],
        }
    }

    pub(crate) fn field(mut self, name: &str, value: impl Display) -> Self {
        self.fields.push(format!("{name}: {value}"));
        self
    }

    pub(crate) fn selected(self, path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.field("Selected", name)
    }

    pub(crate) fn extensions(mut self, extensions: &[String]) -> Self {
        self.fields.push(format!("Exts: {extensions:?}"));
        self
    }

    pub(crate) fn finish(self) -> DebugSummary {
        self.fields.join(FIELD_SEPARATOR)
    }
}

/// Decode `path` and package it with an optional summary.
pub(crate) fn load_selection(
    path: PathBuf,
    params: &NodeParams,
    summary: impl FnOnce(&Path) -> Result<DebugSummary, SelectionError>,
) -> Result<TextSelection, SelectionError> {
    let text = decode(&path, &params.decode)?;
    let debug_summary = if params.debug {
        summary(&path)?
    } else {
        DebugSummary::new()
    };
    Ok(TextSelection {
        text,
        selected_path: path,
        debug_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_joins_fields_in_order() {
        let line = SummaryLine::new(SelectionMode::Seed)
            .field("Seed", 42)
            .field("Files", 3)
            .selected(Path::new("/prompts/nested/b.txt"))
            .extensions(&[".txt".to_string(), ".md".to_string()])
            .finish();
        assert_eq!(
            line,
            r#"Mode: seed | Seed: 42 | Files: 3 | Selected: b.txt | Exts: [".txt", ".md"]"#
        );
    }

    #[test]
    fn mode_labels_are_distinct() {
        assert_eq!(SelectionMode::Classic.label(), "classic");
        assert_eq!(SelectionMode::Seed.label(), "seed");
        assert_eq!(SelectionMode::ShuffleBag.label(), "shuffle-bag");
    }
}
