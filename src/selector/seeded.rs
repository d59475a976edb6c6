use std::path::PathBuf;

use crate::config::NodeParams;
use crate::errors::SelectionError;
use crate::rng::DeterministicRng;
use crate::selector::uniform::pick_uniform;
use crate::selector::{SelectionMode, SummaryLine, TextSelection, TextSelector, load_selection};
use crate::transport::fs::enumerate_candidates;

/// Pick one candidate using a generator seeded only by `seed`.
///
/// The same `(candidates, seed)` pair always returns the same element.
pub fn pick_seeded(candidates: &[PathBuf], seed: u64) -> Option<&PathBuf> {
    pick_uniform(candidates, &mut DeterministicRng::new(seed))
}

/// Stateless seed-deterministic selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeededSelector;

impl SeededSelector {
    /// Create a seeded selector.
    pub fn new() -> Self {
        Self
    }
}

impl TextSelector for SeededSelector {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Seed
    }

    fn select(&mut self, params: &NodeParams) -> Result<TextSelection, SelectionError> {
        let candidates = enumerate_candidates(&params.source)?;
        let total = candidates.len();
        let path = pick_seeded(&candidates, params.seed).cloned().ok_or_else(|| {
            SelectionError::NoCandidates {
                folder: params.source.folder.clone(),
                extensions: params.source.parsed_extensions().unwrap_or_default(),
            }
        })?;
        load_selection(path, params, |selected| {
            Ok(SummaryLine::new(SelectionMode::Seed)
                .field("Seed", params.seed)
                .field("Files", total)
                .selected(selected)
                .extensions(&params.source.parsed_extensions()?)
                .finish())
        })
    }
}
