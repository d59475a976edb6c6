use std::path::PathBuf;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::NodeParams;
use crate::errors::SelectionError;
use crate::selector::{SelectionMode, SummaryLine, TextSelection, TextSelector, load_selection};
use crate::transport::fs::enumerate_candidates;

/// Pick one candidate with equal probability from `rng`.
///
/// Returns `None` only for an empty slice.
pub fn pick_uniform<'a, R: Rng + ?Sized>(
    candidates: &'a [PathBuf],
    rng: &mut R,
) -> Option<&'a PathBuf> {
    candidates.choose(rng)
}

/// Stateless uniform selection backed by the thread-local random source.
///
/// Every call enumerates afresh; nothing is cached between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSelector;

impl UniformSelector {
    /// Create a uniform selector.
    pub fn new() -> Self {
        Self
    }
}

impl TextSelector for UniformSelector {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Classic
    }

    fn select(&mut self, params: &NodeParams) -> Result<TextSelection, SelectionError> {
        let candidates = enumerate_candidates(&params.source)?;
        let total = candidates.len();
        let path = pick_uniform(&candidates, &mut rand::rng())
            .cloned()
            .ok_or_else(|| SelectionError::NoCandidates {
                folder: params.source.folder.clone(),
                extensions: params.source.parsed_extensions().unwrap_or_default(),
            })?;
        load_selection(path, params, |selected| {
            Ok(SummaryLine::new(SelectionMode::Classic)
                .field("Files", total)
                .selected(selected)
                .extensions(&params.source.parsed_extensions()?)
                .finish())
        })
    }
}
