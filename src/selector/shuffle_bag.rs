use std::path::PathBuf;

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::config::{NodeParams, SourceConfig};
use crate::errors::SelectionError;
use crate::selector::{SelectionMode, SummaryLine, TextSelection, TextSelector, load_selection};
use crate::transport::fs::enumerate_candidates;

/// Inputs that decide whether a cached bag is still valid.
///
/// Compared field by field. The extension filter is kept as the raw string,
/// so reordering the same suffixes counts as a different key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    folder: PathBuf,
    recursive: bool,
    extensions: String,
    follow_links: bool,
}

impl From<&SourceConfig> for SelectionKey {
    fn from(config: &SourceConfig) -> Self {
        Self {
            folder: config.folder.clone(),
            recursive: config.recursive,
            extensions: config.extensions.clone(),
            follow_links: config.follow_links,
        }
    }
}

/// A built bag and the position of the next draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadyBag {
    bag: Vec<PathBuf>,
    cursor: usize,
    key: SelectionKey,
}

impl ReadyBag {
    /// Current pool order.
    pub fn bag(&self) -> &[PathBuf] {
        &self.bag
    }

    /// Index of the next draw.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Key the bag was built for.
    pub fn key(&self) -> &SelectionKey {
        &self.key
    }
}

/// Persistent state of a shuffle-bag selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ShuffleBagState {
    /// No bag has been built yet, or the last one was discarded.
    #[default]
    Uninitialized,
    /// A bag is cached and can be drawn from.
    Ready(ReadyBag),
}

/// Metadata for a single shuffle-bag draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Drawn candidate.
    pub path: PathBuf,
    /// Cursor after the draw (0 right after a wrap).
    pub cursor: usize,
    /// Pool size.
    pub len: usize,
    /// This draw completed a cycle.
    pub wrapped: bool,
    /// The bag was rebuilt before this draw.
    pub rebuilt: bool,
}

/// Draws without repetition until every candidate has been returned once.
///
/// The candidate list is enumerated and permuted only on rebuild: the first
/// call, an explicit reset, or a change of `SelectionKey`. Between rebuilds
/// every run of `len` consecutive draws is a full permutation of the pool.
pub struct ShuffleBagSelector<R = StdRng> {
    state: ShuffleBagState,
    rng: R,
}

impl ShuffleBagSelector<StdRng> {
    /// Create a selector whose random handle is seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for ShuffleBagSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> ShuffleBagSelector<R> {
    /// Create a selector that shuffles with `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: ShuffleBagState::Uninitialized,
            rng,
        }
    }

    /// Current persistent state.
    pub fn state(&self) -> &ShuffleBagState {
        &self.state
    }

    /// Discard the cached bag; the next draw rebuilds.
    pub fn reset(&mut self) {
        self.state = ShuffleBagState::Uninitialized;
    }

    /// Draw the next candidate for `source`, enumerating only when a rebuild is due.
    pub fn draw(
        &mut self,
        source: &SourceConfig,
        reset: bool,
        reshuffle_on_wrap: bool,
    ) -> Result<DrawOutcome, SelectionError> {
        self.draw_with(SelectionKey::from(source), reset, reshuffle_on_wrap, || {
            enumerate_candidates(source)
        })
    }

    /// Draw the next candidate, calling `fetch` for a fresh candidate list on rebuild.
    ///
    /// `fetch` errors propagate unchanged and leave the previous state in place.
    /// An empty list from `fetch` is an `InternalInvariantViolation`; the state
    /// is cleared so the empty bag is never reused.
    pub fn draw_with<F>(
        &mut self,
        key: SelectionKey,
        reset: bool,
        reshuffle_on_wrap: bool,
        fetch: F,
    ) -> Result<DrawOutcome, SelectionError>
    where
        F: FnOnce() -> Result<Vec<PathBuf>, SelectionError>,
    {
        let rebuilt = reset
            || match &self.state {
                ShuffleBagState::Uninitialized => true,
                ShuffleBagState::Ready(ready) => ready.key != key,
            };
        if rebuilt {
            let mut bag = fetch()?;
            bag.shuffle(&mut self.rng);
            debug!(
                folder = %key.folder.display(),
                candidates = bag.len(),
                reset,
                "rebuilt shuffle bag"
            );
            self.state = ShuffleBagState::Ready(ReadyBag {
                bag,
                cursor: 0,
                key,
            });
        }

        let ShuffleBagState::Ready(ready) = &mut self.state else {
            return Err(SelectionError::InternalInvariantViolation(
                "shuffle bag is uninitialized after rebuild".to_string(),
            ));
        };
        if ready.bag.is_empty() {
            self.state = ShuffleBagState::Uninitialized;
            return Err(SelectionError::InternalInvariantViolation(
                "shuffle bag is empty after rebuild".to_string(),
            ));
        }

        let path = ready.bag.get(ready.cursor).cloned().ok_or_else(|| {
            SelectionError::InternalInvariantViolation(format!(
                "shuffle bag cursor {} out of range for {} entries",
                ready.cursor,
                ready.bag.len()
            ))
        })?;
        ready.cursor += 1;

        let len = ready.bag.len();
        let wrapped = ready.cursor >= len;
        if wrapped {
            ready.cursor = 0;
            if reshuffle_on_wrap {
                ready.bag.shuffle(&mut self.rng);
            }
            trace!(len, reshuffle_on_wrap, "shuffle bag wrapped");
        }

        Ok(DrawOutcome {
            path,
            cursor: ready.cursor,
            len,
            wrapped,
            rebuilt,
        })
    }
}

impl<R: RngCore + Send> TextSelector for ShuffleBagSelector<R> {
    fn mode(&self) -> SelectionMode {
        SelectionMode::ShuffleBag
    }

    fn select(&mut self, params: &NodeParams) -> Result<TextSelection, SelectionError> {
        let outcome = self.draw(&params.source, params.reset, params.reshuffle_on_wrap)?;
        let DrawOutcome {
            path,
            cursor,
            len,
            wrapped,
            ..
        } = outcome;
        load_selection(path, params, |selected| {
            Ok(SummaryLine::new(SelectionMode::ShuffleBag)
                .field("Files", len)
                .field("Index", format!("{cursor}/{len}"))
                .field("Wrapped", wrapped)
                .selected(selected)
                .extensions(&params.source.parsed_extensions()?)
                .finish())
        })
    }
}
