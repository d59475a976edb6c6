//! Invocation adapter that exposes each strategy to a host graph.
//!
//! A host registers nodes by `NodeKind`, keeps one `NodeHost` site per node
//! placement, and asks `NodeKind::change_token` before each run to decide
//! whether a cached result can be reused.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::NodeParams;
use crate::constants::node::{
    CLASSIC_DISPLAY_NAME, CLASSIC_NODE_ID, NODE_CATEGORY, SEED_DISPLAY_NAME, SEED_NODE_ID,
    SHUFFLE_DISPLAY_NAME, SHUFFLE_NODE_ID,
};
use crate::errors::SelectionError;
use crate::hash::{hash_path, stable_hash_with};
use crate::selector::{
    SeededSelector, SelectionMode, ShuffleBagSelector, TextSelection, TextSelector,
    UniformSelector,
};
use crate::types::SiteId;

/// Value a host compares across runs to decide whether to re-invoke a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeToken {
    /// Always treated as changed.
    Always,
    /// Deterministic digest of the inputs that affect the result.
    Fingerprint(u64),
}

impl ChangeToken {
    /// True when a result cached under `previous` may be reused.
    pub fn is_unchanged_from(&self, previous: &ChangeToken) -> bool {
        match (self, previous) {
            (ChangeToken::Fingerprint(current), ChangeToken::Fingerprint(prior)) => {
                current == prior
            }
            _ => false,
        }
    }
}

/// Node types published to a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Uniform selection.
    Classic,
    /// Seed-deterministic selection.
    Seed,
    /// Shuffle-bag selection.
    ShuffleBag,
}

impl NodeKind {
    /// Every node kind, in registration order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Classic, NodeKind::Seed, NodeKind::ShuffleBag];

    /// Stable id used in host graphs.
    pub const fn id(&self) -> &'static str {
        match self {
            NodeKind::Classic => CLASSIC_NODE_ID,
            NodeKind::Seed => SEED_NODE_ID,
            NodeKind::ShuffleBag => SHUFFLE_NODE_ID,
        }
    }

    /// Name shown in host menus.
    pub const fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Classic => CLASSIC_DISPLAY_NAME,
            NodeKind::Seed => SEED_DISPLAY_NAME,
            NodeKind::ShuffleBag => SHUFFLE_DISPLAY_NAME,
        }
    }

    /// Menu category shared by all nodes.
    pub const fn category(&self) -> &'static str {
        NODE_CATEGORY
    }

    /// Selection policy behind this node.
    pub const fn mode(&self) -> SelectionMode {
        match self {
            NodeKind::Classic => SelectionMode::Classic,
            NodeKind::Seed => SelectionMode::Seed,
            NodeKind::ShuffleBag => SelectionMode::ShuffleBag,
        }
    }

    /// Build a fresh selector instance for one node placement.
    pub fn build(&self) -> Box<dyn TextSelector> {
        match self {
            NodeKind::Classic => Box::new(UniformSelector::new()),
            NodeKind::Seed => Box::new(SeededSelector::new()),
            NodeKind::ShuffleBag => Box::new(ShuffleBagSelector::new()),
        }
    }

    /// Change token for `params`.
    ///
    /// Classic always reruns. Seed digests the seed plus every source field
    /// that shapes the candidate set. Shuffle-bag digests the same source
    /// fields and the reset flag, so a reset request differs from a plain call.
    pub fn change_token(&self, params: &NodeParams) -> ChangeToken {
        let source = &params.source;
        match self {
            NodeKind::Classic => ChangeToken::Always,
            NodeKind::Seed => ChangeToken::Fingerprint(stable_hash_with(|hasher| {
                self.id().hash(hasher);
                hash_path(hasher, &source.folder);
                params.seed.hash(hasher);
                source.recursive.hash(hasher);
                source.extensions.hash(hasher);
                source.follow_links.hash(hasher);
            })),
            NodeKind::ShuffleBag => ChangeToken::Fingerprint(stable_hash_with(|hasher| {
                self.id().hash(hasher);
                hash_path(hasher, &source.folder);
                source.recursive.hash(hasher);
                source.extensions.hash(hasher);
                source.follow_links.hash(hasher);
                params.reset.hash(hasher);
            })),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NodeKind {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.id() == raw)
            .ok_or_else(|| SelectionError::InvalidConfig(format!("unknown node id '{raw}'")))
    }
}

struct NodeSite {
    kind: NodeKind,
    selector: Box<dyn TextSelector>,
}

/// Owns one selector instance per node placement.
///
/// Instances are created on first invocation and live until evicted, so each
/// shuffle-bag placement keeps its own bag and cursor.
#[derive(Default)]
pub struct NodeHost {
    sites: IndexMap<SiteId, NodeSite>,
}

impl NodeHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the node at `site`, creating a `kind` instance if none exists.
    ///
    /// A site re-registered with a different kind gets a fresh instance.
    pub fn invoke(
        &mut self,
        site: impl Into<SiteId>,
        kind: NodeKind,
        params: &NodeParams,
    ) -> Result<TextSelection, SelectionError> {
        let site = site.into();
        let replace = self
            .sites
            .get(&site)
            .is_none_or(|existing| existing.kind != kind);
        if replace {
            debug!(site = %site, node = %kind, "creating node instance");
            self.sites.insert(
                site.clone(),
                NodeSite {
                    kind,
                    selector: kind.build(),
                },
            );
        }
        let Some(entry) = self.sites.get_mut(&site) else {
            return Err(SelectionError::InternalInvariantViolation(format!(
                "node site '{site}' missing after registration"
            )));
        };
        entry.selector.select(params)
    }

    /// Drop the instance at `site`. Returns whether one existed.
    pub fn evict(&mut self, site: &str) -> bool {
        self.sites.shift_remove(site).is_some()
    }

    /// Kind registered at `site`, if any.
    pub fn kind_at(&self, site: &str) -> Option<NodeKind> {
        self.sites.get(site).map(|entry| entry.kind)
    }

    /// Site ids in creation order.
    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True when no instance is live.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
