#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner used by the `textdraw` binary.
pub mod app;
/// Source, decode, and node parameter types.
pub mod config;
/// Centralized defaults and labels.
pub mod constants;
/// Text loading with configurable encoding and malformed-input policy.
pub mod decode;
mod hash;
/// Host-facing node adapter and change tokens.
pub mod node;
/// Explicit random-source handles.
pub mod rng;
/// Selection strategies.
pub mod selector;
/// Candidate enumeration (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{DecodeOptions, ErrorPolicy, NodeParams, SourceConfig, parse_extensions};
pub use decode::decode;
pub use errors::SelectionError;
pub use node::{ChangeToken, NodeHost, NodeKind};
pub use rng::DeterministicRng;
pub use selector::{
    DrawOutcome, SeededSelector, SelectionKey, SelectionMode, ShuffleBagSelector,
    ShuffleBagState, TextSelection, TextSelector, UniformSelector,
};
pub use transport::fs::{CandidateScan, enumerate_candidates};
pub use types::{DebugSummary, EncodingLabel, ExtensionList, SiteId};
