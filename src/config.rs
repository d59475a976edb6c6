use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::defaults::{
    DEFAULT_ENCODING, DEFAULT_EXTENSIONS, DEFAULT_RESHUFFLE_ON_WRAP, EXTENSION_SEPARATOR,
};
use crate::errors::SelectionError;
use crate::types::{EncodingLabel, ExtensionList};

/// Where candidates come from and which files qualify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Folder scanned for candidate files.
    pub folder: PathBuf,
    /// Whether enumeration descends into subdirectories.
    #[serde(default, alias = "include_subfolders")]
    pub recursive: bool,
    /// Comma-separated, case-insensitive filename suffixes (for example `.txt,.md`).
    #[serde(default = "default_extensions")]
    pub extensions: String,
    /// Whether symlinked directories are followed during a recursive walk.
    #[serde(default)]
    pub follow_links: bool,
}

impl SourceConfig {
    /// Create a config for `folder` with default filters.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            recursive: false,
            extensions: default_extensions(),
            follow_links: false,
        }
    }

    /// Override whether subdirectories are scanned.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Override the extension filter string.
    pub fn with_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = extensions.into();
        self
    }

    /// Override whether symlinked directories are followed.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Parse the extension filter into trimmed, lowercased suffixes.
    pub fn parsed_extensions(&self) -> Result<ExtensionList, SelectionError> {
        parse_extensions(&self.extensions)
    }
}

/// Split a comma-separated extension filter, dropping blank entries.
///
/// Fails with `InvalidConfig` when nothing is left after trimming.
pub fn parse_extensions(raw: &str) -> Result<ExtensionList, SelectionError> {
    let extensions: ExtensionList = raw
        .split(EXTENSION_SEPARATOR)
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .collect();
    if extensions.is_empty() {
        return Err(SelectionError::InvalidConfig(
            "no extensions specified, example: .txt,.md".to_string(),
        ));
    }
    Ok(extensions)
}

/// How the loader treats byte sequences that are malformed in the chosen encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ErrorPolicy {
    /// Fail the invocation with `DecodeFailure`.
    Strict,
    /// Substitute U+FFFD for each malformed sequence.
    #[default]
    Replace,
    /// Drop malformed sequences silently.
    Ignore,
}

impl ErrorPolicy {
    /// Lowercase policy name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Strict => "strict",
            ErrorPolicy::Replace => "replace",
            ErrorPolicy::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ErrorPolicy::Strict),
            "replace" => Ok(ErrorPolicy::Replace),
            "ignore" => Ok(ErrorPolicy::Ignore),
            other => Err(SelectionError::InvalidConfig(format!(
                "unknown error policy '{other}', expected strict, replace, or ignore"
            ))),
        }
    }
}

impl TryFrom<String> for ErrorPolicy {
    type Error = SelectionError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ErrorPolicy> for String {
    fn from(policy: ErrorPolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// Decode-time options for the loader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// WHATWG encoding label (for example `utf-8`, `windows-1252`).
    pub encoding: EncodingLabel,
    /// Malformed-input handling.
    #[serde(alias = "errors")]
    pub error_policy: ErrorPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl DecodeOptions {
    /// Override the encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<EncodingLabel>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Override the malformed-input policy.
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

/// Full parameter record a host passes to a node invocation.
///
/// Strategy-specific fields are ignored by strategies that do not use them:
/// `seed` only matters for seeded selection, `reset` and `reshuffle_on_wrap`
/// only for the shuffle bag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeParams {
    /// Candidate source.
    #[serde(flatten)]
    pub source: SourceConfig,
    /// Loader options.
    #[serde(flatten)]
    pub decode: DecodeOptions,
    /// Attach a human-readable summary to the result.
    #[serde(default, alias = "debug_info")]
    pub debug: bool,
    /// Seed for seeded selection.
    #[serde(default)]
    pub seed: u64,
    /// Force the shuffle bag to rebuild on this call.
    #[serde(default, alias = "reset_cache")]
    pub reset: bool,
    /// Reorder the shuffle bag after each completed cycle.
    #[serde(default = "default_reshuffle_on_wrap")]
    pub reshuffle_on_wrap: bool,
}

impl NodeParams {
    /// Params for `folder` with every option at its default.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceConfig::new(folder),
            decode: DecodeOptions::default(),
            debug: false,
            seed: 0,
            reset: false,
            reshuffle_on_wrap: DEFAULT_RESHUFFLE_ON_WRAP,
        }
    }

    /// Replace the source config.
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    /// Replace the decode options.
    pub fn with_decode(mut self, decode: DecodeOptions) -> Self {
        self.decode = decode;
        self
    }

    /// Toggle the debug summary.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the seed used by seeded selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Request a shuffle-bag rebuild.
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Toggle reshuffling when the shuffle bag wraps.
    pub fn with_reshuffle_on_wrap(mut self, reshuffle_on_wrap: bool) -> Self {
        self.reshuffle_on_wrap = reshuffle_on_wrap;
        self
    }
}

fn default_extensions() -> String {
    DEFAULT_EXTENSIONS.to_string()
}

fn default_reshuffle_on_wrap() -> bool {
    DEFAULT_RESHUFFLE_ON_WRAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extensions_trims_lowercases_and_drops_blanks() {
        let parsed = parse_extensions(" .TXT, ,.Md ,,.prompt").unwrap();
        assert_eq!(parsed, vec![".txt", ".md", ".prompt"]);
    }

    #[test]
    fn parse_extensions_rejects_blank_filters() {
        for raw in ["", "   ", ", ,,"] {
            let err = parse_extensions(raw).unwrap_err();
            assert!(
                matches!(err, SelectionError::InvalidConfig(_)),
                "expected InvalidConfig for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn error_policy_parses_case_insensitively() {
        assert_eq!("STRICT".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Strict);
        assert_eq!(" replace ".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Replace);
        assert_eq!("Ignore".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Ignore);
        assert!(matches!(
            "surrogateescape".parse::<ErrorPolicy>(),
            Err(SelectionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_error_policy_matches_cli_parsing() {
        let decode: DecodeOptions = serde_json::from_str(r#"{"errors": "STRICT"}"#).unwrap();
        assert_eq!(decode.error_policy, ErrorPolicy::Strict);
        let decode: DecodeOptions =
            serde_json::from_str(r#"{"error_policy": " Ignore "}"#).unwrap();
        assert_eq!(decode.error_policy, ErrorPolicy::Ignore);
        let unknown = serde_json::from_str::<DecodeOptions>(r#"{"errors": "xmlcharrefreplace"}"#);
        assert!(unknown.is_err());

        let json = serde_json::to_value(DecodeOptions::default()).unwrap();
        assert_eq!(json["error_policy"], "replace");
    }

    #[test]
    fn node_params_fill_defaults_from_minimal_json() {
        let params: NodeParams = serde_json::from_str(r#"{"folder": "/tmp/prompts"}"#).unwrap();
        assert_eq!(params, NodeParams::new("/tmp/prompts"));
        assert_eq!(params.source.extensions, DEFAULT_EXTENSIONS);
        assert_eq!(params.decode.encoding, DEFAULT_ENCODING);
        assert_eq!(params.decode.error_policy, ErrorPolicy::Replace);
        assert!(params.reshuffle_on_wrap);
        assert!(!params.reset);
    }

    #[test]
    fn node_params_accept_host_field_aliases() {
        let params: NodeParams = serde_json::from_str(
            r#"{
                "folder": "/tmp/prompts",
                "include_subfolders": true,
                "extensions": ".md",
                "errors": "strict",
                "reset_cache": true,
                "reshuffle_on_wrap": false,
                "debug_info": true,
                "seed": 18446744073709551615
            }"#,
        )
        .unwrap();
        assert!(params.source.recursive);
        assert_eq!(params.source.extensions, ".md");
        assert_eq!(params.decode.error_policy, ErrorPolicy::Strict);
        assert!(params.reset);
        assert!(!params.reshuffle_on_wrap);
        assert!(params.debug);
        assert_eq!(params.seed, u64::MAX);
    }
}
