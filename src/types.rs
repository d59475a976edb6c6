/// Lowercased extension suffixes parsed from a comma-separated filter.
/// Example: `[".txt", ".prompt", ".md"]`
pub type ExtensionList = Vec<String>;
/// Stable identifier for a node use-site inside a host graph.
/// Examples: `prompt_loader_1`, `12`
pub type SiteId = String;
/// Human-readable diagnostic line attached to a selection.
/// Example: `Mode: seed | Seed: 42 | Files: 3 | Selected: b.txt | Exts: [".txt"]`
pub type DebugSummary = String;
/// Encoding label accepted by the loader.
/// Examples: `utf-8`, `windows-1252`, `shift_jis`
pub type EncodingLabel = String;
