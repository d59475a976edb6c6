/// Defaults applied to source and decode configuration.
pub mod defaults {
    /// Extension filter used when the caller does not supply one.
    pub const DEFAULT_EXTENSIONS: &str = ".txt,.prompt,.md";
    /// Encoding label used when the caller does not supply one.
    pub const DEFAULT_ENCODING: &str = "utf-8";
    /// Separator between entries of an extension filter string.
    pub const EXTENSION_SEPARATOR: char = ',';
    /// Whether the shuffle bag reorders itself after each completed cycle.
    pub const DEFAULT_RESHUFFLE_ON_WRAP: bool = true;
}

/// Labels used in debug summaries.
pub mod summary {
    /// Separator placed between summary fields.
    pub const FIELD_SEPARATOR: &str = " | ";
    /// Mode label for uniform selection.
    pub const MODE_CLASSIC: &str = "classic";
    /// Mode label for seeded selection.
    pub const MODE_SEED: &str = "seed";
    /// Mode label for shuffle-bag selection.
    pub const MODE_SHUFFLE_BAG: &str = "shuffle-bag";
}

/// Identifiers the invocation adapter publishes to a host.
pub mod node {
    /// Category every node is listed under.
    pub const NODE_CATEGORY: &str = "textdraw/random";
    /// Node id for uniform selection.
    pub const CLASSIC_NODE_ID: &str = "LoadRandomTextClassic";
    /// Node id for seeded selection.
    pub const SEED_NODE_ID: &str = "LoadRandomTextSeed";
    /// Node id for shuffle-bag selection.
    pub const SHUFFLE_NODE_ID: &str = "LoadRandomTextShuffle";
    /// Display name for uniform selection.
    pub const CLASSIC_DISPLAY_NAME: &str = "Random Text (Classic)";
    /// Display name for seeded selection.
    pub const SEED_DISPLAY_NAME: &str = "Random Text (Seed)";
    /// Display name for shuffle-bag selection.
    pub const SHUFFLE_DISPLAY_NAME: &str = "Random Text (Shuffle-Bag)";
}
