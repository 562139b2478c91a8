//! Defaults shared by the config model and the CLI

/// File names and directories
pub mod files {
    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &str = "promptpage.toml";

    /// Directory holding builtin templates
    pub const TEMPLATES_DIR: &str = "prompts";

    /// Skipped during builtin template discovery (case-insensitive)
    pub const TEMPLATES_README: &str = "readme.md";
}

/// Search limits
pub mod search {
    /// Upper bound accepted for `[search] limit`
    pub const MAX_LIMIT: usize = 200;
}
