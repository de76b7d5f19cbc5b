// src/constants.rs

/// The name of the directory (inside the platform config dir) holding mycli's configuration.
pub const APP_CONFIG_DIR: &str = "mycli";

/// The name of the main configuration file (inside the config dir).
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "MYCLI_CONFIG";

/// File extension marking a template source as a handlebars template.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Permission bits for rendered files when neither the template nor the globals set any.
pub const DEFAULT_PERMISSIONS: u32 = 0o644;

/// Executable used for search commands when no `meta.executable` is configured.
pub const DEFAULT_SEARCH_EXECUTABLE: &str = "rg";

/// Key of the per-level metadata mapping inside the search tree.
pub const META_KEY: &str = "meta";

/// Root key the search tree is wrapped under, so group filters can name it.
pub const SEARCH_ROOT_KEY: &str = "search";

/// Timeout for fetching a remote keyed data set.
pub const REMOTE_FETCH_TIMEOUT_SECS: u64 = 30;
