//! Environment driven settings
//!
//! - `BITSYNC_PROJECT_MARKERS`: comma separated file names that mark a project root
//! - `BITSYNC_EXCLUDES`: comma separated gitignore patterns applied on top of the
//!   repository's own ignore files
//! - `BITSYNC_LOG`: tracing filter directive (defaults to `warn`)

pub const PROJECT_MARKERS_VAR: &str = "BITSYNC_PROJECT_MARKERS";
pub const EXCLUDES_VAR: &str = "BITSYNC_EXCLUDES";
pub const LOG_VAR: &str = "BITSYNC_LOG";

const DEFAULT_PROJECT_MARKERS: [&str; 2] = ["Cargo.toml", ".project"];
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub project_markers: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            project_markers: DEFAULT_PROJECT_MARKERS.map(String::from).to_vec(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl SyncConfig {
    pub fn load_from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = SyncConfig::default();

        if let Some(markers) = lookup(PROJECT_MARKERS_VAR) {
            config.project_markers = split_list(&markers);
        }
        if let Some(excludes) = lookup(EXCLUDES_VAR) {
            config.exclude_patterns = split_list(&excludes);
        }

        config
    }

    pub fn log_filter() -> String {
        std::env::var(LOG_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
