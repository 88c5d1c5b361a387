use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

use crate::router::RedirectKind;

/// Server configuration, loaded from a YAML file. Every field has a default
/// so a partial (or empty) file is fine.
///
/// Handler routes are registered in code on the `RouteTable`; the config
/// covers the static policy surface only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Server root; request paths resolve against it
    pub root: String,
    /// Bound on concurrent connections being served
    pub workers: usize,
    /// Per-connection read deadline
    pub read_timeout_secs: u64,
    pub allowed_directories: Vec<String>,
    pub blacklisted_files: Vec<String>,
    pub moved_routes: Vec<MovedRouteConfig>,
    /// Status code to error page file
    pub error_pages: HashMap<u16, String>,
    /// Fallback error page; may contain a `{{status_code}}` placeholder
    pub default_error_page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovedRouteConfig {
    pub path: String,
    pub target: String,
    #[serde(default = "default_redirect_kind")]
    pub kind: RedirectKind,
}

fn default_redirect_kind() -> RedirectKind {
    RedirectKind::Temporary
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root: ".".to_string(),
            workers: 10,
            read_timeout_secs: 10,
            allowed_directories: Vec::new(),
            blacklisted_files: Vec::new(),
            moved_routes: Vec::new(),
            error_pages: HashMap::new(),
            default_error_page: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("failed to parse config file {path}"))
    }
}
