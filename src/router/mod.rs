//! Routing table and request dispatch.
//!
//! The [`RouteTable`] holds everything the dispatcher consults: registered
//! routes (with aliases), moved-route redirects, blacklisted files, allowed
//! directories and error pages. It is populated before serving starts and is
//! read-only afterward, so it is shared across workers behind an `Arc` with
//! no locking.

pub mod dispatch;
pub mod route;

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::response::StatusCode;
use route::Route;

/// Whether a moved route is a temporary (302) or permanent (301) redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
    Temporary,
    Permanent,
}

impl RedirectKind {
    pub fn status(self) -> StatusCode {
        match self {
            RedirectKind::Temporary => StatusCode::FOUND,
            RedirectKind::Permanent => StatusCode::MOVED_PERMANENTLY,
        }
    }
}

/// A path mapped to a redirect target, recorded at registration time.
#[derive(Debug, Clone)]
pub struct MovedRoute {
    /// Sent verbatim as the Location header value
    pub target: String,
    pub kind: RedirectKind,
}

/// Server-wide routing and access-control state.
pub struct RouteTable {
    root: PathBuf,
    routes: HashMap<PathBuf, Arc<Route>>,
    moved: HashMap<PathBuf, MovedRoute>,
    blacklist: HashSet<PathBuf>,
    allowed: Vec<PathBuf>,
    error_pages: HashMap<u16, PathBuf>,
    default_error_page: Option<PathBuf>,
}

impl RouteTable {
    /// Creates an empty table rooted at `root`. A relative root is resolved
    /// against the current directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            lexical_resolve(Path::new("/"), &root)
        } else {
            match std::env::current_dir() {
                Ok(cwd) => lexical_resolve(&cwd, &root),
                Err(_) => root,
            }
        };
        Self {
            root,
            routes: HashMap::new(),
            moved: HashMap::new(),
            blacklist: HashSet::new(),
            allowed: Vec::new(),
            error_pages: HashMap::new(),
            default_error_page: None,
        }
    }

    /// Builds a table from the static policy surface of a config file.
    /// Handler routes are registered separately with [`RouteTable::add_route`].
    pub fn from_config(cfg: &Config) -> Self {
        let mut table = Self::new(cfg.root.as_str());
        for dir in &cfg.allowed_directories {
            table.allow_directory(dir);
        }
        for file in &cfg.blacklisted_files {
            table.disallow_file(file);
        }
        for moved in &cfg.moved_routes {
            table.add_moved_route(&moved.path, &moved.target, moved.kind);
        }
        for (code, page) in &cfg.error_pages {
            table.set_error_page(*code, page);
        }
        if let Some(page) = &cfg.default_error_page {
            table.set_default_error_page(page);
        }
        table
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers a route under its canonical path and every alias. Route
    /// keys live in URL space, so they canonicalize exactly like request
    /// paths. All keys share one route instance, so they stay in sync by
    /// construction.
    pub fn add_route(&mut self, route: Route) {
        let route = Arc::new(route);
        for alias in &route.aliases {
            self.routes
                .insert(self.resolve_request(alias), route.clone());
        }
        self.routes
            .insert(self.resolve_request(&route.path), route.clone());
        info!(route = ?route, "added route");
    }

    /// Allows static files to be served from under this directory.
    pub fn allow_directory(&mut self, path: &str) {
        self.allowed.push(self.resolve_config(path));
    }

    /// Denies a file regardless of any other accessibility.
    pub fn disallow_file(&mut self, path: &str) {
        self.blacklist.insert(self.resolve_config(path));
    }

    /// Maps a URL-space path to a redirect target. The target is recorded
    /// verbatim and later sent as the Location header.
    pub fn add_moved_route(&mut self, path: &str, target: &str, kind: RedirectKind) {
        self.moved.insert(
            self.resolve_request(path),
            MovedRoute {
                target: target.to_string(),
                kind,
            },
        );
    }

    pub fn set_error_page(&mut self, code: u16, path: &str) {
        self.error_pages.insert(code, self.resolve_config(path));
    }

    pub fn set_default_error_page(&mut self, path: &str) {
        self.default_error_page = Some(self.resolve_config(path));
    }

    pub fn route(&self, path: &Path) -> Option<&Arc<Route>> {
        self.routes.get(path)
    }

    pub fn moved_route(&self, path: &Path) -> Option<&MovedRoute> {
        self.moved.get(path)
    }

    pub fn is_blacklisted(&self, path: &Path) -> bool {
        self.blacklist.contains(path)
    }

    /// A path is accessible iff it lies under some allowed directory, or it
    /// is itself a route key (registered routes are implicitly accessible).
    pub fn is_accessible(&self, path: &Path) -> bool {
        self.allowed.iter().any(|dir| path.starts_with(dir)) || self.routes.contains_key(path)
    }

    /// Canonicalizes a request path against the server root. `..` segments
    /// collapse lexically and may escape the root; accessibility checks are
    /// what keep escaped paths from being served.
    pub fn resolve_request(&self, path: &str) -> PathBuf {
        lexical_resolve(&self.root, Path::new(path))
    }

    /// Canonicalizes a filesystem configuration path (allowed directories,
    /// blacklisted files, error pages): absolute paths are kept as given,
    /// relative ones resolve against the server root.
    pub fn resolve_config(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            lexical_resolve(Path::new("/"), p)
        } else {
            lexical_resolve(&self.root, p)
        }
    }

    /// Resolves the body for an error status: the page registered for that
    /// code wins, else the default page with its `{{status_code}}`
    /// placeholder substituted, else the bare reason phrase.
    pub async fn error_page(&self, status: StatusCode) -> Vec<u8> {
        if let Some(page) = self.error_pages.get(&status.as_u16()) {
            match tokio::fs::read(page).await {
                Ok(data) => return data,
                Err(e) => {
                    warn!(page = %page.display(), error = %e, "failed to read error page")
                }
            }
        } else if let Some(page) = &self.default_error_page {
            match tokio::fs::read(page).await {
                Ok(data) => {
                    let code = status.as_u16().to_string();
                    return replace_bytes(&data, b"{{status_code}}", code.as_bytes());
                }
                Err(e) => {
                    warn!(page = %page.display(), error = %e, "failed to read default error page")
                }
            }
        }
        status.reason_phrase().as_bytes().to_vec()
    }
}

/// Joins `path` onto `base` while collapsing `.` and `..` segments, without
/// touching the filesystem. A leading `/` in `path` is treated as the server
/// root, not the filesystem root.
fn lexical_resolve(base: &Path, path: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for comp in path.components() {
        match comp {
            Component::Normal(c) => out.push(c),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}
