//! Static file routing with entry-document fallback.
//!
//! This is the contract the file-serving layer must honour for the
//! two-segment URL scheme to work on a fully static deployment:
//!
//! 1. Resolve the request path under the content root. A path that climbs
//!    out of the root is rejected.
//! 2. A path ending in `/`, or naming a directory, is served from its
//!    `index.html`.
//! 3. If nothing matches a regular file, serve the root `index.html` with a
//!    success status. Client-side code then reads the path itself.
//!
//! Request paths are expected already percent-decoded.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const ENTRY_DOCUMENT: &str = "index.html";
const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Request path escapes the content root: {0}")]
    OutsideRoot(String),
}

/// What a request is answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served {
    /// A real file under the root.
    File {
        path: PathBuf,
        content_type: &'static str,
    },
    /// Nothing matched; the root entry document answers instead.
    Fallback { path: PathBuf },
}

impl Served {
    pub fn path(&self) -> &Path {
        match self {
            Served::File { path, .. } | Served::Fallback { path } => path,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Served::File { content_type, .. } => *content_type,
            Served::Fallback { .. } => DEFAULT_CONTENT_TYPE,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Served::Fallback { .. })
    }
}

/// Routes request paths to files under a fixed content root.
#[derive(Debug, Clone)]
pub struct StaticRouter {
    root: PathBuf,
}

impl StaticRouter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request path (`/es/fr`, `/plugs/plug-a.svg`, ...).
    pub fn resolve(&self, request_path: &str) -> Result<Served, RouterError> {
        let relative = normalize(request_path)
            .ok_or_else(|| RouterError::OutsideRoot(request_path.to_string()))?;
        let mut candidate = self.root.join(&relative);
        if request_path.ends_with('/') || candidate.is_dir() {
            candidate = candidate.join(ENTRY_DOCUMENT);
        }

        if candidate.is_file() {
            return Ok(Served::File {
                content_type: content_type(&candidate),
                path: candidate,
            });
        }
        Ok(Served::Fallback {
            path: self.root.join(ENTRY_DOCUMENT),
        })
    }
}

/// Lexically normalize a request path to a root-relative path.
///
/// Returns `None` when `..` segments would leave the root.
fn normalize(request_path: &str) -> Option<PathBuf> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in request_path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => {
                // A segment such as "C:" must not turn into an absolute path
                let mut components = Path::new(other).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => parts.push(other),
                    _ => return None,
                }
            }
        }
    }
    Some(parts.iter().collect())
}

/// Content type by file extension.
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
