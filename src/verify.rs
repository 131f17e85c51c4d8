//! Post-build check of sitemap URLs against the built output.
//!
//! Every URL listed in the sitemap must be answered by a real file rather
//! than the entry-document fallback, and a pair URL must resolve back to the
//! same pair it was generated from.

use crate::route::{self, Route};
use crate::router::StaticRouter;
use crate::site::Site;
use crate::sitemap;
use std::path::Path;
use tracing::debug;

/// Outcome of checking one sitemap URL against a built site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlCheck {
    /// Served by its own file and round-trips to the same pair.
    Ok,
    /// Served by the entry-document fallback instead of a page.
    Fallback,
    /// Rejected by the router.
    Rejected(String),
    /// Path does not resolve back to a pair.
    Unresolved,
    /// URL does not start with the configured base URL.
    ForeignUrl,
}

impl UrlCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, UrlCheck::Ok)
    }
}

/// Check every sitemap URL of `site` against the files under `output_dir`.
pub fn verify_sitemap(site: &Site, output_dir: &Path) -> Vec<(String, UrlCheck)> {
    let base = site.config.base_url();
    let router = StaticRouter::new(output_dir);
    sitemap::entries(&site.dataset, &site.config.sitemap, base)
        .into_iter()
        .map(|entry| {
            let check = check_url(site, &router, base, &entry.loc);
            debug!(url = %entry.loc, ?check, "verified");
            (entry.loc, check)
        })
        .collect()
}

fn check_url(site: &Site, router: &StaticRouter, base: &str, loc: &str) -> UrlCheck {
    let Some(path) = loc.strip_prefix(base) else {
        return UrlCheck::ForeignUrl;
    };
    let path = if path.is_empty() { "/" } else { path };

    match router.resolve(path) {
        Ok(served) if served.is_fallback() => return UrlCheck::Fallback,
        Ok(_) => {}
        Err(e) => return UrlCheck::Rejected(e.to_string()),
    }

    if path == "/" {
        return UrlCheck::Ok;
    }
    match route::resolve(path, &site.dataset) {
        Route::Resolved(pair) if pair.path() == path => UrlCheck::Ok,
        _ => UrlCheck::Unresolved,
    }
}
