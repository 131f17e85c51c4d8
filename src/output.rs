//! CLI output formatting.
//!
//! Every command has a `format_*` function returning display lines (pure, no
//! I/O) and a `print_*` wrapper that writes them to stdout. Diagnostics go
//! through `tracing` on stderr instead.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Pairs → 2116 pages ({origin}/{destination}/index.html)
//! Dataset → data/countries.json (46 countries, locale table (es))
//! Sitemap → sitemap.xml (75 URLs)
//! Robots → robots.txt
//! Assets → 15 files (v=3f2a9c0d1b7e)
//! Generated 2117 pages
//! ```
//!
//! ## Resolve
//!
//! ```text
//! /es/gb → ES → GB
//!     Title: Qué enchufe se usa en Reino Unido desde España: adaptador tipo G
//!     Description: ...
//!     Canonical: https://queenchufe.com/es/gb
//!     Plugs: C, F → G (adapter needed)
//!     Voltage: 230 V → 230 V (compatible)
//! ```

use crate::compat::CompatibilityResult;
use crate::generate::BuildSummary;
use crate::metadata::PageMetadata;
use crate::route::Route;
use crate::site::Site;
use crate::verify::UrlCheck;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    vec![
        "Home \u{2192} index.html".to_string(),
        format!(
            "Pairs \u{2192} {} ({{origin}}/{{destination}}/index.html)",
            plural(summary.pair_pages, "page", "pages")
        ),
        format!(
            "Dataset \u{2192} data/countries.json ({}, {})",
            plural(summary.countries, "country", "countries"),
            summary.name_source
        ),
        format!(
            "Sitemap \u{2192} sitemap.xml ({})",
            plural(summary.sitemap_urls, "URL", "URLs")
        ),
        "Robots \u{2192} robots.txt".to_string(),
        format!(
            "Assets \u{2192} {} (v={})",
            plural(summary.assets_copied, "file", "files"),
            summary.asset_version
        ),
        format!(
            "Generated {}",
            plural(summary.pair_pages + 1, "page", "pages")
        ),
    ]
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Dataset inventory: one line per country, sorted by display name.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = vec![format!(
        "Countries ({}, {})",
        site.dataset.len(),
        site.names.source_label()
    )];
    for profile in site.names.sorted(&site.dataset) {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            profile.code,
            site.names.display_name(profile)
        ));
        lines.push(format!(
            "{}Plugs: {}",
            indent(2),
            profile.plugs.join(", ")
        ));
        lines.push(format!(
            "{}Supply: {} / {}",
            indent(2),
            profile.voltage,
            profile.frequency
        ));
    }
    lines
}

pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolve_output(path: &str, route: &Route<'_>, meta: &PageMetadata) -> Vec<String> {
    let header = match route {
        Route::Home => format!("{path} \u{2192} home"),
        Route::NotFound {
            origin,
            destination,
        } => format!("{path} \u{2192} not found ({origin} \u{2192} {destination})"),
        Route::Resolved(pair) => format!(
            "{path} \u{2192} {} \u{2192} {}",
            pair.origin.code, pair.destination.code
        ),
    };

    let mut lines = vec![
        header,
        format!("{}Title: {}", indent(1), meta.title),
        format!("{}Description: {}", indent(1), meta.description),
        format!("{}Canonical: {}", indent(1), meta.canonical_url),
    ];

    if let Route::Resolved(pair) = route {
        let compat = CompatibilityResult::between(pair);
        let plug_verdict = if compat.needs_adapter() {
            "adapter needed"
        } else {
            "no adapter needed"
        };
        let voltage_verdict = if compat.voltage_compatible {
            "compatible"
        } else {
            "different"
        };
        lines.push(format!(
            "{}Plugs: {} \u{2192} {} ({plug_verdict})",
            indent(1),
            pair.origin.plugs.join(", "),
            pair.destination.plugs.join(", ")
        ));
        lines.push(format!(
            "{}Voltage: {} \u{2192} {} ({voltage_verdict})",
            indent(1),
            pair.origin.voltage,
            pair.destination.voltage
        ));
    }
    lines
}

pub fn print_resolve_output(path: &str, route: &Route<'_>, meta: &PageMetadata) {
    for line in format_resolve_output(path, route, meta) {
        println!("{}", line);
    }
}

// ============================================================================
// Verify
// ============================================================================

pub fn format_verify_output(results: &[(String, UrlCheck)]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failures = 0;
    for (loc, check) in results {
        let problem = match check {
            UrlCheck::Ok => continue,
            UrlCheck::Fallback => "served by fallback, page missing".to_string(),
            UrlCheck::Rejected(reason) => format!("rejected: {reason}"),
            UrlCheck::Unresolved => "does not resolve to a pair".to_string(),
            UrlCheck::ForeignUrl => "outside the configured base URL".to_string(),
        };
        failures += 1;
        lines.push(loc.clone());
        lines.push(format!("{}{problem}", indent(1)));
    }
    lines.push(format!(
        "Verified {}, {}",
        plural(results.len(), "URL", "URLs"),
        plural(failures, "failure", "failures")
    ));
    lines
}

pub fn print_verify_output(results: &[(String, UrlCheck)]) {
    for line in format_verify_output(results) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
