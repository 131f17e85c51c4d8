//! HTML site generation.
//!
//! Renders the whole static site from a loaded [`Site`]. Every page's head
//! and body text come from [`crate::metadata`]; this module only lays them
//! out.
//!
//! ## Generated Files
//!
//! ```text
//! dist/
//! ├── index.html              # Home view; also the fallback for unknown paths
//! ├── es/fr/index.html        # One page per ordered pair, self-pairs included
//! ├── style.css               # Color variables + static/style.css
//! ├── search.js               # Form navigation, not-found branch, plug fallback
//! ├── data/countries.json     # Validated dataset
//! ├── sitemap.xml
//! ├── robots.txt
//! └── plugs/plug-a.svg ...    # Copied from the assets directory
//! ```
//!
//! ## Cache Busting
//!
//! Stylesheet and script URLs carry `?v=<hash>`, the first twelve hex digits
//! of a SHA-256 over the stylesheet, script and dataset bytes. Any change to
//! any of them yields new URLs on every page.
//!
//! ## Clean Builds
//!
//! The output directory is removed and recreated before anything is written,
//! so pages for countries dropped from the dataset do not survive a rebuild.
//! An output directory that is the source directory or contains it is
//! refused.
//!
//! ## Parallelism
//!
//! Pair pages are pure functions of the shared dataset and are rendered on
//! the rayon pool, then written out sequentially.

use crate::compat::CompatibilityResult;
use crate::dataset::{CountryProfile, DatasetError};
use crate::metadata::{self, PageMetadata, PairSummary, SEARCH_ANCHOR, SiteContext};
use crate::route::CountryPair;
use crate::site::Site;
use crate::{config, sitemap};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Refusing to clean {0}: it contains the site source")]
    UnsafeOutput(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/search.js");

/// What a build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    pub countries: usize,
    pub name_source: String,
    pub pair_pages: usize,
    pub sitemap_urls: usize,
    pub assets_copied: usize,
    pub asset_version: String,
}

/// Versioned URLs of the shared assets.
#[derive(Debug, Clone)]
struct AssetUrls {
    stylesheet: String,
    script: String,
}

impl AssetUrls {
    fn new(version: &str) -> Self {
        Self {
            stylesheet: format!("/style.css?v={version}"),
            script: format!("/search.js?v={version}"),
        }
    }
}

/// Short content hash over the given byte strings.
pub fn asset_version(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

/// Every ordered pair of the dataset, self-pairs included.
pub fn page_pairs(site: &Site) -> Vec<CountryPair<'_>> {
    site.dataset
        .iter()
        .flat_map(|origin| {
            site.dataset.iter().map(move |destination| CountryPair {
                origin,
                destination,
            })
        })
        .collect()
}

/// Output file for a pair page, relative to the output root.
pub fn pair_page_path(pair: &CountryPair<'_>) -> PathBuf {
    Path::new(&pair.origin.slug())
        .join(pair.destination.slug())
        .join("index.html")
}

/// Render and write the full site into `output_dir`.
pub fn generate(site: &Site, output_dir: &Path) -> Result<BuildSummary, GenerateError> {
    let ctx = site.context();
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&site.config.colors),
        CSS_STATIC
    );
    let dataset_json = site.dataset.to_json()?;
    let version = asset_version(&[css.as_bytes(), JS.as_bytes(), dataset_json.as_bytes()]);
    let assets = AssetUrls::new(&version);

    clean_output(&site.source, output_dir)?;
    let assets_copied = copy_assets(&site.assets_path(), output_dir)?;

    fs::write(output_dir.join("style.css"), &css)?;
    fs::write(output_dir.join("search.js"), JS)?;
    fs::create_dir_all(output_dir.join("data"))?;
    fs::write(output_dir.join("data/countries.json"), &dataset_json)?;

    let options = site.names.sorted(&site.dataset);
    let codes: Vec<&str> = site.dataset.codes().collect();
    let index = render_home(&ctx, &codes, &options, &assets)?;
    fs::write(output_dir.join("index.html"), index.into_string())?;

    let pairs = page_pairs(site);
    let rendered = pairs
        .par_iter()
        .map(|pair| -> Result<(PathBuf, String), GenerateError> {
            let html = render_pair_page(&ctx, pair, &options, &assets)?;
            Ok((pair_page_path(pair), html.into_string()))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    for (relative, html) in &rendered {
        let path = output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
    }
    debug!(pages = rendered.len(), "pair pages written");

    let base_url = ctx.base_url;
    let entries = sitemap::entries(&site.dataset, &site.config.sitemap, base_url);
    fs::write(
        output_dir.join("sitemap.xml"),
        sitemap::render_sitemap(&entries),
    )?;
    fs::write(output_dir.join("robots.txt"), sitemap::render_robots(base_url))?;

    Ok(BuildSummary {
        output_dir: output_dir.to_path_buf(),
        countries: site.dataset.len(),
        name_source: site.names.source_label(),
        pair_pages: rendered.len(),
        sitemap_urls: entries.len(),
        assets_copied,
        asset_version: version,
    })
}

/// Remove any previous build and recreate `output_dir` empty.
fn clean_output(source: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    if output_dir.exists() {
        let source = source.canonicalize()?;
        if source.starts_with(output_dir.canonicalize()?) {
            return Err(GenerateError::UnsafeOutput(output_dir.to_path_buf()));
        }
        debug!(path = %output_dir.display(), "removing previous build");
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Copy the assets directory into the output root. Returns the file count.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        debug!(path = %src.display(), "no assets directory");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Which view a document renders, exposed to the page script.
#[derive(Debug, Clone, Copy)]
enum View {
    Home,
    Pair,
}

impl View {
    fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Pair => "pair",
        }
    }
}

/// Renders the `<head>` tags derived from page metadata.
fn head_tags(meta: &PageMetadata, assets: &AssetUrls) -> Result<Markup, GenerateError> {
    let faq = meta.faq.as_ref().map(metadata::to_json_ld).transpose()?;
    let breadcrumb = meta
        .breadcrumb
        .as_ref()
        .map(metadata::to_json_ld)
        .transpose()?;

    Ok(html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { (meta.title) }
        meta name="description" content=(meta.description);
        link rel="canonical" href=(meta.canonical_url);
        meta property="og:type" content=(meta.open_graph.kind);
        meta property="og:site_name" content=(meta.open_graph.site_name);
        meta property="og:title" content=(meta.open_graph.title);
        meta property="og:description" content=(meta.open_graph.description);
        meta property="og:url" content=(meta.open_graph.url);
        meta name="twitter:card" content=(meta.twitter.card);
        meta name="twitter:title" content=(meta.twitter.title);
        meta name="twitter:description" content=(meta.twitter.description);
        link rel="icon" href="/favicon.svg" type="image/svg+xml";
        link rel="stylesheet" href=(assets.stylesheet);
        @if let Some(json) = faq {
            script type="application/ld+json" id="faq-schema" { (PreEscaped(json)) }
        }
        @if let Some(json) = breadcrumb {
            script type="application/ld+json" id="breadcrumb-schema" { (PreEscaped(json)) }
        }
    })
}

/// Renders the base HTML document structure
fn base_document(
    head: Markup,
    view: View,
    body_data: Markup,
    assets: &AssetUrls,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                (head)
            }
            body data-view=(view.as_str()) {
                (body_data)
                header.site-header {
                    a.brand href="/" { (metadata::SITE_NAME) }
                }
                (content)
                footer.site-footer {
                    p { "Datos de enchufes, voltaje y frecuencia por país." }
                }
                script src=(assets.script) defer {}
            }
        }
    }
}

/// Renders the origin/destination search form.
fn search_form(
    ctx: &SiteContext<'_>,
    options: &[&CountryProfile],
    selected: Option<&CountryPair<'_>>,
) -> Markup {
    let origin = selected.map(|p| p.origin.code.as_str());
    let destination = selected.map(|p| p.destination.code.as_str());

    html! {
        section.search id=(SEARCH_ANCHOR) {
            form #search-form action="/" method="get" {
                label for="origin" { "Viajo desde" }
                (country_select(ctx, "origin", options, origin))
                label for="destination" { "Viajo a" }
                (country_select(ctx, "destination", options, destination))
                button type="submit" { "Comprobar" }
            }
        }
    }
}

fn country_select(
    ctx: &SiteContext<'_>,
    id: &str,
    options: &[&CountryProfile],
    selected: Option<&str>,
) -> Markup {
    html! {
        select id=(id) name=(id) required {
            option value="" disabled selected[selected.is_none()] { "Elige un país" }
            @for profile in options {
                option value=(profile.code) selected[selected == Some(profile.code.as_str())] {
                    (ctx.names.display_name(profile))
                }
            }
        }
    }
}

/// Renders a plug list with image and text label per type.
fn plug_list(plugs: &[String]) -> Markup {
    html! {
        ul.plug-list role="list" {
            @for plug in plugs {
                li.plug-item {
                    img.plug-image
                        src={ "/plugs/plug-" (plug.to_lowercase()) ".svg" }
                        alt={ "Enchufe tipo " (plug) }
                        data-plug=(plug)
                        loading="lazy"
                        decoding="async";
                    span.plug-label { (plug) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the entry document: home view plus the not-found branch data.
fn render_home(
    ctx: &SiteContext<'_>,
    codes: &[&str],
    options: &[&CountryProfile],
    assets: &AssetUrls,
) -> Result<Markup, GenerateError> {
    let meta = metadata::home(ctx.base_url);
    let not_found = metadata::not_found(ctx.base_url);
    let head = head_tags(&meta, assets)?;

    let body_data = html! {
        template #view-data
            data-not-found-title=(not_found.title)
            data-not-found-description=(not_found.description)
            data-codes=(codes.join(" ")) {}
    };

    let content = html! {
        main.home-page #home {
            h1 { (meta.title) }
            p.lead { (meta.description) }
            p.notice #not-found hidden {
                "No encontramos los países indicados. Elige origen y destino de nuevo."
            }
            (search_form(ctx, options, None))
        }
    };

    Ok(base_document(head, View::Home, body_data, assets, content))
}

/// Renders a pre-computed pair page.
fn render_pair_page(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    options: &[&CountryProfile],
    assets: &AssetUrls,
) -> Result<Markup, GenerateError> {
    let compat = CompatibilityResult::between(pair);
    let meta = metadata::for_pair(ctx, pair, &compat);
    let summary = metadata::summarize(ctx, pair, &compat);
    let head = head_tags(&meta, assets)?;

    let content = html! {
        main.result-page #result {
            nav.breadcrumb aria-label="Ruta de navegación" {
                @if let Some(crumbs) = &meta.breadcrumb {
                    @for (i, item) in crumbs.items.iter().enumerate() {
                        @if i > 0 { " › " }
                        @if i + 1 == crumbs.items.len() {
                            span aria-current="page" { (item.name) }
                        } @else {
                            a href=(item.item) { (item.name) }
                        }
                    }
                }
            }
            (result_section(pair, &summary))
            (search_form(ctx, options, Some(pair)))
        }
    };

    Ok(base_document(head, View::Pair, html! {}, assets, content))
}

fn result_section(pair: &CountryPair<'_>, summary: &PairSummary) -> Markup {
    let status = if summary.needs_adapter {
        "status-danger"
    } else {
        "status-success"
    };

    html! {
        section.result {
            h1 #result-message class=(status) { (summary.verdict) }
            p #result-subtitle { (summary.subtitle) }
            div.plug-columns {
                div.plug-column {
                    h2 { "Enchufes en " (summary.origin_name) }
                    (plug_list(&pair.origin.plugs))
                }
                div.plug-column {
                    h2 { "Enchufes en " (summary.destination_name) }
                    (plug_list(&pair.destination.plugs))
                }
            }
            section.voltage {
                h2 { "Voltaje y frecuencia" }
                p #voltage-text { (summary.voltage_text) }
            }
            section.faq {
                h2 { "Preguntas frecuentes" }
                @for (question, answer) in &summary.faq {
                    h3 { (question) }
                    p { (answer) }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
