//! Page metadata synthesis.
//!
//! Everything a page says about itself is derived here from exactly two
//! inputs: the resolved [`CountryPair`] and its [`CompatibilityResult`]. No
//! other page state feeds in, so a page can never show an adapter verdict in
//! its heading and a different one in its structured data.
//!
//! ## Outputs per view
//!
//! | View | Title / description | Canonical | JSON-LD |
//! |------|---------------------|-----------|---------|
//! | Home | fixed default | `{base}/` | none |
//! | NotFound | fixed "not found" | `{base}/` | none |
//! | Pair | branches on the adapter verdict | `{base}/{o}/{d}` | FAQ + breadcrumb |
//!
//! Open Graph and Twitter tags mirror the title and description.
//!
//! ## Naming
//!
//! Country names come from the single [`CountryNames`] strategy carried in
//! [`SiteContext`]. Every string below asks the same strategy, which keeps
//! headings, options and JSON-LD on one naming source.

use crate::compat::CompatibilityResult;
use crate::naming::CountryNames;
use crate::route::{CountryPair, Route};
use serde::Serialize;

pub const SITE_NAME: &str = "QueEnchufe.com";
pub const DEFAULT_TITLE: &str = "¿Qué enchufe necesitas para viajar?";
pub const DEFAULT_DESCRIPTION: &str = "Descubre si necesitas adaptador de enchufe al viajar entre países. Tipos de enchufe, voltaje y frecuencia en segundos.";
pub const NOT_FOUND_TITLE: &str = "País no encontrado | QueEnchufe.com";
pub const NOT_FOUND_DESCRIPTION: &str = "No encontramos los países indicados. Vuelve al buscador para comprobar enchufes y voltaje.";

const CHARGER_QUESTION: &str = "¿Funciona mi cargador de celular?";
const CHARGER_ANSWER: &str = "Si tu cargador indica “input 100–240 V”, funcionará sin problema y solo podrías necesitar adaptador físico.";
const ADAPTER_QUESTION: &str = "¿Necesito adaptador para viajar a este país?";
const PLUGS_QUESTION: &str = "¿Qué tipo de enchufe se usa en el país destino?";

/// Fragment of the home page the breadcrumb's middle level points at.
pub const SEARCH_ANCHOR: &str = "buscador";
const CATEGORY_NAME: &str = "Enchufes de viaje";
const HOME_NAME: &str = "Inicio";

/// Inputs shared by every page of one build.
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    /// Canonical origin without trailing slash.
    pub base_url: &'a str,
    pub names: &'a CountryNames,
}

/// Everything that goes into a page `<head>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<BreadcrumbList>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub site_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
}

// ============================================================================
// JSON-LD documents
// ============================================================================

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// schema.org `FAQPage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "mainEntity")]
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(rename = "acceptedAnswer")]
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub text: String,
}

/// schema.org `BreadcrumbList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "itemListElement")]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    pub name: String,
    pub item: String,
}

impl Question {
    fn new(name: &str, answer: String) -> Self {
        Self {
            kind: "Question",
            name: name.to_string(),
            accepted_answer: Answer {
                kind: "Answer",
                text: answer,
            },
        }
    }
}

/// Serialize a JSON-LD document for embedding in a `<script>` element.
///
/// `<`, `>` and `&` are written as JSON unicode escapes so no string value
/// can close or confuse the surrounding script element.
pub fn to_json_ld<T: Serialize>(document: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(document)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

// ============================================================================
// Visible result strings
// ============================================================================

/// Human-readable strings painted in the body of a pair page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSummary {
    pub origin_name: String,
    pub destination_name: String,
    pub needs_adapter: bool,
    pub voltage_compatible: bool,
    /// `❌ Sí necesitas adaptador` / `✅ No necesitas adaptador`
    pub verdict: String,
    pub subtitle: String,
    pub voltage_text: String,
    /// Question/answer pairs, identical to the FAQ JSON-LD.
    pub faq: Vec<(String, String)>,
}

// ============================================================================
// Synthesis
// ============================================================================

/// `{base}/{origin}/{destination}` with lowercase codes.
pub fn canonical_url(base_url: &str, pair: &CountryPair<'_>) -> String {
    format!("{}{}", base_url, pair.path())
}

/// Home URL, always with a trailing slash.
pub fn home_url(base_url: &str) -> String {
    format!("{base_url}/")
}

fn page(title: String, description: String, canonical_url: String) -> PageMetadata {
    PageMetadata {
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url.clone(),
            kind: "website",
            site_name: SITE_NAME,
        },
        twitter: TwitterCard {
            card: "summary",
            title: title.clone(),
            description: description.clone(),
        },
        title,
        description,
        canonical_url,
        faq: None,
        breadcrumb: None,
    }
}

/// Metadata for the home view.
pub fn home(base_url: &str) -> PageMetadata {
    page(
        DEFAULT_TITLE.to_string(),
        DEFAULT_DESCRIPTION.to_string(),
        home_url(base_url),
    )
}

/// Metadata for a pair-shaped path naming an unknown country.
pub fn not_found(base_url: &str) -> PageMetadata {
    page(
        NOT_FOUND_TITLE.to_string(),
        NOT_FOUND_DESCRIPTION.to_string(),
        home_url(base_url),
    )
}

/// Metadata for whatever a route resolved to.
pub fn for_route(ctx: &SiteContext<'_>, route: &Route<'_>) -> PageMetadata {
    match route {
        Route::Home => home(ctx.base_url),
        Route::NotFound { .. } => not_found(ctx.base_url),
        Route::Resolved(pair) => for_pair(ctx, pair, &CompatibilityResult::between(pair)),
    }
}

/// Metadata for a resolved pair.
pub fn for_pair(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    compat: &CompatibilityResult,
) -> PageMetadata {
    let origin = ctx.names.display_name(pair.origin);
    let destination = ctx.names.display_name(pair.destination);
    let destination_plugs = pair.destination.plugs.join(", ");

    let (title, description) = if compat.needs_adapter() {
        (
            format!(
                "Qué enchufe se usa en {destination} desde {origin}: adaptador tipo {destination_plugs}"
            ),
            format!(
                "Desde {origin} a {destination} necesitas adaptador: en {destination} se usan enchufes tipo {destination_plugs}. Tipos de enchufe, voltaje y frecuencia actualizados."
            ),
        )
    } else {
        (
            format!("Qué enchufe se usa en {destination} desde {origin}: sin adaptador"),
            format!(
                "Comprueba si necesitas adaptador al viajar desde {origin} a {destination}: tus enchufes son compatibles. Tipos de enchufe, voltaje y frecuencia actualizados."
            ),
        )
    };

    let canonical = canonical_url(ctx.base_url, pair);
    let mut metadata = page(title, description, canonical.clone());
    metadata.faq = Some(faq_page(ctx, pair, compat));
    metadata.breadcrumb = Some(breadcrumb(ctx, pair, canonical));
    metadata
}

fn faq_entries(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    compat: &CompatibilityResult,
) -> [(&'static str, String); 3] {
    let origin = ctx.names.display_name(pair.origin);
    let destination = ctx.names.display_name(pair.destination);
    let destination_plugs = pair.destination.plugs.join(", ");

    let adapter = if compat.needs_adapter() {
        format!(
            "Sí. Desde {origin} hacia {destination} necesitas adaptador si tu enchufe no coincide con los tipos {destination_plugs}."
        )
    } else {
        format!("No. Los tipos de enchufe de {destination} son compatibles con {origin}.")
    };

    [
        (ADAPTER_QUESTION, adapter),
        (CHARGER_QUESTION, CHARGER_ANSWER.to_string()),
        (
            PLUGS_QUESTION,
            format!("En {destination} se usan los enchufes tipo {destination_plugs}."),
        ),
    ]
}

/// FAQ structured data: adapter need, charger voltage, destination plugs.
pub fn faq_page(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    compat: &CompatibilityResult,
) -> FaqPage {
    FaqPage {
        context: SCHEMA_CONTEXT,
        kind: "FAQPage",
        main_entity: faq_entries(ctx, pair, compat)
            .into_iter()
            .map(|(q, a)| Question::new(q, a))
            .collect(),
    }
}

/// Three-level breadcrumb: home → search → this pair.
pub fn breadcrumb(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    canonical_url: String,
) -> BreadcrumbList {
    let origin = ctx.names.display_name(pair.origin);
    let destination = ctx.names.display_name(pair.destination);
    let item = |position: u32, name: String, url: String| ListItem {
        kind: "ListItem",
        position,
        name,
        item: url,
    };
    BreadcrumbList {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        items: vec![
            item(1, HOME_NAME.to_string(), home_url(ctx.base_url)),
            item(
                2,
                CATEGORY_NAME.to_string(),
                format!("{}/#{}", ctx.base_url, SEARCH_ANCHOR),
            ),
            item(3, format!("De {origin} a {destination}"), canonical_url),
        ],
    }
}

/// Visible strings for the result section of a pair page.
pub fn summarize(
    ctx: &SiteContext<'_>,
    pair: &CountryPair<'_>,
    compat: &CompatibilityResult,
) -> PairSummary {
    let origin_name = ctx.names.display_name(pair.origin).to_string();
    let destination_name = ctx.names.display_name(pair.destination).to_string();
    let needs_adapter = compat.needs_adapter();

    let verdict = if needs_adapter {
        "❌ Sí necesitas adaptador"
    } else {
        "✅ No necesitas adaptador"
    };
    let advice = if compat.voltage_compatible {
        "El voltaje es compatible."
    } else {
        "El voltaje es diferente, considera usar transformador si tu equipo no es multivoltaje."
    };
    let voltage_text = format!(
        "{origin_name}: {} / {}. {destination_name}: {} / {}. {advice}",
        pair.origin.voltage,
        pair.origin.frequency,
        pair.destination.voltage,
        pair.destination.frequency,
    );

    PairSummary {
        subtitle: format!("Viajas desde {origin_name} hacia {destination_name}."),
        faq: faq_entries(ctx, pair, compat)
            .into_iter()
            .map(|(q, a)| (q.to_string(), a))
            .collect(),
        verdict: verdict.to_string(),
        voltage_text,
        needs_adapter,
        voltage_compatible: compat.voltage_compatible,
        origin_name,
        destination_name,
    }
}
