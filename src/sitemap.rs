//! Sitemap and robots.txt generation.
//!
//! The sitemap seeds search-engine discovery with a curated subset of pairs:
//! every configured priority origin crossed with every priority destination,
//! minus self-pairs and codes the dataset does not know. The home URL comes
//! first. Each pair URL is the same canonical URL the pair page declares, so
//! every listed URL resolves through [`crate::route::resolve`].

use crate::config::SitemapConfig;
use crate::dataset::Dataset;
use crate::metadata;
use crate::route::CountryPair;
use serde::Serialize;

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: String,
    pub priority: String,
}

/// Uppercase, dataset-filtered, de-duplicated codes in configured order.
fn available_codes(codes: &[String], dataset: &Dataset) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.to_ascii_uppercase();
        if dataset.contains(&code) && !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

/// The pairs the sitemap lists, in origin-major order.
pub fn sitemap_pairs<'a>(dataset: &'a Dataset, config: &SitemapConfig) -> Vec<CountryPair<'a>> {
    let origins = available_codes(&config.origins, dataset);
    let destinations = available_codes(&config.destinations, dataset);

    let mut pairs = Vec::new();
    for origin in &origins {
        for destination in &destinations {
            if origin == destination {
                continue;
            }
            if let (Some(origin), Some(destination)) = (dataset.get(origin), dataset.get(destination))
            {
                pairs.push(CountryPair {
                    origin,
                    destination,
                });
            }
        }
    }
    pairs
}

/// Home entry followed by one entry per sitemap pair.
pub fn entries(dataset: &Dataset, config: &SitemapConfig, base_url: &str) -> Vec<SitemapEntry> {
    let home = SitemapEntry {
        loc: metadata::home_url(base_url),
        changefreq: config.changefreq.clone(),
        priority: config.home_priority.clone(),
    };
    std::iter::once(home)
        .chain(
            sitemap_pairs(dataset, config)
                .iter()
                .map(|pair| SitemapEntry {
                    loc: metadata::canonical_url(base_url, pair),
                    changefreq: config.changefreq.clone(),
                    priority: config.pair_priority.clone(),
                }),
        )
        .collect()
}

/// Render `sitemap.xml`.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#.to_string(),
    ];
    for entry in entries {
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", xml_escape(&entry.loc)));
        lines.push(format!("    <changefreq>{}</changefreq>", entry.changefreq));
        lines.push(format!("    <priority>{}</priority>", entry.priority));
        lines.push("  </url>".to_string());
    }
    lines.push("</urlset>".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Render `robots.txt`: allow everything, point at the sitemap.
pub fn render_robots(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Route, resolve};
    use crate::test_helpers::sample_dataset;

    const BASE: &str = "https://queenchufe.com";

    fn config(origins: &[&str], destinations: &[&str]) -> SitemapConfig {
        SitemapConfig {
            origins: origins.iter().map(|c| c.to_string()).collect(),
            destinations: destinations.iter().map(|c| c.to_string()).collect(),
            ..SitemapConfig::default()
        }
    }

    fn locs(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.loc.as_str()).collect()
    }

    #[test]
    fn home_comes_first() {
        let dataset = sample_dataset();
        let entries = entries(&dataset, &config(&["es"], &["fr"]), BASE);
        assert_eq!(entries[0].loc, "https://queenchufe.com/");
        assert_eq!(entries[0].priority, "1.0");
        assert_eq!(entries[1].priority, "0.7");
        assert_eq!(entries[1].changefreq, "weekly");
    }

    #[test]
    fn cartesian_product_without_self_pairs() {
        let dataset = sample_dataset();
        let entries = entries(&dataset, &config(&["es", "us"], &["us", "fr"]), BASE);
        assert_eq!(
            locs(&entries),
            vec![
                "https://queenchufe.com/",
                "https://queenchufe.com/es/us",
                "https://queenchufe.com/es/fr",
                "https://queenchufe.com/us/fr",
            ]
        );
    }

    #[test]
    fn codes_missing_from_dataset_are_skipped() {
        let dataset = sample_dataset();
        let entries = entries(&dataset, &config(&["mx", "es"], &["cn", "fr"]), BASE);
        assert_eq!(
            locs(&entries),
            vec!["https://queenchufe.com/", "https://queenchufe.com/es/fr"]
        );
    }

    #[test]
    fn duplicate_codes_listed_once() {
        let dataset = sample_dataset();
        let pairs = sitemap_pairs(&dataset, &config(&["es", "ES"], &["fr", "Fr"]));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn every_entry_resolves() {
        let dataset = sample_dataset();
        let cfg = config(&["es", "us", "jp"], &["us", "es", "fr", "gb", "de", "jp"]);
        for entry in entries(&dataset, &cfg, BASE).iter().skip(1) {
            let path = entry.loc.strip_prefix(BASE).unwrap();
            assert!(
                matches!(resolve(path, &dataset), Route::Resolved(_)),
                "{} does not resolve",
                entry.loc
            );
        }
    }

    #[test]
    fn default_lists_against_sample_dataset() {
        // Sample has DE ES FR GB JP US; defaults name ES and US as origins
        let dataset = sample_dataset();
        let pairs = sitemap_pairs(&dataset, &SitemapConfig::default());
        // ES → US FR DE GB JP, US → ES FR DE GB JP
        assert_eq!(pairs.len(), 10);
    }

    #[test]
    fn render_sitemap_structure() {
        let xml = render_sitemap(&[SitemapEntry {
            loc: "https://queenchufe.com/es/fr".to_string(),
            changefreq: "weekly".to_string(),
            priority: "0.7".to_string(),
        }]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("    <loc>https://queenchufe.com/es/fr</loc>"));
        assert!(xml.contains("    <changefreq>weekly</changefreq>"));
        assert!(xml.contains("    <priority>0.7</priority>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn render_sitemap_escapes_loc() {
        let xml = render_sitemap(&[SitemapEntry {
            loc: "https://example.org/?a=1&b=2".to_string(),
            changefreq: "weekly".to_string(),
            priority: "1.0".to_string(),
        }]);
        assert!(xml.contains("?a=1&amp;b=2"));
    }

    #[test]
    fn robots_references_sitemap() {
        assert_eq!(
            render_robots(BASE),
            "User-agent: *\nAllow: /\n\nSitemap: https://queenchufe.com/sitemap.xml\n"
        );
    }
}
