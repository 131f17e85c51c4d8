//! # QueEnchufe
//!
//! A static site generator for travel plug and voltage lookups. Given a table
//! of countries with their socket types, mains voltage and frequency, it
//! builds a site where `/{origin}/{destination}` answers "do I need an
//! adapter?" for any ordered pair of countries.
//!
//! # Architecture
//!
//! One dataset flows through pure stages; only [`generate`] touches the disk
//! for writing:
//!
//! ```text
//! site/data/countries.json ─→ Dataset ─→ RouteResolver ─→ CompatibilityEngine
//!                                                              │
//!                 dist/ ←── generate (Maud) ←── MetadataSynthesizer
//! ```
//!
//! Every pair page is pre-rendered, and the home page doubles as the fallback
//! document a static server returns for anything it cannot find. A small
//! script on that page handles pair paths whose countries are unknown.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dataset`] | Loads and validates `countries.json` into a [`dataset::Dataset`] |
//! | [`naming`] | Display-name strategy: locale name table or the dataset's own names |
//! | [`route`] | Two-segment path → home, not-found, or a resolved country pair |
//! | [`compat`] | Plug-set intersection and voltage token comparison |
//! | [`metadata`] | Titles, descriptions, canonical URLs, social tags, FAQ and breadcrumb JSON-LD |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` from curated origin/destination lists |
//! | [`router`] | Static file serving contract with entry-document fallback |
//! | [`site`] | Loads config, dataset and naming strategy for one build |
//! | [`generate`] | Renders the home page and every pair page with Maud |
//! | [`verify`] | Checks every sitemap URL against a built output directory |
//! | [`config`] | `config.toml` loading over stock defaults, validation, CSS variables |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pre-rendered Pairs, Fallback for the Rest
//!
//! Search engines and link previews need real titles and JSON-LD in the
//! served HTML, so pair pages are generated ahead of time. Paths outside the
//! generated set still work on any static host that serves `index.html` as a
//! fallback, see [`router`].
//!
//! ## One Naming Strategy per Build
//!
//! Country names come either from a locale table or from the dataset's own
//! `name` field. The choice is made once in [`naming::CountryNames::select`]
//! so a page never mixes both in its headings, options and structured data.

pub mod compat;
pub mod config;
pub mod dataset;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod route;
pub mod router;
pub mod site;
pub mod sitemap;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_helpers;
