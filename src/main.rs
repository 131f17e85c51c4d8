use clap::{Parser, Subcommand};
use queenchufe::compat::CompatibilityResult;
use queenchufe::route::{self, Route};
use queenchufe::site::Site;
use queenchufe::{config, generate, metadata, output, sitemap, verify};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "queenchufe")]
#[command(about = "Static site generator for travel plug and voltage lookups")]
#[command(long_about = "\
Static site generator for travel plug and voltage lookups

Every ordered pair of countries gets a page at /{origin}/{destination}
telling whether a plug adapter is needed and whether the voltage matches.

Site structure:

  site/
  ├── config.toml                  # Site config (optional, overrides stock defaults)
  ├── data/
  │   ├── countries.json           # Country table: plugs, voltage, frequency
  │   └── names.es.json            # Display names for locale \"es\" (optional)
  └── assets/                      # Copied to the output root (plug images, favicon)

Unknown paths are served the home page by the static host; its script shows
the not-found notice for pair paths whose countries are missing.

Run 'queenchufe gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full site into the output directory
    Build,
    /// Validate config and dataset without writing anything
    Check,
    /// Show how a single path resolves
    Resolve {
        /// Request path, e.g. /es/fr
        path: String,
        /// Print the full page metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print sitemap.xml to stdout
    Sitemap,
    /// Check every sitemap URL against a built output directory
    Verify,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site = Site::load(&cli.source)?;
            init_thread_pool(&site.config.processing);
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let summary = generate::generate(&site, &cli.output)?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", summary.output_dir.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            output::print_check_output(&site);
            println!("==> Site is valid");
        }
        Command::Resolve { path, json } => {
            let site = Site::load(&cli.source)?;
            let ctx = site.context();
            let route = route::resolve(&path, &site.dataset);
            let meta = metadata::for_route(&ctx, &route);
            if json {
                let (kind, compatibility) = match &route {
                    Route::Home => ("home", None),
                    Route::NotFound { .. } => ("not_found", None),
                    Route::Resolved(pair) => {
                        ("resolved", Some(CompatibilityResult::between(pair)))
                    }
                };
                let doc = json!({
                    "path": path,
                    "route": kind,
                    "compatibility": compatibility,
                    "metadata": meta,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                output::print_resolve_output(&path, &route, &meta);
            }
        }
        Command::Sitemap => {
            let site = Site::load(&cli.source)?;
            let entries =
                sitemap::entries(&site.dataset, &site.config.sitemap, site.config.base_url());
            print!("{}", sitemap::render_sitemap(&entries));
        }
        Command::Verify => {
            let site = Site::load(&cli.source)?;
            let results = verify::verify_sitemap(&site, &cli.output);
            output::print_verify_output(&results);
            let failures = results.iter().filter(|(_, check)| !check.is_ok()).count();
            if failures > 0 {
                return Err(format!("{failures} sitemap URLs failed verification").into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
