use clap::{Parser, Subcommand};
use placard::{config, generate, output, scan};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "placard")]
#[command(about = "Static page renderer for headless-CMS layout documents")]
#[command(long_about = "\
Static page renderer for headless-CMS layout documents

Layout documents are JSON exports of a headless CMS delivery API: page
metadata plus named placeholders holding ordered component instances.
Placard renders them into a plain HTML site.

Content structure:

  content/
  ├── config.toml              # Site config (optional)
  ├── index.json               # Site root page (slug \"index\" → /)
  ├── about.json               # → /about/
  └── sections/
      └── pricing.json         # → /pricing/ (slug comes from the document)

Each document names its own slug; subdirectories are organizational only.
Documents with a navOrder appear in the site navigation, sorted by it.

Component families: Navigation, LinkList, Promo, FeatureGrid,
RichTextBlock. Unknown families and unbound slots degrade to visible
placeholders instead of failing the build.

Run 'placard gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".placard-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from a scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            scan::write_manifest(&manifest_path(&cli.temp_dir), &manifest)?;
            let docs = load_documents(&manifest)?;
            output::print_scan_output(&manifest, &docs);
        }
        Command::Generate => {
            let manifest = scan::read_manifest(&manifest_path(&cli.temp_dir))?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest, &cli.output)?;
            output::print_generate_output(&manifest, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            scan::write_manifest(&manifest_path(&cli.temp_dir), &manifest)?;
            let docs = load_documents(&manifest)?;
            output::print_scan_output(&manifest, &docs);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest, &cli.output)?;
            output::print_generate_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let docs = load_documents(&manifest)?;
            output::print_scan_output(&manifest, &docs);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn manifest_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("manifest.json")
}

/// Reload full documents for the component breakdown in scan output.
fn load_documents(
    manifest: &scan::Manifest,
) -> Result<BTreeMap<String, placard::document::LayoutDocument>, scan::ScanError> {
    let mut docs = BTreeMap::new();
    for page in &manifest.pages {
        let doc = scan::load_document(Path::new(&page.source_path))?;
        docs.insert(page.slug.clone(), doc);
    }
    Ok(docs)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
