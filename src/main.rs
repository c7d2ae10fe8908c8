use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voracious::subscribe::{self, HttpMailingList, SubscribeError};
use voracious::{config, content, output, pipeline, series, sitemap};

#[derive(Parser)]
#[command(name = "voracious")]
#[command(about = "Content enrichment for a markdown blog")]
#[command(long_about = "\
Content enrichment for a markdown blog

Posts are markdown files with optional TOML front matter. The build resolves
series references, renders Open Graph preview images, and writes an enriched
manifest plus sitemap.xml.

Content structure:

  content/
  ├── config.toml                  # Site config: series, og, sitemap
  ├── index.md                     # → /
  ├── blog/
  │   ├── index.md                 # → /blog
  │   └── encrypting-data.md       # → /blog/encrypting-data
  └── sheets/
      └── flexbox.md               # → /sheets/flexbox

Front matter:

  +++
  title = \"Encrypting Data in the Browser\"
  series = \"web-crypto\"
  updated = 2023-02-01
  +++

Title resolution (first available wins):
  front matter title → first '# ' heading → file name

Images (existing files are never re-rendered without --force):
  <public>/og/content/<post>.png           title image
  <public>/og/content/<series-slug>.png    series image

Run 'voracious gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Public directory (logo and fonts are read from here, images written here)
    #[arg(long, default_value = "public", global = true)]
    public: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".voracious-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and list posts
    Scan,
    /// Run the full pipeline: scan → enrich → publish
    Build {
        /// Re-render preview images even when they already exist
        #[arg(long)]
        force: bool,
    },
    /// Write sitemap.xml only
    Sitemap,
    /// Validate content and config without writing anything
    Check,
    /// Add an email address to the mailing list
    Subscribe {
        email: String,
        /// Subscriber endpoint (falls back to [subscribe] api_url)
        #[arg(long, env = "VORACIOUS_EMAIL_API_URL")]
        api_url: Option<String>,
        /// API token
        #[arg(long, env = "VORACIOUS_EMAIL_API_TOKEN", hide_env_values = true)]
        api_token: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let files = content::scan(&cli.source)?;
            output::print_scan_output(&files, &cli.source);
        }
        Command::Build { force } => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);

            println!("==> Scanning {}", cli.source.display());
            let files = content::scan(&cli.source)?;
            output::print_unresolved_series(&series::unresolved_series(
                &files,
                &site_config.series,
            ));

            println!("==> Enriching {} files", files.len());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_pipeline_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = pipeline::build(
                files,
                &cli.public,
                &cli.temp_dir,
                &site_config,
                force,
                Some(tx),
            );
            printer.join().ok();
            let result = result?;

            output::print_build_summary(&result);
            println!("==> Build complete: {}", cli.public.display());
        }
        Command::Sitemap => {
            let site_config = config::load_config(&cli.source)?;
            let files = content::scan(&cli.source)?;
            let (path, entries) = sitemap::write_sitemap(&cli.public, &site_config, &files)?;
            println!("{}", output::format_sitemap_line(&path, entries));
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let files = pipeline::resolve_all(content::scan(&cli.source)?, &site_config.series);
            output::print_scan_output(&files, &cli.source);
            let unresolved = series::unresolved_series(&files, &site_config.series);
            output::print_unresolved_series(&unresolved);
            println!("==> Content is valid");
        }
        Command::Subscribe {
            email,
            api_url,
            api_token,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let url = api_url
                .or(site_config.subscribe.api_url)
                .ok_or(SubscribeError::MissingApiUrl)?;
            let list = HttpMailingList::new(url, api_token)?;
            let outcome = subscribe::subscribe(&list, &email);
            for line in output::format_subscribe_output(&email, &outcome) {
                if outcome.success {
                    println!("{}", line);
                } else {
                    eprintln!("{}", line);
                }
            }
            println!("{}", serde_json::to_string(&outcome)?);
            if !outcome.success {
                std::process::exit(1);
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
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
