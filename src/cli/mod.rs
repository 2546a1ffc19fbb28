pub mod build;
pub mod feed;
pub mod fetch;
pub mod prerender;
pub mod shells;
pub mod sitemap;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{ResolvedPaths, SiteConfig, CONFIG_FILE};
use crate::error::Result;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sitegen",
    about = "Build-time SEO generation: metadata fetch, sitemap, RSS, blog shells and prerendering",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to config file (defaults to ./site.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project directory
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Absolute origin for canonical and Open Graph URLs
    #[arg(long, global = true, env = "SITE_HOSTNAME")]
    pub hostname: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch post metadata from the content canister
    Fetch(fetch::FetchArgs),

    /// Generate sitemap.xml from static routes and published posts
    Sitemap(sitemap::SitemapArgs),

    /// Generate crawler HTML shells for published blog posts
    Shells(shells::ShellsArgs),

    /// Generate the RSS feed of published posts
    Feed(feed::FeedArgs),

    /// Prerender client routes through the server-render bundle
    Prerender(prerender::PrerenderArgs),

    /// Run every step in order
    Build(build::BuildArgs),
}

/// Loaded configuration plus everything derived from global flags.
pub struct Context {
    pub config: SiteConfig,
    pub paths: ResolvedPaths,
    pub format: OutputFormat,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::load_or_default(&PathBuf::from(CONFIG_FILE))?,
        };
        if let Some(hostname) = &cli.hostname {
            config.site.hostname = hostname.clone();
        }
        let paths = config.resolve_paths(&std::env::current_dir()?);
        Ok(Self {
            config,
            paths,
            format: OutputFormat::from_flag(cli.json),
        })
    }
}
