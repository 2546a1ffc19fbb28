pub mod feed;
pub mod shell;
pub mod sitemap;

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{self, PostMetadata};
use crate::error::{Result, SiteError};
use crate::output::CommandOutput;

/// Outcome of one generation step.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub files_written: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CommandOutput for StepReport {
    fn human_display(&self) -> String {
        let base = match self.files_written.len() {
            0 => format!("{}: nothing written", self.step),
            1 => format!("{}: wrote {}", self.step, self.files_written[0].display()),
            n => format!("{}: wrote {n} files", self.step),
        };
        match &self.note {
            Some(note) => format!("{base} ({note})"),
            None => base,
        }
    }
}

/// Write `{output}/sitemap.xml`.
pub fn write_sitemap(
    config: &SiteConfig,
    output: &Path,
    posts: &[PostMetadata],
    today: NaiveDate,
) -> Result<StepReport> {
    let xml = sitemap::generate_sitemap(
        &config.sitemap.static_routes,
        &config.site.hostname,
        posts,
        today,
    )?;
    fs::create_dir_all(output)?;
    let path = output.join("sitemap.xml");
    fs::write(&path, xml)?;

    let published = content::published(posts).len();
    tracing::info!(
        static_routes = config.sitemap.static_routes.len(),
        posts = published,
        "sitemap written"
    );
    Ok(StepReport {
        step: "sitemap",
        files_written: vec![path],
        note: Some(format!(
            "{} urls",
            config.sitemap.static_routes.len() + published
        )),
    })
}

/// Write `{output}/rss.xml`.
pub fn write_feed(config: &SiteConfig, output: &Path, posts: &[PostMetadata]) -> Result<StepReport> {
    let xml = feed::generate_rss(&config.site, posts)?;
    fs::create_dir_all(output)?;
    let path = output.join("rss.xml");
    fs::write(&path, xml)?;
    Ok(StepReport {
        step: "feed",
        files_written: vec![path],
        note: Some(format!("{} items", content::published(posts).len())),
    })
}

/// Write `{output}/blog/{slug}/index.html` for every published post.
pub fn write_blog_shells(
    config: &SiteConfig,
    output: &Path,
    posts: &[PostMetadata],
) -> Result<StepReport> {
    let published = content::published(posts);
    if published.is_empty() {
        tracing::info!("no published posts; skipping blog shells");
        return Ok(StepReport {
            step: "blog shells",
            files_written: Vec::new(),
            note: Some("no published posts".into()),
        });
    }

    let mut files_written = Vec::with_capacity(published.len());
    for post in published {
        let dir = blog_dir(output, &post.slug)?;
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, shell::generate_html_shell(post, &config.site))?;
        tracing::debug!(slug = %post.slug, "wrote blog shell");
        files_written.push(path);
    }

    Ok(StepReport {
        step: "blog shells",
        files_written,
        note: None,
    })
}

/// `{output}/blog/{slug}`; the slug must be exactly one plain path segment.
fn blog_dir(output: &Path, slug: &str) -> Result<PathBuf> {
    let mut components = Path::new(slug).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) if segment == slug => {
            Ok(output.join("blog").join(segment))
        }
        _ => Err(SiteError::Build(format!(
            "post slug '{slug}' is not a single path segment"
        ))),
    }
}
