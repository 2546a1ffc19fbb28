pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub sitemap: SitemapSection,
    #[serde(default)]
    pub prerender: PrerenderSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "defaults::site_name")]
    pub name: String,
    /// Absolute origin used for canonical, Open Graph and sitemap URLs.
    #[serde(default = "defaults::hostname")]
    pub hostname: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "defaults::language")]
    pub language: String,
    /// Falls back to `{hostname}/og-image.png`.
    #[serde(default)]
    pub default_image: Option<String>,
    /// Falls back to `{hostname}/logo.png`.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: defaults::site_name(),
            hostname: defaults::hostname(),
            description: String::new(),
            language: defaults::language(),
            default_image: None,
            logo: None,
        }
    }
}

impl SiteSection {
    /// Hostname without a trailing slash.
    pub fn base(&self) -> &str {
        self.hostname.trim_end_matches('/')
    }

    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    pub fn blog_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.base(), slug)
    }

    pub fn default_image(&self) -> String {
        self.default_image
            .clone()
            .unwrap_or_else(|| self.absolute_url("/og-image.png"))
    }

    pub fn logo(&self) -> String {
        self.logo
            .clone()
            .unwrap_or_else(|| self.absolute_url("/logo.png"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default)]
    pub canister_id: Option<String>,
    #[serde(default = "defaults::content_host")]
    pub host: String,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            canister_id: None,
            host: defaults::content_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
    #[serde(default = "defaults::metadata_path")]
    pub metadata_path: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            metadata_path: defaults::metadata_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapSection {
    #[serde(default = "defaults::static_routes")]
    pub static_routes: Vec<SitemapRoute>,
}

impl Default for SitemapSection {
    fn default() -> Self {
        Self {
            static_routes: defaults::static_routes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerenderSection {
    /// Routes to server-render. When unset, the server bundle's exported
    /// `routes` list is used.
    #[serde(default)]
    pub routes: Option<Vec<String>>,
    /// Routes that get the unmodified client template.
    #[serde(default = "defaults::shell_routes")]
    pub shell_routes: Vec<String>,
    /// Command (program + args) that builds the server-render bundle.
    #[serde(default = "defaults::ssr_command")]
    pub ssr_command: Vec<String>,
    #[serde(default = "defaults::ssr_out_dir")]
    pub ssr_out_dir: String,
    /// Bundle file inside `ssr_out_dir`.
    #[serde(default = "defaults::ssr_entry")]
    pub ssr_entry: String,
    /// `id` of the empty hydration root element in the client template.
    #[serde(default = "defaults::root_id")]
    pub root_id: String,
}

impl Default for PrerenderSection {
    fn default() -> Self {
        Self {
            routes: None,
            shell_routes: defaults::shell_routes(),
            ssr_command: defaults::ssr_command(),
            ssr_out_dir: defaults::ssr_out_dir(),
            ssr_entry: defaults::ssr_entry(),
            root_id: defaults::root_id(),
        }
    }
}

/// Sitemap change frequency, per the sitemaps.org protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapRoute {
    pub path: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapRoute {
    pub fn new(path: impl Into<String>, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            path: path.into(),
            changefreq,
            priority,
        }
    }
}

/// Resolved absolute paths for the build inputs and outputs.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub output: PathBuf,
    pub metadata: PathBuf,
    /// Client-built `index.html`, the prerender template.
    pub template: PathBuf,
    pub ssr_out: PathBuf,
    pub ssr_bundle: PathBuf,
}

impl SiteConfig {
    /// Load config from a `site.toml` file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SiteError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let config: SiteConfig =
            toml::from_str(&contents).map_err(|e| SiteError::ConfigInvalid {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if present, otherwise use built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        for route in &self.sitemap.static_routes {
            if !route.path.starts_with('/') {
                return Err(SiteError::ConfigInvalid {
                    message: format!("sitemap route '{}' must start with '/'", route.path),
                });
            }
            if !(0.0..=1.0).contains(&route.priority) {
                return Err(SiteError::ConfigInvalid {
                    message: format!(
                        "sitemap route '{}' has priority {} outside 0.0-1.0",
                        route.path, route.priority
                    ),
                });
            }
        }
        if self.prerender.ssr_command.is_empty() {
            return Err(SiteError::ConfigInvalid {
                message: "prerender.ssr_command must not be empty".into(),
            });
        }
        Ok(())
    }

    /// The content-service identifier; missing is a configuration error.
    pub fn canister_id(&self) -> Result<&str> {
        self.content
            .canister_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(SiteError::MissingConfig {
                key: "content.canister_id",
                env: "CONTENT_CANISTER_ID",
            })
    }

    /// Resolve all paths relative to the project root.
    pub fn resolve_paths(&self, project_root: &Path) -> ResolvedPaths {
        let output = project_root.join(&self.build.output_dir);
        let ssr_out = project_root.join(&self.prerender.ssr_out_dir);
        ResolvedPaths {
            root: project_root.to_path_buf(),
            template: output.join("index.html"),
            metadata: project_root.join(&self.build.metadata_path),
            ssr_bundle: ssr_out.join(&self.prerender.ssr_entry),
            ssr_out,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.name, "Hello World Co-Op");
        assert_eq!(config.build.output_dir, "dist");
        assert_eq!(config.sitemap.static_routes.len(), 4);
        assert_eq!(config.sitemap.static_routes[0].path, "/");
        assert!(config.prerender.routes.is_none());
        assert_eq!(config.prerender.root_id, "root");
    }

    #[test]
    fn test_parse_static_routes() {
        let config: SiteConfig = toml::from_str(
            r#"
[site]
hostname = "https://coop.example/"

[[sitemap.static_routes]]
path = "/"
changefreq = "daily"
priority = 1.0

[[sitemap.static_routes]]
path = "/about"
changefreq = "monthly"
priority = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.sitemap.static_routes.len(), 2);
        assert_eq!(config.sitemap.static_routes[1].changefreq, ChangeFreq::Monthly);
        assert_eq!(config.site.base(), "https://coop.example");
        assert_eq!(config.site.blog_url("hi"), "https://coop.example/blog/hi");
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_changefreq_rejected() {
        let parsed: std::result::Result<SiteConfig, _> = toml::from_str(
            r#"
[[sitemap.static_routes]]
path = "/"
changefreq = "fortnightly"
priority = 1.0
"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_priority_range() {
        let mut config = SiteConfig::default();
        config.sitemap.static_routes = vec![SitemapRoute::new("/", ChangeFreq::Daily, 1.5)];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("outside 0.0-1.0"));
    }

    #[test]
    fn test_validate_relative_path() {
        let mut config = SiteConfig::default();
        config.sitemap.static_routes = vec![SitemapRoute::new("about", ChangeFreq::Daily, 0.5)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_canister_id_missing() {
        let config = SiteConfig::default();
        let err = config.canister_id().unwrap_err();
        assert!(matches!(err, SiteError::MissingConfig { .. }));
        assert!(err.to_string().contains("CONTENT_CANISTER_ID"));
    }

    #[test]
    fn test_canister_id_blank_is_missing() {
        let mut config = SiteConfig::default();
        config.content.canister_id = Some("  ".into());
        assert!(config.canister_id().is_err());
        config.content.canister_id = Some("abcde-aaaab".into());
        assert_eq!(config.canister_id().unwrap(), "abcde-aaaab");
    }

    #[test]
    fn test_image_fallbacks() {
        let mut site = SiteSection::default();
        site.hostname = "https://coop.example".into();
        assert_eq!(site.default_image(), "https://coop.example/og-image.png");
        assert_eq!(site.logo(), "https://coop.example/logo.png");
        site.default_image = Some("https://cdn.example/og.png".into());
        assert_eq!(site.default_image(), "https://cdn.example/og.png");
    }

    #[test]
    fn test_resolve_paths() {
        let config = SiteConfig::default();
        let paths = config.resolve_paths(Path::new("/project"));
        assert_eq!(paths.output, PathBuf::from("/project/dist"));
        assert_eq!(paths.template, PathBuf::from("/project/dist/index.html"));
        assert_eq!(
            paths.metadata,
            PathBuf::from("/project/data/blog-metadata.json")
        );
        assert_eq!(
            paths.ssr_bundle,
            PathBuf::from("/project/dist-ssr/entry-server.js")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        assert!(matches!(
            SiteConfig::load(&path),
            Err(SiteError::ConfigNotFound { .. })
        ));
        let config = SiteConfig::load_or_default(&path).unwrap();
        assert_eq!(config.site.name, "Hello World Co-Op");
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        std::fs::write(&path, "[site\nname = ").unwrap();
        assert!(matches!(
            SiteConfig::load(&path),
            Err(SiteError::ConfigInvalid { .. })
        ));
    }
}
