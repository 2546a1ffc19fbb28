//! Build-time prerendering of client routes.
//!
//! The client build leaves an `index.html` template with an empty hydration
//! root. For each prerendered route the server bundle's `render` is called,
//! its collected head tags are spliced in before `</head>` and its markup is
//! placed inside the root element. Shell-only routes get the template as-is.

pub mod node;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::build::shell::hydration_root;
use crate::build::StepReport;
use crate::config::{ResolvedPaths, SiteConfig};
use crate::error::{Result, SiteError};
use node::NodeRenderer;

/// Head fragments collected while rendering one route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadTags {
    pub title: String,
    pub meta: String,
    pub link: String,
}

impl HeadTags {
    /// True when rendering produced neither a title nor any meta tags,
    /// which means the head-collection context never ran.
    pub fn is_missing(&self) -> bool {
        self.title.trim().is_empty() && self.meta.trim().is_empty()
    }

    pub fn to_html(&self) -> String {
        [&self.title, &self.meta, &self.link]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRoute {
    pub route: String,
    pub html: String,
    pub head: HeadTags,
}

/// Server-side renderer for the application's route tree.
///
/// `render` takes `&mut self`: head collection uses one mutable context per
/// render, so routes are rendered strictly one after another.
pub trait Renderer {
    /// The routes the server bundle exports for prerendering.
    fn routes(&mut self) -> Result<Vec<String>>;

    fn render(&mut self, route: &str) -> Result<RenderedRoute>;
}

/// Output file for a route: `/` maps to `index.html`, anything else to
/// `{route}/index.html`.
pub fn route_output_path(output: &Path, route: &str) -> Result<PathBuf> {
    let relative = Path::new(route.trim_start_matches('/'));
    if !route.starts_with('/')
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(SiteError::Build(format!(
            "route '{route}' must be an absolute path without '.' or '..' segments"
        )));
    }
    Ok(output.join(relative).join("index.html"))
}

/// Splice a rendered route into the client template.
pub fn splice(template: &str, rendered: &RenderedRoute, root_id: &str) -> Result<String> {
    let invariant = |message: String| SiteError::Invariant {
        route: rendered.route.clone(),
        message,
    };

    let head_end = template
        .find("</head>")
        .ok_or_else(|| invariant("template has no </head>".into()))?;
    let marker = hydration_root(root_id, "");
    if !template.contains(&marker) {
        return Err(invariant(format!("template has no empty hydration root {marker}")));
    }

    let head = rendered.head.to_html();
    let mut out = String::with_capacity(template.len() + head.len() + rendered.html.len() + 2);
    out.push_str(&template[..head_end]);
    out.push_str(&head);
    out.push('\n');
    out.push_str(&template[head_end..]);

    Ok(out.replacen(&marker, &hydration_root(root_id, &rendered.html), 1))
}

/// Render every route in order and write the spliced documents.
pub fn prerender_routes<R: Renderer + ?Sized>(
    renderer: &mut R,
    template: &str,
    routes: &[String],
    output: &Path,
    root_id: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(routes.len());
    for route in routes {
        let path = route_output_path(output, route)?;
        let rendered = renderer.render(route)?;
        if rendered.head.is_missing() {
            return Err(SiteError::Invariant {
                route: route.clone(),
                message: "no title or meta head tags were collected; \
                          is the route tree wrapped in the head provider?"
                    .into(),
            });
        }
        let html = splice(template, &rendered, root_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::info!(route = %route, path = %path.display(), "prerendered");
        written.push(path);
    }
    Ok(written)
}

/// Write the unmodified template for each shell-only route.
pub fn write_shell_routes(template: &str, routes: &[String], output: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(routes.len());
    for route in routes {
        let path = route_output_path(output, route)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, template)?;
        tracing::debug!(route = %route, "wrote shell route");
        written.push(path);
    }
    Ok(written)
}

/// Read the client-built template; its absence means the client build has not run.
pub fn read_template(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SiteError::ConfigInvalid {
            message: format!(
                "client template {} not found; run the client build first",
                path.display()
            ),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Prerender configured (or bundle-exported) routes and write shell routes.
///
/// The template is held in memory, so overwriting the top-level
/// `index.html` with the root route leaves shells and later routes intact.
pub fn prerender_with<R: Renderer + ?Sized>(
    renderer: &mut R,
    template: &str,
    config: &SiteConfig,
    output: &Path,
) -> Result<StepReport> {
    let routes = match &config.prerender.routes {
        Some(routes) => routes.clone(),
        None => renderer.routes()?,
    };
    tracing::info!(count = routes.len(), "prerendering routes");

    let mut files_written = prerender_routes(
        renderer,
        template,
        &routes,
        output,
        &config.prerender.root_id,
    )?;
    let rendered = files_written.len();
    let shells = write_shell_routes(template, &config.prerender.shell_routes, output)?;
    let shell_count = shells.len();
    files_written.extend(shells);

    Ok(StepReport {
        step: "prerender",
        files_written,
        note: Some(format!("{rendered} rendered, {shell_count} shell")),
    })
}

/// The full orchestration: check the client build, build the server bundle,
/// render through Node.js, then remove the temporary bundle directory.
pub fn run_prerender(config: &SiteConfig, paths: &ResolvedPaths) -> Result<StepReport> {
    let template = read_template(&paths.template)?;

    node::build_server_bundle(&config.prerender.ssr_command, &paths.root)?;
    let mut renderer = NodeRenderer::new(&paths.ssr_bundle, &paths.root)?;

    let report = prerender_with(&mut renderer, &template, config, &paths.output)?;

    if paths.ssr_out.exists() {
        fs::remove_dir_all(&paths.ssr_out)?;
        tracing::debug!(dir = %paths.ssr_out.display(), "removed server bundle");
    }
    Ok(report)
}
