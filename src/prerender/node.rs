//! Node.js bridge to the server-render bundle.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use super::{HeadTags, RenderedRoute, Renderer};
use crate::error::{Result, SiteError};
use crate::platform;

/// Imports the bundle and prints either its `routes` export or the result of
/// `render(route)` as JSON on stdout. Head values are stringified, so
/// provider objects with a `toString()` work as well as plain strings.
const RENDER_SCRIPT: &str = r#"
import { pathToFileURL } from 'node:url';
const [bundle, mode, route] = process.argv.slice(1);
const mod = await import(pathToFileURL(bundle).href);
const text = (v) => (v == null ? '' : String(v));
if (mode === 'routes') {
  process.stdout.write(JSON.stringify((mod.routes ?? []).map(String)));
} else {
  const out = (await mod.render(route)) ?? {};
  const head = out.headTags ?? {};
  process.stdout.write(JSON.stringify({
    html: text(out.html),
    headTags: { title: text(head.title), meta: text(head.meta), link: text(head.link) },
  }));
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOutput {
    #[serde(default)]
    html: String,
    #[serde(default)]
    head_tags: HeadTags,
}

/// Run the configured command that builds the server-render bundle.
pub fn build_server_bundle(command: &[String], cwd: &Path) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| SiteError::Build("empty server bundle command".into()))?;
    tracing::info!(command = %command.join(" "), "building server-render bundle");

    let status = platform::npm_cmd(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| SiteError::Build(format!("failed to spawn {program}: {e}")))?;
    if !status.success() {
        return Err(SiteError::Build(format!(
            "server bundle build failed ({status}): {}",
            command.join(" ")
        )));
    }
    Ok(())
}

pub struct NodeRenderer {
    runtime: String,
    bundle: PathBuf,
    cwd: PathBuf,
}

impl NodeRenderer {
    pub fn new(bundle: &Path, cwd: &Path) -> Result<Self> {
        Self::with_runtime("node", bundle, cwd)
    }

    pub fn with_runtime(runtime: &str, bundle: &Path, cwd: &Path) -> Result<Self> {
        if !bundle.exists() {
            return Err(SiteError::Build(format!(
                "server bundle {} not found; check prerender.ssr_out_dir and prerender.ssr_entry",
                bundle.display()
            )));
        }
        Ok(Self {
            runtime: runtime.to_string(),
            bundle: bundle.to_path_buf(),
            cwd: cwd.to_path_buf(),
        })
    }

    fn invoke(&self, route: &str, args: &[&str]) -> Result<String> {
        let render_err = |message: String| SiteError::Render {
            route: route.to_string(),
            message,
        };
        let output = Command::new(&self.runtime)
            .arg("--input-type=module")
            .arg("-e")
            .arg(RENDER_SCRIPT)
            .arg(&self.bundle)
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| render_err(format!("failed to spawn {}: {e}", self.runtime)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(render_err(stderr.trim().to_string()));
        }
        String::from_utf8(output.stdout).map_err(|e| render_err(format!("invalid UTF-8: {e}")))
    }
}

impl Renderer for NodeRenderer {
    fn routes(&mut self) -> Result<Vec<String>> {
        let stdout = self.invoke("*", &["routes"])?;
        parse_routes(&stdout)
    }

    fn render(&mut self, route: &str) -> Result<RenderedRoute> {
        let stdout = self.invoke(route, &["render", route])?;
        parse_render_output(route, &stdout)
    }
}

fn parse_routes(stdout: &str) -> Result<Vec<String>> {
    serde_json::from_str(stdout).map_err(|e| SiteError::Render {
        route: "*".into(),
        message: format!("bundle `routes` export is not a list of strings: {e}"),
    })
}

fn parse_render_output(route: &str, stdout: &str) -> Result<RenderedRoute> {
    let output: RenderOutput = serde_json::from_str(stdout).map_err(|e| SiteError::Render {
        route: route.to_string(),
        message: format!("unexpected render output: {e}"),
    })?;
    Ok(RenderedRoute {
        route: route.to_string(),
        html: output.html,
        head: output.head_tags,
    })
}
