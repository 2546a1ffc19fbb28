use std::time::Instant;

use clap::Args;
use serde::Serialize;

use super::fetch::{fetch_step, ContentSource};
use super::feed::feed_step;
use super::shells::shells_step;
use super::sitemap::sitemap_step;
use super::Context;
use crate::build::StepReport;
use crate::fetch::FetchReport;
use crate::output::{self, human, CommandOutput, OutputFormat};
use crate::prerender;

#[derive(Args)]
pub struct BuildArgs {
    /// Reuse the existing metadata file instead of querying the canister
    #[arg(long)]
    pub skip_fetch: bool,

    /// Skip the server bundle and route prerendering
    #[arg(long)]
    pub skip_prerender: bool,

    #[command(flatten)]
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct BuildSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchReport>,
    pub steps: Vec<StepReport>,
    pub duration_ms: u64,
}

impl CommandOutput for BuildSummary {
    fn human_display(&self) -> String {
        let files: usize = self.steps.iter().map(|s| s.files_written.len()).sum();
        format!(
            "Built {} steps ({} files) in {:.1}s",
            self.steps.len() + usize::from(self.fetch.is_some()),
            files,
            self.duration_ms as f64 / 1000.0
        )
    }
}

pub fn run(args: &BuildArgs, ctx: &mut Context) -> anyhow::Result<()> {
    let start = Instant::now();
    args.source.apply(&mut ctx.config);

    let total = 3 + usize::from(!args.skip_fetch) + usize::from(!args.skip_prerender);
    let mut index = 0;
    let human_mode = ctx.format == OutputFormat::Human;
    let mut announce = |name: &str| {
        index += 1;
        if human_mode {
            human::step(index, total, name);
        }
    };

    let fetch = if args.skip_fetch {
        None
    } else {
        announce("fetch");
        Some(report(fetch_step(ctx)?, ctx.format))
    };

    let mut steps = Vec::new();
    announce("sitemap");
    steps.push(report(sitemap_step(ctx)?, ctx.format));
    announce("blog shells");
    steps.push(report(shells_step(ctx)?, ctx.format));
    announce("feed");
    steps.push(report(feed_step(ctx)?, ctx.format));
    if !args.skip_prerender {
        announce("prerender");
        steps.push(report(
            prerender::run_prerender(&ctx.config, &ctx.paths)?,
            ctx.format,
        ));
    }

    let summary = BuildSummary {
        fetch,
        steps,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    output::print_output(&summary, ctx.format)?;
    Ok(())
}

/// Echo a step's result in human mode as it completes.
fn report<T: CommandOutput>(result: T, format: OutputFormat) -> T {
    if format == OutputFormat::Human {
        human::info(&result.human_display());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summary_display() {
        let summary = BuildSummary {
            fetch: None,
            steps: vec![
                StepReport {
                    step: "sitemap",
                    files_written: vec![PathBuf::from("dist/sitemap.xml")],
                    note: None,
                },
                StepReport {
                    step: "blog shells",
                    files_written: vec![
                        PathBuf::from("dist/blog/a/index.html"),
                        PathBuf::from("dist/blog/b/index.html"),
                    ],
                    note: None,
                },
            ],
            duration_ms: 1500,
        };
        assert_eq!(summary.human_display(), "Built 2 steps (3 files) in 1.5s");
    }
}
