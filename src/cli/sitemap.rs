use clap::Args;

use super::Context;
use crate::build::{self, StepReport};
use crate::content::{self, timestamp};
use crate::error::Result;
use crate::output;

#[derive(Args)]
pub struct SitemapArgs {}

pub fn run(_args: &SitemapArgs, ctx: &Context) -> anyhow::Result<()> {
    let report = sitemap_step(ctx)?;
    output::print_output(&report, ctx.format)?;
    Ok(())
}

pub(crate) fn sitemap_step(ctx: &Context) -> Result<StepReport> {
    let posts = content::load_metadata(&ctx.paths.metadata)?;
    build::write_sitemap(&ctx.config, &ctx.paths.output, &posts, timestamp::today())
}
