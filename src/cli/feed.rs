use clap::Args;

use super::Context;
use crate::build::{self, StepReport};
use crate::content;
use crate::error::Result;
use crate::output;

#[derive(Args)]
pub struct FeedArgs {}

pub fn run(_args: &FeedArgs, ctx: &Context) -> anyhow::Result<()> {
    let report = feed_step(ctx)?;
    output::print_output(&report, ctx.format)?;
    Ok(())
}

pub(crate) fn feed_step(ctx: &Context) -> Result<StepReport> {
    let posts = content::load_metadata(&ctx.paths.metadata)?;
    build::write_feed(&ctx.config, &ctx.paths.output, &posts)
}
