use clap::Args;

use super::Context;
use crate::build::{self, StepReport};
use crate::content;
use crate::error::Result;
use crate::output;

#[derive(Args)]
pub struct ShellsArgs {}

pub fn run(_args: &ShellsArgs, ctx: &Context) -> anyhow::Result<()> {
    let report = shells_step(ctx)?;
    output::print_output(&report, ctx.format)?;
    Ok(())
}

pub(crate) fn shells_step(ctx: &Context) -> Result<StepReport> {
    let posts = content::load_metadata(&ctx.paths.metadata)?;
    build::write_blog_shells(&ctx.config, &ctx.paths.output, &posts)
}
