use clap::Args;

use super::Context;
use crate::output;
use crate::prerender;

#[derive(Args)]
pub struct PrerenderArgs {}

pub fn run(_args: &PrerenderArgs, ctx: &Context) -> anyhow::Result<()> {
    let report = prerender::run_prerender(&ctx.config, &ctx.paths)?;
    output::print_output(&report, ctx.format)?;
    Ok(())
}
