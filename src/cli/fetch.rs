use clap::Args;

use super::Context;
use crate::canister::ContentClient;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::fetch::{self, FetchReport};
use crate::output::{self, human, OutputFormat};

/// Where to read post metadata from; overrides `[content]` in site.toml.
#[derive(Args, Debug, Default)]
pub struct ContentSource {
    /// Content canister identifier
    #[arg(long, env = "CONTENT_CANISTER_ID")]
    pub canister_id: Option<String>,

    /// Query gateway host for the content canister
    #[arg(long, env = "CONTENT_HOST")]
    pub host: Option<String>,
}

impl ContentSource {
    pub fn apply(&self, config: &mut SiteConfig) {
        if let Some(id) = &self.canister_id {
            config.content.canister_id = Some(id.clone());
        }
        if let Some(host) = &self.host {
            config.content.host = host.clone();
        }
    }
}

#[derive(Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: ContentSource,
}

pub fn run(args: &FetchArgs, ctx: &mut Context) -> anyhow::Result<()> {
    args.source.apply(&mut ctx.config);
    let report = fetch_step(ctx)?;
    output::print_output(&report, ctx.format)?;
    Ok(())
}

/// Fetch metadata using the configured content source.
pub(crate) fn fetch_step(ctx: &Context) -> Result<FetchReport> {
    // Resolve the identifier before any network or file I/O
    let canister_id = ctx.config.canister_id()?;
    let client = ContentClient::new(&ctx.config.content.host, canister_id);
    if ctx.format == OutputFormat::Human {
        human::info(&format!("Querying {}", client.endpoint()));
    }

    let report = fetch::fetch_metadata(&client, &ctx.paths.metadata)?;
    if report.oversized {
        human::warning(&format!(
            "Metadata payload is {:.1} MiB, above the 2 MiB soft limit",
            report.bytes as f64 / (1024.0 * 1024.0)
        ));
    }
    Ok(report)
}
