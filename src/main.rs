use clap::Parser;
use tracing_subscriber::EnvFilter;

use sitegen::cli::{Cli, Command, Context};
use sitegen::output::human;
use sitegen::output::json::JsonEnvelope;

fn main() {
    let cli = Cli::parse();

    // Set up logging; diagnostics go to stderr so `--json` output stays parseable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        if cli.json {
            if let Ok(json) = JsonEnvelope::failure(&err).to_pretty() {
                println!("{json}");
            }
        }
        human::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Change working directory if --dir is specified
    if let Some(ref dir) = cli.dir {
        std::env::set_current_dir(dir)?;
    }

    let mut ctx = Context::load(cli)?;

    match &cli.command {
        Command::Fetch(args) => sitegen::cli::fetch::run(args, &mut ctx)?,
        Command::Sitemap(args) => sitegen::cli::sitemap::run(args, &ctx)?,
        Command::Shells(args) => sitegen::cli::shells::run(args, &ctx)?,
        Command::Feed(args) => sitegen::cli::feed::run(args, &ctx)?,
        Command::Prerender(args) => sitegen::cli::prerender::run(args, &ctx)?,
        Command::Build(args) => sitegen::cli::build::run(args, &mut ctx)?,
    }

    Ok(())
}
