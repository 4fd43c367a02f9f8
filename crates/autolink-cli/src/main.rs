use anyhow::Result;
use clap::Parser;
use tracing::debug;

use autolink_cli::{
    cli::{Cli, Commands},
    commands,
    config::{CliConfig, Overrides},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean JSON stream
    let level = cli.level_filter();
    let env_filter = format!("autolink_cli={level},autolink_core={level},autolink_config={level}");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let skip_headers = matches!(
        cli.command,
        Commands::Link {
            skip_headers: true,
            ..
        }
    );
    let config = CliConfig::load(
        cli.config.as_deref(),
        Overrides {
            definitions: cli.definitions,
            parallelism: cli.parallelism,
            site_origin: cli.site_origin,
            skip_headers,
        },
    )?;
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Link {
            input,
            output,
            page,
            pretty,
            report,
            ..
        } => commands::link::execute(
            config,
            commands::link::LinkArgs {
                input,
                output,
                page,
                pretty,
                report,
            },
        ),
        Commands::Check { json } => commands::check::execute(config, json),
        Commands::Candidates { input, page } => {
            commands::candidates::execute(config, input, page)
        }
    }
}
