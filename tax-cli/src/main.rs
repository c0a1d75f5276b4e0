use clap::Parser;
use tracing::debug;

use tax_cli::commands;
use tax_cli::logging::init_logging;
use tax_cli::{Cli, CliConfig, Settings};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.global.config.as_deref())?;
    let settings = Settings::resolve(&cli.global, config);
    init_logging(&settings.log_level);
    debug!(?settings, "resolved settings");

    let output = commands::run(&cli.command, &settings)?;
    println!("{output}");

    Ok(())
}
