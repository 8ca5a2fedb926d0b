use anyhow::Result;
use clap::Parser;

use website_generator::cli::{commands, Cli};
use website_generator::config::WebsiteGeneratorConfig;
use website_generator::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    WebsiteGeneratorConfig::load_env_file()?;
    let config = WebsiteGeneratorConfig::load()?;
    init_telemetry(&config.observability.log_level)?;

    tokio::runtime::Runtime::new()?.block_on(commands::run(cli.command, config))
}
