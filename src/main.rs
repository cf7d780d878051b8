use anyhow::Result;
use clap::Parser;
use media_remote::cli::Cli;
use media_remote::cli_handlers::from_cli;
use media_remote::core::traits::ConfigStore;
use media_remote::modules::storage::config_file::TomlConfigStore;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TomlConfigStore::new()?.load()?.with_server(cli.server);

    from_cli(cli.command, config).execute()
}
