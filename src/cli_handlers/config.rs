use crate::cli_handlers::CliCommand;
use crate::config::ClientConfig;
use crate::modules::storage::config_file::TomlConfigStore;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct ConfigCommand {
    pub config: ClientConfig,
}

impl CliCommand for ConfigCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let store = TomlConfigStore::new()?;
        let ui = TerminalRenderer::new();

        ui.print_message(&format!("# {}", store.path().display()));
        ui.print_message(&toml::to_string_pretty(&self.config)?);

        Ok(())
    }
}
