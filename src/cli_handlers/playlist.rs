use crate::cli_handlers::{remote_client, CliCommand};
use crate::config::ClientConfig;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct PlaylistCommand {
    pub config: ClientConfig,
}

impl CliCommand for PlaylistCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let client = remote_client(&self.config);
        let ui = TerminalRenderer::new();

        let items = client.playlist()?;
        ui.print_playlist(&items);

        Ok(())
    }
}
