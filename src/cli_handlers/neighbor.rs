use crate::cli_handlers::{remote_client, CliCommand};
use crate::config::ClientConfig;
use crate::core::models::{Direction, ServerId};
use crate::modules::ui::terminal::renderer::{playlist_line, TerminalRenderer};
use anyhow::Result;

pub struct NeighborCommand {
    pub config: ClientConfig,
    pub direction: Direction,
    pub id: String,
}

impl CliCommand for NeighborCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let client = remote_client(&self.config);
        let ui = TerminalRenderer::new();

        match client.neighbor(self.direction, ServerId::new(self.id))? {
            Some(item) => ui.print_message(&playlist_line(&item)),
            None => ui.print_message(&format!("No {} entry.", self.direction.segment())),
        }

        Ok(())
    }
}
