use crate::cli_handlers::{remote_client, CliCommand};
use crate::config::ClientConfig;
use crate::core::models::ServerId;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct DeleteCommand {
    pub config: ClientConfig,
    pub id: String,
}

impl CliCommand for DeleteCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let client = remote_client(&self.config);
        let ui = TerminalRenderer::new();

        match client.delete(ServerId::new(self.id)) {
            Ok(()) => ui.print_message("Movie removed."),
            Err(err) => {
                tracing::debug!(error = %err, "delete rejected");
                ui.print_error("Unable to delete movie!");
            }
        }

        Ok(())
    }
}
