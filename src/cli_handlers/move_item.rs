use crate::cli_handlers::{remote_client, CliCommand};
use crate::config::ClientConfig;
use crate::core::models::ServerId;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct MoveCommand {
    pub config: ClientConfig,
    pub id: String,
    pub before: Option<String>,
}

impl CliCommand for MoveCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let client = remote_client(&self.config);
        let ui = TerminalRenderer::new();

        let moved = ServerId::new(self.id);
        let before = self.before.map(ServerId::new);
        if let Err(err) = client.move_before(moved.clone(), before.clone()) {
            tracing::debug!(error = %err, "move rejected");
            ui.print_error("Failed to save playlist");
            return Ok(());
        }

        match before {
            Some(before) => ui.print_message(&format!("Moved {} before {}.", moved, before)),
            None => ui.print_message(&format!("Moved {} to the end.", moved)),
        }
        ui.print_playlist(&client.playlist()?);

        Ok(())
    }
}
