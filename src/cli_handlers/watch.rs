use crate::application::app::Application;
use crate::cli_handlers::{transport, CliCommand};
use crate::config::ClientConfig;
use crate::modules::remote::dispatcher::ThreadDispatcher;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct WatchCommand {
    pub config: ClientConfig,
}

impl CliCommand for WatchCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        tracing::info!(
            server = %self.config.server_url,
            every = ?self.config.poll_interval(),
            "watching playlist"
        );

        let mut app = Application::new(&self.config)
            .with_presenter(Box::new(TerminalRenderer::new().redrawing()));
        let dispatcher = ThreadDispatcher::new(transport(&self.config), app.event_sender());
        app = app.with_dispatcher(Box::new(dispatcher));

        app.run()
    }
}
