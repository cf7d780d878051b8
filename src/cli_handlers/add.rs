use crate::application::app::Application;
use crate::cli_handlers::{transport, CliCommand};
use crate::config::ClientConfig;
use crate::core::models::PlaylistItem;
use crate::modules::dispatch::actions::Action;
use crate::modules::remote::dispatcher::ThreadDispatcher;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::modules::view::renderer;
use anyhow::{Context, Result};

pub struct AddCommand {
    pub config: ClientConfig,
    pub path: String,
    pub play: bool,
}

impl CliCommand for AddCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let ui = TerminalRenderer::new();
        let mut app = Application::new(&self.config).with_presenter(Box::new(TerminalRenderer::new()));
        let dispatcher = ThreadDispatcher::new(transport(&self.config), app.event_sender());
        app = app.with_dispatcher(Box::new(dispatcher));

        // Same path as tapping the row of a browse listing.
        app.show_library(&[PlaylistItem {
            source_path: self.path.clone(),
            ..Default::default()
        }]);
        let row = app
            .document()
            .children(app.shell().library)
            .first()
            .copied()
            .context("library listing is empty")?;
        let action = if self.play {
            Action::PlayMovie
        } else {
            Action::AddMovie
        };
        let control = renderer::find_action(app.document(), row, action)
            .with_context(|| format!("library row has no {} control", action))?;

        app.tap(control)?;
        app.run_until_idle(self.config.request_timeout())?;

        if let Some(current) = &app.state().current_media {
            let kind = app.state().active_element;
            let stream = kind.and_then(|k| app.media(k).source()).unwrap_or("-");
            ui.print_message(&format!(
                "Now playing: {} ({}{})",
                current.item,
                self.config.server_url.trim_end_matches('/'),
                stream
            ));
        }

        Ok(())
    }
}
