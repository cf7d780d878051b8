use crate::application::state::{Notification, NotificationLevel};
use crate::core::models::PlaylistItem;
use crate::core::traits::Presenter;
use crate::utils::{format_duration, truncate_title};
use anyhow::Result;
use crossterm::{
    cursor,
    style::Stylize,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::io::stdout;

const TITLE_WIDTH: usize = 48;

pub struct TerminalRenderer {
    // Clear the screen before each refreshed playlist
    redraw: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { redraw: false }
    }

    /// Redraw the whole screen on every playlist refresh, for long-running views.
    pub fn redrawing(mut self) -> Self {
        self.redraw = true;
        self
    }

    pub fn print_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    pub fn print_playlist(&self, items: &[PlaylistItem]) {
        if items.is_empty() {
            println!("Playlist is empty.");
            return;
        }

        let total = items.len();
        for (index, item) in items.iter().enumerate() {
            println!("[{}/{}] {}", index + 1, total, playlist_line(item));
        }
    }

    fn clear(&self) -> Result<()> {
        let mut stdout = stdout();
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One playlist entry: id, title, duration and a marker for transcoded media.
pub fn playlist_line(item: &PlaylistItem) -> String {
    let id = item
        .server_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = format!(
        "{:>6}  {:<width$}  {}",
        id,
        truncate_title(&item.display_name(), TITLE_WIDTH),
        format_duration(item.duration()),
        width = TITLE_WIDTH
    );
    if item.is_transcoded() {
        line.push_str("  (transcoded)");
    }
    line
}

impl Presenter for TerminalRenderer {
    fn notify(&mut self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message.as_str().green()),
            NotificationLevel::Error => eprintln!("{}", notification.message.as_str().red()),
        }
    }

    fn playlist_rendered(&mut self, items: &[PlaylistItem]) {
        if self.redraw {
            if let Err(err) = self.clear() {
                tracing::debug!(error = %err, "could not clear the terminal");
            }
        }
        self.print_playlist(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ServerId, TranscodingStatus};

    #[test]
    fn line_shows_id_title_and_duration() {
        let item: PlaylistItem = serde_json::from_str(
            r#"{"serverid": 12, "path": "/m/a.mkv", "name": "a.mkv", "meta": {"duration": "3725,250000"}}"#,
        )
        .unwrap();

        let line = playlist_line(&item);
        assert!(line.trim_start().starts_with("12  a.mkv"));
        assert!(line.ends_with("01:02:05.250"));
    }

    #[test]
    fn entries_without_id_and_transcoded_entries_are_marked() {
        let item = PlaylistItem {
            server_id: None,
            source_path: "/m/b.flac".into(),
            ..Default::default()
        };
        assert!(playlist_line(&item).trim_start().starts_with("-  b.flac"));

        let item = PlaylistItem {
            server_id: Some(ServerId::new("3")),
            transcoding_status: TranscodingStatus::Complete,
            ..Default::default()
        };
        assert!(playlist_line(&item).ends_with("(transcoded)"));
    }
}
