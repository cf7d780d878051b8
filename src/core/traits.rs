use crate::config::ClientConfig;
use crate::core::error::RemoteError;
use crate::core::events::Ticket;
use crate::core::models::PlaylistItem;
use crate::modules::remote::api::ApiRequest;
use anyhow::Result;

/// Raw answer of the media server to one GET.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Abstraction for the request/response channel to the media server
pub trait Transport: Send + Sync {
    /// Perform a GET on a server-relative path (`/playlist`, `/next/42`, ...)
    fn get(&self, path: &str) -> std::result::Result<HttpResponse, RemoteError>;
}

/// Abstraction for issuing requests without blocking the event thread.
///
/// Implementations must eventually deliver exactly one completion per
/// ticket back to the application. Nothing is cancelled or deduplicated.
pub trait RequestDispatcher: Send {
    fn dispatch(&mut self, ticket: Ticket, request: &ApiRequest);
}

/// Abstraction for a playback primitive (an audio or video element)
pub trait MediaElement: Send {
    /// Assign a stream reference. Assigning always schedules a fresh load,
    /// `None` empties the element.
    fn set_source(&mut self, source: Option<&str>);

    /// Current stream reference
    fn source(&self) -> Option<&str>;

    /// Start loading the assigned source
    fn load(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Check if paused
    fn is_paused(&self) -> bool;

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Show or hide the element
    fn set_visible(&mut self, visible: bool);

    /// Check if visible
    fn is_visible(&self) -> bool;

    /// Poster image shown before the first frame
    fn set_poster(&mut self, _poster: Option<&str>) {}

    /// Get as Any for downcasting (needed for backend-specific inspection)
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Abstraction for presenting banners and rendered playlists to the user
pub trait Presenter: Send {
    /// Show a transient notification banner
    fn notify(&mut self, notification: &crate::application::state::Notification);

    /// Called after the playlist was re-rendered from a fresh snapshot
    /// Default implementation does nothing
    fn playlist_rendered(&mut self, _items: &[PlaylistItem]) {}
}

/// Abstraction for configuration storage
pub trait ConfigStore {
    /// Load configuration, creating defaults when absent
    fn load(&self) -> Result<ClientConfig>;

    /// Save configuration
    fn save(&self, config: &ClientConfig) -> Result<()>;
}
