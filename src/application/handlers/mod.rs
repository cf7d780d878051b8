pub mod interaction_handler;
pub mod network_handler;
pub mod playback_handler;
pub mod sync_handler;
pub mod touch_handler;

use crate::application::state::{AppState, Notification};
use crate::core::events::Ticket;
use crate::core::models::{Direction, MediaKind};
use crate::core::traits::{MediaElement, Presenter, RequestDispatcher};
use crate::modules::drag::engine::DragEngine;
use crate::modules::playback::headless::HeadlessMediaElement;
use crate::modules::remote::api::ApiRequest;
use crate::modules::sync::poller::PlaylistPoller;
use crate::modules::view::document::{Document, NodeId};
use crate::modules::view::shell::Shell;
use std::collections::HashMap;

/// What to do once the answer to an issued request arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Replace the playlist rows. Polled refreshes are dropped if the user got busy.
    RefreshPlaylist { polled: bool },
    Add { row: NodeId, autoplay: bool },
    Delete { row: NodeId },
    SaveOrder,
    /// Neighbour prefetch after a selection change.
    Neighbor { direction: Direction },
    /// Prev/next control pressed.
    Navigate { direction: Direction },
    /// Lookup of what plays after the current item ended.
    AutoAdvance,
}

/// Continuation table keyed by ticket.
pub struct PendingRequests {
    next_ticket: Ticket,
    pending: HashMap<Ticket, Continuation>,
    dispatcher: Option<Box<dyn RequestDispatcher>>,
}

impl PendingRequests {
    pub fn new(dispatcher: Option<Box<dyn RequestDispatcher>>) -> Self {
        Self {
            next_ticket: 1,
            pending: HashMap::new(),
            dispatcher,
        }
    }

    pub fn set_dispatcher(&mut self, dispatcher: Box<dyn RequestDispatcher>) {
        self.dispatcher = Some(dispatcher);
    }

    /// Register `continuation` and hand the request to the dispatcher.
    pub fn issue(&mut self, request: ApiRequest, continuation: Continuation) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        tracing::debug!(ticket, path = %request.path(), ?continuation, "issuing request");
        self.pending.insert(ticket, continuation);

        match self.dispatcher.as_mut() {
            Some(dispatcher) => dispatcher.dispatch(ticket, &request),
            None => tracing::warn!(ticket, "no request dispatcher configured"),
        }
        ticket
    }

    pub fn resolve(&mut self, ticket: Ticket) -> Option<Continuation> {
        self.pending.remove(&ticket)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// The audio and video playback primitives of the player.
pub struct MediaPair {
    pub video: Box<dyn MediaElement>,
    pub audio: Box<dyn MediaElement>,
}

impl MediaPair {
    pub fn new(video: Box<dyn MediaElement>, audio: Box<dyn MediaElement>) -> Self {
        Self { video, audio }
    }

    pub fn headless() -> Self {
        Self::new(
            Box::new(HeadlessMediaElement::new(MediaKind::Video)),
            Box::new(HeadlessMediaElement::new(MediaKind::Audio)),
        )
    }

    pub fn get(&self, kind: MediaKind) -> &dyn MediaElement {
        match kind {
            MediaKind::Video => self.video.as_ref(),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: MediaKind) -> &mut dyn MediaElement {
        match kind {
            MediaKind::Video => self.video.as_mut(),
            MediaKind::Audio => self.audio.as_mut(),
        }
    }
}

/// All dependencies that event handlers need to do their work.
///
/// Built per event from disjoint borrows of the `Application` fields.
pub struct HandlerContext<'a> {
    pub document: &'a mut Document,
    pub shell: &'a Shell,
    pub state: &'a mut AppState,
    pub media: &'a mut MediaPair,
    pub requests: &'a mut PendingRequests,
    pub poller: &'a mut PlaylistPoller,
    pub drag: &'a DragEngine,
    pub presenter: &'a mut Option<Box<dyn Presenter>>,
}

impl<'a> HandlerContext<'a> {
    pub fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(message = %notification.message, "notification");
        } else {
            tracing::info!(message = %notification.message, "notification");
        }
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.notify(&notification);
        }
        self.state.push_notification(notification);
    }

    pub fn notify_ok(&mut self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }

    pub fn issue(&mut self, request: ApiRequest, continuation: Continuation) -> Ticket {
        self.requests.issue(request, continuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ServerId;
    use crate::modules::remote::dispatcher::testing::RecordingDispatcher;

    #[test]
    fn tickets_are_unique_and_resolve_once() {
        let (dispatcher, log) = RecordingDispatcher::new();
        let mut requests = PendingRequests::new(Some(Box::new(dispatcher)));

        let a = requests.issue(ApiRequest::Playlist, Continuation::RefreshPlaylist { polled: true });
        let b = requests.issue(ApiRequest::Playlist, Continuation::RefreshPlaylist { polled: false });
        assert_ne!(a, b);
        assert_eq!(log.paths(), vec!["/playlist", "/playlist"]);

        assert_eq!(requests.resolve(b), Some(Continuation::RefreshPlaylist { polled: false }));
        assert_eq!(requests.resolve(b), None);
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn issuing_without_a_dispatcher_still_registers() {
        let mut requests = PendingRequests::new(None);
        let ticket = requests.issue(
            ApiRequest::Delete { id: ServerId::new("1") },
            Continuation::SaveOrder,
        );
        assert_eq!(requests.resolve(ticket), Some(Continuation::SaveOrder));
    }
}
