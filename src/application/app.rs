use crate::application::handlers::interaction_handler::{Dispatch, InteractionHandler};
use crate::application::handlers::network_handler::NetworkHandler;
use crate::application::handlers::playback_handler::PlaybackHandler;
use crate::application::handlers::sync_handler::SyncHandler;
use crate::application::handlers::touch_handler::{TouchHandler, TouchResult};
use crate::application::handlers::{HandlerContext, MediaPair, PendingRequests};
use crate::application::state::AppState;
use crate::config::ClientConfig;
use crate::core::error::RemoteError;
use crate::core::events::*;
use crate::core::models::{MediaKind, PlaylistItem};
use crate::core::traits::*;
use crate::modules::drag::engine::DragEngine;
use crate::modules::sync::poller::{PlaylistPoller, TickDecision};
use crate::modules::view::document::{Document, NodeId};
use crate::modules::view::renderer;
use crate::modules::view::shell::Shell;
use anyhow::Result;
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::time::{Duration, Instant};

const VIEWPORT_WIDTH: f64 = 480.0;
const VIEWPORT_HEIGHT: f64 = 800.0;

/// Main application orchestrator
pub struct Application {
    document: Document,
    shell: Shell,
    state: AppState,
    media: MediaPair,
    requests: PendingRequests,
    poller: PlaylistPoller,
    drag: DragEngine,
    presenter: Option<Box<dyn Presenter>>,

    event_tx: EventSender,
    event_rx: EventReceiver,

    // Keep track of running state
    running: bool,
}

impl Application {
    pub fn new(config: &ClientConfig) -> Self {
        let (tx, rx) = bounded(100);
        let mut document = Document::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let shell = Shell::build(&mut document);

        Self {
            document,
            shell,
            state: AppState::default(),
            media: MediaPair::headless(),
            requests: PendingRequests::new(None),
            poller: PlaylistPoller::new(config.poll_interval()),
            drag: DragEngine::new(config.autoscroll()),
            presenter: None,
            event_tx: tx,
            event_rx: rx,
            running: false,
        }
    }

    /// Set the request dispatcher
    pub fn with_dispatcher(mut self, dispatcher: Box<dyn RequestDispatcher>) -> Self {
        self.requests.set_dispatcher(dispatcher);
        self
    }

    /// Set the presenter notifications and refreshed playlists go to
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Rebuild the page for a viewport of the given size
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.document = Document::new(width, height);
        self.shell = Shell::build(&mut self.document);
        self
    }

    /// Get event sender (for modules to emit events)
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn media(&self, kind: MediaKind) -> &dyn MediaElement {
        self.media.get(kind)
    }

    /// Playback element, for hosts that report position or state back
    pub fn media_mut(&mut self, kind: MediaKind) -> &mut dyn MediaElement {
        self.media.get_mut(kind)
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    fn context(&mut self) -> HandlerContext<'_> {
        HandlerContext {
            document: &mut self.document,
            shell: &self.shell,
            state: &mut self.state,
            media: &mut self.media,
            requests: &mut self.requests,
            poller: &mut self.poller,
            drag: &self.drag,
            presenter: &mut self.presenter,
        }
    }

    /// Fill the library listing with browsable files offered for adding.
    pub fn show_library(&mut self, items: &[PlaylistItem]) {
        renderer::render_library(&mut self.document, self.shell.library, items);
        self.shell.relayout(&mut self.document);
    }

    /// Fetch the playlist now, outside the polling schedule.
    pub fn refresh_playlist(&mut self) {
        SyncHandler.refresh_now(&mut self.context());
    }

    // ── input entry points ───────────────────────────────────────────────────

    pub fn tap(&mut self, origin: NodeId) -> Result<Dispatch> {
        let event = InteractionEvent::Tap { origin };
        InteractionHandler.handle(&event, &PlaybackHandler, &SyncHandler, &mut self.context())
    }

    pub fn touch_move(&mut self, target: NodeId, touches: Vec<TouchPoint>) -> Result<TouchResult> {
        TouchHandler.handle(&TouchEvent::Move { target, touches }, &mut self.context())
    }

    pub fn touch_end(&mut self, target: NodeId, changed_touches: Vec<TouchPoint>) -> Result<TouchResult> {
        TouchHandler.handle(
            &TouchEvent::End {
                target,
                changed_touches,
            },
            &mut self.context(),
        )
    }

    pub fn media_ended(&mut self, element: MediaKind) -> Result<()> {
        PlaybackHandler.handle(&MediaEvent::Ended { element }, &mut self.context())
    }

    /// Deliver the completion of the request issued under `ticket`.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, RemoteError>) -> Result<()> {
        NetworkHandler.handle(
            NetworkEvent::Completed { ticket, outcome },
            &PlaybackHandler,
            &TouchHandler,
            &SyncHandler,
            &mut self.context(),
        )
    }

    /// Run one poller tick as of `now`.
    pub fn tick(&mut self, now: Instant) -> TickDecision {
        SyncHandler.tick(now, &mut self.context())
    }

    // ── event loop ───────────────────────────────────────────────────────────

    /// Handle a single event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Interaction(InteractionEvent::Tap { origin }) => {
                self.tap(origin)?;
            }
            AppEvent::Touch(te) => {
                TouchHandler.handle(&te, &mut self.context())?;
            }
            AppEvent::Media(me) => {
                PlaybackHandler.handle(&me, &mut self.context())?;
            }
            AppEvent::Network(NetworkEvent::Completed { ticket, outcome }) => {
                self.complete(ticket, outcome)?;
            }
            AppEvent::Sync(SyncEvent::Tick) => {
                self.tick(Instant::now());
            }
            AppEvent::Shutdown => {
                self.running = false;
            }
        }

        Ok(())
    }

    /// Run the main event loop
    pub fn run(&mut self) -> Result<()> {
        self.running = true;

        while self.running {
            let wait = self.poller.until_due(Instant::now());
            match self.event_rx.recv_timeout(wait) {
                Ok(event) => self.handle_event(event)?,
                Err(RecvTimeoutError::Timeout) => {
                    self.handle_event(AppEvent::Sync(SyncEvent::Tick))?;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    /// Process events once without entering the main loop (useful for one-off commands)
    pub fn run_once(&mut self) -> Result<()> {
        self.process_events()
    }

    /// Handle events until every issued request has completed.
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        while !self.requests.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                anyhow::bail!("timed out waiting for {} request(s)", self.requests.len());
            }
            match self.event_rx.recv_timeout(deadline - now) {
                Ok(event) => self.handle_event(event)?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }
}
