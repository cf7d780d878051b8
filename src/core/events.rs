use crate::core::error::RemoteError;
use crate::core::models::MediaKind;
use crate::core::traits::HttpResponse;
use crate::modules::view::document::NodeId;

/// Pairs an issued request with the continuation waiting on it.
pub type Ticket = u64;

/// All events the controller processes, in arrival order, on one thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    // Pointer and tap input
    Interaction(InteractionEvent),

    // Touch drag input
    Touch(TouchEvent),

    // Media element notifications
    Media(MediaEvent),

    // Request completions
    Network(NetworkEvent),

    // Periodic playlist refresh
    Sync(SyncEvent),

    // Application lifecycle
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum InteractionEvent {
    /// A click or tap whose origin is `origin`.
    Tap { origin: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub enum TouchEvent {
    /// Touch moved. `touches` lists every point currently on the surface.
    Move { target: NodeId, touches: Vec<TouchPoint> },

    /// Touch lifted. `changed_touches` lists the points that ended.
    End { target: NodeId, changed_touches: Vec<TouchPoint> },
}

#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// The element reached the end of its media.
    Ended { element: MediaKind },
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    /// A request issued under `ticket` finished.
    Completed {
        ticket: Ticket,
        outcome: Result<HttpResponse, RemoteError>,
    },
}

#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The refresh interval elapsed.
    Tick,
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
