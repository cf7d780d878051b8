use crate::core::models::{Direction, MediaKind, PlaylistItem, ServerId};
use crate::modules::drag::engine::DragSession;
use crate::modules::overlay::manager::{OverlayId, OverlayManager};
use crate::modules::sync::poller::Activity;
use crate::modules::view::document::Document;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient banner shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Cached answer of a neighbour lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Neighbor {
    #[default]
    Unfetched,
    Absent,
    Item(Box<PlaylistItem>),
}

impl Neighbor {
    pub fn item(&self) -> Option<&PlaylistItem> {
        match self {
            Neighbor::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// The selected item and its lazily fetched neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentMedia {
    pub item: PlaylistItem,
    pub prev: Neighbor,
    pub next: Neighbor,
}

impl CurrentMedia {
    pub fn new(item: PlaylistItem) -> Self {
        Self {
            item,
            prev: Neighbor::Unfetched,
            next: Neighbor::Unfetched,
        }
    }

    pub fn id(&self) -> Option<&ServerId> {
        self.item.server_id.as_ref()
    }

    pub fn neighbor_mut(&mut self, direction: Direction) -> &mut Neighbor {
        match direction {
            Direction::Prev => &mut self.prev,
            Direction::Next => &mut self.next,
        }
    }
}

/// Controller state (single source of truth)
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current_media: Option<CurrentMedia>,

    /// Element the current item plays through
    pub active_element: Option<MediaKind>,

    pub drag: Option<DragSession>,
    pub overlays: OverlayManager,

    /// Most recent banners, oldest first
    pub notifications: VecDeque<Notification>,
}

/// Banners kept in [`AppState::notifications`].
pub const NOTIFICATION_HISTORY: usize = 16;

impl AppState {
    pub fn current_id(&self) -> Option<&ServerId> {
        self.current_media.as_ref().and_then(|c| c.id())
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn push_notification(&mut self, notification: Notification) {
        if self.notifications.len() == NOTIFICATION_HISTORY {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    pub fn activity(&self, document: &Document) -> Activity {
        Activity {
            player_open: self.overlays.is_open(OverlayId::Player),
            info_open: self.overlays.is_open(OverlayId::Info),
            row_menu_open: self.overlays.has_open_row_menu(document),
            dragging: self.drag.is_some(),
        }
    }
}
