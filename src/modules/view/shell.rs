use crate::core::models::MediaKind;
use crate::modules::dispatch::actions::Action;
use crate::modules::view::document::{
    Document, Initializer, Node, NodeId, NodeKind, OpenDirective, Rect,
};

pub const PLAYLIST_PANEL_ID: &str = "playlist";
const CONTROL_ROW_HEIGHT: f64 = 80.0;
const HEADING_HEIGHT: f64 = 40.0;

/// Fixed page skeleton and the handles the controller works with.
///
/// Page flow: the playlist panel followed by the library listing. The
/// player and info panels cover the viewport and start hidden.
#[derive(Debug, Clone)]
pub struct Shell {
    pub playlist_panel: NodeId,
    pub playlist: NodeId,
    pub library: NodeId,

    pub player: NodeId,
    pub player_heading: NodeId,
    pub video: NodeId,
    pub audio: NodeId,
    pub prev_button: NodeId,
    pub seek_button: NodeId,
    pub next_button: NodeId,
    pub playlist_toggle: NodeId,
    pub close_button: NodeId,

    pub info: NodeId,
    pub info_heading: NodeId,
    pub info_thumbnail: NodeId,
    pub info_sheet: NodeId,
    pub info_close: NodeId,
}

impl Shell {
    pub fn build(document: &mut Document) -> Self {
        let root = document.root();
        let viewport = document.get(root).map(|n| n.rect).unwrap_or_default();
        let (width, height) = (viewport.width, viewport.height);
        let full = Rect::new(0.0, 0.0, width, height);

        // Page flow
        let playlist_panel = document.append(
            root,
            Node::new(NodeKind::Panel)
                .with_id(PLAYLIST_PANEL_ID)
                .with_rect(Rect::new(0.0, 0.0, width, 0.0))
                .with_init(Initializer::LoadPlaylist),
        );
        let playlist = document.append(
            playlist_panel,
            Node::new(NodeKind::List)
                .with_id("playlist-items")
                .with_rect(Rect::new(0.0, 0.0, width, 0.0)),
        );
        let library = document.append(
            root,
            Node::new(NodeKind::List)
                .with_id("library")
                .with_rect(Rect::new(0.0, 0.0, width, 0.0)),
        );

        // Player overlay
        let player = document.append(
            root,
            Node::new(NodeKind::Panel)
                .with_id("player")
                .with_rect(full)
                .hidden(),
        );
        let player_heading = document.append(
            player,
            Node::new(NodeKind::Element).with_rect(Rect::new(0.0, 0.0, width, HEADING_HEIGHT)),
        );
        let stage = Rect::new(
            0.0,
            HEADING_HEIGHT,
            width,
            (height - HEADING_HEIGHT - CONTROL_ROW_HEIGHT).max(0.0),
        );
        let video = document.append(
            player,
            Node::new(NodeKind::Media(MediaKind::Video)).with_rect(stage).hidden(),
        );
        let audio = document.append(
            player,
            Node::new(NodeKind::Media(MediaKind::Audio)).with_rect(stage).hidden(),
        );

        let control_top = height - CONTROL_ROW_HEIGHT;
        let slot = width / 5.0;
        let control = |index: f64| Rect::new(slot * index, control_top, slot, CONTROL_ROW_HEIGHT);
        let prev_button = document.append(
            player,
            Node::new(NodeKind::Element)
                .with_rect(control(0.0))
                .with_action(Action::PrevMovie)
                .hidden(),
        );
        let seek_button = document.append(
            player,
            Node::new(NodeKind::Element)
                .with_rect(control(1.0))
                .with_action(Action::SeekableMovie),
        );
        let next_button = document.append(
            player,
            Node::new(NodeKind::Element)
                .with_rect(control(2.0))
                .with_action(Action::NextMovie)
                .hidden(),
        );
        let playlist_toggle = document.append(
            player,
            Node::new(NodeKind::Element)
                .with_rect(control(3.0))
                .with_open(OpenDirective::Selector(format!("#{}", PLAYLIST_PANEL_ID))),
        );
        let close_button = document.append(
            player,
            Node::new(NodeKind::Element)
                .with_rect(control(4.0))
                .with_action(Action::CloseMovie),
        );

        // Info overlay
        let info = document.append(
            root,
            Node::new(NodeKind::Panel)
                .with_id("info")
                .with_rect(full)
                .hidden(),
        );
        let info_heading = document.append(
            info,
            Node::new(NodeKind::Element).with_rect(Rect::new(0.0, 0.0, width, HEADING_HEIGHT)),
        );
        let info_thumbnail = document.append(
            info,
            Node::new(NodeKind::Element).with_rect(Rect::new(0.0, HEADING_HEIGHT, width, 200.0)),
        );
        let info_sheet = document.append(
            info,
            Node::new(NodeKind::Element).with_rect(Rect::new(
                0.0,
                HEADING_HEIGHT + 200.0,
                width,
                (height - HEADING_HEIGHT - 200.0 - CONTROL_ROW_HEIGHT).max(0.0),
            )),
        );
        let info_close = document.append(
            info,
            Node::new(NodeKind::Element)
                .with_rect(Rect::new(0.0, control_top, width, CONTROL_ROW_HEIGHT))
                .with_action(Action::CloseInfo),
        );

        Self {
            playlist_panel,
            playlist,
            library,
            player,
            player_heading,
            video,
            audio,
            prev_button,
            seek_button,
            next_button,
            playlist_toggle,
            close_button,
            info,
            info_heading,
            info_thumbnail,
            info_sheet,
            info_close,
        }
    }

    pub fn media_node(&self, kind: MediaKind) -> NodeId {
        match kind {
            MediaKind::Video => self.video,
            MediaKind::Audio => self.audio,
        }
    }

    /// Stack the playlist rows, then move the library listing below them.
    pub fn relayout(&self, document: &mut Document) {
        document.relayout_list(self.playlist);

        let playlist_bottom = document
            .children(self.playlist)
            .iter()
            .filter_map(|row| document.get(*row))
            .map(|row| row.rect.bottom())
            .fold(0.0_f64, f64::max);

        let library_height = document
            .children(self.library)
            .iter()
            .filter_map(|row| document.get(*row))
            .map(|row| row.rect.height)
            .sum::<f64>();

        for (node, height) in [
            (self.playlist_panel, playlist_bottom),
            (self.playlist, playlist_bottom),
        ] {
            if let Some(n) = document.get_mut(node) {
                n.rect.height = height;
            }
        }
        if let Some(n) = document.get_mut(self.library) {
            n.rect.top = playlist_bottom;
            n.rect.height = library_height;
        }
        document.relayout_list(self.library);
    }
}
