use crate::application::handlers::{Continuation, HandlerContext};
use crate::application::state::{CurrentMedia, Neighbor};
use crate::core::error::RemoteError;
use crate::core::events::MediaEvent;
use crate::core::models::{Direction, MediaKind, PlaylistItem};
use crate::core::traits::HttpResponse;
use crate::modules::dispatch::actions::Action;
use crate::modules::overlay::manager::OverlayId;
use crate::modules::remote::api::{self, ApiRequest};
use crate::modules::view::document::{Matcher, NodeId};
use crate::modules::view::info_sheet::InfoSheet;
use crate::modules::view::renderer;
use anyhow::Result;

/// Drives what plays and the panels around it.
///
/// Responsible for:
/// - Opening, resuming and closing the player
/// - Previous/next navigation and auto-advance on end of media
/// - Switching between progressive and random-access streams
/// - Adding entries to and deleting entries from the playlist
/// - The info panel
pub struct PlaybackHandler;

impl PlaybackHandler {
    /// Run the behaviour bound to `action`. `origin` is the tapped node and
    /// `control` the node that carries the action.
    pub fn perform(
        &self,
        action: Action,
        origin: NodeId,
        control: NodeId,
        ctx: &mut HandlerContext,
    ) -> Result<()> {
        match action {
            Action::OpenInfo => self.open_info(origin, ctx),
            Action::CloseInfo => self.close_info(ctx),
            Action::OpenMovie => {
                let item = ctx
                    .document
                    .closest(origin, Matcher::ItemData)
                    .and_then(|row| ctx.document.item(row).cloned())
                    .or_else(|| ctx.state.current_media.as_ref().map(|c| c.item.clone()));
                if let Some(item) = item {
                    self.open(item, ctx);
                }
            }
            Action::CloseMovie => self.close(ctx),
            Action::AddMovie => self.add(origin, false, ctx),
            Action::PlayMovie => self.add(origin, true, ctx),
            Action::DeleteMovie => self.delete(origin, ctx),
            Action::PrevMovie => self.navigate(Direction::Prev, control, ctx),
            Action::NextMovie => self.navigate(Direction::Next, control, ctx),
            Action::SeekableMovie => self.seek_toggle(ctx),
            Action::StartDrag => {}
        }
        Ok(())
    }

    pub fn handle(&self, event: &MediaEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            MediaEvent::Ended { element } => {
                if ctx.state.active_element != Some(*element) {
                    return Ok(());
                }
                if let Some(id) = ctx.state.current_id().cloned() {
                    tracing::debug!(%id, "media ended, looking up next item");
                    ctx.issue(
                        ApiRequest::Neighbor {
                            direction: Direction::Next,
                            id,
                        },
                        Continuation::AutoAdvance,
                    );
                }
            }
        }
        Ok(())
    }

    /// Select and play `item`, or resume it when it is already playing.
    pub fn open(&self, item: PlaylistItem, ctx: &mut HandlerContext) {
        let Some(id) = item.server_id.clone() else {
            tracing::debug!(path = %item.source_path, "cannot open an entry without server id");
            return;
        };

        let player_open = ctx.state.overlays.is_open(OverlayId::Player);
        let same = ctx
            .state
            .current_media
            .as_ref()
            .map(|c| c.item.same_entry(&item))
            .unwrap_or(false);

        if player_open && same {
            if let Some(kind) = ctx.state.active_element {
                ctx.media.get_mut(kind).play();
            }
            return;
        }

        self.close_info(ctx);
        let panel = ctx.shell.playlist_panel;
        if ctx.state.overlays.close(OverlayId::Panel(panel)) {
            ctx.document.set_menus_visible(panel, false);
        }

        if !same {
            ctx.state.current_media = Some(CurrentMedia::new(item.clone()));
            // A failed lookup for the old selection may have left a control locked.
            ctx.document.set_disabled(ctx.shell.prev_button, false);
            ctx.document.set_disabled(ctx.shell.next_button, false);
            for direction in [Direction::Prev, Direction::Next] {
                ctx.issue(
                    ApiRequest::Neighbor {
                        direction,
                        id: id.clone(),
                    },
                    Continuation::Neighbor { direction },
                );
            }
        }
        // Keep the local seek mode of a re-opened selection.
        let item = ctx
            .state
            .current_media
            .as_ref()
            .map(|c| c.item.clone())
            .unwrap_or(item);

        tracing::info!(%id, name = %item.display_name(), "opening");

        ctx.state.overlays.open(OverlayId::Player);
        ctx.document.set_hidden(ctx.shell.player, false);
        ctx.document.set_text(ctx.shell.player_heading, item.display_name());

        let (kind, unused) = if item.has_video() {
            (MediaKind::Video, MediaKind::Audio)
        } else {
            (MediaKind::Audio, MediaKind::Video)
        };

        let idle = ctx.media.get_mut(unused);
        idle.pause();
        idle.set_source(None);
        idle.set_visible(false);
        ctx.document.set_hidden(ctx.shell.media_node(unused), true);

        let stream = api::stream_path(&id, item.stream_mode());
        let element = ctx.media.get_mut(kind);
        element.set_source(Some(&stream));
        element.set_visible(true);
        if kind == MediaKind::Video {
            element.set_poster(Some(&api::thumbnail_path(&item.link)));
        }
        element.load();
        element.play();
        ctx.document.set_hidden(ctx.shell.media_node(kind), false);
        ctx.state.active_element = Some(kind);

        ctx.document.set_hidden(ctx.shell.seek_button, item.is_transcoded());
        mark_active_row(ctx);
    }

    pub fn close(&self, ctx: &mut HandlerContext) {
        for kind in [MediaKind::Audio, MediaKind::Video] {
            let element = ctx.media.get_mut(kind);
            element.pause();
            element.set_current_time(0.0);
        }

        ctx.state.overlays.close(OverlayId::Player);
        ctx.document.set_hidden(ctx.shell.player, true);
        ctx.state.current_media = None;
        ctx.state.active_element = None;
        mark_active_row(ctx);
    }

    fn navigate(&self, direction: Direction, control: NodeId, ctx: &mut HandlerContext) {
        let Some(id) = ctx.state.current_id().cloned() else {
            return;
        };

        ctx.document.set_disabled(control, true);
        ctx.issue(
            ApiRequest::Neighbor { direction, id },
            Continuation::Navigate { direction },
        );
    }

    /// Flip between progressive and random-access streaming, keeping the position.
    pub fn seek_toggle(&self, ctx: &mut HandlerContext) {
        let Some(kind) = ctx.state.active_element else {
            return;
        };
        let Some(current) = ctx.state.current_media.as_mut() else {
            return;
        };
        let Some(id) = current.item.server_id.clone() else {
            return;
        };

        let element = ctx.media.get_mut(kind);
        let position = element.current_time();

        current.item.seekable = !current.item.seekable;
        let stream = api::stream_path(&id, current.item.stream_mode());
        tracing::debug!(%stream, position, "switching stream mode");

        element.set_source(Some(&stream));
        element.load();
        element.set_current_time(position);
        element.play();
    }

    fn add(&self, origin: NodeId, autoplay: bool, ctx: &mut HandlerContext) {
        let Some(row) = ctx.document.closest(origin, Matcher::ItemData) else {
            return;
        };
        let Some(node) = ctx.document.get(row) else {
            return;
        };
        if node.disabled {
            tracing::debug!(?row, "row already added");
            return;
        }
        let Some(item) = node.item.as_ref() else {
            return;
        };

        let path = item.source_path.clone();
        ctx.issue(ApiRequest::Add { path }, Continuation::Add { row, autoplay });
    }

    fn delete(&self, origin: NodeId, ctx: &mut HandlerContext) {
        let Some(row) = ctx.document.closest(origin, Matcher::ItemData) else {
            return;
        };
        if ctx.document.get(row).map(|n| n.disabled).unwrap_or(true) {
            tracing::debug!(?row, "delete already pending");
            return;
        }
        let Some(id) = ctx.document.item(row).and_then(|i| i.server_id.clone()) else {
            return;
        };

        ctx.document.set_disabled(row, true);
        ctx.issue(ApiRequest::Delete { id }, Continuation::Delete { row });
    }

    fn open_info(&self, origin: NodeId, ctx: &mut HandlerContext) {
        let item = ctx
            .document
            .closest(origin, Matcher::ItemData)
            .and_then(|row| ctx.document.item(row).cloned())
            .or_else(|| ctx.state.current_media.as_ref().map(|c| c.item.clone()));
        let Some(item) = item else {
            return;
        };

        let sheet = InfoSheet::build(&item);
        ctx.document.set_text(ctx.shell.info_heading, sheet.title.clone());
        ctx.document.set_text(ctx.shell.info_thumbnail, sheet.thumbnail.clone());
        ctx.document.set_text(ctx.shell.info_sheet, sheet.to_string());
        ctx.document.set_hidden(ctx.shell.info, false);
        ctx.state.overlays.open(OverlayId::Info);

    }

    pub fn close_info(&self, ctx: &mut HandlerContext) {
        ctx.state.overlays.close(OverlayId::Info);
        ctx.document.set_hidden(ctx.shell.info, true);
    }

    // ── completions ──────────────────────────────────────────────────────────

    pub fn complete(
        &self,
        continuation: Continuation,
        outcome: Result<HttpResponse, RemoteError>,
        ctx: &mut HandlerContext,
    ) -> Result<()> {
        match continuation {
            Continuation::Add { row, autoplay } => {
                let added = api::expect_success(outcome).and_then(|r| api::decode_item(&r.body));
                match added {
                    Ok(item) => {
                        ctx.document.set_disabled(row, true);
                        ctx.notify_ok(format!(
                            "Movie \"{}\" added to playlist.",
                            item.display_name()
                        ));
                        if autoplay {
                            self.open(item, ctx);
                        }
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "add rejected");
                        ctx.notify_error("Incompatible media file!");
                    }
                }
            }

            Continuation::Delete { row } => match api::expect_success(outcome) {
                Ok(_) => {
                    ctx.document.remove(row);
                    ctx.shell.relayout(ctx.document);
                    ctx.state.overlays.prune(ctx.document);
                    ctx.notify_ok("Movie removed.");
                }
                Err(err) => {
                    tracing::debug!(error = %err, "delete rejected");
                    ctx.notify_error("Unable to delete movie!");
                }
            },

            Continuation::Neighbor { direction } => {
                let neighbor = lookup(outcome).map(Box::new);
                let control = match direction {
                    Direction::Prev => ctx.shell.prev_button,
                    Direction::Next => ctx.shell.next_button,
                };
                ctx.document.set_hidden(control, neighbor.is_none());

                // Applied to whatever is selected now.
                if let Some(current) = ctx.state.current_media.as_mut() {
                    *current.neighbor_mut(direction) = match neighbor {
                        Some(item) => Neighbor::Item(item),
                        None => Neighbor::Absent,
                    };
                }
            }

            Continuation::Navigate { direction } => {
                if let Some(item) = lookup(outcome) {
                    tracing::debug!(?direction, "navigating");
                    self.open(item, ctx);
                    ctx.document.set_disabled(ctx.shell.prev_button, false);
                    ctx.document.set_disabled(ctx.shell.next_button, false);
                }
            }

            Continuation::AutoAdvance => match lookup(outcome) {
                Some(item) => self.open(item, ctx),
                None => {
                    tracing::info!("end of playlist reached");
                    self.close(ctx);
                }
            },

            Continuation::RefreshPlaylist { .. } | Continuation::SaveOrder => {}
        }
        Ok(())
    }
}

/// Neighbour lookups fail silently: errors read as "no neighbour".
fn lookup(outcome: Result<HttpResponse, RemoteError>) -> Option<PlaylistItem> {
    api::expect_success(outcome)
        .and_then(|response| api::decode_neighbor(&response.body))
        .unwrap_or_else(|err| {
            tracing::debug!(error = %err, "neighbour lookup failed");
            None
        })
}

/// Flag the playlist row of the current selection, clearing every other row.
pub fn mark_active_row(ctx: &mut HandlerContext) {
    let current = ctx.state.current_id().cloned();
    let list = ctx.shell.playlist;
    let active = current
        .as_ref()
        .and_then(|id| renderer::find_row(ctx.document, list, id));

    for row in ctx.document.children(list).to_vec() {
        if let Some(node) = ctx.document.get_mut(row) {
            node.active = Some(row) == active;
        }
    }
}
