use crate::application::handlers::{Continuation, HandlerContext};
use crate::core::error::RemoteError;
use crate::core::traits::HttpResponse;
use crate::modules::remote::api::{self, ApiRequest};
use crate::modules::sync::poller::TickDecision;
use crate::modules::view::renderer;
use anyhow::Result;
use std::time::Instant;

/// Keeps the rendered playlist in step with the server.
pub struct SyncHandler;

impl SyncHandler {
    /// Periodic refresh, suppressed while the user is busy.
    pub fn tick(&self, now: Instant, ctx: &mut HandlerContext) -> TickDecision {
        let activity = ctx.state.activity(ctx.document);
        let decision = ctx.poller.on_tick(now, activity);

        match decision {
            TickDecision::Fetch => {
                ctx.issue(ApiRequest::Playlist, Continuation::RefreshPlaylist { polled: true });
            }
            TickDecision::Skip(reason) => tracing::debug!(%reason, "playlist refresh skipped"),
        }
        decision
    }

    /// Fetch the playlist right away.
    pub fn refresh_now(&self, ctx: &mut HandlerContext) {
        ctx.issue(ApiRequest::Playlist, Continuation::RefreshPlaylist { polled: false });
    }

    pub fn complete(
        &self,
        polled: bool,
        outcome: Result<HttpResponse, RemoteError>,
        ctx: &mut HandlerContext,
    ) -> Result<()> {
        if polled {
            let activity = ctx.state.activity(ctx.document);
            if !ctx.poller.settle(activity) {
                tracing::debug!("user became busy, dropping playlist refresh");
                return Ok(());
            }
        }

        let response = match api::expect_success(outcome) {
            Ok(response) => response,
            Err(err) => {
                ctx.notify_error(err.banner_text());
                return Ok(());
            }
        };

        let items = match api::decode_playlist(&response.body) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "playlist payload rejected");
                ctx.notify_error("Invalid playlist data");
                return Ok(());
            }
        };

        tracing::debug!(count = items.len(), "playlist refreshed");
        let current = ctx.state.current_id().cloned();
        renderer::render_playlist(ctx.document, ctx.shell.playlist, &items, current.as_ref());
        ctx.shell.relayout(ctx.document);
        ctx.state.overlays.prune(ctx.document);

        if let Some(row) = current
            .as_ref()
            .and_then(|id| renderer::find_row(ctx.document, ctx.shell.playlist, id))
        {
            ctx.document.scroll_into_view(row);
        }

        if let Some(presenter) = ctx.presenter.as_mut() {
            presenter.playlist_rendered(&items);
        }

        Ok(())
    }
}
