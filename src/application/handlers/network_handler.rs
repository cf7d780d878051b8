use crate::application::handlers::playback_handler::PlaybackHandler;
use crate::application::handlers::sync_handler::SyncHandler;
use crate::application::handlers::touch_handler::TouchHandler;
use crate::application::handlers::{Continuation, HandlerContext};
use crate::core::events::NetworkEvent;
use anyhow::Result;

/// Resolves request completions against the continuation table.
pub struct NetworkHandler;

impl NetworkHandler {
    pub fn handle(
        &self,
        event: NetworkEvent,
        playback: &PlaybackHandler,
        touch: &TouchHandler,
        sync: &SyncHandler,
        ctx: &mut HandlerContext,
    ) -> Result<()> {
        match event {
            NetworkEvent::Completed { ticket, outcome } => {
                let Some(continuation) = ctx.requests.resolve(ticket) else {
                    tracing::warn!(ticket, "completion for unknown ticket");
                    return Ok(());
                };
                tracing::debug!(ticket, ?continuation, ok = outcome.is_ok(), "request completed");

                match continuation {
                    Continuation::RefreshPlaylist { polled } => sync.complete(polled, outcome, ctx),
                    Continuation::SaveOrder => touch.complete(outcome, ctx),
                    other => playback.complete(other, outcome, ctx),
                }
            }
        }
    }
}
