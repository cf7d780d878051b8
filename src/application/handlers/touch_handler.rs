use crate::application::handlers::{Continuation, HandlerContext};
use crate::core::error::RemoteError;
use crate::core::events::TouchEvent;
use crate::core::traits::HttpResponse;
use crate::modules::drag::engine::{EndOutcome, MoveOutcome};
use crate::modules::overlay::manager::OverlayId;
use crate::modules::remote::api::{self, ApiRequest};
use anyhow::Result;

/// Outcome of one touch event.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchResult {
    Moved(MoveOutcome),
    Ended(EndOutcome),
}

/// Wires the drag engine to the document, overlays and persistence.
pub struct TouchHandler;

impl TouchHandler {
    pub fn handle(&self, event: &TouchEvent, ctx: &mut HandlerContext) -> Result<TouchResult> {
        match event {
            TouchEvent::Move { target, touches } => {
                let outcome = ctx
                    .drag
                    .touch_move(ctx.document, &mut ctx.state.drag, *target, touches);
                Ok(TouchResult::Moved(outcome))
            }

            TouchEvent::End {
                changed_touches, ..
            } => {
                let outcome = ctx
                    .drag
                    .touch_end(ctx.document, &mut ctx.state.drag, changed_touches);

                match &outcome {
                    EndOutcome::Committed(commit) => {
                        if ctx.state.overlays.close(OverlayId::Panel(commit.moved)) {
                            ctx.document.set_menus_visible(commit.moved, false);
                        }
                        ctx.shell.relayout(ctx.document);

                        match commit.moved_id.clone() {
                            Some(moved) => {
                                tracing::info!(%moved, before = ?commit.before_id, "saving order");
                                ctx.issue(
                                    ApiRequest::Move {
                                        moved,
                                        before: commit.before_id.clone(),
                                    },
                                    Continuation::SaveOrder,
                                );
                            }
                            None => tracing::warn!("moved row has no server id"),
                        }
                    }
                    EndOutcome::Cancelled { dragged } => {
                        tracing::debug!(?dragged, "drag cancelled");
                    }
                    EndOutcome::Ignored => {}
                }
                Ok(TouchResult::Ended(outcome))
            }
        }
    }

    /// Report a failed save. The moved row stays where it was dropped.
    pub fn complete(
        &self,
        outcome: Result<HttpResponse, RemoteError>,
        ctx: &mut HandlerContext,
    ) -> Result<()> {
        if let Err(err) = api::expect_success(outcome) {
            tracing::debug!(error = %err, "order not saved");
            ctx.notify_error("Failed to save playlist");
        }
        Ok(())
    }
}
