use crate::application::handlers::playback_handler::PlaybackHandler;
use crate::application::handlers::sync_handler::SyncHandler;
use crate::application::handlers::HandlerContext;
use crate::core::events::InteractionEvent;
use crate::modules::dispatch::actions::Action;
use crate::modules::overlay::manager::OverlayId;
use crate::modules::view::document::{Initializer, Matcher, NodeId, OpenDirective};
use anyhow::Result;

/// What the router did with one tap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    pub action: Option<Action>,
    pub default_prevented: bool,
    pub opened: Vec<OverlayId>,
    pub closed: Vec<OverlayId>,
}

/// The single delegated listener for taps.
///
/// Runs the origin's open directive, then its action, then dismisses
/// panels the tap landed outside of.
pub struct InteractionHandler;

impl InteractionHandler {
    pub fn handle(
        &self,
        event: &InteractionEvent,
        playback: &PlaybackHandler,
        sync: &SyncHandler,
        ctx: &mut HandlerContext,
    ) -> Result<Dispatch> {
        match event {
            InteractionEvent::Tap { origin } => self.tap(*origin, playback, sync, ctx),
        }
    }

    fn tap(
        &self,
        origin: NodeId,
        playback: &PlaybackHandler,
        sync: &SyncHandler,
        ctx: &mut HandlerContext,
    ) -> Result<Dispatch> {
        let mut dispatch = Dispatch::default();

        let directive = ctx.document.get(origin).and_then(|n| n.open.clone());
        if let Some(directive) = directive {
            let panel = match &directive {
                OpenDirective::Parent => ctx.document.parent(origin),
                OpenDirective::Selector(selector) => ctx.document.query(selector),
            };

            if let Some(panel) = panel {
                let init = ctx.document.get(panel).and_then(|n| n.init);
                if let Some(Initializer::LoadPlaylist) = init {
                    sync.refresh_now(ctx);
                }
                ctx.state.overlays.open(OverlayId::Panel(panel));
                ctx.document.set_menus_visible(panel, true);
                dispatch.opened.push(OverlayId::Panel(panel));
                tracing::debug!(?panel, "panel opened");
            }
            dispatch.default_prevented = true;
        }

        if let Some(control) = ctx.document.closest(origin, Matcher::Action) {
            let node = ctx.document.get(control);
            let action = node.and_then(|n| n.action);
            let disabled = node.map(|n| n.disabled).unwrap_or(false);

            match action {
                Some(action) if !disabled => {
                    tracing::debug!(%action, "dispatching action");
                    playback.perform(action, origin, control, ctx)?;
                    dispatch.action = Some(action);
                    dispatch.default_prevented = true;
                }
                Some(action) => tracing::debug!(%action, "control disabled, tap ignored"),
                None => {}
            }
        }

        let exempt = dispatch.opened.clone();
        let closed = ctx
            .state
            .overlays
            .dismiss_outside(ctx.document, origin, &exempt);
        for overlay in &closed {
            if let OverlayId::Panel(panel) = overlay {
                ctx.document.set_menus_visible(*panel, false);
            }
        }
        dispatch.closed = closed;

        Ok(dispatch)
    }
}
