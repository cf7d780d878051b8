use crate::core::events::TouchPoint;
use crate::core::models::ServerId;
use crate::modules::view::document::{
    Animation, Document, DropPosition, Matcher, Node, NodeId, NodeKind, Rect,
};

/// State of the one drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Last pointer y seen.
    pub origin_y: f64,
    /// Row being moved.
    pub dragged: NodeId,
    /// Half the dragged row's height, used to project its edges around the pointer.
    pub half_height: f64,
    /// Floating clone following the pointer.
    pub proxy: NodeId,
    pub drop_target: Option<NodeId>,
    pub drop_position: DropPosition,
}

/// Edge distance and per-move step of autoscroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscrollSettings {
    pub margin: f64,
    pub step: f64,
}

impl Default for AutoscrollSettings {
    fn default() -> Self {
        Self {
            margin: 50.0,
            step: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Not a drag gesture; the default action stays allowed.
    Ignored,
    /// The session tracked the pointer; default scrolling must be suppressed.
    Tracked {
        began: bool,
        scrolled: f64,
        drop: Option<(NodeId, DropPosition)>,
    },
}

/// Result of committing a drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    pub moved: NodeId,
    pub moved_id: Option<ServerId>,
    /// Id of the row now immediately after the moved one; `None` when it is last.
    pub before_id: Option<ServerId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EndOutcome {
    Ignored,
    /// Session ended without a drop target.
    Cancelled { dragged: NodeId },
    Committed(DragCommit),
}

/// Touch-driven reordering of rows inside a list.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    settings: AutoscrollSettings,
}

impl DragEngine {
    pub fn new(settings: AutoscrollSettings) -> Self {
        Self { settings }
    }

    /// Handle a touch-move. Starts a session when none exists and the touch
    /// began on a drag handle, then tracks the pointer.
    pub fn touch_move(
        &self,
        document: &mut Document,
        session: &mut Option<DragSession>,
        target: NodeId,
        touches: &[TouchPoint],
    ) -> MoveOutcome {
        let [touch] = touches else {
            return MoveOutcome::Ignored;
        };

        let mut began = false;
        if session.is_none() {
            match Self::begin(document, target, *touch) {
                Some(started) => {
                    tracing::debug!(row = ?started.dragged, "drag started");
                    *session = Some(started);
                    began = true;
                }
                None => return MoveOutcome::Ignored,
            }
        }

        let Some(active) = session.as_mut() else {
            return MoveOutcome::Ignored;
        };
        let (scrolled, drop) = self.update(document, active, *touch);

        MoveOutcome::Tracked {
            began,
            scrolled,
            drop,
        }
    }

    fn begin(document: &mut Document, target: NodeId, touch: TouchPoint) -> Option<DragSession> {
        document.closest(target, Matcher::DragHandle)?;
        let row = document.closest(target, Matcher::Draggable)?;
        let source = document.get(row)?.clone();
        let half_height = (source.rect.height / 2.0).floor();

        let mut proxy = Node::new(NodeKind::Proxy)
            .with_rect(Rect::new(
                source.rect.left,
                touch.y,
                source.rect.width,
                source.rect.height,
            ))
            .with_text(source.text);
        proxy.margin_top = -half_height;
        proxy.item = source.item;
        let root = document.root();
        let proxy = document.append(root, proxy);

        if let Some(node) = document.get_mut(row) {
            node.animation = Animation::Suspended;
        }

        Some(DragSession {
            origin_y: touch.y,
            dragged: row,
            half_height,
            proxy,
            drop_target: None,
            drop_position: DropPosition::Above,
        })
    }

    fn update(
        &self,
        document: &mut Document,
        session: &mut DragSession,
        touch: TouchPoint,
    ) -> (f64, Option<(NodeId, DropPosition)>) {
        if let Some(proxy) = document.get_mut(session.proxy) {
            proxy.rect.top = touch.y;
        }

        document.clear_drop_markers();

        let scrolled = self.autoscroll(document, session, touch);

        let target = document
            .element_from_point(touch.x, touch.y)
            .and_then(|hit| document.closest(hit, Matcher::Draggable));

        let drop = target.map(|target| {
            let position = drop_position(document, session.dragged, target);
            if let Some(node) = document.get_mut(target) {
                node.drop = Some(position);
            }
            (target, position)
        });

        session.drop_target = target;
        if let Some((_, position)) = drop {
            session.drop_position = position;
        }
        session.origin_y = touch.y;

        (scrolled, drop)
    }

    fn autoscroll(&self, document: &mut Document, session: &DragSession, touch: TouchPoint) -> f64 {
        let container = document.scroll_container(session.dragged);
        let Some(node) = document.get(container) else {
            return 0.0;
        };
        let Some(scroll) = node.scroll else {
            return 0.0;
        };

        let delta = touch.y - session.origin_y;
        let min_y = touch.y - node.rect.top - scroll.scroll_top - session.half_height;
        let max_y = min_y + session.half_height * 2.0;

        if delta < 0.0 && min_y <= self.settings.margin {
            document.scroll_by(container, -self.settings.step)
        } else if delta > 0.0 && max_y >= scroll.client_height - self.settings.margin {
            document.scroll_by(container, self.settings.step)
        } else {
            0.0
        }
    }

    /// Handle a touch-end. The session is destroyed whatever happens.
    pub fn touch_end(
        &self,
        document: &mut Document,
        session: &mut Option<DragSession>,
        changed_touches: &[TouchPoint],
    ) -> EndOutcome {
        if changed_touches.len() != 1 {
            return EndOutcome::Ignored;
        }
        let Some(ended) = session.take() else {
            return EndOutcome::Ignored;
        };

        let target = ended
            .drop_target
            .filter(|t| document.contains_node(*t) && document.contains_node(ended.dragged));

        let outcome = match target {
            Some(target) => {
                match ended.drop_position {
                    DropPosition::Above => document.insert_before(ended.dragged, target),
                    DropPosition::Below => document.insert_after(ended.dragged, target),
                }
                document.clear_drop_markers();

                if let Some(node) = document.get_mut(ended.dragged) {
                    node.animation = Animation::Highlight;
                }
                if let Some(list) = document.parent(ended.dragged) {
                    document.relayout_list(list);
                }

                let moved_id = document
                    .item(ended.dragged)
                    .and_then(|item| item.server_id.clone());
                let before_id = document
                    .next_sibling(ended.dragged)
                    .and_then(|next| document.item(next))
                    .and_then(|item| item.server_id.clone());

                EndOutcome::Committed(DragCommit {
                    moved: ended.dragged,
                    moved_id,
                    before_id,
                })
            }
            None => {
                if let Some(node) = document.get_mut(ended.dragged) {
                    node.animation = Animation::Idle;
                }
                EndOutcome::Cancelled {
                    dragged: ended.dragged,
                }
            }
        };

        document.remove(ended.proxy);
        outcome
    }
}

/// `Below` when `target` is reachable walking forward from `dragged` through
/// its following siblings, `Above` otherwise. A dragged row with no
/// following sibling always drops above.
pub fn drop_position(document: &Document, dragged: NodeId, target: NodeId) -> DropPosition {
    let mut node = document.next_sibling(dragged).map(|_| dragged);
    while let Some(current) = node {
        if current == target {
            return DropPosition::Below;
        }
        node = document.next_sibling(current);
    }
    DropPosition::Above
}
