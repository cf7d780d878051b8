use crate::core::models::{PlaylistItem, ServerId};
use crate::modules::dispatch::actions::Action;
use crate::modules::remote::api::thumbnail_path;
use crate::modules::view::document::{Document, Node, NodeId, NodeKind, OpenDirective, Rect};
use crate::utils::format_duration;

pub const ROW_HEIGHT: f64 = 72.0;
const THUMB_WIDTH: f64 = 72.0;
const TOOL_WIDTH: f64 = 48.0;

fn row_bounds(document: &Document, list: NodeId) -> (f64, f64) {
    document
        .get(list)
        .map(|n| (n.rect.left, n.rect.width))
        .unwrap_or((0.0, 0.0))
}

/// Replace the rows of `list` with one row per playlist entry.
///
/// The row whose id equals `current` is marked active. Returns the new rows
/// in order.
pub fn render_playlist(
    document: &mut Document,
    list: NodeId,
    items: &[PlaylistItem],
    current: Option<&ServerId>,
) -> Vec<NodeId> {
    document.clear_children(list);
    let (left, width) = row_bounds(document, list);
    let body_width = (width - THUMB_WIDTH - 2.0 * TOOL_WIDTH).max(0.0);

    items
        .iter()
        .map(|item| {
            let mut row = Node::new(NodeKind::Row)
                .with_rect(Rect::new(left, 0.0, width, ROW_HEIGHT))
                .with_text(item.display_name());
            if let Some(id) = &item.server_id {
                row.element_id = Some(id.to_string());
            }
            row.draggable = true;
            row.active = current.is_some() && item.server_id.as_ref() == current;
            row.item = Some(item.clone());
            let row = document.append(list, row);

            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left, 0.0, THUMB_WIDTH, ROW_HEIGHT))
                    .with_action(Action::OpenMovie)
                    .with_text(thumbnail_path(&item.link)),
            );
            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left + THUMB_WIDTH, 0.0, body_width, ROW_HEIGHT))
                    .with_text(format!(
                        "{}\n{}",
                        item.display_name(),
                        format_duration(item.duration())
                    )),
            );
            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(
                        left + width - 2.0 * TOOL_WIDTH,
                        0.0,
                        TOOL_WIDTH,
                        ROW_HEIGHT,
                    ))
                    .with_open(OpenDirective::Parent),
            );

            let mut handle = Node::new(NodeKind::Element)
                .with_rect(Rect::new(left + width - TOOL_WIDTH, 0.0, TOOL_WIDTH, ROW_HEIGHT))
                .with_action(Action::StartDrag);
            handle.drag_handle = true;
            document.append(row, handle);

            // Row-local menu, shown while the row is open.
            let menu = document.append(
                row,
                Node::new(NodeKind::Panel)
                    .with_rect(Rect::new(left + THUMB_WIDTH, 0.0, body_width, ROW_HEIGHT))
                    .hidden(),
            );
            let half = body_width / 2.0;
            document.append(
                menu,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left + THUMB_WIDTH, 0.0, half, ROW_HEIGHT))
                    .with_action(Action::OpenInfo),
            );
            document.append(
                menu,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left + THUMB_WIDTH + half, 0.0, half, ROW_HEIGHT))
                    .with_action(Action::DeleteMovie),
            );

            row
        })
        .collect()
}

/// Replace the rows of the library listing with one row per browsable file.
pub fn render_library(document: &mut Document, list: NodeId, items: &[PlaylistItem]) -> Vec<NodeId> {
    document.clear_children(list);
    let (left, width) = row_bounds(document, list);
    let body_width = (width - 2.0 * TOOL_WIDTH).max(0.0);

    items
        .iter()
        .map(|item| {
            let mut row = Node::new(NodeKind::Row)
                .with_rect(Rect::new(left, 0.0, width, ROW_HEIGHT))
                .with_text(item.display_name());
            row.item = Some(item.clone());
            let row = document.append(list, row);

            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left, 0.0, body_width, ROW_HEIGHT))
                    .with_text(item.source_path.clone()),
            );
            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(left + body_width, 0.0, TOOL_WIDTH, ROW_HEIGHT))
                    .with_action(Action::AddMovie),
            );
            document.append(
                row,
                Node::new(NodeKind::Element)
                    .with_rect(Rect::new(
                        left + body_width + TOOL_WIDTH,
                        0.0,
                        TOOL_WIDTH,
                        ROW_HEIGHT,
                    ))
                    .with_action(Action::PlayMovie),
            );

            row
        })
        .collect()
}

/// Row of `list` carrying the entry with the given id.
pub fn find_row(document: &Document, list: NodeId, id: &ServerId) -> Option<NodeId> {
    document
        .children(list)
        .iter()
        .copied()
        .find(|row| {
            document
                .item(*row)
                .and_then(|item| item.server_id.as_ref())
                .map(|sid| sid == id)
                .unwrap_or(false)
        })
}

/// Children of `row` carrying `action`, searched depth-first.
pub fn find_action(document: &Document, row: NodeId, action: Action) -> Option<NodeId> {
    document
        .descendants(row)
        .into_iter()
        .find(|node| document.get(*node).and_then(|n| n.action) == Some(action))
}
