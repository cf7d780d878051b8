use crate::modules::view::document::{Document, NodeId, NodeKind};
use std::collections::BTreeSet;

/// An exclusively opened panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayId {
    /// Player panel; closed only by its close action.
    Player,
    /// Item info panel; closed only by its close action.
    Info,
    /// Any panel opened through an open directive (row menus, the playlist panel).
    Panel(NodeId),
}

/// Tracks open overlays and dismisses panels on outside interaction.
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    open: BTreeSet<OverlayId>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an overlay open. Returns `false` if it already was.
    pub fn open(&mut self, overlay: OverlayId) -> bool {
        self.open.insert(overlay)
    }

    /// Mark an overlay closed. Returns `false` if it was not open.
    pub fn close(&mut self, overlay: OverlayId) -> bool {
        self.open.remove(&overlay)
    }

    pub fn is_open(&self, overlay: OverlayId) -> bool {
        self.open.contains(&overlay)
    }

    /// Close every open panel whose subtree does not contain `origin`.
    ///
    /// `Player` and `Info` are never dismissed here, nor is anything in `exempt`.
    pub fn dismiss_outside(
        &mut self,
        document: &Document,
        origin: NodeId,
        exempt: &[OverlayId],
    ) -> Vec<OverlayId> {
        let to_close: Vec<OverlayId> = self
            .open
            .iter()
            .copied()
            .filter(|overlay| match overlay {
                OverlayId::Panel(node) => {
                    !exempt.contains(overlay) && !document.is_inclusive_ancestor(*node, origin)
                }
                OverlayId::Player | OverlayId::Info => false,
            })
            .collect();

        for overlay in &to_close {
            self.open.remove(overlay);
        }
        to_close
    }

    /// Whether a menu local to a playlist row is open.
    pub fn has_open_row_menu(&self, document: &Document) -> bool {
        self.open.iter().any(|overlay| match overlay {
            OverlayId::Panel(node) => document
                .get(*node)
                .map(|n| n.kind == NodeKind::Row)
                .unwrap_or(false),
            _ => false,
        })
    }

    /// Forget panels whose nodes were removed from the document.
    pub fn prune(&mut self, document: &Document) {
        self.open.retain(|overlay| match overlay {
            OverlayId::Panel(node) => document.contains_node(*node),
            _ => true,
        });
    }
}
